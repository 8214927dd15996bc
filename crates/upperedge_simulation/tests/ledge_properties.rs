//! Randomized проверки солвера (seeded, без proptest)
//!
//! Сэмплы вокруг уступа (0,0,0) → (0,10,0), forward +X, right +Y.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use upperedge_simulation::*;

const SAMPLES: usize = 2000;

fn ledge() -> LedgeGeometry {
    LedgeGeometry::new(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::X, Vec3::Y).unwrap()
}

/// Left/right поменяны местами, right ось инвертирована
fn swapped_ledge() -> LedgeGeometry {
    LedgeGeometry::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::X, -Vec3::Y).unwrap()
}

fn random_sample(rng: &mut ChaCha8Rng) -> CharacterSample {
    let position = Vec3::new(rng.gen_range(-6.0..6.0), rng.gen_range(-4.0..14.0), 0.0);
    let heading: f32 = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
    CharacterSample::new(position, Vec3::new(heading.cos(), heading.sin(), 0.0))
}

/// Зеркало относительно середины уступа (y → 10 - y)
fn mirrored(sample: &CharacterSample) -> CharacterSample {
    CharacterSample::new(
        Vec3::new(sample.position.x, 10.0 - sample.position.y, sample.position.z),
        Vec3::new(sample.forward.x, -sample.forward.y, sample.forward.z),
    )
}

#[test]
fn test_eligible_only_when_gate_and_facing_pass() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let geometry = ledge();
    let mut eligible = 0;

    for _ in 0..SAMPLES {
        let sample = random_sample(&mut rng);
        let solution = solve(&geometry, &sample);

        if solution.eligibility.is_eligible() {
            eligible += 1;
            let angles = solution.angles.expect("eligible solution must have angles");
            assert!(angles.gate_passes(), "{:?}", sample);
            assert!(angles.char_forward.abs() > JUMP_FACING_THRESHOLD, "{:?}", sample);
        }
    }

    // Распределение покрывает и разрешённые прыжки
    assert!(eligible > 0);
}

#[test]
fn test_gate_failure_snaps_to_midpoint() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let geometry = ledge();

    for _ in 0..SAMPLES {
        let sample = random_sample(&mut rng);
        let solution = solve(&geometry, &sample);

        let gate = solution.angles.map(|a| a.gate_passes()).unwrap_or(false);
        if !gate {
            assert_eq!(solution.marker, geometry.midpoint(), "{:?}", sample);
            assert_eq!(solution.eligibility, JumpEligibility::Blocked, "{:?}", sample);
        }
    }
}

#[test]
fn test_marker_stays_on_segment() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let geometry = ledge();

    for _ in 0..SAMPLES {
        let sample = random_sample(&mut rng);
        let marker = solve(&geometry, &sample).marker;

        assert!(marker.is_finite(), "{:?}", sample);
        assert_eq!(marker.x, 0.0);
        assert_eq!(marker.z, 0.0);
        assert!((0.0..=10.0).contains(&marker.y), "{:?} → {:?}", sample, marker);
    }
}

#[test]
fn test_swapped_frames_mirror_marker() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let geometry = ledge();
    let swapped = swapped_ledge();

    for _ in 0..SAMPLES {
        let sample = random_sample(&mut rng);
        let direct = solve(&geometry, &sample);
        let mirror = solve(&swapped, &mirrored(&sample));

        assert_eq!(direct.eligibility, mirror.eligibility, "{:?}", sample);
        assert!(
            (mirror.marker.y - (10.0 - direct.marker.y)).abs() < 1e-3,
            "{:?}: {:?} vs {:?}",
            sample,
            direct.marker,
            mirror.marker
        );
    }
}

#[test]
fn test_solver_tick_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut solver = EdgeTargetSolver::new(ledge(), Vec3::new(-1.0, 5.0, 2.0));
    solver.on_character_enter(0u8);

    for _ in 0..200 {
        let sample = random_sample(&mut rng);
        let first = solver.tick_with(&sample).unwrap();
        let jump_first = solver.jump_target();
        let second = solver.tick_with(&sample).unwrap();

        assert_eq!(first, second);
        assert_eq!(jump_first, solver.jump_target());
        assert_eq!(solver.jump_target().is_some(), second.eligibility.is_eligible());
    }
}

#[test]
fn test_exit_always_clears_jump_target() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut solver = EdgeTargetSolver::new(ledge(), Vec3::new(-1.0, 5.0, 2.0));

    for _ in 0..200 {
        solver.on_character_enter(1u8);
        solver.tick_with(&random_sample(&mut rng));
        solver.on_character_exit();
        assert_eq!(solver.jump_target(), None);
    }
}
