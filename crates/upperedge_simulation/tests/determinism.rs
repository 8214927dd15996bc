//! Тесты детерминизма
//!
//! Проверяем что блуждание + ledge solver с одинаковым seed даёт
//! идентичные marker/eligibility траектории

use bevy::prelude::*;
use upperedge_simulation::*;

/// Запускает симуляцию и возвращает snapshot уступов после каждого тика
fn run_simulation(seed: u64, walker_count: usize, tick_count: usize) -> Vec<Vec<u8>> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let geometry = LedgeConfig::default().geometry().unwrap();

    let pairs: Vec<(Entity, Entity)> = {
        let mut commands = app.world_mut().commands();
        (0..walker_count)
            .map(|i| {
                let ledge = spawn_ledge(&mut commands, geometry, Vec3::new(0.0, 2.5, -1.0));
                let start = Vec3::new(i as f32 - walker_count as f32 / 2.0, 1.0, 2.5);
                let character = commands
                    .spawn((
                        Transform::from_translation(start),
                        RandomWalker {
                            anchor: start,
                            radius: 2.0,
                            ..default()
                        },
                    ))
                    .id();
                (ledge, character)
            })
            .collect()
    };
    app.world_mut().flush();

    for (ledge, character) in pairs {
        app.world_mut()
            .send_event(LedgeTriggerEvent::Entered { ledge, character });
    }

    (0..tick_count)
        .map(|_| {
            app.world_mut().run_schedule(FixedUpdate);
            ledge_snapshot(app.world_mut())
        })
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let run1 = run_simulation(SEED, 8, 300);
    let run2 = run_simulation(SEED, 8, 300);

    assert_eq!(
        run1, run2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_different_seeds_diverge() {
    let run1 = run_simulation(1, 4, 300);
    let run2 = run_simulation(2, 4, 300);

    assert_ne!(run1, run2, "Разные seed'ы дали одинаковые траектории");
}
