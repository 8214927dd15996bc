//! UpperEdge Simulation Core
//!
//! Jump-assist у уступов: floating marker вдоль уступа + разрешение прыжка
//! на фиксированный jump target.
//!
//! - `ledge::solver` — чистая геометрия (без движка)
//! - `ledge::systems` — Bevy ECS обвязка (FixedUpdate)
//! - Host (Godot/Bevy client) отвечает за overlap detection и рендер

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ledge;
pub mod logger;
pub mod movement;

// Re-export для удобства
pub use ledge::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use movement::{random_walk, JumpIntent, RandomWalker};

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed по умолчанию, если app собран не через create_headless_app
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(LedgePlugin)
            // Персонажи двигаются до того как уступы их сэмплируют
            .add_systems(FixedUpdate, random_walk.before(LedgeSystems));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot всех уступов для сравнения детерминизма
///
/// Формат: entity index + marker (bits) + eligibility, отсортировано по index.
pub fn ledge_snapshot(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &LedgeAssist)>();
    let mut ledges: Vec<_> = query
        .iter(world)
        .map(|(entity, assist)| {
            (
                entity.index(),
                assist.solver.floating_marker(),
                assist.solver.eligibility(),
            )
        })
        .collect();

    ledges.sort_by_key(|(index, _, _)| *index);

    let mut snapshot = Vec::new();
    for (index, marker, eligibility) in ledges {
        snapshot.extend_from_slice(&index.to_le_bytes());
        for component in marker.to_array() {
            snapshot.extend_from_slice(&component.to_bits().to_le_bytes());
        }
        snapshot.push(eligibility.is_eligible() as u8);
    }

    snapshot
}
