//! Ledge jump-assist module
//!
//! ECS ответственность:
//! - Presence (кто в detection volume уступа)
//! - Edge Target Solver: floating marker + jump eligibility каждый тик
//! - JumpIntent → LedgeJumpResolved
//!
//! Host ответственность:
//! - Overlap detection (Rapier sensor или свои Area'ы → LedgeTriggerEvent)
//! - Рендер floating marker (Transform FloatingHolder entity)
//! - Сам прыжок/снап на LedgeJumpResolved.target

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

pub mod components;
pub mod config;
pub mod events;
pub mod geometry;
pub mod solver;
pub mod spawn;
pub mod systems;

// Re-export основных типов
pub use components::{FloatingHolder, LedgeAssist, LedgeDetector, OuterDetectionSphere};
pub use config::{LedgeConfig, LedgeConfigError};
pub use events::{LedgeJumpResolved, LedgeTriggerEvent};
pub use geometry::LedgeGeometry;
pub use solver::{
    solve, CharacterProbe, CharacterSample, EdgeTargetSolver, JumpEligibility, LedgeAngles,
    LedgeSolution, Presence, JUMP_FACING_THRESHOLD,
};
pub use spawn::spawn_ledge;

/// SystemSet всех ledge систем (для ordering снаружи)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgeSystems;

/// Ledge Plugin
///
/// Регистрирует события и системы в FixedUpdate.
/// CollisionEvent регистрируем сами — plugin работает и без RapierPhysicsPlugin
/// (headless, тесты), тогда trigger события шлёт host напрямую.
pub struct LedgePlugin;

impl Plugin for LedgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .add_event::<LedgeTriggerEvent>()
            .add_event::<LedgeJumpResolved>()
            .add_event::<crate::movement::JumpIntent>();

        app.add_systems(
            FixedUpdate,
            (
                systems::forward_detector_collisions,
                systems::apply_ledge_trigger_events,
                systems::tick_ledge_solvers,
                systems::sync_floating_holders,
                systems::resolve_ledge_jumps,
            )
                .chain() // Последовательное выполнение
                .in_set(LedgeSystems),
        );
    }
}
