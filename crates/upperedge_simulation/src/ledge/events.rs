//! Ledge events

use bevy::prelude::*;

/// Trigger события detection volume уступа
///
/// Генерируются из Rapier CollisionEvent (forward_detector_collisions)
/// или напрямую host'ом, если у него своя overlap система.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum LedgeTriggerEvent {
    /// Персонаж вошёл в detection volume
    Entered { ledge: Entity, character: Entity },

    /// Персонаж вышел из detection volume
    Exited { ledge: Entity, character: Entity },
}

/// JumpIntent персонажа разрешён уступом → host телепортирует/снапит на target
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LedgeJumpResolved {
    pub character: Entity,
    pub ledge: Entity,
    pub target: Vec3,
}
