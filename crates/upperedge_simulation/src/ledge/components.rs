//! ECS компоненты уступа: солвер, marker holder, trigger теги

use bevy::prelude::*;

use super::solver::EdgeTargetSolver;

/// Уступ с jump-assist (живёт на entity с detection sensor)
///
/// Handle персонажа — `Entity`, сэмпл берётся из его `Transform` каждый тик.
#[derive(Component, Debug, Clone)]
pub struct LedgeAssist {
    pub solver: EdgeTargetSolver<Entity>,
    /// Entity, чей Transform двигаем в floating marker (визуал / aim point)
    pub holder: Option<Entity>,
}

impl LedgeAssist {
    pub fn new(solver: EdgeTargetSolver<Entity>) -> Self {
        Self { solver, holder: None }
    }

    pub fn with_holder(mut self, holder: Entity) -> Self {
        self.holder = Some(holder);
        self
    }
}

/// Маркер: Transform этой entity = floating marker уступа
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct FloatingHolder;

/// Sensor collider, принадлежащий уступу
#[derive(Component, Debug, Clone, Copy)]
pub struct LedgeDetector {
    pub ledge: Entity,
}

/// Outer detection collider персонажа
///
/// Только пересечения LedgeDetector ↔ OuterDetectionSphere считаются
/// входом/выходом персонажа. Остальные overlaps игнорируются.
#[derive(Component, Debug, Clone, Copy)]
pub struct OuterDetectionSphere {
    pub character: Entity,
}
