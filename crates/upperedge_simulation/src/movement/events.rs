//! Movement events

use bevy::prelude::*;

/// Event: намерение прыгнуть (jump intent)
///
/// Генерируется:
/// - Player input system (host)
/// - Headless прогоны / тесты
///
/// Обрабатывается:
/// - resolve_ledge_jumps: если персонаж отслеживается уступом и прыжок
///   разрешён → LedgeJumpResolved с jump target
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct JumpIntent {
    pub entity: Entity,
}
