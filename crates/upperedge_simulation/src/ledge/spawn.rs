//! Spawn helper для уступа с detection sensor

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{FloatingHolder, LedgeAssist, LedgeDetector};
use super::geometry::LedgeGeometry;
use super::solver::EdgeTargetSolver;

/// Spawn уступа: holder для floating marker + entity уступа с sensor'ом
///
/// Создаёт:
/// - FloatingHolder entity (Transform в midpoint, дальше двигает sync_floating_holders)
/// - Ledge entity: LedgeAssist + LedgeDetector + Rapier sensor (cuboid на всю ширину уступа)
///
/// Sensor — fixed collider, поэтому включаем KINEMATIC_STATIC: персонажи
/// в симуляции kinematic, а по умолчанию Rapier такие пары не проверяет.
pub fn spawn_ledge(commands: &mut Commands, geometry: LedgeGeometry, jump_target: Vec3) -> Entity {
    let holder = commands
        .spawn((Transform::from_translation(geometry.midpoint()), FloatingHolder))
        .id();

    let half_extents = geometry.detector_half_extents();
    let ledge = commands
        .spawn((
            Transform::from_translation(geometry.midpoint()).with_rotation(geometry.rotation()),
            LedgeAssist::new(EdgeTargetSolver::new(geometry, jump_target)).with_holder(holder),

            // Rapier trigger volume
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        ))
        .id();

    commands.entity(ledge).insert(LedgeDetector { ledge });

    crate::log(&format!(
        "Spawned ledge {:?}: width {:.2}m, holder {:?}",
        ledge,
        geometry.width(),
        holder
    ));

    ledge
}
