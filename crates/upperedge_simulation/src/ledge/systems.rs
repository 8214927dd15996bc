//! Ledge systems (FixedUpdate)
//!
//! Порядок (chain):
//! 1. forward_detector_collisions — Rapier CollisionEvent → LedgeTriggerEvent
//! 2. apply_ledge_trigger_events — presence transitions (enter/exit)
//! 3. tick_ledge_solvers — Transform персонажа → solve → marker + eligibility
//! 4. sync_floating_holders — marker → Transform holder'а
//! 5. resolve_ledge_jumps — JumpIntent → LedgeJumpResolved

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use super::components::{FloatingHolder, LedgeAssist, LedgeDetector, OuterDetectionSphere};
use super::events::{LedgeJumpResolved, LedgeTriggerEvent};
use super::solver::CharacterSample;
use crate::movement::JumpIntent;

/// Система: Rapier CollisionEvent → LedgeTriggerEvent
///
/// Фильтр по тегам: пара должна быть LedgeDetector ↔ OuterDetectionSphere
/// (в любом порядке). Остальные пересечения sensor'а игнорируются.
pub fn forward_detector_collisions(
    mut collisions: EventReader<CollisionEvent>,
    detectors: Query<&LedgeDetector>,
    spheres: Query<&OuterDetectionSphere>,
    mut triggers: EventWriter<LedgeTriggerEvent>,
) {
    for collision in collisions.read() {
        let (a, b, started) = match *collision {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };

        let pair = match (detectors.get(a), spheres.get(b)) {
            (Ok(detector), Ok(sphere)) => Some((*detector, *sphere)),
            _ => match (detectors.get(b), spheres.get(a)) {
                (Ok(detector), Ok(sphere)) => Some((*detector, *sphere)),
                _ => None,
            },
        };

        let Some((detector, sphere)) = pair else {
            continue;
        };

        triggers.write(if started {
            LedgeTriggerEvent::Entered {
                ledge: detector.ledge,
                character: sphere.character,
            }
        } else {
            LedgeTriggerEvent::Exited {
                ledge: detector.ledge,
                character: sphere.character,
            }
        });
    }
}

/// Система: presence transitions из LedgeTriggerEvent
///
/// Exited учитывается только для текущего отслеживаемого персонажа —
/// выход постороннего не сбрасывает уступ.
pub fn apply_ledge_trigger_events(
    mut triggers: EventReader<LedgeTriggerEvent>,
    mut ledges: Query<&mut LedgeAssist>,
) {
    for trigger in triggers.read() {
        match *trigger {
            LedgeTriggerEvent::Entered { ledge, character } => {
                let Ok(mut assist) = ledges.get_mut(ledge) else {
                    continue;
                };

                assist.solver.on_character_enter(character);
                crate::log(&format!("🧗 Ledge {:?}: {:?} entered detector", ledge, character));
            }
            LedgeTriggerEvent::Exited { ledge, character } => {
                let Ok(mut assist) = ledges.get_mut(ledge) else {
                    continue;
                };

                if assist.solver.tracked() != Some(&character) {
                    continue;
                }

                assist.solver.on_character_exit();
                crate::log(&format!("🚶 Ledge {:?}: {:?} left detector → jump blocked", ledge, character));
            }
        }
    }
}

/// Система: solve для каждого уступа с персонажем внутри
///
/// Персонаж без Transform (despawned) → no-op, состояние уступа не меняется.
pub fn tick_ledge_solvers(
    mut ledges: Query<(Entity, &mut LedgeAssist)>,
    characters: Query<&Transform>,
) {
    for (ledge, mut assist) in ledges.iter_mut() {
        let Some(&character) = assist.solver.tracked() else {
            continue;
        };
        let Ok(transform) = characters.get(character) else {
            continue;
        };

        let previous = assist.solver.eligibility();
        let Some(solution) = assist.solver.tick_with(&CharacterSample::from_transform(transform)) else {
            continue;
        };

        if solution.eligibility != previous {
            crate::log(&format!(
                "🎯 Ledge {:?}: jump {:?} → {:?} for {:?} (marker {:?})",
                ledge, previous, solution.eligibility, character, solution.marker
            ));
        }
    }
}

/// Система: floating marker → Transform holder'а (marker sink)
///
/// Пишем только пока персонаж внутри: после выхода marker остаётся
/// на последней позиции.
pub fn sync_floating_holders(
    ledges: Query<&LedgeAssist>,
    mut holders: Query<&mut Transform, With<FloatingHolder>>,
) {
    for assist in ledges.iter() {
        if !assist.solver.presence().is_present() {
            continue;
        }
        let Some(holder) = assist.holder else {
            continue;
        };
        let Ok(mut transform) = holders.get_mut(holder) else {
            continue;
        };

        transform.translation = assist.solver.floating_marker();
    }
}

/// Система: JumpIntent → LedgeJumpResolved
///
/// Ищем уступ, который отслеживает прыгающего персонажа и сейчас
/// разрешает прыжок. Нет такого — intent игнорируется (обычный прыжок).
pub fn resolve_ledge_jumps(
    mut intents: EventReader<JumpIntent>,
    ledges: Query<(Entity, &LedgeAssist)>,
    mut resolved: EventWriter<LedgeJumpResolved>,
) {
    for intent in intents.read() {
        let found = ledges.iter().find_map(|(ledge, assist)| {
            if assist.solver.tracked() != Some(&intent.entity) {
                return None;
            }
            assist.solver.jump_target().map(|target| (ledge, target))
        });

        let Some((ledge, target)) = found else {
            continue;
        };

        resolved.write(LedgeJumpResolved {
            character: intent.entity,
            ledge,
            target,
        });
        crate::log_info(&format!(
            "⤴️ {:?} jump assisted by ledge {:?} → {:?}",
            intent.entity, ledge, target
        ));
    }
}
