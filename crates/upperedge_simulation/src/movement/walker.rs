//! RandomWalker — seeded блуждание персонажа вокруг точки
//!
//! Используется headless binary и тестами детерминизма: персонаж
//! кружит у уступа, солвер получает разнообразные сэмплы.

use bevy::prelude::*;
use rand::Rng;

use crate::DeterministicRng;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RandomWalker {
    /// Центр области блуждания
    pub anchor: Vec3,
    /// Радиус области (метры), за ним разворачиваемся к anchor
    pub radius: f32,
    /// Шаг за тик (метры)
    pub step: f32,
    /// Максимальный поворот за тик (радианы)
    pub max_turn: f32,
}

impl Default for RandomWalker {
    fn default() -> Self {
        Self {
            anchor: Vec3::ZERO,
            radius: 4.0,
            step: 0.05, // 3 m/s при 60Hz
            max_turn: 0.2,
        }
    }
}

/// Система: поворот на случайный угол + шаг вперёд
///
/// Работает в FixedUpdate, единственный источник случайности — DeterministicRng.
pub fn random_walk(
    mut walkers: Query<(&RandomWalker, &mut Transform)>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (walker, mut transform) in walkers.iter_mut() {
        let turn = rng.rng.gen_range(-walker.max_turn..=walker.max_turn);
        transform.rotate_y(turn);

        let forward = *transform.forward();
        transform.translation += forward * walker.step;

        if transform.translation.distance(walker.anchor) > walker.radius {
            // Вышли за радиус — смотрим обратно на anchor (горизонтально)
            let target = Vec3::new(walker.anchor.x, transform.translation.y, walker.anchor.z);
            transform.look_at(target, Vec3::Y);
        }
    }
}
