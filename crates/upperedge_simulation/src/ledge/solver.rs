//! Edge Target Solver
//!
//! Каждый тик, пока персонаж в trigger зоне уступа:
//! 1. Проецируем персонажа и оба frame'а в плоскость уступа
//! 2. Считаем знаковые углы (forward персонажа, направления на frame'ы)
//! 3. Gate: персонаж подходит снаружи уступа и смотрит между frame'ами
//! 4. Прыжок разрешён только если персонаж смотрит почти прямо в уступ (> 150°)
//! 5. Floating marker = точка пересечения луча взгляда с уступом (теорема синусов)
//!
//! Солвер чистый: без ECS, без движка. ECS слой (`ledge::systems`) только
//! подаёт сэмплы Transform и забирает marker.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use super::config::{LedgeConfig, LedgeConfigError};
use super::geometry::{LedgeGeometry, GEOMETRY_EPSILON};

/// Порог разрешения прыжка: |char_forward_angle| > 150°
pub const JUMP_FACING_THRESHOLD: f32 = 150.0 / 180.0 * PI;

/// Ledge forward/right в локальной плоскости (по построению проекции)
const LEDGE_FORWARD: Vec2 = Vec2::X;
const LEDGE_RIGHT: Vec2 = Vec2::Y;

/// Снимок персонажа на текущий кадр
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterSample {
    pub position: Vec3,
    /// Направление взгляда (unit)
    pub forward: Vec3,
}

impl CharacterSample {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Bevy convention: forward = -Z локального Transform
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            forward: *transform.forward(),
        }
    }
}

/// Источник сэмплов для отслеживаемого персонажа
///
/// `None` = персонаж недоступен в этом кадре (tick пропускается).
pub trait CharacterProbe {
    fn sample(&self) -> Option<CharacterSample>;
}

impl<F> CharacterProbe for F
where
    F: Fn() -> Option<CharacterSample>,
{
    fn sample(&self) -> Option<CharacterSample> {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum JumpEligibility {
    #[default]
    Blocked,
    Eligible,
}

impl JumpEligibility {
    pub fn is_eligible(self) -> bool {
        matches!(self, JumpEligibility::Eligible)
    }
}

/// Presence state: персонаж внутри detection volume или нет
#[derive(Debug, Clone, PartialEq)]
pub enum Presence<C> {
    Absent,
    Present(C),
}

impl<C> Default for Presence<C> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<C> Presence<C> {
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    pub fn character(&self) -> Option<&C> {
        match self {
            Presence::Present(character) => Some(character),
            Presence::Absent => None,
        }
    }
}

/// Знаковые углы относительно ledge forward, в (-π, π]
///
/// Знак минус — вектор смотрит в сторону ledge right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeAngles {
    pub char_forward: f32,
    pub right_frame: f32,
    pub left_frame: f32,
}

impl LedgeAngles {
    /// Персонаж смотрит "между" направлениями на frame'ы
    pub fn in_between(&self) -> bool {
        let (c, r, l) = (self.char_forward, self.right_frame, self.left_frame);
        let product = r * l;

        (product < 0.0 && (c > r || c < l)) || (product > 0.0 && c > r && c < l)
    }

    /// Gate: in_between + оба frame'а дальше 90° от ledge forward
    /// (персонаж снаружи уступа, а не над ним)
    pub fn gate_passes(&self) -> bool {
        self.in_between() && self.left_frame.abs() > FRAC_PI_2 && self.right_frame.abs() > FRAC_PI_2
    }

    pub fn facing_allows_jump(&self) -> bool {
        self.char_forward.abs() > JUMP_FACING_THRESHOLD
    }
}

/// Результат одного solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeSolution {
    pub marker: Vec3,
    pub eligibility: JumpEligibility,
    /// `None` для вырожденного входа (персонаж в frame'е, forward вертикален, NaN)
    pub angles: Option<LedgeAngles>,
}

/// Чистый расчёт marker + eligibility для одного сэмпла
pub fn solve(geometry: &LedgeGeometry, sample: &CharacterSample) -> LedgeSolution {
    let blocked = |angles: Option<LedgeAngles>| LedgeSolution {
        marker: geometry.midpoint(),
        eligibility: JumpEligibility::Blocked,
        angles,
    };

    let char_position = geometry.project(sample.position);
    let Some(char_forward) = geometry.project(sample.forward).try_normalize() else {
        return blocked(None);
    };

    let to_right = geometry.project(geometry.right_frame()) - char_position;
    let to_left = geometry.project(geometry.left_frame()) - char_position;
    let to_left_length = to_left.length();

    // !(x > eps) ловит и NaN
    if !(to_left_length > GEOMETRY_EPSILON) || !(to_right.length() > GEOMETRY_EPSILON) {
        return blocked(None);
    }

    let to_right_n = to_right.normalize();
    let to_left_n = to_left / to_left_length;

    let angles = LedgeAngles {
        char_forward: signed_angle(char_forward),
        right_frame: signed_angle(to_right_n),
        left_frame: signed_angle(to_left_n),
    };

    if !angles.gate_passes() {
        return blocked(Some(angles));
    }

    let eligibility = if angles.facing_allows_jump() {
        JumpEligibility::Eligible
    } else {
        JumpEligibility::Blocked
    };

    // Треугольник (персонаж, left frame, точка удара луча):
    // side_a / sin(alpha) = side_b / sin(beta)
    let angle_between_frames = unsigned_angle(to_right_n, to_left_n);
    let side_b = to_left_length;
    let alpha = unsigned_angle(char_forward, to_left_n).min(angle_between_frames);
    let beta = unsigned_angle(char_forward, LEDGE_RIGHT);

    let opposite = side_b * alpha.sin();
    let sin_beta = beta.sin();
    let fraction = if sin_beta > GEOMETRY_EPSILON {
        opposite / sin_beta / geometry.width()
    } else if opposite > GEOMETRY_EPSILON {
        // Луч параллелен уступу — уходит за right frame
        1.0
    } else {
        0.0
    };

    LedgeSolution {
        marker: geometry.point_at(fraction),
        eligibility,
        angles: Some(angles),
    }
}

/// Угол между unit векторами, [0, π]
fn unsigned_angle(a: Vec2, b: Vec2) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Угол относительно ledge forward, отрицательный если dot(v, right) >= 0
fn signed_angle(direction: Vec2) -> f32 {
    let angle = unsigned_angle(direction, LEDGE_FORWARD);
    if direction.dot(LEDGE_RIGHT) >= 0.0 {
        -angle
    } else {
        angle
    }
}

/// Солвер одного уступа: geometry + jump target + presence/eligibility state machine
///
/// `C` — handle персонажа (ECS: `Entity`, вне ECS — любой `CharacterProbe`).
#[derive(Debug, Clone)]
pub struct EdgeTargetSolver<C> {
    geometry: LedgeGeometry,
    jump_target: Vec3,
    presence: Presence<C>,
    floating_marker: Vec3,
    eligibility: JumpEligibility,
}

impl<C> EdgeTargetSolver<C> {
    pub fn new(geometry: LedgeGeometry, jump_target: Vec3) -> Self {
        Self {
            geometry,
            jump_target,
            presence: Presence::Absent,
            floating_marker: geometry.midpoint(),
            eligibility: JumpEligibility::Blocked,
        }
    }

    pub fn from_config(config: &LedgeConfig) -> Result<Self, LedgeConfigError> {
        Ok(Self::new(config.geometry()?, config.jump_target()?))
    }

    /// Персонаж вошёл в detection volume (повторный вход заменяет handle)
    pub fn on_character_enter(&mut self, character: C) {
        self.presence = Presence::Present(character);
    }

    /// Персонаж вышел: Absent + Blocked. Возвращает прежний handle
    pub fn on_character_exit(&mut self) -> Option<C> {
        self.eligibility = JumpEligibility::Blocked;
        match std::mem::take(&mut self.presence) {
            Presence::Present(character) => Some(character),
            Presence::Absent => None,
        }
    }

    /// Tick с внешним сэмплом. `None` если персонажа нет (no-op)
    pub fn tick_with(&mut self, sample: &CharacterSample) -> Option<LedgeSolution> {
        if !self.presence.is_present() {
            return None;
        }

        let solution = solve(&self.geometry, sample);
        self.floating_marker = solution.marker;
        self.eligibility = solution.eligibility;
        Some(solution)
    }

    /// Jump target только при Eligible
    pub fn jump_target(&self) -> Option<Vec3> {
        self.eligibility.is_eligible().then_some(self.jump_target)
    }

    pub fn floating_marker(&self) -> Vec3 {
        self.floating_marker
    }

    pub fn eligibility(&self) -> JumpEligibility {
        self.eligibility
    }

    pub fn presence(&self) -> &Presence<C> {
        &self.presence
    }

    pub fn tracked(&self) -> Option<&C> {
        self.presence.character()
    }

    pub fn geometry(&self) -> &LedgeGeometry {
        &self.geometry
    }
}

impl<C: CharacterProbe> EdgeTargetSolver<C> {
    /// Tick через handle персонажа
    pub fn tick(&mut self) -> Option<LedgeSolution> {
        let sample = self.tracked()?.sample()?;
        self.tick_with(&sample)
    }
}
