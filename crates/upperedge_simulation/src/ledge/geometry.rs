//! Геометрия уступа: два frame'а + ориентация (forward/right)
//!
//! Все решения солвера принимаются в локальной 2D плоскости уступа:
//! x = forward, y = right. Вертикальная ось отбрасывается проекцией,
//! поэтому одинаково работают Z-up данные сцены и Y-up мир Bevy.

use bevy::prelude::*;

use super::config::LedgeConfigError;

/// Порог вырожденности длин (метры)
pub const GEOMETRY_EPSILON: f32 = 1e-4;

/// Допуск на unit length / ортогональность осей уступа
pub const AXIS_TOLERANCE: f32 = 1e-3;

/// Половина глубины trigger box вдоль forward (метры)
pub const DETECTOR_HALF_DEPTH: f32 = 2.0;

/// Половина высоты trigger box вдоль up (метры)
pub const DETECTOR_HALF_HEIGHT: f32 = 2.0;

/// Провалидированная геометрия уступа (immutable после создания)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeGeometry {
    left_frame: Vec3,
    right_frame: Vec3,
    forward: Vec3,
    right: Vec3,
}

impl LedgeGeometry {
    /// Создать геометрию, отклоняя NaN, не-unit/не-ортогональные оси и вырожденный уступ
    pub fn new(
        left_frame: Vec3,
        right_frame: Vec3,
        forward: Vec3,
        right: Vec3,
    ) -> Result<Self, LedgeConfigError> {
        for (field, value) in [
            ("left_frame", left_frame),
            ("right_frame", right_frame),
            ("forward", forward),
            ("right", right),
        ] {
            if !value.is_finite() {
                return Err(LedgeConfigError::NonFinite { field });
            }
        }

        for (axis, value) in [("forward", forward), ("right", right)] {
            let length = value.length();
            if (length - 1.0).abs() > AXIS_TOLERANCE {
                return Err(LedgeConfigError::NotUnitAxis { axis, length });
            }
        }

        let dot = forward.dot(right);
        if dot.abs() > AXIS_TOLERANCE {
            return Err(LedgeConfigError::AxesNotOrthogonal { dot });
        }

        let geometry = Self {
            left_frame,
            right_frame,
            forward: forward.normalize(),
            right: right.normalize(),
        };

        // Вертикальный уступ тоже вырожден: в плоскости он схлопывается в точку
        let length = geometry.project(right_frame).distance(geometry.project(left_frame));
        if length <= GEOMETRY_EPSILON {
            return Err(LedgeConfigError::DegenerateLedge { length });
        }

        Ok(geometry)
    }

    pub fn left_frame(&self) -> Vec3 {
        self.left_frame
    }

    pub fn right_frame(&self) -> Vec3 {
        self.right_frame
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Up ось уступа (forward × right)
    pub fn up(&self) -> Vec3 {
        self.forward.cross(self.right)
    }

    /// Проекция world точки/вектора в локальную плоскость уступа
    pub fn project(&self, value: Vec3) -> Vec2 {
        Vec2::new(value.dot(self.forward), value.dot(self.right))
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.left_frame + self.right_frame) * 0.5
    }

    /// Полная 3D длина уступа
    pub fn width(&self) -> f32 {
        self.left_frame.distance(self.right_frame)
    }

    /// Точка на отрезке left → right (fraction клампится в [0, 1])
    pub fn point_at(&self, fraction: f32) -> Vec3 {
        self.left_frame.lerp(self.right_frame, fraction.clamp(0.0, 1.0))
    }

    /// Поворот, переводящий локальные оси (X, Y, Z) в (forward, right, up)
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.forward, self.right, self.up()))
    }

    /// Half extents trigger box в локальных осях (forward, right, up)
    ///
    /// Box тянется на всю ширину уступа, 2м в глубину и высоту.
    pub fn detector_half_extents(&self) -> Vec3 {
        Vec3::new(DETECTOR_HALF_DEPTH, self.width() / 2.0, DETECTOR_HALF_HEIGHT)
    }
}
