//! LedgeConfig — data-driven настройка уступа (JSON)
//!
//! Setup шаг получает уже разрешённые значения (frames, оси, jump target)
//! и валидирует их один раз. Дальше солвер работает только с `LedgeGeometry`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::geometry::LedgeGeometry;

/// Ошибки конфигурации уступа (все — InvalidConfiguration, кроме Parse)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgeConfigError {
    #[error("Invalid configuration: {field} is not finite")]
    NonFinite { field: &'static str },

    #[error("Invalid configuration: {axis} axis must be unit length (got {length})")]
    NotUnitAxis { axis: &'static str, length: f32 },

    #[error("Invalid configuration: forward and right axes are not orthogonal (dot = {dot})")]
    AxesNotOrthogonal { dot: f32 },

    #[error("Invalid configuration: degenerate ledge (projected length {length})")]
    DegenerateLedge { length: f32 },

    #[error("Config parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for LedgeConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Сырые параметры уступа (world space, массивы — чтобы JSON был плоским)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgeConfig {
    pub left_frame: [f32; 3],
    pub right_frame: [f32; 3],
    pub forward: [f32; 3],
    pub right: [f32; 3],
    pub jump_target: [f32; 3],
}

impl Default for LedgeConfig {
    /// Уступ 10м вдоль X на высоте 2м, подход со стороны +Z (Y-up мир)
    fn default() -> Self {
        Self {
            left_frame: [-5.0, 2.0, 0.0],
            right_frame: [5.0, 2.0, 0.0],
            forward: [0.0, 0.0, 1.0],
            right: [1.0, 0.0, 0.0],
            jump_target: [0.0, 2.5, -1.0],
        }
    }
}

impl LedgeConfig {
    pub fn from_json(json: &str) -> Result<Self, LedgeConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LedgeConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Валидация → LedgeGeometry
    pub fn geometry(&self) -> Result<LedgeGeometry, LedgeConfigError> {
        LedgeGeometry::new(
            Vec3::from_array(self.left_frame),
            Vec3::from_array(self.right_frame),
            Vec3::from_array(self.forward),
            Vec3::from_array(self.right),
        )
    }

    pub fn jump_target(&self) -> Result<Vec3, LedgeConfigError> {
        let target = Vec3::from_array(self.jump_target);
        if !target.is_finite() {
            return Err(LedgeConfigError::NonFinite { field: "jump_target" });
        }
        Ok(target)
    }
}
