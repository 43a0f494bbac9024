use crate::error::{ensure_non_negative, ensure_unit};
use crate::{ConfigError, Layout, RenderDescriptor};

/// Falloff of scale/opacity/z-index with distance (in cards) from the viewport center.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionConfig {
    pub scale_falloff: f64,
    pub max_scale_reduction: f64,
    pub opacity_falloff: f64,
    pub max_opacity_reduction: f64,
    /// z-index of the centered card. Other cards get `max(1, round(max_z_index - distance))`.
    pub max_z_index: i32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scale_falloff: 0.1,
            max_scale_reduction: 0.22,
            opacity_falloff: 0.15,
            max_opacity_reduction: 0.4,
            max_z_index: 10,
        }
    }
}

impl ProjectionConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("projection.scale_falloff", self.scale_falloff)?;
        ensure_unit("projection.max_scale_reduction", self.max_scale_reduction)?;
        ensure_non_negative("projection.opacity_falloff", self.opacity_falloff)?;
        ensure_unit("projection.max_opacity_reduction", self.max_opacity_reduction)?;
        if self.max_z_index < 1 {
            return Err(ConfigError::TooSmall {
                field: "projection.max_z_index",
                value: self.max_z_index as i64,
                min: 1,
            });
        }
        Ok(())
    }
}

/// Distance, in cards, between card `index`'s center and the viewport center.
pub fn distance_from_center(layout: &Layout, position: f64, index: usize) -> f64 {
    let card_center = layout.card_start(position, index) + layout.card_width / 2.0;
    (card_center - layout.viewport_center()).abs() / layout.total_card_width()
}

/// Projects one card. Pure: the same `(layout, position, index)` always yields the same output.
pub fn project(
    layout: &Layout,
    position: f64,
    index: usize,
    config: &ProjectionConfig,
) -> RenderDescriptor {
    let distance = distance_from_center(layout, position, index);
    let scale = 1.0 - (distance * config.scale_falloff).min(config.max_scale_reduction);
    let opacity = 1.0 - (distance * config.opacity_falloff).min(config.max_opacity_reduction);
    let z_index = (config.max_z_index as f64 - distance).round().max(1.0) as i32;

    RenderDescriptor {
        index,
        position_offset: layout.card_start(position, index),
        scale,
        opacity,
        z_index,
        width: layout.card_width,
        height: layout.card_height,
    }
}
