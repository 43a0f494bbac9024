use crate::ConfigError;
use crate::error::{ensure_non_negative, ensure_positive};
use crate::working_set::working_len;

/// Responsive card sizing.
///
/// Below `breakpoint` the card width is `floor(viewport_width / mobile_divisor)`, chosen so a
/// whole number of cards fit without a sliver of the next one. At or above it the card width is
/// fixed at `desktop_card_width`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    pub breakpoint: f64,
    pub mobile_divisor: f64,
    pub desktop_card_width: f64,
    pub mobile_gap: f64,
    pub desktop_gap: f64,
    /// Card width divided by card height.
    pub card_aspect_ratio: f64,
    /// Lower bound applied to the computed card width.
    pub min_card_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            mobile_divisor: 3.2,
            desktop_card_width: 360.0,
            mobile_gap: 2.0,
            desktop_gap: 2.0,
            card_aspect_ratio: 0.75,
            min_card_width: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width < self.breakpoint
    }

    pub fn card_width_for(&self, viewport_width: f64) -> f64 {
        let width = if self.is_mobile(viewport_width) {
            (viewport_width / self.mobile_divisor).floor()
        } else {
            self.desktop_card_width
        };
        width.max(self.min_card_width)
    }

    pub fn card_gap_for(&self, viewport_width: f64) -> f64 {
        if self.is_mobile(viewport_width) {
            self.mobile_gap
        } else {
            self.desktop_gap
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("layout.breakpoint", self.breakpoint)?;
        ensure_positive("layout.mobile_divisor", self.mobile_divisor)?;
        ensure_positive("layout.desktop_card_width", self.desktop_card_width)?;
        ensure_non_negative("layout.mobile_gap", self.mobile_gap)?;
        ensure_non_negative("layout.desktop_gap", self.desktop_gap)?;
        ensure_positive("layout.card_aspect_ratio", self.card_aspect_ratio)?;
        ensure_positive("layout.min_card_width", self.min_card_width)?;
        Ok(())
    }
}

/// Geometry derived from the viewport width and the item count.
///
/// All track math goes through this type:
/// - `index_at(position) = (center_offset - position) / total_card_width`
/// - `position_for(index) = center_offset - index * total_card_width`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub viewport_width: f64,
    pub card_width: f64,
    pub card_gap: f64,
    pub card_height: f64,
    /// Number of original items (`N`).
    pub count: usize,
}

/// Computes the layout for a viewport width.
///
/// Returns `None` while the viewport has not been measured (zero, negative, or non-finite width).
pub fn compute_layout(config: &LayoutConfig, viewport_width: f64, count: usize) -> Option<Layout> {
    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return None;
    }
    let card_width = config.card_width_for(viewport_width);
    Some(Layout {
        viewport_width,
        card_width,
        card_gap: config.card_gap_for(viewport_width),
        card_height: card_width / config.card_aspect_ratio,
        count,
    })
}

impl Layout {
    pub fn total_card_width(&self) -> f64 {
        self.card_width + self.card_gap
    }

    pub fn one_set_width(&self) -> f64 {
        self.count as f64 * self.total_card_width()
    }

    /// The track position at which working-set index 0 is centered.
    pub fn center_offset(&self) -> f64 {
        self.viewport_width / 2.0 - self.card_width / 2.0
    }

    pub fn viewport_center(&self) -> f64 {
        self.viewport_width / 2.0
    }

    /// Length of the tripled working set (`3N`).
    pub fn working_len(&self) -> usize {
        working_len(self.count)
    }

    pub fn index_at(&self, position: f64) -> f64 {
        (self.center_offset() - position) / self.total_card_width()
    }

    pub fn position_for(&self, index: f64) -> f64 {
        self.center_offset() - index * self.total_card_width()
    }

    /// Position that centers original item `original_index` inside the middle replica.
    pub fn home_position(&self, original_index: usize) -> f64 {
        let original_index = original_index.min(self.count.saturating_sub(1));
        self.position_for((self.count + original_index) as f64)
    }

    /// Screen-space x of the left edge of card `index` at `position`.
    pub fn card_start(&self, position: f64, index: usize) -> f64 {
        position + index as f64 * self.total_card_width()
    }
}
