//! Engine configuration.
//!
//! Every field has a default so that partial JSON documents decode. Values
//! that make no geometric sense (negative sizes, NaN) are replaced by
//! their defaults in [`TableConfig::sanitized`] instead of being rejected.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Row count at or below which virtual scrolling is skipped.
pub const DEFAULT_VIRTUAL_THRESHOLD: usize = 100;

/// Rows rendered above and below the visible window.
pub const DEFAULT_BUFFER_SIZE: usize = 20;

/// Estimated row height in pixels, used until a row is measured.
pub const DEFAULT_ROW_HEIGHT: f32 = 40.0;

/// Difference (pixels) between estimate and measurement that triggers a recompute.
pub const DEFAULT_MEASURE_TOLERANCE: f32 = 1.0;

/// Narrowest width a column can be resized to.
pub const DEFAULT_MIN_COLUMN_WIDTH: f32 = 80.0;

/// Virtual scroll settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Enable row virtualization
    pub virtual_scroll: bool,
    /// Virtualize only when the row count exceeds this value (0 selects the default)
    pub threshold: usize,
    /// Extra rows kept mounted on each side of the viewport
    pub buffer_size: usize,
    /// Fixed row height, or the estimate for unmeasured rows
    pub row_height: f32,
    /// All rows share `row_height`; measurements are ignored
    pub fixed_row_height: bool,
    /// Measurement drift tolerated before heights are rebuilt
    pub measure_tolerance: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            virtual_scroll: false,
            threshold: DEFAULT_VIRTUAL_THRESHOLD,
            buffer_size: DEFAULT_BUFFER_SIZE,
            row_height: DEFAULT_ROW_HEIGHT,
            fixed_row_height: false,
            measure_tolerance: DEFAULT_MEASURE_TOLERANCE,
        }
    }
}

impl ScrollConfig {
    /// Virtual scrolling settings with the given fixed row height.
    pub fn fixed(row_height: f32, buffer_size: usize) -> Self {
        Self {
            virtual_scroll: true,
            row_height,
            buffer_size,
            fixed_row_height: true,
            ..Self::default()
        }
    }

    /// Virtual scrolling settings for measured rows with an estimated height.
    pub fn measured(estimated_height: f32, buffer_size: usize) -> Self {
        Self {
            virtual_scroll: true,
            row_height: estimated_height,
            buffer_size,
            fixed_row_height: false,
            ..Self::default()
        }
    }

    /// Row count above which windowing starts; 0 means the default.
    pub fn effective_threshold(&self) -> usize {
        if self.threshold == 0 {
            DEFAULT_VIRTUAL_THRESHOLD
        } else {
            self.threshold
        }
    }

    /// Whether a row set of `row_count` rows should be windowed.
    pub fn is_virtual(&self, row_count: usize) -> bool {
        self.virtual_scroll && row_count > self.effective_threshold()
    }
}

/// Rows pinned to the top and bottom of the scroll container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedRows {
    /// Number of leading rows kept at the top
    pub top: usize,
    /// Number of trailing rows kept at the bottom
    pub bottom: usize,
}

/// Affix (sticky) behavior for header, footer and pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AffixConfig {
    /// Stick the header to the top of the page viewport
    pub header: bool,
    /// Stick the footer to the bottom of the page viewport
    pub footer: bool,
    /// Stick pagination to the bottom of the page viewport
    pub pagination: bool,
    /// Distance from the page top where the header sticks
    pub offset_top: f32,
    /// Distance from the page bottom where footer and pagination stick
    pub offset_bottom: f32,
}

impl Default for AffixConfig {
    fn default() -> Self {
        Self {
            header: false,
            footer: false,
            pagination: false,
            offset_top: 0.0,
            offset_bottom: 0.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Virtual scroll settings
    pub scroll: ScrollConfig,
    /// Pinned rows
    pub fixed_rows: FixedRows,
    /// Configured content height; enables the fixed header when content overflows it
    pub height: Option<f32>,
    /// Minimum width enforced by column resizing
    pub min_column_width: Option<f32>,
    /// Sticky header/footer/pagination
    pub affix: AffixConfig,
    /// Cell borders are drawn; enables the divider right of a fixed header
    pub bordered: bool,
}

impl TableConfig {
    /// Decode a configuration document and sanitize it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace nonsensical values with defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(self.scroll.row_height.is_finite() && self.scroll.row_height > 0.0) {
            tracing::warn!(
                row_height = self.scroll.row_height,
                "invalid row height, using default"
            );
            self.scroll.row_height = DEFAULT_ROW_HEIGHT;
        }
        if !(self.scroll.measure_tolerance.is_finite() && self.scroll.measure_tolerance >= 0.0) {
            self.scroll.measure_tolerance = DEFAULT_MEASURE_TOLERANCE;
        }
        self.height = self.height.filter(|h| h.is_finite() && *h > 0.0);
        self.min_column_width = self.min_column_width.filter(|w| w.is_finite() && *w >= 0.0);
        self.affix.offset_top = non_negative(self.affix.offset_top);
        self.affix.offset_bottom = non_negative(self.affix.offset_bottom);
        self
    }

    /// Minimum column width, falling back to the default.
    pub fn min_column_width(&self) -> f32 {
        self.min_column_width.unwrap_or(DEFAULT_MIN_COLUMN_WIDTH)
    }
}

/// Clamp a pixel value to `[0, inf)`, mapping NaN to 0.
pub(crate) fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else if v.is_infinite() && v.is_sign_positive() {
        f32::MAX
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert!(!config.scroll.virtual_scroll);
        assert_eq!(config.scroll.threshold, 100);
        assert_eq!(config.scroll.buffer_size, 20);
        assert_eq!(config.min_column_width(), DEFAULT_MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_partial_json() {
        let config =
            TableConfig::from_json(r#"{"scroll": {"virtualScroll": true, "rowHeight": 32}}"#)
                .unwrap();
        assert!(config.scroll.virtual_scroll);
        assert_eq!(config.scroll.row_height, 32.0);
        assert_eq!(config.scroll.buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_sanitize_bad_values() {
        let config = TableConfig::from_json(
            r#"{"scroll": {"rowHeight": -5}, "height": 0, "affix": {"offsetTop": -10}}"#,
        )
        .unwrap();
        assert_eq!(config.scroll.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.height, None);
        assert_eq!(config.affix.offset_top, 0.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(TableConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_threshold_policy() {
        let scroll = ScrollConfig::fixed(40.0, 5);
        assert!(!scroll.is_virtual(100));
        assert!(scroll.is_virtual(101));
        assert!(!ScrollConfig::default().is_virtual(10_000));
    }

    #[test]
    fn test_zero_threshold_uses_default() {
        let scroll = ScrollConfig {
            threshold: 0,
            ..ScrollConfig::fixed(40.0, 5)
        };
        assert_eq!(scroll.effective_threshold(), DEFAULT_VIRTUAL_THRESHOLD);
        assert!(!scroll.is_virtual(1));
        assert!(!scroll.is_virtual(100));
        assert!(scroll.is_virtual(101));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f32::NAN), 0.0);
        assert_eq!(non_negative(12.5), 12.5);
    }
}
