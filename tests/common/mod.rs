//! Common test utilities for building rows, columns and engines.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use virtable::layout::{RowHeights, Viewport};
use virtable::{ColumnDef, FixedSide, RowKey, ScrollConfig, TableConfig, TableEngine};

// ============================================================================
// Rows
// ============================================================================

/// Rows keyed "0".."n-1"
#[must_use]
pub fn row_keys(n: usize) -> Vec<RowKey> {
    (0..n).map(RowKey::from).collect()
}

/// Measured heights cycling through `pattern`
#[must_use]
pub fn patterned_heights(n: usize, pattern: &[f32]) -> RowHeights {
    RowHeights::from_measurements((0..n).map(|i| Some(pattern[i % pattern.len()])), 40.0)
}

// ============================================================================
// Columns
// ============================================================================

/// Column list from `(key, width, side)` triples
#[must_use]
pub fn columns(defs: &[(&str, f32, FixedSide)]) -> Vec<ColumnDef> {
    defs.iter()
        .map(|&(key, width, side)| ColumnDef::new(key).width(width).fixed(side))
        .collect()
}

// ============================================================================
// Engines
// ============================================================================

/// Engine with fixed-height virtual scroll and the given viewport size
#[must_use]
pub fn fixed_engine(row_height: f32, buffer: usize, width: f32, height: f32) -> TableEngine {
    let mut engine = TableEngine::new(TableConfig {
        scroll: ScrollConfig::fixed(row_height, buffer),
        ..TableConfig::default()
    });
    engine.resize(width, height);
    engine
}

/// Engine with measured-height virtual scroll and the given viewport size
#[must_use]
pub fn measured_engine(estimate: f32, buffer: usize, width: f32, height: f32) -> TableEngine {
    let mut engine = TableEngine::new(TableConfig {
        scroll: ScrollConfig::measured(estimate, buffer),
        ..TableConfig::default()
    });
    engine.resize(width, height);
    engine
}

/// Viewport of the given height scrolled to `scroll_top`
#[must_use]
pub fn viewport(height: f32, scroll_top: f32) -> Viewport {
    Viewport::new(800.0, height).at(scroll_top)
}
