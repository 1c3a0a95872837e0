//! Fixed (sticky) columns and rows.
//!
//! Fixed-left columns get a `left` offset equal to the widths of the
//! fixed-left columns before them; fixed-right columns mirror that from
//! the right edge. The innermost fixed column on each side carries the
//! divider flag so the renderer knows where to draw the shadow.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::RowHeights;
use crate::config::{non_negative, FixedRows};
use crate::types::{ColumnDef, FixedSide};

/// Width changes smaller than this (pixels) are not worth a relayout.
const WIDTH_EPSILON: f32 = 0.5;

/// Sticky placement of one fixed column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPosition {
    /// Side the column is pinned to
    pub side: FixedSide,
    /// Offset from the left edge (fixed-left columns)
    pub left: Option<f32>,
    /// Offset from the right edge (fixed-right columns)
    pub right: Option<f32>,
    /// Resolved column width
    pub width: f32,
    /// Innermost fixed-left column; draws the left shadow
    pub last_left_fixed: bool,
    /// Innermost fixed-right column; draws the right shadow
    pub first_right_fixed: bool,
}

/// Fixed column placements for a column list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedLayout {
    /// Placement per fixed column key
    pub positions: BTreeMap<String, FixedPosition>,
    /// Resolved width per column, in column order
    pub widths: Vec<f32>,
    /// Total width of fixed-left columns
    pub left_width: f32,
    /// Total width of fixed-right columns
    pub right_width: f32,
    /// Sum of all column widths
    pub table_width: f32,
    /// Columns with neither a measured nor a configured width (laid out as 0)
    pub unmeasured: Vec<String>,
}

impl FixedLayout {
    /// Placement of column `key`, if it is fixed
    pub fn get(&self, key: &str) -> Option<&FixedPosition> {
        self.positions.get(key)
    }

    pub fn has_left(&self) -> bool {
        self.positions.values().any(|p| p.side == FixedSide::Left)
    }

    pub fn has_right(&self) -> bool {
        self.positions.values().any(|p| p.side == FixedSide::Right)
    }

    /// Whether any column is fixed
    pub fn is_fixed_column(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Whether every width is known
    pub fn is_complete(&self) -> bool {
        self.unmeasured.is_empty()
    }
}

/// Measured and user-resized column widths.
///
/// Resolution order: resized width, then measured width, then the width
/// configured on the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnWidths {
    measured: HashMap<String, f32>,
    resized: HashMap<String, f32>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a width measured by the host.
    ///
    /// Returns `true` when the width changed enough to require a relayout.
    pub fn measure(&mut self, key: &str, width: f32) -> bool {
        let width = non_negative(width);
        match self.measured.get_mut(key) {
            Some(w) if (*w - width).abs() < WIDTH_EPSILON => false,
            Some(w) => {
                *w = width;
                true
            }
            None => {
                self.measured.insert(key.to_string(), width);
                true
            }
        }
    }

    /// Resize a column, clamped to its minimum width.
    ///
    /// Returns the width actually applied.
    pub fn resize(&mut self, column: &ColumnDef, width: f32, default_min: f32) -> f32 {
        let min = column.min_width.unwrap_or(default_min);
        let width = non_negative(width).max(non_negative(min));
        self.resized.insert(column.key.clone(), width);
        width
    }

    /// Resolved width for a column, or `None` if it has never been sized.
    pub fn resolve(&self, column: &ColumnDef) -> Option<f32> {
        self.resized
            .get(&column.key)
            .or_else(|| self.measured.get(&column.key))
            .copied()
            .or(column.width.map(non_negative))
    }

    /// Drop entries for columns that no longer exist.
    pub fn retain_columns(&mut self, columns: &[ColumnDef]) {
        let keep = |key: &String| columns.iter().any(|c| &c.key == key);
        self.measured.retain(|k, _| keep(k));
        self.resized.retain(|k, _| keep(k));
    }

    /// Forget all measurements and resizes
    pub fn clear(&mut self) {
        self.measured.clear();
        self.resized.clear();
    }
}

/// Compute sticky offsets for every fixed column.
pub fn compute_fixed_positions(columns: &[ColumnDef], widths: &ColumnWidths) -> FixedLayout {
    let mut layout = FixedLayout::default();

    for column in columns {
        let width = match widths.resolve(column) {
            Some(w) => w,
            None => {
                layout.unmeasured.push(column.key.clone());
                0.0
            }
        };
        layout.widths.push(width);
        layout.table_width += width;
    }

    // Left pass
    let mut x: f32 = 0.0;
    let mut last_left: Option<&str> = None;
    for (column, &width) in columns.iter().zip(&layout.widths) {
        if column.fixed != FixedSide::Left {
            continue;
        }
        layout.positions.insert(
            column.key.clone(),
            FixedPosition {
                side: FixedSide::Left,
                left: Some(x),
                right: None,
                width,
                last_left_fixed: false,
                first_right_fixed: false,
            },
        );
        x += width;
        last_left = Some(&column.key);
    }
    layout.left_width = x;

    // Right pass, accumulating from the right edge
    let mut x: f32 = 0.0;
    let mut first_right: Option<&str> = None;
    for (column, &width) in columns.iter().zip(&layout.widths).rev() {
        if column.fixed != FixedSide::Right {
            continue;
        }
        layout.positions.insert(
            column.key.clone(),
            FixedPosition {
                side: FixedSide::Right,
                left: None,
                right: Some(x),
                width,
                last_left_fixed: false,
                first_right_fixed: false,
            },
        );
        x += width;
        first_right = Some(&column.key);
    }
    layout.right_width = x;

    if let Some(pos) = last_left.and_then(|k| layout.positions.get_mut(k)) {
        pos.last_left_fixed = true;
    }
    if let Some(pos) = first_right.and_then(|k| layout.positions.get_mut(k)) {
        pos.first_right_fixed = true;
    }

    if !layout.unmeasured.is_empty() {
        tracing::debug!(
            unmeasured = layout.unmeasured.len(),
            "columns laid out at zero width until measured"
        );
    }
    layout
}

/// Whether to draw the divider shadow on each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowFlags {
    pub left: bool,
    pub right: bool,
}

impl ShadowFlags {
    /// Shadows appear only on sides that have fixed columns and hide content.
    ///
    /// The left shadow needs `scroll_left > 0` (content scrolled under the
    /// fixed-left columns); the right shadow needs content remaining past
    /// the right edge, `scroll_left < max_scroll_left`.
    pub fn compute(layout: &FixedLayout, scroll_left: f32, max_scroll_left: f32) -> Self {
        let scroll_left = non_negative(scroll_left);
        let max_scroll_left = non_negative(max_scroll_left);
        Self {
            left: layout.has_left() && scroll_left > 0.0,
            right: layout.has_right() && scroll_left < max_scroll_left,
        }
    }
}

/// Sticky placement of a pinned row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedRowPosition {
    /// Row index within the current row set
    pub index: usize,
    /// Offset from the top edge (top-pinned rows)
    pub top: Option<f32>,
    /// Offset from the bottom edge (bottom-pinned rows)
    pub bottom: Option<f32>,
    /// Last top-pinned row; draws the divider below it
    pub last_top_fixed: bool,
    /// First bottom-pinned row; draws the divider above it
    pub first_bottom_fixed: bool,
}

/// Compute sticky offsets for pinned rows.
///
/// Overlapping requests are resolved in favor of the top rows.
pub fn compute_fixed_rows(heights: &RowHeights, fixed: FixedRows) -> Vec<FixedRowPosition> {
    let count = heights.len();
    let top = fixed.top.min(count);
    let bottom = fixed.bottom.min(count - top);
    let total = heights.total_height();
    let mut rows = Vec::with_capacity(top + bottom);

    for index in 0..top {
        rows.push(FixedRowPosition {
            index,
            top: Some(heights.offset(index)),
            bottom: None,
            last_top_fixed: index + 1 == top,
            first_bottom_fixed: false,
        });
    }
    for index in (count - bottom)..count {
        rows.push(FixedRowPosition {
            index,
            top: None,
            bottom: Some(total - heights.offset(index + 1)),
            last_top_fixed: false,
            first_bottom_fixed: index == count - bottom,
        });
    }
    rows
}
