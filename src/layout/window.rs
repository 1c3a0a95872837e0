//! Row windowing for virtual scroll.

use serde::{Deserialize, Serialize};

use super::heights::{ceil_index, floor_index};
use super::{RowHeights, Viewport};
use crate::config::{non_negative, ScrollConfig};

/// Contiguous range of rows to mount, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowWindow {
    /// First mounted row
    pub start: usize,
    /// One past the last mounted row
    pub end: usize,
    /// Sum of heights of all rows before `start`
    pub translate_offset: f32,
    /// Height of the whole row set (scroll height of the virtual cursor)
    pub total_height: f32,
    /// False when every row is mounted because windowing is off
    pub virtualized: bool,
}

impl RowWindow {
    /// Window covering every row
    pub fn full(heights: &RowHeights) -> Self {
        Self {
            start: 0,
            end: heights.len(),
            translate_offset: 0.0,
            total_height: heights.total_height(),
            virtualized: false,
        }
    }

    /// Number of mounted rows
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether row `index` is mounted
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Window the row set, honoring the virtualization threshold.
///
/// Below `scroll.threshold` rows (or with virtual scroll disabled) every
/// row is mounted and the translate offset is zero.
pub fn window_for(heights: &RowHeights, viewport: &Viewport, scroll: &ScrollConfig) -> RowWindow {
    if !scroll.is_virtual(heights.len()) {
        return RowWindow::full(heights);
    }
    compute_window(heights, viewport, scroll.buffer_size)
}

/// Compute the mounted row range for the given scroll position.
///
/// The scroll offset is clamped to `[0, total_height - viewport.height]`
/// first, so any input produces a valid window.
pub fn compute_window(heights: &RowHeights, viewport: &Viewport, buffer_size: usize) -> RowWindow {
    let count = heights.len();
    let total_height = heights.total_height();
    let viewport = viewport.sanitized();
    let scroll_top = viewport
        .scroll_top
        .clamp(0.0, viewport.max_scroll_top(total_height));

    if count == 0 {
        return RowWindow {
            start: 0,
            end: 0,
            translate_offset: 0.0,
            total_height,
            virtualized: true,
        };
    }

    let (start, end) = if heights.is_fixed() {
        fixed_range(heights, scroll_top, viewport.height, buffer_size)
    } else {
        measured_range(heights, scroll_top, viewport.height, buffer_size)
    };

    RowWindow {
        start,
        end,
        translate_offset: heights.offset(start),
        total_height,
        virtualized: true,
    }
}

fn fixed_range(
    heights: &RowHeights,
    scroll_top: f32,
    viewport_height: f32,
    buffer_size: usize,
) -> (usize, usize) {
    let count = heights.len();
    let row_height = heights.estimate();
    if row_height <= 0.0 {
        return (0, count);
    }
    let first = floor_index(scroll_top / row_height).min(count.saturating_sub(1));
    let start = first.saturating_sub(buffer_size);
    // Rows touched by [scroll_top, scroll_top + viewport_height)
    let into_first = non_negative(scroll_top - heights.offset(first));
    let visible = ceil_index((into_first + viewport_height) / row_height);
    let end = start
        .saturating_add(visible)
        .saturating_add(buffer_size.saturating_mul(2))
        .min(count);
    (start, end)
}

fn measured_range(
    heights: &RowHeights,
    scroll_top: f32,
    viewport_height: f32,
    buffer_size: usize,
) -> (usize, usize) {
    let count = heights.len();
    let first = heights.row_at(scroll_top).unwrap_or(0);
    // Rows touched by [scroll_top, scroll_top + viewport_height)
    let last = heights
        .row_before(scroll_top + viewport_height)
        .unwrap_or(count.saturating_sub(1))
        .max(first);
    let start = first.saturating_sub(buffer_size);
    let end = last
        .saturating_add(1)
        .saturating_add(buffer_size)
        .min(count);
    (start, end)
}
