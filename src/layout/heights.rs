//! Row height bookkeeping.
//!
//! Rows either share one fixed height, in which case positions are pure
//! arithmetic, or carry individual heights kept as prefix sums so that the
//! top edge of any row and the row at any y are O(1) and O(log n).

use crate::config::non_negative;

/// Heights and cumulative positions of an ordered row set
#[derive(Debug, Clone, PartialEq)]
pub struct RowHeights {
    count: usize,
    /// Fixed height, or the estimate used for unmeasured rows
    estimate: f32,
    fixed: bool,
    /// Per-row heights (empty in fixed mode)
    heights: Vec<f32>,
    /// `positions[i]` = y of row i's top edge; one extra entry for the bottom edge
    positions: Vec<f32>,
    measured: Vec<bool>,
}

impl RowHeights {
    /// Every row is exactly `height` pixels tall.
    pub fn fixed(count: usize, height: f32) -> Self {
        Self {
            count,
            estimate: non_negative(height),
            fixed: true,
            heights: Vec::new(),
            positions: Vec::new(),
            measured: Vec::new(),
        }
    }

    /// `count` unmeasured rows, each assumed to be `estimate` pixels tall.
    pub fn estimated(count: usize, estimate: f32) -> Self {
        Self::from_measurements(std::iter::repeat(None).take(count), estimate)
    }

    /// Build from per-row measurements; `None` entries use the estimate.
    pub fn from_measurements<I>(measurements: I, estimate: f32) -> Self
    where
        I: IntoIterator<Item = Option<f32>>,
    {
        let estimate = non_negative(estimate);
        let iter = measurements.into_iter();
        let (lower, _) = iter.size_hint();
        let mut heights = Vec::with_capacity(lower);
        let mut measured = Vec::with_capacity(lower);
        let mut positions = Vec::with_capacity(lower + 1);
        let mut y: f32 = 0.0;

        for m in iter {
            positions.push(y);
            let h = m.map_or(estimate, non_negative);
            heights.push(h);
            measured.push(m.is_some());
            y += h;
        }
        positions.push(y); // Final edge

        Self {
            count: heights.len(),
            estimate,
            fixed: false,
            heights,
            positions,
            measured,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether all rows share one height
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Fixed row height, or the estimate for unmeasured rows
    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    /// Height of row `index` (0 past the end)
    pub fn height(&self, index: usize) -> f32 {
        if index >= self.count {
            return 0.0;
        }
        if self.fixed {
            return self.estimate;
        }
        self.heights.get(index).copied().unwrap_or(self.estimate)
    }

    /// Y of the top edge of row `index`; `offset(len())` is the total height.
    pub fn offset(&self, index: usize) -> f32 {
        let index = index.min(self.count);
        if self.fixed {
            return index as f32 * self.estimate;
        }
        self.positions.get(index).copied().unwrap_or(0.0)
    }

    /// Sum of all row heights
    pub fn total_height(&self) -> f32 {
        self.offset(self.count)
    }

    /// Find the row whose span contains `y`.
    ///
    /// Positions above the first row map to row 0, positions past the last
    /// row map to the last row. Returns `None` only for an empty row set.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let y = non_negative(y);
        if self.fixed {
            if self.estimate <= 0.0 {
                return Some(self.count - 1);
            }
            return Some(floor_index(y / self.estimate).min(self.count - 1));
        }
        // Last row whose top edge is at or above y
        let tops = self.positions.get(..self.count).unwrap_or(&[]);
        let i = tops.partition_point(|&top| top <= y);
        Some(i.saturating_sub(1).min(self.count - 1))
    }

    /// Find the last row whose top edge lies strictly above `y`.
    ///
    /// This is the row containing the exclusive bottom edge of a range
    /// ending at `y`; a row that starts exactly at `y` is not included.
    /// Returns `None` only for an empty row set.
    pub fn row_before(&self, y: f32) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let y = non_negative(y);
        if self.fixed {
            if self.estimate <= 0.0 {
                return Some(self.count - 1);
            }
            return Some(
                ceil_index(y / self.estimate)
                    .saturating_sub(1)
                    .min(self.count - 1),
            );
        }
        let tops = self.positions.get(..self.count).unwrap_or(&[]);
        let i = tops.partition_point(|&top| top < y);
        Some(i.saturating_sub(1).min(self.count - 1))
    }

    /// Whether row `index` has been measured by the host
    pub fn is_measured(&self, index: usize) -> bool {
        if self.fixed {
            return index < self.count;
        }
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Record a measured height for row `index`.
    ///
    /// Returns `true` when the measurement moved the row by more than
    /// `tolerance` pixels, meaning any window computed from the previous
    /// heights is stale. Fixed-height sets ignore measurements.
    pub fn measure(&mut self, index: usize, height: f32, tolerance: f32) -> bool {
        if self.fixed || index >= self.count {
            return false;
        }
        let height = non_negative(height);
        if let Some(flag) = self.measured.get_mut(index) {
            *flag = true;
        }
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        let delta = height - *slot;
        if delta.abs() <= tolerance {
            return false;
        }
        *slot = height;
        // Shift every edge below the measured row
        for pos in self.positions.iter_mut().skip(index + 1) {
            *pos += delta;
        }
        tracing::trace!(index, height, delta, "row height corrected");
        true
    }
}

/// `floor(v)` as an index, saturating at 0 for negative or NaN input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn floor_index(v: f32) -> usize {
    if v.is_finite() && v > 0.0 {
        v.floor() as usize
    } else if v.is_infinite() && v.is_sign_positive() {
        usize::MAX
    } else {
        0
    }
}

/// `ceil(v)` as an index, saturating at 0 for negative or NaN input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn ceil_index(v: f32) -> usize {
    if v.is_finite() && v > 0.0 {
        v.ceil() as usize
    } else if v.is_infinite() && v.is_sign_positive() {
        usize::MAX
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_positions() {
        let h = RowHeights::fixed(10, 20.0);
        assert_eq!(h.offset(0), 0.0);
        assert_eq!(h.offset(3), 60.0);
        assert_eq!(h.total_height(), 200.0);
        assert_eq!(h.offset(99), 200.0);
    }

    #[test]
    fn test_prefix_sums() {
        let h = RowHeights::from_measurements([Some(10.0), None, Some(30.0)], 20.0);
        assert_eq!(h.offset(1), 10.0);
        assert_eq!(h.offset(2), 30.0);
        assert_eq!(h.total_height(), 60.0);
        assert!(h.is_measured(0));
        assert!(!h.is_measured(1));
    }

    #[test]
    fn test_row_at() {
        let h = RowHeights::from_measurements([Some(10.0), Some(20.0), Some(30.0)], 20.0);
        assert_eq!(h.row_at(0.0), Some(0));
        assert_eq!(h.row_at(9.9), Some(0));
        assert_eq!(h.row_at(10.0), Some(1));
        assert_eq!(h.row_at(45.0), Some(2));
        assert_eq!(h.row_at(1000.0), Some(2));
        assert_eq!(h.row_at(-5.0), Some(0));
        assert_eq!(RowHeights::estimated(0, 20.0).row_at(0.0), None);
    }

    #[test]
    fn test_row_before_excludes_row_starting_at_edge() {
        let h = RowHeights::from_measurements([Some(10.0), Some(20.0), Some(30.0)], 20.0);
        assert_eq!(h.row_before(10.0), Some(0));
        assert_eq!(h.row_before(10.5), Some(1));
        assert_eq!(h.row_before(60.0), Some(2));
        assert_eq!(h.row_before(0.0), Some(0));

        let fixed = RowHeights::fixed(100, 40.0);
        assert_eq!(fixed.row_before(400.0), Some(9));
        assert_eq!(fixed.row_before(401.0), Some(10));
        assert_eq!(RowHeights::fixed(0, 40.0).row_before(10.0), None);
    }

    #[test]
    fn test_row_at_skips_zero_height_rows() {
        let h = RowHeights::from_measurements([Some(10.0), Some(0.0), Some(10.0)], 20.0);
        assert_eq!(h.row_at(10.0), Some(2));
    }

    #[test]
    fn test_measure_shifts_following_rows() {
        let mut h = RowHeights::estimated(4, 20.0);
        assert!(h.measure(1, 50.0, 1.0));
        assert_eq!(h.offset(1), 20.0);
        assert_eq!(h.offset(2), 70.0);
        assert_eq!(h.total_height(), 110.0);
        assert!(h.is_measured(1));
    }

    #[test]
    fn test_measure_within_tolerance_is_quiet() {
        let mut h = RowHeights::estimated(4, 20.0);
        assert!(!h.measure(1, 20.5, 1.0));
        assert_eq!(h.total_height(), 80.0);
        assert!(h.is_measured(1));
    }

    #[test]
    fn test_measure_ignored_for_fixed_rows() {
        let mut h = RowHeights::fixed(4, 20.0);
        assert!(!h.measure(1, 50.0, 1.0));
        assert_eq!(h.total_height(), 80.0);
    }

    #[test]
    fn test_index_helpers() {
        assert_eq!(floor_index(2.7), 2);
        assert_eq!(ceil_index(2.1), 3);
        assert_eq!(floor_index(-1.0), 0);
        assert_eq!(ceil_index(f32::NAN), 0);
    }
}
