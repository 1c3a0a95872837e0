//! Sticky cell styling derived from a render plan.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::layout::ShadowFlags;
use crate::plan::{ColumnPlacement, HeaderPlacement, VisibleRow};
use crate::types::FixedSide;

/// Stacking order for fixed cells so they paint over scrolling ones
const FIXED_Z_INDEX: u32 = 1;
/// Cells fixed on both axes paint over cells fixed on one
const FIXED_CORNER_Z_INDEX: u32 = 2;

/// Positioning for one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    /// Cell uses sticky positioning
    pub sticky: bool,
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub z_index: Option<u32>,
    /// Draw the divider shadow on the cell's right edge
    pub shadow_left: bool,
    /// Draw the divider shadow on the cell's left edge
    pub shadow_right: bool,
}

impl CellStyle {
    /// Style for the cell at `row` × `column`.
    pub fn for_cell(row: &VisibleRow, column: &ColumnPlacement, shadows: ShadowFlags) -> Self {
        let mut style = Self::for_column(column, shadows);
        if let Some(fixed) = row.fixed {
            style.sticky = true;
            style.top = fixed.top;
            style.bottom = fixed.bottom;
            style.z_index = Some(if column.fixed.is_some() {
                FIXED_CORNER_Z_INDEX
            } else {
                FIXED_Z_INDEX
            });
        }
        style
    }

    /// Style for a header cell (or any cell of a non-pinned row).
    pub fn for_column(column: &ColumnPlacement, shadows: ShadowFlags) -> Self {
        let Some(fixed) = column.fixed else {
            return Self::default();
        };
        Self {
            sticky: true,
            left: fixed.left,
            right: fixed.right,
            top: None,
            bottom: None,
            z_index: Some(FIXED_Z_INDEX),
            shadow_left: fixed.side == FixedSide::Left && fixed.last_left_fixed && shadows.left,
            shadow_right: fixed.side == FixedSide::Right
                && fixed.first_right_fixed
                && shadows.right,
        }
    }

    /// Style for a header cell, group cells included.
    pub fn for_header(cell: &HeaderPlacement, shadows: ShadowFlags) -> Self {
        if cell.fixed == FixedSide::None {
            return Self::default();
        }
        Self {
            sticky: true,
            left: cell.left,
            right: cell.right,
            top: None,
            bottom: None,
            z_index: Some(FIXED_Z_INDEX),
            shadow_left: cell.last_left_fixed && shadows.left,
            shadow_right: cell.first_right_fixed && shadows.right,
        }
    }

    /// Inline CSS for DOM hosts
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if !self.sticky {
            return css;
        }
        css.push_str("position: sticky;");
        for (name, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if let Some(v) = value {
                let _ = write!(css, " {name}: {v}px;");
            }
        }
        if let Some(z) = self.z_index {
            let _ = write!(css, " z-index: {z};");
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FixedPosition, FixedRowPosition};

    fn left_column(last: bool) -> ColumnPlacement {
        ColumnPlacement {
            key: "id".to_string(),
            width: 100.0,
            x: 0.0,
            fixed: Some(FixedPosition {
                side: FixedSide::Left,
                left: Some(0.0),
                right: None,
                width: 100.0,
                last_left_fixed: last,
                first_right_fixed: false,
            }),
        }
    }

    fn row(fixed: Option<FixedRowPosition>) -> VisibleRow {
        VisibleRow {
            index: 0,
            key: "r".to_string(),
            top: 0.0,
            height: 40.0,
            fixed,
        }
    }

    #[test]
    fn test_right_group_header_draws_shadow() {
        let cell = HeaderPlacement {
            key: "ops".to_string(),
            col_span: 2,
            row_span: 1,
            x: 400.0,
            width: 160.0,
            fixed: FixedSide::Right,
            left: None,
            right: Some(0.0),
            last_left_fixed: false,
            first_right_fixed: true,
        };
        let shadows = ShadowFlags {
            left: false,
            right: true,
        };
        let style = CellStyle::for_header(&cell, shadows);
        assert!(style.sticky);
        assert_eq!(style.right, Some(0.0));
        assert!(style.shadow_right);

        let scrolling = HeaderPlacement {
            fixed: FixedSide::None,
            right: None,
            first_right_fixed: false,
            ..cell
        };
        assert_eq!(CellStyle::for_header(&scrolling, shadows), CellStyle::default());
    }

    #[test]
    fn test_scrolling_cell_has_no_style() {
        let column = ColumnPlacement {
            key: "x".to_string(),
            width: 50.0,
            x: 100.0,
            fixed: None,
        };
        let style = CellStyle::for_cell(&row(None), &column, ShadowFlags::default());
        assert_eq!(style, CellStyle::default());
        assert_eq!(style.to_css(), "");
    }

    #[test]
    fn test_shadow_only_on_last_left_column() {
        let shadows = ShadowFlags {
            left: true,
            right: false,
        };
        assert!(CellStyle::for_column(&left_column(true), shadows).shadow_left);
        assert!(!CellStyle::for_column(&left_column(false), shadows).shadow_left);
        assert!(!CellStyle::for_column(&left_column(true), ShadowFlags::default()).shadow_left);
    }

    #[test]
    fn test_corner_cell_css() {
        let pinned = FixedRowPosition {
            index: 0,
            top: Some(0.0),
            bottom: None,
            last_top_fixed: true,
            first_bottom_fixed: false,
        };
        let style = CellStyle::for_cell(
            &row(Some(pinned)),
            &left_column(true),
            ShadowFlags::default(),
        );
        assert_eq!(
            style.to_css(),
            "position: sticky; left: 0px; top: 0px; z-index: 2;"
        );
    }
}
