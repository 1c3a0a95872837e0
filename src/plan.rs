//! Render plans: the output of a layout pass.
//!
//! A [`RenderPlan`] is substrate-neutral. Hosts either read its fields
//! directly or walk it with a [`PlanVisitor`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::{
    AffixState, FixedLayout, FixedPosition, FixedRowPosition, HeaderCell, HeaderLayout,
    RowHeights, RowWindow, ShadowFlags,
};
use crate::types::{FixedSide, Keyed};

/// A mounted row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRow {
    /// Index in the full data set (page offset included)
    pub index: usize,
    /// Row key
    pub key: String,
    /// Y of the row's top edge in content coordinates
    pub top: f32,
    /// Row height (measured or estimated)
    pub height: f32,
    /// Sticky placement if the row is pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<FixedRowPosition>,
}

/// A column as the renderer should lay it out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPlacement {
    pub key: String,
    /// Resolved width
    pub width: f32,
    /// X of the column's left edge in content coordinates
    pub x: f32,
    /// Sticky placement if the column is fixed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<FixedPosition>,
}

/// A header cell as the renderer should lay it out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderPlacement {
    pub key: String,
    pub col_span: usize,
    pub row_span: usize,
    /// X of the cell's left edge in content coordinates
    pub x: f32,
    /// Sum of the widths of the leaves under the cell
    pub width: f32,
    pub fixed: FixedSide,
    /// Sticky offset from the left edge (cells over fixed-left leaves)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    /// Sticky offset from the right edge (cells over fixed-right leaves)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    /// Cell ends at the last fixed-left leaf
    pub last_left_fixed: bool,
    /// Cell starts at the first fixed-right leaf
    pub first_right_fixed: bool,
}

/// Everything a renderer needs to draw one frame of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// Mounted rows, in source order
    pub visible_rows: Vec<VisibleRow>,
    /// Translation applied to the mounted rows
    pub vertical_offset: f32,
    /// Height of the full (page of the) row set
    pub total_height: f32,
    /// Whether windowing is active
    pub virtualized: bool,
    /// Raw window bounds, relative to the current page
    pub window: RowWindow,
    /// Index of the current page's first row in the full data set
    pub row_offset: usize,
    /// Leaf columns in display order
    pub columns: Vec<ColumnPlacement>,
    /// Header rows, top to bottom, groups included
    pub header_rows: Vec<Vec<HeaderPlacement>>,
    /// Header has more than one row
    pub multiple_header: bool,
    /// Sticky placements keyed by column key
    pub fixed_positions: BTreeMap<String, FixedPosition>,
    /// Pinned rows (mounted or not)
    pub fixed_rows: Vec<FixedRowPosition>,
    pub shadows: ShadowFlags,
    /// Sum of all column widths
    pub table_width: f32,
    /// Table is wider than its container
    pub width_overflow: bool,
    /// Largest horizontal scroll offset
    pub max_scroll_left: f32,
    /// Header rendered outside the scrolling body
    pub fixed_header: bool,
    /// Draw the divider right of a fixed header
    pub show_right_divider: bool,
    pub affix: AffixState,
    /// Columns still waiting for a width measurement
    pub unmeasured_columns: Vec<String>,
}

impl RenderPlan {
    /// Walk the plan: header, then each mounted row and its cells.
    pub fn accept<V: PlanVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.begin(self);
        visitor.header(&self.columns);
        for row in &self.visible_rows {
            visitor.row(row);
            for column in &self.columns {
                visitor.cell(row, column);
            }
        }
        visitor.end(self);
    }

    /// Whether row `index` (full data set index) is mounted
    pub fn is_row_visible(&self, index: usize) -> bool {
        index
            .checked_sub(self.row_offset)
            .is_some_and(|i| self.window.contains(i))
    }

    /// Keys of the mounted rows
    pub fn visible_keys(&self) -> impl Iterator<Item = &str> {
        self.visible_rows.iter().map(|r| r.key.as_str())
    }
}

/// Interprets a render plan into some output substrate.
///
/// Only `cell` is required; the other hooks default to no-ops.
pub trait PlanVisitor {
    fn begin(&mut self, _plan: &RenderPlan) {}
    fn header(&mut self, _columns: &[ColumnPlacement]) {}
    fn row(&mut self, _row: &VisibleRow) {}
    fn cell(&mut self, row: &VisibleRow, column: &ColumnPlacement);
    fn end(&mut self, _plan: &RenderPlan) {}
}

/// Inputs to [`compose`] besides the rows themselves
#[derive(Debug, Clone, Copy)]
pub struct CompositionInput<'a> {
    pub heights: &'a RowHeights,
    pub window: RowWindow,
    /// Column tree; its leaves are the laid-out columns
    pub header: &'a HeaderLayout,
    pub fixed: &'a FixedLayout,
    pub fixed_rows: &'a [FixedRowPosition],
    pub shadows: ShadowFlags,
    pub container_width: f32,
    pub fixed_header: bool,
    pub bordered: bool,
    pub affix: AffixState,
    /// Index of `rows[0]` in the full data set
    pub row_offset: usize,
}

/// Combine windowing and fixation output into a render plan.
///
/// `rows` is the row set the window was computed over (the current page);
/// mounted rows keep their source order.
pub fn compose<R: Keyed>(rows: &[R], input: &CompositionInput<'_>) -> RenderPlan {
    let window = input.window;
    let mounted = rows
        .get(window.start..window.end.min(rows.len()))
        .unwrap_or(&[]);

    let visible_rows = mounted
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let index = window.start + i;
            VisibleRow {
                index: input.row_offset + index,
                key: row.row_key().into_owned(),
                top: input.heights.offset(index),
                height: input.heights.height(index),
                fixed: input.fixed_rows.iter().find(|f| f.index == index).copied(),
            }
        })
        .collect();

    let mut x: f32 = 0.0;
    let columns: Vec<ColumnPlacement> = input
        .header
        .leaves()
        .iter()
        .zip(&input.fixed.widths)
        .map(|(column, &width)| {
            let placement = ColumnPlacement {
                key: column.key.clone(),
                width,
                x,
                fixed: input.fixed.get(&column.key).copied(),
            };
            x += width;
            placement
        })
        .collect();

    let header_rows: Vec<Vec<HeaderPlacement>> = input
        .header
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| place_header(cell, &columns)).collect())
        .collect();
    let multiple_header = input.header.is_multiple();

    let table_width = input.fixed.table_width;
    let width_overflow = table_width > input.container_width;
    RenderPlan {
        visible_rows,
        vertical_offset: window.translate_offset,
        total_height: window.total_height,
        virtualized: window.virtualized,
        window,
        row_offset: input.row_offset,
        columns,
        header_rows,
        multiple_header,
        fixed_positions: input.fixed.positions.clone(),
        fixed_rows: input.fixed_rows.to_vec(),
        shadows: input.shadows,
        table_width,
        width_overflow,
        max_scroll_left: (table_width - input.container_width).max(0.0),
        fixed_header: input.fixed_header,
        // A multi-row header only needs the divider once it scrolls sideways
        show_right_divider: input.bordered
            && input.fixed_header
            && (!multiple_header || width_overflow),
        affix: input.affix,
        unmeasured_columns: input.fixed.unmeasured.clone(),
    }
}

/// Position a header cell over the leaf columns it spans.
fn place_header(cell: &HeaderCell, columns: &[ColumnPlacement]) -> HeaderPlacement {
    let spanned = columns
        .get(cell.first_leaf..cell.first_leaf + cell.col_span)
        .unwrap_or(&[]);
    let first = spanned.first().and_then(|c| c.fixed);
    let last = spanned.last().and_then(|c| c.fixed);
    let (left, right) = match cell.fixed {
        FixedSide::Left => (first.and_then(|p| p.left), None),
        FixedSide::Right => (None, last.and_then(|p| p.right)),
        FixedSide::None => (None, None),
    };
    HeaderPlacement {
        key: cell.key.clone(),
        col_span: cell.col_span,
        row_span: cell.row_span,
        x: spanned.first().map_or(0.0, |c| c.x),
        width: spanned.iter().map(|c| c.width).sum(),
        fixed: cell.fixed,
        left,
        right,
        last_left_fixed: cell.fixed == FixedSide::Left && last.is_some_and(|p| p.last_left_fixed),
        first_right_fixed: cell.fixed == FixedSide::Right
            && first.is_some_and(|p| p.first_right_fixed),
    }
}
