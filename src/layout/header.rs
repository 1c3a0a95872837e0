//! Multi-level headers.
//!
//! Column groups nest; only leaf columns carry widths and cells. A group
//! becomes one header cell spanning its leaves, and a leaf's header cell
//! spans down to the last header row.

use serde::{Deserialize, Serialize};

use crate::types::{ColumnDef, FixedSide};

/// One header cell before placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub key: String,
    /// Header row the cell starts in
    pub level: usize,
    /// Index of the first leaf column under this cell
    pub first_leaf: usize,
    pub col_span: usize,
    pub row_span: usize,
    /// Side after inheritance from enclosing groups
    pub fixed: FixedSide,
}

/// Header rows and leaf columns for a column tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderLayout {
    rows: Vec<Vec<HeaderCell>>,
    leaves: Vec<ColumnDef>,
}

impl HeaderLayout {
    /// Flatten `columns` into leaves and build the header rows.
    ///
    /// A group fixed to a side pins every column under it; children of an
    /// unfixed group keep their own side.
    pub fn new(columns: &[ColumnDef]) -> Self {
        let depth = columns.iter().map(depth).max().unwrap_or(0);
        let mut layout = Self {
            rows: vec![Vec::new(); depth],
            leaves: Vec::new(),
        };
        for column in columns {
            layout.walk(column, 0, FixedSide::None, depth);
        }
        layout
    }

    fn walk(&mut self, column: &ColumnDef, level: usize, inherited: FixedSide, depth: usize) {
        let fixed = if inherited == FixedSide::None {
            column.fixed
        } else {
            inherited
        };
        let first_leaf = self.leaves.len();

        let (col_span, row_span) = if column.is_group() {
            for child in &column.children {
                self.walk(child, level + 1, fixed, depth);
            }
            (self.leaves.len() - first_leaf, 1)
        } else {
            self.leaves.push(ColumnDef {
                fixed,
                children: Vec::new(),
                ..column.clone()
            });
            (1, depth.saturating_sub(level).max(1))
        };

        if let Some(row) = self.rows.get_mut(level) {
            row.push(HeaderCell {
                key: column.key.clone(),
                level,
                first_leaf,
                col_span,
                row_span,
                fixed,
            });
        }
    }

    /// Leaf columns in display order, fixed sides resolved
    pub fn leaves(&self) -> &[ColumnDef] {
        &self.leaves
    }

    /// Header rows, top to bottom; cells in each row are left to right
    pub fn rows(&self) -> &[Vec<HeaderCell>] {
        &self.rows
    }

    /// More than one header row
    pub fn is_multiple(&self) -> bool {
        self.rows.len() > 1
    }

    /// Every header cell, groups included
    pub fn cells(&self) -> impl Iterator<Item = &HeaderCell> {
        self.rows.iter().flatten()
    }
}

fn depth(column: &ColumnDef) -> usize {
    1 + column.children.iter().map(depth).max().unwrap_or(0)
}
