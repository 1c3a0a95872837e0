//! Layout engine for virtualized tables.
//!
//! This module handles:
//! - Row height prefix sums and binary search for the row at a y offset
//! - Row windowing with a configurable buffer and virtualization threshold
//! - Sticky offsets and shadow flags for fixed columns and rows
//! - Multi-level headers from nested column groups
//! - Viewport clamping, local pagination and affix visibility

mod affix;
mod fixed;
mod header;
mod heights;
mod pagination;
mod viewport;
mod window;

pub use affix::{AffixInput, AffixState};
pub use fixed::{
    compute_fixed_positions, compute_fixed_rows, ColumnWidths, FixedLayout, FixedPosition,
    FixedRowPosition, ShadowFlags,
};
pub use header::{HeaderCell, HeaderLayout};
pub(crate) use heights::floor_index;
pub use heights::RowHeights;
pub use pagination::Pagination;
pub use viewport::Viewport;
pub use window::{compute_window, window_for, RowWindow};
