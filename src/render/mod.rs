//! Interpreting render plans.
//!
//! This module provides:
//! - Sticky cell styling (offsets, stacking, shadow edges) for any host
//! - A plain-text renderer for terminals and snapshots
//!
//! DOM hosts consume the plan through the WASM bindings and apply
//! [`CellStyle::to_css`] per cell; other hosts implement
//! [`PlanVisitor`](crate::plan::PlanVisitor) directly.

mod style;
mod text;

pub use style::CellStyle;
pub use text::{TextRenderer, DEFAULT_PX_PER_CHAR};
