//! virtable - layout engine for virtualized data tables
//!
//! Computes what a table widget has to draw, independent of how it draws:
//! - Row windowing over fixed or measured row heights (virtual scroll)
//! - Sticky offsets and shadow flags for fixed columns and rows
//! - Affixed header/footer/pagination and local pagination
//! - A render plan any host can interpret (DOM via WASM, terminal, tests)
//!
//! # Usage
//!
//! ```
//! use virtable::{ColumnDef, FixedSide, RowKey, ScrollConfig, TableConfig, TableEngine};
//!
//! let mut engine = TableEngine::new(TableConfig {
//!     scroll: ScrollConfig::fixed(40.0, 5),
//!     ..TableConfig::default()
//! });
//! engine
//!     .set_columns(vec![
//!         ColumnDef::new("id").width(100.0).fixed(FixedSide::Left),
//!         ColumnDef::new("name").width(300.0),
//!     ])
//!     .expect("unique column keys");
//! engine.resize(320.0, 400.0);
//! engine.scroll_to(0.0, 2000.0);
//!
//! let rows: Vec<RowKey> = (0..10_000_usize).map(RowKey::from).collect();
//! let plan = engine.plan(&rows);
//! assert_eq!((plan.window.start, plan.window.end), (45, 65));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod observer;
pub mod plan;
pub mod render;
pub mod scenario;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use config::{ScrollConfig, TableConfig};
pub use engine::{Invalidation, TableEngine};
pub use error::{Result, VirtableError};
pub use plan::{PlanVisitor, RenderPlan};
pub use types::*;

/// Lay out a JSON scenario and return the render plan as JSON
///
/// # Errors
/// Returns an error if the scenario is malformed.
#[wasm_bindgen]
pub fn compute_plan(scenario: &str) -> std::result::Result<String, JsValue> {
    scenario::compute_plan_json(scenario).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
