//! JSON scenario documents.
//!
//! A scenario bundles everything one layout pass needs: configuration,
//! columns, rows (explicit or generated), viewport and host measurements.
//! The CLI and the WASM `compute_plan` entry point both run scenarios.
//!
//! ```json
//! {
//!   "config": { "scroll": { "virtualScroll": true, "rowHeight": 40, "bufferSize": 5 } },
//!   "columns": [{ "key": "id", "width": 100, "fixed": "left" }, { "key": "name", "width": 300 }],
//!   "rowCount": 10000,
//!   "viewport": { "scrollTop": 2000, "width": 320, "height": 400 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::TableConfig;
use crate::engine::TableEngine;
use crate::error::{Result, VirtableError};
use crate::layout::{AffixInput, Pagination, Viewport};
use crate::plan::RenderPlan;
use crate::types::{ColumnDef, RowMeta};

/// One layout pass described as data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scenario {
    pub config: TableConfig,
    pub columns: Vec<ColumnDef>,
    /// Explicit rows, optionally with measured heights
    pub rows: Vec<RowMeta>,
    /// Generate rows keyed `"0"..count` instead of listing them
    pub row_count: Option<usize>,
    pub viewport: Viewport,
    /// Column widths measured by the host
    pub measured_widths: BTreeMap<String, f32>,
    pub pagination: Option<Pagination>,
    pub affix: Option<AffixInput>,
}

impl Scenario {
    /// Decode a scenario document
    pub fn from_json(json: &str) -> Result<Self> {
        let mut scenario: Self = serde_json::from_str(json)?;
        scenario.config = scenario.config.sanitized();
        Ok(scenario)
    }

    /// Read and decode a scenario file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The row set, generating keys when `rowCount` is used.
    pub fn rows(&self) -> Result<Vec<RowMeta>> {
        match self.row_count {
            Some(_) if !self.rows.is_empty() => Err(VirtableError::Config(
                "`rows` and `rowCount` are mutually exclusive".to_string(),
            )),
            Some(count) => Ok((0..count).map(RowMeta::new).collect()),
            None => Ok(self.rows.clone()),
        }
    }

    /// Build an engine primed with this scenario's inputs and measurements.
    pub fn engine(&self, rows: &[RowMeta]) -> Result<TableEngine> {
        let mut engine = TableEngine::new(self.config.clone());
        engine.set_columns(self.columns.clone())?;
        engine.set_viewport(self.viewport);
        engine.set_pagination(self.pagination);
        engine.set_affix_input(self.affix);
        for (key, width) in &self.measured_widths {
            engine.measure_column(key, *width);
        }
        for row in rows {
            if let Some(height) = row.height {
                engine.measure_row(row.key.as_str(), height);
            }
        }
        Ok(engine)
    }

    /// Run the layout pass
    pub fn run(&self) -> Result<RenderPlan> {
        let rows = self.rows()?;
        let mut engine = self.engine(&rows)?;
        Ok(engine.plan(&rows))
    }
}

/// Decode a scenario, lay it out and encode the plan.
pub fn compute_plan_json(json: &str) -> Result<String> {
    let plan = Scenario::from_json(json)?.run()?;
    Ok(serde_json::to_string(&plan)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const REFERENCE: &str = r#"{
        "config": { "scroll": { "virtualScroll": true, "fixedRowHeight": true, "rowHeight": 40, "bufferSize": 5 } },
        "columns": [{ "key": "id", "width": 100, "fixed": "left" }, { "key": "name", "width": 300 }],
        "rowCount": 10000,
        "viewport": { "scrollTop": 2000, "scrollLeft": 50, "width": 320, "height": 400 }
    }"#;

    #[test]
    fn test_reference_scenario() {
        let plan = Scenario::from_json(REFERENCE).unwrap().run().unwrap();
        assert_eq!(plan.window.start, 45);
        assert_eq!(plan.window.end, 65);
        assert_eq!(plan.vertical_offset, 1800.0);
        assert!(plan.shadows.left);
        assert!(!plan.shadows.right);
        assert_eq!(plan.fixed_positions["id"].left, Some(0.0));
    }

    #[test]
    fn test_measured_rows_applied() {
        let json = r#"{
            "config": { "scroll": { "virtualScroll": true, "threshold": 1, "bufferSize": 0, "rowHeight": 20 } },
            "rows": [{ "key": "a", "height": 50 }, { "key": "b" }, { "key": "c" }],
            "viewport": { "height": 60 }
        }"#;
        let plan = Scenario::from_json(json).unwrap().run().unwrap();
        assert_eq!(plan.total_height, 90.0);
        assert_eq!(plan.visible_rows[1].top, 50.0);
    }

    #[test]
    fn test_rows_and_row_count_conflict() {
        let json = r#"{ "rows": [{ "key": "a" }], "rowCount": 3 }"#;
        let err = Scenario::from_json(json).unwrap().run().unwrap_err();
        assert!(matches!(err, VirtableError::Config(_)));
    }

    #[test]
    fn test_compute_plan_json_round_trip() {
        let json = compute_plan_json(REFERENCE).unwrap();
        let plan: RenderPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan.visible_rows.len(), 20);
        assert!(json.contains("\"verticalOffset\":1800.0"));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir()
            .join(format!("virtable-scenario-{}.json", std::process::id()));
        fs::write(&path, REFERENCE).unwrap();
        let scenario = Scenario::from_path(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(scenario.unwrap().row_count, Some(10_000));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Scenario::from_path("/nonexistent/virtable/scenario.json").unwrap_err();
        assert!(matches!(err, VirtableError::Io(_)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            compute_plan_json("[1, 2"),
            Err(VirtableError::Json(_))
        ));
    }
}
