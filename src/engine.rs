//! Stateful table layout engine.
//!
//! [`TableEngine`] owns only derived state: row height prefix sums,
//! measured heights by row key, measured and resized column widths and the
//! current viewport. The row data itself stays with the host and is passed
//! to every [`TableEngine::plan`] call.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use bitflags::bitflags;

use crate::config::TableConfig;
use crate::error::{Result, VirtableError};
use crate::layout::{
    compute_fixed_positions, compute_fixed_rows, window_for, AffixInput, AffixState,
    ColumnWidths, FixedLayout, HeaderLayout, Pagination, RowHeights, ShadowFlags, Viewport,
};
use crate::plan::{compose, CompositionInput, RenderPlan};
use crate::types::{ColumnDef, Keyed, RowKey};

bitflags! {
    /// Inputs that changed since the last plan
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Row set replaced, reordered or paginated differently
        const ROWS = 1 << 0;
        /// Scroll position or container size
        const VIEWPORT = 1 << 1;
        /// Column list or column widths
        const COLUMNS = 1 << 2;
        /// A row measurement moved rows below it
        const MEASURE = 1 << 3;
        /// Configuration replaced
        const CONFIG = 1 << 4;
    }
}

/// Incremental layout state for one table
#[derive(Debug, Clone)]
pub struct TableEngine {
    config: TableConfig,
    /// Column tree as supplied, groups included
    columns: Vec<ColumnDef>,
    header: HeaderLayout,
    widths: ColumnWidths,
    viewport: Viewport,
    pagination: Option<Pagination>,
    affix_input: Option<AffixInput>,
    /// Measured heights by row key; survives data mutation
    measured_heights: HashMap<RowKey, f32>,
    /// Prefix sums for the row set seen by the last plan
    heights: RowHeights,
    /// Position of each key in `heights`
    key_index: HashMap<RowKey, usize>,
    pending: Invalidation,
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl TableEngine {
    pub fn new(config: TableConfig) -> Self {
        let config = config.sanitized();
        let heights = RowHeights::estimated(0, config.scroll.row_height);
        Self {
            config,
            columns: Vec::new(),
            header: HeaderLayout::default(),
            widths: ColumnWidths::new(),
            viewport: Viewport::default(),
            pagination: None,
            affix_input: None,
            measured_heights: HashMap::new(),
            heights,
            key_index: HashMap::new(),
            pending: Invalidation::all(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Replace the configuration. Row heights are rebuilt on the next plan.
    pub fn set_config(&mut self, config: TableConfig) {
        self.config = config.sanitized();
        self.invalidate(Invalidation::CONFIG | Invalidation::ROWS);
    }

    /// Column tree as supplied, groups included
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Leaf columns in display order, with fixed sides inherited from groups
    pub fn leaf_columns(&self) -> &[ColumnDef] {
        self.header.leaves()
    }

    /// Replace the column tree.
    ///
    /// Keys must be unique across groups and leaves. Widths measured for
    /// columns that are gone are forgotten.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) -> Result<()> {
        let header = HeaderLayout::new(&columns);
        {
            let mut seen = HashSet::new();
            if let Some(dup) = header.cells().find(|c| !seen.insert(c.key.as_str())) {
                return Err(VirtableError::Columns(format!(
                    "duplicate column key '{}'",
                    dup.key
                )));
            }
        }
        self.widths.retain_columns(header.leaves());
        self.header = header;
        self.columns = columns;
        self.invalidate(Invalidation::COLUMNS);
        Ok(())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the viewport wholesale (scroll and size)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport.sanitized();
        self.invalidate(Invalidation::VIEWPORT);
    }

    /// Scroll to an absolute position; clamped on the next plan
    pub fn scroll_to(&mut self, scroll_left: f32, scroll_top: f32) {
        self.viewport.scroll_left = scroll_left;
        self.viewport.scroll_top = scroll_top;
        self.viewport = self.viewport.sanitized();
        self.invalidate(Invalidation::VIEWPORT);
    }

    /// Scroll by a delta, clamped against the last laid-out content size.
    ///
    /// Returns the applied delta, or `None` if the position did not move.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        let (width, height) = self.content_size();
        let applied = self.viewport.scroll_by(delta_x, delta_y, width, height);
        if applied.is_some() {
            self.invalidate(Invalidation::VIEWPORT);
        }
        applied
    }

    /// Container resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.viewport = self.viewport.sanitized();
        self.invalidate(Invalidation::VIEWPORT);
    }

    /// Show one page of the row set, or all rows with `None`
    pub fn set_pagination(&mut self, pagination: Option<Pagination>) {
        if self.pagination != pagination {
            self.pagination = pagination;
            self.invalidate(Invalidation::ROWS);
        }
    }

    /// Page-level position of the table, used for affix decisions
    pub fn set_affix_input(&mut self, input: Option<AffixInput>) {
        self.affix_input = input;
        self.invalidate(Invalidation::VIEWPORT);
    }

    /// The host replaced, reordered or mutated the row set.
    pub fn rows_changed(&mut self) {
        self.invalidate(Invalidation::ROWS);
    }

    /// Record the rendered height of a row.
    ///
    /// Returns `true` when the measurement moved rows enough that the
    /// current plan is stale.
    pub fn measure_row(&mut self, key: &str, height: f32) -> bool {
        let key = RowKey::from(key);
        let tolerance = self.config.scroll.measure_tolerance;
        let changed = match self.key_index.get(&key) {
            Some(&index) => self.heights.measure(index, height, tolerance),
            None => false,
        };
        self.measured_heights.insert(key, height);
        if changed {
            self.invalidate(Invalidation::MEASURE);
        }
        changed
    }

    /// Record the rendered width of a column.
    pub fn measure_column(&mut self, key: &str, width: f32) -> bool {
        let changed = self.widths.measure(key, width);
        if changed {
            self.invalidate(Invalidation::COLUMNS);
        }
        changed
    }

    /// Resize a column (drag handle). Returns the applied width.
    pub fn resize_column(&mut self, key: &str, width: f32) -> Option<f32> {
        let min = self.config.min_column_width();
        let column = self.header.leaves().iter().find(|c| c.key == key)?;
        let applied = self.widths.resize(column, width, min);
        self.invalidate(Invalidation::COLUMNS);
        Some(applied)
    }

    /// Inputs changed since the last plan
    pub fn pending(&self) -> Invalidation {
        self.pending
    }

    pub fn needs_recompute(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Mark inputs dirty. Repeated requests before the next plan coalesce.
    pub fn invalidate(&mut self, what: Invalidation) {
        if !self.pending.contains(what) {
            tracing::trace!(?what, "layout invalidated");
        }
        self.pending |= what;
    }

    /// `(table_width, total_height)` of the last laid-out content
    pub fn content_size(&self) -> (f32, f32) {
        let fixed = self.fixed_layout();
        (fixed.table_width, self.heights.total_height())
    }

    /// Current column layout, without touching rows
    pub fn fixed_layout(&self) -> FixedLayout {
        compute_fixed_positions(self.header.leaves(), &self.widths)
    }

    /// Derive the render plan for `rows`.
    ///
    /// `rows` is the full data set; pagination is applied here. The plan is
    /// always recomputed from the current inputs and the pending
    /// invalidation set is cleared.
    pub fn plan<R: Keyed>(&mut self, rows: &[R]) -> RenderPlan {
        let page = self
            .pagination
            .map_or(0..rows.len(), |p| p.range(rows.len()));
        let row_offset = page.start;
        let page_rows = rows.get(page).unwrap_or(&[]);

        if self.pending.intersects(Invalidation::ROWS | Invalidation::CONFIG)
            || self.heights.len() != page_rows.len()
        {
            self.sync_rows(rows, page_rows);
        }

        let fixed = self.fixed_layout();
        self.viewport
            .clamp_scroll(fixed.table_width, self.heights.total_height());

        let window = window_for(&self.heights, &self.viewport, &self.config.scroll);
        let fixed_rows = compute_fixed_rows(&self.heights, self.config.fixed_rows);
        let max_scroll_left = self.viewport.max_scroll_left(fixed.table_width);
        let shadows = ShadowFlags::compute(&fixed, self.viewport.scroll_left, max_scroll_left);
        let fixed_header = window.virtualized
            || self
                .config
                .height
                .is_some_and(|h| self.heights.total_height() > h);
        let affix = self
            .affix_input
            .map(|input| AffixState::compute(&self.config.affix, &input))
            .unwrap_or_default();

        let plan = compose(
            page_rows,
            &CompositionInput {
                heights: &self.heights,
                window,
                header: &self.header,
                fixed: &fixed,
                fixed_rows: &fixed_rows,
                shadows,
                container_width: self.viewport.width,
                fixed_header,
                bordered: self.config.bordered,
                affix,
                row_offset,
            },
        );

        tracing::debug!(
            pending = ?self.pending,
            rows = page_rows.len(),
            start = window.start,
            end = window.end,
            offset = window.translate_offset,
            virtualized = window.virtualized,
            "layout recomputed"
        );
        self.pending = Invalidation::empty();
        plan
    }

    /// Rebuild prefix sums for the current page, reusing measurements by key.
    ///
    /// `rows` is the full data set; measurements are kept for every key in
    /// it, so rows on other pages keep their heights.
    fn sync_rows<R: Keyed>(&mut self, rows: &[R], page_rows: &[R]) {
        let scroll = &self.config.scroll;
        self.key_index.clear();
        self.key_index.reserve(page_rows.len());
        for (i, row) in page_rows.iter().enumerate() {
            self.key_index.insert(RowKey::from(row.row_key().as_ref()), i);
        }

        self.heights = if scroll.fixed_row_height {
            RowHeights::fixed(page_rows.len(), scroll.row_height)
        } else {
            let measured = &self.measured_heights;
            RowHeights::from_measurements(
                page_rows
                    .iter()
                    .map(|row| measured.get(row.row_key().as_ref()).copied()),
                scroll.row_height,
            )
        };
        // Measurements for rows that left the data set are dropped
        if !self.measured_heights.is_empty() {
            let live: HashSet<Cow<'_, str>> = rows.iter().map(|row| row.row_key()).collect();
            self.measured_heights.retain(|k, _| live.contains(k.as_str()));
        }
        tracing::debug!(
            rows = page_rows.len(),
            measured = self.measured_heights.len(),
            "row heights rebuilt"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::ScrollConfig;
    use crate::types::FixedSide;

    fn keys(n: usize) -> Vec<RowKey> {
        (0..n).map(RowKey::from).collect()
    }

    fn engine(scroll: ScrollConfig) -> TableEngine {
        let mut engine = TableEngine::new(TableConfig {
            scroll,
            ..TableConfig::default()
        });
        engine.resize(800.0, 400.0);
        engine
    }

    #[test]
    fn test_plan_clears_pending() {
        let mut engine = engine(ScrollConfig::fixed(40.0, 5));
        assert!(engine.needs_recompute());
        engine.plan(&keys(10));
        assert!(!engine.needs_recompute());
        engine.scroll_to(0.0, 100.0);
        engine.scroll_to(0.0, 200.0);
        assert_eq!(engine.pending(), Invalidation::VIEWPORT);
    }

    #[test]
    fn test_reference_window() {
        let mut engine = engine(ScrollConfig::fixed(40.0, 5));
        engine.scroll_to(0.0, 2000.0);
        let plan = engine.plan(&keys(10_000));
        assert_eq!(plan.window.start, 45);
        assert_eq!(plan.window.end, 65);
        assert_eq!(plan.vertical_offset, 1800.0);
        assert_eq!(plan.visible_rows.len(), 20);
        assert_eq!(plan.visible_rows[0].key, "45");
        assert!(plan.fixed_header);
    }

    #[test]
    fn test_measure_row_updates_offsets() {
        let mut engine = engine(ScrollConfig::measured(40.0, 0));
        let rows = keys(200);
        engine.plan(&rows);
        assert!(engine.measure_row("0", 100.0));
        assert_eq!(engine.pending(), Invalidation::MEASURE);
        let plan = engine.plan(&rows);
        assert_eq!(plan.total_height, 199.0 * 40.0 + 100.0);
        assert_eq!(plan.visible_rows[1].top, 100.0);
    }

    #[test]
    fn test_measurements_survive_reorder() {
        let mut engine = engine(ScrollConfig::measured(40.0, 0));
        let mut rows = keys(200);
        engine.plan(&rows);
        engine.measure_row("5", 80.0);
        rows.swap(0, 5);
        engine.rows_changed();
        let plan = engine.plan(&rows);
        assert_eq!(plan.visible_rows[0].key, "5");
        assert_eq!(plan.visible_rows[0].height, 80.0);
        assert_eq!(plan.visible_rows[1].top, 80.0);
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut engine = engine(ScrollConfig::fixed(40.0, 0));
        engine.scroll_to(-10.0, 1.0e9);
        let plan = engine.plan(&keys(1000));
        assert_eq!(engine.viewport().scroll_top, 40_000.0 - 400.0);
        assert_eq!(engine.viewport().scroll_left, 0.0);
        assert_eq!(plan.window.end, 1000);
    }

    #[test]
    fn test_duplicate_column_keys_rejected() {
        let mut engine = TableEngine::default();
        let err = engine
            .set_columns(vec![ColumnDef::new("a"), ColumnDef::new("a")])
            .unwrap_err();
        assert!(matches!(err, VirtableError::Columns(_)));
    }

    #[test]
    fn test_shadows_follow_horizontal_scroll() {
        let mut engine = engine(ScrollConfig::default());
        engine
            .set_columns(vec![
                ColumnDef::new("l").width(100.0).fixed(FixedSide::Left),
                ColumnDef::new("m").width(800.0),
                ColumnDef::new("r").width(100.0).fixed(FixedSide::Right),
            ])
            .unwrap();
        let rows = keys(5);
        let plan = engine.plan(&rows);
        assert!(!plan.shadows.left);
        assert!(plan.shadows.right);
        assert_eq!(plan.max_scroll_left, 200.0);

        engine.scroll_to(200.0, 0.0);
        let plan = engine.plan(&rows);
        assert!(plan.shadows.left);
        assert!(!plan.shadows.right);
    }

    #[test]
    fn test_pagination_offsets_indices() {
        let mut engine = engine(ScrollConfig::default());
        engine.set_pagination(Some(Pagination::new(3, 10)));
        let plan = engine.plan(&keys(25));
        assert_eq!(plan.row_offset, 20);
        assert_eq!(plan.visible_rows.len(), 5);
        assert_eq!(plan.visible_rows[0].index, 20);
        assert_eq!(plan.visible_rows[0].key, "20");
        assert!(plan.is_row_visible(24));
        assert!(!plan.is_row_visible(3));
    }

    #[test]
    fn test_resize_column_uses_min_width() {
        let mut engine = TableEngine::default();
        engine
            .set_columns(vec![ColumnDef::new("a").width(200.0)])
            .unwrap();
        assert_eq!(engine.resize_column("a", 10.0), Some(80.0));
        assert_eq!(engine.resize_column("missing", 10.0), None);
        assert_eq!(engine.fixed_layout().table_width, 80.0);
    }
}
