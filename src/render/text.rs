//! Plain-text renderer, used by the CLI to preview a plan in a terminal.

use std::fmt::Write;

use super::CellStyle;
use crate::layout::{floor_index, ShadowFlags};
use crate::plan::{ColumnPlacement, PlanVisitor, RenderPlan, VisibleRow};

/// Pixels represented by one character cell
pub const DEFAULT_PX_PER_CHAR: f32 = 8.0;

type ContentFn = Box<dyn Fn(&VisibleRow, &ColumnPlacement) -> String>;

/// Draws mounted rows as a fixed-width text grid.
///
/// Sticky columns are separated by `|`; a divider that currently shows a
/// shadow is drawn as `#`.
pub struct TextRenderer {
    px_per_char: f32,
    content: ContentFn,
    shadows: ShadowFlags,
    line: String,
    out: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PX_PER_CHAR)
    }
}

impl TextRenderer {
    /// Renderer showing the row key in the first column
    pub fn new(px_per_char: f32) -> Self {
        Self {
            px_per_char: if px_per_char > 0.0 {
                px_per_char
            } else {
                DEFAULT_PX_PER_CHAR
            },
            content: Box::new(|row, column| {
                if column.x <= 0.0 {
                    row.key.clone()
                } else {
                    String::new()
                }
            }),
            shadows: ShadowFlags::default(),
            line: String::new(),
            out: String::new(),
        }
    }

    /// Supply cell text
    #[must_use]
    pub fn with_content<F>(mut self, content: F) -> Self
    where
        F: Fn(&VisibleRow, &ColumnPlacement) -> String + 'static,
    {
        self.content = Box::new(content);
        self
    }

    /// Render a plan and return the text
    pub fn render(mut self, plan: &RenderPlan) -> String {
        plan.accept(&mut self);
        self.out
    }

    fn chars_for(&self, width: f32) -> usize {
        floor_index(width / self.px_per_char).max(1)
    }

    fn push_cell(&mut self, text: &str, column: &ColumnPlacement, style: CellStyle) {
        let width = self.chars_for(column.width);
        if style.shadow_right {
            self.line.push('#');
        } else if column.fixed.is_some() && style.right.is_some() {
            self.line.push('|');
        }
        let clipped: String = text.chars().take(width).collect();
        let _ = write!(self.line, "{clipped:<width$}");
        if style.shadow_left {
            self.line.push('#');
        } else if column.fixed.is_some() && style.left.is_some() {
            self.line.push('|');
        }
    }

    fn flush_line(&mut self) {
        self.out.push_str(self.line.trim_end());
        self.out.push('\n');
        self.line.clear();
    }
}

impl PlanVisitor for TextRenderer {
    fn begin(&mut self, plan: &RenderPlan) {
        self.shadows = plan.shadows;
        if plan.virtualized {
            let _ = writeln!(
                self.out,
                "rows {}..{} (offset {}px of {}px)",
                plan.row_offset + plan.window.start,
                plan.row_offset + plan.window.end,
                plan.vertical_offset,
                plan.total_height
            );
        }
    }

    fn header(&mut self, columns: &[ColumnPlacement]) {
        for column in columns {
            let style = CellStyle::for_column(column, self.shadows);
            let key = column.key.clone();
            self.push_cell(&key, column, style);
        }
        self.flush_line();
        let rule = "-".repeat(self.out.lines().last().map_or(0, |l| l.chars().count()));
        self.out.push_str(&rule);
        self.out.push('\n');
    }

    fn row(&mut self, _row: &VisibleRow) {
        if !self.line.is_empty() {
            self.flush_line();
        }
    }

    fn cell(&mut self, row: &VisibleRow, column: &ColumnPlacement) {
        let style = CellStyle::for_cell(row, column, self.shadows);
        let text = (self.content)(row, column);
        self.push_cell(&text, column, style);
    }

    fn end(&mut self, _plan: &RenderPlan) {
        if !self.line.is_empty() {
            self.flush_line();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ScrollConfig, TableConfig};
    use crate::engine::TableEngine;
    use crate::types::{ColumnDef, FixedSide, RowKey};

    #[test]
    fn test_renders_header_and_rows() {
        let mut engine = TableEngine::default();
        engine
            .set_columns(vec![
                ColumnDef::new("id").width(32.0).fixed(FixedSide::Left),
                ColumnDef::new("name").width(64.0),
            ])
            .unwrap();
        let rows: Vec<RowKey> = (0..2_usize).map(RowKey::from).collect();
        let text = TextRenderer::default().render(&engine.plan(&rows));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["id  |name", "---------", "0   |", "1   |"]);
    }

    #[test]
    fn test_virtual_summary_line() {
        let mut engine = TableEngine::new(TableConfig {
            scroll: ScrollConfig::fixed(40.0, 0),
            ..TableConfig::default()
        });
        engine.resize(100.0, 80.0);
        engine.set_columns(vec![ColumnDef::new("id").width(40.0)]).unwrap();
        let rows: Vec<RowKey> = (0..500_usize).map(RowKey::from).collect();
        let text = TextRenderer::default().render(&engine.plan(&rows));
        assert!(text.starts_with("rows 0..2 (offset 0px of 20000px)"));
    }
}
