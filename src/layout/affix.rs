//! Affixed header, footer and pagination.
//!
//! An affixed element switches to a fixed on-screen position once its
//! natural position scrolls out of the page viewport, and only while part
//! of the table it belongs to is still on screen.

use serde::{Deserialize, Serialize};

use crate::config::{non_negative, AffixConfig};

/// Page-level measurements of the table, relative to the page viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AffixInput {
    /// Y of the table's top edge in the page viewport (negative when scrolled past)
    pub table_top: f32,
    /// Y of the table's bottom edge in the page viewport
    pub table_bottom: f32,
    /// Height of the page viewport
    pub page_height: f32,
    pub header_height: f32,
    pub footer_height: f32,
    pub pagination_height: f32,
}

/// Which elements are currently affixed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixState {
    pub header: bool,
    pub footer: bool,
    pub pagination: bool,
}

impl AffixState {
    /// Decide affix visibility for the current page scroll.
    pub fn compute(config: &AffixConfig, input: &AffixInput) -> Self {
        let top_line = config.offset_top;
        let bottom_line = input.page_height - config.offset_bottom;
        let header_h = non_negative(input.header_height);
        let footer_h = non_negative(input.footer_height);
        let pagination_h = non_negative(input.pagination_height);

        // Header sticks once the table top passes the line, until the
        // table bottom would push it off.
        let header =
            config.header && input.table_top < top_line && input.table_bottom > top_line + header_h;

        // Footer sticks while the natural footer is below the fold and the
        // table body has reached the screen.
        let footer = config.footer
            && input.table_bottom > bottom_line
            && input.table_top + header_h < bottom_line - footer_h;

        let pagination = config.pagination
            && input.table_bottom + pagination_h > bottom_line
            && input.table_top + header_h < bottom_line - pagination_h;

        Self {
            header,
            footer,
            pagination,
        }
    }
}
