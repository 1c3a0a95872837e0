use serde::{Deserialize, Serialize};

/// Edge a column is pinned to during horizontal scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedSide {
    /// Scrolls with the content (default)
    #[default]
    None,
    /// Pinned to the left edge
    Left,
    /// Pinned to the right edge
    Right,
}

/// Column configuration supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Unique column key
    pub key: String,
    /// Configured width in pixels; measured widths take precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Lower bound applied when the column is resized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
    /// Pinned side; a fixed group pins all of its children
    #[serde(default)]
    pub fixed: FixedSide,
    /// Child columns; a column with children is a header group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ColumnDef>,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            width: None,
            min_width: None,
            fixed: FixedSide::None,
            children: Vec::new(),
        }
    }

    /// Header group spanning `children`
    pub fn group(key: impl Into<String>, children: Vec<ColumnDef>) -> Self {
        Self {
            children,
            ..Self::new(key)
        }
    }

    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    #[must_use]
    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = side;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed != FixedSide::None
    }

    /// Whether this column only groups other columns
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}
