use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a row across data mutations
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RowKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<usize> for RowKey {
    fn from(n: usize) -> Self {
        Self(n.to_string())
    }
}

/// A record the engine can window over.
///
/// The engine never looks inside a row; it only needs a key that stays the
/// same when rows are inserted, removed or reordered around it.
pub trait Keyed {
    fn row_key(&self) -> Cow<'_, str>;
}

impl Keyed for RowKey {
    fn row_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

impl Keyed for String {
    fn row_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Keyed for &str {
    fn row_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// Row description used by scenario documents and the WASM bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowMeta {
    pub key: RowKey,
    /// Height already measured by the host, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl RowMeta {
    pub fn new(key: impl Into<RowKey>) -> Self {
        Self {
            key: key.into(),
            height: None,
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

impl Keyed for RowMeta {
    fn row_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.key.as_str())
    }
}
