//! Structured error types for virtable.
//!
//! Layout computation itself never fails: out-of-range input is clamped.
//! Errors only surface at the boundaries where documents are decoded or
//! files are read.

/// All errors that can occur while loading configuration or scenarios.
#[derive(Debug, thiserror::Error)]
pub enum VirtableError {
    /// JSON decoding or encoding error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration document that decodes but cannot be used.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Column list problem (duplicate keys and the like).
    #[error("Invalid columns: {0}")]
    Columns(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VirtableError>;

#[cfg(target_arch = "wasm32")]
impl From<VirtableError> for wasm_bindgen::JsValue {
    fn from(e: VirtableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
