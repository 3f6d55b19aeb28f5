/// Result type used by the library API.
pub type ToolkitResult<T> = Result<T, ToolkitError>;

/// Error taxonomy of the toolkit core.
#[derive(thiserror::Error, Debug)]
pub enum ToolkitError {
    /// Unknown blend token, canonical name, code, preset or product id.
    /// The vocabulary is closed, so this always points at bad config data.
    #[error("lookup error: unknown {what} '{key}'")]
    Lookup { what: &'static str, key: String },

    /// Missing or invalid mesh size, grid or palette.
    #[error("config range error: {0}")]
    ConfigRange(String),

    /// Carry-over vertex count differs from the requested grid.
    #[error("carry-over mismatch: {supplied} fuzz entries for {required} vertices")]
    CarryOverMismatch { supplied: usize, required: usize },

    /// JSON (de)serialization failure for import/export documents.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolkitError {
    pub fn lookup(what: &'static str, key: impl ToString) -> Self {
        Self::Lookup {
            what,
            key: key.to_string(),
        }
    }

    pub fn config_range(msg: impl Into<String>) -> Self {
        Self::ConfigRange(msg.into())
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}
