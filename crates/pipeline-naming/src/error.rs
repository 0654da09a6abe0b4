//! Error types for name resolution

/// Errors raised while building naming inputs
///
/// Name derivation itself is total; these errors only surface when a
/// descriptor or asset path cannot be constructed from caller input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    /// A required descriptor field is absent or empty
    #[error("missing required field: '{field}'")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Asset path does not follow the package layout
    #[error("invalid asset path '{path}': {reason}")]
    InvalidAssetPath {
        /// Offending path
        path: String,
        /// What was wrong with it
        reason: String,
    },
}

impl NamingError {
    /// Create invalid asset path error
    pub fn invalid_asset_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAssetPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
