//! Error types for pipeline rewriting
//!
//! Provides error handling for:
//! - Parse operations (document text → value tree)
//! - Caller preconditions (substitution tables, extensions, options)
//! - Serialize operations (value tree → document text)
//!
//! None of these are retryable: every operation is a pure function of its
//! inputs.

use pipeline_naming::NamingError;

/// Document does not conform to its declared or detected format
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Invalid JSON syntax
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),

    /// Invalid YAML syntax
    #[error("YAML parse error: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// Top-level value is not a mapping
    #[error("pipeline document is not a mapping")]
    NotAMapping,

    /// Top-level mapping has no `processors` key
    #[error("pipeline document has no 'processors' list")]
    MissingProcessors,

    /// `processors` is present but not a sequence
    #[error("'processors' is not a list")]
    ProcessorsNotSequence,
}

/// Caller supplied inputs that break the operation contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// Substitution source or target cannot appear inside a reference literal
    #[error("invalid substitution {role} '{name}': {reason}")]
    InvalidName {
        /// `source` or `target`
        role: &'static str,
        /// Offending name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Template function is not an identifier
    #[error("invalid template function: '{0}'")]
    InvalidTemplateFunction(String),

    /// Same reference maps to two different targets
    #[error("ambiguous substitution for {template_function} '{source_name}': '{first}' vs '{second}'")]
    AmbiguousSubstitution {
        /// Template function of the reference
        template_function: String,
        /// Logical name both entries claim
        source_name: String,
        /// Target of the first entry
        first: String,
        /// Target of the conflicting entry
        second: String,
    },

    /// Extension does not name a supported format
    #[error("unsupported pipeline extension: '{0}'")]
    UnsupportedExtension(String),

    /// Rewriter options enable no template style
    #[error("no template styles enabled")]
    NoStylesEnabled,

    /// Two pipeline files would install under one name
    #[error("pipelines '{first}' and '{second}' both install as '{name}'")]
    DuplicateInstallationName {
        /// Shared installation name
        name: String,
        /// Path of the first asset
        first: String,
        /// Path of the conflicting asset
        second: String,
    },
}

impl PreconditionError {
    /// Create invalid name error
    pub fn invalid_name(role: &'static str, name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidName {
            role,
            name: name.into(),
            reason,
        }
    }
}

/// Value tree could not be written back out
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[source] serde_json::Error),

    /// YAML serialization failed
    #[error("YAML serialization failed: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// Mapping key is not a scalar
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// Tag on a collection value
    #[error("unsupported tagged value: {0}")]
    UnsupportedTag(String),
}

/// Combined pipeline error
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Document could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Input rejected before any work
    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionError),

    /// Tree could not be written back
    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),

    /// Asset path or data stream is invalid
    #[error("naming error: {0}")]
    Naming(#[from] NamingError),

    /// Reference matcher failed to compile
    #[error("reference pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
