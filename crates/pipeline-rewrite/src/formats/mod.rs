//! Pipeline serialization formats
//!
//! A closed set of formats, each providing:
//! - the quote styles a reference literal takes inside it
//! - a syntax check
//! - parse / append step / re-serialize for the hook processor

use crate::error::{ParseError, PipelineError, PreconditionError};
use crate::reference::QuoteStyle;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

mod json;
mod yaml;

/// Serialization format of a pipeline document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineFormat {
    /// RFC 8259 JSON
    #[serde(rename = "json")]
    Json,
    /// Block-style YAML
    #[serde(rename = "yml", alias = "yaml")]
    Yaml,
}

impl PipelineFormat {
    /// Sniff format from content
    ///
    /// JSON when the first non-whitespace character is `{` or `[`,
    /// YAML otherwise.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('{' | '[') => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Format for a file extension (without dot)
    ///
    /// # Errors
    /// [`PreconditionError::UnsupportedExtension`] for anything but
    /// `json`, `yml` and `yaml`.
    pub fn from_extension(extension: &str) -> Result<Self, PreconditionError> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yml" | "yaml" => Ok(Self::Yaml),
            _ => Err(PreconditionError::UnsupportedExtension(extension.to_string())),
        }
    }

    /// Canonical extension
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yml",
        }
    }

    /// Quotes a reference literal may use in this format
    ///
    /// Inside a JSON string a double quote must be escaped, so bare `"`
    /// never delimits a literal there. YAML also accepts the `''` escape of
    /// a single-quoted scalar.
    #[must_use]
    pub const fn quote_styles(self) -> &'static [QuoteStyle] {
        match self {
            Self::Json => &[QuoteStyle::Single, QuoteStyle::EscapedDouble],
            Self::Yaml => &[
                QuoteStyle::Single,
                QuoteStyle::Double,
                QuoteStyle::EscapedDouble,
                QuoteStyle::DoubledSingle,
            ],
        }
    }

    /// Check that `content` is well-formed in this format
    ///
    /// # Errors
    /// [`ParseError`] describing the first syntax error.
    pub fn check_syntax(self, content: &str) -> Result<(), ParseError> {
        match self {
            Self::Json => json::check_syntax(content),
            Self::Yaml => yaml::check_syntax(content),
        }
    }

    /// Append `step` to the `processors` list of `content`
    ///
    /// The document is parsed and re-serialized: compact JSON, or block
    /// YAML behind a `---` marker.
    ///
    /// # Errors
    /// [`ParseError`] if `content` is malformed or has no `processors`
    /// list, [`crate::error::SerializeError`] if the tree cannot be written.
    pub fn append_step<S: Serialize>(self, content: &str, step: &S) -> Result<String, PipelineError> {
        match self {
            Self::Json => json::append_step(content, step),
            Self::Yaml => yaml::append_step(content, step),
        }
    }
}

impl Display for PipelineFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PipelineFormat {
    type Err = PreconditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
    }
}
