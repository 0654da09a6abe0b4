//! Substitution tables
//!
//! A [`Substitution`] renames one logical pipeline reference. A
//! [`SubstitutionTable`] is the validated, lookup-ready form the rewriter
//! consumes: exact-match on `(template_function, source)`, no ordering
//! dependence between entries.

use crate::error::{ParseError, PreconditionError};
use crate::formats::PipelineFormat;
use crate::rewriter::RewriterOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Template function marking a literal as an ingest pipeline reference
pub const INGEST_PIPELINE_FUNCTION: &str = "IngestPipeline";

fn default_template_function() -> String {
    INGEST_PIPELINE_FUNCTION.to_string()
}

/// One reference rename
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Substitution {
    /// Logical pipeline name as authored
    pub source: String,
    /// Installation name to write instead
    pub target: String,
    /// Template function wrapping the literal
    #[serde(default = "default_template_function", alias = "templateFunction")]
    pub template_function: String,
}

impl Substitution {
    /// Create substitution for an arbitrary template function
    #[inline]
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        template_function: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            template_function: template_function.into(),
        }
    }

    /// Create substitution for an `IngestPipeline` reference
    #[inline]
    #[must_use]
    pub fn ingest_pipeline(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, INGEST_PIPELINE_FUNCTION)
    }

    /// Check that this substitution can appear in a reference construct
    ///
    /// # Errors
    /// [`PreconditionError`] when the function is not an identifier or a
    /// name carries characters a quoted literal cannot hold.
    pub fn validate(&self) -> Result<(), PreconditionError> {
        if !is_identifier(&self.template_function) {
            return Err(PreconditionError::InvalidTemplateFunction(
                self.template_function.clone(),
            ));
        }
        validate_name("source", &self.source)?;
        validate_name("target", &self.target)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_name(role: &'static str, name: &str) -> Result<(), PreconditionError> {
    if name.is_empty() {
        return Err(PreconditionError::invalid_name(role, name, "empty name"));
    }
    if name.chars().any(|c| matches!(c, '\'' | '"' | '\\')) {
        return Err(PreconditionError::invalid_name(role, name, "contains a quote or backslash"));
    }
    if name.chars().any(char::is_control) {
        return Err(PreconditionError::invalid_name(role, name, "contains a control character"));
    }
    Ok(())
}

/// Validated substitution lookup
///
/// Entries are keyed by template function, then source name. Repeating an
/// identical entry is accepted; the same reference with two different
/// targets is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: IndexMap<String, IndexMap<String, String>>,
}

impl SubstitutionTable {
    /// Build table from substitutions
    ///
    /// # Errors
    /// [`PreconditionError::AmbiguousSubstitution`] on conflicting entries,
    /// or any error from [`Substitution::validate`].
    pub fn new<I>(substitutions: I) -> Result<Self, PreconditionError>
    where
        I: IntoIterator<Item = Substitution>,
    {
        let mut table = Self::default();
        for sub in substitutions {
            table.insert(sub)?;
        }
        Ok(table)
    }

    /// Build table from borrowed substitutions
    ///
    /// # Errors
    /// Same as [`SubstitutionTable::new`].
    pub fn from_slice(substitutions: &[Substitution]) -> Result<Self, PreconditionError> {
        Self::new(substitutions.iter().cloned())
    }

    /// Add one substitution
    ///
    /// # Errors
    /// Same as [`SubstitutionTable::new`].
    pub fn insert(&mut self, sub: Substitution) -> Result<(), PreconditionError> {
        sub.validate()?;
        let Substitution {
            source,
            target,
            template_function,
        } = sub;

        let by_source = self.entries.entry(template_function.clone()).or_default();
        if let Some(existing) = by_source.get(&source) {
            if *existing == target {
                return Ok(());
            }
            return Err(PreconditionError::AmbiguousSubstitution {
                template_function,
                source_name: source,
                first: existing.clone(),
                second: target,
            });
        }
        by_source.insert(source, target);
        Ok(())
    }

    /// Target for a reference, if one is registered
    #[inline]
    #[must_use]
    pub fn lookup(&self, template_function: &str, source: &str) -> Option<&str> {
        self.entries
            .get(template_function)
            .and_then(|by_source| by_source.get(source))
            .map(String::as_str)
    }

    /// Number of distinct references
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(template_function, source, target)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.entries.iter().flat_map(|(function, by_source)| {
            by_source
                .iter()
                .map(move |(source, target)| (function.as_str(), source.as_str(), target.as_str()))
        })
    }
}

/// Substitution file loaded by callers
///
/// ```yaml
/// substitutions:
///   - source: pipeline-json
///     target: logs-coredns.log-1.0.1-pipeline-json
/// options:
///   mode: resolve
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionFile {
    /// Renames to apply
    pub substitutions: Vec<Substitution>,
    /// Rewriter options
    #[serde(default)]
    pub options: RewriterOptions,
}

impl SubstitutionFile {
    /// Parse file content, detecting its format
    ///
    /// # Errors
    /// [`ParseError`] when the content does not deserialize.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        Self::parse_as(content, PipelineFormat::detect(content))
    }

    /// Parse file content in the given format
    ///
    /// # Errors
    /// [`ParseError`] when the content does not deserialize.
    pub fn parse_as(content: &str, format: PipelineFormat) -> Result<Self, ParseError> {
        match format {
            PipelineFormat::Json => serde_json::from_str(content).map_err(ParseError::Json),
            PipelineFormat::Yaml => serde_yaml::from_str(content).map_err(ParseError::Yaml),
        }
    }

    /// Validated lookup table for the listed substitutions
    ///
    /// # Errors
    /// Same as [`SubstitutionTable::new`].
    pub fn table(&self) -> Result<SubstitutionTable, PreconditionError> {
        SubstitutionTable::from_slice(&self.substitutions)
    }
}
