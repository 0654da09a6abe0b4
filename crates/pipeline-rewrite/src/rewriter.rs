//! Pipeline reference rewriter
//!
//! Text substitution over the raw document. No parse/re-serialize happens
//! here, so everything outside a replaced literal is byte-for-byte the
//! input, and a document with no matching reference comes back unchanged.

use crate::error::{PipelineResult, PreconditionError};
use crate::formats::PipelineFormat;
use crate::reference::{ReferencePattern, RewriteMode, TemplateStyle};
use crate::substitution::{Substitution, SubstitutionTable};
use serde::{Deserialize, Serialize};

/// Rewriter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterOptions {
    /// What a matched reference becomes
    pub mode: RewriteMode,
    /// Template delimiter styles to recognise
    pub styles: Vec<TemplateStyle>,
    /// Check input syntax before rewriting
    pub validate: bool,
}

impl RewriterOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With rewrite mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: RewriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// With template styles
    #[inline]
    #[must_use]
    pub fn with_styles(mut self, styles: impl Into<Vec<TemplateStyle>>) -> Self {
        self.styles = styles.into();
        self
    }

    /// With syntax validation
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Default for RewriterOptions {
    fn default() -> Self {
        Self {
            mode: RewriteMode::Retarget,
            styles: TemplateStyle::ALL.to_vec(),
            validate: false,
        }
    }
}

/// Reference rewriter with compiled matchers for both formats
///
/// Holds no mutable state; one value can serve any number of documents.
#[derive(Debug, Clone)]
pub struct Rewriter {
    options: RewriterOptions,
    json: ReferencePattern,
    yaml: ReferencePattern,
}

impl Rewriter {
    /// Create rewriter
    ///
    /// # Errors
    /// [`PreconditionError::NoStylesEnabled`] when `options.styles` is empty.
    pub fn new(options: RewriterOptions) -> PipelineResult<Self> {
        if options.styles.is_empty() {
            return Err(PreconditionError::NoStylesEnabled.into());
        }
        let json = ReferencePattern::new(&options.styles, PipelineFormat::Json.quote_styles())?;
        let yaml = ReferencePattern::new(&options.styles, PipelineFormat::Yaml.quote_styles())?;
        Ok(Self { options, json, yaml })
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> &RewriterOptions {
        &self.options
    }

    /// Rewrite `document`, detecting its format
    ///
    /// # Errors
    /// [`crate::ParseError`] if validation is enabled and the document is
    /// malformed.
    pub fn rewrite(&self, document: &str, table: &SubstitutionTable) -> PipelineResult<String> {
        self.rewrite_as(document, PipelineFormat::detect(document), table)
    }

    /// Rewrite `document` as `format` with the configured mode
    ///
    /// # Errors
    /// Same as [`Rewriter::rewrite`].
    pub fn rewrite_as(
        &self,
        document: &str,
        format: PipelineFormat,
        table: &SubstitutionTable,
    ) -> PipelineResult<String> {
        self.rewrite_with_mode(document, format, table, self.options.mode)
    }

    /// Rewrite `document` as `format` with an explicit mode
    ///
    /// # Errors
    /// Same as [`Rewriter::rewrite`].
    pub fn rewrite_with_mode(
        &self,
        document: &str,
        format: PipelineFormat,
        table: &SubstitutionTable,
        mode: RewriteMode,
    ) -> PipelineResult<String> {
        if self.options.validate {
            format.check_syntax(document)?;
        }
        let (output, replaced) = self.pattern(format).replace(document, table, mode);
        tracing::debug!(%format, ?mode, replaced, "rewrote pipeline references");
        Ok(output.into_owned())
    }

    fn pattern(&self, format: PipelineFormat) -> &ReferencePattern {
        match format {
            PipelineFormat::Json => &self.json,
            PipelineFormat::Yaml => &self.yaml,
        }
    }
}

/// Retarget every reference in `document`, detecting its format
///
/// ```
/// use pipeline_rewrite::{rewrite, Substitution};
///
/// let subs = [Substitution::ingest_pipeline("pipeline-json", "logs-x-1.0.0-pipeline-json")];
/// let out = rewrite("name: '{{ IngestPipeline \"pipeline-json\" }}'\n", &subs).unwrap();
/// assert_eq!(out, "name: '{{ IngestPipeline \"logs-x-1.0.0-pipeline-json\" }}'\n");
/// ```
///
/// # Errors
/// [`PreconditionError`] for an invalid or ambiguous substitution list.
pub fn rewrite(document: &str, substitutions: &[Substitution]) -> PipelineResult<String> {
    let table = SubstitutionTable::from_slice(substitutions)?;
    Rewriter::new(RewriterOptions::default())?.rewrite(document, &table)
}

/// Retarget every reference in `document` treated as `format`
///
/// # Errors
/// Same as [`rewrite`].
pub fn rewrite_as(
    document: &str,
    format: PipelineFormat,
    substitutions: &[Substitution],
) -> PipelineResult<String> {
    let table = SubstitutionTable::from_slice(substitutions)?;
    Rewriter::new(RewriterOptions::default())?.rewrite_as(document, format, &table)
}

/// Replace every reference construct in `document` with its bare target
///
/// # Errors
/// Same as [`rewrite`].
pub fn resolve(document: &str, substitutions: &[Substitution]) -> PipelineResult<String> {
    let table = SubstitutionTable::from_slice(substitutions)?;
    Rewriter::new(RewriterOptions::default().with_mode(RewriteMode::Resolve))?.rewrite(document, &table)
}
