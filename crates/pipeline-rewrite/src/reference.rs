//! Reference constructs
//!
//! A pipeline reference is a template call wrapping a quoted literal:
//!
//! ```text
//! {{ IngestPipeline 'pipeline-json' }}     standard style
//! {< IngestPipeline "pipeline-json" >}     beats style
//! ```
//!
//! [`ReferencePattern`] finds these syntactically. Only a literal whose
//! `(function, literal)` pair is in the [`SubstitutionTable`] is touched;
//! mismatched delimiters or quotes leave the occurrence as it was.

use crate::error::PipelineError;
use crate::substitution::SubstitutionTable;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Template delimiter style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStyle {
    /// `{{ ... }}`
    Standard,
    /// `{< ... >}`
    Beats,
}

impl TemplateStyle {
    /// Every supported style
    pub const ALL: [TemplateStyle; 2] = [TemplateStyle::Standard, TemplateStyle::Beats];

    /// Opening delimiter
    #[inline]
    #[must_use]
    pub const fn open(self) -> &'static str {
        match self {
            Self::Standard => "{{",
            Self::Beats => "{<",
        }
    }

    /// Closing delimiter
    #[inline]
    #[must_use]
    pub const fn close(self) -> &'static str {
        match self {
            Self::Standard => "}}",
            Self::Beats => ">}",
        }
    }
}

/// Quote surrounding the literal argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// `'name'`
    Single,
    /// `"name"`
    Double,
    /// `\"name\"`, a double quote escaped inside a JSON string
    EscapedDouble,
    /// `''name''`, a single quote escaped inside a single-quoted YAML scalar
    DoubledSingle,
}

impl QuoteStyle {
    /// Quote text as it appears in the document
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "'",
            Self::Double => "\"",
            Self::EscapedDouble => "\\\"",
            Self::DoubledSingle => "''",
        }
    }
}

/// What happens to a matched reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteMode {
    /// Swap the literal, keep delimiters, whitespace and quotes
    #[default]
    Retarget,
    /// Replace the whole construct with the bare target name
    Resolve,
}

/// Compiled matcher for one set of styles and quotes
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    regex: Regex,
    styles: Vec<TemplateStyle>,
}

impl ReferencePattern {
    /// Compile a matcher
    ///
    /// # Errors
    /// [`PipelineError::Pattern`] if the generated expression is rejected.
    pub fn new(styles: &[TemplateStyle], quotes: &[QuoteStyle]) -> Result<Self, PipelineError> {
        let opens = alternation(styles.iter().map(|s| s.open()));
        let closes = alternation(styles.iter().map(|s| s.close()));

        // Longest quote first so `\"` wins over `"` and `''` over `'`.
        let mut quote_texts: Vec<&str> = quotes.iter().map(|q| q.as_str()).collect();
        quote_texts.sort_by_key(|q| std::cmp::Reverse(q.len()));
        let quote_alt = alternation(quote_texts.into_iter());

        let pattern = format!(
            r#"(?P<open>{opens})\s*(?P<func>[A-Za-z_][A-Za-z0-9_]*)\s+(?P<q>{quote_alt})(?P<lit>[^'"\\\r\n]*)(?P<qc>{quote_alt})\s*(?P<close>{closes})"#
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
            styles: styles.to_vec(),
        })
    }

    /// Styles this matcher recognises
    #[inline]
    #[must_use]
    pub fn styles(&self) -> &[TemplateStyle] {
        &self.styles
    }

    /// Apply `table` to every reference in `document`
    ///
    /// Returns the rewritten text and the number of references replaced.
    /// With zero replacements the input is returned borrowed.
    #[must_use]
    pub fn replace<'d>(
        &self,
        document: &'d str,
        table: &SubstitutionTable,
        mode: RewriteMode,
    ) -> (Cow<'d, str>, usize) {
        if table.is_empty() {
            return (Cow::Borrowed(document), 0);
        }

        let mut replaced = 0usize;
        let output = self.regex.replace_all(document, |caps: &Captures<'_>| {
            match self.target_for(caps, table) {
                Some(target) => {
                    replaced += 1;
                    render(caps, target, mode)
                }
                None => caps[0].to_string(),
            }
        });

        if replaced == 0 {
            (Cow::Borrowed(document), 0)
        } else {
            (Cow::Owned(output.into_owned()), replaced)
        }
    }

    fn target_for<'t>(&self, caps: &Captures<'_>, table: &'t SubstitutionTable) -> Option<&'t str> {
        let (open, close) = (&caps["open"], &caps["close"]);
        let paired = self
            .styles
            .iter()
            .any(|s| s.open() == open && s.close() == close);
        if !paired || caps["q"] != caps["qc"] {
            return None;
        }
        table.lookup(&caps["func"], &caps["lit"])
    }
}

fn alternation<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.map(regex::escape).collect::<Vec<_>>().join("|")
}

fn render(caps: &Captures<'_>, target: &str, mode: RewriteMode) -> String {
    match mode {
        RewriteMode::Resolve => target.to_string(),
        RewriteMode::Retarget => {
            let (whole, lit) = match (caps.get(0), caps.name("lit")) {
                (Some(whole), Some(lit)) => (whole, lit),
                _ => return target.to_string(),
            };
            let text = whole.as_str();
            let start = lit.start() - whole.start();
            let end = lit.end() - whole.start();
            format!("{}{}{}", &text[..start], target, &text[end..])
        }
    }
}
