//! Custom pipeline hook
//!
//! Every data stream entry pipeline ends with a `pipeline` processor that
//! delegates to the user-overridable `<type>-<dataset>@custom` pipeline.
//! The hook tolerates that pipeline not existing.

use crate::error::PipelineResult;
use crate::formats::PipelineFormat;
use serde::{Deserialize, Serialize};

/// `pipeline` processor parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineProcessor {
    /// Pipeline to delegate to
    pub name: String,
    /// Skip silently when `name` is not installed
    pub ignore_missing_pipeline: bool,
}

/// Step appended to the end of a pipeline's processors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPipelineHook {
    /// The single `pipeline` processor of this step
    pub pipeline: PipelineProcessor,
}

impl CustomPipelineHook {
    /// Hook delegating to `custom_pipeline_name`
    #[inline]
    #[must_use]
    pub fn new(custom_pipeline_name: impl Into<String>) -> Self {
        Self {
            pipeline: PipelineProcessor {
                name: custom_pipeline_name.into(),
                ignore_missing_pipeline: true,
            },
        }
    }
}

/// Content half of a pipeline install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContent {
    /// Serialized pipeline ready for installation
    pub content_for_installation: String,
}

/// Append the custom pipeline hook to `content`
///
/// `name_for_installation` identifies the pipeline for the caller's
/// diagnostics only; it never appears in the output.
///
/// # Errors
/// - [`crate::PreconditionError::UnsupportedExtension`] for an unknown extension
/// - [`crate::ParseError`] when `content` is malformed or has no `processors` list
///
/// # Examples
/// ```
/// use pipeline_rewrite::add_custom_pipeline_hook;
///
/// let out = add_custom_pipeline_hook(
///     r#"{"processors":[{"set":{"field":"test","value":"toto"}}]}"#,
///     "json",
///     "logs-test-1.0.0",
///     "logs-test@custom",
/// )
/// .unwrap();
/// assert_eq!(
///     out.content_for_installation,
///     r#"{"processors":[{"set":{"field":"test","value":"toto"}},{"pipeline":{"name":"logs-test@custom","ignore_missing_pipeline":true}}]}"#
/// );
/// ```
pub fn add_custom_pipeline_hook(
    content: &str,
    extension: &str,
    name_for_installation: &str,
    custom_pipeline_name: &str,
) -> PipelineResult<InstallContent> {
    let format = PipelineFormat::from_extension(extension)?;
    tracing::debug!(
        pipeline = name_for_installation,
        custom = custom_pipeline_name,
        %format,
        "appending custom pipeline hook"
    );
    let content_for_installation =
        format.append_step(content, &CustomPipelineHook::new(custom_pipeline_name))?;
    Ok(InstallContent {
        content_for_installation,
    })
}

/// A pipeline ready to be installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInstall {
    /// Name the pipeline is registered under
    pub name_for_installation: String,
    /// Serialized pipeline body
    pub content_for_installation: String,
    /// Serialization format of the body
    pub extension: PipelineFormat,
    /// Custom hook pipeline to append, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_ingest_pipeline_name_for_installation: Option<String>,
}

impl PipelineInstall {
    /// Append the custom hook when a custom pipeline name is set
    ///
    /// Returns `self` untouched otherwise.
    ///
    /// # Errors
    /// Same as [`add_custom_pipeline_hook`].
    pub fn with_custom_hook(self) -> PipelineResult<Self> {
        let Some(custom) = self.custom_ingest_pipeline_name_for_installation.as_deref() else {
            return Ok(self);
        };
        let content = self
            .extension
            .append_step(&self.content_for_installation, &CustomPipelineHook::new(custom))?;
        tracing::debug!(pipeline = %self.name_for_installation, custom, "custom pipeline hook added");
        Ok(Self {
            content_for_installation: content,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, PipelineError, PreconditionError};

    #[test]
    fn hook_serializes_in_field_order() {
        let hook = CustomPipelineHook::new("logs-test@custom");
        assert_eq!(
            serde_json::to_string(&hook).unwrap(),
            r#"{"pipeline":{"name":"logs-test@custom","ignore_missing_pipeline":true}}"#
        );
    }

    #[test]
    fn yaml_hook() {
        let out = add_custom_pipeline_hook(
            "\nprocessors:\n  - set:\n      field: test\n      value: toto\n      ",
            "yml",
            "logs-test-1.0.0",
            "logs-test@custom",
        )
        .unwrap();
        assert_eq!(
            out.content_for_installation,
            "---\nprocessors:\n  - set:\n      field: test\n      value: toto\n  - pipeline:\n      name: logs-test@custom\n      ignore_missing_pipeline: true\n"
        );
    }

    #[test]
    fn json_hook_from_pretty_input() {
        let out = add_custom_pipeline_hook(
            "{\n        \"processors\": [\n          {\n            \"set\": {\n              \"field\": \"test\",\n              \"value\": \"toto\"\n            }\n          }\n        ]\n      }",
            "json",
            "logs-test-1.0.0",
            "logs-test@custom",
        )
        .unwrap();
        assert_eq!(
            out.content_for_installation,
            r#"{"processors":[{"set":{"field":"test","value":"toto"}},{"pipeline":{"name":"logs-test@custom","ignore_missing_pipeline":true}}]}"#
        );
    }

    #[test]
    fn name_for_installation_does_not_leak() {
        let a = add_custom_pipeline_hook(r#"{"processors":[]}"#, "json", "first-name", "c@custom").unwrap();
        let b = add_custom_pipeline_hook(r#"{"processors":[]}"#, "json", "second-name", "c@custom").unwrap();
        assert_eq!(a, b);
        assert!(!a.content_for_installation.contains("first-name"));
    }

    #[test]
    fn unknown_extension() {
        let err = add_custom_pipeline_hook("processors: []", "txt", "n", "c").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Precondition(PreconditionError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let err = add_custom_pipeline_hook("{\"processors\": [", "json", "n", "c").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(ParseError::Json(_))));
    }

    #[test]
    fn install_without_custom_name_is_untouched() {
        let install = PipelineInstall {
            name_for_installation: "1.0.0-global".to_string(),
            content_for_installation: "processors: []\n".to_string(),
            extension: PipelineFormat::Yaml,
            custom_ingest_pipeline_name_for_installation: None,
        };
        assert_eq!(install.clone().with_custom_hook().unwrap(), install);
    }

    #[test]
    fn install_with_custom_name_gets_hook() {
        let install = PipelineInstall {
            name_for_installation: "logs-test-1.0.0".to_string(),
            content_for_installation: r#"{"processors":[]}"#.to_string(),
            extension: PipelineFormat::Json,
            custom_ingest_pipeline_name_for_installation: Some("logs-test@custom".to_string()),
        };
        let hooked = install.with_custom_hook().unwrap();
        assert_eq!(
            hooked.content_for_installation,
            r#"{"processors":[{"pipeline":{"name":"logs-test@custom","ignore_missing_pipeline":true}}]}"#
        );
        assert_eq!(hooked.name_for_installation, "logs-test-1.0.0");
    }
}
