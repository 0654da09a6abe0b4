//! Installation name derivation
//!
//! Entry pipelines are addressed by data stream identity and version alone.
//! Every other pipeline keeps its logical name as a suffix, since a package
//! may ship many of them.

use crate::data_stream::DataStream;

/// Suffix of the user-overridable pipeline attached to each data stream
pub const CUSTOM_PIPELINE_SUFFIX: &str = "@custom";

/// Installation name of a pipeline shipped for `data_stream`
///
/// # Examples
/// ```
/// use pipeline_naming::{installation_name_for_pipeline, DataStream};
///
/// let ds = DataStream::new("logs", "coredns.log")
///     .unwrap()
///     .with_ingest_pipeline("pipeline-entry");
/// assert_eq!(
///     installation_name_for_pipeline("pipeline-entry", &ds, "1.0.1"),
///     "logs-coredns.log-1.0.1"
/// );
/// assert_eq!(
///     installation_name_for_pipeline("pipeline-json", &ds, "1.0.1"),
///     "logs-coredns.log-1.0.1-pipeline-json"
/// );
/// ```
#[must_use]
pub fn installation_name_for_pipeline(
    pipeline_name: &str,
    data_stream: &DataStream,
    package_version: &str,
) -> String {
    let base = pipeline_name_for_data_stream(data_stream, package_version);
    if data_stream.is_entry_pipeline(pipeline_name) {
        base
    } else {
        format!("{base}-{pipeline_name}")
    }
}

/// Installation name of the entry pipeline of `data_stream`
#[inline]
#[must_use]
pub fn pipeline_name_for_data_stream(data_stream: &DataStream, package_version: &str) -> String {
    format!(
        "{}-{}-{}",
        data_stream.kind(),
        data_stream.dataset(),
        package_version
    )
}

/// Name of the `@custom` hook pipeline for `data_stream`
#[inline]
#[must_use]
pub fn custom_pipeline_name_for_data_stream(data_stream: &DataStream) -> String {
    format!(
        "{}-{}{}",
        data_stream.kind(),
        data_stream.dataset(),
        CUSTOM_PIPELINE_SUFFIX
    )
}

/// Installation name of a pipeline shipped at the package top level
#[inline]
#[must_use]
pub fn top_level_pipeline_name(pipeline_name: &str, package_version: &str) -> String {
    format!("{package_version}-{pipeline_name}")
}

/// What a pipeline is installed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineTarget<'a> {
    /// Pipeline belongs to a data stream
    DataStream(&'a DataStream),
    /// Pipeline lives at the package top level
    TopLevel,
}

impl PipelineTarget<'_> {
    /// Installation name for `pipeline_name` under this target
    #[must_use]
    pub fn installation_name(&self, pipeline_name: &str, package_version: &str) -> String {
        match self {
            Self::DataStream(ds) => installation_name_for_pipeline(pipeline_name, ds, package_version),
            Self::TopLevel => top_level_pipeline_name(pipeline_name, package_version),
        }
    }

    /// Check if `pipeline_name` is the entry pipeline of this target
    ///
    /// Top-level pipelines have no entry pipeline.
    #[must_use]
    pub fn is_entry_pipeline(&self, pipeline_name: &str) -> bool {
        match self {
            Self::DataStream(ds) => ds.is_entry_pipeline(pipeline_name),
            Self::TopLevel => false,
        }
    }

    /// Custom hook pipeline name, only defined for data streams
    #[must_use]
    pub fn custom_pipeline_name(&self) -> Option<String> {
        match self {
            Self::DataStream(ds) => Some(custom_pipeline_name_for_data_stream(ds)),
            Self::TopLevel => None,
        }
    }
}
