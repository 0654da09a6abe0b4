//! Data stream descriptors
//!
//! Provides [`DataStream`], the read-only context used to derive pipeline
//! installation names.

use crate::error::NamingError;
use serde::{Deserialize, Serialize};

/// Entry pipeline name assumed when a data stream declares none
pub const DEFAULT_ENTRY_PIPELINE: &str = "default";

/// Logical data stream a package ships pipelines for
///
/// `type` and `dataset` are required and never empty. Deserialization goes
/// through the same check as [`DataStream::new`].
///
/// # Examples
/// ```
/// use pipeline_naming::DataStream;
///
/// let ds = DataStream::new("logs", "coredns.log")
///     .unwrap()
///     .with_ingest_pipeline("pipeline-entry");
/// assert_eq!(ds.entry_pipeline(), "pipeline-entry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDataStream")]
pub struct DataStream {
    #[serde(rename = "type")]
    kind: String,
    dataset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ingest_pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<String>,
}

/// Unchecked wire form of [`DataStream`]
#[derive(Debug, Deserialize)]
struct RawDataStream {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    dataset: Option<String>,
    #[serde(default)]
    ingest_pipeline: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    package: Option<String>,
}

impl TryFrom<RawDataStream> for DataStream {
    type Error = NamingError;

    fn try_from(raw: RawDataStream) -> Result<Self, Self::Error> {
        let mut ds = Self::new(
            raw.kind.unwrap_or_default(),
            raw.dataset.unwrap_or_default(),
        )?;
        ds.ingest_pipeline = raw.ingest_pipeline;
        ds.path = raw.path;
        ds.package = raw.package;
        Ok(ds)
    }
}

impl DataStream {
    /// Create descriptor from its required fields
    ///
    /// # Errors
    /// [`NamingError::MissingField`] when `kind` or `dataset` is empty.
    pub fn new(kind: impl Into<String>, dataset: impl Into<String>) -> Result<Self, NamingError> {
        let kind = kind.into();
        let dataset = dataset.into();
        if kind.is_empty() {
            return Err(NamingError::MissingField { field: "type" });
        }
        if dataset.is_empty() {
            return Err(NamingError::MissingField { field: "dataset" });
        }
        Ok(Self {
            kind,
            dataset,
            ingest_pipeline: None,
            path: None,
            package: None,
        })
    }

    /// With declared entry pipeline
    #[inline]
    #[must_use]
    pub fn with_ingest_pipeline(mut self, name: impl Into<String>) -> Self {
        self.ingest_pipeline = Some(name.into());
        self
    }

    /// With data stream directory inside the package
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// With owning package name
    #[inline]
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Data stream type (`logs`, `metrics`, ...)
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Dataset name
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Entry pipeline as declared, without the default applied
    #[inline]
    #[must_use]
    pub fn declared_ingest_pipeline(&self) -> Option<&str> {
        self.ingest_pipeline.as_deref()
    }

    /// Entry pipeline logical name, falling back to [`DEFAULT_ENTRY_PIPELINE`]
    #[inline]
    #[must_use]
    pub fn entry_pipeline(&self) -> &str {
        self.ingest_pipeline.as_deref().unwrap_or(DEFAULT_ENTRY_PIPELINE)
    }

    /// Check if `pipeline_name` is this stream's entry pipeline
    #[inline]
    #[must_use]
    pub fn is_entry_pipeline(&self, pipeline_name: &str) -> bool {
        self.entry_pipeline() == pipeline_name
    }

    /// Directory of the data stream inside the package
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Owning package name
    #[inline]
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }
}

impl std::fmt::Display for DataStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind, self.dataset)
    }
}
