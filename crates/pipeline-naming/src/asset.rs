//! Package asset paths
//!
//! Classifies files inside a package archive. Pipelines live at either
//! `<pkgkey>/elasticsearch/ingest_pipeline/<file>` (top level) or
//! `<pkgkey>/data_stream/<stream>/elasticsearch/ingest_pipeline/<file>`.

use crate::error::NamingError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Service directory holding indexing-side assets
pub const ELASTICSEARCH_SERVICE: &str = "elasticsearch";

/// Asset type directory for ingest pipelines
pub const INGEST_PIPELINE_ASSET: &str = "ingest_pipeline";

const DATA_STREAM_DIR: &str = "data_stream";

/// Parsed package asset path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath {
    package_key: String,
    data_stream: Option<String>,
    service: String,
    asset_type: String,
    file: String,
}

impl AssetPath {
    /// Parse a `/`-separated archive path
    ///
    /// # Errors
    /// [`NamingError::InvalidAssetPath`] when the path has too few segments
    /// or an empty component.
    pub fn parse(path: &str) -> Result<Self, NamingError> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(NamingError::invalid_asset_path(path, "empty segment"));
        }

        let (data_stream, rest) = match parts.as_slice() {
            [_, dir, stream, rest @ ..] if *dir == DATA_STREAM_DIR => (Some(*stream), rest),
            [_, rest @ ..] => (None, rest),
            [] => return Err(NamingError::invalid_asset_path(path, "empty path")),
        };

        match rest {
            [service, asset_type, file @ ..] if !file.is_empty() => Ok(Self {
                package_key: parts[0].to_string(),
                data_stream: data_stream.map(str::to_string),
                service: (*service).to_string(),
                asset_type: (*asset_type).to_string(),
                file: file.join("/"),
            }),
            _ => Err(NamingError::invalid_asset_path(
                path,
                "expected <service>/<type>/<file> after package key",
            )),
        }
    }

    /// Package key (`<name>-<version>`)
    #[inline]
    #[must_use]
    pub fn package_key(&self) -> &str {
        &self.package_key
    }

    /// Data stream directory, if the asset belongs to one
    #[inline]
    #[must_use]
    pub fn data_stream(&self) -> Option<&str> {
        self.data_stream.as_deref()
    }

    /// Check if this is an ingest pipeline asset
    #[inline]
    #[must_use]
    pub fn is_ingest_pipeline(&self) -> bool {
        self.service == ELASTICSEARCH_SERVICE && self.asset_type == INGEST_PIPELINE_ASSET
    }

    /// Logical pipeline name: file name without its extension
    #[must_use]
    pub fn logical_name(&self) -> &str {
        let name = self.file.rsplit('/').next().unwrap_or(&self.file);
        match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }

    /// File extension without the dot
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file.rsplit('/').next().unwrap_or(&self.file);
        match name.rfind('.') {
            Some(0) | None => None,
            Some(dot) => Some(&name[dot + 1..]),
        }
    }
}

impl FromStr for AssetPath {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for AssetPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.package_key)?;
        if let Some(ds) = &self.data_stream {
            write!(f, "{DATA_STREAM_DIR}/{ds}/")?;
        }
        write!(f, "{}/{}/{}", self.service, self.asset_type, self.file)
    }
}

/// Check if `path` is an ingest pipeline outside any data stream
#[must_use]
pub fn is_top_level_pipeline(path: &str) -> bool {
    AssetPath::parse(path)
        .map(|p| p.is_ingest_pipeline() && p.data_stream().is_none())
        .unwrap_or(false)
}

/// Check if `path` is an ingest pipeline of the data stream at `data_stream_path`
#[must_use]
pub fn is_data_stream_pipeline(path: &str, data_stream_path: &str) -> bool {
    AssetPath::parse(path)
        .map(|p| p.is_ingest_pipeline() && p.data_stream() == Some(data_stream_path))
        .unwrap_or(false)
}
