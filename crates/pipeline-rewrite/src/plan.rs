//! Installation planning
//!
//! Drives the full flow for the pipelines of one data stream (or of the
//! package top level):
//!
//! ```text
//! assets → logical names → installation names → substitution table
//!        → resolve references in every document → hook on entry pipeline
//! ```

use crate::error::{PipelineResult, PreconditionError};
use crate::formats::PipelineFormat;
use crate::hook::PipelineInstall;
use crate::reference::RewriteMode;
use crate::rewriter::Rewriter;
use crate::substitution::{Substitution, SubstitutionTable};
use pipeline_naming::{is_data_stream_pipeline, is_top_level_pipeline, AssetPath, PipelineTarget};
use std::collections::HashMap;

/// Raw pipeline file from a package archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineAsset {
    /// Archive path, e.g. `pkg-1.0.0/data_stream/log/elasticsearch/ingest_pipeline/default.yml`
    pub path: String,
    /// File content
    pub content: String,
}

impl PipelineAsset {
    /// Create asset
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Assets that are ingest pipelines of `target`
///
/// A data stream is matched by its directory, so one without a path selects
/// nothing. When the data stream names its package, assets of other
/// packages are skipped. Paths that do not follow the package layout are
/// skipped too.
#[must_use]
pub fn select_pipeline_assets<'a>(
    assets: &'a [PipelineAsset],
    target: PipelineTarget<'_>,
) -> Vec<&'a PipelineAsset> {
    assets
        .iter()
        .filter(|asset| match target {
            PipelineTarget::TopLevel => is_top_level_pipeline(&asset.path),
            PipelineTarget::DataStream(ds) => {
                let Some(dir) = ds.path() else {
                    return false;
                };
                is_data_stream_pipeline(&asset.path, dir)
                    && ds.package().map_or(true, |pkg| in_package(&asset.path, pkg))
            }
        })
        .collect()
}

fn in_package(path: &str, package: &str) -> bool {
    AssetPath::parse(path).is_ok_and(|p| {
        p.package_key()
            .strip_prefix(package)
            .is_some_and(|version| version.starts_with('-'))
    })
}

/// Prepare every pipeline of `target` for installation
///
/// References between the selected pipelines are resolved to installation
/// names. The data stream's entry pipeline additionally gets the custom
/// pipeline hook.
///
/// # Errors
/// - [`crate::PipelineError::Naming`] for an asset path outside the package layout
/// - [`PreconditionError::UnsupportedExtension`] for a non JSON/YAML asset
/// - [`PreconditionError::DuplicateInstallationName`] when two files would
///   install under the same name, e.g. `default.yml` next to `default.json`
/// - any error from rewriting or appending the hook
pub fn prepare_pipelines(
    assets: &[PipelineAsset],
    target: PipelineTarget<'_>,
    package_version: &str,
    rewriter: &Rewriter,
) -> PipelineResult<Vec<PipelineInstall>> {
    let selected = select_pipeline_assets(assets, target);

    let mut parsed = Vec::with_capacity(selected.len());
    let mut claimed: HashMap<String, &str> = HashMap::with_capacity(selected.len());
    for asset in selected {
        let path = AssetPath::parse(&asset.path)?;
        let extension = path.extension().unwrap_or_default();
        let format = PipelineFormat::from_extension(extension)
            .map_err(|_| PreconditionError::UnsupportedExtension(asset.path.clone()))?;
        let logical = path.logical_name().to_string();
        let installed = target.installation_name(&logical, package_version);
        if let Some(first) = claimed.insert(installed.clone(), &asset.path) {
            return Err(PreconditionError::DuplicateInstallationName {
                name: installed,
                first: first.to_string(),
                second: asset.path.clone(),
            }
            .into());
        }
        parsed.push((asset, format, logical, installed));
    }

    let table = SubstitutionTable::new(
        parsed
            .iter()
            .map(|(_, _, logical, installed)| Substitution::ingest_pipeline(logical.clone(), installed.clone())),
    )?;
    tracing::debug!(
        pipelines = parsed.len(),
        substitutions = table.len(),
        "prepared substitution table"
    );

    parsed
        .into_iter()
        .map(|(asset, format, logical, installed)| {
            let content = rewriter.rewrite_with_mode(&asset.content, format, &table, RewriteMode::Resolve)?;
            let custom = if target.is_entry_pipeline(&logical) {
                target.custom_pipeline_name()
            } else {
                None
            };
            PipelineInstall {
                name_for_installation: installed,
                content_for_installation: content,
                extension: format,
                custom_ingest_pipeline_name_for_installation: custom,
            }
            .with_custom_hook()
        })
        .collect()
}
