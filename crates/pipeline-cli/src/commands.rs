//! Subcommand implementations
//!
//! Each command takes its already-read inputs and returns the text to write
//! to stdout, so the binary stays a thin shell over these functions.

use anyhow::{bail, Context, Result};
use pipeline_naming::{
    custom_pipeline_name_for_data_stream, installation_name_for_pipeline, DataStream,
};
use pipeline_rewrite::{
    add_custom_pipeline_hook, PipelineFormat, RewriteMode, Rewriter, SubstitutionFile,
};
use std::io::Read;
use std::path::Path;

/// Path meaning "read standard input"
pub const STDIN_PATH: &str = "-";

/// Read a command input from a file, or stdin for [`STDIN_PATH`]
///
/// # Errors
/// Fails when the file or stdin cannot be read as UTF-8.
pub fn read_input(path: &str) -> Result<String> {
    if path == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read pipeline from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("Failed to read {path}"))
}

/// Arguments of `rewrite`
#[derive(Debug, Clone, Default)]
pub struct RewriteArgs {
    /// Format override; sniffed from content when `None`
    pub format: Option<PipelineFormat>,
    /// Replace whole constructs instead of retargeting literals
    pub resolve: bool,
    /// Syntax-check the document first
    pub validate: bool,
}

/// Rewrite pipeline references in `document`
///
/// Options from the substitution file apply first; command-line flags can
/// only switch resolution and validation on.
///
/// # Errors
/// Fails on a malformed substitution file, an invalid or ambiguous
/// substitution list, or (with validation) a malformed document.
pub fn rewrite(document: &str, substitutions: &str, args: &RewriteArgs) -> Result<String> {
    let file = SubstitutionFile::parse(substitutions).context("Failed to parse substitutions")?;

    let mut options = file.options.clone();
    if args.resolve {
        options = options.with_mode(RewriteMode::Resolve);
    }
    if args.validate {
        options = options.with_validation(true);
    }

    let table = file.table().context("Invalid substitutions")?;
    let rewriter = Rewriter::new(options)?;
    tracing::debug!(substitutions = table.len(), mode = ?rewriter.options().mode, "rewriting");

    let output = match args.format {
        Some(format) => rewriter.rewrite_as(document, format, &table)?,
        None => rewriter.rewrite(document, &table)?,
    };
    Ok(output)
}

/// Append the custom pipeline hook to `document`
///
/// # Errors
/// Fails on an unknown extension or a document without a `processors` list.
pub fn add_hook(document: &str, extension: &str, name: &str, custom_name: &str) -> Result<String> {
    let install = add_custom_pipeline_hook(document, extension, name, custom_name)
        .with_context(|| format!("Failed to add custom hook to {name}"))?;
    Ok(install.content_for_installation)
}

/// Arguments of `name`
#[derive(Debug, Clone, Default)]
pub struct NameArgs {
    /// Data stream type
    pub kind: String,
    /// Data stream dataset
    pub dataset: String,
    /// Package version; unused for the custom name
    pub version: Option<String>,
    /// Pipeline to name; the entry pipeline when `None`
    pub pipeline: Option<String>,
    /// Declared entry pipeline of the data stream
    pub entry: Option<String>,
    /// Print the `@custom` hook pipeline name instead
    pub custom: bool,
}

/// Compute an installation name
///
/// # Errors
/// Fails when type or dataset are empty, or when a version is needed but
/// missing.
pub fn name(args: &NameArgs) -> Result<String> {
    let mut data_stream = DataStream::new(args.kind.as_str(), args.dataset.as_str())?;
    if let Some(entry) = &args.entry {
        data_stream = data_stream.with_ingest_pipeline(entry.as_str());
    }

    if args.custom {
        return Ok(custom_pipeline_name_for_data_stream(&data_stream));
    }

    let Some(version) = args.version.as_deref() else {
        bail!("--version is required unless --custom is given");
    };
    let pipeline = args
        .pipeline
        .as_deref()
        .unwrap_or_else(|| data_stream.entry_pipeline());
    Ok(installation_name_for_pipeline(pipeline, &data_stream, version))
}
