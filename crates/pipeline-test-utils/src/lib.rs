//! Testing utilities for the ingest pipeline workspace
//!
//! Shared fixtures, substitution tables, and tree comparison helpers.

#![allow(missing_docs)]

use pipeline_naming::DataStream;
use pipeline_rewrite::{PipelineAsset, PipelineFormat, Substitution};

/// Pipeline with standard-style `{{ IngestPipeline '...' }}` references
pub const REAL_INPUT_STANDARD_JSON: &str = include_str!("../fixtures/real_input_standard.json");
/// Same pipeline with beats-style `{< IngestPipeline ... >}` references
pub const REAL_INPUT_BEATS_JSON: &str = include_str!("../fixtures/real_input_beats.json");
/// Both JSON inputs with references resolved to bare names
pub const REAL_OUTPUT_JSON: &str = include_str!("../fixtures/real_output.json");
/// Standard JSON input with literals retargeted in place
pub const REAL_OUTPUT_RETARGETED_JSON: &str = include_str!("../fixtures/real_output_retargeted.json");
/// JSON pipeline mentioning the names without a matching reference
pub const NO_REPLACEMENT_JSON: &str = include_str!("../fixtures/no_replacement.json");

pub const REAL_INPUT_STANDARD_YML: &str = include_str!("../fixtures/real_input_standard.yml");
pub const REAL_INPUT_BEATS_YML: &str = include_str!("../fixtures/real_input_beats.yml");
pub const REAL_OUTPUT_YML: &str = include_str!("../fixtures/real_output.yml");
pub const REAL_OUTPUT_RETARGETED_YML: &str = include_str!("../fixtures/real_output_retargeted.yml");
pub const NO_REPLACEMENT_YML: &str = include_str!("../fixtures/no_replacement.yml");

/// Substitutions matching the `real_*` fixtures
pub fn fixture_substitutions() -> Vec<Substitution> {
    vec![
        Substitution::new("pipeline-json", "new-pipeline-json", "IngestPipeline"),
        Substitution::new("pipeline-plaintext", "new-pipeline-plaintext", "IngestPipeline"),
    ]
}

/// Registry-shaped data stream used across tests
pub fn coredns_data_stream() -> DataStream {
    DataStream::new("logs", "coredns.log")
        .unwrap()
        .with_ingest_pipeline("pipeline-entry")
        .with_package("coredns")
        .with_path("log")
}

/// Entry pipeline plus two referenced pipelines of the coredns data stream
pub fn coredns_assets() -> Vec<PipelineAsset> {
    let dir = "coredns-1.0.1/data_stream/log/elasticsearch/ingest_pipeline";
    vec![
        PipelineAsset::new(format!("{dir}/pipeline-entry.yml"), REAL_INPUT_STANDARD_YML),
        PipelineAsset::new(
            format!("{dir}/pipeline-json.json"),
            r#"{"processors":[{"json":{"field":"message","target_field":"coredns"}}]}"#,
        ),
        PipelineAsset::new(
            format!("{dir}/pipeline-plaintext.yml"),
            "processors:\n  - grok:\n      field: message\n      patterns:\n        - '%{IP:source.ip} %{GREEDYDATA:message}'\n",
        ),
    ]
}

/// Parse a document of either format into a comparable tree
pub fn parse_tree(document: &str, format: PipelineFormat) -> serde_json::Value {
    match format {
        PipelineFormat::Json => serde_json::from_str(document).unwrap(),
        PipelineFormat::Yaml => serde_yaml::from_str(document).unwrap(),
    }
}

/// `processors` list of a document of either format
pub fn processors(document: &str, format: PipelineFormat) -> serde_json::Value {
    parse_tree(document, format)["processors"].clone()
}
