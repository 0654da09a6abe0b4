//! End-to-end installation planning

use pipeline_rewrite::prelude::*;
use pipeline_rewrite::{prepare_pipelines, select_pipeline_assets, PipelineAsset};
use pipeline_test_utils::*;
use pretty_assertions::assert_eq;

#[test]
fn test_coredns_pipelines_prepared() {
    let ds = coredns_data_stream();
    let assets = coredns_assets();
    let rewriter = Rewriter::new(RewriterOptions::default()).unwrap();

    let installs = prepare_pipelines(&assets, PipelineTarget::DataStream(&ds), "1.0.1", &rewriter).unwrap();
    let names: Vec<&str> = installs.iter().map(|i| i.name_for_installation.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "logs-coredns.log-1.0.1",
            "logs-coredns.log-1.0.1-pipeline-json",
            "logs-coredns.log-1.0.1-pipeline-plaintext",
        ]
    );

    let entry = processors(&installs[0].content_for_installation, PipelineFormat::Yaml);
    assert_eq!(entry[0]["pipeline"]["name"], "logs-coredns.log-1.0.1-pipeline-json");
    assert_eq!(entry[1]["pipeline"]["name"], "logs-coredns.log-1.0.1-pipeline-plaintext");
    assert_eq!(
        entry[3],
        serde_json::json!({"pipeline": {"name": "logs-coredns.log@custom", "ignore_missing_pipeline": true}})
    );

    // Referenced pipelines carry no references and no hook.
    assert_eq!(installs[1].content_for_installation, assets[1].content);
    assert_eq!(installs[2].content_for_installation, assets[2].content);
    assert_eq!(installs[1].extension, PipelineFormat::Json);
}

#[test]
fn test_entry_pipeline_matches_manual_flow() {
    let ds = coredns_data_stream();
    let assets = coredns_assets();
    let rewriter = Rewriter::new(RewriterOptions::default()).unwrap();
    let installs = prepare_pipelines(&assets, PipelineTarget::DataStream(&ds), "1.0.1", &rewriter).unwrap();

    let manual = resolve(
        REAL_INPUT_STANDARD_YML,
        &[
            Substitution::ingest_pipeline("pipeline-json", "logs-coredns.log-1.0.1-pipeline-json"),
            Substitution::ingest_pipeline("pipeline-plaintext", "logs-coredns.log-1.0.1-pipeline-plaintext"),
            Substitution::ingest_pipeline("pipeline-entry", "logs-coredns.log-1.0.1"),
        ],
    )
    .unwrap();
    let manual = add_custom_pipeline_hook(&manual, "yml", "logs-coredns.log-1.0.1", "logs-coredns.log@custom").unwrap();

    assert_eq!(installs[0].content_for_installation, manual.content_for_installation);
}

#[test]
fn test_other_data_stream_selects_nothing() {
    let ds = DataStream::new("logs", "coredns.other").unwrap().with_path("other");
    let assets = coredns_assets();
    assert!(select_pipeline_assets(&assets, PipelineTarget::DataStream(&ds)).is_empty());

    let rewriter = Rewriter::new(RewriterOptions::default()).unwrap();
    let installs = prepare_pipelines(&assets, PipelineTarget::DataStream(&ds), "1.0.1", &rewriter).unwrap();
    assert!(installs.is_empty());
}

#[test]
fn test_install_serializes_for_installer() {
    let ds = coredns_data_stream();
    let assets = coredns_assets();
    let rewriter = Rewriter::new(RewriterOptions::default()).unwrap();
    let installs = prepare_pipelines(&assets, PipelineTarget::DataStream(&ds), "1.0.1", &rewriter).unwrap();

    let value = serde_json::to_value(&installs[1]).unwrap();
    assert_eq!(value["extension"], "json");
    assert_eq!(value["name_for_installation"], "logs-coredns.log-1.0.1-pipeline-json");
    assert!(value.get("custom_ingest_pipeline_name_for_installation").is_none());
}

#[test]
fn test_pathless_data_stream_installs_nothing() {
    let ds = DataStream::new("logs", "coredns.log").unwrap().with_ingest_pipeline("pipeline-entry");
    let rewriter = Rewriter::new(RewriterOptions::default()).unwrap();
    let installs = prepare_pipelines(&coredns_assets(), PipelineTarget::DataStream(&ds), "1.0.1", &rewriter).unwrap();
    assert!(installs.is_empty());
}

#[test]
fn test_colliding_installation_names_rejected() {
    let ds = coredns_data_stream();
    let mut assets = coredns_assets();
    assets.push(PipelineAsset::new(
        "coredns-1.0.1/data_stream/log/elasticsearch/ingest_pipeline/pipeline-json.yml",
        "processors: []\n",
    ));
    let rewriter = Rewriter::new(RewriterOptions::default()).unwrap();
    let err = prepare_pipelines(&assets, PipelineTarget::DataStream(&ds), "1.0.1", &rewriter).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Precondition(PreconditionError::DuplicateInstallationName { ref name, .. })
            if name == "logs-coredns.log-1.0.1-pipeline-json"
    ));
}
