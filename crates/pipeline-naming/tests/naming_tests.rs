use pipeline_naming::prelude::*;
use pipeline_naming::{pipeline_name_for_data_stream, CUSTOM_PIPELINE_SUFFIX};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,15}"
}

proptest! {
    #[test]
    fn prop_names_are_deterministic(
        kind in segment(),
        dataset in segment(),
        entry in segment(),
        pipeline in segment(),
        version in "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
    ) {
        let ds = DataStream::new(kind.clone(), dataset.clone()).unwrap().with_ingest_pipeline(entry);
        let first = installation_name_for_pipeline(&pipeline, &ds, &version);
        let second = installation_name_for_pipeline(&pipeline, &ds.clone(), &version);
        prop_assert_eq!(&first, &second);

        let base = pipeline_name_for_data_stream(&ds, &version);
        prop_assert!(first.starts_with(&base));
        if ds.is_entry_pipeline(&pipeline) {
            prop_assert_eq!(first, base);
        } else {
            prop_assert_eq!(first, format!("{base}-{pipeline}"));
        }

        let custom = custom_pipeline_name_for_data_stream(&ds);
        prop_assert_eq!(custom, format!("{kind}-{dataset}{CUSTOM_PIPELINE_SUFFIX}"));
    }
}

#[test]
fn test_coredns_entry_and_reference_names() {
    let ds: DataStream = serde_json::from_value(serde_json::json!({
        "dataset": "coredns.log",
        "title": "CoreDNS logs",
        "release": "ga",
        "type": "logs",
        "ingest_pipeline": "pipeline-entry",
        "package": "coredns",
        "path": "log",
    }))
    .unwrap();
    let version = "1.0.1";

    let entry = installation_name_for_pipeline(ds.entry_pipeline(), &ds, version);
    let reference = installation_name_for_pipeline("pipeline-json", &ds, version);

    assert_eq!(entry, "logs-coredns.log-1.0.1");
    assert_eq!(reference, "logs-coredns.log-1.0.1-pipeline-json");
}

#[test]
fn test_asset_path_drives_target() {
    let ds = DataStream::new("logs", "coredns.log").unwrap().with_path("log");
    let path: AssetPath = "coredns-1.0.1/data_stream/log/elasticsearch/ingest_pipeline/default.yml"
        .parse()
        .unwrap();

    assert_eq!(path.data_stream(), ds.path());
    let target = PipelineTarget::DataStream(&ds);
    assert_eq!(
        target.installation_name(path.logical_name(), "1.0.1"),
        "logs-coredns.log-1.0.1"
    );
}
