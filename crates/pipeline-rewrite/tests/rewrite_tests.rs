//! Reference rewriting against full pipeline documents

use pipeline_rewrite::prelude::*;
use pipeline_rewrite::rewrite_as;
use pipeline_test_utils::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_json_references_resolve_for_both_styles() {
    let subs = fixture_substitutions();
    assert_eq!(resolve(REAL_INPUT_STANDARD_JSON, &subs).unwrap(), REAL_OUTPUT_JSON);
    assert_eq!(resolve(REAL_INPUT_BEATS_JSON, &subs).unwrap(), REAL_OUTPUT_JSON);
}

#[test]
fn test_yml_references_resolve_for_both_styles() {
    let subs = fixture_substitutions();
    assert_eq!(resolve(REAL_INPUT_STANDARD_YML, &subs).unwrap(), REAL_OUTPUT_YML);
    assert_eq!(resolve(REAL_INPUT_BEATS_YML, &subs).unwrap(), REAL_OUTPUT_YML);
}

#[test]
fn test_json_references_retarget_in_place() {
    let out = rewrite(REAL_INPUT_STANDARD_JSON, &fixture_substitutions()).unwrap();
    assert_eq!(out, REAL_OUTPUT_RETARGETED_JSON);
}

#[test]
fn test_yml_references_retarget_in_place() {
    let out = rewrite(REAL_INPUT_STANDARD_YML, &fixture_substitutions()).unwrap();
    assert_eq!(out, REAL_OUTPUT_RETARGETED_YML);
}

#[test]
fn test_beats_style_keeps_its_delimiters() {
    let out = rewrite(REAL_INPUT_BEATS_JSON, &fixture_substitutions()).unwrap();
    assert!(out.contains(r#""{< IngestPipeline \"new-pipeline-json\" >}""#));
    assert!(out.contains(r#""{<IngestPipeline 'new-pipeline-plaintext'>}""#));
}

#[test]
fn test_documents_without_references_are_unchanged() {
    let subs = fixture_substitutions();
    for doc in [NO_REPLACEMENT_JSON, NO_REPLACEMENT_YML] {
        assert_eq!(rewrite(doc, &subs).unwrap(), doc);
        assert_eq!(resolve(doc, &subs).unwrap(), doc);
    }
}

#[test]
fn test_unrelated_occurrences_survive() {
    let out = rewrite(REAL_INPUT_STANDARD_YML, &fixture_substitutions()).unwrap();
    assert!(out.contains("value: forwarded to pipeline-json or pipeline-plaintext"));
    assert!(out.contains("'{{ _ingest.on_failure_message }}'"));
    assert!(out.contains("# Dispatch on the first character of the message"));
}

#[test]
fn test_format_hint_overrides_detection() {
    // Sniffed as YAML; forced JSON means a bare `"` no longer delimits a literal.
    let doc = "name: '{{ IngestPipeline \"pipeline-json\" }}'\n";
    let subs = fixture_substitutions();
    assert_eq!(rewrite_as(doc, PipelineFormat::Json, &subs).unwrap(), doc);
    assert_eq!(
        rewrite_as(doc, PipelineFormat::Yaml, &subs).unwrap(),
        "name: '{{ IngestPipeline \"new-pipeline-json\" }}'\n"
    );
}

#[test]
fn test_yml_doubled_quote_reference_is_rewritten() {
    let doc = "processors:\n  - pipeline:\n      name: '{{ IngestPipeline ''pipeline-json'' }}'\n";
    let subs = fixture_substitutions();

    let retargeted = rewrite(doc, &subs).unwrap();
    assert_eq!(
        processors(&retargeted, PipelineFormat::Yaml)[0]["pipeline"]["name"],
        "{{ IngestPipeline 'new-pipeline-json' }}"
    );

    let resolved = resolve(doc, &subs).unwrap();
    assert_eq!(
        processors(&resolved, PipelineFormat::Yaml)[0]["pipeline"]["name"],
        "new-pipeline-json"
    );
}

#[test]
fn test_json_and_yaml_resolve_to_same_processors() {
    let subs = fixture_substitutions();
    let json = resolve(REAL_INPUT_STANDARD_JSON, &subs).unwrap();
    let yaml = resolve(REAL_INPUT_STANDARD_YML, &subs).unwrap();
    assert_eq!(
        processors(&json, PipelineFormat::Json),
        processors(&yaml, PipelineFormat::Yaml)
    );
    assert_eq!(
        processors(&json, PipelineFormat::Json)[0]["pipeline"]["name"],
        "new-pipeline-json"
    );
}

#[test]
fn test_json_and_yaml_retarget_to_same_references() {
    let subs = fixture_substitutions();
    let json = processors(&rewrite(REAL_INPUT_STANDARD_JSON, &subs).unwrap(), PipelineFormat::Json);
    let yaml = processors(&rewrite(REAL_INPUT_STANDARD_YML, &subs).unwrap(), PipelineFormat::Yaml);
    for i in 0..2 {
        let j = json[i]["pipeline"]["name"].as_str().unwrap().replace(' ', "");
        let y = yaml[i]["pipeline"]["name"].as_str().unwrap().replace(' ', "").replace('"', "'");
        assert_eq!(j, y);
    }
}

#[test]
fn test_validated_rewrite_accepts_fixtures() {
    let rewriter = Rewriter::new(RewriterOptions::new().with_validation(true)).unwrap();
    let table = SubstitutionTable::from_slice(&fixture_substitutions()).unwrap();
    for doc in [REAL_INPUT_STANDARD_JSON, REAL_INPUT_BEATS_JSON, REAL_INPUT_STANDARD_YML, REAL_INPUT_BEATS_YML] {
        assert!(rewriter.rewrite(doc, &table).is_ok());
    }
}

#[test]
fn test_rewriter_is_reusable() {
    let rewriter = Rewriter::new(RewriterOptions::new().with_mode(RewriteMode::Resolve)).unwrap();
    let table = SubstitutionTable::from_slice(&fixture_substitutions()).unwrap();
    let first = rewriter.rewrite(REAL_INPUT_STANDARD_JSON, &table).unwrap();
    let second = rewriter.rewrite(REAL_INPUT_STANDARD_JSON, &table).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, REAL_OUTPUT_JSON);
}

proptest! {
    #[test]
    fn prop_text_without_references_is_unchanged(doc in "[a-z0-9 {}<>'\":#\n-]{0,200}") {
        let subs = fixture_substitutions();
        prop_assert_eq!(rewrite(&doc, &subs).unwrap(), doc.clone());
        prop_assert_eq!(resolve(&doc, &subs).unwrap(), doc);
    }

    #[test]
    fn prop_reference_rewritten_in_any_context(
        prefix in "[a-z0-9 :\n-]{0,40}",
        suffix in "[a-z0-9 :\n-]{0,40}",
        lead in "[ ]{0,2}",
        trail in "[ ]{0,2}",
        beats in any::<bool>(),
    ) {
        let (open, close) = if beats { ("{<", ">}") } else { ("{{", "}}") };
        let doc = format!("{prefix}{open}{lead}IngestPipeline 'pipeline-json'{trail}{close}{suffix}");
        let subs = fixture_substitutions();

        let retargeted = rewrite_as(&doc, PipelineFormat::Yaml, &subs).unwrap();
        prop_assert_eq!(
            retargeted,
            format!("{prefix}{open}{lead}IngestPipeline 'new-pipeline-json'{trail}{close}{suffix}")
        );

        let rewriter = Rewriter::new(RewriterOptions::new().with_mode(RewriteMode::Resolve)).unwrap();
        let table = SubstitutionTable::from_slice(&subs).unwrap();
        let resolved = rewriter.rewrite_as(&doc, PipelineFormat::Yaml, &table).unwrap();
        prop_assert_eq!(resolved, format!("{prefix}new-pipeline-json{suffix}"));
    }
}
