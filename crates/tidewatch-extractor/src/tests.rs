//! Pipeline tests driving the analyzer against the mock provider.
//!
//! Timing-sensitive tests run on tokio's paused clock, so backoff delays are
//! asserted exactly without slowing the suite down.

use std::time::Duration;

use tidewatch_domain::{LlmError, NO_INFORMATION};
use tidewatch_llm::MockProvider;

use crate::{DocumentAnalyzer, ExtractError, ExtractorConfig};

fn entities(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn fast_config() -> ExtractorConfig {
    ExtractorConfig {
        inter_chunk_delay_ms: 0,
        ..ExtractorConfig::default()
    }
}

#[tokio::test]
async fn test_simple_document_round_trip() {
    let provider = MockProvider::new("Acme Corp: filed for bankruptcy");
    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();

    let analysis = analyzer
        .analyze(
            "Notice: Acme Corp filed for bankruptcy at the district court.",
            &entities(&["Acme Corp"]),
        )
        .await
        .unwrap();

    assert_eq!(analysis.results.get("Acme Corp"), Some("filed for bankruptcy"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_no_entity_mention_skips_provider_entirely() {
    let provider = MockProvider::new("should never be requested");
    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();

    let analysis = analyzer
        .analyze(
            "Skifteretten i Aalborg har behandlet en række uvedkommende sager.",
            &entities(&["Danske Bank", "Acme Corp"]),
        )
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 0);
    assert_eq!(analysis.results.get("Danske Bank"), Some(NO_INFORMATION));
    assert_eq!(analysis.results.get("Acme Corp"), Some(NO_INFORMATION));
    assert!(analysis.raw_answer.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_backoff_doubles_between_attempts() {
    let provider = MockProvider::new("Acme Corp: konkursdekret afsagt");
    provider.push_err(LlmError::RateLimited("HTTP 429".into()));
    provider.push_err(LlmError::RateLimited("HTTP 429".into()));

    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();
    let analysis = analyzer
        .analyze("Acme Corp er taget under konkursbehandling.", &entities(&["Acme Corp"]))
        .await
        .unwrap();

    assert_eq!(analysis.results.get("Acme Corp"), Some("konkursdekret afsagt"));
    assert_eq!(provider.call_count(), 3);

    // 1s before the second attempt, 2s before the third.
    let instants = provider.call_instants();
    assert_eq!(instants[1] - instants[0], Duration::from_secs(1));
    assert_eq!(instants[2] - instants[1], Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_retryable_errors_exhaust_attempt_budget() {
    let provider = MockProvider::new("unused");
    for _ in 0..3 {
        provider.push_err(LlmError::RateLimited("HTTP 429".into()));
    }

    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();
    let err = analyzer
        .analyze("Acme Corp nævnes her.", &entities(&["Acme Corp"]))
        .await
        .unwrap_err();

    match err {
        ExtractError::RetriesExhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(last.is_retryable());
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn test_fatal_error_is_not_retried() {
    let provider = MockProvider::new("unused");
    provider.push_err(LlmError::Provider("response status: failed".into()));

    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();
    let err = analyzer
        .analyze("Acme Corp nævnes her.", &entities(&["Acme Corp"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Llm(LlmError::Provider(_))));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_chunked_document_merges_findings() {
    let line_a = format!(
        "Acme ApS: skifteretten har afsagt konkursdekret over selskabet {}",
        "x".repeat(40)
    );
    let line_b = format!(
        "Acme ApS: tvangsauktion over ejendommen afholdes i oktober {}",
        "y".repeat(40)
    );
    let text = format!("{line_a}\n{line_b}");

    let provider = MockProvider::new("unused default");
    provider.push_ok("Acme ApS: under konkurs");
    provider.push_ok("Acme ApS: auktion 2024");

    let config = ExtractorConfig {
        chunk_char_budget: 120,
        inter_chunk_delay_ms: 2000,
        ..ExtractorConfig::default()
    };
    let analyzer = DocumentAnalyzer::new(provider.clone(), config).unwrap();

    let analysis = analyzer.analyze(&text, &entities(&["Acme ApS"])).await.unwrap();

    assert_eq!(provider.call_count(), 2);
    assert_eq!(
        analysis.results.get("Acme ApS"),
        Some("under konkurs\n\nauktion 2024")
    );
    assert_eq!(analysis.raw_answer, "Acme ApS: under konkurs\n\nAcme ApS: auktion 2024");

    // The configured pause ran between the two chunk requests.
    let instants = provider.call_instants();
    assert!(instants[1] - instants[0] >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cancels_inflight_backoff() {
    let provider = MockProvider::new("unused");
    provider.push_err(LlmError::RateLimited("HTTP 429".into()));

    let config = ExtractorConfig {
        initial_backoff_ms: 10_000,
        extraction_timeout_secs: 5,
        ..ExtractorConfig::default()
    };
    let analyzer = DocumentAnalyzer::new(provider.clone(), config).unwrap();

    let err = analyzer
        .analyze("Acme Corp nævnes her.", &entities(&["Acme Corp"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Timeout));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_oversized_document_is_reduced_before_sending() {
    // Mostly irrelevant sentences around a single entity mention; the
    // sentence filter should shrink this below the chunk budget so a single
    // request suffices.
    let mut doc = String::new();
    for i in 0..200 {
        doc.push_str(&format!("Uvedkommende meddelelse nummer {} uden relevans her. ", i));
    }
    doc.push_str("Acme Corp er taget under behandling af retten. ");
    for i in 0..200 {
        doc.push_str(&format!("Endnu en uvedkommende meddelelse nummer {} i rækken. ", i));
    }

    let provider = MockProvider::new("Acme Corp: under behandling af retten");
    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();

    let analysis = analyzer.analyze(&doc, &entities(&["Acme Corp"])).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(analysis.results.get("Acme Corp"), Some("under behandling af retten"));
}

#[tokio::test]
async fn test_file_source_extraction_parses_answer() {
    use tidewatch_domain::EntityExtractor;

    let provider = MockProvider::new("Danske Bank: No information found.\n\nAcme ApS: likvidation indledt");
    let analyzer = DocumentAnalyzer::new(provider.clone(), fast_config()).unwrap();

    let analysis = analyzer
        .extract_from_source(
            "https://statstidende.dk/api/publication/12345/pdf",
            &entities(&["Danske Bank", "Acme ApS"]),
        )
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(analysis.results.get("Danske Bank"), Some(NO_INFORMATION));
    assert_eq!(analysis.results.get("Acme ApS"), Some("likvidation indledt"));
}
