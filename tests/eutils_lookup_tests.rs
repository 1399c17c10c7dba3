/// End-to-end lookups against a scripted E-utilities service
mod common;

use common::{esearch_body, esummary_body, test_eutils_config, ScriptedTransport};
use pretty_assertions::assert_eq;
use seqseek::bio::UNKNOWN_TITLE;
use seqseek::{EutilsClient, HttpResponse, SearchRequest, SeqseekError};
use std::sync::Arc;

const FASTA: &str = "\
>NM_000001.1 Homo sapiens gene one, mRNA
ATCGATCG
ATCG
>NM_000002.3 Homo sapiens gene two, mRNA
GGCCTTAA
";

fn client(transport: &Arc<ScriptedTransport>) -> EutilsClient<Arc<ScriptedTransport>> {
    EutilsClient::new(Arc::clone(transport), test_eutils_config())
}

#[tokio::test]
async fn test_lookup_passes_first_two_ids_to_summary_and_fetch() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        HttpResponse::ok(esearch_body(&["1", "2", "3"])),
        HttpResponse::ok(esummary_body(&[
            ("1", "NM_000001.1", "Homo sapiens gene one, mRNA"),
            ("2", "NM_000002.3", "Homo sapiens gene two, mRNA"),
        ])),
        HttpResponse::ok(FASTA),
    ]));

    let request = SearchRequest::new("ADHD", "nucleotide", 5).unwrap();
    let result = client(&transport).lookup(&request).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);

    assert!(requests[0].url.ends_with("/esearch.fcgi"));
    assert_eq!(requests[0].param("db"), Some("nucleotide"));
    assert_eq!(requests[0].param("term"), Some("ADHD"));
    assert_eq!(requests[0].param("retmax"), Some("5"));
    assert_eq!(requests[0].param("retmode"), Some("json"));

    assert!(requests[1].url.ends_with("/esummary.fcgi"));
    assert_eq!(requests[1].param("id"), Some("1,2"));

    assert!(requests[2].url.ends_with("/efetch.fcgi"));
    assert_eq!(requests[2].param("id"), Some("1,2"));
    assert_eq!(requests[2].param("rettype"), Some("fasta"));
    assert_eq!(requests[2].param("retmode"), Some("text"));

    assert_eq!(result.total_hits, 3);
    assert_eq!(result.ids.joined(), "1,2");
    assert_eq!(result.fasta, FASTA);

    let titles: Vec<&str> = result.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Homo sapiens gene one, mRNA", "Homo sapiens gene two, mRNA"]
    );
    assert_eq!(result.records[0].sequence_text, "ATCGATCGATCG");
    assert_eq!(result.records[1].sequence_text, "GGCCTTAA");
}

#[tokio::test]
async fn test_missing_title_falls_back() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        HttpResponse::ok(esearch_body(&["7"])),
        HttpResponse::ok(r#"{"result": {"uids": ["7"], "7": {"uid": "7"}}}"#),
        HttpResponse::ok(">X_7.1\nACGT\n"),
    ]));

    let request = SearchRequest::new("rare", "nucleotide", 5).unwrap();
    let result = client(&transport).lookup(&request).await.unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].title, UNKNOWN_TITLE);
    assert_eq!(result.records[0].sequence_text, "ACGT");
}

#[tokio::test]
async fn test_summary_without_result_still_fetches_sequences() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        HttpResponse::ok(esearch_body(&["1"])),
        HttpResponse::ok(r#"{"header": {"type": "esummary"}, "esummaryresult": ["Invalid uid 1 at position=0"]}"#),
        HttpResponse::ok(">NM_000001.1 gene one\nACGTACGT\n"),
    ]));

    let request = SearchRequest::new("ADHD", "nucleotide", 5).unwrap();
    let result = client(&transport).lookup(&request).await.unwrap();

    assert_eq!(transport.request_count(), 3);
    assert!(result.summaries.is_empty());
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].title, UNKNOWN_TITLE);
    assert_eq!(result.records[0].sequence_text, "ACGTACGT");
}

#[tokio::test]
async fn test_zero_hits_is_empty_result() {
    let transport = Arc::new(ScriptedTransport::new(vec![HttpResponse::ok(
        esearch_body(&[]),
    )]));

    let request = SearchRequest::new("no such gene", "nucleotide", 5).unwrap();
    let err = client(&transport).lookup(&request).await.unwrap_err();

    assert!(matches!(err, SeqseekError::EmptyResult(ref term) if term == "no such gene"));
    assert!(err.is_warning());
    // No summary or fetch call after an empty search
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_search_server_error_is_transport_error() {
    let transport = Arc::new(ScriptedTransport::new(vec![HttpResponse::new(
        500,
        "Internal Server Error",
    )]));

    let request = SearchRequest::new("ADHD", "nucleotide", 5).unwrap();
    match client(&transport).lookup(&request).await {
        Err(SeqseekError::Transport { endpoint, status }) => {
            assert_eq!(endpoint, "esearch");
            assert_eq!(status, 500);
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_error_aborts_lookup() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        HttpResponse::ok(esearch_body(&["1"])),
        HttpResponse::ok(esummary_body(&[("1", "NM_000001.1", "gene one")])),
        HttpResponse::new(429, "Too Many Requests"),
    ]));

    let request = SearchRequest::new("ADHD", "nucleotide", 5).unwrap();
    let err = client(&transport).lookup(&request).await.unwrap_err();

    assert!(matches!(err, SeqseekError::Transport { status: 429, .. }));
}

#[tokio::test]
async fn test_invalid_request_sends_nothing() {
    let transport = Arc::new(ScriptedTransport::new(vec![]));

    let request = SearchRequest {
        term: "   ".to_string(),
        database: "nucleotide".to_string(),
        max_results: 5,
    };
    let err = client(&transport).lookup(&request).await.unwrap_err();

    assert!(matches!(err, SeqseekError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_credentials_are_sent_with_every_call() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        HttpResponse::ok(esearch_body(&["1"])),
        HttpResponse::ok(esummary_body(&[("1", "NM_000001.1", "gene one")])),
        HttpResponse::ok(">NM_000001.1 gene one\nACGT\n"),
    ]));

    let mut config = test_eutils_config();
    config.tool = Some("seqseek-tests".to_string());
    config.email = Some("dev@example.org".to_string());
    let client = EutilsClient::new(Arc::clone(&transport), config);

    let request = SearchRequest::new("ADHD", "nucleotide", 5).unwrap();
    client.lookup(&request).await.unwrap();

    for request in transport.requests() {
        assert_eq!(request.param("tool"), Some("seqseek-tests"));
        assert_eq!(request.param("email"), Some("dev@example.org"));
        assert!(!request.params.contains_key("api_key"));
    }
}
