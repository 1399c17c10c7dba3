//! Shared helpers for the integration tests
//!
//! `ScriptedTransport` answers requests from a queue of canned responses and
//! records every request it sees, so tests can assert on both sides.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use seqseek::core::config::EutilsConfig;
use seqseek::{HttpResponse, QueryParams, Result, SeqseekError, Transport};

/// One request as the transport received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub params: QueryParams,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }
}

pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    /// Returned once the script runs out, if set
    fallback: Option<HttpResponse>,
    /// Never answer once the script runs out
    stall: bool,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fallback: None,
            stall: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Keep answering with `response` after the scripted ones are used up
    pub fn repeating(mut self, response: HttpResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    /// Leave every request after the scripted ones pending forever
    pub fn then_stall(mut self) -> Self {
        self.stall = true;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            params: params.clone(),
        });

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone());

        match next {
            Some(response) => Ok(response),
            None if self.stall => std::future::pending().await,
            None => Err(SeqseekError::Network(format!(
                "no scripted response for {}",
                url
            ))),
        }
    }
}

pub fn esearch_body(ids: &[&str]) -> String {
    serde_json::json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": ids.len().to_string(),
            "retmax": ids.len().to_string(),
            "retstart": "0",
            "idlist": ids,
        }
    })
    .to_string()
}

pub fn esummary_body(entries: &[(&str, &str, &str)]) -> String {
    let mut result = serde_json::Map::new();
    let uids: Vec<&str> = entries.iter().map(|(uid, _, _)| *uid).collect();
    result.insert("uids".to_string(), serde_json::json!(uids));
    for (uid, accession, title) in entries {
        result.insert(
            uid.to_string(),
            serde_json::json!({
                "uid": uid,
                "caption": accession.split('.').next().unwrap_or(accession),
                "accessionversion": accession,
                "title": title,
                "slen": 8,
            }),
        );
    }
    serde_json::json!({ "header": {"type": "esummary"}, "result": result }).to_string()
}

/// Config pointing at a host that is never contacted
pub fn test_eutils_config() -> EutilsConfig {
    EutilsConfig {
        base_url: "https://eutils.test/entrez/eutils".to_string(),
        ..EutilsConfig::default()
    }
}

pub const BLAST_URL: &str = "https://blast.test/Blast.cgi";
