use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::summary::{assemble_records, parse_summaries, DocumentSummary};
use crate::bio::fasta::parse_fasta;
use crate::bio::sequence::SequenceRecord;
use crate::core::config::EutilsConfig;
use crate::error::{Result, SeqseekError};
use crate::query::{fetch_params, search_params, summary_params, IdList, QueryParams, SearchRequest};
use crate::transport::{HttpResponse, Transport};

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    esearchresult: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

/// Parse an esearch JSON body into its id list
pub fn parse_search(body: &str) -> Result<IdList> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;

    let result = envelope
        .esearchresult
        .ok_or_else(|| SeqseekError::Parse("esearch response has no 'esearchresult'".to_string()))?;

    if let Some(message) = result.error {
        return Err(SeqseekError::Parse(format!("esearch error: {}", message)));
    }

    if let Some(count) = &result.count {
        debug!(count = %count, returned = result.idlist.len(), "esearch hits");
    }

    Ok(IdList::new(result.idlist))
}

/// Outcome of a search → summary + fetch round
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub request: SearchRequest,
    /// Number of identifiers the search returned before truncation
    pub total_hits: usize,
    /// Identifiers that were summarised and fetched
    pub ids: IdList,
    pub summaries: HashMap<String, DocumentSummary>,
    pub records: Vec<SequenceRecord>,
    /// efetch body as returned
    pub fasta: String,
}

/// Client for the esearch / esummary / efetch utilities
pub struct EutilsClient<T: Transport> {
    transport: T,
    config: EutilsConfig,
}

impl<T: Transport> EutilsClient<T> {
    pub fn new(transport: T, config: EutilsConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &EutilsConfig {
        &self.config
    }

    async fn call(&self, utility: &str, params: QueryParams) -> Result<HttpResponse> {
        let params = self.config.credentials().apply(params);
        let endpoint = self.config.endpoint(utility);

        debug!(utility, params = %params, "E-utilities request");
        self.transport
            .get(&endpoint, &params)
            .await?
            .error_for_status(utility)
    }

    /// Run esearch and return the matching identifiers
    pub async fn search(&self, request: &SearchRequest) -> Result<IdList> {
        request.validate()?;

        let response = self.call("esearch", search_params(request)).await?;
        let ids = parse_search(&response.body)?;

        info!(term = %request.term, db = %request.database, hits = ids.len(), "search complete");
        Ok(ids)
    }

    /// Run esummary for the given identifiers
    pub async fn summaries(
        &self,
        ids: &IdList,
        database: &str,
    ) -> Result<HashMap<String, DocumentSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let response = self.call("esummary", summary_params(ids, database)).await?;
        parse_summaries(&response.body)
    }

    /// Run efetch and return the FASTA text unchanged
    pub async fn fetch_fasta(&self, ids: &IdList, database: &str) -> Result<String> {
        if ids.is_empty() {
            return Ok(String::new());
        }

        let response = self.call("efetch", fetch_params(ids, database)).await?;
        Ok(response.body)
    }

    /// Search, keep the first `display_limit` hits, then summarise and fetch them.
    ///
    /// Zero hits is reported as [`SeqseekError::EmptyResult`].
    pub async fn lookup(&self, request: &SearchRequest) -> Result<LookupResult> {
        let all_ids = self.search(request).await?;
        if all_ids.is_empty() {
            return Err(SeqseekError::EmptyResult(request.term.clone()));
        }

        let ids = all_ids.first(self.config.display_limit.max(1));
        debug!(ids = %ids.joined(), "fetching summaries and sequences");

        let summaries = self.summaries(&ids, &request.database).await?;
        let fasta = self.fetch_fasta(&ids, &request.database).await?;

        let fasta_records = match parse_fasta(&fasta) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "efetch body is not FASTA; records will have no sequence");
                Vec::new()
            }
        };
        let records = assemble_records(&ids, &summaries, &fasta_records);

        Ok(LookupResult {
            request: request.clone(),
            total_hits: all_ids.len(),
            ids,
            summaries,
            records,
            fasta,
        })
    }
}
