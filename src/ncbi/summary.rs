use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::bio::sequence::{FastaRecord, SequenceRecord};
use crate::error::Result;
use crate::query::IdList;

/// Metadata esummary reports for one identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub uid: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub accession_version: Option<String>,
    pub organism: Option<String>,
    pub taxid: Option<u64>,
    pub length: Option<u64>,
}

fn str_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn u64_field(doc: &Value, key: &str) -> Option<u64> {
    match doc.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl DocumentSummary {
    /// Read one entry of the esummary `result` object.
    ///
    /// Field layouts differ between databases (`organism` is a string for
    /// nucleotide and an object for gene), so fields are picked out leniently.
    pub fn from_value(uid: &str, doc: &Value) -> Self {
        let organism = str_field(doc, "organism").or_else(|| {
            doc.get("organism")
                .and_then(|o| o.get("scientificname"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        Self {
            uid: str_field(doc, "uid").unwrap_or_else(|| uid.to_string()),
            title: str_field(doc, "title"),
            caption: str_field(doc, "caption"),
            accession_version: str_field(doc, "accessionversion"),
            organism,
            taxid: u64_field(doc, "taxid"),
            length: u64_field(doc, "slen"),
        }
    }
}

/// Parse an esummary JSON body into per-id summaries
pub fn parse_summaries(body: &str) -> Result<HashMap<String, DocumentSummary>> {
    let json: Value = serde_json::from_str(body)?;

    let Some(result) = json.get("result").and_then(Value::as_object) else {
        warn!(
            error = ?json.get("esummaryresult"),
            "esummary response has no 'result' object; titles unavailable"
        );
        return Ok(HashMap::new());
    };

    Ok(result
        .iter()
        .filter(|(key, doc)| key.as_str() != "uids" && doc.is_object())
        .map(|(key, doc)| (key.clone(), DocumentSummary::from_value(key, doc)))
        .collect())
}

/// Accession with any `.version` suffix removed
fn unversioned(accession: &str) -> &str {
    accession
        .split_once('.')
        .map(|(base, _)| base)
        .unwrap_or(accession)
}

/// Index of the unclaimed FASTA record that belongs to a summary
fn match_record(
    id: &str,
    summary: Option<&DocumentSummary>,
    records: &[FastaRecord],
    claimed: &[bool],
) -> Option<usize> {
    let accession = summary.and_then(|s| s.accession_version.as_deref());

    records.iter().enumerate().position(|(i, rec)| {
        if claimed[i] {
            return false;
        }
        if let Some(acc) = accession {
            if rec.accession == acc || rec.base_accession() == unversioned(acc) {
                return true;
            }
        }
        // Legacy pipe-delimited headers (gi|123|gb|X.1|) carry the uid
        rec.accession.split('|').any(|part| part == id)
    })
}

/// Join summaries and FASTA records into one record per identifier.
///
/// Records are matched by accession first; ids left over take the record at
/// their own position in efetch's output, if nothing claimed it already.
pub fn assemble_records(
    ids: &IdList,
    summaries: &HashMap<String, DocumentSummary>,
    records: &[FastaRecord],
) -> Vec<SequenceRecord> {
    let mut claimed = vec![false; records.len()];

    let mut matched: Vec<Option<usize>> = ids
        .iter()
        .map(|id| {
            let index = match_record(id, summaries.get(id), records, &claimed);
            if let Some(i) = index {
                claimed[i] = true;
            }
            index
        })
        .collect();

    for (i, slot) in matched.iter_mut().enumerate() {
        if slot.is_none() && i < records.len() && !claimed[i] {
            claimed[i] = true;
            *slot = Some(i);
        }
    }

    ids.iter()
        .zip(matched)
        .map(|(id, index)| {
            let summary = summaries.get(id);
            SequenceRecord::new(
                id,
                summary.and_then(|s| s.title.clone()),
                index
                    .map(|i| records[i].residues.clone())
                    .unwrap_or_default(),
            )
        })
        .collect()
}
