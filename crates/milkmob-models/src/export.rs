//! Result export for offline reporting.
//!
//! The in-memory result list can be serialized wholesale to JSON or CSV and
//! parsed back. There is no schema versioning; the export mirrors the
//! current model shapes. JSON carries every field; CSV carries the tabular
//! columns only, so parsing a CSV export restores those columns and leaves
//! the rest at their defaults.

use std::mem;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::facts::{AnalysisFacts, MilkType};
use crate::result::{
    ApprovedVideo, MobAssignment, ProcessingResult, QuarantineReason, QuarantinedVideo,
};

/// CSV export could not be parsed back.
#[derive(Debug, Error)]
#[error("CSV parse error on line {line}: {message}")]
pub struct CsvParseError {
    pub line: usize,
    pub message: String,
}

/// Serialize results to a pretty-printed JSON array.
pub fn to_json(results: &[ProcessingResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Parse results back from a JSON export.
pub fn from_json(json: &str) -> serde_json::Result<Vec<ProcessingResult>> {
    serde_json::from_str(json)
}

const CSV_HEADER: &str =
    "outcome,filename,video_id,confidence,milk_type,mob,milk_mob,reason,details,processed_at";

/// Serialize results to CSV.
///
/// One row per result; columns that do not apply to the outcome are left
/// empty (a quarantined video has no confidence, an approved one no reason).
pub fn to_csv(results: &[ProcessingResult]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for result in results {
        let row = match result {
            ProcessingResult::Approved(a) => [
                "approved".to_string(),
                csv_field(&a.filename),
                csv_field(&a.video_id),
                format!("{:.1}", a.confidence),
                a.milk_type.to_string(),
                csv_field(&a.mob.name),
                csv_field(&a.mob.milk_mob),
                String::new(),
                String::new(),
                a.processed_at.to_rfc3339(),
            ],
            ProcessingResult::Quarantined(q) => [
                "quarantined".to_string(),
                csv_field(&q.filename),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                q.reason.to_string(),
                csv_field(&q.details),
                q.processed_at.to_rfc3339(),
            ],
        };
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Parse results back from a CSV export.
///
/// Restores the tabular columns; fields CSV does not carry (the mob
/// description, the non-milk-type facts) come back as defaults.
pub fn from_csv(csv: &str) -> Result<Vec<ProcessingResult>, CsvParseError> {
    let mut records = parse_csv_records(csv).into_iter();

    let header = records
        .next()
        .ok_or_else(|| parse_error(1, "missing header row"))?;
    if header.join(",") != CSV_HEADER {
        return Err(parse_error(1, "unrecognized header row"));
    }

    let mut results = Vec::new();
    for (index, record) in records.enumerate() {
        let line = index + 2;
        if record.len() != 10 {
            return Err(parse_error(
                line,
                format!("expected 10 fields, found {}", record.len()),
            ));
        }

        let processed_at = DateTime::parse_from_rfc3339(&record[9])
            .map_err(|e| parse_error(line, format!("bad processed_at: {e}")))?
            .with_timezone(&Utc);

        let result = match record[0].as_str() {
            "approved" => {
                let confidence = record[3]
                    .parse()
                    .map_err(|e| parse_error(line, format!("bad confidence: {e}")))?;
                let milk_type = parse_milk_type(&record[4])
                    .ok_or_else(|| parse_error(line, format!("bad milk_type: {}", record[4])))?;
                ProcessingResult::Approved(ApprovedVideo {
                    video_id: record[2].clone(),
                    filename: record[1].clone(),
                    confidence,
                    milk_type,
                    mob: MobAssignment {
                        name: record[5].clone(),
                        description: String::new(),
                        milk_mob: record[6].clone(),
                    },
                    facts: AnalysisFacts {
                        milk_present: true,
                        milk_type,
                        ..AnalysisFacts::default()
                    },
                    processed_at,
                })
            }
            "quarantined" => {
                let reason = parse_quarantine_reason(&record[7])
                    .ok_or_else(|| parse_error(line, format!("bad reason: {}", record[7])))?;
                ProcessingResult::Quarantined(QuarantinedVideo {
                    filename: record[1].clone(),
                    reason,
                    details: record[8].clone(),
                    processed_at,
                })
            }
            other => return Err(parse_error(line, format!("unknown outcome: {other}"))),
        };
        results.push(result);
    }

    Ok(results)
}

fn parse_error(line: usize, message: impl Into<String>) -> CsvParseError {
    CsvParseError {
        line,
        message: message.into(),
    }
}

fn parse_milk_type(value: &str) -> Option<MilkType> {
    match value {
        "chocolate" => Some(MilkType::Chocolate),
        "strawberry" => Some(MilkType::Strawberry),
        "regular" => Some(MilkType::Regular),
        "unknown" => Some(MilkType::Unknown),
        _ => None,
    }
}

fn parse_quarantine_reason(value: &str) -> Option<QuarantineReason> {
    match value {
        "missing_metadata" => Some(QuarantineReason::MissingMetadata),
        "no_campaign_tags" => Some(QuarantineReason::NoCampaignTags),
        "ai_detection_failed" => Some(QuarantineReason::AiDetectionFailed),
        _ => None,
    }
}

/// Split CSV text into records, honoring quoted fields. Quoted fields may
/// contain delimiters, doubled quotes, and newlines.
fn parse_csv_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(mem::take(&mut field)),
                '\n' => {
                    record.push(mem::take(&mut field));
                    records.push(mem::take(&mut record));
                }
                '\r' => {}
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}
