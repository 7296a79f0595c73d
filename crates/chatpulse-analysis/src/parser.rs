//! Raw message file parsing.
//!
//! The export is comma-delimited with a header line and five logical
//! columns: `id, date, text, group, region`. The text column is not reliably
//! quoted, so it is rebuilt from every field between the second and the last
//! two. Bad rows are salvaged, never fatal.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::MessageRecord;

pub const DELIMITER: char = ',';

/// `id, date, text, group, region`.
const EXPECTED_FIELDS: usize = 5;

/// Something the parser had to paper over. Reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// The row had fewer fields than the five logical columns. Body, group
    /// and region were left empty instead of read from the wrong column.
    MalformedRecord { line: usize, fields: usize },
    /// The date did not parse and was replaced with the current time, which
    /// places the message in the current week's bucket.
    TimestampFallback { line: usize, raw: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Non-blank data rows seen (header excluded).
    pub rows: usize,
    pub malformed_rows: usize,
    pub timestamp_fallbacks: usize,
    pub issues: Vec<ParseIssue>,
}

impl ParseReport {
    fn push(&mut self, issue: ParseIssue) {
        match issue {
            ParseIssue::MalformedRecord { .. } => self.malformed_rows += 1,
            ParseIssue::TimestampFallback { .. } => self.timestamp_fallbacks += 1,
        }
        self.issues.push(issue);
    }
}

#[derive(Debug, Clone)]
pub struct ParsedBatch {
    pub records: Vec<MessageRecord>,
    pub report: ParseReport,
}

/// Parse a region's raw export, using the wall clock for timestamp fallback.
#[must_use]
pub fn parse_records(text: &str, region: &str) -> ParsedBatch {
    parse_records_at(text, region, Utc::now())
}

/// Parse a region's raw export with an explicit fallback time.
///
/// The first line is a header and is discarded; blank lines are skipped.
/// Line numbers in the report are 1-based and count the header.
#[must_use]
pub fn parse_records_at(text: &str, region: &str, now: DateTime<Utc>) -> ParsedBatch {
    let mut records = Vec::new();
    let mut report = ParseReport::default();

    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        report.rows += 1;

        let parts: Vec<&str> = line.split(DELIMITER).collect();
        let id = parts.first().map_or("", |s| s.trim()).to_string();
        let raw_date = parts.get(1).copied().unwrap_or_default();

        let timestamp = parse_timestamp(raw_date).unwrap_or_else(|| {
            report.push(ParseIssue::TimestampFallback {
                line: line_no,
                raw: raw_date.trim().to_string(),
            });
            now
        });

        let (body, group, row_region) = if parts.len() >= EXPECTED_FIELDS {
            let n = parts.len();
            (
                unquote(&parts[2..n - 2].join(&DELIMITER.to_string())),
                parts[n - 2].trim().to_string(),
                parts[n - 1].trim().to_string(),
            )
        } else {
            report.push(ParseIssue::MalformedRecord {
                line: line_no,
                fields: parts.len(),
            });
            (String::new(), String::new(), String::new())
        };

        records.push(MessageRecord {
            id,
            timestamp,
            body,
            group,
            region: if row_region.is_empty() {
                region.to_string()
            } else {
                row_region
            },
        });
    }

    ParsedBatch { records, report }
}

/// Parse the date column. Accepts RFC 3339, naive date-times (read as UTC)
/// and bare `YYYY-MM-DD` dates (midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim().trim_matches('"');
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    // Slash dates are month-first when the year comes last.
    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Strip one layer of CSV quoting: outer double quotes and `""` escapes.
fn unquote(field: &str) -> String {
    let trimmed = field.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].replace("\"\"", "\"")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
