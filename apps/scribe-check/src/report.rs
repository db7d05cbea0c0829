//! Candidate parsing and per-candidate reports.

use anyhow::{Context, Result};
use serde::Serialize;

use scribe_core::{FieldError, PostCandidate};

use crate::config::OutputFormat;

/// One input record: a candidate, or why it could not be read.
pub type Entry = std::result::Result<PostCandidate, String>;

/// Parse a JSON array of candidates, or one JSON object per line.
///
/// A record that does not deserialize becomes an `Err` entry; only input that
/// is not a JSON array at all fails the whole parse.
pub fn parse_candidates(input: &str) -> Result<Vec<Entry>> {
    if input.trim_start().starts_with('[') {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(input).context("Invalid JSON array of post candidates")?;
        return Ok(records
            .into_iter()
            .enumerate()
            .map(|(n, record)| {
                serde_json::from_value(record)
                    .map_err(|e| format!("Invalid post candidate at position {n}: {e}"))
            })
            .collect());
    }

    Ok(input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| format!("Invalid post candidate on line {}: {e}", n + 1))
        })
        .collect())
}

/// Validation outcome of one candidate.
#[derive(Debug, Serialize)]
pub struct Report {
    pub index: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl Report {
    pub fn check(index: usize, entry: Entry) -> Self {
        let (valid, errors, parse_error) = match entry.map(PostCandidate::validate) {
            Ok(Ok(_)) => (true, Vec::new(), None),
            Ok(Err(errors)) => (false, errors.into_inner(), None),
            Err(reason) => (false, Vec::new(), Some(reason)),
        };
        Self {
            index,
            valid,
            errors,
            parse_error,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
            OutputFormat::Text if self.valid => Ok(format!("#{} ok", self.index)),
            OutputFormat::Text if self.parse_error.is_some() => Ok(format!(
                "#{} unreadable: {}",
                self.index,
                self.parse_error.as_deref().unwrap_or_default()
            )),
            OutputFormat::Text => {
                let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
                Ok(format!("#{} invalid: {}", self.index, messages.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORY: &str = "6f1c2a9e-0b7d-4c1e-9f51-3b2a4d5e6f70";
    const USER: &str = "1d2e3f40-5a6b-4c7d-8e9f-a0b1c2d3e4f5";

    #[test]
    fn test_parse_array_and_lines() {
        let array = format!(
            r#"[{{"title":"Hello","body":"World","category_id":"{CATEGORY}","user_id":"{USER}"}}, {{}}]"#
        );
        assert_eq!(parse_candidates(&array).unwrap().len(), 2);

        let lines = "{\"title\":\"a\"}\n\n{\"body\":\"b\"}\n";
        let parsed = parse_candidates(lines).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].as_ref().unwrap().body, "b");
    }

    #[test]
    fn test_bad_line_is_reported_and_rest_still_checked() {
        let input = format!(
            "{{\"title\":\"Hello\",\"body\":\"World\",\"category_id\":\"{CATEGORY}\",\"user_id\":\"{USER}\"}}\n\
             {{\"title\":\"x\",\"category_id\":\"zzz\"}}\n\
             not json\n"
        );
        let reports: Vec<Report> = parse_candidates(&input)
            .unwrap()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Report::check(i, entry))
            .collect();

        assert_eq!(reports.len(), 3);
        assert!(reports[0].valid);
        assert!(!reports[1].valid);
        assert!(reports[1].parse_error.as_deref().unwrap().contains("line 2"));
        assert!(reports[2].parse_error.as_deref().unwrap().contains("line 3"));
        assert!(
            reports[2]
                .render(OutputFormat::Text)
                .unwrap()
                .starts_with("#2 unreadable: Invalid post candidate on line 3")
        );
    }

    #[test]
    fn test_null_fields_are_validated_not_rejected() {
        let parsed = parse_candidates(r#"[{"title": null, "body": "b", "category_id": ""}]"#).unwrap();
        let report = Report::check(0, parsed.into_iter().next().unwrap());

        assert_eq!(
            report.render(OutputFormat::Json).unwrap(),
            r#"{"index":0,"valid":false,"errors":[{"field":"title","kind":"blank"},{"field":"category","kind":"required"},{"field":"user","kind":"required"}]}"#
        );
    }

    #[test]
    fn test_bad_array_element_does_not_drop_others() {
        let parsed = parse_candidates(r#"[{"title": 5}, {}]"#).unwrap();
        assert!(parsed[0].as_ref().unwrap_err().contains("position 0"));
        assert!(parsed[1].is_ok());

        assert!(parse_candidates("[not json").is_err());
    }

    #[test]
    fn test_valid_report_renders() {
        let line = format!(
            r#"{{"title":"Hello","body":"World","category_id":"{CATEGORY}","user_id":"{USER}"}}"#
        );
        let entry = parse_candidates(&line).unwrap().remove(0);
        let report = Report::check(0, entry);

        assert!(report.valid);
        assert_eq!(
            report.render(OutputFormat::Json).unwrap(),
            r#"{"index":0,"valid":true}"#
        );
        assert_eq!(report.render(OutputFormat::Text).unwrap(), "#0 ok");
    }

    #[test]
    fn test_invalid_report_renders_every_error() {
        let report = Report::check(3, Ok(PostCandidate::new("", "body")));

        assert!(!report.valid);
        assert_eq!(
            report.render(OutputFormat::Json).unwrap(),
            r#"{"index":3,"valid":false,"errors":[{"field":"title","kind":"blank"},{"field":"category","kind":"required"},{"field":"user","kind":"required"}]}"#
        );
        assert_eq!(
            report.render(OutputFormat::Text).unwrap(),
            "#3 invalid: title can't be blank, category must exist, user must exist"
        );
    }
}
