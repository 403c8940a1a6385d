//! Data-file validation.
//!
//! Checks run against raw JSON values so that missing fields and wrongly
//! typed flags are reported, not silently defaulted. A problem in one file
//! never stops the others from being checked.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::model::{
    MIN_RECOMMENDED_DELAY_SECS, NewsCategory, NewsIcon, news_id_number, parse_news_date,
};
use crate::splice::{RegionSpec, SpliceError, locate};

/// Fields every news record must carry.
pub const NEWS_REQUIRED_FIELDS: [&str; 11] = [
    "id",
    "date",
    "month",
    "day",
    "year",
    "icon",
    "category",
    "title",
    "description",
    "visible",
    "featured",
];

/// Fields every publication record must carry.
pub const PUBLICATION_REQUIRED_FIELDS: [&str; 4] = ["title", "authors", "venue", "year"];

/// Earliest plausible publication year.
pub const MIN_PUBLICATION_YEAR: i64 = 1990;

const MIN_TEMPLATE_KB: f64 = 10.0;
const MAX_TEMPLATE_KB: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// File (and record index) the finding refers to.
    pub source: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Accumulated findings of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn error(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, source.into(), message.into());
    }

    pub fn warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, source.into(), message.into());
    }

    fn push(&mut self, severity: Severity, source: String, message: String) {
        debug!(%severity, %source, %message, "Validation finding");
        self.findings.push(Finding {
            severity,
            source,
            message,
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Runs the checks for each data file into one report.
#[derive(Debug, Clone)]
pub struct Validator {
    current_year: i32,
    regions: Vec<RegionSpec>,
}

impl Validator {
    /// `regions` are the template regions whose markers must be present.
    #[must_use]
    pub fn new(current_year: i32, regions: Vec<RegionSpec>) -> Self {
        Self {
            current_year,
            regions,
        }
    }

    /// Reads and parses a JSON file, recording a finding on failure.
    fn read_json(path: &Path, report: &mut ValidationReport) -> Option<Value> {
        let source = path.display().to_string();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                report.error(source, "file not found");
                return None;
            }
            Err(e) => {
                report.error(source, format!("cannot read file: {e}"));
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                report.error(source, format!("invalid JSON: {e}"));
                None
            }
        }
    }

    /// Returns the array items, or records an error for any other root.
    fn array_items<'v>(
        value: &'v Value,
        source: &str,
        report: &mut ValidationReport,
    ) -> Option<&'v Vec<Value>> {
        if let Value::Array(items) = value {
            Some(items)
        } else {
            report.error(source, "expected a JSON array of records");
            None
        }
    }

    /// Validates the news store file. Returns the number of records seen.
    #[instrument(skip(self, report), fields(path = %path.display()))]
    pub fn check_news_file(&self, path: &Path, report: &mut ValidationReport) -> usize {
        Self::read_json(path, report).map_or(0, |value| {
            self.check_news(&path.display().to_string(), &value, report)
        })
    }

    /// Validates a parsed news store.
    pub fn check_news(&self, source: &str, value: &Value, report: &mut ValidationReport) -> usize {
        let Some(items) = Self::array_items(value, source, report) else {
            return 0;
        };

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            let at = format!("{source}[{i}]");
            let Some(obj) = item.as_object() else {
                report.error(at, "news record is not an object");
                continue;
            };

            for field in NEWS_REQUIRED_FIELDS {
                if !obj.contains_key(field) {
                    report.error(&at, format!("missing required field '{field}'"));
                }
            }

            if let Some(id) = obj.get("id").and_then(Value::as_str) {
                if let Some(first) = seen.insert(id, i) {
                    report.error(&at, format!("duplicate news id '{id}' (first at index {first})"));
                }
                if news_id_number(id).is_none() {
                    report.warning(&at, format!("id '{id}' does not follow the news-NNN format"));
                }
            }

            let date = obj.get("date").and_then(Value::as_str).unwrap_or("");
            if parse_news_date(date).is_err() {
                report.error(&at, format!("invalid date '{date}' (expected YYYY-MM-DD)"));
            }

            for field in ["visible", "featured"] {
                if obj.get(field).is_some_and(|v| !v.is_boolean()) {
                    report.warning(&at, format!("'{field}' should be true/false"));
                }
            }

            if let Some(icon) = obj.get("icon").and_then(Value::as_str) {
                if NewsIcon::from_css_class(icon).is_none() {
                    report.warning(&at, format!("unknown icon '{icon}'"));
                }
            }
            if let Some(category) = obj.get("category").and_then(Value::as_str) {
                if category.parse::<NewsCategory>().is_err() {
                    report.warning(&at, format!("unknown category '{category}'"));
                }
            }
        }
        items.len()
    }

    /// Validates the publication store file. Returns the number of records seen.
    #[instrument(skip(self, report), fields(path = %path.display()))]
    pub fn check_publications_file(&self, path: &Path, report: &mut ValidationReport) -> usize {
        Self::read_json(path, report).map_or(0, |value| {
            self.check_publications(&path.display().to_string(), &value, report)
        })
    }

    /// Validates a parsed publication store.
    pub fn check_publications(
        &self,
        source: &str,
        value: &Value,
        report: &mut ValidationReport,
    ) -> usize {
        let Some(items) = Self::array_items(value, source, report) else {
            return 0;
        };
        let max_year = i64::from(self.current_year) + 2;

        for (i, item) in items.iter().enumerate() {
            let at = format!("{source}[{i}]");
            let Some(obj) = item.as_object() else {
                report.error(at, "publication record is not an object");
                continue;
            };

            for field in PUBLICATION_REQUIRED_FIELDS {
                if !obj.contains_key(field) {
                    report.error(&at, format!("missing required field '{field}'"));
                }
            }

            let title = obj.get("title").and_then(Value::as_str).unwrap_or("");
            if title.trim().is_empty() {
                report.error(&at, "empty title");
            }

            if let Some(year) = obj.get("year") {
                match year.as_i64() {
                    Some(y) if (MIN_PUBLICATION_YEAR..=max_year).contains(&y) => {}
                    _ => report.warning(&at, format!("unusual year value: {year}")),
                }
            }

            if let Some(citations) = obj.get("citations") {
                if !citations.as_i64().is_some_and(|c| c >= 0) {
                    report.warning(&at, format!("invalid citations count: {citations}"));
                }
            }

            for field in ["url", "eprint_url"] {
                let Some(link) = obj.get(field).and_then(Value::as_str) else {
                    continue;
                };
                if !link.trim().is_empty() && Url::parse(link.trim()).is_err() {
                    report.warning(&at, format!("'{field}' is not a valid URL: {link}"));
                }
            }
        }
        items.len()
    }

    /// Validates the scholar-profile config file.
    #[instrument(skip(self, report), fields(path = %path.display()))]
    pub fn check_profile_file(&self, path: &Path, report: &mut ValidationReport) {
        if let Some(value) = Self::read_json(path, report) {
            self.check_profile(&path.display().to_string(), &value, report);
        }
    }

    /// Validates a parsed scholar-profile config.
    pub fn check_profile(&self, source: &str, value: &Value, report: &mut ValidationReport) {
        let Some(obj) = value.as_object() else {
            report.error(source, "expected a JSON object");
            return;
        };
        for field in ["author_name", "affiliation"] {
            let present = obj
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty());
            if !present {
                report.warning(source, format!("missing or empty '{field}'"));
            }
        }
        let delay = obj
            .get("settings")
            .and_then(|s| s.get("delay_between_requests"));
        if delay.is_some_and(|d| !d.as_f64().is_some_and(|d| d >= MIN_RECOMMENDED_DELAY_SECS)) {
            report.warning(
                source,
                format!("delay_between_requests should be >= {MIN_RECOMMENDED_DELAY_SECS} second"),
            );
        }
    }

    /// Validates the template file.
    #[instrument(skip(self, report), fields(path = %path.display()))]
    pub fn check_template_file(&self, path: &Path, report: &mut ValidationReport) {
        let source = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(text) => self.check_template(&source, &text, report),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                report.error(source, "template not found");
            }
            Err(e) => report.error(source, format!("cannot read template: {e}")),
        }
    }

    /// Checks that every region can be located and that the size is sane.
    pub fn check_template(&self, source: &str, text: &str, report: &mut ValidationReport) {
        for region in &self.regions {
            match locate(text, region) {
                Ok(_) => {}
                Err(err @ (SpliceError::MarkerNotFound { .. } | SpliceError::EndMarkerNotFound { .. })) => {
                    report.warning(source, err.to_string());
                }
                Err(err) => report.error(source, err.to_string()),
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let size_kb = text.len() as f64 / 1024.0;
        if size_kb < MIN_TEMPLATE_KB {
            report.warning(source, format!("file seems too small ({size_kb:.1}KB)"));
        } else if size_kb > MAX_TEMPLATE_KB {
            report.warning(source, format!("file seems very large ({size_kb:.1}KB)"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> Validator {
        let region = RegionSpec::new("news", "<!-- N -->", vec!["<!-- N End -->".to_string()]);
        Validator::new(2025, vec![region])
    }

    fn news(id: &str, date: &str) -> Value {
        json!({
            "id": id, "date": date, "month": "Jan", "day": "1", "year": "2025",
            "icon": "fas fa-trophy", "category": "award", "title": "t",
            "description": "d", "visible": true, "featured": false
        })
    }

    #[test]
    fn test_check_news_clean() {
        let mut report = ValidationReport::default();
        let count = validator().check_news("news", &json!([news("news-001", "2025-01-01")]), &mut report);
        assert_eq!(count, 1);
        assert!(report.is_clean(), "{:?}", report.findings);
    }

    #[test]
    fn test_check_news_duplicate_ids_and_bad_date() {
        let mut report = ValidationReport::default();
        let data = json!([news("news-001", "2025-01-01"), news("news-001", "2025-13-01")]);
        validator().check_news("news", &data, &mut report);
        assert_eq!(report.error_count(), 2);
        assert!(report.errors().any(|f| f.message.contains("duplicate news id")));
        assert!(report.errors().any(|f| f.source == "news[1]" && f.message.contains("invalid date")));
    }

    #[test]
    fn test_check_news_lenient_fields_are_warnings() {
        let mut item = news("item-7", "2025-01-01");
        item["visible"] = json!("yes");
        item["icon"] = json!("fas fa-rocket");
        item["category"] = json!("gossip");
        let mut report = ValidationReport::default();
        validator().check_news("news", &json!([item]), &mut report);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 4);
    }

    #[test]
    fn test_check_news_missing_fields() {
        let mut report = ValidationReport::default();
        validator().check_news("news", &json!([{"id": "news-001", "date": "2025-01-01"}]), &mut report);
        assert_eq!(report.error_count(), NEWS_REQUIRED_FIELDS.len() - 2);
    }

    #[test]
    fn test_check_news_non_array_root() {
        let mut report = ValidationReport::default();
        let count = validator().check_news("news", &json!({"id": "news-001"}), &mut report);
        assert_eq!(count, 0);
        assert!(report.has_errors());
    }

    #[test]
    fn test_check_publications_findings() {
        let data = json!([
            {"title": "Ok", "authors": "A", "venue": "V", "year": 2024, "citations": 3,
             "url": "https://example.com/p"},
            {"title": " ", "authors": "A", "venue": "V", "year": 1985, "citations": -1},
            {"title": "Future", "authors": "A", "venue": "V", "year": 2030, "citations": "many",
             "eprint_url": "not a url"},
            {"title": "No venue", "authors": "A", "year": 2027}
        ]);
        let mut report = ValidationReport::default();
        let count = validator().check_publications("pubs", &data, &mut report);

        assert_eq!(count, 4);
        let errors: Vec<String> = report.errors().map(ToString::to_string).collect();
        assert_eq!(errors, vec![
            "pubs[1]: empty title".to_string(),
            "pubs[3]: missing required field 'venue'".to_string(),
        ]);
        assert_eq!(report.warning_count(), 5, "{:?}", report.findings);
    }

    #[test]
    fn test_check_profile() {
        let mut report = ValidationReport::default();
        let profile = json!({"author_name": "A", "affiliation": "", "settings": {"delay_between_requests": 0.5}});
        validator().check_profile("profile", &profile, &mut report);
        assert_eq!(report.warning_count(), 2);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_check_template_markers_and_size() {
        let v = validator();

        let mut report = ValidationReport::default();
        v.check_template("index", "<!-- N -->x<!-- N End -->", &mut report);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1, "small file warning only");

        let mut report = ValidationReport::default();
        v.check_template("index", "no markers", &mut report);
        assert!(report.warnings().any(|f| f.message.contains("not found")));

        let mut report = ValidationReport::default();
        v.check_template("index", "<!-- N --><!-- N --><!-- N End -->", &mut report);
        assert!(report.errors().any(|f| f.message.contains("2 times")));
    }

    #[test]
    fn test_check_file_missing_and_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let v = validator();
        let mut report = ValidationReport::default();

        v.check_news_file(&dir.path().join("news.json"), &mut report);
        let bad = dir.path().join("publications.json");
        std::fs::write(&bad, "[{").unwrap();
        v.check_publications_file(&bad, &mut report);

        assert_eq!(report.error_count(), 2);
        assert!(report.errors().any(|f| f.message == "file not found"));
        assert!(report.errors().any(|f| f.message.starts_with("invalid JSON")));
    }
}
