use crate::Result;
use ohno::{EnrichableExt, IntoAppError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Name cloc gives the totals entry of a report.
pub const SUM_KEY: &str = "SUM";

/// Counts for one language, or for the [`SUM_KEY`] totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    #[serde(rename = "nFiles")]
    pub n_files: u64,
    pub blank: u64,
    pub comment: u64,
    pub code: u64,
}

/// A cloc JSON report with its `header` removed: language name → counts, in the order cloc
/// wrote them (most code first, totals last).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClocReport {
    languages: Vec<(String, LanguageCount)>,
}

impl ClocReport {
    /// Parse the text of a report written by `cloc --json`.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_str(text).into_app_err("malformed cloc report")?;

        let languages = raw
            .into_iter()
            .filter(|(name, _)| name != "header")
            .map(|(name, value)| -> Result<(String, LanguageCount)> {
                let count = LanguageCount::deserialize(value)
                    .into_app_err_with(|| format!("unexpected cloc report layout for '{name}'"))?;
                Ok((name, count))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { languages })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("could not read cloc report '{}'", path.display()))?;
        Self::parse(&text).map_err(|e| e.enrich_with(|| format!("in cloc report '{}'", path.display())))
    }

    #[must_use]
    pub fn language(&self, name: &str) -> Option<&LanguageCount> {
        self.languages.iter().find(|(n, _)| n == name).map(|(_, count)| count)
    }

    /// Per-language counts, excluding the totals entry.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &LanguageCount)> {
        self.languages
            .iter()
            .filter(|(name, _)| name.as_str() != SUM_KEY)
            .map(|(name, count)| (name.as_str(), count))
    }

    /// The totals entry, or zero counts for an empty report.
    #[must_use]
    pub fn total(&self) -> LanguageCount {
        self.language(SUM_KEY).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// The report as stored in the statistics document, in report order.
    pub fn to_value(&self) -> Result<Value> {
        let mut map = Map::with_capacity(self.languages.len());
        for (name, count) in &self.languages {
            let _ = map.insert(name.clone(), serde_json::to_value(count).into_app_err("could not serialize cloc report")?);
        }
        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REPORT: &str = r#"{
        "header": {
            "cloc_url": "github.com/AlDanial/cloc",
            "cloc_version": "2.00",
            "elapsed_seconds": 0.01,
            "n_files": 3,
            "n_lines": 60,
            "files_per_second": 300.0,
            "lines_per_second": 6000.0
        },
        "Rust": { "nFiles": 2, "blank": 5, "comment": 3, "code": 40 },
        "TOML": { "nFiles": 1, "blank": 1, "comment": 0, "code": 11 },
        "SUM": { "blank": 6, "comment": 3, "code": 51, "nFiles": 3 }
    }"#;

    #[test]
    fn test_parse_strips_header() {
        let report = ClocReport::parse(REPORT).unwrap();

        assert!(report.language("header").is_none());
        assert_eq!(report.languages().map(|(name, _)| name).collect::<Vec<_>>(), ["Rust", "TOML"]);
        assert_eq!(report.language("TOML").unwrap().code, 11);
        assert_eq!(report.language("Rust").unwrap().code, 40);
        assert_eq!(
            report.total(),
            LanguageCount {
                n_files: 3,
                blank: 6,
                comment: 3,
                code: 51
            }
        );
    }

    #[test]
    fn test_value_keeps_cloc_field_names() {
        let report = ClocReport::parse(REPORT).unwrap();
        let value = report.to_value().unwrap();

        assert_eq!(value["Rust"], json!({ "nFiles": 2, "blank": 5, "comment": 3, "code": 40 }));
        assert!(value.get("header").is_none());
    }

    #[test]
    fn test_report_order_is_kept() {
        let report = ClocReport::parse(
            r#"{
                "header": { "cloc_version": "2.00" },
                "TypeScript": { "nFiles": 9, "blank": 10, "comment": 4, "code": 900 },
                "JSON": { "nFiles": 3, "blank": 0, "comment": 0, "code": 120 },
                "CSS": { "nFiles": 1, "blank": 2, "comment": 0, "code": 30 },
                "SUM": { "nFiles": 13, "blank": 12, "comment": 4, "code": 1050 }
            }"#,
        )
        .unwrap();

        assert_eq!(report.languages().map(|(name, _)| name).collect::<Vec<_>>(), ["TypeScript", "JSON", "CSS"]);

        let value = report.to_value().unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["TypeScript", "JSON", "CSS", "SUM"]);
    }

    #[test]
    fn test_header_only_report_is_empty() {
        let report = ClocReport::parse(r#"{ "header": { "cloc_version": "2.00" } }"#).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.total(), LanguageCount::default());
    }

    #[test]
    fn test_malformed_report_is_an_error() {
        let _ = ClocReport::parse("[1, 2, 3]").unwrap_err();
        let _ = ClocReport::parse(r#"{ "Rust": { "code": "many" } }"#).unwrap_err();
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error_msg = ClocReport::load(&tmp.path().join("absent.json")).unwrap_err().to_string();
        assert!(error_msg.contains("absent.json"));
    }
}
