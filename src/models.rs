//! Data models for article references and their processed representations.
//!
//! This module defines the core data structures that flow through the pipeline:
//! - [`ArticleReference`]: A URL read from the article store
//! - [`ExtractedArticle`]: Title and body text scraped from that URL
//! - [`SummaryRecord`]: One output row with summary and translations
//! - [`RunReport`]: Counters logged when a run completes
//!
//! Per-field failures are carried as [`FieldOutcome`] instead of bare
//! `Option`s so that "never attempted" and "attempted and failed" stay
//! distinguishable after the fact.

use std::collections::BTreeMap;

/// Summary text recorded for an article whose body could not be extracted.
pub const EXTRACTION_FAILED: &str = "Extraction Failed";

/// A single article URL as stored in the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleReference {
    /// The article URL. A NULL cell is read as the empty string.
    pub link: String,
}

/// Title and main body text derived from an article page.
///
/// Either field may be absent: a page with a `<title>` but no recognizable
/// article body yields `title: Some(..)` and `body: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ExtractedArticle {
    /// Build an article, treating blank strings as absent.
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        Self {
            title: non_blank(title),
            body: non_blank(body),
        }
    }

    /// The result recorded when fetching or parsing the page failed outright.
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Outcome of producing one field of a [`SummaryRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome<T> {
    /// The value was produced.
    Success(T),
    /// Production was attempted and failed for the given reason.
    Failed(String),
    /// Production was skipped because an upstream stage failed.
    NotAttempted,
}

impl<T> FieldOutcome<T> {
    /// The produced value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            FieldOutcome::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FieldOutcome::Success(_))
    }
}

/// One target-language translation of a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Language code, e.g. `"hi"`.
    pub language: String,
    pub outcome: FieldOutcome<String>,
}

/// One output row.
///
/// `translations` holds exactly one entry per configured language, in
/// configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub title: Option<String>,
    pub summary: String,
    pub link: String,
    pub translations: Vec<Translation>,
}

impl SummaryRecord {
    /// The translation outcome for `language`, if that language is configured.
    pub fn translation(&self, language: &str) -> Option<&FieldOutcome<String>> {
        self.translations
            .iter()
            .find(|t| t.language == language)
            .map(|t| &t.outcome)
    }

    /// Whether the body of this article was extracted. Real summaries always
    /// end in an ellipsis, so they never collide with the sentinel.
    pub fn extracted(&self) -> bool {
        self.summary != EXTRACTION_FAILED
    }
}

/// Per-language translation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    pub succeeded: usize,
    pub failed: usize,
}

/// Counters describing a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub rows: usize,
    pub extracted: usize,
    pub extraction_failed: usize,
    pub translations: BTreeMap<String, LanguageTally>,
}

impl RunReport {
    /// Tally a finished set of records.
    pub fn from_records(records: &[SummaryRecord]) -> Self {
        let mut report = RunReport {
            rows: records.len(),
            ..Default::default()
        };
        for record in records {
            if record.extracted() {
                report.extracted += 1;
            } else {
                report.extraction_failed += 1;
            }
            for t in &record.translations {
                let tally = report.translations.entry(t.language.clone()).or_default();
                match t.outcome {
                    FieldOutcome::Success(_) => tally.succeeded += 1,
                    FieldOutcome::Failed(_) => tally.failed += 1,
                    FieldOutcome::NotAttempted => {}
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(summary: &str, hi: FieldOutcome<String>) -> SummaryRecord {
        SummaryRecord {
            title: None,
            summary: summary.to_string(),
            link: "https://example.com/a".to_string(),
            translations: vec![Translation {
                language: "hi".to_string(),
                outcome: hi,
            }],
        }
    }

    #[test]
    fn test_extracted_article_blank_fields_are_absent() {
        let article = ExtractedArticle::new(Some("  ".to_string()), Some("\n\t".to_string()));
        assert_eq!(article, ExtractedArticle::failed());

        let article = ExtractedArticle::new(Some("Title".to_string()), None);
        assert_eq!(article.title.as_deref(), Some("Title"));
        assert!(article.body.is_none());
    }

    #[test]
    fn test_field_outcome_value() {
        let ok: FieldOutcome<String> = FieldOutcome::Success("नमस्ते".to_string());
        assert_eq!(ok.value().map(String::as_str), Some("नमस्ते"));
        assert!(ok.is_success());

        let failed: FieldOutcome<String> = FieldOutcome::Failed("timeout".to_string());
        assert_eq!(failed.value(), None);
        assert!(!FieldOutcome::<String>::NotAttempted.is_success());
    }

    #[test]
    fn test_translation_lookup() {
        let r = record("Summary...", FieldOutcome::Success("x".to_string()));
        assert!(r.translation("hi").is_some_and(FieldOutcome::is_success));
        assert!(r.translation("te").is_none());
    }

    #[test]
    fn test_run_report_counts() {
        let records = vec![
            record("One...", FieldOutcome::Success("ek".to_string())),
            record("Two...", FieldOutcome::Failed("boom".to_string())),
            record(EXTRACTION_FAILED, FieldOutcome::NotAttempted),
        ];
        let report = RunReport::from_records(&records);

        assert_eq!(report.rows, 3);
        assert_eq!(report.extracted, 2);
        assert_eq!(report.extraction_failed, 1);
        assert_eq!(
            report.translations.get("hi"),
            Some(&LanguageTally {
                succeeded: 1,
                failed: 1
            })
        );
    }
}
