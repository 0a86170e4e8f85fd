//! The batch pipeline: read links, extract, summarize, translate, write.
//!
//! Articles are processed strictly one after another, so output rows come
//! out in the same order the links were read. Per-article failures only
//! blank fields of that article's row; reading the store and writing the
//! spreadsheet are the only steps that can fail the run.

use crate::config::LanguageModel;
use crate::errors::PipelineError;
use crate::models::{ArticleReference, EXTRACTION_FAILED, ExtractedArticle, RunReport, SummaryRecord};
use crate::outputs::xlsx;
use crate::scrapers::ContentExtractor;
use crate::source;
use crate::summarizer::Summarizer;
use crate::translate::{ModelLoader, Translator, TranslatorRegistry};
use futures::stream::{self, StreamExt};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct RunSettings<'a> {
    pub database: &'a Path,
    pub table: &'a str,
    pub output: &'a Path,
    /// Summary budget handed to the summarizer.
    pub max_words: usize,
    pub languages: &'a [LanguageModel],
    pub max_translation_length: usize,
}

/// Turns one article reference into one [`SummaryRecord`].
pub struct ArticleProcessor<'a, E, T> {
    pub extractor: &'a E,
    pub summarizer: &'a dyn Summarizer,
    pub registry: &'a TranslatorRegistry<T>,
    pub max_words: usize,
}

impl<E, T> ArticleProcessor<'_, E, T>
where
    E: ContentExtractor,
    T: Translator,
{
    /// Process one article. Never fails: extraction and translation errors
    /// are logged and leave the corresponding fields absent.
    #[instrument(level = "info", skip_all, fields(index = index, url = %reference.link))]
    pub async fn process(&self, index: usize, reference: &ArticleReference) -> SummaryRecord {
        let article = match self.extractor.extract(&reference.link).await {
            Ok(article) => article,
            Err(e) => {
                warn!(error = %e, "Error extracting article");
                ExtractedArticle::failed()
            }
        };

        let Some(body) = article.body.as_deref() else {
            warn!(
                has_title = article.title.is_some(),
                "No article text extracted"
            );
            return SummaryRecord {
                title: article.title,
                summary: EXTRACTION_FAILED.to_string(),
                link: reference.link.clone(),
                translations: self.registry.not_attempted(),
            };
        };

        let summary = self.summarizer.summarize(body, self.max_words);
        debug!(summary_chars = summary.chars().count(), "Summarized article");
        let translations = self.registry.translate_all(&summary).await;

        SummaryRecord {
            title: article.title,
            summary,
            link: reference.link.clone(),
            translations,
        }
    }

    /// Process every reference in order, one at a time.
    #[instrument(level = "info", skip_all, fields(count = references.len()))]
    pub async fn process_all(&self, references: &[ArticleReference]) -> Vec<SummaryRecord> {
        let records: Vec<SummaryRecord> = stream::iter(references.iter().enumerate())
            .then(|(index, reference)| self.process(index, reference))
            .collect()
            .await;
        info!(count = records.len(), "Processed all articles");
        records
    }
}

/// Run the whole batch and write the spreadsheet.
///
/// # Errors
///
/// Returns [`PipelineError`] when the link table cannot be read or the
/// spreadsheet cannot be written. Nothing is written in the first case.
#[instrument(level = "info", skip_all, fields(db = %settings.database.display(), table = %settings.table))]
pub async fn run<E, L>(
    settings: &RunSettings<'_>,
    extractor: &E,
    loader: &L,
    summarizer: &dyn Summarizer,
) -> Result<RunReport, PipelineError>
where
    E: ContentExtractor,
    L: ModelLoader,
{
    let references = source::read_article_links(settings.database, settings.table).await?;

    let registry = TranslatorRegistry::load(
        loader,
        settings.languages,
        settings.max_translation_length,
    )
    .await;
    debug!(?registry, "Translation engines");
    let unavailable: Vec<&str> = registry
        .languages()
        .into_iter()
        .filter(|code| !registry.is_available(code))
        .collect();
    if !unavailable.is_empty() {
        warn!(
            languages = ?unavailable,
            "No translation engine for some languages; their columns will be empty"
        );
    }

    let processor = ArticleProcessor {
        extractor,
        summarizer,
        registry: &registry,
        max_words: settings.max_words,
    };
    let records = processor.process_all(&references).await;

    xlsx::write_workbook(&records, &registry.languages(), settings.output)?;

    Ok(RunReport::from_records(&records))
}
