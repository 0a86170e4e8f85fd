//! Article content extraction.
//!
//! Extraction is a two-step job for every article URL:
//!
//! 1. **Fetching**: Download the page with a single GET request
//! 2. **Parsing**: Strip navigation, ads and other boilerplate, keeping the
//!    title and the main body text
//!
//! The [`ContentExtractor`] trait is the seam the pipeline depends on, so the
//! network can be replaced by a deterministic fake in tests.
//!
//! | Implementation | Module | Notes |
//! |----------------|--------|-------|
//! | [`ArticleExtractor`](article::ArticleExtractor) | [`article`] | reqwest + scraper, paragraph-density heuristic |

use crate::errors::ExtractionError;
use crate::models::ExtractedArticle;

pub mod article;

/// Derives the title and body text of the article at a URL.
pub trait ContentExtractor {
    /// Fetch and parse one article.
    ///
    /// A page that loads but has no recognizable body returns `Ok` with
    /// `body: None`; network and URL errors return `Err`.
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractionError>;
}
