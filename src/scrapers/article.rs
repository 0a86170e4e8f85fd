//! Generic news article scraper.
//!
//! Unlike a per-site scraper this module knows nothing about the page
//! layout. It picks the element whose direct `<p>` children carry the most
//! text (the "top node") and treats those paragraphs as the article body.
//! Paragraphs inside navigation, headers, footers, asides, forms and
//! comment sections never count.

use crate::errors::ExtractionError;
use crate::models::ExtractedArticle;
use crate::scrapers::ContentExtractor;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static OG_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Paragraphs shorter than this are captions, bylines or buttons.
const MIN_PARAGRAPH_CHARS: usize = 25;

const BOILERPLATE_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "form", "script", "style", "noscript",
];

/// Matched against the start of each `-`/`_` separated segment of a class or id.
const BOILERPLATE_MARKERS: &[&str] = &["comment", "sidebar", "footer", "nav"];

const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " » "];

/// Fetches article pages over HTTP and parses them with [`parse_article`].
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    client: Client,
}

impl ArticleExtractor {
    /// Build an extractor whose requests carry `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl ContentExtractor for ArticleExtractor {
    #[instrument(level = "info", skip_all, fields(url = %url))]
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractionError> {
        let parsed = Url::parse(url).map_err(|source| ExtractionError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = self
            .client
            .get(parsed)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let article = parse_article(&html);
        info!(
            bytes = html.len(),
            has_title = article.title.is_some(),
            body_chars = article.body.as_deref().map_or(0, |b| b.chars().count()),
            "Parsed article"
        );
        Ok(article)
    }
}

/// Derive title and body from a full HTML document.
pub fn parse_article(html: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);
    ExtractedArticle::new(extract_title(&document), extract_body(&document))
}

fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn extract_title(document: &Html) -> Option<String> {
    let og_title = document
        .select(&OG_TITLE_SELECTOR)
        .filter_map(|meta| meta.value().attr("content"))
        .map(collapse_whitespace)
        .find(|t| !t.is_empty());
    if og_title.is_some() {
        return og_title;
    }

    let page_title = document
        .select(&TITLE_SELECTOR)
        .map(|t| strip_site_name(&element_text(t)))
        .find(|t| !t.is_empty());
    if page_title.is_some() {
        return page_title;
    }

    document
        .select(&H1_SELECTOR)
        .map(element_text)
        .find(|t| !t.is_empty())
}

/// `"Storm hits coast | Daily Planet"` -> `"Storm hits coast"`.
///
/// Only the first separator present is considered; the longest segment wins
/// and earlier segments win ties.
fn strip_site_name(title: &str) -> String {
    let Some(sep) = TITLE_SEPARATORS.iter().find(|sep| title.contains(**sep)) else {
        return title.to_string();
    };
    let mut best = "";
    for part in title.split(sep).map(str::trim) {
        if part.chars().count() > best.chars().count() {
            best = part;
        }
    }
    best.to_string()
}

fn marks_boilerplate(attr: &str) -> bool {
    attr.split_whitespace()
        .flat_map(|token| token.split(['-', '_']))
        .any(|segment| {
            let segment = segment.to_ascii_lowercase();
            BOILERPLATE_MARKERS.iter().any(|m| segment.starts_with(m))
        })
}

fn in_boilerplate(paragraph: &ElementRef) -> bool {
    paragraph
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| {
            let el = ancestor.value();
            if matches!(el.name(), "html" | "body") {
                return false;
            }
            BOILERPLATE_TAGS.contains(&el.name())
                || [el.attr("class"), el.attr("id")]
                    .into_iter()
                    .flatten()
                    .any(marks_boilerplate)
        })
}

fn extract_body(document: &Html) -> Option<String> {
    let paragraphs: Vec<_> = document
        .select(&PARAGRAPH_SELECTOR)
        .filter(|p| !in_boilerplate(p))
        .filter_map(|p| {
            let text = element_text(p);
            let parent = p.parent()?.id();
            (text.chars().count() >= MIN_PARAGRAPH_CHARS).then_some((parent, text))
        })
        .collect();

    // (index of the parent's first paragraph, score), in document order so
    // ties go to the earlier node.
    let mut scores: Vec<(usize, usize)> = Vec::new();
    for (i, (parent, text)) in paragraphs.iter().enumerate() {
        let len = text.chars().count();
        match scores
            .iter_mut()
            .find(|(first, _)| paragraphs[*first].0 == *parent)
        {
            Some((_, score)) => *score += len,
            None => scores.push((i, len)),
        }
    }
    let best_score = scores.iter().map(|(_, score)| *score).max()?;
    let (first, _) = scores.iter().find(|(_, score)| *score == best_score)?;
    let top_node = paragraphs[*first].0;
    debug!(
        candidates = scores.len(),
        best_score, "Selected article top node"
    );

    let body = paragraphs
        .iter()
        .filter(|(parent, _)| *parent == top_node)
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::response::Html as HtmlResponse;
    use axum::routing::get;

    const ARTICLE_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
  <title>Monsoon arrives early in Kerala | Daily Planet</title>
</head>
<body class="nav-open">
  <header><p>Subscribe today to get unlimited access to every story we publish.</p></header>
  <nav><p>Home World Politics Business Science Sports Opinion Weather</p></nav>
  <div class="story">
    <h1>Monsoon arrives early</h1>
    <p>The southwest monsoon reached the Kerala coast three days ahead of schedule.</p>
    <p>Forecasters expect   above-normal rainfall
       across the peninsula this season.</p>
    <p>Photo: AP</p>
  </div>
  <div class="comments-section">
    <p>This is the best weather coverage I have read all year, thank you so much!</p>
    <p>Completely agree with the previous commenter, great work from the team.</p>
    <p>Another long reader comment that should never become part of the body.</p>
  </div>
  <footer><p>Copyright Daily Planet Media Group. All rights reserved worldwide.</p></footer>
</body>
</html>
"#;

    #[test]
    fn test_parse_article_picks_story_paragraphs() {
        let article = parse_article(ARTICLE_PAGE);

        assert_eq!(article.title.as_deref(), Some("Monsoon arrives early in Kerala"));
        assert_eq!(
            article.body.as_deref(),
            Some(
                "The southwest monsoon reached the Kerala coast three days ahead of schedule.\n\n\
                 Forecasters expect above-normal rainfall across the peninsula this season."
            )
        );
    }

    #[test]
    fn test_og_title_preferred() {
        let html = r#"<html><head>
            <meta property="og:title" content="  Rates held steady  ">
            <title>Something else | Site</title>
            </head><body></body></html>"#;
        let article = parse_article(html);
        assert_eq!(article.title.as_deref(), Some("Rates held steady"));
        assert!(article.body.is_none());
    }

    #[test]
    fn test_h1_fallback_title() {
        let html = "<html><body><h1>Only a headline</h1><p>short</p></body></html>";
        let article = parse_article(html);
        assert_eq!(article.title.as_deref(), Some("Only a headline"));
        assert!(article.body.is_none());
    }

    #[test]
    fn test_no_title_no_body() {
        assert_eq!(parse_article("<html><body></body></html>"), ExtractedArticle::failed());
        assert_eq!(parse_article("not html at all"), ExtractedArticle::failed());
    }

    #[test]
    fn test_strip_site_name() {
        assert_eq!(strip_site_name("Storm hits coast | Daily Planet"), "Storm hits coast");
        assert_eq!(strip_site_name("BBC » Election results are in"), "Election results are in");
        assert_eq!(strip_site_name("No separator here"), "No separator here");
    }

    #[test]
    fn test_marks_boilerplate() {
        assert!(marks_boilerplate("site-footer"));
        assert!(marks_boilerplate("main navbar"));
        assert!(marks_boilerplate("user_comments"));
        assert!(!marks_boilerplate("article-body"));
        assert!(!marks_boilerplate("unavailable canvas"));
    }

    #[tokio::test]
    async fn test_extract_over_http() {
        let app = Router::new()
            .route("/story", get(|| async { HtmlResponse(ARTICLE_PAGE) }))
            .route("/gone", get(|| async { (StatusCode::NOT_FOUND, "gone") }));
        let base = serve(app).await;
        let extractor = ArticleExtractor::new("news_translate-test").unwrap();

        let article = extractor.extract(&format!("{base}/story")).await.unwrap();
        assert_eq!(article.title.as_deref(), Some("Monsoon arrives early in Kerala"));
        assert!(article.body.is_some());

        let err = extractor.extract(&format!("{base}/gone")).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Http(_)));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let extractor = ArticleExtractor::new("news_translate-test").unwrap();
        let err = extractor.extract("").await.unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUrl { .. }));
    }
}
