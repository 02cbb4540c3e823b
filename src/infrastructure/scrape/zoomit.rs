// src/infrastructure/scrape/zoomit.rs
//! Zoomit article scraper.
//!
//! Fetches the [zoomit.ir](https://www.zoomit.ir) archive listing, collects
//! article links, and extracts title / summary / body text from each article
//! page via CSS selectors. Extraction is split into pure `parse_*` functions
//! over HTML strings so it can be tested without the network.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

pub const ARCHIVE_URL: &str = "https://www.zoomit.ir/archive/";

/// Fixed desktop user agent; the site serves a reduced page to unknown
/// clients.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36";

/// Archive pages link far back in time; one run only imports the newest
/// handful.
pub const MAX_ARTICLES: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedArticle {
    pub title: String,
    pub summary: String,
    pub body: String,
    pub source_url: String,
}

/// Extract absolute article URLs from the archive listing markup, newest
/// first, capped at [`MAX_ARTICLES`].
pub fn parse_archive_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("div.scroll-m-16 a[href]").unwrap();

    let mut urls = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Ok(resolved) = base.join(href) {
                let resolved = resolved.to_string();
                if !urls.contains(&resolved) {
                    urls.push(resolved);
                }
            }
        }
        if urls.len() >= MAX_ARTICLES {
            break;
        }
    }
    urls
}

/// Extract one article from its page markup. Returns `None` when the page
/// carries no headline or no paragraph text (landing pages, videos).
pub fn parse_article(html: &str, url: &str) -> Option<ScrapedArticle> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("h1").unwrap();
    let summary_selector = Selector::parse("span.sc-4c41eafb-5.lmthOZ").unwrap();
    let body_selector = Selector::parse("article p").unwrap();

    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|t| !t.is_empty())?;

    let summary = document
        .select(&summary_selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .unwrap_or_default();

    let body = document
        .select(&body_selector)
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if body.is_empty() {
        return None;
    }

    Some(ScrapedArticle {
        title,
        summary,
        body,
        source_url: url.to_string(),
    })
}

/// Fetch the archive page and return the newest article URLs.
pub async fn index_articles(client: &reqwest::Client) -> Result<Vec<String>> {
    let base = Url::parse(ARCHIVE_URL).context("invalid archive url")?;
    let html = client
        .get(ARCHIVE_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let urls = parse_archive_links(&html, &base);
    info!(count = urls.len(), source = ARCHIVE_URL, "indexed article urls");
    debug!(?urls, "archive urls");
    Ok(urls)
}

/// Fetch and parse a single article page.
pub async fn fetch_article(client: &reqwest::Client, url: &str) -> Result<Option<ScrapedArticle>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let article = parse_article(&html, url);
    if article.is_none() {
        warn!(%url, "page produced no article content");
    }
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE_FIXTURE: &str = r#"
        <html><body>
          <div class="scroll-m-16">
            <a href="/tech/first-story">First</a>
            <a href="https://www.zoomit.ir/mobile/second-story">Second</a>
            <a href="/tech/first-story">Duplicate</a>
          </div>
          <div class="sidebar"><a href="/ads/ignored">Ad</a></div>
        </body></html>
    "#;

    const ARTICLE_FIXTURE: &str = r#"
        <html><body>
          <h1> Galaxy Review </h1>
          <span class="sc-4c41eafb-5 lmthOZ">Short verdict.</span>
          <article>
            <p>First paragraph.</p>
            <p>Second paragraph.</p>
            <p>   </p>
          </article>
        </body></html>
    "#;

    #[test]
    fn archive_links_are_resolved_and_deduplicated() {
        let base = Url::parse(ARCHIVE_URL).unwrap();
        let urls = parse_archive_links(ARCHIVE_FIXTURE, &base);
        assert_eq!(
            urls,
            vec![
                "https://www.zoomit.ir/tech/first-story".to_string(),
                "https://www.zoomit.ir/mobile/second-story".to_string(),
            ]
        );
    }

    #[test]
    fn article_fields_are_extracted() {
        let article = parse_article(ARTICLE_FIXTURE, "https://www.zoomit.ir/tech/x").unwrap();
        assert_eq!(article.title, "Galaxy Review");
        assert_eq!(article.summary, "Short verdict.");
        assert_eq!(article.body, "First paragraph.\nSecond paragraph.");
        assert_eq!(article.source_url, "https://www.zoomit.ir/tech/x");
    }

    #[test]
    fn pages_without_headline_or_body_are_skipped() {
        assert!(parse_article("<html><body><p>x</p></body></html>", "u").is_none());
        assert!(parse_article("<html><body><h1>t</h1></body></html>", "u").is_none());
    }
}
