//! Web page fetching and main-content extraction.

use rand::Rng;
use scraper::{Html, Selector};
use url::Url;

use crate::config::FetchConfig;
use crate::extract::error::ExtractError;

/// Selectors tried in order when looking for the main article content.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".content",
    "#content",
];

/// Minimum word count for a selector match to be accepted as the article.
const MIN_CONTENT_WORDS: usize = 50;

/// User agents rotated across outbound page fetches.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Fetches web pages and extracts their readable main content.
pub struct PageFetcher {
    client: reqwest::Client,
    max_content_length: usize,
}

impl PageFetcher {
    /// Build a fetcher with a browser-like HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &FetchConfig) -> Result<Self, ExtractError> {
        use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(random_user_agent()) {
            headers.insert(USER_AGENT, ua);
        }
        if let Ok(accept) = HeaderValue::from_str(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ) {
            headers.insert(ACCEPT, accept);
        }
        if let Ok(lang) = HeaderValue::from_str("en-US,en;q=0.5") {
            headers.insert(ACCEPT_LANGUAGE, lang);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ExtractError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            max_content_length: config.max_content_length,
        })
    }

    /// Fetch a URL and return the readable text of its main content.
    ///
    /// # Errors
    /// Returns an error if the request fails, the content type is not
    /// textual, or no readable content can be found.
    pub async fn fetch_article(&self, url: &str) -> Result<String, ExtractError> {
        Url::parse(url)?;

        let response = self.client.get(url).send().await?;

        if let Some(len) = response.content_length() {
            if len > self.max_content_length as u64 {
                return Err(ExtractError::ExtractionFailed(format!(
                    "Content too large: {len} bytes"
                )));
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        if !content_type.contains("text/html") && !content_type.contains("text/plain") {
            return Err(ExtractError::UnsupportedContentType(content_type));
        }

        let html = response.text().await?;
        let text = extract_article(&html);
        if text.is_empty() {
            return Err(ExtractError::NoContent(url.to_string()));
        }
        Ok(text)
    }
}

/// Extract the main readable text from an HTML document.
///
/// Tries the content selector cascade first, falling back to the whole body
/// when no selector yields a plausible article.
pub fn extract_article(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = clean_text(&element.text().collect::<String>());
                if text.split_whitespace().count() >= MIN_CONTENT_WORDS {
                    return text;
                }
            }
        }
    }

    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            return clean_text(&body.text().collect::<String>());
        }
    }

    String::new()
}

/// Normalize whitespace in extracted text.
fn clean_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_space = true;

    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    result.trim_end().to_string()
}

fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello   world \n\t test  "), "Hello world test");
    }

    #[test]
    fn test_extract_prefers_article_element() {
        let filler = "word ".repeat(60);
        let html = format!(
            "<html><body><nav>menu menu</nav><article>{filler}</article></body></html>"
        );
        let text = extract_article(&html);
        assert!(text.starts_with("word word"));
        assert!(!text.contains("menu"));
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = "<html><body><p>Short page without article tags.</p></body></html>";
        assert_eq!(extract_article(html), "Short page without article tags.");
    }

    #[test]
    fn test_random_user_agent_is_browser_like() {
        assert!(random_user_agent().contains("Mozilla"));
    }
}
