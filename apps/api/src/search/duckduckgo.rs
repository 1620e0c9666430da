//! DuckDuckGo HTML search — no API key, regional results, safe search off.

use std::time::Duration;

use async_trait::async_trait;
use html_scraper::{ElementRef, Html, Selector};
use reqwest::Client;
use url::Url;

use super::{SearchBackend, SearchError, SearchErrorKind, SearchSnippet};

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
/// `kp=-2` disables safe search.
const SAFE_SEARCH_OFF: &str = "-2";
const SEARCH_TIMEOUT_SECS: u64 = 20;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; cep-api/0.1)";

#[derive(Clone)]
pub struct DuckDuckGoSearch {
    client: Client,
    region: String,
}

impl DuckDuckGoSearch {
    pub fn new(region: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build()?,
            region: region.into(),
        })
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoSearch {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchSnippet>, SearchError> {
        let resp = self
            .client
            .post(DDG_HTML_URL)
            .form(&[
                ("q", query),
                ("kl", self.region.as_str()),
                ("kp", SAFE_SEARCH_OFF),
            ])
            .send()
            .await
            .map_err(|e| SearchError::new(SearchErrorKind::Network, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::new(
                SearchErrorKind::Status,
                format!("duckduckgo search HTTP {status}"),
            ));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| SearchError::new(SearchErrorKind::Network, e.to_string()))?;

        parse_results(&html, limit)
    }
}

fn selector(css: &'static str) -> Result<Selector, SearchError> {
    Selector::parse(css)
        .map_err(|e| SearchError::new(SearchErrorKind::Parse, format!("bad selector {css}: {e:?}")))
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts organic results from the DuckDuckGo HTML page. Ads are skipped.
pub(crate) fn parse_results(html: &str, limit: usize) -> Result<Vec<SearchSnippet>, SearchError> {
    let doc = Html::parse_document(html);
    let result_sel = selector("div.result")?;
    let title_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut out = Vec::new();
    for result in doc.select(&result_sel) {
        if out.len() >= limit {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(anchor) = result.select(&title_sel).next() else {
            continue;
        };
        let Some(url) = anchor.value().attr("href").and_then(unwrap_redirect) else {
            continue;
        };
        let body = result
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        out.push(SearchSnippet {
            title: element_text(anchor),
            body,
            url,
        });
    }
    Ok(out)
}

/// Result links are wrapped as `//duckduckgo.com/l/?uddg=<target>`; returns the target.
fn unwrap_redirect(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let url = Url::parse(&absolute).ok()?;
    if url.path().starts_with("/l/") {
        return url
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned());
    }
    Some(url.into())
}
