//! DuckDuckGo search backend.
//!
//! Queries the HTML endpoint (no API key required) and extracts result
//! links, titles and snippets from the returned markup. DuckDuckGo wraps
//! result URLs in a `/l/?uddg=...` redirect that is resolved here.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::search::{SearchHit, SearchProvider};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; LearnMate/0.1; +https://github.com/learnmate)";

pub struct DuckDuckGoClient {
    client: Client,
    result_link: Regex,
    result_snippet: Regex,
}

impl DuckDuckGoClient {
    pub fn new() -> Result<Self, String> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(DuckDuckGoClient {
            client,
            result_link: Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
                .unwrap(),
            result_snippet: Regex::new(r#"(?s)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#)
                .unwrap(),
        })
    }

    fn parse_results(&self, html: &str, max_results: usize) -> Vec<SearchHit> {
        let mut hits = Vec::new();

        let links: Vec<_> = self.result_link.captures_iter(html).collect();
        for (i, caps) in links.iter().enumerate() {
            if hits.len() == max_results {
                break;
            }

            let href = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let title = clean_fragment(caps.get(2).map(|m| m.as_str()).unwrap_or(""));

            let Some(url) = resolve_result_url(href) else {
                continue;
            };
            if title.is_empty() {
                continue;
            }

            // The snippet for this result sits between this anchor and the
            // next one.
            let start = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let end = links
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(html.len());
            let snippet = self
                .result_snippet
                .captures(&html[start..end])
                .and_then(|c| c.get(1))
                .map(|m| clean_fragment(m.as_str()))
                .unwrap_or_default();

            hits.push(SearchHit { title, url, snippet });
        }

        hits
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, String> {
        let request_url = format!("{}?q={}", SEARCH_ENDPOINT, urlencoding::encode(query));

        log::debug!("[SEARCH] GET {}", request_url);
        let response = self
            .client
            .get(&request_url)
            .send()
            .await
            .map_err(|e| format!("Search request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Search returned error status: {}", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read search response: {}", e))?;

        Ok(self.parse_results(&body, max_results))
    }
}

/// Turn a raw result href into an absolute target URL.
///
/// DuckDuckGo emits either direct links or protocol-relative redirect links
/// of the form `//duckduckgo.com/l/?uddg=<encoded target>&rut=...`.
/// Advertisement links (no `uddg` target) are dropped.
fn resolve_result_url(href: &str) -> Option<String> {
    let href = decode_entities(href);

    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else if href.starts_with("http://") || href.starts_with("https://") {
        href.clone()
    } else {
        return None;
    };

    let parsed = Url::parse(&absolute).ok()?;
    if parsed.path().starts_with("/l/") {
        return parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned());
    }
    Some(absolute)
}

/// Strip inline tags (DuckDuckGo bolds query words with `<b>`), decode the
/// common HTML entities and collapse whitespace.
fn clean_fragment(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last so `&amp;lt;` does not double-decode.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
    <div class="result results_links web-result">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Freact.dev%2Flearn&amp;rut=abc123">React &#8211; <b>Learn</b> React</a>
      </h2>
      <a class="result__snippet" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Freact.dev%2Flearn">The official <b>React</b> tutorial &amp; guide.</a>
    </div>
    <div class="result results_links web-result">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://www.w3schools.com/react/">React Tutorial - W3Schools</a>
      </h2>
      <a class="result__snippet" href="https://www.w3schools.com/react/">Step by step React for beginners.</a>
    </div>
    "#;

    #[test]
    fn test_parse_results() {
        let client = DuckDuckGoClient::new().unwrap();
        let hits = client.parse_results(SAMPLE_HTML, 10);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://react.dev/learn");
        assert!(hits[0].title.contains("Learn React"));
        assert_eq!(hits[0].snippet, "The official React tutorial & guide.");
        assert_eq!(hits[1].url, "https://www.w3schools.com/react/");
        assert_eq!(hits[1].snippet, "Step by step React for beginners.");
    }

    #[test]
    fn test_parse_results_respects_max() {
        let client = DuckDuckGoClient::new().unwrap();
        let hits = client.parse_results(SAMPLE_HTML, 1);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_resolve_redirect_url() {
        let url = resolve_result_url(
            "//duckduckgo.com/l/?uddg=https%3A%2F%2Fdocs.python.org%2F3%2Ftutorial%2F&rut=xyz",
        );
        assert_eq!(url.as_deref(), Some("https://docs.python.org/3/tutorial/"));
    }

    #[test]
    fn test_resolve_direct_url() {
        let url = resolve_result_url("https://www.w3schools.com/react/");
        assert_eq!(url.as_deref(), Some("https://www.w3schools.com/react/"));
    }

    #[test]
    fn test_resolve_rejects_relative_hrefs() {
        assert!(resolve_result_url("/settings").is_none());
        assert!(resolve_result_url("javascript:void(0)").is_none());
    }

    #[test]
    fn test_clean_fragment() {
        assert_eq!(
            clean_fragment("  The <b>official</b>\n docs &amp; guide "),
            "The official docs & guide"
        );
    }
}
