use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::ExtractError;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Desktop Chrome request headers, minus the user agent.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua", r#""Not)A;Brand";v="8", "Chromium";v="138", "Google Chrome";v="138""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""macOS""#),
    ("sec-fetch-dest", "document"),
];

/// Fetches product pages with a fixed browser-like header set.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(browser_headers())
            .build()?;
        Ok(Self { client })
    }

    /// Issues one GET for `url` and returns the body text.
    ///
    /// Network failures, timeouts and non-2xx statuses all surface as
    /// [`ExtractError::Fetch`]. Nothing is retried.
    pub fn fetch_html(&self, url: &str) -> Result<String, ExtractError> {
        let fetch_err = |source| ExtractError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        debug!(status = %response.status(), url, "page fetched");

        response.text().map_err(fetch_err)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-GB,en;q=0.9,ur-PK;q=0.8,ur;q=0.7,en-US;q=0.6"),
    );
    for &(name, value) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    headers
}
