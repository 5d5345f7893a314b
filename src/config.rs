use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const BROWSER_ACCEPT_LANGUAGE: &str = "fr-FR,fr;q=0.9,en-US;q=0.8,en;q=0.7";

/// Settings of a checking run. `Default` is what the command line uses.
#[derive(Clone, Debug)]
pub struct CheckerConfig {
    /// Overall deadline for a single request: connect, send and response.
    pub timeout: Duration,
    /// Sent on the first request and again on every redirect hop.
    pub headers: HeaderMap,
    pub max_redirects: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            timeout: DEFAULT_TIMEOUT,
            headers: browser_headers(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl CheckerConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

/// Headers of a desktop browser preferring French pages.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}
