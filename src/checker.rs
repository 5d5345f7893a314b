use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Request, Response};
use reqwest::cookie::Jar;
use reqwest::header::{HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{IntoUrl, StatusCode, Url};
use tracing::{debug, instrument};

use crate::config::CheckerConfig;
use crate::error::CheckError;
use crate::report::Outcome;

const FOLLOWED_REDIRECTS: [StatusCode; 5] = [
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::SEE_OTHER,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub checked: usize,
    pub failed: usize,
}

/// Checks sites one at a time with a single HTTP client.
///
/// The cookie jar lives as long as the checker and is shared by every
/// request it makes: a cookie set by one site is sent to any later site
/// the cookie's domain and path match. Build a new checker for an isolated
/// jar.
///
/// Redirects are followed here rather than by the client so that every hop
/// carries the configured header set, whatever the previous hop looked like.
pub struct SiteChecker {
    client: Client,
    cookies: Arc<Jar>,
    config: CheckerConfig,
}

impl SiteChecker {
    pub fn new(config: CheckerConfig) -> Result<Self, reqwest::Error> {
        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(config.timeout)
            .cookie_provider(Arc::clone(&cookies))
            .redirect(Policy::none())
            .build()?;

        Ok(SiteChecker {
            client,
            cookies,
            config,
        })
    }

    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }

    /// Issues one GET for `site`, following redirects, and returns the
    /// final status code. The response body is never read.
    ///
    /// The configured timeout bounds the whole redirect chain, not each hop.
    #[instrument(skip(self))]
    pub fn check(&self, site: &str) -> Result<u16, CheckError> {
        let deadline = Instant::now() + self.config.timeout;
        let mut request = self
            .request(site, self.config.timeout)
            .map_err(CheckError::InvalidRequest)?;
        let mut redirects = 0;

        loop {
            let response = self
                .client
                .execute(request)
                .map_err(CheckError::Transport)?;

            let next = match redirect_target(&response)? {
                Some(next) => next,
                None => return Ok(response.status().as_u16()),
            };
            drop(response);

            if redirects == self.config.max_redirects {
                return Err(CheckError::TooManyRedirects(redirects));
            }
            redirects += 1;

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(CheckError::Timeout(self.config.timeout));
            }

            debug!(hop = redirects, location = %next, ?remaining, "following redirect");
            request = self
                .request(next, remaining)
                .map_err(CheckError::Transport)?;
        }
    }

    /// Checks every site in order, writing one line per site to `out` and
    /// flushing it before moving on.
    pub fn run<W: Write>(&self, sites: &[String], out: &mut W) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for site in sites {
            let outcome = Outcome::new(site, self.check(site));
            if let Outcome::Failed { error, .. } = &outcome {
                debug!(%site, %error, "check failed");
                summary.failed += 1;
            }

            writeln!(out, "{}", outcome)?;
            out.flush()?;
            summary.checked += 1;
        }

        Ok(summary)
    }

    fn request<U: IntoUrl>(&self, url: U, timeout: Duration) -> reqwest::Result<Request> {
        self.client
            .get(url)
            .headers(self.config.headers.clone())
            .timeout(timeout)
            .build()
    }
}

fn redirect_target(response: &Response) -> Result<Option<Url>, CheckError> {
    if !FOLLOWED_REDIRECTS.contains(&response.status()) {
        return Ok(None);
    }

    match response.headers().get(LOCATION) {
        Some(location) => resolve_location(response.url(), location).map(Some),
        None => Ok(None),
    }
}

fn resolve_location(current: &Url, location: &HeaderValue) -> Result<Url, CheckError> {
    location
        .to_str()
        .ok()
        .and_then(|location| current.join(location).ok())
        .ok_or_else(|| CheckError::InvalidRedirect {
            from: current.to_string(),
            location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
        })
}
