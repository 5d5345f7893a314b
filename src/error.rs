use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to load the list of sites. Always fatal to the run.
#[derive(Debug, Error)]
pub enum SiteListError {
    #[error("open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Failure to check a single site. Reported inline, never fatal.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid redirect location {location:?} from {from}")]
    InvalidRedirect { from: String, location: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("stopped after {0} redirects")]
    TooManyRedirects(usize),
}

impl CheckError {
    /// True when no request could be built for the site at all.
    pub fn is_request_construction(&self) -> bool {
        matches!(self, CheckError::InvalidRequest(_))
    }
}

/// Failure that ends the whole run.
#[derive(Debug, Error)]
pub enum CheckSitesError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
