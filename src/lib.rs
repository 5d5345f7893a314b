//! Reachability and HTTP status check for a list of websites.
//!
//! [`sites::load_sites`] reads the list, [`checker::SiteChecker`] requests
//! every site in turn and prints one classified line per site.

pub mod checker;
pub mod config;
pub mod error;
pub mod report;
pub mod sites;
pub mod status;

#[cfg(test)]
mod test_server;

pub use checker::{RunSummary, SiteChecker};
pub use config::CheckerConfig;
pub use error::{CheckError, CheckSitesError, SiteListError};
pub use sites::load_sites;
pub use status::{classify, Classification};
