use std::fmt;

use crate::error::CheckError;
use crate::status::{classify, Classification};

/// What a single site check ended with. Rendered as exactly one line.
#[derive(Debug)]
pub enum Outcome<'a> {
    Status {
        site: &'a str,
        code: u16,
        classification: Classification,
    },
    Failed {
        site: &'a str,
        error: CheckError,
    },
}

impl<'a> Outcome<'a> {
    pub fn new(site: &'a str, result: Result<u16, CheckError>) -> Self {
        match result {
            Ok(code) => Outcome::Status {
                site,
                code,
                classification: classify(code),
            },
            Err(error) => Outcome::Failed { site, error },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Status {
                site,
                code,
                classification,
            } => write!(f, "{} → {} {}", site, code, classification),
            Outcome::Failed { site, error } if error.is_request_construction() => {
                write!(f, "❌ {} → Erreur création requête : {}", site, error)
            }
            Outcome::Failed { site, error } => {
                write!(f, "❌ {} → Erreur de connexion : {}", site, error)
            }
        }
    }
}
