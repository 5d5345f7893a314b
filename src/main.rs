use std::io;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use checksites::{load_sites, CheckSitesError, CheckerConfig, SiteChecker};

const USAGE: &str = "Usage: ./checksites <fichier.txt>";

/// Check the HTTP status of every site listed in a file
#[derive(Parser, Debug)]
#[command(name = "checksites", version)]
struct Cli {
    /// One URL per line, blank lines and lines starting with # are skipped
    sites_file: PathBuf,
}

fn main() -> Result<(), CheckSitesError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let sites = match load_sites(&cli.sites_file) {
        Ok(sites) => sites,
        Err(e) => {
            println!("Erreur lecture fichier : {}", e);
            return Ok(());
        }
    };

    let checker = SiteChecker::new(CheckerConfig::default())?;
    let stdout = io::stdout();
    let summary = checker.run(&sites, &mut stdout.lock())?;
    debug!(
        checked = summary.checked,
        failed = summary.failed,
        "all sites checked"
    );

    Ok(())
}
