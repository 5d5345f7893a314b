use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::SiteListError;

/// Loads the sites to check from `path`, one URL per line.
///
/// Blank lines and lines starting with `#` are skipped, everything else is
/// trimmed and kept in file order. Nothing is validated here, a malformed
/// URL only fails once the checker tries to build a request for it.
pub fn load_sites<P: AsRef<Path>>(path: P) -> Result<Vec<String>, SiteListError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SiteListError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sites = parse_sites(BufReader::new(file)).map_err(|source| SiteListError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), count = sites.len(), "loaded site list");
    Ok(sites)
}

/// Same scan as [`load_sites`] over any reader. Bytes that are not valid
/// UTF-8 are replaced rather than rejected, so a stray Latin-1 comment does
/// not sink the whole list.
pub fn parse_sites<R: BufRead>(mut reader: R) -> Result<Vec<String>, io::Error> {
    let mut sites = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        sites.push(line.to_string());
    }

    Ok(sites)
}
