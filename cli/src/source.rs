#![deny(missing_docs)]

//! # Document Sources
//!
//! Reads an OpenAPI document from a local path or an `http(s)://` URL.

use std::fs;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Whether `source` should be fetched over HTTP.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Returns the document text behind `source`.
pub fn load(source: &str) -> CliResult<String> {
    if is_remote(source) {
        return fetch(source);
    }
    let path = Path::new(source);
    if !path.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            path
        )));
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(feature = "client")]
fn fetch(url: &str) -> CliResult<String> {
    tracing::debug!(url, "fetching document");
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))
}

#[cfg(not(feature = "client"))]
fn fetch(url: &str) -> CliResult<String> {
    Err(CliError::General(format!(
        "cannot fetch {}: built without the 'client' feature",
        url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/openapi.yaml"));
        assert!(is_remote("http://localhost:8080/openapi.json"));
        assert!(!is_remote("docs/openapi.yaml"));
        assert!(!is_remote("ftp://example.com/openapi.yaml"));
    }

    #[test]
    fn test_load_local_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        fs::write(&path, "openapi: 3.0.0\n").unwrap();
        let content = load(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "openapi: 3.0.0\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = load(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("OpenAPI file not found"));
    }
}
