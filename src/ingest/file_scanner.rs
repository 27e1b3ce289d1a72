//! file_scanner.rs
//!
//! Expands a user-supplied glob into the files to upload and encodes them.
//!
//! Responsibilities:
//! - `**` matches across directory boundaries
//! - Keep the glob crate's enumeration order (sorted per directory level)
//! - Skip directories; only regular files are uploaded
//! - Wildcards never match a leading dot, so hidden files need an explicit `.`
//! - Read each file whole and base64 it (standard alphabet, padded)

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use glob::MatchOptions;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Files matched by `pattern`, in enumeration order.
///
/// Entries the walker cannot read are logged and skipped, like the
/// unreadable directories they usually are.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let paths = glob::glob_with(pattern, options).map_err(|source| ScanError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => out.push(path),
            Ok(_) => {}
            Err(e) => warn!(path = %e.path().display(), "skipping unreadable entry: {}", e.error()),
        }
    }
    Ok(out)
}

/// Whole file content, base64-encoded for the attachment field.
pub fn encode_file(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path)?;
    Ok(STANDARD.encode(bytes))
}
