//! Output filename derivation.
//!
//! Default output names are derived from the target URL (`host_path.xml`
//! and the matching `.csv`), optionally suffixed with the run date.
//! Differential runs avoid clobbering the previous feed by numbering the
//! new files.

use std::path::{Path, PathBuf};

use chrono::Local;
use url::Url;

/// Base output name for a target: hostname plus underscored path, with
/// filesystem-hostile characters replaced.
pub fn default_basename(target: &str) -> String {
    let base = match Url::parse(target) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("").to_string();
            let path = parsed.path().trim_matches('/').replace('/', "_");
            match (host.is_empty(), path.is_empty()) {
                (false, false) => format!("{}_{}", host, path),
                (false, true) => host,
                (true, false) => path,
                (true, true) => "feed".to_string(),
            }
        }
        Err(_) => target.to_string(),
    };

    sanitize(&base)
}

/// Default output filename for a target, optionally date-suffixed.
pub fn default_filename(target: &str, extension: &str, with_date: bool) -> String {
    let base = default_basename(target);
    if with_date {
        format!("{}_{}.{}", base, Local::now().format("%Y%m%d"), extension)
    } else {
        format!("{}.{}", base, extension)
    }
}

/// First non-existing variant of `path`, appending `_1`, `_2`, … to the
/// file stem as needed.
pub fn next_available(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let mut counter = 1;
    loop {
        let name = if extension.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, extension)
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Appends the target's hostname to an explicit output path, so a
/// multi-target run with a user-supplied filename still writes one file
/// per target.
pub fn host_suffixed(path: &Path, target: &str) -> PathBuf {
    let host = Url::parse(target)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.replace('.', "_")))
        .unwrap_or_else(|| "target".to_string());

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let name = match path.extension().and_then(|s| s.to_str()) {
        Some(extension) => format!("{}_{}.{}", stem, host, extension),
        None => format!("{}_{}", stem, host),
    };
    path.with_file_name(name)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect()
}
