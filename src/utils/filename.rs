//! Output file naming

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Stem used when nothing of the show name survives sanitizing
const FALLBACK_STEM: &str = "show";

fn invalid_chars() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r"[^-A-Za-z0-9_.]").expect("static regex"))
}

/// Turn a show name into a file stem
///
/// Spaces become underscores; everything else outside ASCII letters, digits,
/// `_`, `-` and `.` is dropped, umlauts included.
pub fn sanitize_show_name(show_name: &str) -> String {
    let name = show_name.trim().replace(' ', "_");
    let name = invalid_chars().replace_all(&name, "").to_string();

    if name.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        name
    }
}

/// First free `<stem>.<ext>`, `<stem>-1.<ext>`, `<stem>-2.<ext>`, ... in `dir`
pub fn unique_output_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", stem, extension));
    let mut counter = 0u32;

    while candidate.exists() {
        counter += 1;
        candidate = dir.join(format!("{}-{}.{}", stem, counter, extension));
    }

    candidate
}
