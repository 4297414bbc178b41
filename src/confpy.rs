//! `conf.py` patching: registering the PDF as a pass-through build asset.
//!
//! Step 4 of the embed pipeline. Sphinx copies every file listed in
//! `html_extra_path` verbatim into the build output, which is what lets the
//! generated page's iframe and download links resolve. This module appends
//! the staged PDF's filename to that list, creating the declaration when the
//! project has never needed one — anchored right after `html_static_path`,
//! which every Sphinx project carries.
//!
//! Like the toctree patcher this edits text in place by pattern match, so
//! the operator's formatting and comments survive. Both failure shapes
//! (missing `conf.py`, no usable anchor) are soft: a warning, no edit.

use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

/// `html_extra_path = [ ... ]`, bracket body captured. Dot matches newlines
/// so multi-line list literals work; lazy so the match stops at the first
/// closing bracket.
static EXTRA_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)html_extra_path\s*=\s*\[(.*?)\]").expect("invalid html_extra_path regex")
});

/// Anchor declaration for the created-key case.
static STATIC_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^html_static_path\s*=\s*\[[^\]]*\]").expect("invalid html_static_path regex")
});

/// Result of a conf.py patch attempt. `NoAnchor` and `MissingConf` are soft
/// failures.
#[derive(Debug, PartialEq)]
pub enum ConfOutcome {
    /// Filename appended to the existing `html_extra_path` list.
    Appended,
    /// List already mentions the filename; file untouched.
    AlreadyListed,
    /// `html_extra_path` was absent; created after `html_static_path`.
    Created,
    /// Neither declaration found; file untouched.
    NoAnchor,
    /// `conf.py` itself is absent; step skipped.
    MissingConf,
}

/// Ensure `filename` appears in `html_extra_path`.
///
/// Pure — returns the outcome plus the patched document when an edit is
/// needed. The presence check is coarse substring containment over the list
/// body (so `guide.pdf` is considered present when `my_guide.pdf` is
/// listed); that matches how operators have relied on the tool behaving and
/// keeps re-runs byte-stable.
pub fn patch_extra_assets(content: &str, filename: &str) -> (ConfOutcome, Option<String>) {
    if let Some(caps) = EXTRA_PATH_RE.captures(content) {
        let body = caps.get(1).expect("regex captures the list body");
        if body.as_str().contains(filename) {
            return (ConfOutcome::AlreadyListed, None);
        }
        // Trailing comma is dropped so multi-line literals don't end up
        // with a double comma.
        let existing = body.as_str().trim_end().trim_end_matches(',');
        let new_body = if existing.trim().is_empty() {
            format!("'{filename}'")
        } else {
            format!("{existing}, '{filename}'")
        };
        let mut patched = String::with_capacity(content.len() + filename.len() + 4);
        patched.push_str(&content[..body.start()]);
        patched.push_str(&new_body);
        patched.push_str(&content[body.end()..]);
        return (ConfOutcome::Appended, Some(patched));
    }

    if let Some(anchor) = STATIC_PATH_RE.find(content) {
        // Insert at the start of the line following the anchor.
        let line_end = content[anchor.end()..]
            .find('\n')
            .map(|i| anchor.end() + i + 1)
            .unwrap_or(content.len());
        let mut declaration = String::new();
        if line_end == content.len() && !content.ends_with('\n') {
            declaration.push('\n');
        }
        declaration.push_str(&format!(
            "\n# Extra files to copy to build output\nhtml_extra_path = ['{filename}']\n"
        ));
        let mut patched = String::with_capacity(content.len() + declaration.len());
        patched.push_str(&content[..line_end]);
        patched.push_str(&declaration);
        patched.push_str(&content[line_end..]);
        return (ConfOutcome::Created, Some(patched));
    }

    (ConfOutcome::NoAnchor, None)
}

/// Read `conf.py`, patch it, and write it back. Missing file is a soft skip.
pub fn register_extra_asset(conf: &Path, filename: &str) -> io::Result<ConfOutcome> {
    if !conf.exists() {
        return Ok(ConfOutcome::MissingConf);
    }
    let content = fs::read_to_string(conf)?;
    let (outcome, patched) = patch_extra_assets(&content, filename);
    if let Some(patched) = patched {
        fs::write(conf, patched)?;
    }
    Ok(outcome)
}
