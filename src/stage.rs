//! PDF staging into the site's static asset directory.
//!
//! Step 1 of the embed pipeline. Sphinx only packages files that live under
//! `html_static_path` (conventionally `_static/`), so the source PDF must be
//! copied there before the generated page can reference it.
//!
//! Staging is idempotent by skipping: if a file with the same name is already
//! present in the static directory it is trusted as-is — no content
//! comparison, no overwrite. Re-pointing a page at a *different* PDF that
//! shares a name requires removing the stale copy first.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("PDF file not found: {0}")]
    NotFound(PathBuf),
    #[error("PDF path has no filename: {0}")]
    NoFilename(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the stager did, for console reporting.
#[derive(Debug, PartialEq)]
pub enum StageOutcome {
    /// Source and destination resolve to the same file.
    AlreadyStaged,
    /// A same-named file already exists in the static directory.
    ExistingKept,
    Copied,
}

/// Result of a successful staging: the asset's basename plus what happened.
#[derive(Debug)]
pub struct StagedAsset {
    /// Basename of the PDF, as referenced from generated pages.
    pub filename: String,
    pub outcome: StageOutcome,
    /// True if the static directory had to be created.
    pub created_dir: bool,
}

/// Ensure a copy of `source` exists under `static_dir`, basename preserved.
///
/// Creates `static_dir` if missing. Never overwrites: if the destination
/// already holds a same-named file (or *is* the source), the copy is skipped.
pub fn stage_pdf(source: &Path, static_dir: &Path) -> Result<StagedAsset, StageError> {
    if !source.exists() {
        return Err(StageError::NotFound(source.to_path_buf()));
    }
    let filename = source
        .file_name()
        .ok_or_else(|| StageError::NoFilename(source.to_path_buf()))?
        .to_string_lossy()
        .into_owned();

    let created_dir = !static_dir.exists();
    if created_dir {
        fs::create_dir_all(static_dir)?;
    }

    let dest = static_dir.join(&filename);

    // Lexical absolute-path comparison, matching how operators invoke the
    // tool (no symlink resolution — the destination may not exist yet).
    if std::path::absolute(source)? == std::path::absolute(&dest)? {
        return Ok(StagedAsset {
            filename,
            outcome: StageOutcome::AlreadyStaged,
            created_dir,
        });
    }

    if dest.exists() {
        return Ok(StagedAsset {
            filename,
            outcome: StageOutcome::ExistingKept,
            created_dir,
        });
    }

    fs::copy(source, &dest)?;
    Ok(StagedAsset {
        filename,
        outcome: StageOutcome::Copied,
        created_dir,
    })
}
