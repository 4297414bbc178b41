//! CLI output formatting for the embed pipeline.
//!
//! Each step has a `format_*` function returning `Vec<String>` so the exact
//! console text is testable; `print_lines` is the only thing that touches
//! stdout. Soft failures are prefixed `Warning:` and always come with the
//! manual remediation the operator would otherwise have to work out.

use crate::confpy::ConfOutcome;
use crate::stage::{StageOutcome, StagedAsset};
use crate::toctree::TocOutcome;
use std::path::Path;

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Echo the invocation inputs before any work happens.
pub fn format_invocation(pdf: &Path, title: &str, output: &Path) -> Vec<String> {
    vec![
        "Creating embedded PDF documentation:".to_string(),
        format!("  PDF file:    {}", pdf.display()),
        format!("  Title:       {title}"),
        format!("  Output file: {}", output.display()),
        "-".repeat(50),
    ]
}

pub fn format_stage(staged: &StagedAsset, static_dir: &Path) -> Vec<String> {
    let dest = static_dir.join(&staged.filename);
    let mut lines = Vec::new();
    if staged.created_dir {
        lines.push(format!("Created directory {}", static_dir.display()));
    }
    lines.push(match staged.outcome {
        StageOutcome::AlreadyStaged | StageOutcome::ExistingKept => {
            format!("PDF already staged at {}", dest.display())
        }
        StageOutcome::Copied => format!("Copied PDF to {}", dest.display()),
    });
    lines
}

pub fn format_page(output: &Path) -> Vec<String> {
    vec![format!(
        "Created {} with embedded PDF viewer",
        output.display()
    )]
}

pub fn format_toctree(outcome: &TocOutcome, index: &Path) -> Vec<String> {
    match outcome {
        TocOutcome::Added { entry } => {
            vec![format!("Added '{entry}' to toctree in {}", index.display())]
        }
        TocOutcome::NoToctree { entry } => vec![
            format!(
                "Warning: no toctree found in {}, left unmodified",
                index.display()
            ),
            format!("Please add '{entry}' to your toctree manually"),
        ],
    }
}

/// Soft I/O failure while patching the navigation index.
pub fn format_toctree_io_warning(err: &std::io::Error, index: &Path, entry: &str) -> Vec<String> {
    vec![
        format!("Warning: could not update {}: {err}", index.display()),
        format!("Please add '{entry}' to your toctree manually"),
    ]
}

pub fn format_conf(outcome: &ConfOutcome, conf: &Path, filename: &str) -> Vec<String> {
    match outcome {
        ConfOutcome::Appended => vec![format!(
            "Added '{filename}' to html_extra_path in {}",
            conf.display()
        )],
        ConfOutcome::AlreadyListed => vec![format!(
            "'{filename}' already listed in html_extra_path, no change"
        )],
        ConfOutcome::Created => vec![format!(
            "Added html_extra_path with '{filename}' to {}",
            conf.display()
        )],
        ConfOutcome::NoAnchor => vec![
            format!(
                "Warning: no html_extra_path or html_static_path in {}, left unmodified",
                conf.display()
            ),
            format!("Please add '{filename}' to html_extra_path manually"),
        ],
        ConfOutcome::MissingConf => vec![format!(
            "Warning: {} not found, skipping configuration update",
            conf.display()
        )],
    }
}

/// Soft I/O failure while patching the build configuration.
pub fn format_conf_io_warning(err: &std::io::Error, conf: &Path, filename: &str) -> Vec<String> {
    vec![
        format!("Warning: could not update {}: {err}", conf.display()),
        format!("Please add '{filename}' to html_extra_path manually"),
    ]
}

/// Closing report: what was created or updated, and what to do next.
pub fn format_summary(output: &Path, staged_path: &Path, index: &Path, conf: &Path) -> Vec<String> {
    vec![
        "-".repeat(50),
        "PDF documentation created".to_string(),
        "Files created/updated:".to_string(),
        format!("  - {} (RST page with embedded viewer)", output.display()),
        format!("  - {} (staged PDF)", staged_path.display()),
        format!("  - {} (toctree)", index.display()),
        format!("  - {} (html_extra_path)", conf.display()),
        String::new(),
        "Next steps:".to_string(),
        format!("  1. Review the generated page: {}", output.display()),
        "  2. Run 'make html' to rebuild the documentation".to_string(),
        "  3. Check the embedded PDF in your browser".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_reports_directory_creation_and_copy() {
        let staged = StagedAsset {
            filename: "guide.pdf".into(),
            outcome: StageOutcome::Copied,
            created_dir: true,
        };
        let lines = format_stage(&staged, Path::new("_static"));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Created directory _static"));
        assert!(lines[1].contains("Copied PDF"));
    }

    #[test]
    fn skipped_copy_is_reported_as_already_staged() {
        let staged = StagedAsset {
            filename: "guide.pdf".into(),
            outcome: StageOutcome::ExistingKept,
            created_dir: false,
        };
        let lines = format_stage(&staged, Path::new("_static"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("already staged"));
    }

    #[test]
    fn soft_failures_carry_manual_instructions() {
        let toc = format_toctree(
            &TocOutcome::NoToctree {
                entry: "my_guide".into(),
            },
            Path::new("index.rst"),
        );
        assert!(toc[0].starts_with("Warning:"));
        assert!(toc[1].contains("manually"));

        let conf = format_conf(&ConfOutcome::NoAnchor, Path::new("conf.py"), "guide.pdf");
        assert!(conf[0].starts_with("Warning:"));
        assert!(conf[1].contains("manually"));
    }
}
