//! RST page generation with an embedded PDF viewer.
//!
//! Step 2 of the embed pipeline. Produces a reStructuredText document whose
//! body is a `.. raw:: html` directive wrapping the viewer: download and
//! open-in-new-tab buttons, an iframe sized to 100%×700px, and a script that
//! swaps in a static fallback panel for browsers that refuse inline PDFs.
//!
//! Everything is fixed boilerplate except the title and the staged PDF's
//! relative path, which are substituted verbatim. The title is NOT escaped
//! for RST-significant characters; titles are operator-supplied, not
//! untrusted input.
//!
//! HTML is rendered with [maud](https://maud.lambda.xyz/), same as the rest
//! of the generated markup in this tool — compile-time checked, with the
//! fallback script kept as a static asset and embedded at build time.

use maud::{Markup, PreEscaped, html};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const FALLBACK_JS: &str = include_str!("../static/fallback.js");

const BTN_DOWNLOAD_STYLE: &str = "background-color: #0066cc; color: white; padding: 10px 15px; \
     text-decoration: none; border-radius: 5px; margin-right: 10px;";
const BTN_OPEN_STYLE: &str = "background-color: #28a745; color: white; padding: 10px 15px; \
     text-decoration: none; border-radius: 5px;";

/// Render the embedded viewer's HTML blocks, one `Markup` per block so each
/// lands on its own line under the `.. raw:: html` directive.
fn viewer_blocks(pdf_href: &str, pdf_name: &str) -> Vec<Markup> {
    let script = FALLBACK_JS
        .replace("__PDF_NAME__", pdf_name)
        .replace("__PDF_HREF__", pdf_href);

    vec![
        html! {
            div style="margin-bottom: 20px; text-align: center;" {
                a href=(pdf_href) download style=(BTN_DOWNLOAD_STYLE) { (PreEscaped("&#128196;")) " Download PDF" }
                " "
                a href=(pdf_href) target="_blank" style=(BTN_OPEN_STYLE) { (PreEscaped("&#127760;")) " Open in New Tab" }
            }
        },
        html! {
            div style="width: 100%; height: 700px; border: 1px solid #ccc; margin-bottom: 20px; border-radius: 5px;" {
                iframe src=(pdf_href) width="100%" height="100%" type="application/pdf" style="border-radius: 5px;" {
                    p {
                        "Your browser does not support PDFs. "
                        a href=(pdf_href) { "Download the PDF" }
                        " instead."
                    }
                }
            }
        },
        html! {
            script { (PreEscaped(script)) }
        },
    ]
}

/// Build the full RST document for a page embedding `pdf_filename`.
///
/// Pure — no I/O. The heading underline is sized to the title's character
/// count, per RST section conventions.
pub fn render_page(title: &str, pdf_filename: &str, static_dir: &Path) -> String {
    let pdf_href = format!("{}/{}", static_dir.display(), pdf_filename);
    let underline = "=".repeat(title.chars().count());

    let mut doc = String::new();
    let _ = writeln!(doc, "{title}");
    let _ = writeln!(doc, "{underline}");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "View the complete {title} directly below:");
    let _ = writeln!(doc);
    let _ = writeln!(doc, ".. raw:: html");
    let _ = writeln!(doc);
    for block in viewer_blocks(&pdf_href, pdf_filename) {
        // Every line must carry the directive indentation: an unindented
        // line (the fallback script spans several) would terminate the raw
        // block and dump the rest as body text.
        for line in block.into_string().lines() {
            if line.trim().is_empty() {
                let _ = writeln!(doc);
            } else {
                let _ = writeln!(doc, "   {line}");
            }
        }
        let _ = writeln!(doc);
    }
    doc.push_str(
        "About This Document\n\
         -------------------\n\
         \n\
         This document provides detailed information and technical specifications. \
         Use the buttons above to download or view the PDF in a new tab.\n\
         \n\
         The PDF includes comprehensive documentation with:\n\
         \n\
         * Detailed procedures and instructions\n\
         * Technical specifications\n\
         * Code examples and references\n\
         * Troubleshooting information\n\
         \n\
         For the best viewing experience, click \"Open in New Tab\" to view in a \
         dedicated browser tab, or use \"Download PDF\" to save locally.\n",
    );
    doc
}

/// Write the page to `output`, unconditionally replacing any existing file.
/// Last write wins; synthesis failures are fatal to the pipeline.
pub fn write_page(
    title: &str,
    pdf_filename: &str,
    static_dir: &Path,
    output: &Path,
) -> Result<(), PageError> {
    fs::write(output, render_page(title, pdf_filename, static_dir))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn heading_underline_matches_title_length() {
        let doc = render_page("My Guide", "guide.pdf", Path::new("_static"));
        let mut lines = doc.lines();
        assert_eq!(lines.next(), Some("My Guide"));
        assert_eq!(lines.next(), Some("========"));
    }

    #[test]
    fn references_the_staged_pdf_at_least_twice() {
        let doc = render_page("My Guide", "guide.pdf", Path::new("_static"));
        let refs = doc.matches("_static/guide.pdf").count();
        assert!(refs >= 2, "expected download + open-in-tab references, got {refs}");
    }

    #[test]
    fn raw_html_block_is_indented_under_the_directive() {
        let doc = render_page("T", "guide.pdf", Path::new("_static"));
        assert!(doc.contains(".. raw:: html"));
        assert!(doc.contains("   <div style=\"margin-bottom: 20px"));
        assert!(doc.contains("<iframe"));
        assert!(doc.contains("   <script>"));
    }

    #[test]
    fn every_line_of_the_raw_block_carries_the_directive_indentation() {
        // The multi-line fallback script must be indented on every line;
        // one unindented line ends the directive and Sphinx renders the
        // rest of the script as body text.
        let doc = render_page("T", "guide.pdf", Path::new("_static"));
        let start = doc.find(".. raw:: html").unwrap() + ".. raw:: html".len();
        let end = doc.find("About This Document").unwrap();
        let unindented: Vec<&str> = doc[start..end]
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with("   "))
            .collect();
        assert!(
            unindented.is_empty(),
            "unindented lines inside the raw block: {unindented:?}"
        );
        assert!(doc.contains("   </script>"));
    }

    #[test]
    fn title_is_substituted_verbatim_without_escaping() {
        let doc = render_page("A *raw* <title>", "guide.pdf", Path::new("_static"));
        assert!(doc.starts_with("A *raw* <title>\n"));
    }

    #[test]
    fn fallback_script_targets_this_pdf() {
        let doc = render_page("T", "guide.pdf", Path::new("_static"));
        assert!(doc.contains("iframe[src*=\"guide.pdf\"]"));
        assert!(!doc.contains("__PDF_NAME__"));
        assert!(!doc.contains("__PDF_HREF__"));
    }

    #[test]
    fn write_overwrites_existing_content() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("my_guide.rst");
        fs::write(&out, "stale content").unwrap();

        write_page("My Guide", "guide.pdf", Path::new("_static"), &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("My Guide\n"));
        assert!(!written.contains("stale content"));
    }
}
