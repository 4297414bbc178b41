//! Toctree patching for the navigation index.
//!
//! Step 3 of the embed pipeline. Sphinx builds its navigation from
//! `.. toctree::` directives; a page that is generated but never listed in
//! one is orphaned. This module appends the new page to the FIRST toctree
//! block of `index.rst`.
//!
//! The index is treated as text, not parsed as RST: the block is located by
//! structural pattern (header line, option lines, indented entry lines) and
//! the new entry is inserted after the last existing entry. Everything else
//! in the document — other toctrees, sections, comments, whitespace — is
//! left byte-for-byte intact. A document without a recognizable toctree is
//! a soft failure: the caller reports a warning and the index is untouched.
//!
//! No de-duplication: appending the same page twice yields two entries.
//! Sphinx warns about duplicate toctree entries at build time, which is the
//! operator's cue to clean up.

use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

/// First toctree block: header line, then `:option:` lines, then entry
/// lines. Entries are indented non-option lines; blank lines may separate
/// the option run from the entries and the entries from each other. An
/// unindented line ends the block.
static TOCTREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(\.\. toctree::[ \t]*\n)((?:[ \t]+:[^\n]*\n)*)((?:(?:[ \t]*\n)*[ \t]+[^\s:][^\n]*\n)*)",
    )
    .expect("invalid toctree regex")
});

/// Result of a toctree patch attempt. `NoToctree` is a soft failure.
#[derive(Debug, PartialEq)]
pub enum TocOutcome {
    Added { entry: String },
    NoToctree { entry: String },
}

/// Toctree entries reference pages by bare identifier, extension stripped.
pub fn toctree_entry(page_file: &Path) -> String {
    page_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| page_file.to_string_lossy().into_owned())
}

/// Indentation of the last non-blank entry line, used for the new sibling.
fn sibling_indent(entries: &str) -> Option<&str> {
    entries
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
}

/// Append `entry` to the first toctree block of `content`.
///
/// Pure — returns the patched document, or `None` when no block matches.
/// Prior entries keep their exact text and order; the insertion is a single
/// new line at the end of the entry run, indented like its siblings (three
/// spaces, preceded by a separating blank line, when the block has none).
pub fn patch_toctree(content: &str, entry: &str) -> Option<String> {
    let caps = TOCTREE_RE.captures(content)?;
    let block = caps.get(0).expect("regex has a full match");
    let entries = caps.get(3).map_or("", |m| m.as_str());

    let mut insertion = String::new();
    match sibling_indent(entries) {
        Some(indent) => insertion.push_str(indent),
        None => {
            // Empty block: RST requires a blank line between the option run
            // and the first entry.
            insertion.push('\n');
            insertion.push_str("   ");
        }
    }
    insertion.push_str(entry);
    insertion.push('\n');

    let mut patched = String::with_capacity(content.len() + insertion.len());
    patched.push_str(&content[..block.end()]);
    patched.push_str(&insertion);
    patched.push_str(&content[block.end()..]);
    Some(patched)
}

/// Read the navigation index, patch it, and write it back.
///
/// I/O errors surface as `Err` but are treated as soft by the caller, same
/// as a missing block — a broken index is fixable by hand and should not
/// undo the staging and synthesis that already succeeded.
pub fn add_toctree_entry(index: &Path, page_file: &Path) -> io::Result<TocOutcome> {
    let entry = toctree_entry(page_file);
    let content = fs::read_to_string(index)?;
    match patch_toctree(&content, &entry) {
        Some(patched) => {
            fs::write(index, patched)?;
            Ok(TocOutcome::Added { entry })
        }
        None => Ok(TocOutcome::NoToctree { entry }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "\
Astra SDK Documentation
=======================

.. toctree::
   :maxdepth: 2
   :caption: Contents:

   introduction
   getting_started

Indices and tables
==================
";

    #[test]
    fn appends_after_the_last_entry() {
        let patched = patch_toctree(INDEX, "my_guide").unwrap();
        let expected = INDEX.replace(
            "   getting_started\n",
            "   getting_started\n   my_guide\n",
        );
        assert_eq!(patched, expected);
    }

    #[test]
    fn prior_content_is_byte_identical() {
        let patched = patch_toctree(INDEX, "my_guide").unwrap();
        let insert_at = patched.find("   my_guide\n").unwrap();
        let mut rest = patched.clone();
        rest.replace_range(insert_at..insert_at + "   my_guide\n".len(), "");
        assert_eq!(rest, INDEX);
    }

    #[test]
    fn entry_count_increases_by_exactly_one() {
        let before = INDEX.lines().filter(|l| l.starts_with("   ") && !l.trim_start().starts_with(':')).count();
        let patched = patch_toctree(INDEX, "my_guide").unwrap();
        let after = patched.lines().filter(|l| l.starts_with("   ") && !l.trim_start().starts_with(':')).count();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn only_the_first_toctree_is_patched() {
        let two_blocks = format!(
            "{INDEX}\n.. toctree::\n   :caption: Appendix:\n\n   appendix_a\n"
        );
        let patched = patch_toctree(&two_blocks, "my_guide").unwrap();
        assert!(patched.contains("   getting_started\n   my_guide\n"));
        assert!(patched.ends_with("   appendix_a\n"));
    }

    #[test]
    fn sibling_indentation_is_respected() {
        let four_space = ".. toctree::\n    :maxdepth: 1\n\n    intro\n";
        let patched = patch_toctree(four_space, "my_guide").unwrap();
        assert!(patched.ends_with("    intro\n    my_guide\n"));
    }

    #[test]
    fn empty_block_gets_blank_line_and_default_indent() {
        let empty = ".. toctree::\n   :maxdepth: 2\n";
        let patched = patch_toctree(empty, "my_guide").unwrap();
        assert_eq!(patched, ".. toctree::\n   :maxdepth: 2\n\n   my_guide\n");
    }

    #[test]
    fn unindented_line_ends_the_block() {
        let doc = ".. toctree::\n\n   intro\n\nPlain paragraph.\n";
        let patched = patch_toctree(doc, "my_guide").unwrap();
        assert_eq!(
            patched,
            ".. toctree::\n\n   intro\n   my_guide\n\nPlain paragraph.\n"
        );
    }

    #[test]
    fn no_toctree_returns_none() {
        assert_eq!(patch_toctree("Just a title\n============\n", "x"), None);
    }

    #[test]
    fn rerun_appends_a_duplicate() {
        // Known gap, kept on purpose: no de-duplication on repeat runs.
        let once = patch_toctree(INDEX, "my_guide").unwrap();
        let twice = patch_toctree(&once, "my_guide").unwrap();
        assert!(twice.contains("   my_guide\n   my_guide\n"));
    }

    #[test]
    fn entry_strips_the_extension() {
        assert_eq!(toctree_entry(Path::new("my_guide.rst")), "my_guide");
        assert_eq!(toctree_entry(Path::new("docs/my_guide.rst")), "my_guide");
        assert_eq!(toctree_entry(Path::new("no_extension")), "no_extension");
    }

    #[test]
    fn file_roundtrip_writes_the_patch() {
        let tmp = tempfile::TempDir::new().unwrap();
        let index = tmp.path().join("index.rst");
        fs::write(&index, INDEX).unwrap();

        let outcome = add_toctree_entry(&index, Path::new("my_guide.rst")).unwrap();

        assert_eq!(
            outcome,
            TocOutcome::Added {
                entry: "my_guide".into()
            }
        );
        assert!(fs::read_to_string(&index)
            .unwrap()
            .contains("   getting_started\n   my_guide\n"));
    }

    #[test]
    fn file_without_block_is_left_unmodified() {
        let tmp = tempfile::TempDir::new().unwrap();
        let index = tmp.path().join("index.rst");
        fs::write(&index, "No navigation here.\n").unwrap();

        let outcome = add_toctree_entry(&index, Path::new("my_guide.rst")).unwrap();

        assert_eq!(
            outcome,
            TocOutcome::NoToctree {
                entry: "my_guide".into()
            }
        );
        assert_eq!(fs::read_to_string(&index).unwrap(), "No navigation here.\n");
    }
}
