//! # pdf-embed
//!
//! A one-shot tool that registers a PDF document into a Sphinx documentation
//! site: it stages the file, generates a viewer page, and wires both into the
//! site's navigation and build configuration.
//!
//! # Architecture: Four-Step Pipeline
//!
//! One invocation runs four file transformations in order:
//!
//! ```text
//! 1. Stage     guide.pdf      →  _static/guide.pdf     (copy, skip if present)
//! 2. Page      title + name   →  my_guide.rst          (RST with embedded viewer)
//! 3. Toctree   my_guide       →  index.rst             (append to first toctree)
//! 4. Conf      'guide.pdf'    →  conf.py               (append to html_extra_path)
//! ```
//!
//! Steps are independent and strictly additive: the patchers insert at one
//! located anchor point and never reorder, rewrite, or delete existing
//! content. There is no rollback; a failure leaves earlier steps' output in
//! place, which is safe because every step is re-runnable.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stage`] | Step 1 — copy the PDF into the static asset directory |
//! | [`page`] | Step 2 — render the RST page with the embedded viewer (Maud HTML) |
//! | [`toctree`] | Step 3 — append the page to the first toctree in `index.rst` |
//! | [`confpy`] | Step 4 — register the PDF in `html_extra_path` in `conf.py` |
//! | [`output`] | CLI output formatting — pure `format_*` functions, testable |
//!
//! # Design Decisions
//!
//! ## Two-Tier Failure Model
//!
//! Steps 1 and 2 are fatal on failure: without the staged PDF and the page
//! there is nothing to wire up, so the process exits 1. Steps 3 and 4 fail
//! soft: a missing toctree or conf.py anchor means the project is laid out
//! unusually, and the right move is to leave the file untouched, print what
//! to add by hand, and still exit 0 for the work that did complete.
//!
//! ## Pattern Editing Over Parsing
//!
//! `index.rst` and `conf.py` are edited as text, located by structural
//! regex, rather than parsed and re-serialized. Parsing would normalize the
//! operator's formatting and drop comments; a single-point insertion
//! guarantees everything else stays byte-identical. The cost is coarser
//! matching — only the first toctree block is considered, and the "already
//! registered" check in `conf.py` is substring containment — both are
//! documented behavior.
//!
//! ## Maud for the Viewer HTML
//!
//! The embedded viewer (buttons, iframe, fallback panel) is rendered with
//! [Maud](https://maud.lambda.xyz/) compile-time templates rather than a
//! format string: malformed HTML is a build error, and attribute
//! interpolation is checked. The fallback script ships as a static asset
//! embedded at compile time.
//!
//! ## No De-duplication
//!
//! Re-running the tool with the same arguments appends a duplicate toctree
//! entry. Sphinx flags duplicates at build time, and silently skipping the
//! insert would hide a double invocation; the behavior is kept and pinned by
//! a regression test.

pub mod confpy;
pub mod output;
pub mod page;
pub mod stage;
pub mod toctree;
