use clap::Parser;
use pdf_embed::{confpy, output, page, stage, toctree};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pdf-embed")]
#[command(about = "Embed a PDF as a viewer page in a Sphinx documentation site")]
#[command(long_about = "\
Embed a PDF as a viewer page in a Sphinx documentation site

Runs four steps against the docs directory you invoke it from:

  1. Stage     copy the PDF into _static/ (skipped if already there)
  2. Page      write an RST page with download/open buttons and an
               inline viewer iframe
  3. Toctree   append the page to the first toctree in index.rst
  4. Conf      register the PDF in html_extra_path in conf.py

Steps 3 and 4 are best-effort: if the expected structure is not found
the file is left untouched, a warning tells you what to add by hand,
and the exit code stays 0. Missing PDFs and page write failures are
fatal.

Example:

  pdf-embed MyGuide.pdf 'My Integration Guide' my_guide.rst")]
#[command(version = version_string())]
struct Cli {
    /// PDF document to embed
    pdf: PathBuf,

    /// Page title
    title: String,

    /// Output RST filename
    output: PathBuf,

    /// Static asset directory the PDF is staged into
    #[arg(long, default_value = "_static")]
    static_dir: PathBuf,

    /// Navigation index whose toctree gains the new page
    #[arg(long, default_value = "index.rst")]
    index: PathBuf,

    /// Sphinx build configuration to register the PDF in
    #[arg(long, default_value = "conf.py")]
    conf: PathBuf,
}

fn main() {
    // Usage errors must exit 1; clap defaults to 2. Help and --version
    // print to stdout and exit 0 as usual.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    output::print_lines(&output::format_invocation(&cli.pdf, &cli.title, &cli.output));

    println!("==> Step 1: Staging PDF into {}", cli.static_dir.display());
    let staged = stage::stage_pdf(&cli.pdf, &cli.static_dir)?;
    output::print_lines(&output::format_stage(&staged, &cli.static_dir));

    println!("==> Step 2: Writing {}", cli.output.display());
    page::write_page(&cli.title, &staged.filename, &cli.static_dir, &cli.output)?;
    output::print_lines(&output::format_page(&cli.output));

    // Steps 3 and 4 fail soft: staging and synthesis already succeeded, and
    // both files are fixable by hand. Warnings only, exit code stays 0.
    println!("==> Step 3: Updating toctree in {}", cli.index.display());
    match toctree::add_toctree_entry(&cli.index, &cli.output) {
        Ok(outcome) => output::print_lines(&output::format_toctree(&outcome, &cli.index)),
        Err(err) => output::print_lines(&output::format_toctree_io_warning(
            &err,
            &cli.index,
            &toctree::toctree_entry(&cli.output),
        )),
    }

    println!("==> Step 4: Updating html_extra_path in {}", cli.conf.display());
    match confpy::register_extra_asset(&cli.conf, &staged.filename) {
        Ok(outcome) => {
            output::print_lines(&output::format_conf(&outcome, &cli.conf, &staged.filename));
        }
        Err(err) => output::print_lines(&output::format_conf_io_warning(
            &err,
            &cli.conf,
            &staged.filename,
        )),
    }

    let staged_path = cli.static_dir.join(&staged.filename);
    output::print_lines(&output::format_summary(
        &cli.output,
        &staged_path,
        &cli.index,
        &cli.conf,
    ));
    Ok(())
}
