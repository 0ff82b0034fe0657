use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

mod output;

use output::{ColorMode, PrintSink};
use verselink_core::{Linker, LinkerConfig};
use verselink_pdf_mupdf::{MupdfLinkSink, MupdfTextSource};

/// Bible Reference Linker - make scripture references in a PDF clickable
///
/// Detected references (e.g. Mt 7:3, Lk 6:14) become links into the
/// ebible.gr manuscript collation interface.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF to annotate
    input: PathBuf,

    /// Output path (defaults to "<input stem>_linked.pdf")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL for generated links
    #[arg(long, default_value = verselink_core::DEFAULT_BASE_URL)]
    base_url: String,

    /// Font-size ratio below which digits count as footnote markers
    #[arg(long, default_value_t = verselink_core::DEFAULT_NOISE_RATIO)]
    noise_ratio: f32,

    /// Margin added around each link rectangle, in page units
    #[arg(long, default_value_t = verselink_core::DEFAULT_RECT_MARGIN)]
    rect_margin: f32,

    /// Resolve and print references without writing an output file
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let color = ColorMode(!cli.no_color);

    let config = LinkerConfig::builder()
        .noise_ratio(cli.noise_ratio)
        .rect_margin(cli.rect_margin)
        .base_url(cli.base_url)
        .build()?;
    let linker = Linker::new(config);

    let source = MupdfTextSource::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;

    if cli.dry_run {
        let mut sink = PrintSink::new(color);
        let stats = linker.run(&source, &mut sink)?;
        output::print_summary(&stats, None, color);
        return Ok(());
    }

    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let mut sink = MupdfLinkSink::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let stats = linker.run(&source, &mut sink)?;
    sink.save(&out_path)
        .with_context(|| format!("failed to save {}", out_path.display()))?;

    output::print_summary(&stats, Some(&out_path), color);
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_linked.pdf"))
}
