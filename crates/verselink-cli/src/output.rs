use std::path::Path;

use owo_colors::OwoColorize;

use verselink_core::{BackendError, LinkSink, Rect, RunStats};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Dry-run sink: prints each resolved link instead of annotating.
pub struct PrintSink {
    color: ColorMode,
}

impl PrintSink {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }
}

impl LinkSink for PrintSink {
    fn insert_link(
        &mut self,
        page_index: usize,
        rect: Rect,
        uri: &str,
    ) -> Result<(), BackendError> {
        let location = format!(
            "p.{:<4} ({:7.1},{:7.1})",
            page_index + 1,
            rect.x0,
            rect.y0
        );
        if self.color.enabled() {
            println!("{}  {}", location.dimmed(), uri);
        } else {
            println!("{}  {}", location, uri);
        }
        Ok(())
    }
}

/// Print the end-of-run summary. `out_path` is `None` for dry runs.
pub fn print_summary(stats: &RunStats, out_path: Option<&Path>, color: ColorMode) {
    let headline = format!(
        "Done. Links added: {} ({} pages, {} lines scanned)",
        stats.links_added, stats.pages, stats.lines
    );
    if color.enabled() {
        println!("{}", headline.bold());
    } else {
        println!("{headline}");
    }

    if stats.noise_chars_dropped > 0 {
        let note = format!(
            "(Dropped {} footnote/apparatus characters)",
            stats.noise_chars_dropped
        );
        if color.enabled() {
            println!("{}", note.dimmed());
        } else {
            println!("{note}");
        }
    }

    if let Some(path) = out_path {
        println!("Output: {}", path.display());
    }
}
