use crate::LinkError;
use crate::backend::{LinkSink, TextSource};
use crate::config::LinkerConfig;
use crate::geometry::span_rect;
use crate::link::reference_uri;
use crate::normalize::normalize_line;
use crate::resolve::{Context, classify, resolve_token};
use crate::token::find_tokens;

/// Aggregate counters for one linking pass. `links_added` is the number the
/// caller reports; the rest describe how much text was traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pages: usize,
    pub lines: usize,
    pub tokens: usize,
    pub links_added: usize,
    pub noise_chars_dropped: usize,
}

/// The single-pass traversal: pages → lines → tokens, with the (book,
/// chapter) context threaded through as a fold.
///
/// Ordering is load-bearing. Context learned on one line resolves elliptical
/// references many lines (or pages) later, so pages must be visited in
/// document order, lines in extraction order, and tokens left to right.
/// Links are emitted in token-discovery order, never deduplicated.
pub struct Linker {
    config: LinkerConfig,
}

impl Linker {
    pub fn new(config: LinkerConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        source: &dyn TextSource,
        sink: &mut dyn LinkSink,
    ) -> Result<RunStats, LinkError> {
        let mut ctx = Context::default();
        let mut stats = RunStats::default();

        for page_index in 0..source.page_count()? {
            stats.pages += 1;

            for line_chars in source.page_lines(page_index)? {
                if line_chars.is_empty() {
                    continue;
                }
                stats.lines += 1;

                let normalized = normalize_line(&line_chars, self.config.noise_ratio);
                stats.noise_chars_dropped += normalized.dropped;

                // Line-local context, seeded from the document-wide fold
                let mut book = ctx.book;
                let mut chapter = ctx.chapter;

                for token in find_tokens(&normalized.text) {
                    stats.tokens += 1;

                    let Some(reference) = classify(&token.clean) else {
                        tracing::trace!(token = %token.clean, "token matches no grammar");
                        continue;
                    };
                    let Some(resolved) = resolve_token(
                        reference,
                        &normalized.text,
                        token.span.start,
                        &mut book,
                        &mut chapter,
                    ) else {
                        tracing::trace!(token = %token.clean, "token unresolvable in context");
                        continue;
                    };
                    let Some(rect) =
                        span_rect(&normalized.rects, token.chars.clone(), self.config.rect_margin)
                    else {
                        tracing::trace!(token = %token.clean, "token has no surviving geometry");
                        continue;
                    };

                    let uri = reference_uri(&self.config.base_url, &resolved);
                    sink.insert_link(page_index, rect, &uri)?;
                    stats.links_added += 1;
                    tracing::debug!(page = page_index, token = %token.clean, uri = %uri, "link added");
                }

                ctx.absorb(book, chapter);
            }
        }

        tracing::debug!(
            pages = stats.pages,
            links = stats.links_added,
            "linking pass complete"
        );
        Ok(stats)
    }
}
