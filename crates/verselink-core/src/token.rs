use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::books::BOOK_ALTERNATION;

/// Character class body for superscript digits (¹ ² ³ and ⁰ ⁴–⁹), the glyphs
/// used for footnote and cross-reference markers like `6:14³⁵`.
pub(crate) const SUPERSCRIPT_CLASS: &str = "\u{00B9}\u{00B2}\u{00B3}\u{2070}\u{2074}-\u{2079}";

/// A candidate reference substring found in a normalized line.
#[derive(Debug, Clone)]
pub struct RawToken {
    /// Byte span into the normalized text.
    pub span: Range<usize>,
    /// Char span, index-aligned with [`crate::normalize::NormalizedLine::rects`].
    pub chars: Range<usize>,
    /// Token text with superscript digit runs removed.
    pub clean: String,
}

/// Token finder: three alternatives in priority order, leftmost-first,
/// non-overlapping.
/// 1. book abbreviation + chapter, optional `:verse`, optional `-verse` range
/// 2. chapter:verse with optional range
/// 3. bare number with optional range
/// A trailing superscript run belongs to the raw span (the link rectangle
/// must cover the marker) but never to the classification text. The bare
/// alternative ends in `(?:[…]+|\b)` rather than a plain `\b`: superscript
/// digits are not word characters to the regex crate, so a literal boundary
/// would drop the marker run from the span.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let alt = &*BOOK_ALTERNATION;
    let sup = SUPERSCRIPT_CLASS;
    Regex::new(&format!(
        r"\b(?:{alt})\b\s*\d+(?::\d+(?:-\d+)?)?(?:[{sup}]+)?|\b\d+:\d+(?:-\d+)?(?:[{sup}]+)?|\b\d+(?:-\d+)?(?:[{sup}]+|\b)"
    ))
    .expect("token pattern must compile")
});

static SUPDIG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[{SUPERSCRIPT_CLASS}]+")).expect("superscript pattern"));

/// Remove superscript digit runs from a raw token.
pub(crate) fn strip_superscripts(raw: &str) -> String {
    SUPDIG_RE.replace_all(raw, "").into_owned()
}

/// Scan a normalized line for candidate reference tokens.
pub fn find_tokens(text: &str) -> Vec<RawToken> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let char_start = text[..m.start()].chars().count();
            let char_len = m.as_str().chars().count();
            RawToken {
                span: m.range(),
                chars: char_start..char_start + char_len,
                clean: strip_superscripts(m.as_str()),
            }
        })
        .collect()
}
