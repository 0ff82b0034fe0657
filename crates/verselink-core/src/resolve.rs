use once_cell::sync::Lazy;
use regex::Regex;

use crate::books::{self, BOOK_ALTERNATION};

/// The three recognized reference shapes, in grammar-priority order.
///
/// `Full` names its book; the other two are elliptical and lean on the
/// carried (book, chapter) context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Full {
        book: &'static str,
        chapter: u32,
        verse: Option<u32>,
        verse_end: Option<u32>,
    },
    ChapterVerse {
        chapter: u32,
        verse: u32,
        verse_end: Option<u32>,
    },
    VerseOnly {
        verse: u32,
        verse_end: Option<u32>,
    },
}

/// A reference with all ellipses filled in, ready for URI construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub book: &'static str,
    pub chapter: u32,
    pub verse: Option<u32>,
    pub verse_end: Option<u32>,
}

/// The (book, chapter) pair carried across lines and pages.
///
/// Once set, a field is only overwritten by a token that supplies a new
/// value; it is never cleared by absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub book: Option<&'static str>,
    pub chapter: Option<u32>,
}

impl Context {
    /// End-of-line write-back: absorb only the fields the line actually set.
    pub fn absorb(&mut self, book: Option<&'static str>, chapter: Option<u32>) {
        if book.is_some() {
            self.book = book;
        }
        if chapter.is_some() {
            self.chapter = chapter;
        }
    }
}

static FULL_RE: Lazy<Regex> = Lazy::new(|| {
    let alt = &*BOOK_ALTERNATION;
    Regex::new(&format!(
        r"^(?P<book>{alt})\s*(?P<chap>\d+)(?::(?P<v1>\d+)(?:-(?P<v2>\d+))?)?$"
    ))
    .expect("full reference pattern must compile")
});

static CHAPVERSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<chap>\d+):(?P<v1>\d+)(?:-(?P<v2>\d+))?$").expect("chapter:verse pattern")
});

static VERSEONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<v1>\d+)(?:-(?P<v2>\d+))?$").expect("verse-only pattern"));

fn req(caps: &regex::Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Absent group → `Some(None)`; present but unparseable → `None`, so the
/// whole token is skipped rather than silently losing its range part.
fn opt(caps: &regex::Captures<'_>, name: &str) -> Option<Option<u32>> {
    match caps.name(name) {
        None => Some(None),
        Some(m) => m.as_str().parse().ok().map(Some),
    }
}

/// Match a noise-stripped token against the three grammars, first match
/// wins. Returns `None` for anything unclassifiable, including a full
/// reference whose abbreviation has no known code — such tokens are skipped
/// without side effect.
pub fn classify(clean: &str) -> Option<Reference> {
    if let Some(caps) = FULL_RE.captures(clean) {
        let book = books::book_code(caps.name("book")?.as_str())?;
        return Some(Reference::Full {
            book,
            chapter: req(&caps, "chap")?,
            verse: opt(&caps, "v1")?,
            verse_end: opt(&caps, "v2")?,
        });
    }

    if let Some(caps) = CHAPVERSE_RE.captures(clean) {
        return Some(Reference::ChapterVerse {
            chapter: req(&caps, "chap")?,
            verse: req(&caps, "v1")?,
            verse_end: opt(&caps, "v2")?,
        });
    }

    if let Some(caps) = VERSEONLY_RE.captures(clean) {
        return Some(Reference::VerseOnly {
            verse: req(&caps, "v1")?,
            verse_end: opt(&caps, "v2")?,
        });
    }

    None
}

/// The positional inheritance gate for bare verse numbers.
///
/// A bare number may inherit context only at the very start of the line or
/// after a list delimiter (`,` or `;`), skipping whitespace. Start-of-line
/// counts because the delimiter of a wrapped list falls at the end of the
/// previous line:
///
/// ```text
/// ... Mt 1:8,
/// 11, 21:6 ...
/// ```
pub fn inherits_context_at(line_text: &str, token_start: usize) -> bool {
    match line_text[..token_start]
        .chars()
        .rev()
        .find(|c| !c.is_whitespace())
    {
        None => true,
        Some(c) => c == ',' || c == ';',
    }
}

/// Resolve one classified token against the line-local context.
///
/// `Full` always rewrites book and chapter. `ChapterVerse` needs a book and
/// rewrites the chapter. `VerseOnly` needs book, chapter, and the positional
/// gate, and never touches context. An unresolvable token returns `None`
/// and leaves the context exactly as it was.
pub fn resolve_token(
    reference: Reference,
    line_text: &str,
    token_start: usize,
    book: &mut Option<&'static str>,
    chapter: &mut Option<u32>,
) -> Option<Resolved> {
    match reference {
        Reference::Full {
            book: code,
            chapter: chap,
            verse,
            verse_end,
        } => {
            *book = Some(code);
            *chapter = Some(chap);
            Some(Resolved {
                book: code,
                chapter: chap,
                verse,
                verse_end,
            })
        }
        Reference::ChapterVerse {
            chapter: chap,
            verse,
            verse_end,
        } => {
            let code = (*book)?;
            *chapter = Some(chap);
            Some(Resolved {
                book: code,
                chapter: chap,
                verse: Some(verse),
                verse_end,
            })
        }
        Reference::VerseOnly { verse, verse_end } => {
            let code = (*book)?;
            let chap = (*chapter)?;
            if !inherits_context_at(line_text, token_start) {
                return None;
            }
            Some(Resolved {
                book: code,
                chapter: chap,
                verse: Some(verse),
                verse_end,
            })
        }
    }
}
