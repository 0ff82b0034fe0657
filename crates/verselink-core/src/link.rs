use crate::resolve::Resolved;

/// Build the canonical URI for a resolved reference.
///
/// Three shapes, and only these three:
/// - `{base}/{book}.{chapter}` — chapter-level link
/// - `{base}/{book}.{chapter}.{verse}` — single verse
/// - `{base}/{book}.{chapter}.{verse}-{verse_end}` — verse range
pub fn reference_uri(base: &str, resolved: &Resolved) -> String {
    match (resolved.verse, resolved.verse_end) {
        (None, _) => format!("{}/{}.{}", base, resolved.book, resolved.chapter),
        (Some(verse), None) => {
            format!("{}/{}.{}.{}", base, resolved.book, resolved.chapter, verse)
        }
        (Some(verse), Some(verse_end)) => format!(
            "{}/{}.{}.{}-{}",
            base, resolved.book, resolved.chapter, verse, verse_end
        ),
    }
}
