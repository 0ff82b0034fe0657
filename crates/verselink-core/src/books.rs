use std::collections::HashMap;

use once_cell::sync::Lazy;

/// New Testament book abbreviations and their canonical 3-letter codes.
///
/// Several books are cited under two abbreviations in the source text
/// (e.g. both "Mt" and "Mat" for Matthew); both map to the same code.
static BOOK_CODES: &[(&str, &str)] = &[
    ("Mt", "mat"),
    ("Mat", "mat"),
    ("Mk", "mrk"),
    ("Mrk", "mrk"),
    ("Lk", "luk"),
    ("Luk", "luk"),
    ("Jn", "jhn"),
    ("Jhn", "jhn"),
    ("Act", "act"),
    ("Rom", "rom"),
    ("1Co", "1co"),
    ("2Co", "2co"),
    ("Gal", "gal"),
    ("Eph", "eph"),
    ("Php", "php"),
    ("Col", "col"),
    ("1Th", "1th"),
    ("2Th", "2th"),
    ("1Ti", "1ti"),
    ("2Ti", "2ti"),
    ("Tit", "tit"),
    ("Phm", "phm"),
    ("Heb", "heb"),
    ("Jas", "jas"),
    ("1Pe", "1pe"),
    ("2Pe", "2pe"),
    ("1Jn", "1jn"),
    ("2Jn", "2jn"),
    ("3Jn", "3jn"),
    ("Jud", "jud"),
    ("Rev", "rev"),
];

static BOOK_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BOOK_CODES.iter().copied().collect());

/// Regex alternation over all known abbreviations, longest first so that
/// 3-letter forms win over their 2-letter siblings at the same position.
pub(crate) static BOOK_ALTERNATION: Lazy<String> = Lazy::new(|| {
    let mut abbrs: Vec<&str> = BOOK_CODES.iter().map(|(abbr, _)| *abbr).collect();
    abbrs.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    abbrs
        .iter()
        .map(|abbr| regex::escape(abbr))
        .collect::<Vec<_>>()
        .join("|")
});

/// Resolve a book abbreviation to its canonical code.
pub fn book_code(abbr: &str) -> Option<&'static str> {
    BOOK_LOOKUP.get(abbr).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_share_a_code() {
        assert_eq!(book_code("Mt"), Some("mat"));
        assert_eq!(book_code("Mat"), Some("mat"));
        assert_eq!(book_code("Jn"), Some("jhn"));
        assert_eq!(book_code("Jhn"), Some("jhn"));
    }

    #[test]
    fn test_numbered_books() {
        assert_eq!(book_code("1Co"), Some("1co"));
        assert_eq!(book_code("3Jn"), Some("3jn"));
    }

    #[test]
    fn test_unknown_abbreviation() {
        assert_eq!(book_code("Gen"), None);
        assert_eq!(book_code("mt"), None); // case-sensitive
    }

    #[test]
    fn test_alternation_prefers_longer_forms() {
        let alt = &*BOOK_ALTERNATION;
        let three = alt.find("Mat").expect("Mat present");
        let two = alt.find("Mt").expect("Mt present");
        assert!(
            three < two,
            "3-letter forms must precede 2-letter forms: {}",
            alt
        );
    }

    #[test]
    fn test_covers_all_27_books() {
        let codes: std::collections::HashSet<&str> =
            BOOK_CODES.iter().map(|(_, code)| *code).collect();
        assert_eq!(codes.len(), 27);
    }
}
