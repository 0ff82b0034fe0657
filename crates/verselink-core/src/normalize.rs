use crate::{CharRecord, Rect};

/// A line's text after noise removal, with an index-aligned rectangle per
/// surviving character.
#[derive(Debug, Clone)]
pub struct NormalizedLine {
    pub text: String,
    /// `rects[i]` is the source rectangle of the i-th *char* of `text`.
    pub rects: Vec<Rect>,
    /// Median font size of the line's non-whitespace characters, 0.0 if none.
    pub base_size: f32,
    /// Characters removed as typographic noise.
    pub dropped: usize,
}

/// Build the matchable text of one line from its character records.
///
/// Two kinds of noise are removed, and nothing else:
/// - `[` and `]` unconditionally — critical-apparatus witness sigla like
///   `[05]` must never reach the matcher, whatever their font size
/// - decimal digits rendered strictly below `noise_ratio` × the line's
///   baseline size — superscript footnote / cross-reference markers
///
/// With no non-whitespace characters the baseline is 0.0 and every digit is
/// kept regardless of size.
pub fn normalize_line(chars: &[CharRecord], noise_ratio: f32) -> NormalizedLine {
    let sizes: Vec<f32> = chars
        .iter()
        .filter(|record| !record.ch.is_whitespace() && record.size > 0.0)
        .map(|record| record.size)
        .collect();
    let base_size = median(sizes);

    let mut text = String::new();
    let mut rects = Vec::new();
    let mut dropped = 0usize;

    for record in chars {
        if record.ch == '[' || record.ch == ']' {
            dropped += 1;
            continue;
        }

        let is_small = base_size > 0.0 && record.size < noise_ratio * base_size;
        if is_small && record.ch.is_ascii_digit() {
            dropped += 1;
            continue;
        }

        text.push(record.ch);
        rects.push(record.rect);
    }

    NormalizedLine {
        text,
        rects,
        base_size,
        dropped,
    }
}

fn median(mut sizes: Vec<f32>) -> f32 {
    if sizes.is_empty() {
        return 0.0;
    }
    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sizes.len() / 2;
    if sizes.len() % 2 == 1 {
        sizes[mid]
    } else {
        (sizes[mid - 1] + sizes[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ch: char, size: f32, x: f32) -> CharRecord {
        CharRecord {
            ch,
            rect: Rect::new(x, 0.0, x + 5.0, 10.0),
            size,
            block: 0,
            line: 0,
        }
    }

    fn line(text: &str, size: f32) -> Vec<CharRecord> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| record(ch, size, i as f32 * 5.0))
            .collect()
    }

    #[test]
    fn test_plain_line_survives_unchanged() {
        let normalized = normalize_line(&line("Mt 7:3", 10.0), 0.85);
        assert_eq!(normalized.text, "Mt 7:3");
        assert_eq!(normalized.rects.len(), 6);
        assert_eq!(normalized.base_size, 10.0);
        assert_eq!(normalized.dropped, 0);
    }

    #[test]
    fn test_superscript_digits_dropped() {
        // "6:14" at body size, "³⁵"-style footnote digits rendered at 6pt.
        // The records carry plain digits; what marks them is the font size.
        let mut chars = line("6:14", 10.0);
        chars.push(record('3', 6.0, 20.0));
        chars.push(record('5', 6.0, 25.0));
        let normalized = normalize_line(&chars, 0.85);
        assert_eq!(normalized.text, "6:14");
        assert_eq!(normalized.dropped, 2);
    }

    #[test]
    fn test_small_letters_are_kept() {
        // Only digits are size-filtered; a small letter is not noise
        let mut chars = line("Mt 3", 10.0);
        chars.push(record('a', 6.0, 20.0));
        let normalized = normalize_line(&chars, 0.85);
        assert_eq!(normalized.text, "Mt 3a");
    }

    #[test]
    fn test_brackets_dropped_at_any_size() {
        let mut chars = Vec::new();
        chars.push(record('[', 10.0, 0.0));
        chars.push(record('0', 10.0, 5.0));
        chars.push(record('5', 10.0, 10.0));
        chars.push(record(']', 10.0, 15.0));
        let normalized = normalize_line(&chars, 0.85);
        // Digits at full size survive; only the brackets go
        assert_eq!(normalized.text, "05");
        assert_eq!(normalized.dropped, 2);
    }

    #[test]
    fn test_zero_baseline_keeps_all_digits() {
        // A line of size-0 records has no baseline; digits must not be
        // treated as superscript then
        let chars: Vec<CharRecord> = "12"
            .chars()
            .enumerate()
            .map(|(i, ch)| record(ch, 0.0, i as f32 * 5.0))
            .collect();
        let normalized = normalize_line(&chars, 0.85);
        assert_eq!(normalized.base_size, 0.0);
        assert_eq!(normalized.text, "12");
    }

    #[test]
    fn test_median_is_over_nonwhitespace_only() {
        // Whitespace records at a huge size must not skew the baseline
        let mut chars = line("1:2", 10.0);
        chars.push(record(' ', 100.0, 15.0));
        let normalized = normalize_line(&chars, 0.85);
        assert_eq!(normalized.base_size, 10.0);
    }

    #[test]
    fn test_even_count_median_averages() {
        let chars = vec![
            record('a', 8.0, 0.0),
            record('b', 10.0, 5.0),
            record('c', 12.0, 10.0),
            record('d', 14.0, 15.0),
        ];
        let normalized = normalize_line(&chars, 0.85);
        assert_eq!(normalized.base_size, 11.0);
    }

    #[test]
    fn test_rects_stay_index_aligned() {
        let mut chars = line("4", 10.0);
        chars.push(record('7', 6.0, 5.0)); // dropped superscript
        chars.push(record('x', 10.0, 10.0));
        let normalized = normalize_line(&chars, 0.85);
        assert_eq!(normalized.text, "4x");
        assert_eq!(normalized.rects.len(), 2);
        // The second rect belongs to 'x', not to the dropped '7'
        assert_eq!(normalized.rects[1].x0, 10.0);
    }
}
