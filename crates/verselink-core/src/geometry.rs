use std::ops::Range;

use crate::Rect;

/// Componentwise bounding box of a run of rectangles, `None` when empty.
pub fn union_rects(rects: &[Rect]) -> Option<Rect> {
    rects
        .iter()
        .copied()
        .reduce(|acc, rect| acc.union(&rect))
}

/// Bounding rectangle for a token's char span, expanded by `margin` on all
/// sides. `chars` indexes the normalized line's rect array; an empty or
/// out-of-range span yields `None` and the token produces no annotation.
pub fn span_rect(rects: &[Rect], chars: Range<usize>, margin: f32) -> Option<Rect> {
    let slice = rects.get(chars)?;
    union_rects(slice).map(|rect| rect.expand(margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_is_componentwise() {
        let rects = [
            Rect::new(10.0, 5.0, 15.0, 12.0),
            Rect::new(14.0, 4.0, 20.0, 11.0),
            Rect::new(12.0, 6.0, 13.0, 13.0),
        ];
        let union = union_rects(&rects).unwrap();
        assert_eq!(union, Rect::new(10.0, 4.0, 20.0, 13.0));
    }

    #[test]
    fn test_union_of_nothing() {
        assert_eq!(union_rects(&[]), None);
    }

    #[test]
    fn test_span_rect_expands_by_margin() {
        let rects = [
            Rect::new(0.0, 0.0, 5.0, 10.0),
            Rect::new(5.0, 0.0, 10.0, 10.0),
        ];
        let rect = span_rect(&rects, 0..2, 0.3).unwrap();
        assert_eq!(rect, Rect::new(-0.3, -0.3, 10.3, 10.3));
    }

    #[test]
    fn test_span_rect_subrange() {
        let rects = [
            Rect::new(0.0, 0.0, 5.0, 10.0),
            Rect::new(5.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 15.0, 10.0),
        ];
        let rect = span_rect(&rects, 1..2, 0.0).unwrap();
        assert_eq!(rect, Rect::new(5.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_empty_span_yields_nothing() {
        let rects = [Rect::new(0.0, 0.0, 5.0, 10.0)];
        assert_eq!(span_rect(&rects, 1..1, 0.3), None);
        assert_eq!(span_rect(&rects, 0..0, 0.3), None);
    }

    #[test]
    fn test_out_of_range_span_yields_nothing() {
        let rects = [Rect::new(0.0, 0.0, 5.0, 10.0)];
        assert_eq!(span_rect(&rects, 0..2, 0.3), None);
    }
}
