//! Property-based tests for line wrapping.
//!
//! Tests validate wrap invariants:
//! 1. Concatenating segment texts rebuilds the line
//! 2. Every segment fits the viewport width, indicator included
//! 3. Only the first segment lacks an indicator
//! 4. Segment count matches the head-then-continuations arithmetic
//! 5. Truncation always yields exactly one segment

use namedtail::view_state::{sanitize, LineLayout, LineWrapper, MIN_CONTINUATION_WIDTH};
use proptest::prelude::*;
use unicode_width::UnicodeWidthStr;

// ===== Helper Functions =====

/// Expected number of segments for an ASCII line.
fn expected_segments(len: usize, width: usize, indicator_width: usize) -> usize {
    if len <= width {
        1
    } else {
        1 + (len - width).div_ceil(width - indicator_width)
    }
}

/// Printable ASCII line, including spaces.
fn ascii_line() -> impl Strategy<Value = String> {
    "[ -~]{0,200}"
}

/// Width and an indicator leaving room for a double-width glyph.
fn width_and_indicator() -> impl Strategy<Value = (usize, String)> {
    (3usize..120).prop_flat_map(|width| {
        let max_indicator = (width - MIN_CONTINUATION_WIDTH).min(6);
        (Just(width), proptest::string::string_regex(&format!("[>|~ ]{{0,{}}}", max_indicator)).unwrap())
    })
}

// ===== Property 1: Reconstruction =====

proptest! {
    #[test]
    fn segments_rebuild_the_line(line in ascii_line(), (width, indicator) in width_and_indicator()) {
        let wrapper = LineWrapper::new(width, indicator).unwrap();

        let rebuilt: String = wrapper.segments(&line).map(|s| s.text()).collect();

        prop_assert_eq!(rebuilt, line);
    }

    #[test]
    fn unicode_segments_rebuild_the_line(line in "\\PC{0,80}", width in 4usize..40) {
        let clean = sanitize(&line).into_owned();
        let wrapper = LineWrapper::new(width, "> ").unwrap();

        let rebuilt: String = wrapper.segments(&clean).map(|s| s.text()).collect();

        prop_assert_eq!(rebuilt, clean);
    }
}

// ===== Property 2: Every Segment Fits =====

proptest! {
    #[test]
    fn every_segment_fits_the_width(line in ascii_line(), (width, indicator) in width_and_indicator()) {
        let wrapper = LineWrapper::new(width, indicator).unwrap();

        for segment in wrapper.segments(&line) {
            let shown = segment.to_display_string();
            prop_assert!(
                shown.width() <= width,
                "segment {:?} is {} cells in a {}-cell viewport",
                shown,
                shown.width(),
                width
            );
        }
    }

    #[test]
    fn wide_glyph_segments_fit_when_width_allows(line in "[a-z\u{4e00}-\u{4e20}]{0,60}", width in 3usize..30) {
        let wrapper = LineWrapper::new(width, ">").unwrap();

        for segment in wrapper.segments(&line) {
            prop_assert!(segment.to_display_string().width() <= width);
        }
    }
}

// ===== Property 3: Indicator Placement =====

proptest! {
    #[test]
    fn only_continuations_carry_the_indicator(line in ascii_line(), (width, indicator) in width_and_indicator()) {
        let wrapper = LineWrapper::new(width, indicator.clone()).unwrap();

        for (index, segment) in wrapper.segments(&line).enumerate() {
            prop_assert_eq!(segment.is_continuation(), index > 0);
            if index > 0 {
                prop_assert_eq!(segment.indicator(), Some(indicator.as_str()));
                prop_assert!(!segment.text().is_empty(), "continuations are never empty");
            }
        }
    }
}

// ===== Property 4: Segment Count =====

proptest! {
    #[test]
    fn segment_count_matches_arithmetic(line in ascii_line(), (width, indicator) in width_and_indicator()) {
        let indicator_width = indicator.len();
        let wrapper = LineWrapper::new(width, indicator).unwrap();

        let count = wrapper.segments(&line).count();

        prop_assert_eq!(count, expected_segments(line.len(), width, indicator_width));
    }
}

// ===== Property 5: Truncation =====

proptest! {
    #[test]
    fn truncate_yields_visible_prefix(line in ascii_line(), width in 1usize..120) {
        let layout = LineLayout::new(width, false, "> ").unwrap();

        let segments = layout.segments(&line);

        prop_assert_eq!(segments.len(), 1);
        prop_assert!(line.starts_with(segments[0].text()));
        prop_assert_eq!(segments[0].text().len(), line.len().min(width));
    }
}

// ===== Edge Cases =====

#[test]
fn empty_line_is_one_empty_segment() {
    let wrapper = LineWrapper::new(10, "> ").unwrap();
    let segments: Vec<_> = wrapper.segments("").collect();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text(), "");
}

#[test]
fn line_of_exactly_width_does_not_wrap() {
    let wrapper = LineWrapper::new(5, "> ").unwrap();
    assert_eq!(wrapper.segments("12345").count(), 1);
    assert_eq!(wrapper.segments("123456").count(), 2);
}
