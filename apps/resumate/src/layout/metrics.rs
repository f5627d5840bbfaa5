//! Approximate text metrics for the measurement pass.
//!
//! Character widths are in em units (relative to font size), bucketed by
//! glyph class rather than per-glyph tables. The approximation is deliberate:
//! pagination only needs heights that track the real render within a line or
//! two per page, and the greedy wrap below reproduces how a browser breaks
//! words at a fixed column width.

use crate::models::FontClass;

/// Width of one character in em units for a sans-serif face.
fn char_width_em(c: char) -> f32 {
    match c {
        ' ' => 0.30,
        'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.38,
        'm' | 'w' => 0.82,
        'M' | 'W' => 0.92,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.55,
        'a'..='z' => 0.50,
        '@' | '%' | '&' => 0.85,
        _ if c.is_ascii() => 0.55,
        // Non-ASCII falls back to a wide average.
        _ => 0.60,
    }
}

/// Serif faces in the resume font stacks run slightly narrower.
fn class_scale(class: FontClass) -> f32 {
    match class {
        FontClass::Sans => 1.0,
        FontClass::Serif => 0.96,
    }
}

/// Measures the rendered width of a single line of text, in px.
pub fn measure_px(text: &str, size_px: f32, class: FontClass) -> f32 {
    let em: f32 = text.chars().map(char_width_em).sum();
    em * class_scale(class) * size_px
}

/// Greedy word wrap: the number of lines `text` occupies at `max_width_px`.
/// Empty text takes zero lines. A word wider than the column still gets its
/// own line, matching browser overflow behavior.
pub fn wrapped_lines(text: &str, size_px: f32, class: FontClass, max_width_px: f32) -> usize {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }
    let space_w = measure_px(" ", size_px, class);
    let mut lines = 1usize;
    let mut current = 0.0_f32;
    let mut first = true;

    for word in words {
        let word_w = measure_px(word, size_px, class);
        if !first && current + space_w + word_w > max_width_px {
            lines += 1;
            current = word_w;
        } else {
            current += if first { 0.0 } else { space_w } + word_w;
            first = false;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_scales_with_size() {
        let at_10 = measure_px("Engineer", 10.0, FontClass::Sans);
        let at_20 = measure_px("Engineer", 20.0, FontClass::Sans);
        assert!((at_20 - at_10 * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_serif_narrower_than_sans() {
        let sans = measure_px("Resume body text", 11.0, FontClass::Sans);
        let serif = measure_px("Resume body text", 11.0, FontClass::Serif);
        assert!(serif < sans);
    }

    #[test]
    fn test_empty_text_takes_no_lines() {
        assert_eq!(wrapped_lines("", 11.0, FontClass::Sans, 400.0), 0);
        assert_eq!(wrapped_lines("   ", 11.0, FontClass::Sans, 400.0), 0);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrapped_lines("Ada Lovelace", 11.0, FontClass::Sans, 400.0), 1);
    }

    #[test]
    fn test_long_text_wraps() {
        let text = "Built and operated the data ingestion pipeline serving \
                    forty internal teams across three regions with strict \
                    latency objectives and on-call ownership";
        let narrow = wrapped_lines(text, 11.0, FontClass::Sans, 200.0);
        let wide = wrapped_lines(text, 11.0, FontClass::Sans, 700.0);
        assert!(narrow > wide);
        assert!(narrow >= 3);
    }

    #[test]
    fn test_oversized_word_still_occupies_a_line() {
        let lines = wrapped_lines("a supercalifragilisticexpialidocious b", 16.0, FontClass::Sans, 60.0);
        assert_eq!(lines, 3);
    }
}
