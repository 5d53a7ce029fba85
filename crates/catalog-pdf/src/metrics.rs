//! Text measuring and wrapping for builtin PDF fonts
//!
//! Builtin fonts carry no glyph tables we can query, so widths are
//! approximated with a per-family character ratio. Centering and wrapping
//! both go through [`text_width_mm`], which keeps the geometry consistent
//! even though the absolute widths are estimates.

use crate::constants::{
    COURIER_CHAR_WIDTH_RATIO, HELVETICA_CHAR_WIDTH_RATIO, TIMES_CHAR_WIDTH_RATIO, pt_to_mm,
};
use crate::types::FontFamily;

/// Average advance per character, as a fraction of the font size
pub fn char_width_ratio(family: FontFamily) -> f32 {
    match family {
        FontFamily::Helvetica => HELVETICA_CHAR_WIDTH_RATIO,
        FontFamily::Times => TIMES_CHAR_WIDTH_RATIO,
        FontFamily::Courier => COURIER_CHAR_WIDTH_RATIO,
    }
}

/// Estimated rendered width of `text` in millimeters
pub fn text_width_mm(text: &str, family: FontFamily, size_pt: f32) -> f32 {
    let chars = text.chars().count() as f32;
    pt_to_mm(chars * char_width_ratio(family) * size_pt)
}

/// Greedy word-wrap against a maximum line width.
///
/// Hard line breaks in the input are preserved; an empty input line stays an
/// empty output line (a paragraph gap). A single word wider than the limit
/// is split at character boundaries rather than overflowing.
pub fn wrap_text(text: &str, family: FontFamily, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let raw_line = raw_line.trim_end();
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if text_width_mm(word, family, size_pt) > max_width_mm {
                // Flush, then break the oversized word across lines
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                for piece in split_oversized(word, family, size_pt, max_width_mm) {
                    lines.push(piece);
                }
                continue;
            }

            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, family, size_pt) <= max_width_mm {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn split_oversized(word: &str, family: FontFamily, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && text_width_mm(&candidate, family, size_pt) > max_width_mm {
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_length() {
        let short = text_width_mm("ab", FontFamily::Helvetica, 11.0);
        let long = text_width_mm("abcd", FontFamily::Helvetica, 11.0);
        assert!((long - 2.0 * short).abs() < 0.001);
    }

    #[test]
    fn test_courier_wider_than_helvetica() {
        let h = text_width_mm("hello", FontFamily::Helvetica, 11.0);
        let c = text_width_mm("hello", FontFamily::Courier, 11.0);
        assert!(c > h);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_text(text, FontFamily::Helvetica, 11.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, FontFamily::Helvetica, 11.0) <= 40.0);
        }
        // Nothing lost
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_wrap_preserves_hard_breaks() {
        let lines = wrap_text("first\n\nsecond", FontFamily::Helvetica, 11.0, 100.0);
        assert_eq!(lines, vec!["first".to_string(), String::new(), "second".to_string()]);
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let word = "a".repeat(200);
        let lines = wrap_text(&word, FontFamily::Helvetica, 11.0, 30.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, FontFamily::Helvetica, 11.0) <= 30.0);
        }
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_single_short_line() {
        let lines = wrap_text("hello", FontFamily::Times, 14.0, 100.0);
        assert_eq!(lines, vec!["hello".to_string()]);
    }
}
