//! Unicode-width aware string helpers used by the renderers.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Truncate to at most `max_width` cells, ending with an ellipsis when
/// anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > target {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Truncate-or-pad to exactly `width` cells, left aligned.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let mut w = display_width(&out);
    while w < width {
        out.push(' ');
        w += 1;
    }
    out
}

/// Leading offset that centers `text_width` cells in `available` cells.
pub fn center_offset(text_width: usize, available: usize) -> usize {
    available.saturating_sub(text_width) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        // '漢' is two cells wide; only one fits before the ellipsis.
        assert_eq!(truncate_to_width("漢漢漢", 4), "漢…");
    }

    #[test]
    fn fit_pads_to_exact_width() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(display_width(&fit_to_width("abcdef", 4)), 4);
    }
}
