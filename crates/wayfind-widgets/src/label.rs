//! Display-width aware label fitting for tile captions.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to fit within `max_width` columns, appending `tail` when
/// anything was cut. The result, tail included, never exceeds `max_width`.
///
/// ```
/// use wayfind_widgets::label::truncate;
///
/// assert_eq!(truncate("Blade Runner 2049", 10, "…"), "Blade Run…");
/// assert_eq!(truncate("Heat", 10, "…"), "Heat");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_columns(tail, max_width);
    }
    let mut result = take_columns(s, max_width - tail_width);
    result.push_str(tail);
    result
}

/// Center `s` within `width` columns by left-padding with spaces.
pub fn center(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat((width - w) / 2), s)
}

fn take_columns(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}
