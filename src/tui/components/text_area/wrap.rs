//! Pure soft-wrap and character-boundary helpers for the text widgets.
//!
//! Wrapping is by display column (`unicode-width`), breaking anywhere in a
//! word, so every byte of the buffer lands on exactly one row and cursor math
//! never has to guess what a word wrapper dropped.

use unicode_width::UnicodeWidthChar;

/// One screen row: a byte range of the buffer, never containing `'\n'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Row {
    pub start: usize,
    pub end: usize,
    /// The logical line continues on the next row.
    pub wrapped: bool,
}

/// Display width of a single character (control characters count as zero).
pub(crate) fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a string.
pub(crate) fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Lay `text` out into rows at most `width` columns wide.
///
/// Every logical line produces at least one row, so an empty buffer is one
/// empty row. A width of zero disables wrapping.
pub(crate) fn layout_rows(text: &str, width: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut row_width = 0;

        for (i, c) in line.char_indices() {
            let w = char_width(c);
            let at = line_start + i;
            if width > 0 && row_width + w > width && at > row_start {
                rows.push(Row {
                    start: row_start,
                    end: at,
                    wrapped: true,
                });
                row_start = at;
                row_width = 0;
            }
            row_width += w;
        }

        rows.push(Row {
            start: row_start,
            end: line_start + line.len(),
            wrapped: false,
        });
        line_start += line.len() + 1;
    }

    rows
}

/// Index of the row holding byte offset `pos`.
///
/// At a wrap point the cursor belongs to the start of the following row.
pub(crate) fn row_of(rows: &[Row], pos: usize) -> usize {
    rows.iter().rposition(|row| row.start <= pos).unwrap_or(0)
}

/// Byte offset in `row` closest to display column `column`.
///
/// On a wrapped row the offset stays before the last character, so the cursor
/// does not jump to the next row.
pub(crate) fn offset_at_column(text: &str, row: Row, column: usize) -> usize {
    let mut width = 0;
    let mut last_start = row.start;
    for (i, c) in text[row.start..row.end].char_indices() {
        let w = char_width(c);
        if width + w > column {
            return row.start + i;
        }
        width += w;
        last_start = row.start + i;
    }
    if row.wrapped { last_start } else { row.end }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(crate) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(crate) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Largest char boundary not after `pos`.
pub(crate) fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str, width: usize) -> Vec<&str> {
        layout_rows(text, width)
            .into_iter()
            .map(|r| &text[r.start..r.end])
            .collect()
    }

    // -- layout_rows -----------------------------------------------------

    #[test]
    fn layout_empty_is_one_row() {
        assert_eq!(spans("", 10), vec![""]);
    }

    #[test]
    fn layout_explicit_newlines() {
        assert_eq!(spans("a\nb\n", 10), vec!["a", "b", ""]);
    }

    #[test]
    fn layout_wraps_at_width() {
        assert_eq!(spans("aaaaaaaaaa", 4), vec!["aaaa", "aaaa", "aa"]);
        let rows = layout_rows("aaaaaaaaaa", 4);
        assert!(rows[0].wrapped);
        assert!(!rows[2].wrapped);
    }

    #[test]
    fn layout_exact_fit_does_not_add_row() {
        assert_eq!(spans("abcd\nef", 4), vec!["abcd", "ef"]);
    }

    #[test]
    fn layout_wide_chars() {
        // Each CJK char takes two columns
        assert_eq!(spans("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn layout_zero_width_disables_wrapping() {
        assert_eq!(spans("abcdef", 0), vec!["abcdef"]);
    }

    // -- row_of / offset_at_column -----------------------------------------

    #[test]
    fn row_of_wrap_point_belongs_to_next_row() {
        let rows = layout_rows("abcdef", 3);
        assert_eq!(row_of(&rows, 2), 0);
        assert_eq!(row_of(&rows, 3), 1);
        assert_eq!(row_of(&rows, 6), 1);
    }

    #[test]
    fn row_of_line_end_stays_on_line() {
        let rows = layout_rows("ab\ncd", 10);
        assert_eq!(row_of(&rows, 2), 0);
        assert_eq!(row_of(&rows, 3), 1);
    }

    #[test]
    fn offset_at_column_clamps_to_row() {
        let text = "abcdef\nxy";
        let rows = layout_rows(text, 4);
        // "abcd" is wrapped: column past the end stays on its last char
        assert_eq!(offset_at_column(text, rows[0], 10), 3);
        assert_eq!(offset_at_column(text, rows[1], 1), 5);
        // "xy" ends its line: column past the end goes to the line end
        assert_eq!(offset_at_column(text, rows[2], 10), 9);
    }

    // -- char boundaries ---------------------------------------------------

    #[test]
    fn prev_char_boundary_multibyte() {
        // "café" = [99, 97, 102, 195, 169]
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
    }

    #[test]
    fn next_char_boundary_emoji() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(next_char_boundary(s, 5), 6);
    }

    #[test]
    fn floor_char_boundary_inside_char() {
        let s = "a🔥b";
        assert_eq!(floor_char_boundary(s, 3), 1);
        assert_eq!(floor_char_boundary(s, 99), 6);
    }
}
