//! # Markdown Editing Helpers
//!
//! Pure text transformations behind the editor's formatting shortcuts.
//! No markdown parsing happens here: every helper looks at plain line prefixes.
//!
//! Line-based helpers take the whole buffer plus the index of the line to
//! change and return the new buffer. A line index past the end is clamped to
//! the last line. Template helpers return the snippet to insert at the cursor.

const BULLET_DASH: &str = "- ";
const BULLET_STAR: &str = "* ";
const TODO_OPEN: &str = "- [ ] ";
const TODO_DONE: &str = "- [x] ";

/// Language label used when a code block is inserted without one.
pub const DEFAULT_CODE_LANGUAGE: &str = "text";

/// Apply `edit` to one line of `text`, clamping the index.
fn edit_line(text: &str, cursor_line: usize, edit: impl FnOnce(&str) -> Option<String>) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let idx = cursor_line.min(lines.len() - 1);

    let Some(replacement) = edit(lines[idx]) else {
        return text.to_string();
    };

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| if i == idx { replacement.as_str() } else { *line })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn insert_bullet(text: &str, cursor_line: usize) -> String {
    edit_line(text, cursor_line, |line| {
        let trimmed = line.trim();
        if trimmed.starts_with(BULLET_DASH) || trimmed.starts_with(BULLET_STAR) {
            None
        } else {
            Some(format!("{BULLET_DASH}{line}"))
        }
    })
}

pub fn insert_todo(text: &str, cursor_line: usize) -> String {
    edit_line(text, cursor_line, |line| {
        let trimmed = line.trim();
        if trimmed.starts_with(TODO_OPEN) || trimmed.starts_with(TODO_DONE) {
            None
        } else {
            Some(format!("{TODO_OPEN}{line}"))
        }
    })
}

/// Flip `- [ ]` and `- [x]` on a checkbox line. Other lines are left alone.
pub fn toggle_todo(text: &str, cursor_line: usize) -> String {
    edit_line(text, cursor_line, |line| {
        let trimmed = line.trim();
        if trimmed.starts_with(TODO_OPEN) {
            Some(line.replacen("- [ ]", "- [x]", 1))
        } else if trimmed.starts_with(TODO_DONE) {
            Some(line.replacen("- [x]", "- [ ]", 1))
        } else {
            None
        }
    })
}

/// Prefix the line with `level` hashes, level clamped to 1..=6.
pub fn insert_header(text: &str, cursor_line: usize, level: u8) -> String {
    let level = level.clamp(1, 6) as usize;
    edit_line(text, cursor_line, |line| {
        Some(format!("{} {line}", "#".repeat(level)))
    })
}

/// Number the line one past the previous line's number.
///
/// Only a single leading digit is recognised, so anything after "9." restarts at 1.
pub fn insert_numbered_list(text: &str, cursor_line: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let idx = cursor_line.min(lines.len() - 1);

    let number = idx
        .checked_sub(1)
        .and_then(|prev| single_digit_item(lines[prev].trim()))
        .filter(|&n| n > 0)
        .map_or(1, |n| n + 1);

    edit_line(text, idx, |line| Some(format!("{number}. {line}")))
}

/// The digit of a `"N. "` list item, if the line is one.
fn single_digit_item(line: &str) -> Option<u32> {
    let mut chars = line.chars();
    let digit = chars.next()?.to_digit(10)?;
    line[1..].starts_with(". ").then_some(digit)
}

/// A `rows` x `cols` table skeleton (both at least 2), newline-terminated rows.
pub fn insert_table(rows: usize, cols: usize) -> String {
    let rows = rows.max(2);
    let cols = cols.max(2);
    let mut table = String::new();

    table.push('|');
    for i in 0..cols {
        table.push_str(&format!(" Header {} |", column_label(i)));
    }
    table.push('\n');

    table.push('|');
    for _ in 0..cols {
        table.push_str("----------|");
    }
    table.push('\n');

    for _ in 0..rows - 1 {
        table.push('|');
        for _ in 0..cols {
            table.push_str(" Cell     |");
        }
        table.push('\n');
    }

    table
}

/// A, B, ..., Z, AA, AB, ...
fn column_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Wrap `text` in `marker`, or unwrap it if it is already wrapped.
pub fn wrap_selection(text: &str, marker: &str) -> String {
    if text.len() > marker.len() * 2 && text.starts_with(marker) && text.ends_with(marker) {
        text[marker.len()..text.len() - marker.len()].to_string()
    } else {
        format!("{marker}{text}{marker}")
    }
}

/// [`wrap_selection`] applied to the content of one line, keeping its indentation.
///
/// Empty lines are left alone.
pub fn wrap_line(text: &str, cursor_line: usize, marker: &str) -> String {
    edit_line(text, cursor_line, |line| {
        let content = line.trim_start();
        if content.trim_end().is_empty() {
            return None;
        }
        let indent = &line[..line.len() - content.len()];
        Some(format!("{indent}{}", wrap_selection(content.trim_end(), marker)))
    })
}

pub fn insert_code_block(language: &str) -> String {
    let language = if language.trim().is_empty() {
        DEFAULT_CODE_LANGUAGE
    } else {
        language.trim()
    };
    format!("```{language}\n\n```")
}

pub fn insert_horizontal_rule() -> &'static str {
    "---\n"
}

pub fn insert_link() -> &'static str {
    "[link text](url)"
}

pub fn insert_image() -> &'static str {
    "![alt text](image-url)"
}

/// Zero-based line number of the byte offset `cursor_pos` in `text`.
pub fn line_index_at_cursor(text: &str, cursor_pos: usize) -> usize {
    let end = cursor_pos.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

/// What Enter should insert, given the buffer before the newline.
///
/// Looks at the last line of `text`. Todo items continue as open todos,
/// bullets keep their marker, and single-digit numbered items count up to 9.
/// Anything else gets a plain newline.
pub fn continue_list(text: &str) -> String {
    let last = text.rsplit('\n').next().unwrap_or("");
    let content = last.trim_start();
    let indent = &last[..last.len() - content.len()];

    let prefix = if content.starts_with(TODO_OPEN) || content.starts_with(TODO_DONE) {
        Some(TODO_OPEN.to_string())
    } else if content.starts_with(BULLET_DASH) {
        Some(BULLET_DASH.to_string())
    } else if content.starts_with(BULLET_STAR) {
        Some(BULLET_STAR.to_string())
    } else {
        single_digit_item(content)
            .filter(|&n| n < 9)
            .map(|n| format!("{}. ", n + 1))
    };

    match prefix {
        Some(prefix) => format!("\n{indent}{prefix}"),
        None => "\n".to_string(),
    }
}
