use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Shortens to `max_chars` characters, ending with `...` when cut.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Line and column of the character at `cursor` once `text` is wrapped to
/// `max_width` columns. Breaks are by character width, not by word.
pub fn wrapped_cursor_position(text: &str, cursor: usize, max_width: usize) -> (usize, usize) {
    let max_width = max_width.max(1);
    let mut line = 0;
    let mut column = 0;

    for (index, ch) in text.chars().enumerate() {
        if index == cursor {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
            continue;
        }
        let width = ch.width().unwrap_or(1);
        if column + width > max_width {
            line += 1;
            column = 0;
        }
        column += width;
    }

    if column >= max_width {
        (line + 1, 0)
    } else {
        (line, column)
    }
}

/// Splits `text` into lines using the same character-width breaks as
/// [`wrapped_cursor_position`], so a cursor placed with it lands on the text.
pub fn wrap_chars(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = vec![String::new()];
    let mut column = 0;

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(String::new());
            column = 0;
            continue;
        }
        let width = ch.width().unwrap_or(1);
        if column + width > max_width {
            lines.push(String::new());
            column = 0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        column += width;
    }
    lines
}

/// Visible slice of a single-line input `width` columns wide, scrolled so
/// the cursor stays in view, and the cursor column inside that slice.
pub fn scroll_to_cursor(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());

    // Keep one cell free for the cursor itself.
    let mut start = cursor;
    let mut column = 0;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(1);
        if column + w + 1 > width {
            break;
        }
        column += w;
        start -= 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = ch.width().unwrap_or(1);
        if used + w > width {
            break;
        }
        used += w;
        visible.push(*ch);
    }
    (visible, column)
}
