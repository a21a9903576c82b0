//! Plain-text helpers for tool I/O and usage display

/// Longest single line shown before character truncation kicks in.
pub const MAX_LINE_CHARS: usize = 200;

/// Truncate text to `max_lines` lines with a trailing note.
///
/// Empty text renders as `(empty)`. A single line longer than
/// [`MAX_LINE_CHARS`] characters is cut by characters instead of lines.
#[must_use]
pub fn truncate_lines(text: &str, max_lines: usize) -> String {
    if text.is_empty() {
        return "(empty)".to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() == 1 {
        let char_count = text.chars().count();
        if char_count > MAX_LINE_CHARS {
            let head: String = text.chars().take(MAX_LINE_CHARS).collect();
            return format!("{head}... ({} more chars)", char_count - MAX_LINE_CHARS);
        }
    }

    if lines.len() <= max_lines {
        return text.to_string();
    }

    let remaining = lines.len() - max_lines;
    let mut kept: Vec<String> = lines[..max_lines].iter().map(|l| (*l).to_string()).collect();
    kept.push(format!("... ({remaining} more lines)"));
    kept.join("\n")
}

/// Format a count with comma thousands separators, e.g. `1,234,567`.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
