//! Terminal output utilities.
//!
//! Box drawing, number formatting, ANSI helpers.

use crossterm::terminal::disable_raw_mode;
use std::io::{self, Write};

// ============================================================================
// ANSI Color/Style Constants
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const RED: &str = "\x1b[38;5;9m";
pub const DIM: &str = "\x1b[90m";

// ============================================================================
// Terminal Control
// ============================================================================

/// Clear screen and move cursor to top-left.
pub fn clear() {
    print!("\x1b[2J\x1b[3J\x1b[H");
    flush();
}

pub fn flush() {
    let _ = io::stdout().flush();
}

/// Reset terminal to sane state (fixes staggered text issues).
pub fn reset_terminal() {
    let _ = disable_raw_mode();
    print!("{RESET}");
    flush();
}

// ============================================================================
// Styled Output Helpers
// ============================================================================

pub fn print_error(msg: &str) {
    println!("{RED}{msg}{RESET}");
}

/// Horizontal rule inside a box.
pub fn print_rule() {
    rule('├', '┤', "");
}

/// `1234567` -> `1,234,567`.
pub fn format_number(num: usize) -> String {
    let digits = num.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        r => r,
    };
    let mut out = String::from(&digits[..lead]);
    for group in digits.as_bytes()[lead..].chunks(3) {
        out.push(',');
        out.extend(group.iter().map(|&b| b as char));
    }
    out
}

// ============================================================================
// Box Drawing (74 char width)
// ============================================================================

pub const BOX_WIDTH: usize = 74;
const INNER_WIDTH: usize = BOX_WIDTH - 4;
const FLAG_COLUMN: usize = 27;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// One `│ ... │` row. Content wider than the box overflows the right edge.
fn row(content: &str, align: Align) {
    let slack = INNER_WIDTH.saturating_sub(console_width(content));
    let left = match align {
        Align::Left => 0,
        Align::Center => slack / 2,
    };
    println!(
        "│ {}{}{} │",
        " ".repeat(left),
        content,
        " ".repeat(slack - left)
    );
}

fn rule(left: char, right: char, title: &str) {
    let head = if title.is_empty() {
        String::new()
    } else {
        format!("─ {title} ")
    };
    let fill = (BOX_WIDTH - 2).saturating_sub(head.chars().count());
    println!("{left}{head}{}{right}", "─".repeat(fill));
}

/// ┌─ Title ───────────────────────────┐
pub fn box_top(title: &str) {
    rule('┌', '┐', title);
}

/// └───────────────────────────────────┘
pub fn box_bottom() {
    rule('└', '┘', "");
}

/// │ content                           │
///
/// Plain text wider than the box is wrapped onto continuation rows.
pub fn box_line(content: &str) {
    let width = console_width(content);
    if width <= INNER_WIDTH || width != content.chars().count() {
        row(content, Align::Left);
        return;
    }
    let chars: Vec<char> = content.chars().collect();
    for chunk in chars.chunks(INNER_WIDTH) {
        row(&chunk.iter().collect::<String>(), Align::Left);
    }
}

/// │          content          │
pub fn box_line_center(content: &str) {
    row(content, Align::Center);
}

/// Greedy word wrap to `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Help entry: flag column, then the description wrapped beside it.
pub fn box_opt(flag: &str, desc: &str) {
    for (i, line) in wrap(desc, INNER_WIDTH - FLAG_COLUMN).iter().enumerate() {
        let lead = if i == 0 { flag } else { "" };
        row(&format!("{lead:<FLAG_COLUMN$}{line}"), Align::Left);
    }
}

/// Display width, skipping ANSI escape sequences.
pub fn console_width(s: &str) -> usize {
    let mut chars = s.chars();
    let mut width = 0;
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // skip to the end of the SGR sequence
            let _ = chars.by_ref().find(|&c| c == 'm');
        } else {
            width += 1;
        }
    }
    width
}

// ============================================================================
// Entropy
// ============================================================================

/// Password entropy in bits: length * log2(pool size).
pub fn calculate_entropy(password_length: usize, charset_size: usize) -> f64 {
    if charset_size == 0 {
        return 0.0;
    }
    password_length as f64 * (charset_size as f64).log2()
}

pub fn entropy_strength(bits: f64) -> &'static str {
    match bits as u32 {
        0..=35 => "Weak",
        36..=59 => "Fair",
        60..=127 => "Strong",
        _ => "Very Strong",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_get_separators() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn width_ignores_escapes() {
        assert_eq!(console_width(&format!("{UNDERLINE}General{RESET}:")), 8);
        assert_eq!(console_width("äöü"), 3);
    }

    #[test]
    fn descriptions_wrap_on_words() {
        assert_eq!(wrap("one two three", 7), ["one two", "three"]);
        assert_eq!(wrap("", 10), [""]);
    }

    #[test]
    fn entropy_bands() {
        assert_eq!(calculate_entropy(10, 0), 0.0);
        assert_eq!(calculate_entropy(8, 16), 32.0);
        assert_eq!(entropy_strength(32.0), "Weak");
        assert_eq!(entropy_strength(128.0), "Very Strong");
    }
}
