use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read};

use crate::terminal::{RawMode, flush, format_number, reset_terminal};

enum Edit {
    Done,
    Cancel,
    Changed,
    Ignored,
}

/// Keys shared by both prompts. Ctrl+C leaves the program.
fn common_key(key: &KeyEvent, buf: &mut Vec<char>, cursor: &mut usize) -> Edit {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            reset_terminal();
            println!();
            std::process::exit(0);
        }
        KeyCode::Char('q') if ctrl => Edit::Cancel,
        KeyCode::Esc => Edit::Cancel,
        KeyCode::Char('u') if ctrl => {
            buf.clear();
            *cursor = 0;
            Edit::Changed
        }
        KeyCode::Enter => Edit::Done,
        KeyCode::Backspace if *cursor > 0 => {
            *cursor -= 1;
            buf.remove(*cursor);
            Edit::Changed
        }
        KeyCode::Delete if *cursor < buf.len() => {
            buf.remove(*cursor);
            Edit::Changed
        }
        KeyCode::Left if *cursor > 0 => {
            *cursor -= 1;
            Edit::Changed
        }
        KeyCode::Right if *cursor < buf.len() => {
            *cursor += 1;
            Edit::Changed
        }
        KeyCode::Home => {
            *cursor = 0;
            Edit::Changed
        }
        KeyCode::End => {
            *cursor = buf.len();
            Edit::Changed
        }
        _ => Edit::Ignored,
    }
}

/// Line editor loop. `accept` filters typed characters, `render` formats
/// the buffer and maps the cursor to a display column.
fn edit_line(
    prompt: &str,
    initial: &str,
    accept: impl Fn(char) -> bool,
    render: impl Fn(&[char], usize) -> (String, usize),
) -> Option<String> {
    let mut buf: Vec<char> = initial.chars().collect();
    let mut cursor = buf.len();

    let guard = match RawMode::enter() {
        Ok(g) => g,
        Err(_) => return Some(initial.to_string()),
    };

    let (shown, _) = render(&buf, cursor);
    print!("{}: {}", prompt, shown);
    flush();
    let mut last_len = shown.chars().count();
    let mut cancelled = false;

    loop {
        let key = match read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => key,
            Ok(_) => continue,
            Err(_) => break,
        };

        match common_key(&key, &mut buf, &mut cursor) {
            Edit::Done => break,
            Edit::Cancel => {
                cancelled = true;
                break;
            }
            Edit::Changed => {}
            Edit::Ignored => match key.code {
                KeyCode::Char(c) if accept(c) => {
                    buf.insert(cursor, c);
                    cursor += 1;
                }
                _ => continue,
            },
        }

        let (shown, column) = render(&buf, cursor);
        print!("\r{}: {}", prompt, " ".repeat(last_len + 1));
        print!("\r{}: {}", prompt, shown);
        print!("\x1b[{}G", prompt.chars().count() + 3 + column);
        flush();
        last_len = shown.chars().count();
    }

    drop(guard);
    println!();
    if cancelled {
        None
    } else {
        Some(buf.into_iter().collect())
    }
}

/// Map a cursor position in raw digits to a column in the comma-formatted
/// display string.
fn digit_cursor_to_display(len: usize, cursor: usize) -> usize {
    if len == 0 || cursor == 0 {
        return 0;
    }
    let first_group = match len % 3 {
        0 => 3,
        r => r,
    };
    let commas = if cursor <= first_group {
        0
    } else {
        1 + (cursor - first_group - 1) / 3
    };
    cursor + commas
}

fn format_digits(digits: &[char]) -> String {
    let s: String = digits.iter().collect();
    match s.parse::<usize>() {
        Ok(n) if !s.is_empty() => format_number(n),
        _ => s,
    }
}

/// Whole-number prompt with live comma formatting. `None` when cancelled;
/// an empty entry counts as 0.
pub fn get_numeric_input(prompt: &str, initial_value: usize) -> Option<usize> {
    let initial = if initial_value > 0 {
        initial_value.to_string()
    } else {
        String::new()
    };
    let digits = edit_line(
        prompt,
        &initial,
        |c| c.is_ascii_digit(),
        |buf, cursor| {
            (
                format_digits(buf),
                digit_cursor_to_display(buf.len(), cursor),
            )
        },
    )?;
    if digits.is_empty() {
        Some(0)
    } else {
        digits.parse().ok()
    }
}

/// Free-text prompt. `None` when cancelled.
pub fn get_editable_input(prompt: &str, initial_value: &str) -> Option<String> {
    edit_line(
        prompt,
        initial_value,
        |_| true,
        |buf, cursor| (buf.iter().collect(), cursor),
    )
}
