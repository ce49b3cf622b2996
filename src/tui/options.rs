use crate::events::UiEvent;
use crate::pass::Generator;
use crate::panel::Panel;
use crate::terminal::{clear, reset_terminal};

use super::{FIRST_CLASS_OPTION, enter_prompt, get_editable_input, get_numeric_input, print_help, print_panel};

/// What the menu should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum LoopAction {
    Quit,
    Continue(Option<String>),
}

use LoopAction::*;

pub fn main_menu<G: Generator>(panel: &mut Panel<G>) {
    reset_terminal();
    let mut notice: Option<String> = None;

    loop {
        clear();
        print_panel(panel, notice.as_deref());

        let Some(input) = get_editable_input(enter_prompt(), "") else {
            notice = None;
            continue;
        };

        match menu_option(input.trim(), panel) {
            Quit => {
                clear();
                break;
            }
            Continue(next) => notice = next,
        }
    }
}

fn class_index(option: &str) -> Option<usize> {
    option
        .parse::<usize>()
        .ok()?
        .checked_sub(FIRST_CLASS_OPTION)
}

pub fn menu_option<G: Generator>(choice: &str, panel: &mut Panel<G>) -> LoopAction {
    match choice {
        "" => {
            panel.regenerate();
            Continue(None)
        }
        "q" | "quit" => Quit,
        "h" | "help" => {
            clear();
            print_help();
            let _ = get_editable_input("Press Enter to return", "");
            Continue(None)
        }
        "1" => {
            let current = panel.settings().map(|s| s.length).unwrap_or_default();
            if let Some(len) = get_numeric_input("Enter new password length", current) {
                panel.set_length(len);
            }
            Continue(None)
        }
        "u" => {
            if crate::rand::is_urandom_enabled() {
                crate::rand::disable_urandom();
                Continue(None)
            } else if crate::rand::enable_urandom() {
                Continue(None)
            } else {
                Continue(Some("/dev/urandom not available on this system".to_string()))
            }
        }
        _ => class_or_copy(choice, panel),
    }
}

fn class_or_copy<G: Generator>(choice: &str, panel: &mut Panel<G>) -> LoopAction {
    let invalid = || Continue(Some("Invalid option.".to_string()));

    if let Some(n) = choice.strip_prefix('c') {
        let Some(index) = n.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            return invalid();
        };
        return match panel.copy(index) {
            Ok(()) => Continue(Some("*** -COPIED TO CLIPBOARD- ***".to_string())),
            Err(e) => Continue(Some(e.to_string())),
        };
    }

    if let Some(n) = choice.strip_prefix('x') {
        let Some(row) = class_index(n).and_then(|i| panel.class_controls(i)) else {
            return invalid();
        };
        let current = panel
            .document()
            .value(row.exactly)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        if let Some(count) = get_numeric_input("Exact count (0 = at least one)", current) {
            panel.dispatch(row.exactly, UiEvent::Commit(count.to_string()));
        }
        return Continue(None);
    }

    match class_index(choice).and_then(|i| panel.class_controls(i)) {
        Some(row) => {
            panel.dispatch(row.checkbox, UiEvent::Toggle);
            Continue(None)
        }
        None => invalid(),
    }
}
