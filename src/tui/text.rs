use std::collections::HashSet;

use crate::pass::Generator;
use crate::panel::Panel;
use crate::settings::Settings;
use crate::terminal::{
    DIM, RESET, UNDERLINE, box_bottom, box_line, box_line_center, box_opt, box_top,
    calculate_entropy, entropy_strength, flush, format_number, print_error, print_rule,
};

/// First menu number used for character classes.
pub const FIRST_CLASS_OPTION: usize = 2;

pub fn enter_prompt() -> &'static str {
    "Enter menu option (or press Enter to regenerate)"
}

/// Distinct characters available to the enabled classes.
fn pool_size(settings: &Settings) -> usize {
    settings
        .enabled()
        .flat_map(|c| c.characters.chars())
        .collect::<HashSet<char>>()
        .len()
}

fn preview(chars: &str, width: usize) -> String {
    if chars.chars().count() <= width {
        chars.to_string()
    } else {
        let head: String = chars.chars().take(width.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

pub fn print_panel<G: Generator>(panel: &Panel<G>, notice: Option<&str>) {
    box_top("Password Panel");
    box_line_center("Esc/CTRL+Q: cancel | CTRL+U: clear input");
    box_line("");

    let settings = match panel.settings() {
        Ok(s) => s,
        Err(e) => {
            box_bottom();
            print_error(&e.to_string());
            return;
        }
    };

    let floor = panel.facade().length_setting().floor(panel.document());
    box_line(&format!("{UNDERLINE}General{RESET}:"));
    box_line(&format!(
        "  1) Password Length: {} {DIM}(min {}){RESET}",
        format_number(settings.length),
        floor
    ));
    box_line(&format!(
        "     Number of Passwords: {}",
        format_number(panel.store().num_passwords())
    ));

    box_line("");
    box_line(&format!("{UNDERLINE}Character Classes{RESET}:"));
    for (i, class) in settings.classes.iter().enumerate() {
        let mark = if class.enabled { "x" } else { " " };
        let exactly = if class.exactly > 0 {
            format!("exactly {}", class.exactly)
        } else {
            "at least 1".to_string()
        };
        box_line(&format!(
            "  {}) [{}] {:<30} {}",
            i + FIRST_CLASS_OPTION,
            mark,
            preview(&class.characters, 30),
            exactly
        ));
    }

    let bits = calculate_entropy(settings.length, pool_size(&settings));
    box_line("");
    box_line(&format!("{UNDERLINE}Entropy{RESET}:"));
    box_line(&format!("  {:.1} bits ({})", bits, entropy_strength(bits)));
    box_line(&format!("  Source: {}", crate::rand::entropy_source()));

    box_line("");
    box_line(&format!("{UNDERLINE}Passwords{RESET}:"));
    for (i, password) in panel.field_values().iter().enumerate() {
        box_line(&format!("  {:>2}. {}", i + 1, password));
    }

    box_line("");
    print_rule();
    box_line("  Enter) regenerate  |  x<N>) exact count  |  c<N>) copy password");
    box_line("  u) entropy source  |  h) help  |  q) quit");
    box_bottom();

    let error = panel.error_text();
    if !error.is_empty() {
        print_error(error);
    } else if let Some(msg) = notice {
        println!("{msg}");
    } else {
        println!();
    }
    flush();
}

pub fn print_help() {
    box_top("Passpanel");
    box_line_center("Password generator control panel");
    box_line("");
    box_line("Passwords are regenerated only when a setting that affects them");
    box_line("changes. Editing a disabled class does nothing; press Enter for");
    box_line("fresh passwords with the same settings.");
    box_line("");
    box_line("USAGE:");
    box_line("  passpanel [OPTIONS]");
    box_line("");
    box_line("OPTIONS:");
    box_opt("  -l, --length <N>", "Starting password length (default: 24)");
    box_opt("  -n, --number <N>", "How many passwords to show (default: 5)");
    box_opt("      --special <CHARS>", "Override the special character class");
    box_opt("      --no-special", "Start with the special class disabled");
    box_opt("  -u, --urandom", "Use /dev/urandom pool instead of hardware");
    box_opt("      --log <LEVEL>", "Log level on stderr (RUST_LOG overrides)");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("MENU:");
    box_opt("  1", "Set the password length. Never below one character per enabled class.");
    box_opt("  2, 3, ...", "Toggle a character class.");
    box_opt("  x2, x3, ...", "Exact count for a class (0 = at least one).");
    box_opt("  c1, c2, ...", "Copy a password to the clipboard.");
    box_line("");
    box_bottom();
    println!();
}
