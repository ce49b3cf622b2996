//! Interactive terminal front end for the panel.

mod input;
mod options;
mod text;

pub use input::*;
pub use options::*;
pub use text::*;

use crate::pass::Generator;
use crate::panel::Panel;

/// Run the interactive menu until the user quits.
pub fn run<G: Generator>(panel: &mut Panel<G>) {
    main_menu(panel);
}
