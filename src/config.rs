//! Panel configuration: which classes exist and the starting values.

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    pub id: String,
    pub characters: String,
    pub enabled: bool,
    pub exactly: usize,
}

impl ClassSpec {
    pub fn new(id: &str, characters: &str, enabled: bool) -> Self {
        Self {
            id: id.to_string(),
            characters: characters.to_string(),
            enabled,
            exactly: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub length: usize,
    pub max_length: usize,
    pub number_of_passwords: usize,
    pub classes: Vec<ClassSpec>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            length: 24,
            max_length: 128,
            number_of_passwords: 5,
            classes: vec![
                ClassSpec::new("lowercase", LOWERCASE, true),
                ClassSpec::new("uppercase", UPPERCASE, true),
                ClassSpec::new("digits", DIGITS, true),
                ClassSpec::new("special", SPECIAL, true),
            ],
        }
    }
}

impl PanelConfig {
    /// Replace the special class characters, adding the class if missing.
    pub fn set_special(&mut self, chars: &str) {
        match self.classes.iter_mut().find(|c| c.id == "special") {
            Some(class) => class.characters = chars.to_string(),
            None => self.classes.push(ClassSpec::new("special", chars, true)),
        }
    }

    pub fn disable(&mut self, id: &str) {
        for class in self.classes.iter_mut().filter(|c| c.id == id) {
            class.enabled = false;
        }
    }
}
