//! Password generation settings.
//!
//! Settings have no storage of their own: they are a live projection of the
//! controls in the panel document.

mod classes;
mod length;

pub use classes::{CharacterClass, CharacterClassRegistry, ClassControls};
pub use length::LengthSetting;

use crate::dom::{Document, NodeId};
use crate::error::{DiscoveryError, ParseError};
use crate::notify::Subscriptions;

/// Point-in-time view of the settings that affect generated passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub classes: Vec<CharacterClass>,
    pub length: usize,
}

impl Settings {
    pub fn enabled(&self) -> impl Iterator<Item = &CharacterClass> {
        self.classes.iter().filter(|c| c.enabled)
    }
}

/// Classes, length and the error sink behind one surface.
#[derive(Debug, Clone)]
pub struct SettingsFacade {
    classes: CharacterClassRegistry,
    length: LengthSetting,
    error: NodeId,
}

impl SettingsFacade {
    pub fn new(classes: CharacterClassRegistry, length: LengthSetting, error: NodeId) -> Self {
        Self {
            classes,
            length,
            error,
        }
    }

    pub fn registry(&self) -> &CharacterClassRegistry {
        &self.classes
    }

    pub fn length_setting(&self) -> &LengthSetting {
        &self.length
    }

    pub fn classes(&self, doc: &Document) -> Result<Vec<CharacterClass>, DiscoveryError> {
        self.classes.classes(doc)
    }

    pub fn length(&self, doc: &Document) -> usize {
        self.length.length(doc)
    }

    pub fn set_length(
        &self,
        doc: &mut Document,
        raw: &str,
        subs: &mut Subscriptions,
    ) -> Result<usize, ParseError> {
        self.length.set_length(doc, raw, subs)
    }

    pub fn edit_length(
        &self,
        doc: &mut Document,
        raw: &str,
        subs: &mut Subscriptions,
    ) -> Result<Option<usize>, ParseError> {
        self.length.edit_length(doc, raw, subs)
    }

    pub fn set_error(&self, doc: &mut Document, message: &str) {
        doc.set_text(self.error, message);
    }

    pub fn error_text<'a>(&self, doc: &'a Document) -> &'a str {
        doc.text(self.error).unwrap_or_default()
    }

    pub fn snapshot(&self, doc: &Document) -> Result<Settings, DiscoveryError> {
        Ok(Settings {
            classes: self.classes(doc)?,
            length: self.length(doc),
        })
    }
}
