//! Writes generated passwords into the result fields.

use crate::dom::{Document, NodeId};
use crate::notify::{Reaction, Subscriptions, Topic};
use crate::pass::{Generator, PasswordStore};
use crate::settings::SettingsFacade;

#[derive(Debug, Clone)]
pub struct DisplayController {
    fields: Vec<NodeId>,
}

impl DisplayController {
    /// Refreshes on class, length and cache changes.
    pub fn new(fields: Vec<NodeId>, subs: &mut Subscriptions) -> Self {
        for topic in [Topic::Classes, Topic::Length, Topic::Passwords] {
            subs.subscribe(topic, Reaction::RefreshDisplay);
        }
        Self { fields }
    }

    /// Show the batch for the current settings, or the reason there is none.
    pub fn refresh<G: Generator>(
        &self,
        doc: &mut Document,
        settings: &SettingsFacade,
        store: &mut PasswordStore<G>,
    ) {
        settings.set_error(doc, "");

        let snapshot = match settings.snapshot(doc) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "panel markup is broken");
                self.blank(doc);
                return;
            }
        };

        match store.passwords(&snapshot) {
            Ok(passwords) => {
                for (i, &field) in self.fields.iter().enumerate() {
                    let value = passwords.get(i).map(String::as_str).unwrap_or_default();
                    doc.set_value(field, value);
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "constraints cannot be met");
                settings.set_error(doc, &e.to_string());
                self.blank(doc);
            }
        }
    }

    fn blank(&self, doc: &mut Document) {
        for &field in &self.fields {
            doc.set_value(field, "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::error::ConstraintError;
    use crate::pass::{Constraints, RandomGenerator};
    use crate::settings::{CharacterClassRegistry, LengthSetting};

    struct Fixture {
        doc: Document,
        settings: SettingsFacade,
        display: DisplayController,
        checkbox: NodeId,
        fields: Vec<NodeId>,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container());
        let row = doc.append(container, Element::container());
        let checkbox = doc.append(row, Element::checkbox("lower", true));
        doc.append(row, Element::label("lower", "abc"));
        doc.append(row, Element::number(0));
        let len = doc.append(doc.root(), Element::number(6));
        let error = doc.append(doc.root(), Element::text(""));
        let fields = vec![
            doc.append(doc.root(), Element::field()),
            doc.append(doc.root(), Element::field()),
        ];

        let mut subs = Subscriptions::new();
        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let length = LengthSetting::new(&mut doc, vec![len], 1, &mut subs);
        let settings = SettingsFacade::new(registry, length, error);
        let display = DisplayController::new(fields.clone(), &mut subs);
        Fixture {
            doc,
            settings,
            display,
            checkbox,
            fields,
        }
    }

    fn letters() -> impl FnMut(&Constraints) -> Result<String, ConstraintError> {
        |c: &Constraints| Ok("a".repeat(c.length))
    }

    fn values(doc: &Document, fields: &[NodeId]) -> Vec<String> {
        fields
            .iter()
            .map(|&f| doc.value(f).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn subscribes_to_every_topic_that_changes_output() {
        let mut subs = Subscriptions::new();
        DisplayController::new(Vec::new(), &mut subs);

        for topic in [Topic::Classes, Topic::Length, Topic::Passwords] {
            subs.notify(topic);
            let (_, reactions) = subs.next_pending().unwrap();
            assert_eq!(reactions, vec![Reaction::RefreshDisplay]);
        }
    }

    #[test]
    fn writes_one_password_per_field() {
        let mut f = fixture();
        let mut store = PasswordStore::new(letters(), 2);

        f.display.refresh(&mut f.doc, &f.settings, &mut store);

        assert_eq!(values(&f.doc, &f.fields), ["aaaaaa", "aaaaaa"]);
        assert_eq!(f.settings.error_text(&f.doc), "");
    }

    #[test]
    fn constraint_errors_are_shown_to_the_user() {
        let mut f = fixture();
        let mut store = PasswordStore::new(letters(), 2);
        f.display.refresh(&mut f.doc, &f.settings, &mut store);

        f.doc.set_checked(f.checkbox, false);
        let mut store = PasswordStore::new(RandomGenerator, 2);
        f.display.refresh(&mut f.doc, &f.settings, &mut store);

        assert_eq!(values(&f.doc, &f.fields), ["", ""]);
        assert_eq!(
            f.settings.error_text(&f.doc),
            ConstraintError::NoClasses.to_string()
        );
    }

    #[test]
    fn broken_markup_blanks_fields_without_a_user_message() {
        let mut f = fixture();
        let mut store = PasswordStore::new(letters(), 2);
        f.settings.set_error(&mut f.doc, "stale");
        f.display.refresh(&mut f.doc, &f.settings, &mut store);
        assert_eq!(values(&f.doc, &f.fields), ["aaaaaa", "aaaaaa"]);

        // the label now points at a checkbox that is gone
        f.doc.detach(f.checkbox);
        f.settings.set_error(&mut f.doc, "stale");
        f.display.refresh(&mut f.doc, &f.settings, &mut store);

        assert_eq!(values(&f.doc, &f.fields), ["", ""]);
        assert_eq!(f.settings.error_text(&f.doc), "");
    }
}
