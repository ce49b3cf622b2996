//! Character class discovery over the classes container.

use crate::dom::{Control, Document, Element, NodeId, container_of};
use crate::error::DiscoveryError;
use crate::events::{Action, Bindings, EventKind};

/// A character class as currently shown by its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    pub id: String,
    pub characters: String,
    pub enabled: bool,
    pub exactly: usize,
}

/// The controls making up one class row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassControls {
    pub label: NodeId,
    pub checkbox: NodeId,
    pub exactly: NodeId,
}

#[derive(Debug, Clone)]
pub struct CharacterClassRegistry {
    container: NodeId,
}

impl CharacterClassRegistry {
    /// Discovery runs once here so broken markup fails at setup.
    pub fn new(doc: &Document, container: NodeId) -> Result<Self, DiscoveryError> {
        let registry = Self { container };
        let rows = registry.controls(doc)?;
        tracing::debug!(rows = rows.len(), "discovered character classes");
        Ok(registry)
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Resolve every label in the container to its checkbox and exact-count
    /// input.
    pub fn controls(&self, doc: &Document) -> Result<Vec<ClassControls>, DiscoveryError> {
        let labels: Vec<NodeId> = doc
            .descendants(self.container)
            .into_iter()
            .filter(|&n| matches!(doc.get(n).control, Control::Label { .. }))
            .collect();

        labels
            .iter()
            .map(|&label| self.resolve(doc, label, &labels))
            .collect()
    }

    fn resolve(
        &self,
        doc: &Document,
        label: NodeId,
        labels: &[NodeId],
    ) -> Result<ClassControls, DiscoveryError> {
        let element = doc.get(label);
        let text = doc.text(label).unwrap_or_default().to_string();
        let Control::Label {
            target: Some(target),
            ..
        } = &element.control
        else {
            return Err(DiscoveryError::MissingTarget { label: text });
        };

        let checkbox = doc
            .find_by_id(target)
            .filter(|&n| doc.checked(n).is_some())
            .ok_or_else(|| DiscoveryError::MissingCheckbox {
                label: text.clone(),
                target: target.clone(),
            })?;

        let explicit = element.group.as_deref().and_then(|group| {
            doc.find(self.container, |e| {
                e.group.as_deref() == Some(group) && matches!(e.control, Control::Number { .. })
            })
        });
        let exactly = explicit
            .or_else(|| self.nearby_number(doc, label, labels))
            .ok_or_else(|| DiscoveryError::MissingExactly {
                target: target.clone(),
            })?;

        Ok(ClassControls {
            label,
            checkbox,
            exactly,
        })
    }

    /// Markup-proximity lookup of a label's exact-count input.
    ///
    /// The label's row is the search scope. A label that is its own row (a
    /// lone label, or one with no container shared with the others) widens
    /// the search outward, one enclosing container at a time, without
    /// leaving the classes container.
    fn nearby_number(&self, doc: &Document, label: NodeId, labels: &[NodeId]) -> Option<NodeId> {
        let is_number = |e: &Element| matches!(e.control, Control::Number { .. });
        let row = container_of(doc, label, labels);
        if row != label {
            return doc.find(row, is_number);
        }

        let mut scope = doc.parent(label);
        while let Some(current) = scope {
            if let Some(hit) = doc.find(current, is_number) {
                return Some(hit);
            }
            if current == self.container {
                break;
            }
            scope = doc.parent(current);
        }
        None
    }

    /// Fresh view of every class. Never cached.
    pub fn classes(&self, doc: &Document) -> Result<Vec<CharacterClass>, DiscoveryError> {
        self.controls(doc)?
            .into_iter()
            .map(|row| {
                let Control::Label { target, text } = &doc.get(row.label).control else {
                    return Err(DiscoveryError::MissingTarget {
                        label: String::new(),
                    });
                };
                Ok(CharacterClass {
                    id: target.clone().unwrap_or_default(),
                    characters: text.clone(),
                    enabled: doc.checked(row.checkbox).unwrap_or(false),
                    exactly: parse_exactly(doc.value(row.exactly).unwrap_or_default()),
                })
            })
            .collect()
    }

    pub fn enabled_count(&self, doc: &Document) -> Result<usize, DiscoveryError> {
        Ok(self.classes(doc)?.iter().filter(|c| c.enabled).count())
    }

    /// Bind class edits to `Action::ClassesChanged`.
    pub fn attach(&self, doc: &Document, bindings: &mut Bindings) -> Result<(), DiscoveryError> {
        for row in self.controls(doc)? {
            bindings.bind(row.checkbox, EventKind::Change, Action::ClassesChanged);
            bindings.bind(row.exactly, EventKind::Change, Action::ClassesChanged);
            bindings.bind(row.exactly, EventKind::Keyup, Action::ClassesChanged);
        }
        Ok(())
    }
}

/// Blank counts as zero; junk counts as zero and is logged.
fn parse_exactly(raw: &str) -> usize {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(raw, "exact count is not a whole number, using 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(doc: &mut Document, parent: NodeId, id: &str, chars: &str, on: bool, exactly: usize) {
        let row = doc.append(parent, Element::container());
        doc.append(row, Element::checkbox(id, on));
        doc.append(row, Element::label(id, chars));
        doc.append(row, Element::number(exactly));
    }

    fn panel() -> (Document, NodeId) {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container().with_id("classes"));
        row(&mut doc, container, "lower", "abc", true, 0);
        row(&mut doc, container, "digits", "123", false, 2);
        row(&mut doc, container, "symbols", "!@#", true, 1);
        (doc, container)
    }

    #[test]
    fn discovers_rows_in_markup_order() {
        let (doc, container) = panel();
        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let classes = registry.classes(&doc).unwrap();

        let ids: Vec<&str> = classes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["lower", "digits", "symbols"]);
        assert_eq!(
            classes[1],
            CharacterClass {
                id: "digits".into(),
                characters: "123".into(),
                enabled: false,
                exactly: 2,
            }
        );
        assert_eq!(registry.enabled_count(&doc).unwrap(), 2);
    }

    #[test]
    fn classes_reflect_live_controls() {
        let (mut doc, container) = panel();
        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let digits = registry.controls(&doc).unwrap()[1];

        doc.set_checked(digits.checkbox, true);
        doc.set_value(digits.exactly, "5");

        let classes = registry.classes(&doc).unwrap();
        assert!(classes[1].enabled);
        assert_eq!(classes[1].exactly, 5);
    }

    #[test]
    fn structural_changes_show_up_immediately() {
        let (mut doc, container) = panel();
        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let first_row = doc.children(container)[0];

        doc.detach(first_row);
        assert_eq!(registry.classes(&doc).unwrap().len(), 2);

        row(&mut doc, container, "upper", "XYZ", true, 0);
        assert_eq!(registry.classes(&doc).unwrap().len(), 3);
    }

    #[test]
    fn blank_and_junk_exact_counts_read_as_zero() {
        let (mut doc, container) = panel();
        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let rows = registry.controls(&doc).unwrap();

        doc.set_value(rows[1].exactly, "");
        doc.set_value(rows[2].exactly, "two");

        let classes = registry.classes(&doc).unwrap();
        assert_eq!(classes[1].exactly, 0);
        assert_eq!(classes[2].exactly, 0);
    }

    #[test]
    fn group_key_beats_markup_proximity() {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container());
        let labels = doc.append(container, Element::container());
        let counts = doc.append(container, Element::container());
        doc.append(labels, Element::checkbox("a", true));
        doc.append(labels, Element::label("a", "abc").with_group("a"));
        doc.append(labels, Element::checkbox("b", true));
        doc.append(labels, Element::label("b", "xyz").with_group("b"));
        let count_b = doc.append(counts, Element::number(2).with_group("b"));
        let count_a = doc.append(counts, Element::number(1).with_group("a"));

        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let rows = registry.controls(&doc).unwrap();

        assert_eq!(rows[0].exactly, count_a);
        assert_eq!(rows[1].exactly, count_b);
    }

    #[test]
    fn lone_row_without_group_keys_finds_its_input() {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container());
        let row = doc.append(container, Element::container());
        doc.append(row, Element::checkbox("lower", true));
        doc.append(row, Element::label("lower", "abc"));
        let count = doc.append(row, Element::number(3));

        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let rows = registry.controls(&doc).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].exactly, count);
        assert_eq!(registry.classes(&doc).unwrap()[0].exactly, 3);
    }

    #[test]
    fn lone_label_search_stays_inside_the_container() {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container());
        doc.append(container, Element::checkbox("lower", true));
        doc.append(container, Element::label("lower", "abc"));
        doc.append(doc.root(), Element::number(9));

        let err = CharacterClassRegistry::new(&doc, container).unwrap_err();
        assert_eq!(err, DiscoveryError::MissingExactly { target: "lower".into() });
    }

    #[test]
    fn missing_checkbox_fails_at_setup() {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container());
        let row = doc.append(container, Element::container());
        doc.append(row, Element::label("ghost", "abc"));
        doc.append(row, Element::number(0));

        let err = CharacterClassRegistry::new(&doc, container).unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::MissingCheckbox {
                label: "abc".into(),
                target: "ghost".into(),
            }
        );
    }

    #[test]
    fn missing_exact_input_fails_at_setup() {
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::container());
        let row = doc.append(container, Element::container());
        doc.append(row, Element::checkbox("a", true));
        doc.append(row, Element::label("a", "abc"));

        let err = CharacterClassRegistry::new(&doc, container).unwrap_err();
        assert_eq!(err, DiscoveryError::MissingExactly { target: "a".into() });
    }

    #[test]
    fn attach_binds_every_row() {
        let (doc, container) = panel();
        let registry = CharacterClassRegistry::new(&doc, container).unwrap();
        let mut bindings = Bindings::new();
        registry.attach(&doc, &mut bindings).unwrap();

        let rows = registry.controls(&doc).unwrap();
        assert_eq!(bindings.len(), 9);
        assert_eq!(
            bindings.actions(rows[0].exactly, EventKind::Keyup),
            &[Action::ClassesChanged]
        );
        assert!(bindings.actions(rows[0].checkbox, EventKind::Keyup).is_empty());
    }
}
