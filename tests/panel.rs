use std::cell::RefCell;
use std::rc::Rc;

use passpanel::config::{ClassSpec, PanelConfig};
use passpanel::dom::{Document, Element};
use passpanel::error::{ConstraintError, DiscoveryError};
use passpanel::events::UiEvent;
use passpanel::notify::Topic;
use passpanel::pass::{ClassConstraint, Constraints, RandomGenerator};
use passpanel::panel::{self, Panel, PanelLayout};

type Calls = Rc<RefCell<Vec<Constraints>>>;

/// Generator that records its input and returns numbered passwords.
fn spy() -> (
    Calls,
    impl FnMut(&Constraints) -> Result<String, ConstraintError>,
) {
    let calls: Calls = Rc::default();
    let log = Rc::clone(&calls);
    let generator = move |c: &Constraints| {
        log.borrow_mut().push(c.clone());
        Ok::<_, ConstraintError>(format!("pw{}", log.borrow().len()))
    };
    (calls, generator)
}

fn single_class(length: usize, results: usize) -> (Document, PanelLayout) {
    let config = PanelConfig {
        length,
        max_length: 64,
        number_of_passwords: results,
        classes: vec![ClassSpec::new("letters", "abc", true)],
    };
    panel::build(&config)
}

fn three_classes() -> (Document, PanelLayout) {
    let config = PanelConfig {
        length: 8,
        max_length: 64,
        number_of_passwords: 2,
        classes: vec![
            ClassSpec::new("lower", "abc", true),
            ClassSpec::new("digits", "123", true),
            ClassSpec::new("symbols", "!@#", true),
        ],
    };
    panel::build(&config)
}

#[test]
fn end_to_end_single_class() {
    let (doc, layout) = single_class(5, 3);
    let (calls, generator) = spy();
    let panel = Panel::new(doc, layout, generator, 3).unwrap();

    let expected = Constraints {
        characters: vec![ClassConstraint {
            characters: "abc".into(),
            exactly: 0,
        }],
        length: 5,
    };
    assert_eq!(*calls.borrow(), vec![expected; 3]);
    assert_eq!(panel.field_values(), ["pw1", "pw2", "pw3"]);
    assert_eq!(panel.error_text(), "");
}

#[test]
fn constraint_failure_blanks_fields_and_shows_message() {
    let (doc, layout) = single_class(5, 3);
    let fail = Rc::new(RefCell::new(false));
    let switch = Rc::clone(&fail);
    let generator = move |_: &Constraints| {
        if *switch.borrow() {
            Err(ConstraintError::custom("length too short"))
        } else {
            Ok("secret".to_string())
        }
    };
    let mut panel = Panel::new(doc, layout, generator, 3).unwrap();
    assert_eq!(panel.field_values(), ["secret", "secret", "secret"]);

    *fail.borrow_mut() = true;
    panel.regenerate();

    assert_eq!(panel.field_values(), ["", "", ""]);
    assert_eq!(panel.error_text(), "length too short");
}

#[test]
fn error_clears_once_constraints_are_met_again() {
    let (doc, layout) = single_class(5, 2);
    let mut panel = Panel::new(doc, layout, RandomGenerator, 2).unwrap();
    let row = panel.class_controls(0).unwrap();

    panel.dispatch(row.checkbox, UiEvent::Toggle);
    assert_eq!(panel.error_text(), ConstraintError::NoClasses.to_string());
    assert_eq!(panel.field_values(), ["", ""]);

    panel.dispatch(row.checkbox, UiEvent::Toggle);
    assert_eq!(panel.error_text(), "");
    assert!(panel.field_values().iter().all(|v| v.chars().count() == 5));
}

#[test]
fn unrelated_edits_do_not_regenerate() {
    let (doc, layout) = three_classes();
    let (calls, generator) = spy();
    let mut panel = Panel::new(doc, layout, generator, 2).unwrap();
    let before = panel.field_values();

    // Disable digits, then edit its exact count: second edit must hit the cache.
    let digits = panel.class_controls(1).unwrap();
    panel.dispatch(digits.checkbox, UiEvent::Toggle);
    let after_toggle = calls.borrow().len();
    panel.dispatch(digits.exactly, UiEvent::Keystroke("3".into()));

    assert_eq!(calls.borrow().len(), after_toggle);

    // Re-enable with exact count reset: back to the first fingerprint.
    panel.dispatch(digits.exactly, UiEvent::Commit("0".into()));
    panel.dispatch(digits.checkbox, UiEvent::Toggle);
    assert_eq!(panel.field_values(), before);
    assert_eq!(calls.borrow().len(), after_toggle);
}

#[test]
fn regenerate_calls_the_generator_again() {
    let (doc, layout) = single_class(6, 2);
    let (calls, generator) = spy();
    let mut panel = Panel::new(doc, layout, generator, 2).unwrap();
    assert_eq!(calls.borrow().len(), 2);

    panel.regenerate();
    assert_eq!(calls.borrow().len(), 4);
    assert_eq!(panel.field_values(), ["pw3", "pw4"]);
    assert_eq!(panel.store().generated(), 4);
}

#[test]
fn regenerate_button_is_bound() {
    let (doc, layout) = single_class(6, 1);
    let button = layout.regenerate.unwrap();
    let (calls, generator) = spy();
    let mut panel = Panel::new(doc, layout, generator, 1).unwrap();

    panel.dispatch(button, UiEvent::Click);
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn length_floor_follows_enabled_classes() {
    let (doc, layout) = three_classes();
    let mut panel = Panel::new(doc, layout, RandomGenerator, 2).unwrap();

    panel.set_length(2);
    assert_eq!(panel.settings().unwrap().length, 3);

    let symbols = panel.class_controls(2).unwrap();
    panel.dispatch(symbols.checkbox, UiEvent::Toggle);
    panel.set_length(2);
    assert_eq!(panel.settings().unwrap().length, 2);

    panel.dispatch(symbols.checkbox, UiEvent::Toggle);
    assert_eq!(panel.settings().unwrap().length, 3);
    let doc = panel.document();
    for &mirror in &panel.layout().length {
        assert_eq!(doc.min(mirror), Some(3));
        assert_eq!(doc.value(mirror), Some("3"));
    }
}

#[test]
fn length_mirrors_stay_in_sync() {
    let (doc, layout) = single_class(8, 1);
    let mut panel = Panel::new(doc, layout, RandomGenerator, 1).unwrap();
    let input = panel.layout().length[1];

    panel.dispatch(input, UiEvent::Keystroke("12".into()));

    let doc = panel.document();
    for &mirror in &panel.layout().length {
        assert_eq!(doc.value(mirror), Some("12"));
    }
    assert_eq!(panel.field_values()[0].chars().count(), 12);
}

#[test]
fn junk_length_is_rejected_without_touching_results() {
    let (doc, layout) = single_class(8, 1);
    let (calls, generator) = spy();
    let mut panel = Panel::new(doc, layout, generator, 1).unwrap();
    let input = panel.layout().length[1];
    let before = panel.field_values();

    panel.dispatch(input, UiEvent::Keystroke("8a".into()));

    assert_eq!(panel.document().value(input), Some("8"));
    assert_eq!(panel.field_values(), before);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn observers_hear_about_changes() {
    let (doc, layout) = single_class(8, 1);
    let mut panel = Panel::new(doc, layout, RandomGenerator, 1).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    panel.subscribe(Box::new(move |t| sink.borrow_mut().push(t)));

    let row = panel.class_controls(0).unwrap();
    panel.dispatch(row.checkbox, UiEvent::Toggle);
    panel.set_length(10);
    panel.regenerate();

    assert_eq!(
        *seen.borrow(),
        vec![Topic::Classes, Topic::Length, Topic::Passwords]
    );
}

#[test]
fn broken_markup_is_rejected_at_setup() {
    let (mut doc, mut layout) = single_class(8, 1);
    let classes = doc.append(doc.root(), Element::container());
    doc.append(classes, Element::label("nowhere", "xyz"));
    layout.classes = classes;

    let err = Panel::new(doc, layout, RandomGenerator, 1).unwrap_err();
    assert!(matches!(err, DiscoveryError::MissingCheckbox { .. }));
}

#[test]
fn junk_in_the_slider_keeps_the_last_length() {
    let (doc, layout) = three_classes();
    let mut panel = Panel::new(doc, layout, RandomGenerator, 1).unwrap();
    panel.set_length(24);
    let slider = panel.layout().length[0];
    let before = panel.field_values();

    panel.dispatch(slider, UiEvent::Keystroke("24x".into()));

    assert_eq!(panel.settings().unwrap().length, 24);
    let doc = panel.document();
    for &mirror in &panel.layout().length {
        assert_eq!(doc.value(mirror), Some("24"));
    }
    assert_eq!(panel.field_values(), before);
}

#[test]
fn typing_a_length_digit_by_digit() {
    let config = PanelConfig {
        length: 8,
        max_length: 64,
        number_of_passwords: 1,
        classes: ["a", "b", "c", "d"]
            .iter()
            .map(|id| ClassSpec::new(id, "xyz", true))
            .collect(),
    };
    let (doc, layout) = panel::build(&config);
    let (calls, generator) = spy();
    let mut panel = Panel::new(doc, layout, generator, 1).unwrap();
    let input = panel.layout().length[1];

    panel.dispatch(input, UiEvent::Keystroke("1".into()));
    assert_eq!(panel.document().value(input), Some("1"));
    assert_eq!(calls.borrow().len(), 1);

    panel.dispatch(input, UiEvent::Keystroke("16".into()));
    assert_eq!(panel.settings().unwrap().length, 16);
    assert_eq!(calls.borrow().last().unwrap().length, 16);

    // committing an out-of-range value clamps it
    panel.dispatch(input, UiEvent::Commit("2".into()));
    assert_eq!(panel.settings().unwrap().length, 4);
    assert_eq!(panel.document().value(input), Some("4"));
}

#[test]
fn markup_broken_after_setup_blanks_fields_quietly() {
    let (doc, layout) = three_classes();
    let mut panel = Panel::new(doc, layout, RandomGenerator, 2).unwrap();
    let digits = panel.class_controls(1).unwrap();
    assert!(panel.field_values().iter().all(|v| !v.is_empty()));

    panel.document_mut().detach(digits.checkbox);
    panel.regenerate();

    assert_eq!(panel.field_values(), ["", ""]);
    assert_eq!(panel.error_text(), "");
    assert!(panel.settings().is_err());
}

#[test]
fn single_row_without_group_keys() {
    let mut doc = Document::new();
    let classes = doc.append(doc.root(), Element::container());
    let row = doc.append(classes, Element::container());
    doc.append(row, Element::checkbox("letters", true));
    doc.append(row, Element::label("letters", "abc"));
    doc.append(row, Element::number(0));
    let length = doc.append(doc.root(), Element::number(5));
    let error = doc.append(doc.root(), Element::text(""));
    let result = doc.append(doc.root(), Element::field());
    let layout = PanelLayout {
        classes,
        length: vec![length],
        results: vec![result],
        copy_buttons: Vec::new(),
        error,
        regenerate: None,
    };

    let panel = Panel::new(doc, layout, RandomGenerator, 1).unwrap();

    let pw = &panel.field_values()[0];
    assert_eq!(pw.chars().count(), 5);
    assert!(pw.chars().all(|c| "abc".contains(c)));
}
