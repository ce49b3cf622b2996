//! Default panel document.

use crate::config::PanelConfig;
use crate::dom::{Document, Element, NodeId};

/// Where the panel parts live in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub classes: NodeId,
    pub length: Vec<NodeId>,
    pub results: Vec<NodeId>,
    pub copy_buttons: Vec<NodeId>,
    pub error: NodeId,
    pub regenerate: Option<NodeId>,
}

/// Build the panel: class rows, mirrored length controls, result rows with
/// copy buttons, error text and a regenerate button.
pub fn build(config: &PanelConfig) -> (Document, PanelLayout) {
    let mut doc = Document::new();
    let root = doc.root();

    let classes = doc.append(root, Element::container().with_id("classes"));
    for class in &config.classes {
        let row = doc.append(classes, Element::container());
        doc.append(row, Element::checkbox(&class.id, class.enabled));
        doc.append(
            row,
            Element::label(&class.id, &class.characters).with_group(&class.id),
        );
        doc.append(
            row,
            Element::number(class.exactly)
                .with_id(&format!("{}-exactly", class.id))
                .with_group(&class.id),
        );
    }

    let length_row = doc.append(root, Element::container().with_id("length"));
    let slider = doc.append(
        length_row,
        Element::number(config.length)
            .with_id("length-slider")
            .with_range(None, Some(config.max_length)),
    );
    let input = doc.append(
        length_row,
        Element::number(config.length).with_id("length-input"),
    );

    let error = doc.append(root, Element::text("").with_id("error"));

    let results_box = doc.append(root, Element::container().with_id("results"));
    let mut results = Vec::with_capacity(config.number_of_passwords);
    let mut copy_buttons = Vec::with_capacity(config.number_of_passwords);
    for i in 0..config.number_of_passwords {
        let row = doc.append(results_box, Element::container());
        results.push(doc.append(row, Element::field().with_id(&format!("password-{i}"))));
        copy_buttons.push(doc.append(row, Element::button("Copy")));
    }

    let regenerate = doc.append(root, Element::button("Regenerate").with_id("regenerate"));

    let layout = PanelLayout {
        classes,
        length: vec![slider, input],
        results,
        copy_buttons,
        error,
        regenerate: Some(regenerate),
    };
    (doc, layout)
}
