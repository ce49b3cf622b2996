//! UI events and the actions bound to them.

use std::collections::HashMap;

use crate::dom::NodeId;

/// Raw input arriving from the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Checkbox flipped.
    Toggle,
    /// Value committed (enter, blur, slider release).
    Commit(String),
    /// Value changed by a single keystroke.
    Keystroke(String),
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Keyup,
    Click,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Toggle | UiEvent::Commit(_) => EventKind::Change,
            UiEvent::Keystroke(_) => EventKind::Keyup,
            UiEvent::Click => EventKind::Click,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClassesChanged,
    /// Length mirror committed; the raw value is read from the control.
    LengthEdited,
    /// Keystroke in a length mirror.
    LengthTyped,
    Regenerate,
    Copy,
}

/// Listener table: which actions run for which event on which element.
#[derive(Debug, Default)]
pub struct Bindings {
    table: HashMap<(NodeId, EventKind), Vec<Action>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, node: NodeId, kind: EventKind, action: Action) {
        self.table.entry((node, kind)).or_default().push(action);
    }

    pub fn actions(&self, node: NodeId, kind: EventKind) -> &[Action] {
        self.table
            .get(&(node, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
