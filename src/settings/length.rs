//! Target length across mirrored controls (slider + numeric box).

use std::cell::Cell;

use crate::dom::{Document, NodeId};
use crate::error::ParseError;
use crate::events::{Action, Bindings, EventKind};
use crate::notify::{Reaction, Subscriptions, Topic};

#[derive(Debug, Clone)]
pub struct LengthSetting {
    mirrors: Vec<NodeId>,
    /// Last value written to the mirrors; restored when input is rejected.
    accepted: Cell<usize>,
}

impl LengthSetting {
    /// Subscribes floor maintenance to class changes and applies the floor
    /// for `enabled` classes right away.
    pub fn new(
        doc: &mut Document,
        mirrors: Vec<NodeId>,
        enabled: usize,
        subs: &mut Subscriptions,
    ) -> Self {
        let setting = Self {
            mirrors,
            accepted: Cell::new(0),
        };
        subs.subscribe(Topic::Classes, Reaction::UpdateLengthFloor);
        setting.update_floor(doc, enabled);
        setting.accepted.set(setting.length(doc));
        setting
    }

    pub fn mirrors(&self) -> &[NodeId] {
        &self.mirrors
    }

    /// Minimum length, as stored on the primary control.
    pub fn floor(&self, doc: &Document) -> usize {
        self.mirrors
            .first()
            .and_then(|&n| doc.min(n))
            .unwrap_or(0)
    }

    /// Length shown by the primary control, never below the floor.
    pub fn length(&self, doc: &Document) -> usize {
        let floor = self.floor(doc);
        let Some(raw) = self.mirrors.first().and_then(|&n| doc.value(n)) else {
            return floor;
        };
        match raw.trim().parse::<usize>() {
            Ok(n) => n.max(floor),
            Err(_) => {
                tracing::warn!(raw, floor, "length control holds non-numeric text");
                floor
            }
        }
    }

    /// Last length written to the mirrors.
    pub fn accepted(&self) -> usize {
        self.accepted.get()
    }

    /// Write a committed value to every mirror and notify `Topic::Length`.
    ///
    /// Values are clamped into `[floor, max]`. Non-numeric input is rejected
    /// and the mirrors go back to the last accepted length.
    pub fn set_length(
        &self,
        doc: &mut Document,
        raw: &str,
        subs: &mut Subscriptions,
    ) -> Result<usize, ParseError> {
        let parsed = self.parse_or_restore(doc, raw)?;
        let clamped = self.clamp(doc, parsed);
        if clamped != parsed {
            tracing::debug!(requested = parsed, clamped, "length clamped");
        }
        self.write_all(doc, clamped);
        subs.notify(Topic::Length);
        Ok(clamped)
    }

    /// A keystroke in one mirror. In-range values propagate at once; blank or
    /// out-of-range text is left as typed until the value is committed
    /// (`Ok(None)`). Non-numeric text is rejected like a commit.
    pub fn edit_length(
        &self,
        doc: &mut Document,
        raw: &str,
        subs: &mut Subscriptions,
    ) -> Result<Option<usize>, ParseError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let parsed = self.parse_or_restore(doc, raw)?;
        if self.clamp(doc, parsed) != parsed {
            return Ok(None);
        }
        self.write_all(doc, parsed);
        subs.notify(Topic::Length);
        Ok(Some(parsed))
    }

    fn parse_or_restore(&self, doc: &mut Document, raw: &str) -> Result<usize, ParseError> {
        raw.trim().parse::<usize>().map_err(|_| {
            let restored = self.accepted.get().max(self.floor(doc));
            self.write_all(doc, restored);
            ParseError::NotANumber(raw.to_string())
        })
    }

    /// Store `enabled` as the minimum on every mirror, raising the value when
    /// it falls below.
    pub fn update_floor(&self, doc: &mut Document, enabled: usize) {
        let current = self.length(doc);
        for &node in &self.mirrors {
            doc.set_min(node, enabled);
        }
        if current < enabled {
            self.write_all(doc, enabled);
        }
    }

    pub fn attach(&self, bindings: &mut Bindings) {
        for &node in &self.mirrors {
            bindings.bind(node, EventKind::Change, Action::LengthEdited);
            bindings.bind(node, EventKind::Keyup, Action::LengthTyped);
        }
    }

    fn clamp(&self, doc: &Document, value: usize) -> usize {
        let floor = self.floor(doc);
        let ceiling = self
            .mirrors
            .iter()
            .filter_map(|&n| doc.max(n))
            .min()
            .unwrap_or(usize::MAX);
        value.min(ceiling).max(floor)
    }

    fn write_all(&self, doc: &mut Document, value: usize) {
        let text = value.to_string();
        for &node in &self.mirrors {
            doc.set_value(node, &text);
        }
        self.accepted.set(value);
    }
}
