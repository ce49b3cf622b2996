//! The control panel: document, settings, store and display wired together.

pub mod markup;

pub use markup::{PanelLayout, build};

use crate::clipboard;
use crate::display::DisplayController;
use crate::dom::{Document, NodeId};
use crate::error::{ClipboardError, DiscoveryError};
use crate::events::{Action, Bindings, EventKind, UiEvent};
use crate::notify::{Observer, Reaction, Subscriptions, Topic};
use crate::pass::{Generator, PasswordStore};
use crate::settings::{CharacterClassRegistry, LengthSetting, Settings, SettingsFacade};

pub struct Panel<G> {
    doc: Document,
    layout: PanelLayout,
    settings: SettingsFacade,
    store: PasswordStore<G>,
    display: DisplayController,
    bindings: Bindings,
    subs: Subscriptions,
}

impl<G: Generator> Panel<G> {
    /// Wire the panel in dependency order and show the first batch.
    pub fn new(
        mut doc: Document,
        layout: PanelLayout,
        generator: G,
        num_passwords: usize,
    ) -> Result<Self, DiscoveryError> {
        let mut subs = Subscriptions::new();
        let mut bindings = Bindings::new();

        let registry = CharacterClassRegistry::new(&doc, layout.classes)?;
        registry.attach(&doc, &mut bindings)?;

        let enabled = registry.enabled_count(&doc)?;
        let length = LengthSetting::new(&mut doc, layout.length.clone(), enabled, &mut subs);
        length.attach(&mut bindings);

        let settings = SettingsFacade::new(registry, length, layout.error);
        let store = PasswordStore::new(generator, num_passwords);
        let display = DisplayController::new(layout.results.clone(), &mut subs);

        if let Some(button) = layout.regenerate {
            bindings.bind(button, EventKind::Click, Action::Regenerate);
        }
        for &button in &layout.copy_buttons {
            bindings.bind(button, EventKind::Click, Action::Copy);
        }
        tracing::debug!(bindings = bindings.len(), "panel wired");

        let mut panel = Self {
            doc,
            layout,
            settings,
            store,
            display,
            bindings,
            subs,
        };
        panel.refresh();
        Ok(panel)
    }

    /// Apply a UI event to `node` and run whatever is bound to it.
    pub fn dispatch(&mut self, node: NodeId, event: UiEvent) {
        match &event {
            UiEvent::Toggle => {
                let checked = self.doc.checked(node).unwrap_or(false);
                self.doc.set_checked(node, !checked);
            }
            UiEvent::Commit(value) | UiEvent::Keystroke(value) => self.doc.set_value(node, value),
            UiEvent::Click => {}
        }

        let actions = self.bindings.actions(node, event.kind()).to_vec();
        for action in actions {
            self.run(node, action);
        }
        self.drain();
    }

    fn run(&mut self, node: NodeId, action: Action) {
        match action {
            Action::ClassesChanged => self.subs.notify(Topic::Classes),
            Action::LengthEdited => {
                let raw = self.doc.value(node).unwrap_or_default().to_string();
                if let Err(e) = self.settings.set_length(&mut self.doc, &raw, &mut self.subs) {
                    tracing::warn!(error = %e, "length edit rejected");
                }
            }
            Action::LengthTyped => {
                let raw = self.doc.value(node).unwrap_or_default().to_string();
                match self.settings.edit_length(&mut self.doc, &raw, &mut self.subs) {
                    Ok(Some(_)) => {}
                    Ok(None) => tracing::trace!(raw = %raw, "length pending until commit"),
                    Err(e) => tracing::warn!(error = %e, "length keystroke rejected"),
                }
            }
            Action::Regenerate => self.store.regenerate(&mut self.subs),
            Action::Copy => {
                if let Err(e) = clipboard::copy_field(&self.doc, node) {
                    tracing::warn!(error = %e, "copy failed");
                }
            }
        }
    }

    /// Run queued reactions until nothing is pending.
    fn drain(&mut self) {
        while let Some((topic, reactions)) = self.subs.next_pending() {
            for reaction in reactions {
                match reaction {
                    Reaction::UpdateLengthFloor => self.update_floor(),
                    Reaction::RefreshDisplay => self.refresh(),
                }
            }
            self.subs.emit(topic);
        }
    }

    fn update_floor(&mut self) {
        match self.settings.registry().enabled_count(&self.doc) {
            Ok(enabled) => self
                .settings
                .length_setting()
                .update_floor(&mut self.doc, enabled),
            Err(e) => tracing::error!(error = %e, "cannot count enabled classes"),
        }
    }

    fn refresh(&mut self) {
        self.display
            .refresh(&mut self.doc, &self.settings, &mut self.store);
    }

    /// Throw away every cached batch and show fresh passwords.
    pub fn regenerate(&mut self) {
        self.store.regenerate(&mut self.subs);
        self.drain();
    }

    /// Set the length as if typed into the primary length control.
    pub fn set_length(&mut self, length: usize) {
        if let Some(&primary) = self.layout.length.first() {
            self.dispatch(primary, UiEvent::Commit(length.to_string()));
        }
    }

    /// Copy the password of result row `index`.
    pub fn copy(&self, index: usize) -> Result<(), ClipboardError> {
        let from = self
            .layout
            .copy_buttons
            .get(index)
            .or_else(|| self.layout.results.get(index))
            .copied()
            .ok_or(ClipboardError::NoField)?;
        clipboard::copy_field(&self.doc, from)
    }

    /// Called with every topic after its reactions ran.
    pub fn subscribe(&mut self, observer: Observer) {
        self.subs.observe(observer);
    }

    pub fn settings(&self) -> Result<Settings, DiscoveryError> {
        self.settings.snapshot(&self.doc)
    }

    pub fn field_values(&self) -> Vec<String> {
        self.layout
            .results
            .iter()
            .map(|&n| self.doc.value(n).unwrap_or_default().to_string())
            .collect()
    }

    pub fn error_text(&self) -> &str {
        self.settings.error_text(&self.doc)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Structural edits show up on the next refresh; class discovery is
    /// never cached.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn facade(&self) -> &SettingsFacade {
        &self.settings
    }

    pub fn store(&self) -> &PasswordStore<G> {
        &self.store
    }

    /// Checkbox and exact-count input of class row `index`.
    pub fn class_controls(&self, index: usize) -> Option<crate::settings::ClassControls> {
        self.settings
            .registry()
            .controls(&self.doc)
            .ok()?
            .get(index)
            .copied()
    }
}

impl<G> std::fmt::Debug for Panel<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("layout", &self.layout)
            .field("store", &self.store)
            .field("subs", &self.subs)
            .finish_non_exhaustive()
    }
}
