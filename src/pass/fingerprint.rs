//! Canonical cache key for a settings state.

use serde::Serialize;

use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassConstraint {
    pub characters: String,
    pub exactly: usize,
}

/// What the generator is asked for: the enabled classes, ordered by class
/// id, plus the length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Constraints {
    pub characters: Vec<ClassConstraint>,
    pub length: usize,
}

impl Constraints {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut enabled: Vec<_> = settings.enabled().collect();
        enabled.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            characters: enabled
                .into_iter()
                .map(|c| ClassConstraint {
                    characters: c.characters.clone(),
                    exactly: c.exactly,
                })
                .collect(),
            length: settings.length,
        }
    }

    /// Characters that must be placed before the free fill.
    pub fn required(&self) -> usize {
        self.characters.iter().map(|c| c.exactly.max(1)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(constraints: &Constraints) -> Self {
        // Plain strings and integers; serialization cannot fail.
        Self(serde_json::to_string(constraints).unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
