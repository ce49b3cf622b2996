//! Memoized password batches keyed by settings fingerprint.

use std::collections::HashMap;

use zeroize::Zeroize;

use super::fingerprint::{Constraints, Fingerprint};
use super::generate::Generator;
use crate::error::ConstraintError;
use crate::notify::{Subscriptions, Topic};
use crate::settings::Settings;

/// Passwords generated together for one fingerprint. Wiped on drop.
#[derive(Debug, PartialEq, Eq)]
pub struct PasswordBatch(Vec<String>);

impl PasswordBatch {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Drop for PasswordBatch {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

pub struct PasswordStore<G> {
    generator: G,
    num_passwords: usize,
    cache: HashMap<Fingerprint, PasswordBatch>,
    generated: usize,
}

impl<G: Generator> PasswordStore<G> {
    pub fn new(generator: G, num_passwords: usize) -> Self {
        Self {
            generator,
            num_passwords,
            cache: HashMap::new(),
            generated: 0,
        }
    }

    pub fn num_passwords(&self) -> usize {
        self.num_passwords
    }

    /// Batch for the current settings, generated on first request.
    ///
    /// A failed generation caches nothing.
    pub fn passwords(&mut self, settings: &Settings) -> Result<&[String], ConstraintError> {
        let constraints = Constraints::from_settings(settings);
        let key = Fingerprint::of(&constraints);

        if !self.cache.contains_key(&key) {
            tracing::debug!(fingerprint = %key, count = self.num_passwords, "generating batch");
            let mut batch = Vec::with_capacity(self.num_passwords);
            for _ in 0..self.num_passwords {
                self.generated += 1;
                match self.generator.generate(&constraints) {
                    Ok(pw) => batch.push(pw),
                    Err(e) => {
                        batch.zeroize();
                        return Err(e);
                    }
                }
            }
            self.cache.insert(key.clone(), PasswordBatch(batch));
        } else {
            tracing::trace!(fingerprint = %key, "batch cache hit");
        }

        Ok(self
            .cache
            .get(&key)
            .map(PasswordBatch::as_slice)
            .unwrap_or_default())
    }

    /// Forget every cached batch and announce it.
    pub fn regenerate(&mut self, subs: &mut Subscriptions) {
        tracing::debug!(entries = self.cache.len(), "clearing password cache");
        self.cache.clear();
        subs.notify(Topic::Passwords);
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Generator calls made so far.
    pub fn generated(&self) -> usize {
        self.generated
    }
}

impl<G> std::fmt::Debug for PasswordStore<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordStore")
            .field("num_passwords", &self.num_passwords)
            .field("cached", &self.cache.len())
            .field("generated", &self.generated)
            .finish_non_exhaustive()
    }
}
