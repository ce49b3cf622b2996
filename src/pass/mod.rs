//! Password generation and memoization.

mod fingerprint;
mod generate;
mod store;

pub use fingerprint::{ClassConstraint, Constraints, Fingerprint};
pub use generate::{Generator, RandomGenerator};
pub use store::{PasswordBatch, PasswordStore};
