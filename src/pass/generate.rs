//! Password generation.

use zeroize::Zeroize;

use super::fingerprint::Constraints;
use crate::error::ConstraintError;
use crate::rand::Rand;

/// Produces one password for the given constraints.
pub trait Generator {
    fn generate(&mut self, constraints: &Constraints) -> Result<String, ConstraintError>;
}

impl<F> Generator for F
where
    F: FnMut(&Constraints) -> Result<String, ConstraintError>,
{
    fn generate(&mut self, constraints: &Constraints) -> Result<String, ConstraintError> {
        self(constraints)
    }
}

/// Class-aware generator on top of the entropy-mixed RNG.
///
/// A class with an exact count contributes exactly that many characters,
/// every other class at least one. Remaining slots come from the union of
/// the classes without an exact count.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomGenerator;

impl Generator for RandomGenerator {
    fn generate(&mut self, constraints: &Constraints) -> Result<String, ConstraintError> {
        check(constraints)?;

        let mut picked: Vec<char> = Vec::with_capacity(constraints.length);
        let mut pool: Vec<char> = Vec::new();

        for class in &constraints.characters {
            let mut chars: Vec<char> = class.characters.chars().collect();
            if class.exactly > 0 {
                picked.extend((0..class.exactly).map(|_| random_char(&chars, Rand::get())));
            } else {
                picked.push(random_char(&chars, Rand::get()));
                pool.extend_from_slice(&chars);
            }
            chars.zeroize();
        }

        while picked.len() < constraints.length {
            picked.push(random_char(&pool, Rand::get()));
        }
        pool.zeroize();

        shuffle(&mut picked);
        let password: String = picked.iter().collect();
        picked.zeroize();
        Ok(password)
    }
}

fn check(constraints: &Constraints) -> Result<(), ConstraintError> {
    if constraints.characters.is_empty() {
        return Err(ConstraintError::NoClasses);
    }
    if let Some(i) = constraints
        .characters
        .iter()
        .position(|c| c.characters.is_empty())
    {
        return Err(ConstraintError::EmptyClass(i + 1));
    }

    let required = constraints.required();
    if constraints.length < required {
        return Err(ConstraintError::TooShort {
            length: constraints.length,
            required,
        });
    }

    let has_free = constraints.characters.iter().any(|c| c.exactly == 0);
    if !has_free && required != constraints.length {
        return Err(ConstraintError::ExactMismatch {
            exact: required,
            length: constraints.length,
        });
    }
    Ok(())
}

#[inline]
fn random_char(chars: &[char], rng: usize) -> char {
    chars[rng % chars.len()]
}

#[inline]
fn shuffle(chars: &mut [char]) {
    for i in (1..chars.len()).rev() {
        let j = Rand::get() % (i + 1);
        chars.swap(i, j);
    }
}
