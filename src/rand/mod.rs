//! Entropy-mixed RNG backing the default password generator.
//!
//! Each draw folds fresh entropy (cycle counter, or the `/dev/urandom` pool
//! when enabled) into a per-thread state and runs it through a SplitMix64
//! finalizer.

mod hw;
mod primes;
pub mod urand;

use std::cell::Cell;

use primes::PRIMES;

pub fn enable_urandom() -> bool {
    urand::enable()
}

pub fn disable_urandom() {
    urand::disable()
}

pub fn is_urandom_enabled() -> bool {
    urand::is_active()
}

/// Name of the entropy source currently feeding the RNG.
pub fn entropy_source() -> &'static str {
    if urand::is_active() {
        "/dev/urandom"
    } else {
        hw::source_name()
    }
}

#[inline(always)]
fn entropy() -> u64 {
    if urand::is_active() {
        urand::rand()
    } else {
        hw::entropy()
    }
}

thread_local! {
    static STATE: Cell<usize> = Cell::new(entropy() as usize);
}

pub struct Rand;

impl Rand {
    #[inline(always)]
    pub fn get() -> usize {
        STATE.with(|cell| {
            let state = cell.get();
            let ent = entropy() as usize;

            // Entropy picks the multiplier
            let mixed = state ^ ent;
            let idx = (mixed ^ (mixed >> 32)) % PRIMES.len();

            let next = state.rotate_left(17).wrapping_mul(PRIMES[idx]) ^ ent;
            cell.set(next);

            let mut z = next;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9_usize);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb_usize);
            z ^ (z >> 31)
        })
    }
}

/// Wipe this thread's RNG state.
pub fn zeroize_state() {
    let _ = STATE.try_with(|cell| cell.set(0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_vary() {
        let draws: std::collections::HashSet<usize> = (0..64).map(|_| Rand::get()).collect();
        assert!(draws.len() > 60);
    }

    #[test]
    fn recovers_after_zeroize() {
        zeroize_state();
        let a = Rand::get();
        let b = Rand::get();
        assert_ne!(a, b);
    }
}
