//! Hardware entropy: the CPU cycle counter where one is readable from user
//! space, the urandom pool everywhere else.

pub fn source_name() -> &'static str {
    if cfg!(target_arch = "x86_64") {
        "rdtsc"
    } else if cfg!(target_arch = "aarch64") {
        "cntvct"
    } else {
        "/dev/urandom"
    }
}

#[inline(always)]
pub fn entropy() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        // SAFETY: rdtsc is available on every x86_64 CPU.
        unsafe { core::arch::x86_64::_rdtsc() }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let cnt: u64;
        // SAFETY: cntvct_el0 is readable from EL0 on Linux and macOS.
        unsafe { core::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt) };
        cnt
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        if !super::urand::is_active() {
            super::urand::enable();
        }
        super::urand::rand()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_moves() {
        if cfg!(any(target_arch = "x86_64", target_arch = "aarch64")) {
            let a = entropy();
            std::hint::black_box((0..1000).sum::<u64>());
            assert_ne!(a, entropy());
        }
    }
}
