//! Optional `/dev/urandom` entropy pool.
//!
//! A locked-in-memory buffer filled from `/dev/urandom`, refreshed a chunk at
//! a time by a background thread and wiped on shutdown.

use std::fs::File;
use std::io::Read;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use zeroize::Zeroize;

const POOL_SIZE: usize = 4 * 1024 * 1024;
const POOL_MASK: usize = POOL_SIZE - 1;
const CHUNK_SIZE: usize = 64 * 1024;

static POOL: Mutex<Option<Vec<u8>>> = Mutex::new(None);
static READ_POS: AtomicUsize = AtomicUsize::new(0);
static ACTIVE: AtomicBool = AtomicBool::new(false);
static SHUTDOWN: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

pub fn is_available() -> bool {
    std::path::Path::new("/dev/urandom").exists()
}

pub fn is_active() -> bool {
    ACTIVE.load(Ordering::Relaxed)
}

fn pool() -> MutexGuard<'static, Option<Vec<u8>>> {
    POOL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Fill the pool and start the refill thread. Returns false when
/// `/dev/urandom` cannot be read.
pub fn enable() -> bool {
    if is_active() {
        return true;
    }
    if !is_available() {
        tracing::warn!("/dev/urandom not available, staying on hardware entropy");
        return false;
    }

    let mut buf = vec![0u8; POOL_SIZE];
    if let Err(e) = File::open("/dev/urandom").and_then(|mut f| f.read_exact(&mut buf)) {
        tracing::warn!(error = %e, "failed to fill entropy pool");
        return false;
    }

    let locked = unsafe { libc::mlock(buf.as_ptr() as *const libc::c_void, POOL_SIZE) == 0 };
    if !locked {
        tracing::warn!("mlock failed: entropy pool may be swapped to disk (try `ulimit -l unlimited`)");
    }

    *pool() = Some(buf);
    READ_POS.store(0, Ordering::Release);
    ACTIVE.store(true, Ordering::Release);

    let stop = Arc::new(AtomicBool::new(false));
    *SHUTDOWN.lock().unwrap_or_else(|p| p.into_inner()) = Some(Arc::clone(&stop));
    thread::spawn(move || refill(stop));
    tracing::debug!(bytes = POOL_SIZE, locked, "urandom pool active");
    true
}

fn refill(stop: Arc<AtomicBool>) {
    let Ok(mut file) = File::open("/dev/urandom") else {
        return;
    };
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut write_pos = 0usize;

    while !stop.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_millis(1000));
        if file.read_exact(&mut chunk).is_err() {
            continue;
        }
        if let Some(buf) = pool().as_mut() {
            buf[write_pos..write_pos + CHUNK_SIZE].copy_from_slice(&chunk);
        }
        write_pos = (write_pos + CHUNK_SIZE) & POOL_MASK;
    }
    chunk.zeroize();
}

/// Next eight pool bytes as a `u64`; zero while the pool is inactive.
#[inline]
pub fn rand() -> u64 {
    let guard = pool();
    let Some(buf) = guard.as_ref() else {
        return 0;
    };
    let p = READ_POS.fetch_add(8, Ordering::Relaxed);
    let pos = p.wrapping_add(p >> 22) & (POOL_MASK & !7);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[pos..pos + 8]);
    u64::from_le_bytes(bytes)
}

/// Stop the refill thread, wipe and release the pool.
pub fn disable() {
    if !ACTIVE.swap(false, Ordering::AcqRel) {
        return;
    }
    if let Some(stop) = SHUTDOWN.lock().unwrap_or_else(|p| p.into_inner()).take() {
        stop.store(true, Ordering::Release);
    }
    if let Some(mut buf) = pool().take() {
        buf.zeroize();
        unsafe { libc::munlock(buf.as_ptr() as *const libc::c_void, POOL_SIZE) };
    }
    tracing::debug!("urandom pool released");
}

/// Wipe the pool from a crash handler. Never blocks: if another thread holds
/// the lock the pool is left alone.
pub fn emergency_zero() {
    let Ok(mut guard) = POOL.try_lock() else {
        return;
    };
    if let Some(buf) = guard.as_mut() {
        buf.zeroize();
    }
    ACTIVE.store(false, Ordering::Release);
}
