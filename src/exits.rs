//! Exit handling: signal handlers, cleanup and graceful shutdown.
//!
//! Passwords and entropy never outlive the process: every exit path wipes
//! the RNG state and the urandom pool.

use crate::rand;

/// Signals that end the session normally; atexit does the cleanup.
const QUIT_SIGNALS: [libc::c_int; 3] = [libc::SIGINT, libc::SIGTERM, libc::SIGHUP];

/// Signals that mean something went badly wrong.
const CRASH_SIGNALS: [libc::c_int; 2] = [libc::SIGSEGV, libc::SIGABRT];

const RESTORE_CURSOR: &[u8] = b"\x1b[0m\x1b[?25h\r\n";

/// Put the tty back into cooked mode without going through crossterm.
pub fn reset_terminal() {
    // SAFETY: termios is plain data and fd 0 is only read/written by libc.
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(libc::STDIN_FILENO, &mut termios) != 0 {
            return;
        }
        termios.c_oflag |= libc::OPOST | libc::ONLCR;
        termios.c_lflag |= libc::ICANON | libc::ECHO | libc::ISIG;
        libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &termios);
    }
}

extern "C" fn on_exit() {
    reset_terminal();
    // SAFETY: writing a static buffer to stdout.
    unsafe {
        if libc::isatty(libc::STDOUT_FILENO) == 1 {
            libc::write(
                libc::STDOUT_FILENO,
                RESTORE_CURSOR.as_ptr().cast(),
                RESTORE_CURSOR.len(),
            );
        }
    }
    rand::disable_urandom();
    rand::zeroize_state();
}

extern "C" fn on_quit(_: libc::c_int) {
    // SAFETY: exit runs the atexit hook registered in install_handlers.
    unsafe { libc::exit(130) }
}

/// Wipe without blocking, then let the default action produce the core.
extern "C" fn on_crash(sig: libc::c_int) {
    rand::urand::emergency_zero();
    rand::zeroize_state();
    // SAFETY: restoring the default disposition and re-raising.
    unsafe {
        libc::signal(sig, libc::SIG_DFL);
        libc::raise(sig);
    }
}

fn handle(signals: &[libc::c_int], handler: extern "C" fn(libc::c_int)) {
    for &sig in signals {
        // SAFETY: handler is a plain extern "C" fn living for the whole program.
        unsafe { libc::signal(sig, handler as *const () as libc::sighandler_t) };
    }
}

/// Install signal handlers and the atexit hook. Call first thing in main.
pub fn install_handlers() {
    // SAFETY: on_exit is an extern "C" fn with no arguments.
    unsafe { libc::atexit(on_exit) };
    handle(&QUIT_SIGNALS, on_quit);
    handle(&CRASH_SIGNALS, on_crash);
}
