//! SIGINT/SIGTERM handling
//!
//! The diagnostic loops run until the process is told to stop. Turning the
//! signal into a flag lets them return normally, so the GPIO handle is
//! dropped and the lines go back to inputs.

use core::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn request_shutdown(_signal: libc::c_int) {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Install the handlers and return the flag they set
///
/// # Errors
///
/// Fails if either handler cannot be installed.
pub fn install() -> nix::Result<&'static AtomicBool> {
    let action = SigAction::new(
        SigHandler::Handler(request_shutdown),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: the handler only stores to an atomic
        unsafe { sigaction(signal, &action) }?;
    }
    Ok(&SHUTDOWN)
}
