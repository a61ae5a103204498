//! Ctrl+C handling
//!
//! SIGINT only raises a flag. A report that is being written when the signal
//! arrives is finished and moved into place, and the session loop stops at
//! its next check instead of the process dying mid-write.

use std::sync::atomic::{AtomicBool, Ordering};

use eyre::Result;
use tracing::debug;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_sigint(_signal: nix::libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Replace the default SIGINT action with the flag-setting handler
pub fn install() -> Result<()> {
    #[cfg(unix)]
    {
        use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

        let action = SigAction::new(SigHandler::Handler(on_sigint), SaFlags::empty(), SigSet::empty());
        // SAFETY: the handler only stores to an atomic, which is async-signal-safe
        unsafe { sigaction(Signal::SIGINT, &action) }?;
        debug!("interrupt::install: SIGINT handler installed");
    }
    Ok(())
}

/// Whether an interrupt has been received
pub fn requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use nix::sys::signal::{Signal, raise};

    #[test]
    fn test_sigint_sets_flag_instead_of_exiting() {
        install().unwrap();
        raise(Signal::SIGINT).unwrap();
        assert!(requested());
    }
}
