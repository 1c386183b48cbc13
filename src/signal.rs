//! Graceful shutdown on SIGINT/SIGTERM.
//!
//! The UI loop polls the returned flag and leaves the alternate screen
//! cleanly. A second signal while the flag is already set exits at once
//! with code 1.

use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub fn install_shutdown_flag() -> Result<Arc<AtomicBool>, std::io::Error> {
    let requested = Arc::new(AtomicBool::new(false));

    for sig in TERM_SIGNALS {
        // Order matters: the conditional exit must be armed before the flag
        // can become true.
        flag::register_conditional_shutdown(*sig, 1, Arc::clone(&requested))?;
        flag::register(*sig, Arc::clone(&requested))?;
    }

    Ok(requested)
}
