use crate::error::{Result, TaskMateError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Exit status used when a second Ctrl+C forces the process down.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Interrupt state shared between the signal handler and the app.
#[derive(Debug)]
struct InterruptState {
    cancel_requested: AtomicBool,
    presses: AtomicUsize,
}

impl InterruptState {
    fn new() -> Self {
        Self {
            cancel_requested: AtomicBool::new(false),
            presses: AtomicUsize::new(0),
        }
    }

    /// Records one Ctrl+C. Returns true when it is a repeat press.
    fn record_interrupt(&self) -> bool {
        self.cancel_requested.store(true, Ordering::SeqCst);
        self.presses.fetch_add(1, Ordering::SeqCst) > 0
    }

    fn clear(&self) {
        self.cancel_requested.store(false, Ordering::SeqCst);
        self.presses.store(0, Ordering::SeqCst);
    }
}

/// Cooperative cancellation driven by Ctrl+C.
///
/// The first press only raises a flag that long-running operations poll
/// between steps. A second press before [`GracefulShutdown::reset`] exits.
pub struct GracefulShutdown {
    state: Arc<InterruptState>,
}

impl GracefulShutdown {
    pub fn new() -> Result<Self> {
        let state = Arc::new(InterruptState::new());
        let handler_state = Arc::clone(&state);

        ctrlc::set_handler(move || {
            if handler_state.record_interrupt() {
                eprintln!("\n💀 Force stopping...");
                std::process::exit(FORCED_EXIT_CODE);
            }
            eprintln!("\n🛑 Cancelling... (press Ctrl+C again to force exit)");
        })
        .map_err(|e| TaskMateError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self { state })
    }

    /// No signal handler registration.
    pub fn new_for_test() -> Self {
        Self {
            state: Arc::new(InterruptState::new()),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.state.cancel_requested.load(Ordering::SeqCst)
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(TaskMateError::Cancelled)
        }
    }

    pub fn request_shutdown(&self) {
        self.state.cancel_requested.store(true, Ordering::SeqCst);
    }

    /// Forgets earlier presses so the next one cancels again instead of exiting.
    pub fn reset(&self) {
        self.state.clear();
    }
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        Self::new().unwrap_or_else(|e| {
            log::debug!("Signal handler unavailable: {}", e);
            Self::new_for_test()
        })
    }
}
