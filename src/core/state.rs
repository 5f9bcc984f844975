//! Process state for serve mode.
//!
//! `SHUTDOWN` records that Ctrl+C was received; `SERVER` holds the bound
//! HTTP server so the signal handler can unblock its accept loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Exit status of a command interrupted by Ctrl+C (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Setup the global Ctrl+C handler. Call once at program start
///
/// The handler behavior depends on whether a server has been registered:
/// - Before `register_server()`: exit with [`INTERRUPTED_EXIT_CODE`], an
///   interrupted build or check is a failure
/// - After `register_server()`: unblock the server so the request loop ends
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        let server = SERVER.get();
        match interrupt_exit_code(server.is_some()) {
            Some(code) => std::process::exit(code),
            None => {
                if let Some(server) = server {
                    crate::log!("serve"; "shutting down...");
                    server.unblock();
                }
            }
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown
///
/// Call this after binding the server, before entering the request loop
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}


/// Exit code for an interrupt, or `None` when a server drains and returns.
fn interrupt_exit_code(server_registered: bool) -> Option<i32> {
    (!server_registered).then_some(INTERRUPTED_EXIT_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_command_exits_non_zero() {
        assert_eq!(interrupt_exit_code(false), Some(130));
        assert_ne!(INTERRUPTED_EXIT_CODE, 0);
    }

    #[test]
    fn test_interrupted_server_drains() {
        assert_eq!(interrupt_exit_code(true), None);
    }
}
