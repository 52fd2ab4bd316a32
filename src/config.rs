//! Socket location defaults for latch.
//!
//! The leader serves its lock API on a Unix domain socket. Every
//! subcommand can override the path (`--socket-path` / `LATCH_SOCKET`);
//! this module only computes the default location.

use std::path::PathBuf;

/// Default path of the leader's lock API socket.
///
/// Lives under the user runtime directory where the platform has one
/// (e.g. `$XDG_RUNTIME_DIR` on Linux), falling back to `/tmp`.
pub fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("latch")
        .join("leader.sock")
}
