//! Command implementations for latch.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the shared connect step that turns a connection
//! failure into an actionable message.

mod acquire;
mod do_once;
mod done;
mod get;
mod release;

use crate::cli::{Command, ConnectionArgs};
use crate::error::{LatchError, Result};
use crate::leader::LeaderClient;

/// Hint appended when the leader socket cannot be reached.
const LEADER_HINT: &str = "Lock commands need a leader process serving the lock API on the \
     socket. Check that the leader is running, or point --socket-path (or LATCH_SOCKET) at \
     its socket.";

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Acquire(args) => acquire::cmd_acquire(args).await,
        Command::Release(args) => release::cmd_release(args).await,
        Command::Get(args) => get::cmd_get(args).await,
        Command::Do(args) => do_once::cmd_do(args).await,
        Command::Done(args) => done::cmd_done(args).await,
    }
}

/// Connect to the leader named by the shared connection flags.
///
/// Connection failures gain the leader hint; a lock command failing to
/// reach the socket almost always means no leader is running.
async fn connect(conn: &ConnectionArgs) -> Result<LeaderClient> {
    LeaderClient::connect(&conn.socket_path, conn.token.clone())
        .await
        .map_err(|err| match err {
            LatchError::Connection { path, reason } => LatchError::Connection {
                path,
                reason: format!("{}\n{}", reason, LEADER_HINT),
            },
            other => other,
        })
}
