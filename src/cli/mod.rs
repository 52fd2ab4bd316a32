//! CLI argument parsing for latch.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::default_socket_path;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Latch: leader-coordinated locks and do-once guards for cooperating
/// agent processes.
///
/// One process on the host (the leader) owns authoritative lock state and
/// serves it over a Unix domain socket. Every `latch` invocation is a
/// client that mutates that state through atomic compare-and-swap, so
/// unrelated processes can serialize a critical section or run setup
/// work exactly once:
///
///     latch acquire llama
///     critical_section
///     latch release llama
#[derive(Parser, Debug)]
#[command(name = "latch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for latch.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Acquire the lock for the given key.
    ///
    /// Waits (potentially forever) until the lock can be acquired, if it
    /// is already held by another process. If multiple processes are
    /// waiting for the same lock, there is no ordering guarantee of
    /// which one will be given the lock next.
    Acquire(LockArgs),

    /// Release a previously-acquired lock.
    ///
    /// This should only be called by the process that acquired the lock.
    Release(LockArgs),

    /// Get the current value of a lock key.
    ///
    /// Any key not in use returns an empty string. The value can change
    /// concurrently, so `get` is only useful for inspecting lock state;
    /// to take or give up a lock, use `acquire` and `release`.
    Get(LockArgs),

    /// Begin a do-once unit of work.
    ///
    /// Prints "do" if this process claimed the work, or "done" if the
    /// work has already been completed. Scripts branch on the printed
    /// word:
    ///
    ///     if [ "$(latch do llama)" = do ]; then
    ///       setup_code
    ///       latch done llama
    ///     fi
    Do(LockArgs),

    /// Complete a do-once unit of work.
    ///
    /// This should only be used by the process performing the work.
    Done(LockArgs),
}

/// Arguments shared by every lock subcommand.
#[derive(Args, Debug)]
pub struct LockArgs {
    /// Lock key to operate on.
    pub key: String,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

/// How to reach the leader's lock API.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to the socket the leader serves the lock API on.
    #[arg(long, env = "LATCH_SOCKET", default_value_os_t = default_socket_path())]
    pub socket_path: PathBuf,

    /// Bearer token for the leader API, if the leader requires one.
    #[arg(long, env = "LATCH_TOKEN")]
    pub token: Option<String>,
}
