//! Lock state machines built on the leader's compare-and-swap.
//!
//! Two usage patterns share the value convention below:
//!
//! - Mutual exclusion: [`acquire`] spins a key from free to `acquired`;
//!   [`release`] puts it back.
//! - Do-once guard: [`claim`] spins free to `doing`; the winner runs the
//!   guarded work and marks it `done` with [`complete`]. `done` is
//!   terminal unless an operator resets the key externally.
//!
//! All coordination lives in the leader's per-key atomic CAS; nothing
//! here holds local state between calls, and nothing is cached beyond
//! the last round trip. Waiters poll on a fixed interval. No ordering is
//! promised among waiters: a long waiter can lose the key to a fresh
//! arrival indefinitely.

use crate::error::{LatchError, Result};
use crate::leader::LeaderClient;
use std::time::Duration;
use tokio::time;
use tracing::debug;

/// Value of a key nobody holds. Indistinguishable from "never used".
pub const FREE: &str = "";

/// Value of a key held for a critical section.
pub const ACQUIRED: &str = "acquired";

/// Value of a key whose do-once work is in flight.
pub const DOING: &str = "doing";

/// Value of a key whose do-once work has completed.
pub const DONE: &str = "done";

/// Delay between unsuccessful polls in [`acquire`] and [`claim`].
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Acquire the lock for `key`, waiting as long as it takes.
///
/// Polls compare-and-swap until the key moves from free to acquired. A
/// transport or API failure aborts immediately: it means the
/// coordination channel is broken, not that the lock is contended. The
/// loop itself never times out; callers bound the wait by dropping the
/// future, e.g. racing it against Ctrl-C or a deadline. Every poll and
/// every sleep is a cancellation point.
pub async fn acquire(client: &LeaderClient, key: &str) -> Result<()> {
    loop {
        let (_, swapped) = client.compare_and_swap(key, FREE, ACQUIRED).await?;
        if swapped {
            return Ok(());
        }

        // Held elsewhere. Not an error; wait and poll again.
        time::sleep(RETRY_INTERVAL).await;
    }
}

/// Release the lock for `key`.
///
/// Issues exactly one compare-and-swap from acquired back to free. A
/// refused swap means this process did not hold the lock, or something
/// else rewrote it; that is a protocol violation reported as
/// [`LatchError::State`] with the observed value, never retried.
pub async fn release(client: &LeaderClient, key: &str) -> Result<()> {
    let (value, swapped) = client.compare_and_swap(key, ACQUIRED, FREE).await?;
    if !swapped {
        return Err(LatchError::State {
            action: "release",
            value,
        });
    }
    Ok(())
}

/// Outcome of claiming a do-once key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoOutcome {
    /// This process claimed the work: run it, then call [`complete`].
    Claimed,
    /// The work already completed; the caller must skip it.
    AlreadyDone,
}

/// Claim the do-once unit of work guarded by `key`.
///
/// The winner of the free-to-doing swap is the sole executor of the
/// guarded work. A key that already reads done means the work happened;
/// any other value means another process is mid-flight, so poll until
/// the key settles, on the same interval as [`acquire`].
pub async fn claim(client: &LeaderClient, key: &str) -> Result<DoOutcome> {
    loop {
        let (value, swapped) = client.compare_and_swap(key, FREE, DOING).await?;
        if swapped {
            return Ok(DoOutcome::Claimed);
        }
        if value == DONE {
            return Ok(DoOutcome::AlreadyDone);
        }

        debug!(key, value = %value, "do-once work in flight elsewhere, waiting");
        time::sleep(RETRY_INTERVAL).await;
    }
}

/// Mark the do-once unit of work guarded by `key` as complete.
///
/// Issues exactly one compare-and-swap from doing to done. A refused
/// swap means the caller never validly claimed the work; reported as
/// [`LatchError::State`], never retried.
pub async fn complete(client: &LeaderClient, key: &str) -> Result<()> {
    let (value, swapped) = client.compare_and_swap(key, DOING, DONE).await?;
    if !swapped {
        return Err(LatchError::State {
            action: "mark complete",
            value,
        });
    }
    Ok(())
}
