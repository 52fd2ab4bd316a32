//! Implementation of the `latch do` command.

use crate::cli::LockArgs;
use crate::error::{LatchError, Result};
use crate::lock::{self, DoOutcome};

/// Execute the `latch do` command.
///
/// Claims the do-once work for the key, waiting out any other claimer
/// already mid-flight. Prints `do` when this process owns the work and
/// `done` when the work has already completed, so scripts can branch on
/// the output.
pub async fn cmd_do(args: LockArgs) -> Result<()> {
    let client = super::connect(&args.conn).await?;

    let outcome = tokio::select! {
        res = lock::claim(&client, &args.key) => res?,
        _ = tokio::signal::ctrl_c() => return Err(LatchError::Cancelled),
    };

    match outcome {
        DoOutcome::Claimed => println!("do"),
        DoOutcome::AlreadyDone => println!("done"),
    }
    Ok(())
}
