//! Implementation of the `latch done` command.

use crate::cli::LockArgs;
use crate::error::Result;
use crate::lock;

/// Execute the `latch done` command.
///
/// Marks the do-once work for the key as complete. Only valid from the
/// process that claimed the work with `latch do`; anything else is a
/// state error with the observed value in the diagnostic.
pub async fn cmd_done(args: LockArgs) -> Result<()> {
    let client = super::connect(&args.conn).await?;
    lock::complete(&client, &args.key).await
}
