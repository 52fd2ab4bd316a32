//! Implementation of the `latch release` command.

use crate::cli::LockArgs;
use crate::error::Result;
use crate::lock;

/// Execute the `latch release` command.
///
/// Issues a single compare-and-swap back to free. A key that is not
/// currently acquired is a state error with the observed value in the
/// diagnostic; the store is left as it was.
pub async fn cmd_release(args: LockArgs) -> Result<()> {
    let client = super::connect(&args.conn).await?;
    lock::release(&client, &args.key).await
}
