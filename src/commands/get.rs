//! Implementation of the `latch get` command.

use crate::cli::LockArgs;
use crate::error::Result;

/// Execute the `latch get` command.
///
/// Prints the current value of the key to stdout, followed by a
/// newline. Unheld keys print as an empty line. The value can change
/// concurrently; this is an inspection aid, not a synchronization
/// primitive.
pub async fn cmd_get(args: LockArgs) -> Result<()> {
    let client = super::connect(&args.conn).await?;
    let value = client.get(&args.key).await?;

    println!("{}", value);
    Ok(())
}
