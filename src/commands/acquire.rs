//! Implementation of the `latch acquire` command.

use crate::cli::LockArgs;
use crate::error::{LatchError, Result};
use crate::lock;

/// Execute the `latch acquire` command.
///
/// Blocks until the lock is acquired, a fatal error occurs, or the user
/// interrupts the wait with Ctrl-C. The interrupt is reported as a
/// cancellation, distinct from leader API failures.
pub async fn cmd_acquire(args: LockArgs) -> Result<()> {
    let client = super::connect(&args.conn).await?;

    tokio::select! {
        res = lock::acquire(&client, &args.key) => res,
        _ = tokio::signal::ctrl_c() => Err(LatchError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConnectionArgs;
    use crate::lock::ACQUIRED;
    use crate::test_support::TestLeader;

    #[tokio::test]
    async fn acquire_takes_a_free_key() {
        let leader = TestLeader::spawn().await;
        let args = LockArgs {
            key: "llama".to_string(),
            conn: ConnectionArgs {
                socket_path: leader.path.clone(),
                token: None,
            },
        };

        cmd_acquire(args).await.unwrap();
        assert_eq!(leader.value("llama"), ACQUIRED);
    }
}
