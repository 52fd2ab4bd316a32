//! Exit code constants for the latch CLI.
//!
//! The lock commands expose a deliberately narrow surface:
//! - 0: Success
//! - 1: Any failure (usage, connection, API, state mismatch, cancelled wait)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any failure: usage error, connection or API failure, state mismatch,
/// or a cancelled wait.
pub const FAILURE: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_the_cli_contract() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(FAILURE, 1);
    }
}
