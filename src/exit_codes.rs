//! Exit code constants for the promptforge CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or malformed document)
//! - 2: Validation failure (schema incompatibility detected)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing files, or malformed documents.
pub const USER_ERROR: i32 = 1;

/// Validation failure: breaking schema changes or schema mismatch detected.
pub const VALIDATION_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(VALIDATION_FAILURE, 2);
    }
}
