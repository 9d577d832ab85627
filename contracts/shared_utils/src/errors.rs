//! Failure logging shared by the contract error paths

use soroban_sdk::{log, Env, Symbol};

/// Error helper functions
pub struct ErrorHelper;

impl ErrorHelper {
    /// Log a failed operation before its error is returned
    ///
    /// Logs are only recorded in builds with debug assertions (tests and the
    /// `release-with-logs` profile).
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `context` - The entry point that failed, as a valid symbol (`[a-zA-Z0-9_]`)
    /// * `code` - The contract error code being returned
    pub fn log_failure(e: &Env, context: &str, code: u32) {
        log!(e, "operation failed", Symbol::new(e, context), code);
    }
}
