//! Access control patterns and utilities

use super::storage::Storage;
use soroban_sdk::{Address, Env};

/// Access control helper functions
pub struct AccessControl;

impl AccessControl {
    /// Load the admin and require its authorization
    ///
    /// # Arguments
    /// * `e` - The environment
    ///
    /// # Returns
    /// The admin address, or `None` if the contract was never initialized
    pub fn authorize_admin(e: &Env) -> Option<Address> {
        let admin = Storage::get_admin(e)?;
        admin.require_auth();
        Some(admin)
    }
}
