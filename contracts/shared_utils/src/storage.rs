//! Storage helper utilities for common storage patterns

use soroban_sdk::{Address, Env};

/// Storage key constants
pub mod keys {
    use soroban_sdk::{symbol_short, Symbol};

    pub const ADMIN: Symbol = symbol_short!("ADMIN");
}

/// Storage helper functions
pub struct Storage;

impl Storage {
    /// Check if an admin has been recorded, which is how the contracts in this
    /// workspace mark themselves initialized
    ///
    /// # Arguments
    /// * `e` - The environment
    pub fn has_admin(e: &Env) -> bool {
        e.storage().instance().has(&keys::ADMIN)
    }

    /// Get admin address from storage
    ///
    /// # Arguments
    /// * `e` - The environment
    ///
    /// # Returns
    /// The admin address, or `None` if the contract was never initialized
    pub fn get_admin(e: &Env) -> Option<Address> {
        e.storage().instance().get::<_, Address>(&keys::ADMIN)
    }

    /// Set admin address in storage
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `admin` - The admin address
    pub fn set_admin(e: &Env, admin: &Address) {
        e.storage().instance().set(&keys::ADMIN, admin);
    }
}
