//! Validation utilities for token amounts

/// Validation utility functions
pub struct Validation;

impl Validation {
    /// Check that an amount is greater than zero
    ///
    /// # Arguments
    /// * `amount` - The amount to validate
    pub fn is_positive(amount: i128) -> bool {
        amount > 0
    }

    /// Check that an amount is greater than or equal to zero
    ///
    /// # Arguments
    /// * `amount` - The amount to validate
    pub fn is_non_negative(amount: i128) -> bool {
        amount >= 0
    }

    /// Check that `amount` can be taken out of `available`
    ///
    /// # Arguments
    /// * `amount` - The amount to take
    /// * `available` - What is currently held
    pub fn is_covered(amount: i128, available: i128) -> bool {
        amount <= available
    }
}
