#![no_std]

//! ExampleToken: a fungible token whose holders must set up a vault to receive it
//!
//! `transfer(from, to, amount)` matches the token interface, so the LostAndFound
//! contract can move ExampleToken through `token::Client` like any other token.

use shared_utils::{AccessControl, Events, SafeMath, Storage, Validation};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env};


// ============================================================================
// Error Types
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    /// Contract has not been initialized
    NotInitialized = 1,
    /// Contract has already been initialized
    AlreadyInitialized = 2,
    /// Amount must be positive
    InvalidAmount = 3,
    /// Account has no vault
    VaultNotFound = 4,
    /// Vault balance does not cover the amount
    InsufficientBalance = 5,
    /// Supply or balance overflowed
    Overflow = 6,
}

// ============================================================================
// Events
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensWithdrawn {
    pub amount: i128,
    pub from: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensDeposited {
    pub amount: i128,
    pub to: Address,
}

#[contracttype]
pub enum DataKey {
    /// Vault balance (owner -> i128); present only while the vault exists
    Vault(Address),
    TotalSupply,
}

// ============================================================================
// Storage Module
// ============================================================================

mod storage {
    use super::*;

    pub fn get_vault(e: &Env, owner: &Address) -> Option<i128> {
        e.storage()
            .persistent()
            .get(&DataKey::Vault(owner.clone()))
    }

    pub fn set_vault(e: &Env, owner: &Address, balance: i128) {
        e.storage()
            .persistent()
            .set(&DataKey::Vault(owner.clone()), &balance);
    }

    pub fn remove_vault(e: &Env, owner: &Address) {
        e.storage()
            .persistent()
            .remove(&DataKey::Vault(owner.clone()));
    }

    pub fn get_total_supply(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn set_total_supply(e: &Env, supply: i128) {
        e.storage().instance().set(&DataKey::TotalSupply, &supply);
    }
}

fn credit(e: &Env, to: &Address, amount: i128) -> Result<(), TokenError> {
    let balance = storage::get_vault(e, to).ok_or(TokenError::VaultNotFound)?;
    let balance = SafeMath::add(balance, amount).ok_or(TokenError::Overflow)?;
    storage::set_vault(e, to, balance);
    Events::emit_for(
        e,
        "TokensDeposited",
        to,
        TokensDeposited {
            amount,
            to: to.clone(),
        },
    );
    Ok(())
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct ExampleToken;

#[contractimpl]
impl ExampleToken {
    /// # Errors
    /// * `AlreadyInitialized` - If the contract has already been initialized
    pub fn initialize(e: Env, admin: Address) -> Result<(), TokenError> {
        if Storage::has_admin(&e) {
            return Err(TokenError::AlreadyInitialized);
        }
        Storage::set_admin(&e, &admin);
        storage::set_total_supply(&e, 0);
        Ok(())
    }

    /// Mint `amount` into `to`'s vault. Admin only.
    pub fn mint(e: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        AccessControl::authorize_admin(&e).ok_or(TokenError::NotInitialized)?;
        if !Validation::is_positive(amount) {
            return Err(TokenError::InvalidAmount);
        }

        let supply =
            SafeMath::add(storage::get_total_supply(&e), amount).ok_or(TokenError::Overflow)?;
        credit(&e, &to, amount)?;
        storage::set_total_supply(&e, supply);
        Ok(())
    }

    // ========================================================================
    // Vaults
    // ========================================================================

    /// Create an empty vault; does nothing if one already exists
    pub fn setup_vault(e: Env, owner: Address) {
        owner.require_auth();
        if storage::get_vault(&e, &owner).is_none() {
            storage::set_vault(&e, &owner, 0);
        }
    }

    /// Remove the vault and burn what it held
    ///
    /// # Returns
    /// The burned amount
    pub fn destroy_vault(e: Env, owner: Address) -> Result<i128, TokenError> {
        owner.require_auth();
        let balance = storage::get_vault(&e, &owner).ok_or(TokenError::VaultNotFound)?;

        storage::remove_vault(&e, &owner);
        let supply =
            SafeMath::sub(storage::get_total_supply(&e), balance).ok_or(TokenError::Overflow)?;
        storage::set_total_supply(&e, supply);

        Ok(balance)
    }

    pub fn has_vault(e: Env, owner: Address) -> bool {
        storage::get_vault(&e, &owner).is_some()
    }

    /// Whether tokens can be sent to `owner` directly
    pub fn can_receive(e: Env, owner: Address) -> bool {
        Self::has_vault(e, owner)
    }

    pub fn get_vault_balance(e: Env, owner: Address) -> Result<i128, TokenError> {
        storage::get_vault(&e, &owner).ok_or(TokenError::VaultNotFound)
    }

    // ========================================================================
    // Token Interface
    // ========================================================================

    /// Balance of `id`, zero without a vault
    pub fn balance(e: Env, id: Address) -> i128 {
        storage::get_vault(&e, &id).unwrap_or(0)
    }

    /// # Errors
    /// * `InvalidAmount` - If `amount` is not positive
    /// * `VaultNotFound` - If either side has no vault
    /// * `InsufficientBalance` - If `from` holds less than `amount`
    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        if !Validation::is_positive(amount) {
            return Err(TokenError::InvalidAmount);
        }

        let balance = storage::get_vault(&e, &from).ok_or(TokenError::VaultNotFound)?;
        if !Validation::is_covered(amount, balance) {
            return Err(TokenError::InsufficientBalance);
        }
        if storage::get_vault(&e, &to).is_none() {
            return Err(TokenError::VaultNotFound);
        }

        storage::set_vault(&e, &from, balance - amount);
        Events::emit_for(
            &e,
            "TokensWithdrawn",
            &from,
            TokensWithdrawn {
                amount,
                from: from.clone(),
            },
        );
        credit(&e, &to, amount)
    }

    pub fn total_supply(e: Env) -> i128 {
        storage::get_total_supply(&e)
    }
}
