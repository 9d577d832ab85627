#![no_std]

//! ExampleNFT: a collection whose holders must set up a collection to receive tokens

use shared_utils::{AccessControl, Events, Storage};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, String, Vec,
};


// ============================================================================
// Error Types
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum NftError {
    /// Contract has not been initialized
    NotInitialized = 1,
    /// Contract has already been initialized
    AlreadyInitialized = 2,
    /// Account has no collection
    CollectionNotFound = 3,
    /// NFT with the given id does not exist
    NftNotFound = 4,
    /// Caller is not the owner of the NFT
    NotOwner = 5,
}

// ============================================================================
// Data Types
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftDisplay {
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Minted {
    pub id: u64,
    pub to: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdraw {
    pub id: u64,
    pub from: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub id: u64,
    pub to: Address,
}

#[contracttype]
pub enum DataKey {
    /// Next id to mint
    NextId,
    /// Ids held by an account (owner -> Vec<u64>); present only while the collection exists
    Collection(Address),
    /// Owner of an NFT (id -> Address)
    Owner(u64),
    /// Display metadata (id -> NftDisplay)
    Display(u64),
    TotalSupply,
}

// ============================================================================
// Storage Module
// ============================================================================

mod storage {
    use super::*;

    pub fn take_next_id(e: &Env) -> u64 {
        let id: u64 = e.storage().instance().get(&DataKey::NextId).unwrap_or(0);
        e.storage().instance().set(&DataKey::NextId, &(id + 1));
        id
    }

    pub fn get_collection(e: &Env, owner: &Address) -> Option<Vec<u64>> {
        e.storage()
            .persistent()
            .get(&DataKey::Collection(owner.clone()))
    }

    pub fn set_collection(e: &Env, owner: &Address, ids: &Vec<u64>) {
        e.storage()
            .persistent()
            .set(&DataKey::Collection(owner.clone()), ids);
    }

    pub fn remove_collection(e: &Env, owner: &Address) {
        e.storage()
            .persistent()
            .remove(&DataKey::Collection(owner.clone()));
    }

    pub fn get_owner(e: &Env, id: u64) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Owner(id))
    }

    pub fn set_owner(e: &Env, id: u64, owner: &Address) {
        e.storage().persistent().set(&DataKey::Owner(id), owner);
    }

    pub fn get_display(e: &Env, id: u64) -> Option<NftDisplay> {
        e.storage().persistent().get(&DataKey::Display(id))
    }

    pub fn set_display(e: &Env, id: u64, display: &NftDisplay) {
        e.storage().persistent().set(&DataKey::Display(id), display);
    }

    pub fn burn(e: &Env, id: u64) {
        e.storage().persistent().remove(&DataKey::Owner(id));
        e.storage().persistent().remove(&DataKey::Display(id));
    }

    pub fn get_total_supply(e: &Env) -> u64 {
        e.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn set_total_supply(e: &Env, supply: u64) {
        e.storage().instance().set(&DataKey::TotalSupply, &supply);
    }
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct ExampleNFT;

#[contractimpl]
impl ExampleNFT {
    /// # Errors
    /// * `AlreadyInitialized` - If the contract has already been initialized
    pub fn initialize(e: Env, admin: Address) -> Result<(), NftError> {
        if Storage::has_admin(&e) {
            return Err(NftError::AlreadyInitialized);
        }
        Storage::set_admin(&e, &admin);
        Ok(())
    }

    /// Mint a new NFT into `to`'s collection. Admin only.
    ///
    /// # Returns
    /// The new id; ids start at 0
    pub fn mint(e: Env, to: Address, display: NftDisplay) -> Result<u64, NftError> {
        AccessControl::authorize_admin(&e).ok_or(NftError::NotInitialized)?;
        let mut ids = storage::get_collection(&e, &to).ok_or(NftError::CollectionNotFound)?;

        let id = storage::take_next_id(&e);
        ids.push_back(id);
        storage::set_collection(&e, &to, &ids);
        storage::set_owner(&e, id, &to);
        storage::set_display(&e, id, &display);
        storage::set_total_supply(&e, storage::get_total_supply(&e) + 1);

        Events::emit_for(&e, "Minted", &to, Minted { id, to: to.clone() });

        Ok(id)
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Create an empty collection; does nothing if one already exists
    pub fn setup_collection(e: Env, owner: Address) {
        owner.require_auth();
        if storage::get_collection(&e, &owner).is_none() {
            storage::set_collection(&e, &owner, &Vec::new(&e));
        }
    }

    /// Remove the collection and burn every NFT in it
    ///
    /// # Returns
    /// The number of burned NFTs
    pub fn destroy_collection(e: Env, owner: Address) -> Result<u32, NftError> {
        owner.require_auth();
        let ids = storage::get_collection(&e, &owner).ok_or(NftError::CollectionNotFound)?;

        for id in ids.iter() {
            storage::burn(&e, id);
        }
        storage::remove_collection(&e, &owner);
        let supply = storage::get_total_supply(&e).saturating_sub(ids.len() as u64);
        storage::set_total_supply(&e, supply);

        Ok(ids.len())
    }

    pub fn has_collection(e: Env, owner: Address) -> bool {
        storage::get_collection(&e, &owner).is_some()
    }

    /// Whether NFTs can be sent to `owner` directly
    pub fn can_receive(e: Env, owner: Address) -> bool {
        Self::has_collection(e, owner)
    }

    pub fn get_account_ids(e: Env, owner: Address) -> Result<Vec<u64>, NftError> {
        storage::get_collection(&e, &owner).ok_or(NftError::CollectionNotFound)
    }

    pub fn owner_of(e: Env, token_id: u64) -> Result<Address, NftError> {
        storage::get_owner(&e, token_id).ok_or(NftError::NftNotFound)
    }

    pub fn display(e: Env, token_id: u64) -> Result<NftDisplay, NftError> {
        storage::get_display(&e, token_id).ok_or(NftError::NftNotFound)
    }

    pub fn total_supply(e: Env) -> u64 {
        storage::get_total_supply(&e)
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    /// Move `token_id` from `from`'s collection into `to`'s
    ///
    /// # Errors
    /// * `NftNotFound` - If the NFT does not exist
    /// * `NotOwner` - If `from` does not own it
    /// * `CollectionNotFound` - If `to` has no collection
    pub fn transfer(e: Env, from: Address, to: Address, token_id: u64) -> Result<(), NftError> {
        from.require_auth();

        let owner = storage::get_owner(&e, token_id).ok_or(NftError::NftNotFound)?;
        if owner != from {
            return Err(NftError::NotOwner);
        }
        let mut from_ids =
            storage::get_collection(&e, &from).ok_or(NftError::CollectionNotFound)?;
        if storage::get_collection(&e, &to).is_none() {
            return Err(NftError::CollectionNotFound);
        }

        if let Some(index) = from_ids.first_index_of(token_id) {
            from_ids.remove(index);
        }
        storage::set_collection(&e, &from, &from_ids);
        Events::emit_for(&e, "Withdraw", &from, Withdraw { id: token_id, from: from.clone() });

        let mut to_ids = storage::get_collection(&e, &to).ok_or(NftError::CollectionNotFound)?;
        to_ids.push_back(token_id);
        storage::set_collection(&e, &to, &to_ids);
        storage::set_owner(&e, token_id, &to);
        Events::emit_for(&e, "Deposit", &to, Deposit { id: token_id, to: to.clone() });

        Ok(())
    }
}
