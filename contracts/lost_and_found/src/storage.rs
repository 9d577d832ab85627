use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::depositor::DepositorInfo;
use crate::tickets::Ticket;

/// Key of a single redeemer's bin for one asset type
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinKey {
    pub redeemer: Address,
    pub asset: Address,
}

/// Storage keys for the contract
///
/// The admin lives under the shared `ADMIN` key managed by `shared_utils::Storage`.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Token used for Depositor balances and ticket fees
    FeeToken,
    /// Flat fee charged per ticket
    TicketFee,
    /// Last issued ticket id
    TicketCounter,
    /// Depositor record (owner -> DepositorInfo)
    Depositor(Address),
    /// Ticket record (ticket_id -> Ticket)
    Ticket(u64),
    /// Asset types a redeemer holds tickets for
    Shelf(Address),
    /// Ticket ids in a redeemer's bin, in deposit order
    Bin(BinKey),
}

// --- Configuration ---

pub fn set_fee_token(e: &Env, fee_token: &Address) {
    e.storage().instance().set(&DataKey::FeeToken, fee_token);
}

pub fn get_fee_token(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::FeeToken)
}

pub fn set_ticket_fee(e: &Env, fee: i128) {
    e.storage().instance().set(&DataKey::TicketFee, &fee);
}

pub fn get_ticket_fee(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TicketFee)
        .unwrap_or(0)
}

pub fn next_ticket_id(e: &Env) -> u64 {
    let last: u64 = e
        .storage()
        .instance()
        .get(&DataKey::TicketCounter)
        .unwrap_or(0);
    let id = last + 1;
    e.storage().instance().set(&DataKey::TicketCounter, &id);
    id
}

// --- Depositors ---

pub fn has_depositor(e: &Env, owner: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::Depositor(owner.clone()))
}

pub fn get_depositor(e: &Env, owner: &Address) -> Option<DepositorInfo> {
    e.storage()
        .persistent()
        .get(&DataKey::Depositor(owner.clone()))
}

pub fn set_depositor(e: &Env, info: &DepositorInfo) {
    e.storage()
        .persistent()
        .set(&DataKey::Depositor(info.owner.clone()), info);
}

pub fn remove_depositor(e: &Env, owner: &Address) {
    e.storage()
        .persistent()
        .remove(&DataKey::Depositor(owner.clone()));
}

// --- Tickets ---

pub fn get_ticket(e: &Env, ticket_id: u64) -> Option<Ticket> {
    e.storage().persistent().get(&DataKey::Ticket(ticket_id))
}

pub fn set_ticket(e: &Env, ticket: &Ticket) {
    e.storage()
        .persistent()
        .set(&DataKey::Ticket(ticket.id), ticket);
}

pub fn remove_ticket(e: &Env, ticket_id: u64) {
    e.storage().persistent().remove(&DataKey::Ticket(ticket_id));
}

// --- Shelves ---

pub fn get_shelf(e: &Env, redeemer: &Address) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&DataKey::Shelf(redeemer.clone()))
        .unwrap_or(Vec::new(e))
}

pub fn set_shelf(e: &Env, redeemer: &Address, shelf: &Vec<Address>) {
    let key = DataKey::Shelf(redeemer.clone());
    if shelf.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, shelf);
    }
}

// --- Bins ---

fn bin_key(redeemer: &Address, asset: &Address) -> DataKey {
    DataKey::Bin(BinKey {
        redeemer: redeemer.clone(),
        asset: asset.clone(),
    })
}

pub fn get_bin(e: &Env, redeemer: &Address, asset: &Address) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&bin_key(redeemer, asset))
        .unwrap_or(Vec::new(e))
}

pub fn set_bin(e: &Env, redeemer: &Address, asset: &Address, ids: &Vec<u64>) {
    let key = bin_key(redeemer, asset);
    if ids.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, ids);
    }
}
