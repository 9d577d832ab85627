//! Ticket custody: shelves, bins and the asset movement behind them

use shared_utils::{SafeMath, Validation};
use soroban_sdk::{contracttype, token, vec, Address, Env, IntoVal, String, Symbol, Vec};

use crate::{events, storage, LostAndFoundError};

/// What a ticket holds
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TicketItem {
    /// An amount of a token contract
    Fungible(i128),
    /// A token id of a collection contract
    NonFungible(u64),
}

/// Display metadata shown to the redeemer
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Display {
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
    pub id: u64,
    pub redeemer: Address,
    /// Asset contract the item belongs to
    pub asset: Address,
    pub item: TicketItem,
    pub memo: Option<String>,
    pub display: Option<Display>,
    /// Fee escrowed for this ticket
    pub fee: i128,
    /// Receives `fee` back on redemption
    pub fee_repayment: Address,
    pub created_at: u64,
}

/// Item addressed to a redeemer, before any fee is attached
pub struct TicketRequest {
    pub redeemer: Address,
    pub asset: Address,
    pub item: TicketItem,
    pub memo: Option<String>,
    pub display: Option<Display>,
}

pub fn validate_item(item: &TicketItem) -> Result<(), LostAndFoundError> {
    match item {
        TicketItem::Fungible(amount) if !Validation::is_positive(*amount) => {
            Err(LostAndFoundError::InvalidAmount)
        }
        _ => Ok(()),
    }
}

/// Ask the asset contract whether `recipient` can take the item directly
///
/// Assets without a `can_receive` entry point, or whose probe fails, are treated as
/// unable to receive.
pub fn can_receive(e: &Env, asset: &Address, recipient: &Address) -> bool {
    let result = e.try_invoke_contract::<bool, soroban_sdk::Error>(
        asset,
        &Symbol::new(e, "can_receive"),
        vec![e, recipient.into_val(e)],
    );

    matches!(result, Ok(Ok(true)))
}

/// Move an item between two accounts through the asset contract
pub fn move_item(e: &Env, asset: &Address, from: &Address, to: &Address, item: &TicketItem) {
    match item {
        TicketItem::Fungible(amount) => {
            token::Client::new(e, asset).transfer(from, to, amount);
        }
        TicketItem::NonFungible(token_id) => {
            e.invoke_contract::<()>(
                asset,
                &Symbol::new(e, "transfer"),
                vec![e, from.into_val(e), to.into_val(e), token_id.into_val(e)],
            );
        }
    }
}

/// Store a ticket in the redeemer's bin and announce it
///
/// The item and fee must already be in custody.
pub fn open(e: &Env, request: TicketRequest, fee: i128, fee_repayment: &Address) -> Ticket {
    let ticket = Ticket {
        id: storage::next_ticket_id(e),
        redeemer: request.redeemer,
        asset: request.asset,
        item: request.item,
        memo: request.memo,
        display: request.display,
        fee,
        fee_repayment: fee_repayment.clone(),
        created_at: e.ledger().timestamp(),
    };

    let mut bin = storage::get_bin(e, &ticket.redeemer, &ticket.asset);
    if bin.is_empty() {
        let mut shelf = storage::get_shelf(e, &ticket.redeemer);
        shelf.push_back(ticket.asset.clone());
        storage::set_shelf(e, &ticket.redeemer, &shelf);
    }
    bin.push_back(ticket.id);
    storage::set_bin(e, &ticket.redeemer, &ticket.asset, &bin);
    storage::set_ticket(e, &ticket);

    events::ticket_deposited(e, &ticket);
    ticket
}

/// Release a ticket to its redeemer and refund its fee
///
/// # Errors
/// * `TicketNotFound` - If `ticket_id` is not in the redeemer's bin for `asset`
pub fn redeem(
    e: &Env,
    fee_token: &Address,
    redeemer: &Address,
    asset: &Address,
    ticket_id: u64,
) -> Result<Ticket, LostAndFoundError> {
    let mut bin = storage::get_bin(e, redeemer, asset);
    let index = bin
        .first_index_of(ticket_id)
        .ok_or(LostAndFoundError::TicketNotFound)?;
    let ticket = storage::get_ticket(e, ticket_id).ok_or(LostAndFoundError::TicketNotFound)?;

    bin.remove(index);
    storage::set_bin(e, redeemer, asset, &bin);
    storage::remove_ticket(e, ticket_id);
    let bin_emptied = bin.is_empty();
    if bin_emptied {
        let mut shelf = storage::get_shelf(e, redeemer);
        if let Some(position) = shelf.first_index_of(asset) {
            shelf.remove(position);
        }
        storage::set_shelf(e, redeemer, &shelf);
    }

    let custody = e.current_contract_address();
    move_item(e, asset, &custody, redeemer, &ticket.item);
    if ticket.fee > 0 {
        token::Client::new(e, fee_token).transfer(&custody, &ticket.fee_repayment, &ticket.fee);
    }

    events::ticket_redeemed(e, &ticket);
    if bin_emptied {
        events::bin_destroyed(e, redeemer, asset);
    }

    Ok(ticket)
}

pub fn redeemable_types(e: &Env, redeemer: &Address) -> Vec<Address> {
    storage::get_shelf(e, redeemer)
}

pub fn bin_ids(e: &Env, redeemer: &Address, asset: &Address) -> Vec<u64> {
    storage::get_bin(e, redeemer, asset)
}

pub fn bin_tickets(e: &Env, redeemer: &Address, asset: &Address) -> Vec<Ticket> {
    let mut tickets = Vec::new(e);
    for id in storage::get_bin(e, redeemer, asset).iter() {
        if let Some(ticket) = storage::get_ticket(e, id) {
            tickets.push_back(ticket);
        }
    }
    tickets
}

/// Look up a ticket in a specific bin
///
/// # Errors
/// * `TicketNotFound` - If `ticket_id` is not in the redeemer's bin for `asset`
pub fn find_in_bin(
    e: &Env,
    redeemer: &Address,
    asset: &Address,
    ticket_id: u64,
) -> Result<Ticket, LostAndFoundError> {
    if !storage::get_bin(e, redeemer, asset).contains(ticket_id) {
        return Err(LostAndFoundError::TicketNotFound);
    }
    storage::get_ticket(e, ticket_id).ok_or(LostAndFoundError::TicketNotFound)
}

/// Sum of the fungible amounts held in a bin
pub fn bin_balance(
    e: &Env,
    redeemer: &Address,
    asset: &Address,
) -> Result<i128, LostAndFoundError> {
    let tickets = bin_tickets(e, redeemer, asset);
    let amounts = tickets
        .iter()
        .filter_map(|ticket| match ticket.item {
            TicketItem::Fungible(amount) => Some(amount),
            TicketItem::NonFungible(_) => None,
        });
    SafeMath::sum(amounts).ok_or(LostAndFoundError::BalanceOverflow)
}

/// NFT ids held in a bin, in deposit order
pub fn bin_token_ids(e: &Env, redeemer: &Address, asset: &Address) -> Vec<u64> {
    let mut ids = Vec::new(e);
    for ticket in bin_tickets(e, redeemer, asset).iter() {
        if let TicketItem::NonFungible(token_id) = ticket.item {
            ids.push_back(token_id);
        }
    }
    ids
}
