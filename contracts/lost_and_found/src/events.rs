//! Event payloads published by the LostAndFound contract
//!
//! Every event is published with topics `(name, subject)` and one of the structs below
//! as data, so observers receive the payload as a map keyed by field name.

use shared_utils::Events;
use soroban_sdk::{contracttype, Address, Env, String};

use crate::tickets::Ticket;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorCreated {
    pub owner: Address,
    pub low_balance_threshold: Option<i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorTokensAdded {
    pub tokens: i128,
    pub balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorTokensWithdrawn {
    pub tokens: i128,
    pub balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorBalanceLow {
    pub balance: i128,
    pub threshold: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorThresholdUpdated {
    pub threshold: Option<i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorDestroyed {
    pub balance: i128,
}

/// Display fields are flattened so observers can match on `name` directly
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketDeposited {
    pub redeemer: Address,
    pub ticket_id: u64,
    pub asset: Address,
    pub memo: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketRedeemed {
    pub redeemer: Address,
    pub ticket_id: u64,
    pub asset: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinDestroyed {
    pub redeemer: Address,
    pub asset: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketFeeUpdated {
    pub fee: i128,
}

pub(crate) fn depositor_created(e: &Env, owner: &Address, threshold: Option<i128>) {
    Events::emit_for(
        e,
        "DepositorCreated",
        owner,
        DepositorCreated {
            owner: owner.clone(),
            low_balance_threshold: threshold,
        },
    );
}

pub(crate) fn tokens_added(e: &Env, owner: &Address, tokens: i128, balance: i128) {
    Events::emit_for(
        e,
        "DepositorTokensAdded",
        owner,
        DepositorTokensAdded { tokens, balance },
    );
}

pub(crate) fn tokens_withdrawn(e: &Env, owner: &Address, tokens: i128, balance: i128) {
    Events::emit_for(
        e,
        "DepositorTokensWithdrawn",
        owner,
        DepositorTokensWithdrawn { tokens, balance },
    );
}

pub(crate) fn balance_low(e: &Env, owner: &Address, balance: i128, threshold: i128) {
    Events::emit_for(
        e,
        "DepositorBalanceLow",
        owner,
        DepositorBalanceLow { balance, threshold },
    );
}

pub(crate) fn threshold_updated(e: &Env, owner: &Address, threshold: Option<i128>) {
    Events::emit_for(
        e,
        "DepositorThresholdUpdated",
        owner,
        DepositorThresholdUpdated { threshold },
    );
}

pub(crate) fn depositor_destroyed(e: &Env, owner: &Address, balance: i128) {
    Events::emit_for(
        e,
        "DepositorDestroyed",
        owner,
        DepositorDestroyed { balance },
    );
}

pub(crate) fn ticket_deposited(e: &Env, ticket: &Ticket) {
    let (name, description, thumbnail) = match &ticket.display {
        Some(display) => (
            Some(display.name.clone()),
            Some(display.description.clone()),
            Some(display.thumbnail.clone()),
        ),
        None => (None, None, None),
    };

    Events::emit_for(
        e,
        "TicketDeposited",
        &ticket.redeemer,
        TicketDeposited {
            redeemer: ticket.redeemer.clone(),
            ticket_id: ticket.id,
            asset: ticket.asset.clone(),
            memo: ticket.memo.clone(),
            name,
            description,
            thumbnail,
        },
    );
}

pub(crate) fn ticket_redeemed(e: &Env, ticket: &Ticket) {
    Events::emit_for(
        e,
        "TicketRedeemed",
        &ticket.redeemer,
        TicketRedeemed {
            redeemer: ticket.redeemer.clone(),
            ticket_id: ticket.id,
            asset: ticket.asset.clone(),
        },
    );
}

pub(crate) fn bin_destroyed(e: &Env, redeemer: &Address, asset: &Address) {
    Events::emit_for(
        e,
        "BinDestroyed",
        redeemer,
        BinDestroyed {
            redeemer: redeemer.clone(),
            asset: asset.clone(),
        },
    );
}

pub(crate) fn ticket_fee_updated(e: &Env, admin: &Address, fee: i128) {
    Events::emit_for(e, "TicketFeeUpdated", admin, TicketFeeUpdated { fee });
}
