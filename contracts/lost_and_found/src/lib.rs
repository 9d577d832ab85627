#![no_std]

//! LostAndFound contract
//!
//! Holds per-owner Depositor balances and takes custody of assets that could not be
//! delivered, issuing tickets their redeemers can claim later.

use shared_utils::{AccessControl, ErrorHelper, Storage, Validation};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token, Address, Env, String, Vec,
};

mod depositor;
mod events;
mod storage;
mod tickets;


pub use depositor::{BalanceLedger, DepositorInfo, LowBalance, ThresholdMonitor};
pub use events::*;
pub use tickets::{Display, Ticket, TicketItem};

use depositor::Depositor;
use tickets::TicketRequest;

// ============================================================================
// Error Types
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LostAndFoundError {
    /// Contract has not been initialized
    NotInitialized = 1,
    /// Contract has already been initialized
    AlreadyInitialized = 2,
    /// Amount must be positive (or non-negative for fees)
    InvalidAmount = 3,
    /// Owner already has a Depositor
    DepositorAlreadyExists = 4,
    /// Owner has no Depositor
    DepositorNotFound = 5,
    /// Depositor balance does not cover the amount
    InsufficientFunds = 6,
    /// Ticket is not in the given bin
    TicketNotFound = 7,
    /// Ticket belongs to another redeemer
    Unauthorized = 8,
    /// Balance arithmetic overflowed
    BalanceOverflow = 9,
}

// ============================================================================
// Data Types
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Token used for Depositor balances and ticket fees
    pub fee_token: Address,
    /// Flat fee escrowed per ticket and refunded on redemption
    pub ticket_fee: i128,
}

fn load_config(e: &Env) -> Result<Config, LostAndFoundError> {
    let admin = Storage::get_admin(e).ok_or(LostAndFoundError::NotInitialized)?;
    let fee_token = storage::get_fee_token(e).ok_or(LostAndFoundError::NotInitialized)?;
    Ok(Config {
        admin,
        fee_token,
        ticket_fee: storage::get_ticket_fee(e),
    })
}

fn log_failure(e: &Env, context: &str, err: LostAndFoundError) -> LostAndFoundError {
    ErrorHelper::log_failure(e, context, err as u32);
    err
}

/// Pull fee tokens from `from` into custody
fn collect(e: &Env, config: &Config, from: &Address, amount: i128) {
    token::Client::new(e, &config.fee_token).transfer(from, &e.current_contract_address(), &amount);
}

/// Pay fee tokens out of custody to `to`
fn release(e: &Env, config: &Config, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, &config.fee_token).transfer(
            &e.current_contract_address(),
            to,
            &amount,
        );
    }
}

fn fund_depositor(
    e: &Env,
    config: &Config,
    from: &Address,
    owner: &Address,
    amount: i128,
) -> Result<i128, LostAndFoundError> {
    let mut depositor = Depositor::load(e, owner)?;
    let balance = depositor.deposit(e, amount)?;
    collect(e, config, from, amount);
    Ok(balance)
}

/// Take the item and the ticket fee from `payer`
fn open_paid_ticket(
    e: &Env,
    config: &Config,
    payer: &Address,
    request: TicketRequest,
) -> Result<u64, LostAndFoundError> {
    tickets::validate_item(&request.item)?;

    tickets::move_item(e, &request.asset, payer, &e.current_contract_address(), &request.item);
    if config.ticket_fee > 0 {
        collect(e, config, payer, config.ticket_fee);
    }

    Ok(tickets::open(e, request, config.ticket_fee, payer).id)
}

/// Take the item from `owner` and draw the ticket fee from their Depositor
fn open_depositor_ticket(
    e: &Env,
    config: &Config,
    owner: &Address,
    request: TicketRequest,
) -> Result<u64, LostAndFoundError> {
    tickets::validate_item(&request.item)?;

    let mut depositor = Depositor::load(e, owner)?;
    if config.ticket_fee > 0 {
        depositor.withdraw(e, config.ticket_fee)?;
    }

    tickets::move_item(e, &request.asset, owner, &e.current_contract_address(), &request.item);

    Ok(tickets::open(e, request, config.ticket_fee, owner).id)
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct LostAndFoundContract;

#[contractimpl]
impl LostAndFoundContract {
    // ========================================================================
    // Initialization & Configuration
    // ========================================================================

    /// Initialize the contract
    ///
    /// # Arguments
    /// * `admin` - Address allowed to change the ticket fee
    /// * `fee_token` - Token contract used for Depositor balances and ticket fees
    /// * `ticket_fee` - Flat fee per ticket, `>= 0`
    ///
    /// # Errors
    /// * `AlreadyInitialized` - If the contract has already been initialized
    /// * `InvalidAmount` - If `ticket_fee` is negative
    pub fn initialize(
        e: Env,
        admin: Address,
        fee_token: Address,
        ticket_fee: i128,
    ) -> Result<(), LostAndFoundError> {
        if Storage::has_admin(&e) {
            return Err(LostAndFoundError::AlreadyInitialized);
        }
        if !Validation::is_non_negative(ticket_fee) {
            return Err(LostAndFoundError::InvalidAmount);
        }

        Storage::set_admin(&e, &admin);
        storage::set_fee_token(&e, &fee_token);
        storage::set_ticket_fee(&e, ticket_fee);

        Ok(())
    }

    /// Change the flat ticket fee. Admin only.
    ///
    /// Tickets already issued keep the fee they escrowed.
    pub fn set_ticket_fee(e: Env, fee: i128) -> Result<(), LostAndFoundError> {
        let admin = AccessControl::authorize_admin(&e).ok_or(LostAndFoundError::NotInitialized)?;
        if !Validation::is_non_negative(fee) {
            return Err(log_failure(&e, "set_ticket_fee", LostAndFoundError::InvalidAmount));
        }

        storage::set_ticket_fee(&e, fee);
        events::ticket_fee_updated(&e, &admin, fee);

        Ok(())
    }

    pub fn get_config(e: Env) -> Result<Config, LostAndFoundError> {
        load_config(&e)
    }

    pub fn get_ticket_fee(e: Env) -> Result<i128, LostAndFoundError> {
        Ok(load_config(&e)?.ticket_fee)
    }

    // ========================================================================
    // Depositor
    // ========================================================================

    /// Create a Depositor for `owner` with a zero balance
    ///
    /// # Errors
    /// * `DepositorAlreadyExists` - If `owner` already has one
    pub fn setup_depositor(
        e: Env,
        owner: Address,
        low_balance_threshold: Option<i128>,
    ) -> Result<(), LostAndFoundError> {
        load_config(&e)?;
        owner.require_auth();

        Depositor::create(&e, &owner, low_balance_threshold)
            .map_err(|err| log_failure(&e, "setup_depositor", err))?;

        Ok(())
    }

    /// Move `amount` fee tokens from `owner` into their Depositor
    ///
    /// # Returns
    /// The new Depositor balance
    ///
    /// # Errors
    /// * `InvalidAmount` - If `amount` is not positive
    /// * `DepositorNotFound` - If `owner` has no Depositor
    pub fn add_tokens(e: Env, owner: Address, amount: i128) -> Result<i128, LostAndFoundError> {
        let config = load_config(&e)?;
        owner.require_auth();

        fund_depositor(&e, &config, &owner, &owner, amount)
            .map_err(|err| log_failure(&e, "add_tokens", err))
    }

    /// Fund someone else's Depositor with `from`'s fee tokens
    pub fn add_tokens_public(
        e: Env,
        from: Address,
        owner: Address,
        amount: i128,
    ) -> Result<i128, LostAndFoundError> {
        let config = load_config(&e)?;
        from.require_auth();

        fund_depositor(&e, &config, &from, &owner, amount)
            .map_err(|err| log_failure(&e, "add_tokens_public", err))
    }

    /// Pay `amount` out of the Depositor back to `owner`
    ///
    /// # Errors
    /// * `InvalidAmount` - If `amount` is not positive
    /// * `DepositorNotFound` - If `owner` has no Depositor
    /// * `InsufficientFunds` - If the balance does not cover `amount`
    pub fn withdraw_tokens(
        e: Env,
        owner: Address,
        amount: i128,
    ) -> Result<i128, LostAndFoundError> {
        let config = load_config(&e)?;
        owner.require_auth();

        let mut depositor =
            Depositor::load(&e, &owner).map_err(|err| log_failure(&e, "withdraw_tokens", err))?;
        let balance = depositor
            .withdraw(&e, amount)
            .map_err(|err| log_failure(&e, "withdraw_tokens", err))?;
        release(&e, &config, &owner, amount);

        Ok(balance)
    }

    /// Replace the low-balance threshold; `None` disables alerting
    pub fn set_low_balance_threshold(
        e: Env,
        owner: Address,
        threshold: Option<i128>,
    ) -> Result<(), LostAndFoundError> {
        load_config(&e)?;
        owner.require_auth();

        let mut depositor = Depositor::load(&e, &owner)
            .map_err(|err| log_failure(&e, "set_low_balance_threshold", err))?;
        depositor.set_threshold(&e, threshold);

        Ok(())
    }

    /// Remove the Depositor and pay its whole balance back to `owner`
    ///
    /// # Returns
    /// The released balance
    pub fn destroy_depositor(e: Env, owner: Address) -> Result<i128, LostAndFoundError> {
        let config = load_config(&e)?;
        owner.require_auth();

        let depositor = Depositor::load(&e, &owner)
            .map_err(|err| log_failure(&e, "destroy_depositor", err))?;
        let released = depositor.destroy(&e);
        release(&e, &config, &owner, released);

        Ok(released)
    }

    pub fn get_depositor_balance(e: Env, owner: Address) -> Result<i128, LostAndFoundError> {
        Ok(Depositor::load(&e, &owner)?.balance())
    }

    pub fn get_low_balance_threshold(
        e: Env,
        owner: Address,
    ) -> Result<Option<i128>, LostAndFoundError> {
        Ok(Depositor::load(&e, &owner)?.info().low_balance_threshold)
    }

    pub fn get_depositor(e: Env, owner: Address) -> Result<DepositorInfo, LostAndFoundError> {
        Ok(Depositor::load(&e, &owner)?.info())
    }

    pub fn has_depositor(e: Env, owner: Address) -> bool {
        storage::has_depositor(&e, &owner)
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Put an item into custody for `redeemer`, paying the ticket fee directly
    ///
    /// # Returns
    /// The new ticket id
    ///
    /// # Errors
    /// * `InvalidAmount` - If a fungible amount is not positive
    pub fn deposit(
        e: Env,
        payer: Address,
        redeemer: Address,
        asset: Address,
        item: TicketItem,
        memo: Option<String>,
        display: Option<Display>,
    ) -> Result<u64, LostAndFoundError> {
        let config = load_config(&e)?;
        payer.require_auth();

        let request = TicketRequest {
            redeemer,
            asset,
            item,
            memo,
            display,
        };
        open_paid_ticket(&e, &config, &payer, request)
            .map_err(|err| log_failure(&e, "deposit", err))
    }

    /// Put an item into custody for `redeemer`, drawing the ticket fee from `owner`'s
    /// Depositor
    ///
    /// # Errors
    /// * `InvalidAmount` - If a fungible amount is not positive
    /// * `DepositorNotFound` - If `owner` has no Depositor
    /// * `InsufficientFunds` - If the Depositor cannot cover the fee
    pub fn deposit_with_depositor(
        e: Env,
        owner: Address,
        redeemer: Address,
        asset: Address,
        item: TicketItem,
        memo: Option<String>,
        display: Option<Display>,
    ) -> Result<u64, LostAndFoundError> {
        let config = load_config(&e)?;
        owner.require_auth();

        let request = TicketRequest {
            redeemer,
            asset,
            item,
            memo,
            display,
        };
        open_depositor_ticket(&e, &config, &owner, request)
            .map_err(|err| log_failure(&e, "deposit_with_depositor", err))
    }

    /// Deliver an item directly when the recipient can receive it, otherwise deposit it
    ///
    /// # Returns
    /// `None` on direct delivery, or the id of the ticket that was opened
    pub fn try_send(
        e: Env,
        payer: Address,
        recipient: Address,
        asset: Address,
        item: TicketItem,
        memo: Option<String>,
        display: Option<Display>,
    ) -> Result<Option<u64>, LostAndFoundError> {
        let config = load_config(&e)?;
        payer.require_auth();
        tickets::validate_item(&item).map_err(|err| log_failure(&e, "try_send", err))?;

        if tickets::can_receive(&e, &asset, &recipient) {
            tickets::move_item(&e, &asset, &payer, &recipient, &item);
            return Ok(None);
        }

        let request = TicketRequest {
            redeemer: recipient,
            asset,
            item,
            memo,
            display,
        };
        let ticket_id = open_paid_ticket(&e, &config, &payer, request)
            .map_err(|err| log_failure(&e, "try_send", err))?;
        Ok(Some(ticket_id))
    }

    /// `try_send` with the ticket fee drawn from `owner`'s Depositor
    pub fn try_send_with_depositor(
        e: Env,
        owner: Address,
        recipient: Address,
        asset: Address,
        item: TicketItem,
        memo: Option<String>,
        display: Option<Display>,
    ) -> Result<Option<u64>, LostAndFoundError> {
        let config = load_config(&e)?;
        owner.require_auth();
        tickets::validate_item(&item)
            .map_err(|err| log_failure(&e, "try_send_with_depositor", err))?;

        if tickets::can_receive(&e, &asset, &recipient) {
            tickets::move_item(&e, &asset, &owner, &recipient, &item);
            return Ok(None);
        }

        let request = TicketRequest {
            redeemer: recipient,
            asset,
            item,
            memo,
            display,
        };
        let ticket_id = open_depositor_ticket(&e, &config, &owner, request)
            .map_err(|err| log_failure(&e, "try_send_with_depositor", err))?;
        Ok(Some(ticket_id))
    }

    /// Claim one ticket: the item goes to the redeemer, the fee back to its payer
    ///
    /// # Errors
    /// * `TicketNotFound` - If `ticket_id` is not in the redeemer's bin for `asset`
    pub fn redeem(
        e: Env,
        redeemer: Address,
        asset: Address,
        ticket_id: u64,
    ) -> Result<(), LostAndFoundError> {
        let config = load_config(&e)?;
        redeemer.require_auth();

        tickets::redeem(&e, &config.fee_token, &redeemer, &asset, ticket_id)
            .map_err(|err| log_failure(&e, "redeem", err))?;

        Ok(())
    }

    /// Claim up to `max` tickets of one bin (all of them when `None`), oldest first
    ///
    /// # Returns
    /// The number of tickets redeemed
    pub fn redeem_all(
        e: Env,
        redeemer: Address,
        asset: Address,
        max: Option<u32>,
    ) -> Result<u32, LostAndFoundError> {
        let config = load_config(&e)?;
        redeemer.require_auth();

        let ids = tickets::bin_ids(&e, &redeemer, &asset);
        let limit = max.unwrap_or(ids.len()).min(ids.len());
        for id in ids.iter().take(limit as usize) {
            tickets::redeem(&e, &config.fee_token, &redeemer, &asset, id)?;
        }

        Ok(limit)
    }

    /// Claim every ticket on the redeemer's shelf
    ///
    /// # Returns
    /// The number of tickets redeemed
    pub fn clear_all_tickets(e: Env, redeemer: Address) -> Result<u32, LostAndFoundError> {
        let config = load_config(&e)?;
        redeemer.require_auth();

        let mut count = 0u32;
        for asset in tickets::redeemable_types(&e, &redeemer).iter() {
            for id in tickets::bin_ids(&e, &redeemer, &asset).iter() {
                tickets::redeem(&e, &config.fee_token, &redeemer, &asset, id)?;
                count += 1;
            }
        }

        Ok(count)
    }

    // ========================================================================
    // Ticket Queries
    // ========================================================================

    /// Asset types `addr` holds at least one ticket for
    pub fn get_redeemable_types(e: Env, addr: Address) -> Vec<Address> {
        tickets::redeemable_types(&e, &addr)
    }

    /// # Errors
    /// * `TicketNotFound` - If no such ticket exists
    /// * `Unauthorized` - If the ticket belongs to another redeemer
    pub fn get_ticket(e: Env, addr: Address, ticket_id: u64) -> Result<Ticket, LostAndFoundError> {
        let ticket = storage::get_ticket(&e, ticket_id).ok_or(LostAndFoundError::TicketNotFound)?;
        if ticket.redeemer != addr {
            return Err(LostAndFoundError::Unauthorized);
        }
        Ok(ticket)
    }

    pub fn get_tickets(e: Env, addr: Address, asset: Address) -> Vec<Ticket> {
        tickets::bin_tickets(&e, &addr, &asset)
    }

    pub fn get_bin_balance(
        e: Env,
        addr: Address,
        asset: Address,
    ) -> Result<i128, LostAndFoundError> {
        tickets::bin_balance(&e, &addr, &asset)
    }

    pub fn get_bin_token_ids(e: Env, addr: Address, asset: Address) -> Vec<u64> {
        tickets::bin_token_ids(&e, &addr, &asset)
    }

    pub fn get_fee_repayment_address(
        e: Env,
        addr: Address,
        asset: Address,
        ticket_id: u64,
    ) -> Result<Address, LostAndFoundError> {
        Ok(tickets::find_in_bin(&e, &addr, &asset, ticket_id)?.fee_repayment)
    }
}
