//! Error and Edge Case Tests
//!
//! These tests verify:
//! - Initialization guards
//! - Invalid amounts and missing Depositors
//! - Ticket lookups against the wrong bin or redeemer
//! - ExampleToken and ExampleNFT transfer failures
//! - Failed calls leaving state untouched

use crate::{assert_err, assert_ok};
use crate::harness::{TestHarness, DEFAULT_USER_BALANCE, TICKET_FEE};
use soroban_sdk::{testutils::Address as _, Address};

use example_nft::NftError;
use example_token::TokenError;
use lost_and_found::{
    LostAndFoundContract, LostAndFoundContractClient, LostAndFoundError, TicketItem,
};

// ============================================================================
// Initialization
// ============================================================================

/// Test: A second initialize is rejected
#[test]
fn test_error_already_initialized() {
    let harness = TestHarness::new();

    let result = harness.lost_and_found().try_initialize(
        &harness.accounts.user1,
        &harness.contracts.fee_token,
        &0,
    );

    assert_err!(result, LostAndFoundError::AlreadyInitialized);
    assert_eq!(harness.lost_and_found().get_config().admin, harness.accounts.admin);
}

/// Test: Mutations on an uninitialized contract fail
#[test]
fn test_error_not_initialized() {
    let harness = TestHarness::new();
    let fresh = harness.env.register_contract(None, LostAndFoundContract);
    let client = LostAndFoundContractClient::new(&harness.env, &fresh);
    let account = &harness.accounts.account;

    assert_err!(client.try_setup_depositor(account, &None), LostAndFoundError::NotInitialized);
    assert_err!(client.try_set_ticket_fee(&1), LostAndFoundError::NotInitialized);
    assert_err!(client.try_get_config(), LostAndFoundError::NotInitialized);
    assert!(!client.has_depositor(account));
}

/// Test: Negative fees are rejected
#[test]
fn test_error_negative_ticket_fee() {
    let harness = TestHarness::new();

    assert_err!(
        harness.lost_and_found().try_set_ticket_fee(&-1),
        LostAndFoundError::InvalidAmount
    );
    assert_eq!(harness.lost_and_found().get_ticket_fee(), TICKET_FEE);
}

// ============================================================================
// Depositor Errors
// ============================================================================

/// Test: Only one Depositor per owner
#[test]
fn test_error_depositor_already_exists() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    harness.setup_depositor(account, None);

    assert_err!(
        harness.lost_and_found().try_setup_depositor(account, &Some(5)),
        LostAndFoundError::DepositorAlreadyExists
    );
    assert_eq!(harness.lost_and_found().get_low_balance_threshold(account), None);
}

/// Test: Operations on a missing Depositor
#[test]
fn test_error_depositor_not_found() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    let client = harness.lost_and_found();

    assert_err!(client.try_add_tokens(account, &10), LostAndFoundError::DepositorNotFound);
    assert_err!(
        client.try_add_tokens_public(&harness.accounts.user1, account, &10),
        LostAndFoundError::DepositorNotFound
    );
    assert_err!(client.try_withdraw_tokens(account, &10), LostAndFoundError::DepositorNotFound);
    assert_err!(client.try_destroy_depositor(account), LostAndFoundError::DepositorNotFound);
    assert_err!(client.try_get_depositor_balance(account), LostAndFoundError::DepositorNotFound);
    assert_eq!(harness.balance(account), DEFAULT_USER_BALANCE);
}

/// Test: Zero and negative amounts are rejected
#[test]
fn test_error_invalid_amounts() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    harness.setup_depositor(account, None);
    let client = harness.lost_and_found();

    assert_err!(client.try_add_tokens(account, &0), LostAndFoundError::InvalidAmount);
    assert_err!(client.try_add_tokens(account, &-5), LostAndFoundError::InvalidAmount);
    assert_err!(client.try_withdraw_tokens(account, &0), LostAndFoundError::InvalidAmount);
    harness.assert_depositor_balance(account, 0);
}

/// Test: Withdrawing more than the balance leaves it unchanged
#[test]
fn test_error_insufficient_funds() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    harness.setup_depositor(account, None);
    harness.add_tokens_to_depositor(account, 50);

    assert_err!(
        harness.lost_and_found().try_withdraw_tokens(account, &51),
        LostAndFoundError::InsufficientFunds
    );
    harness.assert_depositor_balance(account, 50);
    assert_eq!(harness.balance(account), DEFAULT_USER_BALANCE - 50);
}

/// Test: A Depositor that cannot cover the fee does not open a ticket
#[test]
fn test_error_depositor_cannot_cover_fee() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    let redeemer = &harness.accounts.user1;
    harness.setup_depositor(account, None);
    harness.add_tokens_to_depositor(account, TICKET_FEE - 1);
    harness.mint_example_tokens(account, 20);

    let result = harness.lost_and_found().try_deposit_with_depositor(
        account,
        redeemer,
        &harness.contracts.example_token,
        &TicketItem::Fungible(20),
        &None,
        &None,
    );

    assert_err!(result, LostAndFoundError::InsufficientFunds);
    harness.assert_depositor_balance(account, TICKET_FEE - 1);
    assert_eq!(harness.example_token().get_vault_balance(account), 20);
    assert!(harness.lost_and_found().get_redeemable_types(redeemer).is_empty());
}

// ============================================================================
// Ticket Errors
// ============================================================================

/// Test: Depositing a zero amount fails before anything moves
#[test]
fn test_error_zero_amount_deposit() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    harness.mint_example_tokens(account, 10);

    let result = harness.lost_and_found().try_deposit(
        account,
        &harness.accounts.user1,
        &harness.contracts.example_token,
        &TicketItem::Fungible(0),
        &None,
        &None,
    );

    assert_err!(result, LostAndFoundError::InvalidAmount);
    assert_eq!(harness.balance(account), DEFAULT_USER_BALANCE);
}

/// Test: Redeeming a ticket that is not in the bin
#[test]
fn test_error_ticket_not_found() {
    let harness = TestHarness::new();
    let sender = &harness.accounts.account;
    let redeemer = &harness.accounts.user1;
    let token = &harness.contracts.example_token;
    let ticket_id = harness.deposit_example_token(sender, redeemer, 10);
    let client = harness.lost_and_found();

    assert_err!(client.try_redeem(redeemer, token, &999), LostAndFoundError::TicketNotFound);
    // right ticket, wrong bin
    assert_err!(
        client.try_redeem(redeemer, &harness.contracts.example_nft, &ticket_id),
        LostAndFoundError::TicketNotFound
    );
    assert_err!(client.try_get_ticket(redeemer, &999), LostAndFoundError::TicketNotFound);
    assert_err!(
        client.try_get_fee_repayment_address(redeemer, token, &999),
        LostAndFoundError::TicketNotFound
    );
    assert_eq!(client.get_bin_balance(redeemer, token), 10);
}

/// Test: Another address cannot read or redeem someone's ticket
#[test]
fn test_error_ticket_of_another_redeemer() {
    let harness = TestHarness::new();
    let sender = &harness.accounts.account;
    let redeemer = &harness.accounts.user1;
    let stranger = &harness.accounts.user2;
    let token = &harness.contracts.example_token;
    let ticket_id = harness.deposit_example_token(sender, redeemer, 10);
    let client = harness.lost_and_found();

    assert_err!(client.try_get_ticket(stranger, &ticket_id), LostAndFoundError::Unauthorized);
    assert_err!(client.try_redeem(stranger, token, &ticket_id), LostAndFoundError::TicketNotFound);
    assert!(client.get_tickets(stranger, token).is_empty());
    let ticket = assert_ok!(client.try_get_ticket(redeemer, &ticket_id));
    assert_eq!(ticket.id, ticket_id);
}

/// Test: Empty shelves and bins
#[test]
fn test_empty_shelf_queries() {
    let harness = TestHarness::new();
    let nobody = Address::generate(&harness.env);
    let client = harness.lost_and_found();

    assert!(client.get_redeemable_types(&nobody).is_empty());
    assert_eq!(client.get_bin_balance(&nobody, &harness.contracts.example_token), 0);
    assert!(client
        .get_bin_token_ids(&nobody, &harness.contracts.example_nft)
        .is_empty());
    assert_eq!(client.redeem_all(&nobody, &harness.contracts.example_nft, &None), 0);
    assert_eq!(client.clear_all_tickets(&nobody), 0);
}

// ============================================================================
// ExampleToken Errors
// ============================================================================

/// Test: Transfers need a vault on both sides
#[test]
fn test_error_token_vault_not_found() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    let no_vault = &harness.accounts.user1;
    harness.mint_example_tokens(account, 30);
    let token = harness.example_token();

    assert_err!(token.try_transfer(account, no_vault, &10), TokenError::VaultNotFound);
    assert_err!(token.try_transfer(no_vault, account, &10), TokenError::VaultNotFound);
    assert_err!(token.try_mint(no_vault, &10), TokenError::VaultNotFound);
    assert_err!(token.try_destroy_vault(no_vault), TokenError::VaultNotFound);
    assert_eq!(token.get_vault_balance(account), 30);
}

/// Test: Transfers cannot exceed the vault balance
#[test]
fn test_error_token_insufficient_balance() {
    let harness = TestHarness::new();
    let account = &harness.accounts.account;
    let other = &harness.accounts.user1;
    harness.mint_example_tokens(account, 30);
    harness.example_token().setup_vault(other);

    assert_err!(
        harness.example_token().try_transfer(account, other, &31),
        TokenError::InsufficientBalance
    );
    assert_err!(
        harness.example_token().try_transfer(account, other, &0),
        TokenError::InvalidAmount
    );
    assert_eq!(harness.example_token().balance(other), 0);
}

// ============================================================================
// ExampleNFT Errors
// ============================================================================

/// Test: Only the owner can move an NFT
#[test]
fn test_error_nft_not_owner() {
    let harness = TestHarness::new();
    let owner = &harness.accounts.account;
    let thief = &harness.accounts.user1;
    let token_id = harness.mint_example_nft(owner, "mine");
    harness.example_nft().setup_collection(thief);

    assert_err!(
        harness.example_nft().try_transfer(thief, thief, &token_id),
        NftError::NotOwner
    );
    assert_eq!(harness.example_nft().owner_of(&token_id), owner.clone());
}

/// Test: NFTs need a collection to land in
#[test]
fn test_error_nft_collection_not_found() {
    let harness = TestHarness::new();
    let owner = &harness.accounts.account;
    let no_collection = &harness.accounts.user1;
    let token_id = harness.mint_example_nft(owner, "mine");
    let nft = harness.example_nft();

    assert_err!(
        nft.try_transfer(owner, no_collection, &token_id),
        NftError::CollectionNotFound
    );
    assert_err!(
        nft.try_mint(no_collection, &harness.nft_display("orphan")),
        NftError::CollectionNotFound
    );
    assert_err!(nft.try_owner_of(&42), NftError::NftNotFound);
    harness.assert_example_nft_length(owner, 1);
}
