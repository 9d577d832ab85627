//! Depositor: a per-owner balance holder with optional low-balance alerting
//!
//! The Depositor is split in three layers. [`BalanceLedger`] owns the balance and its
//! arithmetic, [`ThresholdMonitor`] decides whether a balance is low, and [`Depositor`]
//! ties both to storage and publishes events in a fixed order: the change event first,
//! then the low-balance event when the monitor fires.

use shared_utils::{SafeMath, Validation};
use soroban_sdk::{contracttype, Address, Env};

use crate::{events, storage, LostAndFoundError};

/// Stored Depositor record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorInfo {
    pub owner: Address,
    pub balance: i128,
    pub low_balance_threshold: Option<i128>,
    pub created_at: u64,
}

// ============================================================================
// Balance Ledger
// ============================================================================

/// Single non-negative balance
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BalanceLedger {
    balance: i128,
}

impl BalanceLedger {
    pub fn new(balance: i128) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> i128 {
        self.balance
    }

    /// Add `amount` and return the new balance
    ///
    /// # Errors
    /// * `InvalidAmount` - If `amount` is not positive
    /// * `BalanceOverflow` - If the new balance does not fit in an `i128`
    pub fn deposit(&mut self, amount: i128) -> Result<i128, LostAndFoundError> {
        if !Validation::is_positive(amount) {
            return Err(LostAndFoundError::InvalidAmount);
        }
        self.balance =
            SafeMath::add(self.balance, amount).ok_or(LostAndFoundError::BalanceOverflow)?;
        Ok(self.balance)
    }

    /// Remove `amount` and return the new balance
    ///
    /// The balance is untouched on error.
    ///
    /// # Errors
    /// * `InvalidAmount` - If `amount` is not positive
    /// * `InsufficientFunds` - If `amount` exceeds the balance
    pub fn withdraw(&mut self, amount: i128) -> Result<i128, LostAndFoundError> {
        if !Validation::is_positive(amount) {
            return Err(LostAndFoundError::InvalidAmount);
        }
        if !Validation::is_covered(amount, self.balance) {
            return Err(LostAndFoundError::InsufficientFunds);
        }
        self.balance =
            SafeMath::sub(self.balance, amount).ok_or(LostAndFoundError::BalanceOverflow)?;
        Ok(self.balance)
    }

    /// Empty the ledger, returning what it held
    pub fn drain(&mut self) -> i128 {
        core::mem::take(&mut self.balance)
    }
}

// ============================================================================
// Threshold Monitor
// ============================================================================

/// Result of a threshold evaluation that found the balance low
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LowBalance {
    pub balance: i128,
    pub threshold: i128,
}

/// Optional low-balance threshold
///
/// Evaluation is memoryless and inclusive: every balance at or under the threshold is
/// reported, whether or not the previous one was.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ThresholdMonitor {
    threshold: Option<i128>,
}

impl ThresholdMonitor {
    pub fn new(threshold: Option<i128>) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Option<i128> {
        self.threshold
    }

    /// Replace the threshold; `None` disables alerting
    pub fn set_threshold(&mut self, threshold: Option<i128>) {
        self.threshold = threshold;
    }

    pub fn evaluate(&self, balance: i128) -> Option<LowBalance> {
        match self.threshold {
            Some(threshold) if balance <= threshold => Some(LowBalance { balance, threshold }),
            _ => None,
        }
    }
}

// ============================================================================
// Depositor Facade
// ============================================================================

/// A loaded Depositor
///
/// Mutations are written back to storage before their events are published. Token
/// movement is left to the caller.
pub struct Depositor {
    owner: Address,
    ledger: BalanceLedger,
    monitor: ThresholdMonitor,
    created_at: u64,
}

impl Depositor {
    /// Create and store a fresh Depositor with a zero balance
    ///
    /// # Errors
    /// * `DepositorAlreadyExists` - If `owner` already has a Depositor
    pub fn create(
        e: &Env,
        owner: &Address,
        threshold: Option<i128>,
    ) -> Result<Self, LostAndFoundError> {
        if storage::has_depositor(e, owner) {
            return Err(LostAndFoundError::DepositorAlreadyExists);
        }

        let depositor = Self {
            owner: owner.clone(),
            ledger: BalanceLedger::default(),
            monitor: ThresholdMonitor::new(threshold),
            created_at: e.ledger().timestamp(),
        };
        depositor.save(e);
        events::depositor_created(e, owner, threshold);

        Ok(depositor)
    }

    /// # Errors
    /// * `DepositorNotFound` - If `owner` has no Depositor
    pub fn load(e: &Env, owner: &Address) -> Result<Self, LostAndFoundError> {
        let info = storage::get_depositor(e, owner).ok_or(LostAndFoundError::DepositorNotFound)?;
        Ok(Self {
            owner: info.owner,
            ledger: BalanceLedger::new(info.balance),
            monitor: ThresholdMonitor::new(info.low_balance_threshold),
            created_at: info.created_at,
        })
    }

    pub fn info(&self) -> DepositorInfo {
        DepositorInfo {
            owner: self.owner.clone(),
            balance: self.ledger.balance(),
            low_balance_threshold: self.monitor.threshold(),
            created_at: self.created_at,
        }
    }

    pub fn balance(&self) -> i128 {
        self.ledger.balance()
    }

    pub fn deposit(&mut self, e: &Env, amount: i128) -> Result<i128, LostAndFoundError> {
        let balance = self.ledger.deposit(amount)?;
        self.save(e);
        events::tokens_added(e, &self.owner, amount, balance);
        self.check_balance(e, balance);
        Ok(balance)
    }

    pub fn withdraw(&mut self, e: &Env, amount: i128) -> Result<i128, LostAndFoundError> {
        let balance = self.ledger.withdraw(amount)?;
        self.save(e);
        events::tokens_withdrawn(e, &self.owner, amount, balance);
        self.check_balance(e, balance);
        Ok(balance)
    }

    /// Replace the threshold without evaluating the current balance
    pub fn set_threshold(&mut self, e: &Env, threshold: Option<i128>) {
        self.monitor.set_threshold(threshold);
        self.save(e);
        events::threshold_updated(e, &self.owner, threshold);
    }

    /// Remove the Depositor, returning the balance it held
    pub fn destroy(mut self, e: &Env) -> i128 {
        let released = self.ledger.drain();
        storage::remove_depositor(e, &self.owner);
        events::depositor_destroyed(e, &self.owner, released);
        released
    }

    fn save(&self, e: &Env) {
        storage::set_depositor(e, &self.info());
    }

    fn check_balance(&self, e: &Env, balance: i128) {
        if let Some(low) = self.monitor.evaluate(balance) {
            events::balance_low(e, &self.owner, low.balance, low.threshold);
        }
    }
}
