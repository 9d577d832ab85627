#![no_std]

//! Shared utility library for the LostAndFound contracts
//!
//! This library provides the helpers every contract in the workspace leans on:
//! - Event emission patterns (named events with a subject topic)
//! - Checked arithmetic for token amounts
//! - Amount validation
//! - Admin storage and access control
//! - Failure logging

pub mod access_control;
pub mod errors;
pub mod events;
pub mod math;
pub mod storage;
pub mod validation;


// Re-export commonly used items
pub use access_control::*;
pub use errors::*;
pub use events::*;
pub use math::*;
pub use storage::Storage;
pub use validation::*;
