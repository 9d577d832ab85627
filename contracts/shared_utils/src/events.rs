//! Event emission patterns and utilities

use soroban_sdk::{Address, Env, IntoVal, Symbol, Topics, Val};

/// Event emission helper functions
pub struct Events;

impl Events {
    /// Emit an event with multiple topics
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `topics` - Tuple of topics (must implement Topics)
    /// * `data` - The event data
    pub fn emit_with_topics<T, U>(e: &Env, topics: T, data: U)
    where
        T: Topics,
        U: IntoVal<Env, Val>,
    {
        e.events().publish(topics, data);
    }

    /// Emit a named event about an account
    ///
    /// Topics are `(name, subject)`. The payload should be a `#[contracttype]`
    /// struct so observers receive its fields as a named map.
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `name` - The event name, at most 32 characters of `[a-zA-Z0-9_]`
    /// * `subject` - The account the event is about
    /// * `data` - The event payload
    pub fn emit_for<T>(e: &Env, name: &str, subject: &Address, data: T)
    where
        T: IntoVal<Env, Val>,
    {
        Self::emit_with_topics(e, (Symbol::new(e, name), subject.clone()), data);
    }
}
