//!
//! # Use Cases
//!
//! Request-scoped orchestration over the domain and the repository contract.
//! Each operation is a single linear lookup → validate → mutate → persist
//! sequence with no background work; every error is terminal for the current
//! operation and propagates to the HTTP layer for translation.

pub mod auth;
pub mod tasks;
pub mod users;
