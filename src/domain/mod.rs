//! Domain modules organized as vertical slices.
//!
//! `transaction` follows the slice layout:
//! - `mod.rs`: Rich domain types
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: Wire → domain conversions and partial-update application
//! - `state.rs`: State containers with update methods (for push-driven data)
//!
//! `account` holds the host-provided account context.

pub mod account;
pub mod transaction;
