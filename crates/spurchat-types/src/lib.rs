//! Shared domain types for the SpurShop chat relay.
//!
//! This crate contains the message and session types used across the relay
//! plus their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod error;
pub mod message;
