//! Relay orchestration and trait definitions for the SpurShop chat relay.
//!
//! This crate defines the "ports" (the `ChatStore` and `CompletionProvider`
//! traits) that the infrastructure layer implements, plus the `RelayService`
//! that sequences a chat turn. It depends only on `spurchat-types` -- never
//! on `spurchat-infra` or any database/IO crate.

pub mod completion;
pub mod relay;
pub mod store;
