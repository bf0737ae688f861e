//! Completion provider abstractions.
//!
//! `CompletionProvider` is the trait concrete backends implement;
//! `BoxCompletionProvider` wraps any of them for dynamic dispatch.

pub mod box_provider;
pub mod provider;

pub use box_provider::BoxCompletionProvider;
pub use provider::CompletionProvider;
