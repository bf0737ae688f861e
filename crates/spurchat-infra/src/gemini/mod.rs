//! Gemini completion backend.
//!
//! `GeminiClient` implements `CompletionProvider` against the Gemini
//! `generateContent` REST API.

pub mod client;
pub mod types;

pub use client::GeminiClient;
