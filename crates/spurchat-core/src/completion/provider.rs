//! CompletionProvider trait definition.
//!
//! The external generative-AI call that maps input text to reply text.
//! The backend is configured once at startup with a fixed model and system
//! instruction; each call carries only the latest user message.

use spurchat_types::error::CompletionError;

/// Trait for completion backends (Gemini in production, fakes in tests).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in spurchat-infra (e.g., `GeminiClient`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Generate a reply for the given prompt text.
    ///
    /// No conversation history is supplied; the provider's fixed system
    /// instruction is the only context beyond the prompt itself.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
