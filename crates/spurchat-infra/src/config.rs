//! Environment-driven configuration for the relay.
//!
//! Reads the same knobs the deployment environment provides: database
//! connection string, Gemini API key, bind address, and an optional model
//! override. Everything except the API key has a default.

use secrecy::SecretString;

use spurchat_types::error::ConfigError;

use crate::sqlite::pool::default_database_url;

/// The fixed system instruction configured once at startup.
///
/// This is the whole knowledge base: the model sees it on every request,
/// alongside only the latest user message.
pub const SYSTEM_INSTRUCTION: &str = "You are a customer support agent for 'SpurShop'.
Tone: Helpful, concise, professional.
KNOWLEDGE BASE:
- Shipping: We ship to USA, UK, and India. Free shipping over $50.
- Returns: 30-day return policy. Customer pays return shipping.
- Support Hours: Mon-Fri, 9 AM - 5 PM EST.
If you do not know the answer, say \"I'm not sure, let me connect you to a human.\"";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for the relay process.
#[derive(Debug)]
pub struct RelayConfig {
    pub database_url: String,
    pub gemini_api_key: SecretString,
    pub model: String,
    pub host: String,
    pub port: u16,
}

impl RelayConfig {
    /// Load configuration from process environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `DATABASE_URL`, `SPURCHAT_MODEL`,
    /// `HOST`, and `PORT` fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// Split out from [`from_env`](Self::from_env) so tests can supply
    /// variables without mutating process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .ok_or_else(|| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))?;

        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        let model = lookup("SPURCHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                name: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            gemini_api_key: SecretString::from(gemini_api_key),
            model,
            host,
            port,
        })
    }
}
