use std::env;

use anyhow::Context as _;

/// Environment-provided bot settings.
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
}

impl BotConfig {
    pub const TOKEN_VAR: &'static str = "DISCORD_TOKEN";

    /// Load `.env` if present, then read the settings from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup(Self::TOKEN_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{} is not set", Self::TOKEN_VAR))?;

        Ok(Self { token })
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
