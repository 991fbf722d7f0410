use std::sync::Arc;

use tracing::info;
use twilight_http::Client;
use twilight_model::id::{Id, marker::UserMarker};

use tascomp_utils::{identity::is_this_id_this_bot, messaging::Messenger};

/// Environment-driven configuration.
pub mod config;

use config::BotConfig;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub bot_user_id: Id<UserMarker>,
    messenger: Messenger<Client>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, bot_user_id: Id<UserMarker>) -> Self {
        let messenger = Messenger::new(Arc::clone(&http));

        Self {
            http,
            bot_user_id,
            messenger,
        }
    }

    /// Build the HTTP client from `config` and look up the bot's own account.
    pub async fn connect(config: &BotConfig) -> anyhow::Result<Self> {
        // Another component may already have installed a provider.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = Arc::new(Client::new(config.token.clone()));
        let current_user = http.current_user().await?.model().await?;
        info!(
            user_id = current_user.id.get(),
            name = %current_user.name,
            "resolved bot account"
        );

        Ok(Self::new(http, current_user.id))
    }

    /// Messaging helpers bound to this context's HTTP client.
    pub fn messenger(&self) -> &Messenger<Client> {
        &self.messenger
    }

    /// Whether `user_id` is the account this bot runs on.
    pub fn is_self(&self, user_id: Id<UserMarker>) -> bool {
        is_this_id_this_bot(self.bot_user_id, user_id.get())
    }
}
