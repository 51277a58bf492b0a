use std::sync::Arc;

use serenity::all::{Client, GatewayIntents, Http};
use tracing::info;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::infra::discord::DiscordChat;
use crate::infra::gateway::Handler;
use crate::infra::github::GitHubClient;
use crate::store::EntryPointStore;

/// Connects to the gateway and serves interactions until the client stops.
pub async fn run(config: AppConfig) -> AppResult<()> {
    let config = Arc::new(config);
    let http = Arc::new(Http::new(&config.discord_token));

    let tracker = Arc::new(GitHubClient::new(&config.github));
    let chat = Arc::new(DiscordChat::new(http, config.guild_id));
    let store = EntryPointStore::new(config.entry_point_file.clone());
    let context = AppContext::new(config.clone(), tracker, chat);

    info!(
        guild = config.guild_id,
        owner = config.github.owner.as_str(),
        entry_point = %store.path().display(),
        "starting ticket bot"
    );

    let mut client = Client::builder(&config.discord_token, GatewayIntents::GUILDS)
        .event_handler(Handler::new(context, store))
        .await
        .map_err(|err| AppError::Chat(err.to_string()))?;

    client
        .start()
        .await
        .map_err(|err| AppError::Chat(err.to_string()))
}
