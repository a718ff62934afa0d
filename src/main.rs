mod assignment;
mod catalog;
mod config;
mod context;
mod embed;
mod event;
mod expiry;
mod handler;
mod helper;
mod logging;
mod persistent_state;
mod plugin;
mod volatile_state;

use serenity::{all::GatewayIntents, Client};
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = crate::config::Config::load().await?;
    let token = cfg.general.discord_token.clone();
    let pstate = crate::persistent_state::PersistentState::load().await?;
    let vstate = Arc::new(RwLock::new(crate::volatile_state::VolatileState::new()));

    // Background sweep keeping the roll board's memory bounded.
    let sweep_state = Arc::clone(&vstate);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(crate::volatile_state::SWEEP_INTERVAL);
        ticker.tick().await; // the first tick completes immediately
        loop {
            ticker.tick().await;
            sweep_state
                .write()
                .await
                .rolls
                .sweep(std::time::Instant::now());
        }
    });

    let handler = handler::Handler::new(cfg, pstate, vstate);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
