// This is the entry point of the relay bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic): command catalog, router, reply bookkeeping
// - `infra/` = Configuration loading
// - `discord/` = Discord-specific adapters (commands, gateway, responder)
//
// This file's job is to:
// 1. Load configuration
// 2. Set up the Discord framework
// 3. Register commands and wire the router once the bot is ready

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::relay::{CommandRouter, RouterSettings};
use crate::discord::relay::registration::register_commands;
use crate::discord::relay::SerenityGateway;
use crate::discord::Data;
use crate::infra::config::BotConfig;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config_path =
        std::env::var("BOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = BotConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    tracing::debug!(?config, "Configuration loaded");

    let settings = RouterSettings {
        report_channel_id: config.report_channel_id,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::relay_commands(),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!("{} is online!", ready.user.tag());

                // Upsert: overwrites the global command set for this application.
                register_commands(ctx, &framework.options().commands).await;

                let gateway = SerenityGateway::new(ctx.http.clone(), ctx.cache.clone(), ready.user.id);
                Ok(Data {
                    router: Arc::new(CommandRouter::new(gateway, settings)),
                })
            })
        })
        .build();

    // Scope every HTTP call (including command registration) to our application.
    let http = serenity::HttpBuilder::new(&config.token)
        .application_id(serenity::ApplicationId::new(config.client_id))
        .build();

    let mut client = serenity::ClientBuilder::new_with_http(http, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
