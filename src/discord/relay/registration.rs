// Startup registration of the slash commands.

use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

/// Register `commands` globally for the configured application.
///
/// Discord's bulk overwrite replaces the whole set, so running this on every
/// start is safe and never duplicates commands. Failures are logged and the
/// bot keeps running with whatever definitions Discord already has.
pub async fn register_commands(ctx: &serenity::Context, commands: &[poise::Command<Data, Error>]) {
    tracing::info!("Registering {} slash commands...", commands.len());

    match poise::builtins::register_globally(ctx, commands).await {
        Ok(()) => tracing::info!("Slash commands registered"),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
