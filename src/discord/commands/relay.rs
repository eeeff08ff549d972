// Slash commands that relay messages on behalf of moderators.
//
// **Notice the pattern:**
// 1. Pull the typed arguments out of the interaction
// 2. Package them as a core `Invocation`
// 3. Let the router do the checks, the delivery and the reply
//
// No permission checks happen here; the router owns them so the same rules
// apply no matter how a command is invoked.

use crate::core::relay::{
    Actor, ArgValue, ChannelRef, CommandRouter, HandlingOutcome, Invocation, UserRef,
};
use crate::discord::relay::{PoiseResponder, SerenityGateway};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command.
pub struct Data {
    pub router: Arc<CommandRouter<SerenityGateway>>,
}

/// Send a message to a channel.
#[poise::command(slash_command, guild_only)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "Channel to send the message to"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
    #[description = "The message to send"] message: String,
) -> Result<(), Error> {
    let args = vec![
        (
            "channel",
            ArgValue::Channel(ChannelRef {
                id: channel.id.get(),
                name: channel.name.clone(),
            }),
        ),
        ("message", ArgValue::Text(message)),
    ];
    relay(ctx, args).await
}

/// Send an embed message.
#[poise::command(slash_command, guild_only)]
pub async fn embed(
    ctx: Context<'_>,
    #[description = "Embed title"] title: String,
    #[description = "Embed content"] description: String,
    #[description = "Embed colour as hex, e.g. #00FF00"] color: Option<String>,
) -> Result<(), Error> {
    let mut args = vec![
        ("title", ArgValue::Text(title)),
        ("description", ArgValue::Text(description)),
    ];
    if let Some(color) = color {
        args.push(("color", ArgValue::Text(color)));
    }
    relay(ctx, args).await
}

/// Send a message to a user's DMs.
#[poise::command(slash_command, guild_only)]
pub async fn dm(
    ctx: Context<'_>,
    #[description = "User to message"] user: serenity::User,
    #[description = "The message to send"] message: String,
) -> Result<(), Error> {
    let args = vec![
        (
            "user",
            ArgValue::User(UserRef {
                id: user.id.get(),
                name: user.name.clone(),
                tag: user.tag(),
            }),
        ),
        ("message", ArgValue::Text(message)),
    ];
    relay(ctx, args).await
}

/// Report an issue or incident.
#[poise::command(slash_command)]
pub async fn report(
    ctx: Context<'_>,
    #[description = "Describe the issue or incident you want to report"] issue: String,
) -> Result<(), Error> {
    relay(ctx, vec![("issue", ArgValue::Text(issue))]).await
}

/// Shared tail of every relay command.
async fn relay(ctx: Context<'_>, args: Vec<(&'static str, ArgValue)>) -> Result<(), Error> {
    // Slash-only commands, but poise still hands us the general context type.
    let poise::Context::Application(app_ctx) = ctx else {
        return Ok(());
    };

    let mut invocation = Invocation::new(ctx.command().name.clone(), actor(app_ctx));
    if let Some(origin_name) = origin_name(ctx).await {
        invocation = invocation.with_origin(origin_name);
    }
    for (name, value) in args {
        invocation = invocation.with_arg(name, value);
    }

    let mut responder = PoiseResponder::new(app_ctx);
    let outcome = ctx
        .data()
        .router
        .dispatch(&invocation, &mut responder)
        .await;

    if outcome == HandlingOutcome::DeliveryFailed {
        tracing::warn!(command = %invocation.command, "Relay command finished with a delivery failure");
    } else {
        tracing::debug!(command = %invocation.command, ?outcome, "Relay command handled");
    }
    Ok(())
}

/// Server name from the cache, falling back to an HTTP fetch.
async fn origin_name(ctx: Context<'_>) -> Option<String> {
    let guild_id = ctx.guild_id()?;
    if let Some(name) = guild_id.name(ctx.cache()) {
        return Some(name);
    }
    ctx.partial_guild().await.map(|guild| guild.name)
}

/// Describe the invoking member. Only the resolved interaction permissions
/// count; outside a guild nobody is elevated.
fn actor(ctx: poise::ApplicationContext<'_, Data, Error>) -> Actor {
    let elevated = ctx
        .interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());

    Actor {
        id: ctx.interaction.user.id.get(),
        tag: ctx.interaction.user.tag(),
        elevated,
    }
}
