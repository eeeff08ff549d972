// The command router: turns an `Invocation` into at most one outbound
// delivery plus the reply the invoking member sees.
//
// Every handler runs the same steps in order (authorization, argument
// validation, capability check, delivery, result reply). Each guard ends the
// handler with an explicit `return`; nothing falls through to the delivery
// once a denial or validation notice has been sent.

use super::command_definitions::{CommandDefinition, CommandName};
use super::relay_messages as messages;
use super::relay_models::{
    parse_color, ChannelRef, DeliveryError, EmbedSpec, HandlingOutcome, Invocation, Reply,
    DEFAULT_EMBED_COLOR, DIRECT_MESSAGE_COLOR,
};
use super::response_lifecycle::{InteractionResponder, ResponseLifecycle};
use async_trait::async_trait;

// ============================================================================
// GATEWAY TRAIT (PORT)
// ============================================================================

/// Outbound platform calls the router needs.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Look up a text channel by id. `Ok(None)` when it does not exist or is
    /// not a server text channel.
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<ChannelRef>, DeliveryError>;

    /// Whether the bot itself may send messages in the channel.
    async fn can_send_to_channel(&self, channel_id: u64) -> Result<bool, DeliveryError>;

    async fn send_to_channel(&self, channel_id: u64, content: &str) -> Result<(), DeliveryError>;

    /// Deliver an embed to the user's private channel.
    async fn send_direct_embed(&self, user_id: u64, embed: &EmbedSpec) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Where `/report` submissions are posted.
    pub report_channel_id: u64,
}

// ============================================================================
// ROUTER
// ============================================================================

pub struct CommandRouter<G: DeliveryGateway> {
    gateway: G,
    settings: RouterSettings,
}

impl<G: DeliveryGateway> CommandRouter<G> {
    pub fn new(gateway: G, settings: RouterSettings) -> Self {
        Self { gateway, settings }
    }

    /// Handle one invocation. Unknown command names are ignored without a
    /// reply. Never fails: every problem ends up as a reply and a log line.
    pub async fn dispatch<R>(&self, invocation: &Invocation, responder: &mut R) -> HandlingOutcome
    where
        R: InteractionResponder + ?Sized,
    {
        let Some(command) = CommandName::parse(&invocation.command) else {
            tracing::debug!(command = %invocation.command, "Ignoring unknown command");
            return HandlingOutcome::Ignored;
        };

        let mut lifecycle = ResponseLifecycle::new(responder);
        let definition = command.definition();

        if let Some(outcome) = Self::authorize(definition, invocation, &mut lifecycle).await {
            return outcome;
        }

        match command {
            CommandName::SendToChannel => self.send_to_channel(invocation, &mut lifecycle).await,
            CommandName::SendEmbed => self.send_embed(invocation, &mut lifecycle).await,
            CommandName::SendDirectMessage => {
                self.send_direct_message(invocation, &mut lifecycle).await
            }
            CommandName::SubmitReport => self.submit_report(invocation, &mut lifecycle).await,
        }
    }

    /// `Some(Denied)` when the actor may not run this command.
    async fn authorize<R>(
        definition: &CommandDefinition,
        invocation: &Invocation,
        lifecycle: &mut ResponseLifecycle<'_, R>,
    ) -> Option<HandlingOutcome>
    where
        R: InteractionResponder + ?Sized,
    {
        if !definition.requires_elevation || invocation.actor.elevated {
            return None;
        }

        tracing::info!(
            user_id = invocation.actor.id,
            command = definition.name.as_str(),
            "Denied command to non-administrator"
        );
        lifecycle
            .respond_if_unanswered(Reply::ephemeral(messages::NEEDS_ADMIN))
            .await;
        Some(HandlingOutcome::Denied)
    }

    async fn send_to_channel<R>(
        &self,
        invocation: &Invocation,
        lifecycle: &mut ResponseLifecycle<'_, R>,
    ) -> HandlingOutcome
    where
        R: InteractionResponder + ?Sized,
    {
        let definition = CommandName::SendToChannel.definition();
        let (Some(channel), Some(message), true) = (
            invocation.channel("channel"),
            invocation.text("message"),
            definition.arguments_satisfied(invocation),
        ) else {
            lifecycle
                .notify(Reply::ephemeral(messages::INVALID_PARAMETERS))
                .await;
            return HandlingOutcome::InvalidInput;
        };

        let allowed = match self.gateway.can_send_to_channel(channel.id).await {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::warn!(channel_id = channel.id, "Could not check channel permissions: {}", e);
                false
            }
        };
        if !allowed {
            lifecycle
                .notify(Reply::ephemeral(messages::BOT_CANNOT_SEND))
                .await;
            return HandlingOutcome::Denied;
        }

        match self.gateway.send_to_channel(channel.id, message).await {
            Ok(()) => {
                tracing::info!(
                    user_id = invocation.actor.id,
                    channel_id = channel.id,
                    "Relayed message to channel"
                );
                lifecycle
                    .notify(Reply::ephemeral(messages::message_sent(&channel.name)))
                    .await;
                HandlingOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(channel_id = channel.id, "Failed to send message: {}", e);
                lifecycle.notify(Reply::ephemeral(messages::SAY_FAILED)).await;
                HandlingOutcome::DeliveryFailed
            }
        }
    }

    async fn send_embed<R>(
        &self,
        invocation: &Invocation,
        lifecycle: &mut ResponseLifecycle<'_, R>,
    ) -> HandlingOutcome
    where
        R: InteractionResponder + ?Sized,
    {
        let Some(embed) = build_embed(invocation) else {
            lifecycle
                .notify(Reply::ephemeral(messages::INVALID_PARAMETERS))
                .await;
            return HandlingOutcome::InvalidInput;
        };

        // The embed itself is the reply, posted where the command was run.
        match lifecycle.respond(Reply::public_embed(embed)).await {
            Ok(_) => HandlingOutcome::Delivered,
            Err(e) => {
                tracing::error!("Failed to send embed: {}", e);
                lifecycle.notify(Reply::ephemeral(messages::EMBED_FAILED)).await;
                HandlingOutcome::DeliveryFailed
            }
        }
    }

    async fn send_direct_message<R>(
        &self,
        invocation: &Invocation,
        lifecycle: &mut ResponseLifecycle<'_, R>,
    ) -> HandlingOutcome
    where
        R: InteractionResponder + ?Sized,
    {
        let definition = CommandName::SendDirectMessage.definition();
        let (Some(user), Some(message), true) = (
            invocation.user("user"),
            invocation.text("message"),
            definition.arguments_satisfied(invocation),
        ) else {
            lifecycle
                .notify(Reply::ephemeral(messages::INVALID_PARAMETERS))
                .await;
            return HandlingOutcome::InvalidInput;
        };

        let embed = build_direct_message(invocation, message);
        match self.gateway.send_direct_embed(user.id, &embed).await {
            Ok(()) => {
                tracing::info!(
                    user_id = invocation.actor.id,
                    recipient_id = user.id,
                    "Sent direct message"
                );
                lifecycle
                    .notify(Reply::ephemeral(messages::dm_sent(&user.name)))
                    .await;
                HandlingOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(recipient_id = user.id, "Failed to send DM: {}", e);
                lifecycle.notify(Reply::ephemeral(messages::DM_FAILED)).await;
                HandlingOutcome::DeliveryFailed
            }
        }
    }

    async fn submit_report<R>(
        &self,
        invocation: &Invocation,
        lifecycle: &mut ResponseLifecycle<'_, R>,
    ) -> HandlingOutcome
    where
        R: InteractionResponder + ?Sized,
    {
        let definition = CommandName::SubmitReport.definition();
        let (Some(issue), true) = (
            invocation.text("issue"),
            definition.arguments_satisfied(invocation),
        ) else {
            lifecycle
                .notify(Reply::ephemeral(messages::INVALID_REPORT))
                .await;
            return HandlingOutcome::InvalidInput;
        };

        let channel_id = self.settings.report_channel_id;
        let channel = match self.gateway.resolve_channel(channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                tracing::warn!(channel_id, "Report channel does not exist");
                lifecycle
                    .notify(Reply::ephemeral(messages::INVALID_REPORT))
                    .await;
                return HandlingOutcome::InvalidInput;
            }
            Err(e) => {
                tracing::warn!(channel_id, "Could not resolve report channel: {}", e);
                lifecycle
                    .notify(Reply::ephemeral(messages::INVALID_REPORT))
                    .await;
                return HandlingOutcome::InvalidInput;
            }
        };

        match self
            .gateway
            .send_to_channel(channel.id, &messages::report_body(issue))
            .await
        {
            Ok(()) => {
                tracing::info!(user_id = invocation.actor.id, "Report submitted");
                lifecycle
                    .notify(Reply::ephemeral(messages::REPORT_SUBMITTED))
                    .await;
                HandlingOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(channel_id = channel.id, "Failed to send report: {}", e);
                lifecycle
                    .notify(Reply::ephemeral(messages::REPORT_FAILED))
                    .await;
                HandlingOutcome::DeliveryFailed
            }
        }
    }
}

/// `/embed` arguments to an embed. `None` on missing text or a bad colour.
fn build_embed(invocation: &Invocation) -> Option<EmbedSpec> {
    if !CommandName::SendEmbed
        .definition()
        .arguments_satisfied(invocation)
    {
        return None;
    }
    let title = invocation.text("title")?;
    let description = invocation.text("description")?;
    let color = match invocation.text("color") {
        Some(raw) => parse_color(raw)?,
        None => DEFAULT_EMBED_COLOR,
    };

    Some(EmbedSpec::new(title, description, color))
}

fn build_direct_message(invocation: &Invocation, message: &str) -> EmbedSpec {
    let origin = invocation
        .origin_name
        .as_deref()
        .unwrap_or(messages::UNKNOWN_ORIGIN);

    EmbedSpec::new(messages::DM_TITLE, message, DIRECT_MESSAGE_COLOR)
        .field(messages::DM_SOURCE_FIELD, origin, false)
        .field(messages::DM_SENDER_FIELD, invocation.actor.tag.as_str(), false)
        .footer(messages::dm_footer(origin))
}

// ============================================================================
// TESTS
// ============================================================================
