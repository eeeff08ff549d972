// Conversions from core reply types into serenity builders.

use crate::core::relay::{EmbedSpec, Reply, ReplyBody};
use poise::serenity_prelude as serenity;

pub fn to_create_embed(spec: &EmbedSpec) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&spec.title)
        .description(&spec.description)
        .color(spec.color);

    for field in &spec.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }

    if let Some(footer) = &spec.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }

    embed
}

/// Body of the initial interaction response.
pub fn response_message(reply: &Reply) -> serenity::CreateInteractionResponseMessage {
    let message = serenity::CreateInteractionResponseMessage::new().ephemeral(reply.ephemeral);
    match &reply.body {
        ReplyBody::Text(text) => message.content(text),
        ReplyBody::Embed(spec) => message.embed(to_create_embed(spec)),
    }
}

pub fn followup_message(reply: &Reply) -> serenity::CreateInteractionResponseFollowup {
    let message = serenity::CreateInteractionResponseFollowup::new().ephemeral(reply.ephemeral);
    match &reply.body {
        ReplyBody::Text(text) => message.content(text),
        ReplyBody::Embed(spec) => message.embed(to_create_embed(spec)),
    }
}
