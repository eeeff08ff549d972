// Answers the current slash-command interaction on behalf of the router.

use crate::core::relay::{DeliveryError, InteractionResponder, Reply};
use crate::discord::relay::embeds::{followup_message, response_message};
use crate::discord::{Data, Error};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::atomic::Ordering;

pub struct PoiseResponder<'a> {
    ctx: poise::ApplicationContext<'a, Data, Error>,
}

impl<'a> PoiseResponder<'a> {
    pub fn new(ctx: poise::ApplicationContext<'a, Data, Error>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InteractionResponder for PoiseResponder<'_> {
    fn already_answered(&self) -> bool {
        // poise flips this on every initial response or defer, including its own.
        self.ctx.has_sent_initial_response.load(Ordering::SeqCst)
    }

    async fn reply(&mut self, reply: &Reply) -> Result<(), DeliveryError> {
        self.ctx
            .interaction
            .create_response(
                self.ctx.serenity_context,
                serenity::CreateInteractionResponse::Message(response_message(reply)),
            )
            .await?;
        // Keep poise in sync so its own error replies become follow-ups.
        self.ctx
            .has_sent_initial_response
            .store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&mut self, reply: &Reply) -> Result<(), DeliveryError> {
        self.ctx
            .interaction
            .create_followup(self.ctx.serenity_context, followup_message(reply))
            .await?;
        Ok(())
    }
}
