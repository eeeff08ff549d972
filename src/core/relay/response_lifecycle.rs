// Reply bookkeeping for a single interaction.
//
// Discord accepts exactly one initial response per interaction; anything
// after that has to go through a follow-up. `ResponseLifecycle` owns that
// rule so the command handlers never pick the path themselves.

use super::relay_models::{DeliveryError, Reply};
use async_trait::async_trait;

/// Port for answering the interaction that triggered a command.
///
/// The Discord layer implements this on top of the poise context; tests use
/// an in-memory recorder.
#[async_trait]
pub trait InteractionResponder: Send {
    /// Whether the platform already considers this interaction replied to
    /// (or deferred).
    fn already_answered(&self) -> bool;

    /// Initial response. Only valid while unanswered.
    async fn reply(&mut self, reply: &Reply) -> Result<(), DeliveryError>;

    /// Follow-up message after the initial response.
    async fn follow_up(&mut self, reply: &Reply) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Unanswered,
    Answered,
}

/// Which path a reply went out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPath {
    Primary,
    Supplementary,
}

pub struct ResponseLifecycle<'r, R: InteractionResponder + ?Sized> {
    responder: &'r mut R,
    state: ResponseState,
}

impl<'r, R: InteractionResponder + ?Sized> ResponseLifecycle<'r, R> {
    pub fn new(responder: &'r mut R) -> Self {
        let state = if responder.already_answered() {
            ResponseState::Answered
        } else {
            ResponseState::Unanswered
        };
        Self { responder, state }
    }

    #[cfg(test)]
    pub fn state(&self) -> ResponseState {
        self.state
    }

    /// Send `reply` as the initial response if there has been none yet,
    /// otherwise as a follow-up. The state only flips once the initial
    /// response actually went through.
    pub async fn respond(&mut self, reply: Reply) -> Result<ReplyPath, DeliveryError> {
        match self.state {
            ResponseState::Unanswered => {
                self.responder.reply(&reply).await?;
                self.state = ResponseState::Answered;
                Ok(ReplyPath::Primary)
            }
            ResponseState::Answered => {
                self.responder.follow_up(&reply).await?;
                Ok(ReplyPath::Supplementary)
            }
        }
    }

    /// Initial response only; skipped when something already answered.
    pub async fn respond_if_unanswered(&mut self, reply: Reply) -> Option<ReplyPath> {
        if self.state == ResponseState::Answered {
            tracing::debug!("Interaction already answered, skipping reply");
            return None;
        }
        self.notify(reply).await
    }

    /// `respond`, logging instead of returning failures.
    pub async fn notify(&mut self, reply: Reply) -> Option<ReplyPath> {
        match self.respond(reply).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!("Failed to reply to interaction: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::relay::test_support::RecordingResponder;

    #[tokio::test]
    async fn first_reply_is_primary_then_follow_ups() {
        let mut responder = RecordingResponder::new();
        let mut lifecycle = ResponseLifecycle::new(&mut responder);

        assert_eq!(lifecycle.state(), ResponseState::Unanswered);
        let first = lifecycle.respond(Reply::ephemeral("one")).await.unwrap();
        let second = lifecycle.respond(Reply::ephemeral("two")).await.unwrap();

        assert_eq!(first, ReplyPath::Primary);
        assert_eq!(second, ReplyPath::Supplementary);
        assert_eq!(lifecycle.state(), ResponseState::Answered);
        assert_eq!(responder.primary.len(), 1);
        assert_eq!(responder.follow_ups.len(), 1);
    }

    #[tokio::test]
    async fn already_answered_interactions_only_get_follow_ups() {
        let mut responder = RecordingResponder::answered();
        let mut lifecycle = ResponseLifecycle::new(&mut responder);

        let path = lifecycle.respond(Reply::ephemeral("late")).await.unwrap();

        assert_eq!(path, ReplyPath::Supplementary);
        assert!(responder.primary.is_empty());
        assert_eq!(responder.follow_ups.len(), 1);
    }

    #[tokio::test]
    async fn failed_primary_keeps_state_unanswered() {
        let mut responder = RecordingResponder::new();
        responder.fail_next_primary = true;
        let mut lifecycle = ResponseLifecycle::new(&mut responder);

        assert!(lifecycle.respond(Reply::ephemeral("lost")).await.is_err());
        assert_eq!(lifecycle.state(), ResponseState::Unanswered);

        let path = lifecycle.respond(Reply::ephemeral("retry")).await.unwrap();
        assert_eq!(path, ReplyPath::Primary);
        assert_eq!(responder.primary.len(), 1);
        assert!(responder.follow_ups.is_empty());
    }

    #[tokio::test]
    async fn respond_if_unanswered_skips_answered_interactions() {
        let mut responder = RecordingResponder::answered();
        let mut lifecycle = ResponseLifecycle::new(&mut responder);

        assert_eq!(
            lifecycle.respond_if_unanswered(Reply::ephemeral("no")).await,
            None
        );
        assert_eq!(responder.total_replies(), 0);
    }

    #[tokio::test]
    async fn notify_swallows_responder_failures() {
        let mut responder = RecordingResponder::new();
        responder.fail_next_primary = true;
        let mut lifecycle = ResponseLifecycle::new(&mut responder);

        assert_eq!(lifecycle.notify(Reply::ephemeral("x")).await, None);
    }
}
