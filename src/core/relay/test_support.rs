// In-memory doubles for the relay ports, shared by the core tests.

use super::relay_models::{ChannelRef, DeliveryError, EmbedSpec, Reply};
use super::relay_service::DeliveryGateway;
use super::response_lifecycle::InteractionResponder;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every reply instead of talking to Discord.
pub struct RecordingResponder {
    pub answered: bool,
    pub fail_next_primary: bool,
    pub primary: Vec<Reply>,
    pub follow_ups: Vec<Reply>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self {
            answered: false,
            fail_next_primary: false,
            primary: Vec::new(),
            follow_ups: Vec::new(),
        }
    }

    /// Interaction that was already replied to or deferred.
    pub fn answered() -> Self {
        Self {
            answered: true,
            ..Self::new()
        }
    }

    pub fn total_replies(&self) -> usize {
        self.primary.len() + self.follow_ups.len()
    }

    /// Every reply in the order it was sent, primary first.
    pub fn all_replies(&self) -> Vec<&Reply> {
        self.primary.iter().chain(self.follow_ups.iter()).collect()
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    fn already_answered(&self) -> bool {
        self.answered
    }

    async fn reply(&mut self, reply: &Reply) -> Result<(), DeliveryError> {
        assert!(!self.answered, "initial response sent twice");
        if self.fail_next_primary {
            self.fail_next_primary = false;
            return Err(DeliveryError::Platform("interaction expired".to_string()));
        }
        self.answered = true;
        self.primary.push(reply.clone());
        Ok(())
    }

    async fn follow_up(&mut self, reply: &Reply) -> Result<(), DeliveryError> {
        assert!(self.answered, "follow-up before the initial response");
        self.follow_ups.push(reply.clone());
        Ok(())
    }
}

/// Outbound call made through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Channel { channel_id: u64, content: String },
    Direct { user_id: u64, embed: EmbedSpec },
}

pub struct FakeGateway {
    pub channels: HashMap<u64, ChannelRef>,
    pub can_send: bool,
    pub fail_deliveries: bool,
    pub deliveries: Mutex<Vec<Delivery>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            can_send: true,
            fail_deliveries: false,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_channel(mut self, id: u64, name: &str) -> Self {
        self.channels.insert(
            id,
            ChannelRef {
                id,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    fn record(&self, delivery: Delivery) -> Result<(), DeliveryError> {
        if self.fail_deliveries {
            return Err(DeliveryError::Forbidden(
                "Cannot send messages to this user".to_string(),
            ));
        }
        self.deliveries.lock().unwrap().push(delivery);
        Ok(())
    }
}

#[async_trait]
impl DeliveryGateway for FakeGateway {
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<ChannelRef>, DeliveryError> {
        Ok(self.channels.get(&channel_id).cloned())
    }

    async fn can_send_to_channel(&self, _channel_id: u64) -> Result<bool, DeliveryError> {
        Ok(self.can_send)
    }

    async fn send_to_channel(&self, channel_id: u64, content: &str) -> Result<(), DeliveryError> {
        self.record(Delivery::Channel {
            channel_id,
            content: content.to_string(),
        })
    }

    async fn send_direct_embed(&self, user_id: u64, embed: &EmbedSpec) -> Result<(), DeliveryError> {
        self.record(Delivery::Direct {
            user_id,
            embed: embed.clone(),
        })
    }
}
