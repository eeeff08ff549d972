pub mod command_definitions;
pub mod relay_messages;
pub mod relay_models;
pub mod relay_service;
pub mod response_lifecycle;

#[cfg(test)]
mod test_support;

#[cfg(test)]
pub use command_definitions::all_definitions;
pub use command_definitions::{CommandDefinition, CommandName};
pub use relay_models::{
    Actor, ArgValue, ChannelRef, DeliveryError, EmbedSpec, HandlingOutcome, Invocation, Reply,
    ReplyBody, UserRef,
};
pub use relay_service::{CommandRouter, DeliveryGateway, RouterSettings};
pub use response_lifecycle::InteractionResponder;
