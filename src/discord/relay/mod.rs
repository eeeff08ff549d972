// Discord adapters for the relay router.

pub mod embeds;
pub mod poise_responder;
pub mod registration;
pub mod serenity_gateway;

pub use poise_responder::PoiseResponder;
pub use serenity_gateway::SerenityGateway;
