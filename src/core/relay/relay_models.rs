// Domain models for the relay commands.
// Like the rest of `core/`, nothing here knows about serenity or poise: the
// Discord layer translates interactions into these plain types.

use std::collections::BTreeMap;
use thiserror::Error;

/// Embed colour used by `/embed` when no colour argument is given.
pub const DEFAULT_EMBED_COLOR: u32 = 0x00FF00;

/// Embed colour used for direct messages.
pub const DIRECT_MESSAGE_COLOR: u32 = 0xFF4500;

// ============================================================================
// INVOCATION
// ============================================================================

/// A channel picked as a command argument (or resolved from configuration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: u64,
    pub name: String,
}

/// A user picked as a command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: u64,
    pub name: String,
    pub tag: String,
}

/// Typed value of a single command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Channel(ChannelRef),
    User(UserRef),
    Text(String),
}

/// The member who ran the command.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: u64,
    pub tag: String,
    /// Holds the administrator-equivalent permission.
    pub elevated: bool,
}

/// One inbound slash-command request.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub args: BTreeMap<String, ArgValue>,
    pub actor: Actor,
    /// Name of the server the command was run in, if any.
    pub origin_name: Option<String>,
}

impl Invocation {
    pub fn new(command: impl Into<String>, actor: Actor) -> Self {
        Self {
            command: command.into(),
            args: BTreeMap::new(),
            actor,
            origin_name: None,
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    pub fn with_origin(mut self, origin_name: impl Into<String>) -> Self {
        self.origin_name = Some(origin_name.into());
        self
    }

    /// Text argument exactly as typed. Blank strings count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.args.get(name) {
            Some(ArgValue::Text(value)) if !is_blank(value) => Some(value),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelRef> {
        match self.args.get(name) {
            Some(ArgValue::Channel(channel)) => Some(channel),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<&UserRef> {
        match self.args.get(name) {
            Some(ArgValue::User(user)) => Some(user),
            _ => None,
        }
    }
}

// ============================================================================
// REPLIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral description of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl EmbedSpec {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            fields: Vec::new(),
            footer: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Text(String),
    Embed(EmbedSpec),
}

/// Something we send back to the person who ran the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: ReplyBody,
    /// Only visible to the invoking member.
    pub ephemeral: bool,
}

impl Reply {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(text.into()),
            ephemeral: true,
        }
    }

    pub fn public_embed(embed: EmbedSpec) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            ephemeral: false,
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(text) => Some(text),
            ReplyBody::Embed(_) => None,
        }
    }
}

// ============================================================================
// ERRORS & OUTCOMES
// ============================================================================

/// A platform call failed. Always handled locally; never crashes the bot.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Target unreachable: {0}")]
    Unreachable(String),

    #[error("Missing permission: {0}")]
    Forbidden(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// How an invocation ended. Returned for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlingOutcome {
    /// Unknown command name; nothing was sent.
    Ignored,
    Denied,
    InvalidInput,
    Delivered,
    DeliveryFailed,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parse a user-supplied embed colour such as `#FFAA00`, `ffaa00` or `0xFFAA00`.
pub fn parse_color(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Actor {
        Actor {
            id: 1,
            tag: "mod#0001".to_string(),
            elevated: true,
        }
    }

    #[test]
    fn parse_color_accepts_common_hex_forms() {
        assert_eq!(parse_color("#00FF00"), Some(0x00FF00));
        assert_eq!(parse_color("ff4500"), Some(0xFF4500));
        assert_eq!(parse_color(" 0x5865F2 "), Some(0x5865F2));
    }

    #[test]
    fn parse_color_rejects_garbage() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("green"), None);
        assert_eq!(parse_color("#GG0000"), None);
        assert_eq!(parse_color("+12345"), None);
    }

    #[test]
    fn text_arguments_keep_surrounding_whitespace() {
        let invocation = Invocation::new("say", actor())
            .with_arg("message", ArgValue::Text("  indented code  ".to_string()));

        assert_eq!(invocation.text("message"), Some("  indented code  "));
    }

    #[test]
    fn blank_text_arguments_count_as_missing() {
        let invocation = Invocation::new("say", actor())
            .with_arg("message", ArgValue::Text("   ".to_string()))
            .with_arg("title", ArgValue::Text("  hi ".to_string()));

        assert_eq!(invocation.text("message"), None);
        assert_eq!(invocation.text("title"), Some("  hi "));
        assert_eq!(invocation.text("absent"), None);
    }

    #[test]
    fn typed_accessors_do_not_cross_kinds() {
        let invocation = Invocation::new("say", actor()).with_arg(
            "channel",
            ArgValue::Text("general".to_string()),
        );

        assert!(invocation.channel("channel").is_none());
        assert!(invocation.user("channel").is_none());
    }
}
