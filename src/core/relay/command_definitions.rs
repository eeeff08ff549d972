// Static catalog of the relay commands.
// This table is the single source of truth for names, descriptions and which
// arguments are required. The Discord layer copies it onto the poise commands
// before they are registered.

use super::relay_models::{ArgValue, Invocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Channel,
    User,
    Text,
}

#[derive(Debug)]
pub struct ParameterDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
}

#[derive(Debug)]
pub struct CommandDefinition {
    pub name: CommandName,
    pub description: &'static str,
    /// Only members with the administrator permission may run it.
    pub requires_elevation: bool,
    pub parameters: &'static [ParameterDefinition],
}

/// The fixed set of commands this bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    SendToChannel,
    SendEmbed,
    SendDirectMessage,
    SubmitReport,
}

impl CommandName {
    pub const ALL: [CommandName; 4] = [
        CommandName::SendToChannel,
        CommandName::SendEmbed,
        CommandName::SendDirectMessage,
        CommandName::SubmitReport,
    ];

    /// Slash command name as registered with Discord.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::SendToChannel => "say",
            CommandName::SendEmbed => "embed",
            CommandName::SendDirectMessage => "dm",
            CommandName::SubmitReport => "report",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.as_str() == name)
    }

    pub fn definition(self) -> &'static CommandDefinition {
        match self {
            CommandName::SendToChannel => &SAY,
            CommandName::SendEmbed => &EMBED,
            CommandName::SendDirectMessage => &DM,
            CommandName::SubmitReport => &REPORT,
        }
    }
}

impl CommandDefinition {
    pub fn parameter(&self, name: &str) -> Option<&'static ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Every required parameter is present, has the declared kind and, for
    /// text, is not blank.
    pub fn arguments_satisfied(&self, invocation: &Invocation) -> bool {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .all(|p| match p.kind {
                ParameterKind::Text => invocation.text(p.name).is_some(),
                ParameterKind::Channel => {
                    matches!(invocation.args.get(p.name), Some(ArgValue::Channel(_)))
                }
                ParameterKind::User => {
                    matches!(invocation.args.get(p.name), Some(ArgValue::User(_)))
                }
            })
    }
}

/// All command definitions, in registration order.
#[cfg(test)]
pub fn all_definitions() -> impl Iterator<Item = &'static CommandDefinition> {
    CommandName::ALL.into_iter().map(CommandName::definition)
}

static SAY: CommandDefinition = CommandDefinition {
    name: CommandName::SendToChannel,
    description: "Send a message to a channel",
    requires_elevation: true,
    parameters: &[
        ParameterDefinition {
            name: "channel",
            description: "Channel to send the message to",
            kind: ParameterKind::Channel,
            required: true,
        },
        ParameterDefinition {
            name: "message",
            description: "The message to send",
            kind: ParameterKind::Text,
            required: true,
        },
    ],
};

static EMBED: CommandDefinition = CommandDefinition {
    name: CommandName::SendEmbed,
    description: "Send an embed message",
    requires_elevation: true,
    parameters: &[
        ParameterDefinition {
            name: "title",
            description: "Embed title",
            kind: ParameterKind::Text,
            required: true,
        },
        ParameterDefinition {
            name: "description",
            description: "Embed content",
            kind: ParameterKind::Text,
            required: true,
        },
        ParameterDefinition {
            name: "color",
            description: "Embed colour as hex, e.g. #00FF00",
            kind: ParameterKind::Text,
            required: false,
        },
    ],
};

static DM: CommandDefinition = CommandDefinition {
    name: CommandName::SendDirectMessage,
    description: "Send a message to a user's DMs",
    requires_elevation: true,
    parameters: &[
        ParameterDefinition {
            name: "user",
            description: "User to message",
            kind: ParameterKind::User,
            required: true,
        },
        ParameterDefinition {
            name: "message",
            description: "The message to send",
            kind: ParameterKind::Text,
            required: true,
        },
    ],
};

static REPORT: CommandDefinition = CommandDefinition {
    name: CommandName::SubmitReport,
    description: "Report an issue or incident",
    requires_elevation: false,
    parameters: &[ParameterDefinition {
        name: "issue",
        description: "Describe the issue or incident you want to report",
        kind: ParameterKind::Text,
        required: true,
    }],
};
