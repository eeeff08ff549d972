// Discord commands module.
// Each feature gets its own command file.

pub mod relay;

use crate::core::relay::{CommandDefinition, CommandName};
use relay::{Data, Error};

/// The relay commands, with descriptions and required flags copied from the
/// core catalog so registration always matches what the router enforces.
pub fn relay_commands() -> Vec<poise::Command<Data, Error>> {
    let mut commands = vec![relay::say(), relay::embed(), relay::dm(), relay::report()];
    for command in &mut commands {
        if let Some(command_name) = CommandName::parse(&command.name) {
            apply_definition(command, command_name.definition());
        }
    }
    commands
}

fn apply_definition(command: &mut poise::Command<Data, Error>, definition: &CommandDefinition) {
    command.description = Some(definition.description.to_string());
    for parameter in &mut command.parameters {
        if let Some(spec) = definition.parameter(&parameter.name) {
            parameter.description = Some(spec.description.to_string());
            parameter.required = spec.required;
        }
    }
}
