//! Line parsing for the two screens.

use tone_core::tones::{GRID_SIZE, tone_at};

use std::path::PathBuf;

use thiserror::Error;

/// Terminates a multi-line `:edit` block.
pub const EDIT_TERMINATOR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Select a tone and adjust the working text to it.
    SelectTone(String),
    Edit,
    Load(PathBuf),
    Reset,
    Show,
    Tones,
    Logout,
    Help,
    Quit,
    Empty,
}

/// What the credential-entry screen received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialInput {
    Key(String),
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown command ':{0}'. Type :help for the list of commands.")]
    UnknownCommand(String),

    #[error("':{command}' needs an argument. Usage: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },

    #[error("No tone at position {0}. Pick a number from 1 to {max}.", max = GRID_SIZE * GRID_SIZE)]
    ToneIndexOutOfRange(usize),

    #[error("Type a tone number (1-9) or a command starting with ':'. Type :help for help.")]
    NotACommand,
}

/// Parse one main-screen line.
pub fn parse_command(line: &str) -> Result<UserCommand, InputError> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(UserCommand::Empty);
    }

    if line.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = line
            .parse()
            .map_err(|_| InputError::ToneIndexOutOfRange(usize::MAX))?;
        return tone_at(index)
            .map(|tone| UserCommand::SelectTone(tone.id.to_string()))
            .ok_or(InputError::ToneIndexOutOfRange(index));
    }

    let Some(command_line) = line.strip_prefix(':') else {
        return Err(InputError::NotACommand);
    };

    let (name, argument) = match command_line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command_line, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "tone" | "t" => {
            if argument.is_empty() {
                return Err(InputError::MissingArgument {
                    command: "tone",
                    usage: ":tone <id>",
                });
            }
            Ok(UserCommand::SelectTone(argument.to_lowercase()))
        }
        "edit" | "e" => Ok(UserCommand::Edit),
        "load" | "l" => {
            if argument.is_empty() {
                return Err(InputError::MissingArgument {
                    command: "load",
                    usage: ":load <path>",
                });
            }
            Ok(UserCommand::Load(PathBuf::from(argument)))
        }
        "reset" | "r" => Ok(UserCommand::Reset),
        "show" | "s" => Ok(UserCommand::Show),
        "tones" => Ok(UserCommand::Tones),
        "logout" => Ok(UserCommand::Logout),
        "help" | "h" | "?" => Ok(UserCommand::Help),
        "quit" | "q" | "exit" => Ok(UserCommand::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

/// Parse one credential-entry line. Anything but `:quit` is taken as a key.
pub fn parse_credential_line(line: &str) -> CredentialInput {
    let line = line.trim();
    match line {
        "" => CredentialInput::Empty,
        ":quit" | ":q" | ":exit" => CredentialInput::Quit,
        key => CredentialInput::Key(key.to_string()),
    }
}
