// Unit tests for line parsing

use crate::input::{CredentialInput, InputError, UserCommand, parse_command, parse_credential_line};

use std::path::PathBuf;

/// **VALUE**: Verifies grid numbers map to catalog tones.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one between the printed grid
/// numbers and the tone actually requested.
#[test]
fn given_grid_number_when_parsed_then_selects_tone_at_position() {
    assert_eq!(
        parse_command("1"),
        Ok(UserCommand::SelectTone("professional".to_string()))
    );
    assert_eq!(
        parse_command(" 9 "),
        Ok(UserCommand::SelectTone("confident".to_string()))
    );
    assert_eq!(parse_command("0"), Err(InputError::ToneIndexOutOfRange(0)));
    assert_eq!(parse_command("10"), Err(InputError::ToneIndexOutOfRange(10)));
}

#[test]
fn given_colon_commands_when_parsed_then_mapped() {
    let cases = [
        (":tone Formal", UserCommand::SelectTone("formal".to_string())),
        (":edit", UserCommand::Edit),
        (":load notes/draft.txt", UserCommand::Load(PathBuf::from("notes/draft.txt"))),
        (":reset", UserCommand::Reset),
        (":show", UserCommand::Show),
        (":tones", UserCommand::Tones),
        (":logout", UserCommand::Logout),
        (":help", UserCommand::Help),
        (":QUIT", UserCommand::Quit),
        ("   ", UserCommand::Empty),
    ];

    for (line, expected) in cases {
        assert_eq!(parse_command(line), Ok(expected), "line {line:?}");
    }
}

#[test]
fn given_bad_input_when_parsed_then_specific_error() {
    assert_eq!(
        parse_command(":frobnicate"),
        Err(InputError::UnknownCommand("frobnicate".to_string()))
    );
    assert!(matches!(
        parse_command(":tone"),
        Err(InputError::MissingArgument { command: "tone", .. })
    ));
    assert!(matches!(
        parse_command(":load   "),
        Err(InputError::MissingArgument { command: "load", .. })
    ));
    assert_eq!(parse_command("make it nicer"), Err(InputError::NotACommand));
}

#[test]
fn given_credential_lines_when_parsed_then_key_quit_or_empty() {
    assert_eq!(
        parse_credential_line("  sk-live-123456  "),
        CredentialInput::Key("sk-live-123456".to_string())
    );
    assert_eq!(parse_credential_line(":quit"), CredentialInput::Quit);
    assert_eq!(parse_credential_line(""), CredentialInput::Empty);
}
