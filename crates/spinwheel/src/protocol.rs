use crate::label::Label;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/classwheel.sock";

/// One line of the daemon's control socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Show,
    Hide,
    Spin,
    Add(Label),
    Remove(Label),
    Clear,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Command '{0}' needs a label")]
    MissingLabel(&'static str),
    #[error("Command '{0}' takes no arguments")]
    UnexpectedArgument(&'static str),
    #[error("Label {0:?} contains control characters")]
    ControlCharacter(String),
}

/// Labels travel inside a single line, so they must not carry line breaks
/// or other control characters.
fn check_label(label: &str) -> Result<(), ProtocolError> {
    if label.chars().any(char::is_control) {
        return Err(ProtocolError::ControlCharacter(label.to_string()));
    }
    Ok(())
}

impl FromStr for ControlCommand {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        let bare = |cmd: Self, name: &'static str| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(ProtocolError::UnexpectedArgument(name))
            }
        };
        let with_label = |name: &'static str| -> Result<Label, ProtocolError> {
            if rest.is_empty() {
                return Err(ProtocolError::MissingLabel(name));
            }
            check_label(rest)?;
            Ok(Label::new(rest))
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ProtocolError::Empty),
            "show" => bare(Self::Show, "show"),
            "hide" => bare(Self::Hide, "hide"),
            "spin" => bare(Self::Spin, "spin"),
            "clear" => bare(Self::Clear, "clear"),
            "add" => with_label("add").map(Self::Add),
            "remove" => with_label("remove").map(Self::Remove),
            _ => Err(ProtocolError::Unknown(verb.to_string())),
        }
    }
}

impl ControlCommand {
    /// The newline-terminated wire form. Fails instead of splitting a
    /// label across lines.
    pub fn to_line(&self) -> Result<String, ProtocolError> {
        if let Self::Add(label) | Self::Remove(label) = self {
            check_label(label)?;
        }
        Ok(format!("{}\n", self))
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::Spin => write!(f, "spin"),
            Self::Clear => write!(f, "clear"),
            Self::Add(label) => write!(f, "add {}", label),
            Self::Remove(label) => write!(f, "remove {}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("show", ControlCommand::Show),
            ("  HIDE  ", ControlCommand::Hide),
            ("spin\n", ControlCommand::Spin),
            ("clear", ControlCommand::Clear),
            ("add Mary Jane", ControlCommand::Add(Label::from("Mary Jane"))),
            ("remove   Bob ", ControlCommand::Remove(Label::from("Bob"))),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<ControlCommand>(), Ok(expected));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ControlCommand>(), Err(ProtocolError::Empty));
        assert_eq!(
            "dance".parse::<ControlCommand>(),
            Err(ProtocolError::Unknown("dance".to_string()))
        );
        assert_eq!(
            "add   ".parse::<ControlCommand>(),
            Err(ProtocolError::MissingLabel("add"))
        );
        assert_eq!(
            "spin twice".parse::<ControlCommand>(),
            Err(ProtocolError::UnexpectedArgument("spin"))
        );
        assert_eq!(
            "add Ann\u{7}".parse::<ControlCommand>(),
            Err(ProtocolError::ControlCharacter("Ann\u{7}".to_string()))
        );
        assert_eq!(
            "remove Ann\tLee".parse::<ControlCommand>(),
            Err(ProtocolError::ControlCharacter("Ann\tLee".to_string()))
        );
    }

    #[test]
    fn test_wire_line_parses_back_as_one_command() {
        let cmds = vec![
            ControlCommand::Add(Label::from("Zoë K")),
            ControlCommand::Remove(Label::from("Bob")),
            ControlCommand::Spin,
        ];

        for cmd in cmds {
            let line = cmd.to_line().unwrap();
            let parsed: Vec<_> = line.lines().map(str::parse::<ControlCommand>).collect();
            assert_eq!(parsed, vec![Ok(cmd)]);
        }
    }

    #[test]
    fn test_line_break_in_label_is_not_sent() {
        let injected = ControlCommand::Add(Label::from("Ann\nclear"));
        assert_eq!(
            injected.to_line(),
            Err(ProtocolError::ControlCharacter("Ann\nclear".to_string()))
        );

        let carriage = ControlCommand::Remove(Label::from("Ann\r"));
        assert!(carriage.to_line().is_err());
    }
}
