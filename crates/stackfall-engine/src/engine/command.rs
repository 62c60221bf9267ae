use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A player command addressed to a [`GameSession`](crate::GameSession).
///
/// Commands parse from single-character script tokens or from their names
/// (case-insensitive):
///
/// | token | name            |
/// |-------|-----------------|
/// | `L`   | `left`          |
/// | `R`   | `right`         |
/// | `D`   | `drop`          |
/// | `C`   | `rotate-cw`     |
/// | `W`   | `rotate-ccw`    |
/// | `P`   | `pause`         |
/// |       | `reset`         |
///
/// ```
/// use stackfall_engine::Command;
///
/// assert_eq!("L".parse(), Ok(Command::MoveLeft));
/// assert_eq!("rotate-ccw".parse(), Ok(Command::RotateCcw));
/// assert!("X".parse::<Command>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    TogglePause,
    Reset,
}

impl Command {
    /// Commands a player can issue during play; [`Command::Reset`] is not one.
    pub const PLAY: [Self; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::SoftDrop,
        Self::RotateCw,
        Self::RotateCcw,
        Self::TogglePause,
    ];

    /// Single-character script token, if the command has one.
    #[must_use]
    pub const fn token(self) -> Option<char> {
        match self {
            Self::MoveLeft => Some('L'),
            Self::MoveRight => Some('R'),
            Self::SoftDrop => Some('D'),
            Self::RotateCw => Some('C'),
            Self::RotateCcw => Some('W'),
            Self::TogglePause => Some('P'),
            Self::Reset => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveLeft => "left",
            Self::MoveRight => "right",
            Self::SoftDrop => "drop",
            Self::RotateCw => "rotate-cw",
            Self::RotateCcw => "rotate-ccw",
            Self::TogglePause => "pause",
            Self::Reset => "reset",
        }
    }

    #[must_use]
    pub fn from_token(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        Self::PLAY.into_iter().find(|cmd| cmd.token() == Some(c))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when text names no command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command `{token}`")]
pub struct ParseCommandError {
    #[error(not(source))]
    token: String,
}

impl ParseCommandError {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(cmd) = Self::from_token(c)
        {
            return Ok(cmd);
        }
        [Self::Reset]
            .into_iter()
            .chain(Self::PLAY)
            .find(|cmd| cmd.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCommandError {
                token: s.to_owned(),
            })
    }
}
