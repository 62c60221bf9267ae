use std::{fs, path::PathBuf};

use anyhow::{Context, bail};
use rand::Rng as _;
use stackfall_engine::{
    Command, GameSession, ParseCommandError, PieceGenerator, PieceKind, PieceSeed,
};
use tracing::info;

use crate::util::{Output, SessionConfigArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScriptArg {
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Seed for piece generation (32 hex characters)
    #[arg(long, conflicts_with = "pieces")]
    seed: Option<PieceSeed>,
    /// Fixed piece sequence to repeat instead of random pieces, e.g. `OIT`
    #[arg(long)]
    pieces: Option<String>,
    /// Print the final session snapshot as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Script file: whitespace separated commands, `#` starts a comment
    script: PathBuf,
}

pub(crate) fn run(arg: &ScriptArg) -> anyhow::Result<()> {
    let config = arg.config.resolve()?;
    let source = fs::read_to_string(&arg.script)
        .with_context(|| format!("Failed to read script file: {}", arg.script.display()))?;
    let commands = parse_script(&source)
        .with_context(|| format!("Failed to parse script file: {}", arg.script.display()))?;

    let generator = match (&arg.pieces, arg.seed) {
        (Some(pieces), _) => PieceGenerator::cycle(&parse_pieces(pieces)?),
        (None, Some(seed)) => PieceGenerator::with_seed(seed),
        (None, None) => PieceGenerator::with_seed(rand::rng().random()),
    };
    let mut session = GameSession::with_generator(config, generator)?;
    session.reset();
    info!(commands = commands.len(), seed = ?session.seed(), "running script");
    for command in commands {
        session.apply(command);
    }

    if arg.json {
        return Output::save_json(&session.snapshot(), arg.output.clone());
    }
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_text(&render_text(&session))
}

/// Parses a command script.
///
/// Tokens are separated by whitespace and `#` comments out the rest of a
/// line. A token is either a command name (`left`, `rotate-cw`, ...) or a run
/// of single-character commands such as `LLD`.
fn parse_script(source: &str) -> anyhow::Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let code = line.split_once('#').map_or(line, |(code, _)| code);
        for token in code.split_whitespace() {
            let parsed = parse_token(token).with_context(|| format!("line {}", line_no + 1))?;
            commands.extend(parsed);
        }
    }
    Ok(commands)
}

fn parse_token(token: &str) -> Result<Vec<Command>, ParseCommandError> {
    match token.parse::<Command>() {
        Ok(command) => Ok(vec![command]),
        Err(err) => token
            .chars()
            .map(Command::from_token)
            .collect::<Option<Vec<_>>>()
            .ok_or(err),
    }
}

fn parse_pieces(pieces: &str) -> anyhow::Result<Vec<PieceKind>> {
    let kinds = pieces
        .chars()
        .map(|c| PieceKind::from_char(c.to_ascii_uppercase()))
        .collect::<Option<Vec<_>>>();
    match kinds {
        Some(kinds) if !kinds.is_empty() => Ok(kinds),
        _ => bail!("Invalid piece sequence `{pieces}`: expected letters from IJLOSTZ"),
    }
}

/// Renders the board with the active piece in lowercase, followed by the score.
fn render_text(session: &GameSession) -> String {
    let mut rows: Vec<Vec<char>> = session
        .board()
        .rows()
        .map(|row| row.iter().map(|cell| cell.as_char()).collect())
        .collect();
    if let Some(piece) = session.active_piece()
        && !session.is_terminal()
    {
        for (x, y, kind) in piece.occupied_cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && let Some(c) = rows.get_mut(y).and_then(|row| row.get_mut(x))
            {
                *c = kind.as_char().to_ascii_lowercase();
            }
        }
    }

    let mut text: String = rows
        .iter()
        .map(|row| row.iter().collect::<String>() + "\n")
        .collect();
    let state = format!("{:?}", session.state()).to_lowercase();
    text.push_str(&format!(
        "score: {}\nrows: {}\nstate: {state}",
        session.score(),
        session.stats().total_cleared_rows()
    ));
    text
}

#[cfg(test)]
mod tests {
    use stackfall_engine::SessionConfig;

    use super::*;

    #[test]
    fn test_parse_script() {
        let source = "
            # fill the left side
            LLLLL DDDD   # five left, four down
            rotate-cw right
            P p
        ";
        let commands = parse_script(source).unwrap();
        let mut expected = vec![Command::MoveLeft; 5];
        expected.extend([Command::SoftDrop; 4]);
        expected.extend([
            Command::RotateCw,
            Command::MoveRight,
            Command::TogglePause,
            Command::TogglePause,
        ]);
        assert_eq!(commands, expected);
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("L\nL hold\n").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("unknown command `hold`"), "{message}");
    }

    #[test]
    fn test_parse_pieces() {
        assert_eq!(
            parse_pieces("oIt").unwrap(),
            vec![PieceKind::O, PieceKind::I, PieceKind::T]
        );
        assert!(parse_pieces("").is_err());
        assert!(parse_pieces("OX").is_err());
    }

    #[test]
    fn test_render_text() {
        let config = SessionConfig {
            width: 4,
            height: 4,
            ..SessionConfig::default()
        };
        let mut session =
            GameSession::with_generator(config, PieceGenerator::cycle(&[PieceKind::O])).unwrap();
        session.reset();
        for command in parse_script("D D D").unwrap() {
            session.apply(command);
        }
        // The first O locked at the bottom and the next one waits at the top.
        assert_eq!(
            render_text(&session),
            ".oo.\n.oo.\n.OO.\n.OO.\nscore: 0\nrows: 0\nstate: running"
        );
    }
}
