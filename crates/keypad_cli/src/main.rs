//! Keypad tic-tac-toe - terminal driver
//!
//! Plays, analyses and checks games using the `keypad_tictactoe` engine.

#![warn(missing_docs)]

mod cli;
mod layout;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use keypad_tictactoe::advisor::{best_move, critical_positions, heuristic_score};
use keypad_tictactoe::{
    Board, EngineConfig, Game, GameListener, MoveError, MoveReport, Outcome, Player, Position,
    StateRecord, TracingListener,
};
use layout::GridLayout;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            advisor_plays_o,
            cell_size,
        } => run_play(config, advisor_plays_o, cell_size),
        Command::Advise { board } => run_advise(&board),
        Command::Replay { moves, json } => run_replay(config, &moves, json),
        Command::Check { file } => run_check(config, &file),
    }
}

/// Load the engine configuration, falling back to defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "Loaded engine config");
            Ok(config)
        }
        None => {
            debug!("Using default engine config");
            Ok(EngineConfig::default())
        }
    }
}

/// Parse a move list such as `"7,1,5"` or `"715"` into keypad digits.
fn parse_moves(moves: &str) -> Result<Vec<u8>> {
    moves
        .chars()
        .filter(|c| !matches!(c, ',' | ' '))
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .with_context(|| format!("Not a keypad digit: {c:?}"))
        })
        .collect()
}

/// One line of input in the interactive game.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayCommand {
    Quit,
    Reset,
    Hint,
    /// A number, checked by the engine.
    Key(u8),
    /// A cell named by its label, e.g. "top-right".
    Move(Position),
    Unknown(String),
}

/// Parse a line of play input; `None` for a blank line.
fn parse_command(line: &str) -> Option<PlayCommand> {
    let input = line.trim();
    let command = match input {
        "" => return None,
        "quit" | "q" => PlayCommand::Quit,
        "reset" => PlayCommand::Reset,
        "hint" => PlayCommand::Hint,
        _ => match input.parse::<u8>() {
            Ok(key) => PlayCommand::Key(key),
            Err(_) => Position::from_key_or_label(input)
                .map(PlayCommand::Move)
                .unwrap_or_else(|| PlayCommand::Unknown(input.to_string())),
        },
    };
    Some(command)
}

/// Print the board and status line.
fn print_state<L: GameListener>(game: &Game<L>) {
    println!("{}", game.state().board().display());
    println!("{}", game.state().status_string());
}

/// Print the stroke over the winning line, if there is one.
fn print_win_geometry<L: GameListener>(game: &Game<L>, cell_size: f64) {
    match game.win_geometry(&GridLayout::new(cell_size)) {
        Some(Ok(stroke)) => println!(
            "Stroke: {} at ({:.1}, {:.1}) {:.1}x{:.1}, rotated {:.1} degrees about {}",
            stroke.line_type,
            stroke.left,
            stroke.top,
            stroke.width,
            stroke.height,
            stroke.rotation_degrees,
            stroke.transform_origin
        ),
        Some(Err(e)) => warn!(error = %e, "Could not compute win geometry"),
        None => {}
    }
}

/// React to a finished move: geometry on a win, delayed reset on a draw.
fn after_move(game: &mut Game<TracingListener>, report: &MoveReport, cell_size: f64) {
    print_state(game);
    if let Outcome::Win { .. } = report.outcome {
        print_win_geometry(game, cell_size);
        println!("Type 'reset' for a new game.");
    }
    if let Some(delay) = report.reset_after {
        println!("New game in {} ms...", delay.as_millis());
        std::thread::sleep(delay);
        game.reset();
        print_state(game);
    }
}

fn show_result(
    game: &mut Game<TracingListener>,
    result: Result<MoveReport, MoveError>,
    cell_size: f64,
) {
    match result {
        Ok(report) => after_move(game, &report, cell_size),
        Err(e) => println!("Rejected: {e}"),
    }
}

/// Run an interactive game on stdin/stdout.
#[instrument]
fn run_play(config: EngineConfig, advisor_plays_o: bool, cell_size: f64) -> Result<()> {
    let mut game = Game::with_listener(config, TracingListener);
    println!(
        "Enter a keypad digit (7 8 9 / 4 5 6 / 1 2 3) or a cell name, 'hint', 'reset' or 'quit'."
    );
    print_state(&game);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if advisor_plays_o && game.state().is_active() && game.state().turn() == Player::O {
            if let Some(position) = game.suggest() {
                println!("O plays {position}");
                let report = game.apply_move(position)?;
                after_move(&mut game, &report, cell_size);
                continue;
            }
        }

        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match parse_command(&line) {
            None => continue,
            Some(PlayCommand::Quit) => break,
            Some(PlayCommand::Reset) => {
                game.reset();
                print_state(&game);
            }
            Some(PlayCommand::Hint) => match game.suggest() {
                Some(position) => println!("Try {position} ({})", position.label()),
                None => println!("No moves left."),
            },
            Some(PlayCommand::Unknown(input)) => println!("Unknown command: {input}"),
            Some(PlayCommand::Key(key)) => {
                let result = game.apply_key(key);
                show_result(&mut game, result, cell_size);
            }
            Some(PlayCommand::Move(position)) => {
                let result = game.apply_move(position);
                show_result(&mut game, result, cell_size);
            }
        }
    }

    info!("Leaving game");
    Ok(())
}

/// Print the advisor's view of a board for both players.
#[instrument]
fn run_advise(board: &str) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;
    println!("{}", board.display());

    for player in [Player::X, Player::O] {
        let critical = critical_positions(&board, player);
        let critical = critical
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let suggestion = best_move(&board, player)
            .map(|p| format!("{p} ({})", p.label()))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{player}: best move {suggestion}, wins at [{critical}], score {}",
            heuristic_score(&board, player)
        );
    }
    Ok(())
}

/// Replay moves from an empty board and print the result.
#[instrument]
fn run_replay(config: EngineConfig, moves: &str, json: bool) -> Result<()> {
    let keys = parse_moves(moves)?;
    let mut game = Game::with_listener(config, TracingListener);

    for key in keys {
        if let Err(e) = game.apply_key(key) {
            println!("Move {key} rejected: {e}");
        }
    }

    if json {
        println!("{}", game.export_state().to_json()?);
    } else {
        print_state(&game);
        print_win_geometry(&game, 100.0);
    }
    Ok(())
}

/// Validate a saved state record.
#[instrument]
fn run_check(config: EngineConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let record = StateRecord::from_json(&json)?;

    let mut game = Game::with_config(config);
    if let Err(e) = game.import_state(&record) {
        bail!("{} is not a valid state: {e}", file.display());
    }

    print_state(&game);
    println!("{}: ok", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves_accepts_separators() {
        assert_eq!(parse_moves("7,1, 5").unwrap(), vec![7, 1, 5]);
        assert_eq!(parse_moves("753").unwrap(), vec![7, 5, 3]);
    }

    #[test]
    fn test_parse_moves_rejects_letters() {
        assert!(parse_moves("7a").is_err());
    }

    #[test]
    fn test_parse_command_accepts_labels() {
        assert_eq!(
            parse_command("Top-right\n"),
            Some(PlayCommand::Move(Position::TopRight))
        );
        assert_eq!(parse_command(" 5 "), Some(PlayCommand::Key(5)));
        assert_eq!(parse_command("0"), Some(PlayCommand::Key(0)));
        assert_eq!(parse_command("hint"), Some(PlayCommand::Hint));
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("nowhere"),
            Some(PlayCommand::Unknown("nowhere".to_string()))
        );
    }
}
