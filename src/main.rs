mod cli;

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::error;
use thiserror::Error;

use chess_rules::utils::perft_divide;
use chess_rules::{Board, FenParseError, MoveError, ParseSquareError, Square};
use cli::{Cli, Commands};

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Fen(#[from] FenParseError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Square(#[from] ParseSquareError),

    #[error("Expected a coordinate move such as e2e4 or e7e8q, found '{0}'")]
    MoveFormat(String),
}

/// Splits `e2e4` or `e7e8q` into its two squares
fn parse_coordinates(text: &str) -> Result<(Square, Square), CliError> {
    let format_err = || CliError::MoveFormat(text.to_string());

    if !matches!(text.len(), 4 | 5) || !text.is_ascii() {
        return Err(format_err());
    }

    if text.len() == 5 && !text.ends_with('q') {
        return Err(format_err());
    }

    let from = text.get(0..2).ok_or_else(format_err)?.parse::<Square>()?;
    let to = text.get(2..4).ok_or_else(format_err)?.parse::<Square>()?;

    Ok((from, to))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut board = match &cli.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::new(),
    };

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => print!("{board}"),

        Commands::Play { moves } => {
            for text in &moves {
                let (from, to) = parse_coordinates(text)?;
                let report = board.apply_coordinates(from, to)?;

                println!(
                    "{}: status {}, check {}, half-move clock {}, move {}",
                    report.mv,
                    report.status,
                    report.check.is_check,
                    report.half_move_clock,
                    report.full_moves
                );
            }
            print!("{board}");
        }

        Commands::Moves { square } => {
            let moves: Vec<String> = match square {
                Some(name) => {
                    let sq = name.parse::<Square>()?;
                    board.legal_moves_from(sq).map(|mv| mv.to_string()).collect()
                }
                None => board.legal_moves().iter().map(|mv| mv.to_string()).collect(),
            };

            let stats = board.diagnostics();
            println!("{}", moves.join(" "));
            println!(
                "{} moves for {:?}, generated in {:?}",
                moves.len(),
                board.turn(),
                stats.elapsed
            );
        }

        Commands::Perft { depth } => {
            let divide = perft_divide(board.position(), depth);
            for (mv, nodes) in &divide {
                println!("{mv}: {nodes}");
            }
            let total: usize = divide.iter().map(|(_, nodes)| nodes).sum();
            println!("Nodes: {total}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let env = Env::default().filter_or("CHESS_RULES_LOG", "info");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("e2e4").unwrap(), (Square::E2, Square::E4));
        assert_eq!(parse_coordinates("a7a8q").unwrap(), (Square::A7, Square::A8));
        assert!(matches!(parse_coordinates("e2"), Err(CliError::MoveFormat(_))));
        assert!(matches!(parse_coordinates("a7a8n"), Err(CliError::MoveFormat(_))));
        assert!(matches!(parse_coordinates("z2e4"), Err(CliError::Square(_))));
    }

    #[test]
    fn test_run_plays_moves() {
        let cli = Cli::parse_from(["chess-rules", "play", "e2e4", "e7e5", "g1f3"]);
        assert!(run(cli).is_ok());

        let cli = Cli::parse_from(["chess-rules", "play", "e2e5"]);
        assert!(matches!(run(cli), Err(CliError::Move(MoveError::NoLegalMove(_, _)))));
    }
}
