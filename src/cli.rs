use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chess-rules",
    version,
    about = "Legal moves, game status and FEN for a chess position"
)]
pub struct Cli {
    /// Position to start from, the standard start position when omitted
    #[arg(long, global = true)]
    pub fen: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the board and its state
    Show,

    /// Play coordinate moves in order (e2e4 e7e5 ...) and print the result
    Play { moves: Vec<String> },

    /// List the legal moves of the side to move, or of one square
    Moves { square: Option<String> },

    /// Count the leaf nodes of the legal move tree
    Perft {
        #[arg(default_value_t = 3)]
        depth: usize,
    },
}
