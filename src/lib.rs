//! # Chess Rules
//!
//! Board representation, legal move generation, check, checkmate and
//! stalemate detection, and FEN import and export.
pub mod board;
pub mod core;
pub mod utils;

pub use board::{
    Board, BoardState, BoardStatus, CheckResult, FenParseError, HALF_MOVE_DRAW_LIMIT,
    LegalMoveStats, MoveError, MoveReport, Player, Position, START_FEN,
};
pub use crate::core::*;
