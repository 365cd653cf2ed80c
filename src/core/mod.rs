// Core module exports

#[macro_use]
mod macros;

// Value types shared by the board and the move generator
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use moves::Move;
pub use piece::{Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{Colour, Direction, SquareAddError};
