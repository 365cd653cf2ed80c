pub mod fen;
pub mod movement;
pub mod position;
pub mod rules;
pub mod state;

pub use fen::{FenParseError, KIWIPETE_FEN, START_FEN};
pub use movement::{MoveError, MoveReport};
pub use position::Position;
pub use state::{BoardState, BoardStatus, CheckResult, Player};

use std::time::Duration;

use crate::core::*;

/******************************************\
|==========================================|
|                Constants                 |
|==========================================|
\******************************************/

/// Half-moves without a capture or pawn move that end the game in a draw
pub const HALF_MOVE_DRAW_LIMIT: u16 = 50;

/******************************************\
|==========================================|
|               Diagnostics                |
|==========================================|
\******************************************/

/// Size and cost of the last legal move regeneration. Advisory only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LegalMoveStats {
    pub count: usize,
    pub elapsed: Duration,
}

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

/// The live game: position, check, status and the legal moves of the side to
/// move, always kept in step with each other.
#[derive(Debug, Clone)]
pub struct Board {
    position: Position,

    check: CheckResult,

    status: BoardStatus,

    legal_moves: Vec<Move>,

    last_move: Option<Move>,

    stats: LegalMoveStats,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// A board in the standard starting position
    pub fn new() -> Board {
        let mut board = Board {
            position: Position::empty(),
            check: CheckResult::default(),
            status: BoardStatus::Playing,
            legal_moves: Vec::new(),
            last_move: None,
            stats: LegalMoveStats::default(),
        };
        board.reset();
        board
    }

    /// Back to the standard starting position
    pub fn reset(&mut self) {
        self.load(Position::start());
    }

    /// Replaces the whole game with `position` and re-derives everything else
    pub(crate) fn load(&mut self, position: Position) {
        self.position = position;
        self.last_move = None;
        self.status = match position.state.half_move_clock >= HALF_MOVE_DRAW_LIMIT {
            true => BoardStatus::Draw,
            false => BoardStatus::Playing,
        };
        self.refresh();
    }

    /// Index of an algebraic square name, `a8` is 0 and `h1` is 63
    pub fn square_idx(name: &str) -> Result<usize, ParseSquareError> {
        name.parse::<Square>().map(|sq| sq.index())
    }

    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        self.position.on(square)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.position.state
    }

    #[inline]
    pub fn turn(&self) -> Colour {
        self.position.turn()
    }

    #[inline]
    pub fn status(&self) -> BoardStatus {
        self.status
    }

    #[inline]
    pub fn check_result(&self) -> CheckResult {
        self.check
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.check.is_check
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// The cached legal moves of the side to move
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Cached legal moves of the piece on `from`
    pub fn legal_moves_from(&self, from: Square) -> impl Iterator<Item = &Move> + '_ {
        self.legal_moves.iter().filter(move |mv| mv.from == from)
    }

    /// The cached legal move going from `from` to `to`, if there is one
    pub fn find_legal_move(&self, from: Square, to: Square) -> Option<Move> {
        self.legal_moves
            .iter()
            .find(|mv| mv.from == from && mv.to == to)
            .copied()
    }

    #[inline]
    pub fn diagnostics(&self) -> LegalMoveStats {
        self.stats
    }
}

impl Move {
    /// Candidate move for the piece on `from`, flags read off the live position
    pub fn from_board(board: &Board, from: Square, to: Square) -> Option<Self> {
        Self::from_position(board.position(), from, to)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = match self.on(square) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        let state = self.state();

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {:?}", state.turn)?;
        writeln!(f, "Castling: {}", state.castling_string())?;
        writeln!(
            f,
            "En Passant Square: {}",
            match state.ep_target {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Half Move Clock: {}", state.half_move_clock)?;
        writeln!(f, "Full Move: {}", state.full_moves)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Check: {}", self.check.is_check)?;
        writeln!(
            f,
            "Last Move: {}",
            match self.last_move {
                Some(mv) => mv.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Fen: {}", self.fen())?;

        Ok(())
    }
}
