use super::{BoardState, Player};
use crate::core::*;

/******************************************\
|==========================================|
|                 Position                 |
|==========================================|
\******************************************/

/// Piece layout plus state, small enough to copy freely.
///
/// Legality probes play candidate moves on a copy and throw it away, so the
/// live board is never touched by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(super) squares: [Option<Piece>; Square::NUM],

    pub state: BoardState,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// No pieces, default state
    pub fn empty() -> Self {
        Self {
            squares: [None; Square::NUM],
            state: BoardState::default(),
        }
    }

    /// The standard initial layout with White to move and all rights granted
    pub fn start() -> Self {
        use PieceType::*;
        const BACK_RANK: [PieceType; File::NUM] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut pos = Self::empty();

        for file in File::iter() {
            for colour in Colour::iter() {
                let back = Square::from_parts(file, colour.back_rank());
                let pawn = Square::from_parts(file, colour.pawn_rank());

                pos.add_piece(Piece::from_parts(colour, BACK_RANK[file.index()]), back);
                pos.add_piece(Piece::from_parts(colour, Pawn), pawn);
            }
        }

        pos.state.white = Player::BOTH;
        pos.state.black = Player::BOTH;
        pos
    }

    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn turn(&self) -> Colour {
        self.state.turn
    }

    /// Every occupied square with its occupant, from a8 to h1
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| self.on(sq).map(|piece| (sq, piece)))
    }

    /// Occupied squares of one colour
    pub fn pieces_of(&self, colour: Colour) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.is_colour(colour))
    }

    /// Square of `colour`'s king, the first one found if there are several
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        let king = Piece::from_parts(colour, PieceType::King);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }
}
