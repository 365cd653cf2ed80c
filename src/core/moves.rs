use crate::{board::Position, core::*};

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// A single transition on the board.
///
/// `piece` is the mover and `captured` the occupant of `to`, both taken before
/// the move is played. An en-passant capture has `is_capture` set while
/// `captured` is `None`, since the landing square is empty.
///
/// Equality only looks at the squares and the flags, which is enough to tell
/// apart the legal moves of one piece.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_capture: bool,
    pub is_king_side_castling: bool,
    pub is_queen_side_castling: bool,
    pub is_pawn_promotion: bool,
}

impl Move {
    /// Plain move or capture, the promotion flag follows from the geometry
    pub fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        let is_pawn_promotion =
            piece.is_type(PieceType::Pawn) && to.rank() == piece.colour().promotion_rank();

        Self {
            from,
            to,
            piece,
            captured,
            is_capture: captured.is_some(),
            is_king_side_castling: false,
            is_queen_side_castling: false,
            is_pawn_promotion,
        }
    }

    pub fn en_passant(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            is_capture: true,
            ..Self::new(from, to, piece, None)
        }
    }

    /// King move of a castle, `to` is the king's destination
    pub fn castling(from: Square, to: Square, king: Piece, king_side: bool) -> Self {
        Self {
            is_king_side_castling: king_side,
            is_queen_side_castling: !king_side,
            ..Self::new(from, to, king, None)
        }
    }

    /// Builds the candidate move for the piece standing on `from`, reading the
    /// flags off the position. Returns `None` when `from` is empty.
    pub fn from_position(position: &Position, from: Square, to: Square) -> Option<Self> {
        let piece = position.on(from)?;
        let captured = position.on(to);

        let sideways = Square::file_dist(from, to);

        match piece.pt() {
            PieceType::King if sideways == 2 && from.rank() == to.rank() => Some(Self::castling(
                from,
                to,
                piece,
                to.file() > from.file(),
            )),
            PieceType::Pawn
                if captured.is_none() && sideways == 1 && position.state.ep_target == Some(to) =>
            {
                Some(Self::en_passant(from, to, piece))
            }
            _ => Some(Self::new(from, to, piece, captured)),
        }
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.is_king_side_castling || self.is_queen_side_castling
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.is_capture && self.captured.is_none()
    }

    fn flags(&self) -> (bool, bool, bool, bool) {
        (
            self.is_capture,
            self.is_king_side_castling,
            self.is_queen_side_castling,
            self.is_pawn_promotion,
        )
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.flags() == other.flags()
    }
}

impl Eq for Move {}

impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.flags().hash(state);
    }
}

impl std::fmt::Display for Move {
    /// Coordinate notation, `e2e4`, with `q` appended to promotions
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.is_pawn_promotion {
            write!(f, "{}", PieceType::Queen)?;
        }
        Ok(())
    }
}
