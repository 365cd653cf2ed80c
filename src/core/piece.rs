use crate::core::Colour;

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - Represents the different chess pieces, colour and type together
/// - An empty square is `Option::<Piece>::None`, there is no null piece

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    WhitePawn, BlackPawn, WhiteKnight, BlackKnight, WhiteBishop, BlackBishop, WhiteRook, BlackRook, WhiteQueen, BlackQueen, WhiteKing, BlackKing
}

impl Piece {
    /// Number of elements in the Piece enum
    pub const NUM: usize = 12;

    #[rustfmt::skip]
    pub const ALL: [Piece; Piece::NUM] = [
        Piece::WhitePawn, Piece::BlackPawn, Piece::WhiteKnight, Piece::BlackKnight,
        Piece::WhiteBishop, Piece::BlackBishop, Piece::WhiteRook, Piece::BlackRook,
        Piece::WhiteQueen, Piece::BlackQueen, Piece::WhiteKing, Piece::BlackKing,
    ];
}

crate::impl_enum_index!(Piece);

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - Represents the different chess piece types

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
   Pawn, Knight, Bishop, Rook, Queen, King,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;

    #[rustfmt::skip]
    pub const ALL: [PieceType; PieceType::NUM] = [
        PieceType::Pawn, PieceType::Knight, PieceType::Bishop,
        PieceType::Rook, PieceType::Queen, PieceType::King,
    ];
}

crate::impl_enum_index!(PieceType);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Piece {
    /// Returns the piece type of the piece
    pub const fn pt(self) -> PieceType {
        PieceType::ALL[self as usize >> 1]
    }

    /// Returns the colour of the piece
    pub const fn colour(self) -> Colour {
        Colour::ALL[self as usize & 1]
    }

    /// Combines a colour and piece type pair to create a piece
    pub const fn from_parts(colour: Colour, piece_type: PieceType) -> Self {
        Piece::ALL[colour as usize | (piece_type as usize) << 1]
    }

    pub const fn is_colour(self, colour: Colour) -> bool {
        self.colour() as u8 == colour as u8
    }

    pub const fn is_type(self, piece_type: PieceType) -> bool {
        self.pt() as u8 == piece_type as u8
    }

    /// FEN letter, uppercase for White and lowercase for Black
    pub const fn to_char(self) -> char {
        PIECE_CHARS[self as usize]
    }

    /// Parses a FEN letter, the case selects the colour
    pub fn from_char(c: char) -> Option<Self> {
        PIECE_CHARS
            .iter()
            .position(|&p| p == c)
            .and_then(Piece::from_index)
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

/// FEN letters in `Piece` discriminant order
const PIECE_CHARS: [char; Piece::NUM] = ['P', 'p', 'N', 'n', 'B', 'b', 'R', 'r', 'Q', 'q', 'K', 'k'];

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let piece = Piece::from_parts(Colour::Black, *self);
        write!(f, "{}", piece.to_char())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
