use super::{File, Rank, Square};
use thiserror::Error;

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Represents the two colours in chess: White and Black.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;

    pub const ALL: [Colour; Colour::NUM] = [Colour::White, Colour::Black];
}

crate::impl_enum_index!(Colour);

/******************************************\
|==========================================|
|                 Direction                |
|==========================================|
\******************************************/

/// # Direction Representation
///
/// Square index offsets on a board indexed from a8 (0) to h1 (63). North points
/// towards rank 8, so it lowers the index. Includes the knight jumps and the
/// pawn double push.

#[rustfmt::skip]
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N = -8, S = 8, W = -1, E = 1,
    NE = -7, NW = -9, SE = 9, SW = 7,
    NNE = -15, NNW = -17, NEE = -6, NWW = -10,
    SEE = 10, SWW = 6, SSE = 17, SSW = 15,
    NN = -16, SS = 16,
}

impl Direction {
    /// Rook rays
    pub const ORTHOGONAL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// Bishop rays
    pub const DIAGONAL: [Direction; 4] = [Direction::NE, Direction::NW, Direction::SE, Direction::SW];

    /// Queen rays and king steps
    #[rustfmt::skip]
    pub const ADJACENT: [Direction; 8] = [
        Direction::N, Direction::S, Direction::E, Direction::W,
        Direction::NE, Direction::NW, Direction::SE, Direction::SW,
    ];

    /// Knight jumps
    #[rustfmt::skip]
    pub const KNIGHT: [Direction; 8] = [
        Direction::NNE, Direction::NNW, Direction::NEE, Direction::NWW,
        Direction::SEE, Direction::SWW, Direction::SSE, Direction::SSW,
    ];

    /// Returns the direction pointing the opposite way (N => S, etc...)
    pub const fn reverse(self) -> Self {
        use Direction::*;
        match self {
            N => S,
            S => N,
            W => E,
            E => W,
            NE => SW,
            NW => SE,
            SE => NW,
            SW => NE,
            NNE => SSW,
            NNW => SSE,
            NEE => SWW,
            NWW => SEE,
            SEE => NWW,
            SWW => NEE,
            SSE => NNW,
            SSW => NNE,
            NN => SS,
            SS => NN,
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.reverse()
    }
}

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Colour {
    /// Returns the forward direction for a colour
    pub const fn forward(&self) -> Direction {
        match self {
            Colour::White => Direction::N,
            Colour::Black => Direction::S,
        }
    }

    /// Returns the double forward direction (pawn double push) for a colour
    pub const fn double_forward(&self) -> Direction {
        match self {
            Colour::White => Direction::NN,
            Colour::Black => Direction::SS,
        }
    }

    /// Returns both pawn capture directions for a colour
    pub const fn pawn_captures(&self) -> [Direction; 2] {
        match self {
            Colour::White => [Direction::NW, Direction::NE],
            Colour::Black => [Direction::SW, Direction::SE],
        }
    }

    /// The rank this colour's pawns start on
    pub const fn pawn_rank(&self) -> Rank {
        match self {
            Colour::White => Rank::Rank2,
            Colour::Black => Rank::Rank7,
        }
    }

    /// The rank this colour's pawns promote on
    pub const fn promotion_rank(&self) -> Rank {
        match self {
            Colour::White => Rank::Rank8,
            Colour::Black => Rank::Rank1,
        }
    }

    /// The rank this colour's king and rooks start on
    pub const fn back_rank(&self) -> Rank {
        match self {
            Colour::White => Rank::Rank1,
            Colour::Black => Rank::Rank8,
        }
    }

    /// FEN active colour letter
    pub const fn to_char(&self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }
}

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl Square {
    /// Try to add direction to a square, rejecting anything that would leave
    /// the board or wrap around a file edge.
    #[inline]
    pub const fn add(self, rhs: Direction) -> Result<Self, SquareAddError> {
        let file = self.file() as u8;

        use Direction::*;
        let valid = match rhs {
            N | S | NN | SS => true,
            E | NE | NNE | SE | SSE if file < File::FileH as u8 => true,
            W | NW | NNW | SW | SSW if file > File::FileA as u8 => true,
            NEE | SEE if file < File::FileG as u8 => true,
            NWW | SWW if file > File::FileB as u8 => true,
            _ => false,
        };

        let target = self as i16 + rhs as i16;

        if !valid || target < 0 {
            return Err(SquareAddError::OutOfBounds);
        }

        match Square::from_index(target as usize) {
            Some(sq) => Ok(sq),
            None => Err(SquareAddError::OutOfBounds),
        }
    }
}

/******************************************\
|==========================================|
|             Square Add Errors            |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareAddError {
    #[error("Square operation resulted in an out-of-bounds position")]
    OutOfBounds,
}
