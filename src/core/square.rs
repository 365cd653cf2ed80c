use super::types::Colour;
use thiserror::Error;

/******************************************\
|==========================================|
|                 Squares                  |
|==========================================|
\******************************************/

/// # Square representation
///
/// - Represents the squares of a chess board
/// - Rank-major from the FEN-first rank: `A8` is index 0, `H1` is index 63

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

impl Square {
    /// Number of elements in the Square enum
    pub const NUM: usize = 64;

    #[rustfmt::skip]
    pub const ALL: [Square; Square::NUM] = {
        use Square::*;
        [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ]
    };
}

crate::impl_enum_index!(Square);

/******************************************\
|==========================================|
|                  Ranks                   |
|==========================================|
\******************************************/

/// # Ranks representation
///
/// - Represents the ranks of a chess board, numbered as a player reads them

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

impl Rank {
    /// Number of elements in the Rank enum
    pub const NUM: usize = 8;

    #[rustfmt::skip]
    pub const ALL: [Rank; Rank::NUM] = [
        Rank::Rank1, Rank::Rank2, Rank::Rank3, Rank::Rank4,
        Rank::Rank5, Rank::Rank6, Rank::Rank7, Rank::Rank8,
    ];
}

crate::impl_enum_index!(Rank);

/******************************************\
|==========================================|
|                  Files                   |
|==========================================|
\******************************************/

/// # Files representation
///
/// - Represents the files of a chess board

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

impl File {
    /// Number of elements in the File enum
    pub const NUM: usize = 8;

    #[rustfmt::skip]
    pub const ALL: [File; File::NUM] = [
        File::FileA, File::FileB, File::FileC, File::FileD,
        File::FileE, File::FileF, File::FileG, File::FileH,
    ];
}

crate::impl_enum_index!(File);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Square {
    /// Returns the rank of a square
    pub const fn rank(&self) -> Rank {
        let row = (*self as usize) >> 3;
        Rank::ALL[7 - row]
    }

    /// Returns the file of a square
    pub const fn file(&self) -> File {
        File::ALL[(*self as usize) & 0b111]
    }

    /// Flips the rank of a square along the middle of the board, or switch perspectives between white and black
    pub const fn flip_rank(&self) -> Self {
        Square::ALL[(*self as usize) ^ 0b111000]
    }

    /// Returns the square relative to the perspectives of `col: Colour`
    ///
    /// For White, the square remains the same.
    /// For Black, the square's rank is flipped.
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => self.flip_rank(),
        }
    }

    /// Returns the absolute distance in the ranks of two squares
    pub const fn rank_dist(sq1: Square, sq2: Square) -> u8 {
        let v1 = sq1.rank() as u8;
        let v2 = sq2.rank() as u8;
        v1.abs_diff(v2)
    }

    /// Returns the absolute distance in the files of two squares
    pub const fn file_dist(sq1: Square, sq2: Square) -> u8 {
        let v1 = sq1.file() as u8;
        let v2 = sq2.file() as u8;
        v1.abs_diff(v2)
    }

    /// Combines a pair of file and rank to create a square
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        let row = 7 - rank as usize;
        Square::ALL[row * 8 + file as usize]
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for File {
    /// Displays the file in the form of its chess board representation (FileA => 'a')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Rank {
    /// Displays the rank in the form of its chess board representation (Rank1 => '1')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'1' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Square {
    /// Displays the square in algebraic form (Square::A1 => "a1")
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/******************************************\
|==========================================|
|              Parsing Strings             |
|==========================================|
\******************************************/

impl File {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => File::from_index((c as u8 - b'a') as usize),
            _ => None,
        }
    }
}

impl Rank {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Rank::from_index((c as u8 - b'1') as usize),
            _ => None,
        }
    }
}

impl std::str::FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_char(c).ok_or(ParseFileError::InvalidChar(c)),
            _ => Err(ParseFileError::InvalidLength(s.chars().count())),
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_char(c).ok_or(ParseRankError::InvalidChar(c)),
            _ => Err(ParseRankError::InvalidLength(s.chars().count())),
        }
    }
}

impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    /// Parses algebraic notation ("e4") into a square
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(ParseSquareError::InvalidLength(s.chars().count())),
        };

        let file = File::from_char(file_char).ok_or(ParseSquareError::InvalidFileChar(file_char))?;
        let rank = Rank::from_char(rank_char).ok_or(ParseSquareError::InvalidRankChar(rank_char))?;

        Ok(Square::from_parts(file, rank))
    }
}

/******************************************\
|==========================================|
|            Square Parse Errors           |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFileError {
    #[error("Invalid length for file string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for file string: '{0}', expected 'a'-'h'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRankError {
    #[error("Invalid length for rank string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for rank string: '{0}', expected '1'-'8'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("Invalid length for square string: {0}, expected 2")]
    InvalidLength(usize),
    #[error("Invalid character for file string: '{0}', expected 'a'-'h'")]
    InvalidFileChar(char),
    #[error("Invalid character for rank string: '{0}', expected '1'-'8'")]
    InvalidRankChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
