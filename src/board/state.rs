use crate::core::*;

/******************************************\
|==========================================|
|                  Player                  |
|==========================================|
\******************************************/

/// Castling rights held by one side
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub can_castle_king_side: bool,
    pub can_castle_queen_side: bool,
}

impl Player {
    pub const NONE: Player = Player {
        can_castle_king_side: false,
        can_castle_queen_side: false,
    };

    pub const BOTH: Player = Player {
        can_castle_king_side: true,
        can_castle_queen_side: true,
    };

    pub fn clear(&mut self) {
        *self = Player::NONE;
    }
}

/******************************************\
|==========================================|
|               Board State                |
|==========================================|
\******************************************/

/// Everything about a position that the piece layout alone does not say.
///
/// `ep_target` is the square a capturing pawn lands on, behind the pawn that
/// just made a double step. It only survives a single half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub turn: Colour,
    pub full_moves: u16,
    pub half_move_clock: u16,
    pub ep_target: Option<Square>,
    pub white: Player,
    pub black: Player,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            turn: Colour::White,
            full_moves: 1,
            half_move_clock: 0,
            ep_target: None,
            white: Player::NONE,
            black: Player::NONE,
        }
    }
}

impl BoardState {
    #[inline]
    pub fn player(&self, colour: Colour) -> &Player {
        match colour {
            Colour::White => &self.white,
            Colour::Black => &self.black,
        }
    }

    #[inline]
    pub fn player_mut(&mut self, colour: Colour) -> &mut Player {
        match colour {
            Colour::White => &mut self.white,
            Colour::Black => &mut self.black,
        }
    }

    /// Castling rights in FEN order, `-` when nobody may castle
    pub fn castling_string(&self) -> String {
        let flags = [
            (self.white.can_castle_king_side, 'K'),
            (self.white.can_castle_queen_side, 'Q'),
            (self.black.can_castle_king_side, 'k'),
            (self.black.can_castle_queen_side, 'q'),
        ];

        let rights: String = flags
            .into_iter()
            .filter_map(|(granted, c)| granted.then_some(c))
            .collect();

        if rights.is_empty() {
            "-".to_string()
        } else {
            rights
        }
    }
}

/******************************************\
|==========================================|
|               Check Result               |
|==========================================|
\******************************************/

/// Whether the side to move is in check, and by what
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    pub is_check: bool,
    pub king: Option<Square>,
    pub checking_piece: Option<Square>,
}

/******************************************\
|==========================================|
|               Board Status               |
|==========================================|
\******************************************/

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardStatus {
    #[default]
    Playing,
    WhiteWin,
    BlackWin,
    Draw,
}

impl BoardStatus {
    /// The status where `colour` has won
    pub const fn win_for(colour: Colour) -> Self {
        match colour {
            Colour::White => BoardStatus::WhiteWin,
            Colour::Black => BoardStatus::BlackWin,
        }
    }

    pub const fn is_over(&self) -> bool {
        !matches!(self, BoardStatus::Playing)
    }
}

impl std::fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BoardStatus::Playing => "playing",
            BoardStatus::WhiteWin => "white wins",
            BoardStatus::BlackWin => "black wins",
            BoardStatus::Draw => "draw",
        };
        write!(f, "{text}")
    }
}
