use log::{debug, warn};
use thiserror::Error;

use super::{Board, Position};
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Board {
    /// Loads a FEN string.
    ///
    /// The string is parsed into a separate position first, so on failure the
    /// board keeps its previous game untouched.
    pub fn set(&mut self, fen: &str) -> Result<(), FenParseError> {
        match Position::from_fen(fen) {
            Ok(position) => {
                self.load(position);
                debug!("Loaded {fen}, {} legal moves", self.legal_moves().len());
                Ok(())
            }
            Err(err) => {
                warn!("Rejected FEN '{fen}': {err}");
                Err(err)
            }
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut board = Board::new();
        board.set(fen)?;
        Ok(board)
    }

    pub fn fen(&self) -> String {
        self.position().fen()
    }
}

impl Position {
    pub const FEN_SECTIONS: usize = 6;

    /// Parses up to six whitespace separated fields. Only the piece placement
    /// is required, missing trailing fields keep their defaults.
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut pos = Position::empty();

        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() > Self::FEN_SECTIONS {
            return Err(FenParseError::TooManyFields(fields.len()));
        }

        let mut fields = fields.into_iter();

        let piece_placement = fields.next().ok_or(FenParseError::EmptyFen)?;
        pos.parse_piece_placement(piece_placement)?;

        if let Some(side_to_move) = fields.next() {
            pos.parse_side_to_move(side_to_move)?;
        }

        if let Some(castling) = fields.next() {
            pos.parse_castling(castling)?;
        }

        if let Some(enpassant) = fields.next() {
            pos.parse_enpassant(enpassant)?;
        }

        if let Some(half_move_clock) = fields.next() {
            pos.state.half_move_clock = half_move_clock
                .parse::<u16>()
                .map_err(|_| FenParseError::InvalidHalfmoveClock(half_move_clock.to_string()))?;
        }

        if let Some(full_moves) = fields.next() {
            pos.state.full_moves = Self::parse_full_move(full_moves)?;
        }

        Ok(pos)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.state.turn.to_char());

        fen.push(' ');
        fen.push_str(&self.state.castling_string());

        fen.push(' ');
        match self.state.ep_target {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {}", self.state.half_move_clock));
        fen.push_str(&format!(" {}", self.state.full_moves));

        fen
    }

    /// Fills the board from the placement field, rank 8 first
    fn parse_piece_placement(&mut self, placement: &str) -> Result<(), FenParseError> {
        let rows: Vec<&str> = placement.split('/').collect();

        if rows.len() != Rank::NUM {
            return Err(FenParseError::InvalidRankFormat(format!(
                "'{placement}' lists {} ranks instead of 8",
                rows.len()
            )));
        }

        for (row, rank) in rows.into_iter().zip(Rank::iter().rev()) {
            self.parse_rank(row, rank)?;
        }

        Ok(())
    }

    /// One rank of the placement field: piece letters and runs of 1 to 8 empty squares
    fn parse_rank(&mut self, row: &str, rank: Rank) -> Result<(), FenParseError> {
        let mut files = 0;

        for c in row.chars() {
            match c.to_digit(10) {
                Some(run @ 1..=8) => files += run as usize,

                Some(_) => {
                    return Err(FenParseError::InvalidRankFormat(format!(
                        "rank {rank} has an empty run of {c}"
                    )));
                }

                None => {
                    let piece =
                        Piece::from_char(c).ok_or(FenParseError::InvalidPiecePlacementChar(c))?;

                    if let Some(file) = File::from_index(files) {
                        self.add_piece(piece, Square::from_parts(file, rank));
                    }
                    files += 1;
                }
            }

            if files > File::NUM {
                return Err(FenParseError::InvalidRankFormat(format!(
                    "rank {rank} ('{row}') runs past the h file"
                )));
            }
        }

        if files != File::NUM {
            return Err(FenParseError::InvalidRankFormat(format!(
                "rank {rank} ('{row}') covers {files} files"
            )));
        }

        Ok(())
    }

    fn parse_side_to_move(&mut self, side_to_move: &str) -> Result<(), FenParseError> {
        self.state.turn = match side_to_move {
            "w" => Colour::White,
            "b" => Colour::Black,
            _ => return Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
        };
        Ok(())
    }

    fn parse_castling(&mut self, castling: &str) -> Result<(), FenParseError> {
        self.state.white.clear();
        self.state.black.clear();

        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            match c {
                'K' => self.state.white.can_castle_king_side = true,
                'Q' => self.state.white.can_castle_queen_side = true,
                'k' => self.state.black.can_castle_king_side = true,
                'q' => self.state.black.can_castle_queen_side = true,
                _ => return Err(FenParseError::InvalidCastlingChar(c)),
            }
        }

        Ok(())
    }

    fn parse_enpassant(&mut self, enpassant: &str) -> Result<(), FenParseError> {
        self.state.ep_target = match enpassant {
            "-" => None,

            _ => {
                let square = enpassant
                    .parse::<Square>()
                    .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))?;

                if ![Rank::Rank3, Rank::Rank6].contains(&square.rank()) {
                    return Err(FenParseError::InvalidEnPassantSquare(format!(
                        "{square} is not a valid enpassant square"
                    )));
                }
                Some(square)
            }
        };
        Ok(())
    }

    /// Any u16 is taken as is, including 0
    fn parse_full_move(full_move_token: &str) -> Result<u16, FenParseError> {
        full_move_token
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    #[error("FEN string is empty")]
    EmptyFen,

    #[error("FEN string has {0} fields, expected at most 6")]
    TooManyFields(usize),

    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),

    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),

    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),

    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number in FEN: '{0}'")]
    InvalidFullmoveNumber(String),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardStatus;

    #[test]
    fn test_valid_fens_round_trip() {
        let fens = [
            START_FEN,
            KIWIPETE_FEN,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];

        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.fen(), fen);
        }
    }

    #[test]
    fn test_fen_piece_placement() {
        let board = Board::from_fen(KIWIPETE_FEN).unwrap();

        assert_eq!(board.on(Square::A8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::E2), Some(Piece::WhiteBishop));
        assert_eq!(board.on(Square::D5), Some(Piece::WhitePawn));
        assert_eq!(board.on(Square::H3), Some(Piece::BlackPawn));
        assert_eq!(board.on(Square::E4), Some(Piece::WhitePawn));
        assert_eq!(board.on(Square::B8), None);
    }

    #[test]
    fn test_fen_state_fields() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b Kq e3 7 12";
        let board = Board::from_fen(fen).unwrap();
        let state = board.state();

        assert_eq!(state.turn, Colour::Black);
        assert!(state.white.can_castle_king_side);
        assert!(!state.white.can_castle_queen_side);
        assert!(!state.black.can_castle_king_side);
        assert!(state.black.can_castle_queen_side);
        assert_eq!(state.ep_target, Some(Square::E3));
        assert_eq!(state.half_move_clock, 7);
        assert_eq!(state.full_moves, 12);
    }

    #[test]
    fn test_missing_trailing_fields_use_defaults() {
        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b").unwrap();

        assert_eq!(board.turn(), Colour::Black);
        assert_eq!(board.fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b - - 0 1");
        assert_eq!(board.legal_moves().len(), 20);
    }

    #[test]
    fn test_invalid_fens() {
        assert_eq!(Position::from_fen("   "), Err(FenParseError::EmptyFen));
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
            Err(FenParseError::InvalidPiecePlacementChar('X'))
        );
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenParseError::InvalidSideToMove("x".to_string()))
        );
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1"),
            Err(FenParseError::InvalidCastlingChar('x'))
        );
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra"),
            Err(FenParseError::TooManyFields(7))
        );
        assert!(matches!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1"),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
            Err(FenParseError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -3"),
            Err(FenParseError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn test_invalid_rank_formats() {
        let bad = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/45/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ];

        for fen in bad {
            assert!(
                matches!(Position::from_fen(fen), Err(FenParseError::InvalidRankFormat(_))),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_full_move_zero_is_accepted() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 0";
        let mut board = Board::from_fen(fen).unwrap();

        assert_eq!(board.state().full_moves, 0);
        assert_eq!(board.fen(), fen);

        board.apply_coordinates(Square::E7, Square::E5).unwrap();
        assert_eq!(board.state().full_moves, 1);
    }

    #[test]
    fn test_rank_errors_name_the_rank() {
        let err = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1");
        assert_eq!(
            err,
            Err(FenParseError::InvalidRankFormat(
                "rank 1 ('RNBQKBN') covers 7 files".to_string()
            ))
        );

        let err = Position::from_fen("8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(
            err,
            Err(FenParseError::InvalidRankFormat(
                "'8/8/8/8/8/8/8' lists 7 ranks instead of 8".to_string()
            ))
        );
    }

    #[test]
    fn test_failed_import_keeps_board() {
        let mut board = Board::new();
        board.apply_coordinates(Square::E2, Square::E4).unwrap();
        let before = board.fen();

        let result = board.set("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkZ - 0 1");

        assert_eq!(result, Err(FenParseError::InvalidCastlingChar('Z')));
        assert_eq!(board.fen(), before);
        assert_eq!(board.legal_moves().len(), 20);
        assert!(board.last_move().is_some());
    }

    #[test]
    fn test_import_derives_status() {
        let mated = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        assert!(mated.in_check());
        assert_eq!(mated.status(), BoardStatus::BlackWin);

        let stale = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stale.in_check());
        assert_eq!(stale.status(), BoardStatus::Draw);

        let clock = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 50 80").unwrap();
        assert_eq!(clock.status(), BoardStatus::Draw);
    }
}
