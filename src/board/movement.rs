use std::time::Instant;

use log::{debug, info, trace, warn};
use thiserror::Error;

use super::{Board, BoardStatus, CheckResult, HALF_MOVE_DRAW_LIMIT, LegalMoveStats, Position, rules};
use crate::core::*;

/******************************************\
|==========================================|
|            Position Mutation             |
|==========================================|
\******************************************/

impl Position {
    /// Puts a piece on a square, replacing whatever stood there.
    ///
    /// Does not touch the state: counters, rights and turn are left as is.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        self.squares[square.index()] = Some(piece);
    }

    /// Empties a square and returns its former occupant.
    #[inline]
    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Moves the occupant of `from` onto `to`, overwriting any piece there.
    /// Nothing happens when `from` is empty.
    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.remove_piece(from) {
            self.add_piece(piece, to);
        }
    }

    /// Moves the king and rook of a castle to their fixed destinations.
    fn castle(&mut self, colour: Colour, king_side: bool) {
        let (king_from, king_to, rook_from, rook_to) = castling_squares(colour, king_side);

        // Lift the king first so the rook never lands on it
        let king = self.remove_piece(king_from);
        self.move_piece(rook_from, rook_to);

        if let Some(king) = king {
            self.add_piece(king, king_to);
        }
    }

    /// Moves the pieces of `mv` and resolves en passant, leaving counters,
    /// castling rights and the turn untouched. Probes use this alone.
    pub(crate) fn relocate(&mut self, mv: &Move) {
        let us = mv.piece.colour();

        if mv.is_castling() {
            self.castle(us, mv.is_king_side_castling);
        } else {
            self.move_piece(mv.from, mv.to);
        }

        // Always a queen
        if mv.is_pawn_promotion {
            self.add_piece(Piece::from_parts(us, PieceType::Queen), mv.to);
        }

        let is_pawn = mv.piece.is_type(PieceType::Pawn);

        if is_pawn && self.state.ep_target == Some(mv.to) {
            // The victim stands one step behind the target, seen from the capturer
            if let Ok(victim) = mv.to.add(-us.forward()) {
                self.remove_piece(victim);
            }
        }

        self.state.ep_target = match is_pawn && Square::rank_dist(mv.from, mv.to) == 2 {
            true => mv.from.add(us.forward()).ok(),
            false => None,
        };
    }

    /// Plays `mv` for real: pieces, counters, castling rights and the turn.
    ///
    /// Legality is the caller's concern, see [`Board::apply_move`].
    pub fn play(&mut self, mv: &Move) {
        let mover = self.state.turn;

        self.relocate(mv);

        if mover == Colour::Black {
            self.state.full_moves = self.state.full_moves.saturating_add(1);
        }

        if mv.piece.is_type(PieceType::Pawn) || mv.is_capture {
            self.state.half_move_clock = 0;
        } else {
            self.state.half_move_clock = self.state.half_move_clock.saturating_add(1);
        }

        self.update_castling_rights(mv);

        self.state.turn = !mover;
    }

    /// Returns a copy with `mv` relocated on it. The receiver is not modified.
    pub fn simulate(&self, mv: &Move) -> Position {
        let mut copy = *self;
        copy.relocate(mv);
        copy
    }

    fn update_castling_rights(&mut self, mv: &Move) {
        let us = mv.piece.colour();

        match mv.piece.pt() {
            PieceType::King => self.state.player_mut(us).clear(),
            PieceType::Rook => self.revoke_corner(us, mv.from),
            _ => {}
        }

        // A rook taken at home takes its right with it
        if let Some(victim) = mv.captured.filter(|p| p.is_type(PieceType::Rook)) {
            self.revoke_corner(victim.colour(), mv.to);
        }
    }

    fn revoke_corner(&mut self, colour: Colour, square: Square) {
        let player = self.state.player_mut(colour);

        if square == Square::A1.relative(colour) {
            player.can_castle_queen_side = false;
        } else if square == Square::H1.relative(colour) {
            player.can_castle_king_side = false;
        }
    }
}

/// `(king_from, king_to, rook_from, rook_to)` of a castle
pub(crate) const fn castling_squares(
    colour: Colour,
    king_side: bool,
) -> (Square, Square, Square, Square) {
    use Square::*;
    let (king_to, rook_from, rook_to) = match king_side {
        true => (G1, H1, F1),
        false => (C1, A1, D1),
    };

    (
        E1.relative(colour),
        king_to.relative(colour),
        rook_from.relative(colour),
        rook_to.relative(colour),
    )
}

/******************************************\
|==========================================|
|              Move Application            |
|==========================================|
\******************************************/

/// What changed when a move was applied, for the caller to log or display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub mv: Move,
    pub previous_status: BoardStatus,
    pub status: BoardStatus,
    pub check: CheckResult,
    pub half_move_clock: u16,
    pub full_moves: u16,
}

impl Board {
    /// Applies a move from the legal move cache.
    ///
    /// The submitted move is matched against the cache by squares and flags,
    /// and the cached copy is the one played. Anything not in the cache is
    /// rejected with the board left exactly as it was.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveReport, MoveError> {
        let Some(mv) = self.legal_moves.iter().find(|legal| *legal == mv).copied() else {
            warn!("Rejected move {mv}, not legal in {}", self.fen());
            return Err(MoveError::Illegal(*mv));
        };

        let previous_status = self.status;

        self.position.play(&mv);
        self.last_move = Some(mv);

        if self.position.state.half_move_clock >= HALF_MOVE_DRAW_LIMIT {
            self.status = BoardStatus::Draw;
        }

        self.refresh();

        debug!(
            "Applied {mv}, {:?} to move, check: {}",
            self.position.turn(),
            self.check.is_check
        );

        if previous_status != self.status {
            info!("Status changed from {previous_status} to {}", self.status);
        }

        Ok(MoveReport {
            mv,
            previous_status,
            status: self.status,
            check: self.check,
            half_move_clock: self.position.state.half_move_clock,
            full_moves: self.position.state.full_moves,
        })
    }

    /// Finds the legal move between two squares and applies it
    pub fn apply_coordinates(&mut self, from: Square, to: Square) -> Result<MoveReport, MoveError> {
        match self.find_legal_move(from, to) {
            Some(mv) => self.apply_move(&mv),
            None => {
                warn!("Rejected move {from}{to}, no legal move between these squares");
                Err(MoveError::NoLegalMove(from, to))
            }
        }
    }

    /// Re-derives the check result, the legal move cache and the terminal
    /// status for the side to move.
    pub(super) fn refresh(&mut self) {
        let turn = self.position.turn();

        self.check = rules::check_result(&self.position, turn);
        self.update_legal_moves();

        if self.legal_moves.is_empty() {
            self.status = match self.check.is_check {
                true => BoardStatus::win_for(!turn),
                false => BoardStatus::Draw,
            };
        }
    }

    fn update_legal_moves(&mut self) {
        let start = Instant::now();

        self.legal_moves.clear();
        rules::add_all_legal_moves(&mut self.legal_moves, &self.position);

        self.stats = LegalMoveStats {
            count: self.legal_moves.len(),
            elapsed: start.elapsed(),
        };

        trace!(
            "Generated {} legal moves in {:?}",
            self.stats.count, self.stats.elapsed
        );
    }
}

/******************************************\
|==========================================|
|               Move Errors                |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Illegal move: {0}")]
    Illegal(Move),

    #[error("No legal move from {0} to {1}")]
    NoLegalMove(Square, Square),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::core::Square::*;

    #[test]
    fn test_castling_squares() {
        assert_eq!(castling_squares(Colour::White, true), (E1, G1, H1, F1));
        assert_eq!(castling_squares(Colour::White, false), (E1, C1, A1, D1));
        assert_eq!(castling_squares(Colour::Black, true), (E8, G8, H8, F8));
        assert_eq!(castling_squares(Colour::Black, false), (E8, C8, A8, D8));
    }

    #[test]
    fn test_play_double_push_sets_target() {
        let mut pos = Position::start();
        pos.play(&Move::new(E2, E4, Piece::WhitePawn, None));

        assert_eq!(pos.on(E4), Some(Piece::WhitePawn));
        assert_eq!(pos.on(E2), None);
        assert_eq!(pos.state.ep_target, Some(E3));
        assert_eq!(pos.state.turn, Colour::Black);
        assert_eq!(pos.state.full_moves, 1);

        pos.play(&Move::new(G8, F6, Piece::BlackKnight, None));
        assert_eq!(pos.state.ep_target, None);
        assert_eq!(pos.state.full_moves, 2);
        assert_eq!(pos.state.half_move_clock, 1);
    }

    #[test]
    fn test_relocate_en_passant_removes_victim() {
        let mut pos = Position::empty();
        pos.add_piece(Piece::WhitePawn, E5);
        pos.add_piece(Piece::BlackPawn, D5);
        pos.state.ep_target = Some(D6);

        pos.relocate(&Move::en_passant(E5, D6, Piece::WhitePawn));

        assert_eq!(pos.on(D6), Some(Piece::WhitePawn));
        assert_eq!(pos.on(D5), None);
        assert_eq!(pos.on(E5), None);
        assert_eq!(pos.state.ep_target, None);
    }

    #[test]
    fn test_relocate_promotes_to_queen() {
        let mut pos = Position::empty();
        pos.add_piece(Piece::BlackPawn, B2);
        pos.add_piece(Piece::WhiteRook, A1);

        pos.relocate(&Move::new(B2, A1, Piece::BlackPawn, Some(Piece::WhiteRook)));

        assert_eq!(pos.on(A1), Some(Piece::BlackQueen));
        assert_eq!(pos.on(B2), None);
    }

    #[test]
    fn test_simulate_leaves_original() {
        let pos = Position::start();
        let next = pos.simulate(&Move::new(G1, F3, Piece::WhiteKnight, None));

        assert_eq!(pos.on(G1), Some(Piece::WhiteKnight));
        assert_eq!(next.on(F3), Some(Piece::WhiteKnight));
        // Probes never advance the game
        assert_eq!(next.state.turn, Colour::White);
        assert_eq!(next.state.half_move_clock, 0);
    }

    #[test]
    fn test_castling_rights_updates() {
        let mut pos = Position::empty();
        pos.add_piece(Piece::WhiteKing, E1);
        pos.add_piece(Piece::WhiteRook, A1);
        pos.add_piece(Piece::WhiteRook, H1);
        pos.add_piece(Piece::BlackKing, E8);
        pos.add_piece(Piece::BlackRook, H8);
        pos.state.white = Player::BOTH;
        pos.state.black = Player::BOTH;

        pos.play(&Move::new(A1, A5, Piece::WhiteRook, None));
        assert!(!pos.state.white.can_castle_queen_side);
        assert!(pos.state.white.can_castle_king_side);

        pos.play(&Move::new(E8, E7, Piece::BlackKing, None));
        assert_eq!(pos.state.black, Player::NONE);

        pos.state.black = Player::BOTH;
        pos.play(&Move::new(H1, H8, Piece::WhiteRook, Some(Piece::BlackRook)));
        assert!(!pos.state.white.can_castle_king_side);
        assert!(!pos.state.black.can_castle_king_side);
        assert!(pos.state.black.can_castle_queen_side);
        assert_eq!(pos.state.half_move_clock, 0);
    }
}
