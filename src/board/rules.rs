//! Per-square move generation on a [`Position`].
//!
//! Candidates are produced from piece geometry alone (pseudo-legal). Unless
//! asked for pseudo-legal moves only, each candidate is then played on a copy
//! of the position and dropped if the mover's king ends up attacked.

use super::{CheckResult, Position};
use crate::core::*;

/******************************************\
|==========================================|
|               Legal Moves                |
|==========================================|
\******************************************/

/// Appends every move available to the piece on `from`.
///
/// An empty square adds nothing. With `pseudo_only` the self-check filter and
/// the castling attack test are skipped.
pub fn add_legal_moves(into: &mut Vec<Move>, pos: &Position, from: Square, pseudo_only: bool) {
    let Some(piece) = pos.on(from) else {
        return;
    };

    let mut candidates = Vec::new();

    match piece.pt() {
        PieceType::Pawn => pawn_moves(&mut candidates, pos, from, piece),
        PieceType::Knight => leaper_moves(&mut candidates, pos, from, piece, &Direction::KNIGHT),
        PieceType::Bishop => slider_moves(&mut candidates, pos, from, piece, &Direction::DIAGONAL),
        PieceType::Rook => slider_moves(&mut candidates, pos, from, piece, &Direction::ORTHOGONAL),
        PieceType::Queen => slider_moves(&mut candidates, pos, from, piece, &Direction::ADJACENT),
        PieceType::King => {
            leaper_moves(&mut candidates, pos, from, piece, &Direction::ADJACENT);
            castling_moves(&mut candidates, pos, from, piece, pseudo_only);
        }
    }

    if pseudo_only {
        into.extend(candidates);
    } else {
        into.extend(
            candidates
                .into_iter()
                .filter(|mv| !leaves_king_in_check(pos, mv)),
        );
    }
}

/// Every legal move of the side to move, in square order
pub fn add_all_legal_moves(into: &mut Vec<Move>, pos: &Position) {
    let turn = pos.turn();

    for (sq, _) in pos.pieces_of(turn) {
        add_legal_moves(into, pos, sq, false);
    }
}

pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    add_all_legal_moves(&mut moves, pos);
    moves
}

/// Plays `mv` on a scratch copy and reports whether the mover's king is then
/// in check. The original position is never modified.
pub fn leaves_king_in_check(pos: &Position, mv: &Move) -> bool {
    let probe = pos.simulate(mv);
    check_result(&probe, mv.piece.colour()).is_check
}

/******************************************\
|==========================================|
|                  Check                   |
|==========================================|
\******************************************/

/// Looks for a pseudo-legal move of `colour`'s opponent that captures
/// `colour`'s king. A position without that king is never in check.
pub fn check_result(pos: &Position, colour: Colour) -> CheckResult {
    let Some(king) = pos.king_square(colour) else {
        return CheckResult::default();
    };

    let king_piece = Piece::from_parts(colour, PieceType::King);
    let mut replies = Vec::new();

    for (sq, _) in pos.pieces_of(!colour) {
        replies.clear();
        add_legal_moves(&mut replies, pos, sq, true);

        if replies.iter().any(|mv| mv.captured == Some(king_piece)) {
            return CheckResult {
                is_check: true,
                king: Some(king),
                checking_piece: Some(sq),
            };
        }
    }

    CheckResult {
        is_check: false,
        king: Some(king),
        checking_piece: None,
    }
}

/// Whether any piece of `by` attacks `square`, occupied or not
pub fn is_square_attacked(pos: &Position, square: Square, by: Colour) -> bool {
    use PieceType::*;

    let holds = |sq: Option<Square>, types: &[PieceType]| {
        sq.and_then(|sq| pos.on(sq))
            .is_some_and(|p| p.is_colour(by) && types.contains(&p.pt()))
    };

    // A pawn of `by` attacks `square` from one capture step behind it
    let pawn = by
        .pawn_captures()
        .into_iter()
        .any(|dir| holds(square.add(-dir).ok(), &[Pawn]));
    let knight = Direction::KNIGHT
        .into_iter()
        .any(|dir| holds(square.add(dir).ok(), &[Knight]));
    let king = Direction::ADJACENT
        .into_iter()
        .any(|dir| holds(square.add(dir).ok(), &[King]));

    let ray_hits = |dirs: &[Direction], types: &[PieceType]| {
        dirs.iter()
            .any(|&dir| holds(first_blocker(pos, square, dir), types))
    };

    pawn || knight
        || king
        || ray_hits(&Direction::ORTHOGONAL, &[Rook, Queen])
        || ray_hits(&Direction::DIAGONAL, &[Bishop, Queen])
}

/// First occupied square along `dir`, not counting `from` itself
fn first_blocker(pos: &Position, from: Square, dir: Direction) -> Option<Square> {
    let mut sq = from;

    while let Ok(next) = sq.add(dir) {
        if pos.on(next).is_some() {
            return Some(next);
        }
        sq = next;
    }

    None
}

/******************************************\
|==========================================|
|              Piece Geometry              |
|==========================================|
\******************************************/

/// Pushes a move onto `to` unless a friendly piece stands there.
/// Returns whether the square was empty.
fn push_target(moves: &mut Vec<Move>, pos: &Position, from: Square, to: Square, piece: Piece) -> bool {
    match pos.on(to) {
        None => {
            moves.push(Move::new(from, to, piece, None));
            true
        }
        Some(occupant) if !occupant.is_colour(piece.colour()) => {
            moves.push(Move::new(from, to, piece, Some(occupant)));
            false
        }
        Some(_) => false,
    }
}

fn pawn_moves(moves: &mut Vec<Move>, pos: &Position, from: Square, piece: Piece) {
    let us = piece.colour();

    if let Ok(one) = from.add(us.forward()) {
        if pos.on(one).is_none() {
            moves.push(Move::new(from, one, piece, None));

            if from.rank() == us.pawn_rank() {
                if let Ok(two) = from.add(us.double_forward()) {
                    if pos.on(two).is_none() {
                        moves.push(Move::new(from, two, piece, None));
                    }
                }
            }
        }
    }

    for dir in us.pawn_captures() {
        let Ok(to) = from.add(dir) else {
            continue;
        };

        match pos.on(to) {
            Some(occupant) if !occupant.is_colour(us) => {
                moves.push(Move::new(from, to, piece, Some(occupant)));
            }
            None if pos.state.ep_target == Some(to) && is_en_passant_victim(pos, to, us) => {
                moves.push(Move::en_passant(from, to, piece));
            }
            _ => {}
        }
    }
}

/// The target only counts when an enemy pawn really sits behind it
fn is_en_passant_victim(pos: &Position, target: Square, us: Colour) -> bool {
    let enemy_pawn = Piece::from_parts(!us, PieceType::Pawn);

    target
        .add(-us.forward())
        .is_ok_and(|victim| pos.on(victim) == Some(enemy_pawn))
}

fn leaper_moves(
    moves: &mut Vec<Move>,
    pos: &Position,
    from: Square,
    piece: Piece,
    dirs: &[Direction],
) {
    for &dir in dirs {
        if let Ok(to) = from.add(dir) {
            push_target(moves, pos, from, to, piece);
        }
    }
}

fn slider_moves(
    moves: &mut Vec<Move>,
    pos: &Position,
    from: Square,
    piece: Piece,
    dirs: &[Direction],
) {
    for &dir in dirs {
        let mut sq = from;

        while let Ok(to) = sq.add(dir) {
            if !push_target(moves, pos, from, to, piece) {
                break;
            }
            sq = to;
        }
    }
}

/// Castling candidates for a king standing on its home square.
///
/// The matching right must still be held, the rook must be home, and every
/// square between king and rook must be empty. Outside of `pseudo_only` the
/// king's start, transit and landing squares must not be attacked.
fn castling_moves(
    moves: &mut Vec<Move>,
    pos: &Position,
    from: Square,
    king: Piece,
    pseudo_only: bool,
) {
    use Square::*;

    let us = king.colour();

    if from != E1.relative(us) {
        return;
    }

    let player = pos.state.player(us);
    let rook = Piece::from_parts(us, PieceType::Rook);

    // (king side, right held, rook home, must be empty, must not be attacked)
    #[rustfmt::skip]
    let sides: [(bool, bool, Square, &[Square], [Square; 3]); 2] = [
        (true,  player.can_castle_king_side,  H1, &[F1, G1],     [E1, F1, G1]),
        (false, player.can_castle_queen_side, A1, &[B1, C1, D1], [E1, D1, C1]),
    ];

    for (king_side, allowed, rook_home, between, king_path) in sides {
        if !allowed || pos.on(rook_home.relative(us)) != Some(rook) {
            continue;
        }

        if between.iter().any(|sq| pos.on(sq.relative(us)).is_some()) {
            continue;
        }

        if !pseudo_only
            && king_path
                .iter()
                .any(|sq| is_square_attacked(pos, sq.relative(us), !us))
        {
            continue;
        }

        let to = if king_side { G1 } else { C1 };
        moves.push(Move::castling(from, to.relative(us), king, king_side));
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::core::Square::*;

    fn moves_from(pos: &Position, sq: Square, pseudo_only: bool) -> Vec<Move> {
        let mut moves = Vec::new();
        add_legal_moves(&mut moves, pos, sq, pseudo_only);
        moves
    }

    fn targets(moves: &[Move]) -> Vec<Square> {
        let mut squares: Vec<Square> = moves.iter().map(|mv| mv.to).collect();
        squares.sort_by_key(|sq| sq.index());
        squares
    }

    fn kings_only() -> Position {
        let mut pos = Position::empty();
        pos.add_piece(Piece::WhiteKing, E1);
        pos.add_piece(Piece::BlackKing, E8);
        pos
    }

    #[test]
    fn test_start_position_move_count() {
        let pos = Position::start();
        assert_eq!(legal_moves(&pos).len(), 20);
        assert_eq!(targets(&moves_from(&pos, E2, false)), vec![E4, E3]);
        assert_eq!(targets(&moves_from(&pos, G1, false)), vec![F3, H3]);
        assert!(moves_from(&pos, E4, false).is_empty());
    }

    #[test]
    fn test_knight_in_corner() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhiteKnight, A1);
        assert_eq!(targets(&moves_from(&pos, A1, false)), vec![B3, C2]);
    }

    #[test]
    fn test_slider_stops_at_blockers() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhiteRook, A1);
        pos.add_piece(Piece::WhitePawn, A3);
        pos.add_piece(Piece::BlackKnight, C1);

        let moves = moves_from(&pos, A1, false);
        assert_eq!(targets(&moves), vec![A2, B1, C1]);
        assert!(moves.iter().any(|mv| mv.to == C1 && mv.captured == Some(Piece::BlackKnight)));
    }

    #[test]
    fn test_pawn_captures_and_promotion() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhitePawn, B7);
        pos.add_piece(Piece::BlackRook, A8);
        pos.add_piece(Piece::BlackRook, B8);

        let moves = moves_from(&pos, B7, false);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, A8);
        assert!(moves[0].is_pawn_promotion);
        assert!(moves[0].is_capture);
    }

    #[test]
    fn test_en_passant_generation() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhitePawn, E5);
        pos.add_piece(Piece::BlackPawn, D5);
        pos.state.ep_target = Some(D6);

        let moves = moves_from(&pos, E5, false);
        let ep = moves.iter().find(|mv| mv.to == D6);
        assert!(ep.is_some_and(|mv| mv.is_en_passant()));

        // No victim, no capture
        pos.remove_piece(D5);
        assert!(!moves_from(&pos, E5, false).iter().any(|mv| mv.to == D6));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhiteBishop, E2);
        pos.add_piece(Piece::BlackRook, E7);

        assert!(moves_from(&pos, E2, false).is_empty());
        assert!(!moves_from(&pos, E2, true).is_empty());
    }

    #[test]
    fn test_check_result_reports_checker() {
        let mut pos = kings_only();
        pos.add_piece(Piece::BlackQueen, H4);
        pos.add_piece(Piece::WhitePawn, F2);

        assert!(!check_result(&pos, Colour::White).is_check);

        pos.remove_piece(F2);
        let check = check_result(&pos, Colour::White);
        assert!(check.is_check);
        assert_eq!(check.king, Some(E1));
        assert_eq!(check.checking_piece, Some(H4));
        assert!(!check_result(&pos, Colour::Black).is_check);
    }

    #[test]
    fn test_square_attacks() {
        let pos = Position::start();
        assert!(is_square_attacked(&pos, F3, Colour::White));
        assert!(is_square_attacked(&pos, D3, Colour::White));
        assert!(!is_square_attacked(&pos, E4, Colour::White));
        assert!(is_square_attacked(&pos, F6, Colour::Black));
        assert!(!is_square_attacked(&pos, E5, Colour::Black));

        let mut open = kings_only();
        open.add_piece(Piece::BlackBishop, A5);
        assert!(is_square_attacked(&open, D2, Colour::Black));
        assert!(is_square_attacked(&open, E1, Colour::Black));
        open.add_piece(Piece::WhitePawn, C3);
        assert!(!is_square_attacked(&open, D2, Colour::Black));
    }

    #[test]
    fn test_castling_requirements() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhiteRook, A1);
        pos.add_piece(Piece::WhiteRook, H1);
        pos.state.white = Player::BOTH;

        let castles = |pos: &Position| {
            moves_from(pos, E1, false)
                .into_iter()
                .filter(Move::is_castling)
                .map(|mv| mv.to)
                .collect::<Vec<_>>()
        };

        assert_eq!(castles(&pos), vec![G1, C1]);

        // Rook on f8 covers the king's transit square
        pos.add_piece(Piece::BlackRook, F8);
        assert_eq!(castles(&pos), vec![C1]);
        assert_eq!(
            moves_from(&pos, E1, true).iter().filter(|mv| mv.is_castling()).count(),
            2
        );

        // b1 is not on the king's path, only needs to be empty
        pos.remove_piece(F8);
        pos.add_piece(Piece::BlackRook, B8);
        assert_eq!(castles(&pos), vec![G1, C1]);
        pos.add_piece(Piece::WhiteKnight, B1);
        assert_eq!(castles(&pos), vec![G1]);

        pos.state.white.can_castle_king_side = false;
        assert!(castles(&pos).is_empty());
    }

    #[test]
    fn test_no_castling_out_of_or_into_check() {
        let mut pos = kings_only();
        pos.add_piece(Piece::WhiteRook, A1);
        pos.add_piece(Piece::WhiteRook, H1);
        pos.state.white = Player::BOTH;

        let castles = |pos: &Position| {
            moves_from(pos, E1, false)
                .into_iter()
                .filter(Move::is_castling)
                .map(|mv| mv.to)
                .collect::<Vec<_>>()
        };

        // King in check on e1
        pos.add_piece(Piece::BlackRook, E5);
        assert!(castles(&pos).is_empty());
        pos.remove_piece(E5);

        // Landing squares covered one at a time
        pos.add_piece(Piece::BlackRook, G5);
        assert_eq!(castles(&pos), vec![C1]);
        pos.remove_piece(G5);

        pos.add_piece(Piece::BlackRook, C5);
        assert_eq!(castles(&pos), vec![G1]);
    }

    #[test]
    fn test_leaves_king_in_check_is_pure() {
        let mut pos = kings_only();
        pos.add_piece(Piece::BlackRook, D8);
        let before = pos;

        assert!(leaves_king_in_check(&pos, &Move::new(E1, D1, Piece::WhiteKing, None)));
        assert!(!leaves_king_in_check(&pos, &Move::new(E1, F1, Piece::WhiteKing, None)));
        assert_eq!(pos, before);
    }
}
