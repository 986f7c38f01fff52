use std::ops::RangeInclusive;

use log::trace;

use crate::{CastlingRights, Color, Illegal, Move, Piece, PieceType, Position, Square};

fn span(a: i8, b: i8) -> RangeInclusive<i8> {
    a.min(b)..=a.max(b)
}

impl Position {
    /// Checks a move string. `None` means the move is legal, otherwise the
    /// first rule it breaks is returned.
    pub fn illegal(&self, mv: &str) -> Option<Illegal> {
        let verdict = self.check_move(mv);
        if let Some(reason) = &verdict {
            trace!("{} illegal: {}", mv, reason);
        }
        verdict
    }

    pub fn is_legal(&self, mv: &str) -> bool {
        self.illegal(mv).is_none()
    }

    fn check_move(&self, mv: &str) -> Option<Illegal> {
        let s = self.normalize_castling(mv);
        let m = match Move::parse(&s) {
            Ok(m) => m,
            Err(reason) => return Some(reason),
        };

        let Some(piece) = self.piece(m.from) else {
            return Some(Illegal::EmptySource);
        };
        if piece.color != self.active {
            return Some(Illegal::WrongColourSource);
        }

        if self.same_colour(m.from, m.to) {
            let rook = Piece::new(PieceType::Rook, piece.color);
            if piece.kind != PieceType::King || self.piece(m.to) != Some(rook) {
                return Some(Illegal::SameColourDestination);
            }
            if m.promotion.is_some() {
                return Some(Illegal::BadStringLength);
            }
            if let Some(reason) = self.illegal_castling(m.from, m.to) {
                return Some(reason);
            }
            return self.self_check(&s, piece.color);
        }

        if let Some(reason) = self.check_geometry(piece, m) {
            return Some(reason);
        }

        if piece.kind != PieceType::Knight && !self.los(m.from, m.to) {
            return Some(Illegal::MovementBlocked);
        }

        let promotes =
            piece.kind == PieceType::Pawn && m.to.y == piece.color.opposite().back_rank();
        match (promotes, m.promotion) {
            (true, None) | (false, Some(_)) => return Some(Illegal::BadStringLength),
            (true, Some(c)) if PieceType::from_promotion_char(c).is_none() => {
                return Some(Illegal::BadPromotion(c));
            }
            _ => {}
        }

        self.self_check(&s, piece.color)
    }

    fn check_geometry(&self, piece: Piece, m: Move) -> Option<Illegal> {
        let (dx, dy) = (m.dx(), m.dy());
        let (adx, ady) = (dx.abs(), dy.abs());
        let straight = (dx == 0) != (dy == 0);
        let diagonal = adx == ady && adx != 0;

        match piece.kind {
            PieceType::Knight if adx + ady != 3 || adx == 0 || ady == 0 => {
                Some(Illegal::IllegalKnightMovement)
            }
            PieceType::Bishop if !diagonal => Some(Illegal::IllegalBishopMovement),
            PieceType::Rook if !straight => Some(Illegal::IllegalRookMovement),
            PieceType::Queen if !straight && !diagonal => Some(Illegal::IllegalQueenMovement),
            PieceType::King if adx > 1 || ady > 1 => Some(Illegal::IllegalKingMovement),
            PieceType::Pawn => self.check_pawn(piece.color, m),
            _ => None,
        }
    }

    fn check_pawn(&self, color: Color, m: Move) -> Option<Illegal> {
        let (dx, dy) = (m.dx(), m.dy());

        if dy == 0 || dy.signum() != color.forward() {
            return Some(Illegal::PawnMustMoveForwards);
        }
        if dx.abs() > 1 {
            return Some(Illegal::PawnMovedTooFarSideways);
        }

        if dx != 0 {
            if dy.abs() != 1 {
                return Some(Illegal::PawnCaptureDistance);
            }
            if self.is_empty(m.to) && self.enpassant != Some(m.to) {
                return Some(Illegal::PawnCaptureToEmptySquare);
            }
            return None;
        }

        if !self.is_empty(m.to) {
            return Some(Illegal::PawnCannotCaptureForwards);
        }
        match dy.abs() {
            1 => None,
            2 if m.from.y == color.pawn_rank() => None,
            _ => Some(Illegal::PawnForwardDistance),
        }
    }

    /// Applies the move speculatively and rejects it if `mover`'s king is
    /// then attacked.
    fn self_check(&self, mv: &str, mover: Color) -> Option<Illegal> {
        if self.make_move(mv).king_attacked(mover) {
            Some(Illegal::KingInCheck)
        } else {
            None
        }
    }

    /// Castling with the king on `king` and a friendly rook on `rook`.
    pub fn illegal_castling(&self, king: Square, rook: Square) -> Option<Illegal> {
        let Some(color) = self.colour(king) else {
            return Some(Illegal::EmptySource);
        };

        if king.y != rook.y {
            return Some(Illegal::CastlingNotOnSameRank);
        }
        if king.y != color.back_rank() {
            return Some(Illegal::CastlingNotOnBackRank);
        }
        if !self.castling.has(color, rook.x) {
            return Some(Illegal::CastlingRightMissing(CastlingRights::symbol(color, rook.x)));
        }

        let y = king.y;
        let (king_dest, rook_dest) = if rook.x > king.x { (6, 5) } else { (2, 3) };

        for x in span(rook.x, rook_dest) {
            if x == king.x || x == rook.x {
                continue;
            }
            let sq = Square { x, y };
            if !self.is_empty(sq) {
                return Some(Illegal::CastlingPathBlocked(sq));
            }
        }

        for x in span(king.x, king_dest) {
            let sq = Square { x, y };
            if x != king.x && x != rook.x && !self.is_empty(sq) {
                return Some(Illegal::CastlingPathBlocked(sq));
            }
            if self.attacked(Some(sq), color) {
                return Some(Illegal::CastlingThroughCheck(sq));
            }
        }

        None
    }

    /// Rewrites standard castling (`e1g1`, `e1c1`, `e8g8`, `e8c8`) into the
    /// king-onto-rook form when the king has a right on that side. Anything
    /// else comes back unchanged.
    pub fn normalize_castling(&self, mv: &str) -> String {
        let Ok(m) = Move::parse(mv) else {
            return mv.to_string();
        };
        let Some(king) = self.piece(m.from) else {
            return mv.to_string();
        };

        let color = king.color;
        let home = Square { x: 4, y: color.back_rank() };
        if king.kind != PieceType::King
            || m.from != home
            || m.to.y != home.y
            || !matches!(m.to.x, 2 | 6)
            || self.same_colour(m.from, m.to)
            || m.promotion.is_some()
        {
            return mv.to_string();
        }

        let rook = Some(Piece::new(PieceType::Rook, color));
        let mut files = self.castling.files(color).filter(|&x| {
            self.piece(Square { x, y: home.y }) == rook
        });
        let file = if m.to.x == 6 {
            files.find(|&x| x > home.x)
        } else {
            files.filter(|&x| x < home.x).last()
        };

        match file {
            Some(x) => Move::new(m.from, Square { x, y: home.y }).to_string(),
            None => mv.to_string(),
        }
    }
}
