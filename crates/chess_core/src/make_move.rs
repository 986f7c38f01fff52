use log::{debug, warn};

use crate::{Color, Move, Piece, PieceType, Position, Square};

impl Position {
    /// Returns the position after `mv`. The receiver is left untouched.
    ///
    /// The move is expected to have passed [`illegal`](Self::illegal)
    /// already. Malformed input is logged and yields an unchanged copy.
    pub fn make_move(&self, mv: &str) -> Position {
        let s = self.normalize_castling(mv);
        let m = match Move::parse(&s) {
            Ok(m) => m,
            Err(reason) => {
                warn!("make_move({}): {}", mv, reason);
                return self.clone();
            }
        };
        let Some(piece) = self.piece(m.from) else {
            warn!("make_move({}): no piece at {}", mv, m.from);
            return self.clone();
        };

        let mut ret = self.clone();
        let target = self.piece(m.to);

        let pawn_flag = piece.kind == PieceType::Pawn;
        let castle_flag = piece.kind == PieceType::King
            && target == Some(Piece::new(PieceType::Rook, piece.color));
        let capture_flag = !castle_flag && (target.is_some() || (pawn_flag && m.dx() != 0));

        ret.update_castling_rights(piece, m);

        ret.halfmove = if pawn_flag || capture_flag { 0 } else { self.halfmove + 1 };
        if self.active == Color::Black {
            ret.fullmove += 1;
        }
        ret.active = self.active.opposite();
        ret.enpassant = None;

        if castle_flag {
            let y = m.from.y;
            let (king_x, rook_x) = if m.to.x > m.from.x { (6, 5) } else { (2, 3) };
            ret.set(m.from, None);
            ret.set(m.to, None);
            ret.set(Square { x: king_x, y }, Some(piece));
            ret.set(Square { x: rook_x, y }, target);
            return ret;
        }

        // En passant: the captured pawn sits beside the source, not on the destination.
        if pawn_flag && m.dx() != 0 && target.is_none() {
            ret.set(Square { x: m.to.x, y: m.from.y }, None);
        }

        if pawn_flag && m.dy().abs() == 2 {
            ret.enpassant = Some(Square {
                x: m.from.x,
                y: (m.from.y + m.to.y) / 2,
            });
        }

        let mut placed = piece;
        if pawn_flag && m.to.y == piece.color.opposite().back_rank() {
            let kind = m.promotion_piece().unwrap_or_else(|| {
                debug!("make_move({}): no promotion piece, using queen", mv);
                PieceType::Queen
            });
            placed = Piece::new(kind, piece.color);
        }

        ret.set(m.from, None);
        ret.set(m.to, Some(placed));
        ret
    }

    fn update_castling_rights(&mut self, piece: Piece, m: Move) {
        if piece.kind == PieceType::King {
            self.castling.clear(piece.color);
        }

        // A right dies with its rook: moved away or captured at home.
        for sq in [m.from, m.to] {
            for color in [Color::White, Color::Black] {
                if sq.y == color.back_rank() {
                    self.castling.remove(color, sq.x);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn e2e4_from_start() {
        let start = Position::new();
        let after = start.make_move("e2e4");
        assert_eq!(after.fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        // The receiver is untouched.
        assert_eq!(start, Position::new());
    }

    #[test]
    fn counters() {
        let p = Position::new().make_move("g1f3");
        assert_eq!((p.halfmove(), p.fullmove()), (1, 1));
        let p = p.make_move("g8f6");
        assert_eq!((p.halfmove(), p.fullmove()), (2, 2));
        let p = p.make_move("e2e4");
        assert_eq!((p.halfmove(), p.fullmove()), (0, 2));
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let after = p.make_move("e5d6");
        assert_eq!(after.piece(sq("d5")), None);
        assert_eq!(after.piece(sq("d6")), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(after.piece_count(), p.piece_count() - 1);
        assert_eq!(after.enpassant(), None);
        assert_eq!(after.halfmove(), 0);
    }

    #[test]
    fn en_passant_target_is_skipped_square() {
        let p = pos("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        let after = p.make_move("d7d5");
        assert_eq!(after.enpassant(), Some(sq("d6")));
        assert_eq!(after.make_move("g1f3").enpassant(), None);
    }

    #[test]
    fn promotion() {
        let p = pos("4k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1");
        let after = p.make_move("b7b8n");
        assert_eq!(after.piece(sq("b8")), Some(Piece::new(PieceType::Knight, Color::White)));
        let after = after.make_move("g2g1r");
        assert_eq!(after.piece(sq("g1")), Some(Piece::new(PieceType::Rook, Color::Black)));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let p = pos("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let after = p.make_move("b7b8");
        assert_eq!(after.piece(sq("b8")), Some(Piece::new(PieceType::Queen, Color::White)));
    }

    #[test]
    fn castling_moves_both_pieces() {
        let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 9");
        let after = p.make_move("e1g1");
        assert_eq!(after.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 9");
        let after = after.make_move("e8a8");
        assert_eq!(after.fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 5 10");
    }

    #[test]
    fn rook_moves_and_captures_drop_rights() {
        let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(p.make_move("h1h5").castling_string(), "Qkq");
        assert_eq!(p.make_move("a1a8").castling_string(), "Kk");
        assert_eq!(p.make_move("e1e2").castling_string(), "kq");
    }

    #[test]
    fn malformed_input_returns_copy() {
        let p = Position::new();
        assert_eq!(p.make_move("zz"), p);
        assert_eq!(p.make_move("e4e5"), p);
    }
}
