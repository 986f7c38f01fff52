use crate::{Move, PieceType, Position, Square};

impl Position {
    /// True when the side to move has no legal move at all.
    pub fn no_moves(&self) -> bool {
        !self.has_legal_move()
    }

    fn has_legal_move(&self) -> bool {
        for from in Square::all() {
            let Some(piece) = self.piece(from) else {
                continue;
            };
            if piece.color != self.active {
                continue;
            }

            for to in Square::all() {
                let mut m = Move::new(from, to);
                // If any promotion is legal, the queen one is.
                if piece.kind == PieceType::Pawn && to.y == piece.color.opposite().back_rank() {
                    m = Move::with_promotion(from, to, PieceType::Queen);
                }
                if self.illegal(&m.to_string()).is_none() {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.no_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.no_moves()
    }

    /// Neither side can mate: no pawns, rooks or queens, and at most a lone
    /// knight or any number of bishops all on one square colour.
    pub fn insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishop_shades = [false; 2];

        for sq in Square::all() {
            let Some(piece) = self.piece(sq) else {
                continue;
            };
            match piece.kind {
                PieceType::King => {}
                PieceType::Knight => knights += 1,
                PieceType::Bishop => bishop_shades[((sq.x + sq.y) % 2) as usize] = true,
                PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
            }
        }

        let shades = bishop_shades.iter().filter(|&&s| s).count();
        match knights {
            0 => shades <= 1,
            1 => shades == 0,
            _ => false,
        }
    }

    /// Fifty moves by each side without a pawn move or capture.
    pub fn fifty_move_draw(&self) -> bool {
        self.halfmove >= 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn fools_mate() {
        let mut p = Position::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert!(p.is_legal(mv), "{mv}");
            p = p.make_move(mv);
        }
        assert!(p.in_check());
        assert!(p.is_checkmate());
        assert!(!p.is_stalemate());
        assert!(p.legal_moves().is_empty());
    }

    #[test]
    fn stalemate() {
        let p = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!p.in_check());
        assert!(p.is_stalemate());
    }

    #[test]
    fn promotion_escapes_count() {
        // The king is boxed in by the queen; only the pawn can move.
        let p = pos("8/2P5/8/4k3/8/1q6/8/K7 w - - 0 1");
        assert!(!p.no_moves());
        assert_eq!(p.legal_moves().len(), 4);
    }

    #[test_case("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true; "bare kings")]
    #[test_case("4k3/8/8/8/8/8/8/4KN2 w - - 0 1", true; "lone knight")]
    #[test_case("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1", false; "opposite shade bishops")]
    #[test_case("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1", true; "same shade bishops")]
    #[test_case("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1", false; "two knights")]
    #[test_case("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false; "pawn")]
    fn material_draws(fen: &str, expected: bool) {
        assert_eq!(pos(fen).insufficient_material(), expected);
    }

    #[test]
    fn fifty_moves() {
        assert!(!pos("4k3/8/8/8/8/8/8/4K2R w - - 99 80").fifty_move_draw());
        assert!(pos("4k3/8/8/8/8/8/8/4K2R b - - 100 80").fifty_move_draw());
    }
}
