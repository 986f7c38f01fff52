use crate::{Color, PieceType, Position, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Position {
    /// Whether `target` is attacked by the side opposite to `mover`.
    ///
    /// A null target is never attacked.
    pub fn attacked(&self, target: Option<Square>, mover: Color) -> bool {
        let Some(target) = target else {
            return false;
        };

        if DIRECTIONS
            .iter()
            .any(|&(sx, sy)| self.line_attack(target, sx, sy, mover))
        {
            return true;
        }

        let attacker = mover.opposite();
        KNIGHT_OFFSETS.iter().any(|&(dx, dy)| {
            target.offset(dx, dy).and_then(|sq| self.piece(sq)).is_some_and(|p| {
                p.kind == PieceType::Knight && p.color == attacker
            })
        })
    }

    /// Walks from `target` in direction `(sx, sy)` and reports whether the
    /// first piece met is an enemy that attacks back along this ray.
    fn line_attack(&self, target: Square, sx: i8, sy: i8, mover: Color) -> bool {
        let mut current = target;
        let mut distance = 0;

        loop {
            current = match current.offset(sx, sy) {
                Some(sq) => sq,
                None => return false,
            };
            distance += 1;

            let Some(piece) = self.piece(current) else {
                continue;
            };

            if piece.color == mover {
                return false;
            }

            let diagonal = sx != 0 && sy != 0;
            return match piece.kind {
                PieceType::Queen => true,
                PieceType::Rook => !diagonal,
                PieceType::Bishop => diagonal,
                PieceType::King => distance == 1,
                // Pawns capture forwards, so the ray runs backwards from
                // the target: a White pawn sits one row below (sy = +1).
                PieceType::Pawn => {
                    distance == 1 && diagonal && sy == -piece.color.forward()
                }
                PieceType::Knight => false,
            };
        }
    }

    /// Line of sight: true iff `p1` and `p2` share a rank, file or diagonal
    /// and every square strictly between them is empty. Any other geometry
    /// (including `p1 == p2`) gives false.
    pub fn los(&self, p1: Square, p2: Square) -> bool {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;

        if (dx == 0 && dy == 0) || (dx != 0 && dy != 0 && dx.abs() != dy.abs()) {
            return false;
        }

        let (sx, sy) = (dx.signum(), dy.signum());
        let mut x = p1.x + sx;
        let mut y = p1.y + sy;

        while x != p2.x || y != p2.y {
            if self.piece_at(x, y).is_some() {
                return false;
            }
            x += sx;
            y += sy;
        }

        true
    }

    /// Whether the side to move has its king attacked.
    pub fn in_check(&self) -> bool {
        self.king_attacked(self.active)
    }

    pub(crate) fn king_attacked(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self.attacked(Some(king), color),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn null_target_is_safe() {
        assert!(!Position::new().attacked(None, Color::White));
    }

    #[test_case("f3", true; "covered by pawn and knight")]
    #[test_case("e3", true; "covered by pawns")]
    #[test_case("e4", false; "beyond pawn reach")]
    #[test_case("a6", false; "black half")]
    fn white_attacks_in_initial_position(square: &str, expected: bool) {
        // Attacked by White means the mover is Black.
        assert_eq!(Position::new().attacked(Some(sq(square)), Color::Black), expected);
    }

    #[test]
    fn pawn_attacks_follow_colour() {
        let p = pos("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        // White pawn on e4 hits d5 and f5.
        assert!(p.attacked(Some(sq("d5")), Color::Black));
        assert!(p.attacked(Some(sq("f5")), Color::Black));
        assert!(!p.attacked(Some(sq("e5")), Color::Black));
        assert!(!p.attacked(Some(sq("d3")), Color::Black));
        // Black pawn on d5 hits c4 and e4, never squares behind it.
        assert!(p.attacked(Some(sq("e4")), Color::White));
        assert!(p.attacked(Some(sq("c4")), Color::White));
        assert!(!p.attacked(Some(sq("c6")), Color::White));
    }

    #[test]
    fn sliders_are_blocked_by_first_piece() {
        let p = pos("4k3/8/8/8/r2P3K/8/8/8 w - - 0 1");
        assert!(p.attacked(Some(sq("c4")), Color::White));
        assert!(!p.attacked(Some(sq("h4")), Color::White));
        assert!(!p.attacked(Some(sq("e4")), Color::White));
    }

    #[test]
    fn bishop_only_on_diagonals_rook_only_on_lines() {
        let p = pos("4k3/8/8/3b4/8/8/8/R3K3 w - - 0 1");
        assert!(p.attacked(Some(sq("f3")), Color::White));
        assert!(!p.attacked(Some(sq("d3")), Color::White));
        assert!(p.attacked(Some(sq("a8")), Color::Black));
        assert!(!p.attacked(Some(sq("b2")), Color::Black));
    }

    #[test]
    fn king_attacks_only_adjacent() {
        let p = pos("8/8/8/4k3/8/8/8/4K3 w - - 0 1");
        assert!(p.attacked(Some(sq("d4")), Color::White));
        assert!(!p.attacked(Some(sq("e3")), Color::White));
    }

    #[test]
    fn knight_attacks() {
        let p = pos("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1");
        assert!(p.attacked(Some(sq("e1")), Color::White));
        assert!(p.attacked(Some(sq("g5")), Color::White));
        assert!(!p.attacked(Some(sq("f2")), Color::White));
        assert!(p.in_check());
    }

    #[test_case("a1", "a8", false; "blocked file")]
    #[test_case("a3", "h3", true; "empty rank")]
    #[test_case("c1", "h6", false; "diagonal through pawn")]
    #[test_case("b1", "c3", false; "knight jump is not a line")]
    #[test_case("e2", "e2", false; "same square")]
    #[test_case("e2", "e3", true; "adjacent")]
    fn line_of_sight(a: &str, b: &str, expected: bool) {
        assert_eq!(Position::new().los(sq(a), sq(b)), expected);
    }
}
