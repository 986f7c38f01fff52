use std::fmt;

use crate::{Color, Illegal, PieceType, Position, Square};

/// A parsed 4- or 5-character move string such as `e2e4` or `e7e8q`.
///
/// The promotion character is kept raw; whether it is acceptable depends on
/// the position and is decided by [`Position::illegal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<char>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion.letter().to_ascii_lowercase()),
        }
    }

    pub fn parse(s: &str) -> Result<Self, Illegal> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(Illegal::BadStringLength);
        }

        let from = Square::from_algebraic(&s[0..2]).ok_or(Illegal::OffBoard)?;
        let to = Square::from_algebraic(&s[2..4]).ok_or(Illegal::OffBoard)?;
        let promotion = s[4..].chars().next();

        Ok(Self { from, to, promotion })
    }

    pub fn promotion_piece(&self) -> Option<PieceType> {
        self.promotion.and_then(PieceType::from_promotion_char)
    }

    pub fn dx(&self) -> i8 {
        self.to.x - self.from.x
    }

    pub fn dy(&self) -> i8 {
        self.to.y - self.from.y
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Capture,
    EnPassant,
    Castle,
    Promotion,
}

/// How castling is written when a move is handed to a UCI consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastlingStyle {
    /// King moves two files: `e1g1`.
    #[default]
    Standard,
    /// King lands on its own rook: `e1h1`.
    Chess960,
}

impl Position {
    /// Classifies a move string against this position. Assumes a legal move.
    pub fn move_type(&self, mv: &str) -> Option<MoveType> {
        let m = Move::parse(&self.normalize_castling(mv)).ok()?;
        let piece = self.piece(m.from)?;

        if piece.kind == PieceType::King && self.same_colour(m.from, m.to) {
            return Some(MoveType::Castle);
        }
        if piece.kind == PieceType::Pawn && m.to.y == piece.color.opposite().back_rank() {
            return Some(MoveType::Promotion);
        }
        if piece.kind == PieceType::Pawn && m.dx() != 0 && self.is_empty(m.to) {
            return Some(MoveType::EnPassant);
        }
        if self.piece(m.to).is_some() {
            return Some(MoveType::Capture);
        }
        Some(MoveType::Normal)
    }

    /// Whether the move removes an enemy piece, en passant included.
    pub fn is_capture(&self, mv: &str) -> bool {
        match self.move_type(mv) {
            Some(MoveType::Capture | MoveType::EnPassant) => true,
            Some(MoveType::Promotion) => {
                Move::parse(mv).is_ok_and(|m| m.dx() != 0)
            }
            _ => false,
        }
    }

    /// Every legal move string for the side to move. Castling is given in
    /// king-onto-rook form; promotions are expanded to all four pieces.
    pub fn legal_moves(&self) -> Vec<String> {
        let mut moves = Vec::new();

        for from in Square::all() {
            let Some(piece) = self.piece(from) else {
                continue;
            };
            if piece.color != self.active {
                continue;
            }

            for to in Square::all() {
                let promotes = piece.kind == PieceType::Pawn
                    && to.y == piece.color.opposite().back_rank();

                if promotes {
                    for kind in PieceType::PROMOTIONS {
                        let s = Move::with_promotion(from, to, kind).to_string();
                        if self.illegal(&s).is_none() {
                            moves.push(s);
                        }
                    }
                } else {
                    let s = Move::new(from, to).to_string();
                    // Castling is listed once, as king onto rook.
                    if piece.kind == PieceType::King && self.normalize_castling(&s) != s {
                        continue;
                    }
                    if self.illegal(&s).is_none() {
                        moves.push(s);
                    }
                }
            }
        }

        moves
    }

    /// Renders a legal move for a UCI consumer. Accepts either castling form.
    pub fn uci_string(&self, mv: &str, style: CastlingStyle) -> String {
        let normalized = self.normalize_castling(mv);
        if style == CastlingStyle::Chess960 {
            return normalized;
        }

        let Ok(m) = Move::parse(&normalized) else {
            return mv.to_string();
        };
        match self.piece(m.from) {
            Some(king) if king.kind == PieceType::King && self.same_colour(m.from, m.to) => {
                let x = if m.to.x > m.from.x { 6 } else { 2 };
                let to = Square { x, y: m.from.y };
                Move::new(m.from, to).to_string()
            }
            _ => normalized,
        }
    }

    /// Squares holding a `color` `kind` that can legally move to `to`.
    pub(crate) fn sources_reaching(&self, to: Square, kind: PieceType, color: Color) -> Vec<Square> {
        Square::all()
            .filter(|&from| {
                self.piece(from).is_some_and(|p| p.kind == kind && p.color == color)
                    && self.illegal(&Move::new(from, to).to_string()).is_none()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("e2e4", "e2", "e4", None)]
    #[test_case("a7a8q", "a7", "a8", Some('q'))]
    #[test_case("h2h1x", "h2", "h1", Some('x'))]
    fn parse_moves(s: &str, from: &str, to: &str, promotion: Option<char>) {
        let m = Move::parse(s).unwrap();
        assert_eq!(m.from.to_string(), from);
        assert_eq!(m.to.to_string(), to);
        assert_eq!(m.promotion, promotion);
        assert_eq!(m.to_string(), s);
    }

    #[test_case("e2e", Illegal::BadStringLength)]
    #[test_case("e2e4qq", Illegal::BadStringLength)]
    #[test_case("e9e4", Illegal::OffBoard)]
    #[test_case("z2e4", Illegal::OffBoard)]
    #[test_case("é2e4", Illegal::BadStringLength)]
    fn reject_malformed(s: &str, reason: Illegal) {
        assert_eq!(Move::parse(s), Err(reason));
    }

    #[test]
    fn twenty_moves_from_start() {
        let moves = Position::new().legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&"g1f3".to_string()));
        assert!(moves.contains(&"e2e4".to_string()));
    }

    #[test]
    fn promotions_are_expanded() {
        let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let moves = pos.legal_moves();
        for m in ["a7a8q", "a7a8r", "a7a8b", "a7a8n"] {
            assert!(moves.contains(&m.to_string()), "missing {m}");
        }
        assert!(!moves.contains(&"a7a8".to_string()));
    }

    #[test]
    fn castling_forms() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(pos.uci_string("e1h1", CastlingStyle::Standard), "e1g1");
        assert_eq!(pos.uci_string("e1g1", CastlingStyle::Chess960), "e1h1");
        assert_eq!(pos.uci_string("e1a1", CastlingStyle::Standard), "e1c1");
        assert_eq!(pos.uci_string("e1d1", CastlingStyle::Standard), "e1d1");
        assert_eq!(pos.move_type("e1g1"), Some(MoveType::Castle));
        let moves = pos.legal_moves();
        assert!(moves.contains(&"e1h1".to_string()));
        assert!(moves.contains(&"e1a1".to_string()));
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn capture_detection() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(pos.move_type("e5d6"), Some(MoveType::EnPassant));
        assert!(pos.is_capture("e5d6"));
        assert!(!pos.is_capture("e5e6"));
        assert!(!pos.is_capture("e1e2"));
    }
}
