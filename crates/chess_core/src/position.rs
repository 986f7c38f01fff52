use std::fmt;

use crate::{CastlingRights, Color, Piece, PieceType, Square};

pub type Grid = [[Option<Piece>; 8]; 8];

/// A complete chess position. Indexed `grid[x][y]` with y=0 on rank 8.
///
/// Positions are values: every move produces a new one and the receiver is
/// never touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) grid: Grid,
    pub(crate) active: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) enpassant: Option<Square>,
    pub(crate) halfmove: u32,
    pub(crate) fullmove: u32,
}

impl Position {
    /// The standard initial array.
    pub fn new() -> Self {
        let mut position = Self::empty();
        position.setup_initial_position();
        position
    }

    /// An empty board, White to move, no rights.
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
            active: Color::White,
            castling: CastlingRights::none(),
            enpassant: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    fn setup_initial_position(&mut self) {
        // Setup pawns
        for x in 0..8 {
            self.grid[x][1] = Some(Piece::new(PieceType::Pawn, Color::Black));
            self.grid[x][6] = Some(Piece::new(PieceType::Pawn, Color::White));
        }

        // Setup other pieces
        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (x, &kind) in piece_order.iter().enumerate() {
            self.grid[x][0] = Some(Piece::new(kind, Color::Black));
            self.grid[x][7] = Some(Piece::new(kind, Color::White));
        }

        self.castling = CastlingRights::standard();
    }

    pub fn piece(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.x as usize][sq.y as usize]
    }

    /// Like [`piece`](Self::piece) for raw coordinates; off-board is empty.
    pub fn piece_at(&self, x: i8, y: i8) -> Option<Piece> {
        Square::new(x, y).and_then(|sq| self.piece(sq))
    }

    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.x as usize][sq.y as usize] = piece;
    }

    /// Places or removes a piece. Meant for building test and setup
    /// positions; rights and counters are left as they are.
    pub fn with_piece(mut self, sq: Square, piece: Option<Piece>) -> Self {
        self.set(sq, piece);
        self
    }

    pub fn colour(&self, sq: Square) -> Option<Color> {
        self.piece(sq).map(|p| p.color)
    }

    pub fn is_white(&self, sq: Square) -> bool {
        self.colour(sq) == Some(Color::White)
    }

    pub fn is_black(&self, sq: Square) -> bool {
        self.colour(sq) == Some(Color::Black)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece(sq).is_none()
    }

    pub fn same_colour(&self, a: Square, b: Square) -> bool {
        match (self.colour(a), self.colour(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    pub fn active(&self) -> Color {
        self.active
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn enpassant(&self) -> Option<Square> {
        self.enpassant
    }

    pub fn halfmove(&self) -> u32 {
        self.halfmove
    }

    pub fn fullmove(&self) -> u32 {
        self.fullmove
    }

    /// All squares holding exactly this piece.
    pub fn find(&self, piece: Piece) -> Vec<Square> {
        Square::all().filter(|&sq| self.piece(sq) == Some(piece)).collect()
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Some(Piece::new(PieceType::King, color));
        Square::all().find(|&sq| self.piece(sq) == king)
    }

    pub fn piece_count(&self) -> usize {
        self.grid.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Move-list prefix for the side to move: `"12."` or `"12..."`.
    pub fn next_number_string(&self) -> String {
        match self.active {
            Color::White => format!("{}.", self.fullmove),
            Color::Black => format!("{}...", self.fullmove),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..8 {
            write!(f, "{} ", 8 - y)?;
            for x in 0..8 {
                let c = self.grid[x][y].map_or('.', Piece::to_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn initial_array() {
        let pos = Position::new();
        assert_eq!(pos.piece_count(), 32);
        assert_eq!(pos.piece(sq("e1")), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(pos.piece(sq("d8")), Some(Piece::new(PieceType::Queen, Color::Black)));
        assert!(pos.is_white(sq("a2")));
        assert!(pos.is_black(sq("h7")));
        assert!(pos.is_empty(sq("e4")));
        assert_eq!(pos.active(), Color::White);
        assert_eq!(pos.enpassant(), None);
    }

    #[test]
    fn find_pieces() {
        let pos = Position::new();
        let knights = pos.find(Piece::new(PieceType::Knight, Color::White));
        assert_eq!(knights, vec![sq("b1"), sq("g1")]);
        assert_eq!(pos.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Position::empty().find_king(Color::White), None);
    }

    #[test]
    fn same_colour_needs_two_pieces() {
        let pos = Position::new();
        assert!(pos.same_colour(sq("a1"), sq("h2")));
        assert!(!pos.same_colour(sq("a1"), sq("a8")));
        assert!(!pos.same_colour(sq("a1"), sq("a3")));
    }

    #[test]
    fn ascii_board() {
        let text = Position::new().to_string();
        assert!(text.starts_with("8  r n b q k b n r"));
        assert!(text.ends_with("   a b c d e f g h"));
    }

    #[test]
    fn number_string() {
        let pos = Position::new();
        assert_eq!(pos.next_number_string(), "1.");
    }
}
