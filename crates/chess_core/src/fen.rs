use std::str::FromStr;

use log::debug;

use crate::{CastlingRights, Color, FenError, Piece, PieceType, Position, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Loads a FEN string. The halfmove and fullmove fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::parse_fen(fen).inspect_err(|e| debug!("rejected FEN {:?}: {}", fen, e))
    }

    fn parse_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (y, rank) in ranks.iter().enumerate() {
            let rank_number = 8 - y;
            let mut x = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    x += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::BadPiece(c))?;
                if x >= 8 {
                    return Err(FenError::RankLength(rank_number));
                }
                pos.grid[x][y] = Some(piece);
                x += 1;
            }
            if x != 8 {
                return Err(FenError::RankLength(rank_number));
            }
        }

        let mut active = fields[1].chars();
        pos.active = match (active.next().and_then(Color::from_char), active.next()) {
            (Some(color), None) => color,
            _ => return Err(FenError::BadActive(fields[1].to_string())),
        };

        if let Some(c) = fields[2]
            .chars()
            .find(|c| !matches!(c, 'K' | 'Q' | 'k' | 'q' | 'A'..='H' | 'a'..='h' | '-'))
        {
            return Err(FenError::BadCastling(c));
        }
        pos.set_castling_rights(fields[2]);

        pos.enpassant = match fields[3] {
            "-" => None,
            s => match Square::from_algebraic(s) {
                Some(sq) if pos.double_step_behind(sq) => Some(sq),
                _ => return Err(FenError::BadEnPassant(s.to_string())),
            },
        };

        if let Some(s) = fields.get(4) {
            pos.halfmove = s.parse().map_err(|_| FenError::BadHalfmove(s.to_string()))?;
        }
        if let Some(s) = fields.get(5) {
            let n: u32 = s.parse().map_err(|_| FenError::BadFullmove(s.to_string()))?;
            pos.fullmove = n.max(1);
        }

        pos.validate()?;
        Ok(pos)
    }

    /// Whether `sq` is the square skipped by an enemy pawn's double step:
    /// on the mover's third rank, empty, with the pawn in front of it and
    /// its start square empty.
    fn double_step_behind(&self, sq: Square) -> bool {
        let pusher = self.active.opposite();
        if sq.y != pusher.pawn_rank() + pusher.forward() || !self.is_empty(sq) {
            return false;
        }
        let pawn = sq.offset(0, pusher.forward()).and_then(|s| self.piece(s));
        let origin = sq.offset(0, -pusher.forward());
        pawn == Some(Piece::new(PieceType::Pawn, pusher))
            && origin.is_some_and(|s| self.is_empty(s))
    }

    fn validate(&self) -> Result<(), FenError> {
        for color in [Color::White, Color::Black] {
            let kings = self.find(Piece::new(PieceType::King, color)).len();
            if kings != 1 {
                return Err(FenError::KingCount(color, kings));
            }
        }

        for sq in Square::all().filter(|sq| sq.y == 0 || sq.y == 7) {
            if self.piece(sq).is_some_and(|p| p.kind == PieceType::Pawn) {
                return Err(FenError::PawnOnBackRank(sq));
            }
        }

        if self.king_attacked(self.active.opposite()) {
            return Err(FenError::OpponentInCheck);
        }

        Ok(())
    }

    /// Derives castling rights from a FEN castling field, replacing any
    /// rights already held. Accepts `KQkq` and file letters (`HAha`).
    ///
    /// A side only gets rights if its king stands on its back rank away
    /// from the corners. `K`/`Q` resolve to the outermost rook on that side
    /// of the king; a file letter needs a rook on that file.
    pub fn set_castling_rights(&mut self, field: &str) {
        let mut granted = Vec::new();

        for color in [Color::White, Color::Black] {
            let y = color.back_rank();
            let king = Some(Piece::new(PieceType::King, color));
            let Some(king_x) = (1..7).find(|&x| self.piece_at(x, y) == king) else {
                debug!("no {} castling rights: king not on back rank", color);
                continue;
            };

            let rook = Some(Piece::new(PieceType::Rook, color));
            let is_rook = |x: i8| self.piece_at(x, y) == rook;

            for c in field.chars() {
                let ours = match color {
                    Color::White => c.is_ascii_uppercase(),
                    Color::Black => c.is_ascii_lowercase(),
                };
                if !ours {
                    continue;
                }

                let file = match c.to_ascii_uppercase() {
                    'K' => (king_x + 1..8).rev().find(|&x| is_rook(x)),
                    'Q' => (0..king_x).find(|&x| is_rook(x)),
                    f @ 'A'..='H' => Some((f as u8 - b'A') as i8).filter(|&x| is_rook(x)),
                    _ => None,
                };

                match file {
                    Some(x) => granted.push((color, x)),
                    None => debug!("castling symbol '{}' has no matching rook", c),
                }
            }
        }

        self.castling = CastlingRights::none();
        for (color, x) in granted {
            self.castling.add(color, x);
        }
    }

    /// The FEN castling field. `KQkq` is used where the right names the
    /// outermost rook on its side; other rights are written as file letters.
    pub fn castling_string(&self) -> String {
        let mut out = String::new();

        for color in [Color::White, Color::Black] {
            let y = color.back_rank();
            let king_x = self.find_king(color).filter(|k| k.y == y).map(|k| k.x);
            let rook = Some(Piece::new(PieceType::Rook, color));
            let is_rook = |x: i8| self.piece_at(x, y) == rook;

            for file in self.castling.files(color) {
                let symbol = match king_x {
                    Some(k) if file > k && !(file + 1..8).any(is_rook) => 'K',
                    Some(k) if file < k && !(0..file).any(is_rook) => 'Q',
                    _ => CastlingRights::symbol(color, file).to_ascii_uppercase(),
                };
                out.push(match color {
                    Color::White => symbol,
                    Color::Black => symbol.to_ascii_lowercase(),
                });
            }
        }

        if out.is_empty() {
            out.push('-');
        }
        out
    }

    pub fn fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for y in 0..8 {
            let mut rank = String::new();
            let mut empty = 0;
            for x in 0..8 {
                match self.grid[x][y] {
                    Some(piece) => {
                        if empty > 0 {
                            rank.push_str(&empty.to_string());
                            empty = 0;
                        }
                        rank.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
            }
            ranks.push(rank);
        }

        let enpassant = self.enpassant.map_or("-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            ranks.join("/"),
            self.active.to_char(),
            self.castling_string(),
            enpassant,
            self.halfmove,
            self.fullmove
        )
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}
