use log::debug;

use crate::{Move, Piece, PieceType, Position, SanError, Square};

impl Position {
    /// Translates a SAN-like token (`Nf3`, `exd5`, `e8=Q+`, `O-O`, `12...Qxb2`)
    /// into a move string that passes [`illegal`](Self::illegal).
    pub fn parse_pgn(&self, token: &str) -> Result<String, SanError> {
        self.parse_san(token)
            .inspect_err(|e| debug!("parse_pgn({:?}): {}", token, e))
    }

    fn parse_san(&self, token: &str) -> Result<String, SanError> {
        // Move numbers: "12." and "12..." prefixes.
        let body = match token.rfind('.') {
            Some(i) => &token[i + 1..],
            None => token,
        };
        let cleaned: String = body
            .trim()
            .chars()
            .filter(|c| !matches!(c, 'x' | '+' | '#' | '!' | '?'))
            .collect();

        if cleaned.is_empty() {
            return Err(SanError::Empty);
        }

        match cleaned.as_str() {
            "O-O" | "0-0" => return self.parse_castling(token, true),
            "O-O-O" | "0-0-0" => return self.parse_castling(token, false),
            _ => {}
        }

        let mut chars: Vec<char> = cleaned.chars().collect();
        let malformed = || SanError::Malformed(token.to_string());

        let mut promotion = None;
        if let Some(i) = chars.iter().position(|&c| c == '=') {
            let suffix = &chars[i + 1..];
            let kind = match suffix {
                [c] => PieceType::from_letter(*c),
                _ => None,
            };
            match kind {
                Some(k) if PieceType::PROMOTIONS.contains(&k) => promotion = Some(k),
                _ => return Err(SanError::BadPromotion(token.to_string())),
            }
            chars.truncate(i);
        } else if chars.len() >= 3 && matches!(chars.last(), Some('Q' | 'R' | 'B' | 'N')) {
            promotion = chars.pop().and_then(PieceType::from_letter);
        }

        let kind = match chars.first().copied() {
            Some(c @ ('K' | 'Q' | 'R' | 'B' | 'N' | 'P')) => {
                chars.remove(0);
                PieceType::from_letter(c).ok_or_else(malformed)?
            }
            _ => PieceType::Pawn,
        };

        if promotion.is_some() && kind != PieceType::Pawn {
            return Err(SanError::BadPromotion(token.to_string()));
        }
        if chars.len() < 2 || chars.len() > 4 {
            return Err(malformed());
        }

        let (hints, dest) = chars.split_at(chars.len() - 2);
        let dest: String = dest.iter().collect();
        let dest = Square::from_algebraic(&dest).ok_or_else(malformed)?;

        let mut file = None;
        let mut rank = None;
        for &c in hints {
            match c {
                'a'..='h' if file.is_none() => file = Some((c as u8 - b'a') as i8),
                '1'..='8' if rank.is_none() => rank = Some((b'8' - c as u8) as i8),
                _ => return Err(malformed()),
            }
        }

        // A pawn written without a file moves straight ahead.
        if kind == PieceType::Pawn && file.is_none() {
            file = Some(dest.x);
        }

        let wanted = Piece::new(kind, self.active);
        let mut found = false;
        let mut candidates = Vec::new();

        for from in Square::all() {
            if file.is_some_and(|f| f != from.x) || rank.is_some_and(|r| r != from.y) {
                continue;
            }
            if self.piece(from) != Some(wanted) {
                continue;
            }
            found = true;

            let mv = match promotion {
                Some(p) => Move::with_promotion(from, dest, p),
                None => Move::new(from, dest),
            }
            .to_string();
            if kind == PieceType::King && self.normalize_castling(&mv) != mv {
                continue;
            }
            if self.illegal(&mv).is_none() {
                candidates.push(mv);
            }
        }

        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            0 if found => Err(SanError::IllegalMove(token.to_string())),
            0 => Err(SanError::PieceNotFound(token.to_string())),
            _ => Err(SanError::Ambiguous {
                token: token.to_string(),
                candidates,
            }),
        }
    }

    fn parse_castling(&self, token: &str, kingside: bool) -> Result<String, SanError> {
        let impossible = |why: &str| SanError::CastlingImpossible(format!("{}: {}", token, why));

        let king = self.find_king(self.active).ok_or_else(|| impossible("no king"))?;
        let y = self.active.back_rank();
        if king.y != y {
            return Err(impossible("king not on back rank"));
        }

        let rook = Some(Piece::new(PieceType::Rook, self.active));
        let files: Vec<i8> = if kingside {
            (king.x + 1..8).rev().collect()
        } else {
            (0..king.x).collect()
        };

        let mut reason = None;
        for x in files {
            let sq = Square { x, y };
            if self.piece(sq) != rook {
                continue;
            }
            let mv = Move::new(king, sq).to_string();
            match self.illegal(&mv) {
                None => return Ok(mv),
                Some(r) => {
                    reason.get_or_insert(r);
                }
            }
        }

        Err(match reason {
            Some(r) => impossible(&r.to_string()),
            None => impossible("no rook"),
        })
    }

    /// Renders a move string as SAN, e.g. `Nbd7`, `exd6`, `O-O`, `e8=Q+`.
    ///
    /// A move that leaves the opponent in check gets `+`, or `#` when the
    /// opponent has no legal reply. Unparseable input gives `"??"`.
    pub fn nice_string(&self, mv: &str) -> String {
        let s = self.normalize_castling(mv);
        let Ok(m) = Move::parse(&s) else {
            return "??".to_string();
        };
        let Some(piece) = self.piece(m.from) else {
            return "??".to_string();
        };

        let mut out = String::new();
        let castling = piece.kind == PieceType::King
            && self.piece(m.to) == Some(Piece::new(PieceType::Rook, piece.color));

        if castling {
            out.push_str(if m.to.x > m.from.x { "O-O" } else { "O-O-O" });
        } else if piece.kind == PieceType::Pawn {
            if m.dx() != 0 {
                out.push(m.from.file_char());
                out.push('x');
            }
            out.push_str(&m.to.to_string());
            if m.to.y == piece.color.opposite().back_rank() {
                let kind = m.promotion_piece().unwrap_or(PieceType::Queen);
                out.push('=');
                out.push(kind.letter());
            }
        } else {
            out.push(piece.kind.letter());

            if piece.kind != PieceType::King {
                let sources = self.sources_reaching(m.to, piece.kind, piece.color);
                match sources.len() {
                    0 | 1 => {}
                    2 => {
                        let other = sources.iter().find(|&&sq| sq != m.from).copied();
                        match other {
                            Some(o) if o.x != m.from.x => out.push(m.from.file_char()),
                            _ => out.push(m.from.rank_char()),
                        }
                    }
                    _ => out.push_str(&m.from.to_string()),
                }
            }

            if self.piece(m.to).is_some() {
                out.push('x');
            }
            out.push_str(&m.to.to_string());
        }

        let after = self.make_move(&s);
        if after.in_check() {
            out.push(if after.no_moves() { '#' } else { '+' });
        }
        out
    }
}
