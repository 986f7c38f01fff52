use chess_core::{Color, Position};

/// One half-move of a game line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ply {
    /// Move string as accepted by [`Position::make_move`].
    pub uci: String,
    pub san: String,
    /// Position after the move.
    pub position: Position,
}

impl Ply {
    /// Checks `uci` against `before` and builds the ply. `None` if illegal.
    pub fn play(before: &Position, uci: &str) -> Option<Self> {
        if before.illegal(uci).is_some() {
            return None;
        }
        Some(Self {
            uci: uci.to_string(),
            san: before.nice_string(uci),
            position: before.make_move(uci),
        })
    }
}

/// Renders legal move strings as numbered SAN text, e.g. `1. e4 e5 2. Nf3`.
/// A line starting with Black opens with `1...`. Stops at the first illegal
/// move.
pub fn san_line(start: &Position, moves: &[String]) -> String {
    let mut out = Vec::new();
    let mut pos = start.clone();

    for (i, mv) in moves.iter().enumerate() {
        let Some(ply) = Ply::play(&pos, mv) else {
            break;
        };
        if i == 0 || pos.active() == Color::White {
            out.push(format!("{} {}", pos.next_number_string(), ply.san));
        } else {
            out.push(ply.san.clone());
        }
        pos = ply.position;
    }

    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn numbered_line() {
        let line = san_line(&Position::new(), &moves(&["e2e4", "e7e5", "g1f3"]));
        assert_eq!(line, "1. e4 e5 2. Nf3");
    }

    #[test]
    fn line_starting_with_black() {
        let start = Position::new().make_move("d2d4");
        let line = san_line(&start, &moves(&["d7d5", "c2c4"]));
        assert_eq!(line, "1... d5 2. c4");
    }

    #[test]
    fn stops_at_illegal_move() {
        let line = san_line(&Position::new(), &moves(&["e2e4", "e2e4", "e7e5"]));
        assert_eq!(line, "1. e4");
    }

    #[test]
    fn ply_rejects_illegal() {
        assert!(Ply::play(&Position::new(), "e1e2").is_none());
        let ply = Ply::play(&Position::new(), "b1c3").unwrap();
        assert_eq!(ply.san, "Nc3");
    }
}
