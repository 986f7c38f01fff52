use std::fmt;

/// A board coordinate. `x` is the file (a=0..h=7), `y` counts ranks from the
/// top of the grid (y=0 is rank 8, y=7 is rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

impl Square {
    pub fn new(x: i8, y: i8) -> Option<Self> {
        if Self::on_board(x, y) {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub fn on_board(x: i8, y: i8) -> bool {
        (0..8).contains(&x) && (0..8).contains(&y)
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let (file, rank) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            x: (file as u8 - b'a') as i8,
            y: (b'8' - rank as u8) as i8,
        })
    }

    /// Square reached by stepping `(dx, dy)`, if it is still on the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn file_char(self) -> char {
        (b'a' + self.x as u8) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.y as u8) as char
    }

    /// Iterates the 64 squares top row first, a-file to h-file.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|y| (0..8).map(move |x| Square { x, y }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
