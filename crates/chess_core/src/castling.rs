use crate::Color;

/// Files (0..8) of the rooks each side may still castle with.
///
/// Rights are always held in file form; `KQkq` only exists at the FEN
/// boundary (see [`Position::set_castling_rights`](crate::Position::set_castling_rights)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    white: u8,
    black: u8,
}

impl CastlingRights {
    pub fn none() -> Self {
        Self::default()
    }

    /// Rights of the initial position: rooks on the a- and h-files.
    pub fn standard() -> Self {
        Self {
            white: 0b1000_0001,
            black: 0b1000_0001,
        }
    }

    fn mask(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn mask_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn has(&self, color: Color, file: i8) -> bool {
        (0..8).contains(&file) && self.mask(color) & (1 << file) != 0
    }

    pub fn add(&mut self, color: Color, file: i8) {
        if (0..8).contains(&file) {
            *self.mask_mut(color) |= 1 << file;
        }
    }

    pub fn remove(&mut self, color: Color, file: i8) {
        if (0..8).contains(&file) {
            *self.mask_mut(color) &= !(1 << file);
        }
    }

    pub fn clear(&mut self, color: Color) {
        *self.mask_mut(color) = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.white == 0 && self.black == 0
    }

    /// Files with a right for `color`, highest file first.
    pub fn files(&self, color: Color) -> impl Iterator<Item = i8> + '_ {
        let mask = self.mask(color);
        (0..8).rev().filter(move |f| mask & (1 << f) != 0)
    }

    /// The file-letter symbol naming a right: uppercase for White.
    pub fn symbol(color: Color, file: i8) -> char {
        let c = (b'a' + file as u8) as char;
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}
