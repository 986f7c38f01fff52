//! Tools built on top of `chess_core`: perft node counting, random
//! playouts and PGN movetext replay.

pub mod line;
pub mod movetext;
pub mod perft;
pub mod playout;

pub use line::{san_line, Ply};
pub use movetext::{replay_movetext, tokenize, MovetextError};
pub use perft::{divide, perft};
pub use playout::{random_playout, Outcome, Playout, PlayoutConfig};
