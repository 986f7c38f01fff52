//! Chess position and move-legality engine.
//!
//! A [`Position`] is a value: [`Position::illegal`] checks a move string,
//! [`Position::make_move`] returns the next position, and the notation
//! helpers convert between move strings, SAN and FEN.

// Core chess game logic modules
mod attacks;
pub mod castling;
pub mod errors;
pub mod fen;
mod legality;
mod make_move;
pub mod moves;
pub mod piece;
pub mod position;
mod san;
pub mod square;
mod status;

// Re-export main types for convenience
pub use castling::CastlingRights;
pub use errors::{FenError, Illegal, SanError};
pub use fen::STARTING_FEN;
pub use moves::{CastlingStyle, Move, MoveType};
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
pub use square::Square;
