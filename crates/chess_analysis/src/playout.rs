use chess_core::{Color, Position};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::line::Ply;

/// Limits for [`random_playout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutConfig {
    /// Half-moves to play before giving up.
    pub max_plies: usize,
    /// Stop on insufficient material or the fifty-move rule, not only on
    /// mate and stalemate.
    pub stop_at_game_end: bool,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            stop_at_game_end: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate(Color),
    Stalemate,
    InsufficientMaterial,
    FiftyMoves,
    /// The ply limit was reached first.
    Unfinished,
}

impl Outcome {
    /// Result tag as written at the end of PGN movetext.
    pub fn result_string(self) -> &'static str {
        match self {
            Outcome::Checkmate(Color::White) => "1-0",
            Outcome::Checkmate(Color::Black) => "0-1",
            Outcome::Stalemate | Outcome::InsufficientMaterial | Outcome::FiftyMoves => "1/2-1/2",
            Outcome::Unfinished => "*",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Playout {
    pub start: Position,
    pub plies: Vec<Ply>,
    pub outcome: Outcome,
}

impl Playout {
    pub fn final_position(&self) -> &Position {
        self.plies.last().map_or(&self.start, |p| &p.position)
    }

    pub fn uci_moves(&self) -> Vec<String> {
        self.plies.iter().map(|p| p.uci.clone()).collect()
    }
}

fn outcome(pos: &Position, config: &PlayoutConfig) -> Option<Outcome> {
    if pos.no_moves() {
        return Some(if pos.in_check() {
            Outcome::Checkmate(pos.active().opposite())
        } else {
            Outcome::Stalemate
        });
    }
    if config.stop_at_game_end {
        if pos.insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if pos.fifty_move_draw() {
            return Some(Outcome::FiftyMoves);
        }
    }
    None
}

/// Plays uniformly random legal moves from `start` until the game ends or
/// `config.max_plies` is reached.
pub fn random_playout<R: Rng + ?Sized>(
    start: &Position,
    config: &PlayoutConfig,
    rng: &mut R,
) -> Playout {
    let mut plies: Vec<Ply> = Vec::new();
    let mut pos = start.clone();

    let result = loop {
        if let Some(end) = outcome(&pos, config) {
            break end;
        }
        if plies.len() >= config.max_plies {
            break Outcome::Unfinished;
        }

        let moves = pos.legal_moves();
        let Some(mv) = moves.choose(rng) else {
            break Outcome::Stalemate;
        };
        let Some(ply) = Ply::play(&pos, mv) else {
            break Outcome::Unfinished;
        };
        debug!("{} {}", pos.next_number_string(), ply.san);
        pos = ply.position.clone();
        plies.push(ply);
    };

    info!("playout finished after {} plies: {:?}", plies.len(), result);

    Playout {
        start: start.clone(),
        plies,
        outcome: result,
    }
}
