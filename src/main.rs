use std::io::{self, BufRead, Write};

use chess_analysis::{divide, perft, random_playout, replay_movetext, san_line, PlayoutConfig};
use chess_core::{CastlingStyle, FenError, Illegal, Position, SanError};
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("bad number '{0}'")]
    BadNumber(String),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("illegal move: {0}")]
    Illegal(#[from] Illegal),
    #[error(transparent)]
    San(#[from] SanError),
    #[error(transparent)]
    Movetext(#[from] chess_analysis::MovetextError),
}

struct Shell {
    position: Position,
    history: Vec<String>,
    start: Position,
}

enum Flow {
    Continue(String),
    Quit,
}

impl Shell {
    fn new() -> Self {
        Self {
            position: Position::new(),
            history: Vec::new(),
            start: Position::new(),
        }
    }

    fn reset(&mut self, position: Position) {
        self.start = position.clone();
        self.position = position;
        self.history.clear();
    }

    fn play(&mut self, uci: &str) -> Result<String, CommandError> {
        if let Some(reason) = self.position.illegal(uci) {
            return Err(reason.into());
        }
        let san = self.position.nice_string(uci);
        let normalized = self.position.normalize_castling(uci);
        self.position = self.position.make_move(uci);
        self.history.push(normalized);
        Ok(san)
    }

    fn execute(&mut self, line: &str) -> Result<Flow, CommandError> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };
        let number = |name: &'static str| -> Result<u32, CommandError> {
            let s = arg(name)?;
            s.parse().map_err(|_| CommandError::BadNumber(s.to_string()))
        };
        debug!("command: {:?}", line);

        let out = match command {
            "" => String::new(),
            "quit" | "exit" => return Ok(Flow::Quit),
            "startpos" => {
                self.reset(Position::new());
                self.position.fen()
            }
            "fen" => {
                self.reset(Position::from_fen(arg("fen")?)?);
                self.position.fen()
            }
            "move" => {
                let mut played = Vec::new();
                for uci in arg("move")?.split_whitespace() {
                    played.push(self.play(uci)?);
                }
                played.join(" ")
            }
            "san" => {
                let mut played = Vec::new();
                for token in arg("san")?.split_whitespace() {
                    let uci = self.position.parse_pgn(token)?;
                    played.push(self.play(&uci)?);
                }
                played.join(" ")
            }
            "legal" => self
                .position
                .legal_moves()
                .iter()
                .map(|mv| self.position.uci_string(mv, CastlingStyle::Standard))
                .collect::<Vec<_>>()
                .join(" "),
            "perft" => perft(&self.position, number("perft")?).to_string(),
            "divide" => {
                let split = divide(&self.position, number("divide")?);
                let total: u64 = split.iter().map(|(_, n)| n).sum();
                let mut lines: Vec<String> = split
                    .iter()
                    .map(|(mv, n)| format!("{}: {}", mv, n))
                    .collect();
                lines.push(format!("total: {}", total));
                lines.join("\n")
            }
            "playout" => {
                let config = PlayoutConfig {
                    max_plies: number("playout")? as usize,
                    ..PlayoutConfig::default()
                };
                let game = random_playout(&self.position, &config, &mut rand::thread_rng());
                format!(
                    "{} {}\n{}",
                    san_line(&game.start, &game.uci_moves()),
                    game.outcome.result_string(),
                    game.final_position().fen()
                )
            }
            "pgn" => {
                let plies = replay_movetext(&self.position, arg("pgn")?)?;
                for ply in &plies {
                    self.history.push(ply.uci.clone());
                }
                if let Some(last) = plies.last() {
                    self.position = last.position.clone();
                }
                plies.iter().map(|p| p.san.as_str()).collect::<Vec<_>>().join(" ")
            }
            "d" => {
                let mut out = format!("{}\nFen: {}", self.position, self.position.fen());
                if !self.history.is_empty() {
                    out.push_str("\nMoves: ");
                    out.push_str(&san_line(&self.start, &self.history));
                }
                if self.position.is_checkmate() {
                    out.push_str("\nCheckmate");
                } else if self.position.is_stalemate() {
                    out.push_str("\nStalemate");
                } else if self.position.in_check() {
                    out.push_str("\nCheck");
                }
                out
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Flow::Continue(out))
    }
}

fn main() -> io::Result<()> {
    let mut shell = Shell::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    info!("chess shell ready");

    for line in stdin.lock().lines() {
        match shell.execute(&line?) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue(out)) => {
                if !out.is_empty() {
                    writeln!(stdout, "{}", out)?;
                }
            }
            Err(e) => writeln!(stdout, "error: {}", e)?,
        }
        stdout.flush()?;
    }

    Ok(())
}
