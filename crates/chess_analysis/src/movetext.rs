use chess_core::{Position, SanError};
use log::debug;
use thiserror::Error;

use crate::line::Ply;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovetextError {
    #[error("ply {ply} ({token}): {source}")]
    San {
        ply: usize,
        token: String,
        #[source]
        source: SanError,
    },
    #[error("unterminated {0} comment")]
    UnterminatedComment(char),
    #[error("unbalanced variation parentheses")]
    UnbalancedVariation,
}

fn is_result(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn flush(current: &mut String, tokens: &mut Vec<String>, depth: usize) {
    let word = std::mem::take(current);
    if depth > 0 || word.is_empty() || is_result(&word) || word.starts_with('$') {
        return;
    }
    // "12." / "12..." alone, or glued to the move as in "12.e4".
    let word = match word.rfind('.') {
        Some(i) => &word[i + 1..],
        None => word.as_str(),
    };
    if word.is_empty() || word.chars().all(|c| c.is_ascii_digit()) {
        return;
    }
    tokens.push(word.to_string());
}

/// Splits PGN movetext into move tokens. Tag pairs, `{}` and `;` comments,
/// `()` variations, `$n` glyphs, move numbers and results are dropped.
pub fn tokenize(text: &str) -> Result<Vec<String>, MovetextError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                flush(&mut current, &mut tokens, depth);
                if !chars.by_ref().any(|c| c == '}') {
                    return Err(MovetextError::UnterminatedComment('{'));
                }
            }
            '[' => {
                flush(&mut current, &mut tokens, depth);
                if !chars.by_ref().any(|c| c == ']') {
                    return Err(MovetextError::UnterminatedComment('['));
                }
            }
            ';' => {
                flush(&mut current, &mut tokens, depth);
                chars.by_ref().find(|&c| c == '\n');
            }
            '(' => {
                flush(&mut current, &mut tokens, depth);
                depth += 1;
            }
            ')' => {
                flush(&mut current, &mut tokens, depth);
                depth = depth.checked_sub(1).ok_or(MovetextError::UnbalancedVariation)?;
            }
            c if c.is_whitespace() => flush(&mut current, &mut tokens, depth),
            c => current.push(c),
        }
    }
    flush(&mut current, &mut tokens, depth);

    if depth != 0 {
        return Err(MovetextError::UnbalancedVariation);
    }
    Ok(tokens)
}

/// Replays PGN movetext from `start`, returning one [`Ply`] per move.
pub fn replay_movetext(start: &Position, text: &str) -> Result<Vec<Ply>, MovetextError> {
    let mut plies: Vec<Ply> = Vec::new();
    let mut pos = start.clone();

    for (i, token) in tokenize(text)?.into_iter().enumerate() {
        let san_error = |source: SanError| MovetextError::San {
            ply: i + 1,
            token: token.clone(),
            source,
        };
        let uci = pos.parse_pgn(&token).map_err(san_error)?;
        let ply = Ply::play(&pos, &uci)
            .ok_or_else(|| san_error(SanError::IllegalMove(token.clone())))?;
        debug!("{} -> {}", token, ply.uci);
        pos = ply.position.clone();
        plies.push(ply);
    }

    Ok(plies)
}
