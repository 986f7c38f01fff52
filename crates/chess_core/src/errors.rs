use thiserror::Error;

use crate::Square;

/// Why a move string was rejected by [`Position::illegal`](crate::Position::illegal).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Illegal {
    #[error("bad string length")]
    BadStringLength,
    #[error("off board")]
    OffBoard,
    #[error("no piece at source")]
    EmptySource,
    #[error("wrong colour source")]
    WrongColourSource,
    #[error("source and destination have same colour")]
    SameColourDestination,
    #[error("illegal knight movement")]
    IllegalKnightMovement,
    #[error("illegal bishop movement")]
    IllegalBishopMovement,
    #[error("illegal rook movement")]
    IllegalRookMovement,
    #[error("illegal queen movement")]
    IllegalQueenMovement,
    #[error("illegal king movement")]
    IllegalKingMovement,
    #[error("pawn must move forwards")]
    PawnMustMoveForwards,
    #[error("pawn cannot move more than 1 file sideways")]
    PawnMovedTooFarSideways,
    #[error("pawn can only capture one square diagonally")]
    PawnCaptureDistance,
    #[error("pawn cannot capture to empty square")]
    PawnCaptureToEmptySquare,
    #[error("pawn cannot capture forwards")]
    PawnCannotCaptureForwards,
    #[error("pawn must move forwards 1 or 2")]
    PawnForwardDistance,
    #[error("movement blocked")]
    MovementBlocked,
    #[error("invalid promotion piece '{0}'")]
    BadPromotion(char),
    #[error("castling king and rook not on same rank")]
    CastlingNotOnSameRank,
    #[error("castling not on back rank")]
    CastlingNotOnBackRank,
    #[error("castling right '{0}' not present")]
    CastlingRightMissing(char),
    #[error("castling path blocked at {0}")]
    CastlingPathBlocked(Square),
    #[error("castling through attacked square {0}")]
    CastlingThroughCheck(Square),
    #[error("king in check")]
    KingInCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 8 squares")]
    RankLength(usize),
    #[error("unknown piece character '{0}'")]
    BadPiece(char),
    #[error("bad active colour '{0}'")]
    BadActive(String),
    #[error("bad castling character '{0}'")]
    BadCastling(char),
    #[error("bad en passant square '{0}'")]
    BadEnPassant(String),
    #[error("bad halfmove clock '{0}'")]
    BadHalfmove(String),
    #[error("bad fullmove number '{0}'")]
    BadFullmove(String),
    #[error("expected one {0} king, found {1}")]
    KingCount(crate::Color, usize),
    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),
    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Failures of [`Position::parse_pgn`](crate::Position::parse_pgn).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty move token")]
    Empty,
    #[error("malformed move token '{0}'")]
    Malformed(String),
    #[error("invalid promotion in '{0}'")]
    BadPromotion(String),
    #[error("castling not possible: {0}")]
    CastlingImpossible(String),
    #[error("piece not found for '{0}'")]
    PieceNotFound(String),
    #[error("piece found but move illegal: '{0}'")]
    IllegalMove(String),
    #[error("ambiguous move '{token}', candidates: {}", .candidates.join(", "))]
    Ambiguous { token: String, candidates: Vec<String> },
}
