use chess_analysis::{divide, perft};
use chess_core::Position;
use test_case::test_case;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3, 8902; "initial position")]
#[test_case(KIWIPETE, 1, 48; "kiwipete depth 1")]
#[test_case(KIWIPETE, 2, 2039; "kiwipete depth 2")]
#[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3, 2812; "rook endgame")]
#[test_case("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 2, 264; "promotions in check")]
#[test_case("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 2, 1486; "promotion capture")]
#[test_case("bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9", 2, 528; "chess960")]
fn known_counts(fen: &str, depth: u32, nodes: u64) {
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(perft(&pos, depth), nodes);
}

#[test]
fn divide_kiwipete() {
    let pos = Position::from_fen(KIWIPETE).unwrap();
    let split = divide(&pos, 2);
    assert_eq!(split.len(), 48);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 2039);
    // Both castles are generated in king-onto-rook form.
    assert!(split.iter().any(|(mv, _)| mv == "e1h1"));
    assert!(split.iter().any(|(mv, _)| mv == "e1a1"));
}
