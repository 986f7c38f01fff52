use chess_analysis::{random_playout, replay_movetext, san_line, PlayoutConfig};
use chess_core::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn replay_ends_in_expected_position() {
    let text = "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O Nf6 5. d3 O-O";
    let plies = replay_movetext(&Position::new(), text).unwrap();
    assert_eq!(plies.len(), 10);
    assert_eq!(
        plies[9].position.fen(),
        "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 w - - 1 6"
    );
    assert_eq!(plies[6].uci, "e1h1");
}

#[test]
fn random_games_survive_san_round_trip() {
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = PlayoutConfig {
            max_plies: 60,
            ..PlayoutConfig::default()
        };
        let game = random_playout(&Position::new(), &config, &mut rng);

        let text = san_line(&game.start, &game.uci_moves());
        let replayed = replay_movetext(&game.start, &text).unwrap();

        assert_eq!(replayed.len(), game.plies.len());
        assert_eq!(
            replayed.last().map(|p| &p.position),
            game.plies.last().map(|p| &p.position)
        );
    }
}
