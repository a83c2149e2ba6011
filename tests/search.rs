/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use gambit::{Board, Color, Game, GameState, Move, Score, Search, SearchConfig, MAX_DEPTH};

fn best_move(fingerprint: &str, depth: usize) -> Move {
    let (board, side) = Board::from_fingerprint(fingerprint).unwrap();
    Search::new(SearchConfig::new(depth))
        .find_best_move(&board, side)
        .unwrap()
        .bestmove
}

#[test]
fn test_finds_back_rank_mate_at_any_depth() {
    let fingerprint = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - -";
    for depth in 1..=4 {
        assert_eq!(
            best_move(fingerprint, depth),
            Move::from_uci("a1a8").unwrap(),
            "missed mate at depth {depth}"
        );
    }
}

#[test]
fn test_black_finds_fools_mate() {
    let mut game = Game::new();
    for mv in ["f2f3", "e7e5", "g2g4"] {
        game.apply_uci(mv).unwrap();
    }

    for depth in 1..=3 {
        let res = game.request_computer_move(SearchConfig::new(depth)).unwrap();
        assert_eq!(res.bestmove, Move::from_uci("d8h4").unwrap());
        assert!(res.score.relative_to(Color::Black).is_mate());
        assert_eq!(res.score.relative_to(Color::Black).moves_to_mate(res.depth), 1);
    }

    let res = game.request_computer_move(SearchConfig::default()).unwrap();
    assert_eq!(game.clone().apply_move(res.bestmove).unwrap(), GameState::Checkmate);
}

#[test]
fn test_avoids_stalemating_when_winning() {
    // Qf7 stalemates; any quiet King or Queen move keeps the win
    let (board, side) = Board::from_fingerprint("7k/8/6K1/8/8/8/8/5Q2 w - -").unwrap();
    let res = Search::new(SearchConfig::new(1))
        .find_best_move(&board, side)
        .unwrap();

    assert_ne!(res.bestmove, Move::from_uci("f1f7").unwrap());
    assert!(res.score > Score::DRAW);
}

#[test]
fn test_prefers_the_quicker_mate() {
    // Qb7 mates at once; plenty of other moves mate a move later
    let res = Search::new(SearchConfig::new(3))
        .find_best_move(
            &Board::from_fingerprint("k7/8/KQ6/8/8/8/8/8 w - -").unwrap().0,
            Color::White,
        )
        .unwrap();

    assert_eq!(res.score.relative_to(Color::White).moves_to_mate(res.depth), 1);
    let mut game = Game::from_fingerprint("k7/8/KQ6/8/8/8/8/8 w - -").unwrap();
    assert_eq!(game.apply_move(res.bestmove).unwrap(), GameState::Checkmate);
}

#[test]
fn test_searches_for_either_side() {
    // Black to move, but White has the mate
    let game = Game::from_fingerprint("6k1/5ppp/8/8/8/8/5PPP/R5K1 b - -").unwrap();

    let res = game
        .request_computer_move_for(Color::White, SearchConfig::new(2))
        .unwrap();
    assert_eq!(res.bestmove, Move::from_uci("a1a8").unwrap());

    let res = game.request_computer_move(SearchConfig::new(2)).unwrap();
    assert!(game.legal_moves_for(Color::Black).contains(&res.bestmove));
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn test_search_is_deterministic() {
    let config = SearchConfig::new(3);
    let game = Game::from_fingerprint(gambit::FINGERPRINT_KIWIPETE).unwrap();

    let first = game.request_computer_move(config).unwrap();
    let second = game.request_computer_move(config).unwrap();
    assert_eq!(first.bestmove, second.bestmove);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}

#[test]
fn test_depth_limits() {
    assert_eq!(SearchConfig::default().depth, 4);
    assert!(MAX_DEPTH >= SearchConfig::default().depth);
}
