//! End-to-end search scenarios over the public API.

use std::time::Instant;

use lodestone::board::{search, Board, SearchState, VALUE_MATE_IN_MAX_PLY};

#[test]
fn startpos_returns_a_legal_opening_move() {
    let mut board = Board::new();
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 10, 100);
    let best = result.best_move.expect("startpos has moves");

    let legal = board.generate_moves();
    assert!(legal.iter().any(|m| *m == best));
    // Material is even; only development tempo separates the sides
    assert!(
        result.score.abs() <= 75,
        "startpos score out of band: {}",
        result.score
    );
}

#[test]
fn king_and_pawn_endgame_favors_the_pawn_side() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 10, 500);
    let best = result.best_move.expect("white has moves");
    assert!(board.is_legal(&best));
    assert!(result.score > 0, "pawn-up side should stand better: {}", result.score);
}

#[test]
fn rook_up_endgame_scores_near_the_rook() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 10, 500);
    assert!(result.best_move.is_some());
    assert!(result.score >= 400, "got {}", result.score);
}

#[test]
fn scholars_mate_is_found() {
    let mut board =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 6, 1000);
    let best = result.best_move.expect("white has moves");
    assert_eq!(best.to_string(), "h5f7");
    assert!(result.score >= VALUE_MATE_IN_MAX_PLY);
}

#[test]
fn black_delivers_mate_in_one() {
    let mut board = Board::from_fen("8/8/8/8/8/1k6/3q4/K7 b - - 0 1");
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 4, 500);
    let best = result.best_move.expect("black has moves");
    assert!(
        result.score >= VALUE_MATE_IN_MAX_PLY,
        "mover should see the mate: {}",
        result.score
    );

    board.make_move(&best);
    assert!(board.is_checkmate());
}

#[test]
fn stalemate_returns_no_move() {
    let mut board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 6, 500);
    assert!(result.best_move.is_none());
    assert_eq!(result.score, 0);
    assert_eq!(result.depth, 0);
}

#[test]
fn search_stays_inside_its_time_budget() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mut state = SearchState::new();

    let budget_ms = 200;
    let start = Instant::now();
    let result = search(&mut board, &mut state, 20, budget_ms);
    let elapsed = start.elapsed().as_millis() as u64;

    assert!(
        elapsed < budget_ms + 1800,
        "search overshot its budget: {elapsed}ms"
    );
    assert!(result.best_move.is_some());
    // The board must come back untouched even after a timeout
    assert_eq!(
        board.to_fen(),
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
    );
}

#[test]
fn reported_depth_is_the_last_completed_one() {
    let mut board = Board::new();
    let mut state = SearchState::new();

    let result = search(&mut board, &mut state, 3, 0);
    assert_eq!(result.depth, 3);
    assert!(result.nodes > 0);
}
