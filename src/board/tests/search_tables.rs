//! Unit tests for the transposition, killer, and history tables and for
//! move-ordering scores.

use crate::board::{
    search, Board, Color, HistoryTable, KillerTable, Move, SearchState, Square,
};
use crate::tt::TranspositionTable;

fn quiet_move(from: Square, to: Square) -> Move {
    Move {
        from,
        to,
        promotion: None,
        is_castling: false,
        is_en_passant: false,
        captured_piece: None,
    }
}

// ============================================================================
// Transposition table
// ============================================================================

#[test]
fn tt_miss_on_fresh_table() {
    let tt = TranspositionTable::new();
    let (mv, cutoff) = tt.probe(0xDEAD_BEEF, 1, -100, 100);
    assert!(mv.is_none());
    assert!(cutoff.is_none());
}

#[test]
fn tt_exact_hit_returns_stored_value() {
    let mut tt = TranspositionTable::new();
    let mv = quiet_move(Square::new(1, 4), Square::new(3, 4));
    // alpha < value < beta at store time: exact bound
    tt.store(42, mv, 17, 5, -100, 100);

    let (tt_move, cutoff) = tt.probe(42, 5, -100, 100);
    assert_eq!(tt_move, mv);
    assert_eq!(cutoff, Some(17));
}

#[test]
fn tt_shallow_entry_gives_move_but_no_cutoff() {
    let mut tt = TranspositionTable::new();
    let mv = quiet_move(Square::new(1, 4), Square::new(3, 4));
    tt.store(42, mv, 17, 3, -100, 100);

    let (tt_move, cutoff) = tt.probe(42, 5, -100, 100);
    assert_eq!(tt_move, mv);
    assert!(cutoff.is_none());
}

#[test]
fn tt_lower_bound_cuts_at_beta() {
    let mut tt = TranspositionTable::new();
    let mv = quiet_move(Square::new(0, 1), Square::new(2, 2));
    // value >= beta at store time: lower bound
    tt.store(7, mv, 250, 4, -100, 200);

    // Probing with beta below the bound cuts, and returns beta itself
    let (_, cutoff) = tt.probe(7, 4, -50, 240);
    assert_eq!(cutoff, Some(240));

    // With beta above the stored value there is no cutoff
    let (_, cutoff) = tt.probe(7, 4, -50, 300);
    assert!(cutoff.is_none());
}

#[test]
fn tt_upper_bound_cuts_at_alpha() {
    let mut tt = TranspositionTable::new();
    let mv = quiet_move(Square::new(0, 1), Square::new(2, 2));
    // value <= original alpha at store time: upper bound
    tt.store(9, mv, -80, 4, -50, 100);

    let (_, cutoff) = tt.probe(9, 4, -60, 100);
    assert_eq!(cutoff, Some(-60));

    let (_, cutoff) = tt.probe(9, 4, -200, 100);
    assert!(cutoff.is_none());
}

#[test]
fn tt_collision_overwrites() {
    let mut tt = TranspositionTable::new();
    let mv1 = quiet_move(Square::new(1, 4), Square::new(3, 4));
    let mv2 = quiet_move(Square::new(1, 3), Square::new(3, 3));

    // Two keys mapping to the same slot: the second wins
    let key1 = 0x123;
    let key2 = key1 + (1u64 << 20);
    tt.store(key1, mv1, 10, 4, -100, 100);
    tt.store(key2, mv2, 20, 2, -100, 100);

    let (mv, _) = tt.probe(key1, 1, -100, 100);
    assert!(mv.is_none(), "old entry should have been evicted");
    let (mv, cutoff) = tt.probe(key2, 2, -100, 100);
    assert_eq!(mv, mv2);
    assert_eq!(cutoff, Some(20));
}

#[test]
fn tt_clear_empties_the_table() {
    let mut tt = TranspositionTable::new();
    let mv = quiet_move(Square::new(1, 4), Square::new(3, 4));
    tt.store(42, mv, 17, 5, -100, 100);
    tt.clear();
    let (mv, cutoff) = tt.probe(42, 1, -100, 100);
    assert!(mv.is_none());
    assert!(cutoff.is_none());
}

#[test]
fn tt_persists_across_searches() {
    let mut board = Board::new();
    let mut state = SearchState::new();

    let _ = search(&mut board, &mut state, 4, 0);

    // Positions one ply in were searched and cached; a later search call
    // must still see them (the table is never cleared between searches)
    let count_cached = |board: &mut Board, state: &SearchState| {
        let moves = board.generate_moves();
        let mut cached = 0;
        for m in &moves {
            let info = board.make_move(m);
            let (tt_move, _) = state.tables.tt.probe(board.hash(), 0, -100, 100);
            if !tt_move.is_none() {
                cached += 1;
            }
            board.unmake_move(m, info);
        }
        cached
    };

    assert!(count_cached(&mut board, &state) > 0);
    let _ = search(&mut board, &mut state, 2, 0);
    assert!(count_cached(&mut board, &state) > 0);
}

// ============================================================================
// Killer table
// ============================================================================

#[test]
fn killer_push_shifts_slots() {
    let mut killers = KillerTable::new();
    let m1 = quiet_move(Square::new(0, 0), Square::new(1, 0));
    let m2 = quiet_move(Square::new(0, 1), Square::new(1, 1));

    killers.push(3, m1);
    assert_eq!(killers.primary(3), m1);

    killers.push(3, m2);
    assert_eq!(killers.primary(3), m2);
    assert_eq!(killers.secondary(3), m1);
}

#[test]
fn killer_push_ignores_duplicate() {
    let mut killers = KillerTable::new();
    let m1 = quiet_move(Square::new(0, 0), Square::new(1, 0));

    killers.push(3, m1);
    killers.push(3, m1);
    assert_eq!(killers.primary(3), m1);
    assert!(killers.secondary(3).is_none(), "duplicate must not shift");
}

#[test]
fn killer_out_of_bounds_ply_is_safe() {
    let mut killers = KillerTable::new();
    let m1 = quiet_move(Square::new(0, 0), Square::new(1, 0));
    killers.push(1000, m1);
    assert!(killers.primary(1000).is_none());
    assert!(killers.secondary(1000).is_none());
}

#[test]
fn killers_cleared_between_searches() {
    let mut board = Board::new();
    let mut state = SearchState::new();
    let _ = search(&mut board, &mut state, 5, 0);

    // Force a killer and verify the next search starts clean
    let m1 = quiet_move(Square::new(0, 0), Square::new(1, 0));
    state.tables.killers.push(0, m1);
    let _ = search(&mut board, &mut state, 1, 0);
    assert_ne!(state.tables.killers.primary(0), m1);
}

// ============================================================================
// History table
// ============================================================================

#[test]
fn history_accumulates_quadratically() {
    let mut history = HistoryTable::new();
    history.add(Color::White, 12, 28, 3);
    assert_eq!(history.score(Color::White, 12, 28), 9);
    history.add(Color::White, 12, 28, 5);
    assert_eq!(history.score(Color::White, 12, 28), 34);
    // Per-color separation
    assert_eq!(history.score(Color::Black, 12, 28), 0);
}

#[test]
fn history_saturates_instead_of_overflowing() {
    let mut history = HistoryTable::new();
    for _ in 0..100_000 {
        history.add(Color::White, 0, 8, 20);
    }
    assert!(history.score(Color::White, 0, 8) > 0);
}

#[test]
fn history_clear_resets_scores() {
    let mut history = HistoryTable::new();
    history.add(Color::Black, 1, 2, 4);
    history.clear();
    assert_eq!(history.score(Color::Black, 1, 2), 0);
}

// ============================================================================
// Move ordering scores
// ============================================================================

#[test]
fn ordering_prefers_tt_move_then_captures_then_killers() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
    let state = SearchState::new();
    let moves = board.generate_moves();

    let capture = moves
        .iter()
        .find(|m| m.is_capture())
        .copied()
        .expect("exd5 available");
    let quiet = moves
        .iter()
        .find(|m| !m.is_capture())
        .copied()
        .expect("quiet move available");

    let tt_score = state
        .tables
        .score_move(&board, &quiet, &quiet, 0);
    let capture_score = state
        .tables
        .score_move(&board, &capture, &Move::none(), 0);
    let quiet_score = state
        .tables
        .score_move(&board, &quiet, &Move::none(), 0);

    assert!(tt_score > capture_score, "TT move outranks captures");
    assert!(capture_score > quiet_score, "captures outrank quiets");
}

#[test]
fn capture_scores_follow_ordering_matrix() {
    // White pawn on d4 can take either the rook on c5 or the knight on e5
    let mut board = Board::from_fen("4k3/8/8/2r1n3/3P4/8/8/4K3 w - - 0 1");
    let state = SearchState::new();
    let moves = board.generate_moves();

    let takes_rook = moves
        .iter()
        .find(|m| m.to.to_string() == "c5")
        .copied()
        .expect("dxc5 available");
    let takes_knight = moves
        .iter()
        .find(|m| m.to.to_string() == "e5")
        .copied()
        .expect("dxe5 available");

    // Pawn-attacker row of the matrix: knight victim 14, rook victim 12
    let rook_score = state.tables.score_move(&board, &takes_rook, &Move::none(), 0);
    let knight_score = state
        .tables
        .score_move(&board, &takes_knight, &Move::none(), 0);
    assert_eq!(rook_score, 900_000 + 12 * 1000);
    assert_eq!(knight_score, 900_000 + 14 * 1000);
}
