//! Iterative deepening driver.

use std::time::Instant;

use super::alphabeta::SearchContext;
use super::constants::{
    MAX_SEARCH_DEPTH, VALUE_INFINITE, VALUE_MATE_IN_MAX_PLY, VALUE_ZERO,
};
use super::move_order::pick_move;
use super::{SearchResult, SearchState};
use crate::board::{Board, Move};

/// Search a position for the best move within a depth and wall-clock
/// budget (`time_ms == 0` disables the clock).
///
/// Deepens one ply at a time, re-ordering the root moves so the previous
/// iteration's best is tried first. A result is only committed at depths
/// that completed without hitting the clock, so a timed-out search always
/// reports the last fully searched depth. The board is returned in exactly
/// the state it was given.
pub fn search(board: &mut Board, state: &mut SearchState, max_depth: i32, time_ms: u64) -> SearchResult {
    state.tables.killers.clear();
    state.tables.history.clear();

    let mut result = SearchResult {
        best_move: None,
        score: VALUE_ZERO,
        depth: 0,
        nodes: 0,
    };

    let mut ctx = SearchContext {
        board,
        tables: &mut state.tables,
        nodes: 0,
        start_time: Instant::now(),
        time_limit_ms: time_ms,
        stop_search: false,
    };

    let mut root_moves = ctx.board.generate_moves();

    if root_moves.is_empty() {
        state.nodes = 0;
        return result;
    }

    // A forced reply needs no search
    if root_moves.len() == 1 {
        result.best_move = Some(root_moves.as_slice()[0]);
        state.nodes = 0;
        return result;
    }

    let mut prev_best = Move::none();

    for depth in 1..=max_depth.min(MAX_SEARCH_DEPTH) {
        if ctx.should_stop() {
            break;
        }

        let mut scores = ctx
            .tables
            .score_moves(ctx.board, &root_moves, &prev_best, 0);

        let mut alpha = -VALUE_INFINITE;
        let beta = VALUE_INFINITE;
        let mut best_move = Move::none();
        let mut best_score = -VALUE_INFINITE;

        for i in 0..root_moves.len() {
            pick_move(&mut root_moves, &mut scores, i);
            let m = root_moves.as_slice()[i];

            let info = ctx.board.make_move(&m);
            let score = -ctx.alphabeta(depth - 1, -beta, -alpha, 1, true);
            ctx.board.unmake_move(&m, info);

            if ctx.should_stop() {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = m;

                if score > alpha {
                    alpha = score;
                }
            }
        }

        // Commit only at clean depth boundaries; an interrupted iteration
        // may have searched a misleading subset of the root moves
        if !ctx.should_stop() && !best_move.is_none() {
            result.best_move = Some(best_move);
            result.score = best_score;
            result.depth = depth;
            prev_best = best_move;
        }

        // A forced mate does not get better with more depth
        if best_score >= VALUE_MATE_IN_MAX_PLY || best_score <= -VALUE_MATE_IN_MAX_PLY {
            break;
        }
    }

    result.nodes = ctx.nodes;
    state.nodes = ctx.nodes;
    result
}
