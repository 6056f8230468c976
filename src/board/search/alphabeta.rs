//! The negamax alpha-beta search.

use std::time::Instant;

use super::constants::{
    mated_in, CLOCK_POLL_NODES, VALUE_DRAW, VALUE_INFINITE, VALUE_ZERO,
};
use super::move_order::pick_move;
use super::SearchTables;
use crate::board::{Board, Move, MAX_PLY};

/// Mutable state of one `search` invocation: the borrowed board and
/// tables, the node counter, and the clock.
pub(crate) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub tables: &'a mut SearchTables,
    pub nodes: u64,
    pub start_time: Instant,
    /// Wall-clock budget in milliseconds; 0 disables the clock
    pub time_limit_ms: u64,
    pub stop_search: bool,
}

impl SearchContext<'_> {
    /// True once the time budget is exhausted. The clock is sampled only
    /// every `CLOCK_POLL_NODES` nodes; once it fires, the flag latches.
    pub(crate) fn should_stop(&mut self) -> bool {
        if self.stop_search {
            return true;
        }
        if self.time_limit_ms > 0 && self.nodes % CLOCK_POLL_NODES == 0 {
            let elapsed = self.start_time.elapsed().as_millis() as u64;
            if elapsed >= self.time_limit_ms {
                self.stop_search = true;
            }
        }
        self.stop_search
    }

    /// Negamax alpha-beta. Returns the score of the position from the side
    /// to move's perspective; after a time-out the return value is stale
    /// and the driver discards it.
    pub(crate) fn alphabeta(
        &mut self,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        allow_null: bool,
    ) -> i32 {
        if self.should_stop() {
            return VALUE_ZERO;
        }

        if ply > MAX_PLY - 1 {
            return self.board.evaluate();
        }

        if depth <= 0 {
            return self.qsearch(alpha, beta, ply);
        }

        self.nodes += 1;

        // Draws are only scored below the root; the root must produce a move
        if ply > 0 && (self.board.is_repetition() || self.board.halfmove_clock() >= 100) {
            return VALUE_DRAW;
        }

        let in_check = self.board.checkers() != 0;
        let original_alpha = alpha;

        let key = self.board.hash();
        let (tt_move, tt_cutoff) = self.tables.tt.probe(key, depth, alpha, beta);
        if let Some(value) = tt_cutoff {
            return value;
        }

        // Null move pruning: hand the opponent a free move and see whether
        // the position still fails high. Skipped in check and never twice
        // in a row.
        if allow_null && !in_check && depth >= 3 && ply > 0 {
            let info = self.board.make_null_move();
            let null_score = -self.alphabeta(depth - 3, -beta, -beta + 1, ply + 1, false);
            self.board.unmake_null_move(info);

            if null_score >= beta {
                return beta;
            }
        }

        let mut moves = self.board.generate_moves();
        if moves.is_empty() {
            return if in_check {
                mated_in(ply)
            } else {
                VALUE_DRAW
            };
        }

        let mut scores = self.tables.score_moves(self.board, &moves, &tt_move, ply);

        let mut best_score = -VALUE_INFINITE;
        let mut best_move = Move::none();

        for i in 0..moves.len() {
            pick_move(&mut moves, &mut scores, i);
            let m = moves.as_slice()[i];

            let info = self.board.make_move(&m);
            let score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true);
            self.board.unmake_move(&m, info);

            if self.should_stop() {
                return best_score;
            }

            if score > best_score {
                best_score = score;
                best_move = m;

                if score > alpha {
                    alpha = score;

                    if alpha >= beta {
                        if !m.is_capture() {
                            self.tables.killers.push(ply, m);
                            self.tables.history.add(
                                self.board.side_to_move(),
                                m.from.index(),
                                m.to.index(),
                                depth,
                            );
                        }
                        break;
                    }
                }
            }
        }

        self.tables
            .tt
            .store(key, best_move, best_score, depth, original_alpha, beta);

        best_score
    }
}
