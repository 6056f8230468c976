//! Search constants: score bounds and ordering priorities.

use super::super::MAX_PLY;

pub const VALUE_ZERO: i32 = 0;
pub const VALUE_DRAW: i32 = 0;

/// Largest finite score; a forced mate found at ply 0
pub const VALUE_MATE: i32 = 32000;

/// Strictly above any representable score
pub const VALUE_INFINITE: i32 = VALUE_MATE + 1;

/// Scores with absolute value at or above this denote a forced mate
pub const VALUE_MATE_IN_MAX_PLY: i32 = VALUE_MATE - MAX_PLY as i32;

/// Score for the side to move being mated at the given ply. Encodes
/// distance to mate so shallower mates dominate deeper ones.
#[inline]
#[must_use]
pub const fn mated_in(ply: usize) -> i32 {
    -(VALUE_MATE - ply as i32)
}

// Move ordering priorities. Higher scores are tried earlier:
// TT move > captures > killers > history.

/// Hash move (from transposition table) - highest priority
pub const TT_MOVE_SCORE: i32 = 1_000_000;

/// Base score for captures; the MVV-LVA entry is added on top, scaled
pub const CAPTURE_SCORE: i32 = 900_000;

/// Scale applied to the MVV-LVA matrix entry
pub const MVV_LVA_SCALE: i32 = 1000;

/// First killer move (quiet that caused a beta cutoff at the same ply)
pub const KILLER1_SCORE: i32 = 800_000;

/// Second killer move (displaced killer)
pub const KILLER2_SCORE: i32 = 799_000;

/// Iterative deepening never exceeds this depth regardless of the caller's cap
pub const MAX_SEARCH_DEPTH: i32 = 20;

/// The wall clock is sampled once per this many nodes
pub const CLOCK_POLL_NODES: u64 = 2048;
