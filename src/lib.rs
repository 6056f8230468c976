//! Minimal traditional chess engine.
//!
//! Provides:
//! - Bitboard-based board representation with incremental Zobrist hashing
//! - Material + piece-square-table evaluation
//! - Negamax alpha-beta search with quiescence, null-move pruning,
//!   a transposition table, and killer/history move ordering
//! - Iterative deepening under a wall-clock budget
//!
//! # Quick Start
//!
//! ```
//! use lodestone::board::{search, Board, SearchState};
//!
//! // Search the starting position for 100 milliseconds.
//! let mut board = Board::new();
//! let mut state = SearchState::new();
//! let result = search(&mut board, &mut state, 10, 100);
//!
//! if let Some(best) = result.best_move {
//!     println!("best {} score {} depth {}", best, result.score, result.depth);
//! }
//! ```
//!
//! # Building Positions
//!
//! ```
//! use lodestone::board::Board;
//!
//! // From FEN notation
//! let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//! assert!(!board.white_to_move());
//! ```
//!
//! # Features
//!
//! - `serde` - Enable serialization for `Piece`, `Color`, `Square`, and `Move`

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Large arrays are needed for move lists and attack tables
#![allow(clippy::large_stack_arrays)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod tt;
mod zobrist;
