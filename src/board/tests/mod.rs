//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts validating move generation
//! - `draw.rs` - Draw detection (50-move, repetition)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `eval.rs` - Evaluation symmetry and purity
//! - `search.rs` - Search behavior
//! - `search_tables.rs` - Transposition, killer, and history tables
//! - `proptest.rs` - Property-based tests

mod eval;
mod search_tables;
