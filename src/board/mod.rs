mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError};
pub use search::{
    mated_in, search, HistoryTable, KillerTable, SearchResult, SearchState, SearchTables,
    MAX_SEARCH_DEPTH, VALUE_DRAW, VALUE_INFINITE, VALUE_MATE, VALUE_MATE_IN_MAX_PLY, VALUE_ZERO,
};
pub use state::{Board, NullMoveInfo, UnmakeInfo};
pub use types::{Bitboard, Color, Move, MoveList, Piece, Square, MAX_MOVES, MAX_PLY};

pub(crate) use types::{
    bit_for_square, castle_bit, pop_lsb, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q,
};
