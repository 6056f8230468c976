//! Making and unmaking moves with incremental hash maintenance.

use crate::zobrist::ZOBRIST;

use super::{
    bit_for_square, castle_bit, Board, Color, Move, NullMoveInfo, Piece, Square, UnmakeInfo,
};

impl Board {
    pub(crate) fn current_color(&self) -> Color {
        self.side_to_move()
    }

    pub(crate) fn has_castling_right(&self, color: Color, side: char) -> bool {
        self.castling_rights & castle_bit(color, side) != 0
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq);
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 |= bit;
        self.occupied[c_idx].0 |= bit;
        self.all_occupied.0 |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq);
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 &= !bit;
        self.occupied[c_idx].0 &= !bit;
        self.all_occupied.0 &= !bit;
    }

    /// Piece and color on a square, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = bit_for_square(sq);
        if self.all_occupied.0 & bit == 0 {
            return None;
        }

        let color = if self.occupied[0].0 & bit != 0 {
            Color::White
        } else {
            Color::Black
        };
        let c_idx = color.index();
        for piece in [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            if self.pieces[c_idx][piece.index()].0 & bit != 0 {
                return Some((color, piece));
            }
        }

        None
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.all_occupied.0 & bit_for_square(sq) == 0
    }

    /// Full hash computation from scratch. Used when setting up a position;
    /// make/unmake maintain the hash incrementally afterwards.
    pub(crate) fn calculate_initial_hash(&self) -> u64 {
        let mut hash: u64 = 0;

        for idx in 0..64 {
            let sq = Square::from_index(idx);
            if let Some((color, piece)) = self.piece_at(sq) {
                hash ^= ZOBRIST.piece_keys[color.index()][piece.index()][idx];
            }
        }

        if !self.white_to_move {
            hash ^= ZOBRIST.side_key;
        }

        hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];

        if let Some(ep_square) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant_keys[ep_square.file()];
        }

        hash
    }

    /// Make a move, returning the information `unmake_move` needs to undo it.
    #[allow(clippy::too_many_lines)] // Inherently branchy: every special move type lands here
    pub fn make_move(&mut self, m: &Move) -> UnmakeInfo {
        let previous_hash = self.hash;
        let mut current_hash = self.hash;

        let color = self.current_color();
        let is_white = color == Color::White;

        let previous_en_passant_target = self.en_passant_target;
        let previous_castling_rights = self.castling_rights;
        let previous_halfmove_clock = self.halfmove_clock;

        current_hash ^= ZOBRIST.side_key;
        if let Some(old_ep) = self.en_passant_target {
            current_hash ^= ZOBRIST.en_passant_keys[old_ep.file()];
        }

        let mut captured_piece_info: Option<(Color, Piece)> = None;

        if m.is_en_passant {
            let capture_rank = if is_white { m.to.0 - 1 } else { m.to.0 + 1 };
            let capture_sq = Square(capture_rank, m.to.1);
            captured_piece_info = self.piece_at(capture_sq);
            if let Some((cap_col, cap_piece)) = captured_piece_info {
                self.remove_piece(capture_sq, cap_col, cap_piece);
                current_hash ^=
                    ZOBRIST.piece_keys[cap_col.index()][cap_piece.index()][capture_sq.index()];
            }
        } else if !m.is_castling {
            captured_piece_info = self.piece_at(m.to);
            if let Some((cap_col, cap_piece)) = captured_piece_info {
                self.remove_piece(m.to, cap_col, cap_piece);
                current_hash ^=
                    ZOBRIST.piece_keys[cap_col.index()][cap_piece.index()][m.to.index()];
            }
        }

        let (moving_color, moving_piece) =
            self.piece_at(m.from).expect("make_move: 'from' square empty");

        current_hash ^=
            ZOBRIST.piece_keys[moving_color.index()][moving_piece.index()][m.from.index()];
        self.remove_piece(m.from, moving_color, moving_piece);

        if m.is_castling {
            self.set_piece(m.to, color, Piece::King);
            current_hash ^= ZOBRIST.piece_keys[color.index()][Piece::King.index()][m.to.index()];

            let (rook_from_file, rook_to_file) = if m.to.1 == 6 { (7, 5) } else { (0, 3) };
            let rook_from = Square(m.to.0, rook_from_file);
            let rook_to = Square(m.to.0, rook_to_file);
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            current_hash ^=
                ZOBRIST.piece_keys[color.index()][Piece::Rook.index()][rook_from.index()];
            current_hash ^= ZOBRIST.piece_keys[color.index()][Piece::Rook.index()][rook_to.index()];
        } else {
            let placed_piece = m.promotion.unwrap_or(moving_piece);
            self.set_piece(m.to, color, placed_piece);
            current_hash ^= ZOBRIST.piece_keys[color.index()][placed_piece.index()][m.to.index()];
        }

        self.en_passant_target = None;
        if moving_piece == Piece::Pawn && (m.from.0 as isize - m.to.0 as isize).abs() == 2 {
            let ep_sq = Square(usize::midpoint(m.from.0, m.to.0), m.from.1);
            self.en_passant_target = Some(ep_sq);
            current_hash ^= ZOBRIST.en_passant_keys[ep_sq.file()];
        }

        if moving_piece == Piece::Pawn || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if moving_piece == Piece::King {
            self.castling_rights &= !(castle_bit(color, 'K') | castle_bit(color, 'Q'));
        } else if moving_piece == Piece::Rook {
            let start_rank = if is_white { 0 } else { 7 };
            if m.from == Square(start_rank, 0) {
                self.castling_rights &= !castle_bit(color, 'Q');
            } else if m.from == Square(start_rank, 7) {
                self.castling_rights &= !castle_bit(color, 'K');
            }
        }

        // Capturing a rook on its home square revokes the opponent's right
        if let Some((captured_color, Piece::Rook)) = captured_piece_info {
            let start_rank = if captured_color == Color::White { 0 } else { 7 };
            if m.to == Square(start_rank, 0) {
                self.castling_rights &= !castle_bit(captured_color, 'Q');
            } else if m.to == Square(start_rank, 7) {
                self.castling_rights &= !castle_bit(captured_color, 'K');
            }
        }

        if self.castling_rights != previous_castling_rights {
            current_hash ^= ZOBRIST.castling_keys[previous_castling_rights as usize];
            current_hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
        }

        self.white_to_move = !self.white_to_move;
        self.game_ply += 1;
        self.hash = current_hash;

        let made_hash = current_hash;
        let previous_repetition_count = self.repetition_counts.get(made_hash);
        self.repetition_counts.increment(made_hash);

        UnmakeInfo {
            captured_piece_info,
            previous_en_passant_target,
            previous_castling_rights,
            previous_hash,
            previous_halfmove_clock,
            made_hash,
            previous_repetition_count,
        }
    }

    /// Undo a move made with `make_move`, restoring the prior state exactly.
    pub fn unmake_move(&mut self, m: &Move, info: UnmakeInfo) {
        self.repetition_counts
            .set(info.made_hash, info.previous_repetition_count);

        self.white_to_move = !self.white_to_move;
        self.game_ply -= 1;
        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.hash = info.previous_hash;
        self.halfmove_clock = info.previous_halfmove_clock;

        let color = self.current_color();

        if m.is_castling {
            self.remove_piece(m.to, color, Piece::King);
            self.set_piece(m.from, color, Piece::King);

            let (rook_orig_file, rook_moved_file) = if m.to.1 == 6 { (7, 5) } else { (0, 3) };
            self.remove_piece(Square(m.to.0, rook_moved_file), color, Piece::Rook);
            self.set_piece(Square(m.to.0, rook_orig_file), color, Piece::Rook);
            return;
        }

        let placed_piece = self
            .piece_at(m.to)
            .expect("unmake_move: 'to' square empty")
            .1;
        self.remove_piece(m.to, color, placed_piece);

        // A promotion puts the pawn back, not the promoted piece
        let original_piece = if m.promotion.is_some() {
            Piece::Pawn
        } else {
            placed_piece
        };
        self.set_piece(m.from, color, original_piece);

        if m.is_en_passant {
            let capture_rank = if color == Color::White {
                m.to.0 - 1
            } else {
                m.to.0 + 1
            };
            if let Some((cap_col, cap_piece)) = info.captured_piece_info {
                self.set_piece(Square(capture_rank, m.to.1), cap_col, cap_piece);
            }
        } else if let Some((cap_col, cap_piece)) = info.captured_piece_info {
            self.set_piece(m.to, cap_col, cap_piece);
        }
    }

    /// Pass the turn without moving. Used by null-move pruning only.
    pub(crate) fn make_null_move(&mut self) -> NullMoveInfo {
        let previous_hash = self.hash;
        let previous_en_passant_target = self.en_passant_target;
        let mut current_hash = self.hash;

        current_hash ^= ZOBRIST.side_key;
        if let Some(old_ep) = self.en_passant_target {
            current_hash ^= ZOBRIST.en_passant_keys[old_ep.file()];
        }
        self.en_passant_target = None;
        self.white_to_move = !self.white_to_move;
        self.hash = current_hash;

        NullMoveInfo {
            previous_en_passant_target,
            previous_hash,
        }
    }

    pub(crate) fn unmake_null_move(&mut self, info: NullMoveInfo) {
        self.white_to_move = !self.white_to_move;
        self.en_passant_target = info.previous_en_passant_target;
        self.hash = info.previous_hash;
    }
}
