//! Move generation.
//!
//! Pseudolegal generation per piece type, with three public flavors:
//! `generate_moves` (fully legal), `generate_captures` (pseudolegal
//! captures and promotions), and `generate_evasions` (pseudolegal check
//! evasions). Callers of the pseudolegal flavors gate with `is_legal`.

use super::attack_tables::{slider_attacks, BETWEEN, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::{bit_for_square, pop_lsb, Board, Color, Move, MoveList, Piece, Square};

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Board {
    fn create_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        is_castling: bool,
        is_en_passant: bool,
    ) -> Move {
        let captured_piece = if is_en_passant {
            Some(Piece::Pawn)
        } else if is_castling {
            None
        } else {
            self.piece_at(to).map(|(_, p)| p)
        };

        Move {
            from,
            to,
            promotion,
            is_castling,
            is_en_passant,
            captured_piece,
        }
    }

    fn push_pawn_move(&self, moves: &mut MoveList, from: Square, to: Square, promotion_rank: usize) {
        if to.0 == promotion_rank {
            for promo in PROMOTION_PIECES {
                moves.push(self.create_move(from, to, Some(promo), false, false));
            }
        } else {
            moves.push(self.create_move(from, to, None, false, false));
        }
    }

    fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let dir: isize = if color == Color::White { 1 } else { -1 };
        let start_rank = if color == Color::White { 1 } else { 6 };
        let promotion_rank = if color == Color::White { 7 } else { 0 };

        let r = from.0 as isize;
        let forward_r = r + dir;
        if !(0..8).contains(&forward_r) {
            return;
        }

        let forward_sq = Square(forward_r as usize, from.1);
        if self.is_empty_square(forward_sq) {
            self.push_pawn_move(moves, from, forward_sq, promotion_rank);
            if r == start_rank {
                let double_sq = Square((r + 2 * dir) as usize, from.1);
                if forward_sq.0 != promotion_rank && self.is_empty_square(double_sq) {
                    moves.push(self.create_move(from, double_sq, None, false, false));
                }
            }
        }

        self.generate_pawn_captures(from, moves);
    }

    fn generate_pawn_captures(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let dir: isize = if color == Color::White { 1 } else { -1 };
        let promotion_rank = if color == Color::White { 7 } else { 0 };

        let forward_r = from.0 as isize + dir;
        if !(0..8).contains(&forward_r) {
            return;
        }

        for df in [-1isize, 1] {
            let capture_f = from.1 as isize + df;
            if !(0..8).contains(&capture_f) {
                continue;
            }
            let target_sq = Square(forward_r as usize, capture_f as usize);
            if let Some((target_color, _)) = self.piece_at(target_sq) {
                if target_color != color {
                    self.push_pawn_move(moves, from, target_sq, promotion_rank);
                }
            } else if Some(target_sq) == self.en_passant_target {
                moves.push(self.create_move(from, target_sq, None, false, true));
            }
        }
    }

    fn generate_leaper_moves(
        &self,
        from: Square,
        table: &[u64; 64],
        target_mask: u64,
        moves: &mut MoveList,
    ) {
        let own_occ = self.occupied[self.current_color().index()].0;
        let mut targets = table[from.index()] & !own_occ & target_mask;
        while targets != 0 {
            let to = Square::from_index(pop_lsb(&mut targets));
            moves.push(self.create_move(from, to, None, false, false));
        }
    }

    fn generate_slider_moves(
        &self,
        from: Square,
        piece: Piece,
        target_mask: u64,
        moves: &mut MoveList,
    ) {
        let own_occ = self.occupied[self.current_color().index()].0;
        let from_idx = from.index();
        let attacks = match piece {
            Piece::Bishop => slider_attacks(from_idx, self.all_occupied.0, true),
            Piece::Rook => slider_attacks(from_idx, self.all_occupied.0, false),
            _ => {
                slider_attacks(from_idx, self.all_occupied.0, true)
                    | slider_attacks(from_idx, self.all_occupied.0, false)
            }
        };
        let mut targets = attacks & !own_occ & target_mask;
        while targets != 0 {
            let to = Square::from_index(pop_lsb(&mut targets));
            moves.push(self.create_move(from, to, None, false, false));
        }
    }

    fn generate_castling_moves(&self, moves: &mut MoveList) {
        let color = self.current_color();
        let back_rank = if color == Color::White { 0 } else { 7 };
        let king_from = Square(back_rank, 4);
        if self.piece_at(king_from) != Some((color, Piece::King)) {
            return;
        }

        if self.has_castling_right(color, 'K')
            && self.is_empty_square(Square(back_rank, 5))
            && self.is_empty_square(Square(back_rank, 6))
            && self.piece_at(Square(back_rank, 7)) == Some((color, Piece::Rook))
        {
            moves.push(self.create_move(king_from, Square(back_rank, 6), None, true, false));
        }
        if self.has_castling_right(color, 'Q')
            && self.is_empty_square(Square(back_rank, 1))
            && self.is_empty_square(Square(back_rank, 2))
            && self.is_empty_square(Square(back_rank, 3))
            && self.piece_at(Square(back_rank, 0)) == Some((color, Piece::Rook))
        {
            moves.push(self.create_move(king_from, Square(back_rank, 2), None, true, false));
        }
    }

    fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let c_idx = self.current_color().index();

        let mut pawns = self.pieces[c_idx][Piece::Pawn.index()].0;
        while pawns != 0 {
            let from = Square::from_index(pop_lsb(&mut pawns));
            self.generate_pawn_moves(from, &mut moves);
        }

        let mut knights = self.pieces[c_idx][Piece::Knight.index()].0;
        while knights != 0 {
            let from = Square::from_index(pop_lsb(&mut knights));
            self.generate_leaper_moves(from, &KNIGHT_ATTACKS, !0, &mut moves);
        }

        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            let mut sliders = self.pieces[c_idx][piece.index()].0;
            while sliders != 0 {
                let from = Square::from_index(pop_lsb(&mut sliders));
                self.generate_slider_moves(from, piece, !0, &mut moves);
            }
        }

        let mut kings = self.pieces[c_idx][Piece::King.index()].0;
        while kings != 0 {
            let from = Square::from_index(pop_lsb(&mut kings));
            self.generate_leaper_moves(from, &KING_ATTACKS, !0, &mut moves);
        }

        self.generate_castling_moves(&mut moves);
        moves
    }

    /// All legal moves for the side to move.
    pub fn generate_moves(&mut self) -> MoveList {
        let current_color = self.current_color();
        let opponent_color = current_color.opponent();
        let pseudo_moves = self.generate_pseudo_moves();
        let mut legal_moves = MoveList::new();

        for m in &pseudo_moves {
            if m.is_castling {
                // The king may not castle out of, through, or into check
                let mid_sq = Square(m.from.0, (m.from.1 + m.to.1) / 2);
                if self.is_square_attacked(m.from, opponent_color)
                    || self.is_square_attacked(mid_sq, opponent_color)
                    || self.is_square_attacked(m.to, opponent_color)
                {
                    continue;
                }
            }

            let info = self.make_move(m);
            if !self.is_in_check(current_color) {
                legal_moves.push(*m);
            }
            self.unmake_move(m, info);
        }
        legal_moves
    }

    /// Pseudolegal captures, en passant, and promotions. Callers must gate
    /// each move with `is_legal` before making it.
    pub fn generate_captures(&self) -> MoveList {
        let mut moves = MoveList::new();
        let c_idx = self.current_color().index();
        let opp_occ = self.occupied[1 - c_idx].0;

        let mut pawns = self.pieces[c_idx][Piece::Pawn.index()].0;
        while pawns != 0 {
            let from = Square::from_index(pop_lsb(&mut pawns));
            self.generate_pawn_tactical_moves(from, &mut moves);
        }

        let mut knights = self.pieces[c_idx][Piece::Knight.index()].0;
        while knights != 0 {
            let from = Square::from_index(pop_lsb(&mut knights));
            self.generate_leaper_moves(from, &KNIGHT_ATTACKS, opp_occ, &mut moves);
        }

        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            let mut sliders = self.pieces[c_idx][piece.index()].0;
            while sliders != 0 {
                let from = Square::from_index(pop_lsb(&mut sliders));
                self.generate_slider_moves(from, piece, opp_occ, &mut moves);
            }
        }

        let mut kings = self.pieces[c_idx][Piece::King.index()].0;
        while kings != 0 {
            let from = Square::from_index(pop_lsb(&mut kings));
            self.generate_leaper_moves(from, &KING_ATTACKS, opp_occ, &mut moves);
        }

        moves
    }

    /// Pawn captures plus promotion pushes.
    fn generate_pawn_tactical_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let dir: isize = if color == Color::White { 1 } else { -1 };
        let promotion_rank = if color == Color::White { 7 } else { 0 };

        let forward_r = from.0 as isize + dir;
        if !(0..8).contains(&forward_r) {
            return;
        }

        let forward_sq = Square(forward_r as usize, from.1);
        if forward_sq.0 == promotion_rank && self.is_empty_square(forward_sq) {
            self.push_pawn_move(moves, from, forward_sq, promotion_rank);
        }

        self.generate_pawn_captures(from, moves);
    }

    /// Pseudolegal check evasions: king steps, and on single check also
    /// captures of the checker and interpositions. Callers must gate each
    /// move with `is_legal` (pins are not accounted for here).
    pub fn generate_evasions(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.current_color();
        let c_idx = color.index();
        let Some(king_sq) = self.king_square(color) else {
            return moves;
        };

        self.generate_leaper_moves(king_sq, &KING_ATTACKS, !0, &mut moves);

        let checkers = self.checkers();
        if checkers.count_ones() != 1 {
            // Double check: only the king can move
            return moves;
        }

        let checker_idx = checkers.trailing_zeros() as usize;
        let checker_sq = Square::from_index(checker_idx);
        let block_mask = BETWEEN[king_sq.index()][checker_idx];
        let target_mask = checkers | block_mask;

        let mut knights = self.pieces[c_idx][Piece::Knight.index()].0;
        while knights != 0 {
            let from = Square::from_index(pop_lsb(&mut knights));
            self.generate_leaper_moves(from, &KNIGHT_ATTACKS, target_mask, &mut moves);
        }

        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            let mut sliders = self.pieces[c_idx][piece.index()].0;
            while sliders != 0 {
                let from = Square::from_index(pop_lsb(&mut sliders));
                self.generate_slider_moves(from, piece, target_mask, &mut moves);
            }
        }

        let dir: isize = if color == Color::White { 1 } else { -1 };
        let start_rank = if color == Color::White { 1 } else { 6 };
        let promotion_rank = if color == Color::White { 7 } else { 0 };

        let mut pawns = self.pieces[c_idx][Piece::Pawn.index()].0;
        while pawns != 0 {
            let from = Square::from_index(pop_lsb(&mut pawns));

            // Capture the checking piece
            if PAWN_ATTACKS[c_idx][from.index()] & checkers != 0 {
                self.push_pawn_move(&mut moves, from, checker_sq, promotion_rank);
            }

            // Interpose by pushing
            let forward_r = from.0 as isize + dir;
            if (0..8).contains(&forward_r) {
                let forward_sq = Square(forward_r as usize, from.1);
                if self.is_empty_square(forward_sq) {
                    if block_mask & bit_for_square(forward_sq) != 0 {
                        self.push_pawn_move(&mut moves, from, forward_sq, promotion_rank);
                    }
                    if from.0 == start_rank {
                        let double_sq = Square((from.0 as isize + 2 * dir) as usize, from.1);
                        if self.is_empty_square(double_sq)
                            && block_mask & bit_for_square(double_sq) != 0
                        {
                            moves.push(self.create_move(from, double_sq, None, false, false));
                        }
                    }
                }
            }

            // En passant removes the checking pawn
            if let Some(ep_sq) = self.en_passant_target {
                let captured_rank = if color == Color::White {
                    ep_sq.0 - 1
                } else {
                    ep_sq.0 + 1
                };
                if Square(captured_rank, ep_sq.1) == checker_sq
                    && PAWN_ATTACKS[c_idx][from.index()] & bit_for_square(ep_sq) != 0
                {
                    moves.push(self.create_move(from, ep_sq, None, false, true));
                }
            }
        }

        moves
    }

    /// Bitboard of the given color's pieces attacking a square.
    pub(crate) fn attackers_to(&self, square: Square, attacker_color: Color) -> u64 {
        let target_idx = square.index();
        let c_idx = attacker_color.index();
        let mut attackers = 0u64;

        // A pawn attacks this square iff a pawn of the other color standing
        // here would attack the pawn's square
        attackers |= PAWN_ATTACKS[attacker_color.opponent().index()][target_idx]
            & self.pieces[c_idx][Piece::Pawn.index()].0;
        attackers |= KNIGHT_ATTACKS[target_idx] & self.pieces[c_idx][Piece::Knight.index()].0;
        attackers |= KING_ATTACKS[target_idx] & self.pieces[c_idx][Piece::King.index()].0;

        let rook_like =
            self.pieces[c_idx][Piece::Rook.index()].0 | self.pieces[c_idx][Piece::Queen.index()].0;
        let bishop_like = self.pieces[c_idx][Piece::Bishop.index()].0
            | self.pieces[c_idx][Piece::Queen.index()].0;
        attackers |= slider_attacks(target_idx, self.all_occupied.0, false) & rook_like;
        attackers |= slider_attacks(target_idx, self.all_occupied.0, true) & bishop_like;

        attackers
    }

    pub(crate) fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        self.attackers_to(square, attacker_color) != 0
    }

    pub(crate) fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][Piece::King.index()].0;
        if kings == 0 {
            None
        } else {
            Some(Square::from_index(kings.trailing_zeros() as usize))
        }
    }

    /// Bitboard of opposing pieces giving check to the side to move.
    #[must_use]
    pub fn checkers(&self) -> u64 {
        let color = self.current_color();
        match self.king_square(color) {
            Some(king_sq) => self.attackers_to(king_sq, color.opponent()),
            None => 0,
        }
    }

    pub(crate) fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }

    /// Whether a pseudolegal move leaves the mover's king safe.
    pub fn is_legal(&mut self, m: &Move) -> bool {
        let color = self.current_color();
        let info = self.make_move(m);
        let legal = !self.is_in_check(color);
        self.unmake_move(m, info);
        legal
    }

    /// Side to move is in check with no legal reply.
    pub fn is_checkmate(&mut self) -> bool {
        let color = self.current_color();
        self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// Side to move has no legal reply but is not in check.
    pub fn is_stalemate(&mut self) -> bool {
        let color = self.current_color();
        !self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree to the given depth.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for m in &moves {
            let info = self.make_move(m);
            nodes += self.perft(depth - 1);
            self.unmake_move(m, info);
        }

        nodes
    }
}
