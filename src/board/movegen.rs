/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, Move, MoveList, Piece, PieceKind, Square};

/// `(file, rank)` offsets a Knight jumps by.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// `(file, rank)` offsets of the eight squares around a King.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Directions a Rook slides in.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Directions a Bishop slides in.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

impl Board {
    /// Generates every pseudo-legal move of the piece on `square`.
    ///
    /// Pseudo-legal moves follow the piece's movement pattern and the board's occupancy,
    /// but may leave the mover's own King in check. Castling appears here whenever the
    /// King, Rook and empty squares allow it; whether the King is safe is checked later.
    ///
    /// If `square` is empty, the list is empty.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.pseudo_legal_moves_from(Square::B1).len(), 2);
    /// assert_eq!(board.pseudo_legal_moves_from(Square::E2).len(), 2);
    /// assert!(board.pseudo_legal_moves_from(Square::E4).is_empty());
    /// ```
    pub fn pseudo_legal_moves_from(&self, square: Square) -> MoveList {
        let mut moves = MoveList::new();

        let Some(piece) = self.piece_at(square) else {
            return moves;
        };

        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(square, piece, &mut moves),
            PieceKind::Knight => self.generate_leaper_moves(square, piece, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => self.generate_slider_moves(square, piece, &DIAGONALS, &mut moves),
            PieceKind::Rook => self.generate_slider_moves(square, piece, &ORTHOGONALS, &mut moves),
            PieceKind::Queen => {
                self.generate_slider_moves(square, piece, &ORTHOGONALS, &mut moves);
                self.generate_slider_moves(square, piece, &DIAGONALS, &mut moves);
            }
            PieceKind::King => {
                self.generate_leaper_moves(square, piece, &KING_OFFSETS, &mut moves);
                self.generate_castling_moves(square, piece, &mut moves);
            }
        }

        moves
    }

    /// Returns `true` if `square` holds a piece of the opposite color to `color`.
    #[inline(always)]
    fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color != color)
    }

    /// Returns `true` if `square` is empty or holds a piece of the opposite color to `color`.
    #[inline(always)]
    fn is_enemy_or_empty(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).map_or(true, |p| p.color != color)
    }

    fn generate_pawn_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        let color = piece.color;
        let start_rank = Square::A2.rank_relative_to(color).rank();
        // Only a pawn standing here can capture onto the en passant target
        let ep_rank = Square::A5.rank_relative_to(color).rank();

        if let Some(single) = from.forward_by(color, 1).filter(|&to| !self.has(to)) {
            push_pawn_move(from, single, color, moves);

            if from.rank() == start_rank {
                if let Some(double) = from.forward_by(color, 2).filter(|&to| !self.has(to)) {
                    moves.push(Move::new(from, double));
                }
            }
        }

        for file_delta in [-1, 1] {
            let Some(to) = from.offset(file_delta, color.negation_multiplier()) else {
                continue;
            };

            if self.is_enemy(to, color)
                || (self.ep_square() == Some(to) && from.rank() == ep_rank)
            {
                push_pawn_move(from, to, color, moves);
            }
        }
    }

    fn generate_leaper_moves(
        &self,
        from: Square,
        piece: Piece,
        offsets: &[(i8, i8)],
        moves: &mut MoveList,
    ) {
        for &(df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                if self.is_enemy_or_empty(to, piece.color) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn generate_slider_moves(
        &self,
        from: Square,
        piece: Piece,
        directions: &[(i8, i8)],
        moves: &mut MoveList,
    ) {
        for &(df, dr) in directions {
            let mut ray = from.offset(df, dr);

            while let Some(to) = ray {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(occupant) => {
                        if occupant.color != piece.color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }

                ray = to.offset(df, dr);
            }
        }
    }

    /// Castling candidates: the King and Rook are unmoved and at home, the right is held,
    /// and every square between them is empty.
    fn generate_castling_moves(&self, from: Square, king: Piece, moves: &mut MoveList) {
        let color = king.color;
        if king.has_moved || from != Square::king_home(color) {
            return;
        }

        let rights = self.castling_rights(color);
        let candidates = [
            (
                rights.short,
                Square::rook_short_home(color),
                Square::king_short_castle(color),
            ),
            (
                rights.long,
                Square::rook_long_home(color),
                Square::king_long_castle(color),
            ),
        ];

        for (allowed, rook_square, to) in candidates {
            let rook_ready = self
                .piece_at(rook_square)
                .is_some_and(|r| r.is_rook() && r.color == color && !r.has_moved);

            if allowed && rook_ready && self.is_clear_between(from, rook_square) {
                moves.push(Move::new(from, to));
            }
        }
    }

    /// Returns `true` if every square strictly between `a` and `b` on the same rank is empty.
    fn is_clear_between(&self, a: Square, b: Square) -> bool {
        let (lo, hi) = (a.file().min(b.file()), a.file().max(b.file()));
        (lo + 1..hi).all(|file| !self.has(Square::new_unchecked(a.rank(), file)))
    }
}

/// Pushes a pawn move, expanding it into every promotion if it reaches the last rank.
fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut MoveList) {
    if to.rank() == Square::A8.rank_relative_to(color).rank() {
        moves.extend(
            PieceKind::PROMOTIONS
                .into_iter()
                .map(|kind| Move::with_promotion(from, to, kind)),
        );
    } else {
        moves.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_from(fingerprint: &str, square: Square) -> Vec<String> {
        let (board, _) = Board::from_fingerprint(fingerprint).unwrap();
        let mut moves: Vec<String> = board
            .pseudo_legal_moves_from(square)
            .iter()
            .map(|mv| mv.to_string())
            .collect();
        moves.sort();
        moves
    }

    #[test]
    fn test_pawn_promotions_in_order() {
        let (board, _) = Board::from_fingerprint("1n2k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
        let moves: Vec<String> = board
            .pseudo_legal_moves_from(Square::A7)
            .iter()
            .map(|mv| mv.to_string())
            .collect();

        assert_eq!(
            moves,
            ["a7a8q", "a7a8r", "a7a8b", "a7a8n", "a7b8q", "a7b8r", "a7b8b", "a7b8n"]
        );
    }

    #[test]
    fn test_pawn_blocked_and_double_push() {
        assert_eq!(moves_from("4k3/8/8/8/8/4p3/4P3/4K3 w - -", Square::E2), Vec::<String>::new());
        assert_eq!(moves_from("4k3/8/8/8/4p3/8/4P3/4K3 w - -", Square::E2), ["e2e3"]);
        assert_eq!(moves_from("4k3/8/8/8/8/8/4P3/4K3 w - -", Square::E2), ["e2e3", "e2e4"]);
        assert_eq!(moves_from("4k3/8/8/8/8/4P3/8/4K3 w - -", Square::E3), ["e3e4"]);
    }

    #[test]
    fn test_en_passant_only_from_the_right_rank() {
        assert_eq!(
            moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - d6", Square::E5),
            ["e5d6", "e5e6"]
        );
        // A stale target from White's own push is not capturable by White
        assert_eq!(moves_from("4k3/8/8/8/4P3/8/3P4/4K3 b - e3", Square::D2), ["d2d3", "d2d4"]);
    }

    #[test]
    fn test_sliders_stop_at_blockers() {
        assert_eq!(
            moves_from("4k3/8/8/8/1p6/8/8/RN2K3 w - -", Square::A1),
            ["a1a2", "a1a3", "a1a4", "a1a5", "a1a6", "a1a7", "a1a8"]
        );
        assert_eq!(
            moves_from("4k3/8/8/8/8/2p5/1P6/B3K3 w - -", Square::A1),
            Vec::<String>::new()
        );
        assert_eq!(moves_from("4k3/8/8/8/8/2p5/8/B3K3 w - -", Square::A1), ["a1b2", "a1c3"]);
    }

    #[test]
    fn test_castling_candidates() {
        let fingerprint = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -";
        let moves = moves_from(fingerprint, Square::E1);
        assert!(moves.contains(&String::from("e1g1")));
        assert!(moves.contains(&String::from("e1c1")));

        // A piece between King and Rook blocks castling on that side only
        let moves = moves_from("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq -", Square::E1);
        assert!(moves.contains(&String::from("e1g1")));
        assert!(!moves.contains(&String::from("e1c1")));

        // No right, no castling
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w kq -", Square::E1);
        assert!(!moves.contains(&String::from("e1g1")));
        assert!(!moves.contains(&String::from("e1c1")));
    }
}
