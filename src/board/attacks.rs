/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    Board, Color, Move, MoveList, PieceKind, Square, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONALS,
};
use crate::MoveError;

impl Board {
    /// Returns `true` if any piece of `color` attacks `square`.
    ///
    /// Rather than generating the attacker's moves, this looks outward from `square`:
    /// for Pawns, Knights and the King at the fixed offsets they would attack from,
    /// and along every ray for sliders, where the first piece met ends that ray.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, Square};
    /// let board = Board::default();
    /// assert!(board.is_square_attacked_by(Square::F3, Color::White));
    /// assert!(!board.is_square_attacked_by(Square::E4, Color::White));
    /// assert!(board.is_square_attacked_by(Square::F6, Color::Black));
    /// ```
    pub fn is_square_attacked_by(&self, square: Square, color: Color) -> bool {
        let is_attacker = |from: Option<Square>, kinds: &[PieceKind]| {
            from.and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p.color == color && kinds.contains(&p.kind))
        };

        // A pawn of `color` attacks from one rank behind `square`, relative to its direction of travel
        let behind = -color.negation_multiplier();
        if [-1, 1]
            .into_iter()
            .any(|df| is_attacker(square.offset(df, behind), &[PieceKind::Pawn]))
        {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| is_attacker(square.offset(df, dr), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| is_attacker(square.offset(df, dr), &[PieceKind::King]))
        {
            return true;
        }

        let sliders = [
            (ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
            (DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
        ];

        for (directions, kinds) in sliders {
            for (df, dr) in directions {
                let mut ray = square.offset(df, dr);
                while let Some(sq) = ray {
                    if self.has(sq) {
                        if is_attacker(Some(sq), &kinds) {
                            return true;
                        }
                        break;
                    }
                    ray = sq.offset(df, dr);
                }
            }
        }

        false
    }

    /// Returns `true` if the King of `color` is attacked.
    ///
    /// # Panics
    /// If `color` has no King on the board.
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked_by(self.king_square(color), color.opponent())
    }

    /// Checks whether `side` may play `mv` on this board, explaining why not if it may not.
    ///
    /// The move must exactly match, by destination and promotion, one of the piece's pseudo-legal moves.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, Move, MoveError, Square};
    /// let board = Board::default();
    /// assert!(board.check_move(Move::from_uci("e2e4").unwrap(), Color::White).is_ok());
    /// assert_eq!(
    ///     board.check_move(Move::from_uci("e7e5").unwrap(), Color::White),
    ///     Err(MoveError::WrongColor { square: Square::E7, side: Color::White })
    /// );
    /// ```
    pub fn check_move(&self, mv: Move, side: Color) -> Result<(), MoveError> {
        let piece = self
            .piece_at(mv.from)
            .ok_or(MoveError::NoPiece { square: mv.from })?;

        if piece.color != side {
            return Err(MoveError::WrongColor {
                square: mv.from,
                side,
            });
        }

        if !self.pseudo_legal_moves_from(mv.from).contains(&mv) {
            return Err(MoveError::NotInMoveSet { mv });
        }

        self.check_king_safety(mv, side)
    }

    /// Returns `true` if `side` may play `mv` on this board.
    #[inline(always)]
    pub fn is_legal(&self, mv: Move, side: Color) -> bool {
        self.check_move(mv, side).is_ok()
    }

    /// Given a pseudo-legal `mv`, checks that it does not leave the King of `side` attacked.
    ///
    /// Castling is judged on the current board: the King may not be in check, nor pass through
    /// or land on an attacked square. Every other move is played out on a copy of the board.
    fn check_king_safety(&self, mv: Move, side: Color) -> Result<(), MoveError> {
        if self.is_castle(mv) {
            let step = if mv.to.file() > mv.from.file() { 1 } else { -1 };
            let passed = mv.from.offset(step, 0);
            let enemy = side.opponent();

            let unsafe_castle = self.is_in_check(side)
                || passed.is_some_and(|sq| self.is_square_attacked_by(sq, enemy))
                || self.is_square_attacked_by(mv.to, enemy);

            return if unsafe_castle {
                Err(MoveError::UnsafeCastle { mv })
            } else {
                Ok(())
            };
        }

        if self.with_move_made(mv).is_in_check(side) {
            Err(MoveError::LeavesKingInCheck { mv })
        } else {
            Ok(())
        }
    }

    /// Every legal move of the piece on `square`, for whichever side owns it.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.legal_moves_from(Square::G1).len(), 2);
    /// assert!(board.legal_moves_from(Square::E1).is_empty());
    /// ```
    pub fn legal_moves_from(&self, square: Square) -> MoveList {
        let Some(piece) = self.piece_at(square) else {
            return MoveList::new();
        };

        self.pseudo_legal_moves_from(square)
            .into_iter()
            .filter(|&mv| self.check_king_safety(mv, piece.color).is_ok())
            .collect()
    }

    /// Every legal move available to `side`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color};
    /// assert_eq!(Board::default().legal_moves_for(Color::White).len(), 20);
    /// ```
    pub fn legal_moves_for(&self, side: Color) -> MoveList {
        let mut moves = MoveList::new();

        for (square, _) in self.iter().filter(|(_, p)| p.color == side) {
            moves.extend(
                self.pseudo_legal_moves_from(square)
                    .into_iter()
                    .filter(|&mv| self.check_king_safety(mv, side).is_ok()),
            );
        }

        moves
    }

    /// Returns `true` if `side` has at least one legal move, stopping at the first one found.
    pub fn has_legal_move(&self, side: Color) -> bool {
        self.iter().filter(|(_, p)| p.color == side).any(|(square, _)| {
            self.pseudo_legal_moves_from(square)
                .into_iter()
                .any(|mv| self.check_king_safety(mv, side).is_ok())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(fingerprint: &str) -> (Board, Color) {
        Board::from_fingerprint(fingerprint).unwrap()
    }

    #[test]
    fn test_pawn_attacks_point_forward() {
        let (board, _) = setup("4k3/8/8/3p4/8/8/4P3/4K3 w - -");
        assert!(board.is_square_attacked_by(Square::D3, Color::White));
        assert!(board.is_square_attacked_by(Square::F3, Color::White));
        assert!(!board.is_square_attacked_by(Square::E3, Color::White));
        assert!(!board.is_square_attacked_by(Square::D4, Color::White));

        assert!(board.is_square_attacked_by(Square::C4, Color::Black));
        assert!(board.is_square_attacked_by(Square::E4, Color::Black));
        assert!(!board.is_square_attacked_by(Square::C6, Color::Black));
    }

    #[test]
    fn test_slider_attacks_are_blocked_by_any_piece() {
        let (board, _) = setup("4k3/8/8/8/q3P2K/8/8/8 w - -");
        assert!(board.is_square_attacked_by(Square::D4, Color::Black));
        assert!(board.is_square_attacked_by(Square::E4, Color::Black));
        assert!(!board.is_square_attacked_by(Square::F4, Color::Black));
        assert!(!board.is_in_check(Color::White));

        let (board, _) = setup("4k3/8/8/8/q6K/8/8/8 w - -");
        assert!(board.is_in_check(Color::White));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_pin() {
        let (board, side) = setup("4k3/4r3/8/8/8/8/4N3/4K3 w - -");
        let mv = Move::from_uci("e2c3").unwrap();
        assert_eq!(
            board.check_move(mv, side),
            Err(MoveError::LeavesKingInCheck { mv })
        );
        assert!(board.legal_moves_from(Square::E2).is_empty());
    }

    #[test]
    fn test_castling_through_check() {
        // f1 is attacked by the rook on f8
        let (board, side) = setup("4kr2/8/8/8/8/8/8/R3K2R w KQ -");
        let short = Move::from_uci("e1g1").unwrap();
        let long = Move::from_uci("e1c1").unwrap();
        assert_eq!(
            board.check_move(short, side),
            Err(MoveError::UnsafeCastle { mv: short })
        );
        assert_eq!(board.check_move(long, side), Ok(()));

        // Castling out of check
        let (board, side) = setup("4k3/4r3/8/8/8/8/8/R3K2R w KQ -");
        assert_eq!(
            board.check_move(long, side),
            Err(MoveError::UnsafeCastle { mv: long })
        );

        // Castling into check
        let (board, side) = setup("4k3/8/8/8/8/1n6/8/R3K2R w KQ -");
        assert!(board.is_square_attacked_by(Square::C1, Color::Black));
        assert!(!board.is_in_check(side));
        assert_eq!(
            board.check_move(long, side),
            Err(MoveError::UnsafeCastle { mv: long })
        );
        assert_eq!(board.check_move(short, side), Ok(()));
    }

    #[test]
    fn test_rejection_reasons() {
        let (board, side) = setup("4k3/8/8/8/8/8/8/4K3 w - -");
        let mv = Move::from_uci("a1a2").unwrap();
        assert_eq!(
            board.check_move(mv, side),
            Err(MoveError::NoPiece { square: Square::A1 })
        );

        let mv = Move::from_uci("e1e3").unwrap();
        assert_eq!(board.check_move(mv, side), Err(MoveError::NotInMoveSet { mv }));
    }
}
