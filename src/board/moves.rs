/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use super::{PieceKind, Square, MAX_NUM_MOVES};
use crate::ParseError;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A move on the board: a source, a destination, and an optional promotion choice.
///
/// Whether a move is a capture, a castle or an en passant capture is not stored.
/// It is derived from the board the move is played on, see [`Board::is_capture`](crate::Board::is_capture).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new [`Move`] without a promotion.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Move, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a new [`Move`] that promotes to `promotion`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Move, PieceKind, Square};
    /// let e7e8n = Move::with_promotion(Square::E7, Square::E8, PieceKind::Knight);
    /// assert_eq!(e7e8n.to_string(), "e7e8n");
    /// ```
    #[inline(always)]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Returns `true` if this move carries a promotion choice.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Parses coordinate notation such as `e2e4`, `e2 e4` or `e7e8q`.
    ///
    /// The promotion letter may be any of `q`, `r`, `b` or `n`, in either case.
    /// This says nothing about whether the move is legal.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Move, PieceKind, Square};
    /// assert_eq!(Move::from_uci("e2e4"), Ok(Move::new(Square::E2, Square::E4)));
    /// assert_eq!(Move::from_uci("e2 e4"), Ok(Move::new(Square::E2, Square::E4)));
    /// assert_eq!(
    ///     Move::from_uci("b7b8Q"),
    ///     Ok(Move::with_promotion(Square::B7, Square::B8, PieceKind::Queen))
    /// );
    /// assert!(Move::from_uci("e2e9").is_err());
    /// assert!(Move::from_uci("e7e8k").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Move(uci.to_string());

        let compact: String = uci.split_whitespace().collect();
        if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
            return Err(err());
        }

        let from = Square::from_uci(&compact[0..2]).map_err(|_| err())?;
        let to = Square::from_uci(&compact[2..4]).map_err(|_| err())?;

        let promotion = match compact[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_uci(c) {
                Ok(kind) if kind.is_promotion() => Some(kind),
                _ => return Err(err()),
            },
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// Converts this [`Move`] to coordinate notation, such as `e7e8q`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Move {
    type Err = ParseError;
    /// Wrapper for [`Move::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
