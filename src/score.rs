/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use uci_parser::UciScore;

use crate::Color;

/// A numerical representation of the evaluation of a position / move, in units of ["centipawns"](https://www.chessprogramming.org/Score).
///
/// Scores are White-positive: a high score is good for White, a low score is good for Black.
/// Use [`Score::relative_to`] to view one from a particular side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Larger than any score the search can produce.
    pub const INF: Self = Self(1_000_000);

    /// Base score of a checkmate.
    ///
    /// A mate found with `n` plies of search remaining scores `MATE + n`, so sooner mates score higher.
    pub const MATE: Self = Self(100_000);

    /// Score of a draw.
    pub const DRAW: Self = Self(0);

    /// The score of `side` being checkmated with `remaining` plies of search left.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Score};
    /// assert_eq!(Score::mated(Color::White, 2), Score(-100_002));
    /// assert_eq!(Score::mated(Color::Black, 0), Score::MATE);
    /// ```
    #[inline(always)]
    pub const fn mated(side: Color, remaining: usize) -> Self {
        let score = Self::MATE.0 + remaining as i32;
        match side {
            Color::White => Self(-score),
            Color::Black => Self(score),
        }
    }

    /// Returns `true` if the score is a mate score.
    #[inline(always)]
    pub const fn is_mate(&self) -> bool {
        self.0.abs() >= Self::MATE.0
    }

    /// Converts this White-positive score to one from `color`'s perspective.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Score};
    /// assert_eq!(Score(35).relative_to(Color::White), Score(35));
    /// assert_eq!(Score(35).relative_to(Color::Black), Score(-35));
    /// ```
    #[inline(always)]
    pub const fn relative_to(self, color: Color) -> Self {
        Self(self.0 * color.negation_multiplier() as i32)
    }

    /// Returns the number of plies (half moves) from the root of a `depth`-ply search until mate.
    #[inline(always)]
    pub const fn plies_to_mate(&self, depth: usize) -> i32 {
        depth as i32 - (self.0.abs() - Self::MATE.0)
    }

    /// Returns the number of moves (full moves) until mate.
    ///
    /// This should be called on a score relative to the side to move:
    /// the result is positive if that side delivers mate, and negative if it is mated.
    #[inline(always)]
    pub const fn moves_to_mate(&self, depth: usize) -> i32 {
        let plies = self.plies_to_mate(depth);

        // Our own mate needs our move played first; the opponent's mate is counted against us
        let relative_to_side = if self.0 > 0 { plies + 1 } else { -plies };

        // Divide by 2 to obtain the number of moves (1 move = 2 ply)
        relative_to_side / 2
    }

    /// Converts this [`Score`] into a [`UciScore`], determining whether it is a centipawns score or a mate score.
    ///
    /// `self` must be relative to the side to move, and `depth` is the depth it was searched at.
    #[inline(always)]
    pub fn into_uci(self, depth: usize) -> UciScore {
        if self.is_mate() {
            UciScore::mate(self.moves_to_mate(depth))
        } else {
            UciScore::cp(self.0)
        }
    }

    /// "Normalizes" a score so that it can be printed in pawns rather than centipawns.
    #[inline(always)]
    pub fn normalize(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(f, "{} (mate, {} plies of search left)", self.0, self.0.abs() - Self::MATE.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_distance_from_remaining_depth() {
        let depth = 4;

        // Mate delivered by our first move leaves 3 plies unsearched
        let ours = Score::mated(Color::Black, 3).relative_to(Color::White);
        assert!(ours.is_mate());
        assert_eq!(ours.plies_to_mate(depth), 1);
        assert_eq!(ours.moves_to_mate(depth), 1);

        // Getting mated after our move and the reply
        let theirs = Score::mated(Color::White, 2).relative_to(Color::White);
        assert_eq!(theirs.plies_to_mate(depth), 2);
        assert_eq!(theirs.moves_to_mate(depth), -1);
    }

    #[test]
    fn test_sooner_mates_are_preferred() {
        assert!(Score::mated(Color::Black, 3) > Score::mated(Color::Black, 1));
        assert!(Score::mated(Color::White, 3) < Score::mated(Color::White, 1));
        assert!(Score::mated(Color::White, 0) > -Score::INF);
        assert!(!Score(20_000).is_mate());
    }
}
