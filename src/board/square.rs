/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Color, ParseError};

/// Represents a single square on an `8x8` chess board.
///
/// A square is a `(rank, file)` coordinate pair, where rank `0` is the first rank
/// (White's back rank) and file `0` is the a-file. Internally it is packed into a `u8`
/// using `square = file + rank * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// A [`Square`] can only be constructed in bounds, so indexing a board with one never fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

#[rustfmt::skip]
impl Square {
    pub const A1: Self = Self(0);  pub const B1: Self = Self(1);  pub const C1: Self = Self(2);  pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);  pub const F1: Self = Self(5);  pub const G1: Self = Self(6);  pub const H1: Self = Self(7);
    pub const A2: Self = Self(8);  pub const B2: Self = Self(9);  pub const C2: Self = Self(10); pub const D2: Self = Self(11);
    pub const E2: Self = Self(12); pub const F2: Self = Self(13); pub const G2: Self = Self(14); pub const H2: Self = Self(15);
    pub const A3: Self = Self(16); pub const B3: Self = Self(17); pub const C3: Self = Self(18); pub const D3: Self = Self(19);
    pub const E3: Self = Self(20); pub const F3: Self = Self(21); pub const G3: Self = Self(22); pub const H3: Self = Self(23);
    pub const A4: Self = Self(24); pub const B4: Self = Self(25); pub const C4: Self = Self(26); pub const D4: Self = Self(27);
    pub const E4: Self = Self(28); pub const F4: Self = Self(29); pub const G4: Self = Self(30); pub const H4: Self = Self(31);
    pub const A5: Self = Self(32); pub const B5: Self = Self(33); pub const C5: Self = Self(34); pub const D5: Self = Self(35);
    pub const E5: Self = Self(36); pub const F5: Self = Self(37); pub const G5: Self = Self(38); pub const H5: Self = Self(39);
    pub const A6: Self = Self(40); pub const B6: Self = Self(41); pub const C6: Self = Self(42); pub const D6: Self = Self(43);
    pub const E6: Self = Self(44); pub const F6: Self = Self(45); pub const G6: Self = Self(46); pub const H6: Self = Self(47);
    pub const A7: Self = Self(48); pub const B7: Self = Self(49); pub const C7: Self = Self(50); pub const D7: Self = Self(51);
    pub const E7: Self = Self(52); pub const F7: Self = Self(53); pub const G7: Self = Self(54); pub const H7: Self = Self(55);
    pub const A8: Self = Self(56); pub const B8: Self = Self(57); pub const C8: Self = Self(58); pub const D8: Self = Self(59);
    pub const E8: Self = Self(60); pub const F8: Self = Self(61); pub const G8: Self = Self(62); pub const H8: Self = Self(63);
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Number of ranks (and files) on the board.
    pub const SIDE: u8 = 8;

    /// Returns an iterator over all squares, starting at `a1` and ending at `h8`.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Creates a [`Square`] from a rank (row) and file (column), rejecting anything off the board.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::from_coords(3, 2), Some(Square::C4));
    /// assert_eq!(Square::from_coords(8, 0), None);
    /// assert_eq!(Square::from_coords(0, -1), None);
    /// ```
    #[inline(always)]
    pub const fn from_coords(rank: i8, file: i8) -> Option<Self> {
        if rank < 0 || rank >= Self::SIDE as i8 || file < 0 || file >= Self::SIDE as i8 {
            None
        } else {
            Some(Self(file as u8 + rank as u8 * Self::SIDE))
        }
    }

    /// Creates a [`Square`] from a rank and file that are known to be in `[0, 7]`.
    #[inline(always)]
    pub(crate) const fn new_unchecked(rank: u8, file: u8) -> Self {
        debug_assert!(rank < Self::SIDE && file < Self::SIDE, "Square out of bounds");
        Self(file + rank * Self::SIDE)
    }

    /// The square the King of `color` starts on.
    #[inline(always)]
    pub const fn king_home(color: Color) -> Self {
        Self::E1.rank_relative_to(color)
    }

    /// The square of the Rook that takes part in a short ("kingside") castle by `color`.
    #[inline(always)]
    pub const fn rook_short_home(color: Color) -> Self {
        Self::H1.rank_relative_to(color)
    }

    /// The square of the Rook that takes part in a long ("queenside") castle by `color`.
    #[inline(always)]
    pub const fn rook_long_home(color: Color) -> Self {
        Self::A1.rank_relative_to(color)
    }

    /// Returns the destination of the King after performing a short ("kingside") castle by the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Square};
    /// assert_eq!(Square::king_short_castle(Color::White), Square::G1);
    /// assert_eq!(Square::king_short_castle(Color::Black), Square::G8);
    /// ```
    #[inline(always)]
    pub const fn king_short_castle(color: Color) -> Self {
        Self::G1.rank_relative_to(color)
    }

    /// Returns the destination of the King after performing a long ("queenside") castle by the supplied [`Color`].
    #[inline(always)]
    pub const fn king_long_castle(color: Color) -> Self {
        Self::C1.rank_relative_to(color)
    }

    /// Returns the destination of the Rook after performing a short ("kingside") castle by the supplied [`Color`].
    #[inline(always)]
    pub const fn rook_short_castle(color: Color) -> Self {
        Self::F1.rank_relative_to(color)
    }

    /// Returns the destination of the Rook after performing a long ("queenside") castle by the supplied [`Color`].
    #[inline(always)]
    pub const fn rook_long_castle(color: Color) -> Self {
        Self::D1.rank_relative_to(color)
    }

    /// Mirrors this [`Square`] vertically, so that `a1` becomes `a8`.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::A1.flipped_rank(), Square::A8);
    /// assert_eq!(Square::C4.flipped_rank(), Square::C5);
    /// ```
    #[inline(always)]
    pub const fn flipped_rank(self) -> Self {
        Self::new_unchecked(Self::SIDE - 1 - self.rank(), self.file())
    }

    /// If `color` is Black, mirrors this [`Square`] vertically. Otherwise, does nothing.
    #[inline(always)]
    pub const fn rank_relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => self.flipped_rank(),
        }
    }

    /// The rank (row) of this [`Square`], in `[0, 7]`.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::C4.rank(), 3);
    /// ```
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 / Self::SIDE
    }

    /// The file (column) of this [`Square`], in `[0, 7]`.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::C4.file(), 2);
    /// ```
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 % Self::SIDE
    }

    /// Fetches the inner index value of the [`Square`], casted to a [`usize`].
    ///
    /// Useful when using a [`Square`] to index into things.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the number of files away `self` is from `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().abs_diff(other.file())
    }

    /// Returns the number of ranks away `self` is from `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Attempt to offset this [`Square`] by the file and rank offsets.
    ///
    /// If the result would leave the board, `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-1, -1), Some(Square::B3));
    /// assert_eq!(Square::A1.offset(-1, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        Self::from_coords(self.rank() as i8 + rank_delta, self.file() as i8 + file_delta)
    }

    /// Moves this [`Square`] `n` ranks towards the opponent of `color`, if possible.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 2), Some(Square::C2));
    /// assert_eq!(Square::C8.forward_by(Color::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.negation_multiplier())
    }

    /// The letter of this square's file, `a` through `h`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.file()) as char
    }

    /// The digit of this square's rank, `1` through `8`.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'1' + self.rank()) as char
    }

    /// Creates a [`Square`] from algebraic notation, such as `e4`.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::from_uci("c4"), Ok(Square::C4));
    /// assert!(Square::from_uci("z0").is_err());
    /// assert!(Square::from_uci("c44").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Square(square.to_string());

        let &[file, rank] = square.as_bytes() else {
            return Err(err());
        };

        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(err());
        }

        Ok(Self::new_unchecked(rank - b'1', file - b'a'))
    }

    /// Converts this [`Square`] to algebraic notation, such as `e4`.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ParseError;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = ParseError;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// A [`Square`] can be used to mutably index into an array of 64 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.rank(), self.file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coordinates_round_trip_through_notation() {
        for square in Square::iter() {
            let parsed = Square::from_uci(&square.to_uci()).unwrap();
            assert_eq!(parsed, square);
            assert_eq!(
                Square::from_coords(square.rank() as i8, square.file() as i8),
                Some(square)
            );
        }
    }

    #[test]
    fn test_square_rejects_out_of_bounds() {
        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
        assert_eq!(Square::H8.offset(1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::A1.forward_by(Color::Black, 1), None);

        assert!(Square::from_uci("").is_err());
        assert!(Square::from_uci("i1").is_err());
        assert!(Square::from_uci("a9").is_err());
        assert!(Square::from_uci("é").is_err());
    }

    #[test]
    fn test_castling_squares_mirror_by_color() {
        assert_eq!(Square::king_home(Color::White), Square::E1);
        assert_eq!(Square::king_home(Color::Black), Square::E8);
        assert_eq!(Square::rook_long_home(Color::Black), Square::A8);
        assert_eq!(Square::rook_long_castle(Color::Black), Square::D8);
        assert_eq!(Square::rook_short_castle(Color::White), Square::F1);
    }
}
