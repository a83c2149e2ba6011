/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::{self, Write};

use super::{Color, Move, Piece, PieceKind, Square};
use crate::ParseError;

/// Represents the castling rights of a single player.
///
/// A right only says the King and Rook have never moved. Whether castling is
/// possible right now is decided by move generation and the legality filter.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    pub short: bool,
    pub long: bool,
}

impl CastlingRights {
    /// Both rights available.
    pub const ALL: Self = Self::new(true, true);

    /// Neither right available.
    pub const NONE: Self = Self::new(false, false);

    #[inline(always)]
    pub const fn new(short: bool, long: bool) -> Self {
        Self { short, long }
    }

    /// Returns `true` if either right remains.
    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.short || self.long
    }
}

/// The authoritative board of a game: 64 squares of optional pieces, plus the
/// castling rights, en passant target and half-move clock.
///
/// A [`Board`] is a small `Copy` value. Legality checks and the search work on
/// copies of it, so the original is never touched while a move is being tried.
///
/// The side to move is not part of the board. It is tracked by [`Game`](crate::Game)
/// and passed explicitly wherever it matters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: [Option<Piece>; Square::COUNT],

    /// Castling rights for each player.
    castling: [CastlingRights; Color::COUNT],

    /// Square a pawn would land on when capturing en passant.
    ///
    /// Only valid for the ply right after a double push.
    ep_square: Option<Square>,

    /// Plies since the last pawn move or capture.
    halfmove: usize,
}

impl Board {
    /// Creates a new, empty [`Board`] with no castling rights, no en passant target and a zeroed clock.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color};
    /// let board = Board::new();
    /// assert_eq!(board.fingerprint(Color::White), "8/8/8/8/8/8/8/8 w - -");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            pieces: [None; Square::COUNT],
            castling: [CastlingRights::NONE; Color::COUNT],
            ep_square: None,
            halfmove: 0,
        }
    }

    /// Creates the standard starting position of chess.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, FINGERPRINT_STARTPOS};
    /// assert_eq!(Board::startpos().fingerprint(Color::White), FINGERPRINT_STARTPOS);
    /// ```
    pub fn startpos() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::new();
        for color in Color::all() {
            let back = Square::A1.rank_relative_to(color).rank();
            let front = Square::A2.rank_relative_to(color).rank();

            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                let file = file as u8;
                board.place(Piece::new(color, kind), Square::new_unchecked(back, file));
                board.place(Piece::new(color, Pawn), Square::new_unchecked(front, file));
            }
        }
        board.castling = [CastlingRights::ALL; Color::COUNT];

        board
    }

    /// Parses a fingerprint into a [`Board`] and the side to move.
    ///
    /// The four fingerprint fields (placements, side to move, castling rights, en passant target)
    /// are required. An optional fifth field seeds the half-move clock. Anything after that,
    /// such as a FEN full-move counter, is ignored.
    ///
    /// Whether a piece has moved cannot be read from the text, so it is derived:
    /// Kings and Rooks are unmoved when on their home squares with a matching castling right,
    /// Pawns are unmoved on their starting rank, and everything else is treated as unmoved.
    /// Castling rights whose King or Rook is not at home are dropped.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, Square, FINGERPRINT_KIWIPETE};
    /// let (board, side) = Board::from_fingerprint(FINGERPRINT_KIWIPETE).unwrap();
    /// assert_eq!(side, Color::White);
    /// assert_eq!(board.king_square(Color::Black), Square::E8);
    /// assert_eq!(board.fingerprint(side), FINGERPRINT_KIWIPETE);
    /// ```
    pub fn from_fingerprint(fingerprint: &str) -> Result<(Self, Color), ParseError> {
        let err = |reason: &str| ParseError::fingerprint(fingerprint, reason);

        let mut fields = fingerprint.split_whitespace();
        let (Some(placements), Some(side), Some(castling), Some(ep)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(err("expected placements, side to move, castling rights and en passant target"));
        };

        let mut board = Self::new();
        board.parse_placements(placements).map_err(|reason| err(reason.as_str()))?;
        board.validate_material().map_err(|reason| err(reason.as_str()))?;

        let side = Color::from_uci(side).map_err(|_| err("side to move must be `w` or `b`"))?;

        if castling != "-" {
            for c in castling.chars() {
                let (color, rights) = match c {
                    'K' => (Color::White, CastlingRights::new(true, false)),
                    'Q' => (Color::White, CastlingRights::new(false, true)),
                    'k' => (Color::Black, CastlingRights::new(true, false)),
                    'q' => (Color::Black, CastlingRights::new(false, true)),
                    _ => return Err(err("castling rights must be `-` or a subset of `KQkq`")),
                };
                let current = &mut board.castling[color.index()];
                current.short |= rights.short;
                current.long |= rights.long;
            }
        }

        if ep != "-" {
            let square = Square::from_uci(ep).map_err(|_| err("invalid en passant target"))?;
            // The target sits behind a pawn of the side that just moved
            if Some(square) != Square::A6.rank_relative_to(side).offset(square.file() as i8, 0) {
                return Err(err("en passant target is not on the rank behind a double-pushed pawn"));
            }
            board.ep_square = Some(square);
        }

        if let Some(halfmove) = fields.next() {
            board.halfmove = halfmove
                .parse()
                .map_err(|_| err("half-move clock must be a non-negative integer"))?;
        }

        board.derive_move_flags();

        Ok((board, side))
    }

    fn parse_placements(&mut self, placements: &str) -> Result<(), String> {
        let ranks: Vec<&str> = placements.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!("expected 8 ranks, found {}", ranks.len()));
        }

        // Fingerprints list the eighth rank first
        for (rank, text) in (0..8u8).rev().zip(ranks) {
            let mut file = 0u8;
            for c in text.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        return Err(format!("invalid empty-square count {c:?}"));
                    }
                    file += empty as u8;
                } else {
                    let piece = Piece::from_uci(c).map_err(|e| e.to_string())?;
                    if file >= 8 {
                        return Err(format!("rank {} is longer than 8 squares", rank + 1));
                    }
                    self.place(piece, Square::new_unchecked(rank, file));
                    file += 1;
                }

                if file > 8 {
                    return Err(format!("rank {} is longer than 8 squares", rank + 1));
                }
            }

            if file != 8 {
                return Err(format!("rank {} does not cover 8 squares", rank + 1));
            }
        }

        Ok(())
    }

    /// Rejects placements that cannot occur in a game.
    fn validate_material(&self) -> Result<(), String> {
        for color in Color::all() {
            let mut counts = [0usize; PieceKind::COUNT];
            for (square, piece) in self.iter().filter(|(_, p)| p.color == color) {
                counts[piece.kind.index()] += 1;

                let rank = square.rank();
                if piece.is_pawn() && (rank == 0 || rank == 7) {
                    return Err(format!("{color} has a pawn on {square}"));
                }
            }

            if counts[PieceKind::King.index()] != 1 {
                return Err(format!("{color} must have exactly one king"));
            }

            let pawns = counts[PieceKind::Pawn.index()];
            if pawns > 8 || counts.iter().sum::<usize>() > 16 {
                return Err(format!("{color} has too many pieces"));
            }

            let promoted = counts[PieceKind::Queen.index()].saturating_sub(1)
                + counts[PieceKind::Rook.index()].saturating_sub(2)
                + counts[PieceKind::Bishop.index()].saturating_sub(2)
                + counts[PieceKind::Knight.index()].saturating_sub(2);
            if promoted > 8 - pawns {
                return Err(format!("{color} has more promoted pieces than missing pawns"));
            }
        }

        Ok(())
    }

    /// Derives every piece's `has_moved` flag and drops castling rights that cannot be honored.
    fn derive_move_flags(&mut self) {
        for color in Color::all() {
            let home = |board: &Self, square: Square, kind: PieceKind| {
                board
                    .piece_at(square)
                    .is_some_and(|p| p.color == color && p.kind == kind)
            };

            let king_home = home(self, Square::king_home(color), PieceKind::King);
            let short = king_home && home(self, Square::rook_short_home(color), PieceKind::Rook);
            let long = king_home && home(self, Square::rook_long_home(color), PieceKind::Rook);

            let rights = &mut self.castling[color.index()];
            rights.short &= short;
            rights.long &= long;
        }

        for square in Square::iter() {
            let Some(piece) = self.pieces[square].as_mut() else {
                continue;
            };
            let rights = self.castling[piece.color.index()];

            piece.has_moved = match piece.kind {
                PieceKind::Pawn => square.rank() != Square::A2.rank_relative_to(piece.color).rank(),
                PieceKind::King => !rights.any(),
                PieceKind::Rook => {
                    let short = rights.short && square == Square::rook_short_home(piece.color);
                    let long = rights.long && square == Square::rook_long_home(piece.color);
                    !(short || long)
                }
                _ => false,
            };
        }
    }

    /// Fetches the [`Piece`] at `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces[square.index()]
    }

    /// Returns `true` if there is a piece at `square`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.pieces[square] = Some(piece);
    }

    /// Removes and returns the piece on `square`, if any.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.pieces[square].take()
    }

    /// Iterates over every occupied square and its occupant, starting at `a1`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Locates the King of `color`.
    ///
    /// # Panics
    /// A board without a King for either side is corrupt, so this will panic if none is found.
    pub fn king_square(&self, color: Color) -> Square {
        match self
            .iter()
            .find(|(_, piece)| piece.is_king() && piece.color == color)
        {
            Some((square, _)) => square,
            None => panic!("Board has no {color} king:\n{self}"),
        }
    }

    /// Castling rights of `color`.
    #[inline(always)]
    pub const fn castling_rights(&self, color: Color) -> CastlingRights {
        self.castling[color.index()]
    }

    /// Overwrites the castling rights of `color`.
    #[inline(always)]
    pub fn set_castling_rights(&mut self, color: Color, rights: CastlingRights) {
        self.castling[color.index()] = rights;
    }

    /// Fetches the castling rights as a string, such as `KQkq` or `-`.
    pub fn castling_rights_uci(&self) -> String {
        let white = self.castling_rights(Color::White);
        let black = self.castling_rights(Color::Black);

        let rights: String = [
            (white.short, 'K'),
            (white.long, 'Q'),
            (black.short, 'k'),
            (black.long, 'q'),
        ]
        .into_iter()
        .filter_map(|(set, c)| set.then_some(c))
        .collect();

        if rights.is_empty() {
            String::from("-")
        } else {
            rights
        }
    }

    /// The en passant target square, if the last move was a double pawn push.
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline(always)]
    pub fn set_ep_square(&mut self, square: Option<Square>) {
        self.ep_square = square;
    }

    /// Plies since the last pawn move or capture.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    #[inline(always)]
    pub fn set_halfmove(&mut self, halfmove: usize) {
        self.halfmove = halfmove;
    }

    /// Returns `true` if `mv` is a Pawn capturing onto the en passant target.
    #[inline(always)]
    pub fn is_en_passant(&self, mv: Move) -> bool {
        self.ep_square == Some(mv.to)
            && mv.from.file() != mv.to.file()
            && self.piece_at(mv.from).is_some_and(|p| p.is_pawn())
    }

    /// Returns `true` if `mv` is a King moving two files, which is only possible when castling.
    #[inline(always)]
    pub fn is_castle(&self, mv: Move) -> bool {
        mv.from.distance_files(mv.to) == 2 && self.piece_at(mv.from).is_some_and(|p| p.is_king())
    }

    /// Returns `true` if `mv` removes a piece from the board, en passant included.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Move};
    /// let (board, _) = Board::from_fingerprint("4k3/8/8/3pP3/8/8/8/4K3 w - d6").unwrap();
    /// assert!(board.is_capture(Move::from_uci("e5d6").unwrap()));
    /// assert!(!board.is_capture(Move::from_uci("e5e6").unwrap()));
    /// ```
    #[inline(always)]
    pub fn is_capture(&self, mv: Move) -> bool {
        self.has(mv.to) || self.is_en_passant(mv)
    }

    /// Returns a copy of this board with `mv` applied.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, Move};
    /// let board = Board::default().with_move_made(Move::from_uci("e2e4").unwrap());
    /// assert_eq!(
    ///     board.fingerprint(Color::Black),
    ///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3"
    /// );
    /// ```
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut board = *self;
        board.make_move(mv);
        board
    }

    /// Applies `mv` to this board. Legality is not checked.
    ///
    /// If `from` is empty, nothing happens.
    pub fn make_move(&mut self, mv: Move) {
        let is_en_passant = self.is_en_passant(mv);
        let is_castle = self.is_castle(mv);

        // Remove the piece from its previous location, exiting early if there is no piece there
        let Some(piece) = self.take(mv.from) else {
            return;
        };
        let color = piece.color;
        let (from, to) = (mv.from, mv.to);

        let mut captured = self.take(to).is_some();

        // The victim of en passant stands beside the capturer, not on the target
        if is_en_passant {
            captured |= self.take(Square::new_unchecked(from.rank(), to.file())).is_some();
        }

        if is_castle {
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::rook_short_home(color), Square::rook_short_castle(color))
            } else {
                (Square::rook_long_home(color), Square::rook_long_castle(color))
            };

            if let Some(rook) = self.take(rook_from) {
                self.place(rook.moved(), rook_to);
            }
        }

        if piece.is_king() {
            self.castling[color.index()] = CastlingRights::NONE;
        }
        if piece.is_rook() {
            self.revoke_rook_right(from);
        }
        self.revoke_rook_right(to);

        self.ep_square = if piece.is_pawn() && from.distance_ranks(to) == 2 {
            Some(Square::new_unchecked((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };

        if piece.is_pawn() || captured {
            self.halfmove = 0;
        } else {
            self.halfmove += 1;
        }

        let last_rank = Square::A8.rank_relative_to(color).rank();
        let piece = if piece.is_pawn() && to.rank() == last_rank {
            piece.promoted(mv.promotion.unwrap_or(PieceKind::Queen))
        } else {
            piece
        };

        self.place(piece.moved(), to);
    }

    /// Clears the castling right tied to a Rook home square, if `square` is one.
    fn revoke_rook_right(&mut self, square: Square) {
        for color in Color::all() {
            let rights = &mut self.castling[color.index()];
            if square == Square::rook_short_home(color) {
                rights.short = false;
            } else if square == Square::rook_long_home(color) {
                rights.long = false;
            }
        }
    }

    /// Encodes the piece placements, eighth rank first, using run-length-encoded empty squares.
    pub fn placements(&self) -> String {
        let mut placements = String::with_capacity(64 + 7);

        for rank in (0..8u8).rev() {
            let mut empty = 0;

            for file in 0..8u8 {
                if let Some(piece) = self.piece_at(Square::new_unchecked(rank, file)) {
                    if empty != 0 {
                        placements.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placements.push(piece.char());
                } else {
                    empty += 1;
                }
            }

            if empty != 0 {
                placements.push_str(&empty.to_string());
            }

            if rank != 0 {
                placements.push('/');
            }
        }

        placements
    }

    /// The position fingerprint for this board with `side` to move.
    ///
    /// Two positions are the same for repetition purposes exactly when their fingerprints are equal.
    pub fn fingerprint(&self, side: Color) -> String {
        let ep = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or_else(|| String::from("-"));

        format!(
            "{} {} {} {ep}",
            self.placements(),
            side.to_uci(),
            self.castling_rights_uci()
        )
    }
}

impl Default for Board {
    /// The starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{}| ", rank + 1)?;

            for file in 0..8u8 {
                let occupant = self
                    .piece_at(Square::new_unchecked(rank, file))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                f.write_char(occupant)?;
                f.write_char(' ')?;
            }

            writeln!(f)?;
        }

        writeln!(f, " +----------------")?;
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        write!(
            f,
            "Castling: {}  EP: {}  Half-move: {}",
            self.castling_rights_uci(),
            self.ep_square.map(|s| s.to_uci()).unwrap_or_else(|| String::from("-")),
            self.halfmove
        )
    }
}
