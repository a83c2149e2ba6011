/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use super::{
    Board, Color, Move, MoveList, PieceKind, Square, FIFTY_MOVE_LIMIT, REPETITION_LIMIT,
};
use crate::{MoveError, ParseError, Search, SearchConfig, SearchResult};

/// Where a game stands after the last move.
///
/// Everything but [`GameState::InProgress`] is terminal: once reached, no more moves are accepted.
/// Being in check is not a state of its own; see [`Game::is_check`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum GameState {
    #[default]
    InProgress,

    /// The side to move is in check and has no legal moves.
    Checkmate,

    /// The side to move is not in check and has no legal moves.
    Stalemate,

    /// A hundred plies have passed without a pawn move or capture.
    DrawBy50Moves,

    /// The current position has occurred twice before.
    DrawByRepetition,
}

impl GameState {
    /// Returns `true` if the game is over.
    #[inline(always)]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Returns `true` if the game ended without a winner.
    #[inline(always)]
    pub const fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::Stalemate | Self::DrawBy50Moves | Self::DrawByRepetition
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InProgress => "in progress",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::DrawBy50Moves => "draw by the fifty-move rule",
            Self::DrawByRepetition => "draw by repetition",
        };
        write!(f, "{s}")
    }
}

/// Everything [`Game::undo`] needs to put back.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    side_to_move: Color,
    history_len: usize,
}

/// A game of chess.
///
/// This owns the [`Board`], whose turn it is, the moves played and the fingerprints of every
/// position reached so far. It is the type a front end talks to: query the board, submit moves, read the status
/// and ask the engine for a move.
///
/// # Example
/// ```
/// # use gambit::{Game, GameState, Move};
/// let mut game = Game::new();
/// for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     game.apply_move(Move::from_uci(mv).unwrap()).unwrap();
/// }
/// assert_eq!(game.status(), GameState::Checkmate);
/// assert!(game.legal_moves().is_empty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,

    side_to_move: Color,

    /// Fingerprints of every non-terminal position reached, oldest first.
    history: Vec<String>,

    /// Moves played, oldest first.
    moves: Vec<Move>,

    /// One entry per played move: the game as it stood before that move.
    snapshots: Vec<Snapshot>,

    state: GameState,
}

impl Game {
    /// Starts a new game from the standard starting position.
    #[inline(always)]
    pub fn new() -> Self {
        Self::from_board(Board::startpos(), Color::White)
    }

    /// Starts a game from an arbitrary [`Board`] with `side_to_move` to play.
    ///
    /// The starting position is classified immediately, so a game can begin already finished.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        let mut game = Self {
            board,
            side_to_move,
            history: Vec::with_capacity(128),
            moves: Vec::with_capacity(128),
            snapshots: Vec::with_capacity(128),
            state: GameState::InProgress,
        };
        game.state = game.classify();
        game
    }

    /// Starts a game from a fingerprint. See [`Board::from_fingerprint`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Game, GameState};
    /// let game = Game::from_fingerprint("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
    /// assert_eq!(game.status(), GameState::Stalemate);
    /// ```
    pub fn from_fingerprint(fingerprint: &str) -> Result<Self, ParseError> {
        let (board, side) = Board::from_fingerprint(fingerprint)?;
        Ok(Self::from_board(board, side))
    }

    /// Validates `mv` for the side to move and, if it is legal, plays it.
    ///
    /// A Pawn move onto the last rank without a promotion choice promotes to a Queen.
    /// On any error the game is left exactly as it was.
    pub fn apply_move(&mut self, mv: Move) -> Result<GameState, MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver { state: self.state });
        }

        let mv = self.with_default_promotion(mv);
        self.board.check_move(mv, self.side_to_move)?;

        self.snapshots.push(Snapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            history_len: self.history.len(),
        });
        self.moves.push(mv);

        self.board.make_move(mv);
        self.side_to_move = self.side_to_move.opponent();
        self.state = self.classify();

        if self.state.is_terminal() {
            tracing::info!("{mv} ended the game: {}", self.state);
        }

        Ok(self.state)
    }

    /// Parses `uci` and applies it. See [`Game::apply_move`].
    pub fn apply_uci(&mut self, uci: &str) -> anyhow::Result<GameState> {
        let mv = Move::from_uci(uci)?;
        Ok(self.apply_move(mv)?)
    }

    /// Takes back the last move played, returning it.
    ///
    /// The board, side to move, history and status are restored to what they were before that
    /// move, so a finished game can be resumed. Returns `None` if no move has been played.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Game, Move};
    /// let mut game = Game::new();
    /// game.apply_uci("e2e4").unwrap();
    /// assert_eq!(game.undo(), Some(Move::from_uci("e2e4").unwrap()));
    /// assert_eq!(game, Game::new());
    /// assert_eq!(game.undo(), None);
    /// ```
    pub fn undo(&mut self) -> Option<Move> {
        let snapshot = self.snapshots.pop()?;
        let mv = self.moves.pop()?;

        self.board = snapshot.board;
        self.side_to_move = snapshot.side_to_move;
        self.history.truncate(snapshot.history_len);

        // Moves are only accepted while the game is in progress
        self.state = GameState::InProgress;

        tracing::debug!("Took back {mv}");
        Some(mv)
    }

    /// Fills in a Queen for a promoting Pawn move that did not name a piece.
    fn with_default_promotion(&self, mv: Move) -> Move {
        let last_rank = Square::A8.rank_relative_to(self.side_to_move).rank();
        let is_pawn = self
            .board
            .piece_at(mv.from)
            .is_some_and(|p| p.is_pawn() && p.color == self.side_to_move);

        if mv.promotion.is_none() && is_pawn && mv.to.rank() == last_rank {
            Move::with_promotion(mv.from, mv.to, PieceKind::Queen)
        } else {
            mv
        }
    }

    /// Classifies the current position, recording it in the history if play continues.
    fn classify(&mut self) -> GameState {
        let side = self.side_to_move;

        if !self.board.has_legal_move(side) {
            return if self.board.is_in_check(side) {
                GameState::Checkmate
            } else {
                GameState::Stalemate
            };
        }

        if self.board.halfmove() >= FIFTY_MOVE_LIMIT {
            return GameState::DrawBy50Moves;
        }

        let fingerprint = self.fingerprint();
        let seen = self.history.iter().filter(|&f| *f == fingerprint).count();
        if seen >= REPETITION_LIMIT {
            return GameState::DrawByRepetition;
        }

        self.history.push(fingerprint);
        GameState::InProgress
    }

    /// The current status of the game.
    #[inline(always)]
    pub const fn status(&self) -> GameState {
        self.state
    }

    /// Returns `true` if the side to move is in check.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.side_to_move)
    }

    /// Returns `true` if the King of `side` is in check.
    #[inline(always)]
    pub fn in_check(&self, side: Color) -> bool {
        self.board.is_in_check(side)
    }

    /// All legal moves for the side to move.
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves_for(self.side_to_move)
    }

    /// All legal moves of the piece on `square`, whoever owns it.
    #[inline(always)]
    pub fn legal_moves_from(&self, square: Square) -> MoveList {
        self.board.legal_moves_from(square)
    }

    /// All legal moves of `side`, whether or not it is their turn.
    #[inline(always)]
    pub fn legal_moves_for(&self, side: Color) -> MoveList {
        self.board.legal_moves_for(side)
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fingerprints of the positions reached so far, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The moves played so far, oldest first.
    #[inline(always)]
    pub fn moves_played(&self) -> &[Move] {
        &self.moves
    }

    /// The fingerprint of the current position.
    #[inline(always)]
    pub fn fingerprint(&self) -> String {
        self.board.fingerprint(self.side_to_move)
    }

    /// Searches for a move for the side to move. The move is not played.
    ///
    /// Returns `None` once the game is over.
    #[inline(always)]
    pub fn request_computer_move(&self, config: SearchConfig) -> Option<SearchResult> {
        self.request_computer_move_for(self.side_to_move, config)
    }

    /// Searches for a move for `side`, whether or not it is their turn. The move is not played.
    ///
    /// Returns `None` once the game is over, or if `side` has no legal moves.
    pub fn request_computer_move_for(
        &self,
        side: Color,
        config: SearchConfig,
    ) -> Option<SearchResult> {
        if self.state.is_terminal() {
            return None;
        }

        Search::new(config).find_best_move(&self.board, side)
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Game {
    type Err = ParseError;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fingerprint(s)
    }
}

impl fmt::Display for Game {
    /// Draws the board, eighth rank on top, with the game's details alongside.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.state.is_terminal() || !self.is_check() {
            ""
        } else {
            " (check)"
        };

        let details = [
            format!("Fingerprint: {}", self.fingerprint()),
            format!("       Side: {}", self.side_to_move),
            format!("   Castling: {}", self.board.castling_rights_uci()),
            format!(
                "         EP: {}",
                self.board
                    .ep_square()
                    .map(|s| s.to_uci())
                    .unwrap_or_else(|| String::from("-"))
            ),
            format!("  Half-move: {}", self.board.halfmove()),
            format!("     Status: {}{check}", self.state),
        ];

        let board = self.board.to_string();
        for (i, line) in board.lines().enumerate() {
            write!(f, "{line}")?;
            if let Some(detail) = i.checked_sub(1).and_then(|i| details.get(i)) {
                write!(f, "     {detail}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Game {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
