/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, GameState, Move, Square};

/// Malformed text handed to the rules engine.
///
/// These are raised before any board is consulted, so they never say anything about legality.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid square {0:?}: expected a file `a`-`h` followed by a rank `1`-`8`")]
    Square(String),

    #[error("invalid move {0:?}: expected coordinate notation such as `e2e4`, `e2 e4` or `e7e8q`")]
    Move(String),

    #[error("invalid piece character {0:?}")]
    Piece(char),

    #[error("invalid color {0:?}: expected `w` or `b`")]
    Color(String),

    #[error("invalid fingerprint {fingerprint:?}: {reason}")]
    Fingerprint { fingerprint: String, reason: String },
}

impl ParseError {
    /// Shorthand for building a [`ParseError::Fingerprint`].
    pub(crate) fn fingerprint(fingerprint: &str, reason: impl Into<String>) -> Self {
        Self::Fingerprint {
            fingerprint: fingerprint.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reasons a well-formed move is rejected.
///
/// A rejected move never mutates the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("there is no piece on {square}")]
    NoPiece { square: Square },

    #[error("the piece on {square} does not belong to {side}")]
    WrongColor { square: Square, side: Color },

    #[error("{mv} is not a move that piece can make")]
    NotInMoveSet { mv: Move },

    #[error("{mv} would leave the king in check")]
    LeavesKingInCheck { mv: Move },

    #[error("{mv} castles out of, through, or into check")]
    UnsafeCastle { mv: Move },

    #[error("no more moves are accepted: the game ended in {state}")]
    GameOver { state: GameState },
}
