/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Attack detection and the legality filter.
mod attacks;
/// The state machine of a game: turns, status, and position history.
mod game;
/// Pseudo-legal move generation for every kind of piece.
mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
mod moves;
/// Utility functions for performance testing move generation.
mod perft;
/// Colors, piece kinds, and the pieces placed on a board.
mod piece;
/// A chessboard, complete with piece placements, castling rights, en passant and the half-move clock.
mod position;
/// A single square on the board.
mod square;
/// Misc constants.
mod utils;

pub use game::*;
pub(crate) use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use utils::*;
