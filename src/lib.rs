/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rules of chess: squares, pieces, moves, boards and the state of a game.
mod board;

/// Command-line interface parsing for the engine's commands.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Errors raised when parsing input or validating moves.
mod error;

/// Evaluation of chess positions.
mod eval;

/// Piece-Square tables.
mod psqt;

/// Numerical score of a position.
mod score;

/// Main engine logic; all search related code.
mod search;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use psqt::*;
pub use score::*;
pub use search::*;
