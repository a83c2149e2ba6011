/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Fingerprint of the starting position of chess.
pub const FINGERPRINT_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// A popular position for debugging move generation.
pub const FINGERPRINT_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

/// Maximum possible number of moves in a given chess position.
///
/// Found [here](<https://www.chessprogramming.org/Chess_Position#cite_note-4>)
pub const MAX_NUM_MOVES: usize = 218;

/// Number of plies without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: usize = 100;

/// Number of earlier occurrences of a position that, together with the current one, draw the game.
pub const REPETITION_LIMIT: usize = 2;
