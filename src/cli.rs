/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;
use uci_parser::UciCommand;

use crate::{Move, Square};

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND> | <UCI COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position.
    Eval {
        /// If set, each piece's contribution to the score will be drawn on the board.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Print the fingerprint of the current position.
    Fen,

    /// Search the current position and print the best move, without playing it.
    Go {
        /// Number of plies to search.
        #[arg(short, long, required = false)]
        depth: Option<usize>,
    },

    /// Play the provided move for the side to move, if it is legal.
    Move { mv: Move },

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be sorted in alphabetical order.
        ///
        /// By default, moves are listed in the order they are generated.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Start a new game from the standard starting position.
    New,

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Search the current position and play the best move found.
    Play {
        /// Number of plies to search.
        #[arg(short, long, required = false)]
        depth: Option<usize>,
    },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Print whose turn it is and whether the game is over.
    Status,

    /// Take back the last move played.
    #[command(alias = "takeback")]
    Undo,

    /// Wrapper over UCI commands sent to the engine.
    #[command(skip)]
    Uci { cmd: UciCommand },
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    ///
    /// If this fails, it will attempt to parse the string as a [`UciCommand`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::try_parse_from(s.split_ascii_whitespace()) {
            Ok(cmd) => Ok(cmd),
            Err(e) => {
                // If parsing failed, attempt to parse as a UciCommand
                if let Ok(cmd) = UciCommand::new(s) {
                    Ok(Self::Uci { cmd })
                } else {
                    Err(e)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_engine_commands() {
        assert!(matches!("d".parse::<EngineCommand>(), Ok(EngineCommand::Display)));
        assert!(matches!(
            "go --depth 3".parse::<EngineCommand>(),
            Ok(EngineCommand::Go { depth: Some(3) })
        ));
        assert!(matches!(
            "sperft 2".parse::<EngineCommand>(),
            Ok(EngineCommand::Splitperft { depth: 2 })
        ));

        let Ok(EngineCommand::Move { mv }) = "move e7e8q".parse::<EngineCommand>() else {
            panic!("failed to parse `move`");
        };
        assert_eq!(mv, Move::from_uci("e7e8q").unwrap());

        let Ok(EngineCommand::Moves { square, sort }) = "moves e2".parse::<EngineCommand>() else {
            panic!("failed to parse `moves`");
        };
        assert_eq!(square, Some(Square::E2));
        assert!(!sort);

        assert!(matches!("undo".parse::<EngineCommand>(), Ok(EngineCommand::Undo)));
        assert!(matches!("takeback".parse::<EngineCommand>(), Ok(EngineCommand::Undo)));
    }

    #[test]
    fn test_falls_back_to_uci() {
        assert!(matches!(
            "isready".parse::<EngineCommand>(),
            Ok(EngineCommand::Uci {
                cmd: UciCommand::IsReady
            })
        ));
        assert!(matches!(
            "go depth 3".parse::<EngineCommand>(),
            Ok(EngineCommand::Uci {
                cmd: UciCommand::Go(_)
            })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("frobnicate".parse::<EngineCommand>().is_err());
        assert!("move e9e4".parse::<EngineCommand>().is_err());
    }
}
