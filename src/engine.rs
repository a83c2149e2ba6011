/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{bail, Context, Result};
use uci_parser::{UciCommand, UciInfo, UciOption, UciResponse};

use crate::{
    print_perft, EngineCommand, Evaluator, Game, Move, SearchConfig, SearchResult, Square,
    MAX_DEPTH,
};

/// The Gambit chess engine.
///
/// Owns a single [`Game`] and executes commands against it one at a time.
/// Searches run on the engine's own thread, so a `go` blocks until its result is printed.
#[derive(Debug)]
pub struct Engine {
    /// The current game, as known to the engine.
    ///
    /// This is modified whenever moves are played or new positions are given,
    /// and is reset whenever the engine is told to start a new game.
    game: Game,

    /// Parameters used for searches that don't override them.
    config: SearchConfig,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::default(),
            config: SearchConfig::default(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// The game the engine is currently playing.
    #[inline(always)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to send command to engine")
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                tracing::debug!("Input handler thread stopping: {err:#}");
            }
        });

        while let Ok(cmd) = self.receiver.recv() {
            if matches!(cmd, EngineCommand::Exit) {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.execute(cmd) {
                tracing::warn!("{e:#}");
            }
        }

        Ok(())
    }

    /// Executes a single command against the current game.
    ///
    /// [`EngineCommand::Exit`] only has meaning inside [`Engine::run`], so it is ignored here.
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::Display => println!("{}", self.game),

            EngineCommand::Eval { pretty } => self.eval(pretty),

            EngineCommand::Exit => {}

            EngineCommand::Fen => println!("{}", self.game.fingerprint()),

            EngineCommand::Go { depth } => {
                let res = self.search(depth)?;
                self.report(res);
            }

            EngineCommand::Move { mv } => self.make_move(mv)?,

            EngineCommand::Moves { square, sort } => self.moves(square, sort),

            EngineCommand::New => self.new_game(),

            EngineCommand::Perft { depth } => {
                print_perft::<false>(self.game.board(), self.game.side_to_move(), depth);
            }

            EngineCommand::Play { depth } => {
                let res = self.search(depth)?;
                self.report(res);
                if let Some(res) = res {
                    self.make_move(res.bestmove)?;
                }
            }

            EngineCommand::Splitperft { depth } => {
                print_perft::<true>(self.game.board(), self.game.side_to_move(), depth);
            }

            EngineCommand::Status => self.status(),

            EngineCommand::Undo => {
                let Some(mv) = self.game.undo() else {
                    bail!("No moves to take back");
                };
                println!("Took back {mv}");
            }

            EngineCommand::Uci { cmd } => self.handle_uci_command(cmd)?,
        }

        Ok(())
    }

    /// Handle the execution of a single [`UciCommand`].
    fn handle_uci_command(&mut self, uci: UciCommand) -> Result<()> {
        use UciCommand::*;
        match uci {
            Uci => self.uci(),

            IsReady => println!("{}", UciResponse::<&str>::ReadyOk),

            SetOption { name, value } => self.set_option(&name, value)?,

            UciNewGame => self.new_game(),

            Position { fen, moves } => self.position(fen, moves)?,

            Go(options) => {
                if let Some(depth) = options.perft {
                    print_perft::<true>(
                        self.game.board(),
                        self.game.side_to_move(),
                        depth as usize,
                    );
                    return Ok(());
                }

                let config = self.config.with_uci_options(&options);
                let res = self.game.request_computer_move(config);
                self.report(res);
            }

            // Searches finish before the next command is read, so there is never one to stop.
            Stop => {}

            Quit => self.send_command(EngineCommand::Exit)?,

            _ => bail!("{} does not support UCI command {uci:?}", self.name()),
        }

        Ok(())
    }

    /// Runs a search on the current position, overriding the configured depth if `depth` is set.
    fn search(&self, depth: Option<usize>) -> Result<Option<SearchResult>> {
        let config = match depth {
            Some(0) => bail!("Search depth must be at least 1"),
            Some(depth) if depth > MAX_DEPTH => {
                bail!("Search depth must be at most {MAX_DEPTH}. Got {depth}")
            }
            Some(depth) => SearchConfig::new(depth),
            None => self.config,
        };

        Ok(self.game.request_computer_move(config))
    }

    /// Prints the outcome of a search the way a UCI front end expects it.
    fn report(&self, res: Option<SearchResult>) {
        if let Some(res) = res {
            let info = res.to_uci_info(self.game.side_to_move());
            println!("{}", UciResponse::<String>::Info(Box::new(info)));
        }

        let response = UciResponse::BestMove {
            bestmove: res.map(|res| res.bestmove),
            ponder: None,
        };
        println!("{response}");
    }

    /// Plays `mv` in the current game, printing the resulting status if the game ended.
    fn make_move(&mut self, mv: Move) -> Result<()> {
        let state = self
            .game
            .apply_move(mv)
            .with_context(|| format!("Cannot play {mv}"))?;

        if state.is_terminal() {
            println!("{}", capitalize(&state.to_string()));
        }

        Ok(())
    }

    /// Executes the `moves` command, listing legal moves for the side to move or a single piece.
    fn moves(&self, square: Option<Square>, sort: bool) {
        let mut moves = if let Some(square) = square {
            self.game.legal_moves_from(square)
        } else {
            self.game.legal_moves()
        };

        if sort {
            moves.sort_by_key(|mv| mv.to_string());
        }

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            // Otherwise, join them by comma-space
            moves
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");
    }

    /// Executes the `status` command.
    fn status(&self) {
        let side = self.game.side_to_move();
        let state = self.game.status();

        if state.is_terminal() {
            println!("{} ({side} to move)", capitalize(&state.to_string()));
        } else if self.game.is_check() {
            println!("{} to move, in check", capitalize(side.name()));
        } else {
            println!("{} to move", capitalize(side.name()));
        }
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self, pretty: bool) {
        let evaluator = Evaluator::new(self.game.board());
        if pretty {
            println!("{evaluator}");
        } else {
            println!("{}", evaluator.eval());
        }
    }

    /// Set the position to the supplied fingerprint (defaults to the standard startpos if not supplied),
    /// and then apply `moves` one-by-one to the position.
    ///
    /// The position is only replaced if every move applies cleanly.
    fn position<T: AsRef<str>>(
        &mut self,
        fen: Option<T>,
        moves: impl IntoIterator<Item = T>,
    ) -> Result<()> {
        let mut game = if let Some(fen) = fen {
            Game::from_fingerprint(fen.as_ref())?
        } else {
            Game::default()
        };

        for mv in moves {
            game.apply_uci(mv.as_ref())
                .with_context(|| format!("Invalid move {:?} in position command", mv.as_ref()))?;
        }

        self.game = game;
        Ok(())
    }

    /// Resets the engine's internal game state.
    fn new_game(&mut self) {
        self.game = Game::default();
    }

    /// Called when the engine receives the `uci` command.
    ///
    /// Prints engine's ID and version, and lists all UCI options.
    fn uci(&self) {
        println!("id name {}", self.name());
        println!("id author {}", env!("CARGO_PKG_AUTHORS").replace(':', ", "));

        for opt in self.options() {
            println!("{}", UciResponse::Option(opt));
        }

        println!("{}", UciResponse::<&str>::UciOk)
    }

    /// Convenience function to return an iterator over all UCI options this engine supports.
    fn options(&self) -> impl Iterator<Item = UciOption<&str>> {
        [UciOption::spin(
            "Depth",
            self.config.depth as i32,
            1,
            MAX_DEPTH as i32,
        )]
        .into_iter()
    }

    /// Handles the `setoption` command, setting option `name` to `value`.
    ///
    /// Will return an error if `name` isn't a valid option or `value` is not a valid value for that option.
    fn set_option(&mut self, name: &str, value: Option<String>) -> Result<()> {
        match name {
            "Depth" => {
                let Some(value) = value.as_ref() else {
                    bail!("usage: setoption name {name} value <value>");
                };

                let Ok(depth) = value.parse::<usize>() else {
                    bail!("expected integer. got {value:?}");
                };

                if !(1..=MAX_DEPTH).contains(&depth) {
                    bail!("{name} must be between 1 and {MAX_DEPTH}. Got {depth}");
                }

                self.config = SearchConfig::new(depth);
            }

            _ => bail!("{} has no option named {name:?}", self.name()),
        }

        let info = UciInfo::new().string(format!("Option {name} set to {}", self.config.depth));
        println!("{}", UciResponse::<String>::Info(Box::new(info)));

        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercases the first letter of `s`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(2048);

    loop {
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        // Engine commands take priority, so `go --depth 3` isn't read as a malformed UCI `go`
        match buf.parse::<EngineCommand>() {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // Covers `--help` as well as genuinely invalid input
            Err(err) => println!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;

    fn uci(engine: &mut Engine, cmd: &str) {
        let cmd = UciCommand::new(cmd).unwrap();
        engine.execute(EngineCommand::Uci { cmd }).unwrap();
    }

    #[test]
    fn test_position_with_moves() {
        let mut engine = Engine::new();
        uci(&mut engine, "position startpos moves f2f3 e7e5 g2g4 d8h4");
        assert_eq!(engine.game().status(), GameState::Checkmate);

        uci(&mut engine, "ucinewgame");
        assert_eq!(engine.game(), &Game::new());
    }

    #[test]
    fn test_bad_position_keeps_current_game() {
        let mut engine = Engine::new();
        uci(&mut engine, "position startpos moves e2e4");
        let before = engine.game().clone();

        let cmd = UciCommand::new("position startpos moves e2e4 e2e4").unwrap();
        assert!(engine.execute(EngineCommand::Uci { cmd }).is_err());
        assert_eq!(engine.game(), &before);
    }

    #[test]
    fn test_move_and_play() {
        let mut engine = Engine::new();
        engine
            .execute(EngineCommand::Move {
                mv: Move::from_uci("e2e4").unwrap(),
            })
            .unwrap();
        assert!(engine
            .execute(EngineCommand::Move {
                mv: Move::from_uci("e2e4").unwrap(),
            })
            .is_err());

        engine.execute(EngineCommand::Play { depth: Some(1) }).unwrap();
        assert_eq!(engine.game().side_to_move(), crate::Color::White);
        assert_eq!(engine.game().history().len(), 3);
    }

    #[test]
    fn test_undo() {
        let mut engine = Engine::new();
        assert!(engine.execute(EngineCommand::Undo).is_err());

        uci(&mut engine, "position startpos moves f2f3 e7e5 g2g4 d8h4");
        assert_eq!(engine.game().status(), GameState::Checkmate);

        engine.execute(EngineCommand::Undo).unwrap();
        assert_eq!(engine.game().status(), GameState::InProgress);
        assert_eq!(engine.game().moves_played().len(), 3);
        assert_eq!(engine.game().side_to_move(), crate::Color::Black);

        engine.execute(EngineCommand::Undo).unwrap();
        engine.execute(EngineCommand::Undo).unwrap();
        engine.execute(EngineCommand::Undo).unwrap();
        assert_eq!(engine.game(), &Game::new());
        assert!(engine.execute(EngineCommand::Undo).is_err());
    }

    #[test]
    fn test_depth_option() {
        let mut engine = Engine::new();
        uci(&mut engine, "setoption name Depth value 2");
        assert_eq!(engine.config.depth, 2);

        let cmd = UciCommand::new("setoption name Depth value 9").unwrap();
        assert!(engine.execute(EngineCommand::Uci { cmd }).is_err());
        assert!(engine.search(Some(0)).is_err());
        assert_eq!(engine.config.depth, 2);
    }
}
