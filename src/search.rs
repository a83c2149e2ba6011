/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::{Duration, Instant};

use uci_parser::{UciInfo, UciSearchOptions};

use crate::{Board, Color, Evaluator, Move, MoveList, Score};

/// Depth searched when none is requested.
pub const DEFAULT_DEPTH: usize = 4;

/// Deepest search the engine will agree to run.
///
/// Without pruning beyond alpha-beta, each extra ply multiplies the work many times over.
pub const MAX_DEPTH: usize = 8;

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Best move found during the search.
    pub bestmove: Move,

    /// White-positive score of the position after `bestmove` is made.
    pub score: Score,

    /// Number of nodes searched.
    pub nodes: u64,

    /// Depth searched, in plies, including the root move.
    pub depth: usize,

    /// Time spent searching.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Builds the `info` line reported to a UCI front end, scored from `side`'s perspective.
    pub fn to_uci_info(&self, side: Color) -> UciInfo {
        UciInfo::new()
            .depth(self.depth)
            .nodes(self.nodes)
            .score(self.score.relative_to(side).into_uci(self.depth))
            .time(self.elapsed.as_millis())
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search, counting the root move. Values below 1 are treated as 1.
    pub depth: usize,
}

impl SearchConfig {
    /// Constructs a [`SearchConfig`] searching `depth` plies.
    #[inline(always)]
    pub const fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Applies the depth from a UCI `go` command, if one was given, on top of `self`.
    ///
    /// Every other option, such as clocks or node limits, is ignored: the search always runs to completion.
    pub fn with_uci_options(self, options: &UciSearchOptions) -> Self {
        match options.depth {
            Some(depth) => Self::new((depth as usize).clamp(1, MAX_DEPTH)),
            None => self,
        }
    }
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// A fixed-depth minimax search with alpha-beta pruning.
///
/// Every node works on its own copy of the [`Board`], so nothing is shared between siblings.
#[derive(Debug)]
pub struct Search {
    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    /// Nodes visited so far.
    nodes: u64,
}

impl Search {
    /// Construct a new [`Search`] instance.
    #[inline(always)]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    /// Finds the best move for `side` on `board`.
    ///
    /// White picks the highest-scoring move and Black the lowest. Ties keep the earliest move in
    /// capture-first order. Returns `None` if `side` has no legal moves.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, Move, Search, SearchConfig};
    /// let (board, side) = Board::from_fingerprint("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - -").unwrap();
    /// let result = Search::new(SearchConfig::new(2)).find_best_move(&board, side).unwrap();
    /// assert_eq!(result.bestmove, Move::from_uci("a1a8").unwrap());
    /// assert!(result.score.is_mate());
    /// ```
    pub fn find_best_move(mut self, board: &Board, side: Color) -> Option<SearchResult> {
        let starttime = Instant::now();
        let depth = self.config.depth.max(1);
        let maximizing = side.is_white();

        let mut alpha = -Score::INF;
        let mut beta = Score::INF;
        let mut best: Option<(Move, Score)> = None;

        for mv in ordered_moves(board, side) {
            let score = self.minimax(
                &board.with_move_made(mv),
                depth - 1,
                alpha,
                beta,
                side.opponent(),
            );

            let improves = best.map_or(true, |(_, best_score)| {
                if maximizing {
                    score > best_score
                } else {
                    score < best_score
                }
            });

            if improves {
                best = Some((mv, score));
            }

            // Narrow the window so later root moves can be cut off against the best so far
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        let (bestmove, score) = best?;
        let result = SearchResult {
            bestmove,
            score,
            nodes: self.nodes,
            depth,
            elapsed: starttime.elapsed(),
        };

        tracing::debug!(
            %side,
            depth,
            nodes = result.nodes,
            score = %result.score,
            bestmove = %result.bestmove,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "search finished"
        );

        Some(result)
    }

    /// Alpha-beta minimax: White maximizes, Black minimizes.
    ///
    /// Positions where `side` has no legal moves are scored as mate or stalemate even at depth 0.
    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        side: Color,
    ) -> Score {
        self.nodes += 1;

        if depth == 0 {
            return if board.has_legal_move(side) {
                Evaluator::new(board).eval()
            } else {
                terminal_score(board, depth, side)
            };
        }

        let moves = ordered_moves(board, side);
        if moves.is_empty() {
            return terminal_score(board, depth, side);
        }

        if side.is_white() {
            let mut best = -Score::INF;
            for mv in moves {
                let score =
                    self.minimax(&board.with_move_made(mv), depth - 1, alpha, beta, side.opponent());
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = Score::INF;
            for mv in moves {
                let score =
                    self.minimax(&board.with_move_made(mv), depth - 1, alpha, beta, side.opponent());
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Score of a position where `side` cannot move: mate if in check, otherwise stalemate.
#[inline(always)]
fn terminal_score(board: &Board, depth: usize, side: Color) -> Score {
    if board.is_in_check(side) {
        Score::mated(side, depth)
    } else {
        Score::DRAW
    }
}

/// Legal moves of `side`, captures first. The order within each group is preserved.
fn ordered_moves(board: &Board, side: Color) -> MoveList {
    let mut moves = board.legal_moves_for(side);
    moves.sort_by_key(|&mv| !board.is_capture(mv));
    moves
}
