/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Board, Color, PieceKind, Psqt, Score, Square};

/// Encapsulates the logic of scoring a chess position.
///
/// Scores are White-positive and zero-sum: every White piece adds its material and positional
/// value, and every Black piece subtracts its own.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    /// The board whose position to evaluate.
    board: &'a Board,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for `board`.
    #[inline(always)]
    pub const fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Evaluate this position. Positive is good for White, negative is good for Black.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Evaluator, Score};
    /// assert_eq!(Evaluator::new(&Board::default()).eval(), Score::DRAW);
    /// ```
    #[inline(always)]
    pub fn eval(&self) -> Score {
        self.board
            .iter()
            .fold(Score::DRAW, |score, (square, piece)| {
                let value = Psqt::eval(piece, square) * piece.color.negation_multiplier() as i32;
                score + value
            })
    }

    /// Evaluate this position from `color`'s perspective.
    #[inline(always)]
    pub fn eval_for(&self, color: Color) -> Score {
        self.eval().relative_to(color)
    }

    /// Fetches the signed contribution of the piece on the specified square, if one exists.
    ///
    /// Only used when printing the evaluator
    #[inline(always)]
    fn value_at(&self, square: Square) -> Option<Score> {
        self.board.piece_at(square).map(|piece| {
            Score(Psqt::eval(piece, square) * piece.color.negation_multiplier() as i32)
        })
    }
}

impl fmt::Display for Evaluator<'_> {
    /// Draws the board with each piece's contribution (in pawns) beneath it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = format!("  +{}", "-------+".repeat(8));

        writeln!(f, "{divider}")?;
        for rank in (0..8).rev() {
            let squares: Vec<Square> = (0..8)
                .filter_map(|file| Square::from_coords(rank, file))
                .collect();

            write!(f, "{} |", rank + 1)?;
            for &square in &squares {
                let piece_char = self.board.piece_at(square).map(|p| p.char()).unwrap_or(' ');
                write!(f, "   {piece_char}   |")?;
            }
            writeln!(f)?;

            write!(f, "  |")?;
            for &square in &squares {
                let value = match self.value_at(square) {
                    // The King's material dwarfs everything else, so only its placement is shown
                    Some(val) => {
                        let val = match self.board.piece_at(square) {
                            Some(p) if p.kind == PieceKind::King => {
                                val - value_of(PieceKind::King) * p.color.negation_multiplier() as i32
                            }
                            _ => val,
                        };
                        format!("{:^+7.2}", val.normalize())
                    }
                    None => String::from("       "),
                };
                write!(f, "{value}|")?;
            }
            writeln!(f)?;
            writeln!(f, "{divider}")?;
        }
        for file in 'a'..='h' {
            write!(f, "       {file}")?;
        }

        let score = self.eval();
        let winning_side = if score > Score::DRAW {
            Some(Color::White)
        } else if score < Score::DRAW {
            Some(Color::Black)
        } else {
            None
        };

        writeln!(f, "\n")?;
        writeln!(
            f,
            "Winning side: {}",
            winning_side.map(|c| c.name()).unwrap_or("N/A")
        )?;
        writeln!(f, "Score: {score}")?;

        Ok(())
    }
}

/// Returns the material value of the provided [`PieceKind`].
///
/// The King's value only needs to dwarf everything else, since both sides always have one.
#[inline(always)]
pub const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(fingerprint: &str) -> Score {
        let (board, _) = Board::from_fingerprint(fingerprint).unwrap();
        Evaluator::new(&board).eval()
    }

    #[test]
    fn test_mirrored_positions_cancel_out() {
        assert_eq!(eval("r3k2r/pp3ppp/2n5/3q4/3Q4/2N5/PP3PPP/R3K2R w KQkq -"), Score::DRAW);
        assert_eq!(
            eval(crate::FINGERPRINT_KIWIPETE),
            -eval("r3k2r/pppbbppp/2n2q1P/1P2p3/3pn3/BN2PNP1/P1PPQPB1/R3K2R b KQkq -")
        );
    }

    #[test]
    fn test_material_dominates() {
        // White is a knight up
        let score = eval("4k3/8/8/8/8/8/8/1N2K3 w - -");
        assert_eq!(score, Score(320 - 40));

        let board = Board::from_fingerprint("4k3/8/8/8/8/8/8/1N2K3 w - -").unwrap().0;
        assert_eq!(Evaluator::new(&board).eval_for(Color::Black), Score(-280));
    }

    #[test]
    fn test_display_reports_winner() {
        let board = Board::from_fingerprint("4k3/8/8/8/8/8/8/1N2K3 w - -").unwrap().0;
        let text = Evaluator::new(&board).to_string();
        assert!(text.contains("Winning side: white"));
        assert!(text.contains("Score: 280"));
    }
}
