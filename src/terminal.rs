//! Text frontend: prints the board and reads human moves as square names.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::board::{Pos, parse_square, square_name};
use crate::driver::Frontend;
use crate::game::{Game, GameState, TurnPhase};
use crate::player::HumanInput;

/// A [`Frontend`] on a line-oriented reader and writer.
///
/// Human players type two squares per move, e.g. `c2 d3`. While a capture
/// chain is in progress the destination alone is enough.
pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
    humans: Vec<HumanInput>,
    /// Move count of the last board printed.
    shown: Option<usize>,
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W, humans: Vec<HumanInput>) -> Self {
        Self {
            input,
            output,
            humans,
            shown: None,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, game: &Game) -> Result<()> {
        let side = game.current_side();
        match (game.phase(), game.state().last_move()) {
            (TurnPhase::AwaitingContinuation, Some(last)) => write!(
                self.output,
                "{side} must jump again from {}: ",
                square_name(last.to)
            )?,
            _ => write!(self.output, "{side} to move (e.g. c2 d3): ")?,
        }
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn handle_events(&mut self, game: &Game) -> Result<()> {
        if game.is_over() {
            return Ok(());
        }
        let side = game.current_side();
        let Some(human) = self.humans.iter().find(|h| h.side() == side).cloned() else {
            return Ok(());
        };
        if !human.awaiting_input() {
            return Ok(());
        }

        self.prompt(game)?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read move")?;
        if read == 0 {
            bail!("input closed before the game ended");
        }

        let mut squares: Vec<Pos> = Vec::new();
        for token in line.split_whitespace() {
            match parse_square(token) {
                Some(pos) => squares.push(pos),
                None => {
                    writeln!(self.output, "Unrecognised square '{token}'.")?;
                    return Ok(());
                }
            }
        }
        if squares.is_empty() {
            return Ok(());
        }

        // Mid-chain, a lone destination continues from the landing square
        if let (TurnPhase::AwaitingContinuation, Some(last)) =
            (game.phase(), game.state().last_move())
        {
            if squares.len() == 1 && human.selected().is_none() {
                squares.insert(0, last.to);
            }
        }

        for pos in squares {
            human.square_clicked(pos, game.view());
        }
        if human.awaiting_input() && human.selected().is_none() {
            writeln!(self.output, "That is not a legal move.")?;
        }
        Ok(())
    }

    fn update(&mut self, state: &GameState, _time: f64) -> Result<()> {
        let played = state.moves_played();
        if self.shown == Some(played) {
            return Ok(());
        }
        self.shown = Some(played);

        if let Some(mv) = state.last_move() {
            writeln!(
                self.output,
                "{} moved {} -> {}",
                mv.side,
                square_name(mv.from),
                square_name(mv.to)
            )?;
        }
        writeln!(self.output, "{}", state.board())?;
        self.output.flush()?;
        Ok(())
    }
}
