//! Turn sequencing for a game of checkers.
//!
//! A [`Game`] owns the board and one [`Player`] per side. It is advanced one
//! logical tick at a time by [`Game::advance_tick`]; on each tick it polls the
//! player to move for an origin and a destination square, applies the move
//! when both are present, and notifies the players of what happened.
//!
//! A turn is made of one or more moves. After a jump, if the same piece can
//! jump again (and was not just crowned) the side must continue with that
//! piece before the turn passes. The game ends as soon as the side to move
//! has no legal move, and that side loses.

use crate::board::{Board, BoardError, BoardView, Move, MoveOutcome, Pos};
use crate::piece::Side;

/// A participant in the game.
///
/// Players are polled, never pushed to: whatever input they gather
/// asynchronously must be buffered and handed out from
/// [`selected_origin`](Player::selected_origin) and
/// [`selected_destination`](Player::selected_destination).
pub trait Player {
    /// Square of the piece the player wants to move, if chosen yet.
    fn selected_origin(&mut self) -> Option<Pos>;

    /// Square the player wants to move to, if chosen yet.
    fn selected_destination(&mut self) -> Option<Pos>;

    /// Called with the logical time at the start of every tick.
    fn on_tick(&mut self, _time: f64) {}

    fn turn_started(&mut self, _board: BoardView<'_>) {}

    /// A new move is expected, either the first of a turn or the next jump
    /// of a capture chain.
    fn move_started(&mut self, _board: BoardView<'_>) {}

    fn move_rejected(&mut self) {}

    fn move_completed(&mut self) {}

    fn turn_completed(&mut self) {}

    fn game_won(&mut self) {}

    fn game_lost(&mut self) {}
}

/// Where the state machine is within the current turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the first move of a turn.
    AwaitingMove,
    /// Waiting for the capturing piece to jump again.
    AwaitingContinuation,
}

/// Whether the game is still running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won(Side),
}

/// Session options.
#[derive(Copy, Clone, Debug)]
pub struct GameOptions {
    /// Side that moves first.
    pub first: Side,
    /// Report turns, moves and the result on stderr.
    pub verbose: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            first: Side::White,
            verbose: false,
        }
    }
}

/// Everything a game session holds.
pub struct GameState {
    players: [Box<dyn Player>; 2],
    current: Side,
    board: Board,
    time: f64,
    last_move: Option<Move>,
    moves_played: usize,
}

impl GameState {
    /// Side whose turn it is.
    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Logical time of the latest tick, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Number of moves applied so far; each jump of a chain counts.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    fn player(&mut self, side: Side) -> &mut dyn Player {
        self.players[side.index()].as_mut()
    }

    /// Give the current side a chance to move: `turn_started` then
    /// `move_started`.
    fn start_turn(&mut self) {
        let Self { players, board, current, .. } = self;
        let player = players[current.index()].as_mut();
        player.turn_started(board.view());
        player.move_started(board.view());
    }

    fn start_move(&mut self) {
        let Self { players, board, current, .. } = self;
        players[current.index()].move_started(board.view());
    }
}

/// A game of checkers between two players.
pub struct Game {
    state: GameState,
    phase: TurnPhase,
    status: GameStatus,
    verbose: bool,
}

impl Game {
    /// Start a game. The first side is told its turn has started, or, if it
    /// has no legal move at all, the game ends immediately.
    pub fn new(
        board: Board,
        white: Box<dyn Player>,
        black: Box<dyn Player>,
        options: GameOptions,
    ) -> Self {
        let mut game = Self {
            state: GameState {
                players: [white, black],
                current: options.first,
                board,
                time: 0.0,
                last_move: None,
                moves_played: 0,
            },
            phase: TurnPhase::AwaitingMove,
            status: GameStatus::Ongoing,
            verbose: options.verbose,
        };
        if game.state.board.can_move(game.state.current) {
            game.announce_turn();
            game.state.start_turn();
        } else {
            game.finish();
        }
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn view(&self) -> BoardView<'_> {
        self.state.board.view()
    }

    pub fn current_side(&self) -> Side {
        self.state.current
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    /// Run one logical tick at `time` seconds.
    ///
    /// Illegal proposals are reported to the player as rejections, not as
    /// errors. Once the game is over this does nothing.
    pub fn advance_tick(&mut self, time: f64) -> Result<GameStatus, BoardError> {
        if self.is_over() {
            return Ok(self.status);
        }
        self.state.time = time;
        for player in &mut self.state.players {
            player.on_tick(time);
        }

        self.phase = match self.phase {
            TurnPhase::AwaitingMove => self.await_move()?,
            TurnPhase::AwaitingContinuation => self.await_continuation()?,
        };
        Ok(self.status)
    }

    fn await_move(&mut self) -> Result<TurnPhase, BoardError> {
        let side = self.state.current;
        let player = self.state.player(side);
        let (Some(from), Some(to)) = (player.selected_origin(), player.selected_destination())
        else {
            return Ok(TurnPhase::AwaitingMove);
        };

        match self.perform_move(from, to)? {
            Some(outcome) if outcome.must_continue() => {
                self.state.start_move();
                Ok(TurnPhase::AwaitingContinuation)
            }
            Some(_) => {
                self.change_side();
                Ok(TurnPhase::AwaitingMove)
            }
            None => {
                self.state.player(side).move_rejected();
                Ok(TurnPhase::AwaitingMove)
            }
        }
    }

    fn await_continuation(&mut self) -> Result<TurnPhase, BoardError> {
        let Some(last) = self.state.last_move else {
            return Ok(TurnPhase::AwaitingMove);
        };
        let side = self.state.current;
        let player = self.state.player(side);
        if player.selected_origin() != Some(last.to) {
            return Ok(TurnPhase::AwaitingContinuation);
        }
        let Some(to) = player.selected_destination() else {
            return Ok(TurnPhase::AwaitingContinuation);
        };

        match self.perform_move(last.to, to)? {
            Some(outcome) if outcome.must_continue() => {
                self.state.start_move();
                Ok(TurnPhase::AwaitingContinuation)
            }
            Some(_) => {
                self.change_side();
                Ok(TurnPhase::AwaitingMove)
            }
            None => {
                self.state.player(side).move_rejected();
                Ok(TurnPhase::AwaitingContinuation)
            }
        }
    }

    /// Apply a move for the current side. `Ok(None)` means it was illegal.
    fn perform_move(&mut self, from: Pos, to: Pos) -> Result<Option<MoveOutcome>, BoardError> {
        let side = self.state.current;
        let mv = Move::new(side, from, to);
        let outcome = match self.state.board.apply(mv) {
            Ok(outcome) => outcome,
            Err(BoardError::IllegalMove(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        if self.verbose {
            eprintln!(
                "{side} moves ({}, {}) -> ({}, {}).",
                from.0, from.1, to.0, to.1
            );
        }
        self.state.last_move = Some(mv);
        self.state.moves_played += 1;
        self.state.player(side).move_completed();
        Ok(Some(outcome))
    }

    /// Hand the turn to the other side, or end the game if it cannot move.
    fn change_side(&mut self) {
        let side = self.state.current;
        self.state.player(side).turn_completed();
        self.state.current = side.other();

        if self.state.board.can_move(self.state.current) {
            self.announce_turn();
            self.state.start_turn();
        } else {
            self.finish();
        }
    }

    /// The side to move is stuck: its opponent wins.
    fn finish(&mut self) {
        let loser = self.state.current;
        let winner = loser.other();
        self.status = GameStatus::Won(winner);
        if self.verbose {
            eprintln!("{winner} won.");
        }
        self.state.player(winner).game_won();
        self.state.player(loser).game_lost();
    }

    fn announce_turn(&self) {
        if self.verbose {
            eprintln!("{}'s turn.\n{}", self.state.current, self.state.board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    /// Plays nothing.
    struct Idle;

    impl Player for Idle {
        fn selected_origin(&mut self) -> Option<Pos> {
            None
        }
        fn selected_destination(&mut self) -> Option<Pos> {
            None
        }
    }

    fn idle_game(board: Board) -> Game {
        Game::new(board, Box::new(Idle), Box::new(Idle), GameOptions::default())
    }

    #[test]
    fn test_new_game_waits_for_white() {
        let mut game = idle_game(Board::default());
        assert_eq!(game.current_side(), Side::White);
        assert_eq!(game.phase(), TurnPhase::AwaitingMove);
        for tick in 1..=10 {
            assert_eq!(game.advance_tick(tick as f64), Ok(GameStatus::Ongoing));
        }
        assert_eq!(game.state().moves_played(), 0);
        assert_eq!(game.state().time(), 10.0);
    }

    #[test]
    fn test_stuck_first_side_loses_immediately() {
        let mut board = Board::default();
        board.clear();
        board.set((1, 6), Piece::BlackMan).unwrap();
        let game = idle_game(board);
        assert_eq!(game.status(), GameStatus::Won(Side::Black));
        assert!(game.is_over());
    }

    #[test]
    fn test_black_can_move_first() {
        let options = GameOptions {
            first: Side::Black,
            verbose: false,
        };
        let game = Game::new(Board::default(), Box::new(Idle), Box::new(Idle), options);
        assert_eq!(game.current_side(), Side::Black);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }
}
