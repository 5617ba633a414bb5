//! Player implementations: a click-driven human and a random computer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::board::{BoardView, Move, Pos};
use crate::constants::{CLICK_DELAY, THINK_DELAY};
use crate::game::Player;
use crate::piece::Side;

#[derive(Debug, Default)]
struct Selection {
    /// Set while it is this player's turn.
    active: bool,
    origin: Option<Pos>,
    destination: Option<Pos>,
}

impl Selection {
    fn reset(&mut self) {
        self.origin = None;
        self.destination = None;
    }
}

/// A player whose moves come from square clicks.
///
/// Clicks are delivered through a [`HumanInput`] handle obtained from
/// [`HumanPlayer::input`], so the frontend can keep feeding input after the
/// player itself has been handed to a [`Game`](crate::game::Game).
pub struct HumanPlayer {
    side: Side,
    selection: Rc<RefCell<Selection>>,
}

/// Input side of a [`HumanPlayer`].
#[derive(Clone)]
pub struct HumanInput {
    side: Side,
    selection: Rc<RefCell<Selection>>,
}

impl HumanPlayer {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            selection: Rc::default(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn input(&self) -> HumanInput {
        HumanInput {
            side: self.side,
            selection: Rc::clone(&self.selection),
        }
    }
}

impl HumanInput {
    pub fn side(&self) -> Side {
        self.side
    }

    /// Handle a click on `pos`.
    ///
    /// The first click must hit one of the player's own pieces and selects
    /// it. The second click selects the destination if that forms a legal
    /// move; otherwise the selection is dropped and the next click starts
    /// over. Clicks outside the player's turn or on unplayable squares are
    /// ignored.
    pub fn square_clicked(&self, pos: Pos, board: BoardView<'_>) {
        let mut sel = self.selection.borrow_mut();
        if !sel.active || !board.is_playable(pos) {
            return;
        }
        let origin = sel.origin;
        match origin {
            None => {
                if board.get(pos).ok().and_then(|p| p.side()) == Some(self.side) {
                    sel.origin = Some(pos);
                }
            }
            Some(origin) => {
                if board.is_legal(Move::new(self.side, origin, pos)) {
                    sel.destination = Some(pos);
                } else {
                    sel.origin = None;
                }
            }
        }
    }

    /// It is this player's turn and no complete move has been chosen yet.
    pub fn awaiting_input(&self) -> bool {
        let sel = self.selection.borrow();
        sel.active && sel.destination.is_none()
    }

    /// Currently selected piece, if any.
    pub fn selected(&self) -> Option<Pos> {
        self.selection.borrow().origin
    }
}

impl Player for HumanPlayer {
    fn selected_origin(&mut self) -> Option<Pos> {
        self.selection.borrow().origin
    }

    fn selected_destination(&mut self) -> Option<Pos> {
        self.selection.borrow().destination
    }

    fn turn_started(&mut self, _board: BoardView<'_>) {
        self.selection.borrow_mut().active = true;
    }

    fn move_started(&mut self, _board: BoardView<'_>) {
        self.selection.borrow_mut().reset();
    }

    fn move_rejected(&mut self) {
        self.selection.borrow_mut().reset();
    }

    fn move_completed(&mut self) {
        self.selection.borrow_mut().reset();
    }

    fn turn_completed(&mut self) {
        self.selection.borrow_mut().active = false;
    }
}

/// A computer player that picks uniformly among its legal moves.
///
/// To look like a person clicking, it reveals the piece `think_delay`
/// seconds after a move starts and the destination `click_delay` seconds
/// after that.
pub struct RandomPlayer {
    side: Side,
    rng: fastrand::Rng,
    think_delay: f64,
    click_delay: f64,
    next_move: Option<Move>,
    now: f64,
    move_time: f64,
    my_turn: bool,
}

impl RandomPlayer {
    /// A random player with the default delays.
    pub fn new(side: Side, seed: u64) -> Self {
        Self::with_delays(side, seed, THINK_DELAY, CLICK_DELAY)
    }

    /// A random player that answers on the next tick after a move starts.
    pub fn instant(side: Side, seed: u64) -> Self {
        Self::with_delays(side, seed, 0.0, 0.0)
    }

    pub fn with_delays(side: Side, seed: u64, think_delay: f64, click_delay: f64) -> Self {
        Self {
            side,
            rng: fastrand::Rng::with_seed(seed),
            think_delay,
            click_delay,
            next_move: None,
            now: 0.0,
            move_time: 0.0,
            my_turn: false,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    fn choose(&mut self, board: BoardView<'_>) -> Option<Move> {
        let moves: Vec<Move> = board.possible_moves(self.side).collect();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }
}

impl Player for RandomPlayer {
    fn selected_origin(&mut self) -> Option<Pos> {
        if self.my_turn && self.now > self.move_time {
            self.next_move.map(|mv| mv.from)
        } else {
            None
        }
    }

    fn selected_destination(&mut self) -> Option<Pos> {
        if self.my_turn && self.now > self.move_time + self.click_delay {
            self.next_move.map(|mv| mv.to)
        } else {
            None
        }
    }

    fn on_tick(&mut self, time: f64) {
        self.now = time;
    }

    fn turn_started(&mut self, _board: BoardView<'_>) {
        self.my_turn = true;
    }

    fn move_started(&mut self, board: BoardView<'_>) {
        self.next_move = self.choose(board);
        self.move_time = self.now + self.think_delay;
    }

    fn turn_completed(&mut self) {
        self.my_turn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_human_ignores_clicks_outside_turn() {
        let board = Board::default();
        let player = HumanPlayer::new(Side::White);
        let input = player.input();
        input.square_clicked((1, 2), board.view());
        assert_eq!(input.selected(), None);
        assert!(!input.awaiting_input());
    }

    #[test]
    fn test_human_selects_piece_then_destination() {
        let board = Board::default();
        let mut player = HumanPlayer::new(Side::White);
        let input = player.input();
        player.turn_started(board.view());
        player.move_started(board.view());
        assert!(input.awaiting_input());

        // Empty square and enemy piece cannot be selected
        input.square_clicked((0, 3), board.view());
        assert_eq!(player.selected_origin(), None);
        input.square_clicked((1, 6), board.view());
        assert_eq!(player.selected_origin(), None);

        input.square_clicked((1, 0), board.view());
        assert_eq!(player.selected_origin(), Some((1, 0)));
        assert_eq!(player.selected_destination(), None);

        // (1, 0) is blocked by its own men: the selection is dropped
        input.square_clicked((2, 1), board.view());
        assert_eq!(player.selected_origin(), None);

        input.square_clicked((2, 1), board.view());
        input.square_clicked((3, 2), board.view());
        assert_eq!(player.selected_origin(), Some((2, 1)));
        assert_eq!(player.selected_destination(), Some((3, 2)));
        assert!(!input.awaiting_input());

        player.move_completed();
        assert_eq!(player.selected_origin(), None);
        assert_eq!(player.selected_destination(), None);
    }

    #[test]
    fn test_random_player_waits_for_its_delays() {
        let board = Board::default();
        let mut player = RandomPlayer::with_delays(Side::White, 7, 1.0, 0.5);
        player.on_tick(0.0);
        player.turn_started(board.view());
        player.move_started(board.view());

        player.on_tick(0.5);
        assert_eq!(player.selected_origin(), None);

        player.on_tick(1.2);
        let from = player.selected_origin().expect("origin after think delay");
        assert_eq!(player.selected_destination(), None);

        player.on_tick(1.6);
        let to = player.selected_destination().expect("destination after click delay");
        assert!(board.is_legal(Move::new(Side::White, from, to)));
    }

    #[test]
    fn test_random_player_is_deterministic_per_seed() {
        let board = Board::default();
        let pick = |seed| {
            let mut player = RandomPlayer::instant(Side::Black, seed);
            player.turn_started(board.view());
            player.move_started(board.view());
            player.on_tick(1.0);
            (player.selected_origin(), player.selected_destination())
        };
        assert_eq!(pick(42), pick(42));
        assert!(pick(42).0.is_some());
    }

    #[test]
    fn test_random_player_silent_after_turn() {
        let board = Board::default();
        let mut player = RandomPlayer::instant(Side::White, 1);
        player.turn_started(board.view());
        player.move_started(board.view());
        player.turn_completed();
        player.on_tick(5.0);
        assert_eq!(player.selected_origin(), None);
        assert_eq!(player.selected_destination(), None);
    }
}
