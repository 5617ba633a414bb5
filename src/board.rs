//! Checkers board representation, move legality and move execution.
//!
//! The board is a rectangular grid addressed by `(col, row)` pairs. Only the
//! squares where `col + row` is odd are used; all indexing goes through
//! [`Board::get`] and [`Board::set`], which reject the other squares.
//!
//! Besides the grid the board keeps the most recently applied move. A side
//! that has just captured must keep moving the same piece, and the last move
//! is what enforces that.

use std::fmt;

use crate::constants::{
    DEFAULT_COLS, DEFAULT_ROWS, HOME_ROWS, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS, MOVE_OFFSETS,
    STEPS,
};
use crate::piece::{Piece, Side};

/// A square on the board as `(col, row)`. Signed so that offsets stepping off
/// the board are representable.
pub type Pos = (i32, i32);

/// Errors raised by the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {cols}x{rows}: need 3 to 26 columns and 5 to 99 rows")]
    InvalidDimensions { cols: i32, rows: i32 },

    #[error("invalid board position {0:?}")]
    InvalidPosition(Pos),

    #[error("illegal move: {0}")]
    IllegalMove(Move),
}

/// A single step or jump of one piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub side: Side,
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    pub fn new(side: Side, from: Pos, to: Pos) -> Self {
        Self { side, from, to }
    }

    /// Column and row deltas from origin to destination.
    ///
    /// Wraps for coordinates far outside any board; such moves are never
    /// legal anyway.
    #[inline]
    pub fn delta(&self) -> (i32, i32) {
        (
            self.to.0.wrapping_sub(self.from.0),
            self.to.1.wrapping_sub(self.from.1),
        )
    }

    /// The square jumped over, if this move is two squares long.
    ///
    /// Only moves whose midpoint lies on the grid have one.
    pub fn jumped(&self) -> Option<Pos> {
        let (dc, dr) = self.delta();
        if dc.unsigned_abs().max(dr.unsigned_abs()) == 2 && dc % 2 == 0 && dr % 2 == 0 {
            Some((
                self.from.0.wrapping_add(dc / 2),
                self.from.1.wrapping_add(dr / 2),
            ))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.jumped().is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) -> ({}, {})",
            self.side, self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// What happened when a move was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Square of the captured piece, if the move was a jump.
    pub captured: Option<Pos>,
    /// Whether the moving man was crowned on landing.
    pub promoted: bool,
    /// Whether the piece could capture again from its landing square.
    pub further_capture: bool,
}

impl MoveOutcome {
    /// The same piece has to jump again before the turn can end.
    ///
    /// A crowning move always ends the turn, even if the new king could jump.
    pub fn must_continue(&self) -> bool {
        self.captured.is_some() && self.further_capture && !self.promoted
    }
}

/// A checkers board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cols: i32,
    rows: i32,
    /// Row-major cells; entries for unplayable squares are never read.
    cells: Vec<Piece>,
    last_move: Option<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_layout(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl Board {
    /// Create a board in the starting layout: White men on the two bottom
    /// rows, Black men on the two top rows.
    ///
    /// Both dimensions are bounded on each side, see [`crate::constants`].
    pub fn new(cols: i32, rows: i32) -> Result<Self, BoardError> {
        if !(MIN_COLS..=MAX_COLS).contains(&cols) || !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
            return Err(BoardError::InvalidDimensions { cols, rows });
        }
        Ok(Self::with_layout(cols, rows))
    }

    fn with_layout(cols: i32, rows: i32) -> Self {
        let mut board = Self {
            cols,
            rows,
            cells: vec![Piece::Empty; (cols * rows) as usize],
            last_move: None,
        };
        for row in 0..rows {
            let piece = if row < HOME_ROWS {
                Side::White.man()
            } else if row >= rows - HOME_ROWS {
                Side::Black.man()
            } else {
                continue;
            };
            for col in 0..cols {
                if board.is_playable((col, row)) {
                    let i = board.idx((col, row));
                    board.cells[i] = piece;
                }
            }
        }
        board
    }

    #[inline]
    fn idx(&self, (col, row): Pos) -> usize {
        (row * self.cols + col) as usize
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether `pos` is on the board and on a dark (odd) square.
    #[inline]
    pub fn is_playable(&self, (col, row): Pos) -> bool {
        col >= 0 && row >= 0 && col < self.cols && row < self.rows && (col + row) % 2 != 0
    }

    /// Piece on a playable square.
    pub fn get(&self, pos: Pos) -> Result<Piece, BoardError> {
        self.piece_at(pos).ok_or(BoardError::InvalidPosition(pos))
    }

    /// Put a piece on a playable square.
    pub fn set(&mut self, pos: Pos, piece: Piece) -> Result<(), BoardError> {
        if !self.is_playable(pos) {
            return Err(BoardError::InvalidPosition(pos));
        }
        let i = self.idx(pos);
        self.cells[i] = piece;
        Ok(())
    }

    #[inline]
    fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.is_playable(pos).then(|| self.cells[self.idx(pos)])
    }

    /// The move applied most recently, by either side.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Empty every square and forget the last move.
    pub fn clear(&mut self) {
        self.cells.fill(Piece::Empty);
        self.last_move = None;
    }

    /// All playable squares with their contents, bottom row first.
    pub fn items(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (col, row)))
            .filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Number of pieces (men and kings) a side has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.items()
            .filter(|(_, piece)| piece.side() == Some(side))
            .count()
    }

    /// Check whether a move is legal in the current position.
    ///
    /// The checks run cheapest first; the full-board capture scan is only
    /// needed for simple moves.
    pub fn is_legal(&self, mv: Move) -> bool {
        let (Some(origin), Some(dest)) = (self.piece_at(mv.from), self.piece_at(mv.to)) else {
            return false;
        };
        if !dest.is_empty() {
            return false;
        }

        // A jump must go over an enemy piece
        if let Some(mid) = mv.jumped() {
            if self.piece_at(mid).and_then(Piece::side) != Some(mv.side.other()) {
                return false;
            }
        }

        // An unfinished capture chain pins the side to the same piece
        if let Some(last) = self.last_move {
            if last.side == mv.side && mv.from != last.to {
                return false;
            }
        }

        // Captures are mandatory
        if !mv.is_capture() && self.any_capture(mv.side) {
            return false;
        }

        let (dc, dr) = mv.delta();
        if dc.abs() != dr.abs() || !(1..=2).contains(&dc.abs()) {
            return false;
        }

        if !origin.is_king() && dr.signum() != mv.side.direction() {
            return false;
        }

        origin.side() == Some(mv.side)
    }

    fn any_capture(&self, side: Side) -> bool {
        self.items()
            .any(|(pos, piece)| piece.side() == Some(side) && self.is_capture_possible(pos))
    }

    /// Apply a legal move: remove the jumped piece, move and possibly crown
    /// the mover, and remember the move.
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, BoardError> {
        if !self.is_legal(mv) {
            return Err(BoardError::IllegalMove(mv));
        }

        let captured = mv.jumped();
        if let Some(mid) = captured {
            self.set(mid, Piece::Empty)?;
        }

        let piece = self.get(mv.from)?;
        let crowned = piece
            .promoted()
            .filter(|_| mv.to.1 == mv.side.promotion_row(self.rows));
        self.set(mv.to, crowned.unwrap_or(piece))?;
        self.set(mv.from, Piece::Empty)?;
        self.last_move = Some(mv);

        Ok(MoveOutcome {
            captured,
            promoted: crowned.is_some(),
            further_capture: captured.is_some() && self.is_capture_possible(mv.to),
        })
    }

    /// Every legal move for `side`. Recomputed from the current position on
    /// each call.
    pub fn possible_moves(&self, side: Side) -> impl Iterator<Item = Move> + '_ {
        self.items()
            .filter(move |(_, piece)| piece.side() == Some(side))
            .flat_map(move |(from, _)| {
                MOVE_OFFSETS.iter().filter_map(move |&(dc, dr)| {
                    let mv = Move::new(side, from, (from.0 + dc, from.1 + dr));
                    self.is_legal(mv).then_some(mv)
                })
            })
    }

    /// Legal jumps for the piece on `from`. Empty for empty or unplayable
    /// squares.
    pub fn possible_captures(&self, from: Pos) -> impl Iterator<Item = Move> + '_ {
        let side = self.piece_at(from).and_then(Piece::side);
        side.into_iter().flat_map(move |side| {
            STEPS.iter().filter_map(move |&(dc, dr)| {
                let mv = Move::new(side, from, (from.0 + 2 * dc, from.1 + 2 * dr));
                self.is_legal(mv).then_some(mv)
            })
        })
    }

    pub fn is_capture_possible(&self, from: Pos) -> bool {
        self.possible_captures(from).next().is_some()
    }

    /// Whether `side` has at least one legal move.
    pub fn can_move(&self, side: Side) -> bool {
        self.possible_moves(side).next().is_some()
    }

    /// Read-only projection handed to players.
    pub fn view(&self) -> BoardView<'_> {
        BoardView { board: self }
    }
}

/// A read-only view of a [`Board`].
#[derive(Copy, Clone, Debug)]
pub struct BoardView<'a> {
    board: &'a Board,
}

impl<'a> BoardView<'a> {
    pub fn cols(&self) -> i32 {
        self.board.cols()
    }

    pub fn rows(&self) -> i32 {
        self.board.rows()
    }

    pub fn is_playable(&self, pos: Pos) -> bool {
        self.board.is_playable(pos)
    }

    pub fn get(&self, pos: Pos) -> Result<Piece, BoardError> {
        self.board.get(pos)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.board.last_move()
    }

    pub fn items(&self) -> impl Iterator<Item = (Pos, Piece)> + use<'a> {
        self.board.items()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.is_legal(mv)
    }

    pub fn possible_moves(&self, side: Side) -> impl Iterator<Item = Move> + use<'a> {
        self.board.possible_moves(side)
    }

    pub fn possible_captures(&self, from: Pos) -> impl Iterator<Item = Move> + use<'a> {
        self.board.possible_captures(from)
    }

    pub fn is_capture_possible(&self, from: Pos) -> bool {
        self.board.is_capture_possible(from)
    }

    pub fn can_move(&self, side: Side) -> bool {
        self.board.can_move(side)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.board, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.cols {
                match self.piece_at((col, row)) {
                    Some(piece) => write!(f, "{}", piece.symbol())?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.cols {
            write!(f, " {} ", column_letter(col))?;
        }
        writeln!(f)
    }
}

fn column_letter(col: i32) -> char {
    u8::try_from(col)
        .ok()
        .filter(|&c| c < 26)
        .map(|c| (b'a' + c) as char)
        .unwrap_or('?')
}

/// Parse a square name such as `"c4"` into `(2, 3)`.
///
/// Columns are letters starting at `a`, rows are numbers starting at 1.
/// Returns `None` for anything else. Whether the square exists on a given
/// board is not checked.
pub fn parse_square(s: &str) -> Option<Pos> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next()?.to_ascii_lowercase();
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let row: i32 = chars.as_str().parse().ok()?;
    if row < 1 {
        return None;
    }
    Some(((letter as u8 - b'a') as i32, row - 1))
}

/// Convert a square to its name, e.g. `(2, 3)` to `"c4"`.
pub fn square_name((col, row): Pos) -> String {
    format!("{}{}", column_letter(col), row + 1)
}
