//! Constants for board dimensions, move geometry, and timing.
//!
//! Every tunable of the engine lives here. Board dimensions are chosen at
//! runtime (see [`crate::board::Board::new`]); the values below are the
//! defaults and the hard lower bounds.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of columns (standard 8x8 checkers).
pub const DEFAULT_COLS: i32 = 8;

/// Default number of rows.
pub const DEFAULT_ROWS: i32 = 8;

/// Smallest board width that still leaves room for a diagonal jump.
pub const MIN_COLS: i32 = 3;

/// Smallest board height: two home rows per side plus one row between them.
pub const MIN_ROWS: i32 = 5;

/// Widest board: columns are named by a single letter `a` to `z`.
pub const MAX_COLS: i32 = 26;

/// Tallest board: row labels are at most two digits wide.
pub const MAX_ROWS: i32 = 99;

/// Number of rows filled with men for each side at the start of a game.
pub const HOME_ROWS: i32 = 2;

// =============================================================================
// Move Offsets
// =============================================================================

/// Single diagonal steps. Order: NW, SW, NE, SE (column delta, row delta).
pub const STEPS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Every offset a piece might move by: the four simple steps followed by
/// the four jumps.
pub const MOVE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-2, -2),
    (-2, 2),
    (2, -2),
    (2, 2),
];

// =============================================================================
// Timing
// =============================================================================

/// Length of one logical tick in seconds (60 updates per second).
pub const TICK_SECONDS: f64 = 0.01667;

/// Seconds a computer player waits after a move starts before picking a piece.
pub const THINK_DELAY: f64 = 1.0;

/// Seconds between a computer player picking a piece and its destination.
pub const CLICK_DELAY: f64 = 0.5;

/// Default tick cap for headless games, which have no draw rule.
pub const MAX_HEADLESS_TICKS: u64 = 100_000;
