//! Sides and piece values.

use std::fmt;

/// One of the two players. White moves up the board (towards higher rows)
/// and Black moves down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Both sides, in index order.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// Row direction a man of this side moves in.
    #[inline]
    pub fn direction(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// The opposing side.
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Stable index, used to store per-side data in arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// The man of this side.
    pub fn man(self) -> Piece {
        match self {
            Side::White => Piece::WhiteMan,
            Side::Black => Piece::BlackMan,
        }
    }

    /// Row on which a man of this side is crowned, for a board of `rows` rows.
    pub fn promotion_row(self, rows: i32) -> i32 {
        match self {
            Side::White => rows - 1,
            Side::Black => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Content of a playable square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    WhiteMan,
    BlackMan,
    WhiteKing,
    BlackKing,
}

impl Piece {
    /// Owning side, or `None` for an empty square.
    #[inline]
    pub fn side(self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::WhiteMan | Piece::WhiteKing => Some(Side::White),
            Piece::BlackMan | Piece::BlackKing => Some(Side::Black),
        }
    }

    #[inline]
    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// The king a man becomes when crowned.
    ///
    /// Kings and empty squares have no promoted form and yield `None`.
    pub fn promoted(self) -> Option<Piece> {
        match self {
            Piece::WhiteMan => Some(Piece::WhiteKing),
            Piece::BlackMan => Some(Piece::BlackKing),
            _ => None,
        }
    }

    /// Three-character cell used when printing a board.
    pub fn symbol(self) -> &'static str {
        match self {
            Piece::Empty => "[ ]",
            Piece::WhiteMan => "[w]",
            Piece::BlackMan => "[b]",
            Piece::WhiteKing => "[W]",
            Piece::BlackKing => "[B]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_is_an_involution() {
        for side in Side::ALL {
            assert_eq!(side.other().other(), side);
            assert_ne!(side.other(), side);
            assert_eq!(side.direction(), -side.other().direction());
        }
    }

    #[test]
    fn test_piece_ownership() {
        assert_eq!(Piece::Empty.side(), None);
        assert_eq!(Piece::WhiteMan.side(), Some(Side::White));
        assert_eq!(Piece::WhiteKing.side(), Some(Side::White));
        assert_eq!(Piece::BlackMan.side(), Some(Side::Black));
        assert_eq!(Piece::BlackKing.side(), Some(Side::Black));
    }

    #[test]
    fn test_promotion() {
        assert_eq!(Piece::WhiteMan.promoted(), Some(Piece::WhiteKing));
        assert_eq!(Piece::BlackMan.promoted(), Some(Piece::BlackKing));
        assert_eq!(Piece::WhiteKing.promoted(), None);
        assert_eq!(Piece::Empty.promoted(), None);
        assert_eq!(Side::White.man().promoted(), Some(Piece::WhiteKing));
        assert!(!Side::Black.man().is_king());
    }

    #[test]
    fn test_promotion_rows() {
        assert_eq!(Side::White.promotion_row(8), 7);
        assert_eq!(Side::Black.promotion_row(8), 0);
    }
}
