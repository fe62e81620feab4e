use crate::board::{Board, Position, BLANK, SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A slide of the blank one cell in the named direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Swap the blank with the tile above it.
    Up,
    /// Swap the blank with the tile below it.
    Down,
    /// Swap the blank with the tile to its left.
    Left,
    /// Swap the blank with the tile to its right.
    Right,
}

impl Direction {
    /// Every direction, in the order the search expands them.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// The direction that exactly undoes this one.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

impl Board {
    /// Whether the blank can slide one cell in the given direction, i.e.
    /// it is not already on the edge the move would cross.
    pub fn can_slide(&self, dir: Direction) -> bool {
        let blank = self.blank_position();
        match dir {
            Direction::Up => blank.row != 0,
            Direction::Down => blank.row != SIZE - 1,
            Direction::Left => blank.col != 0,
            Direction::Right => blank.col != SIZE - 1,
        }
    }

    /// The legal directions from this arrangement, in expansion order.
    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_slide(dir))
            .collect()
    }

    /// Slide the blank one cell, returning the new arrangement and leaving
    /// this one untouched.
    ///
    /// The direction must be legal per [`Board::can_slide`]; asking for an
    /// illegal slide is a bug in the caller and panics.
    pub fn apply(&self, dir: Direction) -> Board {
        assert!(self.can_slide(dir), "illegal slide: {dir}");
        let blank = self.blank_position();
        let other = match dir {
            Direction::Up => Position::new(blank.row - 1, blank.col),
            Direction::Down => Position::new(blank.row + 1, blank.col),
            Direction::Left => Position::new(blank.row, blank.col - 1),
            Direction::Right => Position::new(blank.row, blank.col + 1),
        };
        let mut next = *self;
        next.cells[blank.row][blank.col] = next.cells[other.row][other.col];
        next.cells[other.row][other.col] = BLANK;
        next
    }
}
