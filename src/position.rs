use std::ops::Sub;

use crate::direction::Direction;

/// A position in a Sokoban level given as (x,y) coordinates, i.e. column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position {
            x: x as isize,
            y: y as isize,
        }
    }

    pub fn from_index(index: usize, columns: usize) -> Self {
        Position {
            x: (index % columns) as isize,
            y: (index / columns) as isize,
        }
    }

    /// Row-major index of this position, or `None` if it lies outside a grid of the given size.
    pub fn to_index(self, columns: usize, rows: usize) -> Option<usize> {
        if self.x < 0 || self.y < 0 || self.x as usize >= columns || self.y as usize >= rows {
            None
        } else {
            Some(self.x as usize + self.y as usize * columns)
        }
    }

    /// Return the neighbouring Position in the given direction.
    pub fn neighbour(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Sub for Position {
    type Output = (isize, isize);
    fn sub(self, other: Position) -> (isize, isize) {
        (self.x - other.x, self.y - other.y)
    }
}
