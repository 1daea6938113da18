use std::fmt;

use crate::direction::Direction;

/// A single step of the player, as recorded in a board's move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub direction: Direction,

    /// Was a box pushed along?
    pub moves_crate: bool,
}

impl Move {
    pub fn new(direction: Direction, moves_crate: bool) -> Self {
        Move {
            direction,
            moves_crate,
        }
    }

    /// LURD notation: the direction's initial, upper case for pushes.
    pub fn to_char(self) -> char {
        let c = match self.direction {
            Direction::Left => 'l',
            Direction::Right => 'r',
            Direction::Up => 'u',
            Direction::Down => 'd',
        };
        if self.moves_crate {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

/// Parse a string of moves in LURD notation.
pub fn parse(s: &str) -> Result<Vec<Move>, char> {
    s.chars().map(Move::try_from).collect()
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Move {
    type Error = char;

    fn try_from(c: char) -> Result<Move, char> {
        use crate::direction::Direction::*;
        let direction = match c.to_ascii_lowercase() {
            'l' => Left,
            'r' => Right,
            'u' => Up,
            'd' => Down,
            _ => return Err(c),
        };
        Ok(Move::new(direction, c.is_ascii_uppercase()))
    }
}
