use crate::direction::Direction;
use crate::position::Position;

/// Anything the user can ask the back end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move one step in the given direction if possible, pushing a box if there is one.
    Move(Direction),

    /// Reset the current level.
    Restart,

    /// Go back a level.
    PreviousLevel,

    /// Go to the next level in the catalog.
    NextLevel,
}

impl TryFrom<char> for Command {
    type Error = char;

    /// Keyboard layout of the terminal front end: WASD or vi keys for moving.
    fn try_from(c: char) -> Result<Command, char> {
        use crate::direction::Direction::*;
        Ok(match c.to_ascii_lowercase() {
            'w' | 'k' => Command::Move(Up),
            's' | 'j' => Command::Move(Down),
            'a' | 'h' => Command::Move(Left),
            'd' | 'l' => Command::Move(Right),
            'r' => Command::Restart,
            'p' => Command::PreviousLevel,
            'n' => Command::NextLevel,
            _ => return Err(c),
        })
    }
}

/// Did the player try to move a box?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithCrate(pub bool);

/// What blocked a movement?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    Crate,
    /// The edge of the grid.
    Edge,
}

/// Why a move was rejected. Rejection is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocked {
    /// The cell that could not be entered.
    pub position: Position,
    pub obstacle: Obstacle,
    pub with_crate: WithCrate,
}
