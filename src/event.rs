use crate::command::{Obstacle, WithCrate};
use crate::direction::Direction;
use crate::position::Position;
use crate::record::GameRecord;
use crate::tile::Tile;

/// Everything the presentation layer may want to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    InitialLevelState {
        index: usize,
        count: usize,
        columns: usize,
        rows: usize,
        tiles: Vec<Tile>,
        player_position: Position,
        boxes_remaining: usize,
    },
    MoveWorker {
        from: Position,
        to: Position,
        direction: Direction,
    },
    MoveCrate {
        from: Position,
        to: Position,
    },
    CannotMove(WithCrate, Obstacle),

    /// All boxes are on targets.
    LevelFinished {
        index: usize,
        moves: usize,
        last_level: bool,
    },
    RecordSaved(GameRecord),
    RecordFailed(String),

    NoPreviousLevel,
    EndOfCollection,
}

impl Event {
    pub fn is_error(&self) -> bool {
        use crate::event::Event::*;
        match self {
            InitialLevelState { .. }
            | MoveWorker { .. }
            | MoveCrate { .. }
            | LevelFinished { .. }
            | RecordSaved(_) => false,
            CannotMove(..) | RecordFailed(_) | NoPreviousLevel | EndOfCollection => true,
        }
    }
}
