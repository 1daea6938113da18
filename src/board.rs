use std::fmt;

use crate::command::{Blocked, Obstacle, WithCrate};
use crate::direction::Direction;
use crate::level::Level;
use crate::move_::Move;
use crate::position::Position;
use crate::tile::Tile;

/// The state of a level while it is being played.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: usize,
    rows: usize,

    /// `columns * rows` tiles in row-major order
    tiles: Vec<Tile>,

    /// Where the player is at the moment
    player_position: Position,

    /// The number of boxes that are not on a target yet
    boxes_remaining: usize,

    /// The sequence of moves performed so far.
    moves: Vec<Move>,
}

/// Basic utility functions. None of these change the board. {{{
impl Board {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn player_position(&self) -> Position {
        self.player_position
    }

    pub fn boxes_remaining(&self) -> usize {
        self.boxes_remaining
    }

    /// The level is solved once no box is off target.
    pub fn is_won(&self) -> bool {
        self.boxes_remaining == 0
    }

    fn index(&self, pos: Position) -> Option<usize> {
        pos.to_index(self.columns, self.rows)
    }

    /// The tile at the given position, `None` outside of the grid.
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The grid as rows of tile ids.
    pub fn to_ids(&self) -> Vec<Vec<i32>> {
        self.tiles
            .chunks(self.columns)
            .map(|row| row.iter().map(|tile| tile.id()).collect())
            .collect()
    }

    /// How many cells contain the given tile?
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// How many moves were performed to reach the current state?
    pub fn number_of_moves(&self) -> usize {
        self.moves.len()
    }

    /// How many times have boxes been moved to reach the current state?
    pub fn number_of_pushes(&self) -> usize {
        self.moves.iter().filter(|mv| mv.moves_crate).count()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Create a string representation of the moves made to reach the current state.
    pub fn moves_to_string(&self) -> String {
        self.moves.iter().map(|mv| mv.to_char()).collect()
    }
}
// }}}

/// A change of position, given as indices into `Board::tiles`.
#[derive(Debug, Clone, Copy)]
struct FromTo {
    from: usize,
    to: usize,
}

enum MoveEvaluationResult {
    Successful {
        worker_move: FromTo,

        /// Was the cell the player steps onto a target before anything was pushed off it?
        onto_target: bool,

        crate_move: Option<FromTo>,
    },

    Failed(Blocked),
}

/// Movement, i.e. everything that *does* change `self`.
impl Board {
    /// Move the player one step in the given direction, pushing a box if there is one in the way.
    /// Nothing is changed if the move is not possible.
    pub fn try_move(&mut self, direction: Direction) -> Result<Move, Blocked> {
        match self.evaluate_move(direction) {
            MoveEvaluationResult::Successful {
                worker_move,
                onto_target,
                crate_move,
            } => {
                if let Some(crate_move) = crate_move {
                    self.move_crate(crate_move);
                }
                self.move_worker(worker_move, onto_target);

                let r#move = Move::new(direction, crate_move.is_some());
                self.moves.push(r#move);
                Ok(r#move)
            }

            MoveEvaluationResult::Failed(blocked) => {
                debug!(
                    "Cannot move {} to {:?} because of {:?}",
                    direction, blocked.position, blocked.obstacle
                );
                Err(blocked)
            }
        }
    }

    /// Like `try_move`, only reporting whether the player moved.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        self.try_move(direction).is_ok()
    }

    /// Figure out whether a move can be performed in the current state. If so, return what
    /// changes it causes. Otherwise, return why it cannot be performed.
    fn evaluate_move(&self, direction: Direction) -> MoveEvaluationResult {
        let blocked = |position, obstacle, with_crate| {
            MoveEvaluationResult::Failed(Blocked {
                position,
                obstacle,
                with_crate: WithCrate(with_crate),
            })
        };

        let from = self.player_position;
        let next = from.neighbour(direction);
        let (next_index, next_tile) = match self.index(next) {
            Some(i) => (i, self.tiles[i]),
            None => return blocked(next, Obstacle::Edge, false),
        };
        if next_tile.is_obstacle() {
            return blocked(next, Obstacle::Wall, false);
        }

        let crate_move = if next_tile.is_box() {
            let beyond = next.neighbour(direction);
            let beyond_index = match self.index(beyond) {
                Some(i) => i,
                None => return blocked(beyond, Obstacle::Edge, true),
            };
            let beyond_tile = self.tiles[beyond_index];
            if beyond_tile.is_obstacle() {
                return blocked(beyond, Obstacle::Wall, true);
            } else if beyond_tile.is_box() {
                return blocked(beyond, Obstacle::Crate, true);
            }
            Some(FromTo {
                from: next_index,
                to: beyond_index,
            })
        } else {
            None
        };

        MoveEvaluationResult::Successful {
            worker_move: FromTo {
                // The player never leaves the grid.
                from: from.x as usize + from.y as usize * self.columns,
                to: next_index,
            },
            onto_target: next_tile.is_target(),
            crate_move,
        }
    }

    fn move_crate(&mut self, FromTo { from, to }: FromTo) {
        if self.tiles[to] == Tile::Target {
            self.tiles[to] = Tile::BoxOnTarget;
            self.boxes_remaining -= 1;
        } else {
            self.tiles[to] = Tile::Box;
        }

        if self.tiles[from] == Tile::BoxOnTarget {
            self.boxes_remaining += 1;
        }
        self.tiles[from] = self.tiles[from].vacated();
    }

    fn move_worker(&mut self, FromTo { from, to }: FromTo, onto_target: bool) {
        self.tiles[from] = self.tiles[from].vacated();
        self.player_position = Position::from_index(to, self.columns);
        self.tiles[to] = if onto_target {
            Tile::PlayerOnTarget
        } else {
            Tile::Player
        };
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(self.columns).enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.to_char())?;
            }
        }
        Ok(())
    }
}

impl From<&Level> for Board {
    fn from(level: &Level) -> Self {
        Board {
            columns: level.columns,
            rows: level.rows,
            tiles: level.tiles.clone(),
            player_position: level.player_position,
            boxes_remaining: level.boxes_remaining,
            moves: vec![],
        }
    }
}

impl From<Level> for Board {
    fn from(level: Level) -> Self {
        (&level).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::direction::DIRECTIONS;
    use quickcheck_macros::quickcheck;

    use self::Direction::*;

    /// Boxes next to walls, targets, other boxes and the edge of the grid.
    const PLAYGROUND: &str = r#"
 $. $ .
.$ @$ .#
 # *
$  .#
"#;

    fn board(s: &str) -> Board {
        Level::parse("test", s).unwrap().into()
    }

    #[test]
    fn test_trivial_move_1() {
        let mut lvl = board(
            "####\n\
             #@ #\n\
             ####\n",
        );
        assert_eq!(lvl.player_position(), Position::new(1, 1));

        assert!(lvl.move_player(Right));
        assert!(lvl.move_player(Left));
        assert!(!lvl.move_player(Left));
        assert!(!lvl.move_player(Up));
        assert!(!lvl.move_player(Down));
        assert_eq!(lvl.number_of_moves(), 2);
        assert_eq!(lvl.moves_to_string(), "rl");
    }

    #[test]
    fn pushing_onto_target_wins() {
        let mut lvl: Board = Level::from_ids(
            "corridor",
            &[
                vec![1, 1, 1],
                vec![1, 4, 1],
                vec![1, 3, 1],
                vec![1, 2, 1],
                vec![1, 1, 1],
            ],
        )
        .unwrap()
        .into();
        assert_eq!(lvl.boxes_remaining(), 1);
        assert!(!lvl.is_won());

        assert_eq!(lvl.try_move(Up), Ok(Move::new(Up, true)));
        assert_eq!(lvl.boxes_remaining(), 0);
        assert!(lvl.is_won());
        assert_eq!(lvl.tile(Position::new(1, 1)), Some(Tile::BoxOnTarget));
        assert_eq!(lvl.tile(Position::new(1, 2)), Some(Tile::Player));
        assert_eq!(lvl.tile(Position::new(1, 3)), Some(Tile::Floor));
        assert_eq!(lvl.player_position(), Position::new(1, 2));
        assert_eq!(lvl.number_of_pushes(), 1);
    }

    #[test]
    fn two_boxes_cannot_be_pushed() {
        let mut lvl = board(
            "######\n\
             #@$$.#\n\
             #   .#\n\
             ######",
        );
        let before = lvl.clone();
        let res = lvl.try_move(Right);
        assert_eq!(
            res,
            Err(Blocked {
                position: Position::new(3, 1),
                obstacle: Obstacle::Crate,
                with_crate: WithCrate(true),
            })
        );
        assert_eq!(lvl, before);
    }

    #[test]
    fn box_cannot_be_pushed_into_wall() {
        let mut lvl = board(
            "#####\n\
             #.@$#\n\
             #####",
        );
        let res = lvl.try_move(Right).unwrap_err();
        assert_eq!(res.obstacle, Obstacle::Wall);
        assert_eq!(res.with_crate, WithCrate(true));
        assert_eq!(lvl.tile(Position::new(3, 1)), Some(Tile::Box));
    }

    #[test]
    fn pushing_box_off_target() {
        let mut lvl = board(
            "#######\n\
             #@* $.#\n\
             #######",
        );
        assert_eq!(lvl.boxes_remaining(), 1);

        assert!(lvl.move_player(Right));
        assert_eq!(lvl.to_string(), "#######\n# +$$.#\n#######");
        assert_eq!(lvl.boxes_remaining(), 2);

        // The box is stuck behind the other one now.
        assert!(!lvl.move_player(Right));

        assert!(lvl.move_player(Left));
        assert_eq!(lvl.to_string(), "#######\n#@.$$.#\n#######");
        assert_eq!(lvl.moves_to_string(), "Rl");
    }

    #[test]
    fn edge_of_grid_blocks() {
        let mut lvl = board("@$.");
        assert_eq!(lvl.try_move(Left).unwrap_err().obstacle, Obstacle::Edge);
        assert_eq!(lvl.try_move(Up).unwrap_err().obstacle, Obstacle::Edge);
        assert!(lvl.move_player(Right));
        assert!(lvl.is_won());

        let res = lvl.try_move(Right).unwrap_err();
        assert_eq!(res.obstacle, Obstacle::Edge);
        assert_eq!(res.with_crate, WithCrate(true));
        assert_eq!(res.position, Position { x: 3, y: 0 });
    }

    #[test]
    fn snapshot_matches_ids() {
        let lvl = board("#####\n#@$.#\n#####");
        assert_eq!(
            lvl.to_ids(),
            vec![vec![1, 1, 1, 1, 1], vec![1, 2, 3, 4, 1], vec![1, 1, 1, 1, 1]]
        );
        assert_eq!(lvl.tile(Position { x: -1, y: 0 }), None);
    }

    fn number_of_boxes(lvl: &Board) -> usize {
        lvl.count(Tile::Box) + lvl.count(Tile::BoxOnTarget)
    }

    fn number_of_players(lvl: &Board) -> usize {
        lvl.count(Tile::Player) + lvl.count(Tile::PlayerOnTarget)
    }

    #[quickcheck]
    fn prop_invariants_hold(dirs: Vec<Direction>) -> bool {
        let mut lvl = board(PLAYGROUND);
        let boxes = number_of_boxes(&lvl);

        dirs.into_iter().all(|dir| {
            lvl.move_player(dir);
            number_of_boxes(&lvl) == boxes
                && lvl.boxes_remaining() == lvl.count(Tile::Box)
                && number_of_players(&lvl) == 1
                && lvl.tile(lvl.player_position()).map_or(false, Tile::is_player)
        })
    }

    #[quickcheck]
    fn prop_at_most_one_crossing_per_move(dirs: Vec<Direction>) -> bool {
        let mut lvl = board(PLAYGROUND);

        dirs.into_iter().all(|dir| {
            let before = lvl.boxes_remaining() as isize;
            let result = lvl.try_move(dir);
            let change = lvl.boxes_remaining() as isize - before;
            match result {
                Ok(mv) if mv.moves_crate => change.abs() <= 1,
                _ => change == 0,
            }
        })
    }

    #[quickcheck]
    fn prop_rejected_moves_change_nothing(dirs: Vec<Direction>) -> bool {
        let mut lvl = board(PLAYGROUND);

        dirs.into_iter().all(|dir| {
            let before = lvl.clone();
            if lvl.move_player(dir) {
                return true;
            }
            let unchanged = lvl == before;
            let still_blocked = !lvl.move_player(dir) && !lvl.move_player(dir);
            unchanged && still_blocked && lvl == before
        })
    }

    #[quickcheck]
    fn prop_walls_block(dirs: Vec<Direction>) -> bool {
        let mut lvl = board(PLAYGROUND);

        dirs.into_iter().all(|dir| {
            for &wall_dir in &DIRECTIONS {
                let next = lvl.player_position().neighbour(wall_dir);
                if lvl.tile(next) == Some(Tile::Wall) {
                    let before = lvl.clone();
                    if lvl.move_player(wall_dir) || lvl != before {
                        return false;
                    }
                }
            }
            lvl.move_player(dir);
            true
        })
    }
}
