pub(crate) mod builder;

use std::fmt;

use crate::level::builder::LevelBuilder;
use crate::position::Position;
use crate::tile::Tile;
use crate::util::SokobanError;

/// The initial state of a level. Levels never change once created; a `Board` is derived from one
/// whenever the level is (re)started.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub(crate) name: String,
    pub(crate) columns: usize,
    pub(crate) rows: usize,

    /// `columns * rows` tiles in row-major order
    pub(crate) tiles: Vec<Tile>,

    /// Where the player starts
    pub(crate) player_position: Position,

    /// The number of boxes not yet on a target when the level starts
    pub(crate) boxes_remaining: usize,
}

/// Rows of floor are part of the level, only truly empty lines are skipped.
fn is_empty_or_comment(s: &str) -> bool {
    s.is_empty() || s.trim_start().starts_with(';')
}

impl Level {
    /// Create a level from a rectangular grid of tile ids.
    pub fn from_ids<S: Into<String>>(name: S, grid: &[Vec<i32>]) -> Result<Level, SokobanError> {
        let name = name.into();
        let expected = grid.first().map_or(0, Vec::len);

        let mut rows = Vec::with_capacity(grid.len());
        for (row, ids) in grid.iter().enumerate() {
            if ids.len() != expected {
                return Err(SokobanError::RaggedLevel {
                    level: name,
                    row,
                    found: ids.len(),
                    expected,
                });
            }
            let tiles = ids
                .iter()
                .enumerate()
                .map(|(column, &id)| {
                    Tile::try_from(id).map_err(|id| SokobanError::UnknownTile {
                        level: name.clone(),
                        id,
                        row,
                        column,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(tiles);
        }

        LevelBuilder::new(name, rows)?.build()
    }

    /// Parse the plain text representation of a level. Lines starting with `;` are comments,
    /// lines shorter than the longest one are padded with floor.
    pub fn parse<S: Into<String>>(name: S, string: &str) -> Result<Level, SokobanError> {
        let name = name.into();
        let lines: Vec<_> = string
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !is_empty_or_comment(line))
            .collect();
        let columns = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut tiles = Vec::with_capacity(columns);
            for (column, chr) in line.chars().enumerate() {
                let tile = Tile::try_from(chr).map_err(|chr| SokobanError::InvalidCharacter {
                    level: name.clone(),
                    chr,
                    row,
                    column,
                })?;
                tiles.push(tile);
            }
            tiles.resize(columns, Tile::Floor);
            rows.push(tiles);
        }

        LevelBuilder::new(name, rows)?.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn player_position(&self) -> Position {
        self.player_position
    }

    /// How many boxes have to be moved onto a target to solve this level.
    pub fn boxes_remaining(&self) -> usize {
        self.boxes_remaining
    }

    /// The total number of boxes, whether on a target or not.
    pub fn number_of_boxes(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_box()).count()
    }
}

impl fmt::Display for Level {
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
