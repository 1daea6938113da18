use crate::level::Level;
use crate::position::Position;
use crate::tile::Tile;
use crate::util::SokobanError;

/// Collects the tiles of a level and checks that they describe a playable level.
pub(crate) struct LevelBuilder {
    name: String,
    columns: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl LevelBuilder {
    /// All rows have to have the same length; the callers pad or reject ragged input.
    pub fn new(name: String, rows: Vec<Vec<Tile>>) -> Result<Self, SokobanError> {
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(SokobanError::EmptyLevel(name));
        }
        debug_assert!(rows.iter().all(|row| row.len() == columns));

        Ok(LevelBuilder {
            name,
            columns,
            rows: rows.len(),
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    pub fn build(self) -> Result<Level, SokobanError> {
        let mut player_position = None;
        let mut boxes_remaining = 0;

        // Spare targets are fine, but every box needs a target to end up on.
        let mut goals_minus_crates = 0_i32;

        for (i, &tile) in self.tiles.iter().enumerate() {
            if tile.is_player() {
                if player_position.is_some() {
                    return Err(SokobanError::TwoPlayers(self.name));
                }
                player_position = Some(Position::from_index(i, self.columns));
            }

            match tile {
                Tile::Box => {
                    boxes_remaining += 1;
                    goals_minus_crates -= 1;
                }
                Tile::Target | Tile::PlayerOnTarget => goals_minus_crates += 1,
                _ => {}
            }
        }

        let player_position = match player_position {
            Some(pos) => pos,
            None => return Err(SokobanError::NoPlayer(self.name)),
        };
        if goals_minus_crates < 0 {
            return Err(SokobanError::CratesGoalsMismatch(
                self.name,
                goals_minus_crates,
            ));
        }

        Ok(Level {
            name: self.name,
            columns: self.columns,
            rows: self.rows,
            tiles: self.tiles,
            player_position,
            boxes_remaining,
        })
    }
}
