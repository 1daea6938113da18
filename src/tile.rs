/// The content of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Floor,
    Wall,
    Player,
    Box,
    Target,
    BoxOnTarget,
    PlayerOnTarget,
}

/// All tiles ordered by their id.
pub const TILES: [Tile; 7] = [
    Tile::Floor,
    Tile::Wall,
    Tile::Player,
    Tile::Box,
    Tile::Target,
    Tile::BoxOnTarget,
    Tile::PlayerOnTarget,
];

impl Tile {
    /// Map a tile id to the corresponding tile. Unknown ids are treated as floor.
    pub fn classify(id: i32) -> Self {
        Tile::try_from(id).unwrap_or(Tile::Floor)
    }

    /// The id used for this tile in level grids.
    pub fn id(self) -> i32 {
        match self {
            Tile::Floor => 0,
            Tile::Wall => 1,
            Tile::Player => 2,
            Tile::Box => 3,
            Tile::Target => 4,
            Tile::BoxOnTarget => 5,
            Tile::PlayerOnTarget => 6,
        }
    }

    /// Nothing can ever enter a cell containing an obstacle.
    pub fn is_obstacle(self) -> bool {
        matches!(self, Tile::Wall)
    }

    pub fn is_box(self) -> bool {
        matches!(self, Tile::Box | Tile::BoxOnTarget)
    }

    pub fn is_player(self) -> bool {
        matches!(self, Tile::Player | Tile::PlayerOnTarget)
    }

    /// Is this cell a target, no matter what is standing on it?
    pub fn is_target(self) -> bool {
        matches!(self, Tile::Target | Tile::BoxOnTarget | Tile::PlayerOnTarget)
    }

    /// What is left of the cell once whatever stands on it is gone.
    pub fn vacated(self) -> Self {
        if self.is_target() {
            Tile::Target
        } else {
            Tile::Floor
        }
    }

    /// The character representing this tile in the usual plain text format.
    pub fn to_char(self) -> char {
        match self {
            Tile::Floor => ' ',
            Tile::Wall => '#',
            Tile::Player => '@',
            Tile::Box => '$',
            Tile::Target => '.',
            Tile::BoxOnTarget => '*',
            Tile::PlayerOnTarget => '+',
        }
    }
}

impl TryFrom<i32> for Tile {
    type Error = i32;

    fn try_from(id: i32) -> Result<Tile, i32> {
        TILES
            .iter()
            .copied()
            .find(|tile| tile.id() == id)
            .ok_or(id)
    }
}

impl TryFrom<char> for Tile {
    type Error = char;

    /// Try to parse a given character as part of a level description.
    fn try_from(c: char) -> Result<Tile, char> {
        Ok(match c {
            ' ' | '-' | '_' => Tile::Floor,
            '#' => Tile::Wall,
            '@' => Tile::Player,
            '$' => Tile::Box,
            '.' => Tile::Target,
            '*' => Tile::BoxOnTarget,
            '+' => Tile::PlayerOnTarget,
            _ => return Err(c),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_match_level_encoding() {
        for (i, tile) in TILES.iter().enumerate() {
            assert_eq!(tile.id(), i as i32);
            assert_eq!(Tile::classify(i as i32), *tile);
        }
    }

    #[test]
    fn unknown_ids_are_floor() {
        for id in [-1, 7, 42, i32::MAX] {
            assert_eq!(Tile::classify(id), Tile::Floor);
            assert_eq!(Tile::try_from(id), Err(id));
        }
    }

    #[test]
    fn only_walls_are_obstacles() {
        let obstacles: Vec<_> = TILES.iter().filter(|t| t.is_obstacle()).collect();
        assert_eq!(obstacles, vec![&Tile::Wall]);
    }

    #[test]
    fn vacated_keeps_targets() {
        assert_eq!(Tile::BoxOnTarget.vacated(), Tile::Target);
        assert_eq!(Tile::PlayerOnTarget.vacated(), Tile::Target);
        assert_eq!(Tile::Box.vacated(), Tile::Floor);
        assert_eq!(Tile::Player.vacated(), Tile::Floor);
    }

    #[test]
    fn test_from_char_to_char() {
        let s = " #. @@*$+ +#.";
        assert_eq!(
            s,
            s.chars()
                .map(|c| Tile::try_from(c).unwrap().to_char())
                .collect::<String>()
        );
    }

    #[test]
    fn test_only_valid_chars() {
        let s = "abcdefghijlmopqrstuvwxyzABCDEFLMNOPTUVW24567890\\/αμ∈∩\n\r\t\"'<>[](){}";
        for c in s.chars() {
            assert!(Tile::try_from(c).is_err());
        }
        for c in " -_#.@*$+".chars() {
            assert!(Tile::try_from(c).is_ok());
        }
    }
}
