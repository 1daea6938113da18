//! How tiles look in the terminal. Nothing in here affects the rules.

use ansi_term::{ANSIString, Colour, Style};

use crate::tile::Tile;

#[derive(Debug)]
pub struct TileStyle {
    pub colour: Colour,
    pub description: &'static str,
}

/// Indexed by tile id.
static STYLES: [TileStyle; 7] = [
    TileStyle {
        colour: Colour::White,
        description: "floor",
    },
    TileStyle {
        colour: Colour::Fixed(245),
        description: "wall",
    },
    TileStyle {
        colour: Colour::Blue,
        description: "player",
    },
    TileStyle {
        colour: Colour::Fixed(208),
        description: "box",
    },
    TileStyle {
        colour: Colour::Red,
        description: "target",
    },
    TileStyle {
        colour: Colour::Green,
        description: "box on target",
    },
    TileStyle {
        colour: Colour::Cyan,
        description: "player on target",
    },
];

pub fn style(tile: Tile) -> &'static TileStyle {
    &STYLES[tile.id() as usize]
}

/// The tile's character in its colour.
pub fn paint(tile: Tile) -> ANSIString<'static> {
    let style = style(tile);
    let ansi = match tile {
        Tile::Wall | Tile::Floor => Style::new().fg(style.colour),
        _ => style.colour.bold(),
    };
    ansi.paint(tile.to_char().to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tile::TILES;

    #[test]
    fn every_tile_has_a_style() {
        for &tile in &TILES {
            assert!(!style(tile).description.is_empty());
            assert!(paint(tile).to_string().contains(tile.to_char()));
        }
        assert_eq!(style(Tile::BoxOnTarget).description, "box on target");
    }
}
