use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::board::Board;
use crate::level::Level;
use crate::util::SokobanError;

/// An ordered, immutable collection of levels.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    levels: Vec<Level>,
}

/// The on-disc format of a catalog.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    name: Option<String>,
    levels: Vec<LevelFile>,
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    #[serde(default)]
    name: Option<String>,
    grid: Grid,
}

/// Either rows of tile ids or rows of level characters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Grid {
    Ids(Vec<Vec<i32>>),
    Text(Vec<String>),
}

impl Catalog {
    pub fn new<S: Into<String>>(name: S, levels: Vec<Level>) -> Result<Self, SokobanError> {
        if levels.is_empty() {
            return Err(SokobanError::EmptyCatalog);
        }
        Ok(Catalog {
            name: name.into(),
            levels,
        })
    }

    /// The levels shipped with the game.
    pub fn builtin() -> Self {
        let levels: &[&[&[i32]]] = &[
            &[
                &[1, 1, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 0, 1],
                &[1, 0, 4, 3, 0, 0, 1],
                &[1, 0, 0, 0, 0, 2, 1],
                &[1, 1, 1, 1, 1, 1, 1],
            ],
            &[
                &[1, 1, 1, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 0, 0, 1],
                &[1, 0, 4, 3, 0, 3, 4, 1],
                &[1, 0, 0, 0, 2, 0, 0, 1],
                &[1, 0, 4, 3, 0, 3, 4, 1],
                &[1, 0, 0, 0, 0, 0, 0, 1],
                &[1, 1, 1, 1, 1, 1, 1, 1],
            ],
            &[
                &[1, 1, 1, 1, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 0, 0, 0, 1],
                &[1, 0, 4, 0, 3, 0, 4, 0, 1],
                &[1, 0, 0, 1, 1, 1, 0, 0, 1],
                &[1, 0, 3, 0, 2, 0, 3, 0, 1],
                &[1, 0, 4, 0, 3, 0, 4, 0, 1],
                &[1, 0, 0, 0, 0, 0, 0, 0, 1],
                &[1, 1, 1, 1, 1, 1, 1, 1, 1],
            ],
        ];

        let levels = levels
            .iter()
            .enumerate()
            .map(|(i, grid)| {
                let grid: Vec<Vec<i32>> = grid.iter().map(|row| row.to_vec()).collect();
                Level::from_ids(format!("Level {}", i + 1), &grid)
            })
            .collect::<Result<Vec<_>, _>>()
            .and_then(|levels| Catalog::new("Built-in", levels));

        // Fixed data, checked by `builtin_levels`.
        levels.expect("the built-in levels are valid")
    }

    /// Read a catalog in JSON format.
    pub fn from_json<R: Read>(reader: R) -> Result<Self, SokobanError> {
        let file: CatalogFile = serde_json::from_reader(reader)?;

        let levels = file
            .levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let name = level
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Level {}", i + 1));
                match &level.grid {
                    Grid::Ids(rows) => Level::from_ids(name, rows),
                    Grid::Text(lines) => Level::parse(name, &lines.join("\n")),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(file.name.unwrap_or_else(|| "Custom".into()), levels)
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SokobanError> {
        let path = path.as_ref();
        info!("Loading level catalog {}", path.display());
        let file = File::open(path)?;
        Catalog::from_json(BufReader::new(file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Result<&Level, SokobanError> {
        self.levels
            .get(index)
            .ok_or(SokobanError::InvalidLevelIndex {
                index,
                count: self.len(),
            })
    }

    /// A fresh board for the level with the given index.
    pub fn board(&self, index: usize) -> Result<Board, SokobanError> {
        self.level(index).map(Board::from)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}
