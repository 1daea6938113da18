use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

lazy_static! {
    /// Where per-user configuration such as a custom level catalog lives.
    pub static ref CONFIG_DIR: Option<PathBuf> =
        ProjectDirs::from("", "", "sokoban-lite").map(|dirs| dirs.config_dir().to_path_buf());
}

/// The level catalog used when none is given explicitly, if the user has created one.
pub fn default_catalog_path() -> Option<PathBuf> {
    CONFIG_DIR
        .as_ref()
        .map(|dir| dir.join("levels.json"))
        .filter(|path| path.is_file())
}

/// Where user names and password hashes are kept unless given explicitly.
pub fn default_accounts_path() -> Option<PathBuf> {
    CONFIG_DIR.as_ref().map(|dir| dir.join("users.txt"))
}

#[derive(Debug, thiserror::Error)]
pub enum SokobanError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid level catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Account(#[from] crate::account::AccountError),

    #[error("there is no level {index}, the catalog contains {count} levels")]
    InvalidLevelIndex { index: usize, count: usize },

    #[error("the level catalog does not contain any levels")]
    EmptyCatalog,

    #[error("{0}: no level description found")]
    EmptyLevel(String),

    #[error("{level}: row {row} has {found} cells, expected {expected}")]
    RaggedLevel {
        level: String,
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("{level}: unknown tile id {id} in row {row}, column {column}")]
    UnknownTile {
        level: String,
        id: i32,
        row: usize,
        column: usize,
    },

    #[error("{level}: invalid character '{chr}' in row {row}, column {column}")]
    InvalidCharacter {
        level: String,
        chr: char,
        row: usize,
        column: usize,
    },

    #[error("{0}: no player found")]
    NoPlayer(String),

    #[error("{0}: more than one player found")]
    TwoPlayers(String),

    #[error("{0}: there are more boxes than targets (targets minus boxes: {1})")]
    CratesGoalsMismatch(String, i32),
}
