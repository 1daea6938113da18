//! Records of solved levels, as handed to whoever keeps the players' history.

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};

/// One solved level: who, which level, in how many moves and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub user: String,

    /// Index of the level in its catalog, starting at 0.
    pub level: usize,

    pub moves: usize,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("malformed record '{line}': {reason}")]
    Malformed { line: String, reason: String },
}

impl GameRecord {
    /// A record for a level solved just now.
    pub fn now<S: Into<String>>(user: S, level: usize, moves: usize) -> Self {
        GameRecord {
            user: user.into(),
            level,
            moves,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// `user|level|moves|timestamp`
impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.user, self.level, self.moves, self.timestamp
        )
    }
}

impl FromStr for GameRecord {
    type Err = StoreError;

    fn from_str(line: &str) -> Result<Self, StoreError> {
        let malformed = |reason: &str| StoreError::Malformed {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<_> = line.split('|').collect();
        if parts.len() != 4 {
            return Err(malformed("expected four fields"));
        }

        Ok(GameRecord {
            user: parts[0].to_string(),
            level: parts[1].parse().map_err(|_| malformed("invalid level"))?,
            moves: parts[2].parse().map_err(|_| malformed("invalid number of moves"))?,
            timestamp: parts[3].parse().map_err(|_| malformed("invalid timestamp"))?,
        })
    }
}

/// Read all records belonging to `user` from a line-oriented record stream.
pub fn read_history<R: BufRead>(reader: R, user: &str) -> Result<Vec<GameRecord>, StoreError> {
    let mut records = vec![];
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: GameRecord = line.parse()?;
        if record.user == user {
            records.push(record);
        }
    }
    Ok(records)
}

/// Somewhere solved levels can be recorded and looked up again.
pub trait RecordStore {
    fn append(&mut self, record: &GameRecord) -> Result<(), StoreError>;

    /// All records of the given user, oldest first.
    fn history(&self, user: &str) -> Result<Vec<GameRecord>, StoreError>;
}

/// Keeps the encoded records in memory for as long as the game runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lines: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl RecordStore for MemoryStore {
    fn append(&mut self, record: &GameRecord) -> Result<(), StoreError> {
        self.lines.push(record.to_string());
        Ok(())
    }

    fn history(&self, user: &str) -> Result<Vec<GameRecord>, StoreError> {
        read_history(self.lines.join("\n").as_bytes(), user)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn records_are_pipe_delimited() {
        let record = GameRecord {
            user: "alice".into(),
            level: 2,
            moves: 31,
            timestamp: 1_700_000_000_000,
        };
        assert_eq!(record.to_string(), "alice|2|31|1700000000000");
        assert_eq!("alice|2|31|1700000000000".parse::<GameRecord>().unwrap(), record);
        assert_eq!(
            record.played_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn malformed_lines_are_rejected() {
        for line in &["alice|2|31", "alice|x|31|0", "alice|2|-1|0", "a|1|2|3|4"] {
            assert!(matches!(
                line.parse::<GameRecord>(),
                Err(StoreError::Malformed { .. })
            ));
        }
    }

    #[test]
    fn history_is_filtered_by_user() {
        let input = "alice|0|3|10\n\nbob|0|5|20\nalice|1|10|30\n";
        let history = read_history(input.as_bytes(), "alice").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].level, 0);
        assert_eq!(history[1].moves, 10);
        assert!(read_history(input.as_bytes(), "carol").unwrap().is_empty());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.append(&GameRecord::now("alice", 0, 3)).unwrap();
        store.append(&GameRecord::now("bob", 1, 7)).unwrap();
        assert_eq!(store.lines().len(), 2);

        let history = store.history("bob").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!((history[0].level, history[0].moves), (1, 7));
        assert!(history[0].played_at().is_some());
    }
}
