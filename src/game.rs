use std::sync::mpsc::Sender;

use crate::account::{check_username, AccountError};
use crate::board::Board;
use crate::catalog::Catalog;
use crate::command::Command;
use crate::direction::Direction;
use crate::event::Event;
use crate::record::{GameRecord, RecordStore, StoreError};
use crate::util::SokobanError;

/// A game session: the level catalog, the level currently being played and whoever is playing.
pub struct Game {
    catalog: Catalog,

    /// Index of the current level in the catalog.
    index: usize,

    /// The current level as it is being played.
    board: Board,

    /// The player's name, if they logged in.
    user: Option<String>,

    /// Where solved levels are recorded.
    store: Option<Box<dyn RecordStore>>,

    listener: Option<Sender<Event>>,
}

/// Handling events
impl Game {
    pub fn subscribe(&mut self, sender: Sender<Event>) {
        self.listener = Some(sender);
        self.on_load_level();
    }

    fn notify(&self, event: Event) {
        if let Some(ref sender) = self.listener {
            // Nobody listening any more is not our problem.
            let _ = sender.send(event);
        }
    }

    fn on_load_level(&self) {
        self.notify(Event::InitialLevelState {
            index: self.index,
            count: self.level_count(),
            columns: self.board.columns(),
            rows: self.board.rows(),
            tiles: self.board.tiles().to_vec(),
            player_position: self.board.player_position(),
            boxes_remaining: self.board.boxes_remaining(),
        });
    }
}

impl Game {
    /// Start with the first level of the catalog.
    pub fn new(catalog: Catalog) -> Result<Self, SokobanError> {
        Game::with_level(catalog, 0)
    }

    /// Start with the level with the given index.
    pub fn with_level(catalog: Catalog, index: usize) -> Result<Self, SokobanError> {
        let board = catalog.board(index)?;
        info!("Starting at {} of {}", catalog.levels()[index].name(), catalog.name());
        Ok(Game {
            catalog,
            index,
            board,
            user: None,
            store: None,
            listener: None,
        })
    }

    /// Log in. Names that cannot be written to a record are rejected.
    pub fn set_user(&mut self, user: &str) -> Result<(), AccountError> {
        let user = check_username(user)?;
        info!("Playing as {}", user);
        self.user = Some(user.to_string());
        Ok(())
    }

    pub fn log_out(&mut self) {
        self.user = None;
    }

    pub fn set_store(&mut self, store: Box<dyn RecordStore>) {
        self.store = Some(store);
    }

    /// Execute a command from the front end.
    pub fn execute(&mut self, cmd: &Command) {
        match *cmd {
            Command::Move(direction) => {
                self.try_move(direction);
            }
            Command::Restart => self.reset_level(),
            Command::PreviousLevel => self.previous_level(),
            Command::NextLevel => self.next_level(),
        }
    }

    /// Switch to the level with the given index.
    pub fn load_level(&mut self, index: usize) -> Result<(), SokobanError> {
        self.board = self.catalog.board(index)?;
        self.index = index;
        info!("Loaded {}", self.level_name());
        self.on_load_level();
        Ok(())
    }

    /// Move the player one step, report whether that was possible.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let was_won = self.board.is_won();
        let from = self.board.player_position();

        match self.board.try_move(direction) {
            Ok(r#move) => {
                let to = self.board.player_position();
                if r#move.moves_crate {
                    self.notify(Event::MoveCrate {
                        from: to,
                        to: to.neighbour(direction),
                    });
                }
                self.notify(Event::MoveWorker {
                    from,
                    to,
                    direction,
                });

                if !was_won && self.board.is_won() {
                    self.on_level_finished();
                }
                true
            }
            Err(blocked) => {
                self.notify(Event::CannotMove(blocked.with_crate, blocked.obstacle));
                false
            }
        }
    }

    // Access data concerning the current level

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The index of the current level, starting at 0.
    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn level_name(&self) -> &str {
        self.catalog.levels()[self.index].name()
    }

    /// Is the current level the last one in the catalog?
    pub fn is_last_level(&self) -> bool {
        self.index + 1 == self.level_count()
    }

    /// The number of moves performed since (re)starting this level.
    pub fn number_of_moves(&self) -> usize {
        self.board.number_of_moves()
    }

    pub fn boxes_remaining(&self) -> usize {
        self.board.boxes_remaining()
    }

    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The levels the current user has solved so far.
    pub fn history(&self) -> Result<Vec<GameRecord>, StoreError> {
        match (&self.user, &self.store) {
            (Some(user), Some(store)) => store.history(user),
            _ => Ok(vec![]),
        }
    }
}

impl Game {
    fn on_level_finished(&mut self) {
        let moves = self.board.number_of_moves();
        info!("{} solved in {} moves", self.level_name(), moves);
        self.notify(Event::LevelFinished {
            index: self.index,
            moves,
            last_level: self.is_last_level(),
        });

        let result = match (&self.user, self.store.as_mut()) {
            (Some(user), Some(store)) => {
                let record = GameRecord::now(user.as_str(), self.index, moves);
                Some(store.append(&record).map(|()| record))
            }
            _ => None,
        };
        match result {
            Some(Ok(record)) => self.notify(Event::RecordSaved(record)),
            Some(Err(e)) => {
                error!("Failed to save record: {}", e);
                self.notify(Event::RecordFailed(e.to_string()));
            }
            None => {}
        }
    }

    /// Replace the current board by a clean copy of the level.
    fn reset_level(&mut self) {
        self.board = Board::from(&self.catalog.levels()[self.index]);
        self.on_load_level();
    }

    fn next_level(&mut self) {
        if self.is_last_level() {
            warn!("There is no level after {}", self.level_name());
            self.notify(Event::EndOfCollection);
        } else if let Err(e) = self.load_level(self.index + 1) {
            error!("{}", e);
        }
    }

    /// Go to the previous level unless this is already the first level.
    fn previous_level(&mut self) {
        if self.index == 0 {
            warn!("There is no level before {}", self.level_name());
            self.notify(Event::NoPreviousLevel);
        } else if let Err(e) = self.load_level(self.index - 1) {
            error!("{}", e);
        }
    }
}
