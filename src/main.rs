#[macro_use]
extern crate log;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

use ansi_term::Colour::{Green, Yellow};
use clap::Parser;

use sokoban_backend::account::{AccountError, Accounts};
use sokoban_backend::record::MemoryStore;
use sokoban_backend::style::paint;
use sokoban_backend::*;

/// Push all boxes onto the targets.
#[derive(Debug, Parser)]
#[clap(name = "sokoban", version)]
struct Options {
    /// Level catalog in JSON format (defaults to levels.json in the configuration directory, if
    /// present, or the built-in levels)
    #[clap(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// The level to start with
    #[clap(short, long, default_value = "1")]
    level: usize,

    /// Record solved levels for this user
    #[clap(short, long)]
    user: Option<String>,

    /// The user's password; unknown users are registered with it
    #[clap(short, long, requires = "user")]
    password: Option<String>,

    /// File of registered users (defaults to users.txt in the configuration directory)
    #[clap(long, value_name = "FILE")]
    accounts: Option<PathBuf>,
}

const HELP: &str = "w/a/s/d or k/h/j/l: move   r: restart   n/p: next/previous level   \
                    ?: history   q: quit";

fn main() {
    colog::init();
    let options = Options::parse();

    if let Err(e) = run(&options) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn load_catalog(options: &Options) -> Result<Catalog, SokobanError> {
    match options.catalog.clone().or_else(default_catalog_path) {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::builtin()),
    }
}

fn run(options: &Options) -> Result<(), SokobanError> {
    let catalog = load_catalog(options)?;
    let mut game = Game::with_level(catalog, options.level.saturating_sub(1))?;
    if let Some(ref user) = options.user {
        game.set_user(user)?;
        log_in(options, user)?;
    }
    game.set_store(Box::new(MemoryStore::new()));

    let (sender, receiver) = channel();
    game.subscribe(sender);

    println!("{}", Yellow.paint(HELP));
    report(&game, &receiver)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        for c in line?.chars().filter(|c| !c.is_whitespace()) {
            match c {
                'q' => return Ok(()),
                '?' => print_history(&game),
                _ => match Command::try_from(c) {
                    Ok(cmd) => game.execute(&cmd),
                    Err(c) => warn!("Unknown key: {}", c),
                },
            }
        }
        report(&game, &receiver)?;
    }

    Ok(())
}

/// Check the password of a registered user, or register a new one.
fn log_in(options: &Options, user: &str) -> Result<(), SokobanError> {
    let path = match options.accounts.clone().or_else(default_accounts_path) {
        Some(path) => path,
        None => {
            warn!("No place to keep accounts, playing as {} without a password", user);
            return Ok(());
        }
    };
    let mut accounts = if path.is_file() {
        Accounts::from_reader(BufReader::new(File::open(&path)?))?
    } else {
        Accounts::new()
    };
    let password = options.password.as_deref().unwrap_or("");

    match accounts.authenticate(user, password) {
        Err(AccountError::UnknownUser(_)) => {
            accounts.register(user, password, password)?;
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            accounts.write_to(File::create(&path)?)?;
            info!("Saved accounts to {}", path.display());
            Ok(())
        }
        result => result.map_err(SokobanError::from),
    }
}

/// Tell the user about anything noteworthy that happened and show the board.
fn report(game: &Game, receiver: &Receiver<Event>) -> io::Result<()> {
    for event in receiver.try_iter() {
        match event {
            Event::LevelFinished {
                moves, last_level, ..
            } => {
                println!("{}", Green.bold().paint(format!("Solved in {} moves!", moves)));
                if last_level {
                    println!("{}", Green.paint("You have solved all levels."));
                } else {
                    println!("Press n for the next level.");
                }
            }
            Event::RecordFailed(e) => println!("Could not record the result: {}", e),
            Event::NoPreviousLevel => println!("This is the first level."),
            Event::EndOfCollection => println!("This is the last level."),
            _ => {}
        }
    }

    let board = game.board();
    println!();
    for row in board.tiles().chunks(board.columns()) {
        let line: String = row.iter().map(|&tile| paint(tile).to_string()).collect();
        println!("  {}", line);
    }
    println!(
        "{} ({}/{})   moves: {}   boxes left: {}",
        game.level_name(),
        game.level_index() + 1,
        game.level_count(),
        game.number_of_moves(),
        game.boxes_remaining()
    );
    print!("> ");
    io::stdout().flush()
}

fn print_history(game: &Game) {
    let user = match game.user() {
        Some(user) => user,
        None => {
            println!("Start with --user to keep a history.");
            return;
        }
    };

    match game.history() {
        Ok(records) if records.is_empty() => println!("No levels solved by {} yet.", user),
        Ok(records) => {
            println!("{}", Yellow.bold().paint(format!("Levels solved by {}", user)));
            for record in records {
                let when = record
                    .played_at()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                println!("Level {}: {} moves ({})", record.level + 1, record.moves, when);
            }
        }
        Err(e) => error!("Failed to read the history: {}", e),
    }
}
