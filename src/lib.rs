//! The rules of Sokoban on a fixed catalog of levels, together with the bits a front end needs
//! around them: a game session, records of solved levels and simple user accounts.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod account;
mod board;
mod catalog;
mod command;
mod direction;
mod event;
mod game;
mod level;
mod move_;
mod position;
pub mod record;
pub mod style;
mod tile;
mod util;

pub use crate::board::*;
pub use crate::catalog::*;
pub use crate::command::*;
pub use crate::direction::*;
pub use crate::event::*;
pub use crate::game::*;
pub use crate::level::*;
pub use crate::move_::*;
pub use crate::position::*;
pub use crate::tile::*;
pub use crate::util::*;
