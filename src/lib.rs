//! Snake in the terminal.
//!
//! The snake moves one block per tick, grows by one for every piece of
//! food it eats, and the game ends when it runs into a wall or into
//! itself. From the game-over screen you can quit or play again.
//!
//! Rules ([`game`], [`session`]) are kept apart from drawing and input
//! ([`render`], [`terminal`]) so they can be exercised without a terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod session;
pub mod terminal;

pub use config::Config;
pub use error::{Result, SnakeError};
pub use game::{Direction, Game, Grid, Point};
pub use session::{GameState, Session};
