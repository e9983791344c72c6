//! Error types for the game.
//!
//! The simulation itself never fails. Everything here comes from the
//! terminal we draw on, or from a configuration rejected at startup.
//! All of it is fatal: nothing is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnakeError {
    /// Reading events from, or writing to, the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal cannot hold the whole grid.
    #[error(
        "terminal is {actual_cols}x{actual_rows} but the grid needs {needed_cols}x{needed_rows}"
    )]
    TerminalTooSmall {
        needed_cols: u16,
        needed_rows: u16,
        actual_cols: u16,
        actual_rows: u16,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
