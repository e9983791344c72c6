//! Game configuration.
//!
//! Everything tunable lives in one immutable [`Config`], built once at
//! startup and handed to the loop by reference.

use std::time::Duration;

use crate::error::{Result, SnakeError};
use crate::game::Grid;

/// Playfield width in pixels (40 terminal columns).
pub const DISPLAY_WIDTH: i32 = 400;

/// Playfield height in pixels (20 terminal rows).
pub const DISPLAY_HEIGHT: i32 = 200;

/// Size of one snake segment, and of one movement step, in pixels.
pub const SNAKE_BLOCK: i32 = 10;

/// Game ticks per second.
pub const SNAKE_SPEED: u32 = 15;

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const YELLOW: Rgb = Rgb(255, 255, 102);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(213, 50, 80);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
}

/// Which colour goes where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub snake: Rgb,
    pub food: Rgb,
    pub score: Rgb,
    pub message: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            snake: Rgb::GREEN,
            food: Rgb::RED,
            score: Rgb::YELLOW,
            message: Rgb::RED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub grid: Grid,
    /// Target number of ticks per second.
    pub ticks_per_second: u32,
    pub palette: Palette,
    pub game_over_message: String,
    pub score_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: Grid::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, SNAKE_BLOCK),
            ticks_per_second: SNAKE_SPEED,
            palette: Palette::default(),
            game_over_message: "You Lost! Press Q-Quit or C-Play Again".to_string(),
            score_label: "Score: ".to_string(),
        }
    }
}

impl Config {
    /// How long one tick should take at the configured rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Rejects geometry the game can't play on.
    ///
    /// Food is sampled from `[0, width - block)`, so each axis needs room
    /// for at least two blocks.
    pub fn validate(&self) -> Result<()> {
        let Grid {
            width,
            height,
            block,
        } = self.grid;

        if block <= 0 {
            return Err(SnakeError::InvalidConfig(format!(
                "block size must be positive, got {block}"
            )));
        }
        if width % block != 0 || height % block != 0 {
            return Err(SnakeError::InvalidConfig(format!(
                "{width}x{height} is not a multiple of the block size {block}"
            )));
        }
        if width < 2 * block || height < 2 * block {
            return Err(SnakeError::InvalidConfig(format!(
                "{width}x{height} must be at least two blocks on each side"
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(SnakeError::InvalidConfig(
                "tick rate must be at least one tick per second".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.columns(), 40);
        assert_eq!(config.grid.rows(), 20);
    }

    #[test]
    fn test_tick_interval() {
        let config = Config::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1) / 15);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let mut config = Config::default();
        config.grid = Grid::new(405, 200, 10);
        assert!(matches!(
            config.validate(),
            Err(SnakeError::InvalidConfig(_))
        ));

        config.grid = Grid::new(10, 200, 10);
        assert!(config.validate().is_err());

        config.grid = Grid::new(400, 200, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let config = Config {
            ticks_per_second: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
