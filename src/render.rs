//! What the loop needs from the outside world, and how a frame is drawn.
//!
//! The traits here are the seams between the game and the terminal. The
//! draw routines only read a [`Session`]; they never change it.

use rand::Rng;

use crate::config::{Config, Rgb};
use crate::error::Result;
use crate::game::{Grid, Point};
use crate::input::InputEvent;
use crate::session::{GameState, Session};

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The square covering one grid cell.
    pub fn block(at: Point, block: i32) -> Self {
        Self {
            x: at.x,
            y: at.y,
            width: block,
            height: block,
        }
    }
}

/// Text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Message,
    Score,
}

/// A fixed-size drawing surface.
pub trait Surface {
    fn clear(&mut self, color: Rgb) -> Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;
    fn draw_text(&mut self, text: &str, color: Rgb, font: Font, at: Point) -> Result<()>;
    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> Result<()>;
}

/// A queue of pending input events.
pub trait EventSource {
    /// Takes every event that is waiting right now, without blocking.
    fn drain(&mut self) -> Result<Vec<InputEvent>>;
}

/// Keeps the loop at a fixed rate.
pub trait Pacer {
    /// Blocks until one frame interval has passed since the previous call.
    fn wait(&mut self);
}

/// Draws whatever the session's state calls for and presents it.
pub fn draw<S: Surface, R: Rng>(surface: &mut S, session: &Session<'_, R>) -> Result<()> {
    match session.state() {
        GameState::Playing => draw_playing(surface, session)?,
        GameState::GameOverPrompt => draw_game_over(surface, session)?,
        GameState::Terminated => return Ok(()),
    }
    surface.present()
}

fn draw_playing<S: Surface, R: Rng>(surface: &mut S, session: &Session<'_, R>) -> Result<()> {
    let config = session.config();
    let game = session.game();
    let block = config.grid.block;

    surface.clear(config.palette.background)?;
    surface.fill_rect(Rect::block(game.food(), block), config.palette.food)?;
    for segment in game.body() {
        surface.fill_rect(Rect::block(*segment, block), config.palette.snake)?;
    }
    draw_score(surface, config, game.score())
}

fn draw_game_over<S: Surface, R: Rng>(surface: &mut S, session: &Session<'_, R>) -> Result<()> {
    let config = session.config();
    let grid = config.grid;

    surface.clear(config.palette.background)?;
    let (text, at) = fit_text(
        &grid,
        &config.game_over_message,
        Point::new(grid.width / 6, grid.height / 3),
    );
    surface.draw_text(text, config.palette.message, Font::Message, at)?;
    draw_score(surface, config, session.game().score())
}

fn draw_score<S: Surface>(surface: &mut S, config: &Config, score: usize) -> Result<()> {
    let label = format!("{}{}", config.score_label, score);
    let (text, at) = fit_text(&config.grid, &label, Point::new(0, 0));
    surface.draw_text(text, config.palette.score, Font::Score, at)
}

/// Keeps a one-line label inside the grid, one character per block.
///
/// The label is shifted left until its last character lands on the last
/// column, and cut short if it is wider than the grid itself.
pub fn fit_text<'t>(grid: &Grid, text: &'t str, preferred: Point) -> (&'t str, Point) {
    let columns = usize::try_from(grid.columns()).unwrap_or(0);
    let text = match text.char_indices().nth(columns) {
        Some((end, _)) => &text[..end],
        None => text,
    };

    // `text` is at most `columns` characters now, so this can't go negative.
    let width = text.chars().count() as i32 * grid.block;
    let x = preferred.x.min(grid.width - width).max(0);
    let x = x / grid.block * grid.block;
    (text, Point::new(x, preferred.y))
}
