//! The terminal as the game's window, keyboard and clock.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, info};

use crate::config::Rgb;
use crate::error::{Result, SnakeError};
use crate::game::{Grid, Point};
use crate::input::{InputEvent, Key};
use crate::render::{EventSource, Font, Pacer, Rect, Surface};

/// Puts the terminal into game mode and restores it when dropped, however
/// the program leaves the loop.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Checks the terminal can hold the grid, then switches to raw mode on
    /// the alternate screen with the cursor hidden.
    pub fn enter(grid: &Grid) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        fits(grid, cols, rows)?;

        // Built before touching the terminal so a failure halfway still
        // gets undone.
        let guard = TerminalGuard;
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        info!(cols, rows, "terminal ready");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(Show);
        let _ = io::stdout().execute(LeaveAlternateScreen);
    }
}

/// Fails with [`SnakeError::TerminalTooSmall`] if a `cols` x `rows`
/// terminal can't show every cell of `grid` plus the wall drawn along its
/// right and bottom edges.
pub fn fits(grid: &Grid, cols: u16, rows: u16) -> Result<()> {
    let needed_cols = u16::try_from(grid.columns() + 1).unwrap_or(u16::MAX);
    let needed_rows = u16::try_from(grid.rows() + 1).unwrap_or(u16::MAX);
    if cols < needed_cols || rows < needed_rows {
        return Err(SnakeError::TerminalTooSmall {
            needed_cols,
            needed_rows,
            actual_cols: cols,
            actual_rows: rows,
        });
    }
    Ok(())
}

/// Draws onto a terminal, one character cell per grid block.
///
/// The grid sits in the top-left corner. The terminal's own top and left
/// edges are the walls there; the right and bottom walls are drawn one
/// cell outside the grid.
pub struct TerminalSurface<W: Write> {
    out: W,
    block: i32,
    columns: u16,
    rows: u16,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(grid: &Grid) -> Self {
        Self::new(io::stdout(), grid)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, grid: &Grid) -> Self {
        Self {
            out,
            block: grid.block,
            columns: u16::try_from(grid.columns()).unwrap_or(u16::MAX),
            rows: u16::try_from(grid.rows()).unwrap_or(u16::MAX),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Pixel position to character cell. `None` when off the top or left.
    fn cell(&self, at: Point) -> Option<(u16, u16)> {
        let col = u16::try_from(at.x / self.block).ok()?;
        let row = u16::try_from(at.y / self.block).ok()?;
        (at.x >= 0 && at.y >= 0).then_some((col, row))
    }
}

/// Colour of the wall drawn around the playfield.
const WALL: Color = Color::Grey;

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb { r, g, b }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self, background: Rgb) -> Result<()> {
        // Wipe with the terminal's own colours first, so whatever lies past
        // the playfield stays plain.
        self.out
            .queue(ResetColor)?
            .queue(Clear(ClearType::All))?
            .queue(SetBackgroundColor(color(background)))?;

        // Paint the background over the grid only.
        let blank = " ".repeat(usize::from(self.columns));
        for row in 0..self.rows {
            self.out.queue(MoveTo(0, row))?.queue(Print(&blank))?;
        }

        // The right and bottom walls, just outside the grid.
        self.out.queue(SetForegroundColor(WALL))?;
        for row in 0..=self.rows {
            self.out.queue(MoveTo(self.columns, row))?.queue(Print("▓"))?;
        }
        let floor = "▓".repeat(usize::from(self.columns));
        self.out.queue(MoveTo(0, self.rows))?.queue(Print(floor))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, fill: Rgb) -> Result<()> {
        self.out.queue(SetForegroundColor(color(fill)))?;
        for y in (rect.y..rect.y + rect.height).step_by(self.block as usize) {
            for x in (rect.x..rect.x + rect.width).step_by(self.block as usize) {
                if let Some((col, row)) = self.cell(Point::new(x, y)) {
                    self.out.queue(MoveTo(col, row))?.queue(Print("█"))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, fill: Rgb, font: Font, at: Point) -> Result<()> {
        let Some((col, row)) = self.cell(at) else {
            return Ok(());
        };
        let weight = match font {
            Font::Message => Attribute::NormalIntensity,
            Font::Score => Attribute::Bold,
        };
        self.out
            .queue(MoveTo(col, row))?
            .queue(SetForegroundColor(color(fill)))?
            .queue(SetAttribute(weight))?
            .queue(Print(text))?
            .queue(SetAttribute(Attribute::NormalIntensity))?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Keyboard input from crossterm's event queue.
#[derive(Debug, Default)]
pub struct KeyboardEvents;

impl EventSource for KeyboardEvents {
    fn drain(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        // A zero timeout only reports what's already queued.
        while event::poll(Duration::ZERO)? {
            if let Some(input) = translate(event::read()?) {
                events.push(input);
            }
        }
        Ok(events)
    }
}

/// Maps a terminal event onto a game event. Anything that isn't a key
/// press is dropped.
pub fn translate(event: Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };
    // Some platforms report releases and repeats too; only the press counts,
    // otherwise one tap would turn up as several events.
    if kind != KeyEventKind::Press {
        return None;
    }

    let key = match code {
        // Esc and Ctrl+C stand in for closing the window.
        KeyCode::Esc => return Some(InputEvent::QuitRequested),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(InputEvent::QuitRequested);
        }
        // Arrows or WASD, whichever the player's hands are on.
        KeyCode::Up | KeyCode::Char('w') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') => Key::Down,
        KeyCode::Left | KeyCode::Char('a') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') => Key::Right,
        // Only meaningful on the game-over screen; the session ignores them
        // while playing.
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Char('c') | KeyCode::Char('r') => Key::Restart,
        _ => Key::Other,
    };
    Some(InputEvent::KeyDown(key))
}

/// Sleeps away whatever is left of each frame interval.
///
/// A frame that overruns is simply late: nothing is made up afterwards.
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
}

impl Pacer for FrameClock {
    fn wait(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.interval {
            thread::sleep(self.interval - elapsed);
        } else {
            debug!(?elapsed, budget = ?self.interval, "frame overran");
        }
        self.last = Instant::now();
    }
}
