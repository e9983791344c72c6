//! The play / game-over / quit state machine.
//!
//! [`Session::tick`] is the whole update step: it takes the events drained
//! this tick and moves the state forward. Drawing happens afterwards, from
//! whatever state this leaves behind.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::game::{Game, StepOutcome};
use crate::input::{InputEvent, Key, resolve_direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOverPrompt,
    Terminated,
}

pub struct Session<'a, R: Rng> {
    config: &'a Config,
    rng: R,
    game: Game,
    state: GameState,
    ticks: u64,
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(config: &'a Config, mut rng: R) -> Self {
        let game = Game::new(&config.grid, &mut rng);
        info!(head = ?game.head(), food = ?game.food(), "session started");
        Self {
            config,
            rng,
            game,
            state: GameState::Playing,
            ticks: 0,
        }
    }

    /// Starts in `Playing` with a game laid out by the caller.
    pub fn with_game(config: &'a Config, rng: R, game: Game) -> Self {
        Self {
            config,
            rng,
            game,
            state: GameState::Playing,
            ticks: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Ticks spent in `Playing` so far, across restarts.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_terminated(&self) -> bool {
        self.state == GameState::Terminated
    }

    /// Advances one tick given the events drained since the last one.
    pub fn tick(&mut self, events: &[InputEvent]) -> GameState {
        if events.contains(&InputEvent::QuitRequested) {
            info!(score = self.game.score(), "window closed");
            self.state = GameState::Terminated;
            return self.state;
        }

        match self.state {
            GameState::Playing => self.play(events),
            GameState::GameOverPrompt => self.prompt(events),
            GameState::Terminated => {}
        }
        self.state
    }

    fn play(&mut self, events: &[InputEvent]) {
        self.ticks += 1;

        if let Some(next) = resolve_direction(self.game.direction(), events) {
            if self.game.steer(next) {
                debug!(direction = ?next, "turned");
            }
        }

        match self.game.step(&self.config.grid, &mut self.rng) {
            StepOutcome::Moved => {
                trace!(tick = self.ticks, head = ?self.game.head(), "moved");
            }
            StepOutcome::Ate => {
                debug!(
                    score = self.game.score(),
                    food = ?self.game.food(),
                    "ate food"
                );
            }
            StepOutcome::Collided(cause) => {
                info!(?cause, score = self.game.score(), "game over");
                self.state = GameState::GameOverPrompt;
            }
        }
    }

    fn prompt(&mut self, events: &[InputEvent]) {
        // Only quit and restart mean anything here. The first one wins.
        for event in events {
            match event {
                InputEvent::KeyDown(Key::Quit) => {
                    info!(score = self.game.score(), "quit");
                    self.state = GameState::Terminated;
                    return;
                }
                InputEvent::KeyDown(Key::Restart) => {
                    self.restart();
                    return;
                }
                _ => {}
            }
        }
    }

    fn restart(&mut self) {
        self.game = Game::new(&self.config.grid, &mut self.rng);
        self.state = GameState::Playing;
        info!(head = ?self.game.head(), food = ?self.game.food(), "restarted");
    }
}
