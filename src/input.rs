//! Discrete input events, independent of where they come from.

use crate::game::Direction;

/// A key the game cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Leave from the game-over prompt.
    Quit,
    /// Start over from the game-over prompt.
    Restart,
    /// Anything else. Ignored everywhere.
    Other,
}

impl Key {
    /// The direction an arrow key points in, if it is one.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Quit | Key::Restart | Key::Other => None,
        }
    }
}

/// One event drained from the input queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the game window. Honoured in every state.
    QuitRequested,
    KeyDown(Key),
}

/// Picks this tick's direction from the drained events.
///
/// The first directional key that turns onto the other axis wins and
/// locks the direction for the tick; later keys are ignored, so two quick
/// presses can't fold the snake back onto itself.
pub fn resolve_direction(current: Direction, events: &[InputEvent]) -> Option<Direction> {
    events.iter().find_map(|event| match event {
        InputEvent::KeyDown(key) => key.direction().filter(|next| current.can_turn_to(*next)),
        InputEvent::QuitRequested => None,
    })
}
