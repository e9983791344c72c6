//! The game loop.

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::render::{self, EventSource, Pacer, Surface};
use crate::session::Session;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Score of the last game played.
    pub score: usize,
    /// Loop iterations executed, prompt included.
    pub frames: u64,
}

/// Runs the session until it is terminated.
///
/// Each iteration drains input, updates the state, redraws it and waits
/// out the rest of the frame. Any error from the surface or the event
/// source ends the run.
pub fn run<R, S, E, P>(
    session: &mut Session<'_, R>,
    surface: &mut S,
    events: &mut E,
    pacer: &mut P,
) -> Result<Summary>
where
    R: Rng,
    S: Surface,
    E: EventSource,
    P: Pacer,
{
    let mut frames = 0;
    while !session.is_terminated() {
        let input = events.drain()?;
        session.tick(&input);
        if session.is_terminated() {
            break;
        }
        render::draw(surface, session)?;
        pacer.wait();
        frames += 1;
    }

    let summary = Summary {
        score: session.game().score(),
        frames,
    };
    info!(score = summary.score, frames = summary.frames, "loop finished");
    Ok(summary)
}
