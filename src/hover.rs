//! Delayed video preview for project cards.
//!
//! Each card owns its own pending timer: entering a card arms a delay for that
//! card only, leaving it cancels that card's timer and resets its playback.

use std::collections::HashMap;
use std::rc::Rc;

/// Runs a task once after a delay.
///
/// Dropping the returned handle must cancel the task if it has not run yet.
pub trait DelayScheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// The media attached to a card.
pub trait Playback {
    /// Starts playback. Failures to start are discarded by the implementation.
    fn play(&self);

    /// Pauses and rewinds to the start.
    fn reset(&self);
}

pub struct HoverPreview<S: DelayScheduler> {
    scheduler: S,
    delay_ms: u32,
    timers: HashMap<usize, S::Handle>,
}

impl<S: DelayScheduler> HoverPreview<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            timers: HashMap::new(),
        }
    }

    pub fn pointer_enter<P: Playback + 'static>(&mut self, card: usize, playback: Rc<P>) {
        let handle = self
            .scheduler
            .schedule(self.delay_ms, Box::new(move || playback.play()));
        // Replacing an entry drops, and so cancels, a timer still pending for this card.
        self.timers.insert(card, handle);
    }

    pub fn pointer_leave<P: Playback + ?Sized>(&mut self, card: usize, playback: &P) {
        self.timers.remove(&card);
        playback.reset();
    }

    /// Number of cards holding a timer handle (fired or not).
    #[cfg(test)]
    pub fn armed_cards(&self) -> usize {
        self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }
}
