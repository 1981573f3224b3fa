//! Greeting carousel: cycles "hello" in a few languages with a slide
//! transition. Independent of the now-playing pipeline.

use crate::app::events::{Event, GreetingEvent};
use crate::config::GreetingEntry;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Shown,
    /// Leaving to the right.
    SlidingOut,
    /// Next entry placed off to the left, about to settle.
    SlidingIn,
}

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    entries: Vec<GreetingEntry>,
    index: usize,
    phase: Phase,
}

impl Carousel {
    pub fn new(entries: Vec<GreetingEntry>) -> Self {
        Self {
            entries,
            index: 0,
            phase: Phase::Shown,
        }
    }

    pub fn current(&self) -> Option<&GreetingEntry> {
        self.entries.get(self.index)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Description label text; `None` hides the label.
    pub fn description(&self) -> Option<&str> {
        self.current()?.description.as_deref()
    }

    /// Horizontal offset in cells for the current phase.
    pub fn offset(&self) -> i16 {
        match self.phase {
            Phase::Shown => 0,
            Phase::SlidingOut => 4,
            Phase::SlidingIn => -4,
        }
    }

    pub fn on_event(&mut self, ev: GreetingEvent) {
        if self.entries.is_empty() {
            return;
        }
        match ev {
            GreetingEvent::SlideOut => self.phase = Phase::SlidingOut,
            GreetingEvent::Swap => {
                self.index = (self.index + 1) % self.entries.len();
                self.phase = Phase::SlidingIn;
            }
            GreetingEvent::Settle => self.phase = Phase::Shown,
        }
    }
}

/// Drive the carousel: every `interval` slide out, swap after `slide`, then settle.
pub fn spawn_ticker(tx: mpsc::Sender<Event>, interval: Duration, slide: Duration) {
    tokio::spawn(async move {
        let steps = [
            (interval, GreetingEvent::SlideOut),
            (slide, GreetingEvent::Swap),
            (slide / 2, GreetingEvent::Settle),
        ];
        loop {
            for (delay, ev) in steps {
                tokio::time::sleep(delay).await;
                if tx.send(Event::Greeting(ev)).await.is_err() {
                    return;
                }
            }
        }
    });
}
