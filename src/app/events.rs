use crate::poller::PassOutcome;
use crate::scrobble::TrackKey;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Poll(PollEvent),
    Greeting(GreetingEvent),
    /// Animation frame.
    Frame,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum PollEvent {
    Tick,
    /// A pass found a head that is not locked and is fetching art and lyrics.
    Resolving(TrackKey),
    Completed(Box<PassOutcome>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingEvent {
    SlideOut,
    Swap,
    Settle,
}
