pub mod actions;
pub mod events;
pub mod state;

use crate::config::Config;
use crate::greeting::{self, Carousel};
use crate::input;
use crate::poller::{self, Poller};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, PollEvent};
use state::DisplayState;
use std::process::Stdio;
use std::time::Duration;
use tokio::sync::mpsc;

const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// Owns the display state and the poller; the only writer of [`DisplayState`].
pub struct App {
    cfg: Config,
    state: DisplayState,
    poller: Poller,
}

impl App {
    pub fn new(cfg: Config, poller: Poller) -> Self {
        let mut state = DisplayState::new(Carousel::new(cfg.greeting.entries.clone()));
        if let Some(hint) = cfg.history.setup_hint() {
            state.status = hint.to_string();
        }
        Self { cfg, state, poller }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.ui.mouse);
        poller::spawn_ticker(tx.clone(), Duration::from_secs(self.cfg.poll.interval_secs));
        greeting::spawn_ticker(
            tx.clone(),
            Duration::from_millis(self.cfg.greeting.interval_ms),
            Duration::from_millis(self.cfg.greeting.slide_ms),
        );
        spawn_frame_ticker(tx.clone());

        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(input_ev) {
                        self.handle_action(action, &tx);
                    }
                }
                Event::Poll(pe) => self.handle_poll(pe, &tx),
                Event::Greeting(ge) => self.state.greeting.on_event(ge),
                Event::Frame => {
                    self.state.tick = self.state.tick.wrapping_add(1);
                    // Only redraw while something moves or a pass is spinning.
                    if !self.state.advance_animations() && !self.state.in_flight {
                        continue;
                    }
                }
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Refresh => self.spawn_pass(tx),
            Action::OpenSource => {
                let url = self.state.now.as_ref().map(|t| t.source_url.clone());
                self.open_source(url);
            }
            Action::Click(column, row) => {
                if let Some(track) = self.state.track_at(column, row) {
                    let url = Some(track.source_url.clone());
                    self.open_source(url);
                }
            }
            Action::LyricsUp => {
                self.state.lyrics_scroll = self.state.lyrics_scroll.saturating_sub(1);
            }
            Action::LyricsDown => {
                self.state.lyrics_scroll = self.state.lyrics_scroll.saturating_add(1);
            }
            Action::Resize => {}
        }
    }

    fn handle_poll(&mut self, pe: PollEvent, tx: &mpsc::Sender<Event>) {
        match pe {
            PollEvent::Tick => self.spawn_pass(tx),
            PollEvent::Resolving(key) => self.state.start_resolving(&key),
            PollEvent::Completed(outcome) => self.state.apply_pass(*outcome),
            PollEvent::Failed(message) => {
                tracing::warn!("history poll failed: {message}");
                let message = match self.cfg.history.setup_hint() {
                    Some(hint) => format!("{message} ({hint})"),
                    None => message,
                };
                self.state.fail_pass(message);
            }
        }
    }

    fn spawn_pass(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(locked) = self.state.begin_pass() else {
            tracing::debug!("pass still running, skipping tick");
            return;
        };

        let poller = self.poller.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match poller.run_pass_reporting(locked.as_ref(), &tx).await {
                Ok(outcome) => PollEvent::Completed(Box::new(outcome)),
                Err(e) => PollEvent::Failed(format!("{e:#}")),
            };
            let _ = tx.send(Event::Poll(ev)).await;
        });
    }

    fn open_source(&mut self, url: Option<String>) {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            self.state.status = "No source URL for this track".into();
            return;
        };

        let program = self.cfg.ui.open_program().to_string();
        self.state.status = format!("Opening {url}");
        tokio::spawn(async move {
            let result = tokio::process::Command::new(&program)
                .arg(&url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            match result {
                Ok(status) if status.success() => {}
                Ok(status) => tracing::warn!(%program, %url, "open command exited with {status}"),
                Err(e) => tracing::warn!(%program, %url, "run open command: {e}"),
            }
        });
    }
}

fn spawn_frame_ticker(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(FRAME_INTERVAL);
        loop {
            interval.tick().await;
            if tx.send(Event::Frame).await.is_err() {
                break;
            }
        }
    });
}
