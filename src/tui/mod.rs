use crate::app::state::DisplayState;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, Write};

pub mod theme;
pub mod widgets;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen for as long as it lives. Mouse capture
/// is only requested when clicks are wanted, so terminal selection keeps
/// working otherwise.
pub struct TerminalGuard {
    terminal: TuiTerminal,
    mouse: bool,
}

impl TerminalGuard {
    pub fn enter(mouse: bool) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;

        let mut stdout = io::stdout();
        if let Err(e) = enter_screen(&mut stdout, mouse) {
            let _ = disable_raw_mode();
            return Err(e).context("enter alt screen");
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
        Ok(Self { terminal, mouse })
    }

    pub fn terminal_mut(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout(), self.mouse);
        let _ = self.terminal.show_cursor();
    }
}

fn enter_screen(w: &mut impl Write, mouse: bool) -> io::Result<()> {
    execute!(w, EnterAlternateScreen)?;
    if mouse {
        execute!(w, EnableMouseCapture)?;
    }
    Ok(())
}

fn leave_screen(w: &mut impl Write, mouse: bool) -> io::Result<()> {
    if mouse {
        execute!(w, DisableMouseCapture)?;
    }
    execute!(w, LeaveAlternateScreen)
}

pub fn draw(terminal: &mut TuiTerminal, state: &mut DisplayState) -> anyhow::Result<()> {
    terminal
        .draw(|f| widgets::root::render(f, state))
        .context("terminal draw")?;
    Ok(())
}
