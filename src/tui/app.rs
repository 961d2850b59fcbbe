//! Terminal setup and the event loop.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::form::FormState;
use super::ui;
use crate::config::TuiConfig;
use crate::wizard::WizardPolicy;

/// TUI application.
pub struct TuiApp {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Form being edited.
    form: FormState,
    /// Redraw interval.
    tick_rate: Duration,
    /// Last tick time.
    last_tick: Instant,
}

impl TuiApp {
    /// Take over the terminal and set up a fresh form.
    pub fn new(policy: WizardPolicy, config: &TuiConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            form: FormState::new(policy, config.show_intro),
            tick_rate: Duration::from_millis(config.tick_rate_ms.max(1)),
            last_tick: Instant::now(),
        })
    }

    /// Run until the user quits. Returns the number of submissions made.
    pub fn run(&mut self) -> io::Result<u32> {
        tracing::info!("wizard started");

        loop {
            let form = &self.form;
            self.terminal.draw(|f| ui::draw(f, form))?;

            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.form.handle_key(key);
                    }
                }
            }

            if self.form.should_quit {
                break;
            }

            if self.last_tick.elapsed() >= self.tick_rate {
                self.last_tick = Instant::now();
            }
        }

        let submissions = self.form.wizard.submissions;
        tracing::info!(submissions, "wizard closed");
        Ok(submissions)
    }

    /// Clean up and restore terminal.
    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
