//! App: terminal init, main loop, input dispatch and gravity polling.
//!
//! One serial loop owns everything: key events and the gravity timer both
//! feed the session from this single context, so no operation overlaps
//! another.

use crate::input::{Action, key_to_action};
use crate::session::{GameEvent, GameSession};
use crate::theme::Theme;
use crate::{GameConfig, ui};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Event-poll timeout, which bounds the render rate.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// How long a sidebar flash message stays up.
const FLASH_DURATION: Duration = Duration::from_millis(1500);

pub struct App {
    config: GameConfig,
    theme: Theme,
    session: GameSession,
    /// Transient sidebar message from the event sink.
    flash: Option<(String, Instant)>,
    autostart: bool,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme, autostart: bool) -> Self {
        let session = GameSession::new(&config);
        Self {
            config,
            theme,
            session,
            flash: None,
            autostart,
        }
    }

    /// Wholesale session replacement; the old gravity timer goes with it.
    fn reset_game(&mut self) {
        self.session = GameSession::new(&self.config);
        self.flash = None;
        if self.autostart {
            self.session.toggle_running(Instant::now());
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        if self.autostart {
            self.session.toggle_running(Instant::now());
        }

        let result = self.run_loop(&mut terminal);

        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            let flash = self
                .flash
                .as_ref()
                .filter(|(_, since)| now.duration_since(*since) < FLASH_DURATION)
                .map(|(msg, _)| msg.as_str());
            terminal.draw(|f| ui::draw(f, &self.session, &self.theme, flash))?;

            if event::poll(FRAME_INTERVAL)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key_to_action(key) {
                            Action::Quit => return Ok(()),
                            Action::Reset => self.reset_game(),
                            Action::StartPause => self.session.toggle_running(Instant::now()),
                            Action::Game(command) => {
                                self.session.handle(command, Instant::now());
                            }
                            Action::None => {}
                        }
                    }
                }
            }

            self.session.poll_gravity(Instant::now());

            for ev in self.session.take_events() {
                match ev {
                    GameEvent::LinesCleared(n) => {
                        let noun = if n == 1 { "line" } else { "lines" };
                        self.flash = Some((format!("{n} {noun} cleared!"), Instant::now()));
                    }
                    // The game-over overlay is driven by session state; the
                    // lock event has no audible counterpart here.
                    GameEvent::PieceLocked | GameEvent::GameOver => {}
                }
            }
        }
    }
}
