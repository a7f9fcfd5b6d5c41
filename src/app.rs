//! Application struct and frame loop.
//!
//! Owns the engine, the UI state and the shutdown handle. Interactive runs
//! drive the engine from the terminal event loop; headless runs tick on a
//! timer and print periodic JSON reports.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::config::{ClockMode, Config};
use crate::constants::HEADLESS_REPORT_TICKS;
use crate::engine::{self, Disposer, Engine};
use crate::models::Mood;
use crate::monitor::{Clock, MetricsCollector, SystemClock};
use crate::pet::{MotionClock, Pet};
use crate::ui::{AppState, Theme};
use crate::utils::frames_from_millis;

type Surface = Terminal<CrosstermBackend<Stdout>>;

/// Run-time switches that don't live in the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Run without a terminal surface.
    pub headless: bool,
    /// Stop after this many frames.
    pub max_ticks: Option<u64>,
}

pub struct App {
    engine: Engine<CrosstermBackend<Stdout>>,
    state: AppState,
    disposer: Disposer,
    frame_interval: Duration,
    options: RunOptions,
}

impl App {
    /// Build the engine and, unless headless, take over the terminal.
    pub fn new(config: &Config, options: RunOptions) -> Result<(Self, Disposer)> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let collector = MetricsCollector::from_kind(config.metrics_source, clock.clone());
        let motion = match config.motion_clock {
            ClockMode::Simulated => MotionClock::Simulated,
            ClockMode::Wall => MotionClock::Wall(clock),
        };
        let pet = Pet::new(config.pet.initial_state(), motion);
        let sprite = engine::spawn_sprite_load(config.resolved_sprite_path());

        let surface = if options.headless {
            None
        } else {
            Some(setup_terminal().context("failed to set up terminal")?)
        };

        let (engine, disposer) = Engine::new(surface, collector, pet, sprite);
        let state = AppState::new(Theme::resolve(&config.theme), config.motion_clock.label());

        info!(
            refresh_ms = config.refresh_interval_ms,
            theme = %state.theme.name,
            clock = config.motion_clock.label(),
            "app initialized"
        );

        let app = Self {
            engine,
            state,
            disposer: disposer.clone(),
            frame_interval: Duration::from_millis(config.refresh_interval_ms),
            options,
        };
        Ok((app, disposer))
    }

    /// Run until the user quits, the disposer fires or the tick limit hits.
    pub async fn run(&mut self) -> Result<()> {
        let result = if self.options.headless {
            self.run_headless().await
        } else {
            self.run_interactive()
        };

        let headless = self.options.headless;
        let destroyed = self.engine.destroy();
        let result = finish_run(result, destroyed, || {
            if headless {
                Ok(())
            } else {
                restore_terminal()
            }
        });
        if !headless {
            println!("\nsyspet stopped after {} frames.\n", self.engine.frames());
        }
        info!(frames = self.engine.frames(), "app stopped");
        result
    }

    fn run_interactive(&mut self) -> Result<()> {
        let mut last = Instant::now();

        while !self.should_stop() {
            let now = Instant::now();
            let delta = self.frame_delta(now.duration_since(last));
            last = now;
            self.engine.tick(delta, &self.state)?;

            // Handle input until the next frame is due.
            let due = now + self.frame_interval;
            while let Some(remaining) = due.checked_duration_since(Instant::now()) {
                if !event::poll(remaining)? {
                    break;
                }
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        self.disposer.dispose();
                        break;
                    }
                    self.engine.redraw(&self.state)?;
                }
            }
        }
        Ok(())
    }

    async fn run_headless(&mut self) -> Result<()> {
        let mut ticker = tokio::time::interval(self.frame_interval);
        let mut last = Instant::now();

        while !self.should_stop() {
            ticker.tick().await;
            let now = Instant::now();
            let delta = self.frame_delta(now.duration_since(last));
            last = now;
            let before = self.engine.frames();
            self.engine.tick(delta, &self.state)?;

            if self.report_due(before) {
                self.print_report()?;
            }
        }
        if self.engine.frames() % HEADLESS_REPORT_TICKS != 0 {
            self.print_report()?;
        }
        Ok(())
    }

    fn print_report(&self) -> Result<()> {
        let line = serde_json::to_string(&self.engine.report())?;
        println!("{}", line);
        Ok(())
    }

    /// A report is due when the last tick advanced onto a report frame.
    fn report_due(&self, frames_before: u64) -> bool {
        let frames = self.engine.frames();
        frames != frames_before && frames % HEADLESS_REPORT_TICKS == 0
    }

    fn should_stop(&self) -> bool {
        self.disposer.is_disposed()
            || self.engine.is_destroyed()
            || self
                .options
                .max_ticks
                .is_some_and(|n| self.engine.frames() >= n)
    }

    /// Frames elapsed since the last tick; zero while paused.
    fn frame_delta(&self, elapsed: Duration) -> f64 {
        if self.state.paused {
            0.0
        } else {
            frames_from_millis(elapsed.as_secs_f64() * 1000.0)
        }
    }

    // ── Input ────────────────────────────────────────────────────

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.state.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
            ) {
                self.state.show_help = false;
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('f') => {
                self.engine.feed();
                let hunger = self.engine.pet_state().hunger;
                self.state.set_status(format!("Fed! Hunger {:.0}", hunger));
            }
            KeyCode::Char('p') => {
                self.engine.play();
                let energy = self.engine.pet_state().energy;
                self.state.set_status(format!("Played! Energy {:.0}", energy));
            }
            KeyCode::Char('s') => {
                self.engine.set_mood(Mood::Sad);
                self.state.set_status("Sulking...".to_string());
            }
            KeyCode::Char(' ') => {
                self.state.paused = !self.state.paused;
                let msg = if self.state.paused { "Paused" } else { "Resumed" };
                self.state.set_status(msg.to_string());
            }
            KeyCode::Char('T') => self.state.cycle_theme(),
            KeyCode::Char('?') => self.state.show_help = true,
            _ => {}
        }
        false
    }
}

fn setup_terminal() -> Result<Surface> {
    enable_raw_mode()?;
    with_rollback(enter_surface(), restore_terminal)
}

fn enter_surface() -> Result<Surface> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

/// Leave raw mode and the alternate screen. Both steps always run.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen);
    raw.and(screen)?;
    Ok(())
}

/// Undo a half-finished setup when `step` failed.
fn with_rollback<T>(step: Result<T>, rollback: impl FnOnce() -> Result<()>) -> Result<T> {
    if step.is_err() {
        let _ = rollback();
    }
    step
}

/// Run `restore` unconditionally; the first error wins.
fn finish_run(
    result: Result<()>,
    destroyed: io::Result<()>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let restored = restore();
    result.and(destroyed.map_err(anyhow::Error::from)).and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn headless_app(max_ticks: Option<u64>) -> (App, Disposer) {
        let config = Config {
            refresh_interval_ms: 16,
            ..Config::default()
        };
        App::new(
            &config,
            RunOptions {
                headless: true,
                max_ticks,
            },
        )
        .unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ── Keys ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn quit_keys() {
        let (mut app, _) = headless_app(None);
        assert!(app.handle_key(press(KeyCode::Char('q'))));
        assert!(app.handle_key(press(KeyCode::Esc)));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.handle_key(press(KeyCode::Char('x'))));
    }

    #[tokio::test]
    async fn feed_and_play_keys() {
        let (mut app, _) = headless_app(None);
        app.handle_key(press(KeyCode::Char('p')));
        assert_eq!(app.engine.pet_state().mood, Mood::Excited);
        assert!(app.state.active_status().unwrap().starts_with("Played"));

        app.handle_key(press(KeyCode::Char('f')));
        assert_eq!(app.engine.pet_state().mood, Mood::Happy);
        assert!(app.state.active_status().unwrap().starts_with("Fed"));
    }

    #[tokio::test]
    async fn space_pauses_time() {
        let (mut app, _) = headless_app(None);
        app.handle_key(press(KeyCode::Char(' ')));
        assert!(app.state.paused);
        assert_eq!(app.frame_delta(Duration::from_secs(1)), 0.0);

        app.handle_key(press(KeyCode::Char(' ')));
        assert!(!app.state.paused);
        assert!((app.frame_delta(Duration::from_secs(1)) - 60.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn help_swallows_quit() {
        let (mut app, _) = headless_app(None);
        app.handle_key(press(KeyCode::Char('?')));
        assert!(app.state.show_help);

        assert!(!app.handle_key(press(KeyCode::Esc)));
        assert!(!app.state.show_help);
    }

    #[tokio::test]
    async fn theme_key_cycles() {
        let (mut app, _) = headless_app(None);
        let before = app.state.theme.name.clone();
        app.handle_key(press(KeyCode::Char('T')));
        assert_ne!(app.state.theme.name, before);
    }

    #[tokio::test]
    async fn sulk_key_makes_pet_sad() {
        let (mut app, _) = headless_app(None);
        assert!(!app.handle_key(press(KeyCode::Char('s'))));
        assert_eq!(app.engine.pet_state().mood, Mood::Sad);
        assert!(app.state.active_status().unwrap().starts_with("Sulking"));
    }

    // ── Teardown ──────────────────────────────────────────────────

    #[test]
    fn restore_runs_when_destroy_fails() {
        let restored = Cell::new(false);
        let destroyed = Err(io::Error::new(io::ErrorKind::Other, "clear failed"));
        let result = finish_run(Ok(()), destroyed, || {
            restored.set(true);
            Ok(())
        });
        assert!(restored.get());
        assert!(result.unwrap_err().to_string().contains("clear failed"));
    }

    #[test]
    fn run_error_wins_over_teardown_errors() {
        let restored = Cell::new(false);
        let result = finish_run(
            Err(anyhow::anyhow!("draw failed")),
            Err(io::Error::new(io::ErrorKind::Other, "clear failed")),
            || {
                restored.set(true);
                Err(anyhow::anyhow!("restore failed"))
            },
        );
        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn restore_error_surfaces_after_clean_run() {
        let result = finish_run(Ok(()), Ok(()), || Err(anyhow::anyhow!("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");
    }

    #[test]
    fn failed_setup_rolls_back() {
        let rolled_back = Cell::new(false);
        let step: Result<u8> = Err(anyhow::anyhow!("no tty"));
        let result = with_rollback(step, || {
            rolled_back.set(true);
            Ok(())
        });
        assert!(result.is_err());
        assert!(rolled_back.get());
    }

    #[test]
    fn successful_setup_keeps_state() {
        let rolled_back = Cell::new(false);
        let result = with_rollback(Ok(7u8), || {
            rolled_back.set(true);
            Ok(())
        });
        assert_eq!(result.unwrap(), 7);
        assert!(!rolled_back.get());
    }

    // ── Run loop ──────────────────────────────────────────────────

    #[tokio::test]
    async fn no_report_when_tick_does_not_advance() {
        let (mut app, disposer) = headless_app(None);
        for _ in 0..HEADLESS_REPORT_TICKS {
            app.engine.tick(1.0, &app.state).unwrap();
        }
        assert!(app.report_due(HEADLESS_REPORT_TICKS - 1));

        disposer.dispose();
        let before = app.engine.frames();
        app.engine.tick(1.0, &app.state).unwrap();
        assert_eq!(app.engine.frames(), before);
        assert!(!app.report_due(before));
    }

    #[tokio::test]
    async fn headless_run_stops_at_tick_limit() {
        let (mut app, _) = headless_app(Some(3));
        app.run().await.unwrap();
        assert_eq!(app.engine.frames(), 3);
        assert!(app.engine.is_destroyed());
    }

    #[tokio::test]
    async fn disposer_stops_headless_run() {
        let (mut app, disposer) = headless_app(None);
        disposer.dispose();
        app.run().await.unwrap();
        assert_eq!(app.engine.frames(), 0);
        assert!(app.engine.is_destroyed());
    }
}
