//! Frame engine: owns the render surface, the metrics collector, the pet
//! and the sprite slot, and advances them one frame per `tick`.
//!
//! The sprite loads on a background task. Until it arrives the engine keeps
//! the pet's needs and mood current but leaves the transform alone and draws
//! a hatching placeholder.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ratatui::{backend::Backend, Terminal};
use serde::Serialize;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::models::{Mood, PetState, SystemMetrics, Transform};
use crate::monitor::MetricsCollector;
use crate::pet::Pet;
use crate::sprite::{Sprite, SpriteError};
use crate::ui::{self, AppState, SceneView};

type SpriteResult = Result<Sprite, SpriteError>;

/// Load the sprite on a background task and hand it back over a channel.
pub fn spawn_sprite_load(path: Option<PathBuf>) -> oneshot::Receiver<SpriteResult> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        // The engine may already be gone; nothing to do then.
        let _ = tx.send(Sprite::load(path).await);
    });
    rx
}

/// Whether the sprite has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Loading,
    Ready,
    /// Loading failed; the built-in art is used.
    Failed,
}

enum SpriteSlot {
    Loading(oneshot::Receiver<SpriteResult>),
    Ready(Sprite),
    Failed(Sprite),
}

impl SpriteSlot {
    fn readiness(&self) -> Readiness {
        match self {
            SpriteSlot::Loading(_) => Readiness::Loading,
            SpriteSlot::Ready(_) => Readiness::Ready,
            SpriteSlot::Failed(_) => Readiness::Failed,
        }
    }

    fn sprite(&self) -> Option<&Sprite> {
        match self {
            SpriteSlot::Loading(_) => None,
            SpriteSlot::Ready(s) | SpriteSlot::Failed(s) => Some(s),
        }
    }
}

/// Cloneable shutdown handle. Any holder can request disposal; the engine
/// destroys itself on its next tick.
#[derive(Debug, Clone, Default)]
pub struct Disposer(Arc<AtomicBool>);

impl Disposer {
    pub fn dispose(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One line of headless output.
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub frame: u64,
    pub sim_ms: f64,
    pub sprite: Readiness,
    pub pet: PetState,
    pub transform: Transform,
    pub metrics: &'a SystemMetrics,
}

pub struct Engine<B: Backend> {
    surface: Option<Terminal<B>>,
    collector: MetricsCollector,
    pet: Pet,
    sprite: SpriteSlot,
    disposer: Disposer,
    destroyed: bool,
    frames: u64,
}

impl<B: Backend> Engine<B> {
    /// Build an engine. `surface` is `None` for headless runs.
    /// Returns the disposer that shuts it down.
    pub fn new(
        surface: Option<Terminal<B>>,
        collector: MetricsCollector,
        pet: Pet,
        sprite: oneshot::Receiver<SpriteResult>,
    ) -> (Self, Disposer) {
        let disposer = Disposer::default();
        info!(
            source = collector.source_name(),
            headless = surface.is_none(),
            "engine created"
        );
        let engine = Self {
            surface,
            collector,
            pet,
            sprite: SpriteSlot::Loading(sprite),
            disposer: disposer.clone(),
            destroyed: false,
            frames: 0,
        };
        (engine, disposer)
    }

    /// Advance one frame: sample metrics, update the pet, animate once the
    /// sprite is ready, then draw if a surface is attached.
    pub fn tick(&mut self, delta: f64, state: &AppState) -> io::Result<()> {
        if self.destroyed {
            return Ok(());
        }
        if self.disposer.is_disposed() {
            return self.destroy();
        }

        self.poll_sprite();

        let metrics = self.collector.get_metrics();
        let previous = self.pet.state().mood;
        self.pet.update(&metrics, delta);
        if self.readiness() != Readiness::Loading {
            self.pet.animate(delta);
        }
        let mood = self.pet.state().mood;
        if mood != previous {
            debug!(from = %previous, to = %mood, frame = self.frames, "mood changed");
        }

        self.frames += 1;
        self.draw(state)
    }

    fn poll_sprite(&mut self) {
        let SpriteSlot::Loading(rx) = &mut self.sprite else {
            return;
        };
        let next = match rx.try_recv() {
            Ok(Ok(sprite)) => {
                info!(frame = self.frames, "sprite ready");
                SpriteSlot::Ready(sprite)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "sprite load failed, using built-in art");
                SpriteSlot::Failed(Sprite::builtin())
            }
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                warn!("sprite loader exited without a result, using built-in art");
                SpriteSlot::Failed(Sprite::builtin())
            }
        };
        self.sprite = next;
    }

    fn draw(&mut self, state: &AppState) -> io::Result<()> {
        let Some(terminal) = self.surface.as_mut() else {
            return Ok(());
        };
        let view = SceneView {
            pet: self.pet.state(),
            transform: self.pet.transform(),
            metrics: self.collector.last(),
            sprite: self.sprite.sprite(),
            source: self.collector.source_name(),
            frame: self.frames,
        };
        terminal.draw(|frame| ui::render(frame, &view, state))?;
        Ok(())
    }

    /// Redraw without advancing time (after a key press, say).
    pub fn redraw(&mut self, state: &AppState) -> io::Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.draw(state)
    }

    /// Detach the surface and stop ticking. Safe to call more than once.
    pub fn destroy(&mut self) -> io::Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;
        self.disposer.dispose();
        if let Some(mut terminal) = self.surface.take() {
            let cleared = terminal.clear();
            let shown = terminal.show_cursor();
            cleared.and(shown)?;
        }
        info!(frames = self.frames, "engine destroyed");
        Ok(())
    }

    pub fn feed(&mut self) {
        if !self.destroyed {
            self.pet.feed();
        }
    }

    pub fn play(&mut self) {
        if !self.destroyed {
            self.pet.play();
        }
    }

    pub fn set_mood(&mut self, mood: Mood) {
        if !self.destroyed {
            self.pet.set_mood(mood);
        }
    }

    pub fn pet_state(&self) -> PetState {
        self.pet.state()
    }

    pub fn readiness(&self) -> Readiness {
        self.sprite.readiness()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn report(&self) -> FrameReport<'_> {
        FrameReport {
            frame: self.frames,
            sim_ms: self.pet.sim_time_ms(),
            sprite: self.readiness(),
            pet: self.pet.state(),
            transform: self.pet.transform(),
            metrics: self.collector.last(),
        }
    }
}

#[cfg(test)]
impl<B: Backend> Engine<B> {
    fn transform(&self) -> Transform {
        self.pet.transform()
    }

    fn metrics(&self) -> &SystemMetrics {
        self.collector.last()
    }

    fn surface(&self) -> Option<&Terminal<B>> {
        self.surface.as_ref()
    }
}
