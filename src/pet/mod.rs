//! The pet: needs, mood and motion.
//!
//! Each frame runs `update` (mood from metrics, needs decay, drift) and
//! then `animate` (mood to sprite transform). Every operation is total:
//! there are no error paths, only clamped arithmetic.
//!
//! Motion phase and pulse read a time base chosen at construction. The
//! default is simulated time accumulated from `delta`, so pausing the
//! frame driver freezes motion and decay together. `MotionClock::Wall`
//! keeps the pet drifting with the real clock instead.

use std::sync::Arc;

use crate::constants::*;
use crate::models::{Mood, PetState, SystemMetrics, Transform};
use crate::monitor::Clock;

/// Time base for motion phase and the excited pulse.
#[derive(Clone)]
pub enum MotionClock {
    /// Milliseconds accumulated from frame deltas.
    Simulated,
    /// Absolute wall-clock milliseconds.
    Wall(Arc<dyn Clock>),
}

impl std::fmt::Debug for MotionClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionClock::Simulated => f.write_str("Simulated"),
            MotionClock::Wall(_) => f.write_str("Wall"),
        }
    }
}

#[derive(Debug)]
pub struct Pet {
    state: PetState,
    transform: Transform,
    clock: MotionClock,
    /// Simulated milliseconds since the pet was created.
    sim_ms: f64,
}

impl Default for Pet {
    fn default() -> Self {
        Self::new(PetState::default(), MotionClock::Simulated)
    }
}

impl Pet {
    pub fn new(initial: PetState, clock: MotionClock) -> Self {
        let transform = Transform {
            x: initial.position.x,
            y: initial.position.y,
            scale: initial.scale,
            alpha: 1.0,
        };
        Self {
            state: initial,
            transform,
            clock,
            sim_ms: 0.0,
        }
    }

    /// Advance the pet by one frame.
    ///
    /// `delta` is in frames at 60 Hz. Negative or non-finite deltas count
    /// as zero, so a clock stepping backwards never refills needs.
    pub fn update(&mut self, metrics: &SystemMetrics, delta: f64) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.sim_ms += delta * FRAME_MS;

        self.state.mood = select_mood(metrics);
        self.update_needs(delta);
        self.update_position();
    }

    fn update_needs(&mut self, delta: f64) {
        self.state.energy = clamp_need(self.state.energy - delta * ENERGY_DECAY_PER_FRAME);
        self.state.hunger = clamp_need(self.state.hunger + delta * HUNGER_GROWTH_PER_FRAME);
    }

    fn update_position(&mut self) {
        if let Some((freq, amp)) = self.state.mood.motion() {
            self.state.position.x += (self.time_ms() * freq).sin() * amp;
        }
    }

    /// Map the pet's state onto the sprite transform.
    /// The transform follows the state position; then exactly one mood
    /// branch applies and properties it doesn't name keep their previous
    /// values. `update` alone never touches the transform.
    pub fn animate(&mut self, _delta: f64) {
        self.transform.x = self.state.position.x;
        self.transform.y = self.state.position.y;

        match self.state.mood {
            Mood::Happy => {
                self.transform.scale = self.state.scale;
                self.transform.alpha = 1.0;
            }
            Mood::Excited => {
                let pulse = (self.time_ms() * PULSE_FREQ).sin() * PULSE_AMPLITUDE + 1.0;
                self.transform.scale = self.state.scale * pulse;
            }
            Mood::Sleepy => {
                self.transform.alpha = SLEEPY_ALPHA;
            }
            Mood::Busy => {
                self.transform.alpha = 1.0;
            }
            Mood::Sad => {}
        }
    }

    /// Reduce hunger by one meal and cheer the pet up.
    pub fn feed(&mut self) {
        self.state.hunger = (self.state.hunger - FEED_AMOUNT).max(NEED_MIN);
        self.state.mood = Mood::Happy;
    }

    /// Restore some energy and excite the pet.
    pub fn play(&mut self) {
        self.state.energy = (self.state.energy + PLAY_AMOUNT).min(NEED_MAX);
        self.state.mood = Mood::Excited;
    }

    /// Force a mood. The next `update` recomputes it from metrics.
    pub fn set_mood(&mut self, mood: Mood) {
        self.state.mood = mood;
    }

    /// A copy of the pet's state; mutating it does not affect the pet.
    pub fn state(&self) -> PetState {
        self.state.clone()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn sim_time_ms(&self) -> f64 {
        self.sim_ms
    }

    fn time_ms(&self) -> f64 {
        match &self.clock {
            MotionClock::Simulated => self.sim_ms,
            MotionClock::Wall(clock) => clock.now_ms() as f64,
        }
    }
}

/// Fixed-priority mood rules: CPU load, then temperature, then memory.
/// First match wins; `Sad` is never selected here.
pub fn select_mood(metrics: &SystemMetrics) -> Mood {
    if metrics.cpu.usage > BUSY_CPU_PCT {
        Mood::Busy
    } else if metrics.cpu.temp > SLEEPY_TEMP_C {
        Mood::Sleepy
    } else if metrics.memory.percent > EXCITED_MEM_PCT {
        Mood::Excited
    } else {
        Mood::Happy
    }
}

fn clamp_need(v: f64) -> f64 {
    v.clamp(NEED_MIN, NEED_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{mock_metrics_at, FixedClock};

    fn metrics(usage: f64, temp: f64, mem: f64) -> SystemMetrics {
        let mut m = mock_metrics_at(0);
        m.cpu.usage = usage;
        m.cpu.temp = temp;
        m.memory.percent = mem;
        m
    }

    fn calm() -> SystemMetrics {
        metrics(50.0, 50.0, 50.0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── select_mood ───────────────────────────────────────────────

    #[test]
    fn mood_cpu_rule_wins_over_everything() {
        assert_eq!(select_mood(&metrics(90.0, 90.0, 90.0)), Mood::Busy);
    }

    #[test]
    fn mood_temp_rule() {
        assert_eq!(select_mood(&metrics(50.0, 75.0, 50.0)), Mood::Sleepy);
    }

    #[test]
    fn mood_temp_beats_memory() {
        assert_eq!(select_mood(&metrics(50.0, 75.0, 95.0)), Mood::Sleepy);
    }

    #[test]
    fn mood_memory_rule() {
        assert_eq!(select_mood(&metrics(50.0, 50.0, 90.0)), Mood::Excited);
    }

    #[test]
    fn mood_default_happy() {
        assert_eq!(select_mood(&calm()), Mood::Happy);
    }

    #[test]
    fn mood_thresholds_are_strict() {
        assert_eq!(select_mood(&metrics(80.0, 70.0, 85.0)), Mood::Happy);
        assert_eq!(select_mood(&metrics(80.01, 0.0, 0.0)), Mood::Busy);
    }

    #[test]
    fn mood_never_sad_from_metrics() {
        for step in 0..2_000i64 {
            assert_ne!(select_mood(&mock_metrics_at(step * 61_000)), Mood::Sad);
        }
    }

    // ── update: needs ─────────────────────────────────────────────

    #[test]
    fn needs_decay_linearly() {
        let mut pet = Pet::default();
        pet.update(&calm(), 100.0);
        let s = pet.state();
        assert!(approx(s.energy, 99.0));
        assert!(approx(s.hunger, 0.5));
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut pet = Pet::default();
        pet.update(&calm(), 0.0);
        let s = pet.state();
        assert_eq!(s.energy, 100.0);
        assert_eq!(s.hunger, 0.0);
        assert_eq!(s.position.x, PET_START_X);
        assert_eq!(pet.sim_time_ms(), 0.0);
    }

    #[test]
    fn huge_delta_clamps_needs() {
        let mut pet = Pet::default();
        pet.update(&calm(), 1e12);
        let s = pet.state();
        assert_eq!(s.energy, 0.0);
        assert_eq!(s.hunger, 100.0);
    }

    #[test]
    fn negative_delta_counts_as_zero() {
        let mut pet = Pet::default();
        pet.update(&calm(), 1_000.0);
        let before = pet.state();
        pet.update(&calm(), -5_000.0);
        let after = pet.state();
        assert_eq!(before.energy, after.energy);
        assert_eq!(before.hunger, after.hunger);
    }

    #[test]
    fn non_finite_delta_counts_as_zero() {
        let mut pet = Pet::default();
        pet.update(&calm(), f64::NAN);
        pet.update(&calm(), f64::INFINITY);
        let s = pet.state();
        assert_eq!(s.energy, 100.0);
        assert!(s.position.x.is_finite());
    }

    #[test]
    fn needs_stay_in_range_over_many_frames() {
        let mut pet = Pet::default();
        for i in 0..10_000 {
            pet.update(&mock_metrics_at(i * 1_000), (i % 7) as f64 * 3.5);
            let s = pet.state();
            assert!((0.0..=100.0).contains(&s.energy));
            assert!((0.0..=100.0).contains(&s.hunger));
        }
    }

    // ── update: position ──────────────────────────────────────────

    #[test]
    fn position_uses_simulated_time() {
        let mut pet = Pet::default();
        pet.update(&calm(), 60.0); // 1000 ms simulated
        let expected = PET_START_X + (1000.0f64 * 0.001).sin() * 0.5;
        assert!(approx(pet.state().position.x, expected));
        assert_eq!(pet.state().position.y, PET_START_Y);

        pet.animate(1.0);
        assert!(approx(pet.transform().x, expected));
        assert_eq!(pet.transform().y, PET_START_Y);
    }

    #[test]
    fn update_alone_leaves_transform() {
        let mut pet = Pet::default();
        let before = pet.transform();
        for _ in 0..120 {
            pet.update(&calm(), 1.0);
        }
        assert_ne!(pet.state().position.x, PET_START_X);
        assert_eq!(pet.transform(), before);
    }

    #[test]
    fn position_uses_wall_clock_when_configured() {
        let clock = Arc::new(FixedClock(2_000));
        let mut pet = Pet::new(PetState::default(), MotionClock::Wall(clock));
        pet.update(&metrics(90.0, 0.0, 0.0), 1.0); // busy
        let expected = PET_START_X + (2000.0f64 * 0.002).sin();
        assert!(approx(pet.state().position.x, expected));
    }

    #[test]
    fn sad_pet_does_not_drift() {
        let mut pet = Pet::default();
        pet.set_mood(Mood::Sad);
        pet.update_position();
        assert_eq!(pet.state().position.x, PET_START_X);
    }

    // ── animate ───────────────────────────────────────────────────

    #[test]
    fn animate_happy_resets_scale_and_alpha() {
        let mut pet = Pet::default();
        pet.update(&metrics(50.0, 75.0, 50.0), 1.0);
        pet.animate(1.0);
        assert_eq!(pet.transform().alpha, SLEEPY_ALPHA);

        pet.update(&calm(), 1.0);
        pet.animate(1.0);
        assert_eq!(pet.transform().alpha, 1.0);
        assert_eq!(pet.transform().scale, PET_BASE_SCALE);
    }

    #[test]
    fn animate_excited_pulses_scale_and_keeps_alpha() {
        let mut pet = Pet::default();
        pet.update(&metrics(50.0, 75.0, 50.0), 1.0);
        pet.animate(1.0); // sleepy: alpha 0.7

        pet.update(&metrics(50.0, 50.0, 90.0), 9.0); // sim time = 10 frames
        pet.animate(1.0);
        let t = pet.sim_time_ms();
        let expected = PET_BASE_SCALE * ((t * PULSE_FREQ).sin() * PULSE_AMPLITUDE + 1.0);
        assert!(approx(pet.transform().scale, expected));
        assert_eq!(pet.transform().alpha, SLEEPY_ALPHA);
    }

    #[test]
    fn animate_sleepy_keeps_scale() {
        let mut pet = Pet::default();
        pet.update(&metrics(50.0, 50.0, 90.0), 3.0);
        pet.animate(1.0);
        let pulsed = pet.transform().scale;

        pet.update(&metrics(50.0, 75.0, 50.0), 1.0);
        pet.animate(1.0);
        assert_eq!(pet.transform().scale, pulsed);
        assert_eq!(pet.transform().alpha, SLEEPY_ALPHA);
    }

    #[test]
    fn animate_busy_is_opaque() {
        let mut pet = Pet::default();
        pet.update(&metrics(50.0, 75.0, 50.0), 1.0);
        pet.animate(1.0);
        pet.update(&metrics(95.0, 75.0, 50.0), 1.0);
        pet.animate(1.0);
        assert_eq!(pet.state().mood, Mood::Busy);
        assert_eq!(pet.transform().alpha, 1.0);
    }

    #[test]
    fn animate_sad_changes_nothing() {
        let mut pet = Pet::default();
        let before = pet.transform();
        pet.set_mood(Mood::Sad);
        pet.animate(1.0);
        assert_eq!(pet.transform(), before);
    }

    // ── feed / play ───────────────────────────────────────────────

    #[test]
    fn feed_reduces_hunger_and_makes_happy() {
        let mut pet = Pet::default();
        pet.update(&calm(), 5_000.0); // hunger 25
        pet.set_mood(Mood::Busy);
        pet.feed();
        let s = pet.state();
        assert!(approx(s.hunger, 5.0));
        assert_eq!(s.mood, Mood::Happy);
    }

    #[test]
    fn feed_floors_at_zero() {
        let mut pet = Pet::default();
        pet.set_mood(Mood::Sad);
        pet.feed();
        assert_eq!(pet.state().hunger, 0.0);
        assert_eq!(pet.state().mood, Mood::Happy);
    }

    #[test]
    fn play_restores_energy_and_excites() {
        let mut pet = Pet::default();
        pet.update(&calm(), 5_000.0); // energy 50
        pet.play();
        let s = pet.state();
        assert!(approx(s.energy, 65.0));
        assert_eq!(s.mood, Mood::Excited);
    }

    #[test]
    fn play_caps_at_hundred() {
        let mut pet = Pet::default();
        pet.set_mood(Mood::Sleepy);
        pet.play();
        assert_eq!(pet.state().energy, 100.0);
        assert_eq!(pet.state().mood, Mood::Excited);
    }

    #[test]
    fn user_mood_lasts_until_next_update() {
        let mut pet = Pet::default();
        pet.play();
        pet.update(&calm(), 1.0);
        assert_eq!(pet.state().mood, Mood::Happy);
    }

    // ── state ─────────────────────────────────────────────────────

    #[test]
    fn state_is_a_copy() {
        let pet = Pet::default();
        let mut copy = pet.state();
        copy.energy = 3.0;
        copy.mood = Mood::Sad;
        copy.position.x = -1.0;
        let fresh = pet.state();
        assert_eq!(fresh.energy, 100.0);
        assert_eq!(fresh.mood, Mood::Happy);
        assert_eq!(fresh.position.x, PET_START_X);
    }

    #[test]
    fn custom_start_state_seeds_transform() {
        let mut start = PetState::default();
        start.position.x = 120.0;
        start.scale = 2.0;
        let pet = Pet::new(start, MotionClock::Simulated);
        assert_eq!(pet.transform().x, 120.0);
        assert_eq!(pet.transform().scale, 2.0);
        assert_eq!(pet.transform().alpha, 1.0);
    }
}
