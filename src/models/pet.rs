use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Categorical display/behavior mode of the pet.
///
/// `Sad` is never produced by the metrics rules; it can only be set
/// explicitly through `Pet::set_mood`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Sleepy,
    Busy,
}

impl Mood {
    #[cfg(test)]
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Sad, Mood::Excited, Mood::Sleepy, Mood::Busy];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Sleepy => "sleepy",
            Mood::Busy => "busy",
        }
    }

    /// Horizontal drift `(frequency per ms, amplitude per frame)` for this mood.
    /// `None` means the pet stays put.
    pub fn motion(&self) -> Option<(f64, f64)> {
        match self {
            Mood::Happy => Some((0.001, 0.5)),
            Mood::Excited => Some((0.005, 2.0)),
            Mood::Sleepy => Some((0.0005, 0.1)),
            Mood::Busy => Some((0.002, 1.0)),
            Mood::Sad => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position in world units of the 800x600 playground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Everything the pet knows about itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetState {
    pub mood: Mood,
    /// 0-100, always clamped
    pub energy: f64,
    /// 0-100, always clamped
    pub hunger: f64,
    pub position: Position,
    pub scale: f64,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            mood: Mood::Happy,
            energy: PET_START_ENERGY,
            hunger: PET_START_HUNGER,
            position: Position {
                x: PET_START_X,
                y: PET_START_Y,
            },
            scale: PET_BASE_SCALE,
        }
    }
}

/// Visual properties of the pet's sprite.
///
/// Persists between frames: each mood only rewrites the properties it
/// cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub alpha: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: PET_START_X,
            y: PET_START_Y,
            scale: PET_BASE_SCALE,
            alpha: 1.0,
        }
    }
}
