//! Per-mood ASCII art for the pet.
//!
//! Built-in art ships with the binary. A TOML file can replace any subset
//! of moods; moods it leaves out keep the built-in art:
//!
//! ```toml
//! happy = [" /\\_/\\ ", "( ^.^ )", " > ^ < "]
//! sleepy = [" /\\_/\\  z", "( -.- )", " > ^ < "]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::models::Mood;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("failed to read sprite file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse sprite file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    art: BTreeMap<Mood, Vec<String>>,
}

impl Sprite {
    pub fn builtin() -> Self {
        let mut art = BTreeMap::new();
        art.insert(Mood::Happy, lines(&[" /\\_/\\ ", "( ^.^ )", " > ^ < "]));
        art.insert(Mood::Sad, lines(&[" /\\_/\\ ", "( ;_; )", " /   \\ "]));
        art.insert(Mood::Excited, lines(&["\\/\\_/\\/", "( *o* )", " > ^ < "]));
        art.insert(Mood::Sleepy, lines(&[" /\\_/\\  z", "( -.- ) ", " > ^ <  "]));
        art.insert(Mood::Busy, lines(&[" /\\_/\\ ", "( @_@ )", "-> ^ <-"]));
        Self { art }
    }

    /// Load a sprite file, or the built-in art when `path` is `None`.
    pub async fn load(path: Option<PathBuf>) -> Result<Self, SpriteError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SpriteError::Io {
                path: path.clone(),
                source,
            })?;
        Self::from_toml_str(&content, &path)
    }

    /// Parse sprite TOML. `origin` only labels errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, SpriteError> {
        let file: SpriteFile = toml::from_str(content).map_err(|source| SpriteError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(file.into_sprite())
    }

    /// Art lines for a mood.
    pub fn frame(&self, mood: Mood) -> &[String] {
        self.art.get(&mood).map(Vec::as_slice).unwrap_or(&[])
    }

    /// (columns, rows) the art for `mood` occupies.
    pub fn size(&self, mood: Mood) -> (u16, u16) {
        let frame = self.frame(mood);
        let width = frame.iter().map(|l| l.width()).max().unwrap_or(0);
        (width as u16, frame.len() as u16)
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lines(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| s.to_string()).collect()
}

/// TOML form. Missing or empty moods inherit the built-in art.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SpriteFile {
    happy: Option<Vec<String>>,
    sad: Option<Vec<String>>,
    excited: Option<Vec<String>>,
    sleepy: Option<Vec<String>>,
    busy: Option<Vec<String>>,
}

impl SpriteFile {
    fn into_sprite(self) -> Sprite {
        let mut sprite = Sprite::builtin();
        let entries = [
            (Mood::Happy, self.happy),
            (Mood::Sad, self.sad),
            (Mood::Excited, self.excited),
            (Mood::Sleepy, self.sleepy),
            (Mood::Busy, self.busy),
        ];
        for (mood, art) in entries {
            if let Some(art) = art.filter(|a| !a.is_empty()) {
                sprite.art.insert(mood, art);
            }
        }
        sprite
    }
}
