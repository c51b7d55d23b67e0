use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const MAX_FAIRNESS_STRENGTH: u8 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

pub trait ArtistKey {
    fn artist_key(&self) -> Option<&str>;
}

impl ArtistKey for Track {
    fn artist_key(&self) -> Option<&str> {
        self.artist.as_deref()
    }
}

impl ArtistKey for str {
    fn artist_key(&self) -> Option<&str> {
        Some(self)
    }
}

impl ArtistKey for String {
    fn artist_key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl ArtistKey for Option<String> {
    fn artist_key(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl<T: ArtistKey + ?Sized> ArtistKey for &T {
    fn artist_key(&self) -> Option<&str> {
        (**self).artist_key()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShuffleSettings {
    #[serde(default = "default_fairness_strength")]
    pub fairness_strength: u8,
    #[serde(default = "default_fallback_timeout_ms")]
    pub fallback_timeout_ms: u64,
}

fn default_fairness_strength() -> u8 {
    MAX_FAIRNESS_STRENGTH
}

fn default_fallback_timeout_ms() -> u64 {
    1_000
}

impl ShuffleSettings {
    pub fn validated(self) -> Self {
        Self {
            fairness_strength: self.fairness_strength.min(MAX_FAIRNESS_STRENGTH),
            ..self
        }
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            fairness_strength: default_fairness_strength(),
            fallback_timeout_ms: default_fallback_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_fields_use_defaults() {
        let settings: ShuffleSettings = serde_json::from_str("{}").expect("parse");
        assert_eq!(settings, ShuffleSettings::default());
        assert_eq!(settings.fallback_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn validated_clamps_strength() {
        let settings = ShuffleSettings {
            fairness_strength: 250,
            ..ShuffleSettings::default()
        };
        assert_eq!(settings.validated().fairness_strength, 100);
    }

    #[test]
    fn track_without_artist_groups_as_none() {
        let track: Track =
            serde_json::from_str(r#"{"path":"a.mp3","title":"a"}"#).expect("parse track");
        assert_eq!(track.artist_key(), None);
        assert_eq!("Low".artist_key(), Some("Low"));
    }
}
