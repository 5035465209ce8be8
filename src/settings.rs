//! Runner settings
//!
//! Loaded from an optional JSON file; any missing field falls back to its
//! default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FINISH_DELAY, SIM_DT};
use crate::error::SimResult;
use crate::parser::Legend;

/// Settings for driving a level outside of tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation timestep (seconds)
    pub step: f32,
    /// Stop after this many ticks even if the level is still running
    pub max_ticks: u32,
    /// Seed for coin spring phases
    pub seed: u64,
    /// Hold time after the level is won or lost
    pub finish_delay: f32,
    /// Treat unknown plan symbols as errors
    pub strict_symbols: bool,
    /// Plan symbol to actor mapping
    pub legend: Legend,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step: SIM_DT,
            max_ticks: 60 * 60,
            seed: 0x5eed,
            finish_delay: FINISH_DELAY,
            strict_symbols: false,
            legend: Legend::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::parser::ActorSymbol;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.step, SIM_DT);
        assert_eq!(settings.finish_delay, 1.0);
        assert!(!settings.strict_symbols);
        assert_eq!(settings.legend.get('@'), Some(ActorSymbol::Player));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"seed": 7, "max_ticks": 10}"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.max_ticks, 10);
        assert_eq!(settings.step, SIM_DT);
    }

    #[test]
    fn test_custom_legend_from_json() {
        let settings =
            Settings::from_json(r#"{"legend": {"P": "player", "$": "coin"}}"#).unwrap();
        assert_eq!(settings.legend.get('P'), Some(ActorSymbol::Player));
        assert_eq!(settings.legend.get('$'), Some(ActorSymbol::Coin));
        assert_eq!(settings.legend.get('@'), None);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 99,
            strict_symbols: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
