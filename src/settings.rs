//! Game rules and tuning
//!
//! Every number the session rules depend on lives here so a page can tune the
//! game with a JSON blob. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a config was rejected
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A `min..=max` pair has `min > max`
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// A value that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// The pool floor exceeds the starting population
    FloorAboveInitial { floor: usize, initial: usize },
    /// A session of zero seconds would end before it starts
    ZeroLengthSession,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid config json: {e}"),
            Self::InvertedRange { field, min, max } => {
                write!(f, "{field}: min {min} is greater than max {max}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::FloorAboveInitial { floor, initial } => write!(
                f,
                "min_population {floor} exceeds initial_population {initial}"
            ),
            Self::ZeroLengthSession => write!(f, "session_seconds must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Session rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Session ===
    /// Countdown length in seconds
    pub session_seconds: u32,

    // === Fish pool ===
    /// Fish spawned when a session starts
    pub initial_population: usize,
    /// Pool is topped up one fish per tick while below this
    pub min_population: usize,

    // === Bite ===
    /// Seconds from landing the hook to a bite (uniform)
    pub bite_delay_min: f32,
    pub bite_delay_max: f32,
    /// Taps needed to land a hooked fish (uniform, inclusive)
    pub reel_clicks_min: u32,
    pub reel_clicks_max: u32,

    // === Hook ===
    /// Units per tick while casting
    pub cast_speed: f32,
    /// Units per tick while reeling a catch
    pub reel_speed: f32,
    /// Units per tick while reeling back an empty hook
    pub empty_reel_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_seconds: SESSION_SECONDS,

            initial_population: INITIAL_POPULATION,
            min_population: MIN_POPULATION,

            bite_delay_min: BITE_DELAY_MIN,
            bite_delay_max: BITE_DELAY_MAX,
            reel_clicks_min: REEL_CLICKS_MIN,
            reel_clicks_max: REEL_CLICKS_MAX,

            cast_speed: CAST_SPEED,
            reel_speed: REEL_SPEED,
            empty_reel_speed: EMPTY_REEL_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the rules are internally consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_seconds == 0 {
            return Err(ConfigError::ZeroLengthSession);
        }
        if self.min_population == 0 {
            return Err(ConfigError::NonPositive {
                field: "min_population",
                value: 0.0,
            });
        }
        if self.min_population > self.initial_population {
            return Err(ConfigError::FloorAboveInitial {
                floor: self.min_population,
                initial: self.initial_population,
            });
        }
        // Zero delay is allowed: the bite lands on the next tick
        if self.bite_delay_min < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "bite_delay_min",
                value: self.bite_delay_min,
            });
        }
        if self.bite_delay_min > self.bite_delay_max {
            return Err(ConfigError::InvertedRange {
                field: "bite_delay",
                min: self.bite_delay_min,
                max: self.bite_delay_max,
            });
        }
        if self.reel_clicks_min == 0 {
            return Err(ConfigError::NonPositive {
                field: "reel_clicks_min",
                value: 0.0,
            });
        }
        if self.reel_clicks_min > self.reel_clicks_max {
            return Err(ConfigError::InvertedRange {
                field: "reel_clicks",
                min: self.reel_clicks_min as f32,
                max: self.reel_clicks_max as f32,
            });
        }
        for (field, value) in [
            ("cast_speed", self.cast_speed),
            ("reel_speed", self.reel_speed),
            ("empty_reel_speed", self.empty_reel_speed),
        ] {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Load from the page's `<script id="fishing-config">` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("fishing-config"))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from page");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring page config: {e}");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Load from a JSON file, or defaults when no path is given (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default game config");
            return Self::default();
        };
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => {
                log::info!("Loaded game config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
