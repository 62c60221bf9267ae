use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Parameters of a game session.
///
/// Missing fields take their default values when deserializing, so a config
/// file only needs to name what it changes:
///
/// ```
/// use stackfall_engine::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "width": 10 }"#)?;
/// assert_eq!(config.width, 10);
/// assert_eq!(config.height, 20);
/// assert_eq!(config.drop_interval_ms, 1000);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Gravity period: the piece drops once the accumulated tick time
    /// exceeds this many milliseconds.
    pub drop_interval_ms: u64,
    /// Points for the first row of a sweep.
    pub score_base: u64,
}

impl SessionConfig {
    pub const DEFAULT_WIDTH: usize = 12;
    pub const DEFAULT_HEIGHT: usize = 20;
    pub const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;
    pub const DEFAULT_SCORE_BASE: u64 = 10;

    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            drop_interval_ms: Self::DEFAULT_DROP_INTERVAL_MS,
            score_base: Self::DEFAULT_SCORE_BASE,
        }
    }
}
