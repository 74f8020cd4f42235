//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.capacity == 0 {
            return Err(ConfigError::ValidationError(
                "cache.capacity must be > 0".into(),
            ));
        }
        if !self.resolution.dots_per_pixel.is_finite() || self.resolution.dots_per_pixel <= 0.0 {
            return Err(ConfigError::ValidationError(
                "resolution.dots_per_pixel must be a positive finite number".into(),
            ));
        }
        Ok(())
    }
}
