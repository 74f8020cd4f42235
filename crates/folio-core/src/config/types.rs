//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};

/// Resource cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of decoded image resources kept in memory
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 32 }
    }
}

/// Device resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Default device scale factor (dots per pixel) when the caller does not
    /// supply one
    pub dots_per_pixel: f32,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            dots_per_pixel: 1.0,
        }
    }
}
