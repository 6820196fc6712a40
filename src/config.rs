//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Drive item property key carrying the originating item's id.
pub const DEFAULT_PROVENANCE_KEY: &str = "original_id";

const DEFAULT_WINDOW_SIZE: usize = 5;

/// Tunables for a migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Number of items dispatched concurrently per window. The engine awaits
    /// a whole window before starting the next, bounding in-flight remote
    /// calls without a dynamic admission controller.
    pub window_size: usize,

    /// Property key used for the provenance tag on destination objects.
    pub provenance_key: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            provenance_key: DEFAULT_PROVENANCE_KEY.to_string(),
        }
    }
}

impl MigrationConfig {
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }

    /// Pre-flight validation, run before any item is touched.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("window_size must be at least 1".to_string());
        }
        if self.provenance_key.is_empty() {
            return Err("provenance_key must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MigrationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_size, 5);
        assert_eq!(config.provenance_key, "original_id");
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = MigrationConfig::with_window_size(0);
        assert!(config.validate().is_err());
    }
}
