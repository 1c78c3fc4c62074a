//! Shimmer configuration
//!
//! Re-exports the shared config type from shimmer-types and adds
//! persistence through confy plus sanity clamping for values read from disk.

use std::path::PathBuf;
use std::time::Duration;

pub use shimmer_types::{
    AbsoluteHorizontal, Color, Gravity, HorizontalGravity, LayoutDirection, ShimmerConfig,
    VerticalGravity, palette,
};

use crate::error::ConfigError;

const APP_NAME: &str = "shimmer";
const CONFIG_NAME: &str = "config";

/// Extension trait for ShimmerConfig persistence and validation
pub trait ShimmerConfigExt: Sized {
    /// Load from the user config dir (defaults when the file is missing)
    fn load() -> Result<Self, ConfigError>;
    fn store(&self) -> Result<(), ConfigError>;
    fn file_path() -> Result<PathBuf, ConfigError>;
    /// Copy with out-of-range values pulled back into range
    fn sanitized(self) -> Self;
    fn period(&self) -> Duration;
}

impl ShimmerConfigExt for ShimmerConfig {
    fn load() -> Result<Self, ConfigError> {
        let config: ShimmerConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        Ok(config.sanitized())
    }

    fn store(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn file_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    fn sanitized(mut self) -> Self {
        let defaults = ShimmerConfig::default();

        if !(self.shimmer_width_ratio > 0.0 && self.shimmer_width_ratio <= 1.0) {
            tracing::warn!(
                value = self.shimmer_width_ratio,
                "shimmer_width_ratio out of range, using default"
            );
            self.shimmer_width_ratio = defaults.shimmer_width_ratio;
        }
        if !(self.inset_space >= 0.0) {
            self.inset_space = defaults.inset_space;
        }
        if !(self.corner_radius >= 0.0) {
            self.corner_radius = defaults.corner_radius;
        }
        if !(self.font_size > 0.0) {
            tracing::warn!(value = self.font_size, "font_size must be positive, using default");
            self.font_size = defaults.font_size;
        }
        if self.period_ms == 0 {
            self.period_ms = defaults.period_ms;
        }
        self
    }

    fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_constants() {
        let config = ShimmerConfig::default();
        assert_eq!(config.trace_color, palette::DARKER_GRAY);
        assert_eq!(config.shimmer_color, palette::WHITE);
        assert_eq!(config.shimmer_alpha, 0x40);
        assert_eq!(config.shimmer_width_ratio, 0.33);
        assert_eq!(config.inset_space, 2.5);
        assert_eq!(config.corner_radius, 20.0);
        assert_eq!(config.period(), Duration::from_millis(1000));
    }

    #[test]
    fn sanitize_restores_bad_values() {
        let config = ShimmerConfig {
            shimmer_width_ratio: 0.0,
            inset_space: -1.0,
            corner_radius: f32::NAN,
            font_size: 0.0,
            period_ms: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config, ShimmerConfig::default());
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let config = ShimmerConfig {
            shimmer_width_ratio: 1.0,
            inset_space: 0.0,
            period_ms: 800,
            ..Default::default()
        };
        assert_eq!(config.clone().sanitized(), config);
    }
}
