/// Viewer configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Number of particles in the background starfield.
    pub star_count: usize,
    pub rng_seed: u64,
    /// Window width below which the shared object group renders at half scale.
    pub small_screen_breakpoint: f32,
    /// Minimum interval between scroll samples (seconds).
    pub scroll_throttle_secs: f64,
    /// Quiet period before section observation is re-registered after a
    /// resize (seconds).
    pub resize_debounce_secs: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            star_count: 1500,
            rng_seed: 42,
            small_screen_breakpoint: 600.0,
            scroll_throttle_secs: 0.016, // ~60 Hz
            resize_debounce_secs: 0.25,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err("window dimensions must be non-zero".to_string());
        }
        if self.star_count == 0 || self.star_count > 100_000 {
            return Err("star_count must be in 1..=100000".to_string());
        }
        if !self.small_screen_breakpoint.is_finite() || self.small_screen_breakpoint <= 0.0 {
            return Err("small_screen_breakpoint must be finite and > 0".to_string());
        }
        if !self.scroll_throttle_secs.is_finite() || self.scroll_throttle_secs < 0.0 {
            return Err("scroll_throttle_secs must be finite and >= 0".to_string());
        }
        if !self.resize_debounce_secs.is_finite() || self.resize_debounce_secs < 0.0 {
            return Err("resize_debounce_secs must be finite and >= 0".to_string());
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_window_invalid() {
        let mut config = ViewerConfig::default();
        config.window_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn absurd_star_count_invalid() {
        let mut config = ViewerConfig::default();
        config.star_count = 0;
        assert!(config.validate().is_err());
        config.star_count = 1_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_breakpoint_invalid() {
        let mut config = ViewerConfig::default();
        config.small_screen_breakpoint = -600.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ViewerConfig::from_json(r#"{"starCount": 300, "rngSeed": 7}"#).unwrap();
        assert_eq!(config.star_count, 300);
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        assert!(ViewerConfig::from_json(r#"{"starCount": 0}"#).is_err());
        assert!(ViewerConfig::from_json("not json").is_err());
    }
}
