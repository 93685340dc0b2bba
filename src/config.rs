use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Tunables of the editor. Every field has a default, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Increment applied by the zoom buttons.
    pub zoom_step: f64,
    /// Maximum pointer travel (screen px) for a canvas press to still count as a click.
    pub click_slop: f64,
    /// Distance (screen px) within which a pointer hits an edge curve.
    pub edge_hit_tolerance: f64,
    /// Radius (screen px) within which a pointer hits a connection handle.
    pub handle_radius: f64,
    pub animation_cycle_ms: u64,
    /// Lower bound of the horizontal Bézier control offset.
    pub min_control_offset: f64,
    /// Share of the endpoint distance used as control offset when above the minimum.
    pub control_offset_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 2.0,
            zoom_step: 0.1,
            click_slop: 3.0,
            edge_hit_tolerance: 6.0,
            handle_radius: 8.0,
            animation_cycle_ms: 2000,
            min_control_offset: 100.0,
            control_offset_ratio: 0.3,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "minZoom must be a positive number, got {}",
                self.min_zoom
            )));
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            return Err(ConfigError::Invalid(format!(
                "maxZoom ({}) must be at least minZoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "zoomStep must be a positive number, got {}",
                self.zoom_step
            )));
        }
        let non_negative = [
            ("clickSlop", self.click_slop),
            ("edgeHitTolerance", self.edge_hit_tolerance),
            ("handleRadius", self.handle_radius),
            ("minControlOffset", self.min_control_offset),
            ("controlOffsetRatio", self.control_offset_ratio),
        ];
        if let Some((name, value)) = non_negative
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v >= 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
        if self.animation_cycle_ms == 0 {
            return Err(ConfigError::Invalid(
                "animationCycleMs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn animation_cycle(&self) -> Duration {
        Duration::from_millis(self.animation_cycle_ms)
    }
}
