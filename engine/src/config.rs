//! Serializable configuration surface.
//!
//! The hosting layer owns persistence; this crate only guarantees that the
//! configuration round-trips through serde.

use serde::{Deserialize, Serialize};
use viz_core::{ColorScheme, VisualizationMode};

/// Wholesale engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizerConfig {
    pub mode: VisualizationMode,
    /// Input gain applied to every incoming sample and level.
    pub sensitivity: f32,
    /// Exponential smoothing factor in [0, 1).
    pub smoothing: f32,
    /// Gates coherence-colored blending in every renderer.
    pub bio_reactive: bool,
    pub color_scheme: ColorScheme,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            mode: VisualizationMode::Spectrum,
            sensitivity: 1.0,
            smoothing: 0.8,
            bio_reactive: true,
            color_scheme: ColorScheme::vaporwave(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = VisualizerConfig {
            mode: VisualizationMode::Nebula,
            sensitivity: 1.5,
            smoothing: 0.6,
            bio_reactive: false,
            ..VisualizerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: VisualizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode, VisualizationMode::Nebula);
        assert!((back.sensitivity - 1.5).abs() < 1e-6);
        assert!((back.smoothing - 0.6).abs() < 1e-6);
        assert!(!back.bio_reactive);
        assert_eq!(back.color_scheme, config.color_scheme);
    }

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.mode, VisualizationMode::Spectrum);
        assert!((config.sensitivity - 1.0).abs() < f32::EPSILON);
        assert!((config.smoothing - 0.8).abs() < f32::EPSILON);
        assert!(config.bio_reactive);
        assert_eq!(config.color_scheme.len(), 5);
    }
}
