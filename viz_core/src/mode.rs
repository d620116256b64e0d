//! The closed enumeration of visualization modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the engine's rendering algorithms.
///
/// `Kaleidoscope` and `FlowField` reuse the Mandala and Particles renderers;
/// `Custom` is the fallback slot for host-defined modes and degrades to the
/// spectrum renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualizationMode {
    Spectrum,
    Waveform,
    Particles,
    Cymatics,
    Mandala,
    Vaporwave,
    Nebula,
    Kaleidoscope,
    FlowField,
    OctaveMap,
    BioReactive,
    Custom,
}

impl VisualizationMode {
    /// Every mode, in menu order.
    pub const ALL: [VisualizationMode; 12] = [
        VisualizationMode::Spectrum,
        VisualizationMode::Waveform,
        VisualizationMode::Particles,
        VisualizationMode::Cymatics,
        VisualizationMode::Mandala,
        VisualizationMode::Vaporwave,
        VisualizationMode::Nebula,
        VisualizationMode::Kaleidoscope,
        VisualizationMode::FlowField,
        VisualizationMode::OctaveMap,
        VisualizationMode::BioReactive,
        VisualizationMode::Custom,
    ];

    /// Display name used by hosts for menus and saved settings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Spectrum => "Spectrum",
            Self::Waveform => "Waveform",
            Self::Particles => "Particles",
            Self::Cymatics => "Cymatics",
            Self::Mandala => "Mandala",
            Self::Vaporwave => "Vaporwave",
            Self::Nebula => "Nebula",
            Self::Kaleidoscope => "Kaleidoscope",
            Self::FlowField => "Flow Field",
            Self::OctaveMap => "Octave Map",
            Self::BioReactive => "Bio-Reactive",
            Self::Custom => "Custom",
        }
    }

    /// Reverse of [`name`](Self::name); unrecognized names fall back to
    /// `Custom`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == name)
            .unwrap_or(Self::Custom)
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for VisualizationMode {
    fn default() -> Self {
        Self::Spectrum
    }
}
