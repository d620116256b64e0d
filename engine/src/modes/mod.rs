//! The mode renderers: one stateless draw routine per visualization mode.
//!
//! Every renderer is a pure function of the scene and the target; none keep
//! state across frames. Renderers whose whole frame is derived from the
//! spectrum draw nothing until audio data has arrived, so an empty feed
//! leaves only the cleared background.

mod bio_reactive;
mod cymatics;
mod mandala;
mod nebula;
mod octave_map;
mod particle_field;
mod spectrum;
mod vaporwave;
mod waveform;

use crate::particles::ParticleSystem;
use raster::RenderTarget;
use signal::SignalState;
use viz_core::{Color, ColorScheme, VisualizationMode};

/// Read-only view of everything a renderer may consume for one frame.
pub struct Scene<'a> {
    pub state: &'a SignalState,
    pub palette: &'a ColorScheme,
    /// Engine time in seconds at the start of this frame.
    pub time: f64,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Gates coherence-colored blending in every renderer.
    pub bio_reactive: bool,
}

impl Scene<'_> {
    /// Palette color for a normalized frequency position.
    fn frequency_color(&self, normalized: f32) -> Color {
        self.palette.color_for(normalized)
    }

    /// Coherence-mapped color for the bio overlay.
    fn bio_color(&self) -> Color {
        Color::from_coherence(self.state.bio().coherence)
    }

    /// Base stroke color: coherence-driven when the bio overlay is on,
    /// otherwise the first palette entry.
    fn base_color(&self) -> Color {
        if self.bio_reactive {
            self.bio_color()
        } else {
            self.palette.primary()
        }
    }
}

/// Draws one frame of `mode` into `target`.
///
/// Kaleidoscope and FlowField are intentional aliases of Mandala and
/// Particles rather than distinct algorithms; Custom falls back to the
/// spectrum renderer.
pub fn dispatch(
    mode: VisualizationMode,
    scene: &Scene<'_>,
    target: &mut RenderTarget<'_>,
    particles: &mut ParticleSystem,
) {
    match mode {
        VisualizationMode::Spectrum | VisualizationMode::Custom => spectrum::render(scene, target),
        VisualizationMode::Waveform => waveform::render(scene, target),
        VisualizationMode::Particles | VisualizationMode::FlowField => {
            particle_field::render(scene, target, particles)
        }
        VisualizationMode::Cymatics => cymatics::render(scene, target),
        VisualizationMode::Mandala | VisualizationMode::Kaleidoscope => {
            mandala::render(scene, target)
        }
        VisualizationMode::Vaporwave => vaporwave::render(scene, target),
        VisualizationMode::Nebula => nebula::render(scene, target),
        VisualizationMode::OctaveMap => octave_map::render(scene, target),
        VisualizationMode::BioReactive => bio_reactive::render(scene, target),
    }
}

pub use spectrum::BAR_COUNT as SPECTRUM_BAR_COUNT;
