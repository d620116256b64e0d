//! Audio/bio-reactive visualization engine.
//!
//! Turns live spectral, waveform and biometric signals into a rendered
//! ARGB32 pixel buffer through eleven rendering algorithms, dispatched by
//! the [`Visualizer`] orchestrator.

pub mod config;
pub mod modes;
pub mod particles;
mod visualizer;

pub use config::VisualizerConfig;
pub use particles::{Particle, ParticleSystem};
pub use visualizer::{Visualizer, VisualizerFactory};
