//! Shared vocabulary types for the lumen visualization engine.
//!
//! This crate holds the types every other crate speaks: colors and palettes,
//! the visualization mode enumeration, beat events, buffer capacities and the
//! unified error type.

use thiserror::Error;

pub mod color;
pub mod events;
pub mod mode;

pub use color::{Color, ColorScheme};
pub use events::{BeatEvent, BeatSink};
pub use mode::VisualizationMode;

/// Number of spectrum magnitude bins held by the engine.
pub const SPECTRUM_BINS: usize = 128;

/// Number of waveform samples held by the engine.
pub const WAVEFORM_SAMPLES: usize = 256;

/// Fixed capacity of the particle pool.
pub const MAX_PARTICLES: usize = 1000;

/// Unified error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
