// Lumen: audio/bio-reactive visualization engine
// Re-export the public surface of every member crate for embedders and
// integration tests.

pub use engine::{Particle, ParticleSystem, Visualizer, VisualizerConfig, VisualizerFactory};
pub use raster::{FrameBuffer, RenderTarget};
pub use signal::{
    audio_feed, bio_feed, AudioFeedReceiver, AudioFeedSender, AudioFrame, BandLevels,
    BeatDetector, BioFeedReceiver, BioFeedSender, BioFrame, BioMetrics, SignalState,
};
pub use viz_core::{
    BeatEvent, BeatSink, Color, ColorScheme, Error, VisualizationMode, MAX_PARTICLES,
    SPECTRUM_BINS, WAVEFORM_SAMPLES,
};
