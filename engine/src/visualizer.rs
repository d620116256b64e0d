//! Engine orchestrator: owns the signal state, beat detector, particle
//! pool and palette, and dispatches each frame to the active mode renderer.

use log::{debug, info};
use raster::RenderTarget;
use signal::{AudioFeedReceiver, BeatDetector, BioFeedReceiver, SignalState};
use viz_core::{BeatEvent, BeatSink, Color, ColorScheme, Error, VisualizationMode};

use crate::config::VisualizerConfig;
use crate::modes::{self, Scene};
use crate::particles::ParticleSystem;

/// Dark background cleared behind every mode.
const BACKGROUND: Color = Color::new(0.05, 0.05, 0.1, 1.0);

/// Adapter so hosts can hand in a plain closure as a beat sink.
struct FnSink<F>(F);

impl<F> BeatSink for FnSink<F>
where
    F: FnMut(&BeatEvent),
{
    fn on_beat(&mut self, event: &BeatEvent) {
        (self.0)(event)
    }
}

/// The audio/bio-reactive visualization engine.
///
/// Single-threaded per call: producers either call the update methods from
/// the render context, or push frames through [`signal::audio_feed`] /
/// [`signal::bio_feed`] from their own thread and let [`render`](Self::render)
/// drain them. `render` stays allocation-free; allocation happens only in
/// [`initialize`](Self::initialize) and [`resize`](Self::resize).
pub struct Visualizer {
    state: SignalState,
    beat: BeatDetector,
    particles: ParticleSystem,
    palette: ColorScheme,
    mode: VisualizationMode,
    bio_reactive: bool,
    elapsed: f64,
    initialized: bool,
    beat_sink: Option<Box<dyn BeatSink + Send>>,
    audio_rx: Option<AudioFeedReceiver>,
    bio_rx: Option<BioFeedReceiver>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            state: SignalState::new(),
            beat: BeatDetector::new(),
            particles: ParticleSystem::new(),
            palette: ColorScheme::vaporwave(),
            mode: VisualizationMode::Spectrum,
            bio_reactive: true,
            elapsed: 0.0,
            initialized: false,
            beat_sink: None,
            audio_rx: None,
            bio_rx: None,
        }
    }

    /// Deterministic particle seeding for tests and reproducible captures.
    pub fn with_seed(seed: u64) -> Self {
        let mut v = Self::new();
        v.particles = ParticleSystem::with_seed(viz_core::MAX_PARTICLES, seed);
        v
    }

    /// Seeds the particle pool for a `width` x `height` surface and marks
    /// the engine ready.
    pub fn initialize(&mut self, width: i32, height: i32) -> Result<(), Error> {
        if width <= 0 || height <= 0 {
            return Err(Error::Initialization(format!(
                "invalid dimensions {width}x{height}"
            )));
        }
        self.particles
            .seed(width as f32, height as f32, &self.palette);
        self.initialized = true;
        info!("visualizer initialized at {width}x{height}");
        Ok(())
    }

    /// Reseeds the particle pool for the new dimensions.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), Error> {
        debug!("visualizer resize to {width}x{height}");
        self.initialize(width, height)
    }

    /// Clears the particle pool and marks the engine not ready. Safe to
    /// call any number of times.
    pub fn shutdown(&mut self) {
        if self.initialized {
            debug!("visualizer shutdown");
        }
        self.particles.clear();
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    pub fn set_mode(&mut self, mode: VisualizationMode) {
        debug!("visualization mode -> {mode}");
        self.mode = mode;
    }

    pub fn color_scheme(&self) -> &ColorScheme {
        &self.palette
    }

    /// Replaces the palette wholesale. Particles pick up the new colors at
    /// the next initialize/resize.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.palette = scheme;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.state.set_sensitivity(sensitivity);
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.state.set_smoothing(smoothing);
    }

    /// Gates coherence-colored blending in every renderer; computation is
    /// unaffected.
    pub fn set_bio_reactive(&mut self, enabled: bool) {
        self.bio_reactive = enabled;
    }

    pub fn bio_reactive(&self) -> bool {
        self.bio_reactive
    }

    pub fn set_beat_threshold(&mut self, threshold: f32) {
        self.beat.set_threshold(threshold);
    }

    /// Registers a sink invoked synchronously on every detected beat, in
    /// addition to the event returned by the update/render calls.
    pub fn set_beat_sink<S>(&mut self, sink: S)
    where
        S: BeatSink + Send + 'static,
    {
        self.beat_sink = Some(Box::new(sink));
    }

    /// Closure form of [`set_beat_sink`](Self::set_beat_sink).
    pub fn set_beat_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&BeatEvent) + Send + 'static,
    {
        self.beat_sink = Some(Box::new(FnSink(callback)));
    }

    pub fn clear_beat_sink(&mut self) {
        self.beat_sink = None;
    }

    /// Attaches the consumer half of an audio feed; pending frames are
    /// drained at the top of every render call.
    pub fn attach_audio_feed(&mut self, receiver: AudioFeedReceiver) {
        self.audio_rx = Some(receiver);
    }

    /// Attaches the consumer half of a biometric feed.
    pub fn attach_bio_feed(&mut self, receiver: BioFeedReceiver) {
        self.bio_rx = Some(receiver);
    }

    pub fn signal(&self) -> &SignalState {
        &self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Replaces the audio snapshot from caller-side slices. For producers
    /// running on the render context; cross-thread producers use a feed.
    ///
    /// Returns the beat detected by this update, if any.
    pub fn update_audio_data(
        &mut self,
        spectrum: &[f32],
        waveform: &[f32],
        rms: f32,
        peak: f32,
    ) -> Option<BeatEvent> {
        self.state.update_audio(spectrum, waveform, rms, peak);
        let event = self.beat.process(self.state.bands(), self.elapsed);
        self.fire_beat(event);
        event
    }

    /// Replaces the biometric scalars.
    pub fn update_bio_data(&mut self, coherence: f64, heart_rate_bpm: f64, hrv_ms: f64) {
        self.state.update_bio(coherence, heart_rate_bpm, hrv_ms);
    }

    /// Renders one frame into `target`: drains attached feeds, advances the
    /// engine clock by `delta_time` seconds, clears to the dark background
    /// and dispatches to the active mode renderer.
    ///
    /// A no-op on an invalid target. Returns the most recent beat detected
    /// while draining the audio feed, if any.
    pub fn render(&mut self, target: &mut RenderTarget<'_>, delta_time: f64) -> Option<BeatEvent> {
        if !target.is_valid() {
            return None;
        }
        let dt = if delta_time.is_finite() && delta_time > 0.0 {
            delta_time
        } else {
            0.0
        };

        let beat = self.drain_feeds();

        let time = self.elapsed;
        self.elapsed += dt;
        self.state.advance_breath(dt);

        target.clear(BACKGROUND);

        let scene = Scene {
            state: &self.state,
            palette: &self.palette,
            time,
            dt: dt as f32,
            bio_reactive: self.bio_reactive,
        };
        modes::dispatch(self.mode, &scene, target, &mut self.particles);

        beat
    }

    fn drain_feeds(&mut self) -> Option<BeatEvent> {
        let mut newest_beat = None;
        if let Some(rx) = self.audio_rx.as_mut() {
            while let Some(frame) = rx.pop() {
                self.state.apply_audio_frame(&frame);
                if let Some(event) = self.beat.process(self.state.bands(), self.elapsed) {
                    newest_beat = Some(event);
                }
            }
        }
        if let Some(rx) = self.bio_rx.as_mut() {
            if let Some(frame) = rx.latest() {
                self.state.apply_bio_frame(&frame);
            }
        }
        self.fire_beat(newest_beat);
        newest_beat
    }

    fn fire_beat(&mut self, event: Option<BeatEvent>) {
        if let (Some(event), Some(sink)) = (event, self.beat_sink.as_mut()) {
            sink.on_beat(&event);
        }
    }

    /// Applies a whole configuration in one call.
    pub fn apply_config(&mut self, config: &VisualizerConfig) {
        self.set_mode(config.mode);
        self.set_sensitivity(config.sensitivity);
        self.set_smoothing(config.smoothing);
        self.set_bio_reactive(config.bio_reactive);
        self.set_color_scheme(config.color_scheme.clone());
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> VisualizerConfig {
        VisualizerConfig {
            mode: self.mode,
            sensitivity: self.state.sensitivity(),
            smoothing: self.state.smoothing(),
            bio_reactive: self.bio_reactive,
            color_scheme: self.palette.clone(),
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Constructs visualizers for the hosting layer and exposes the mode-name
/// table it persists.
pub struct VisualizerFactory;

impl VisualizerFactory {
    pub fn create(mode: VisualizationMode) -> Visualizer {
        let mut visualizer = Visualizer::new();
        visualizer.set_mode(mode);
        visualizer
    }

    /// Display names of every mode, in menu order.
    pub fn available_modes() -> Vec<&'static str> {
        VisualizationMode::ALL.iter().map(|m| m.name()).collect()
    }

    /// Reverse lookup; unknown names fall back to `Custom`.
    pub fn mode_from_name(name: &str) -> VisualizationMode {
        VisualizationMode::from_name(name)
    }
}
