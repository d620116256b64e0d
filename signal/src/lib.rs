//! Signal state for the visualization engine.
//!
//! Decomposes incoming magnitude spectra into seven perceptual bands,
//! maintains exponentially smoothed spectrum/RMS values, and holds the
//! latest waveform snapshot and biometric scalars for the renderers.

use log::debug;
use viz_core::{SPECTRUM_BINS, WAVEFORM_SAMPLES};

pub mod beat;
pub mod feed;

pub use beat::BeatDetector;
pub use feed::{
    audio_feed, bio_feed, AudioFeedReceiver, AudioFeedSender, AudioFrame, BioFeedReceiver,
    BioFeedSender, BioFrame, FeedReceiver, FeedSender,
};

/// Smoothing factors live in [0, 1); 1.0 would freeze the smoothed values.
const MAX_SMOOTHING: f32 = 0.999;

/// Breath phase advances at a nominal resting rate when no wearable drives
/// it.
const BREATHS_PER_MINUTE: f64 = 12.0;

/// Averaged levels of the seven perceptual frequency bands.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandLevels {
    pub sub_bass: f32,
    pub bass: f32,
    pub low_mid: f32,
    pub mid: f32,
    pub high_mid: f32,
    pub presence: f32,
    pub brilliance: f32,
}

impl BandLevels {
    /// Band labels with current levels, ascending in frequency.
    pub fn named(&self) -> [(&'static str, f32); 7] {
        [
            ("Sub", self.sub_bass),
            ("Bass", self.bass),
            ("Low Mid", self.low_mid),
            ("Mid", self.mid),
            ("High Mid", self.high_mid),
            ("Presence", self.presence),
            ("Air", self.brilliance),
        ]
    }
}

/// Latest biometric scalars from the wearable pipeline.
#[derive(Debug, Clone, Copy)]
pub struct BioMetrics {
    /// Heart-rhythm coherence score in [0, 100].
    pub coherence: f64,
    pub heart_rate_bpm: f64,
    pub hrv_ms: f64,
    /// Breath cycle phase in [0, 1), integrated by the engine clock.
    pub breath_phase: f32,
}

impl Default for BioMetrics {
    fn default() -> Self {
        Self {
            coherence: 0.0,
            heart_rate_bpm: 60.0,
            hrv_ms: 0.0,
            breath_phase: 0.0,
        }
    }
}

/// Per-frame signal snapshot read by every renderer.
///
/// Mutated only by the update entry points; each call replaces the full
/// relevant slice, never part of it.
#[derive(Debug, Clone)]
pub struct SignalState {
    spectrum: [f32; SPECTRUM_BINS],
    spectrum_len: usize,
    waveform: [f32; WAVEFORM_SAMPLES],
    waveform_len: usize,
    rms: f32,
    peak: f32,
    dominant_bin: usize,
    bands: BandLevels,
    smoothed_spectrum: [f32; SPECTRUM_BINS],
    smoothed_rms: f32,
    bio: BioMetrics,
    sensitivity: f32,
    smoothing: f32,
}

impl SignalState {
    pub fn new() -> Self {
        Self {
            spectrum: [0.0; SPECTRUM_BINS],
            spectrum_len: 0,
            waveform: [0.0; WAVEFORM_SAMPLES],
            waveform_len: 0,
            rms: 0.0,
            peak: 0.0,
            dominant_bin: 0,
            bands: BandLevels::default(),
            smoothed_spectrum: [0.0; SPECTRUM_BINS],
            smoothed_rms: 0.0,
            bio: BioMetrics::default(),
            sensitivity: 1.0,
            smoothing: 0.8,
        }
    }

    pub fn spectrum(&self) -> &[f32] {
        &self.spectrum
    }

    /// Number of spectrum bins copied by the most recent audio update.
    pub fn spectrum_len(&self) -> usize {
        self.spectrum_len
    }

    pub fn waveform(&self) -> &[f32] {
        &self.waveform
    }

    /// Number of waveform samples copied by the most recent audio update.
    pub fn waveform_len(&self) -> usize {
        self.waveform_len
    }

    pub fn rms(&self) -> f32 {
        self.rms
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Index of the strongest spectrum bin from the last update.
    pub fn dominant_bin(&self) -> usize {
        self.dominant_bin
    }

    pub fn bands(&self) -> &BandLevels {
        &self.bands
    }

    pub fn smoothed_spectrum(&self) -> &[f32] {
        &self.smoothed_spectrum
    }

    pub fn smoothed_rms(&self) -> f32 {
        self.smoothed_rms
    }

    pub fn bio(&self) -> &BioMetrics {
        &self.bio
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Input gain applied to every copied sample and level.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if !sensitivity.is_finite() {
            debug!("ignoring non-finite sensitivity {sensitivity}");
            return;
        }
        self.sensitivity = sensitivity;
    }

    /// Exponential smoothing factor, clamped into [0, 1).
    pub fn set_smoothing(&mut self, smoothing: f32) {
        if !smoothing.is_finite() {
            debug!("ignoring non-finite smoothing {smoothing}");
            return;
        }
        self.smoothing = smoothing.clamp(0.0, MAX_SMOOTHING);
    }

    /// Replaces the audio snapshot: copies up to the fixed capacities (each
    /// sample scaled by sensitivity), rederives the seven bands when at
    /// least 64 bins arrived, and advances the smoothed values one step.
    pub fn update_audio(&mut self, spectrum: &[f32], waveform: &[f32], rms: f32, peak: f32) {
        let n = spectrum.len().min(SPECTRUM_BINS);
        for (dst, &src) in self.spectrum[..n].iter_mut().zip(spectrum) {
            *dst = sanitize(src * self.sensitivity);
        }
        self.spectrum_len = n;

        let n = waveform.len().min(WAVEFORM_SAMPLES);
        for (dst, &src) in self.waveform[..n].iter_mut().zip(waveform) {
            *dst = sanitize(src * self.sensitivity);
        }
        self.waveform_len = n;

        self.rms = sanitize(rms * self.sensitivity);
        self.peak = sanitize(peak * self.sensitivity);

        self.dominant_bin = self.spectrum[..self.spectrum_len]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);

        if spectrum.len() >= 64 {
            self.bands = decompose(spectrum, self.sensitivity);
        }

        let keep = self.smoothing;
        let take = 1.0 - keep;
        for (smoothed, &raw) in self.smoothed_spectrum.iter_mut().zip(&self.spectrum) {
            *smoothed = *smoothed * keep + raw * take;
        }
        self.smoothed_rms = self.smoothed_rms * keep + self.rms * take;
    }

    /// Replaces the biometric scalars. No smoothing at this layer; renderers
    /// that want inertia integrate it themselves.
    pub fn update_bio(&mut self, coherence: f64, heart_rate_bpm: f64, hrv_ms: f64) {
        if !coherence.is_finite() || !heart_rate_bpm.is_finite() || !hrv_ms.is_finite() {
            debug!("ignoring non-finite bio update");
            return;
        }
        self.bio.coherence = coherence.clamp(0.0, 100.0);
        self.bio.heart_rate_bpm = heart_rate_bpm;
        self.bio.hrv_ms = hrv_ms;
    }

    /// Advances the breath phase by `dt` seconds at the nominal resting
    /// rate, wrapping at 1.0.
    pub fn advance_breath(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let phase =
            (self.bio.breath_phase as f64 + dt * BREATHS_PER_MINUTE / 60.0).rem_euclid(1.0) as f32;
        self.bio.breath_phase = if phase >= 1.0 { 0.0 } else { phase };
    }

    /// Applies one queued producer frame.
    pub fn apply_audio_frame(&mut self, frame: &AudioFrame) {
        self.update_audio(
            &frame.spectrum[..frame.spectrum_len],
            &frame.waveform[..frame.waveform_len],
            frame.rms,
            frame.peak,
        );
    }

    /// Applies one queued biometric frame.
    pub fn apply_bio_frame(&mut self, frame: &BioFrame) {
        self.update_bio(frame.coherence, frame.heart_rate_bpm, frame.hrv_ms);
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn mean(bins: &[f32]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().sum::<f32>() / bins.len() as f32
}

/// Seven perceptual bands averaged over fixed bin ranges. Only meaningful
/// for spectra of at least 64 bins; brilliance runs to the end of the input.
fn decompose(spectrum: &[f32], sensitivity: f32) -> BandLevels {
    BandLevels {
        sub_bass: sanitize(mean(&spectrum[0..2]) * sensitivity),
        bass: sanitize(mean(&spectrum[2..5]) * sensitivity),
        low_mid: sanitize(mean(&spectrum[5..9]) * sensitivity),
        mid: sanitize(mean(&spectrum[9..20]) * sensitivity),
        high_mid: sanitize(mean(&spectrum[20..35]) * sensitivity),
        presence: sanitize(mean(&spectrum[35..50]) * sensitivity),
        brilliance: sanitize(mean(&spectrum[50..]) * sensitivity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_copy_scales_by_sensitivity() {
        let mut state = SignalState::new();
        state.set_sensitivity(2.0);

        let spectrum: Vec<f32> = (0..512).map(|i| i as f32 / 512.0).collect();
        state.update_audio(&spectrum, &[], 0.25, 0.5);

        assert_eq!(state.spectrum_len(), SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let expected = i as f32 / 512.0 * 2.0;
            assert!((state.spectrum()[i] - expected).abs() < 1e-6, "bin {i}");
        }
        assert!((state.rms() - 0.5).abs() < 1e-6);
        assert!((state.peak() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_short_input_leaves_remainder_untouched() {
        let mut state = SignalState::new();
        state.update_audio(&[1.0; SPECTRUM_BINS], &[0.5; WAVEFORM_SAMPLES], 0.0, 0.0);
        state.update_audio(&[0.25; 16], &[0.125; 8], 0.0, 0.0);

        assert_eq!(state.spectrum_len(), 16);
        assert_eq!(state.waveform_len(), 8);
        assert!((state.spectrum()[0] - 0.25).abs() < 1e-6);
        // Bins past the copied prefix keep their previous contents.
        assert!((state.spectrum()[20] - 1.0).abs() < 1e-6);
        assert!((state.waveform()[20] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_band_decomposition_fixed_ranges() {
        let mut spectrum = vec![0.0f32; 64];
        // Make each band's range carry a distinct constant.
        for bin in spectrum.iter_mut().take(2) {
            *bin = 0.1;
        }
        for bin in spectrum.iter_mut().take(5).skip(2) {
            *bin = 0.2;
        }
        for bin in spectrum.iter_mut().take(9).skip(5) {
            *bin = 0.3;
        }
        for bin in spectrum.iter_mut().take(20).skip(9) {
            *bin = 0.4;
        }
        for bin in spectrum.iter_mut().take(35).skip(20) {
            *bin = 0.5;
        }
        for bin in spectrum.iter_mut().take(50).skip(35) {
            *bin = 0.6;
        }
        for bin in spectrum.iter_mut().take(64).skip(50) {
            *bin = 0.7;
        }

        let mut state = SignalState::new();
        state.update_audio(&spectrum, &[], 0.0, 0.0);

        let bands = state.bands();
        assert!((bands.sub_bass - 0.1).abs() < 1e-6);
        assert!((bands.bass - 0.2).abs() < 1e-6);
        assert!((bands.low_mid - 0.3).abs() < 1e-6);
        assert!((bands.mid - 0.4).abs() < 1e-6);
        assert!((bands.high_mid - 0.5).abs() < 1e-6);
        assert!((bands.presence - 0.6).abs() < 1e-6);
        assert!((bands.brilliance - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_short_spectrum_keeps_previous_bands() {
        let mut state = SignalState::new();
        state.update_audio(&[0.5; 64], &[], 0.0, 0.0);
        let before = *state.bands();
        state.update_audio(&[0.9; 32], &[], 0.0, 0.0);
        assert_eq!(*state.bands(), before);
    }

    #[test]
    fn test_smoothing_recurrence() {
        let mut state = SignalState::new();
        state.set_smoothing(0.8);
        state.update_audio(&[1.0; SPECTRUM_BINS], &[], 1.0, 1.0);
        // One step of s*0.8 + raw*0.2 from zero.
        assert!((state.smoothed_spectrum()[0] - 0.2).abs() < 1e-6);
        assert!((state.smoothed_rms() - 0.2).abs() < 1e-6);

        state.update_audio(&[1.0; SPECTRUM_BINS], &[], 1.0, 1.0);
        assert!((state.smoothed_rms() - 0.36).abs() < 1e-6);
    }

    #[test]
    fn test_zero_smoothing_tracks_instantly() {
        let mut state = SignalState::new();
        state.set_smoothing(0.0);
        state.update_audio(&[0.7; SPECTRUM_BINS], &[], 0.7, 0.7);
        assert!((state.smoothed_rms() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_smoothing_clamped_below_one() {
        let mut state = SignalState::new();
        state.set_smoothing(1.5);
        assert!(state.smoothing() < 1.0);
        state.set_smoothing(f32::NAN);
        assert!(state.smoothing() < 1.0);
    }

    #[test]
    fn test_dominant_bin_tracks_strongest() {
        let mut spectrum = vec![0.1f32; 64];
        spectrum[23] = 0.9;
        let mut state = SignalState::new();
        state.update_audio(&spectrum, &[], 0.0, 0.0);
        assert_eq!(state.dominant_bin(), 23);
    }

    #[test]
    fn test_bio_update_clamps_coherence() {
        let mut state = SignalState::new();
        state.update_bio(150.0, 72.0, 45.0);
        assert!((state.bio().coherence - 100.0).abs() < f64::EPSILON);
        state.update_bio(-5.0, 72.0, 45.0);
        assert!(state.bio().coherence.abs() < f64::EPSILON);
        // Non-finite updates are dropped wholesale.
        state.update_bio(f64::NAN, 72.0, 45.0);
        assert!(state.bio().coherence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_breath_phase_wraps() {
        let mut state = SignalState::new();
        state.advance_breath(2.5); // half a breath at 12/min
        assert!((state.bio().breath_phase - 0.5).abs() < 1e-3);
        state.advance_breath(2.5);
        assert!(state.bio().breath_phase < 1e-3);
        state.advance_breath(f64::NAN);
        assert!(state.bio().breath_phase.is_finite());
    }

    #[test]
    fn test_non_finite_input_sanitized() {
        let mut state = SignalState::new();
        state.update_audio(&[f32::NAN, f32::INFINITY, 0.5], &[], f32::NAN, 0.0);
        assert_eq!(state.spectrum()[0], 0.0);
        assert_eq!(state.spectrum()[1], 0.0);
        assert!((state.spectrum()[2] - 0.5).abs() < 1e-6);
        assert_eq!(state.rms(), 0.0);
    }
}
