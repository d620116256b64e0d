//! Edge-triggered beat detection from combined bass energy.

use crate::BandLevels;
use log::trace;
use viz_core::BeatEvent;

/// Thresholds combined sub-bass + bass energy with a refractory window.
///
/// Strictly edge triggered: while the refractory window is open, no event
/// is emitted no matter how much energy arrives. This is not an envelope
/// follower.
#[derive(Debug, Clone)]
pub struct BeatDetector {
    threshold: f32,
    refractory_secs: f64,
    last_beat: f64,
}

impl BeatDetector {
    pub const DEFAULT_THRESHOLD: f32 = 0.5;
    pub const DEFAULT_REFRACTORY_SECS: f64 = 0.1;

    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            refractory_secs: Self::DEFAULT_REFRACTORY_SECS,
            // The first qualifying frame always fires.
            last_beat: f64::NEG_INFINITY,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        if threshold.is_finite() {
            self.threshold = threshold;
        }
    }

    /// Examines the current band levels at engine time `now` (seconds) and
    /// emits a beat when bass energy crosses the threshold outside the
    /// refractory window.
    pub fn process(&mut self, bands: &BandLevels, now: f64) -> Option<BeatEvent> {
        let bass_energy = bands.sub_bass + bands.bass;
        if bass_energy > self.threshold && now - self.last_beat > self.refractory_secs {
            self.last_beat = now;
            trace!("beat at {now:.3}s, intensity {bass_energy:.3}");
            return Some(BeatEvent {
                intensity: bass_energy,
                timestamp: now,
            });
        }
        None
    }

    /// Forgets the last beat so the next qualifying frame fires immediately.
    pub fn reset(&mut self) {
        self.last_beat = f64::NEG_INFINITY;
    }
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::new()
    }
}
