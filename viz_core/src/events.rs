//! Events emitted by the engine to the embedding host.

use serde::{Deserialize, Serialize};

/// A discrete beat detected from combined bass energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    /// Combined sub-bass + bass energy at the moment of detection.
    pub intensity: f32,
    /// Engine time of the beat, in seconds since the first render.
    pub timestamp: f64,
}

/// Receiver for beat notifications, invoked synchronously on detection.
pub trait BeatSink {
    fn on_beat(&mut self, event: &BeatEvent);
}
