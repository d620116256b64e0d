//! Lock-free producer/consumer handoff for cross-thread embeddings.
//!
//! The audio producer typically runs on a real-time thread, so the handoff
//! must never block or allocate. Frames are fixed-size `Copy` snapshots
//! pushed through an SPSC ring buffer; a full ring drops the new frame
//! instead of stalling the producer. The engine drains pending frames at
//! the top of each render call, so the two sides never race on the signal
//! buffers mid-copy.

use ringbuf::{Consumer, HeapRb, Producer};
use std::sync::Arc;
use viz_core::{SPECTRUM_BINS, WAVEFORM_SAMPLES};

/// One audio producer update: spectrum magnitudes, waveform samples and
/// level scalars, truncated to the engine's fixed capacities.
#[derive(Clone, Copy)]
pub struct AudioFrame {
    pub spectrum: [f32; SPECTRUM_BINS],
    pub spectrum_len: usize,
    pub waveform: [f32; WAVEFORM_SAMPLES],
    pub waveform_len: usize,
    pub rms: f32,
    pub peak: f32,
}

impl AudioFrame {
    /// Snapshots caller-side slices, copying at most the fixed capacities.
    pub fn from_slices(spectrum: &[f32], waveform: &[f32], rms: f32, peak: f32) -> Self {
        let mut frame = Self {
            spectrum: [0.0; SPECTRUM_BINS],
            spectrum_len: spectrum.len().min(SPECTRUM_BINS),
            waveform: [0.0; WAVEFORM_SAMPLES],
            waveform_len: waveform.len().min(WAVEFORM_SAMPLES),
            rms,
            peak,
        };
        frame.spectrum[..frame.spectrum_len].copy_from_slice(&spectrum[..frame.spectrum_len]);
        frame.waveform[..frame.waveform_len].copy_from_slice(&waveform[..frame.waveform_len]);
        frame
    }
}

/// One biometric producer update.
#[derive(Debug, Clone, Copy)]
pub struct BioFrame {
    pub coherence: f64,
    pub heart_rate_bpm: f64,
    pub hrv_ms: f64,
}

/// Producer half of a feed. Single producer; pushes never block.
pub struct FeedSender<T> {
    inner: Producer<T, Arc<HeapRb<T>>>,
}

impl<T> FeedSender<T> {
    /// Pushes a frame; returns false (frame dropped) when the ring is full.
    pub fn push(&mut self, frame: T) -> bool {
        self.inner.push(frame).is_ok()
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }
}

/// Consumer half of a feed. Single consumer.
pub struct FeedReceiver<T> {
    inner: Consumer<T, Arc<HeapRb<T>>>,
}

impl<T> FeedReceiver<T> {
    /// Pops the oldest pending frame.
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop()
    }

    /// Drains every pending frame, returning the newest.
    pub fn latest(&mut self) -> Option<T> {
        let mut newest = None;
        while let Some(frame) = self.inner.pop() {
            newest = Some(frame);
        }
        newest
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

pub type AudioFeedSender = FeedSender<AudioFrame>;
pub type AudioFeedReceiver = FeedReceiver<AudioFrame>;
pub type BioFeedSender = FeedSender<BioFrame>;
pub type BioFeedReceiver = FeedReceiver<BioFrame>;

/// SPSC channel carrying [`AudioFrame`]s, buffering up to `capacity` frames.
pub fn audio_feed(capacity: usize) -> (AudioFeedSender, AudioFeedReceiver) {
    feed(capacity)
}

/// SPSC channel carrying [`BioFrame`]s.
pub fn bio_feed(capacity: usize) -> (BioFeedSender, BioFeedReceiver) {
    feed(capacity)
}

fn feed<T>(capacity: usize) -> (FeedSender<T>, FeedReceiver<T>) {
    let rb = HeapRb::new(capacity.max(1));
    let (producer, consumer) = rb.split();
    (
        FeedSender { inner: producer },
        FeedReceiver { inner: consumer },
    )
}
