//! Fixed-pool particle simulation with audio and biometric forces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use viz_core::{Color, ColorScheme, MAX_PARTICLES};

/// Initial velocity components are uniform in `[-INITIAL_SPEED, INITIAL_SPEED)`.
const INITIAL_SPEED: f32 = 50.0;

/// Multiplicative velocity damping per step.
const DAMPING: f32 = 0.99;

/// Stochastic force amplitude per unit of smoothed RMS.
const AUDIO_FORCE_GAIN: f32 = 100.0;

/// Centripetal pull per unit of normalized coherence.
const ATTRACTION_GAIN: f32 = 0.5;

/// A single pooled particle. Recycled via toroidal wraparound, never
/// removed.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Alpha scalar; the pool keeps every particle fully alive.
    pub life: f32,
    pub color: Color,
}

/// Fixed-capacity particle pool integrated under stochastic audio forces,
/// coherence-driven centripetal attraction, damping and toroidal
/// wraparound at the buffer edges.
///
/// The random source is seeded once at construction; the pool size never
/// changes at runtime.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: StdRng,
    capacity: usize,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            rng: StdRng::from_entropy(),
            capacity,
        }
    }

    /// Deterministic pool for tests and reproducible captures.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            rng: StdRng::seed_from_u64(seed),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// (Re)seeds the pool across a `width` x `height` surface with uniform
    /// positions and velocities. Half the capacity starts live; palette
    /// colors are assigned round-robin.
    pub fn seed(&mut self, width: f32, height: f32, palette: &ColorScheme) {
        self.particles.clear();
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let count = (self.capacity / 2).max(1);
        for i in 0..count {
            let particle = Particle {
                x: self.rng.gen_range(0.0..width),
                y: self.rng.gen_range(0.0..height),
                vx: self.rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED),
                vy: self.rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED),
                life: 1.0,
                color: palette.cycle(i),
            };
            self.particles.push(particle);
        }
    }

    /// Drops every particle. Reseed to use the pool again.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// One integration step: stochastic audio force scaled by the smoothed
    /// RMS level, optional centripetal attraction scaled by coherence,
    /// velocity integration, toroidal wraparound, then damping.
    pub fn update(
        &mut self,
        dt: f32,
        width: f32,
        height: f32,
        smoothed_rms: f32,
        coherence: f64,
        bio_reactive: bool,
    ) {
        if !dt.is_finite() || dt <= 0.0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let audio_force = if smoothed_rms.is_finite() {
            smoothed_rms * AUDIO_FORCE_GAIN
        } else {
            0.0
        };
        let attraction = (coherence.clamp(0.0, 100.0) / 100.0) as f32 * ATTRACTION_GAIN;
        let center_x = width / 2.0;
        let center_y = height / 2.0;

        for p in &mut self.particles {
            p.vx += (self.rng.gen::<f32>() - 0.5) * audio_force * dt;
            p.vy += (self.rng.gen::<f32>() - 0.5) * audio_force * dt;

            if bio_reactive {
                p.vx += (center_x - p.x) * attraction * dt;
                p.vy += (center_y - p.y) * attraction * dt;
            }

            p.x += p.vx * dt;
            p.y += p.vy * dt;

            // Toroidal wrap. rem_euclid of a tiny negative can round up to
            // the bound itself, so re-check the upper edge.
            p.x = p.x.rem_euclid(width);
            if p.x >= width {
                p.x = 0.0;
            }
            p.y = p.y.rem_euclid(height);
            if p.y >= height {
                p.y = 0.0;
            }

            p.vx *= DAMPING;
            p.vy *= DAMPING;
        }
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_fills_half_capacity() {
        let mut pool = ParticleSystem::with_seed(100, 7);
        pool.seed(64.0, 48.0, &ColorScheme::vaporwave());
        assert_eq!(pool.len(), 50);
        for p in pool.particles() {
            assert!(p.x >= 0.0 && p.x < 64.0);
            assert!(p.y >= 0.0 && p.y < 48.0);
            assert!(p.vx >= -INITIAL_SPEED && p.vx < INITIAL_SPEED);
        }
    }

    #[test]
    fn test_containment_after_many_steps() {
        let mut pool = ParticleSystem::with_seed(200, 42);
        pool.seed(64.0, 48.0, &ColorScheme::vaporwave());
        for _ in 0..10_000 {
            pool.update(1.0 / 60.0, 64.0, 48.0, 0.8, 75.0, true);
        }
        for p in pool.particles() {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!(p.vx.is_finite() && p.vy.is_finite());
            assert!(p.x >= 0.0 && p.x < 64.0, "x out of range: {}", p.x);
            assert!(p.y >= 0.0 && p.y < 48.0, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn test_pool_size_fixed_at_runtime() {
        let mut pool = ParticleSystem::with_seed(100, 1);
        pool.seed(32.0, 32.0, &ColorScheme::vaporwave());
        let before = pool.len();
        for _ in 0..1000 {
            pool.update(0.016, 32.0, 32.0, 1.0, 0.0, false);
        }
        assert_eq!(pool.len(), before);
    }

    #[test]
    fn test_seeding_is_deterministic() {
        let mut a = ParticleSystem::with_seed(50, 9);
        let mut b = ParticleSystem::with_seed(50, 9);
        a.seed(100.0, 100.0, &ColorScheme::vaporwave());
        b.seed(100.0, 100.0, &ColorScheme::vaporwave());
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.vy, pb.vy);
        }
    }

    #[test]
    fn test_coherence_pulls_toward_center() {
        let mut pool = ParticleSystem::with_seed(40, 3);
        pool.seed(100.0, 100.0, &ColorScheme::vaporwave());
        // Silence, full coherence: particles should drift toward (50, 50).
        let initial: Vec<f32> = pool
            .particles()
            .iter()
            .map(|p| (p.x - 50.0).hypot(p.y - 50.0))
            .collect();
        for _ in 0..600 {
            pool.update(0.016, 100.0, 100.0, 0.0, 100.0, true);
        }
        let after: Vec<f32> = pool
            .particles()
            .iter()
            .map(|p| (p.x - 50.0).hypot(p.y - 50.0))
            .collect();
        let initial_sum: f32 = initial.iter().sum();
        let after_sum: f32 = after.iter().sum();
        assert!(after_sum < initial_sum);
    }

    #[test]
    fn test_invalid_step_is_ignored() {
        let mut pool = ParticleSystem::with_seed(10, 5);
        pool.seed(10.0, 10.0, &ColorScheme::vaporwave());
        let snapshot: Vec<f32> = pool.particles().iter().map(|p| p.x).collect();
        pool.update(f32::NAN, 10.0, 10.0, 1.0, 0.0, false);
        pool.update(-1.0, 10.0, 10.0, 1.0, 0.0, false);
        pool.update(0.016, 0.0, 10.0, 1.0, 0.0, false);
        let unchanged: Vec<f32> = pool.particles().iter().map(|p| p.x).collect();
        assert_eq!(snapshot, unchanged);
    }
}
