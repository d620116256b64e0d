// Particle field: advances the pool one step, then draws each particle as
// a filled circle that swells with the smoothed RMS level.

use super::Scene;
use crate::particles::ParticleSystem;
use raster::RenderTarget;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>, particles: &mut ParticleSystem) {
    let state = scene.state;
    particles.update(
        scene.dt,
        target.width() as f32,
        target.height() as f32,
        state.smoothed_rms(),
        state.bio().coherence,
        scene.bio_reactive,
    );

    let radius = 2 + (state.smoothed_rms() * 3.0) as i32;
    for p in particles.particles() {
        target.fill_circle(p.x as i32, p.y as i32, radius, p.color);
    }
}
