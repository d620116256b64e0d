// Bio-reactive display: concentric fading rings pulsing at the heart rate,
// swayed by the breath cycle, ringed by an HRV-driven wobble band. All
// colors follow the coherence hue ramp.

use super::Scene;
use raster::RenderTarget;
use std::f32::consts::PI;
use viz_core::Color;

const DOT_RADIUS: i32 = 3;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    let (w, h) = (target.width(), target.height());
    let center_x = w / 2;
    let center_y = h / 2;
    let time = scene.time as f32;
    let bio = scene.state.bio();

    // One full pulse per beat: sin(t * bpm / 30 * pi) completes a cycle
    // every 60/bpm seconds.
    let heart_pulse = ((time * bio.heart_rate_bpm as f32 / 30.0 * PI).sin() + 1.0) * 0.5;
    let breath_sway = (bio.breath_phase * 2.0 * PI).sin() * 5.0;

    let base_radius = w / 4;
    let pulse_radius = (base_radius + (heart_pulse * 30.0 + breath_sway) as i32).max(1);

    let coherence_color = Color::from_coherence(bio.coherence);

    // Ring stack fading toward the center.
    let mut radius = pulse_radius;
    while radius > 0 {
        let fade = radius as f32 / pulse_radius as f32;
        target.draw_circle(center_x, center_y, radius, coherence_color.scaled(fade));
        radius -= 10;
    }

    // HRV wobble band outside the ring stack.
    let wave_radius = (pulse_radius + 20) as f32;
    let hrv = bio.hrv_ms as f32;
    let mut deg = 0;
    while deg < 360 {
        let angle = deg as f32 * PI / 180.0;
        let wave = (angle * 8.0 + time * 2.0).sin() * hrv * 0.5;
        let x = center_x + ((wave_radius + wave) * angle.cos()) as i32;
        let y = center_y + ((wave_radius + wave) * angle.sin()) as i32;
        target.fill_circle(x, y, DOT_RADIUS, coherence_color);
        deg += 2;
    }
}
