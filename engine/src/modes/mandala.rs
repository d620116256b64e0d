// Radial mandala: the angle is folded into coherence-many wedges and the
// pattern fades with distance from center. Kaleidoscope mode draws through
// this routine as well.

use super::Scene;
use raster::RenderTarget;
use std::f32::consts::PI;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    if scene.state.spectrum_len() == 0 {
        return;
    }

    let (w, h) = (target.width(), target.height());
    let center_x = (w / 2) as f32;
    let center_y = (h / 2) as f32;
    let time = scene.time as f32;
    let bands = scene.state.bands();
    let coherence = scene.state.bio().coherence;

    // More coherence, more wedges: 8 at zero up to 13 at full scale.
    let segments = 8 + (coherence.clamp(0.0, 100.0) / 20.0) as i32;
    let seg = segments as f32;
    let wedge = 2.0 * PI / seg;
    let falloff = (w as f32 * 0.7).max(1.0);

    for y in 0..h {
        let dy = y as f32 - center_y;
        for x in 0..w {
            let dx = x as f32 - center_x;
            let dist = (dx * dx + dy * dy).sqrt();
            let angle = dy.atan2(dx).abs().rem_euclid(wedge);

            let pattern =
                (dist * 0.1 + time + bands.bass * 5.0).sin() * (angle * seg + time * 0.5).cos();
            let intensity = ((pattern + 1.0) * 0.5 * (1.0 - dist / falloff)).max(0.0);

            let mut color = scene.frequency_color(dist / w as f32);
            if scene.bio_reactive {
                color = color.blended(scene.bio_color(), 0.4);
            }
            target.set_pixel(x, y, color.scaled(intensity));
        }
    }
}
