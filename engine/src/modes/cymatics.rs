// Chladni-plate interference: two standing waves crossed with a radial
// ripple, intensity-mapped onto the base color. Plate frequencies are
// modulated by the bass and mid band levels.

use super::Scene;
use raster::RenderTarget;
use std::f32::consts::PI;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    if scene.state.spectrum_len() == 0 {
        return;
    }

    let (w, h) = (target.width(), target.height());
    let center_x = (w / 2).max(1) as f32;
    let center_y = (h / 2).max(1) as f32;
    let time = scene.time as f32;
    let bands = scene.state.bands();

    let freq1 = 3.0 + bands.bass * 5.0;
    let freq2 = 5.0 + bands.mid * 5.0;
    let base = scene.base_color();

    for y in 0..h {
        let dy = (y as f32 - center_y) / center_y;
        for x in 0..w {
            let dx = (x as f32 - center_x) / center_x;
            let dist = (dx * dx + dy * dy).sqrt();

            let plate = (freq1 * dx * PI + time).sin() * (freq2 * dy * PI + time * 0.7).sin();
            let ripple = (dist * 10.0 - time * 3.0 + bands.presence * 10.0).sin();
            let pattern = (plate + ripple) * 0.5;

            let intensity = (pattern + 1.0) * 0.5;
            target.set_pixel(x, y, base.scaled(intensity));
        }
    }
}
