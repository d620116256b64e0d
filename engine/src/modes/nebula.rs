// Procedural nebula: three octaves of frequency-doubled, amplitude-halved
// sine/cosine terms approximate drifting fractal noise, modulated by the
// smoothed RMS level and mapped into a purple-blue hue range.

use super::Scene;
use raster::RenderTarget;
use viz_core::Color;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    if scene.state.spectrum_len() == 0 {
        return;
    }

    let (w, h) = (target.width(), target.height());
    let time = scene.time as f32;
    let rms = scene.state.smoothed_rms();
    let coherence = scene.state.bio().coherence as f32;

    for y in 0..h {
        let fy = y as f32 / h as f32 * 4.0;
        for x in 0..w {
            let fx = x as f32 / w as f32 * 4.0;

            let mut noise = (fx + time * 0.3).sin() * (fy + time * 0.2).cos();
            noise += (fx * 2.0 - time * 0.5).sin() * (fy * 2.0 + time * 0.4).cos() * 0.5;
            noise += (fx * 4.0 + time * 0.7).sin() * (fy * 4.0 - time * 0.6).cos() * 0.25;
            noise = (noise + 1.5) / 3.0;

            noise *= 0.5 + rms;

            let mut hue = noise * 60.0 + 220.0;
            if scene.bio_reactive {
                hue += coherence * 0.5;
            }
            target.set_pixel(x, y, Color::from_hsv(hue, 0.7 + noise * 0.3, noise, 1.0));
        }
    }
}
