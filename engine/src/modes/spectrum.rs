// Spectrum bars
// 64 vertical bars from the smoothed spectrum, palette-colored by position.

use super::Scene;
use raster::RenderTarget;

pub const BAR_COUNT: usize = 64;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    if scene.state.spectrum_len() == 0 {
        return;
    }

    let bar_width = target.width() / BAR_COUNT as i32;
    let max_height = (target.height() - 20).max(1);
    let smoothed = scene.state.smoothed_spectrum();

    for i in 0..BAR_COUNT {
        // Every other bin so 64 bars span the 128-bin spectrum.
        let value = smoothed[i * 2];
        let bar_height = ((value * max_height as f32) as i32).clamp(0, max_height);

        let mut color = scene.frequency_color(i as f32 / BAR_COUNT as f32);
        if scene.bio_reactive {
            color = color.blended(scene.bio_color(), 0.3);
        }

        let x = i as i32 * bar_width;
        let y = target.height() - bar_height;
        target.fill_rect(x + 1, y, bar_width - 2, bar_height, color);
    }
}
