// Octave map: seven horizontal meters, one per frequency band, each bar's
// length proportional to the band's current level.

use super::Scene;
use raster::RenderTarget;
use viz_core::Color;

/// Fixed display color per band, ascending in frequency.
const BAND_COLORS: [Color; 7] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(1.0, 0.5, 0.0),
    Color::rgb(1.0, 1.0, 0.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(0.0, 1.0, 1.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 0.0, 1.0),
];

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    if scene.state.spectrum_len() == 0 {
        return;
    }

    let section_height = target.height() / 7;
    let named = scene.state.bands().named();

    for (i, (&(_, level), color)) in named.iter().zip(BAND_COLORS).enumerate() {
        let y = i as i32 * section_height;
        let bar_width = ((level * target.width() as f32) as i32).min(target.width());
        target.fill_rect(0, y, bar_width, section_height - 2, color);
    }
}
