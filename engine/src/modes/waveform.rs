// Waveform polyline about the vertical center, amplitude scaled to a third
// of the target height.

use super::Scene;
use raster::RenderTarget;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    let len = scene.state.waveform_len();
    if len < 2 {
        return;
    }

    let center_y = target.height() / 2;
    let amplitude = (target.height() / 3) as f32;
    let color = scene.base_color();
    let samples = &scene.state.waveform()[..len];

    let mut prev_x = 0;
    let mut prev_y = center_y;
    for (i, &sample) in samples.iter().enumerate() {
        let x = (i as f32 / len as f32 * target.width() as f32) as i32;
        let y = (center_y - (sample * amplitude) as i32).clamp(0, target.height() - 1);
        if i > 0 {
            target.draw_line(prev_x, prev_y, x, y, color);
        }
        prev_x = x;
        prev_y = y;
    }
}
