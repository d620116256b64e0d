// Retro sunset scene: two-stage vertical gradient, a sun disc, a
// horizon-perspective grid and 32 audio-reactive bars along the bottom
// edge.

use super::Scene;
use raster::RenderTarget;
use viz_core::Color;

const GRID_SPACING: i32 = 30;
const BAR_COUNT: i32 = 32;

pub fn render(scene: &Scene<'_>, target: &mut RenderTarget<'_>) {
    if scene.state.spectrum_len() == 0 {
        return;
    }

    let (w, h) = (target.width(), target.height());

    // Sunset gradient: purple into magenta above the midline, magenta into
    // orange below it.
    for y in 0..h {
        let t = y as f32 / h as f32;
        let color = if t < 0.5 {
            Color::rgb(0.3 + t * 0.7, 0.0, 0.5 + t * 0.3)
        } else {
            let t2 = (t - 0.5) * 2.0;
            Color::rgb(1.0, t2 * 0.5, 0.8 - t2 * 0.8)
        };
        for x in 0..w {
            target.set_pixel(x, y, color);
        }
    }

    // Sun disc in the upper third.
    target.fill_circle(w / 2, h / 3, w / 6, Color::rgb(1.0, 0.6, 0.0));

    let horizon = h * 2 / 3;
    let grid = Color::new(0.0, 1.0, 1.0, 0.8);

    // Parallel horizontals below the horizon, dimming with depth.
    let mut y = horizon;
    while y < h {
        let perspective = (y - horizon) as f32 / (h - horizon).max(1) as f32;
        let mut line = grid;
        line.g *= 1.0 - perspective * 0.5;
        for x in 0..w {
            target.set_pixel(x, y, line);
        }
        y += GRID_SPACING;
    }

    // Converging verticals fanning out from the horizon.
    for i in -10..=10 {
        let top_x = w / 2 + i * GRID_SPACING / 2;
        let bottom_x = w / 2 + i * GRID_SPACING * 3;
        target.draw_line(top_x, horizon, bottom_x, h, grid);
    }

    // Audio-reactive bars along the bottom edge.
    let bar_width = w / BAR_COUNT;
    let smoothed = scene.state.smoothed_spectrum();
    for i in 0..BAR_COUNT {
        let value = smoothed[i as usize * 2];
        let bar_height = (value * h as f32 / 4.0) as i32;
        let color = Color::from_hsv(280.0 + i as f32 * 2.0, 1.0, 1.0, 1.0);
        target.fill_rect(
            i * bar_width,
            h - bar_height,
            bar_width - 1,
            bar_height,
            color,
        );
    }
}
