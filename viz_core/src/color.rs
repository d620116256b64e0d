//! Color types and conversions shared by every renderer.

use serde::{Deserialize, Serialize};

/// An RGBA color with floating point channels, nominally in [0, 1].
///
/// Out-of-range channels are legal intermediate values (renderers scale and
/// blend freely); packing clamps each channel independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Standard six-sector HSV conversion.
    ///
    /// `h` is in degrees and may be any finite value (wrapped into
    /// [0, 360) before sector selection); `s` and `v` are clamped to [0, 1].
    pub fn from_hsv(h: f32, s: f32, v: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = v - c;

        let (r1, g1, b1) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r1 + m, g1 + m, b1 + m, a)
    }

    /// Maps a heart-rhythm coherence score in [0, 100] onto a red → yellow
    /// → green hue ramp: below 40 stays red, 40–70 sweeps red to yellow,
    /// 70 and above sweeps yellow to green.
    pub fn from_coherence(coherence: f64) -> Self {
        let c = coherence.clamp(0.0, 100.0);
        let hue = if c < 40.0 {
            0.0
        } else if c < 70.0 {
            ((c - 40.0) / 30.0 * 60.0) as f32
        } else {
            60.0 + ((c - 70.0) / 30.0 * 60.0) as f32
        };
        Self::from_hsv(hue, 1.0, 1.0, 1.0)
    }

    /// Packs to 0xAARRGGBB, clamping each channel into [0, 255].
    pub fn to_argb(self) -> u32 {
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Packs to 0xRRGGBBAA, clamping each channel into [0, 255].
    pub fn to_rgba(self) -> u32 {
        (channel(self.r) << 24) | (channel(self.g) << 16) | (channel(self.b) << 8) | channel(self.a)
    }

    /// RGB channels multiplied by `intensity`; alpha untouched.
    pub fn scaled(self, intensity: f32) -> Self {
        Self::new(
            self.r * intensity,
            self.g * intensity,
            self.b * intensity,
            self.a,
        )
    }

    /// Linear blend of the RGB channels toward `other` by `amount` in [0, 1].
    pub fn blended(self, other: Color, amount: f32) -> Self {
        let keep = 1.0 - amount;
        Self::new(
            self.r * keep + other.r * amount,
            self.g * keep + other.g * amount,
            self.b * keep + other.b * amount,
            self.a,
        )
    }
}

fn channel(v: f32) -> u32 {
    (v * 255.0).clamp(0.0, 255.0) as u32
}

/// An ordered color palette sampled by the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    colors: Vec<Color>,
}

impl ColorScheme {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The five-stop vaporwave palette used by default.
    pub fn vaporwave() -> Self {
        Self::new(vec![
            Color::new(0.0, 0.9, 1.0, 1.0), // cyan
            Color::new(1.0, 0.0, 1.0, 1.0), // magenta
            Color::new(0.4, 0.1, 1.0, 1.0), // purple
            Color::new(1.0, 0.5, 0.0, 1.0), // orange
            Color::new(1.0, 1.0, 0.0, 1.0), // yellow
        ])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at a normalized position in [0, 1]. An empty scheme yields
    /// opaque white instead of indexing out of bounds.
    pub fn color_for(&self, normalized: f32) -> Color {
        if self.colors.is_empty() {
            return Color::WHITE;
        }
        let last = self.colors.len() - 1;
        let idx = (normalized.clamp(0.0, 1.0) * last as f32) as usize;
        self.colors[idx.min(last)]
    }

    /// Cycles through the palette by index; white when empty.
    pub fn cycle(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::WHITE;
        }
        self.colors[index % self.colors.len()]
    }

    /// First palette entry, or white when empty.
    pub fn primary(&self) -> Color {
        self.colors.first().copied().unwrap_or(Color::WHITE)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::vaporwave()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack_argb(packed: u32) -> (u32, u32, u32, u32) {
        (
            (packed >> 24) & 0xff,
            (packed >> 16) & 0xff,
            (packed >> 8) & 0xff,
            packed & 0xff,
        )
    }

    /// Reference HSV conversion, independent of the implementation under test.
    fn reference_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
        let h = h.rem_euclid(360.0) / 60.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match i as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    }

    #[test]
    fn test_hsv_argb_round_trip_within_tolerance() {
        for h in (0..360).step_by(15) {
            for (s, v) in [(1.0, 1.0), (0.5, 0.8), (0.25, 0.5), (0.0, 1.0)] {
                let packed = Color::from_hsv(h as f32, s, v, 1.0).to_argb();
                let (_, r, g, b) = unpack_argb(packed);
                let (er, eg, eb) = reference_rgb(h as f32, s, v);
                assert!((r as i32 - (er * 255.0) as i32).abs() <= 1, "r at h={h}");
                assert!((g as i32 - (eg * 255.0) as i32).abs() <= 1, "g at h={h}");
                assert!((b as i32 - (eb * 255.0) as i32).abs() <= 1, "b at h={h}");
            }
        }
    }

    #[test]
    fn test_hue_wraps_outside_range() {
        let a = Color::from_hsv(-60.0, 1.0, 1.0, 1.0).to_argb();
        let b = Color::from_hsv(300.0, 1.0, 1.0, 1.0).to_argb();
        assert_eq!(a, b);

        let c = Color::from_hsv(720.0, 1.0, 1.0, 1.0).to_argb();
        let d = Color::from_hsv(0.0, 1.0, 1.0, 1.0).to_argb();
        assert_eq!(c, d);
    }

    #[test]
    fn test_coherence_breakpoints_and_monotonic_hue() {
        // Hues at the breakpoints: 0 -> red, 40 -> red, 70 -> yellow,
        // 100 -> green.
        assert_eq!(Color::from_coherence(0.0).to_argb(), 0xffff0000);
        assert_eq!(Color::from_coherence(40.0).to_argb(), 0xffff0000);
        assert_eq!(Color::from_coherence(70.0).to_argb(), 0xffffff00);
        assert_eq!(Color::from_coherence(100.0).to_argb(), 0xff00ff00);

        // The green channel rises then the red channel falls; red never
        // recovers once it starts dropping (hue is non-decreasing).
        let mut last_hue_rank = 0.0f32;
        for c in [0.0, 20.0, 40.0, 55.0, 70.0, 85.0, 100.0] {
            let color = Color::from_coherence(c);
            let rank = if color.r >= 1.0 - 1e-4 {
                color.g // red..yellow sector: green rises with hue
            } else {
                2.0 - color.r // yellow..green sector: red falls with hue
            };
            assert!(rank >= last_hue_rank - 1e-4, "hue decreased at coherence {c}");
            last_hue_rank = rank;
        }
    }

    #[test]
    fn test_packing_clamps_out_of_range_channels() {
        let c = Color::new(2.0, -1.0, 0.5, 3.0);
        let (a, r, g, b) = unpack_argb(c.to_argb());
        assert_eq!((a, r, g, b), (255, 255, 0, 127));
    }

    #[test]
    fn test_argb_rgba_channel_order() {
        let c = Color::new(1.0, 0.0, 0.0, 0.5);
        assert_eq!(c.to_argb(), 0x7fff0000);
        assert_eq!(c.to_rgba(), 0xff00007f);
    }

    #[test]
    fn test_empty_scheme_degrades_to_white() {
        let scheme = ColorScheme::new(Vec::new());
        assert_eq!(scheme.color_for(0.5), Color::WHITE);
        assert_eq!(scheme.cycle(7), Color::WHITE);
        assert_eq!(scheme.primary(), Color::WHITE);
    }

    #[test]
    fn test_scheme_lookup_spans_palette() {
        let scheme = ColorScheme::vaporwave();
        assert_eq!(scheme.color_for(0.0), scheme.colors()[0]);
        assert_eq!(scheme.color_for(1.0), scheme.colors()[4]);
        // Out-of-range positions clamp instead of indexing out of bounds.
        assert_eq!(scheme.color_for(2.0), scheme.colors()[4]);
        assert_eq!(scheme.color_for(-1.0), scheme.colors()[0]);
    }
}
