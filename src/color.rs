use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette (pie slices)
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Continuous colour scales (scatter markers, heat-map cells)
// ---------------------------------------------------------------------------

/// A piecewise-linear colour scale, interpolated in linear sRGB.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<LinSrgb>,
}

impl ColorScale {
    fn from_hex(stops: &[u32]) -> Self {
        let stops = stops
            .iter()
            .map(|&hex| {
                let srgb = Srgb::new(
                    ((hex >> 16) & 0xff) as u8,
                    ((hex >> 8) & 0xff) as u8,
                    (hex & 0xff) as u8,
                );
                srgb.into_format::<f32>().into_linear()
            })
            .collect();
        ColorScale { stops }
    }

    /// Light to dark green, for funding magnitude on the scatter plot.
    pub fn greens() -> Self {
        Self::from_hex(&[0xf7fcf5, 0xc7e9c0, 0x74c476, 0x238b45, 0x00441b])
    }

    /// Dark purple through teal to yellow, for the heat-map.
    pub fn viridis() -> Self {
        Self::from_hex(&[0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725])
    }

    /// Colour at `t` in `[0, 1]`; values outside are clamped, NaN maps to 0.
    pub fn sample(&self, t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
        let segments = self.stops.len().saturating_sub(1);
        if segments == 0 {
            return self
                .stops
                .first()
                .map(|c| to_color32(Srgb::from_linear(*c)))
                .unwrap_or(Color32::GRAY);
        }
        let scaled = t * segments as f32;
        let i = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - i as f32;
        let mixed = self.stops[i].mix(self.stops[i + 1], local);
        to_color32(Srgb::from_linear(mixed))
    }

    /// Colour for `value` within `[min, max]`. A flat range maps to the top.
    pub fn map(&self, value: f64, min: f64, max: f64) -> Color32 {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.sample(1.0);
        }
        self.sample((value - min) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn scale_endpoints_match_stops() {
        let scale = ColorScale::viridis();
        assert_eq!(scale.sample(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(scale.sample(1.0), Color32::from_rgb(0xfd, 0xe7, 0x25));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let scale = ColorScale::greens();
        assert_eq!(scale.sample(-3.0), scale.sample(0.0));
        assert_eq!(scale.sample(7.0), scale.sample(1.0));
        assert_eq!(scale.sample(f64::NAN), scale.sample(0.0));
    }

    #[test]
    fn flat_range_maps_to_top_of_scale() {
        let scale = ColorScale::greens();
        assert_eq!(scale.map(5.0, 5.0, 5.0), scale.sample(1.0));
        assert_eq!(scale.map(0.0, 0.0, 10.0), scale.sample(0.0));
    }
}
