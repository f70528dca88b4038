//! Color ramps for the density choropleth.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    const fn hex(value: u32) -> Self {
        Self { r: (value >> 16) as u8, g: (value >> 8) as u8, b: value as u8 }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// ColorBrewer BuGn, 9 classes.
pub(crate) const BUGN_09: [Rgb; 9] = [
    Rgb::hex(0xf7fcfd),
    Rgb::hex(0xe5f5f9),
    Rgb::hex(0xccece6),
    Rgb::hex(0x99d8c9),
    Rgb::hex(0x66c2a4),
    Rgb::hex(0x41ae76),
    Rgb::hex(0x238b45),
    Rgb::hex(0x006d2c),
    Rgb::hex(0x00441b),
];

/// Evenly spaced color stops stretched over `[vmin, vmax]`.
#[derive(Clone, Debug)]
pub(crate) struct LinearColormap {
    stops: &'static [Rgb],
    vmin: f64,
    vmax: f64,
}

impl LinearColormap {
    /// A degenerate range (`vmax <= vmin`) is widened to one unit.
    pub(crate) fn new(stops: &'static [Rgb], vmin: f64, vmax: f64) -> Self {
        let vmax = if vmax > vmin { vmax } else { vmin + 1.0 };
        Self { stops, vmin, vmax }
    }

    pub(crate) fn bugn(vmin: f64, vmax: f64) -> Self {
        Self::new(&BUGN_09, vmin, vmax)
    }

    #[cfg(test)]
    pub(crate) fn vmax(&self) -> f64 { self.vmax }

    /// Interpolated color for `value`; out-of-range values clamp to the ends.
    pub(crate) fn color_at(&self, value: f64) -> Rgb {
        let Some(&first) = self.stops.first() else { return Rgb { r: 150, g: 150, b: 150 } };
        if !value.is_finite() || self.stops.len() == 1 { return first }

        let t = ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0);
        let scaled = t * (self.stops.len() - 1) as f64;
        let lo = (scaled.floor() as usize).min(self.stops.len() - 2);
        let frac = scaled - lo as f64;

        let lerp = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * frac)
                .round()
                .clamp(0.0, 255.0) as u8
        };

        let (a, b) = (self.stops[lo], self.stops[lo + 1]);
        Rgb { r: lerp(a.r, b.r), g: lerp(a.g, b.g), b: lerp(a.b, b.b) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_css_hex() {
        assert_eq!(Rgb::hex(0x006d2c).to_string(), "#006d2c");
    }

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        let cmap = LinearColormap::bugn(0.0, 8.0);
        assert_eq!(cmap.color_at(0.0), BUGN_09[0]);
        assert_eq!(cmap.color_at(8.0), BUGN_09[8]);
        assert_eq!(cmap.color_at(-3.0), BUGN_09[0]);
        assert_eq!(cmap.color_at(100.0), BUGN_09[8]);
    }

    #[test]
    fn stops_are_evenly_spaced() {
        let cmap = LinearColormap::bugn(0.0, 8.0);
        for (i, stop) in BUGN_09.iter().enumerate() {
            assert_eq!(cmap.color_at(i as f64), *stop);
        }
    }

    #[test]
    fn midpoints_interpolate() {
        let cmap = LinearColormap::bugn(0.0, 8.0);
        // Halfway between #f7fcfd and #e5f5f9.
        assert_eq!(cmap.color_at(0.5), Rgb { r: 0xee, g: 0xf9, b: 0xfb });
    }

    #[test]
    fn degenerate_range_is_widened() {
        let cmap = LinearColormap::bugn(0.0, 0.0);
        assert_eq!(cmap.vmax(), 1.0);
        assert_eq!(cmap.color_at(0.0), BUGN_09[0]);
    }
}
