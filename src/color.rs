//! Palette colors and three-stop horizontal interpolation.
//!
//! A [`Palette`] anchors a gradient at ratios 0.0, 0.5 and 1.0. Sampling blends
//! linearly in RGB within whichever half the ratio falls into; channel values
//! are rounded half away from zero.

use std::{fmt, str::FromStr};

/// An opaque RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Round half away from zero and clamp into the `u8` range.
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn lerp(a: u8, b: u8, u: f64) -> u8 {
    to_channel(a as f64 * (1.0 - u) + b as f64 * u)
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Parse any CSS color notation (`#rgb`, `#rrggbb`, `rgb()`, `hsl()`, named colors).
    ///
    /// The alpha component, if any, is discarded.
    pub fn parse(value: &str) -> Option<Self> {
        let srgb = css_color::Srgb::from_str(value.trim()).ok()?;
        Some(Color {
            red: to_channel(srgb.red as f64 * 255.0),
            green: to_channel(srgb.green as f64 * 255.0),
            blue: to_channel(srgb.blue as f64 * 255.0),
        })
    }

    /// Blend `start` toward `end`: `u = 0` gives `start`, `u = 1` gives `end`.
    pub fn blend(start: Self, end: Self, u: f64) -> Self {
        let u = u.clamp(0.0, 1.0);
        Color {
            red: lerp(start.red, end.red, u),
            green: lerp(start.green, end.green, u),
            blue: lerp(start.blue, end.blue, u),
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Three gradient stops: `low` at 0.0, `mid` at 0.5, `high` at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub low: Color,
    pub mid: Color,
    pub high: Color,
}

impl Palette {
    pub fn new(low: Color, mid: Color, high: Color) -> Self {
        Palette { low, mid, high }
    }

    /// Color at horizontal ratio `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            Color::blend(self.low, self.mid, t * 2.0)
        } else {
            Color::blend(self.mid, self.high, (t - 0.5) * 2.0)
        }
    }

    /// One color per pixel column, using `t = x / width`.
    ///
    /// `t` never reaches 1.0 here, but on wide images rounding can still land
    /// the last column exactly on `high`.
    pub fn column_colors(&self, width: u32) -> Vec<Color> {
        (0..width)
            .map(|x| self.sample(x as f64 / width as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_parse_hex_and_named() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("red"), Some(RED));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::parse("not-a-color"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn test_blend_rounds_half_away_from_zero() {
        assert_eq!(Color::blend(RED, GREEN, 0.5), Color::rgb(128, 128, 0));
        assert_eq!(Color::blend(GREEN, BLUE, 0.5), Color::rgb(0, 128, 128));
    }

    #[test]
    fn test_sample_endpoints_are_exact() {
        let palette = Palette::new(Color::rgb(12, 34, 56), Color::rgb(200, 100, 50), Color::rgb(7, 8, 9));
        assert_eq!(palette.sample(0.0), palette.low);
        assert_eq!(palette.sample(0.5), palette.mid);
        assert_eq!(palette.sample(1.0), palette.high);
    }

    #[test]
    fn test_sample_out_of_range_is_clamped() {
        let palette = Palette::new(RED, GREEN, BLUE);
        assert_eq!(palette.sample(-3.0), RED);
        assert_eq!(palette.sample(7.5), BLUE);
    }

    #[test]
    fn test_column_colors_four_wide() {
        let palette = Palette::new(RED, GREEN, BLUE);
        let columns = palette.column_colors(4);
        assert_eq!(
            columns,
            vec![
                Color::rgb(255, 0, 0),
                Color::rgb(128, 128, 0),
                Color::rgb(0, 255, 0),
                Color::rgb(0, 128, 128),
            ]
        );
    }

    #[test]
    fn test_last_column_rounding() {
        let palette = Palette::new(Color::rgb(0, 0, 0), Color::rgb(0, 0, 0), Color::rgb(255, 255, 255));
        // Last column is 255 * (width - 2) / width before rounding.
        for (width, last) in [(2u32, 0u8), (10, 204), (101, 250), (1000, 254), (1021, 255), (2000, 255)] {
            let columns = palette.column_colors(width);
            assert_eq!(columns.len(), width as usize);
            assert_eq!(columns[0], palette.low);
            assert_eq!(*columns.last().unwrap(), Color::rgb(last, last, last), "width {width}");
        }
    }

    #[test]
    fn test_even_width_midpoint_hits_mid() {
        let palette = Palette::new(Color::rgb(3, 250, 90), Color::rgb(77, 11, 200), Color::rgb(255, 0, 13));
        for width in [2u32, 8, 64, 640] {
            let columns = palette.column_colors(width);
            assert_eq!(columns[(width / 2) as usize], palette.mid);
        }
    }

    #[test]
    fn test_odd_width_midpoint_near_mid() {
        let palette = Palette::new(Color::rgb(3, 250, 90), Color::rgb(77, 11, 200), Color::rgb(255, 0, 13));
        let channels = |c: Color| c.to_array().map(f64::from);
        let (low, mid, high) = (channels(palette.low), channels(palette.mid), channels(palette.high));

        for width in [3u32, 7, 65, 641] {
            let columns = palette.column_colors(width);
            // Columns floor(w/2) and floor(w/2) + 1 sit half a column either side of w/2,
            // so each channel may drift from mid by one column's step plus rounding.
            for (x, neighbor) in [(width / 2, low), (width / 2 + 1, high)] {
                let got = channels(columns[x as usize]);
                for i in 0..3 {
                    let tolerance = (neighbor[i] - mid[i]).abs() / width as f64 + 0.5 + 1e-9;
                    assert!(
                        (got[i] - mid[i]).abs() <= tolerance,
                        "width {width}, column {x}, channel {i}: {} vs mid {}",
                        got[i],
                        mid[i]
                    );
                }
            }
        }

        let wide = palette.column_colors(641);
        for (got, want) in channels(wide[320]).iter().zip(mid) {
            assert!((got - want).abs() <= 1.0);
        }
    }

    #[test]
    fn test_monotonic_within_segments() {
        let palette = Palette::new(Color::rgb(10, 240, 0), Color::rgb(120, 130, 0), Color::rgb(250, 5, 0));
        let columns = palette.column_colors(257);
        for pair in columns.windows(2) {
            assert!(pair[0].red <= pair[1].red, "red must not decrease: {:?}", pair);
            assert!(pair[0].green >= pair[1].green, "green must not increase: {:?}", pair);
        }
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Color::rgb(255, 16, 1).to_string(), "#ff1001");
    }
}
