//! Text overlay for generated buttons.
//!
//! The gradient code only sees the [`Compositor`] trait; [`TextCompositor`]
//! is the `rusttype` backed implementation used by the CLI.

use crate::{color::Color, error::ThemeError};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::Path;

/// Draws a string onto a finished image.
pub trait Compositor {
    fn composite(&self, image: &mut RgbaImage, text: &str) -> Result<(), ThemeError>;
}

/// Renders a single line of text centered on the image.
pub struct TextCompositor {
    font: Font<'static>,
    scale: Scale,
    color: Color,
}

impl TextCompositor {
    pub fn from_file(path: &Path, px_height: f32, color: Color) -> Result<Self, ThemeError> {
        let data = std::fs::read(path).map_err(|e| ThemeError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(data, px_height, color).map_err(|reason| ThemeError::Font {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_bytes(data: Vec<u8>, px_height: f32, color: Color) -> Result<Self, String> {
        if !(px_height.is_finite() && px_height > 0.0) {
            return Err(format!("invalid font size {px_height}"));
        }
        let font = Font::try_from_vec(data).ok_or("not a TrueType/OpenType font")?;
        Ok(TextCompositor {
            font,
            scale: Scale::uniform(px_height),
            color,
        })
    }
}

impl Compositor for TextCompositor {
    fn composite(&self, image: &mut RgbaImage, text: &str) -> Result<(), ThemeError> {
        let v_metrics = self.font.v_metrics(self.scale);
        let glyphs: Vec<_> = self
            .font
            .layout(text, self.scale, point(0.0, v_metrics.ascent))
            .collect();

        let Some((min_x, max_x)) = glyphs
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold(None, |acc: Option<(i32, i32)>, bb| match acc {
                None => Some((bb.min.x, bb.max.x)),
                Some((lo, hi)) => Some((lo.min(bb.min.x), hi.max(bb.max.x))),
            })
        else {
            // Nothing visible, e.g. an empty or all-whitespace label.
            return Ok(());
        };

        let text_width = max_x - min_x;
        let text_height = (v_metrics.ascent - v_metrics.descent).ceil() as i32;
        let offset_x = (image.width() as i32 - text_width) / 2 - min_x;
        let offset_y = (image.height() as i32 - text_height) / 2;

        let (width, height) = (image.width() as i32, image.height() as i32);
        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32 + offset_x;
                let y = bb.min.y + gy as i32 + offset_y;
                if x < 0 || y < 0 || x >= width || y >= height {
                    return;
                }
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                *pixel = blend_over(*pixel, self.color, coverage);
            });
        }

        Ok(())
    }
}

/// Source-over blend of an opaque `color` with the given coverage.
pub(crate) fn blend_over(dst: Rgba<u8>, color: Color, coverage: f32) -> Rgba<u8> {
    let a_t = coverage.clamp(0.0, 1.0);
    if a_t == 0.0 {
        return dst;
    }
    let a_d = dst[3] as f32 / 255.0;
    let a_out = a_t + a_d * (1.0 - a_t);

    let channel = |d: u8, t: u8| {
        let value = (t as f32 * a_t + d as f32 * a_d * (1.0 - a_t)) / a_out;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(dst[0], color.red),
        channel(dst[1], color.green),
        channel(dst[2], color.blue),
        (a_out * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::rgb(255, 255, 255);

    #[test]
    fn test_blend_zero_coverage_keeps_pixel() {
        let pixel = Rgba([10, 20, 30, 40]);
        assert_eq!(blend_over(pixel, WHITE, 0.0), pixel);
    }

    #[test]
    fn test_blend_full_coverage_paints_text_color() {
        let pixel = Rgba([10, 20, 30, 0]);
        assert_eq!(blend_over(pixel, WHITE, 1.0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_blend_half_coverage_on_opaque() {
        let pixel = Rgba([0, 100, 200, 255]);
        assert_eq!(blend_over(pixel, WHITE, 0.5), Rgba([128, 178, 228, 255]));
    }

    #[test]
    fn test_blend_on_transparent_raises_alpha() {
        let pixel = Rgba([0, 0, 0, 0]);
        let out = blend_over(pixel, Color::rgb(200, 0, 0), 0.5);
        assert_eq!(out, Rgba([200, 0, 0, 128]));
    }

    #[test]
    fn test_invalid_font_bytes() {
        let err = TextCompositor::from_bytes(b"not a font".to_vec(), 24.0, WHITE).err();
        assert!(err.is_some());
    }

    #[test]
    fn test_invalid_font_size() {
        let err = TextCompositor::from_bytes(Vec::new(), 0.0, WHITE).err();
        assert_eq!(err.as_deref(), Some("invalid font size 0"));
    }

    #[test]
    fn test_missing_font_file() {
        let err = TextCompositor::from_file(Path::new("/nonexistent/font.ttf"), 24.0, WHITE)
            .err()
            .unwrap();
        assert_eq!(err.kind(), "font");
    }
}
