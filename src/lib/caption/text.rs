//! Module responsible for rendering text.

use std::collections::HashSet;
use std::fmt;

use image::{Pixel, RgbaImage};
use rusttype::{point, GlyphId, PositionedGlyph, Scale};

use crate::model::Color;
use crate::resources::Font;


/// Check if given font has all the glyphs for given text.
pub fn check(font: &Font, text: &str) {
    let mut missing = HashSet::new();
    for ch in text.chars().filter(|c| !c.is_control()) {
        if font.glyph(ch).id() == GlyphId(0) {
            missing.insert(ch as u32);
        }
    }
    if !missing.is_empty() {
        let mut missing: Vec<_> = missing.into_iter().collect();
        missing.sort();
        warn!("Missing glyphs for {} codepoint(s): {}", missing.len(),
            missing.into_iter().map(|c| format!("{:#x}", c)).collect::<Vec<_>>().join(", "));
    }
}


/// Style that the text is rendered with.
#[derive(Clone, Copy)]
pub struct Style<'f> {
    font: &'f Font,
    size: f32,
    color: Color,
}

impl<'f> Style<'f> {
    /// Create the style for a font of given size, in points (i.e. the em size).
    #[inline]
    pub fn new(font: &'f Font, size: f32, color: Color) -> Self {
        debug_assert!(size > 0.0, "text::Style got non-positive size ({})", size);
        Style{font, size, color}
    }

    /// Same style, different color.
    #[inline]
    pub fn with_color(&self, color: Color) -> Self {
        Style{color, ..*self}
    }

    /// The rusttype scale for this style's size.
    ///
    /// rusttype measures scale as the height from descent to ascent,
    /// so the em size needs converting.
    pub fn scale(&self) -> Scale {
        let units_per_em = f32::from(self.font.units_per_em());
        let v_metrics = self.font.v_metrics_unscaled();
        let height = v_metrics.ascent - v_metrics.descent;
        if units_per_em <= 0.0 || height <= 0.0 {
            return Scale::uniform(self.size);
        }
        Scale::uniform(self.size * height / units_per_em)
    }

    /// Lay out a single line of text.
    /// `(x, y)` is the top-left corner of the line box.
    fn layout(&self, s: &str, x: f32, y: f32) -> Vec<PositionedGlyph<'static>> {
        let scale = self.scale();
        let ascent = self.font.v_metrics(scale).ascent;
        self.font.layout(s, scale, point(x, y + ascent)).collect()
    }
}

impl<'f> fmt::Debug for Style<'f> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Style")
            .field("font", &self.font)
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}


/// Compute the pixel height of the ink of given text,
/// from the top of its tallest glyph to the bottom of its lowest one.
pub fn text_height(s: &str, style: &Style) -> u32 {
    match ink_rows(s, style) {
        Some((top, bottom)) => (bottom - top).max(0) as u32,
        None => 0,
    }
}

/// Vertical extent of the ink of given text, relative to the top of its line box.
///
/// The end of the range is exclusive. Returns `None` if nothing would be drawn.
pub fn ink_rows(s: &str, style: &Style) -> Option<(i32, i32)> {
    let glyphs = style.layout(s, 0.0, 0.0);
    glyphs.iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc, bb| Some(match acc {
            Some((top, bottom)) => (bb.min.y.min(top), bb.max.y.max(bottom)),
            None => (bb.min.y, bb.max.y),
        }))
}


/// Renders a line of text onto given image, with its line box
/// starting at `(x, y)`. Pixels outside of the image are clipped.
pub fn render_line(img: &mut RgbaImage, s: &str, x: i64, y: i64, style: &Style) {
    trace!("render_line(..., {:?}, {}, {}, {:?})", s, x, y, style);

    let (width, height) = (i64::from(img.width()), i64::from(img.height()));
    for glyph in style.layout(s, x as f32, y as f32) {
        let bbox = match glyph.pixel_bounding_box() {
            Some(bb) => bb,
            None => continue,  // e.g. a space
        };
        glyph.draw(|gx, gy, v| {
            let px = i64::from(bbox.min.x) + i64::from(gx);
            let py = i64::from(bbox.min.y) + i64::from(gy);
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let alpha = (v.max(0.0).min(1.0) * 255.0).round() as u8;
            if alpha == 0 {
                return;
            }
            img.get_pixel_mut(px as u32, py as u32).blend(&style.color.to_rgba(alpha));
        });
    }
}

/// Renders a line of text with an outline of given color and width around it.
///
/// The outline is made by drawing the text in the outline color
/// at every offset within `stroke_width`, then the actual text on top of that.
pub fn render_stroked_line(img: &mut RgbaImage, s: &str, x: i64, y: i64,
                           style: &Style, stroke_color: Color, stroke_width: u32) {
    let w = i64::from(stroke_width);
    if w > 0 {
        let stroke_style = style.with_color(stroke_color);
        for dy in -w..=w {
            for dx in -w..=w {
                if (dx, dy) != (0, 0) && dx * dx + dy * dy <= w * w {
                    render_line(img, s, x + dx, y + dy, &stroke_style);
                }
            }
        }
    }
    render_line(img, s, x, y, style);
}
