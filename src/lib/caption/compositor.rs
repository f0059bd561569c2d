//! Module implementing the compositor, which burns caption text into images.

use std::fmt;

use crate::model::{CaptionText, RenderParameters,
                   MIN_BOTTOM_TEXT_Y, STROKE_COLOR, STROKE_WIDTH, TEXT_COLOR};
use crate::resources::{BaseImage, Font};
use super::output::RenderedImage;
use super::text::{self, Style};


/// Draws caption text onto base images.
///
/// Rendering is a pure function of the base image, the text, and the parameters:
/// the base image is copied and never modified.
pub struct Compositor {
    font: Option<Font>,
}

impl Compositor {
    #[inline]
    pub fn new(font: Option<Font>) -> Self {
        Compositor{font}
    }

    #[inline]
    pub fn with_font(font: Font) -> Self {
        Self::new(Some(font))
    }

    /// Compositor that cannot draw any text
    /// and just passes base images through.
    #[inline]
    pub fn without_font() -> Self {
        Self::new(None)
    }

    /// Whether this compositor can draw text at all.
    #[inline]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

impl Compositor {
    /// Render the caption text onto a copy of given base image.
    pub fn render(&self, base: &BaseImage,
                  text: &CaptionText, params: &RenderParameters) -> RenderedImage {
        trace!("Rendering {:?} onto {:?} with {:?}", text, base, params);
        let mut img = base.as_rgba().clone();

        if text.is_empty() {
            debug!("Empty caption text, nothing to draw.");
            return RenderedImage::new(img);
        }
        let font = match self.font {
            Some(ref font) => font,
            None => {
                warn!("No font available, caption text is not drawn.");
                return RenderedImage::new(img);
            }
        };
        if params.font_size == 0 {
            debug!("Font size is zero, nothing to draw.");
            return RenderedImage::new(img);
        }

        let style = Style::new(font, params.font_size as f32, TEXT_COLOR);
        let x = i64::from(params.left_margin);

        if !text.top.is_empty() {
            let y = i64::from(params.top_padding);
            debug!("Rendering top text at ({}, {}): {:?}", x, y, text.top);
            text::check(font, &text.top);
            text::render_stroked_line(
                &mut img, &text.top, x, y, &style, STROKE_COLOR, STROKE_WIDTH);
        }

        if !text.bottom.is_empty() {
            let text_height = text::text_height(&text.bottom, &style);
            let y = bottom_text_y(img.height(), text_height, params.bottom_padding);
            debug!("Rendering bottom text ({}px high) at ({}, {}): {:?}",
                text_height, x, y, text.bottom);
            text::check(font, &text.bottom);
            text::render_stroked_line(
                &mut img, &text.bottom, x, y, &style, STROKE_COLOR, STROKE_WIDTH);
        }

        RenderedImage::new(img)
    }
}

impl fmt::Debug for Compositor {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Compositor")
            .field("font", &self.font)
            .finish()
    }
}


/// Vertical position of the bottom text.
///
/// The text sits `bottom_padding` pixels above the bottom edge,
/// unless that would put it above the top of the image. In that case,
/// it is placed flush with the bottom edge (but no higher than 10px from the top).
pub fn bottom_text_y(image_height: u32, text_height: u32, bottom_padding: u32) -> i64 {
    let (image_height, text_height) = (i64::from(image_height), i64::from(text_height));
    let y = image_height - text_height - i64::from(bottom_padding);
    if y < 0 {
        let clamped = MIN_BOTTOM_TEXT_Y.max(image_height - text_height);
        trace!("Bottom text would start at y={}, clamped to {}", y, clamped);
        return clamped;
    }
    y
}
