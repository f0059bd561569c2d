//! Module implementing the `RenderParameters` type.

use std::fmt;

use super::constants::{DEFAULT_BOTTOM_PADDING, DEFAULT_FONT_SIZE,
                       DEFAULT_LEFT_MARGIN, DEFAULT_TOP_PADDING};


/// Numeric knobs that control where and how big the caption text is drawn.
///
/// Each field corresponds to one slider of the editor
/// and can be adjusted independently of the others.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderParameters {
    /// Size of the caption font, in points.
    pub font_size: u32,
    /// Distance between the top edge of the image and the top text.
    #[serde(alias = "padding")]
    pub top_padding: u32,
    /// Distance between the left edge of the image and both texts.
    pub left_margin: u32,
    /// Distance between the bottom edge of the image and the bottom text.
    pub bottom_padding: u32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        RenderParameters{
            font_size: DEFAULT_FONT_SIZE,
            top_padding: DEFAULT_TOP_PADDING,
            left_margin: DEFAULT_LEFT_MARGIN,
            bottom_padding: DEFAULT_BOTTOM_PADDING,
        }
    }
}

impl fmt::Debug for RenderParameters {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "RenderParameters({}pt, top={}, left={}, bottom={})",
            self.font_size, self.top_padding, self.left_margin, self.bottom_padding)
    }
}
