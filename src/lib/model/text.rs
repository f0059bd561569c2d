//! Module implementing the `CaptionText` type.


/// The two pieces of text that can be burned into a meme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaptionText {
    /// Text drawn near the top edge of the image.
    pub top: String,
    /// Text drawn near the bottom edge of the image.
    pub bottom: String,
}

impl CaptionText {
    #[inline]
    pub fn new<T: Into<String>, B: Into<String>>(top: T, bottom: B) -> Self {
        CaptionText{top: top.into(), bottom: bottom.into()}
    }

    /// Caption with just the top text.
    #[inline]
    pub fn top<T: Into<String>>(top: T) -> Self {
        Self::new(top, "")
    }

    /// Caption with just the bottom text.
    #[inline]
    pub fn bottom<B: Into<String>>(bottom: B) -> Self {
        Self::new("", bottom)
    }
}

impl CaptionText {
    /// Whether there is no text to draw at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }

    /// Remove both texts.
    #[inline]
    pub fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
    }
}
