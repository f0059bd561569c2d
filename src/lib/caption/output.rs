//! Defines the output of the compositor.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use image::{ImageError, ImageFormat, RgbaImage};

use crate::error::Error;


/// Base image with the caption text burned in.
///
/// This is what gets saved or shared, but never what the next render starts from.
#[derive(Clone, PartialEq)]
#[must_use = "unused rendered image which must be used"]
pub struct RenderedImage(RgbaImage);

impl RenderedImage {
    #[inline]
    pub(super) fn new(img: RgbaImage) -> Self {
        RenderedImage(img)
    }
}

impl RenderedImage {
    #[inline]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    #[inline]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }
}

impl RenderedImage {
    /// Encode the image as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, ImageError> {
        let mut bytes = vec![];
        self.0.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        trace!("Encoded {:?} as {} byte(s) of PNG", self, bytes.len());
        Ok(bytes)
    }

    /// Write the image to a file.
    /// The format is inferred from the file's extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        debug!("Saving {:?} as {}", self, path.display());
        self.0.save(path).map_err(|e| Error::Save(path.to_owned(), e))
    }
}

impl fmt::Debug for RenderedImage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(fmt, "RenderedImage({}x{})", width, height)
    }
}
