//! Module handling the base images that memes are made from.

use std::fmt;
use std::path::Path;

use image::{self, DynamicImage, RgbaImage};

use crate::error::Error;


/// Pristine image that every render starts from.
///
/// It is never drawn on. Instead, the compositor works on a copy
/// so that repeated renders don't pile up text on top of earlier text.
#[derive(Clone, PartialEq)]
pub struct BaseImage(RgbaImage);

impl BaseImage {
    /// Open an image file and convert it to RGBA.
    ///
    /// Any format supported by the `image` crate is accepted,
    /// regardless of the file's extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        trace!("Opening image {}", path.display());
        let img = image::open(path).map_err(|e| {
            error!("Failed to open image {}: {}", path.display(), e);
            Error::LoadFailure(path.to_owned(), e)
        })?;

        let base = BaseImage::from(img);
        debug!("Loaded {:?} from {}", base, path.display());
        Ok(base)
    }
}

impl BaseImage {
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

    /// The underlying RGBA pixel buffer.
    #[inline]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }
}

impl From<RgbaImage> for BaseImage {
    fn from(input: RgbaImage) -> Self {
        BaseImage(input)
    }
}
impl From<DynamicImage> for BaseImage {
    fn from(input: DynamicImage) -> Self {
        match input {
            DynamicImage::ImageRgba8(img) => BaseImage(img),
            img => BaseImage(img.to_rgba8()),
        }
    }
}

impl fmt::Debug for BaseImage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(fmt, "BaseImage({}x{})", width, height)
    }
}
