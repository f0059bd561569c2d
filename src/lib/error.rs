//! Error type shared by all memer operations.

use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use image::ImageError;

use crate::share::PostError;


/// Error that may occur while working on a meme.
///
/// None of these is fatal: the session that reports them
/// stays usable and keeps its previous state.
#[derive(Debug)]
pub enum Error {
    /// A resource (file or directory) that the operation needs is not there.
    ResourceMissing(PathBuf),
    /// There is nothing to choose from: no template images or no captions.
    EmptyCatalog(String),
    /// An image file couldn't be opened or decoded.
    LoadFailure(PathBuf, ImageError),
    /// Posting to the social platform failed.
    Post(PostError),
    /// Posting is disabled for this session.
    PostingDisabled,
    /// There is no image to save or share.
    NoContent,
    /// Writing the finished image didn't succeed.
    Save(PathBuf, ImageError),
    /// Encoding the image or creating the output directory didn't succeed.
    Io(io::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::LoadFailure(_, ref e) => Some(e),
            Error::Post(ref e) => Some(e),
            Error::Save(_, ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ResourceMissing(ref p) => write!(fmt, "not found: {}", p.display()),
            Error::EmptyCatalog(ref what) => write!(fmt, "no {} to choose from", what),
            Error::LoadFailure(ref p, ref e) => {
                write!(fmt, "failed to load image {}: {}", p.display(), e)
            }
            Error::Post(ref e) => write!(fmt, "failed to post: {}", e),
            Error::PostingDisabled => write!(fmt, "posting is disabled"),
            Error::NoContent => write!(fmt, "no image"),
            Error::Save(ref p, ref e) => {
                write!(fmt, "failed to save image as {}: {}", p.display(), e)
            }
            Error::Io(ref e) => write!(fmt, "I/O error: {}", e),
        }
    }
}

impl From<PostError> for Error {
    fn from(input: PostError) -> Self {
        Error::Post(input)
    }
}
impl From<io::Error> for Error {
    fn from(input: io::Error) -> Self {
        Error::Io(input)
    }
}
