//! Module defining the boundary with the social platform client.
//!
//! The client itself lives outside of this crate. What's here is
//! preparing the post (image and text), deciding whether posting
//! is possible at all, and the `Poster` trait the client implements.

use std::env;
use std::error;
use std::fmt;

use image::imageops::{self, FilterType};

use crate::caption::RenderedImage;
use crate::error::Error;
use crate::model::{DEFAULT_SHARE_TEXT, MAX_SHARE_DIMENSION};


/// Names of environment variables holding the platform credentials.
pub const API_KEY_VAR: &str = "X_API_KEY";
pub const API_SECRET_VAR: &str = "X_API_SECRET";
pub const ACCESS_TOKEN_VAR: &str = "X_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "X_ACCESS_TOKEN_SECRET";


/// Client of the social platform.
///
/// Implementations are expected to upload the image and publish the post
/// as a single logical operation: either both happen, or an error is returned.
pub trait Poster {
    fn post(&self, request: &ShareRequest) -> Result<PostId, PostError>;
}

impl<F> Poster for F
    where F: Fn(&ShareRequest) -> Result<PostId, PostError>
{
    fn post(&self, request: &ShareRequest) -> Result<PostId, PostError> {
        self(request)
    }
}


/// Identifier of a published post.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}


/// Error reported by a `Poster`.
#[derive(Debug)]
pub struct PostError {
    message: String,
    cause: Option<Box<dyn error::Error + Send + Sync>>,
}

impl PostError {
    #[inline]
    pub fn new<M: Into<String>>(message: M) -> Self {
        PostError{message: message.into(), cause: None}
    }

    #[inline]
    pub fn with_cause<M, E>(message: M, cause: E) -> Self
        where M: Into<String>, E: Into<Box<dyn error::Error + Send + Sync>>
    {
        PostError{message: message.into(), cause: Some(cause.into())}
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for PostError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.cause.as_ref().map(|e| &**e as &(dyn error::Error + 'static))
    }
}

impl fmt::Display for PostError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.cause {
            Some(ref e) => write!(fmt, "{}: {}", self.message, e),
            None => write!(fmt, "{}", self.message),
        }
    }
}


/// Image and text, ready to be handed to a `Poster`.
#[derive(Clone)]
pub struct ShareRequest {
    text: String,
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl ShareRequest {
    /// Prepare a post of given meme.
    ///
    /// Blank text is replaced with the default promotional text,
    /// and images larger than the platform allows are scaled down.
    pub fn prepare(image: &RenderedImage, text: &str) -> Result<Self, Error> {
        let text = if text.trim().is_empty() {
            debug!("No text for the post, using the default one");
            DEFAULT_SHARE_TEXT.to_owned()
        } else {
            text.to_owned()
        };

        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = fit_within(orig_width, orig_height, MAX_SHARE_DIMENSION);
        let png = if (width, height) != (orig_width, orig_height) {
            debug!("Resizing image for the post from {}x{} to {}x{}",
                orig_width, orig_height, width, height);
            let resized = imageops::resize(image.as_rgba(), width, height, FilterType::Lanczos3);
            encode_png(&resized)?
        } else {
            image.to_png().map_err(image_to_io)?
        };

        Ok(ShareRequest{text, png, width, height})
    }
}

impl ShareRequest {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// PNG-encoded image to upload.
    #[inline]
    pub fn png(&self) -> &[u8] {
        &self.png[..]
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Debug for ShareRequest {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ShareRequest")
            .field("text", &self.text)
            .field("image", &format!("{}x{} PNG, {} byte(s)",
                self.width, self.height, self.png.len()))
            .finish()
    }
}

/// Dimensions of an image scaled down (preserving aspect ratio)
/// so that neither side exceeds `bound`. Smaller images are left alone.
fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= bound && height <= bound {
        return (width, height);
    }
    let ratio = f64::from(bound) / f64::from(width.max(height));
    let scale = |side: u32| ((f64::from(side) * ratio).round() as u32).max(1).min(bound);
    (scale(width), scale(height))
}

fn encode_png(img: &image::RgbaImage) -> Result<Vec<u8>, Error> {
    let mut bytes = vec![];
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(image_to_io)?;
    Ok(bytes)
}

fn image_to_io(e: image::ImageError) -> Error {
    match e {
        image::ImageError::IoError(e) => Error::Io(e),
        e => Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)),
    }
}


/// Credentials for the social platform API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Read the credentials from the process environment.
    ///
    /// Returns `None` unless all four of them are set and non-empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the credentials using given function to look up variables.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Option<Self> {
        let var = |name: &str| {
            let value = lookup(name).filter(|v| !v.is_empty());
            if value.is_none() {
                debug!("{} is not set", name);
            }
            value
        };
        // Look all of them up so that every missing one is logged.
        let api_key = var(API_KEY_VAR);
        let api_secret = var(API_SECRET_VAR);
        let access_token = var(ACCESS_TOKEN_VAR);
        let access_token_secret = var(ACCESS_TOKEN_SECRET_VAR);
        Some(Credentials{
            api_key: api_key?,
            api_secret: api_secret?,
            access_token: access_token?,
            access_token_secret: access_token_secret?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}


/// Whether posting to the social platform is possible.
///
/// This is decided once, up front. When posting is disabled,
/// it is never attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostingCapability {
    Enabled,
    /// Some of the credentials are not set.
    MissingCredentials,
    /// There is no platform client to post with.
    NoClient,
}

impl PostingCapability {
    pub fn resolve(credentials: Option<&Credentials>, client_available: bool) -> Self {
        let capability = match (credentials, client_available) {
            (_, false) => PostingCapability::NoClient,
            (None, true) => PostingCapability::MissingCredentials,
            (Some(_), true) => PostingCapability::Enabled,
        };
        debug!("Posting capability: {:?}", capability);
        capability
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        *self == PostingCapability::Enabled
    }
}

impl Default for PostingCapability {
    fn default() -> Self {
        PostingCapability::NoClient
    }
}

impl fmt::Display for PostingCapability {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PostingCapability::Enabled => write!(fmt, "posting enabled"),
            PostingCapability::MissingCredentials => write!(fmt,
                "API keys not set ({}, {}, {}, {}), posting disabled",
                API_KEY_VAR, API_SECRET_VAR, ACCESS_TOKEN_VAR, ACCESS_TOKEN_SECRET_VAR),
            PostingCapability::NoClient => write!(fmt,
                "no platform client available, posting disabled"),
        }
    }
}
