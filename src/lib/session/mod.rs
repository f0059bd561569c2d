//! Module implementing the editing session.
//!
//! A `Session` holds everything the user is working on and exposes
//! one method per user action (button, slider, text field).
//! Each action runs to completion synchronously and reports its outcome
//! to the session's `Observer`.

mod builder;
mod observer;

pub use self::builder::{Builder as SessionBuilder, POSTING_DISABLED_WARNING};
pub use self::observer::{LogObserver, Notice, Observer, Severity};


use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::caption::{Compositor, RenderedImage};
use crate::error::Error;
use crate::gacha::{self, GachaPick};
use crate::model::{CaptionText, RenderParameters,
                   OUTPUT_FILE_NUMBERS, OUTPUT_FILE_PREFIX};
use crate::resources::{BaseImage, CaptionCatalog, TemplateDirectory};
use crate::share::{Poster, PostId, PostingCapability, ShareRequest};


/// State of a meme being made.
///
/// Two images are kept around: the pristine base image that every render
/// starts from, and the result of the latest render, which is what gets
/// saved or shared. Rendering never starts from the latter,
/// so text doesn't accumulate across edits.
pub struct Session {
    compositor: Compositor,
    catalog: CaptionCatalog,
    templates: TemplateDirectory,
    posting: PostingCapability,
    observer: Box<dyn Observer>,

    base: Option<BaseImage>,
    image: Option<RenderedImage>,
    text: CaptionText,
    params: RenderParameters,
}

impl Session {
    #[inline]
    fn new(compositor: Compositor,
           catalog: CaptionCatalog,
           templates: TemplateDirectory,
           posting: PostingCapability,
           params: RenderParameters,
           observer: Box<dyn Observer>) -> Self {
        Session{
            compositor, catalog, templates, posting, observer,
            base: None,
            image: None,
            text: CaptionText::default(),
            params,
        }
    }

    /// Create a `SessionBuilder`.
    #[inline]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }
}

// Accessors.
impl Session {
    /// The pristine image that renders start from, if any.
    #[inline]
    pub fn base_image(&self) -> Option<&BaseImage> {
        self.base.as_ref()
    }

    /// The latest rendered image, if any.
    #[inline]
    pub fn image(&self) -> Option<&RenderedImage> {
        self.image.as_ref()
    }

    #[inline]
    pub fn text(&self) -> &CaptionText {
        &self.text
    }

    #[inline]
    pub fn parameters(&self) -> &RenderParameters {
        &self.params
    }

    #[inline]
    pub fn catalog(&self) -> &CaptionCatalog {
        &self.catalog
    }

    #[inline]
    pub fn templates(&self) -> &TemplateDirectory {
        &self.templates
    }

    #[inline]
    pub fn posting(&self) -> PostingCapability {
        self.posting
    }
}

// Loading images.
impl Session {
    /// Load the base image from given file.
    ///
    /// If that fails, the previous image (if any) is kept.
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        debug!("Loading image {}", path.as_ref().display());
        let base = BaseImage::open(path).map_err(|e| self.report_error(e))?;
        self.base = Some(base);
        self.update();
        Ok(())
    }

    /// Load a random template image and suggest a random caption for it.
    ///
    /// The caption goes to the top text, and the bottom text is cleared.
    /// If anything fails, the session is left as it was.
    pub fn random_template<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GachaPick, Error> {
        debug!("Picking a random template from {}", self.templates.path().display());
        let picked = gacha::pick(&self.templates, &self.catalog, rng)
            .map_err(|e| self.report_warning(e))?;
        let base = BaseImage::open(&picked.path).map_err(|e| self.report_error(e))?;

        self.base = Some(base);
        self.text.top = picked.caption.clone();
        self.text.bottom.clear();
        self.update();
        Ok(picked)
    }
}

// Adjusting the text & parameters.
impl Session {
    pub fn set_top_text<S: Into<String>>(&mut self, text: S) {
        self.text.top = text.into();
        self.update();
    }

    pub fn set_bottom_text<S: Into<String>>(&mut self, text: S) {
        self.text.bottom = text.into();
        self.update();
    }

    pub fn set_font_size(&mut self, value: u32) {
        debug!("Updating font size: {}", value);
        self.params.font_size = value;
        self.update_if_loaded();
    }

    pub fn set_top_padding(&mut self, value: u32) {
        debug!("Updating top padding: {}", value);
        self.params.top_padding = value;
        self.update_if_loaded();
    }

    pub fn set_left_margin(&mut self, value: u32) {
        debug!("Updating left margin: {}", value);
        self.params.left_margin = value;
        self.update_if_loaded();
    }

    pub fn set_bottom_padding(&mut self, value: u32) {
        debug!("Updating bottom padding: {}", value);
        self.params.bottom_padding = value;
        self.update_if_loaded();
    }

    /// Replace all render parameters at once.
    pub fn set_parameters(&mut self, params: RenderParameters) {
        debug!("Updating parameters: {:?}", params);
        self.params = params;
        self.update_if_loaded();
    }
}

// Output.
impl Session {
    /// Save the latest rendered image in given directory
    /// under a randomly numbered name, creating the directory if needed.
    ///
    /// An existing file of the same name is overwritten.
    pub fn save<P, R>(&self, directory: P, rng: &mut R) -> Result<PathBuf, Error>
        where P: AsRef<Path>, R: Rng + ?Sized
    {
        if self.image.is_none() {
            return Err(self.report_warning(Error::NoContent));
        }
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|e| self.report_error(e.into()))?;

        let (low, high) = OUTPUT_FILE_NUMBERS;
        let number = rng.gen_range(low..=high);
        let path = directory.join(format!("{}{}.png", OUTPUT_FILE_PREFIX, number));
        self.save_as(&path)?;
        Ok(path)
    }

    /// Save the latest rendered image to given file.
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let image = self.image.as_ref()
            .ok_or_else(|| self.report_warning(Error::NoContent))?;
        image.save(path).map_err(|e| self.report_error(e))?;
        self.observer.notify(
            &Notice::info("Saved", format!("Image saved as {}", path.display())));
        Ok(())
    }

    /// Post the latest rendered image, with the top text as the post's text.
    ///
    /// `poster` is the platform client, if there is one.
    /// Without it, or when posting is disabled, this fails with `PostingDisabled`.
    ///
    /// The prepared post is passed to `confirm` first,
    /// and nothing is posted (with `Ok(None)` returned) unless it agrees.
    pub fn share<C>(&self, poster: Option<&dyn Poster>,
                    confirm: C) -> Result<Option<PostId>, Error>
        where C: FnOnce(&ShareRequest) -> bool
    {
        let image = self.image.as_ref()
            .ok_or_else(|| self.report_warning(Error::NoContent))?;
        let poster = match poster {
            Some(poster) if self.posting.is_enabled() => poster,
            Some(_) => {
                warn!("Not posting: {}", self.posting);
                return Err(self.report_warning(Error::PostingDisabled));
            }
            None => {
                warn!("Not posting: no platform client given");
                return Err(self.report_warning(Error::PostingDisabled));
            }
        };

        let request = ShareRequest::prepare(image, &self.text.top)
            .map_err(|e| self.report_error(e))?;
        if !confirm(&request) {
            debug!("Posting of {:?} not confirmed", request);
            return Ok(None);
        }

        debug!("Posting {:?}", request);
        let id = poster.post(&request).map_err(|e| self.report_error(e.into()))?;
        info!("Posted as {}", id);
        self.observer.notify(&Notice::info("Success", "Meme posted!"));
        Ok(Some(id))
    }

    /// Forget the images, the text, and the adjusted parameters.
    pub fn clear(&mut self) {
        debug!("Clearing session");
        self.base = None;
        self.image = None;
        self.text.clear();
        self.params = RenderParameters::default();
    }
}

impl Session {
    /// Re-render the image from the pristine base.
    fn update(&mut self) {
        let image = match self.base {
            Some(ref base) => Some(self.compositor.render(base, &self.text, &self.params)),
            None => None,
        };
        self.image = image;
    }

    fn update_if_loaded(&mut self) {
        if self.base.is_some() {
            self.update();
        }
    }

    fn report_warning(&self, error: Error) -> Error {
        self.observer.notify(&Notice::warning(error.to_string()));
        error
    }

    fn report_error(&self, error: Error) -> Error {
        self.observer.notify(&Notice::error(error.to_string()));
        error
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Session")
            .field("base", &self.base)
            .field("image", &self.image)
            .field("text", &self.text)
            .field("params", &self.params)
            .field("posting", &self.posting)
            .finish()
    }
}


#[cfg(test)]
mod tests;
