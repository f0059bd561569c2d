//! Module implementing the builder for `Session`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::caption::Compositor;
use crate::model::{RenderParameters, DEFAULT_CAPTIONS_PATH, DEFAULT_FONT_PATH,
                   DEFAULT_IMAGE_DIR};
use crate::resources::{CaptionCatalog, FontLoader, TemplateDirectory};
use crate::share::PostingCapability;
use super::observer::{LogObserver, Notice, Observer};
use super::Session;


/// Message for the user when the session was asked to post but cannot.
pub const POSTING_DISABLED_WARNING: &str =
    "X API keys not set or no platform client available. X posting disabled.";

/// Builder for `Session`.
///
/// Resources that are not given explicitly are loaded from their default paths
/// when the session is built. Problems with them are reported to the observer
/// as warnings, and the session falls back to built-in defaults.
#[must_use = "unused builder which must be used"]
pub struct Builder {
    template_directory: Option<PathBuf>,
    captions: Option<CaptionsSetup>,
    font: Option<FontSetup>,
    parameters: RenderParameters,
    posting: Option<PostingCapability>,
    observer: Option<Box<dyn Observer>>,
}

enum CaptionsSetup {
    File(PathBuf),
    Catalog(CaptionCatalog),
}

enum FontSetup {
    File(PathBuf),
    Compositor(Compositor),
}

impl Builder {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}
impl Default for Builder {
    fn default() -> Self {
        Builder{
            template_directory: None,
            captions: None,
            font: None,
            parameters: RenderParameters::default(),
            posting: None,
            observer: None,
        }
    }
}

// Setters.
impl Builder {
    /// Set the directory that random templates are picked from.
    #[inline]
    pub fn template_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.template_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the CSV file that caption suggestions are loaded from.
    #[inline]
    pub fn captions_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.captions = Some(CaptionsSetup::File(path.as_ref().to_owned())); self
    }

    /// Use given caption suggestions instead of loading them from a file.
    #[inline]
    pub fn caption_catalog(mut self, catalog: CaptionCatalog) -> Self {
        self.captions = Some(CaptionsSetup::Catalog(catalog)); self
    }

    /// Set the path of the display font to render captions with.
    #[inline]
    pub fn font_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.font = Some(FontSetup::File(path.as_ref().to_owned())); self
    }

    /// Use given compositor instead of loading the font from a file.
    #[inline]
    pub fn compositor(mut self, compositor: Compositor) -> Self {
        self.font = Some(FontSetup::Compositor(compositor)); self
    }

    /// Set the initial render parameters.
    #[inline]
    pub fn parameters(mut self, parameters: RenderParameters) -> Self {
        self.parameters = parameters; self
    }

    /// Set whether the session can post to the social platform.
    ///
    /// If posting is disabled, the observer is warned about it when building.
    /// Without this, the session simply cannot post.
    #[inline]
    pub fn posting(mut self, posting: PostingCapability) -> Self {
        self.posting = Some(posting); self
    }

    /// Set the receiver of the session's notices.
    /// By default, they only go to the log.
    #[inline]
    pub fn observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer)); self
    }
}

impl Builder {
    /// Build the `Session`, loading the resources that need loading.
    pub fn build(self) -> Session {
        let observer = self.observer.unwrap_or_else(|| Box::new(LogObserver));

        let compositor = match self.font {
            Some(FontSetup::Compositor(c)) => c,
            Some(FontSetup::File(path)) => load_compositor(&path, &*observer),
            None => load_compositor(Path::new(DEFAULT_FONT_PATH), &*observer),
        };
        debug!("Compositor {} a font", if compositor.has_font() { "has" } else { "lacks" });
        let catalog = match self.captions {
            Some(CaptionsSetup::Catalog(c)) => c,
            Some(CaptionsSetup::File(path)) => load_catalog(&path, &*observer),
            None => load_catalog(Path::new(DEFAULT_CAPTIONS_PATH), &*observer),
        };
        let templates = TemplateDirectory::new(
            self.template_directory.unwrap_or_else(|| DEFAULT_IMAGE_DIR.into()));
        if !templates.exists() {
            warn!("Images folder not found: {}", templates.path().display());
        }
        let posting = match self.posting {
            Some(posting) => {
                if !posting.is_enabled() {
                    warn!("Posting is not available: {}", posting);
                    observer.notify(&Notice::warning(POSTING_DISABLED_WARNING));
                }
                posting
            }
            None => PostingCapability::default(),
        };

        Session::new(compositor, catalog, templates, posting, self.parameters, observer)
    }
}

fn load_compositor(path: &Path, observer: &dyn Observer) -> Compositor {
    let loaded = FontLoader::new(path).load();
    if let Some(warning) = loaded.warning {
        observer.notify(&Notice::warning(warning));
    }
    Compositor::new(loaded.font)
}

fn load_catalog(path: &Path, observer: &dyn Observer) -> CaptionCatalog {
    let loaded = CaptionCatalog::load(path);
    if let Some(warning) = loaded.warning {
        observer.notify(&Notice::warning(warning));
    }
    loaded.catalog
}

impl fmt::Debug for Builder {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Builder")
            .field("template_directory", &self.template_directory)
            .field("parameters", &self.parameters)
            .field("posting", &self.posting)
            .finish()
    }
}
