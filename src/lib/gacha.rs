//! Module implementing the random pick of a template and a caption.

use std::io;
use std::path::PathBuf;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Error;
use crate::resources::{CaptionCatalog, TemplateDirectory};


/// Template image and caption drawn by `pick`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GachaPick {
    pub path: PathBuf,
    pub caption: String,
}

/// Pick a random template image and a random caption.
///
/// Both are drawn uniformly and independently of each other,
/// and every call is independent of the previous ones.
///
/// A missing template directory counts as an empty one.
pub fn pick<R: Rng + ?Sized>(templates: &TemplateDirectory,
                             catalog: &CaptionCatalog,
                             rng: &mut R) -> Result<GachaPick, Error> {
    let paths = templates.list().map_err(|e| {
        warn!("Cannot list templates in {}: {}", templates.path().display(), e);
        match e.kind() {
            io::ErrorKind::NotFound => Error::EmptyCatalog(
                format!("images ({} not found)", templates.path().display())),
            _ => Error::Io(e),
        }
    })?;

    let path = paths.choose(rng).cloned().ok_or_else(|| {
        warn!("No images found in {}", templates.path().display());
        Error::EmptyCatalog(format!("images in {}", templates.path().display()))
    })?;
    let caption = catalog.choose(rng).map(str::to_owned)
        .ok_or_else(|| Error::EmptyCatalog("captions".into()))?;

    debug!("Picked {} with caption {:?}", path.display(), caption);
    Ok(GachaPick{path, caption})
}
