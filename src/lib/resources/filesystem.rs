//! Module for finding template images on the file system.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use glob::{self, MatchOptions, Pattern};

use crate::model::TEMPLATE_EXTENSIONS;


/// Directory with template images, which random templates are picked from.
///
/// It is also the default place to browse for images.
#[derive(Clone)]
pub struct TemplateDirectory {
    directory: PathBuf,
    extensions: Vec<String>,
}

impl TemplateDirectory {
    /// Directory that accepts the default template extensions.
    #[inline]
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        Self::for_extensions(directory, TEMPLATE_EXTENSIONS)
    }

    /// Directory that accepts files with any of the extensions given.
    /// Extensions are matched case-sensitively.
    pub fn for_extensions<D: AsRef<Path>, I, S>(directory: D, extensions: I) -> Self
        where I: IntoIterator<Item=S>, S: ToString
    {
        TemplateDirectory{
            directory: directory.as_ref().to_owned(),
            extensions: extensions.into_iter()
                .map(|e| e.to_string().trim().trim_start_matches('.').to_owned())
                .collect(),
        }
    }
}

impl TemplateDirectory {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.directory
    }

    #[inline]
    pub fn exists(&self) -> bool {
        self.directory.is_dir()
    }

    /// List paths of all the template images in the directory, sorted.
    ///
    /// Missing directory is reported as `io::ErrorKind::NotFound`.
    pub fn list(&self) -> io::Result<Vec<PathBuf>> {
        if !self.exists() {
            return Err(io::Error::new(io::ErrorKind::NotFound,
                format!("{} is not a directory", self.directory.display())));
        }

        let options = MatchOptions{
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let directory = Pattern::escape(&self.directory.to_string_lossy());

        let mut result = vec![];
        for ext in &self.extensions {
            let pattern = format!("{}/*.{}", directory, Pattern::escape(ext));
            trace!("Globbing with {}", pattern);

            let paths = glob::glob_with(&pattern, options).map_err(|e| {
                error!("Failed to glob over files with {}: {}", pattern, e);
                io::Error::new(io::ErrorKind::InvalidInput, e)
            })?;
            for entry in paths {
                match entry {
                    Ok(path) => if path.is_file() { result.push(path) },
                    Err(e) => warn!("Skipping unreadable path {}: {}", e.path().display(), e),
                }
            }
        }
        result.sort();
        result.dedup();

        debug!("Found {} template(s) in {}", result.len(), self.directory.display());
        Ok(result)
    }
}

impl fmt::Debug for TemplateDirectory {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("TemplateDirectory")
            .field("directory", &self.directory)
            .field("extensions", &self.extensions)
            .finish()
    }
}
