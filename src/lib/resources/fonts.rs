//! Module for loading the font that captions are rendered with.

use std::fmt;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};


/// Font families to look for among the installed fonts,
/// in order of preference, when the display font is not available.
pub const SYSTEM_FONT_FAMILIES: &[&str] = &[
    "Impact", "DejaVu Sans", "Liberation Sans", "Arial", "Helvetica",
    "Noto Sans", "FreeSans",
];

/// Name of the font shipped inside the library.
pub const BUNDLED_FONT_NAME: &str = "DejaVu Sans Bold";

/// Font that is always available, as the last resort.
const BUNDLED_FONT: &[u8] = include_bytes!("../../../data/fonts/DejaVuSans-Bold.ttf");


/// Font that can be used to caption memes.
pub struct Font(rusttype::Font<'static>);

impl Font {
    /// Parse font from the content of a TrueType/OpenType file.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        rusttype::Font::try_from_vec(bytes).map(Font)
    }

    /// Parse given face of a font file, which may be a collection.
    pub fn from_bytes_and_index(bytes: Vec<u8>, index: u32) -> Option<Self> {
        rusttype::Font::try_from_vec_and_index(bytes, index).map(Font)
    }

    /// Load the font from given file.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(bytes).ok_or_else(|| io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not a valid font file", path.as_ref().display())))
    }

    /// The font shipped with the library.
    pub fn bundled() -> Option<Self> {
        rusttype::Font::try_from_bytes(BUNDLED_FONT).map(Font)
    }
}

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({} glyph(s))", self.0.glyph_count())
    }
}


/// Where the font in use came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// The preferred display font.
    Display(PathBuf),
    /// An installed font that stands in for the display font.
    System(String),
    /// The font shipped with the library.
    Bundled,
    /// No usable font could be found, so no text will be drawn.
    Missing,
}

/// Result of font loading.
#[derive(Debug)]
pub struct LoadedFont {
    pub font: Option<Font>,
    pub source: FontSource,
    /// Message for the user if the display font wasn't available.
    pub warning: Option<String>,
}

impl LoadedFont {
    /// Whether the font is anything else than the preferred display font.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        match self.source { FontSource::Display(..) => false, _ => true }
    }
}


/// Loader for the caption font.
///
/// It prefers the display font at a known path, then a bold sans-serif
/// font installed on the system, and finally the bundled font.
#[derive(Clone, Debug)]
pub struct FontLoader {
    display_font: PathBuf,
    system_fonts: bool,
}

impl FontLoader {
    pub fn new<P: AsRef<Path>>(display_font: P) -> Self {
        FontLoader{display_font: display_font.as_ref().to_owned(), system_fonts: true}
    }

    /// Don't look at the installed fonts, going straight to the bundled one.
    pub fn without_system_fonts(self) -> Self {
        FontLoader{system_fonts: false, ..self}
    }
}

impl FontLoader {
    /// Load the font, falling back to the system or bundled fonts if necessary.
    ///
    /// This never fails.
    pub fn load(&self) -> LoadedFont {
        let path = &self.display_font;
        let reason = match Font::open(path) {
            Ok(font) => {
                debug!("Display font loaded from {}", path.display());
                return LoadedFont{
                    font: Some(font),
                    source: FontSource::Display(path.clone()),
                    warning: None,
                };
            }
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                format!("Font file not found: {}.", path.display())
            }
            Err(e) => format!("Failed to load font {}: {}.", path.display(), e),
        };
        warn!("{}", reason);
        let warning = Some(format!("{} Using default font.", reason));

        if self.system_fonts {
            if let Some((font, family)) = find_system_font() {
                info!("Using system font {} instead", family);
                return LoadedFont{font: Some(font), source: FontSource::System(family), warning};
            }
        }
        if let Some(font) = Font::bundled() {
            info!("Using bundled font {} instead", BUNDLED_FONT_NAME);
            return LoadedFont{font: Some(font), source: FontSource::Bundled, warning};
        }

        error!("No usable font found, captions will not be drawn");
        LoadedFont{
            font: None,
            source: FontSource::Missing,
            warning: Some(format!("{} No default font available either, \
                                   text will not be drawn.", reason)),
        }
    }
}

/// Look up a bold sans-serif font among the installed ones.
fn find_system_font() -> Option<(Font, String)> {
    let mut db = Database::new();
    db.load_system_fonts();
    trace!("Found {} installed font face(s)", db.len());

    let families: Vec<_> = SYSTEM_FONT_FAMILIES.iter().map(|&f| Family::Name(f))
        .chain(Some(Family::SansSerif))
        .collect();
    let query = Query{
        families: &families,
        weight: Weight::BOLD,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query)?;
    let family = db.face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_owned());

    let font = db.with_face_data(id, |data, index| {
        Font::from_bytes_and_index(data.to_vec(), index)
    })?;
    if font.is_none() {
        debug!("Installed font {} could not be parsed", family);
    }
    font.map(|f| (f, family))
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::testing::TempDir;
    use super::{Font, FontLoader, FontSource};

    #[test]
    fn bundled_font_parses() {
        let font = Font::bundled().unwrap();
        assert_that!(font.glyph_count()).is_greater_than(100);
    }

    #[test]
    fn display_font_preferred() {
        let dir = TempDir::new("fonts_display_font_preferred");
        dir.write("impact.ttf", super::BUNDLED_FONT);
        let loaded = FontLoader::new(dir.path().join("impact.ttf")).load();

        assert_that!(loaded.font.is_some()).is_true();
        assert_eq!(FontSource::Display(dir.path().join("impact.ttf")), loaded.source);
        assert_that!(loaded.is_degraded()).is_false();
        assert_that!(loaded.warning).is_none();
    }

    #[test]
    fn bundled_font_when_nothing_else() {
        let dir = TempDir::new("fonts_bundled_font_when_nothing_else");
        let loader = FontLoader::new(dir.path().join("impact.ttf")).without_system_fonts();

        let loaded = loader.load();
        assert_that!(loaded.font.is_some()).is_true();
        assert_eq!(FontSource::Bundled, loaded.source);
        assert_that!(loaded.is_degraded()).is_true();
        let warning = loaded.warning.unwrap();
        assert_that!(warning.ends_with("Using default font.")).is_true();
    }

    #[test]
    fn some_font_always_found() {
        let dir = TempDir::new("fonts_some_font_always_found");
        let loaded = FontLoader::new(dir.path().join("impact.ttf")).load();

        assert_that!(loaded.font.is_some()).is_true();
        match loaded.source {
            FontSource::System(..) | FontSource::Bundled => {}
            other => panic!("unexpected font source: {:?}", other),
        }
    }

    #[test]
    fn garbage_font_file() {
        let dir = TempDir::new("fonts_garbage_font_file");
        dir.write("impact.ttf", b"this is not a font");
        let loader = FontLoader::new(dir.path().join("impact.ttf")).without_system_fonts();

        let loaded = loader.load();
        assert_that!(loaded.font.is_some()).is_true();
        let warning = loaded.warning.unwrap();
        assert_that!(warning.contains("Failed to load font")).is_true();
    }

    #[test]
    fn missing_display_font_warning() {
        let dir = TempDir::new("fonts_missing_display_font_warning");
        let loader = FontLoader::new(dir.path().join("impact.ttf")).without_system_fonts();

        let warning = loader.load().warning.unwrap();
        assert_that!(warning.starts_with("Font file not found:")).is_true();
    }
}
