//! Module handling the resources used for making memes.

mod captions;
mod filesystem;
mod fonts;
mod images;


pub use self::captions::{CaptionCatalog, CatalogLoad};
pub use self::filesystem::TemplateDirectory;
pub use self::fonts::{Font, FontLoader, FontSource, LoadedFont,
                      BUNDLED_FONT_NAME, SYSTEM_FONT_FAMILIES};
pub use self::images::BaseImage;
