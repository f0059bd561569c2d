//! Module defining the data model.

mod color;
mod constants;
mod params;
mod text;

pub use self::color::Color;
pub use self::constants::*;
pub use self::params::RenderParameters;
pub use self::text::CaptionText;
