//! Module implementing meme captioning.

mod compositor;
mod output;
mod text;


pub use self::compositor::{bottom_text_y, Compositor};
pub use self::output::RenderedImage;
