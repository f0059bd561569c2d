//! Module defining constants relevant to the data model.

use super::color::Color;


/// Default font size, in points.
pub const DEFAULT_FONT_SIZE: u32 = 75;
/// Default distance of the top text from the top edge of the image.
pub const DEFAULT_TOP_PADDING: u32 = 20;
/// Default distance of both texts from the left edge of the image.
pub const DEFAULT_LEFT_MARGIN: u32 = 10;
/// Default distance of the bottom text from the bottom edge of the image.
pub const DEFAULT_BOTTOM_PADDING: u32 = 20;

/// Color of the caption text.
pub const TEXT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Color of the outline drawn around caption text.
pub const STROKE_COLOR: Color = Color(0x0, 0x0, 0x0);
/// Width of the text outline, in pixels.
pub const STROKE_WIDTH: u32 = 2;

/// Lowest vertical position the bottom text is clamped to
/// when its padding would push it above the image.
pub const MIN_BOTTOM_TEXT_Y: i64 = 10;


/// Extensions of files that can be picked as random templates.
///
/// Matching is case-sensitive.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Prefix of the file names that finished memes are saved under.
pub const OUTPUT_FILE_PREFIX: &str = "meme_";
/// Range of the random number suffixed to saved file names.
pub const OUTPUT_FILE_NUMBERS: (u32, u32) = (1, 1000);


/// Longest side (in pixels) of an image that is sent to the social platform.
pub const MAX_SHARE_DIMENSION: u32 = 1280;

/// Text posted along with the meme when the user didn't provide any.
pub const DEFAULT_SHARE_TEXT: &str = "Check out my meme! #MemeGenerator #MadeByGrok";


/// Captions to suggest when no caption file is available.
pub const FALLBACK_CAPTIONS: [&str; 15] = [
    "LOL SO TRUE!", "EPIC FAIL!", "TOO FUNNY!", "MEME LORD!",
    "VIRAL VIBES!", "SAVAGE MODE!", "YOLO SWAG!", "BIG MOOD!",
    "NO CHILL!", "LMAO FOREVER!", "SPICY MEME!", "BESTIE ENERGY!",
    "ROASTED!", "ICONIC AF!", "SLAY QUEEN!",
];


/// Default directory with template images.
pub const DEFAULT_IMAGE_DIR: &str = "data/images";
/// Default path of the caption suggestions file.
pub const DEFAULT_CAPTIONS_PATH: &str = "data/captions.csv";
/// Default path of the display font.
pub const DEFAULT_FONT_PATH: &str = "data/fonts/impact.ttf";
/// Default directory that finished memes are saved to.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
