//! Helpers shared by the unit tests.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use image::{Rgba, RgbaImage};

use crate::resources::Font;


/// Scratch directory under the system temp dir, removed when dropped.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(name: &str) -> Self {
        let path = env::temp_dir()
            .join(format!("memer-test-{}-{}", process::id(), name));
        if path.exists() {
            fs::remove_dir_all(&path).unwrap();
        }
        fs::create_dir_all(&path).unwrap();
        TempDir{path}
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, contents: &[u8]) {
        fs::write(self.path.join(path), contents).unwrap();
    }

    /// Write a solid-color PNG image under given name and return its path.
    pub fn png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path.join(name);
        solid(width, height).save(&path).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}


/// Mid-gray opaque image, so that both white text and black outline show up.
pub fn solid(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0x80, 0x80, 0x80, 0xff]))
}


/// Font for tests that draw text, which is the bundled one.
pub fn test_font() -> Font {
    Font::bundled().expect("bundled font")
}
