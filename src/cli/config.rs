//! Module implementing the configuration file.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use memer::{RenderParameters, DEFAULT_CAPTIONS_PATH, DEFAULT_FONT_PATH,
            DEFAULT_IMAGE_DIR, DEFAULT_OUTPUT_DIR};
use serde_json;


/// Configuration file that's used when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "memer.json";


/// Paths of the resources and the default rendering parameters.
///
/// Every field is optional in the JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory with template images for random picks.
    pub image_dir: PathBuf,
    /// CSV file with caption suggestions.
    pub captions_path: PathBuf,
    /// Display font to render the captions with.
    pub font_path: PathBuf,
    /// Directory where numbered memes are saved.
    pub output_dir: PathBuf,
    pub parameters: RenderParameters,
}

impl Default for Config {
    fn default() -> Self {
        Config{
            image_dir: DEFAULT_IMAGE_DIR.into(),
            captions_path: DEFAULT_CAPTIONS_PATH.into(),
            font_path: DEFAULT_FONT_PATH.into(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            parameters: RenderParameters::default(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicitly given file has to exist. Without one, the default file
    /// is read if it's there, and the default configuration is used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    debug!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
                    return Ok(Config::default());
                }
                default
            }
        };
        debug!("Loading configuration from {}", path.display());
        let file = File::open(path)
            .map_err(|e| ConfigError::Io(path.to_owned(), e))?;
        let config = Config::from_reader(BufReader::new(file))
            .map_err(|e| ConfigError::Parse(path.to_owned(), e))?;
        trace!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    #[inline]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}


/// Error while loading the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::Io(_, ref e) => Some(e),
            ConfigError::Parse(_, ref e) => Some(e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::Io(ref p, ref e) =>
                write!(fmt, "cannot read config file {}: {}", p.display(), e),
            ConfigError::Parse(ref p, ref e) =>
                write!(fmt, "invalid config file {}: {}", p.display(), e),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::process;

    use memer::RenderParameters;
    use spectral::prelude::*;
    use super::{Config, ConfigError};

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir()
            .join(format!("memersh-test-{}-{}", process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn empty_object_is_default() {
        let config = Config::from_reader(&b"{}"[..]).unwrap();
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(PathBuf::from("data/images"), config.image_dir);
        assert_eq!(PathBuf::from("data/captions.csv"), config.captions_path);
        assert_eq!(PathBuf::from("data/fonts/impact.ttf"), config.font_path);
        assert_eq!(PathBuf::from("output"), config.output_dir);
    }

    #[test]
    fn partial() {
        let config = Config::from_reader(&br#"{
            "image_dir": "templates",
            "parameters": {"font_size": 40, "padding": 5}
        }"#[..]).unwrap();
        assert_eq!(PathBuf::from("templates"), config.image_dir);
        assert_eq!(PathBuf::from("output"), config.output_dir);
        assert_eq!(RenderParameters{
            font_size: 40, top_padding: 5, ..RenderParameters::default()
        }, config.parameters);
    }

    #[test]
    fn unknown_field() {
        assert_that!(Config::from_reader(&br#"{"imagedir": "x"}"#[..])).is_err();
    }

    #[test]
    fn load_explicit_file() {
        let path = temp_file("load_explicit_file.json", r#"{"output_dir": "memes"}"#);
        let config = Config::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(PathBuf::from("memes"), config.output_dir);
    }

    #[test]
    fn load_missing_explicit_file() {
        let path = env::temp_dir().join("memersh-test-no-such-config.json");
        match Config::load(Some(path.as_path())) {
            Err(ConfigError::Io(p, _)) => assert_eq!(path, p),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn load_invalid_file() {
        let path = temp_file("load_invalid_file.json", "[1, 2");
        let result = Config::load(Some(path.as_path()));
        fs::remove_file(&path).unwrap();
        match result {
            Err(ConfigError::Parse(p, _)) => assert_eq!(path, p),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
