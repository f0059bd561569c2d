//! Data structures for command-line arguments.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use clap;
use memer::{CaptionText, RenderParameters};


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,
    /// Path to the JSON configuration file, if given explicitly.
    pub config_path: Option<PathBuf>,
    /// What to actually do.
    pub command: Command,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


/// Subcommand given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Caption given image.
    Render {
        image: PathBuf,
        text: CaptionText,
        output: Output,
        render: RenderOptions,
    },
    /// Caption a random template with a random caption.
    Gacha {
        bottom: Option<String>,
        output: Output,
        seed: Option<u64>,
        render: RenderOptions,
    },
    /// List the caption suggestions.
    Captions,
    /// Caption given image and post it.
    Share {
        image: PathBuf,
        text: CaptionText,
        yes: bool,
        render: RenderOptions,
    },
}

impl Command {
    /// Rendering flags of the command, if it takes any.
    pub fn render_options(&self) -> Option<&RenderOptions> {
        match *self {
            Command::Render{ref render, ..} |
            Command::Gacha{ref render, ..} |
            Command::Share{ref render, ..} => Some(render),
            Command::Captions => None,
        }
    }

    /// Where the command writes the finished image, if anywhere.
    pub fn output(&self) -> Option<&Output> {
        match *self {
            Command::Render{ref output, ..} |
            Command::Gacha{ref output, ..} => Some(output),
            _ => None,
        }
    }
}


/// Where to write the finished image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// Randomly numbered file in the configured output directory.
    Numbered,
    /// Given file.
    File(PathBuf),
    /// Standard output.
    Stdout,
}


/// Rendering flags that override the configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub font_size: Option<u32>,
    pub top_padding: Option<u32>,
    pub left_margin: Option<u32>,
    pub bottom_padding: Option<u32>,
    pub font_path: Option<PathBuf>,
}

impl RenderOptions {
    /// Apply the flags that were given on top of given parameters.
    pub fn apply(&self, params: RenderParameters) -> RenderParameters {
        RenderParameters{
            font_size: self.font_size.unwrap_or(params.font_size),
            top_padding: self.top_padding.unwrap_or(params.top_padding),
            left_margin: self.left_margin.unwrap_or(params.left_margin),
            bottom_padding: self.bottom_padding.unwrap_or(params.bottom_padding),
        }
    }
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug)]
pub enum ArgsError {
    /// General error when parsing the arguments.
    Parse(clap::Error),
    /// No subcommand was given.
    NoCommand,
    /// Required argument was absent.
    Missing(&'static str),
}

impl From<clap::Error> for ArgsError {
    fn from(input: clap::Error) -> Self {
        ArgsError::Parse(input)
    }
}

impl Error for ArgsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ArgsError::Parse(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArgsError::Parse(ref e) => write!(fmt, "invalid arguments: {}", e),
            ArgsError::NoCommand => write!(fmt, "no command given"),
            ArgsError::Missing(arg) => write!(fmt, "missing argument: {}", arg),
        }
    }
}
