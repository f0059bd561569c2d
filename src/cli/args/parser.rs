//! Module defining the command line argument parser.

use std::convert::TryFrom;
use std::path::PathBuf;

use clap::{self, crate_authors, value_parser, Arg, ArgAction, ArgMatches};
use memer::CaptionText;

use super::{LONG_VERSION, NAME, VERSION};
use super::model::{ArgsError, Command, Options, Output, RenderOptions};


impl<'a> TryFrom<&'a ArgMatches> for Options {
    type Error = ArgsError;

    fn try_from(matches: &'a ArgMatches) -> Result<Self, Self::Error> {
        let (name, submatches) = matches.subcommand().ok_or(ArgsError::NoCommand)?;

        // Global flags are propagated to the subcommand's matches.
        let verbose_count = submatches.get_count(OPT_VERBOSE) as isize;
        let quiet_count = submatches.get_count(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;
        let config_path = submatches.get_one::<PathBuf>(OPT_CONFIG).cloned();

        let command = match name {
            CMD_RENDER => Command::Render{
                image: image_arg(submatches)?,
                text: caption_text(submatches),
                output: output_arg(submatches),
                render: render_options(submatches),
            },
            CMD_GACHA => Command::Gacha{
                bottom: submatches.get_one::<String>(OPT_BOTTOM).cloned(),
                output: output_arg(submatches),
                seed: submatches.get_one::<u64>(OPT_SEED).copied(),
                render: render_options(submatches),
            },
            CMD_CAPTIONS => Command::Captions,
            CMD_SHARE => Command::Share{
                image: image_arg(submatches)?,
                text: caption_text(submatches),
                yes: submatches.get_flag(OPT_YES),
                render: render_options(submatches),
            },
            _ => return Err(ArgsError::NoCommand),
        };

        Ok(Options{verbosity, config_path, command})
    }
}

fn image_arg(matches: &ArgMatches) -> Result<PathBuf, ArgsError> {
    matches.get_one::<PathBuf>(ARG_IMAGE).cloned().ok_or(ArgsError::Missing(ARG_IMAGE))
}

fn caption_text(matches: &ArgMatches) -> CaptionText {
    let text = |name| matches.get_one::<String>(name).cloned().unwrap_or_default();
    CaptionText::new(text(OPT_TOP), text(OPT_BOTTOM))
}

fn output_arg(matches: &ArgMatches) -> Output {
    // Output can be set explicitly to stdout via `-`.
    match matches.get_one::<String>(OPT_OUTPUT).map(|p| p.trim()) {
        None => Output::Numbered,
        Some("-") => Output::Stdout,
        Some(p) => Output::File(PathBuf::from(p)),
    }
}

fn render_options(matches: &ArgMatches) -> RenderOptions {
    RenderOptions{
        font_size: matches.get_one::<u32>(OPT_FONT_SIZE).copied(),
        top_padding: matches.get_one::<u32>(OPT_PADDING).copied(),
        left_margin: matches.get_one::<u32>(OPT_LEFT_MARGIN).copied(),
        bottom_padding: matches.get_one::<u32>(OPT_BOTTOM_PADDING).copied(),
        font_path: matches.get_one::<PathBuf>(OPT_FONT).cloned(),
    }
}


// Parser definition

/// Type of the argument parser object.
pub type Parser = clap::Command;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const CMD_RENDER: &str = "render";
const CMD_GACHA: &str = "gacha";
const CMD_CAPTIONS: &str = "captions";
const CMD_SHARE: &str = "share";

const ARG_IMAGE: &str = "image";
const OPT_TOP: &str = "top";
const OPT_BOTTOM: &str = "bottom";
const OPT_OUTPUT: &str = "output";
const OPT_SEED: &str = "seed";
const OPT_YES: &str = "yes";
const OPT_FONT_SIZE: &str = "font-size";
const OPT_PADDING: &str = "padding";
const OPT_LEFT_MARGIN: &str = "left-margin";
const OPT_BOTTOM_PADDING: &str = "bottom-padding";
const OPT_FONT: &str = "font";
const OPT_CONFIG: &str = "config";
const OPT_VERBOSE: &str = "verbose";
const OPT_QUIET: &str = "quiet";


/// Create the parser for application's command line.
pub fn create_parser() -> Parser {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version).long_version(LONG_VERSION.as_str());
    }
    parser
        .about(*ABOUT)
        .author(crate_authors!(", "))
        .subcommand_required(true)
        .arg_required_else_help(true)

        .subcommand(Parser::new(CMD_RENDER)
            .about("Caption an image")
            .arg(image_arg_def("Image to put the captions on"))
            .arg(top_arg_def())
            .arg(bottom_arg_def())
            .arg(output_arg_def())
            .args(render_arg_defs()))
        .subcommand(Parser::new(CMD_GACHA)
            .about("Caption a random template with a random caption")
            .long_about(concat!(
                "Pick a random image from the images directory and put a random caption ",
                "from the captions file at its top."))
            .arg(bottom_arg_def())
            .arg(output_arg_def())
            .arg(Arg::new(OPT_SEED)
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("Seed for the random choices")
                .long_help(concat!(
                    "Seed for picking the template, the caption, and the output file number. ",
                    "The same seed and the same resources give the same meme.")))
            .args(render_arg_defs()))
        .subcommand(Parser::new(CMD_CAPTIONS)
            .about("List the caption suggestions"))
        .subcommand(Parser::new(CMD_SHARE)
            .about("Caption an image and post it to X")
            .long_about(concat!(
                "Caption an image and post it to X, with the top text as the post's text.\n\n",
                "Posting needs the X_API_KEY, X_API_SECRET, X_ACCESS_TOKEN, and ",
                "X_ACCESS_TOKEN_SECRET environment variables to be set."))
            .arg(image_arg_def("Image to caption and post"))
            .arg(top_arg_def())
            .arg(bottom_arg_def())
            .arg(Arg::new(OPT_YES)
                .long("yes").short('y')
                .action(ArgAction::SetTrue)
                .help("Post without asking for confirmation"))
            .args(render_arg_defs()))

        // Configuration.
        .arg(Arg::new(OPT_CONFIG)
            .long("config").short('c')
            .global(true)
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("JSON configuration file")
            .long_help(concat!(
                "JSON file with the paths of resources and the default rendering parameters.\n\n",
                "By default, memer.json in the current directory is used if it exists.")))

        // Verbosity flags.
        .arg(Arg::new(OPT_VERBOSE)
            .long("verbose").short('v')
            .global(true)
            .action(ArgAction::Count)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::new(OPT_QUIET)
            .long("quiet").short('q')
            .global(true)
            .action(ArgAction::Count)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))
}

fn image_arg_def(help: &'static str) -> Arg {
    Arg::new(ARG_IMAGE)
        .value_name("IMAGE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn top_arg_def() -> Arg {
    Arg::new(OPT_TOP)
        .long("top").short('t')
        .value_name("TEXT")
        .help("Text at the top of the image")
}

fn bottom_arg_def() -> Arg {
    Arg::new(OPT_BOTTOM)
        .long("bottom").short('b')
        .value_name("TEXT")
        .help("Text at the bottom of the image")
}

fn output_arg_def() -> Arg {
    Arg::new(OPT_OUTPUT)
        .long("output").short('o')
        .value_name("PATH")
        .help("File to write the captioned image to")
        .long_help(concat!(
            "What file should the final image be written to.\n\n",
            "By default, the image is saved in the output directory as meme_N.png ",
            "with a random N. When this flag is set to `-` (single dash), the image is written ",
            "to standard output so it can be e.g. piped to the ImageMagick `display` program."))
}

fn render_arg_defs() -> Vec<Arg> {
    let number = |name: &'static str, help: &'static str| Arg::new(name)
        .long(name)
        .value_name("PIXELS")
        .value_parser(value_parser!(u32))
        .help(help);
    vec![
        number(OPT_FONT_SIZE, "Size of the caption font"),
        number(OPT_PADDING, "Distance of the top text from the top edge"),
        number(OPT_LEFT_MARGIN, "Distance of the text from the left edge"),
        number(OPT_BOTTOM_PADDING, "Distance of the bottom text from the bottom edge"),
        Arg::new(OPT_FONT)
            .long("font")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("TrueType font file to render the captions with"),
    ]
}
