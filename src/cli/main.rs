//!
//! memersh -- Memes in the shell
//!

             extern crate ansi_term;
             extern crate clap;
             extern crate exitcode;
             extern crate isatty;
#[macro_use] extern crate lazy_static;
             extern crate memer;
             extern crate rand;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate serde_json;
#[macro_use] extern crate slog;
             extern crate slog_scope;
             extern crate slog_stdlog;
             extern crate slog_term;

// `log` must be at the end of these declarations because we want to simultaneously:
// * use the standard `log` macros (which would be shadowed by `slog`)
// * be able to initialize the slog logger using slog macros like o!()
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


mod args;
mod config;
mod logging;
mod notices;


use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use memer::{CaptionCatalog, CaptionText, Credentials, Error, Notice, Observer,
            Poster, PostingCapability, Session, ShareRequest};
use rand::SeedableRng;
use rand::rngs::StdRng;

use args::{ArgsError, Command, Output, RenderOptions};
use config::Config;
use notices::TermObserver;


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("memersh");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

    /// Application version with the Git revision it was built from, if known.
    static ref LONG_VERSION: String = {
        let version = VERSION.unwrap_or("unknown");
        match REVISION.trim() {
            "" => version.to_owned(),
            rev => format!("{} ({})", version, rev),
        }
    };
}

/// Git revision written by the build script.
const REVISION: &str = include_str!(concat!(env!("OUT_DIR"), "/revision"));


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e);
        exit(exitcode::USAGE);
    });

    let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {}", e);
        exit(exitcode::SOFTWARE);
    });
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let config = Config::load(opts.config_path.as_ref().map(PathBuf::as_path))
        .unwrap_or_else(|e| {
            error!("{}", e);
            exit(exitcode::CONFIG);
        });

    if opts.command.output() == Some(&Output::Stdout) && isatty::stdout_isatty() {
        error!("Standard output is a terminal, refusing to write image data to it.");
        error!("Redirect the output or pass a file name to --output instead.");
        exit(exitcode::CANTCREAT);
    }

    let result = match opts.command {
        Command::Render{image, text, output, render} => {
            let mut session = create_session(&config, &render, None);
            render_image(&mut session, &image, text)
                .and_then(|_| write_output(&session, &output, &config, None))
        }
        Command::Gacha{bottom, output, seed, render} => {
            let mut session = create_session(&config, &render, None);
            gacha(&mut session, bottom, &output, &config, seed)
        }
        Command::Captions => {
            list_captions(&config)
        }
        Command::Share{image, text, yes, render} => {
            // No platform client is linked into this binary.
            let poster: Option<&dyn Poster> = None;
            let credentials = Credentials::from_env();
            let posting = PostingCapability::resolve(credentials.as_ref(), poster.is_some());
            let mut session = create_session(&config, &render, Some(posting));
            render_image(&mut session, &image, text)
                .and_then(|_| share(&session, poster, yes))
        }
    };

    if let Err(e) = result {
        debug!("Command failed: {:?}", e);
        exit(exit_code(&e));
    }
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) {
    match e {
        // Help & version "errors" go to stdout and exit successfully.
        ArgsError::Parse(ref e) if !e.use_stderr() => e.exit(),
        // In case of generic parse error,
        // message provided by the clap library will include the usage string.
        ArgsError::Parse(ref e) => {
            let _ = e.print();
        }
        e => {
            let _ = writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e);
        }
    }
}

/// Exit code of the program when given error has occurred.
fn exit_code(error: &Error) -> exitcode::ExitCode {
    match *error {
        Error::ResourceMissing(..) |
        Error::EmptyCatalog(..) |
        Error::LoadFailure(..) => exitcode::NOINPUT,
        Error::Save(..) | Error::Io(..) => exitcode::CANTCREAT,
        Error::Post(..) | Error::PostingDisabled => exitcode::UNAVAILABLE,
        Error::NoContent => exitcode::SOFTWARE,
    }
}


/// Create the session, with posting only for commands that share.
fn create_session(config: &Config,
                  render: &RenderOptions,
                  posting: Option<PostingCapability>) -> Session {
    let font_path = render.font_path.as_ref().unwrap_or(&config.font_path);
    let mut builder = Session::builder()
        .template_directory(&config.image_dir)
        .captions_file(&config.captions_path)
        .font_file(font_path)
        .parameters(render.apply(config.parameters))
        .observer(TermObserver::new());
    if let Some(posting) = posting {
        builder = builder.posting(posting);
    }
    builder.build()
}

/// Load given image into the session and caption it.
fn render_image(session: &mut Session, image: &Path, text: CaptionText) -> Result<(), Error> {
    session.load_image(image)?;
    session.set_top_text(text.top);
    session.set_bottom_text(text.bottom);
    Ok(())
}

/// Caption a random template with a random caption and write it out.
fn gacha(session: &mut Session,
         bottom: Option<String>,
         output: &Output,
         config: &Config,
         seed: Option<u64>) -> Result<(), Error> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let picked = session.random_template(&mut rng)?;
    info!("Picked {} with caption {:?}", picked.path.display(), picked.caption);
    if let Some(bottom) = bottom {
        session.set_bottom_text(bottom);
    }
    write_output(session, output, config, Some(&mut rng))
}

/// Write the session's image where the user wants it.
fn write_output(session: &Session,
                output: &Output,
                config: &Config,
                rng: Option<&mut StdRng>) -> Result<(), Error> {
    match *output {
        Output::Numbered => {
            let path = match rng {
                Some(rng) => session.save(&config.output_dir, rng)?,
                None => session.save(&config.output_dir, &mut rand::thread_rng())?,
            };
            println!("{}", path.display());
        }
        Output::File(ref path) => session.save_as(path)?,
        Output::Stdout => {
            let image = session.image().ok_or(Error::NoContent)?;
            let png = image.to_png()
                .map_err(|e| Error::Save(PathBuf::from("-"), e))?;
            trace!("Writing {} bytes to standard output...", png.len());
            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            stdout.write_all(&png)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Print the caption suggestions, one per line.
fn list_captions(config: &Config) -> Result<(), Error> {
    let loaded = CaptionCatalog::load(&config.captions_path);
    if let Some(warning) = loaded.warning {
        TermObserver::new().notify(&Notice::warning(warning));
    }
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for caption in &loaded.catalog {
        writeln!(stdout, "{}", caption)?;
    }
    Ok(())
}

/// Post the session's image, asking for confirmation first unless `yes` is set.
fn share(session: &Session, poster: Option<&dyn Poster>, yes: bool) -> Result<(), Error> {
    let confirm = |request: &ShareRequest| yes || ask_to_post(request);
    match session.share(poster, confirm)? {
        Some(id) => println!("{}", id),
        None => info!("Meme not posted."),
    }
    Ok(())
}

/// Ask the user on the terminal whether given post should be published.
fn ask_to_post(request: &ShareRequest) -> bool {
    if !isatty::stdin_isatty() {
        warn!("Standard input is not a terminal, pass --yes to post without asking.");
        return false;
    }
    let (width, height) = request.dimensions();
    eprint!("Post this meme ({}x{}) to X with text {:?}? [y/N] ", width, height, request.text());
    let _ = io::stderr().flush();

    let mut answer = String::new();
    let stdin = io::stdin();
    if let Err(e) = stdin.lock().read_line(&mut answer) {
        warn!("Failed to read the answer: {}", e);
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        _ => false,
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use memer::{Error, PostError};
    use super::{exit_code, is_yes};

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yeah"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exitcode::NOINPUT, exit_code(&Error::EmptyCatalog("captions".into())));
        assert_eq!(exitcode::NOINPUT, exit_code(&Error::ResourceMissing(PathBuf::from("x"))));
        assert_eq!(exitcode::UNAVAILABLE, exit_code(&Error::PostingDisabled));
        assert_eq!(exitcode::UNAVAILABLE, exit_code(&Error::Post(PostError::new("nope"))));
        assert_eq!(exitcode::CANTCREAT,
            exit_code(&Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "full"))));
    }
}
