use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use idiff_core::flicker::FlickerInterval;
use idiff_core::window::WindowOptions;

#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "idiff", about = "Compare images side by side, sliced or merged")]
#[command(version)]
pub struct Options {
    /// Initial view: 2up, slice or merged
    #[arg(short, long, value_name = "NAME")]
    pub view: Option<String>,

    /// How often to alternate the images (1s, 500ms, 2.5s)
    #[arg(short = 't', long = "time", value_name = "DURATION", conflicts_with = "timer")]
    pub time: Option<FlickerInterval>,

    /// Same as --time 1s
    #[arg(long)]
    pub timer: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Images to compare
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl Options {
    pub fn flicker(&self) -> Option<FlickerInterval> {
        match (self.time, self.timer) {
            (Some(interval), _) => Some(interval),
            (None, true) => Some(FlickerInterval::default()),
            (None, false) => None,
        }
    }

    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            view: self.view.clone(),
            flicker: self.flicker(),
        }
    }
}

/// Result of a tolerant parse.
#[derive(Debug)]
pub struct Parsed {
    pub options: Options,
    /// The error that made the parser fall back to defaults, if any.
    pub ignored: Option<clap::Error>,
}

/// Parse `args`, replacing an unparseable command line with an empty one.
///
/// Only help and version requests come back as `Err`; the caller prints them
/// and exits successfully.
pub fn parse<I, T>(args: I) -> Result<Parsed, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Options::try_parse_from(args) {
        Ok(options) => Ok(Parsed {
            options,
            ignored: None,
        }),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => Err(e),
        Err(e) => Ok(Parsed {
            options: Options::default(),
            ignored: Some(e),
        }),
    }
}
