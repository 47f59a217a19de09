use clap::{ArgAction, ColorChoice, Parser, ValueEnum};
use log::LevelFilter;

/// Print DRM system ids and CENC key ids found in mp4 PSSH boxes.
#[derive(Debug, Clone, Parser)]
#[command(version, author = "clitic <clitic21@gmail.com>", about)]
pub struct Args {
    /// PSSH data input.
    /// Can be a path to a file holding raw PSSH box(es), a hex string or
    /// base64 encoded PSSH box(es). Boxes nested inside `moov` are not searched.
    #[arg(required = true, value_name = "PATH|HEX|BASE64")]
    pub input: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print ids in dashed uuid form (text output only).
    #[arg(long)]
    pub uuid: bool,

    /// Print every key id only once.
    #[arg(long)]
    pub unique: bool,

    /// When to output colored text, decided separately for stdout and stderr.
    #[arg(long, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Increase log verbosity, can be used multiple times.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Disable all log messages.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum Format {
    Json,
    Text,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }

        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Whether a stream should be colored, given if it is a terminal.
    pub fn color_for(&self, is_terminal: bool) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Auto => is_terminal,
            ColorChoice::Never => false,
        }
    }
}
