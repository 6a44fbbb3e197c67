//! Command-line configuration

use std::path::{Path, PathBuf};

use gtf_export::{SpriteBackground, SpriteOptions};
use gtf_gif::Color;

/// Base name used when the input path has no usable file name
pub const DEFAULT_BASE_NAME: &str = "gif-frames";

pub const USAGE: &str = "\
Usage: giftoframes [OPTIONS] <INPUT.gif>

Split an animated GIF into composited PNG frames, a sprite sheet with CSS
keyframes, a metadata JSON file and a tar archive of the frames.

Options:
  -o, --output <DIR>        Output directory (default: next to the input)
  -n, --name <BASE>         Base name for output files (default: input file stem)
      --columns <N>         Sprite sheet columns (default: all frames in one row)
      --spacing <PX>        Gap between sprite cells in pixels (default: 0)
      --background <COLOR>  Sprite background: transparent or #rgb/#rrggbb/#rrggbbaa
      --no-sprite           Skip the sprite sheet and CSS
      --no-archive          Skip the tar archive
      --no-metadata         Skip the metadata JSON
      --strict              Fail on the first damaged frame
      --log <FILTER>        Log filter, e.g. debug or gtf_gif=trace (default: RUST_LOG or info)
  -h, --help                Print this help
";

/// Invalid command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing input file")]
    MissingInput,

    #[error("Option {0} requires a value")]
    MissingValue(String),

    #[error("Invalid value {value:?} for {option}")]
    InvalidValue { option: String, value: String },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Settings for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub base_name: String,
    pub sprite: SpriteOptions,
    pub no_sprite: bool,
    pub no_archive: bool,
    pub no_metadata: bool,
    pub strict: bool,
    /// Overrides `RUST_LOG` when set
    pub log_filter: Option<String>,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::from("."),
            base_name: DEFAULT_BASE_NAME.to_string(),
            sprite: SpriteOptions::default(),
            no_sprite: false,
            no_archive: false,
            no_metadata: false,
            strict: false,
            log_filter: None,
            show_help: false,
        }
    }
}

impl Config {
    /// Parse arguments (without the program name)
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        let mut input: Option<PathBuf> = None;
        let mut output_dir: Option<PathBuf> = None;
        let mut base_name: Option<String> = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let mut value = |option: &str| args.next().ok_or_else(|| ConfigError::MissingValue(option.to_string()));

            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "-o" | "--output" => output_dir = Some(PathBuf::from(value(&arg)?)),
                "-n" | "--name" => base_name = Some(value(&arg)?),
                "--columns" => {
                    let raw = value(&arg)?;
                    config.sprite.columns = Some(parse_number(&arg, &raw)?);
                }
                "--spacing" => {
                    let raw = value(&arg)?;
                    config.sprite.spacing = parse_number(&arg, &raw)?;
                }
                "--background" => {
                    let raw = value(&arg)?;
                    config.sprite.background = parse_background(&arg, &raw)?;
                }
                "--no-sprite" => config.no_sprite = true,
                "--no-archive" => config.no_archive = true,
                "--no-metadata" => config.no_metadata = true,
                "--strict" => config.strict = true,
                "--log" => config.log_filter = Some(value(&arg)?),
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(ConfigError::UnknownOption(other.to_string()));
                }
                _ if input.is_none() => input = Some(PathBuf::from(&arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg.clone())),
            }
        }

        if config.show_help {
            return Ok(config);
        }

        let input = input.ok_or(ConfigError::MissingInput)?;
        config.output_dir = output_dir.unwrap_or_else(|| default_output_dir(&input));
        config.base_name = base_name.unwrap_or_else(|| default_base_name(&input));
        config.input = input;
        Ok(config)
    }
}

/// File name with a trailing `.gif` (any case) removed
pub fn default_base_name(input: &Path) -> String {
    let Some(name) = input.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return DEFAULT_BASE_NAME.to_string();
    };
    let stem = match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".gif") => &name[..cut],
        _ => name.as_str(),
    };
    if stem.is_empty() {
        DEFAULT_BASE_NAME.to_string()
    } else {
        stem.to_string()
    }
}

fn default_output_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn parse_number<T: std::str::FromStr>(option: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        option: option.to_string(),
        value: raw.to_string(),
    })
}

fn parse_background(option: &str, raw: &str) -> Result<SpriteBackground, ConfigError> {
    if raw.eq_ignore_ascii_case("transparent") {
        return Ok(SpriteBackground::Transparent);
    }
    Color::from_hex(raw)
        .map(SpriteBackground::Solid)
        .ok_or_else(|| ConfigError::InvalidValue {
            option: option.to_string(),
            value: raw.to_string(),
        })
}
