//! Command-line options and the options file.

use crate::wheel::{OptionList, WheelOption, MAX_OPTIONS, MIN_OPTIONS, PALETTE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with the command line or the options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} requires a path argument")]
    MissingValue(&'static str),
    #[error("unknown option: {0}")]
    UnknownArgument(String),
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse options file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("options file has {found} usable options, expected {min} to {max}")]
    OptionCount {
        found: usize,
        min: usize,
        max: usize,
    },
}

/// Command-line options for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Start with sound muted.
    pub muted: bool,
    /// JSON file to load the wheel options from.
    pub options_file: Option<PathBuf>,
    /// Render the sound effects into this directory and exit.
    pub export_sounds: Option<PathBuf>,
    /// Print usage and exit.
    pub help: bool,
}

impl CliOptions {
    /// Parses the process arguments.
    pub fn parse() -> Result<Self, ConfigError> {
        Self::from_args(std::env::args().skip(1))
    }

    /// Parses arguments (without the program name).
    ///
    /// Supports:
    /// - `--mute` or `-m`: Start muted
    /// - `--options <path>` or `-o <path>`: Load options from a JSON file
    /// - `--export-sounds <dir>`: Write `tick.wav` and `win.wav` and exit
    /// - `--help` or `-h`: Print help and exit
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mute" | "-m" => cli.muted = true,
                "--options" | "-o" => {
                    let path = args.next().ok_or(ConfigError::MissingValue("--options"))?;
                    cli.options_file = Some(PathBuf::from(path));
                }
                "--export-sounds" => {
                    let path = args
                        .next()
                        .ok_or(ConfigError::MissingValue("--export-sounds"))?;
                    cli.export_sounds = Some(PathBuf::from(path));
                }
                "--help" | "-h" => cli.help = true,
                other => {
                    // A bare .json argument is taken as the options file.
                    if other.ends_with(".json") {
                        cli.options_file = Some(PathBuf::from(other));
                    } else {
                        return Err(ConfigError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(cli)
    }

    /// Usage text for `--help`.
    pub fn usage(program: &str) -> String {
        format!(
            "luckywheel - Spin a wheel to pick one of your options\n\
             \n\
             Usage: {} [OPTIONS]\n\
             \n\
             Options:\n\
             \x20 -m, --mute                Start with sound muted\n\
             \x20 -o, --options PATH        Load wheel options from a JSON file\n\
             \x20     --export-sounds DIR   Write tick.wav and win.wav to DIR and exit\n\
             \x20 -h, --help                Print this help message\n",
            program
        )
    }
}

/// One entry of the object form of the options file.
#[derive(Debug, Deserialize)]
struct OptionEntry {
    label: String,
    #[serde(default)]
    color: Option<String>,
}

/// Accepted layouts of the options file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionsFile {
    /// `["Pizza", "Sushi"]`
    Labels(Vec<String>),
    /// `{ "options": [ { "label": "Pizza", "color": "#FF0000" } ] }`
    Entries { options: Vec<OptionEntry> },
}

/// Parses an options file's contents into an option list.
///
/// Blank labels are skipped. Entries without a color take the palette
/// color for their position.
pub fn parse_options(json: &str) -> Result<OptionList, ConfigError> {
    let entries: Vec<OptionEntry> = match serde_json::from_str(json)? {
        OptionsFile::Labels(labels) => labels
            .into_iter()
            .map(|label| OptionEntry { label, color: None })
            .collect(),
        OptionsFile::Entries { options } => options,
    };

    let options: Vec<WheelOption> = entries
        .into_iter()
        .filter(|e| !e.label.trim().is_empty())
        .enumerate()
        .map(|(i, e)| {
            let color = e
                .color
                .unwrap_or_else(|| PALETTE[i % PALETTE.len()].to_string());
            WheelOption::new(e.label.trim(), color)
        })
        .collect();

    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
        return Err(ConfigError::OptionCount {
            found: options.len(),
            min: MIN_OPTIONS,
            max: MAX_OPTIONS,
        });
    }

    Ok(OptionList::from_options(options))
}

/// Loads an options file from disk.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<OptionList, ConfigError> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let list = parse_options(&json)?;
    tracing::info!(
        path = %path.as_ref().display(),
        count = list.len(),
        "loaded wheel options"
    );
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli() {
        let cli = CliOptions::from_args(["-m", "--options", "food.json"]).unwrap();
        assert!(cli.muted);
        assert_eq!(cli.options_file, Some(PathBuf::from("food.json")));
        assert!(!cli.help);

        let cli = CliOptions::from_args(["--export-sounds", "out"]).unwrap();
        assert_eq!(cli.export_sounds, Some(PathBuf::from("out")));

        let cli = CliOptions::from_args(["lunch.json"]).unwrap();
        assert_eq!(cli.options_file, Some(PathBuf::from("lunch.json")));

        assert!(CliOptions::from_args(["-h"]).unwrap().help);
        assert_eq!(CliOptions::from_args(Vec::<String>::new()).unwrap(), CliOptions::default());
    }

    #[test]
    fn test_parse_cli_errors() {
        assert!(matches!(
            CliOptions::from_args(["--options"]),
            Err(ConfigError::MissingValue("--options"))
        ));
        assert!(matches!(
            CliOptions::from_args(["--spin-faster"]),
            Err(ConfigError::UnknownArgument(_))
        ));
    }

    #[test]
    fn test_parse_label_list() {
        let list = parse_options(r#"["Pizza", "  ", " Sushi ", "Tacos"]"#).unwrap();
        let labels: Vec<&str> = list.as_slice().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Pizza", "Sushi", "Tacos"]);
        assert_eq!(list.get(1).unwrap().color, PALETTE[1]);
    }

    #[test]
    fn test_parse_entries_with_colors() {
        let json = r##"{ "options": [
            { "label": "Red", "color": "#FF0000" },
            { "label": "Default" }
        ] }"##;
        let list = parse_options(json).unwrap();
        assert_eq!(list.get(0).unwrap().color, "#FF0000");
        assert_eq!(list.get(1).unwrap().color, PALETTE[1]);
    }

    #[test]
    fn test_parse_rejects_bad_counts_and_json() {
        assert!(matches!(
            parse_options(r#"["Only one"]"#),
            Err(ConfigError::OptionCount { found: 1, .. })
        ));
        let eleven: Vec<String> = (0..11).map(|i| format!("Option {}", i)).collect();
        let json = serde_json::to_string(&eleven).unwrap();
        assert!(matches!(
            parse_options(&json),
            Err(ConfigError::OptionCount { found: 11, .. })
        ));
        assert!(matches!(parse_options("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_options("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
