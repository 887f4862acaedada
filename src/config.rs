//! Command-line configuration
//!
//! Flags are parsed by hand; there are few enough that a table of `match`
//! arms reads better than a parser dependency.

use crate::memory::constants::DEFAULT_SCRATCH_LIMIT;
use crate::session::engine::SessionConfig;
use std::fmt;

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub memory_view: bool,
    pub max_retries: Option<usize>,
    pub scratch_limit: usize,
    pub no_color: bool,
    pub verbose: bool,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            memory_view: false,
            max_retries: None,
            scratch_limit: DEFAULT_SCRATCH_LIMIT,
            no_color: false,
            verbose: false,
            show_help: false,
        }
    }
}

/// Command-line errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownFlag(String),
    MissingValue { flag: String },
    InvalidValue { flag: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownFlag(flag) => write!(f, "Unknown option '{}'", flag),
            ConfigError::MissingValue { flag } => write!(f, "Option '{}' needs a value", flag),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "Invalid value '{}' for option '{}'", value, flag)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Parse arguments, excluding the program name
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--memory-view" => config.memory_view = true,
                "--no-color" => config.no_color = true,
                "-v" | "--verbose" => config.verbose = true,
                "-h" | "--help" => config.show_help = true,
                "--max-retries" => {
                    config.max_retries = Some(parse_value(&arg, args.next())?);
                }
                "--scratch-limit" => {
                    config.scratch_limit = parse_value(&arg, args.next())?;
                }
                _ => return Err(ConfigError::UnknownFlag(arg.clone())),
            }
        }

        Ok(config)
    }

    /// Session settings; `color_capable` is whether stderr is a terminal
    pub fn session_config(&self, color_capable: bool) -> SessionConfig {
        SessionConfig {
            max_retries: self.max_retries,
            scratch_limit: self.scratch_limit,
            memory_view: self.memory_view,
            color: color_capable && !self.no_color,
        }
    }

    /// Maximum log level for this run
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}

fn parse_value(flag: &str, value: Option<String>) -> Result<usize, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue {
        flag: flag.to_string(),
    })?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

/// Usage text for `--help` and command-line errors
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {} [options]\n\
         \n\
         Reads two integers, swaps them, and prints both orders.\n\
         \n\
         Options:\n\
         \x20 --memory-view          Show the stack frame bytes after each swap\n\
         \x20 --max-retries <N>      Give up after N invalid answers to one prompt\n\
         \x20 --scratch-limit <B>    Cap scratch buffer memory at B bytes (default {})\n\
         \x20 --no-color             Disable colored output\n\
         \x20 -v, --verbose          Log swap and session details to stderr\n\
         \x20 -h, --help             Show this help",
        program_name, DEFAULT_SCRATCH_LIMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments_gives_defaults() {
        assert_eq!(parse(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "--memory-view",
            "--max-retries",
            "3",
            "--scratch-limit",
            "16",
            "--no-color",
            "-v",
        ])
        .unwrap();

        assert!(config.memory_view);
        assert_eq!(config.max_retries, Some(3));
        assert_eq!(config.scratch_limit, 16);
        assert!(config.no_color);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            parse(&["--bogus"]),
            Err(ConfigError::UnknownFlag("--bogus".to_string()))
        );
        assert_eq!(
            parse(&["--max-retries"]),
            Err(ConfigError::MissingValue {
                flag: "--max-retries".to_string()
            })
        );
        assert_eq!(
            parse(&["--scratch-limit", "-1"]),
            Err(ConfigError::InvalidValue {
                flag: "--scratch-limit".to_string(),
                value: "-1".to_string()
            })
        );
    }

    #[test]
    fn test_color_needs_terminal_and_no_opt_out() {
        let config = Config::default();
        assert!(config.session_config(true).color);
        assert!(!config.session_config(false).color);

        let config = parse(&["--no-color"]).unwrap();
        assert!(!config.session_config(true).color);
    }
}
