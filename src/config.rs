use std::{path::PathBuf, time::Duration};

use crate::error::ConfigError;

/// How the initial generation is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    /// `col row` pairs read from a file.
    File(PathBuf),
    /// Random cells, reproducible when a seed is given.
    Random(Option<u64>),
    /// The 2x2 block near the top-left corner.
    Square,
    /// Cells typed in on stdin.
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: i32,
    pub cols: i32,
    pub tick_interval: Duration,
    pub view_refresh_interval: Duration,
    pub fill_rate: f64,
    pub seed: SeedSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            tick_interval: Duration::from_millis(50),
            view_refresh_interval: Duration::from_millis(100),
            fill_rate: 0.2,
            seed: SeedSource::Manual,
        }
    }
}

pub const USAGE: &str = "usage: life-grid [--rows N] [--cols N] [--tick MS] \
[--random [SEED]] [--fill RATE] [--square] [FILE]";

impl Config {
    /// Builds a configuration from command line arguments, program name
    /// excluded.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut path = None;
        let mut args = args.into_iter().peekable();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--rows" => config.rows = parse_value("--rows", args.next())?,
                "--cols" => config.cols = parse_value("--cols", args.next())?,
                "--tick" => {
                    let millis = parse_value("--tick", args.next())?;
                    config.tick_interval = Duration::from_millis(millis);
                }
                "--fill" => config.fill_rate = parse_value("--fill", args.next())?,
                "--random" => {
                    let seed = args.peek().and_then(|next| next.parse::<u64>().ok());
                    if seed.is_some() {
                        args.next();
                    }
                    config.seed = SeedSource::Random(seed);
                }
                "--square" => config.seed = SeedSource::Square,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()))
                }
                _ if path.is_some() => return Err(ConfigError::ExtraPath),
                _ => path = Some(PathBuf::from(arg)),
            }
        }

        // a file always wins over the other sources
        if let Some(path) = path {
            config.seed = SeedSource::File(path);
        }
        Ok(config)
    }
}

fn parse_value<T>(flag: &'static str, value: Option<String>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    let value = value.ok_or(ConfigError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { flag, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!((config.rows, config.cols), (100, 100));
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.seed, SeedSource::Manual);
    }

    #[test]
    fn test_flags() {
        let config = parse(&["--rows", "20", "--cols", "30", "--tick", "10", "--square"]).unwrap();
        assert_eq!((config.rows, config.cols), (20, 30));
        assert_eq!(config.tick_interval, Duration::from_millis(10));
        assert_eq!(config.seed, SeedSource::Square);
    }

    #[test]
    fn test_random_seed_optional() {
        assert_eq!(parse(&["--random"]).unwrap().seed, SeedSource::Random(None));
        assert_eq!(
            parse(&["--random", "42"]).unwrap().seed,
            SeedSource::Random(Some(42))
        );
        let config = parse(&["--random", "--fill", "0.5"]).unwrap();
        assert_eq!(config.seed, SeedSource::Random(None));
        assert_eq!(config.fill_rate, 0.5);
    }

    #[test]
    fn test_file_wins() {
        let config = parse(&["--random", "cells.txt"]).unwrap();
        assert_eq!(config.seed, SeedSource::File(PathBuf::from("cells.txt")));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse(&["--bogus"]),
            Err(ConfigError::UnknownFlag("--bogus".into()))
        );
        assert_eq!(parse(&["--rows"]), Err(ConfigError::MissingValue("--rows")));
        assert_eq!(
            parse(&["--tick", "fast"]),
            Err(ConfigError::InvalidValue {
                flag: "--tick",
                value: "fast".into()
            })
        );
        assert_eq!(parse(&["a.txt", "b.txt"]), Err(ConfigError::ExtraPath));
    }
}
