use crate::models::pagination::{InvalidPageSize, PageSize};
use crate::models::sort::{SortKey, UnknownSortKey};
use crate::services::source::DEFAULT_SOURCE_URL;
use thiserror::Error;

pub const DEFAULT_PORT: &str = "7004";

pub const USAGE: &str =
    "Usage: book-browser [--print [--page N] [--page-size 10|50|100] [--descending]]";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    SortKey(#[from] UnknownSortKey),
    #[error(transparent)]
    PageSize(#[from] InvalidPageSize),
    #[error("Invalid number for {name}: {value}")]
    Number { name: String, value: String },
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

/// Startup settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: String,
    pub source_url: String,
    pub sort_key: SortKey,
    pub page_size: PageSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            sort_key: SortKey::default(),
            page_size: PageSize::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sort_key = match lookup("BOOKS_SORT_KEY") {
            Some(raw) => raw.parse()?,
            None => defaults.sort_key,
        };
        let page_size = match lookup("BOOKS_PAGE_SIZE") {
            Some(raw) => PageSize::try_from(parse_number::<u32>("BOOKS_PAGE_SIZE", &raw)?)?,
            None => defaults.page_size,
        };

        Ok(Self {
            port: lookup("PORT").unwrap_or(defaults.port),
            source_url: lookup("BOOKS_SOURCE_URL").unwrap_or(defaults.source_url),
            sort_key,
            page_size,
        })
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Options of the one-shot `--print` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintOptions {
    pub page: Option<usize>,
    pub page_size: Option<PageSize>,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Serve,
    Print(PrintOptions),
}

impl Mode {
    /// Parses the arguments following the program name.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let Some(first) = args.first() else {
            return Ok(Mode::Serve);
        };
        if first != "--print" {
            return Err(ConfigError::UnknownArgument(first.clone()));
        }

        let mut options = PrintOptions::default();
        let mut rest = args[1..].iter();
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--descending" => options.descending = true,
                "--page" => {
                    let value = rest
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    options.page = Some(parse_number("--page", value)?);
                }
                "--page-size" => {
                    let value = rest
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    options.page_size =
                        Some(PageSize::try_from(parse_number::<u32>("--page-size", value)?)?);
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(Mode::Print(options))
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Number {
        name: name.to_string(),
        value: value.to_string(),
    })
}
