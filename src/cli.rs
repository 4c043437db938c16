//! Command-line interface parsing for fetchcache
//!
//! This module handles parsing of CLI arguments using clap and derives the
//! runtime configuration: base URL, cache directory (defaulting to the XDG
//! cache path), freshness window, and request options.

use clap::Parser;
use directories::ProjectDirs;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetcher::RequestOptions;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A --header value was not in `name:value` form or not a valid header
    #[error("Invalid header '{0}'. Headers must be in 'name:value' form")]
    InvalidHeader(String),

    /// The --method value is not a valid HTTP method
    #[error("Invalid HTTP method: '{0}'")]
    InvalidMethod(String),

    /// No --cache-dir was given and no XDG cache directory could be determined
    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,
}

/// fetchcache - fetch JSON over HTTP with a disk-backed cache
#[derive(Parser, Debug)]
#[command(name = "fetchcache")]
#[command(about = "Fetch JSON resources over HTTP, caching responses on disk")]
#[command(version)]
pub struct Cli {
    /// Request path, appended to the base URL and used as the cache identity
    pub path: String,

    /// Base URL the request path is resolved against
    #[arg(long, value_name = "URL")]
    pub base_url: String,

    /// Directory to store cache entries in (defaults to the XDG cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Sub-folder under the cache directory to namespace entries
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub folder: String,

    /// Maximum cache entry age in seconds; omit to cache forever
    #[arg(long, value_name = "SECONDS")]
    pub max_age: Option<u64>,

    /// HTTP method to use for the request
    #[arg(long, value_name = "METHOD", default_value = "GET")]
    pub method: String,

    /// Extra request header in 'name:value' form (repeatable)
    #[arg(long, value_name = "NAME:VALUE")]
    pub header: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Configuration derived from CLI arguments for a single fetch
#[derive(Debug)]
pub struct RunConfig {
    /// Base URL the request path is resolved against
    pub base_url: String,
    /// Resolved cache directory
    pub cache_dir: PathBuf,
    /// Sub-folder namespacing the cache entry
    pub folder: String,
    /// Request path (also the cache identity)
    pub path: String,
    /// Optional freshness window in seconds
    pub max_age: Option<u64>,
    /// Method and headers for the network call
    pub options: RequestOptions,
    /// Whether to pretty-print output
    pub pretty: bool,
}

/// Returns the XDG-compliant default cache directory
///
/// `~/.cache/fetchcache/` on Linux, or the platform equivalent. `None` when
/// no home directory can be determined.
pub fn default_cache_dir() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "fetchcache")?;
    Some(project_dirs.cache_dir().to_path_buf())
}

/// Parses a repeatable `name:value` header argument
pub fn parse_header_arg(s: &str) -> Result<(HeaderName, HeaderValue), CliError> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| CliError::InvalidHeader(s.to_string()))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| CliError::InvalidHeader(s.to_string()))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|_| CliError::InvalidHeader(s.to_string()))?;
    Ok((name, value))
}

/// Parses the --method argument into an HTTP method
pub fn parse_method_arg(s: &str) -> Result<Method, CliError> {
    Method::from_bytes(s.to_uppercase().as_bytes())
        .map_err(|_| CliError::InvalidMethod(s.to_string()))
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with the cache directory resolved and request
    ///   options built
    /// * `Err(CliError)` if a header or method is invalid, or no cache
    ///   directory is available
    pub fn from_cli(cli: Cli) -> Result<Self, CliError> {
        let cache_dir = cli
            .cache_dir
            .or_else(default_cache_dir)
            .ok_or(CliError::NoCacheDir)?;

        let mut headers = HeaderMap::new();
        for raw in &cli.header {
            let (name, value) = parse_header_arg(raw)?;
            headers.insert(name, value);
        }

        let options = RequestOptions {
            method: parse_method_arg(&cli.method)?,
            headers,
        };

        Ok(RunConfig {
            base_url: cli.base_url,
            cache_dir,
            folder: cli.folder,
            path: cli.path,
            max_age: cli.max_age,
            options,
            pretty: cli.pretty,
        })
    }
}
