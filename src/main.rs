//! fetchcache - fetch JSON over HTTP with a disk-backed cache
//!
//! Resolves a request path against a base URL, serves the response from the
//! on-disk cache when it is still fresh, and prints the JSON to stdout.

use clap::Parser;
use std::process;

use fetchcache::cli::{Cli, RunConfig};
use fetchcache::fetcher::CachedFetcher;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match RunConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let mut fetcher = CachedFetcher::new(&config.base_url, &config.cache_dir);
    if let Some(seconds) = config.max_age {
        fetcher = fetcher.with_max_age(seconds);
    }

    match fetcher
        .fetch(&config.path, &config.folder, Some(config.options))
        .await
    {
        Ok(value) => {
            let output = if config.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };
            match output {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: failed to serialize output: {}", e);
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
