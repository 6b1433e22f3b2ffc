//! CLI for the woimdl album/track fetcher.

mod commands;
mod input;
mod render;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use woimdl_core::cache::CacheStore;
use woimdl_core::config;
use woimdl_core::fetch::{Fetcher, HttpTransport};

use commands::{run_album, run_song};
use input::Target;
use render::OutputStyle;

/// Default cache location, relative to the working directory.
const DEFAULT_CACHE_DIR: &str = "./cache";

/// Resolve woim.net albums and tracks to direct media URLs and emit
/// download commands.
#[derive(Debug, Parser)]
#[command(name = "woimdl")]
#[command(about = "woimdl: resolve woim.net albums/tracks into download commands", long_about = None)]
pub struct Cli {
    /// Album/song ids, page URLs, or `proxy=host:port`; mixed freely.
    #[arg(required = true, value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Emit wget command lines instead of bare URLs.
    #[arg(long)]
    pub wget: bool,

    /// Emit aria2c command lines instead of bare URLs.
    #[arg(long, conflicts_with = "wget")]
    pub aria: bool,

    /// Route fetches through an HTTP proxy.
    #[arg(long, value_name = "HOST:PORT")]
    pub proxy: Option<String>,

    /// Verbose curl output on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let mut albums: Vec<String> = Vec::new();
    let mut songs: Vec<String> = Vec::new();
    for arg in &cli.targets {
        match input::parse_target(arg) {
            Some(Target::Album(id)) => albums.push(id),
            Some(Target::Song(id)) => songs.push(id),
            Some(Target::Proxy(p)) => cfg.proxy = Some(p.into()),
            None => tracing::warn!("failed to parse target: {arg}"),
        }
    }

    if let Some(value) = &cli.proxy {
        match input::parse_proxy_flag(value) {
            Some(p) => cfg.proxy = Some(p.into()),
            None => bail!("invalid --proxy value '{value}', expected HOST:PORT"),
        }
    }
    if let Some(proxy) = &cfg.proxy {
        tracing::info!("fetching via proxy {}:{}", proxy.host, proxy.port);
    }
    cfg.verbose |= cli.verbose;

    let style = if cli.wget {
        OutputStyle::Wget
    } else if cli.aria {
        OutputStyle::Aria2c
    } else {
        OutputStyle::Plain
    };

    let cache_dir = cfg
        .cache_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));
    let media_agent = cfg.media_user_agent.clone();
    let fetcher = Fetcher::new(HttpTransport::new(cfg), CacheStore::new(cache_dir));

    for id in &albums {
        run_album(&fetcher, id, style, &media_agent)?;
    }
    for id in &songs {
        run_song(&fetcher, id, style, &media_agent)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_targets_and_flags() {
        let cli = Cli::try_parse_from([
            "woimdl",
            "--wget",
            "4321",
            "song_39144",
            "proxy=localhost:3128",
        ])
        .unwrap();
        assert!(cli.wget);
        assert!(!cli.aria);
        assert_eq!(cli.targets.len(), 3);
    }

    #[test]
    fn wget_and_aria_conflict() {
        assert!(Cli::try_parse_from(["woimdl", "--wget", "--aria", "4321"]).is_err());
    }

    #[test]
    fn requires_at_least_one_target() {
        assert!(Cli::try_parse_from(["woimdl"]).is_err());
    }

    #[test]
    fn proxy_flag_is_captured() {
        let cli = Cli::try_parse_from(["woimdl", "--proxy", "10.0.0.1:8080", "4321"]).unwrap();
        assert_eq!(cli.proxy.as_deref(), Some("10.0.0.1:8080"));
    }
}
