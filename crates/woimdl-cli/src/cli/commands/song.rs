//! Resolve a single track and print its download line.

use anyhow::Result;
use woimdl_core::fetch::{Fetcher, Transport};
use woimdl_core::resolver;

use crate::cli::render::{track_line, OutputStyle};

pub fn run_song<T: Transport>(
    fetcher: &Fetcher<T>,
    id: &str,
    style: OutputStyle,
    media_agent: &str,
) -> Result<()> {
    let track = resolver::resolve_track(fetcher, id)?;
    match track_line(&track, style, media_agent) {
        Some(line) => println!("{line}"),
        None => tracing::warn!("track {id} unresolved"),
    }
    Ok(())
}
