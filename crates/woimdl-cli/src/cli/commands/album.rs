//! Resolve an album and print its listing plus one download line per track.

use anyhow::Result;
use woimdl_core::fetch::{Fetcher, Transport};
use woimdl_core::resolver;

use crate::cli::render::{track_line, OutputStyle};

pub fn run_album<T: Transport>(
    fetcher: &Fetcher<T>,
    id: &str,
    style: OutputStyle,
    media_agent: &str,
) -> Result<()> {
    let album = resolver::resolve_album(fetcher, id)?;

    println!("Album:  {}", album.title.as_deref().unwrap_or("(unknown)"));
    println!("Artist: {}", album.artist.as_deref().unwrap_or("(unknown)"));
    for track in &album.tracks {
        println!("* {}", track.title.as_deref().unwrap_or(&track.id));
    }

    for track in &album.tracks {
        match track_line(track, style, media_agent) {
            Some(line) => println!("{line}"),
            None => tracing::warn!("track {} unresolved, skipped", track.id),
        }
    }

    Ok(())
}
