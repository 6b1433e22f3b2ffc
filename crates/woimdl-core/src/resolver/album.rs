//! Album resolution: info block, ordered track rows, per-track resolution,
//! and synthetic cache write-back.

use anyhow::Result;

use crate::fetch::{Fetcher, Transport};

use super::patterns;
use super::{album_page_url, resolve_track, Album, Track};

/// Resolves an album id to its title, artist, and ordered track list.
///
/// Tracks are resolved strictly sequentially, in the order they appear on
/// the page; duplicate rows stay duplicated. A row's own title takes
/// precedence over whatever the track page yields. Missing album info is
/// non-fatal; only cache-write failures are errors.
pub fn resolve_album<T: Transport>(fetcher: &Fetcher<T>, id: &str) -> Result<Album> {
    let cache_key = format!("album_{id}");
    let page = fetcher.fetch(&album_page_url(id), Some(&cache_key));

    let (title, artist) = match patterns::match_album_info(&page.content) {
        Some((title, artist)) => {
            tracing::info!("album found: {title} (performed by {artist})");
            (Some(title), Some(artist))
        }
        None => (None, None),
    };

    let rows = patterns::match_track_rows(&page.content);
    tracing::info!("{} song(s) found", rows.len());

    let mut tracks = Vec::with_capacity(rows.len());
    for (track_id, row_title) in rows {
        let resolved = resolve_track(fetcher, &track_id)?;
        let title = if row_title.is_empty() {
            resolved.title
        } else {
            Some(row_title)
        };
        tracks.push(Track {
            id: track_id,
            title,
            media_url: resolved.media_url,
        });
    }

    let album = Album {
        id: id.to_string(),
        title,
        artist,
        tracks,
    };

    // A failed fetch leaves nothing worth persisting.
    if !page.from_cache && !page.content.is_empty() {
        fetcher
            .cache()
            .write(&cache_key, &patterns::synth_album_doc(&album))?;
    }

    Ok(album)
}
