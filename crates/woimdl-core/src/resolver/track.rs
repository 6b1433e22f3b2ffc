//! Track resolution: page fetch, embed extraction, freshness check,
//! metadata-document fetch, and synthetic cache write-back.

use anyhow::Result;

use crate::fetch::{Fetcher, Transport};
use crate::token;

use super::patterns;
use super::{track_page_url, Track};

/// Resolves one track id to its direct media URL.
///
/// Two fetches in the worst case: the track page, then the metadata document
/// it points at. A cached page whose embedded auth token has not expired is
/// reused as its own metadata document, costing zero fetches. On success the
/// synthesized document written under `track_<id>` puts the next run on that
/// zero-fetch path.
///
/// Unrecognized layouts and expired-and-unfetchable metadata leave the track
/// unresolved (`media_url = None`); only cache-write failures are errors.
pub fn resolve_track<T: Transport>(fetcher: &Fetcher<T>, id: &str) -> Result<Track> {
    let cache_key = format!("track_{id}");
    let page = fetcher.fetch(&track_page_url(id), Some(&cache_key));

    let Some(embed) = patterns::match_embed(&page.content) else {
        if !page.content.is_empty() {
            tracing::warn!("track {id}: page layout unrecognized");
        }
        return Ok(Track {
            id: id.to_string(),
            title: None,
            media_url: None,
        });
    };

    let title = patterns::match_title(&page.content, id);

    let fresh = token::is_fresh(&embed.meta_url, token::now_unix());
    if page.from_cache && !fresh {
        tracing::info!("track {id}: cached link expired, fetching new version");
    }

    // A cached page with a still-valid token already contains the final
    // location; otherwise the metadata document must be fetched anew.
    let meta_doc = if page.from_cache && fresh {
        page.content.clone()
    } else {
        fetcher.fetch(&embed.meta_url, None).content
    };

    let media_url = patterns::match_media_url(&meta_doc, embed.layout);

    if let Some(url) = &media_url {
        if !page.from_cache || !fresh {
            let doc = patterns::synth_track_doc(&embed.meta_url, url, id, title.as_deref());
            fetcher.cache().write(&cache_key, &doc)?;
        }
    }

    Ok(Track {
        id: id.to_string(),
        title,
        media_url,
    })
}
