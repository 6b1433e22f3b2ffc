//! Two-stage page resolution.
//!
//! A track page embeds a player whose parameters point at an intermediate
//! metadata document; that document carries the final, time-limited media
//! URL. The resolvers drive both fetches through the cache-first
//! [`Fetcher`](crate::fetch::Fetcher) and write back synthetic documents
//! shaped so the same extraction patterns parse them on the next run,
//! skipping the network entirely while the embedded auth token is fresh.

mod album;
mod patterns;
mod track;

#[cfg(test)]
pub(crate) mod testutil;

pub use album::resolve_album;
pub use track::resolve_track;

pub(crate) const SITE: &str = "http://www.woim.net";

pub fn track_page_url(id: &str) -> String {
    format!("{SITE}/song/{id}/index.html")
}

pub fn album_page_url(id: &str) -> String {
    format!("{SITE}/album/{id}/index.html")
}

/// One resolved (or unresolved) track.
///
/// `media_url`, once set, is never downgraded back to `None` within a
/// resolution call; a failed metadata fetch leaves the track unresolved
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: Option<String>,
    pub media_url: Option<String>,
}

/// A resolved album: tracks appear in page order, duplicates preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub tracks: Vec<Track>,
}
