//! Anchored extraction patterns for the two known page layouts, and the
//! synthetic documents the resolvers write back.
//!
//! The pages are narrow, machine-generated fragments; lightweight regex
//! matching against them is deliberate, a full HTML parser buys nothing
//! here. The one invariant that matters: every synthesized document must be
//! parseable by the same patterns that parse the live page.

use regex::Regex;

use super::{Album, SITE};

/// Which embed the track page carries; decides the final-URL pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Flash embed: `<param name="flashvars" ... code=<url>">`.
    Flash,
    /// Media-player embed: `<param name="FileName" value="<url>">`.
    MediaPlayer,
}

/// Embed match: the layout found and the metadata-document URL it points at.
#[derive(Debug, Clone)]
pub(crate) struct Embed {
    pub layout: Layout,
    pub meta_url: String,
}

/// Tries the two mutually exclusive embed layouts, flash first.
pub(crate) fn match_embed(body: &str) -> Option<Embed> {
    let flash =
        Regex::new(r#"(?i)<param name="flashvars".*?code=(http://www\.woim\.net/music/[^"]+)">"#)
            .unwrap();
    if let Some(c) = flash.captures(body) {
        return Some(Embed {
            layout: Layout::Flash,
            meta_url: c[1].to_string(),
        });
    }

    let player = Regex::new(
        r#"(?i)<param name="FileName" value="(http://www\.woim\.net/music/[^"]+)">"#,
    )
    .unwrap();
    player.captures(body).map(|c| Embed {
        layout: Layout::MediaPlayer,
        meta_url: c[1].to_string(),
    })
}

/// Human-readable title from the numbered anchor pointing at this track's
/// page. Leading track numbers are stripped.
pub(crate) fn match_title(body: &str, id: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r"(?i)/song/{}/.*>[0-9 ]*(.*?)</a>",
        regex::escape(id)
    ))
    .unwrap();
    re.captures(body)
        .map(|c| c[1].to_string())
        .filter(|t| !t.is_empty())
}

/// Final media URL from the metadata document, by layout.
pub(crate) fn match_media_url(meta_doc: &str, layout: Layout) -> Option<String> {
    let re = match layout {
        Layout::Flash => Regex::new(r#"(?i)location="(.*?)">"#).unwrap(),
        Layout::MediaPlayer => Regex::new(r#"(?i)<ref href="(.*?)" />"#).unwrap(),
    };
    re.captures(meta_doc)
        .map(|c| c[1].to_string())
        .filter(|u| !u.is_empty())
}

/// Album title and artist from the album-info block. Tolerates intervening
/// markup between the title heading and the artist anchor.
pub(crate) fn match_album_info(body: &str) -> Option<(String, String)> {
    let re = Regex::new(
        r#"(?is)class="album_info">.*?Album:.*?<h1>(.*?)</h1>.*?<tr>.*?</tr>.*?<tr>.*?href=.*?>(.*?)</a>.*?</tr>"#,
    )
    .unwrap();
    re.captures(body)
        .map(|c| (c[1].to_string(), c[2].to_string()))
}

/// Ordered `(track id, title)` pairs from every numbered row whose link
/// target is a song page. Document order, duplicates kept.
pub(crate) fn match_track_rows(body: &str) -> Vec<(String, String)> {
    let re = Regex::new(
        r#"(?is)<td>[0-9]+.*?href="http://www\.woim\.net/song/([0-9]+)/.*?>[0-9 ]*(.*?)</a>"#,
    )
    .unwrap();
    re.captures_iter(body)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// Minimal track document carrying both the metadata pointer and the final
/// location in the flash-layout shape, so a later run parses it with
/// [`match_embed`] and reuses it as its own metadata document.
pub(crate) fn synth_track_doc(
    meta_url: &str,
    media_url: &str,
    id: &str,
    title: Option<&str>,
) -> String {
    let title = title.unwrap_or(id);
    format!(
        "<param name=\"flashvars\" code={meta_url}\">\nlocation=\"{media_url}\">\n/song/{id}/>{title}</a>\n"
    )
}

/// Minimal album document reproducing the info block and one row per track,
/// re-parseable by [`match_album_info`] and [`match_track_rows`].
pub(crate) fn synth_album_doc(album: &Album) -> String {
    let mut doc = String::new();
    doc.push_str("class=\"album_info\">\n");
    doc.push_str(&format!(
        "Album: <h1>{}</h1>\n",
        album.title.as_deref().unwrap_or("")
    ));
    doc.push_str("<tr></tr>\n");
    doc.push_str(&format!(
        "<tr>Artist: href=>{}</a></tr>\n",
        album.artist.as_deref().unwrap_or("")
    ));
    for track in &album.tracks {
        doc.push_str(&format!(
            "<td>0. href=\"{SITE}/song/{}/\">{}</a>\n",
            track.id,
            track.title.as_deref().unwrap_or(&track.id)
        ));
    }
    doc
}
