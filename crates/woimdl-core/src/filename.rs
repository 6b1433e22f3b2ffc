//! Filesystem-safe filenames for downloaded tracks.

/// Sanitizes a track or album title for use in a filename: lowercase, with
/// everything outside `[0-9a-z._-]` replaced by `_`.
pub fn sanitize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}

/// Output filename for a track: `<id>-<sanitized title>.mp3`, or `<id>.mp3`
/// when no title was resolved.
pub fn track_filename(id: &str, title: Option<&str>) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{id}-{}.mp3", sanitize_title(t)),
        _ => format!("{id}.mp3"),
    }
}
