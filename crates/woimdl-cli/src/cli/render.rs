//! Shell command rendering for resolved media URLs.

use woimdl_core::filename;
use woimdl_core::resolver::Track;

/// How resolved URLs are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Bare media URLs, one per line.
    Plain,
    /// `wget -c` command lines.
    Wget,
    /// `aria2c` command lines.
    Aria2c,
}

pub fn wget_command(url: &str, output: &str, agent: &str) -> String {
    format!("wget -c -O \"{output}\" -U \"{agent}\" \"{url}\"")
}

pub fn aria2c_command(url: &str, agent: &str) -> String {
    format!("aria2c --header 'User-Agent: {agent}' \"{url}\"")
}

/// Renders one track into its output line, or `None` when unresolved.
pub fn track_line(track: &Track, style: OutputStyle, agent: &str) -> Option<String> {
    let url = track.media_url.as_deref().filter(|u| !u.is_empty())?;
    let output = filename::track_filename(&track.id, track.title.as_deref());
    Some(match style {
        OutputStyle::Plain => url.to_string(),
        OutputStyle::Wget => wget_command(url, &output, agent),
        OutputStyle::Aria2c => aria2c_command(url, agent),
    })
}
