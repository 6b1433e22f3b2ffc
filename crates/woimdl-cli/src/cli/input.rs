//! Target parsing: album/song ids pasted as bare numbers, page URLs, or
//! `album_<id>`/`song_<id>` specs, plus inline `proxy=host:port`.

use regex::Regex;
use woimdl_core::config::ProxyConfig;

/// One parsed command-line target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Album(String),
    Song(String),
    Proxy(ProxyCandidate),
}

/// Proxy spec before it is applied to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyCandidate {
    pub host: String,
    pub port: u16,
}

impl From<ProxyCandidate> for ProxyConfig {
    fn from(p: ProxyCandidate) -> Self {
        ProxyConfig {
            host: p.host,
            port: p.port,
        }
    }
}

/// Parses one target argument; `None` means unrecognized (caller logs and
/// skips it). Bare integers are album ids, matching the original tool.
pub fn parse_target(arg: &str) -> Option<Target> {
    let album = Regex::new(r"album[/_]([0-9]+)").unwrap();
    let song = Regex::new(r"song[/_]([0-9]+)").unwrap();
    let bare = Regex::new(r"^([0-9]+)$").unwrap();
    let proxy = Regex::new(r"^proxy=(.+):([0-9]+)$").unwrap();

    if let Some(c) = album.captures(arg).or_else(|| bare.captures(arg)) {
        return Some(Target::Album(c[1].to_string()));
    }
    if let Some(c) = song.captures(arg) {
        return Some(Target::Song(c[1].to_string()));
    }
    if let Some(c) = proxy.captures(arg) {
        let port: u16 = c[2].parse().ok()?;
        return Some(Target::Proxy(ProxyCandidate {
            host: c[1].to_string(),
            port,
        }));
    }
    None
}

/// Parses a `host:port` value from the `--proxy` flag.
pub fn parse_proxy_flag(value: &str) -> Option<ProxyCandidate> {
    let (host, port) = value.rsplit_once(':')?;
    let port: u16 = port.parse().ok()?;
    if host.is_empty() {
        return None;
    }
    Some(ProxyCandidate {
        host: host.to_string(),
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_forms() {
        assert_eq!(
            parse_target("http://www.woim.net/album/4321/index.html"),
            Some(Target::Album("4321".into()))
        );
        assert_eq!(parse_target("album_4321"), Some(Target::Album("4321".into())));
        assert_eq!(parse_target("4321"), Some(Target::Album("4321".into())));
    }

    #[test]
    fn song_forms() {
        assert_eq!(
            parse_target("http://www.woim.net/song/39144/awakening.html"),
            Some(Target::Song("39144".into()))
        );
        assert_eq!(parse_target("song_39144"), Some(Target::Song("39144".into())));
    }

    #[test]
    fn proxy_form() {
        assert_eq!(
            parse_target("proxy=localhost:3128"),
            Some(Target::Proxy(ProxyCandidate {
                host: "localhost".into(),
                port: 3128
            }))
        );
        assert!(parse_target("proxy=localhost").is_none());
        assert!(parse_target("proxy=host:notaport").is_none());
    }

    #[test]
    fn unrecognized() {
        assert!(parse_target("what-is-this").is_none());
        assert!(parse_target("http://example.com/other/1").is_none());
    }

    #[test]
    fn proxy_flag_parsing() {
        let p = parse_proxy_flag("10.0.0.1:8080").unwrap();
        assert_eq!(p.host, "10.0.0.1");
        assert_eq!(p.port, 8080);
        assert!(parse_proxy_flag("nohost").is_none());
        assert!(parse_proxy_flag(":8080").is_none());
    }
}
