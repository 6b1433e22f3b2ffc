//! Expiring-link token codec.
//!
//! Media URLs on the site carry an `auth` query parameter: the file basename
//! and a Unix expiry timestamp, comma-joined and base64-encoded twice. The
//! codec recovers that pair so a cached page can be judged fresh or stale
//! without touching the network.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, STANDARD};
use base64::engine::{DecodePaddingMode, Engine, GeneralPurposeConfig};
use regex::Regex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Tokens seen in the wild are not always padded; accept either form.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded `auth` token: target file basename and link expiry (Unix seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub basename: String,
    pub expiry: u64,
}

/// Decodes the `auth` token embedded in `url`.
///
/// Returns `None` when the parameter is absent, either base64 stage fails,
/// or the decoded record is malformed (fewer than two comma-separated fields
/// or a non-numeric timestamp). Pure function of the input string.
pub fn decode(url: &str) -> Option<AuthToken> {
    let re = Regex::new(r"(?i)auth=([A-Za-z0-9+/=]+)").unwrap();
    let raw = re.captures(url)?.get(1)?.as_str();

    let once = LENIENT.decode(raw).ok()?;
    let twice = LENIENT.decode(&once).ok()?;
    let record = String::from_utf8(twice).ok()?;

    let mut fields = record.split(',');
    let path = fields.next()?;
    let expiry: u64 = fields.next()?.trim().parse().ok()?;

    let basename = path.rsplit('/').next().unwrap_or(path).to_string();
    Some(AuthToken { basename, expiry })
}

/// Encodes a `(basename, expiry)` pair into the token shape `decode` accepts.
pub fn encode(basename: &str, expiry: u64) -> String {
    let record = format!("{basename},{expiry}");
    STANDARD.encode(STANDARD.encode(record))
}

/// True if the link in `url` is still usable at time `now`.
///
/// Expiry exactly equal to `now` counts as expired. A URL without a decodable
/// token is assumed usable for the current fetch window (the site only signs
/// media links; unsigned links do not expire).
pub fn is_fresh(url: &str, now: u64) -> bool {
    match decode(url) {
        Some(token) => token.expiry > now,
        None => true,
    }
}

/// Current Unix time in seconds.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let token = encode("awakening.mp3", 1_234_567_890);
        let url = format!("http://www.woim.net/music/play?auth={token}");
        let decoded = decode(&url).unwrap();
        assert_eq!(decoded.basename, "awakening.mp3");
        assert_eq!(decoded.expiry, 1_234_567_890);
    }

    #[test]
    fn decode_takes_basename_of_path() {
        let token = encode("mp3/2009/awakening.mp3", 99);
        let url = format!("http://host/x?auth={token}");
        assert_eq!(decode(&url).unwrap().basename, "awakening.mp3");
    }

    #[test]
    fn decode_missing_param() {
        assert!(decode("http://www.woim.net/song/39144/index.html").is_none());
    }

    #[test]
    fn decode_malformed_base64() {
        assert!(decode("http://host/x?auth=!!!not-base64").is_none());
        // Valid base64 but only a single encoding stage deep.
        let single = STANDARD.encode("file.mp3,123");
        assert!(decode(&format!("http://host/x?auth={single}")).is_none());
    }

    #[test]
    fn decode_malformed_record() {
        // No comma-separated timestamp field.
        let token = STANDARD.encode(STANDARD.encode("just-a-name"));
        assert!(decode(&format!("http://host/x?auth={token}")).is_none());
        // Non-numeric timestamp.
        let token = STANDARD.encode(STANDARD.encode("file.mp3,soon"));
        assert!(decode(&format!("http://host/x?auth={token}")).is_none());
    }

    #[test]
    fn freshness_is_strict() {
        let url = format!("http://host/x?auth={}", encode("f.mp3", 1000));
        assert!(is_fresh(&url, 999));
        assert!(!is_fresh(&url, 1000), "expiry == now must count as expired");
        assert!(!is_fresh(&url, 1001));
    }

    #[test]
    fn freshness_defaults_to_usable_without_token() {
        assert!(is_fresh("http://host/plain.mp3", now_unix()));
        assert!(is_fresh("http://host/x?auth=***garbage***", now_unix()));
    }
}
