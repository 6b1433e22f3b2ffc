//! Cache-first text fetching.
//!
//! Uses the curl crate (libcurl) for the network side. Transport errors are
//! never surfaced to resolvers: a failed fetch is an empty body, and the
//! resolver patterns simply fail to match. The fetcher never writes the
//! cache; resolvers persist synthesized documents, not raw bodies.

use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::WoimConfig;

/// Result of a fetch: the document text and where it came from.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub content: String,
    /// False whenever the network was consulted, including failed fetches.
    pub from_cache: bool,
}

/// Network side of the fetcher. The seam exists so resolvers can be driven
/// from canned pages in tests.
pub trait Transport {
    /// Body of an HTTP GET against `url`; empty string on any transport error.
    fn get(&self, url: &str) -> String;
}

/// Real transport over libcurl, configured once at construction.
pub struct HttpTransport {
    cfg: WoimConfig,
}

impl HttpTransport {
    pub fn new(cfg: WoimConfig) -> Self {
        Self { cfg }
    }

    /// Agent selection is a pure function of the URL: media-resource paths
    /// get the media-player agent, everything else the browser agent.
    fn agent_for(&self, url: &str) -> &str {
        let is_media = url::Url::parse(url)
            .map(|u| u.path().starts_with("/music/"))
            .unwrap_or(false);
        if is_media {
            &self.cfg.media_user_agent
        } else {
            &self.cfg.user_agent
        }
    }

    fn perform(&self, url: &str) -> Result<String, curl::Error> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(60))?;
        easy.useragent(self.agent_for(url))?;
        easy.verbose(self.cfg.verbose)?;
        if let Some(proxy) = &self.cfg.proxy {
            easy.proxy(&proxy.host)?;
            easy.proxy_port(proxy.port)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> String {
        tracing::info!("fetching {url}");
        match self.perform(url) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("fetch failed for {url}: {e}");
                String::new()
            }
        }
    }
}

/// Cache-first fetcher: a transport plus the cache store resolvers write to.
pub struct Fetcher<T> {
    transport: T,
    cache: CacheStore,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, cache: CacheStore) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Fetch `url`, preferring the cached document under `cache_key` when one
    /// is present. No network call is made on a cache hit.
    pub fn fetch(&self, url: &str, cache_key: Option<&str>) -> FetchResult {
        if let Some(key) = cache_key {
            if let Some(content) = self.cache.read(key) {
                return FetchResult {
                    content,
                    from_cache: true,
                };
            }
        }
        FetchResult {
            content: self.transport.get(url),
            from_cache: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Canned transport that records every URL it was asked for.
    struct StubTransport {
        body: String,
        calls: RefCell<Vec<String>>,
    }

    impl StubTransport {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        fn get(&self, url: &str) -> String {
            self.calls.borrow_mut().push(url.to_string());
            self.body.clone()
        }
    }

    fn fetcher_in(dir: &std::path::Path, body: &str) -> Fetcher<StubTransport> {
        Fetcher::new(StubTransport::new(body), CacheStore::new(dir))
    }

    #[test]
    fn cache_hit_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let f = fetcher_in(dir.path(), "net body");
        f.cache().write("track_1", "cached body").unwrap();

        let r = f.fetch("http://host/song/1/index.html", Some("track_1"));
        assert!(r.from_cache);
        assert_eq!(r.content, "cached body");
        assert!(f.transport.calls.borrow().is_empty());
    }

    #[test]
    fn cache_miss_hits_network() {
        let dir = tempfile::tempdir().unwrap();
        let f = fetcher_in(dir.path(), "net body");

        let r = f.fetch("http://host/song/1/index.html", Some("track_1"));
        assert!(!r.from_cache);
        assert_eq!(r.content, "net body");
        assert_eq!(f.transport.calls.borrow().len(), 1);
        // The fetcher itself never populates the cache.
        assert!(!f.cache().exists("track_1"));
    }

    #[test]
    fn no_key_always_hits_network() {
        let dir = tempfile::tempdir().unwrap();
        let f = fetcher_in(dir.path(), "meta doc");
        f.cache().write("track_1", "cached body").unwrap();

        let r = f.fetch("http://host/music/meta?auth=x", None);
        assert!(!r.from_cache);
        assert_eq!(r.content, "meta doc");
    }

    #[test]
    fn failed_fetch_is_empty_not_cached_flag() {
        let dir = tempfile::tempdir().unwrap();
        let f = fetcher_in(dir.path(), "");
        let r = f.fetch("http://host/song/2/index.html", Some("track_2"));
        assert!(!r.from_cache);
        assert!(r.content.is_empty());
    }

    #[test]
    fn media_path_selects_media_agent() {
        let mut cfg = WoimConfig::default();
        cfg.user_agent = "browser".into();
        cfg.media_user_agent = "player".into();
        let t = HttpTransport::new(cfg);
        assert_eq!(t.agent_for("http://www.woim.net/music/abc?auth=x"), "player");
        assert_eq!(t.agent_for("http://www.woim.net/song/1/index.html"), "browser");
        assert_eq!(t.agent_for("not a url"), "browser");
    }
}
