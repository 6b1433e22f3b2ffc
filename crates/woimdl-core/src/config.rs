use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default browser agent sent for regular page fetches.
const DEFAULT_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1; \
     Media Center PC 3.0; .NET CLR 1.0.3705; MediaCenter 5.1.2600.2180)";

/// Default agent for metadata-document fetches under the media path.
const DEFAULT_MEDIA_AGENT: &str = "Windows-Media-Player/10.00.00.3646";

/// Proxy endpoint (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

/// Global configuration loaded from `~/.config/woimdl/config.toml`.
///
/// Read once at startup and passed into the transport by value; nothing
/// mutates it during a resolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WoimConfig {
    /// User-Agent for album and track page fetches.
    pub user_agent: String,
    /// User-Agent for URLs under the site's media path.
    pub media_user_agent: String,
    /// Optional HTTP proxy for all fetches.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    /// Cache directory; relative `./cache` when unset.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Curl verbose output on stderr.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for WoimConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_AGENT.to_string(),
            media_user_agent: DEFAULT_MEDIA_AGENT.to_string(),
            proxy: None,
            cache_dir: None,
            verbose: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("woimdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WoimConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WoimConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WoimConfig = toml::from_str(&data)?;
    Ok(cfg)
}
