//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Url;

use crate::error::{Error, Result};
use crate::relay::{AccessKey, DEFAULT_RELAY_URL};

pub const ACCESS_KEY_VAR: &str = "WEB3FORMS_ACCESS_KEY";
pub const RELAY_URL_VAR: &str = "RELAY_URL";
pub const SITE_ROOT_VAR: &str = "SITE_ROOT";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_SITE_ROOT: &str = ".";

/// Immutable settings shared by every request.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub site_root: PathBuf,
    pub relay_url: Url,
    /// `None` when unset or blank. Submissions then report
    /// `missing_access_key` instead of failing startup.
    pub access_key: Option<AccessKey>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = var(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_raw.trim().parse::<SocketAddr>().map_err(|e| Error::Config {
            key: BIND_ADDR_VAR,
            reason: format!("{bind_raw:?}: {e}"),
        })?;

        let relay_raw = var(RELAY_URL_VAR).unwrap_or_else(|| DEFAULT_RELAY_URL.to_owned());
        let relay_url = Url::parse(relay_raw.trim()).map_err(|e| Error::Config {
            key: RELAY_URL_VAR,
            reason: format!("{relay_raw:?}: {e}"),
        })?;

        Ok(Self {
            bind_addr,
            site_root: var(SITE_ROOT_VAR).map_or_else(|| PathBuf::from(DEFAULT_SITE_ROOT), PathBuf::from),
            relay_url,
            access_key: var(ACCESS_KEY_VAR).as_deref().and_then(AccessKey::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(cfg.site_root, PathBuf::from("."));
        assert_eq!(cfg.relay_url.as_str(), "https://api.web3forms.com/submit");
        assert!(cfg.access_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("SITE_ROOT", "/srv/site"),
            ("RELAY_URL", "http://localhost:9000/submit"),
            ("WEB3FORMS_ACCESS_KEY", "  abc123  "),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.site_root, PathBuf::from("/srv/site"));
        assert_eq!(cfg.relay_url.host_str(), Some("localhost"));
        assert_eq!(cfg.access_key.unwrap().expose(), "abc123");
    }

    #[test]
    fn blank_access_key_is_absent() {
        let cfg = load(&[("WEB3FORMS_ACCESS_KEY", "   ")]).unwrap();
        assert!(cfg.access_key.is_none());
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = load(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "BIND_ADDR", .. }), "{err}");

        let err = load(&[("RELAY_URL", "no scheme")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "RELAY_URL", .. }), "{err}");
    }
}
