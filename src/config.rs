use crate::warn;
use std::{env, path::PathBuf, time::Duration};

/// Runtime configuration read from the process environment at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root URL of the availability search backend.
    base_url: String,
    /// Time the live transport gets to report an open connection before fallback data is used.
    connect_timeout: Duration,
    /// Location of the band repository document; `None` keeps everything in memory.
    data_file: Option<PathBuf>,
}

impl AppConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.band-room.com";
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(3000);

    const BASE_URL_VAR: &'static str = "BANDROOM_BASE_URL";
    const CONNECT_TIMEOUT_VAR: &'static str = "BANDROOM_CONNECT_TIMEOUT_MS";
    const DATA_FILE_VAR: &'static str = "BANDROOM_DATA_FILE";

    pub fn new(base_url: &str, connect_timeout: Duration, data_file: Option<PathBuf>) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), connect_timeout, data_file }
    }

    /// Builds the configuration from `BANDROOM_*` environment variables.
    ///
    /// Missing values use the defaults, unparsable timeouts are reported and replaced
    /// by [`AppConfig::DEFAULT_CONNECT_TIMEOUT`].
    pub fn from_env() -> Self {
        let base_url_var = env::var(Self::BASE_URL_VAR);
        let base_url = base_url_var.as_ref().map_or(Self::DEFAULT_BASE_URL, |v| v.as_str());
        let connect_timeout = match env::var(Self::CONNECT_TIMEOUT_VAR) {
            Ok(raw) => Self::parse_timeout(&raw).unwrap_or_else(|| {
                warn!(
                    "Ignoring invalid {}={raw}, using {}ms",
                    Self::CONNECT_TIMEOUT_VAR,
                    Self::DEFAULT_CONNECT_TIMEOUT.as_millis()
                );
                Self::DEFAULT_CONNECT_TIMEOUT
            }),
            Err(_) => Self::DEFAULT_CONNECT_TIMEOUT,
        };
        let data_file = env::var(Self::DATA_FILE_VAR).ok().filter(|p| !p.is_empty()).map(PathBuf::from);
        Self::new(base_url, connect_timeout, data_file)
    }

    fn parse_timeout(raw: &str) -> Option<Duration> {
        raw.trim().parse::<u64>().ok().filter(|ms| *ms > 0).map(Duration::from_millis)
    }

    pub fn base_url(&self) -> &str { self.base_url.as_str() }
    pub fn connect_timeout(&self) -> Duration { self.connect_timeout }
    pub fn data_file(&self) -> Option<&PathBuf> { self.data_file.as_ref() }
}

impl Default for AppConfig {
    fn default() -> Self { Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_CONNECT_TIMEOUT, None) }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::time::Duration;

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(AppConfig::parse_timeout("1500"), Some(Duration::from_millis(1500)));
        assert_eq!(AppConfig::parse_timeout(" 20 "), Some(Duration::from_millis(20)));
        assert_eq!(AppConfig::parse_timeout("0"), None);
        assert_eq!(AppConfig::parse_timeout("three"), None);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let conf = AppConfig::new("http://localhost:8080/", Duration::from_secs(1), None);
        assert_eq!(conf.base_url(), "http://localhost:8080");
    }
}
