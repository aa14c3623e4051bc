use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use url::Url;
/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}
/// This struct receives all program arguments, while CrawlerConfig
/// describes only the crawl engine itself.
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to start crawling from. A bare host is treated as http://
    pub url: String,
    /// Number of concurrent crawl workers
    #[arg(short, long, default_value = "1")]
    pub workers: usize,
    /// Maximum recursion depth; omit for an unbounded crawl
    #[arg(short, long)]
    pub depth: Option<u32>,
    /// Per-request timeout in seconds
    #[arg(long, default_value = "2")]
    pub request_timeout: u64,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be greater than 0");
        }
        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }
        Ok(())
    }

    /// The seed address, coerced to a http:// URL when no scheme was given.
    pub fn seed_url(&self) -> anyhow::Result<Url> {
        let mut address = self.url.trim().to_lowercase();
        if !address.starts_with("http://") && !address.starts_with("https://") {
            address = format!("http://{address}");
        }
        match Url::parse(&address) {
            Ok(url) => Ok(url),
            Err(err) => anyhow::bail!("'{}' is not a valid URL: {}", self.url, err),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> Config {
        Config {
            url: url.to_string(),
            workers: 1,
            depth: None,
            request_timeout: 2,
            log_level: LogLevel::Info,
        }
    }

    #[test]
    fn test_bare_host_gets_http_scheme() {
        let seed = config_for("example.com").seed_url().unwrap();
        assert_eq!(seed.as_str(), "http://example.com/");
    }

    #[test]
    fn test_https_seed_kept_as_is() {
        let seed = config_for("https://example.com/start").seed_url().unwrap();
        assert_eq!(seed.as_str(), "https://example.com/start");
    }

    #[test]
    fn test_invalid_seed_rejected() {
        assert!(config_for("http://").seed_url().is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut cfg = config_for("example.com");
        cfg.workers = 0;
        assert!(cfg.validate().is_err());
    }
}
