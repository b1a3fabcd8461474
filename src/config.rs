use std::time::Duration;

use reqwest::Url;
use tracing::trace;

use crate::util;

const DEFAULT_URL: &str = "http://srv.msk01.gigacorp.local/_stats";

/// Probe configuration
///
/// Every field has a default, so an empty JSON object (or no file at all) yields the
/// compiled-in behaviour.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Stats endpoint
    pub url: String,

    /// Period between two ticks in milliseconds
    pub interval_ms: u64,

    /// Timeout of a single request in milliseconds
    pub timeout_ms: u64,

    /// Consecutive failed ticks after which the probe gives up
    pub max_errors: usize,

    pub limits: Limits,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            interval_ms: 1000,
            timeout_ms: 2000,
            max_errors: 3,
            limits: Limits::default(),
        }
    }
}

/// Warning thresholds, all compared with a strict `>`
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Limits {
    pub load_average: f64,

    /// Memory usage in whole percent
    pub memory: i64,

    /// Network usage in whole percent
    pub network: i64,

    /// Disk usage in whole percent
    pub disk: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            load_average: 30.0,
            memory: 80,
            network: 90,
            disk: 90,
        }
    }
}

impl ProbeConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Apply `PROBE_*` environment overrides; unparseable values keep the current setting
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = util::get_url() {
            self.url = url;
        }
        self.interval_ms = util::get_interval_ms().unwrap_or(self.interval_ms);
        self.timeout_ms = util::get_timeout_ms().unwrap_or(self.timeout_ms);
        self.max_errors = util::get_max_errors().unwrap_or(self.max_errors);
        self
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(url) = &overrides.url {
            self.url = url.clone();
        }
        self.interval_ms = overrides.interval_ms.unwrap_or(self.interval_ms);
        self.timeout_ms = overrides.timeout_ms.unwrap_or(self.timeout_ms);
        self.max_errors = overrides.max_errors.unwrap_or(self.max_errors);
        self
    }

    /// Build the effective configuration: defaults < file < environment < `overrides`.
    pub fn load(file: Option<&str>, overrides: &Overrides) -> anyhow::Result<Self> {
        let config = match file {
            Some(path) => read_config_file(path)?,
            None => ProbeConfig::default(),
        };
        let config = config.with_env_overrides().with_overrides(overrides);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| anyhow::anyhow!("invalid url {:?}: {e}", self.url))?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "url must use http or https, got {}",
            self.url
        );
        anyhow::ensure!(url.host().is_some(), "url must have a host, got {}", self.url);
        anyhow::ensure!(self.interval_ms > 0, "interval_ms must be > 0");
        anyhow::ensure!(self.timeout_ms > 0, "timeout_ms must be > 0");
        anyhow::ensure!(self.max_errors > 0, "max_errors must be > 0");
        Ok(())
    }
}

/// Settings given on the command line, taking precedence over file and environment
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// Stats endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Period between two requests in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Timeout of a single request in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Consecutive failures after which the probe gives up
    #[arg(long)]
    pub max_errors: Option<usize>,
}

pub fn parse_config(content: &str) -> anyhow::Result<ProbeConfig> {
    serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Invalid configuration file provided: {e}"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}

pub fn read_config_file(path: &str) -> anyhow::Result<ProbeConfig> {
    let file_content = std::fs::read_to_string(path)?;
    parse_config(&file_content)
}
