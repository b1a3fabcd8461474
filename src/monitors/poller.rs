//! Fixed-period polling loop
//!
//! ```text
//! Timer tick → fetch → parse → evaluate → print warnings → update failure counter
//!                                                               │
//!                                          max_errors reached ──┴─→ fatal line, stop
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, instrument, trace};

use crate::{config::ProbeConfig, monitors::stats::fetch_sample, monitors::thresholds::evaluate};

/// Line printed once when the probe gives up
pub const FATAL_MESSAGE: &str = "Unable to fetch server statistic";

/// Polls one stats endpoint and writes warnings to `out`
pub struct Poller<W> {
    config: ProbeConfig,

    /// HTTP client carrying the request timeout, reused across ticks
    client: Client,

    /// Failed ticks since the last successful one
    failures: usize,

    out: W,
}

impl<W: Write> Poller<W> {
    pub fn new(config: ProbeConfig, out: W) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            config,
            client,
            failures: 0,
            out,
        })
    }

    pub fn consecutive_failures(&self) -> usize {
        self.failures
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run until `max_errors` consecutive ticks have failed.
    ///
    /// Only an I/O error on `out` ends the loop early.
    #[instrument(skip(self), fields(url = %self.config.url))]
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "polling every {:?} (timeout {:?}, max errors {})",
            self.config.interval(),
            self.config.timeout(),
            self.config.max_errors
        );

        // the first request goes out one period after start, like every later one
        let period = self.config.interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        // a slow request delays the following ticks instead of bursting to catch up
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if self.tick().await? {
                writeln!(self.out, "{FATAL_MESSAGE}").context("failed to write output")?;
                self.out.flush().context("failed to flush output")?;
                return Ok(());
            }
        }
    }

    /// One tick: poll once and update the failure counter.
    ///
    /// Returns `true` once the counter has reached `max_errors`.
    pub async fn tick(&mut self) -> Result<bool> {
        let success = self.poll_once().await?;
        Ok(self.record(success))
    }

    /// Fetch a single sample and print its warnings.
    ///
    /// Fetch and parse errors are not reported on `out`; they only yield `false`.
    pub async fn poll_once(&mut self) -> Result<bool> {
        let sample = match fetch_sample(&self.client, &self.config.url).await {
            Ok(sample) => sample,
            Err(e) => {
                debug!("tick failed: {e}");
                return Ok(false);
            }
        };

        for warning in evaluate(&sample, &self.config.limits) {
            writeln!(self.out, "{warning}").context("failed to write output")?;
        }
        self.out.flush().context("failed to flush output")?;

        Ok(true)
    }

    fn record(&mut self, success: bool) -> bool {
        if success {
            self.failures = 0;
        } else {
            self.failures += 1;
        }

        trace!("{}/{} consecutive failures", self.failures, self.config.max_errors);

        self.failures >= self.config.max_errors
    }
}
