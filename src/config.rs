use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

/// How the venue field is checked against the known-venue list.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenuePolicy {
    /// Reject venues outside the known list
    #[default]
    Strict,
    /// Accept any non-empty venue, warning on unknown ones
    Advisory,
}

/// IPL live win-probability service
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// Listen address for the form page and submission API
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Base URL of the prediction service (requests go to <base>/predict)
    #[arg(long, env = "PREDICTOR_URL", default_value = "http://127.0.0.1:8000")]
    pub predictor_url: String,

    /// Predictor request timeout in seconds
    #[arg(long, env = "PREDICTOR_TIMEOUT_SECS", default_value = "10")]
    pub predictor_timeout_secs: u64,

    /// Venue validation policy
    #[arg(long, env = "VENUE_POLICY", value_enum, default_value_t = VenuePolicy::Strict)]
    pub venue_policy: VenuePolicy,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.predictor_url)
            .map_err(|e| anyhow::anyhow!("predictor_url is not a valid URL: {}", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("predictor_url must use http or https, got '{}'", url.scheme());
        }
        if self.predictor_timeout_secs == 0 {
            anyhow::bail!("predictor_timeout_secs must be positive");
        }
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr '{}' is not a socket address", self.listen_addr);
        }
        Ok(())
    }
}
