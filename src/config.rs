use clap::Parser;

/// MLB/NBA schedule and win-probability dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "boxseat", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// MLB Stats API base URL
    #[arg(
        long,
        env = "MLB_API_URL",
        default_value = "https://statsapi.mlb.com/api/v1"
    )]
    pub mlb_api_url: String,

    /// BallDontLie NBA API base URL
    #[arg(
        long,
        env = "NBA_API_URL",
        default_value = "https://api.balldontlie.io/v1"
    )]
    pub nba_api_url: String,

    /// BallDontLie API key (sent as the Authorization header). Without it
    /// the NBA upstream rejects every request and those sections render
    /// empty.
    #[arg(long, env = "NBA_API_KEY")]
    pub nba_api_key: Option<String>,

    /// Upstream response cache TTL in seconds
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "60")]
    pub cache_ttl_secs: u64,

    /// Per-request upstream timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "20")]
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!(
                "listen_addr '{}' is not a valid socket address",
                self.listen_addr
            );
        }
        for (name, url) in [
            ("mlb_api_url", &self.mlb_api_url),
            ("nba_api_url", &self.nba_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }
        if self.cache_ttl_secs == 0 {
            anyhow::bail!("cache_ttl_secs must be positive");
        }
        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("upstream_timeout_secs must be positive");
        }
        Ok(())
    }
}
