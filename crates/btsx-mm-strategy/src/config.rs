/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed and validated runner configuration
[POS]:    Configuration layer - wallet connection and quoting setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use btsx_wallet_adapter::{ClientConfig, RpcCredentials};

/// Top-level configuration for the market making bot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Wallet RPC connection
    pub rpc: RpcConfig,
    /// Account and market to quote in
    pub market: MarketConfig,
    /// Quote placement parameters
    pub quoting: QuotingConfig,
}

/// Wallet RPC connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcConfig {
    pub user: String,
    pub password: String,
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_block_poll_interval_ms")]
    pub block_poll_interval_ms: u64,
    /// Give up on a block wait after this long; absent means wait forever
    #[serde(default)]
    pub max_block_wait_secs: Option<u64>,
}

/// Market the bot quotes in
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Wallet account that owns the orders
    pub account: String,
    /// Asset being bought and sold (e.g., "BTSX")
    pub base: String,
    /// Asset prices are expressed in (e.g., "USD")
    pub quote: String,
    /// Asset whose median feed is the reference price; defaults to `quote`
    #[serde(default)]
    pub feed_asset: Option<String>,
}

impl MarketConfig {
    pub fn feed_asset(&self) -> &str {
        self.feed_asset.as_deref().unwrap_or(&self.quote)
    }
}

/// Quoting parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotingConfig {
    /// Fractional distance from the median for new quotes
    pub spread: f64,
    /// Fractional distance from the median beyond which orders are cancelled.
    /// Must exceed `spread` or fresh quotes would be cancelled on the next block.
    pub tolerance: f64,
    /// Base-asset amount per quote
    pub order_size: Decimal,
    /// Cancel every open order in the market when the runner stops
    #[serde(default)]
    pub cancel_on_shutdown: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_block_poll_interval_ms() -> u64 {
    100
}

impl StrategyConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let market = &self.market;
        if market.account.trim().is_empty() {
            bail!("market.account must not be empty");
        }
        if market.base.trim().is_empty() || market.quote.trim().is_empty() {
            bail!("market.base and market.quote must not be empty");
        }
        if market.base == market.quote {
            bail!("market.base and market.quote must differ");
        }
        if matches!(&market.feed_asset, Some(asset) if asset.trim().is_empty()) {
            bail!("market.feed_asset must not be empty when set");
        }

        let quoting = &self.quoting;
        if !(quoting.spread > 0.0 && quoting.spread < 1.0) {
            bail!("quoting.spread must be in (0, 1), got {}", quoting.spread);
        }
        if !(quoting.tolerance > quoting.spread && quoting.tolerance < 1.0) {
            bail!(
                "quoting.tolerance must be in (spread, 1), got {} with spread {}",
                quoting.tolerance,
                quoting.spread
            );
        }
        if quoting.order_size <= Decimal::ZERO {
            bail!("quoting.order_size must be positive, got {}", quoting.order_size);
        }

        if self.rpc.block_poll_interval_ms == 0 {
            bail!("rpc.block_poll_interval_ms must be positive");
        }
        Ok(())
    }

    pub fn credentials(&self) -> RpcCredentials {
        RpcCredentials::new(&self.rpc.user, &self.rpc.password)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.rpc.timeout_secs),
            block_poll_interval: Duration::from_millis(self.rpc.block_poll_interval_ms),
            max_block_wait: self.rpc.max_block_wait_secs.map(Duration::from_secs),
            ..ClientConfig::default()
        }
    }
}
