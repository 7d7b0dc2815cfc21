/*
[INPUT]:  `BtsxClient` for feeds, balances and orders; `StrategyConfig` quoting parameters;
          a `CancellationToken` for shutdown.
[OUTPUT]: One bid and one ask kept within `tolerance` of the median feed price,
          re-evaluated on every new block.
[POS]:    Strategy layer - block-driven market making loop.
[UPDATE]: When changing quote placement, stale-order rules, or shutdown semantics.
*/

use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use btsx_wallet_adapter::{BtsxClient, OrderSelector, Side};

use crate::config::StrategyConfig;

const ERROR_PAUSE: Duration = Duration::from_secs(1);
const PRICE_DECIMALS: u32 = 8;

/// Inputs to a quoting decision
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteInputs {
    pub median: f64,
    pub spread: f64,
    pub order_size: Decimal,
    pub has_bid: bool,
    pub has_ask: bool,
    pub base_balance: Decimal,
    pub quote_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub amount: Decimal,
    pub price: Decimal,
}

/// Orders to place this cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotePlan {
    pub bid: Option<Quote>,
    pub ask: Option<Quote>,
}

/// What one reconciliation cycle did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// `None` when no median feed was available and the cycle was skipped
    pub median: Option<f64>,
    pub cancelled: Vec<String>,
    pub placed: Vec<Side>,
}

/// Decide which sides need a fresh quote.
///
/// A side is quoted only when it has no open order and the account holds
/// enough of the asset the order would lock up.
pub fn plan_quotes(inputs: &QuoteInputs) -> QuotePlan {
    let mut plan = QuotePlan::default();

    if !inputs.has_bid {
        if let Some(price) = quote_price(inputs.median * (1.0 - inputs.spread)) {
            if inputs.quote_balance >= inputs.order_size * price {
                plan.bid = Some(Quote {
                    amount: inputs.order_size,
                    price,
                });
            }
        }
    }

    if !inputs.has_ask && inputs.base_balance >= inputs.order_size {
        if let Some(price) = quote_price(inputs.median * (1.0 + inputs.spread)) {
            plan.ask = Some(Quote {
                amount: inputs.order_size,
                price,
            });
        }
    }

    plan
}

fn quote_price(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Decimal::from_f64(value)
        .map(|price| price.round_dp(PRICE_DECIMALS))
        .filter(|price| price.is_sign_positive() && !price.is_zero())
}

/// Selectors for orders further than `tolerance * median` from the median.
///
/// `tolerance` is a fraction of the median, like `spread`, so the band scales
/// with the quotes `plan_quotes` places.
pub fn stale_selectors(median: f64, tolerance: f64) -> [OrderSelector; 2] {
    let band = median * tolerance;
    [
        OrderSelector::bids_out_of_range(median, band),
        OrderSelector::asks_out_of_range(median, band),
    ]
}

/// Market maker for a single account and market
#[derive(Debug)]
pub struct MarketMaker {
    client: BtsxClient,
    config: StrategyConfig,
}

impl MarketMaker {
    pub fn new(client: BtsxClient, config: StrategyConfig) -> Self {
        Self { client, config }
    }

    pub fn from_config(config: StrategyConfig) -> Result<Self> {
        let client = BtsxClient::with_config(
            config.client_config(),
            config.credentials(),
            config.rpc.port,
        )
        .context("build wallet rpc client")?;
        Ok(Self::new(client, config))
    }

    /// Cancel stale orders around the median feed price and refill missing sides.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let market = &self.config.market;
        let quoting = &self.config.quoting;
        let (account, base, quote) = (
            market.account.as_str(),
            market.base.as_str(),
            market.quote.as_str(),
        );

        let Some(median) = self
            .client
            .get_median_price(market.feed_asset())
            .await
            .context("read median feed price")?
        else {
            info!(feed_asset = market.feed_asset(), "no median feed price; skipping cycle");
            return Ok(CycleReport::default());
        };

        let mut report = CycleReport {
            median: Some(median),
            ..CycleReport::default()
        };

        for selector in stale_selectors(median, quoting.tolerance) {
            let matches = self
                .client
                .cancel_orders_matching(account, base, quote, &selector)
                .await
                .with_context(|| format!("cancel stale {} orders", selector.side.as_str()))?;
            if !matches.is_empty() {
                info!(
                    account,
                    side = selector.side.as_str(),
                    count = matches.order_ids.len(),
                    released = %matches.total_balance,
                    "stale orders cancelled"
                );
            }
            report.cancelled.extend(matches.order_ids);
        }

        let open = self
            .client
            .list_orders(account, base, quote)
            .await
            .context("list open orders")?;
        let has_bid = open.iter().any(|entry| Side::Bid.matches(&entry.order.kind));
        let has_ask = open.iter().any(|entry| Side::Ask.matches(&entry.order.kind));

        if has_bid && has_ask {
            debug!(account, median, "both sides quoted");
            return Ok(report);
        }

        let base_balance = self
            .client
            .get_balance(account, base)
            .await
            .context("read base balance")?;
        let quote_balance = self
            .client
            .get_balance(account, quote)
            .await
            .context("read quote balance")?;

        let plan = plan_quotes(&QuoteInputs {
            median,
            spread: quoting.spread,
            order_size: quoting.order_size,
            has_bid,
            has_ask,
            base_balance,
            quote_balance,
        });

        if let Some(bid) = plan.bid {
            self.client
                .submit_bid(account, bid.amount, base, bid.price, quote)
                .await
                .context("submit bid")?;
            report.placed.push(Side::Bid);
        } else if !has_bid {
            warn!(account, %quote_balance, "bid side empty but balance too low to quote");
        }

        if let Some(ask) = plan.ask {
            self.client
                .submit_ask(account, ask.amount, base, ask.price, quote)
                .await
                .context("submit ask")?;
            report.placed.push(Side::Ask);
        } else if !has_ask {
            warn!(account, %base_balance, "ask side empty but balance too low to quote");
        }

        Ok(report)
    }

    /// Run a cycle on every new block until `shutdown` fires.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let market = &self.config.market;
        info!(
            account = %market.account,
            base = %market.base,
            quote = %market.quote,
            "market maker started"
        );

        loop {
            let block = match self.client.wait_for_next_block_with_cancel(&shutdown).await {
                Ok(Some(block)) => block,
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "block wait failed");
                    if !err.is_retryable() {
                        return Err(err).context("wait for next block");
                    }
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(ERROR_PAUSE) => continue,
                    }
                }
            };

            match self.run_cycle().await {
                Ok(report) => debug!(
                    block,
                    cancelled = report.cancelled.len(),
                    placed = report.placed.len(),
                    "cycle complete"
                ),
                Err(err) => warn!(block, error = %format!("{err:#}"), "cycle failed"),
            }
        }

        info!("market maker stopping");
        if self.config.quoting.cancel_on_shutdown {
            let cancelled = self
                .client
                .cancel_all_orders(&market.account, &market.base, &market.quote)
                .await
                .context("cancel orders on shutdown")?;
            info!(count = cancelled.len(), "open orders cancelled on shutdown");
        }
        Ok(())
    }
}
