/*
[INPUT]:  Asset symbols, cancellation tokens
[OUTPUT]: Asset metadata, chain status, head-block changes
[POS]:    HTTP layer - blockchain lookups and block polling
[UPDATE]: When adding chain queries or changing block wait semantics
*/

use serde_json::json;
use tokio::time::{Instant, sleep_until, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::http::{BtsxClient, BtsxError, Result};
use crate::types::{AssetId, AssetRecord, ChainInfo};

impl BtsxClient {
    /// Look up an asset by symbol
    ///
    /// RPC: blockchain_get_asset [asset]
    pub async fn get_asset(&self, asset: &str) -> Result<AssetRecord> {
        self.call_result("blockchain_get_asset", vec![json!(asset)])
            .await?
            .ok_or_else(|| BtsxError::UnknownAsset(asset.to_string()))
    }

    /// Power-of-ten divisor for the asset's raw amounts
    pub async fn get_precision(&self, asset: &str) -> Result<u64> {
        Ok(self.get_asset(asset).await?.precision)
    }

    pub async fn get_asset_id(&self, asset: &str) -> Result<AssetId> {
        Ok(self.get_asset(asset).await?.id)
    }

    /// RPC: get_info []
    pub async fn get_chain_info(&self) -> Result<ChainInfo> {
        self.call_required("get_info", vec![]).await
    }

    /// Block until the head block number changes and return the new number.
    ///
    /// Bounded by `ClientConfig::max_block_wait` when set.
    pub async fn wait_for_next_block(&self) -> Result<u64> {
        self.poll_head_block(None).await?.ok_or_else(|| {
            BtsxError::InvalidResponse("block wait ended without a block".to_string())
        })
    }

    /// Same as [`BtsxClient::wait_for_next_block`], returning `None` once `cancel` fires.
    pub async fn wait_for_next_block_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<u64>> {
        self.poll_head_block(Some(cancel)).await
    }

    async fn poll_head_block(&self, cancel: Option<&CancellationToken>) -> Result<Option<u64>> {
        let started = Instant::now();
        let interval = self.config().block_poll_interval;
        let deadline = self.config().max_block_wait.map(|limit| started + limit);

        let initial = self.head_block_before(deadline, started).await?;
        debug!(block = initial, "waiting for next block");

        loop {
            let now = Instant::now();
            let wake = match deadline {
                Some(deadline) if now >= deadline => return Err(timed_out(started)),
                Some(deadline) => deadline.min(now + interval),
                None => now + interval,
            };

            match cancel {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            debug!(block = initial, "block wait cancelled");
                            return Ok(None);
                        }
                        _ = sleep_until(wake) => {}
                    }
                }
                None => sleep_until(wake).await,
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(timed_out(started));
            }

            let current = self.head_block_before(deadline, started).await?;
            if current != initial {
                info!(previous = initial, block = current, "new block");
                return Ok(Some(current));
            }
        }
    }

    /// Head block number, abandoning the request once `deadline` passes
    async fn head_block_before(&self, deadline: Option<Instant>, started: Instant) -> Result<u64> {
        let info = match deadline {
            Some(deadline) => timeout_at(deadline, self.get_chain_info())
                .await
                .map_err(|_| timed_out(started))??,
            None => self.get_chain_info().await?,
        };
        Ok(info.blockchain_head_block_num)
    }
}

fn timed_out(started: Instant) -> BtsxError {
    BtsxError::Timeout {
        waited_ms: started.elapsed().as_millis() as u64,
    }
}
