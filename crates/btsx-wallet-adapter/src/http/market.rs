/*
[INPUT]:  Asset symbols and market pairs
[OUTPUT]: Feed prices, order book depth, last fill
[POS]:    HTTP layer - public market data (no wallet account involved)
[UPDATE]: When adding market queries or changing empty-result sentinels
*/

use serde_json::json;

use crate::http::{BtsxClient, Result};
use crate::types::{FeedEntry, LastFill, MarketTransaction, OrderBook};

impl BtsxClient {
    /// Delegate price feeds for an asset
    ///
    /// RPC: blockchain_get_feeds_for_asset [asset]
    pub async fn get_feeds(&self, asset: &str) -> Result<Vec<FeedEntry>> {
        Ok(self
            .call_result("blockchain_get_feeds_for_asset", vec![json!(asset)])
            .await?
            .unwrap_or_default())
    }

    /// Median feed price carried by the last feed entry, `None` when there are no feeds
    pub async fn get_median_price(&self, asset: &str) -> Result<Option<f64>> {
        let feeds = self.get_feeds(asset).await?;
        Ok(feeds.last().and_then(|feed| feed.median_price))
    }

    /// Order book depth for a pair
    ///
    /// RPC: blockchain_market_order_book [asset1, asset2]
    pub async fn get_order_book(&self, asset1: &str, asset2: &str) -> Result<OrderBook> {
        Ok(self
            .call_result("blockchain_market_order_book", vec![json!(asset1), json!(asset2)])
            .await?
            .unwrap_or_default())
    }

    /// Ratio at the top of the leading depth side, `None` when that side is empty
    pub async fn get_lowest_ask(&self, asset1: &str, asset2: &str) -> Result<Option<f64>> {
        let book = self.get_order_book(asset1, asset2).await?;
        Ok(book.leading_side().first().map(|order| order.ratio()))
    }

    /// Ask ratio of the most recent fill in the market
    ///
    /// RPC: blockchain_market_order_history [quote, base, 0, 1]
    pub async fn get_last_fill_price(&self, base: &str, quote: &str) -> Result<LastFill> {
        let history: Vec<MarketTransaction> = self
            .call_result(
                "blockchain_market_order_history",
                vec![json!(quote), json!(base), json!(0), json!(1)],
            )
            .await?
            .unwrap_or_default();

        Ok(history
            .last()
            .map(|fill| LastFill::Price(fill.ask_price.ratio))
            .unwrap_or(LastFill::NoTrades))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::{BtsxClient, ClientConfig, RpcCredentials};
    use crate::types::{LastFill, OrderBook};

    async fn client_for(server: &MockServer) -> BtsxClient {
        BtsxClient::with_endpoint(
            ClientConfig::default(),
            RpcCredentials::new("a", "a"),
            &server.uri(),
        )
        .expect("client init")
    }

    async fn mount_result(server: &MockServer, rpc_method: &str, result: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 0, "result": result })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    fn book_order(kind: &str, ratio: &str) -> serde_json::Value {
        json!({
            "type": kind,
            "market_index": {
                "order_price": { "ratio": ratio, "quote_asset_id": 22, "base_asset_id": 0 },
                "owner": "BTSXowner"
            },
            "state": { "balance": 1000 }
        })
    }

    #[tokio::test]
    async fn test_get_median_price_reads_last_feed() {
        let server = MockServer::start().await;
        mount_result(
            &server,
            "blockchain_get_feeds_for_asset",
            json!([
                { "delegate_name": "init0", "price": 0.020, "median_price": null, "asset_symbol": "USD" },
                { "delegate_name": "MARKET", "price": 0.021, "median_price": 0.0215, "asset_symbol": "USD" }
            ]),
        )
        .await;

        let client = client_for(&server).await;
        let median = client.get_median_price("USD").await.expect("median");

        assert_eq!(median, Some(0.0215));
    }

    #[tokio::test]
    async fn test_get_median_price_without_feeds_is_none() {
        let server = MockServer::start().await;
        mount_result(&server, "blockchain_get_feeds_for_asset", json!([])).await;

        let client = client_for(&server).await;
        assert_eq!(client.get_median_price("USD").await.expect("median"), None);
    }

    #[tokio::test]
    async fn test_get_lowest_ask_reads_first_entry() {
        let server = MockServer::start().await;
        mount_result(
            &server,
            "blockchain_market_order_book",
            json!([
                [book_order("ask_order", "0.0201"), book_order("ask_order", "0.0205")],
                [book_order("bid_order", "0.0190")]
            ]),
        )
        .await;

        let client = client_for(&server).await;
        let ask = client.get_lowest_ask("USD", "BTSX").await.expect("ask");

        assert_eq!(ask, Some(0.0201));
    }

    #[tokio::test]
    async fn test_get_order_book_keeps_node_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "method": "blockchain_market_order_book",
                "params": ["USD", "BTSX"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0,
                "result": [
                    [book_order("bid_order", "0.0190"), book_order("bid_order", "0.0185")],
                    []
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let book = client.get_order_book("USD", "BTSX").await.expect("book");

        assert_eq!(book.leading_side().len(), 2);
        assert_eq!(book.leading_side()[1].ratio(), 0.0185);
        assert!(book.trailing_side().is_empty());
    }

    #[tokio::test]
    async fn test_get_order_book_null_result_is_empty() {
        let server = MockServer::start().await;
        mount_result(&server, "blockchain_market_order_book", json!(null)).await;

        let client = client_for(&server).await;
        let book = client.get_order_book("USD", "BTSX").await.expect("book");

        assert_eq!(book, OrderBook::default());
    }

    #[tokio::test]
    async fn test_get_lowest_ask_empty_book() {
        let server = MockServer::start().await;
        mount_result(&server, "blockchain_market_order_book", json!([[], []])).await;

        let client = client_for(&server).await;
        assert_eq!(client.get_lowest_ask("USD", "BTSX").await.expect("ask"), None);
    }

    #[tokio::test]
    async fn test_get_last_fill_price() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "method": "blockchain_market_order_history",
                "params": ["USD", "BTSX", 0, 1]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0,
                "result": [{
                    "bid_price": { "ratio": "0.0199", "quote_asset_id": 22, "base_asset_id": 0 },
                    "ask_price": { "ratio": "0.0198", "quote_asset_id": 22, "base_asset_id": 0 },
                    "timestamp": "20141220T120000"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let fill = client.get_last_fill_price("BTSX", "USD").await.expect("fill");

        assert_eq!(fill, LastFill::Price(0.0198));
    }

    #[tokio::test]
    async fn test_get_last_fill_price_without_history() {
        let server = MockServer::start().await;
        mount_result(&server, "blockchain_market_order_history", json!([])).await;

        let client = client_for(&server).await;
        let fill = client.get_last_fill_price("BTSX", "USD").await.expect("fill");

        assert_eq!(fill, LastFill::NoTrades);
    }
}
