/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for btsx-wallet-adapter tests

use btsx_wallet_adapter::{BtsxClient, ClientConfig, RpcCredentials};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock wallet RPC server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server's `/rpc`
pub fn client_for(server: &MockServer) -> BtsxClient {
    BtsxClient::with_endpoint(ClientConfig::default(), test_credentials(), &server.uri())
        .expect("client init")
}

pub fn test_credentials() -> RpcCredentials {
    RpcCredentials::new("test", "secret")
}

/// JSON-RPC success body
pub fn rpc_ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "id": 0, "result": result }))
}

/// Mock matching a method (and optionally more of the envelope)
pub fn rpc_mock(envelope: Value) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_partial_json(envelope))
}

/// `[order_id, order]` pair as listed by `wallet_market_order_list`
pub fn listed_order(id: &str, kind: &str, ratio: &str, balance: i64) -> Value {
    json!([id, {
        "type": kind,
        "market_index": {
            "order_price": { "ratio": ratio, "quote_asset_id": 22, "base_asset_id": 0 },
            "owner": format!("BTSX{id}")
        },
        "state": { "balance": balance, "short_price_limit": null }
    }])
}
