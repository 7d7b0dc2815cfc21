/*
[INPUT]:  Wallet RPC response bodies and adapter-side aggregation
[OUTPUT]: Typed response envelope and operation results
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new result types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope: `{"result": ...}` or `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Transaction record the wallet returns for an accepted bid or ask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderSubmission(pub Value);

/// Orders picked by a selector plus their summed balance in display units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderMatches {
    pub order_ids: Vec<String>,
    pub total_balance: Decimal,
}

impl OrderMatches {
    pub fn is_empty(&self) -> bool {
        self.order_ids.is_empty()
    }
}

/// Most recent fill in a market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "price", rename_all = "snake_case")]
pub enum LastFill {
    Price(f64),
    NoTrades,
}

impl LastFill {
    pub fn price(self) -> Option<f64> {
        match self {
            LastFill::Price(price) => Some(price),
            LastFill::NoTrades => None,
        }
    }
}
