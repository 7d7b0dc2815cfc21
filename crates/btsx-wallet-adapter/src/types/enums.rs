/*
[INPUT]:  Wallet RPC schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Order type tag reported by `wallet_market_order_list` and the order book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    BidOrder,
    AskOrder,
    ShortOrder,
    CoverOrder,
    #[serde(other)]
    Unknown,
}

/// Side a caller wants to submit or select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// Whether a listed order belongs to this side
    pub fn matches(self, kind: &OrderKind) -> bool {
        matches!(
            (self, kind),
            (Side::Bid, OrderKind::BidOrder) | (Side::Ask, OrderKind::AskOrder)
        )
    }

    /// Lowercase side name, which is also the RPC method that submits an order on it
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        }
    }
}
