/*
[INPUT]:  Wallet RPC schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-19 accept ratios and balances as either JSON strings or numbers
*/

use serde::{Deserialize, Serialize};

use super::enums::OrderKind;

/// Opaque asset identifier used to match balance-array entries
pub type AssetId = u64;

/// Result of `blockchain_get_asset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: AssetId,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Power-of-ten divisor for raw integer amounts
    pub precision: u64,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_i64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_share_supply: Option<i64>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_i64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum_share_supply: Option<i64>,
}

/// One delegate feed from `blockchain_get_feeds_for_asset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_f64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_f64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub median_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

/// Price as the node reports it: a ratio between two asset ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRatio {
    #[serde(deserialize_with = "serde_helpers::deserialize_f64_required")]
    pub ratio: f64,
    #[serde(default)]
    pub quote_asset_id: AssetId,
    #[serde(default)]
    pub base_asset_id: AssetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    pub order_price: PriceRatio,
    #[serde(default)]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    /// Raw integer amount in the order's governing asset
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_required")]
    pub balance: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

/// An open order as listed by the wallet or the order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrder {
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub market_index: MarketIndex,
    pub state: OrderState,
}

impl MarketOrder {
    pub fn ratio(&self) -> f64 {
        self.market_index.order_price.ratio
    }
}

/// `[order_id, order]` pair from `wallet_market_order_list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, MarketOrder)", into = "(String, MarketOrder)")]
pub struct OpenOrder {
    pub id: String,
    pub order: MarketOrder,
}

impl From<(String, MarketOrder)> for OpenOrder {
    fn from((id, order): (String, MarketOrder)) -> Self {
        Self { id, order }
    }
}

impl From<OpenOrder> for (String, MarketOrder) {
    fn from(open: OpenOrder) -> Self {
        (open.id, open.order)
    }
}

/// Two depth sides of `blockchain_market_order_book`, in the order the node returns them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook(pub Vec<MarketOrder>, pub Vec<MarketOrder>);

impl OrderBook {
    pub fn leading_side(&self) -> &[MarketOrder] {
        &self.0
    }

    pub fn trailing_side(&self) -> &[MarketOrder] {
        &self.1
    }
}

/// `[account_name, [[asset_id, amount], ...]]` from `wallet_account_balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalances(pub String, pub Vec<AssetBalance>);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance(
    pub AssetId,
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_required")] pub i64,
);

/// One fill from `blockchain_market_order_history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTransaction {
    pub ask_price: PriceRatio,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<PriceRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Subset of `get_info` the adapter relies on; other fields are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub blockchain_head_block_num: u64,
    /// Seconds since the head block; some nodes report it as a string
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_i64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub blockchain_head_block_age: Option<i64>,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn f64_from_value<E: serde::de::Error>(value: &Value) -> Result<Option<f64>, E> {
        match value {
            Value::Null => Ok(None),
            Value::Number(number) => number
                .as_f64()
                .map(Some)
                .ok_or_else(|| E::custom("number out of f64 range")),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => raw.trim().parse::<f64>().map(Some).map_err(E::custom),
            _ => Err(E::custom("invalid price value")),
        }
    }

    fn i64_from_value<E: serde::de::Error>(value: &Value) -> Result<Option<i64>, E> {
        match value {
            Value::Null => Ok(None),
            Value::Number(number) => number
                .as_i64()
                .map(Some)
                .ok_or_else(|| E::custom("amount is not an integer")),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => raw.trim().parse::<i64>().map(Some).map_err(E::custom),
            _ => Err(E::custom("invalid amount value")),
        }
    }

    pub fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        f64_from_value(&value)
    }

    pub fn deserialize_f64_required<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        f64_from_value(&value)?.ok_or_else(|| serde::de::Error::custom("missing price value"))
    }

    pub fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        i64_from_value(&value)
    }

    pub fn deserialize_i64_required<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        i64_from_value(&value)?.ok_or_else(|| serde::de::Error::custom("missing amount value"))
    }
}
