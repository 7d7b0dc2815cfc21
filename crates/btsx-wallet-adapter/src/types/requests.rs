/*
[INPUT]:  RPC method names and positional parameters
[OUTPUT]: JSON-RPC 2.0 request envelope
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the envelope format changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// `{"method", "params", "jsonrpc": "2.0", "id": 0}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<Value>,
    pub jsonrpc: String,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_serializes_with_fixed_version_and_id() {
        let request = RpcRequest::new("get_info", vec![]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({ "method": "get_info", "params": [], "jsonrpc": "2.0", "id": 0 })
        );
    }
}
