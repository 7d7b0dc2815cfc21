/*
[INPUT]:  RPC method name and positional parameters
[OUTPUT]: Raw HTTP status + JSON body, or the decoded `result` field
[POS]:    HTTP layer - the single JSON-RPC transport primitive
[UPDATE]: When changing envelope handling or failure classification
*/

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http::{BtsxClient, BtsxError, Result};
use crate::types::{RpcRequest, RpcResponse};

/// Status and body exactly as the wallet returned them
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl BtsxClient {
    /// POST a JSON-RPC envelope and return the raw response.
    ///
    /// Only transport failures and undecodable 200 bodies are errors here;
    /// status classification happens in [`BtsxClient::call_result`].
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<RawResponse> {
        let request = RpcRequest::new(method, params);
        debug!(method, "sending rpc request");

        let response = self
            .http_client()
            .post(self.endpoint().clone())
            .header(AUTHORIZATION, self.credentials().basic_auth_header())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        let body = if status == StatusCode::OK {
            serde_json::from_str(&text)?
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(RawResponse { status, body })
    }

    /// Call a method and decode its `result`.
    ///
    /// Non-200 → [`BtsxError::Api`], error object → [`BtsxError::Rpc`],
    /// missing or null `result` → `Ok(None)`.
    pub async fn call_result<T>(&self, method: &str, params: Vec<Value>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let raw = self.call(method, params).await?;

        if raw.status != StatusCode::OK {
            let message = error_message(&raw.body);
            warn!(method, status = raw.status.as_u16(), %message, "rpc request rejected");
            return Err(BtsxError::api_error(raw.status, message));
        }

        let envelope: RpcResponse = serde_json::from_value(raw.body)?;
        if let Some(error) = envelope.error {
            warn!(method, code = error.code, message = %error.message, "rpc returned error");
            return Err(BtsxError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        match envelope.result {
            None | Some(Value::Null) => Ok(None),
            Some(result) => Ok(Some(serde_json::from_value(result)?)),
        }
    }

    /// Like [`BtsxClient::call_result`] but a missing result is an error.
    pub(crate) async fn call_required<T>(&self, method: &str, params: Vec<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.call_result(method, params).await?.ok_or_else(|| {
            BtsxError::InvalidResponse(format!("{method} returned no result"))
        })
    }
}

fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| body.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ClientConfig, RpcCredentials};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> BtsxClient {
        BtsxClient::with_endpoint(
            ClientConfig::default(),
            RpcCredentials::new("user", "pass"),
            &server.uri(),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_call_sends_envelope_with_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "method": "blockchain_get_asset",
                "params": ["USD"],
                "jsonrpc": "2.0",
                "id": 0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0,
                "result": { "id": 14, "symbol": "USD", "precision": 10000 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let raw = client
            .call("blockchain_get_asset", vec![json!("USD")])
            .await
            .expect("call failed");

        assert_eq!(raw.status, StatusCode::OK);
        assert_eq!(raw.body["result"]["precision"], json!(10000));
    }

    #[tokio::test]
    async fn test_call_result_non_200_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "id": 0,
                "error": { "code": 0, "message": "wallet is locked" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .call_result::<Value>("get_info", vec![])
            .await
            .unwrap_err();

        match err {
            BtsxError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "wallet is locked");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_result_plain_text_failure_keeps_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .call_result::<Value>("get_info", vec![])
            .await
            .unwrap_err();

        assert!(matches!(err, BtsxError::Api { code: 401, ref message } if message == "unauthorized"));
    }

    #[tokio::test]
    async fn test_call_result_empty_2xx_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let raw = client.call("get_info", vec![]).await.expect("raw 204");
        assert_eq!(raw.status, StatusCode::NO_CONTENT);

        let err = client.call_result::<Value>("get_info", vec![]).await.unwrap_err();
        assert!(matches!(err, BtsxError::Api { code: 204, .. }));
    }

    #[tokio::test]
    async fn test_call_result_error_object_is_rpc_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0,
                "error": { "code": 20005, "message": "unknown asset" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .call_result::<Value>("blockchain_get_asset", vec![json!("NOPE")])
            .await
            .unwrap_err();

        assert!(matches!(err, BtsxError::Rpc { code: 20005, .. }));
    }

    #[tokio::test]
    async fn test_call_result_null_result_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0,
                "result": null
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client
            .call_result::<Value>("wallet_account_balance", vec![])
            .await
            .expect("null result is not an error");

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_call_malformed_json_is_serialization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.call("get_info", vec![]).await.unwrap_err();

        assert!(matches!(err, BtsxError::Serialization(_)));
    }
}
