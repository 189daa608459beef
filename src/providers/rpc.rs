//! Minimal JSON-RPC 2.0 envelope shared by the EVM and Solana adapters.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::http::HttpClient;
use crate::error::{Result, WalletError};

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: u64,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub const fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl<T> RpcResponse<T> {
    /// Unwrap the result, turning an error object into [`WalletError::Rpc`].
    pub fn into_result(self, network: &str) -> Result<T> {
        if let Some(err) = self.error {
            return Err(WalletError::Rpc {
                network: network.to_string(),
                code: err.code,
                message: err.message,
            });
        }
        self.result
            .ok_or_else(|| WalletError::ParseResponse("JSON-RPC response without result".into()))
    }
}

/// POST a JSON-RPC call and return its `result`.
pub async fn call<P, T>(
    client: &HttpClient,
    url: &str,
    network: &str,
    method: &str,
    params: P,
) -> Result<T>
where
    P: Serialize,
    T: DeserializeOwned,
{
    let request = RpcRequest::new(method, params);
    let response: RpcResponse<T> = client.post_json(url, &request).await?;
    response.into_result(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_jsonrpc_2() {
        let request = RpcRequest::new("eth_getBalance", ("0xabc", "latest"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "eth_getBalance");
        assert_eq!(json["params"][1], "latest");
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn error_object_becomes_rpc_error() {
        let response: RpcResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid argument"}}"#,
        )
        .unwrap();
        match response.into_result("ethereum") {
            Err(WalletError::Rpc { code, message, .. }) => {
                assert_eq!(code, -32602);
                assert_eq!(message, "invalid argument");
            }
            other => panic!("expected rpc error, got {other:?}"),
        }
    }

    #[test]
    fn missing_result_is_parse_error() {
        let response: RpcResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(matches!(
            response.into_result("ethereum"),
            Err(WalletError::ParseResponse(_))
        ));
    }
}
