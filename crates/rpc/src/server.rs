//! JSON-RPC 2.0 dispatcher, one request per line
//!
//! Domain failures (unknown user, insufficient coins) are successful calls
//! carrying a `Failed` envelope. JSON-RPC errors are reserved for malformed
//! requests.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::service::BillingService;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Serialize, Debug, Clone)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

#[derive(Serialize, Debug, Clone)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorObject,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

#[derive(Deserialize)]
struct EmissionAmount {
    amount: u64,
}

#[derive(Deserialize)]
struct MoveCoinsTransaction {
    src_user: String,
    dst_user: String,
    amount: u64,
}

pub struct RpcServer {
    service: BillingService,
}

impl RpcServer {
    pub fn new(service: BillingService) -> Self {
        Self { service }
    }

    /// Serve requests from `reader` until EOF, one response line per request
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let response = self.handle_request(trimmed).await;
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok(())
    }

    /// Handle one raw request and return the serialized response
    pub async fn handle_request(&self, request_str: &str) -> String {
        let request: JsonRpcRequest = match serde_json::from_str(request_str) {
            Ok(req) => req,
            Err(e) => {
                return error_response(
                    Value::Null,
                    PARSE_ERROR,
                    "Parse error",
                    Some(json!({"details": e.to_string()})),
                )
            }
        };
        let id = request.id.unwrap_or(Value::Null);
        if request.jsonrpc != "2.0" {
            return error_response(
                id,
                INVALID_REQUEST,
                "Invalid Request: jsonrpc must be '2.0'",
                None,
            );
        }

        debug!(method = %request.method, "RPC request");
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => success_response(id, result),
            Err(error) => {
                let response = JsonRpcError {
                    jsonrpc: "2.0".to_string(),
                    id,
                    error,
                };
                to_line(&response)
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, ErrorObject> {
        match method {
            "ListUsers" => to_value(&self.service.list_users().await),
            "CoinsEmission" => {
                let p: EmissionAmount = parse_params(params)?;
                to_value(&self.service.coins_emission(p.amount).await)
            }
            "MoveCoins" => {
                let p: MoveCoinsTransaction = parse_params(params)?;
                to_value(
                    &self
                        .service
                        .move_coins(&p.src_user, &p.dst_user, p.amount)
                        .await,
                )
            }
            "LongestHistoryCoin" => to_value(&self.service.longest_history_coin().await),
            "VerifyLedger" => to_value(&self.service.verify_ledger().await),
            _ => Err(ErrorObject {
                code: METHOD_NOT_FOUND,
                message: "Method not found".to_string(),
                data: Some(json!({"method": method})),
            }),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, ErrorObject> {
    let params = params.unwrap_or(Value::Object(serde_json::Map::new()));
    serde_json::from_value(params).map_err(|e| ErrorObject {
        code: INVALID_PARAMS,
        message: "Invalid params".to_string(),
        data: Some(json!({"details": e.to_string()})),
    })
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, ErrorObject> {
    serde_json::to_value(value).map_err(|e| ErrorObject {
        code: INTERNAL_ERROR,
        message: "Internal error".to_string(),
        data: Some(json!({"details": e.to_string()})),
    })
}

fn success_response(id: Value, result: Value) -> String {
    to_line(&JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result,
    })
}

fn error_response(id: Value, code: i32, message: &str, data: Option<Value>) -> String {
    to_line(&JsonRpcError {
        jsonrpc: "2.0".to_string(),
        id,
        error: ErrorObject {
            code,
            message: message.to_string(),
            data,
        },
    })
}

fn to_line<T: Serialize>(response: &T) -> String {
    // Plain structs of strings and JSON values always serialize
    serde_json::to_string(response).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::Person;
    use billing_ledger::CoinLedger;

    fn server() -> RpcServer {
        let ledger = CoinLedger::new(vec![
            Person::new("A", 1).unwrap(),
            Person::new("B", 9).unwrap(),
        ])
        .unwrap();
        RpcServer::new(BillingService::new(ledger))
    }

    async fn call(server: &RpcServer, request: Value) -> Value {
        let raw = server.handle_request(&request.to_string()).await;
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_parse_error() {
        let raw = server().handle_request("{not json").await;
        let response: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_wrong_version() {
        let response = call(
            &server(),
            json!({"jsonrpc": "1.0", "id": 1, "method": "ListUsers"}),
        )
        .await;
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], 1);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "Mint"}),
        )
        .await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_params() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "CoinsEmission", "params": {"amount": -4}}),
        )
        .await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);

        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "MoveCoins", "params": {"src_user": "A"}}),
        )
        .await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_emission_and_list() {
        let server = server();
        let response = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "CoinsEmission", "params": {"amount": 10}}),
        )
        .await;
        assert_eq!(response["result"]["status"], "Ok");

        let response = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 6, "method": "ListUsers"}),
        )
        .await;
        assert_eq!(
            response["result"],
            json!([{"name": "A", "amount": 1}, {"name": "B", "amount": 9}])
        );
    }

    #[tokio::test]
    async fn test_longest_history_null_when_empty() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 7, "method": "LongestHistoryCoin"}),
        )
        .await;
        assert_eq!(response["result"], Value::Null);
    }
}
