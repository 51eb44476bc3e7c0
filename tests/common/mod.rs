//! Shared harness: a mock JSON-RPC node and a running explorer.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

use node_explorer::config::ExplorerConfig;
use node_explorer::lifecycle::{startup, Shutdown};

pub const COOKIE: &str = "__cookie__:s3cret";
/// `Basic base64(COOKIE)`.
pub const EXPECTED_AUTH: &str = "Basic X19jb29raWVfXzpzM2NyZXQ=";

pub fn block_hash(height: u64) -> String {
    format!("{:064x}", 0xb0000 + height)
}

pub fn txid(height: u64) -> String {
    format!("{:064x}", 0xf0000 + height)
}

#[derive(Clone)]
struct NodeState {
    tip: u64,
    calls: Arc<Mutex<Vec<String>>>,
}

/// A node serving a chain of `tip + 1` blocks.
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockNode {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn block(tip: u64, height: u64) -> Value {
    let mut block = json!({
        "hash": block_hash(height),
        "height": height,
        "time": 1_700_000_000 + height * 60,
        "nTx": 1,
        "tx": [txid(height)],
        "difficulty": 0.25,
        "nonce": 42,
        "versionHex": "20000000",
        "merkleroot": txid(height),
        "size": 285,
        "weight": 1140,
    });
    if height > 0 {
        block["previousblockhash"] = json!(block_hash(height - 1));
    }
    if height < tip {
        block["nextblockhash"] = json!(block_hash(height + 1));
    }
    block
}

fn answer(tip: u64, method: &str, params: &[Value]) -> Result<Value, (i64, String)> {
    let height_of = |hash: &str| (0..=tip).find(|h| block_hash(*h) == hash);
    match method {
        "getblockchaininfo" => Ok(json!({"chain": "main", "blocks": tip, "difficulty": 0.25})),
        "getnetworkinfo" => Ok(json!({"connections": 5})),
        "getblockhash" => match params.first().and_then(Value::as_u64) {
            Some(h) if h <= tip => Ok(json!(block_hash(h))),
            _ => Err((-8, "Block height out of range".into())),
        },
        "getblock" => params
            .first()
            .and_then(Value::as_str)
            .and_then(|h| height_of(h))
            .map(|h| block(tip, h))
            .ok_or((-5, "Block not found".into())),
        "getrawtransaction" => params
            .first()
            .and_then(Value::as_str)
            .and_then(|id| (0..=tip).find(|h| txid(*h) == id))
            .map(|h| json!({"txid": txid(h), "blockhash": block_hash(h)}))
            .ok_or((-5, "No such mempool or blockchain transaction".into())),
        "scantxoutset" => {
            let descriptor = params
                .get(1)
                .and_then(|d| d.get(0))
                .and_then(Value::as_str)
                .unwrap_or_default();
            if descriptor == "addr(TRichAddress1)" {
                Ok(json!({
                    "success": true,
                    "total_amount": 3.5,
                    "unspents": [{"txid": txid(1), "vout": 0, "amount": 3.5}]
                }))
            } else {
                Err((-5, "Invalid address".into()))
            }
        }
        "sendrawtransaction" => match params.first().and_then(Value::as_str) {
            Some(hex) if hex.starts_with("02") => Ok(json!(txid(4242))),
            _ => Err((-26, "mandatory-script-verify-flag-failed".into())),
        },
        _ => Err((-32601, "Method not found".into())),
    }
}

async fn handle_rpc(
    State(state): State<NodeState>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == EXPECTED_AUTH)
        .unwrap_or(false);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(Value::Null));
    }

    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].as_array().cloned().unwrap_or_default();
    state.calls.lock().unwrap().push(method.clone());

    match answer(state.tip, &method, &params) {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({"result": result, "error": null, "id": request["id"]})),
        ),
        Err((code, message)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "result": null,
                "error": {"code": code, "message": message},
                "id": request["id"]
            })),
        ),
    }
}

/// Start a mock node on an ephemeral port.
pub async fn start_mock_node(tip: u64) -> MockNode {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = NodeState {
        tip,
        calls: calls.clone(),
    };
    let app = Router::new().route("/", post(handle_rpc)).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode { addr, calls }
}

/// A port with nothing listening on it.
pub fn dead_node_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A running explorer plus what keeps it alive.
pub struct Explorer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    _cookie: NamedTempFile,
}

impl Explorer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Explorer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the explorer against a node listening on `node_port`.
pub async fn start_explorer(node_port: u16) -> Explorer {
    let mut cookie = NamedTempFile::new().unwrap();
    writeln!(cookie, "{}", COOKIE).unwrap();

    let mut config = ExplorerConfig::default();
    config.node.port = node_port;
    config.node.cookie_path = cookie.path().display().to_string();
    config.node.rpc_timeout_secs = Some(5);
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let server = startup::build_server(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    Explorer {
        addr,
        client,
        shutdown,
        _cookie: cookie,
    }
}
