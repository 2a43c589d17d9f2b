//! Dispatch a single request and a batch against two handlers
//!
//! ```bash
//! cargo run --example hello
//! RUST_LOG=debug cargo run --example hello
//! ```

use jsonrpc2::{handler, Context, DispatchMetrics, Dispatcher, DispatcherConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct HelloParams {
    name: String,
}

#[derive(Serialize)]
struct HelloResult {
    greet: String,
}

#[derive(Deserialize)]
struct DummyErrorParams {
    #[allow(dead_code)]
    name: String,
}

#[derive(Serialize)]
struct DummyErrorResult {}

#[handler]
async fn hello(_ctx: Context, params: HelloParams) -> Result<HelloResult, String> {
    Ok(HelloResult {
        greet: format!("Hello {}", params.name),
    })
}

#[handler]
async fn dummy_error(_ctx: Context, _params: DummyErrorParams) -> Result<DummyErrorResult, String> {
    Err("im broken".to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DispatcherConfig::from_env()
        .with_metrics(Arc::new(DispatchMetrics::new("hello-demo")));
    let mut dispatcher = Dispatcher::with_config(config);
    dispatcher.register("hello", hello())?;
    dispatcher.register("dummyError", dummy_error())?;

    let ctx = Context::new();
    let payloads: [&[u8]; 2] = [
        br#"{"jsonrpc": "2.0","id":"1","method":"hello","params":{"name":"user"}}"#,
        br#"[{"jsonrpc":"2.0","id":"1","method":"hello","params":{"name":"user", "a": 1}},{"jsonrpc":"2.0","id":"2","method":"dummyError","params":{"name":"user"}}]"#,
    ];

    for payload in payloads {
        let response = dispatcher.dispatch_message(&ctx, payload).await;
        println!("--> {}", String::from_utf8_lossy(payload));
        println!("<-- {}", String::from_utf8_lossy(&response));
    }

    Ok(())
}
