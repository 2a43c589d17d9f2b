//! `#[handler]` generated factories registered on a real dispatcher

use jsonrpc2_core::Context;
use jsonrpc2_dispatch::Dispatcher;
use jsonrpc2_macros::handler;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct HelloParams {
    name: String,
}

#[derive(Serialize)]
struct HelloResult {
    greet: String,
}

/// Greets the caller
#[handler]
pub async fn hello(_ctx: Context, params: HelloParams) -> Result<HelloResult, String> {
    Ok(HelloResult {
        greet: format!("Hello {}", params.name),
    })
}

#[handler]
async fn dummy_error(_ctx: Context, _params: HelloParams) -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::Other, "im broken"))
}

#[handler]
async fn ping(ctx: Context, _params: ()) -> Result<&'static str, String> {
    if ctx.is_cancelled() {
        return Err("cancelled".to_string());
    }
    Ok("pong")
}

fn dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("hello", hello()).unwrap();
    dispatcher.register("dummyError", dummy_error()).unwrap();
    dispatcher.register("ping", ping()).unwrap();
    dispatcher
}

async fn dispatch(dispatcher: &Dispatcher, ctx: &Context, payload: &str) -> String {
    String::from_utf8(dispatcher.dispatch_message(ctx, payload.as_bytes()).await).unwrap()
}

#[tokio::test]
async fn test_macro_handlers_batch() {
    let out = dispatch(
        &dispatcher(),
        &Context::new(),
        r#"[{"jsonrpc":"2.0","id":"1","method":"hello","params":{"name":"user", "a": 1}},{"jsonrpc":"2.0","id":"2","method":"dummyError","params":{"name":"user"}}]"#,
    )
    .await;

    assert_eq!(
        out,
        r#"[{"jsonrpc":"2.0","id":"1","result":{"greet":"Hello user"}},{"jsonrpc":"2.0","id":"2","error":{"code":-32603,"message":"im broken"}}]"#
    );
}

#[tokio::test]
async fn test_macro_handler_without_params() {
    let dispatcher = dispatcher();
    let payload = r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#;

    assert_eq!(
        dispatch(&dispatcher, &Context::new(), payload).await,
        r#"{"jsonrpc":"2.0","id":"p","result":"pong"}"#
    );

    let cancelled = Context::new();
    cancelled.cancel();
    assert_eq!(
        dispatch(&dispatcher, &cancelled, payload).await,
        r#"{"jsonrpc":"2.0","id":"p","error":{"code":-32603,"message":"cancelled"}}"#
    );
}
