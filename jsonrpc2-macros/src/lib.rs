//! Procedural macros for jsonrpc2
//!
//! # `#[handler]`
//!
//! Turns an async handler function into a factory returning
//! `Box<dyn jsonrpc2_dispatch::Handler>`, ready for
//! `Dispatcher::register`. Without the macro you write:
//!
//! ```ignore
//! pub fn add() -> Box<dyn Handler> {
//!     from_typed_fn(|_ctx: Context, params: AddParams| async move {
//!         Ok::<_, String>(params.a + params.b)
//!     })
//! }
//! ```
//!
//! With it:
//!
//! ```ignore
//! #[jsonrpc2_macros::handler]
//! pub async fn add(_ctx: Context, params: AddParams) -> Result<i32, String> {
//!     Ok(params.a + params.b)
//! }
//!
//! dispatcher.register("add", add())?;
//! ```
//!
//! The expansion names `::jsonrpc2_dispatch` directly, so the calling crate
//! must depend on `jsonrpc2-dispatch`.

mod handler;

use proc_macro::TokenStream;

/// Attribute macro for defining JSON-RPC handlers
///
/// The annotated function must:
/// - be `async`
/// - take exactly two typed arguments: the request context and the params
///   (`P: serde::de::DeserializeOwned`, use `()` for methods without params)
/// - declare a return type, `Result<R, E>` with `R: Serialize` and
///   `E: Display`
/// - have no generics and no `self` receiver
///
/// Anything else is rejected with a compile error pointing at the offending
/// part of the signature. Visibility, doc comments and other attributes are
/// kept on the generated factory.
///
/// A returned `Err(e)` is answered with code -32603 and `e.to_string()` as
/// the message.
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    handler::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
