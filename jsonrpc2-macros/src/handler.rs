//! `#[handler]` expansion
//!
//! Input:
//! ```ignore
//! #[handler]
//! pub async fn hello(_ctx: Context, params: HelloParams) -> Result<HelloResult, String> {
//!     Ok(HelloResult { greet: format!("Hello {}", params.name) })
//! }
//! ```
//!
//! Output:
//! ```ignore
//! pub fn hello() -> Box<dyn ::jsonrpc2_dispatch::Handler> {
//!     async fn __jsonrpc2_handler(_ctx: Context, params: HelloParams) -> Result<HelloResult, String> {
//!         Ok(HelloResult { greet: format!("Hello {}", params.name) })
//!     }
//!     ::jsonrpc2_dispatch::from_typed_fn(__jsonrpc2_handler)
//! }
//! ```
//!
//! The type checks (params deserializable, result serializable, error
//! displayable) are left to the bounds of `from_typed_fn`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Error, FnArg, ItemFn, ReturnType};

pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(Error::new(attr.span(), "#[handler] takes no arguments"));
    }

    let input: ItemFn = syn::parse2(item)?;
    let sig = &input.sig;

    if sig.asyncness.is_none() {
        return Err(Error::new_spanned(
            sig.fn_token,
            "#[handler] functions must be async",
        ));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(Error::new_spanned(
            &sig.generics,
            "#[handler] functions cannot be generic",
        ));
    }
    if let ReturnType::Default = sig.output {
        return Err(Error::new_spanned(
            sig,
            "#[handler] functions must return Result<R, E>",
        ));
    }

    for arg in &sig.inputs {
        if let FnArg::Receiver(receiver) = arg {
            return Err(Error::new_spanned(
                receiver,
                "#[handler] functions cannot take self",
            ));
        }
    }
    if sig.inputs.len() != 2 {
        return Err(Error::new_spanned(
            &sig.inputs,
            "#[handler] functions take exactly two arguments: (ctx: Context, params: P)",
        ));
    }

    let attrs = &input.attrs;
    let vis = &input.vis;
    let name = &sig.ident;
    let inputs = &sig.inputs;
    let output = &sig.output;
    let block = &input.block;

    Ok(quote! {
        #(#attrs)*
        #vis fn #name() -> ::std::boxed::Box<dyn ::jsonrpc2_dispatch::Handler> {
            async fn __jsonrpc2_handler(#inputs) #output #block

            ::jsonrpc2_dispatch::from_typed_fn(__jsonrpc2_handler)
        }
    })
}
