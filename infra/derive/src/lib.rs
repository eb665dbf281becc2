#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the infrastructure.
//! This crate provides attribute macros to cut the boilerplate shared by all
//! InkHub crates: error enums, API data models, documented handlers, vertical
//! slice handles, and the specialized async runtime entry point.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the specialized Tokio runtime.
///
/// Transforms an `async fn main` into a standard `fn main` that initializes a
/// pre-configured Tokio runtime for the requested profile.
///
/// # Arguments
///
/// * `high_performance` - Optimized for high-throughput server environments.
/// * `memory_efficient` - Optimized for low-footprint environments.
/// * `default` - Worker threads auto-detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[ihub_runtime::main(high_performance)]
/// async fn main() -> Result<(), ()> {
/// # Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro to define a standard API data model.
///
/// Keeps every DTO on the platform consistent by injecting common derives and
/// serde policy.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize`, `Deserialize`, and `utoipa::ToSchema`
///   unless already present.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields`
///   by default; both can be overridden via arguments.
///
/// # Example
///
/// ```rust,ignore
/// use ihub_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct AuthorProfile {
///     pub id: String,
///     pub pen_name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `responses(...)`, `tag = "..."`) and applies them to the handler while
/// silencing the `clippy::unused_async` boilerplate lint some extractors need.
///
/// # Example
///
/// ```rust,ignore
/// use ihub_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> Result<(), ()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// Transforms a plain enum into a fully wired error type:
///
/// * **Automatic Derives**: `#[derive(Debug, thiserror::Error)]`.
/// * **Type Aliasing**: a `Result<T>` alias for the enum in the same module.
/// * **Context Support**: a companion `...Ext` trait adding `.context()` to
///   any `Result` convertible into this error type.
/// * **Standard Conversions**: `From<T>` for variants carrying a `source`
///   field, so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&str>` / `From<String>` when an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. Variants that support context carry `context: Option<Cow<'static, str>>`.
/// 3. Variants wrapping upstream errors carry a `source` field (or a field
///    marked `#[source]`/`#[from]`) alongside a context field.
///
/// # Example
///
/// ```rust,ignore
/// use ihub_derive::ihub_error;
/// use std::borrow::Cow;
///
/// #[ihub_error]
/// pub enum GatewayError {
///     #[error("Transport error{}: {source}", format_context(.context))]
///     Transport {
///         #[source]
///         source: reqwest::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn ihub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a Vertical Slice handle.
///
/// Transforms a struct into the full slice pattern:
/// 1. Generates a thread-safe `Arc` wrapper.
/// 2. Implements `Deref` for transparent access to the inner state.
/// 3. Implements `FeatureSlice` for registration in the kernel.
///
/// # Example
/// ```rust,ignore
/// #[ihub_derive::ihub_slice]
/// pub struct Authors {
///     pub repository: AuthorRepository,
/// }
///
/// fn init(repository: AuthorRepository) -> Authors {
///     Authors::new(AuthorsInner { repository })
/// }
/// ```
#[proc_macro_attribute]
pub fn ihub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
