//! Core components for signed TikTok Shop API requests.
//!
//! This crate holds the pieces every other crate in the workspace shares:
//!
//! - [`Error`] and [`ErrorKind`]: the single error type of the workspace
//! - [`Context`]: a container for the runtime collaborators ([`HttpSend`] and [`Env`])
//! - [`ProvideCredential`] and [`ProvideCredentialChain`]: credential loading
//! - [`SigningRequest`]: a url decomposed into path and query pairs for signing
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC helpers
//! - [`time`]: time helpers
//! - [`utils`]: data redaction for logs and `Debug` output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SigningCredential};
mod request;
pub use request::SigningRequest;
mod error;
pub use error::{Error, ErrorKind, Result};
