//! TikTok Shop open API client.
//!
//! This crate signs requests for the TikTok Shop open API and maps each
//! remote operation to a method on [`Client`].
//!
//! ## Overview
//!
//! Every call goes through the same path: the payload is validated, the
//! [`RequestBuilder`] lays out the query and asks the signer for a
//! signature, then the request is handed to the [`HttpSend`] held by the
//! [`Context`].
//!
//! [`HttpSend`]: tiktokshop_core::HttpSend
//! [`Context`]: tiktokshop_core::Context
//!
//! ## Quick Start
//!
//! ```no_run
//! use anyhow::Result;
//! use tiktokshop_api::{Client, Config};
//! use tiktokshop_core::{Context, OsEnv};
//! use tiktokshop_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let config = Config::new()
//!         .with_app_key("your-app-key")
//!         .with_app_secret("your-app-secret")
//!         .with_access_token("your-access-token");
//!
//!     let client = Client::from_config(ctx, config).await?;
//!     let shops = client.get_authorized_shops().await?.into_data()?;
//!     println!("{shops}");
//!
//!     client.set_shop("7000", "ROW_cipher");
//!     let product = client.get_product("1729").await?;
//!     println!("{product:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export TIKTOK_SHOP_APP_KEY=your-app-key
//! export TIKTOK_SHOP_APP_SECRET=your-app-secret
//! export TIKTOK_SHOP_ACCESS_TOKEN=your-access-token
//! export TIKTOK_SHOP_SHOP_ID=your-shop-id
//! export TIKTOK_SHOP_SHOP_CIPHER=your-shop-cipher
//! ```
//!
//! ### Custom Providers
//!
//! Any [`ProvideCredential`] returning a [`Credential`] can be used with
//! [`Client::from_provider`].
//!
//! [`ProvideCredential`]: tiktokshop_core::ProvideCredential

mod build;
pub use build::{RequestBuilder, RequestDescriptor};

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod constants;

mod credential;
pub use credential::{Credential, ShopContext};

pub mod endpoint;
pub use endpoint::Endpoint;

mod multipart;
pub use multipart::MultipartForm;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{canonical_body, sign, sign_at, sign_path, Signature};

pub mod types;
pub use types::ApiResponse;

mod validate;
pub use validate::Validate;
