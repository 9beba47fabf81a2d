use std::fmt::{Debug, Formatter};

use crate::constants::*;
use tiktokshop_core::{utils::Redact, Context, Error, Result};

/// Config carries all the configuration for the TikTok Shop open API.
///
/// Endpoint roots, the API version and the locale are explicit here instead
/// of process-wide constants, so two clients in one process can target
/// different environments.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_root` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_API_ROOT`]
    /// - default: [`DEFAULT_API_ROOT`]
    pub api_root: Option<String>,
    /// Root of the token endpoints. Defaults to [`DEFAULT_AUTH_ROOT`].
    pub auth_root: Option<String>,
    /// `version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_VERSION`]
    /// - default: [`DEFAULT_VERSION`]
    pub version: Option<String>,
    /// `locale` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_LOCALE`]
    /// - default: [`DEFAULT_LOCALE`]
    pub locale: Option<String>,
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_APP_KEY`]
    pub app_key: Option<String>,
    /// `app_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_APP_SECRET`]
    pub app_secret: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_ACCESS_TOKEN`]
    pub access_token: Option<String>,
    /// `shop_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_SHOP_ID`]
    pub shop_id: Option<String>,
    /// `shop_cipher` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TIKTOK_SHOP_SHOP_CIPHER`]
    pub shop_cipher: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_root
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    /// Set auth_root
    pub fn with_auth_root(mut self, auth_root: impl Into<String>) -> Self {
        self.auth_root = Some(auth_root.into());
        self
    }

    /// Set version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set app_key
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Set app_secret
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    /// Set access_token
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set shop_id and shop_cipher together.
    pub fn with_shop(mut self, shop_id: impl Into<String>, shop_cipher: impl Into<String>) -> Self {
        self.shop_id = Some(shop_id.into());
        self.shop_cipher = Some(shop_cipher.into());
        self
    }

    /// Load config from env.
    ///
    /// Only fields that are still `None` are filled.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let fields = [
            (&mut self.api_root, TIKTOK_SHOP_API_ROOT),
            (&mut self.version, TIKTOK_SHOP_VERSION),
            (&mut self.locale, TIKTOK_SHOP_LOCALE),
            (&mut self.app_key, TIKTOK_SHOP_APP_KEY),
            (&mut self.app_secret, TIKTOK_SHOP_APP_SECRET),
            (&mut self.access_token, TIKTOK_SHOP_ACCESS_TOKEN),
            (&mut self.shop_id, TIKTOK_SHOP_SHOP_ID),
            (&mut self.shop_cipher, TIKTOK_SHOP_SHOP_CIPHER),
        ];

        for (field, key) in fields {
            if let Some(v) = ctx.env_var(key) {
                field.get_or_insert(v);
            }
        }

        self
    }

    /// Api root in use, without a trailing `/`.
    pub fn api_root(&self) -> &str {
        self.api_root
            .as_deref()
            .unwrap_or(DEFAULT_API_ROOT)
            .trim_end_matches('/')
    }

    /// Auth root in use, without a trailing `/`.
    pub fn auth_root(&self) -> &str {
        self.auth_root
            .as_deref()
            .unwrap_or(DEFAULT_AUTH_ROOT)
            .trim_end_matches('/')
    }

    /// Api version in use.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// Locale in use for locale bearing endpoints.
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Check that roots are absolute http urls and version is set.
    pub fn check(&self) -> Result<()> {
        for (name, root) in [("api_root", self.api_root()), ("auth_root", self.auth_root())] {
            if !(root.starts_with("https://") || root.starts_with("http://")) {
                return Err(Error::config_invalid(format!(
                    "{name} must be an absolute http url, got {root:?}"
                )));
            }
        }
        if self.version().is_empty() {
            return Err(Error::config_invalid("version must not be empty"));
        }
        Ok(())
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_root", &self.api_root)
            .field("auth_root", &self.auth_root)
            .field("version", &self.version)
            .field("locale", &self.locale)
            .field("app_key", &self.app_key)
            .field("app_secret", &self.app_secret.as_ref().map(Redact::from))
            .field("access_token", &self.access_token.as_ref().map(Redact::from))
            .field("shop_id", &self.shop_id)
            .field("shop_cipher", &self.shop_cipher.as_ref().map(Redact::from))
            .finish()
    }
}
