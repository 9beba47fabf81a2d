use async_trait::async_trait;
use tiktokshop_core::{Context, ProvideCredential, Result};

use crate::{constants::*, Credential};

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `TIKTOK_SHOP_APP_KEY`: the app key
/// - `TIKTOK_SHOP_APP_SECRET`: the app secret
/// - `TIKTOK_SHOP_ACCESS_TOKEN`: the seller access token (optional, empty if unset)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        match (envs.get(TIKTOK_SHOP_APP_KEY), envs.get(TIKTOK_SHOP_APP_SECRET)) {
            (Some(key), Some(secret)) => Ok(Some(Credential::new(
                key.clone(),
                secret.clone(),
                envs.get(TIKTOK_SHOP_ACCESS_TOKEN)
                    .cloned()
                    .unwrap_or_default(),
            ))),
            _ => Ok(None),
        }
    }
}
