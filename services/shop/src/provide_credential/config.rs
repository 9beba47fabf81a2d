use async_trait::async_trait;
use std::sync::Arc;
use tiktokshop_core::{Context, ProvideCredential, Result};

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider will load credential from config.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new loader via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref();

        if let (Some(key), Some(secret)) = (&config.app_key, &config.app_secret) {
            let cred = Credential::new(
                key.clone(),
                secret.clone(),
                config.access_token.clone().unwrap_or_default(),
            );
            return Ok(Some(cred));
        }

        Ok(None)
    }
}
