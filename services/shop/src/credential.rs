use std::fmt::{Debug, Formatter};

use tiktokshop_core::{utils::Redact, SigningCredential};

/// Credential of one app acting for one seller.
///
/// The shop binding lives in [`ShopContext`] and is kept by the client, so it
/// can be replaced without touching the rest of the credential.
#[derive(Clone)]
pub struct Credential {
    /// App key issued to the app.
    pub app_key: String,
    /// App secret, the key of every signature.
    pub app_secret: String,
    /// Seller access token.
    pub access_token: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            access_token: access_token.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("app_key", &self.app_key)
            .field("app_secret", &Redact::from(&self.app_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.app_key.is_empty() && !self.app_secret.is_empty()
    }
}

/// The shop a client is bound to.
///
/// Both fields are always read and replaced together.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ShopContext {
    /// Shop id, empty for shop agnostic calls.
    pub shop_id: String,
    /// Shop cipher, empty for shop agnostic calls.
    pub shop_cipher: String,
}

impl ShopContext {
    /// Create a new shop context.
    pub fn new(shop_id: impl Into<String>, shop_cipher: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            shop_cipher: shop_cipher.into(),
        }
    }
}

impl Debug for ShopContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopContext")
            .field("shop_id", &self.shop_id)
            .field("shop_cipher", &Redact::from(&self.shop_cipher))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_needs_key_and_secret() {
        assert!(Credential::new("key", "secret", "").is_valid());
        assert!(!Credential::new("key", "", "token").is_valid());
        assert!(!Credential::new("", "secret", "token").is_valid());
    }

    #[test]
    fn test_debug_redacts() {
        let cred = Credential::new("key", "super-secret-value", "TTP_0123456789abcdef");
        let s = format!("{cred:?}");

        assert!(!s.contains("super-secret-value"));
        assert!(!s.contains("TTP_0123456789abcdef"));
        assert!(s.contains("\"key\""));
    }
}
