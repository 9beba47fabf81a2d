use std::fmt::{Debug, Formatter};
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};
use log::debug;
use serde_json::Value;
use tiktokshop_core::time::{unix_seconds, DateTime};
use tiktokshop_core::utils::redact_query;
use tiktokshop_core::{Error, Result};

use crate::constants::*;
use crate::credential::{Credential, ShopContext};
use crate::multipart::MultipartForm;
use crate::sign_request::{canonical_body, sign, sign_at, Signature};

/// RequestBuilder turns an endpoint path into a signed request.
///
/// The shop context is the only mutable state. It is read once per build
/// as a consistent pair.
pub struct RequestBuilder {
    api_root: String,
    version: String,
    credential: Credential,
    shop: RwLock<ShopContext>,

    time: Option<DateTime>,
}

impl Debug for RequestBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("api_root", &self.api_root)
            .field("version", &self.version)
            .field("credential", &self.credential)
            .field("shop", &self.shop())
            .finish()
    }
}

impl RequestBuilder {
    /// Create a builder.
    ///
    /// `api_root` must not end with `/`.
    pub fn new(
        api_root: impl Into<String>,
        version: impl Into<String>,
        credential: Credential,
        shop: ShopContext,
    ) -> Self {
        Self {
            api_root: api_root.into(),
            version: version.into(),
            credential,
            shop: RwLock::new(shop),
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Replace shop id and shop cipher together.
    pub fn set_shop(&self, shop: ShopContext) {
        let mut guard = self.shop.write().unwrap_or_else(PoisonError::into_inner);
        *guard = shop;
    }

    /// Snapshot of the current shop context.
    pub fn shop(&self) -> ShopContext {
        self.shop
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build a signed request for `path`.
    ///
    /// Query parameters are laid out as `access_token, app_key,
    /// [shop_cipher,] shop_id, version, <extra_query>, timestamp, sign`.
    /// Missing shop fields are sent as empty values.
    pub fn build(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_query: &[(&str, &str)],
        include_shop_cipher: bool,
    ) -> Result<RequestDescriptor> {
        let shop = self.shop();

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair(ACCESS_TOKEN, &self.credential.access_token);
        query.append_pair(APP_KEY, &self.credential.app_key);
        if include_shop_cipher {
            query.append_pair(SHOP_CIPHER, &shop.shop_cipher);
        }
        query.append_pair(SHOP_ID, &shop.shop_id);
        query.append_pair(VERSION, &self.version);
        query.extend_pairs(extra_query);

        let mut url = format!("{}{}?{}", self.api_root, path, query.finish());

        let Signature {
            signature,
            timestamp,
        } = match self.time {
            Some(t) => sign_at(
                &url,
                &self.credential.app_secret,
                body.as_ref(),
                unix_seconds(t),
            )?,
            None => sign(&url, &self.credential.app_secret, body.as_ref())?,
        };
        url.push_str(&format!("&{TIMESTAMP}={timestamp}&{SIGN}={signature}"));

        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&self.credential.access_token)?;
        token.set_sensitive(true);
        headers.insert(X_TTS_ACCESS_TOKEN, token);

        debug!(
            "built request: {method} {}",
            redact_query(&url, &[ACCESS_TOKEN, SIGN])
        );

        Ok(RequestDescriptor {
            method,
            url,
            headers,
            body,
        })
    }
}

/// A signed request ready to be handed to the transport.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Json body, serialized with [`canonical_body`] when sent.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Convert into an http request with a json body.
    pub fn into_http_request(self) -> Result<http::Request<Bytes>> {
        let body = match &self.body {
            Some(v) => Some(Bytes::from(canonical_body(v)?)),
            None => None,
        };
        let has_body = body.is_some();

        let mut req = self.into_request_parts(body.unwrap_or_default())?;
        if has_body {
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(req)
    }

    /// Convert into an http request carrying a multipart form.
    ///
    /// Fails if a json body is set.
    pub fn into_multipart_request(self, form: MultipartForm) -> Result<http::Request<Bytes>> {
        if self.body.is_some() {
            return Err(Error::request_invalid(
                "multipart request can't carry a json body",
            ));
        }

        let content_type = HeaderValue::from_str(&form.content_type())?;
        let mut req = self.into_request_parts(form.into_bytes()?)?;
        req.headers_mut().insert(CONTENT_TYPE, content_type);
        Ok(req)
    }

    fn into_request_parts(self, body: Bytes) -> Result<http::Request<Bytes>> {
        let mut req = http::Request::builder()
            .method(self.method)
            .uri(self.url)
            .body(body)?;
        *req.headers_mut() = self.headers;
        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use std::thread;
    use tiktokshop_core::time::from_unix_seconds;
    use tiktokshop_core::ErrorKind;

    const ROOT: &str = "https://open-api.tiktokglobalshop.com";

    fn builder(shop: ShopContext) -> RequestBuilder {
        RequestBuilder::new(
            ROOT,
            "202309",
            Credential::new("6abc", "s3cr3t", "TTP_token"),
            shop,
        )
        .with_time(from_unix_seconds(1700000000).unwrap())
    }

    #[test]
    fn test_build_get_product() {
        let b = builder(ShopContext::new("7000", "ROW_cipher"));
        let req = b
            .build(
                Method::GET,
                "/product/202309/products/123",
                None,
                &[],
                true,
            )
            .unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.url,
            "https://open-api.tiktokglobalshop.com/product/202309/products/123\
?access_token=TTP_token&app_key=6abc&shop_cipher=ROW_cipher&shop_id=7000&version=202309\
&timestamp=1700000000&sign=9bc119bc7105d6c24d94862aacf5cd49c03b744ab25f59737b415cc94180b404"
        );
        assert_eq!(req.headers[X_TTS_ACCESS_TOKEN], "TTP_token");
        assert!(req.headers[X_TTS_ACCESS_TOKEN].is_sensitive());
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_build_with_body() {
        let b = builder(ShopContext::new("7000", "ROW_cipher"));
        let req = b
            .build(
                Method::POST,
                "/product/202309/products/activate",
                Some(json!({"product_ids": ["1", "2"]})),
                &[],
                true,
            )
            .unwrap();

        assert!(req.url.ends_with(
            "&timestamp=1700000000&sign=65112be543e6e3231524aff035f80175d05bdb37a4ecc2b4990f8fafc9d87138"
        ));

        let http_req = req.into_http_request().unwrap();
        assert_eq!(http_req.method(), Method::POST);
        assert_eq!(http_req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(http_req.body().as_ref(), br#"{"product_ids":["1","2"]}"#);
    }

    #[test]
    fn test_build_without_shop_cipher() {
        let b = builder(ShopContext::new("7000", "ROW_cipher"));
        let req = b
            .build(
                Method::POST,
                "/product/202309/images/upload",
                None,
                &[],
                false,
            )
            .unwrap();

        assert!(!req.url.contains("shop_cipher"));
        assert_eq!(
            req.url,
            "https://open-api.tiktokglobalshop.com/product/202309/images/upload\
?access_token=TTP_token&app_key=6abc&shop_id=7000&version=202309\
&timestamp=1700000000&sign=869d7730dee0a59484a8ca3d3eab8d5de24e6f946d3e3be04a2f6cae5dab203f"
        );
    }

    #[test]
    fn test_build_without_shop_uses_empty_values() {
        let b = builder(ShopContext::default());
        let req = b
            .build(
                Method::GET,
                "/product/202309/categories",
                None,
                &[(LOCALE, "en-US")],
                true,
            )
            .unwrap();

        assert_eq!(
            req.url,
            "https://open-api.tiktokglobalshop.com/product/202309/categories\
?access_token=TTP_token&app_key=6abc&shop_cipher=&shop_id=&version=202309&locale=en-US\
&timestamp=1700000000&sign=147d3809b393655037553d28a622329d26aa601a2e9510a96b5b7ab517b03336"
        );
    }

    #[test]
    fn test_extra_query_is_encoded() {
        let b = builder(ShopContext::default());
        let req = b
            .build(
                Method::GET,
                "/product/202309/brands",
                None,
                &[("brand_name", "Tom & Jerry")],
                true,
            )
            .unwrap();

        assert!(req.url.contains("&version=202309&brand_name=Tom+%26+Jerry&timestamp="));
    }

    #[test]
    fn test_empty_secret_is_credential_error() {
        let b = RequestBuilder::new(
            ROOT,
            "202309",
            Credential::new("6abc", "", "TTP_token"),
            ShopContext::default(),
        );
        let err = b
            .build(Method::GET, "/seller/202309/shops", None, &[], true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_multipart_request() {
        let b = builder(ShopContext::new("7000", "ROW_cipher"));
        let form = MultipartForm::with_boundary("b0")
            .file("data", "a.png", "image/png", Bytes::from_static(b"img"))
            .unwrap();
        let req = b
            .build(Method::POST, "/product/202309/images/upload", None, &[], false)
            .unwrap()
            .into_multipart_request(form)
            .unwrap();

        assert_eq!(
            req.headers()[CONTENT_TYPE],
            "multipart/form-data; boundary=b0"
        );
        assert_eq!(req.headers()[X_TTS_ACCESS_TOKEN], "TTP_token");
        assert!(req.body().starts_with(b"--b0\r\n"));
    }

    #[test]
    fn test_set_shop_is_atomic() {
        let b = Arc::new(builder(ShopContext::new("A", "cipher_A")));

        let writer = {
            let b = b.clone();
            thread::spawn(move || {
                for i in 0..2000 {
                    if i % 2 == 0 {
                        b.set_shop(ShopContext::new("B", "cipher_B"));
                    } else {
                        b.set_shop(ShopContext::new("A", "cipher_A"));
                    }
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let b = b.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let req = b
                            .build(Method::GET, "/seller/202309/shops", None, &[], true)
                            .unwrap();
                        let paired = req.url.contains("shop_cipher=cipher_A&shop_id=A&")
                            || req.url.contains("shop_cipher=cipher_B&shop_id=B&");
                        assert!(paired, "mixed shop context in {}", req.url);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
