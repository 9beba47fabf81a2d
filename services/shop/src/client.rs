use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tiktokshop_core::time::DateTime;
use tiktokshop_core::utils::redact_query;
use tiktokshop_core::{Context, Error, ProvideCredential, Result, SigningCredential};

use crate::build::{RequestBuilder, RequestDescriptor};
use crate::config::Config;
use crate::constants::*;
use crate::credential::{Credential, ShopContext};
use crate::endpoint::{self, Endpoint};
use crate::multipart::MultipartForm;
use crate::provide_credential::DefaultCredentialProvider;
use crate::types::*;
use crate::validate::Validate;

const PAGE_SIZE: &str = "100";

/// Client for the shop open API.
///
/// A client can be shared across tasks. [`Client::set_shop`] is the only
/// mutation and takes effect for requests built after it returns.
#[derive(Debug)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    builder: RequestBuilder,
}

impl Client {
    /// Create a client from an explicit credential.
    ///
    /// The initial shop context comes from `config`.
    pub fn new(ctx: Context, config: Config, credential: Credential) -> Self {
        let shop = ShopContext::new(
            config.shop_id.clone().unwrap_or_default(),
            config.shop_cipher.clone().unwrap_or_default(),
        );
        let builder = RequestBuilder::new(config.api_root(), config.version(), credential, shop);

        Self {
            ctx,
            config: Arc::new(config),
            builder,
        }
    }

    /// Create a client, loading the credential from `provider`.
    ///
    /// Fails with `ConfigInvalid` when `config` does not pass [`Config::check`].
    pub async fn from_provider(
        ctx: Context,
        config: Config,
        provider: &impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        config.check()?;

        let credential = provider.provide_credential(&ctx).await?;
        let Some(credential) = credential.filter(Credential::is_valid) else {
            return Err(Error::credential_invalid(
                "no valid credential found, set app key and app secret",
            ));
        };

        Ok(Self::new(ctx, config, credential))
    }

    /// Create a client from `config` completed by the environment.
    ///
    /// The app key and secret are taken as a pair, from the config if it
    /// holds both and from env otherwise.
    pub async fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let provider = DefaultCredentialProvider::new(Arc::new(config.clone()));
        let config = config.from_env(&ctx);
        Self::from_provider(ctx, config, &provider).await
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.builder = self.builder.with_time(time);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace shop id and shop cipher together.
    pub fn set_shop(&self, shop_id: impl Into<String>, shop_cipher: impl Into<String>) {
        self.builder.set_shop(ShopContext::new(shop_id, shop_cipher));
    }

    /// Snapshot of the current shop context.
    pub fn shop(&self) -> ShopContext {
        self.builder.shop()
    }

    /// Call an endpoint and decode its response.
    ///
    /// `query` is appended after the locale for locale bearing endpoints.
    /// The body is sent as given, use the typed wrappers to get payload
    /// validation.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        id: Option<&str>,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>> {
        let req = self.build(endpoint, id, body, query)?.into_http_request()?;
        self.send(endpoint.name, req).await
    }

    async fn call_with<P, T>(
        &self,
        endpoint: &Endpoint,
        id: Option<&str>,
        payload: &P,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>>
    where
        P: Serialize + Validate,
        T: DeserializeOwned,
    {
        payload.validate()?;
        let body = serde_json::to_value(payload)?;
        self.call(endpoint, id, Some(body), query).await
    }

    fn build(
        &self,
        endpoint: &Endpoint,
        id: Option<&str>,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> Result<RequestDescriptor> {
        let path = endpoint.path_for(self.builder.version(), id)?;

        let mut extra = Vec::with_capacity(query.len() + 1);
        if endpoint.locale {
            extra.push((LOCALE, self.config.locale()));
        }
        extra.extend_from_slice(query);

        self.builder.build(
            endpoint.method.clone(),
            &path,
            body,
            &extra,
            endpoint.shop_cipher,
        )
    }

    async fn send<T: DeserializeOwned>(
        &self,
        name: &str,
        req: Request<Bytes>,
    ) -> Result<ApiResponse<T>> {
        let uri = redact_query(&req.uri().to_string(), &[ACCESS_TOKEN, APP_SECRET, SIGN]);
        debug!("sending {name}: {} {uri}", req.method());

        let resp = self.ctx.http_send(req).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = String::from_utf8_lossy(resp.body());
            warn!("{name} failed with status {status}: {body}");
            return Err(Error::transport(format!(
                "{name} failed with status {status}: {body}"
            )));
        }
        debug!("{name} responded {status}");

        let resp: ApiResponse<T> = serde_json::from_slice(resp.body()).map_err(|e| {
            Error::unexpected(format!("failed to decode {name} response")).with_source(e)
        })?;
        if !resp.is_success() {
            debug!(
                "{name} returned code {}: {} (request_id: {})",
                resp.code, resp.message, resp.request_id
            );
        }
        Ok(resp)
    }

    /// List the shops this app is authorized for.
    pub async fn get_authorized_shops(&self) -> Result<ApiResponse> {
        self.call(&endpoint::GET_AUTHORIZED_SHOPS, None, None, &[])
            .await
    }

    /// List product categories in the configured locale.
    pub async fn get_categories(&self) -> Result<ApiResponse> {
        self.call(&endpoint::GET_CATEGORIES, None, None, &[]).await
    }

    pub async fn get_category_attributes(&self, category_id: &str) -> Result<ApiResponse> {
        self.call(
            &endpoint::GET_CATEGORY_ATTRIBUTES,
            Some(category_id),
            None,
            &[],
        )
        .await
    }

    /// Ask the service for a category matching the product.
    pub async fn recommend_category(&self, recommendation: &Recommendation) -> Result<ApiResponse> {
        self.call_with(&endpoint::RECOMMEND_CATEGORY, None, recommendation, &[])
            .await
    }

    /// List the first page of authorized brands matching `query`.
    pub async fn get_brands(&self, query: &BrandQuery) -> Result<ApiResponse> {
        let mut params = Vec::with_capacity(4);
        if let Some(category_id) = &query.category_id {
            params.push(("category_id", category_id.as_str()));
        }
        params.push(("brand_name", query.brand_name.as_str()));
        params.push(("page_size", PAGE_SIZE));
        params.push(("is_authorized", "true"));

        self.call(&endpoint::GET_BRANDS, None, None, &params).await
    }

    pub async fn create_custom_brand(&self, brand: &Brand) -> Result<ApiResponse> {
        self.call_with(&endpoint::CREATE_CUSTOM_BRAND, None, brand, &[])
            .await
    }

    pub async fn get_product(&self, product_id: &str) -> Result<ApiResponse> {
        self.call(&endpoint::GET_PRODUCT, Some(product_id), None, &[])
            .await
    }

    pub async fn create_product(&self, product: &Product) -> Result<ApiResponse> {
        self.call_with(&endpoint::CREATE_PRODUCT, None, product, &[])
            .await
    }

    /// Replace a product as a whole.
    pub async fn update_product(&self, product_id: &str, product: &Product) -> Result<ApiResponse> {
        self.call_with(&endpoint::UPDATE_PRODUCT, Some(product_id), product, &[])
            .await
    }

    /// Change only the fields set in `edit`.
    pub async fn partial_edit_product(
        &self,
        product_id: &str,
        edit: &ProductPartialEdit,
    ) -> Result<ApiResponse> {
        self.call_with(&endpoint::PARTIAL_EDIT_PRODUCT, Some(product_id), edit, &[])
            .await
    }

    pub async fn update_product_prices(
        &self,
        product_id: &str,
        prices: &ProductPrices,
    ) -> Result<ApiResponse> {
        self.call_with(
            &endpoint::UPDATE_PRODUCT_PRICES,
            Some(product_id),
            prices,
            &[],
        )
        .await
    }

    pub async fn update_product_inventory(
        &self,
        product_id: &str,
        skus: Vec<SkuInventory>,
    ) -> Result<ApiResponse> {
        self.call_with(
            &endpoint::UPDATE_PRODUCT_INVENTORY,
            Some(product_id),
            &ProductInventory { skus },
            &[],
        )
        .await
    }

    pub async fn activate_products(&self, ids: &ProductIds) -> Result<ApiResponse> {
        self.call_with(&endpoint::ACTIVATE_PRODUCTS, None, ids, &[])
            .await
    }

    pub async fn deactivate_products(&self, ids: &ProductIds) -> Result<ApiResponse> {
        self.call_with(&endpoint::DEACTIVATE_PRODUCTS, None, ids, &[])
            .await
    }

    /// Delete products. The ids travel in the body of the `DELETE` request.
    pub async fn delete_products(&self, ids: &ProductIds) -> Result<ApiResponse> {
        self.call_with(&endpoint::DELETE_PRODUCTS, None, ids, &[])
            .await
    }

    pub async fn recover_products(&self, ids: &ProductIds) -> Result<ApiResponse> {
        self.call_with(&endpoint::RECOVER_PRODUCTS, None, ids, &[])
            .await
    }

    pub async fn search_inventory(&self, search: &InventorySearch) -> Result<ApiResponse> {
        self.call_with(&endpoint::SEARCH_INVENTORY, None, search, &[])
            .await
    }

    /// Upload a product image, sent as the `data` part of a multipart form.
    ///
    /// The image is not part of the signature.
    pub async fn upload_product_image(
        &self,
        filename: &str,
        content_type: &str,
        image: impl Into<Bytes>,
    ) -> Result<ApiResponse> {
        let endpoint = &endpoint::UPLOAD_PRODUCT_IMAGE;
        let form = MultipartForm::new().file("data", filename, content_type, image)?;
        let req = self
            .build(endpoint, None, None, &[])?
            .into_multipart_request(form)?;
        self.send(endpoint.name, req).await
    }

    pub async fn get_seller_shops(&self) -> Result<ApiResponse> {
        self.call(&endpoint::GET_SELLER_SHOPS, None, None, &[])
            .await
    }

    pub async fn get_warehouses(&self) -> Result<ApiResponse> {
        self.call(&endpoint::GET_WAREHOUSES, None, None, &[]).await
    }

    pub async fn get_order_statement_transactions(&self, order_id: &str) -> Result<ApiResponse> {
        self.call(
            &endpoint::GET_ORDER_STATEMENT_TRANSACTIONS,
            Some(order_id),
            None,
            &[],
        )
        .await
    }

    /// Search orders by status, 100 per page.
    ///
    /// Pass the `next_page_token` of the previous page to continue.
    pub async fn search_orders(
        &self,
        search: &OrderSearch,
        page_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut params = vec![("page_size", PAGE_SIZE)];
        if let Some(token) = page_token {
            params.push(("page_token", token));
        }

        self.call_with(&endpoint::SEARCH_ORDERS, None, search, &params)
            .await
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// The client keeps using the access token it was built with.
    pub async fn get_access_token(&self, auth_code: &str) -> Result<TokenData> {
        self.token_request(
            "get_access_token",
            "/api/v2/token/get",
            &[("auth_code", auth_code), ("grant_type", "authorized_code")],
        )
        .await
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenData> {
        self.token_request(
            "refresh_access_token",
            "/api/v2/token/refresh",
            &[
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ],
        )
        .await
    }

    async fn token_request(
        &self,
        name: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenData> {
        let credential = self.builder.credential();
        if credential.app_secret.is_empty() {
            return Err(Error::credential_invalid("app secret is empty"));
        }
        if params.iter().any(|(_, v)| v.is_empty()) {
            return Err(Error::validation_failed(format!(
                "{name} requires a non-empty {}",
                params[0].0
            )));
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(APP_KEY, &credential.app_key)
            .append_pair(APP_SECRET, &credential.app_secret)
            .extend_pairs(params)
            .finish();
        let url = format!("{}{path}?{query}", self.config.auth_root());

        let req = Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Bytes::new())?;

        self.send::<TokenData>(name, req).await?.into_data()
    }
}
