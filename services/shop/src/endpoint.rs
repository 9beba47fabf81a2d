//! Declarative table of the remote operations.
//!
//! Every operation of the open API this crate supports is one [`Endpoint`]
//! constant. [`crate::Client::call`] is the only code that turns them into
//! requests.

use http::Method;
use percent_encoding::utf8_percent_encode;
use tiktokshop_core::{Error, Result};

use crate::constants::PATH_SEGMENT_ENCODE_SET;

/// Static description of one remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name, used in logs and errors.
    pub name: &'static str,
    /// HTTP verb.
    pub method: Method,
    /// Path template with `{version}` and optional `{id}` placeholders.
    pub path: &'static str,
    /// Whether `shop_cipher` is sent. Shop agnostic operations must omit it.
    pub shop_cipher: bool,
    /// Whether the configured locale is appended as `locale`.
    pub locale: bool,
}

impl Endpoint {
    const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            name,
            method,
            path,
            shop_cipher: true,
            locale: false,
        }
    }

    const fn without_shop_cipher(mut self) -> Self {
        self.shop_cipher = false;
        self
    }

    const fn with_locale(mut self) -> Self {
        self.locale = true;
        self
    }

    /// Whether the path template takes an `{id}` argument.
    pub fn has_id(&self) -> bool {
        self.path.contains("{id}")
    }

    /// Render the path for the given version and id.
    ///
    /// The id is encoded as a single path segment.
    pub fn path_for(&self, version: &str, id: Option<&str>) -> Result<String> {
        let path = self.path.replace("{version}", version);

        match (self.has_id(), id) {
            (false, None) => Ok(path),
            (false, Some(_)) => Err(Error::request_invalid(format!(
                "{} does not take an id",
                self.name
            ))),
            (true, Some(id)) if !id.is_empty() => Ok(path.replace(
                "{id}",
                &utf8_percent_encode(id, &PATH_SEGMENT_ENCODE_SET).to_string(),
            )),
            (true, _) => Err(Error::validation_failed(format!(
                "{} requires a non-empty id",
                self.name
            ))),
        }
    }
}

pub const GET_AUTHORIZED_SHOPS: Endpoint =
    Endpoint::new("get_authorized_shops", Method::GET, "/authorization/{version}/shops");

pub const GET_CATEGORIES: Endpoint =
    Endpoint::new("get_categories", Method::GET, "/product/{version}/categories").with_locale();

pub const GET_CATEGORY_ATTRIBUTES: Endpoint = Endpoint::new(
    "get_category_attributes",
    Method::GET,
    "/product/{version}/categories/{id}/attributes",
)
.with_locale();

pub const RECOMMEND_CATEGORY: Endpoint = Endpoint::new(
    "recommend_category",
    Method::POST,
    "/product/{version}/categories/recommend",
);

pub const GET_BRANDS: Endpoint =
    Endpoint::new("get_brands", Method::GET, "/product/{version}/brands");

pub const CREATE_CUSTOM_BRAND: Endpoint =
    Endpoint::new("create_custom_brand", Method::POST, "/product/{version}/brands")
        .without_shop_cipher();

pub const GET_PRODUCT: Endpoint =
    Endpoint::new("get_product", Method::GET, "/product/{version}/products/{id}");

pub const CREATE_PRODUCT: Endpoint =
    Endpoint::new("create_product", Method::POST, "/product/{version}/products");

pub const UPDATE_PRODUCT: Endpoint =
    Endpoint::new("update_product", Method::PUT, "/product/{version}/products/{id}");

pub const PARTIAL_EDIT_PRODUCT: Endpoint = Endpoint::new(
    "partial_edit_product",
    Method::POST,
    "/product/{version}/products/{id}/partial_edit",
);

pub const UPDATE_PRODUCT_PRICES: Endpoint = Endpoint::new(
    "update_product_prices",
    Method::POST,
    "/product/{version}/products/{id}/prices/update",
);

pub const UPDATE_PRODUCT_INVENTORY: Endpoint = Endpoint::new(
    "update_product_inventory",
    Method::POST,
    "/product/{version}/products/{id}/inventory/update",
);

pub const ACTIVATE_PRODUCTS: Endpoint = Endpoint::new(
    "activate_products",
    Method::POST,
    "/product/{version}/products/activate",
);

pub const DEACTIVATE_PRODUCTS: Endpoint = Endpoint::new(
    "deactivate_products",
    Method::POST,
    "/product/{version}/products/deactivate",
);

pub const DELETE_PRODUCTS: Endpoint =
    Endpoint::new("delete_products", Method::DELETE, "/product/{version}/products");

pub const RECOVER_PRODUCTS: Endpoint = Endpoint::new(
    "recover_products",
    Method::POST,
    "/product/{version}/products/recover",
);

pub const SEARCH_INVENTORY: Endpoint = Endpoint::new(
    "search_inventory",
    Method::POST,
    "/product/{version}/inventory/search",
);

pub const UPLOAD_PRODUCT_IMAGE: Endpoint = Endpoint::new(
    "upload_product_image",
    Method::POST,
    "/product/{version}/images/upload",
)
.without_shop_cipher();

pub const GET_SELLER_SHOPS: Endpoint =
    Endpoint::new("get_seller_shops", Method::GET, "/seller/{version}/shops");

pub const GET_WAREHOUSES: Endpoint =
    Endpoint::new("get_warehouses", Method::GET, "/logistics/{version}/warehouses");

pub const GET_ORDER_STATEMENT_TRANSACTIONS: Endpoint = Endpoint::new(
    "get_order_statement_transactions",
    Method::GET,
    "/finance/{version}/orders/{id}/statement_transactions",
);

pub const SEARCH_ORDERS: Endpoint =
    Endpoint::new("search_orders", Method::POST, "/order/{version}/orders/search");

/// Every endpoint known to this crate.
pub const ALL: &[Endpoint] = &[
    GET_AUTHORIZED_SHOPS,
    GET_CATEGORIES,
    GET_CATEGORY_ATTRIBUTES,
    RECOMMEND_CATEGORY,
    GET_BRANDS,
    CREATE_CUSTOM_BRAND,
    GET_PRODUCT,
    CREATE_PRODUCT,
    UPDATE_PRODUCT,
    PARTIAL_EDIT_PRODUCT,
    UPDATE_PRODUCT_PRICES,
    UPDATE_PRODUCT_INVENTORY,
    ACTIVATE_PRODUCTS,
    DEACTIVATE_PRODUCTS,
    DELETE_PRODUCTS,
    RECOVER_PRODUCTS,
    SEARCH_INVENTORY,
    UPLOAD_PRODUCT_IMAGE,
    GET_SELLER_SHOPS,
    GET_WAREHOUSES,
    GET_ORDER_STATEMENT_TRANSACTIONS,
    SEARCH_ORDERS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;
    use tiktokshop_core::ErrorKind;

    #[test]
    fn test_names_are_unique() {
        let names = ALL.iter().map(|e| e.name).collect::<HashSet<_>>();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_every_path_is_versioned() {
        for e in ALL {
            assert!(e.path.starts_with('/'), "{}", e.name);
            assert!(e.path.contains("{version}"), "{}", e.name);
        }
    }

    #[test]
    fn test_only_image_upload_and_brand_creation_skip_shop_cipher() {
        let skipped = ALL
            .iter()
            .filter(|e| !e.shop_cipher)
            .map(|e| e.name)
            .collect::<Vec<_>>();

        assert_eq!(skipped, vec!["create_custom_brand", "upload_product_image"]);
    }

    #[test_case(&GET_PRODUCT, Some("123") => "/product/202309/products/123"; "plain id")]
    #[test_case(&GET_PRODUCT, Some("a/b c") => "/product/202309/products/a%2Fb%20c"; "id is one segment")]
    #[test_case(&GET_CATEGORIES, None => "/product/202309/categories"; "no id")]
    #[test_case(&GET_ORDER_STATEMENT_TRANSACTIONS, Some("576") => "/finance/202309/orders/576/statement_transactions"; "finance")]
    fn test_path_for(endpoint: &Endpoint, id: Option<&str>) -> String {
        endpoint.path_for("202309", id).unwrap()
    }

    #[test]
    fn test_missing_id_is_validation_error() {
        let err = GET_PRODUCT.path_for("202309", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);

        let err = GET_PRODUCT.path_for("202309", Some("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[test]
    fn test_unexpected_id_is_rejected() {
        let err = GET_WAREHOUSES.path_for("202309", Some("1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
