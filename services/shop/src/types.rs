//! Payload and response types.
//!
//! Field names follow the wire format of the open API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tiktokshop_core::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_img: Option<Image>,
    pub value_id: String,
    pub value_name: String,
}

/// Money amount, kept as a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub warehouse_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_sku_id: Option<String>,
    pub sales_attributes: Vec<Attribute>,
    pub price: Price,
    pub inventory: Vec<Inventory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageWeight {
    pub unit: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_points: Option<Vec<String>>,
}

/// Full product, used to create or replace a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    pub main_images: Vec<Image>,
    pub skus: Vec<Sku>,
    pub package_weight: PackageWeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cod_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_attributes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_chart: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_dimensions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_option_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
}

/// Partial product, only the fields that are set get changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPartialEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skus: Option<Vec<Sku>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_weight: Option<PackageWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cod_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_attributes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_chart: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_dimensions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_option_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuPrice {
    pub id: String,
    pub price: Price,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPrices {
    pub skus: Vec<SkuPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryQuantity {
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuInventory {
    pub id: String,
    pub inventory: Vec<InventoryQuantity>,
}

/// Body of the inventory update call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInventory {
    pub skus: Vec<SkuInventory>,
}

/// Body shared by the activate, deactivate, delete and recover calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductIds {
    pub product_ids: Vec<String>,
}

impl<S: Into<String>> FromIterator<S> for ProductIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            product_ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_ids: Option<Vec<String>>,
}

/// Filter of the order search call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSearch {
    pub order_status: String,
}

/// Query of the brand listing call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandQuery {
    pub brand_name: String,
    pub category_id: Option<String>,
}

/// Envelope of every open API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Whether the service accepted the call.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Take the data out, turning a non-zero code into a service error.
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            return Err(Error::service(format!(
                "code {}: {} (request_id: {})",
                self.code, self.message, self.request_id
            )));
        }

        self.data.ok_or_else(|| {
            Error::unexpected(format!(
                "response has no data (request_id: {})",
                self.request_id
            ))
        })
    }
}

/// Token pair returned by the token endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenData {
    pub access_token: String,
    pub access_token_expire_in: i64,
    pub refresh_token: String,
    pub refresh_token_expire_in: i64,
    pub open_id: String,
    pub seller_name: String,
    pub seller_base_region: String,
    pub user_type: i64,
    pub granted_scopes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tiktokshop_core::ErrorKind;

    #[test]
    fn test_optional_fields_are_omitted() {
        let sku = Sku {
            price: Price {
                amount: "9.90".to_string(),
                currency: "USD".to_string(),
            },
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&sku).unwrap(),
            json!({
                "sales_attributes": [],
                "price": {"amount": "9.90", "currency": "USD"},
                "inventory": [],
            })
        );
    }

    #[test]
    fn test_product_ids_from_iter() {
        let ids: ProductIds = ["1", "2"].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&ids).unwrap(),
            r#"{"product_ids":["1","2"]}"#
        );
    }

    #[test]
    fn test_decode_success_envelope() {
        let resp: ApiResponse = serde_json::from_value(json!({
            "code": 0,
            "message": "Success",
            "request_id": "2023111422132001",
            "data": {"shops": []},
        }))
        .unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.into_data().unwrap(), json!({"shops": []}));
    }

    #[test]
    fn test_non_zero_code_is_service_error() {
        let resp: ApiResponse = serde_json::from_value(json!({
            "code": 106001,
            "message": "Invalid signature",
            "request_id": "abc",
        }))
        .unwrap();

        let err = resp.into_data().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.to_string().contains("106001"));
        assert!(err.to_string().contains("Invalid signature"));
    }

    #[test]
    fn test_decode_token_data() {
        let resp: ApiResponse<TokenData> = serde_json::from_value(json!({
            "code": 0,
            "message": "success",
            "data": {
                "access_token": "TTP_new",
                "access_token_expire_in": 1700600000,
                "refresh_token": "TTP_refresh",
                "refresh_token_expire_in": 1731000000,
                "granted_scopes": ["seller.product.basic"],
            },
        }))
        .unwrap();

        let token = resp.into_data().unwrap();
        assert_eq!(token.access_token, "TTP_new");
        assert_eq!(token.granted_scopes, vec!["seller.product.basic"]);
        assert_eq!(token.open_id, "");
    }
}
