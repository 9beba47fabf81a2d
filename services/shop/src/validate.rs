//! Payload checks run before any request is built.

use crate::types::*;
use tiktokshop_core::{Error, Result};

/// A payload that can be checked before it is sent.
///
/// Errors are `ValidationFailed` and name the offending field path, for
/// example `skus[0].price.currency must not be empty`.
pub trait Validate {
    /// Check the payload, returning the first problem found.
    fn validate(&self) -> Result<()>;
}

fn field(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn not_empty(path: String, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_failed(format!("{path} must not be empty")));
    }
    Ok(())
}

fn not_empty_list<T>(path: String, value: &[T]) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation_failed(format!(
            "{path} must contain at least one item"
        )));
    }
    Ok(())
}

fn decimal(path: String, value: &str) -> Result<()> {
    not_empty(path.clone(), value)?;
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => Err(Error::validation_failed(format!(
            "{path} must be a non-negative decimal, got {value:?}"
        ))),
    }
}

fn check_image(path: String, image: &Image) -> Result<()> {
    not_empty(field(&path, "uri"), &image.uri)
}

fn check_price(path: String, price: &Price) -> Result<()> {
    decimal(field(&path, "amount"), &price.amount)?;
    not_empty(field(&path, "currency"), &price.currency)
}

fn check_package_weight(path: String, weight: &PackageWeight) -> Result<()> {
    match weight.unit.as_str() {
        "KILOGRAM" | "POUND" => {}
        unit => {
            return Err(Error::validation_failed(format!(
                "{path}.unit must be KILOGRAM or POUND, got {unit:?}"
            )))
        }
    }
    decimal(field(&path, "value"), &weight.value)
}

fn check_attribute(path: String, attr: &Attribute) -> Result<()> {
    not_empty(field(&path, "id"), &attr.id)?;
    not_empty(field(&path, "name"), &attr.name)?;
    not_empty(field(&path, "value_name"), &attr.value_name)?;
    if let Some(img) = &attr.sku_img {
        check_image(field(&path, "sku_img"), img)?;
    }
    Ok(())
}

fn check_sku(path: String, sku: &Sku) -> Result<()> {
    for (i, attr) in sku.sales_attributes.iter().enumerate() {
        check_attribute(format!("{path}.sales_attributes[{i}]"), attr)?;
    }
    check_price(field(&path, "price"), &sku.price)?;
    not_empty_list(field(&path, "inventory"), &sku.inventory)?;
    for (i, inv) in sku.inventory.iter().enumerate() {
        not_empty(format!("{path}.inventory[{i}].warehouse_id"), &inv.warehouse_id)?;
    }
    Ok(())
}

fn check_images(path: &str, images: &[Image]) -> Result<()> {
    not_empty_list(path.to_string(), images)?;
    for (i, img) in images.iter().enumerate() {
        check_image(format!("{path}[{i}]"), img)?;
    }
    Ok(())
}

fn check_skus(path: &str, skus: &[Sku]) -> Result<()> {
    not_empty_list(path.to_string(), skus)?;
    for (i, sku) in skus.iter().enumerate() {
        check_sku(format!("{path}[{i}]"), sku)?;
    }
    Ok(())
}

impl Validate for Product {
    fn validate(&self) -> Result<()> {
        not_empty("title".to_string(), &self.title)?;
        not_empty("description".to_string(), &self.description)?;
        not_empty("category_id".to_string(), &self.category_id)?;
        check_images("main_images", &self.main_images)?;
        check_skus("skus", &self.skus)?;
        check_package_weight("package_weight".to_string(), &self.package_weight)
    }
}

impl Validate for ProductPartialEdit {
    fn validate(&self) -> Result<()> {
        if let Some(v) = &self.title {
            not_empty("title".to_string(), v)?;
        }
        if let Some(v) = &self.description {
            not_empty("description".to_string(), v)?;
        }
        if let Some(v) = &self.category_id {
            not_empty("category_id".to_string(), v)?;
        }
        if let Some(v) = &self.main_images {
            check_images("main_images", v)?;
        }
        if let Some(v) = &self.skus {
            check_skus("skus", v)?;
        }
        if let Some(v) = &self.package_weight {
            check_package_weight("package_weight".to_string(), v)?;
        }
        Ok(())
    }
}

impl Validate for Recommendation {
    fn validate(&self) -> Result<()> {
        not_empty("product_title".to_string(), &self.product_title)
    }
}

impl Validate for ProductPrices {
    fn validate(&self) -> Result<()> {
        not_empty_list("skus".to_string(), &self.skus)?;
        for (i, sku) in self.skus.iter().enumerate() {
            not_empty(format!("skus[{i}].id"), &sku.id)?;
            check_price(format!("skus[{i}].price"), &sku.price)?;
        }
        Ok(())
    }
}

impl Validate for ProductInventory {
    fn validate(&self) -> Result<()> {
        not_empty_list("skus".to_string(), &self.skus)?;
        for (i, sku) in self.skus.iter().enumerate() {
            not_empty(format!("skus[{i}].id"), &sku.id)?;
            not_empty_list(format!("skus[{i}].inventory"), &sku.inventory)?;
        }
        Ok(())
    }
}

impl Validate for ProductIds {
    fn validate(&self) -> Result<()> {
        not_empty_list("product_ids".to_string(), &self.product_ids)?;
        for (i, id) in self.product_ids.iter().enumerate() {
            not_empty(format!("product_ids[{i}]"), id)?;
        }
        Ok(())
    }
}

impl Validate for Brand {
    fn validate(&self) -> Result<()> {
        not_empty("name".to_string(), &self.name)
    }
}

impl Validate for InventorySearch {
    fn validate(&self) -> Result<()> {
        let ids = [("product_ids", &self.product_ids), ("sku_ids", &self.sku_ids)];
        for (name, values) in ids {
            for (i, id) in values.iter().flatten().enumerate() {
                not_empty(format!("{name}[{i}]"), id)?;
            }
        }
        Ok(())
    }
}

impl Validate for OrderSearch {
    fn validate(&self) -> Result<()> {
        not_empty("order_status".to_string(), &self.order_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use tiktokshop_core::ErrorKind;

    fn product() -> Product {
        Product {
            title: "Cotton tee".to_string(),
            description: "<p>Soft</p>".to_string(),
            category_id: "601226".to_string(),
            main_images: vec![Image {
                uri: "tos-maliva-i-o3syd03w52-us/abc".to_string(),
                ..Default::default()
            }],
            skus: vec![Sku {
                price: Price {
                    amount: "9.90".to_string(),
                    currency: "USD".to_string(),
                },
                inventory: vec![Inventory {
                    warehouse_id: "7068517275539719942".to_string(),
                    quantity: 10,
                }],
                ..Default::default()
            }],
            package_weight: PackageWeight {
                unit: "KILOGRAM".to_string(),
                value: "0.3".to_string(),
            },
            ..Default::default()
        }
    }

    fn message(r: Result<()>) -> String {
        let err = r.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        err.message().to_string()
    }

    #[test]
    fn test_valid_product() {
        product().validate().unwrap();
    }

    #[test_case(|p: &mut Product| p.title.clear(), "title must not be empty"; "title")]
    #[test_case(|p: &mut Product| p.main_images.clear(), "main_images must contain at least one item"; "images")]
    #[test_case(|p: &mut Product| p.skus[0].price.currency.clear(), "skus[0].price.currency must not be empty"; "currency")]
    #[test_case(|p: &mut Product| p.skus[0].inventory[0].warehouse_id.clear(), "skus[0].inventory[0].warehouse_id must not be empty"; "warehouse")]
    #[test_case(|p: &mut Product| p.package_weight.value = "heavy".to_string(), "package_weight.value must be a non-negative decimal, got \"heavy\""; "weight")]
    fn test_invalid_product(mutate: fn(&mut Product), expected: &str) {
        let mut p = product();
        mutate(&mut p);
        assert_eq!(message(p.validate()), expected);
    }

    #[test]
    fn test_partial_edit_only_checks_present_fields() {
        ProductPartialEdit::default().validate().unwrap();

        let edit = ProductPartialEdit {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(message(edit.validate()), "title must not be empty");
    }

    #[test]
    fn test_product_ids() {
        assert_eq!(
            message(ProductIds::default().validate()),
            "product_ids must contain at least one item"
        );
        assert_eq!(
            message(["1", ""].into_iter().collect::<ProductIds>().validate()),
            "product_ids[1] must not be empty"
        );
    }

    #[test]
    fn test_prices() {
        let prices = ProductPrices {
            skus: vec![SkuPrice {
                id: "1729".to_string(),
                price: Price {
                    amount: "-1".to_string(),
                    currency: "USD".to_string(),
                },
            }],
        };
        assert_eq!(
            message(prices.validate()),
            "skus[0].price.amount must be a non-negative decimal, got \"-1\""
        );
    }

    #[test]
    fn test_inventory_search() {
        InventorySearch::default().validate().unwrap();
        InventorySearch {
            sku_ids: Some(vec!["1".to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let search = InventorySearch {
            product_ids: Some(vec!["1".to_string(), " ".to_string()]),
            ..Default::default()
        };
        assert_eq!(message(search.validate()), "product_ids[1] must not be empty");
    }
}
