use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A storefront product, in the shape the storefront API returns it.
///
/// Variant resolution is deliberately dumb: the catalog is read as given and
/// a variant is picked by title (or the first one).  Which variants exist and
/// whether they can be sold is the vendor's business, not ours.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Product {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) handle: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) variants: Vec<ProductVariant>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductVariant {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) available_for_sale: bool,
    pub(crate) price: Money,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Money {
    pub(crate) amount: String,
    pub(crate) currency_code: String,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed catalog JSON")]
    Json(#[from] serde_json::Error),
}

impl Product {
    pub(crate) fn load(path: &Path) -> Result<Product, CatalogError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// The variant matching `title`, or the first variant when no title is
    /// given.
    pub(crate) fn variant(&self, title: Option<&str>) -> Option<&ProductVariant> {
        match title {
            Some(title) => self.variants.iter().find(|v| v.title == title),
            None => self.variants.first(),
        }
    }

    /// The built-in demo product used when no catalog file is supplied.
    pub(crate) fn sample() -> Product {
        Product {
            id: "gid://shopify/Product/8128063111450".to_owned(),
            title: "Lakeside Cabin Stay".to_owned(),
            handle: "lakeside-cabin-stay".to_owned(),
            description: "A two-room cabin on the north shore, bookable by the night."
                .to_owned(),
            variants: vec![
                ProductVariant {
                    id: "gid://shopify/ProductVariant/44728501665050".to_owned(),
                    title: "Standard Room".to_owned(),
                    available_for_sale: true,
                    price: Money {
                        amount: "12000.0".to_owned(),
                        currency_code: "JPY".to_owned(),
                    },
                },
                ProductVariant {
                    id: "gid://shopify/ProductVariant/44728501697818".to_owned(),
                    title: "Annex Room".to_owned(),
                    available_for_sale: false,
                    price: Money {
                        amount: "9500.0".to_owned(),
                        currency_code: "JPY".to_owned(),
                    },
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_json() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "gid://shopify/Product/1",
                "title": "Hillside Yurt",
                "handle": "hillside-yurt",
                "variants": [
                    {
                        "id": "gid://shopify/ProductVariant/11",
                        "title": "Default Title",
                        "availableForSale": true,
                        "price": {"amount": "8000.0", "currencyCode": "JPY"}
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(product.title, "Hillside Yurt");
        assert_eq!(product.description, "");
        assert_eq!(product.variants.len(), 1);
        assert!(product.variants[0].available_for_sale);
        assert_eq!(product.variants[0].price.to_string(), "8000.0 JPY");
    }

    #[test]
    fn test_variant_selection() {
        let product = Product::sample();
        assert_eq!(product.variant(None).map(|v| v.title.as_str()), Some("Standard Room"));
        assert_eq!(
            product.variant(Some("Annex Room")).map(|v| v.title.as_str()),
            Some("Annex Room"),
        );
        assert_eq!(product.variant(Some("Penthouse")), None);
    }

    #[test]
    fn test_sample_has_sellable_variant() {
        let product = Product::sample();
        let variant = product.variant(None).unwrap();
        assert!(variant.available_for_sale);
    }
}
