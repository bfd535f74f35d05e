//! Domain entities exchanged with the catalog schema.
//!
//! Every type here is a plain value shape. Optional fields decode to `None`
//! when the server omits them or sends `null`, and decoding rejects fields the
//! type does not know about, so a selection that drifts from its response type
//! fails loudly instead of being silently dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an identifier cannot be accepted from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("{0} id must not be empty")]
    Empty(&'static str),
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(IdError::Empty($label));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Server-assigned category identifier.
    CategoryId,
    "category"
);

opaque_id!(
    /// Server-assigned product identifier.
    ProductId,
    "product"
);

// ============================================================================
// Categories
// ============================================================================

/// A category as returned by the schema.
///
/// `P` is the shape of the nested products, which differs between the list
/// selection ([`ProductRef`]) and the detail selection ([`ProductSummary`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    deny_unknown_fields,
    bound(deserialize = "P: Deserialize<'de>")
)]
pub struct Category<P = ProductRef> {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<P>>,
}

impl<P> Category<P> {
    /// Number of nested products, zero when the selection did not include them.
    pub fn product_count(&self) -> usize {
        self.products.as_ref().map_or(0, Vec::len)
    }
}

/// Product nested under a category in list views: identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRef {
    pub id: ProductId,
}

/// Product nested under a category in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Writable subset of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            valid_from: None,
            valid_to: None,
        }
    }

    /// Sets the start of the validity window.
    pub fn valid_from(mut self, value: impl Into<String>) -> Self {
        self.valid_from = Some(value.into());
        self
    }

    /// Sets the end of the validity window.
    pub fn valid_to(mut self, value: impl Into<String>) -> Self {
        self.valid_to = Some(value.into());
        self
    }
}

// ============================================================================
// Products
// ============================================================================

/// A product as returned by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategorySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Category embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
}

/// Writable subset of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            description: None,
            category_id,
            images: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends an image as base64 data, optionally with a `data:` URL prefix.
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.images.get_or_insert_with(Vec::new).push(image.into());
        self
    }

    /// Replaces the image list.
    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = Some(images.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_optionals_default_to_none() {
        let category: Category = serde_json::from_value(json!({
            "id": "1",
            "name": "Beverages",
            "validTo": null
        }))
        .unwrap();

        assert_eq!(category.id.as_str(), "1");
        assert_eq!(category.valid_from, None);
        assert_eq!(category.valid_to, None);
        assert_eq!(category.products, None);
        assert_eq!(category.product_count(), 0);
    }

    #[test]
    fn test_category_without_products_for_both_shapes() {
        let bare = json!({ "id": "2", "name": "Snacks" });

        let list: Category<ProductRef> = serde_json::from_value(bare.clone()).unwrap();
        let detail: Category<ProductSummary> = serde_json::from_value(bare).unwrap();

        assert!(list.products.is_none());
        assert!(detail.products.is_none());
        assert_eq!(detail.name, "Snacks");
    }

    #[test]
    fn test_category_list_shape_rejects_detail_fields() {
        let detail = json!({
            "id": "1",
            "name": "Beverages",
            "products": [{ "id": "7", "name": "Tea", "description": null }]
        });

        assert!(serde_json::from_value::<Category<ProductRef>>(detail.clone()).is_err());

        let category: Category<ProductSummary> = serde_json::from_value(detail).unwrap();
        let products = category.products.unwrap();
        assert_eq!(products[0].name, "Tea");
        assert_eq!(products[0].description, None);
    }

    #[test]
    fn test_product_decodes_camel_case() {
        let product: Product = serde_json::from_value(json!({
            "id": "7",
            "name": "Green tea",
            "description": "Loose leaf",
            "categoryId": "1",
            "category": { "id": "1", "name": "Beverages" },
            "images": ["https://img.example/tea.png"]
        }))
        .unwrap();

        assert_eq!(product.category_id, CategoryId::new("1"));
        assert_eq!(product.category.unwrap().name, "Beverages");
        assert_eq!(product.images.unwrap().len(), 1);
    }

    #[test]
    fn test_inputs_never_carry_an_id() {
        let category = serde_json::to_value(CategoryInput::new("Beverages")).unwrap();
        assert_eq!(category, json!({ "name": "Beverages" }));

        let product = serde_json::to_value(
            ProductInput::new("Tea", CategoryId::new("1"))
                .description("Loose leaf")
                .image("a.png")
                .image("b.png"),
        )
        .unwrap();
        let object = product.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert_eq!(object["categoryId"], "1");
        assert_eq!(object["images"], json!(["a.png", "b.png"]));
    }

    #[test]
    fn test_input_rejects_id_on_decode() {
        let result = serde_json::from_value::<CategoryInput>(json!({
            "id": "1",
            "name": "Beverages"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("  42 ".parse::<ProductId>().unwrap().as_str(), "42");
        assert_eq!("".parse::<CategoryId>(), Err(IdError::Empty("category")));
    }
}
