//! In-memory catalog backend used by the integration tests.
//!
//! Resolves each catalog operation against a small store and projects the
//! result through the operation's declared selection, the way a GraphQL
//! server would.

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_sdk::document::Field;
use catalog_sdk::operations;
use catalog_sdk::{GraphQLError, GraphQLRequest, RawResponse, SdkResult, Transport};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// The date the fake server treats as today.
pub const TODAY: &str = "2024-06-01";

#[derive(Debug, Clone)]
struct StoredCategory {
    id: String,
    name: String,
    valid_from: Option<String>,
    valid_to: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredProduct {
    id: String,
    name: String,
    description: Option<String>,
    category_id: String,
    images: Vec<String>,
}

#[derive(Default)]
struct Store {
    categories: Vec<StoredCategory>,
    products: Vec<StoredProduct>,
    next_id: u32,
}

impl Store {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn category_json(&self, category: &StoredCategory) -> Value {
        let products: Vec<Value> = self
            .products
            .iter()
            .filter(|p| p.category_id == category.id)
            .map(|p| self.product_json(p))
            .collect();
        json!({
            "id": category.id,
            "name": category.name,
            "validFrom": category.valid_from,
            "validTo": category.valid_to,
            "products": products,
        })
    }

    fn product_json(&self, product: &StoredProduct) -> Value {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|c| json!({ "id": c.id, "name": c.name }));
        json!({
            "id": product.id,
            "name": product.name,
            "description": product.description,
            "categoryId": product.category_id,
            "category": category,
            "images": product.images,
        })
    }

    fn categories_where(&self, keep: impl Fn(&StoredCategory) -> bool) -> Value {
        Value::Array(
            self.categories
                .iter()
                .filter(|c| keep(c))
                .map(|c| self.category_json(c))
                .collect(),
        )
    }

    fn products_where(&self, keep: impl Fn(&StoredProduct) -> bool) -> Value {
        Value::Array(
            self.products
                .iter()
                .filter(|p| keep(p))
                .map(|p| self.product_json(p))
                .collect(),
        )
    }
}

fn matches_name(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

fn not_found(field: &str, message: String) -> GraphQLError {
    let mut error = GraphQLError::new(message);
    error.path = vec![json!(field)];
    error.extensions = Some(HashMap::from([(
        "classification".to_string(),
        json!("NOT_FOUND"),
    )]));
    error
}

fn bad_request(message: impl Into<String>) -> GraphQLError {
    let mut error = GraphQLError::new(message);
    error.extensions = Some(HashMap::from([(
        "classification".to_string(),
        json!("BAD_REQUEST"),
    )]));
    error
}

/// Keeps only the selected fields, recursively.
pub fn project(value: &Value, field: &Field) -> Value {
    if field.is_leaf() {
        return value.clone();
    }
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| project(item, field)).collect()),
        Value::Object(map) => {
            let mut out = Map::new();
            for child in field.selection {
                let projected = map
                    .get(child.name)
                    .map_or(Value::Null, |v| project(v, child));
                out.insert(child.name.to_string(), projected);
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// A catalog server living in memory.
#[derive(Default)]
pub struct FakeCatalog {
    store: Mutex<Store>,
    requests: Mutex<Vec<GraphQLRequest>>,
    delays: HashMap<String, Duration>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with two categories and three products.
    pub fn seeded() -> Self {
        let fake = Self::new();
        {
            let mut store = fake.store.lock().unwrap();
            store.categories = vec![
                StoredCategory {
                    id: "C1".into(),
                    name: "Tea".into(),
                    valid_from: Some("2024-01-01".into()),
                    valid_to: None,
                },
                StoredCategory {
                    id: "C2".into(),
                    name: "Coffee".into(),
                    valid_from: None,
                    valid_to: Some("2023-12-31".into()),
                },
            ];
            store.products = vec![
                StoredProduct {
                    id: "P1".into(),
                    name: "Green tea".into(),
                    description: Some("Sencha".into()),
                    category_id: "C1".into(),
                    images: vec!["https://img/sencha.png".into()],
                },
                StoredProduct {
                    id: "P2".into(),
                    name: "Black tea".into(),
                    description: None,
                    category_id: "C1".into(),
                    images: Vec::new(),
                },
                StoredProduct {
                    id: "P3".into(),
                    name: "Espresso".into(),
                    description: None,
                    category_id: "C2".into(),
                    images: Vec::new(),
                },
            ];
            store.next_id = 100;
        }
        fake
    }

    /// Holds back answers to searches for `name` by `delay`.
    pub fn delay_search(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<GraphQLRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn resolve(&self, root: &str, vars: &Value) -> Result<Value, GraphQLError> {
        let arg = |name: &str| vars.get(name).and_then(Value::as_str).unwrap_or_default().to_string();
        let mut store = self.store.lock().unwrap();

        match root {
            "categories" => Ok(store.categories_where(|_| true)),
            "category" => {
                let id = arg("id");
                store
                    .categories
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| store.category_json(c))
                    .ok_or_else(|| not_found(root, format!("Category {} not found", id)))
            }
            "searchCategories" => {
                let name = arg("name");
                Ok(store.categories_where(|c| matches_name(&c.name, &name)))
            }
            "activeCategories" => Ok(store.categories_where(|c| {
                c.valid_from.as_deref().map_or(true, |from| from <= TODAY)
                    && c.valid_to.as_deref().map_or(true, |to| to >= TODAY)
            })),
            "products" => Ok(store.products_where(|_| true)),
            "product" => {
                let id = arg("id");
                store
                    .products
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| store.product_json(p))
                    .ok_or_else(|| not_found(root, format!("Product {} not found", id)))
            }
            "searchProductsByName" => {
                let name = arg("name");
                Ok(store.products_where(|p| matches_name(&p.name, &name)))
            }
            "productsByCategory" => {
                let category_id = arg("categoryId");
                Ok(store.products_where(|p| p.category_id == category_id))
            }
            "searchProductsByCategoryAndName" => {
                let category_id = arg("categoryId");
                let name = arg("name");
                Ok(store.products_where(|p| {
                    p.category_id == category_id && matches_name(&p.name, &name)
                }))
            }
            "createCategory" | "updateCategory" => {
                let input = vars.get("input").cloned().unwrap_or_default();
                if input.get("id").is_some() {
                    return Err(bad_request("CategoryInput has no field `id`"));
                }
                let text = |key: &str| input.get(key).and_then(Value::as_str).map(str::to_string);
                let category = StoredCategory {
                    id: if root == "createCategory" {
                        store.next_id("C")
                    } else {
                        arg("id")
                    },
                    name: text("name").ok_or_else(|| bad_request("name is required"))?,
                    valid_from: text("validFrom"),
                    valid_to: text("validTo"),
                };
                if root == "createCategory" {
                    store.categories.push(category.clone());
                } else {
                    let slot = store
                        .categories
                        .iter_mut()
                        .find(|c| c.id == category.id)
                        .ok_or_else(|| not_found(root, format!("Category {} not found", category.id)))?;
                    *slot = category.clone();
                }
                Ok(store.category_json(&category))
            }
            "deleteCategory" => {
                let id = arg("id");
                let before = store.categories.len();
                store.categories.retain(|c| c.id != id);
                store.products.retain(|p| p.category_id != id);
                Ok(json!(store.categories.len() < before))
            }
            "createProduct" | "updateProduct" => {
                let input = vars.get("input").cloned().unwrap_or_default();
                if input.get("id").is_some() {
                    return Err(bad_request("ProductInput has no field `id`"));
                }
                let text = |key: &str| input.get(key).and_then(Value::as_str).map(str::to_string);
                let category_id =
                    text("categoryId").ok_or_else(|| bad_request("categoryId is required"))?;
                if !store.categories.iter().any(|c| c.id == category_id) {
                    return Err(bad_request(format!("Category {} does not exist", category_id)));
                }
                let images = input
                    .get("images")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                let product = StoredProduct {
                    id: if root == "createProduct" {
                        store.next_id("P")
                    } else {
                        arg("id")
                    },
                    name: text("name").ok_or_else(|| bad_request("name is required"))?,
                    description: text("description"),
                    category_id,
                    images,
                };
                if root == "createProduct" {
                    store.products.push(product.clone());
                } else {
                    let slot = store
                        .products
                        .iter_mut()
                        .find(|p| p.id == product.id)
                        .ok_or_else(|| not_found(root, format!("Product {} not found", product.id)))?;
                    *slot = product.clone();
                }
                Ok(store.product_json(&product))
            }
            "deleteProduct" => {
                let id = arg("id");
                let before = store.products.len();
                store.products.retain(|p| p.id != id);
                Ok(json!(store.products.len() < before))
            }
            other => Err(bad_request(format!("Unknown field `{}`", other))),
        }
    }
}

#[async_trait]
impl Transport for FakeCatalog {
    async fn send(&self, request: &GraphQLRequest) -> SdkResult<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let name = request.operation_name.clone().unwrap_or_default();
        let Some(descriptor) = operations::find(&name) else {
            return Ok(RawResponse {
                data: None,
                errors: Some(vec![bad_request(format!("Unknown operation `{}`", name))]),
            });
        };
        if request.query != descriptor.document() {
            return Ok(RawResponse {
                data: None,
                errors: Some(vec![bad_request("Document does not match the operation")]),
            });
        }

        if let Some(delay) = request
            .variables
            .get("name")
            .and_then(Value::as_str)
            .and_then(|n| self.delays.get(n))
        {
            tokio::time::sleep(*delay).await;
        }

        let key = descriptor.response_key();
        let (value, errors) = match self.resolve(key, &request.variables) {
            Ok(value) => (project(&value, &descriptor.root), None),
            Err(error) => (Value::Null, Some(vec![error])),
        };

        Ok(RawResponse {
            data: Some(json!({ key: value })),
            errors,
        })
    }
}
