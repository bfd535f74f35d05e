//! The operation catalog.
//!
//! Every read and write the client can perform against the catalog schema.
//! List selections are deliberately narrower than detail selections: a
//! category listing only carries the ids of its products, while the category
//! detail carries their names and descriptions.

use crate::document::{Argument, Field, OperationDescriptor, TypeRef, VariableDefinition};
use crate::typed::{NoVariables, TypedOperation};
use catalog_core::{
    Category, CategoryId, CategoryInput, Product, ProductId, ProductInput, ProductRef,
    ProductSummary,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Selections
// ============================================================================

const PRODUCT_REF: &[Field] = &[Field::leaf("id")];

const PRODUCT_SUMMARY: &[Field] = &[
    Field::leaf("id"),
    Field::leaf("name"),
    Field::leaf("description"),
];

const CATEGORY_SUMMARY: &[Field] = &[Field::leaf("id"), Field::leaf("name")];

const CATEGORY_BASE: &[Field] = &[
    Field::leaf("id"),
    Field::leaf("name"),
    Field::leaf("validFrom"),
    Field::leaf("validTo"),
];

const CATEGORY_LIST: &[Field] = &[
    Field::leaf("id"),
    Field::leaf("name"),
    Field::leaf("validFrom"),
    Field::leaf("validTo"),
    Field::object("products", PRODUCT_REF),
];

const CATEGORY_DETAIL: &[Field] = &[
    Field::leaf("id"),
    Field::leaf("name"),
    Field::leaf("validFrom"),
    Field::leaf("validTo"),
    Field::object("products", PRODUCT_SUMMARY),
];

const PRODUCT: &[Field] = &[
    Field::leaf("id"),
    Field::leaf("name"),
    Field::leaf("description"),
    Field::leaf("categoryId"),
    Field::object("category", CATEGORY_SUMMARY),
    Field::leaf("images"),
];

// ============================================================================
// Variable signatures
// ============================================================================

const ID_VAR: &[VariableDefinition] = &[VariableDefinition::new("id", TypeRef::ID)];
const NAME_VAR: &[VariableDefinition] = &[VariableDefinition::new("name", TypeRef::STRING)];
const CATEGORY_ID_VAR: &[VariableDefinition] =
    &[VariableDefinition::new("categoryId", TypeRef::ID)];
const CATEGORY_ID_NAME_VARS: &[VariableDefinition] = &[
    VariableDefinition::new("categoryId", TypeRef::ID),
    VariableDefinition::new("name", TypeRef::STRING),
];
const CATEGORY_INPUT_VAR: &[VariableDefinition] = &[VariableDefinition::new(
    "input",
    TypeRef::NonNull(&TypeRef::Named("CategoryInput")),
)];
const CATEGORY_UPDATE_VARS: &[VariableDefinition] = &[
    VariableDefinition::new("id", TypeRef::ID),
    VariableDefinition::new("input", TypeRef::NonNull(&TypeRef::Named("CategoryInput"))),
];
const PRODUCT_INPUT_VAR: &[VariableDefinition] = &[VariableDefinition::new(
    "input",
    TypeRef::NonNull(&TypeRef::Named("ProductInput")),
)];
const PRODUCT_UPDATE_VARS: &[VariableDefinition] = &[
    VariableDefinition::new("id", TypeRef::ID),
    VariableDefinition::new("input", TypeRef::NonNull(&TypeRef::Named("ProductInput"))),
];

const ID_ARG: &[Argument] = &[Argument::variable("id")];
const NAME_ARG: &[Argument] = &[Argument::variable("name")];
const INPUT_ARG: &[Argument] = &[Argument::variable("input")];
const ID_INPUT_ARGS: &[Argument] = &[Argument::variable("id"), Argument::variable("input")];
const CATEGORY_ID_ARG: &[Argument] = &[Argument::variable("categoryId")];
const CATEGORY_ID_NAME_ARGS: &[Argument] =
    &[Argument::variable("categoryId"), Argument::variable("name")];

// ============================================================================
// Descriptors
// ============================================================================

pub const GET_CATEGORIES: OperationDescriptor =
    OperationDescriptor::query("GetCategories", &[], Field::object("categories", CATEGORY_LIST));

pub const GET_CATEGORY: OperationDescriptor = OperationDescriptor::query(
    "GetCategory",
    ID_VAR,
    Field::object("category", CATEGORY_DETAIL).with_arguments(ID_ARG),
);

pub const SEARCH_CATEGORIES: OperationDescriptor = OperationDescriptor::query(
    "SearchCategories",
    NAME_VAR,
    Field::object("searchCategories", CATEGORY_LIST).with_arguments(NAME_ARG),
);

pub const ACTIVE_CATEGORIES: OperationDescriptor = OperationDescriptor::query(
    "ActiveCategories",
    &[],
    Field::object("activeCategories", CATEGORY_LIST),
);

pub const GET_PRODUCTS: OperationDescriptor =
    OperationDescriptor::query("GetProducts", &[], Field::object("products", PRODUCT));

pub const GET_PRODUCT: OperationDescriptor = OperationDescriptor::query(
    "GetProduct",
    ID_VAR,
    Field::object("product", PRODUCT).with_arguments(ID_ARG),
);

pub const SEARCH_PRODUCTS_BY_NAME: OperationDescriptor = OperationDescriptor::query(
    "SearchProductsByName",
    NAME_VAR,
    Field::object("searchProductsByName", PRODUCT).with_arguments(NAME_ARG),
);

pub const PRODUCTS_BY_CATEGORY: OperationDescriptor = OperationDescriptor::query(
    "ProductsByCategory",
    CATEGORY_ID_VAR,
    Field::object("productsByCategory", PRODUCT).with_arguments(CATEGORY_ID_ARG),
);

pub const SEARCH_PRODUCTS_BY_CATEGORY_AND_NAME: OperationDescriptor = OperationDescriptor::query(
    "SearchProductsByCategoryAndName",
    CATEGORY_ID_NAME_VARS,
    Field::object("searchProductsByCategoryAndName", PRODUCT)
        .with_arguments(CATEGORY_ID_NAME_ARGS),
);

pub const CREATE_CATEGORY: OperationDescriptor = OperationDescriptor::mutation(
    "CreateCategory",
    CATEGORY_INPUT_VAR,
    Field::object("createCategory", CATEGORY_BASE).with_arguments(INPUT_ARG),
);

pub const UPDATE_CATEGORY: OperationDescriptor = OperationDescriptor::mutation(
    "UpdateCategory",
    CATEGORY_UPDATE_VARS,
    Field::object("updateCategory", CATEGORY_BASE).with_arguments(ID_INPUT_ARGS),
);

pub const DELETE_CATEGORY: OperationDescriptor = OperationDescriptor::mutation(
    "DeleteCategory",
    ID_VAR,
    Field::leaf("deleteCategory").with_arguments(ID_ARG),
);

pub const CREATE_PRODUCT: OperationDescriptor = OperationDescriptor::mutation(
    "CreateProduct",
    PRODUCT_INPUT_VAR,
    Field::object("createProduct", PRODUCT).with_arguments(INPUT_ARG),
);

pub const UPDATE_PRODUCT: OperationDescriptor = OperationDescriptor::mutation(
    "UpdateProduct",
    PRODUCT_UPDATE_VARS,
    Field::object("updateProduct", PRODUCT).with_arguments(ID_INPUT_ARGS),
);

pub const DELETE_PRODUCT: OperationDescriptor = OperationDescriptor::mutation(
    "DeleteProduct",
    ID_VAR,
    Field::leaf("deleteProduct").with_arguments(ID_ARG),
);

/// Every operation in the catalog.
pub const ALL: &[&OperationDescriptor] = &[
    &GET_CATEGORIES,
    &GET_CATEGORY,
    &SEARCH_CATEGORIES,
    &ACTIVE_CATEGORIES,
    &GET_PRODUCTS,
    &GET_PRODUCT,
    &SEARCH_PRODUCTS_BY_NAME,
    &PRODUCTS_BY_CATEGORY,
    &SEARCH_PRODUCTS_BY_CATEGORY_AND_NAME,
    &CREATE_CATEGORY,
    &UPDATE_CATEGORY,
    &DELETE_CATEGORY,
    &CREATE_PRODUCT,
    &UPDATE_PRODUCT,
    &DELETE_PRODUCT,
];

/// Looks up an operation by its name.
pub fn find(name: &str) -> Option<&'static OperationDescriptor> {
    ALL.iter().copied().find(|op| op.name == name)
}

// ============================================================================
// Variables
// ============================================================================

/// `{ id }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdVariables<I> {
    pub id: I,
}

/// `{ name }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameVariables {
    pub name: String,
}

/// `{ categoryId }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIdVariables {
    pub category_id: CategoryId,
}

/// `{ categoryId, name }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNameVariables {
    pub category_id: CategoryId,
    pub name: String,
}

/// `{ input }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputVariables<T> {
    pub input: T,
}

/// `{ id, input }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVariables<I, T> {
    pub id: I,
    pub input: T,
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoriesData {
    pub categories: Vec<Category<ProductRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryData {
    pub category: Option<Category<ProductSummary>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchCategoriesData {
    pub search_categories: Vec<Category<ProductRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActiveCategoriesData {
    pub active_categories: Vec<Category<ProductRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductsData {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductData {
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchProductsByNameData {
    pub search_products_by_name: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductsByCategoryData {
    pub products_by_category: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchProductsByCategoryAndNameData {
    pub search_products_by_category_and_name: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCategoryData {
    pub create_category: Category<ProductRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCategoryData {
    pub update_category: Category<ProductRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteCategoryData {
    pub delete_category: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductData {
    pub create_product: Product,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductData {
    pub update_product: Product,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteProductData {
    pub delete_product: bool,
}

// ============================================================================
// Typed operations
// ============================================================================

macro_rules! typed_operation {
    (
        $(#[$meta:meta])*
        $name:ident($vars:ty) -> $response:ident.$field:ident: $payload:ty = $descriptor:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl TypedOperation for $name {
            type Variables = $vars;
            type Response = $response;
            type Payload = $payload;

            const DESCRIPTOR: OperationDescriptor = $descriptor;

            fn into_payload(response: $response) -> $payload {
                response.$field
            }
        }
    };
}

typed_operation!(
    /// All categories, products reduced to their ids.
    GetCategories(NoVariables) -> CategoriesData.categories: Vec<Category<ProductRef>> = GET_CATEGORIES
);

typed_operation!(
    /// One category with product names and descriptions.
    GetCategory(IdVariables<CategoryId>) -> CategoryData.category: Option<Category<ProductSummary>> = GET_CATEGORY
);

typed_operation!(
    /// Categories whose name matches, as decided by the server.
    SearchCategories(NameVariables) -> SearchCategoriesData.search_categories: Vec<Category<ProductRef>> = SEARCH_CATEGORIES
);

typed_operation!(
    /// Categories whose validity window contains the server's current time.
    ActiveCategories(NoVariables) -> ActiveCategoriesData.active_categories: Vec<Category<ProductRef>> = ACTIVE_CATEGORIES
);

typed_operation!(
    GetProducts(NoVariables) -> ProductsData.products: Vec<Product> = GET_PRODUCTS
);

typed_operation!(
    GetProduct(IdVariables<ProductId>) -> ProductData.product: Option<Product> = GET_PRODUCT
);

typed_operation!(
    SearchProductsByName(NameVariables) -> SearchProductsByNameData.search_products_by_name: Vec<Product> = SEARCH_PRODUCTS_BY_NAME
);

typed_operation!(
    ProductsByCategory(CategoryIdVariables) -> ProductsByCategoryData.products_by_category: Vec<Product> = PRODUCTS_BY_CATEGORY
);

typed_operation!(
    SearchProductsByCategoryAndName(CategoryNameVariables) -> SearchProductsByCategoryAndNameData.search_products_by_category_and_name: Vec<Product> = SEARCH_PRODUCTS_BY_CATEGORY_AND_NAME
);

typed_operation!(
    /// Creates a category; the server assigns the id.
    CreateCategory(InputVariables<CategoryInput>) -> CreateCategoryData.create_category: Category<ProductRef> = CREATE_CATEGORY
);

typed_operation!(
    UpdateCategory(UpdateVariables<CategoryId, CategoryInput>) -> UpdateCategoryData.update_category: Category<ProductRef> = UPDATE_CATEGORY
);

typed_operation!(
    DeleteCategory(IdVariables<CategoryId>) -> DeleteCategoryData.delete_category: bool = DELETE_CATEGORY
);

typed_operation!(
    /// Creates a product; the server assigns the id.
    CreateProduct(InputVariables<ProductInput>) -> CreateProductData.create_product: Product = CREATE_PRODUCT
);

typed_operation!(
    UpdateProduct(UpdateVariables<ProductId, ProductInput>) -> UpdateProductData.update_product: Product = UPDATE_PRODUCT
);

typed_operation!(
    DeleteProduct(IdVariables<ProductId>) -> DeleteProductData.delete_product: bool = DELETE_PRODUCT
);
