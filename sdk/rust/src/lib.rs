//! Catalog SDK
//!
//! Typed GraphQL data access for the product catalog: categories and
//! products, read and written through a fixed set of named operations.
//!
//! # Typed Client
//!
//! ```ignore
//! use catalog_sdk::{CatalogClient, ClientConfig};
//! use catalog_sdk::operations::{GetCategory, IdVariables};
//!
//! let client = CatalogClient::with_config(ClientConfig::new("http://localhost:8080/graphql"))?;
//!
//! // Named methods per operation
//! let categories = client.categories().await?;
//!
//! // Or run any catalog operation by type
//! let category = client.run::<GetCategory>(IdVariables { id: "4".into() }).await?;
//! ```
//!
//! # Start-up Verification
//!
//! Every operation is described structurally (see [`document`]) and can be
//! checked against the server's introspected schema before first use:
//!
//! ```ignore
//! let diagnostics = client.verify_catalog().await?;
//! for diagnostic in diagnostics.errors() {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

pub mod client;
pub mod document;
pub mod error;
pub mod operations;
pub mod schema;
pub mod typed;

// Re-exports for convenience
pub use catalog_core::{
    Category, CategoryId, CategoryInput, CategorySummary, Diagnostic, DiagnosticBag, Product,
    ProductId, ProductInput, ProductRef, ProductSummary,
};
pub use client::{CatalogClient, ClientConfig, GraphQLRequest, HttpTransport, RawResponse, Transport};
pub use document::{Argument, Field, OperationDescriptor, TypeRef, VariableDefinition};
pub use error::{ErrorCode, ResultExt, SdkError, SdkResult};
pub use schema::{SchemaBuilder, SchemaIndex};
pub use typed::{GraphQLError, NoVariables, OperationKind, TypedOperation, TypedResponse};
