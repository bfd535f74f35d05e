//! Core types for the catalog GraphQL client.
//!
//! This crate provides the shared vocabulary used by the SDK and the
//! terminal shell:
//! - Categories and products as returned by the remote schema
//! - Input shapes submitted on create/update
//! - Diagnostics reported when the operation catalog disagrees with a schema

pub mod diagnostics;
pub mod entities;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSeverity, Label};
pub use entities::{
    Category, CategoryId, CategoryInput, CategorySummary, IdError, Product, ProductId,
    ProductInput, ProductRef, ProductSummary,
};
