//! Plain-text rendering of catalog records.

use catalog_core::{Category, Diagnostic, Product, ProductSummary};
use std::fmt::Write;

/// Describes a validity window.
pub fn validity(from: Option<&str>, to: Option<&str>) -> String {
    match (from, to) {
        (Some(from), Some(to)) => format!("{} .. {}", from, to),
        (Some(from), None) => format!("from {}", from),
        (None, Some(to)) => format!("until {}", to),
        (None, None) => "always".to_string(),
    }
}

pub fn category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories.\n".to_string();
    }
    let width = categories.iter().map(|c| c.id.as_str().len()).max().unwrap_or(0);
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(
            out,
            "{:<width$}  {}  ({}, {} product(s))",
            category.id.as_str(),
            category.name,
            validity(category.valid_from.as_deref(), category.valid_to.as_deref()),
            category.product_count(),
            width = width,
        );
    }
    out
}

pub fn category_detail(category: &Category<ProductSummary>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", category.name, category.id);
    let _ = writeln!(
        out,
        "  valid: {}",
        validity(category.valid_from.as_deref(), category.valid_to.as_deref())
    );
    match category.products.as_deref() {
        Some(products) if !products.is_empty() => {
            let _ = writeln!(out, "  products:");
            for product in products {
                match &product.description {
                    Some(description) => {
                        let _ = writeln!(out, "    {}  {} - {}", product.id, product.name, description);
                    }
                    None => {
                        let _ = writeln!(out, "    {}  {}", product.id, product.name);
                    }
                }
            }
        }
        _ => {
            let _ = writeln!(out, "  products: none");
        }
    }
    out
}

pub fn product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.\n".to_string();
    }
    let width = products.iter().map(|p| p.id.as_str().len()).max().unwrap_or(0);
    let mut out = String::new();
    for product in products {
        let category = product
            .category
            .as_ref()
            .map_or_else(|| product.category_id.to_string(), |c| c.name.clone());
        let _ = writeln!(
            out,
            "{:<width$}  {}  [{}]",
            product.id.as_str(),
            product.name,
            category,
            width = width,
        );
    }
    out
}

pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", product.name, product.id);
    if let Some(description) = &product.description {
        let _ = writeln!(out, "  {}", description);
    }
    match &product.category {
        Some(category) => {
            let _ = writeln!(out, "  category: {} ({})", category.name, category.id);
        }
        None => {
            let _ = writeln!(out, "  category: {}", product.category_id);
        }
    }
    if let Some(images) = product.images.as_deref().filter(|i| !i.is_empty()) {
        let _ = writeln!(out, "  images:");
        for image in images {
            let _ = writeln!(out, "    {}", image);
        }
    }
    out
}

/// One diagnostic with its labels and message.
pub fn diagnostic(diagnostic: &Diagnostic) -> String {
    let mut out = format!("[{}] {}\n", diagnostic.code, diagnostic.title);
    for label in &diagnostic.labels {
        let _ = writeln!(out, "  at {}: {}", label.path, label.message);
    }
    if let Some(message) = &diagnostic.message {
        let _ = writeln!(out, "  {}", message);
    }
    out
}
