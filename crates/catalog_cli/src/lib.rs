//! Terminal client for the product catalog.
//!
//! # Usage
//!
//! ```bash
//! # List categories (the default route)
//! catalog
//!
//! # Search products inside one category
//! catalog products search tea --category 3
//!
//! # Create a category valid for one year
//! catalog categories create Beverages --valid-from "2024-01-01 00:00" --valid-to "2024-12-31 23:59"
//!
//! # Create a product with an image read from disk
//! catalog products create Sencha --category 3 --image-file sencha.png
//!
//! # Print every operation document
//! catalog operations
//!
//! # Check the operations against a running server
//! catalog --endpoint http://localhost:8080/graphql check
//! ```

pub mod render;
pub mod views;

use catalog_core::{CategoryId, CategoryInput, ProductId, ProductInput};
use base64::Engine as _;
use catalog_sdk::{operations, CatalogClient, ClientConfig, SdkError, SdkResult};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use views::{CategoriesView, CategoryListing, Loadable, ProductListing, ProductsView};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/graphql";

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// GraphQL endpoint
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Extra request header
    #[arg(long = "header", global = true, value_name = "KEY=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse and edit categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Browse and edit products
    Products {
        #[command(subcommand)]
        action: Option<ProductAction>,
    },

    /// Print the GraphQL document of every operation
    Operations {
        /// Only print this operation
        name: Option<String>,
    },

    /// Validate the operations against the endpoint's schema
    Check,

    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// List all categories
    List,

    /// List categories valid today
    Active,

    /// Search categories by name
    Search { name: String },

    /// Show one category with its products
    Show { id: String },

    /// Create a category
    Create {
        name: String,

        /// Start of validity, passed through verbatim (e.g. "2024-01-01 00:00")
        #[arg(long)]
        valid_from: Option<String>,

        /// End of validity, passed through verbatim
        #[arg(long)]
        valid_to: Option<String>,
    },

    /// Replace a category's fields
    Update {
        id: String,

        name: String,

        /// Start of validity, passed through verbatim (e.g. "2024-01-01 00:00")
        #[arg(long)]
        valid_from: Option<String>,

        /// End of validity, passed through verbatim
        #[arg(long)]
        valid_to: Option<String>,
    },

    /// Delete a category
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProductAction {
    /// List all products
    List,

    /// Search products by name
    Search {
        name: String,

        /// Restrict the search to one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one product
    Show { id: String },

    /// List the products of a category
    ByCategory { id: String },

    /// Create a product
    Create {
        name: String,

        /// Category id
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        /// Base64 image data, optionally as a `data:` URL (repeatable)
        #[arg(long = "image", value_name = "BASE64")]
        images: Vec<String>,

        /// Image file to upload, sent base64 encoded (repeatable)
        #[arg(long = "image-file", value_name = "PATH")]
        image_files: Vec<PathBuf>,
    },

    /// Replace a product's fields
    Update {
        id: String,

        name: String,

        /// Category id
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        /// Base64 image data, optionally as a `data:` URL (repeatable)
        #[arg(long = "image", value_name = "BASE64")]
        images: Vec<String>,

        /// Image file to upload, sent base64 encoded (repeatable)
        #[arg(long = "image-file", value_name = "PATH")]
        image_files: Vec<PathBuf>,
    },

    /// Delete a product
    Delete { id: String },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty header name in `{}`", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Builds the one client the process uses.
pub fn bootstrap(cli: &Cli) -> SdkResult<CatalogClient> {
    let mut config = ClientConfig::new(cli.endpoint.as_str());
    if let Some(seconds) = cli.timeout {
        config = config.timeout(Duration::from_secs(seconds));
    }
    for (key, value) in &cli.headers {
        config = config.header(key.as_str(), value.as_str());
    }
    CatalogClient::with_config(config)
}

pub async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match &cli.command {
        Some(Commands::Version) => {
            println!("catalog {}", env!("CARGO_PKG_VERSION"));
            return Ok(0);
        }
        Some(Commands::Operations { name }) => return Ok(print_operations(name.as_deref())),
        _ => {}
    }

    let client = bootstrap(&cli)?;
    tracing::debug!(endpoint = %cli.endpoint, "client ready");
    run_with_client(cli, client).await
}

/// Runs a route against an existing client.
pub async fn run_with_client(
    cli: Cli,
    client: CatalogClient,
) -> Result<i32, Box<dyn std::error::Error>> {
    let quiet = cli.quiet;
    let code = match cli.command {
        None => categories(CategoryAction::List, client, quiet).await,
        Some(Commands::Categories { action }) => {
            categories(action.unwrap_or(CategoryAction::List), client, quiet).await
        }
        Some(Commands::Products { action }) => {
            products(action.unwrap_or(ProductAction::List), client, quiet).await
        }
        Some(Commands::Check) => check(&client, cli.verbose).await?,
        Some(Commands::Operations { name }) => print_operations(name.as_deref()),
        Some(Commands::Version) => {
            println!("catalog {}", env!("CARGO_PKG_VERSION"));
            0
        }
    };
    Ok(code)
}

fn category_input(name: String, valid_from: Option<String>, valid_to: Option<String>) -> CategoryInput {
    let mut input = CategoryInput::new(name);
    if let Some(from) = valid_from {
        input = input.valid_from(from);
    }
    if let Some(to) = valid_to {
        input = input.valid_to(to);
    }
    input
}

fn product_input(
    name: String,
    category: String,
    description: Option<String>,
    images: Vec<String>,
) -> ProductInput {
    let mut input = ProductInput::new(name, CategoryId::new(category));
    if let Some(description) = description {
        input = input.description(description);
    }
    if !images.is_empty() {
        input = input.images(images);
    }
    input
}

/// Reads an image file as the base64 text the schema expects.
fn encode_image_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Inline images first, then the encoded files in flag order.
fn collect_images(mut images: Vec<String>, files: &[PathBuf]) -> Result<Vec<String>, i32> {
    for path in files {
        match encode_image_file(path) {
            Ok(encoded) => images.push(encoded),
            Err(error) => {
                eprintln!(
                    "{} Cannot read image {}: {}",
                    "Error:".red().bold(),
                    path.display(),
                    error
                );
                return Err(1);
            }
        }
    }
    Ok(images)
}

async fn categories(action: CategoryAction, client: CatalogClient, quiet: bool) -> i32 {
    let view = CategoriesView::new(client);

    let code = match action {
        CategoryAction::List => {
            view.load(CategoryListing::All).await;
            print_loadable(&view.list().await, |list| render::category_table(list))
        }
        CategoryAction::Active => {
            view.load(CategoryListing::Active).await;
            print_loadable(&view.list().await, |list| render::category_table(list))
        }
        CategoryAction::Search { name } => {
            view.load(CategoryListing::Search(name)).await;
            print_loadable(&view.list().await, |list| render::category_table(list))
        }
        CategoryAction::Show { id } => {
            view.show(CategoryId::new(id.as_str())).await;
            match view.detail().await {
                Loadable::Ready(None) => not_found("Category", &id),
                state => print_loadable(&state, |detail| {
                    detail.as_ref().map(render::category_detail).unwrap_or_default()
                }),
            }
        }
        CategoryAction::Create {
            name,
            valid_from,
            valid_to,
        } => {
            let result = view.create(category_input(name, valid_from, valid_to)).await;
            report_mutation(
                result.map(|c| format!("Created category {} ({})", c.name, c.id)),
                &view.list().await,
                quiet,
                |list| render::category_table(list),
            )
        }
        CategoryAction::Update {
            id,
            name,
            valid_from,
            valid_to,
        } => {
            let result = view
                .update(CategoryId::new(id), category_input(name, valid_from, valid_to))
                .await;
            report_mutation(
                result.map(|c| format!("Updated category {} ({})", c.name, c.id)),
                &view.list().await,
                quiet,
                |list| render::category_table(list),
            )
        }
        CategoryAction::Delete { id } => match view.delete(CategoryId::new(id.as_str())).await {
            Ok(false) => not_deleted("Category", &id),
            result => report_mutation(
                result.map(|_| format!("Deleted category {}", id)),
                &view.list().await,
                quiet,
                |list| render::category_table(list),
            ),
        },
    };

    view.unmount().await;
    code
}

async fn products(action: ProductAction, client: CatalogClient, quiet: bool) -> i32 {
    let view = ProductsView::new(client);

    let code = match action {
        ProductAction::List => {
            view.load(ProductListing::All).await;
            print_loadable(&view.list().await, |list| render::product_table(list))
        }
        ProductAction::Search { name, category } => {
            let listing = match category {
                Some(category) => ProductListing::SearchInCategory(CategoryId::new(category), name),
                None => ProductListing::Search(name),
            };
            view.load(listing).await;
            print_loadable(&view.list().await, |list| render::product_table(list))
        }
        ProductAction::ByCategory { id } => {
            view.load(ProductListing::ByCategory(CategoryId::new(id))).await;
            print_loadable(&view.list().await, |list| render::product_table(list))
        }
        ProductAction::Show { id } => {
            view.show(ProductId::new(id.as_str())).await;
            match view.detail().await {
                Loadable::Ready(None) => not_found("Product", &id),
                state => print_loadable(&state, |detail| {
                    detail.as_ref().map(render::product_detail).unwrap_or_default()
                }),
            }
        }
        ProductAction::Create {
            name,
            category,
            description,
            images,
            image_files,
        } => {
            let images = match collect_images(images, &image_files) {
                Ok(images) => images,
                Err(code) => return code,
            };
            let result = view
                .create(product_input(name, category, description, images))
                .await;
            report_mutation(
                result.map(|p| format!("Created product {} ({})", p.name, p.id)),
                &view.list().await,
                quiet,
                |list| render::product_table(list),
            )
        }
        ProductAction::Update {
            id,
            name,
            category,
            description,
            images,
            image_files,
        } => {
            let images = match collect_images(images, &image_files) {
                Ok(images) => images,
                Err(code) => return code,
            };
            let result = view
                .update(
                    ProductId::new(id),
                    product_input(name, category, description, images),
                )
                .await;
            report_mutation(
                result.map(|p| format!("Updated product {} ({})", p.name, p.id)),
                &view.list().await,
                quiet,
                |list| render::product_table(list),
            )
        }
        ProductAction::Delete { id } => match view.delete(ProductId::new(id.as_str())).await {
            Ok(false) => not_deleted("Product", &id),
            result => report_mutation(
                result.map(|_| format!("Deleted product {}", id)),
                &view.list().await,
                quiet,
                |list| render::product_table(list),
            ),
        },
    };

    view.unmount().await;
    code
}

fn print_loadable<T>(state: &Loadable<T>, render: impl Fn(&T) -> String) -> i32 {
    match state {
        Loadable::Ready(value) => {
            print!("{}", render(value));
            0
        }
        Loadable::Failed(error) => {
            print_error(error);
            1
        }
        Loadable::Idle | Loadable::Pending => 0,
    }
}

/// Prints a mutation outcome followed by the refreshed listing.
fn report_mutation<T>(
    result: SdkResult<String>,
    listing: &Loadable<T>,
    quiet: bool,
    render: impl Fn(&T) -> String,
) -> i32 {
    match result {
        Ok(message) => {
            println!("{} {}", "Success:".green().bold(), message);
            if quiet {
                0
            } else {
                print_loadable(listing, render)
            }
        }
        Err(error) => {
            print_error(&error);
            1
        }
    }
}

fn not_found(kind: &str, id: &str) -> i32 {
    eprintln!("{} {} {} not found", "Error:".red().bold(), kind, id);
    1
}

fn not_deleted(kind: &str, id: &str) -> i32 {
    eprintln!("{} {} {} was not deleted", "Warning:".yellow().bold(), kind, id);
    1
}

fn print_error(error: &SdkError) {
    eprintln!("{} {}", "Error:".red().bold(), error.message);
    for graphql_error in error.graphql_errors.iter().skip(1) {
        eprintln!("  {} {}", "-->".blue(), graphql_error.message);
    }
    if error.is_transport() {
        eprintln!("  {} {}", "code:".dimmed(), error.code);
    }
}

fn print_operations(name: Option<&str>) -> i32 {
    match name {
        Some(name) => match operations::find(name) {
            Some(descriptor) => {
                print!("{}", descriptor.document());
                0
            }
            None => {
                eprintln!("{} Unknown operation `{}`", "Error:".red().bold(), name);
                1
            }
        },
        None => {
            for (i, descriptor) in operations::ALL.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", format!("# {}", descriptor.name).dimmed());
                print!("{}", descriptor.document());
            }
            0
        }
    }
}

async fn check(client: &CatalogClient, verbose: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let diagnostics = match client.verify_catalog().await {
        Ok(diagnostics) => diagnostics,
        Err(error) => {
            print_error(&error);
            return Ok(1);
        }
    };

    for diagnostic in diagnostics.errors() {
        eprint!("{} {}", "Error".red().bold(), render::diagnostic(diagnostic));
    }
    if verbose {
        for diagnostic in diagnostics.warnings() {
            eprint!("{} {}", "Warning".yellow().bold(), render::diagnostic(diagnostic));
        }
    }

    if diagnostics.has_errors() {
        eprintln!(
            "{} {} problem(s) found",
            "Failed:".red().bold(),
            diagnostics.error_count()
        );
        Ok(1)
    } else {
        println!(
            "{} {} operation(s) match the schema",
            "Success:".green().bold(),
            operations::ALL.len()
        );
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_route_defaults_to_category_list() {
        let cli = Cli::try_parse_from(["catalog"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.timeout, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "catalog",
            "products",
            "search",
            "tea",
            "--category",
            "3",
            "--header",
            "Authorization=Bearer abc",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(
            cli.headers,
            vec![("Authorization".to_string(), "Bearer abc".to_string())]
        );
        assert_eq!(cli.timeout, Some(5));
        match cli.command {
            Some(Commands::Products {
                action: Some(ProductAction::Search { name, category }),
            }) => {
                assert_eq!(name, "tea");
                assert_eq!(category.as_deref(), Some("3"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_header_parser() {
        assert_eq!(
            parse_header("X-Trace = on").unwrap(),
            ("X-Trace".to_string(), "on".to_string())
        );
        assert!(parse_header("missing-separator").is_err());
        assert!(parse_header("=value").is_err());
    }

    #[test]
    fn test_product_create_requires_category() {
        assert!(Cli::try_parse_from(["catalog", "products", "create", "Sencha"]).is_err());

        let cli = Cli::try_parse_from([
            "catalog", "products", "create", "Sencha", "--category", "1", "--image", "a.png",
            "--image", "b.png",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Products {
                action: Some(ProductAction::Create { images, .. }),
            }) => assert_eq!(images, vec!["a.png", "b.png"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_image_files_are_base64_encoded() {
        let dir = std::env::temp_dir().join(format!("catalog-cli-images-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hello.bin");
        std::fs::write(&path, b"hello").unwrap();

        let cli = Cli::try_parse_from([
            "catalog",
            "products",
            "create",
            "Sencha",
            "--category",
            "1",
            "--image",
            "data:image/png;base64,AAAA",
            "--image-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let Some(Commands::Products {
            action: Some(ProductAction::Create {
                images, image_files, ..
            }),
        }) = cli.command
        else {
            panic!("expected products create");
        };

        assert_eq!(encode_image_file(&path).unwrap(), "aGVsbG8=");
        assert_eq!(
            collect_images(images, &image_files).unwrap(),
            vec!["data:image/png;base64,AAAA", "aGVsbG8="]
        );
        assert_eq!(collect_images(vec![], &[dir.join("missing.png")]), Err(1));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_validity_with_time_passes_through() {
        let cli = Cli::try_parse_from([
            "catalog",
            "categories",
            "create",
            "Beverages",
            "--valid-from",
            "2024-01-01 00:00",
            "--valid-to",
            "2024-12-31 23:59",
        ])
        .unwrap();
        let Some(Commands::Categories {
            action: Some(CategoryAction::Create {
                name,
                valid_from,
                valid_to,
            }),
        }) = cli.command
        else {
            panic!("expected categories create");
        };

        let input = category_input(name, valid_from, valid_to);
        assert_eq!(input.valid_from.as_deref(), Some("2024-01-01 00:00"));
        assert_eq!(input.valid_to.as_deref(), Some("2024-12-31 23:59"));
    }

    #[test]
    fn test_bootstrap_rejects_https() {
        let cli = Cli::try_parse_from(["catalog", "--endpoint", "https://example.com/graphql"]).unwrap();
        assert_eq!(
            bootstrap(&cli).unwrap_err().code,
            catalog_sdk::ErrorCode::HttpsNotSupported
        );
    }

    #[test]
    fn test_inputs_from_flags() {
        let input = category_input("Tea".into(), Some("2024-01-01".into()), None);
        assert_eq!(input.valid_from.as_deref(), Some("2024-01-01"));
        assert!(input.valid_to.is_none());

        let input = product_input("Sencha".into(), "1".into(), None, vec![]);
        assert_eq!(input.category_id.as_str(), "1");
        assert!(input.images.is_none());
    }

    #[test]
    fn test_unknown_operation_name() {
        assert_eq!(print_operations(Some("GetEverything")), 1);
        assert_eq!(print_operations(Some("GetProduct")), 0);
    }
}
