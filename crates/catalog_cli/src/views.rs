//! Category and product views.
//!
//! A view owns the state of one page: the listing it last loaded and the
//! record it last opened. Views are shared by reference, so several loads can
//! be in flight at once. Every request takes a ticket from its [`ViewState`];
//! a response is applied only while its ticket is current and the view is
//! mounted, so late answers never overwrite newer state.
//!
//! After a successful create, update or delete the view reloads its current
//! listing. Nothing is cached between requests.

use catalog_core::{Category, CategoryId, CategoryInput, Product, ProductId, ProductInput, ProductSummary};
use catalog_sdk::{CatalogClient, SdkError, SdkResult};
use tokio::sync::RwLock;
use tracing::debug;

/// The state of one asynchronous load.
#[derive(Debug, Clone, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Pending,
    Ready(T),
    Failed(SdkError),
}

impl<T> Loadable<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SdkError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Identifies one request issued by a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A [`Loadable`] guarded by request tickets and a mount flag.
#[derive(Debug)]
pub struct ViewState<T> {
    latest: u64,
    mounted: bool,
    state: Loadable<T>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            mounted: true,
            state: Loadable::Idle,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        if self.mounted {
            self.state = Loadable::Pending;
        }
        Ticket(self.latest)
    }

    /// Applies a response. Returns false if it was discarded.
    pub fn resolve(&mut self, ticket: Ticket, result: SdkResult<T>) -> bool {
        if !self.mounted {
            debug!(ticket = ticket.0, "discarding response for unmounted view");
            return false;
        }
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "discarding stale response");
            return false;
        }
        self.state = match result {
            Ok(value) => Loadable::Ready(value),
            Err(error) => Loadable::Failed(error),
        };
        true
    }

    /// Detaches the state. Later responses are dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.state = Loadable::Idle;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Which categories the list shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryListing {
    #[default]
    All,
    Active,
    Search(String),
}

pub struct CategoriesView {
    client: CatalogClient,
    listing: RwLock<CategoryListing>,
    list: RwLock<ViewState<Vec<Category>>>,
    detail: RwLock<ViewState<Option<Category<ProductSummary>>>>,
}

impl CategoriesView {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            listing: RwLock::new(CategoryListing::default()),
            list: RwLock::new(ViewState::new()),
            detail: RwLock::new(ViewState::new()),
        }
    }

    pub async fn listing(&self) -> CategoryListing {
        self.listing.read().await.clone()
    }

    pub async fn list(&self) -> Loadable<Vec<Category>> {
        self.list.read().await.state().clone()
    }

    pub async fn detail(&self) -> Loadable<Option<Category<ProductSummary>>> {
        self.detail.read().await.state().clone()
    }

    /// Switches the listing and loads it.
    pub async fn load(&self, listing: CategoryListing) {
        *self.listing.write().await = listing;
        self.refetch().await;
    }

    /// Reloads the current listing.
    pub async fn refetch(&self) {
        let listing = self.listing().await;
        let ticket = self.list.write().await.begin();
        let result = match listing {
            CategoryListing::All => self.client.categories().await,
            CategoryListing::Active => self.client.active_categories().await,
            CategoryListing::Search(name) => self.client.search_categories(name).await,
        };
        self.list.write().await.resolve(ticket, result);
    }

    pub async fn show(&self, id: CategoryId) {
        let ticket = self.detail.write().await.begin();
        let result = self.client.category(id).await;
        self.detail.write().await.resolve(ticket, result);
    }

    pub async fn create(&self, input: CategoryInput) -> SdkResult<Category> {
        let created = self.client.create_category(input).await?;
        self.refetch().await;
        Ok(created)
    }

    pub async fn update(&self, id: CategoryId, input: CategoryInput) -> SdkResult<Category> {
        let updated = self.client.update_category(id, input).await?;
        self.refetch().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: CategoryId) -> SdkResult<bool> {
        let deleted = self.client.delete_category(id).await?;
        self.refetch().await;
        Ok(deleted)
    }

    /// Detaches the view. Loads still in flight land nowhere.
    pub async fn unmount(&self) {
        self.list.write().await.unmount();
        self.detail.write().await.unmount();
    }
}

// ============================================================================
// Products
// ============================================================================

/// Which products the list shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductListing {
    #[default]
    All,
    Search(String),
    ByCategory(CategoryId),
    SearchInCategory(CategoryId, String),
}

pub struct ProductsView {
    client: CatalogClient,
    listing: RwLock<ProductListing>,
    list: RwLock<ViewState<Vec<Product>>>,
    detail: RwLock<ViewState<Option<Product>>>,
}

impl ProductsView {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            listing: RwLock::new(ProductListing::default()),
            list: RwLock::new(ViewState::new()),
            detail: RwLock::new(ViewState::new()),
        }
    }

    pub async fn listing(&self) -> ProductListing {
        self.listing.read().await.clone()
    }

    pub async fn list(&self) -> Loadable<Vec<Product>> {
        self.list.read().await.state().clone()
    }

    pub async fn detail(&self) -> Loadable<Option<Product>> {
        self.detail.read().await.state().clone()
    }

    pub async fn load(&self, listing: ProductListing) {
        *self.listing.write().await = listing;
        self.refetch().await;
    }

    pub async fn refetch(&self) {
        let listing = self.listing().await;
        let ticket = self.list.write().await.begin();
        let result = match listing {
            ProductListing::All => self.client.products().await,
            ProductListing::Search(name) => self.client.search_products_by_name(name).await,
            ProductListing::ByCategory(id) => self.client.products_by_category(id).await,
            ProductListing::SearchInCategory(id, name) => {
                self.client.search_products_by_category_and_name(id, name).await
            }
        };
        self.list.write().await.resolve(ticket, result);
    }

    pub async fn show(&self, id: ProductId) {
        let ticket = self.detail.write().await.begin();
        let result = self.client.product(id).await;
        self.detail.write().await.resolve(ticket, result);
    }

    pub async fn create(&self, input: ProductInput) -> SdkResult<Product> {
        let created = self.client.create_product(input).await?;
        self.refetch().await;
        Ok(created)
    }

    pub async fn update(&self, id: ProductId, input: ProductInput) -> SdkResult<Product> {
        let updated = self.client.update_product(id, input).await?;
        self.refetch().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: ProductId) -> SdkResult<bool> {
        let deleted = self.client.delete_product(id).await?;
        self.refetch().await;
        Ok(deleted)
    }

    pub async fn unmount(&self) {
        self.list.write().await.unmount();
        self.detail.write().await.unmount();
    }
}
