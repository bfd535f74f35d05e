//! Catalog GraphQL client.
//!
//! Provides the data-access layer the shell talks to:
//! - A pluggable [`Transport`] (HTTP by default)
//! - Typed execution of catalog operations
//! - Start-up verification of the catalog against the live schema
//!
//! The client performs no retries, no caching and no request deduplication.
//! Every failure is returned to the caller as an [`SdkError`].
//!
//! # Example
//!
//! ```ignore
//! let client = CatalogClient::new("http://localhost:8080/graphql")?;
//! let categories = client.categories().await?;
//! let tea = client.run::<SearchProductsByName>(NameVariables { name: "tea".into() }).await?;
//! ```

use crate::error::{ErrorCode, ResultExt, SdkError, SdkResult};
use crate::operations::{self, *};
use crate::schema::{SchemaIndex, INTROSPECTION_OPERATION, INTROSPECTION_QUERY};
use crate::typed::{GraphQLError, NoVariables, TypedOperation, TypedResponse};
use async_trait::async_trait;
use bytes::Bytes;
use catalog_core::{
    Category, CategoryId, CategoryInput, DiagnosticBag, Product, ProductId, ProductInput,
    ProductRef, ProductSummary,
};
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use hyper::{Method, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// URL of the GraphQL endpoint.
    pub url: String,
    /// Per-request timeout. `None` leaves waiting to the transport.
    pub timeout: Option<Duration>,
    /// Headers sent with every request.
    pub headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates a new config with a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a default header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// A GraphQL request as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    pub variables: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    /// Builds the request for a typed operation.
    pub fn for_operation<Op: TypedOperation>(variables: &Op::Variables) -> SdkResult<Self> {
        let variables = serde_json::to_value(variables)
            .map_sdk_err_with(ErrorCode::SerializeError, "Failed to serialize variables")?;
        Ok(Self {
            query: Op::DESCRIPTOR.document(),
            variables,
            operation_name: Some(Op::name().to_string()),
        })
    }
}

/// A GraphQL response before typing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

/// Carries a request to the server and brings back its response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &GraphQLRequest) -> SdkResult<RawResponse>;
}

// ============================================================================
// HTTP transport
// ============================================================================

/// HTTP/1 transport: one JSON `POST` per operation.
pub struct HttpTransport {
    uri: Uri,
    timeout: Option<Duration>,
    headers: HeaderMap,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> SdkResult<Self> {
        let url = config.url.trim();
        if url.starts_with("https://") {
            return Err(SdkError::new(
                ErrorCode::HttpsNotSupported,
                "HTTPS is not supported by the built-in transport. Use a proxy or plug in another Transport.",
            ));
        }

        let uri: Uri = url
            .parse()
            .map_sdk_err_with(ErrorCode::InvalidUrl, format!("Invalid URL: {}", url))?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(SdkError::new(
                ErrorCode::InvalidUrl,
                format!("Expected an http:// URL with a host, got {}", url),
            ));
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_sdk_err_with(
                ErrorCode::InvalidRequest,
                format!("Invalid header name: {}", key),
            )?;
            let value = HeaderValue::from_str(value).map_sdk_err_with(
                ErrorCode::InvalidRequest,
                format!("Invalid value for header {}", key),
            )?;
            headers.insert(name, value);
        }

        Ok(Self {
            uri,
            timeout: config.timeout,
            headers,
            client: Client::builder(TokioExecutor::new()).build_http(),
        })
    }

    async fn exchange(&self, body: Vec<u8>) -> SdkResult<(hyper::StatusCode, Bytes)> {
        let mut builder = hyper::Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.clone());
        }
        let request = builder
            .body(Full::new(Bytes::from(body)))
            .map_sdk_err(ErrorCode::InvalidRequest)?;

        let response = self.client.request(request).await.map_err(|e| {
            if e.is_connect() {
                SdkError::new(
                    ErrorCode::ConnectionRefused,
                    format!("Connection failed: {}", e),
                )
            } else {
                SdkError::network(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_sdk_err_with(ErrorCode::NetworkError, "Failed to read response body")?
            .to_bytes();
        Ok((status, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &GraphQLRequest) -> SdkResult<RawResponse> {
        let body = serde_json::to_vec(request)
            .map_sdk_err_with(ErrorCode::SerializeError, "Failed to serialize request")?;

        let (status, bytes) = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(body))
                .await
                .map_err(|_| SdkError::timeout())??,
            None => self.exchange(body).await?,
        };

        if !status.is_success() {
            return Err(
                SdkError::new(ErrorCode::HttpError, format!("HTTP error: {}", status))
                    .with_extension("status", status.as_u16())
                    .with_extension("body", snippet(&bytes)),
            );
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            SdkError::new(
                ErrorCode::InvalidResponse,
                format!("Failed to parse response: {}. Body: {}", e, snippet(&bytes)),
            )
        })
    }
}

fn snippet(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.chars().take(200).collect()
}

// ============================================================================
// Client
// ============================================================================

/// The catalog client. Cloning is cheap and shares the transport.
#[derive(Clone)]
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient").finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Creates an HTTP client for the given URL.
    pub fn new(url: impl Into<String>) -> SdkResult<Self> {
        Self::with_config(ClientConfig::new(url))
    }

    /// Creates an HTTP client from configuration.
    pub fn with_config(config: ClientConfig) -> SdkResult<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(&config)?)))
    }

    /// Creates a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends a request as-is.
    pub async fn execute_raw(&self, request: &GraphQLRequest) -> SdkResult<RawResponse> {
        self.transport.send(request).await
    }

    /// Executes a typed operation. Errors and partial data are passed through.
    pub async fn execute<Op: TypedOperation>(
        &self,
        variables: Op::Variables,
    ) -> SdkResult<TypedResponse<Op::Response>> {
        let request = GraphQLRequest::for_operation::<Op>(&variables)?;
        debug!(operation = Op::name(), "sending operation");

        let response = self.execute_raw(&request).await.map_err(|e| {
            warn!(operation = Op::name(), code = %e.code, "transport failure: {}", e.message);
            e
        })?;

        let errors = response.errors.unwrap_or_default();
        if !errors.is_empty() {
            warn!(
                operation = Op::name(),
                count = errors.len(),
                "server returned errors: {}",
                errors[0].message
            );
        }

        TypedResponse::from_raw(response.data, errors)
    }

    /// Executes a typed operation and unwraps its payload.
    ///
    /// Any GraphQL error fails the call, even when partial data came back.
    pub async fn run<Op: TypedOperation>(&self, variables: Op::Variables) -> SdkResult<Op::Payload> {
        let data = self.execute::<Op>(variables).await?.into_result()?;
        Ok(Op::into_payload(data))
    }

    /// Fetches the live schema.
    pub async fn introspect(&self) -> SdkResult<SchemaIndex> {
        let request = GraphQLRequest {
            query: INTROSPECTION_QUERY.to_string(),
            variables: serde_json::json!({}),
            operation_name: Some(INTROSPECTION_OPERATION.to_string()),
        };
        let response = self.execute_raw(&request).await?;
        let errors = response.errors.unwrap_or_default();
        if !errors.is_empty() {
            return Err(SdkError::from_graphql(errors));
        }
        let data = response
            .data
            .ok_or_else(|| SdkError::new(ErrorCode::NoData, "No data in introspection response"))?;
        SchemaIndex::from_introspection(data)
    }

    /// Checks every catalog operation against the live schema.
    pub async fn verify_catalog(&self) -> SdkResult<DiagnosticBag> {
        let schema = self.introspect().await?;
        let bag = schema.validate_all(operations::ALL);
        debug!(
            operations = operations::ALL.len(),
            errors = bag.error_count(),
            "verified operation catalog"
        );
        Ok(bag)
    }
}

/// One method per catalog operation.
impl CatalogClient {
    pub async fn categories(&self) -> SdkResult<Vec<Category<ProductRef>>> {
        self.run::<GetCategories>(NoVariables).await
    }

    pub async fn category(&self, id: CategoryId) -> SdkResult<Option<Category<ProductSummary>>> {
        self.run::<GetCategory>(IdVariables { id }).await
    }

    pub async fn search_categories(
        &self,
        name: impl Into<String>,
    ) -> SdkResult<Vec<Category<ProductRef>>> {
        self.run::<SearchCategories>(NameVariables { name: name.into() })
            .await
    }

    pub async fn active_categories(&self) -> SdkResult<Vec<Category<ProductRef>>> {
        self.run::<ActiveCategories>(NoVariables).await
    }

    pub async fn create_category(&self, input: CategoryInput) -> SdkResult<Category<ProductRef>> {
        self.run::<CreateCategory>(InputVariables { input }).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> SdkResult<Category<ProductRef>> {
        self.run::<UpdateCategory>(UpdateVariables { id, input })
            .await
    }

    pub async fn delete_category(&self, id: CategoryId) -> SdkResult<bool> {
        self.run::<DeleteCategory>(IdVariables { id }).await
    }

    pub async fn products(&self) -> SdkResult<Vec<Product>> {
        self.run::<GetProducts>(NoVariables).await
    }

    pub async fn product(&self, id: ProductId) -> SdkResult<Option<Product>> {
        self.run::<GetProduct>(IdVariables { id }).await
    }

    pub async fn search_products_by_name(&self, name: impl Into<String>) -> SdkResult<Vec<Product>> {
        self.run::<SearchProductsByName>(NameVariables { name: name.into() })
            .await
    }

    pub async fn products_by_category(&self, category_id: CategoryId) -> SdkResult<Vec<Product>> {
        self.run::<ProductsByCategory>(CategoryIdVariables { category_id })
            .await
    }

    pub async fn search_products_by_category_and_name(
        &self,
        category_id: CategoryId,
        name: impl Into<String>,
    ) -> SdkResult<Vec<Product>> {
        self.run::<SearchProductsByCategoryAndName>(CategoryNameVariables {
            category_id,
            name: name.into(),
        })
        .await
    }

    pub async fn create_product(&self, input: ProductInput) -> SdkResult<Product> {
        self.run::<CreateProduct>(InputVariables { input }).await
    }

    pub async fn update_product(&self, id: ProductId, input: ProductInput) -> SdkResult<Product> {
        self.run::<UpdateProduct>(UpdateVariables { id, input })
            .await
    }

    pub async fn delete_product(&self, id: ProductId) -> SdkResult<bool> {
        self.run::<DeleteProduct>(IdVariables { id }).await
    }
}
