//! Strongly typed operations and responses.
//!
//! Binds an [`OperationDescriptor`] to the Rust types of its variables and
//! its response envelope.

use crate::document::OperationDescriptor;
use crate::error::{ErrorCode, SdkError, SdkResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Typed GraphQL Operations
// ============================================================================

/// A strongly typed GraphQL operation.
///
/// # Example
///
/// ```ignore
/// struct GetProduct;
///
/// impl TypedOperation for GetProduct {
///     type Variables = IdVariables<ProductId>;
///     type Response = ProductData;
///     type Payload = Option<Product>;
///
///     const DESCRIPTOR: OperationDescriptor = GET_PRODUCT;
///
///     fn into_payload(response: ProductData) -> Self::Payload {
///         response.product
///     }
/// }
/// ```
pub trait TypedOperation {
    /// The input variables type.
    type Variables: Serialize + Send;

    /// The response envelope, keyed by the root field name.
    type Response: DeserializeOwned;

    /// The unwrapped value views work with.
    type Payload;

    /// Structured description of the operation.
    const DESCRIPTOR: OperationDescriptor;

    /// Extracts the payload from the envelope.
    fn into_payload(response: Self::Response) -> Self::Payload;

    /// The operation name sent as `operationName`.
    fn name() -> &'static str {
        Self::DESCRIPTOR.name
    }

    /// The kind of operation.
    fn kind() -> OperationKind {
        Self::DESCRIPTOR.kind
    }
}

/// The kind of GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The keyword that opens the document.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// Marker type for operations without variables. Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoVariables;

impl Serialize for NoVariables {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        serializer.serialize_map(Some(0))?.end()
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// A location in the operation document reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

/// A GraphQL error, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            locations: Vec::new(),
            extensions: None,
        }
    }

    /// Server error classification (`extensions.classification`), if any.
    pub fn classification(&self) -> Option<&str> {
        self.extensions
            .as_ref()?
            .get("classification")?
            .as_str()
    }
}

/// A typed GraphQL response.
///
/// Errors and data are passed through side by side; whether partial data is
/// usable is the caller's decision. When errors are present the `data`
/// member is also kept verbatim in `raw_data`, including shapes the typed
/// envelope cannot hold (a nulled item in a list, a nulled non-null field).
#[derive(Debug, Clone)]
pub struct TypedResponse<T> {
    pub data: Option<T>,
    pub errors: Vec<GraphQLError>,
    pub raw_data: Option<serde_json::Value>,
}

impl<T> TypedResponse<T> {
    /// Returns true if the response has errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if the response carries both data and errors.
    pub fn is_partial(&self) -> bool {
        self.has_errors() && (self.data.is_some() || self.raw_data.is_some())
    }

    /// Returns the data if present and no errors occurred.
    pub fn into_result(self) -> SdkResult<T> {
        if !self.errors.is_empty() {
            return Err(SdkError::from_graphql(self.errors));
        }

        self.data
            .ok_or_else(|| SdkError::new(ErrorCode::NoData, "No data in response"))
    }

    /// Transforms the data, keeping errors and raw data untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypedResponse<U> {
        TypedResponse {
            data: self.data.map(f),
            errors: self.errors,
            raw_data: self.raw_data,
        }
    }
}

impl<T: DeserializeOwned> TypedResponse<T> {
    /// Parses a typed response from a raw GraphQL response.
    ///
    /// A `null` data member is treated as absent. Alongside errors, data
    /// that does not fit the envelope leaves `data` empty and survives in
    /// `raw_data`; without errors it is a [`ErrorCode::DeserializeError`].
    pub fn from_raw(data: Option<serde_json::Value>, errors: Vec<GraphQLError>) -> SdkResult<Self> {
        let data = data.filter(|v| !v.is_null());
        let raw_data = if errors.is_empty() { None } else { data.clone() };

        let typed_data = match data {
            None => None,
            Some(v) => match serde_json::from_value(v) {
                Ok(data) => Some(data),
                Err(_) if !errors.is_empty() => None,
                Err(e) => {
                    return Err(SdkError::deserialize(format!(
                        "Failed to deserialize response: {}",
                        e
                    )))
                }
            },
        };

        Ok(Self {
            data: typed_data,
            errors,
            raw_data,
        })
    }
}
