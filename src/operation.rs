//! Static table describing every catalog entity operation.
//!
//! This is the only place that knows about individual remote operations.
//! Request building, invocation and response handling are generic over
//! [`OperationDefinition`].

use std::fmt;

use crate::ClientError;

/// HTTP method used by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whether an operation sends a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyRule {
    Forbidden,
    Required,
}

/// Whether a successful response carries a body.
///
/// Responses are passed through as received either way; a body on an
/// `Empty` operation is only logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseRule {
    /// The service returns an entity or classification document.
    Payload,
    /// Success is signalled by status alone (typically 204).
    Empty,
}

/// How a query parameter name is matched against caller options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    /// Matches any name starting with the parameter name, e.g. the
    /// `attr:qualifiedName` unique-attribute selectors.
    Prefix,
}

/// One query parameter accepted by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub required: bool,
    pub match_kind: MatchKind,
}

impl QueryParam {
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            match_kind: MatchKind::Exact,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            match_kind: MatchKind::Exact,
        }
    }

    pub const fn prefix(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            match_kind: MatchKind::Prefix,
        }
    }

    /// Returns `true` if a caller-supplied query key belongs to this parameter.
    pub fn matches(&self, key: &str) -> bool {
        match self.match_kind {
            MatchKind::Exact => key == self.name,
            MatchKind::Prefix => key.len() > self.name.len() && key.starts_with(self.name),
        }
    }
}

/// Metadata for one remote catalog operation.
#[derive(Clone, Copy, Debug)]
pub struct OperationDefinition {
    /// Stable operation identifier (for example `getByGuid`).
    pub operation_id: &'static str,
    pub method: HttpMethod,
    /// Path template, potentially containing `{param}` placeholders.
    pub path_template: &'static str,
    /// Required path parameter names, in template order.
    pub path_params: &'static [&'static str],
    pub query_params: &'static [QueryParam],
    pub body: BodyRule,
    pub response: ResponseRule,
}

impl OperationDefinition {
    pub fn accepts_query(&self, key: &str) -> bool {
        self.query_params.iter().any(|param| param.matches(key))
    }
}

const GUID: &[&str] = &["guid"];
const GUID_CLASSIFICATION: &[&str] = &["guid", "classificationName"];
const TYPE_NAME: &[&str] = &["typeName"];
const TYPE_NAME_CLASSIFICATION: &[&str] = &["typeName", "classificationName"];

const NO_QUERY: &[QueryParam] = &[];
const WRITE_QUERY: &[QueryParam] = &[
    QueryParam::optional("businessAttributeUpdateBehavior"),
    QueryParam::optional("collectionId"),
];
const READ_QUERY: &[QueryParam] = &[
    QueryParam::optional("minExtInfo"),
    QueryParam::optional("ignoreRelationships"),
];
const BULK_READ_QUERY: &[QueryParam] = &[
    QueryParam::required("guid"),
    QueryParam::optional("minExtInfo"),
    QueryParam::optional("ignoreRelationships"),
    QueryParam::optional("excludeRelationshipTypes"),
];
const GUID_LIST_QUERY: &[QueryParam] = &[QueryParam::required("guid")];
const ATTRIBUTE_NAME_QUERY: &[QueryParam] = &[QueryParam::required("name")];
const UNIQUE_ATTR_QUERY: &[QueryParam] = &[QueryParam::prefix("attr:")];
const UNIQUE_ATTR_READ_QUERY: &[QueryParam] = &[
    QueryParam::prefix("attr:"),
    QueryParam::optional("minExtInfo"),
    QueryParam::optional("ignoreRelationships"),
];
const BULK_UNIQUE_ATTR_QUERY: &[QueryParam] = &[
    QueryParam::prefix("attr_"),
    QueryParam::optional("minExtInfo"),
    QueryParam::optional("ignoreRelationships"),
];

const fn op(
    operation_id: &'static str,
    method: HttpMethod,
    path_template: &'static str,
    path_params: &'static [&'static str],
    query_params: &'static [QueryParam],
    body: BodyRule,
    response: ResponseRule,
) -> OperationDefinition {
    OperationDefinition {
        operation_id,
        method,
        path_template,
        path_params,
        query_params,
        body,
        response,
    }
}

use BodyRule::{Forbidden, Required};
use HttpMethod::{Delete, Get, Post, Put};
use ResponseRule::{Empty, Payload};

/// Every entity operation exposed by the catalog service.
#[rustfmt::skip]
pub static OPERATIONS: &[OperationDefinition] = &[
    op("createOrUpdate", Post, "/atlas/v2/entity", &[], WRITE_QUERY, Required, Payload),
    op("listByGuids", Get, "/atlas/v2/entity/bulk", &[], BULK_READ_QUERY, Forbidden, Payload),
    op("createOrUpdateEntities", Post, "/atlas/v2/entity/bulk", &[], WRITE_QUERY, Required, Payload),
    op("deleteByGuids", Delete, "/atlas/v2/entity/bulk", &[], GUID_LIST_QUERY, Forbidden, Payload),
    op("addClassification", Post, "/atlas/v2/entity/bulk/classification", &[], NO_QUERY, Required, Empty),
    op("setClassifications", Post, "/atlas/v2/entity/bulk/setClassifications", &[], NO_QUERY, Required, Payload),
    op("getByGuid", Get, "/atlas/v2/entity/guid/{guid}", GUID, READ_QUERY, Forbidden, Payload),
    op("partialUpdateEntityAttributeByGuid", Put, "/atlas/v2/entity/guid/{guid}", GUID, ATTRIBUTE_NAME_QUERY, Required, Payload),
    op("deleteByGuid", Delete, "/atlas/v2/entity/guid/{guid}", GUID, NO_QUERY, Forbidden, Payload),
    op("getHeader", Get, "/atlas/v2/entity/guid/{guid}/header", GUID, NO_QUERY, Forbidden, Payload),
    op("getClassification", Get, "/atlas/v2/entity/guid/{guid}/classification/{classificationName}", GUID_CLASSIFICATION, NO_QUERY, Forbidden, Payload),
    op("removeClassification", Delete, "/atlas/v2/entity/guid/{guid}/classification/{classificationName}", GUID_CLASSIFICATION, NO_QUERY, Forbidden, Empty),
    op("getClassifications", Get, "/atlas/v2/entity/guid/{guid}/classifications", GUID, NO_QUERY, Forbidden, Payload),
    op("addClassifications", Post, "/atlas/v2/entity/guid/{guid}/classifications", GUID, NO_QUERY, Required, Empty),
    op("updateClassifications", Put, "/atlas/v2/entity/guid/{guid}/classifications", GUID, NO_QUERY, Required, Empty),
    op("getByUniqueAttributes", Get, "/atlas/v2/entity/uniqueAttribute/type/{typeName}", TYPE_NAME, UNIQUE_ATTR_READ_QUERY, Forbidden, Payload),
    op("partialUpdateEntityByUniqueAttributes", Put, "/atlas/v2/entity/uniqueAttribute/type/{typeName}", TYPE_NAME, UNIQUE_ATTR_QUERY, Required, Payload),
    op("deleteByUniqueAttribute", Delete, "/atlas/v2/entity/uniqueAttribute/type/{typeName}", TYPE_NAME, UNIQUE_ATTR_QUERY, Forbidden, Payload),
    op("removeClassificationByUniqueAttribute", Delete, "/atlas/v2/entity/uniqueAttribute/type/{typeName}/classification/{classificationName}", TYPE_NAME_CLASSIFICATION, UNIQUE_ATTR_QUERY, Forbidden, Empty),
    op("addClassificationsByUniqueAttribute", Post, "/atlas/v2/entity/uniqueAttribute/type/{typeName}/classifications", TYPE_NAME, UNIQUE_ATTR_QUERY, Required, Empty),
    op("updateClassificationsByUniqueAttribute", Put, "/atlas/v2/entity/uniqueAttribute/type/{typeName}/classifications", TYPE_NAME, UNIQUE_ATTR_QUERY, Required, Empty),
    op("getEntitiesByUniqueAttributes", Get, "/atlas/v2/entity/bulk/uniqueAttribute/type/{typeName}", TYPE_NAME, BULK_UNIQUE_ATTR_QUERY, Forbidden, Payload),
];

/// Returns all catalog operations.
pub fn operations() -> &'static [OperationDefinition] {
    OPERATIONS
}

/// Looks up an operation by id.
pub fn lookup(operation_id: &str) -> Result<&'static OperationDefinition, ClientError> {
    OPERATIONS
        .iter()
        .find(|op| op.operation_id == operation_id)
        .ok_or_else(|| ClientError::UnknownOperation(operation_id.to_owned()))
}
