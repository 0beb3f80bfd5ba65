//! GraphQL documents, variables and response envelopes for paginated queries.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};
use crate::models::{Page, PageInfo, SearchFilter};

const INDIVIDUALS_QUERY: &str = r#"query GetIndividuals($page: Int!, $pageSize: Int!, $filters: IdentityFilterType) {
  individuals(page: $page, pageSize: $pageSize, filters: $filters) {
    entities {
      mk
      isLocked
      profile { id name email gender isBot country { code name } }
      identities { uuid name email username source }
      enrollments { start end organization { name } }
    }
    pageInfo { page pageSize numPages hasNext hasPrev startIndex endIndex totalResults }
  }
}"#;

const ORGANIZATIONS_QUERY: &str = r#"query GetOrganizations($page: Int!, $pageSize: Int!, $filters: OrganizationFilterType) {
  organizations(page: $page, pageSize: $pageSize, filters: $filters) {
    entities {
      name
      domains { domain isTopDomain }
      enrollments { start end }
    }
    pageInfo { page pageSize numPages hasNext hasPrev startIndex endIndex totalResults }
  }
}"#;

const COUNTRIES_QUERY: &str = r#"query GetCountries($page: Int!, $pageSize: Int!) {
  countries(page: $page, pageSize: $pageSize) {
    entities { code name }
  }
}"#;

/// The remote collection a paginated query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Individuals,
    Organizations,
    Countries,
}

impl Collection {
    /// Name of the root query field.
    pub fn field(&self) -> &'static str {
        match self {
            Collection::Individuals => "individuals",
            Collection::Organizations => "organizations",
            Collection::Countries => "countries",
        }
    }

    /// The GraphQL document used to fetch one page.
    pub fn document(&self) -> &'static str {
        match self {
            Collection::Individuals => INDIVIDUALS_QUERY,
            Collection::Organizations => ORGANIZATIONS_QUERY,
            Collection::Countries => COUNTRIES_QUERY,
        }
    }

    /// Countries ignore search filters.
    pub fn accepts_filter(&self) -> bool {
        !matches!(self, Collection::Countries)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

/// Variables for a single paginated query.
///
/// # Examples
///
/// ```
/// use sortinghat_api_rs::models::SearchFilter;
/// use sortinghat_api_rs::query::QueryVariables;
///
/// let vars = QueryVariables::new(1, 10, Some(SearchFilter::default().with_term("test")));
/// let json = serde_json::to_value(&vars).unwrap();
/// assert_eq!(json["pageSize"], 10);
/// assert_eq!(json["filters"]["term"], "test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "filters", skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
}

impl QueryVariables {
    /// Creates variables; an empty filter is dropped.
    pub fn new(page: u32, page_size: u32, filter: Option<SearchFilter>) -> Self {
        Self {
            page,
            page_size,
            filter: filter.filter(|f| !f.is_empty()),
        }
    }

    /// Removes the filter when the collection does not accept one.
    pub fn for_collection(mut self, collection: Collection) -> Self {
        if !collection.accepts_filter() {
            self.filter = None;
        }
        self
    }
}

/// Request body posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a QueryVariables,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Response envelope: `{"data": {...}, "errors": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Extracts the value of a root field, surfacing GraphQL errors first.
    pub fn into_field(self, field: &str) -> Result<Value> {
        if !self.errors.is_empty() {
            let messages = self.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl { messages }.into());
        }

        match self.data.and_then(|mut data| data.remove(field)) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(ApiError::MissingData {
                field: field.to_string(),
            }
            .into()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    #[serde(default = "Vec::new")]
    entities: Vec<T>,
    #[serde(default)]
    page_info: Option<PageInfo>,
}

/// Decodes a paginated root field, synthesizing page metadata when absent.
pub(crate) fn decode_page<T: DeserializeOwned>(value: Value, variables: &QueryVariables) -> Result<Page<T>> {
    let raw: RawPage<T> = serde_json::from_value(value)?;
    let page_info = raw
        .page_info
        .unwrap_or_else(|| PageInfo::single_page(variables.page, variables.page_size, raw.entities.len()));

    Ok(Page {
        entities: raw.entities,
        page_info,
    })
}
