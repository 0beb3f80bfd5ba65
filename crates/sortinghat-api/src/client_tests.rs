//! Unit and integration tests for the SortingHatClient.

use super::*;
use crate::error::{ApiError, Error};

// Test: SortingHatClient::new() accepts an endpoint
#[test]
fn test_client_new_stores_endpoint() {
    let client = SortingHatClient::new("https://sortinghat.example.com/api/").unwrap();
    assert_eq!(client.endpoint(), "https://sortinghat.example.com/api/");
}

// Test: SortingHatClient should implement Clone and Debug
#[test]
fn test_client_is_clone_and_debug() {
    let client = SortingHatClient::new(DEFAULT_ENDPOINT).unwrap();
    let cloned = client.clone();
    let debug_str = format!("{:?}", cloned);
    assert!(debug_str.contains("SortingHatClient"));
    assert!(debug_str.contains(DEFAULT_ENDPOINT));
}

// Test: invalid endpoints are rejected at build time
#[test]
fn test_client_rejects_relative_endpoint() {
    let result = SortingHatClient::new("not a url");
    assert!(matches!(result, Err(Error::InvalidEndpoint { .. })));
}

#[test]
fn test_client_rejects_empty_endpoint() {
    assert!(SortingHatClient::new("").is_err());
}

// Test: builder defaults and overrides
#[test]
fn test_builder_default_timeout() {
    let client = SortingHatClientBuilder::new(DEFAULT_ENDPOINT).build().unwrap();
    assert_eq!(client.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
fn test_builder_custom_timeout() {
    let client = SortingHatClient::builder(DEFAULT_ENDPOINT)
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    assert_eq!(client.request_timeout(), Duration::from_secs(5));
}

mod wiremock_tests {
    use super::*;
    use crate::models::SearchFilter;
    use crate::query::Collection;
    use crate::source::PaginatedSource;
    use crate::models::Entity;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn individuals_body() -> serde_json::Value {
        json!({
            "data": {
                "individuals": {
                    "entities": [{
                        "mk": "172188fd88c1df2dd6d187b6f32cb6aced544aee",
                        "identities": [{"name": "test name", "uuid": "172188fd", "source": "git", "__typename": "IdentityType"}],
                        "profile": {"id": "7", "name": "test name", "__typename": "ProfileType"},
                        "__typename": "IndividualType"
                    }],
                    "pageInfo": {
                        "page": 1,
                        "pageSize": 10,
                        "numPages": 1,
                        "hasNext": false,
                        "hasPrev": false,
                        "startIndex": 1,
                        "endIndex": 1,
                        "totalResults": 1
                    },
                    "__typename": "IdentityPaginatedType"
                }
            }
        })
    }

    async fn client_for(server: &MockServer) -> SortingHatClient {
        SortingHatClient::new(format!("{}/api/", server.uri())).unwrap()
    }

    // Test: individuals query posts page, pageSize and filters
    #[tokio::test]
    async fn test_individuals_sends_variables() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/"))
            .and(body_partial_json(json!({
                "variables": {"page": 1, "pageSize": 10, "filters": {"term": "test"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(individuals_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let filter = SearchFilter::default().with_term("test");
        let page = client.individuals(1, 10, Some(&filter)).await.unwrap();

        assert_eq!(page.entities.len(), 1);
        assert_eq!(page.entities[0].display_name(), Some("test name"));
        assert_eq!(page.page_info.total_results, 1);
    }

    // Test: lastUpdated expressions are forwarded verbatim
    #[tokio::test]
    async fn test_individuals_sends_last_updated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "variables": {"filters": {"lastUpdated": "<2000-01-01T00:00:00.000Z"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(individuals_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let filter = SearchFilter::default().with_last_updated("<2000-01-01T00:00:00.000Z");
        client.individuals(1, 10, Some(&filter)).await.unwrap();
    }

    // Test: organizations page decodes
    #[tokio::test]
    async fn test_organizations_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "organizations": {
                        "entities": [
                            {"name": "Test 1", "enrollments": [{"id": 1}, {"id": 2}]},
                            {"name": "Test 2", "enrollments": [{"id": 3}, {"id": 4}]}
                        ],
                        "pageInfo": {"page": 1, "pageSize": 10, "numPages": 1, "totalResults": 2}
                    }
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let page = client.organizations(1, 10, None).await.unwrap();

        assert_eq!(page.entities.len(), 2);
        assert_eq!(page.entities[1].enrollment_count(), 2);
    }

    // Test: countries never send filters and get synthesized page info
    #[tokio::test]
    async fn test_countries_ignore_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"page": 1, "pageSize": 50}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "countries": {
                        "entities": [
                            {"code": "AD", "name": "Andorra"},
                            {"code": "AE", "name": "United Arab Emirates"},
                            {"code": "AF", "name": "Afghanistan"}
                        ]
                    }
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let filter = SearchFilter::default().with_term("and");
        let page = client
            .fetch_paginated(Collection::Countries, 1, 50, Some(&filter))
            .await
            .unwrap();

        assert_eq!(page.entities.len(), 3);
        assert_eq!(page.page_info.num_pages, 1);
        assert!(matches!(&page.entities[0], Entity::Country(c) if c.code == "AD"));

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body["variables"].get("filters").is_none());
    }

    // Test: GraphQL errors surface as ApiError::GraphQl
    #[tokio::test]
    async fn test_graphql_errors_are_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{"message": "Filter value is not a valid date"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.individuals(1, 10, None).await;

        match result {
            Err(Error::Api(ApiError::GraphQl { messages })) => {
                assert_eq!(messages, vec!["Filter value is not a valid date".to_string()]);
            }
            other => panic!("expected GraphQl error, got {:?}", other),
        }
    }

    // Test: non-2xx statuses are not retried
    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.individuals(1, 10, None).await;

        match result {
            Err(Error::Api(ApiError::Http { status, message })) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    // Test: empty error bodies fall back to the canonical reason
    #[tokio::test]
    async fn test_error_without_body_uses_canonical_reason() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.countries(1, 10).await.unwrap_err();

        assert_eq!(
            err.as_api_error(),
            Some(&ApiError::Http {
                status: 404,
                message: "Not Found".to_string()
            })
        );
    }

    // Test: malformed bodies surface as JSON errors
    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.individuals(1, 10, None).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    // Test: PaginatedSource wraps individuals as entities
    #[tokio::test]
    async fn test_fetch_paginated_individuals() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(individuals_body()))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let page = client
            .fetch_paginated(Collection::Individuals, 1, 10, None)
            .await
            .unwrap();

        assert_eq!(page.entities.len(), 1);
        assert_eq!(page.entities[0].label(), "test name");
    }
}
