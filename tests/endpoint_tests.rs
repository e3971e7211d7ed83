//! Integration tests for resource endpoints.
//!
//! These tests run [`FreshBooksClient`] against a mock FreshBooks API and
//! verify the method, path, query and body of each request along with how
//! responses are unwrapped.

use std::sync::Mutex;
use std::time::Instant;

use freshbooks_api::clients::{HttpResponse, Transport, TransportError, SDK_VERSION};
use freshbooks_api::query::{
    FilterQueryBuilder, IncludesQueryBuilder, PaginationQueryBuilder, SortQueryBuilder,
};
use freshbooks_api::rest::{resources, ResourceEndpoint, NOT_FOUND_MESSAGE};
use freshbooks_api::{
    AccessToken, BaseUrl, ClientId, ErrorKind, FreshBooksClient, FreshBooksConfig,
    FreshBooksConfigBuilder, HttpMethod, Payload,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FreshBooksConfigBuilder {
    FreshBooksConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .access_token(AccessToken::new("some-token").unwrap())
        .api_url(BaseUrl::new(server.uri()).unwrap())
}

fn client_for(server: &MockServer) -> FreshBooksClient {
    FreshBooksClient::new(config_for(server).build().unwrap()).unwrap()
}

fn payload(value: Value) -> Payload {
    value.as_object().unwrap().clone()
}

fn accounting(result: Value) -> Value {
    json!({"response": {"result": result}})
}

// ============================================================================
// Accounting resources
// ============================================================================

#[tokio::test]
async fn test_get_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/users/clients/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "client": {"id": 12345, "organization": "American Cyanide"}
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.clients().get("ABC123", 12345, None).await.unwrap();

    assert_eq!(result["id"], 12345);
    assert_eq!(result["organization"], "American Cyanide");
}

#[tokio::test]
async fn test_get_invoice_with_includes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/invoices/invoices/9876"))
        .and(query_param("include[]", "lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "invoice": {"id": 9876, "lines": []}
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let includes = IncludesQueryBuilder::new().include("lines");
    let invoice = client
        .invoices()
        .get("ABC123", 9876, Some(&includes))
        .await
        .unwrap();

    assert_eq!(invoice["lines"], json!([]));
}

#[tokio::test]
async fn test_get_client_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/users/clients/12345"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "response": {"errors": [{
                "errno": 1012,
                "field": "userid",
                "message": "Client not found.",
                "object": "client",
                "value": "12345"
            }]}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.clients().get("ABC123", 12345, None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.message(), "Client not found.");
    assert_eq!(error.errno(), 1012);
    assert_eq!(error.field(), Some("userid"));
    assert_eq!(error.object(), Some("client"));
    assert_eq!(error.value(), Some("12345"));
}

#[tokio::test]
async fn test_get_with_wrong_result_key_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/users/clients/12345"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(accounting(json!({"invoice": {}}))),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.clients().get("ABC123", 12345, None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedResponse);
    assert_eq!(error.status_code(), 200);
}

#[tokio::test]
async fn test_list_clients_with_builders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/users/clients"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "1"))
        .and(query_param("search[email_like]", "@freshbooks.com"))
        .and(query_param("sort", "organization_desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "clients": [{"id": 1}, {"id": 2}],
            "page": 2,
            "pages": 3,
            "per_page": 1,
            "total": 3
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pagination = PaginationQueryBuilder::new(2, 1);
    let filters = FilterQueryBuilder::new().add_like("email_like", "@freshbooks.com");
    let sort = SortQueryBuilder::new().descending("organization");

    let clients = client
        .clients()
        .list("ABC123", &[&pagination, &filters, &sort])
        .await
        .unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0]["id"], 1);
    assert_eq!(clients.pages.page, 2);
    assert_eq!(clients.pages.pages, 3);
    assert_eq!(clients.pages.per_page, 1);
    assert_eq!(clients.pages.total, 3);
    assert!(clients.pages.has_next_page());
    assert!(clients.pages.has_prev_page());
}

#[tokio::test]
async fn test_list_other_incomes_uses_singular_list_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/other_incomes/other_incomes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "other_income": [{"incomeid": 7}],
            "page": 1,
            "pages": 1,
            "per_page": 15,
            "total": 1
        }))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let incomes = client.other_incomes().list("ABC123", &[]).await.unwrap();

    assert_eq!(incomes.into_items()[0]["incomeid"], 7);
}

#[tokio::test]
async fn test_list_without_list_key_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/users/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({"page": 1}))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.clients().list("ABC123", &[]).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedResponse);
}

#[tokio::test]
async fn test_create_client_wraps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounting/account/ABC123/users/clients"))
        .and(body_json(json!({"client": {"email": "john.doe@abcorp.com"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "client": {"id": 12345, "email": "john.doe@abcorp.com"}
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .clients()
        .create("ABC123", payload(json!({"email": "john.doe@abcorp.com"})))
        .await
        .unwrap();

    assert_eq!(created["id"], 12345);
}

#[tokio::test]
async fn test_update_client() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/accounting/account/ABC123/users/clients/12345"))
        .and(body_json(json!({"client": {"organization": "New Name"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "client": {"id": 12345, "organization": "New Name"}
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let updated = client
        .clients()
        .update("ABC123", 12345, payload(json!({"organization": "New Name"})))
        .await
        .unwrap();

    assert_eq!(updated["organization"], "New Name");
}

#[tokio::test]
async fn test_delete_client_is_soft_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/accounting/account/ABC123/users/clients/12345"))
        .and(body_json(json!({"client": {"vis_state": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "client": {"id": 12345, "vis_state": 1}
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.clients().delete("ABC123", 12345).await.unwrap();
}

#[tokio::test]
async fn test_delete_other_income_uses_http_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/accounting/account/ABC123/other_incomes/other_incomes/1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.other_incomes().delete("ABC123", 1234).await.unwrap();
}

// ============================================================================
// Project-like resources
// ============================================================================

#[tokio::test]
async fn test_get_project() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/business/439000/project/654321"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": {"id": 654_321, "title": "Awesome Project"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let project = client.projects().get(439_000, 654_321, None).await.unwrap();

    assert_eq!(project["title"], "Awesome Project");
}

#[tokio::test]
async fn test_get_project_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/business/439000/project/654321"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"title": "Requested resource could not be found."}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .projects()
        .get(439_000, 654_321, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.message(), "Requested resource could not be found.");
}

#[tokio::test]
async fn test_get_project_not_found_with_html_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/business/439000/project/654321"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("<html><body>Not Found</body></html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .projects()
        .get(439_000, 654_321, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.message(), NOT_FOUND_MESSAGE);
    assert_eq!(error.errno(), 0);
}

#[tokio::test]
async fn test_get_time_entry_not_found_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timetracking/business/439000/time_entries/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.time_entries().get(439_000, 1, None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.message(), NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_list_projects_reads_meta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/business/439000/projects"))
        .and(query_param("active", "true"))
        .and(query_param("sort", "-updated_at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [{"id": 1}, {"id": 2}],
            "meta": {"page": 1, "pages": 1, "per_page": 15, "total": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filters = FilterQueryBuilder::new().add_boolean("active", true);
    let sort = SortQueryBuilder::new().descending("updated_at");

    let projects = client
        .projects()
        .list(439_000, &[&filters, &sort])
        .await
        .unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects.pages.total, 2);
    assert!(!projects.pages.has_next_page());
}

#[tokio::test]
async fn test_create_project_on_single_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/business/439000/project"))
        .and(body_json(json!({"project": {"title": "Awesome Project"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": {"id": 654_321, "title": "Awesome Project"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let project = client
        .projects()
        .create(439_000, payload(json!({"title": "Awesome Project"})))
        .await
        .unwrap();

    assert_eq!(project["id"], 654_321);
}

#[tokio::test]
async fn test_create_time_entry_on_collection_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timetracking/business/439000/time_entries"))
        .and(body_json(json!({"time_entry": {"duration": 3600}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "time_entry": {"id": 123_456, "duration": 3600}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entry = client
        .time_entries()
        .create(439_000, payload(json!({"duration": 3600})))
        .await
        .unwrap();

    assert_eq!(entry["id"], 123_456);
}

#[tokio::test]
async fn test_delete_project_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/business/439000/project/654321"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.projects().delete(439_000, 654_321).await.unwrap();
}

#[tokio::test]
async fn test_delete_project_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/business/439000/project/654321"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errno": 2001,
            "error": {"title": "Requested resource could not be found."}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.projects().delete(439_000, 654_321).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.errno(), 2001);
}

#[tokio::test]
async fn test_update_service_on_comments_topic() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/comments/business/439000/service/3"))
        .and(body_json(json!({"service": {"name": "Design"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service": {"id": 3, "name": "Design"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let service = client
        .services()
        .update(439_000, 3, payload(json!({"name": "Design"})))
        .await
        .unwrap();

    assert_eq!(service["name"], "Design");
}

// ============================================================================
// Service rates
// ============================================================================

#[tokio::test]
async fn test_get_service_rate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments/business/439000/service/12345/rate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service_rate": {"business_id": 25, "rate": "10.00", "service_id": 12345}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let rate = client.service_rates().get(439_000, 12345).await.unwrap();

    assert_eq!(rate["service_id"], 12345);
    assert_eq!(rate["rate"], "10.00");
}

#[tokio::test]
async fn test_list_service_rates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments/business/439000/service_rates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service_rates": [
                {"business_id": 25, "rate": "10.00", "service_id": 1},
                {"business_id": 25, "rate": "8.50", "service_id": 2}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let rates = client.service_rates().list(439_000, &[]).await.unwrap();

    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0]["rate"], "10.00");
    assert_eq!(rates[1]["rate"], "8.50");
    assert!(!rates.pages.has_next_page());
}

#[tokio::test]
async fn test_create_service_rate_posts_to_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments/business/439000/service/12345/rate"))
        .and(body_json(json!({"service_rate": {"rate": "10.00"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service_rate": {"business_id": 25, "rate": "10.00", "service_id": 12345}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let rate = client
        .service_rates()
        .create(439_000, 12345, payload(json!({"rate": "10.00"})))
        .await
        .unwrap();

    assert_eq!(rate["service_id"], 12345);
}

#[tokio::test]
async fn test_update_service_rate_puts_to_parent() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/comments/business/439000/service/12345/rate"))
        .and(body_json(json!({"service_rate": {"rate": "15.50"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service_rate": {"business_id": 25, "rate": "15.50", "service_id": 12345}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let rate = client
        .service_rates()
        .update(439_000, 12345, payload(json!({"rate": "15.50"})))
        .await
        .unwrap();

    assert_eq!(rate["rate"], "15.50");
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_profit_and_loss_uses_plain_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/accounting/account/ABC123/reports/accounting/profitloss",
        ))
        .and(query_param("start_date", "2021-01-01"))
        .and(query_param("end_date", "2021-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounting(json!({
            "profitloss": {"currency_code": "CAD", "net_profit": []}
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filters = FilterQueryBuilder::new()
        .add_equals("start_date", "2021-01-01")
        .add_equals("end_date", "2021-12-31");

    let report = client
        .reports()
        .profit_and_loss("ABC123", Some(&filters))
        .await
        .unwrap();

    assert_eq!(report["currency_code"], "CAD");
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_current_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/api/v1/users/me"))
        .and(header("Authorization", "Bearer some-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"id": 2192, "first_name": "Bruce", "email": "bruce@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let me = client.current_user().await.unwrap();

    assert_eq!(me["id"], 2192);
    assert_eq!(me["first_name"], "Bruce");
}

#[tokio::test]
async fn test_current_user_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthenticated",
            "error_description": "This action requires authentication to continue."
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.current_user().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.status_code(), 401);
    assert_eq!(
        error.message(),
        "This action requires authentication to continue."
    );
}

// ============================================================================
// Headers and retries
// ============================================================================

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    let user_agent = format!("FreshBooks rust sdk/{SDK_VERSION} client_id test-client");
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/taxes/taxes/1"))
        .and(header("Authorization", "Bearer some-token"))
        .and(header("User-Agent", user_agent.as_str()))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(accounting(json!({"tax": {"id": 1}}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.taxes().get("ABC123", 1, None).await.unwrap();
}

#[tokio::test]
async fn test_custom_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/items/items/1"))
        .and(header("User-Agent", "MyApp/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(accounting(json!({"item": {"id": 1}}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).user_agent("MyApp/1.0").build().unwrap();
    let client = FreshBooksClient::new(config).unwrap();
    client.items().get("ABC123", 1, None).await.unwrap();
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/expenses/expenses/5"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/expenses/expenses/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(accounting(json!({"expense": {"id": 5}}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).max_tries(3).build().unwrap();
    let client = FreshBooksClient::new(config).unwrap();
    let expense = client.expenses().get("ABC123", 5, None).await.unwrap();

    assert_eq!(expense["id"], 5);
}

#[tokio::test]
async fn test_server_error_waits_before_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/payments/payments/5"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/payments/payments/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(accounting(json!({"payment": {"id": 5}}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).max_tries(2).build().unwrap();
    let client = FreshBooksClient::new(config).unwrap();

    let started = Instant::now();
    client.payments().get("ABC123", 5, None).await.unwrap();

    assert!(started.elapsed().as_secs_f64() >= 1.0);
}

#[tokio::test]
async fn test_unusable_retry_after_falls_back_to_default_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/taxes/taxes/5"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1e30"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/taxes/taxes/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(accounting(json!({"tax": {"id": 5}}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).max_tries(2).build().unwrap();
    let client = FreshBooksClient::new(config).unwrap();

    let started = Instant::now();
    let tax = client.taxes().get("ABC123", 5, None).await.unwrap();

    assert_eq!(tax["id"], 5);
    assert!(started.elapsed().as_secs_f64() >= 1.0);
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/projects/tasks/5"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.tasks().get("ABC123", 5, None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedResponse);
    assert_eq!(error.status_code(), 429);
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounting/account/ABC123/users/clients/1"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"response": {"errors": [
                    {"errno": 429, "message": "Too many requests"}
                ]}})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let config = config_for(&server).max_tries(3).build().unwrap();
    let client = FreshBooksClient::new(config).unwrap();
    let error = client.clients().get("ABC123", 1, None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiError);
    assert_eq!(error.status_code(), 429);
    assert_eq!(error.message(), "Too many requests");
}

// ============================================================================
// Custom transport
// ============================================================================

/// Replays one canned response and records every request it sees.
struct RecordingTransport {
    response: HttpResponse,
    requests: Mutex<Vec<(HttpMethod, String, Option<Value>)>>,
}

impl RecordingTransport {
    fn new(response: HttpResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(HttpMethod, String, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, url.to_string(), body.cloned()));
        Ok(self.response.clone())
    }
}

#[tokio::test]
async fn test_endpoint_over_custom_transport() {
    let transport = RecordingTransport::new(HttpResponse::from_parts(
        200,
        Some(json!({
            "time_entries": [],
            "meta": {"page": 1, "pages": 0, "per_page": 15, "total": 0}
        })),
    ));
    let entries = ResourceEndpoint::new(&transport, &resources::TIME_ENTRIES);
    let pagination = PaginationQueryBuilder::new(1, 15);

    let result = entries.list(439_000, &[&pagination]).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(
        transport.requests(),
        vec![(
            HttpMethod::Get,
            "/timetracking/business/439000/time_entries?page=1&per_page=15".to_string(),
            None
        )]
    );
}

#[tokio::test]
async fn test_soft_delete_over_custom_transport() {
    let transport = RecordingTransport::new(HttpResponse::from_parts(
        200,
        Some(accounting(json!({"invoice": {"id": 1, "vis_state": 1}}))),
    ));
    let invoices = ResourceEndpoint::new(&transport, &resources::INVOICES);

    invoices.delete("ABC123", 1).await.unwrap();

    assert_eq!(
        transport.requests(),
        vec![(
            HttpMethod::Put,
            "/accounting/account/ABC123/invoices/invoices/1".to_string(),
            Some(json!({"invoice": {"vis_state": 1}}))
        )]
    );
}
