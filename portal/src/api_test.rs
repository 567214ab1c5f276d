use super::*;
use crate::customer::Gender;
use crate::testing::{BASE_URL, mock_client};

fn customer_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "gender": "MALE",
        "age": 30,
        "roles": ["ROLE_USER"],
        "username": format!("{}@example.com", name.to_lowercase()),
        "profileImageId": null
    })
}

// =============================================================================
// Bearer header
// =============================================================================

#[tokio::test]
async fn requests_carry_stored_bearer_token() {
    let (api, transport, store) = mock_client();
    store.save("tok-123").unwrap();
    transport.push_json(200, &serde_json::json!([]));

    api.list_customers().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].bearer.as_deref(), Some("tok-123"));
    assert_eq!(requests[0].authorization().as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn requests_without_token_have_no_bearer() {
    let (api, transport, _store) = mock_client();
    transport.push_json(200, &serde_json::json!([]));

    api.list_customers().await.unwrap();

    assert_eq!(transport.requests()[0].bearer, None);
}

#[tokio::test]
async fn token_is_read_per_request() {
    let (api, transport, store) = mock_client();
    transport.push_json(200, &serde_json::json!([]));
    transport.push_json(200, &serde_json::json!([]));

    store.save("first").unwrap();
    api.list_customers().await.unwrap();
    store.clear();
    api.list_customers().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].bearer.as_deref(), Some("first"));
    assert_eq!(requests[1].bearer, None);
}

// =============================================================================
// Endpoints
// =============================================================================

#[tokio::test]
async fn list_customers_decodes_body() {
    let (api, transport, _store) = mock_client();
    transport.push_json(200, &serde_json::json!([customer_json(1, "Ann"), customer_json(2, "Ben")]));

    let customers = api.list_customers().await.unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[1].name, "Ben");
    assert_eq!(transport.calls(), vec![(Method::Get, format!("{BASE_URL}/api/v1/customers"))]);
}

#[tokio::test]
async fn login_posts_credentials_and_reads_body_token() {
    let (api, transport, _store) = mock_client();
    transport.push_json(
        200,
        &serde_json::json!({ "token": "jwt-abc", "customerDTO": customer_json(4, "Dee") }),
    );

    let issued = api
        .login(&AuthenticationRequest {
            username: "dee@example.com".to_owned(),
            password: "pw".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(issued.token, "jwt-abc");
    assert_eq!(issued.customer.map(|c| c.id), Some(4));
    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{BASE_URL}/api/v1/auth/login"));
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "username": "dee@example.com", "password": "pw" }));
}

#[tokio::test]
async fn login_falls_back_to_authorization_header() {
    let (api, transport, _store) = mock_client();
    transport.push(Ok(ApiResponse {
        status: 200,
        authorization: Some("Bearer from-header".to_owned()),
        body: Vec::new(),
    }));

    let issued = api
        .login(&AuthenticationRequest {
            username: "a@b.com".to_owned(),
            password: "x".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(issued.token, "from-header");
}

#[tokio::test]
async fn login_without_any_token_is_missing_token() {
    let (api, transport, _store) = mock_client();
    transport.push_json(200, &serde_json::json!({ "token": "" }));

    let err = api
        .login(&AuthenticationRequest {
            username: "a@b.com".to_owned(),
            password: "x".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MissingToken));
}

#[tokio::test]
async fn register_customer_returns_header_token() {
    let (api, transport, _store) = mock_client();
    transport.push(Ok(ApiResponse {
        status: 200,
        authorization: Some("new-token".to_owned()),
        body: Vec::new(),
    }));

    let token = api
        .register_customer(&CustomerRegistrationRequest {
            name: "Eve".to_owned(),
            email: "eve@example.com".to_owned(),
            password: "secret".to_owned(),
            age: 22,
            gender: Gender::Female,
        })
        .await
        .unwrap();

    assert_eq!(token, "new-token");
    assert_eq!(transport.calls(), vec![(Method::Post, format!("{BASE_URL}/api/v1/customers"))]);
}

#[tokio::test]
async fn update_and_delete_target_customer_path() {
    let (api, transport, _store) = mock_client();
    transport.push_empty(200);
    transport.push_empty(200);

    api.update_customer(
        9,
        &CustomerUpdateRequest {
            name: Some("New".to_owned()),
            ..CustomerUpdateRequest::default()
        },
    )
    .await
    .unwrap();
    api.delete_customer(9).await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![
            (Method::Put, format!("{BASE_URL}/api/v1/customers/9")),
            (Method::Delete, format!("{BASE_URL}/api/v1/customers/9")),
        ]
    );
    assert_eq!(transport.requests()[0].body.as_deref(), Some(r#"{"name":"New"}"#));
    assert_eq!(transport.requests()[1].body, None);
}

#[tokio::test]
async fn profile_image_bytes_come_back_unchanged() {
    let (api, transport, store) = mock_client();
    store.save("tok-img").unwrap();
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x7B];
    transport.push(Ok(ApiResponse {
        status: 200,
        authorization: None,
        body: jpeg.clone(),
    }));

    let bytes = api.fetch_profile_image(3).await.unwrap();

    assert_eq!(bytes, jpeg);
    assert_eq!(
        transport.calls(),
        vec![(Method::Get, format!("{BASE_URL}/api/v1/customers/3/profile-image"))]
    );
    let requests = transport.requests();
    assert_eq!(requests[0].bearer.as_deref(), Some("tok-img"));
    assert_eq!(requests[0].body, None);
}

#[test]
fn profile_image_url_is_absolute() {
    let (api, _transport, _store) = mock_client();
    assert_eq!(api.profile_image_url(3), format!("{BASE_URL}/api/v1/customers/3/profile-image"));
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn non_success_status_uses_server_message() {
    let (api, transport, _store) = mock_client();
    transport.push_json(404, &serde_json::json!({ "message": "customer with id [5] not found" }));

    let err = api.get_customer(5).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.code(), "ERR_BAD_REQUEST");
    assert_eq!(err.message(), "customer with id [5] not found");
}

#[tokio::test]
async fn non_success_without_body_reports_status() {
    let (api, transport, _store) = mock_client();
    transport.push_empty(503);

    let err = api.delete_customer(1).await.unwrap_err();

    assert_eq!(err.code(), "ERR_BAD_RESPONSE");
    assert_eq!(err.message(), "HTTP 503");
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let (api, transport, _store) = mock_client();
    transport.push(Err(ApiError::Network("connection refused".to_owned())));

    let err = api.list_customers().await.unwrap_err();

    assert_eq!(err.code(), "ERR_NETWORK");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let (api, transport, _store) = mock_client();
    transport.push(Ok(ApiResponse {
        status: 200,
        authorization: None,
        body: b"not json".to_vec(),
    }));

    let err = api.list_customers().await.unwrap_err();

    assert!(matches!(err, ApiError::Json(_)));
}
