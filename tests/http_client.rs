use devicedesk::api::client::HttpClientConfig;
use devicedesk::api::{AdminApi, HttpAdminClient, InvoiceDocument};
use devicedesk::auth::AuthContext;
use devicedesk::domain::{ClientStatusUpdate, DeviceDeskError, RegistrationStatus, StatisticsKind};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard, token: Option<&str>) -> HttpAdminClient {
    let config = HttpClientConfig {
        api_url: format!("{}/api", server.url()),
        timeout: Duration::from_secs(5),
    };
    HttpAdminClient::create(&config, AuthContext::with_token(token.map(ToString::to_string))).unwrap()
}

#[tokio::test]
async fn reads_carry_the_bearer_token_and_unwrap_the_envelope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/admin/client-users")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": [{
                    "id": 7,
                    "first_name": "Thandi",
                    "last_name": "Mokoena",
                    "email": "thandi@justice.example.org",
                    "registration_status": "pending"
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let users = client_for(&server, Some("secret-token")).client_users().await.unwrap();

    mock.assert_async().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "7");
    assert_eq!(users[0].registration_status, RegistrationStatus::Pending);
}

#[tokio::test]
async fn status_update_sends_patch_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/admin/client-users/7/status")
        .match_body(Matcher::Json(json!({"status": "Rejected", "notes": "missing documents"})))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"Status updated"}"#)
        .expect(1)
        .create_async()
        .await;

    let update = ClientStatusUpdate::new(RegistrationStatus::Rejected, Some(" missing documents ")).unwrap();
    let ack = client_for(&server, Some("t")).update_client_status("7", &update).await.unwrap();

    mock.assert_async().await;
    assert_eq!(ack.message.as_deref(), Some("Status updated"));
}

#[tokio::test]
async fn success_false_surfaces_the_server_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/admin/dashboard")
        .with_status(200)
        .with_body(r#"{"success":false,"message":"Admin access required"}"#)
        .create_async()
        .await;

    let err = client_for(&server, None).dashboard().await.unwrap_err();

    assert!(matches!(err, DeviceDeskError::Server { status: 200, .. }));
    assert_eq!(err.user_message(), "Admin access required");
}

#[tokio::test]
async fn bare_payloads_and_search_query_are_accepted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/admin/search")
        .match_query(Matcher::UrlEncoded("query".into(), "ab".into()))
        .with_status(200)
        .with_body(
            json!([
                {"id": "1", "first_name": "Abel", "last_name": "Nkosi", "email": "abel@x.org", "user_category": "client"},
                {"id": "2", "first_name": "Abby", "last_name": "Smith", "email": "abby@x.org", "user_type": "operational"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let users = client_for(&server, Some("t")).search("ab").await.unwrap();

    mock.assert_async().await;
    let names: Vec<&str> = users.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["Abel", "Abby"]);
}

#[tokio::test]
async fn http_errors_use_the_body_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/admin/statistics/enhanced")
        .with_status(401)
        .with_body(r#"{"error":"Token expired"}"#)
        .create_async()
        .await;

    let err = client_for(&server, Some("old")).statistics(StatisticsKind::Enhanced).await.unwrap_err();

    assert_eq!(err.user_message(), "Token expired");
}

#[tokio::test]
async fn invoice_download_returns_raw_bytes() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/admin/client-users/7/invoice/download")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.4 fake")
        .create_async()
        .await;

    let bytes = client_for(&server, Some("t"))
        .invoice_document("7", InvoiceDocument::Download)
        .await
        .unwrap();

    assert_eq!(bytes, b"%PDF-1.4 fake");
}
