use crate::helpers::{assert_is_auth_challenge, TestApp};

#[tokio::test]
async fn export_requires_admin_credentials() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .get(format!("{}/export_csv", &app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_is_auth_challenge(&response);
}

#[tokio::test]
async fn export_rejects_a_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .get(format!("{}/export_csv", &app.address))
        .basic_auth(&app.test_admin.username, Some("not-the-password"))
        .send()
        .await
        .expect("Failed to send request");

    assert_is_auth_challenge(&response);
}

#[tokio::test]
async fn an_empty_list_exports_only_the_header() {
    let app = TestApp::spawn().await;

    let response = app.get_as_admin("/export_csv").await;

    assert_eq!(200, response.status());
    assert_eq!(response.headers()["Content-Type"], "text/csv; charset=utf-8");
    assert_eq!(
        response.headers()["Content-Disposition"],
        "attachment; filename=cloeve_mail_list.csv"
    );
    assert_eq!(response.text().await.unwrap(), "Email,Source,Date\n");
}

#[tokio::test]
async fn every_subscriber_is_exported_in_insertion_order() {
    let app = TestApp::spawn().await;
    app.create_subscriber("zed@example.com", "/z").await;
    app.create_subscriber("amy@example.com", "/a?ref=1&utm=2").await;

    let csv = app.get_as_admin("/export_csv").await.text().await.unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("zed@example.com,/z,\""));
    assert!(lines[2].starts_with("amy@example.com,/a?ref=1&amp;utm=2,\""));
}
