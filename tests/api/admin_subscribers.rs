use cloeve_mail::authentication::{BULK_DELETE_ACTION, DELETE_ACTION};

use crate::helpers::{assert_is_auth_challenge, TestApp};

#[tokio::test]
async fn the_admin_list_requires_admin_credentials() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .get(format!("{}/admin/subscribers", &app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_is_auth_challenge(&response);
}

#[tokio::test]
async fn an_unknown_admin_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .get(format!("{}/admin/subscribers", &app.address))
        .basic_auth("somebody-else", Some(&app.test_admin.password))
        .send()
        .await
        .expect("Failed to send request");

    assert_is_auth_challenge(&response);
}

#[tokio::test]
async fn an_empty_list_says_so() {
    let app = TestApp::spawn().await;

    let response = app.get_as_admin("/admin/subscribers").await;

    assert_eq!(200, response.status());
    let html = response.text().await.unwrap();
    assert!(html.contains("No data available."));
    assert!(html.contains("Export List as CSV"));
}

#[tokio::test]
async fn the_list_can_be_sorted_by_email() {
    let app = TestApp::spawn().await;
    for email in ["carol@example.com", "alice@example.com", "bob@example.com"] {
        app.create_subscriber(email, "/landing").await;
    }

    let html = app
        .get_as_admin("/admin/subscribers?orderby=email&order=asc")
        .await
        .text()
        .await
        .unwrap();

    let alice = html.find("alice@example.com").unwrap();
    let bob = html.find("bob@example.com").unwrap();
    let carol = html.find("carol@example.com").unwrap();
    assert!(alice < bob && bob < carol);
}

#[tokio::test]
async fn an_unknown_sort_column_keeps_insertion_order() {
    let app = TestApp::spawn().await;
    for email in ["carol@example.com", "alice@example.com"] {
        app.create_subscriber(email, "/landing").await;
    }

    let html = app
        .get_as_admin("/admin/subscribers?orderby=password&order=desc")
        .await
        .text()
        .await
        .unwrap();

    assert!(html.find("carol@example.com").unwrap() < html.find("alice@example.com").unwrap());
}

#[tokio::test]
async fn a_delete_link_with_a_valid_token_removes_the_subscriber() {
    let app = TestApp::spawn().await;
    let doomed = app.create_subscriber("doomed@example.com", "/").await;
    app.create_subscriber("kept@example.com", "/").await;

    let response = app
        .get_as_admin(&format!(
            "/admin/subscribers?action=delete&email_id={doomed}&_wpnonce={}",
            app.action_token(DELETE_ACTION)
        ))
        .await;

    assert_eq!(200, response.status());
    let html = response.text().await.unwrap();
    assert!(html.contains("Subscriber deleted."));
    assert!(!html.contains("doomed@example.com"));
    let remaining = app.stored_subscribers().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].email, "kept@example.com");
}

#[tokio::test]
async fn a_delete_link_with_a_bad_token_is_forbidden() {
    let app = TestApp::spawn().await;
    let id = app.create_subscriber("safe@example.com", "/").await;
    let bulk_token = app.action_token(BULK_DELETE_ACTION);

    for token in ["", "deadbeef", bulk_token.as_str()] {
        let response = app
            .get_as_admin(&format!(
                "/admin/subscribers?action=delete&email_id={id}&_wpnonce={token}"
            ))
            .await;
        assert_eq!(403, response.status());
    }

    assert_eq!(app.stored_subscribers().await.len(), 1);
}

#[tokio::test]
async fn bulk_delete_removes_every_checked_subscriber() {
    let app = TestApp::spawn().await;
    let first = app.create_subscriber("one@example.com", "/").await.to_string();
    let second = app.create_subscriber("two@example.com", "/").await.to_string();
    app.create_subscriber("three@example.com", "/").await;
    let token = app.action_token(BULK_DELETE_ACTION);

    let response = app
        .post_admin_subscribers(&[
            ("_wpnonce", token.as_str()),
            ("action", "bulk-delete"),
            ("bulk-delete[]", first.as_str()),
            ("bulk-delete[]", second.as_str()),
            ("bulk-delete[]", "9999"),
            ("action2", "-1"),
        ])
        .await;

    assert_eq!(200, response.status());
    assert!(response.text().await.unwrap().contains("2 subscriber(s) deleted."));
    let remaining = app.stored_subscribers().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].email, "three@example.com");
}

#[tokio::test]
async fn bulk_delete_without_a_valid_token_is_forbidden() {
    let app = TestApp::spawn().await;
    let id = app.create_subscriber("safe@example.com", "/").await.to_string();
    let wrong_token = app.action_token(DELETE_ACTION);

    let response = app
        .post_admin_subscribers(&[
            ("_wpnonce", wrong_token.as_str()),
            ("action2", "bulk-delete"),
            ("bulk-delete[]", id.as_str()),
        ])
        .await;

    assert_eq!(403, response.status());
    assert_eq!(app.stored_subscribers().await.len(), 1);
}

#[tokio::test]
async fn pages_after_the_last_one_are_empty() {
    let app = TestApp::spawn().await;
    app.create_subscriber("only@example.com", "/").await;

    let html = app
        .get_as_admin("/admin/subscribers?page=9")
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("No data available."));
    assert!(html.contains("1 items"));
}
