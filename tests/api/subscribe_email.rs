use cloeve_mail::domain::UNKNOWN_SOURCE;

use crate::helpers::TestApp;

#[tokio::test]
async fn subscribe_returns_a_200_for_valid_form_data() {
    let app = TestApp::spawn().await;

    let response = app
        .post_subscribe_email("email=ursula_le_guin%40gmail.com&source=%2Flanding")
        .await;

    assert_eq!(200, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"message": "Successfully subscribe!"}));

    let saved = app.stored_subscribers().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].email, "ursula_le_guin@gmail.com");
    assert_eq!(saved[0].source, "/landing");
}

#[tokio::test]
async fn subscribe_returns_a_400_when_the_email_is_missing_or_invalid() {
    let app = TestApp::spawn().await;
    let test_cases = [
        ("source=%2Flanding", "missing the email"),
        ("", "missing both fields"),
        ("email=&source=%2Flanding", "empty email"),
        ("email=definitely-not-an-email", "invalid email"),
        ("email=ursula%40localhost", "email without a qualified domain"),
    ];

    for (body, description) in test_cases {
        let response = app.post_subscribe_email(body).await;

        assert_eq!(
            400,
            response.status(),
            "The API did not fail with 400 Bad Request when the payload was {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "code": "no_email",
                "message": "No valid email found, please try again.",
                "data": {"status": 400}
            })
        );
    }
    assert!(app.stored_subscribers().await.is_empty());
}

#[tokio::test]
async fn subscribe_rejects_emails_carrying_code() {
    let app = TestApp::spawn().await;

    let response = app.post_subscribe_email("email=php%40example.com").await;

    assert_eq!(400, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "no_email");
    assert_eq!(body["message"], "Invalid email found, please try again.");
    assert!(app.stored_subscribers().await.is_empty());
}

#[tokio::test]
async fn missing_or_forbidden_sources_are_stored_as_unknown() {
    let app = TestApp::spawn().await;

    for body in [
        "email=a%40example.com",
        "email=b%40example.com&source=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
        "email=c%40example.com&source=%2Findex.php",
    ] {
        assert_eq!(200, app.post_subscribe_email(body).await.status());
    }

    let saved = app.stored_subscribers().await;
    assert_eq!(saved.len(), 3);
    assert!(saved.iter().all(|s| s.source == UNKNOWN_SOURCE));
}

#[tokio::test]
async fn the_same_email_can_subscribe_twice() {
    let app = TestApp::spawn().await;

    let first = app.create_subscriber("twice@example.com", "/a").await;
    let second = app.create_subscriber("twice@example.com", "/b").await;

    assert_ne!(first, second);
    assert_eq!(app.stored_subscribers().await.len(), 2);
}

#[tokio::test]
async fn subscribe_returns_a_400_when_the_body_is_not_a_form() {
    let app = TestApp::spawn().await;
    let url = format!("{}/subscribe_email", &app.address);
    let requests = [
        (
            app.api_client
                .post(&url)
                .header("Content-Type", "application/json")
                .body(r#"{"email":"","source":"/x"}"#),
            "a JSON document",
        ),
        (app.api_client.post(&url).body("email=a%40example.com"), "a body without a content type"),
    ];

    for (request, description) in requests {
        let response = request.send().await.expect("Failed to send request");

        assert_eq!(
            400,
            response.status(),
            "The API did not fail with 400 Bad Request when the payload was {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "code": "no_email",
                "message": "No valid email found, please try again.",
                "data": {"status": 400}
            })
        );
    }
    assert!(app.stored_subscribers().await.is_empty());
}
