//! tests/api/landing.rs

use crate::helpers::{
    assert_is_redirect_to, spawn_app, spawn_app_with_seed, spawn_app_without_store_file,
};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn landing_page_shows_the_active_subscriber_count() {
    // Arrange
    let test_app = spawn_app_with_seed("+15551234567,yes\n+15557654321,no\n").await;

    // Act
    let response = test_app.get_landing().await;

    // Assert
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Current subscribers: 1"));
}

#[tokio::test]
async fn landing_page_works_when_the_subscriber_file_is_missing() {
    // Arrange - no subscriber file at all; startup must log and carry on
    let test_app = spawn_app_without_store_file().await;

    // Act
    let response = test_app.get_landing().await;

    // Assert
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Current subscribers: 0"));
}

#[tokio::test]
async fn broadcast_sends_the_message_to_all_active_subscribers() {
    // Arrange
    let test_app = spawn_app_with_seed("+15551234567,yes\n+15557654321,no\n").await;

    Mock::given(path("/messages"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.sms_server)
        .await;

    // Act - Part 1 - post the broadcast form
    let response = test_app.post_broadcast("Hello subscribers!").await;

    // Assert
    assert_is_redirect_to(&response, "/");

    // Act - Part 2 - follow the redirect
    let html = test_app.get_landing_html().await;

    // Assert
    assert!(html.contains("<p><i>Message sent to 1 subscribers.</i></p>"));
    let bodies = test_app.gateway_request_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["originator"], "MBSender");
    assert_eq!(bodies[0]["body"], "Hello subscribers!");
    assert_eq!(
        bodies[0]["recipients"],
        serde_json::json!(["+15551234567"])
    );
}

#[tokio::test]
async fn broadcast_with_no_active_subscribers_still_calls_the_gateway_once() {
    // Arrange
    let test_app = spawn_app().await;

    Mock::given(path("/messages"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.sms_server)
        .await;

    // Act
    let response = test_app.post_broadcast("Anybody out there?").await;

    // Assert
    assert_is_redirect_to(&response, "/");
    let html = test_app.get_landing_html().await;
    assert!(html.contains("<p><i>Message sent to 0 subscribers.</i></p>"));
    let bodies = test_app.gateway_request_bodies().await;
    assert_eq!(bodies[0]["recipients"], serde_json::json!([]));
}

#[tokio::test]
async fn broadcast_surfaces_gateway_errors_on_the_landing_page() {
    // Arrange
    let test_app = spawn_app_with_seed("+15551234567,yes\n").await;

    let error_payload = serde_json::json!({
        "errors": [
            { "code": 2, "description": "Request not allowed", "parameter": null },
        ]
    });
    Mock::given(any())
        .respond_with(ResponseTemplate::new(422).set_body_json(error_payload))
        .expect(1)
        .mount(&test_app.sms_server)
        .await;

    // Act
    let response = test_app.post_broadcast("Hello subscribers!").await;

    // Assert
    assert_is_redirect_to(&response, "/");
    let html = test_app.get_landing_html().await;
    assert!(html.contains("Could not send message"));
    assert!(html.contains("Request not allowed"));
}

#[tokio::test]
async fn broadcast_recipients_follow_webhook_updates() {
    // Arrange - nobody is subscribed at startup
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&test_app.sms_server)
        .await;

    // Act - Part 1 - a subscription arrives via the webhook
    test_app
        .post_webhook(&serde_json::json!({
            "receiver": "14708000894",
            "originator": "16132093477",
            "payload": "SUBSCRIBE",
        }))
        .await;

    // Act - Part 2 - broadcast
    let response = test_app.post_broadcast("Welcome aboard!").await;

    // Assert - the recipient list was recomputed from the live store
    assert_is_redirect_to(&response, "/");
    let bodies = test_app.gateway_request_bodies().await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(
        bodies[1]["recipients"],
        serde_json::json!(["+16132093477"])
    );
}
