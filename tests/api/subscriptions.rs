use reqwest::StatusCode;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use commuter::model::SubscriptionStats;

use crate::helpers::{SubscribeForm, TestApp, ADMIN_PATH, CONFIRM_PATH, SUBSCRIBE_PATH};

async fn mount_endpoint(app: &TestApp, endpoint: &str, status: u16, expected_calls: u64) {
    Mock::given(path(endpoint))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(&app.form_server)
        .await;
}

#[tokio::test]
async fn subscribe_shows_success_panel_for_valid_email() {
    let app = TestApp::spawn().await;
    mount_endpoint(&app, SUBSCRIBE_PATH, 200, 1).await;
    mount_endpoint(&app, CONFIRM_PATH, 200, 1).await;
    mount_endpoint(&app, ADMIN_PATH, 200, 1).await;

    let res = app
        .subscription_create(&SubscribeForm::email("Rider@Commuter.App"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    let body = res.text().await.unwrap();
    assert!(body.contains("Welcome Aboard!"));
    assert!(body.contains(r#"action="/subscriptions/reset""#));

    let records = app.repo.read_all().await;
    assert_eq!(1, records.len());
    assert_eq!("rider@commuter.app", records[0].email);
    assert_eq!("commuter-landing-page", records[0].source);
}

#[tokio::test]
async fn subscribe_sends_primary_payload() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.form_server)
        .await;

    app.subscription_create(&SubscribeForm::email("rider@commuter.app"))
        .await
        .expect("Failed to execute request");

    let requests = app.form_server.received_requests().await.unwrap();
    let primary = requests
        .iter()
        .find(|r| r.url.path() == SUBSCRIBE_PATH)
        .expect("No primary submission");
    let body: serde_json::Value = serde_json::from_slice(&primary.body).unwrap();

    assert_eq!("rider@commuter.app", body["email"]);
    assert_eq!("commuter-landing-page", body["source"]);
    assert_eq!("New Commuter App Subscription", body["subject"]);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn subscribe_rejects_missing_or_blank_email_without_network() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let test_cases = vec![
        ("missing email", SubscribeForm { email: None }),
        ("empty email", SubscribeForm::email("")),
        ("blank email", SubscribeForm::email("    ")),
    ];

    for (desc, form) in test_cases {
        let res = app
            .subscription_create(&form)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::OK, res.status());
        let body = res.text().await.unwrap();
        assert!(
            body.contains("Please enter your email address"),
            "No inline error when payload was {}",
            desc
        );
    }

    assert!(app.repo.read_all().await.is_empty());
}

#[tokio::test]
async fn subscribe_reports_malformed_email_and_records_attempt() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let res = app
        .subscription_create(&SubscribeForm::email("not-an-email"))
        .await
        .expect("Failed to execute request");

    let body = res.text().await.unwrap();
    assert!(body.contains("Please enter a valid email address"));
    // The rejected value stays in the input
    assert!(body.contains(r#"value="not-an-email""#));

    let records = app.repo.read_all().await;
    assert_eq!(1, records.len());
    assert_eq!("not-an-email", records[0].email);
}

#[tokio::test]
async fn subscribe_fails_when_primary_endpoint_errors() {
    let app = TestApp::spawn().await;
    mount_endpoint(&app, SUBSCRIBE_PATH, 500, 1).await;
    mount_endpoint(&app, CONFIRM_PATH, 200, 0).await;
    mount_endpoint(&app, ADMIN_PATH, 200, 0).await;

    let res = app
        .subscription_create(&SubscribeForm::email("rider@commuter.app"))
        .await
        .expect("Failed to execute request");

    let body = res.text().await.unwrap();
    assert!(body.contains("Subscription failed! status: 500"));
    assert!(!body.contains("Welcome Aboard!"));

    // Fallback record
    assert_eq!(1, app.repo.read_all().await.len());
}

#[tokio::test]
async fn subscribe_reports_generic_error_when_endpoint_unreachable() {
    let app = TestApp::spawn_unreachable().await;

    let res = app
        .subscription_create(&SubscribeForm::email("rider@commuter.app"))
        .await
        .expect("Failed to execute request");

    let body = res.text().await.unwrap();
    assert!(body.contains("Something went wrong. Please try again."));
    assert_eq!(1, app.repo.read_all().await.len());
}

#[tokio::test]
async fn subscribe_succeeds_when_side_notifications_fail() {
    let app = TestApp::spawn().await;
    mount_endpoint(&app, SUBSCRIBE_PATH, 200, 1).await;
    mount_endpoint(&app, CONFIRM_PATH, 500, 1).await;
    mount_endpoint(&app, ADMIN_PATH, 503, 1).await;

    let res = app
        .subscription_create(&SubscribeForm::email("rider@commuter.app"))
        .await
        .expect("Failed to execute request");

    let body = res.text().await.unwrap();
    assert!(body.contains("Welcome Aboard!"));
    assert_eq!(1, app.repo.read_all().await.len());
}

#[tokio::test]
async fn admin_alert_includes_request_headers() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.form_server)
        .await;

    app.request(reqwest::Method::POST, "subscriptions")
        .header("User-Agent", "CommuterTest/2.0")
        .header("Referer", "https://news.example/launches")
        .form(&SubscribeForm::email("rider@commuter.app"))
        .send()
        .await
        .expect("Failed to execute request");

    let requests = app.form_server.received_requests().await.unwrap();
    let alert = requests
        .iter()
        .find(|r| r.url.path() == ADMIN_PATH)
        .expect("No admin alert sent");
    let body: serde_json::Value = serde_json::from_slice(&alert.body).unwrap();
    let message = body["message"].as_str().unwrap();

    assert_eq!("admin@test.com", body["email"]);
    assert_eq!("rider@commuter.app", body["replyTo"]);
    assert_eq!("CommuterTest/2.0", body["userAgent"]);
    assert_eq!("https://news.example/launches", body["referrer"]);
    assert!(message.contains("rider@commuter.app"));
}

#[tokio::test]
async fn reset_redirects_to_empty_form() {
    let app = TestApp::spawn().await;

    let res = app
        .subscription_reset()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::SEE_OTHER, res.status());
    assert_eq!("/", res.headers()["location"].to_str().unwrap());
}

#[tokio::test]
async fn reset_after_subscribing_shows_empty_form() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.form_server)
        .await;

    let subscribed = app
        .subscription_create(&SubscribeForm::email("rider@commuter.app"))
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();
    assert!(subscribed.contains("Welcome Aboard!"));

    let res = app
        .subscription_reset()
        .await
        .expect("Failed to execute request");
    let location = res.headers()["location"].to_str().unwrap().to_string();
    let location = location.trim_start_matches('/');

    let body = app
        .request(reqwest::Method::GET, location)
        .send()
        .await
        .expect("Failed to follow reset redirect")
        .text()
        .await
        .unwrap();

    assert!(body.contains(r#"name="email""#));
    assert!(body.contains(r#"value="""#));
    assert!(!body.contains("Welcome Aboard!"));
    assert!(!body.contains(r#"role="alert""#));
}

#[tokio::test]
async fn stats_count_stored_attempts() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.form_server)
        .await;

    for email in ["one@commuter.app", "two@commuter.app", "broken"] {
        app.subscription_create(&SubscribeForm::email(email))
            .await
            .expect("Failed to execute request");
    }

    let stats: SubscriptionStats = app
        .subscription_stats()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse stats");

    assert_eq!(SubscriptionStats { total: 3, recent: 3 }, stats);
}
