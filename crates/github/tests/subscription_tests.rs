//! Subscription gate tests

use setup_applanga_core::{Error, Settings};
use setup_applanga_github::{SubscriptionGate, SubscriptionStatus};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUBSCRIPTION_PATH: &str = "/v1/github/acme/widgets/actions/subscription";

fn gate(server: &MockServer) -> SubscriptionGate {
    let settings = Settings::new()
        .with_subscription_base(server.uri())
        .with_subscription_timeout(Duration::from_millis(200));
    SubscriptionGate::new(&settings, "acme/widgets").unwrap()
}

#[tokio::test]
async fn test_success_is_valid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SUBSCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(gate(&server).check().await.unwrap(), SubscriptionStatus::Valid);
}

#[tokio::test]
async fn test_explicit_rejection_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SUBSCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"message\":\"no subscription\"}"))
        .mount(&server)
        .await;

    let err = gate(&server).check().await.unwrap_err();
    assert!(matches!(err, Error::SubscriptionRejected { status: 403 }));
    assert!(err.is_subscription_rejection());
}

#[tokio::test]
async fn test_server_error_is_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SUBSCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    assert!(matches!(
        gate(&server).check().await,
        Err(Error::SubscriptionRejected { status: 500 })
    ));
}

#[tokio::test]
async fn test_timeout_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SUBSCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(403).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    assert_eq!(
        gate(&server).check().await.unwrap(),
        SubscriptionStatus::Unreachable
    );
}

#[tokio::test]
async fn test_unreachable_continues() {
    let settings = Settings::new().with_subscription_base("http://127.0.0.1:1");
    let gate = SubscriptionGate::new(&settings, "acme/widgets").unwrap();
    assert_eq!(
        gate.url(),
        "http://127.0.0.1:1/v1/github/acme/widgets/actions/subscription"
    );
    assert_eq!(gate.check().await.unwrap(), SubscriptionStatus::Unreachable);
}
