use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use serde::Serialize;

use url::Url;

use wiremock::MockServer;

use commuter::app;
use commuter::client::{NotificationClient, NotificationEndpoints};
use commuter::repo::{InMemoryStore, SubscriptionRepo};
use commuter::service::SubscriptionService;

pub const SUBSCRIBE_PATH: &str = "/subscribe";
pub const CONFIRM_PATH: &str = "/confirm";
pub const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Serialize)]
pub struct SubscribeForm {
    pub email: Option<String>,
}

impl SubscribeForm {
    pub fn email(email: &str) -> Self {
        Self {
            email: Some(email.into()),
        }
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub form_server: MockServer,
    pub repo: SubscriptionRepo,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let form_server = MockServer::start().await;
        let base = Url::parse(&form_server.uri()).expect("Failed to parse mock server uri");

        Self::spawn_with(form_server, base).await
    }

    /// App whose endpoints all point at a closed port
    pub async fn spawn_unreachable() -> Self {
        let form_server = MockServer::start().await;
        let base = Url::parse("http://127.0.0.1:1").unwrap();

        Self::spawn_with(form_server, base).await
    }

    async fn spawn_with(form_server: MockServer, base: Url) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let notification_client = {
            let endpoints = NotificationEndpoints {
                subscription: base.join(SUBSCRIBE_PATH).unwrap(),
                confirmation: base.join(CONFIRM_PATH).unwrap(),
                admin: base.join(ADMIN_PATH).unwrap(),
            };
            let admin_email = "admin@test.com"
                .parse()
                .expect("Failed to parse admin email address");
            let api_timeout = Some(Duration::from_secs(2));

            NotificationClient::new(endpoints, admin_email, api_timeout)
                .expect("Failed to create notification client")
        };

        let repo = SubscriptionRepo::new(Arc::new(InMemoryStore::new()));
        let service = SubscriptionService::new(Arc::new(notification_client), repo.clone());

        let server = app::run(listener, service).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            addr,
            client,
            form_server,
            repo,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn landing_page(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "").send().await
    }

    pub async fn subscription_create(&self, form: &SubscribeForm) -> reqwest::Result<Response> {
        self.request(Method::POST, "subscriptions")
            .form(form)
            .send()
            .await
    }

    pub async fn subscription_reset(&self) -> reqwest::Result<Response> {
        self.request(Method::POST, "subscriptions/reset").send().await
    }

    pub async fn subscription_stats(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "subscriptions/stats").send().await
    }
}
