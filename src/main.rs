use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use commuter::app;
use commuter::client::NotificationClient;
use commuter::repo::SubscriptionRepo;
use commuter::service::SubscriptionService;
use commuter::settings::Settings;
use commuter::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().context("Failed to load settings")?;

    let notifications = &settings.notifications;
    let client = NotificationClient::new(
        notifications.endpoints()?,
        notifications.admin_email()?,
        notifications.api_timeout(),
    )?;
    let repo = SubscriptionRepo::new(settings.storage.store());
    let service = SubscriptionService::new(Arc::new(client), repo);

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, service)?.await.context("Failed to run app")
}
