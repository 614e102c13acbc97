use std::time::Duration;

use anyhow::Context;

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use reqwest::Client;

use serde::Serialize;

use thiserror::Error;

use url::Url;

use crate::domain::EmailAddress;
use crate::model::{SubscriptionRecord, SubscriptionStats};

const SUBSCRIPTION_MESSAGE: &str = "New subscription from Commuter landing page";
const SUBSCRIPTION_SUBJECT: &str = "New Commuter App Subscription";
const CONFIRMATION_SUBJECT: &str = "Welcome to Commuter - Subscription Confirmed! 🚗";
const ADMIN_ALERT_SUBJECT: &str = "New Commuter subscriber";

const WELCOME_MESSAGE: &str = "\
Hi there!

Thank you for subscribing to Commuter updates! 🎉

We're excited to have you on board as we build the future of daily commuting. Here's what you can expect:

✅ You're now on our exclusive early access list
🚗 Smart ride-sharing with verified commuters
🛡️ Safe and secure with background checks
📍 AI-powered route optimization
📱 Coming soon to iOS and Android

We'll keep you updated on our progress and notify you the moment Commuter launches. In the meantime, feel free to follow us on social media for behind-the-scenes updates.

Thanks for joining our community!

The Commuter Team
Made with ❤️ in Egypt

---
This email was sent because you subscribed to Commuter updates at our landing page.
";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Endpoint responded with status {0}")]
    Status(u16),

    #[error("Failed to reach endpoint: {0}")]
    Network(#[from] reqwest::Error),
}

/// Outcome of a best-effort call. Collected by callers, never escalated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Delivered,
    Failed { reason: String },
}

impl Settled {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl From<Result<(), NotificationError>> for Settled {
    fn from(result: Result<(), NotificationError>) -> Self {
        match result {
            Ok(()) => Self::Delivered,
            Err(e) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Details about a new subscriber forwarded to the site admin
#[derive(Debug, Clone)]
pub struct AdminAlert {
    pub subscriber: EmailAddress,
    pub timestamp: DateTime<Utc>,
    pub stats: SubscriptionStats,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Outbound side of the subscription flow
#[async_trait]
pub trait Notifier: Send + Sync {
    /// The primary submission. Its failure fails the subscription.
    async fn submit_subscription(&self, record: &SubscriptionRecord)
        -> Result<(), NotificationError>;
    /// Welcome message addressed to the subscriber
    async fn send_confirmation(&self, recipient: &EmailAddress) -> Settled;
    async fn send_admin_alert(&self, alert: &AdminAlert) -> Settled;
}

#[derive(Debug, Clone)]
pub struct NotificationEndpoints {
    pub subscription: Url,
    pub confirmation: Url,
    pub admin: Url,
}

/// JSON webhook client for a form-processing API
#[derive(Debug, Clone)]
pub struct NotificationClient {
    client: Client,
    endpoints: NotificationEndpoints,
    admin_email: EmailAddress,
}

impl NotificationClient {
    /// Without a timeout, requests wait as long as the transport allows
    pub fn new(
        endpoints: NotificationEndpoints,
        admin_email: EmailAddress,
        api_timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = api_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build http client")?;

        Ok(Self {
            client,
            endpoints,
            admin_email,
        })
    }

    #[tracing::instrument(name = "Post notification payload", skip(self, payload))]
    pub async fn post<T: Serialize>(&self, url: &Url, payload: &T) -> Result<(), NotificationError> {
        let res = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(NotificationError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for NotificationClient {
    #[tracing::instrument(name = "Submit subscription", skip(self))]
    async fn submit_subscription(
        &self,
        record: &SubscriptionRecord,
    ) -> Result<(), NotificationError> {
        let payload = SubscriptionPayload {
            email: &record.email,
            message: SUBSCRIPTION_MESSAGE,
            timestamp: record.timestamp,
            source: &record.source,
            subject: SUBSCRIPTION_SUBJECT,
        };
        self.post(&self.endpoints.subscription, &payload).await
    }

    #[tracing::instrument(name = "Send confirmation email", skip(self))]
    async fn send_confirmation(&self, recipient: &EmailAddress) -> Settled {
        let payload = ConfirmationPayload {
            email: recipient.as_ref(),
            subject: CONFIRMATION_SUBJECT,
            message: WELCOME_MESSAGE,
            reply_to: recipient.as_ref(),
            timestamp: Utc::now(),
        };

        let settled: Settled = self.post(&self.endpoints.confirmation, &payload).await.into();
        if let Settled::Failed { reason } = &settled {
            tracing::warn!("Could not send confirmation email: {}", reason);
        }
        settled
    }

    #[tracing::instrument(name = "Send admin alert", skip(self))]
    async fn send_admin_alert(&self, alert: &AdminAlert) -> Settled {
        let message = admin_alert_message(alert);
        let payload = AdminAlertPayload {
            email: self.admin_email.as_ref(),
            subject: ADMIN_ALERT_SUBJECT,
            message: &message,
            reply_to: alert.subscriber.as_ref(),
            timestamp: alert.timestamp,
            subscription_count: alert.stats.total,
            user_agent: alert.user_agent.as_deref(),
            referrer: alert.referrer.as_deref(),
        };

        let settled: Settled = self.post(&self.endpoints.admin, &payload).await.into();
        if let Settled::Failed { reason } = &settled {
            tracing::warn!("Could not send admin alert: {}", reason);
        }
        settled
    }
}

fn admin_alert_message(alert: &AdminAlert) -> String {
    format!(
        "New subscriber: {}\nSubscribed at: {}\nTotal subscriptions: {}\nLast 24 hours: {}\nUser agent: {}\nReferrer: {}",
        alert.subscriber,
        alert.timestamp.to_rfc3339(),
        alert.stats.total,
        alert.stats.recent,
        alert.user_agent.as_deref().unwrap_or("unknown"),
        alert.referrer.as_deref().unwrap_or("direct"),
    )
}

#[derive(Debug, Serialize)]
struct SubscriptionPayload<'a> {
    email: &'a str,
    message: &'a str,
    timestamp: DateTime<Utc>,
    source: &'a str,
    subject: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmationPayload<'a> {
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    reply_to: &'a str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminAlertPayload<'a> {
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    reply_to: &'a str,
    timestamp: DateTime<Utc>,
    subscription_count: usize,
    user_agent: Option<&'a str>,
    referrer: Option<&'a str>,
}
