use std::sync::Arc;

use chrono::{DateTime, Utc};

use thiserror::Error;

use crate::client::{AdminAlert, NotificationError, Notifier};
use crate::domain::EmailAddress;
use crate::model::{SubscriptionRecord, SubscriptionResult};
use crate::repo::SubscriptionRepo;

pub const EMPTY_EMAIL_MESSAGE: &str = "Please enter your email address";
pub const SUCCESS_MESSAGE: &str = "Successfully subscribed! Check your email for confirmation.";

#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("{}", EMPTY_EMAIL_MESSAGE)]
    EmptyEmail,

    #[error("{0}")]
    InvalidEmail(String),

    #[error("Subscription failed! status: {0}")]
    Rejected(u16),

    #[error("Something went wrong. Please try again.")]
    Unreachable(#[source] reqwest::Error),
}

impl From<NotificationError> for SubscribeError {
    fn from(e: NotificationError) -> Self {
        match e {
            NotificationError::Status(status) => Self::Rejected(status),
            NotificationError::Network(e) => Self::Unreachable(e),
        }
    }
}

/// Request metadata forwarded in the admin alert
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Runs one subscription attempt end to end.
/// Only the primary submission decides the outcome.
pub struct SubscriptionService {
    notifier: Arc<dyn Notifier>,
    repo: SubscriptionRepo,
}

impl SubscriptionService {
    pub fn new(notifier: Arc<dyn Notifier>, repo: SubscriptionRepo) -> Self {
        Self { notifier, repo }
    }

    pub fn repo(&self) -> &SubscriptionRepo {
        &self.repo
    }

    #[tracing::instrument(name = "Subscribe to launch notifications", skip(self))]
    pub async fn subscribe(&self, email: &str, client: &ClientInfo) -> SubscriptionResult {
        match self.try_subscribe(email, client).await {
            Ok(subscription_id) => SubscriptionResult::succeeded(SUCCESS_MESSAGE, subscription_id),
            Err(e) => SubscriptionResult::failed(e.to_string()),
        }
    }

    async fn try_subscribe(&self, email: &str, client: &ClientInfo) -> Result<String, SubscribeError> {
        if email.trim().is_empty() {
            return Err(SubscribeError::EmptyEmail);
        }

        let outcome = self.submit(email, client).await;
        if let Err(e) = &outcome {
            tracing::error!(error = ?e, "Email subscription failed");
            // Attempts are kept even when they never reached the network
            self.repo
                .append(SubscriptionRecord::now(EmailAddress::normalize(email)))
                .await;
        }
        outcome
    }

    async fn submit(&self, email: &str, client: &ClientInfo) -> Result<String, SubscribeError> {
        let email: EmailAddress = email.parse().map_err(SubscribeError::InvalidEmail)?;
        let record = SubscriptionRecord::now(email.to_string());

        self.notifier.submit_subscription(&record).await?;

        let alert = AdminAlert {
            subscriber: email.clone(),
            timestamp: record.timestamp,
            stats: self.repo.compute_stats().await,
            user_agent: client.user_agent.clone(),
            referrer: client.referrer.clone(),
        };
        let (confirmation, admin) = tokio::join!(
            self.notifier.send_confirmation(&email),
            self.notifier.send_admin_alert(&alert),
        );
        tracing::debug!(?confirmation, ?admin, "Side notifications settled");

        let subscription_id = subscription_id(Utc::now());
        self.repo.append(record).await;

        Ok(subscription_id)
    }
}

fn subscription_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}
