use chrono::{DateTime, Duration, Utc};

use serde::{Deserialize, Serialize};

/// Origin tag stamped on every record created by the landing page
pub const SOURCE: &str = "commuter-landing-page";

/// Stored subscription attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Trimmed, lowercased email as submitted
    pub email: String,
    /// Serialized as an RFC 3339 string
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl SubscriptionRecord {
    pub fn new(email: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            timestamp,
            source: SOURCE.into(),
        }
    }

    /// Record stamped with the current time
    pub fn now(email: impl Into<String>) -> Self {
        Self::new(email, Utc::now())
    }
}

/// Outcome of a single subscribe call, consumed once by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

impl SubscriptionResult {
    pub fn succeeded(message: impl Into<String>, subscription_id: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            subscription_id: Some(subscription_id),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            subscription_id: None,
        }
    }
}

/// Aggregate counts derived from the stored records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStats {
    pub total: usize,
    /// Records newer than 24 hours
    pub recent: usize,
}

impl SubscriptionStats {
    pub fn compute(records: &[SubscriptionRecord], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::hours(24);
        let recent = records.iter().filter(|r| r.timestamp > cutoff).count();

        Self {
            total: records.len(),
            recent,
        }
    }
}
