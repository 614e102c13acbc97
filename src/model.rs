mod subscriptions;

pub use subscriptions::{SubscriptionRecord, SubscriptionResult, SubscriptionStats, SOURCE};
