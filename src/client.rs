mod notification_client;

pub use notification_client::{
    AdminAlert, NotificationClient, NotificationEndpoints, NotificationError, Notifier, Settled,
};
