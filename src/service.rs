mod flow;
mod subscriptions;

pub use flow::{FormState, SubscriptionFlow};
pub use subscriptions::{
    ClientInfo, SubscribeError, SubscriptionService, EMPTY_EMAIL_MESSAGE, SUCCESS_MESSAGE,
};
