use tokio::sync::watch;

use crate::model::SubscriptionResult;

use super::{ClientInfo, SubscriptionService, EMPTY_EMAIL_MESSAGE};

/// What the subscription form should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Awaiting input, optionally with the error from the last attempt
    Idle { error: Option<String> },
    /// Primary submission in flight
    Loading,
    Subscribed { subscription_id: String },
}

impl Default for FormState {
    fn default() -> Self {
        Self::Idle { error: None }
    }
}

impl FormState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Idle { error } => error.as_deref(),
            _ => None,
        }
    }
}

/// Form-side state machine driving a [`SubscriptionService`].
/// State changes are published so views can follow them.
pub struct SubscriptionFlow<'s> {
    service: &'s SubscriptionService,
    client: ClientInfo,
    state: watch::Sender<FormState>,
}

impl<'s> SubscriptionFlow<'s> {
    pub fn new(service: &'s SubscriptionService, client: ClientInfo) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            service,
            client,
            state,
        }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Follow state changes, e.g. to render `Loading` while the primary call is pending
    pub fn watch(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub async fn subscribe(&self, email: &str) -> SubscriptionResult {
        if email.trim().is_empty() {
            self.transition(FormState::Idle {
                error: Some(EMPTY_EMAIL_MESSAGE.into()),
            });
            return SubscriptionResult::failed(EMPTY_EMAIL_MESSAGE);
        }

        self.transition(FormState::Loading);

        let result = self.service.subscribe(email, &self.client).await;
        let next = match &result.subscription_id {
            Some(id) if result.success => FormState::Subscribed {
                subscription_id: id.clone(),
            },
            _ => FormState::Idle {
                error: Some(result.message.clone()),
            },
        };
        self.transition(next);

        result
    }

    pub fn reset(&self) {
        self.transition(FormState::default());
    }

    fn transition(&self, next: FormState) {
        tracing::debug!(state = ?next, "Subscription form transition");
        self.state.send_replace(next);
    }
}
