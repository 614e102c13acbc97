use maud::{html, Markup};

use crate::service::FormState;

/// The "Stay Updated" card, bound to the state of a subscription flow.
/// `email` is echoed back into the input while an error is shown.
pub fn subscription_form(state: &FormState, email: &str) -> Markup {
    html! {
        section.subscribe #subscribe {
            div.card {
                div.card-header {
                    span.icon.icon-mail aria-hidden="true" { "✉" }
                    h3 { "Stay Updated" }
                    p.muted { "Be the first to know when we launch" }
                }
                @match state {
                    FormState::Subscribed { .. } => { (subscribed_panel()) }
                    _ => { (form(state, email)) }
                }
            }
        }
    }
}

fn subscribed_panel() -> Markup {
    html! {
        div.subscribed {
            div.badge-success aria-hidden="true" { "✔" }
            h4 { "Welcome Aboard! 🎉" }
            p.muted { "You're now subscribed to Commuter updates." }
            p.hint { "📧 Check your email for confirmation!" }
            form method="post" action="/subscriptions/reset" {
                button.link type="submit" { "Subscribe another email" }
            }
        }
    }
}

fn form(state: &FormState, email: &str) -> Markup {
    let loading = state.is_loading();
    let error = state.error();

    html! {
        form.subscribe-form method="post" action="/subscriptions" {
            div {
                input.field.field-error[error.is_some()]
                    type="email"
                    name="email"
                    value=(email)
                    placeholder="Enter your email address"
                    required
                    disabled[loading];
                @if let Some(error) = error {
                    div.error role="alert" {
                        span.icon aria-hidden="true" { "⚠" }
                        (error)
                    }
                }
            }
            button.primary type="submit" disabled[loading] {
                @if loading {
                    span.spinner aria-hidden="true" {}
                    "Subscribing..."
                } @else {
                    "Notify Me at Launch"
                }
            }
        }
    }
}
