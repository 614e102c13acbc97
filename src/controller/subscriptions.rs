use actix_web::dev::HttpServiceFactory;
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use maud::Markup;

use serde::Deserialize;

use crate::service::{ClientInfo, SubscriptionFlow, SubscriptionService};
use crate::view::landing_page;

/// Form deserialization wrapper for the subscription form
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    email: String,
}

/// Run a subscription attempt and render the page in the resulting state.
/// Failures are shown inline, so this always answers 200.
#[tracing::instrument(name = "Submit subscription form", skip(req, service))]
#[post("")]
async fn create(
    req: HttpRequest,
    service: web::Data<SubscriptionService>,
    form: web::Form<SubscribeForm>,
) -> Markup {
    let flow = SubscriptionFlow::new(service.get_ref(), client_info(&req));
    let result = flow.subscribe(&form.email).await;

    // Keep what the visitor typed so they can correct it
    let email = if result.success { "" } else { form.email.as_str() };
    landing_page(&flow.state(), email)
}

/// Back to an empty form.
/// Flows live for a single request, so a server-rendered page is reset by
/// sending the visitor to `/`, where a fresh flow starts in `Idle`.
/// [`SubscriptionFlow::reset`] is for views holding on to a flow.
#[tracing::instrument(name = "Reset subscription form")]
#[post("/reset")]
async fn reset() -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[tracing::instrument(name = "Fetch subscription stats", skip(service))]
#[get("/stats")]
async fn stats(service: web::Data<SubscriptionService>) -> impl Responder {
    web::Json(service.repo().compute_stats().await)
}

fn client_info(req: &HttpRequest) -> ClientInfo {
    let header_value = |name: header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };

    ClientInfo {
        user_agent: header_value(header::USER_AGENT),
        referrer: header_value(header::REFERER),
    }
}

/// Subscription form endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/subscriptions")
        .service(create)
        .service(reset)
        .service(stats)
}
