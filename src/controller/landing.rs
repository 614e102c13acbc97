use actix_web::get;

use maud::Markup;

use crate::service::FormState;
use crate::view::landing_page;

/// Landing page with an empty subscription form
#[tracing::instrument(name = "Render landing page")]
#[get("/")]
pub async fn index() -> Markup {
    landing_page(&FormState::default(), "")
}
