use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{env_config::Config, error::Res, http::Success};
use pricing::PlanCatalog;

use crate::{
    dtos::sub::{SubscriptionForm, SubscriptionResponse},
    services,
};

/// Receives the submitted plan form.
///
/// # Input
/// Form-encoded fields of the plan form:
/// - `plan`: selected plan id
/// - `max_users`: (Optional) plan size; absent on single-user pages
/// - `use_card_on_file`: (Optional) `"True"` when paying with the saved card
/// - `stripe_token`: (Optional) token created by the page for a new card
///
/// # Output
/// - Success: 201 with `{ plan, max_users, total, breakdown, token }`
/// - Error: 400 when a paid plan is submitted without any card,
///   402 when Stripe reports the token as already used
#[post("/subscribe")]
pub async fn post_subscribe(
    form: web::Form<SubscriptionForm>,
    config: web::Data<Arc<Config>>,
    catalog: web::Data<Arc<PlanCatalog>>,
) -> Res<impl Responder> {
    let cleaned = services::sub::clean_subscription(&catalog, &form)?;
    if let Some(token) = &cleaned.token {
        services::sub::verify_token(&config.stripe, token).await?;
    }

    log::info!(
        "Plan {} selected for {} users ({})",
        cleaned.plan,
        cleaned.max_users,
        cleaned.cost.total
    );

    Success::created(SubscriptionResponse {
        plan: cleaned.plan,
        max_users: cleaned.max_users,
        cost: cleaned.cost,
        token: cleaned.token.map(|token| token.to_string()),
    })
}
