use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{env_config::Config, error::Res, http::Success};
use pricing::{PlanCatalog, clamp_max_users, compute_cost, is_free_plan};

use crate::dtos::plans::{PlanCatalogResponse, QuoteRequest, QuoteResponse};

/// Returns the plan catalog embedded in the plan-selection page.
///
/// # Output
/// - Success: `{ stripe_pk, plans: { "<id>": { base_price, price_per_user, minimum_users } } }`
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/plans');
/// const { stripe_pk, plans } = await response.json();
/// document.getElementById('_id-planInfo').textContent = JSON.stringify(plans);
/// document.getElementById('id_stripe_pk').value = stripe_pk;
/// ```
#[get("")]
pub async fn get_plans(
    config: web::Data<Arc<Config>>,
    catalog: web::Data<Arc<PlanCatalog>>,
) -> Res<impl Responder> {
    Success::ok(PlanCatalogResponse {
        stripe_pk: &config.stripe.publishable_key,
        plans: &catalog,
    })
}

/// Prices a plan at a given size.
///
/// # Input
/// - `plan`: plan id as shown in the plan select
/// - `max_users`: (Optional) requested plan size, raised to the plan minimum
///
/// # Output
/// - Success: `{ plan, max_users, free, total, breakdown }`
/// - Error: 400 for a malformed plan id, 404 for an unknown plan
#[post("/quote")]
pub async fn post_quote(
    req: web::Json<QuoteRequest>,
    catalog: web::Data<Arc<PlanCatalog>>,
) -> Res<impl Responder> {
    let plan = catalog.require(req.plan.parse()?)?;
    let max_users = clamp_max_users(req.max_users, plan);

    Success::ok(QuoteResponse {
        plan: plan.id,
        max_users,
        free: is_free_plan(plan),
        cost: compute_cost(max_users, plan),
    })
}
