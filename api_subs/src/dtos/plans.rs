use pricing::{Cost, PlanCatalog, PlanId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PlanCatalogResponse<'a> {
    pub stripe_pk: &'a str,
    pub plans: &'a PlanCatalog,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub plan: String,
    pub max_users: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub plan: PlanId,
    pub max_users: u32,
    pub free: bool,
    #[serde(flatten)]
    pub cost: Cost,
}
