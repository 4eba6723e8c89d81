use pricing::{Cost, PlanId};
use serde::{Deserialize, Serialize};

/// Fields posted by the plan form.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionForm {
    pub plan: String,
    pub max_users: Option<String>,
    pub use_card_on_file: Option<String>,
    pub stripe_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub plan: PlanId,
    pub max_users: u32,
    #[serde(flatten)]
    pub cost: Cost,
    pub token: Option<String>,
}
