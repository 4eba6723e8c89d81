use serde::Serialize;

use crate::catalog::{Dollars, PlanTerms};

/// Total cost for a plan size and the human-readable breakdown shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cost {
    pub total: Dollars,
    pub breakdown: String,
}

/// Computes the total and breakdown text for `max_users` users on `plan`.
///
/// Users beyond `minimum_users` are billed at `price_per_user` each. A plan size
/// of zero renders the base price alone.
pub fn compute_cost(max_users: u32, plan: &PlanTerms) -> Cost {
    let extra_users = max_users.saturating_sub(plan.minimum_users);
    let total = Dollars(plan.base_price.0 + u64::from(extra_users) * plan.price_per_user.0);

    let mut breakdown = format!("{} (base price)", plan.base_price);
    if max_users != 0 {
        let included = format!(
            "{} user{}",
            plan.minimum_users,
            if plan.minimum_users != 1 { "s" } else { "" }
        );
        if extra_users == 0 {
            breakdown.push_str(&format!(" with {} included", included));
            if !plan.price_per_user.is_zero() {
                breakdown.push_str(&format!(" ({} per additional user)", plan.price_per_user));
            }
        } else {
            breakdown.push_str(&format!(
                " with {} included and {} extra users at {} each",
                included, extra_users, plan.price_per_user
            ));
        }
    }

    Cost { total, breakdown }
}

/// A plan is free when it costs nothing at any size and covers a single user.
pub fn is_free_plan(plan: &PlanTerms) -> bool {
    plan.base_price.is_zero() && plan.price_per_user.is_zero() && plan.minimum_users == 1
}
