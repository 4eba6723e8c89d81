//! Reactive pricing for the plan-selection page.
//!
//! [`controller::PlanPricingController`] keeps the price breakdown and field
//! visibility in sync with the selected plan, the max-users field and the
//! "use card on file" choice. [`checkout::Checkout`] decides on submission
//! whether the card has to be tokenized first.

pub mod catalog;
pub mod checkout;
pub mod controller;
pub mod pricing;
pub mod state;
pub mod ui;

#[cfg(test)]
pub(crate) mod fake;

pub use crate::catalog::{Dollars, PlanCatalog, PlanId, PlanTerms};
pub use crate::controller::PlanPricingController;
pub use crate::pricing::{Cost, compute_cost, is_free_plan};
pub use crate::state::{PricingState, clamp_max_users};
