use common::{
    env_config::StripeConfig,
    error::{AppError, Res},
};
use pricing::{
    Cost, PlanCatalog, PlanId, clamp_max_users, compute_cost, is_free_plan,
    state::{parse_card_on_file, parse_max_users},
};
use stripe::TokenId;

use crate::dtos::sub::SubscriptionForm;

pub(crate) const MISSING_CARD: &str =
    "You must supply a credit card number to upgrade to a non-free plan";

/// A validated plan form submission.
#[derive(Debug)]
pub(crate) struct CleanedSubscription {
    pub plan: PlanId,
    pub max_users: u32,
    pub cost: Cost,
    pub token: Option<TokenId>,
}

/// Validates a submitted plan form the same way the page does before submitting.
pub(crate) fn clean_subscription(
    catalog: &PlanCatalog,
    form: &SubscriptionForm,
) -> Res<CleanedSubscription> {
    let plan = catalog.require(form.plan.parse()?)?;

    // No max-users field means a single-user plan.
    let raw_max_users = match form.max_users.as_deref() {
        Some(raw) => parse_max_users(raw),
        None => Some(1),
    };
    let max_users = clamp_max_users(raw_max_users, plan);

    let use_card_on_file = form
        .use_card_on_file
        .as_deref()
        .is_some_and(parse_card_on_file);

    let token = form
        .stripe_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(common::stripe::parse_token_id)
        .transpose()?;

    if !is_free_plan(plan) && !use_card_on_file && token.is_none() {
        return Err(AppError::BadRequest(MISSING_CARD.to_string()));
    }

    Ok(CleanedSubscription {
        plan: plan.id,
        max_users,
        cost: compute_cost(max_users, plan),
        token,
    })
}

/// Checks the submitted token with Stripe when a secret key is configured.
pub(crate) async fn verify_token(config: &StripeConfig, token: &TokenId) -> Res<()> {
    if !config.can_verify_tokens() {
        log::debug!("No Stripe secret key configured, accepting token {}", token);
        return Ok(());
    }
    let client = common::stripe::create_client(&config.secret_key);
    common::stripe::retrieve_unused_token(&client, token).await?;
    Ok(())
}
