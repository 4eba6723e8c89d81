use crate::catalog::{PlanId, PlanTerms};

/// Mutable selection state of the plan form. One instance per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingState {
    pub plan_id: PlanId,
    /// Never below the selected plan's `minimum_users` once clamped.
    pub max_users: u32,
    /// `None` when the page offers no saved card.
    pub use_card_on_file: Option<bool>,
}

impl PricingState {
    /// Raises `max_users` to the plan minimum if needed and returns the result.
    pub fn clamp(&mut self, plan: &PlanTerms) -> u32 {
        self.max_users = clamp_max_users(Some(i64::from(self.max_users)), plan);
        self.max_users
    }

    pub fn uses_card_on_file(&self) -> bool {
        self.use_card_on_file.unwrap_or(false)
    }
}

/// Clamps a raw max-users reading to at least the plan minimum.
/// Unreadable input counts as below the minimum.
pub fn clamp_max_users(raw: Option<i64>, plan: &PlanTerms) -> u32 {
    let minimum = plan.minimum_users;
    match raw {
        Some(value) if value >= i64::from(minimum) => u32::try_from(value).unwrap_or(u32::MAX),
        _ => minimum,
    }
}

/// Reads the leading integer of an input value, the way number inputs are read in the page.
/// `"12"`, `" 12 "` and `"12.5"` all read as 12.
pub fn parse_max_users(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// The card-on-file radio carries `"True"`/`"False"`.
pub fn parse_card_on_file(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
