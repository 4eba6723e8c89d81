use std::{collections::BTreeMap, fmt, str::FromStr};

use common::error::{AppError, Res};
use serde::{Deserialize, Serialize};

/// Plan identifier. Carried as a string-encoded integer in the page and the catalog payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub u32);

impl FromStr for PlanId {
    type Err = AppError;

    fn from_str(s: &str) -> Res<Self> {
        s.trim()
            .parse::<u32>()
            .map(PlanId)
            .map_err(|e| AppError::BadRequest(format!("Invalid plan id '{}': {}", s, e)))
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole-dollar amount. Rendered as `$N` with no rounding or locale handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub u64);

impl Dollars {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Billing terms of a single plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanTerms {
    #[serde(skip)]
    pub id: PlanId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub base_price: Dollars,
    pub price_per_user: Dollars,
    /// Users included in the base price. Always at least 1.
    pub minimum_users: u32,
}

/// Catalog entry as it appears in the payload; the id comes from the map key.
#[derive(Debug, Deserialize)]
struct PlanEntry {
    #[serde(default)]
    slug: Option<String>,
    base_price: Dollars,
    price_per_user: Dollars,
    minimum_users: u32,
}

/// Read-only mapping from plan id to plan terms, built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: BTreeMap<PlanId, PlanTerms>,
}

impl PlanCatalog {
    /// Parses the catalog payload: `{"<id>": {"base_price", "price_per_user", "minimum_users"}}`.
    ///
    /// Unknown keys in an entry (`pk`, ...) are ignored.
    pub fn from_json(text: &str) -> Res<Self> {
        let entries: BTreeMap<String, PlanEntry> = serde_json::from_str(text)?;
        let plans = entries
            .into_iter()
            .map(|(key, entry)| {
                let id = key.parse::<PlanId>()?;
                if entry.minimum_users == 0 {
                    return Err(AppError::BadRequest(format!(
                        "Plan {} must include at least one user",
                        id
                    )));
                }
                Ok((
                    id,
                    PlanTerms {
                        id,
                        slug: entry.slug,
                        base_price: entry.base_price,
                        price_per_user: entry.price_per_user,
                        minimum_users: entry.minimum_users,
                    },
                ))
            })
            .collect::<Res<BTreeMap<_, _>>>()?;

        log::debug!("Loaded plan catalog with {} plans", plans.len());
        Ok(PlanCatalog { plans })
    }

    pub fn get(&self, id: PlanId) -> Option<&PlanTerms> {
        self.plans.get(&id)
    }

    /// Like [`PlanCatalog::get`], failing with `NotFound` for unknown ids.
    pub fn require(&self, id: PlanId) -> Res<&PlanTerms> {
        self.get(id)
            .ok_or_else(|| AppError::NotFound(format!("Plan {} does not exist", id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanTerms> {
        self.plans.values()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl FromIterator<PlanTerms> for PlanCatalog {
    fn from_iter<I: IntoIterator<Item = PlanTerms>>(iter: I) -> Self {
        PlanCatalog {
            plans: iter.into_iter().map(|plan| (plan.id, plan)).collect(),
        }
    }
}
