use std::{fs, sync::Arc};

use common::error::Res;
use pricing::PlanCatalog;

/// Reads the plan catalog served to the plan-selection page.
pub fn load(path: &str) -> Res<Arc<PlanCatalog>> {
    let text = fs::read_to_string(path)?;
    let catalog = PlanCatalog::from_json(&text)?;
    log::info!("Loaded {} plans from {}", catalog.len(), path);
    Ok(Arc::new(catalog))
}
