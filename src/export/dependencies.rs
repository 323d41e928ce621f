use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::style::{Value, VisualStyle};

/// Applies the enabled lock groups to a style's defaults: every dependent
/// property ends up carrying its driver's value. Disabled groups contribute
/// nothing. Runs before any value is formatted or any mapping translated.
pub fn resolve_defaults(style: &VisualStyle) -> IndexMap<String, Value> {
    let mut resolved = style.defaults.clone();
    let mut claimed: HashMap<String, String> = HashMap::new();

    for dep in style.enabled_dependencies() {
        let Some(driver_value) = style.defaults.get(&dep.driver) else {
            debug!(
                "Dependency group {} skipped: driver {} has no default",
                dep.id, dep.driver
            );
            continue;
        };
        for dependent in &dep.dependents {
            if let Some(previous) = claimed.insert(dependent.clone(), dep.id.clone()) {
                warn!(
                    "Property {} is a dependent of enabled groups {} and {}; {} wins",
                    dependent, previous, dep.id, dep.id
                );
            }
            resolved.insert(dependent.clone(), driver_value.clone());
        }
    }

    resolved
}

/// Properties governed by an enabled lock. Their own mappings are suppressed
/// for the duration of the compilation.
pub fn locked_properties(style: &VisualStyle) -> HashSet<String> {
    style
        .enabled_dependencies()
        .flat_map(|dep| dep.dependents.iter().cloned())
        .collect()
}
