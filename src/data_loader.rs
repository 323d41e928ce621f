use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::ExportError;
use crate::style::{ViewSnapshot, VisualStyle};

/// Loads a set of visual styles from a JSON or YAML file and drops any
/// mapping that violates the model invariants.
pub fn load_styles(path: &Path) -> Result<Vec<VisualStyle>, ExportError> {
    let mut styles: Vec<VisualStyle> = parse_file(path)?;
    for style in &mut styles {
        sanitize_style(style);
    }
    debug!("Loaded {} styles from {}", styles.len(), path.display());
    Ok(styles)
}

/// Loads a view snapshot (element ids plus bypass overrides).
pub fn load_view(path: &Path) -> Result<ViewSnapshot, ExportError> {
    let view: ViewSnapshot = parse_file(path)?;
    debug!(
        "Loaded view snapshot with {} elements from {}",
        view.elements.len(),
        path.display()
    );
    Ok(view)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("");
    let content = std::fs::read_to_string(path)?;

    match extension {
        "json" => serde_json::from_str(&content)
            .map_err(|e| ExportError::ParseError(format!("{}: {}", path.display(), e))),
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .map_err(|e| ExportError::ParseError(format!("{}: {}", path.display(), e))),
        other => Err(ExportError::UnsupportedFormat(other.to_string())),
    }
}

fn sanitize_style(style: &mut VisualStyle) {
    let name = style.name.clone();
    style.mappings.retain(|mapping| match mapping.validate() {
        Ok(()) => true,
        Err(reason) => {
            warn!(
                "Dropping mapping on {} in style {}: {}",
                mapping.property(),
                name,
                reason
            );
            false
        }
    });
}
