use tracing::info;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::ExportError;

pub fn create_path_if_not_exists(path: &str) -> anyhow::Result<()> {
    let path = Path::new(path)
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid path: no parent directory for '{}'", path))?;
    if !path.as_os_str().is_empty() && !path.exists() {
        info!("Creating path: {:?}", path);
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn write_string_to_file(filename: &str, content: &str) -> anyhow::Result<()> {
    create_path_if_not_exists(filename)?;
    let path = Path::new(filename);
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Writes `content` through a sibling temp file and renames it over the
/// target, so the target never holds a partially written document.
pub fn write_string_to_file_atomic(filename: &str, content: &str) -> Result<(), ExportError> {
    let flush = |source: std::io::Error| ExportError::Flush {
        path: filename.to_string(),
        source,
    };

    if let Some(parent) = Path::new(filename).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating path: {:?}", parent);
            std::fs::create_dir_all(parent).map_err(flush)?;
        }
    }

    let tmp = format!("{}.tmp", filename);
    {
        let mut file = File::create(&tmp).map_err(flush)?;
        file.write_all(content.as_bytes()).map_err(flush)?;
        file.flush().map_err(flush)?;
    }
    std::fs::rename(&tmp, filename).map_err(flush)?;
    Ok(())
}
