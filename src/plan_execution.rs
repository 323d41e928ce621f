use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::channel;

use anyhow::{anyhow, Result};
use tracing::{debug, error, info, warn};

use crate::common;
use crate::data_loader;
use crate::export;
use crate::plan::{ExportFileType, ImportFileType, Plan};
use crate::properties::PropertyRegistry;
use crate::style::{ViewSnapshot, VisualStyle};

/// Main function to execute a plan, with optional file watching
pub fn execute_plan(plan: String, watch: bool) -> Result<()> {
    info!("Executing plan {}", plan);

    let plan_file_path = Path::new(&plan);
    let path_content = std::fs::read_to_string(plan_file_path)?;
    let plan: Plan = serde_yaml::from_str(&path_content)?;

    debug!("Executing plan: {:?}", plan);
    run_plan(plan.clone(), plan_file_path)?;

    if watch {
        watch_for_changes(plan, plan_file_path)?;
    }

    Ok(())
}

pub fn run_plan(plan: Plan, plan_file_path: &Path) -> Result<()> {
    let base_dir = plan_file_path.parent().unwrap_or_else(|| Path::new("."));
    let registry = PropertyRegistry::basic();

    let mut styles: Vec<VisualStyle> = Vec::new();
    let mut view = ViewSnapshot::default();

    for profile in &plan.import.profiles {
        let import_file_path = base_dir.join(&profile.filename);
        info!(
            "Importing file: {} as {:?}",
            import_file_path.display(),
            profile.filetype
        );
        match profile.filetype {
            ImportFileType::Styles => {
                styles.extend(data_loader::load_styles(&import_file_path)?);
            }
            // A missing or unreadable view only costs the bypass blocks.
            ImportFileType::View => match data_loader::load_view(&import_file_path) {
                Ok(loaded) => view = loaded,
                Err(e) => warn!(
                    "Could not load view snapshot {}: {}; continuing without bypasses",
                    import_file_path.display(),
                    e
                ),
            },
        }
    }

    info!(
        "Loaded {} styles and a view with {} elements",
        styles.len(),
        view.elements.len()
    );

    for profile in &plan.export.profiles {
        info!(
            "Exporting file: {} using exporter {:?}",
            profile.filename, profile.exporter
        );
        let output = match profile.exporter {
            ExportFileType::CytoscapeJs => export::render(&registry, &styles, &view)?,
        };

        let target = base_dir.join(&profile.filename);
        let target = target
            .to_str()
            .ok_or_else(|| anyhow!("Non-UTF-8 output path"))?;
        common::write_string_to_file_atomic(target, &output)?;
    }

    Ok(())
}

/// Sets up file watching for input files to re-run the plan on changes
fn watch_for_changes(plan: Plan, plan_file_path: &Path) -> Result<()> {
    info!("Watching for changes");
    let files: Vec<String> = plan
        .import
        .profiles
        .iter()
        .map(|profile| profile.filename.clone())
        .collect();

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for file in &files {
        let parent_dir = plan_file_path
            .parent()
            .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
        let path = parent_dir.join(file);
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(event) => {
                if let Ok(event) = event {
                    if let EventKind::Modify(_) = event.kind {
                        debug!("File modified {:?}", event.paths);
                        info!("Change detected, re-executing plan");
                        run_plan(plan.clone(), plan_file_path)?;
                    }
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    }
}
