pub mod dependencies;
pub mod mappings;
pub mod values;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ExportError;
use crate::properties::{ElementClass, PropertyRegistry};
use crate::style::{MappingFn, ViewSnapshot, VisualStyle};

/// One selector/css unit of the output document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Block {
    pub selector: String,
    pub css: IndexMap<String, String>,
}

/// One compiled style: `{ "title": ..., "style": [ <block>, ... ] }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StyleEntry {
    pub title: String,
    pub style: Vec<Block>,
}

/// Compiles every style against one view snapshot. Styles compile
/// independently; entries keep input order.
pub fn compile(
    registry: &PropertyRegistry,
    styles: &[VisualStyle],
    view: &ViewSnapshot,
) -> Vec<StyleEntry> {
    styles
        .iter()
        .map(|style| compile_style(registry, style, view))
        .collect()
}

/// Compiles and serializes the whole document as pretty-printed JSON.
pub fn render(
    registry: &PropertyRegistry,
    styles: &[VisualStyle],
    view: &ViewSnapshot,
) -> Result<String, ExportError> {
    let document = compile(registry, styles, view);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// The consuming format's cascade is later-wins, so block order is fixed:
/// base node/edge defaults, then discrete, continuous and passthrough
/// mapping rules, then per-element bypass blocks.
fn compile_style(
    registry: &PropertyRegistry,
    style: &VisualStyle,
    view: &ViewSnapshot,
) -> StyleEntry {
    debug!("Compiling style {} ({})", style.name, style.stats());

    let resolved = dependencies::resolve_defaults(style);
    let locked = dependencies::locked_properties(style);
    let mut blocks = Vec::new();

    for class in [ElementClass::Node, ElementClass::Edge] {
        let mut css = IndexMap::new();
        for def in registry.iter_class(class) {
            let Some(value) = resolved.get(&def.id) else {
                continue;
            };
            if let Some(parts) = values::format_value(def, value) {
                css.extend(parts);
            }
        }
        blocks.push(Block {
            selector: class.selector().to_string(),
            css,
        });
    }

    let active: Vec<&MappingFn> = style
        .mappings
        .iter()
        .filter(|mapping| {
            if locked.contains(mapping.property()) {
                debug!(
                    "Suppressing mapping on {}: property is lock-governed",
                    mapping.property()
                );
                return false;
            }
            true
        })
        .collect();

    for mapping in active.iter().filter(|m| matches!(m, MappingFn::Discrete { .. })) {
        blocks.extend(mappings::translate(registry, mapping));
    }
    for mapping in active.iter().filter(|m| matches!(m, MappingFn::Continuous { .. })) {
        blocks.extend(mappings::translate(registry, mapping));
    }
    for mapping in active.iter().filter(|m| matches!(m, MappingFn::Passthrough { .. })) {
        blocks.extend(mappings::translate(registry, mapping));
    }

    for element in view.bypassed_elements() {
        let mut css = IndexMap::new();
        for (property, value) in &element.bypasses {
            let Some(def) = registry.get(property) else {
                warn!(
                    "Skipping bypass on unknown property {} for element {}",
                    property, element.id
                );
                continue;
            };
            if def.class != element.class {
                warn!(
                    "Skipping bypass on {} for {} element {}",
                    property,
                    element.class.selector(),
                    element.id
                );
                continue;
            }
            if let Some(parts) = values::format_value(def, value) {
                css.extend(parts);
            }
        }
        if css.is_empty() {
            continue;
        }
        // One block per element, carrying every bypassed property together.
        blocks.push(Block {
            selector: format!("{}[ id = {} ]", element.class.selector(), element.id),
            css,
        });
    }

    StyleEntry {
        title: style.name.clone(),
        style: blocks,
    }
}
