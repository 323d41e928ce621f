use std::path::Path;
use tracing::{error, info};

use crate::common;
use crate::plan::{
    ExportFileType, ExportProfile, ExportProfileItem, ImportConfig, ImportFileType, ImportProfile,
    Plan,
};
use crate::properties::ElementClass;
use crate::style::{
    ArrowShape, DiscreteEntry, DiscreteKey, ElementView, LineStyle, MappingFn, NodeShape,
    PropertyDependency, Value, ViewSnapshot, VisualStyle,
};

/// Writes a runnable sample project (plan, styles, view) into `dir`.
pub fn generate_sample(dir: String) {
    info!("Generating sample project: {:?}", dir);
    let target_path = Path::new(&dir);
    if let Err(e) = std::fs::create_dir_all(target_path) {
        error!("Failed to create target directory: {:?}", e);
        return;
    }

    let files = [
        ("plan.yaml", serde_yaml::to_string(&sample_plan()).map_err(anyhow::Error::from)),
        ("styles.yaml", serde_yaml::to_string(&vec![sample_style()]).map_err(anyhow::Error::from)),
        ("view.json", serde_json::to_string_pretty(&sample_view()).map_err(anyhow::Error::from)),
    ];

    for (name, content) in files {
        let content = match content {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to serialize {}: {:?}", name, e);
                return;
            }
        };
        let path = target_path.join(name);
        if let Err(e) = common::write_string_to_file(path.to_str().unwrap_or(name), &content) {
            error!("Failed to write file: {:?}", e);
            return;
        }
    }
}

pub fn sample_plan() -> Plan {
    Plan {
        import: ImportConfig {
            profiles: vec![
                ImportProfile {
                    filename: "styles.yaml".to_string(),
                    filetype: ImportFileType::Styles,
                },
                ImportProfile {
                    filename: "view.json".to_string(),
                    filetype: ImportFileType::View,
                },
            ],
        },
        export: ExportProfile {
            profiles: vec![ExportProfileItem {
                filename: "stylesheet.json".to_string(),
                exporter: ExportFileType::CytoscapeJs,
            }],
        },
    }
}

fn sample_style() -> VisualStyle {
    let mut style = VisualStyle::new("sample");

    for (id, value) in [
        ("node.fillColor", Value::Color { r: 10, g: 10, b: 200 }),
        ("node.transparency", Value::Opacity(200)),
        ("node.width", Value::Number(40.0)),
        ("node.height", Value::Number(30.0)),
        ("node.size", Value::Number(60.0)),
        ("node.shape", Value::NodeShape(NodeShape::RoundRectangle)),
        ("node.borderColor", Value::Color { r: 0, g: 0, b: 255 }),
        ("node.borderWidth", Value::Number(2.0)),
        (
            "node.labelFont",
            Value::Font {
                family: "Helvetica".to_string(),
                bold: false,
                size: 12.0,
            },
        ),
        ("node.labelFontSize", Value::Number(18.0)),
        ("edge.lineColor", Value::Color { r: 12, g: 100, b: 200 }),
        ("edge.color", Value::Color { r: 222, g: 100, b: 10 }),
        ("edge.width", Value::Number(3.0)),
        ("edge.lineStyle", Value::LineStyle(LineStyle::Dotted)),
        ("edge.targetArrowShape", Value::ArrowShape(ArrowShape::Delta)),
        ("edge.sourceArrowShape", Value::ArrowShape(ArrowShape::Tee)),
    ] {
        style.defaults.insert(id.to_string(), value);
    }

    style.mappings.push(MappingFn::Passthrough {
        column: "name".to_string(),
        property: "node.label".to_string(),
    });
    style.mappings.push(MappingFn::Discrete {
        column: "type".to_string(),
        property: "node.shape".to_string(),
        entries: vec![
            DiscreteEntry {
                key: DiscreteKey::Text("gene".to_string()),
                value: Value::NodeShape(NodeShape::Diamond),
            },
            DiscreteEntry {
                key: DiscreteKey::Text("protein".to_string()),
                value: Value::NodeShape(NodeShape::Ellipse),
            },
        ],
    });

    style.dependencies.push(PropertyDependency {
        id: "nodeSizeLock".to_string(),
        enabled: false,
        driver: "node.size".to_string(),
        dependents: vec!["node.width".to_string(), "node.height".to_string()],
    });

    style
}

fn sample_view() -> ViewSnapshot {
    let mut view = ViewSnapshot::default();

    let mut element = ElementView {
        id: "n1".to_string(),
        class: ElementClass::Node,
        bypasses: Default::default(),
    };
    element.bypasses.insert(
        "node.fillColor".to_string(),
        Value::Color { r: 255, g: 200, b: 0 },
    );
    view.elements.push(element);

    view.elements.push(ElementView {
        id: "e1".to_string(),
        class: ElementClass::Edge,
        bypasses: Default::default(),
    });

    view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_project_is_runnable() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();

        generate_sample(dir_str);

        for name in ["plan.yaml", "styles.yaml", "view.json"] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }

        let plan_path = dir.path().join("plan.yaml");
        crate::plan_execution::execute_plan(plan_path.to_str().unwrap().to_string(), false)
            .unwrap();
        let output = std::fs::read_to_string(dir.path().join("stylesheet.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["title"], "sample");
    }

    #[test]
    fn sample_style_passes_validation() {
        let style = sample_style();
        for mapping in &style.mappings {
            assert!(mapping.validate().is_ok());
        }
    }
}
