use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::properties::ElementClass;

/// ## Structure
/// The visual style model compiled into stylesheet documents.
///
/// ```text
/// VisualStyle
///   ├── defaults: IndexMap<property id, Value>
///   ├── mappings: Vec<MappingFn>
///   │   ├── Passthrough { column, property }
///   │   ├── Discrete { column, property, entries }
///   │   └── Continuous { column, property, points }
///   └── dependencies: Vec<PropertyDependency>
///
/// ViewSnapshot
///   └── elements: Vec<ElementView>
///       └── bypasses: IndexMap<property id, Value>
/// ```
///
/// All of this is a read-only snapshot for the duration of one compilation;
/// the compiler never mutates it.

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    Ellipse,
    Rectangle,
    RoundRectangle,
    Triangle,
    Diamond,
    Hexagon,
    Octagon,
    Parallelogram,
    Vee,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowShape {
    None,
    Delta,
    Tee,
    Diamond,
    Circle,
    Square,
    Vee,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right,
}

/// A typed style value. The variant set is closed; the formatter dispatches
/// on it exhaustively.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Value {
    Color { r: u8, g: u8, b: u8 },
    /// Integer transparency in 0..=255, emitted as a `v/255` decimal.
    Opacity(u16),
    Number(f64),
    Text(String),
    Boolean(bool),
    Font { family: String, bold: bool, size: f64 },
    NodeShape(NodeShape),
    ArrowShape(ArrowShape),
    LineStyle(LineStyle),
    LabelPosition {
        horizontal: HorizontalAlign,
        vertical: VerticalAlign,
        justification: Justification,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiscreteKey {
    Text(String),
    Boolean(bool),
    Integer(i64),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiscreteEntry {
    pub key: DiscreteKey,
    pub value: Value,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Boundary {
    pub lesser: Value,
    pub equal: Value,
    pub greater: Value,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContinuousPoint {
    pub threshold: f64,
    pub range: Boundary,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum MappingFn {
    Passthrough {
        column: String,
        property: String,
    },
    Discrete {
        column: String,
        property: String,
        entries: Vec<DiscreteEntry>,
    },
    Continuous {
        column: String,
        property: String,
        points: Vec<ContinuousPoint>,
    },
}

impl MappingFn {
    pub fn property(&self) -> &str {
        match self {
            MappingFn::Passthrough { property, .. } => property,
            MappingFn::Discrete { property, .. } => property,
            MappingFn::Continuous { property, .. } => property,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            MappingFn::Passthrough { column, .. } => column,
            MappingFn::Discrete { column, .. } => column,
            MappingFn::Continuous { column, .. } => column,
        }
    }

    /// Checks the structural invariants of one mapping: discrete keys unique,
    /// continuous thresholds present and distinct.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            MappingFn::Passthrough { .. } => Ok(()),
            MappingFn::Discrete { entries, .. } => {
                if entries.is_empty() {
                    return Err("discrete mapping has no entries".to_string());
                }
                let mut seen = HashSet::new();
                for entry in entries {
                    if !seen.insert(&entry.key) {
                        return Err(format!("duplicate discrete key {:?}", entry.key));
                    }
                }
                Ok(())
            }
            MappingFn::Continuous { points, .. } => {
                if points.is_empty() {
                    return Err("continuous mapping has no points".to_string());
                }
                let mut thresholds: Vec<f64> = points.iter().map(|p| p.threshold).collect();
                thresholds.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                if thresholds.windows(2).any(|w| w[0] == w[1]) {
                    return Err("duplicate continuous thresholds".to_string());
                }
                Ok(())
            }
        }
    }
}

/// A lock group: while enabled, every dependent property is governed by the
/// driver's resolved value instead of its own.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PropertyDependency {
    pub id: String,
    pub enabled: bool,
    pub driver: String,
    pub dependents: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VisualStyle {
    pub name: String,
    #[serde(default)]
    pub defaults: IndexMap<String, Value>,
    #[serde(default)]
    pub mappings: Vec<MappingFn>,
    #[serde(default)]
    pub dependencies: Vec<PropertyDependency>,
}

impl VisualStyle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn enabled_dependencies(&self) -> impl Iterator<Item = &PropertyDependency> {
        self.dependencies.iter().filter(|dep| dep.enabled)
    }

    pub fn stats(&self) -> String {
        format!(
            "Defaults: {}, Mappings: {}, Dependencies: {}",
            self.defaults.len(),
            self.mappings.len(),
            self.dependencies.len()
        )
    }
}

/// Immutable per-element view state: stable identifiers plus bypass
/// overrides, captured before compilation starts.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ViewSnapshot {
    #[serde(default)]
    pub elements: Vec<ElementView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ElementView {
    pub id: String,
    pub class: ElementClass,
    #[serde(default)]
    pub bypasses: IndexMap<String, Value>,
}

impl ViewSnapshot {
    pub fn bypassed_elements(&self) -> impl Iterator<Item = &ElementView> {
        self.elements.iter().filter(|e| !e.bypasses.is_empty())
    }
}
