use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// ## Structure
/// The registry of stylable visual properties consumed by the compiler.
///
/// ```text
/// PropertyRegistry
///   └── entries: IndexMap<id, PropertyDef>
///       ├── class: ElementClass (Node | Edge)
///       ├── kind: ValueKind
///       ├── css_names: Vec<String>   (empty for lock-driver-only properties)
///       └── passthrough: bool        (eligible as a passthrough target)
/// ```
///
/// The registry is built once and read for the whole compilation; the
/// compiler never mutates it.

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementClass {
    Node,
    Edge,
}

impl ElementClass {
    pub fn selector(&self) -> &'static str {
        match self {
            ElementClass::Node => "node",
            ElementClass::Edge => "edge",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Color,
    Opacity,
    Number,
    Text,
    Boolean,
    Font,
    NodeShape,
    ArrowShape,
    LineStyle,
    LabelPosition,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PropertyDef {
    pub id: String,
    pub class: ElementClass,
    pub kind: ValueKind,
    pub css_names: Vec<String>,
    pub passthrough: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    entries: IndexMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: PropertyDef) {
        self.entries.insert(def.id.clone(), def);
    }

    pub fn get(&self, id: &str) -> Option<&PropertyDef> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
        self.entries.values()
    }

    /// Properties of one element class, in declaration order. Declaration
    /// order drives the css order of the base selector blocks.
    pub fn iter_class(&self, class: ElementClass) -> impl Iterator<Item = &PropertyDef> {
        self.entries.values().filter(move |def| def.class == class)
    }

    /// The built-in property table for the cytoscape.js consumer.
    pub fn basic() -> Self {
        use ElementClass::{Edge, Node};
        use ValueKind::*;

        let mut registry = Self::new();

        let defs: Vec<(&str, ElementClass, ValueKind, &[&str], bool)> = vec![
            ("node.fillColor", Node, Color, &["background-color"], false),
            ("node.transparency", Node, Opacity, &["background-opacity"], false),
            ("node.width", Node, Number, &["width"], false),
            ("node.height", Node, Number, &["height"], false),
            // Drives the node size lock; no direct css output.
            ("node.size", Node, Number, &[], false),
            ("node.shape", Node, NodeShape, &["shape"], false),
            ("node.borderColor", Node, Color, &["border-color"], false),
            ("node.borderWidth", Node, Number, &["border-width"], false),
            ("node.borderTransparency", Node, Opacity, &["border-opacity"], false),
            ("node.label", Node, Text, &["content"], true),
            ("node.labelColor", Node, Color, &["color"], false),
            ("node.labelFont", Node, Font, &["font-family", "font-weight", "font-size"], false),
            ("node.labelFontSize", Node, Number, &["font-size"], false),
            ("node.labelTransparency", Node, Opacity, &["text-opacity"], false),
            (
                "node.labelPosition",
                Node,
                LabelPosition,
                &["text-halign", "text-valign", "text-justification"],
                false,
            ),
            ("edge.lineColor", Edge, Color, &["line-color"], false),
            // Drives the edge color lock; no direct css output.
            ("edge.color", Edge, Color, &[], false),
            ("edge.transparency", Edge, Opacity, &["opacity"], false),
            ("edge.lineStyle", Edge, LineStyle, &["line-style"], false),
            ("edge.width", Edge, Number, &["width"], false),
            ("edge.label", Edge, Text, &["content"], true),
            ("edge.labelColor", Edge, Color, &["color"], false),
            ("edge.labelFont", Edge, Font, &["font-family", "font-weight", "font-size"], false),
            ("edge.labelFontSize", Edge, Number, &["font-size"], false),
            ("edge.labelTransparency", Edge, Opacity, &["text-opacity"], false),
            ("edge.sourceArrowShape", Edge, ArrowShape, &["source-arrow-shape"], false),
            ("edge.targetArrowShape", Edge, ArrowShape, &["target-arrow-shape"], false),
            ("edge.sourceArrowColor", Edge, Color, &["source-arrow-color"], false),
            ("edge.targetArrowColor", Edge, Color, &["target-arrow-color"], false),
        ];

        for (id, class, kind, css_names, passthrough) in defs {
            registry.insert(PropertyDef {
                id: id.to_string(),
                class,
                kind,
                css_names: css_names.iter().map(|n| n.to_string()).collect(),
                passthrough,
            });
        }

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_registry_resolves_known_properties() {
        let registry = PropertyRegistry::basic();

        let fill = registry.get("node.fillColor").unwrap();
        assert_eq!(fill.class, ElementClass::Node);
        assert_eq!(fill.kind, ValueKind::Color);
        assert_eq!(fill.css_names, vec!["background-color"]);
        assert!(!fill.passthrough);

        assert!(registry.get("node.bogus").is_none());
    }

    #[test]
    fn lock_drivers_have_no_css_names() {
        let registry = PropertyRegistry::basic();
        assert!(registry.get("node.size").unwrap().css_names.is_empty());
        assert!(registry.get("edge.color").unwrap().css_names.is_empty());
    }

    #[test]
    fn only_labels_are_passthrough_eligible() {
        let registry = PropertyRegistry::basic();
        let eligible: Vec<&str> = registry
            .iter()
            .filter(|def| def.passthrough)
            .map(|def| def.id.as_str())
            .collect();
        assert_eq!(eligible, vec!["node.label", "edge.label"]);
    }

    #[test]
    fn iter_class_splits_node_and_edge_properties() {
        let registry = PropertyRegistry::basic();
        let nodes = registry.iter_class(ElementClass::Node).count();
        let edges = registry.iter_class(ElementClass::Edge).count();
        assert_eq!(nodes + edges, registry.len());
        assert!(nodes > 0 && edges > 0);
    }
}
