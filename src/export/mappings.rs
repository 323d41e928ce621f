use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, warn};

use super::values::{format_color, format_number, format_opacity, format_value};
use super::Block;
use crate::properties::{PropertyDef, PropertyRegistry, ValueKind};
use crate::style::{ContinuousPoint, DiscreteEntry, DiscreteKey, MappingFn, Value};

/// Translates one mapping function into its selector blocks. Mappings that
/// resolve to nothing (ineligible passthrough, unknown property, malformed
/// point list) translate to an empty list, never to a partial block.
pub fn translate(registry: &PropertyRegistry, mapping: &MappingFn) -> Vec<Block> {
    let Some(def) = registry.get(mapping.property()) else {
        warn!(
            "Skipping mapping on unknown property {}",
            mapping.property()
        );
        return Vec::new();
    };

    match mapping {
        MappingFn::Passthrough { column, .. } => translate_passthrough(def, column),
        MappingFn::Discrete { column, entries, .. } => translate_discrete(def, column, entries),
        MappingFn::Continuous { column, points, .. } => translate_continuous(def, column, points),
    }
}

/// Selector grammar cannot carry whitespace in data attribute names.
pub fn sanitize_column(column: &str) -> String {
    let re = Regex::new(r"\s+").unwrap();
    re.replace_all(column.trim(), "_").to_string()
}

fn translate_passthrough(def: &PropertyDef, column: &str) -> Vec<Block> {
    if !def.passthrough {
        debug!("Property {} is not passthrough-eligible", def.id);
        return Vec::new();
    }
    let Some(css_name) = def.css_names.first() else {
        return Vec::new();
    };

    // A whole-element-class rule bound to live per-element data; the
    // consumer's own binding syntax picks the value up at render time.
    let mut css = IndexMap::new();
    css.insert(css_name.clone(), format!("data({})", column));
    vec![Block {
        selector: def.class.selector().to_string(),
        css,
    }]
}

fn translate_discrete(def: &PropertyDef, column: &str, entries: &[DiscreteEntry]) -> Vec<Block> {
    let column = sanitize_column(column);
    let base = def.class.selector();
    let mut blocks = Vec::new();

    for entry in entries {
        let Some(css) = format_value(def, &entry.value) else {
            debug!(
                "Skipping discrete branch {:?} on {}: unformattable target value",
                entry.key, def.id
            );
            continue;
        };
        // Boolean keys are presence tests; an equality predicate is never
        // valid for them.
        let selector = match &entry.key {
            DiscreteKey::Text(value) => format!("{}[{} = \"{}\"]", base, column, value),
            DiscreteKey::Integer(value) => format!("{}[{} = {}]", base, column, value),
            DiscreteKey::Boolean(true) => format!("{}[{}]", base, column),
            DiscreteKey::Boolean(false) => format!("{}[!{}]", base, column),
        };
        blocks.push(Block {
            selector,
            css: css.into_iter().collect(),
        });
    }

    blocks
}

fn translate_continuous(def: &PropertyDef, column: &str, points: &[ContinuousPoint]) -> Vec<Block> {
    if points.is_empty() {
        warn!("Skipping continuous mapping on {}: no points", def.id);
        return Vec::new();
    }

    let mut points = points.to_vec();
    points.sort_by(|a, b| {
        a.threshold
            .partial_cmp(&b.threshold)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if points.windows(2).any(|w| w[0].threshold == w[1].threshold) {
        warn!(
            "Skipping continuous mapping on {}: duplicate thresholds",
            def.id
        );
        return Vec::new();
    }

    let column = sanitize_column(column);
    let base = def.class.selector();
    let mut blocks = Vec::new();

    let first = &points[0];
    if let Some(css) = format_value(def, &first.range.lesser) {
        blocks.push(Block {
            selector: format!("{}[{} < {}]", base, column, format_number(first.threshold)),
            css: css.into_iter().collect(),
        });
    }

    for pair in points.windows(2) {
        if let Some(block) = interval_block(def, base, &column, &pair[0], &pair[1]) {
            blocks.push(block);
        }
    }

    let last = &points[points.len() - 1];
    if let Some(css) = format_value(def, &last.range.greater) {
        blocks.push(Block {
            selector: format!("{}[{} > {}]", base, column, format_number(last.threshold)),
            css: css.into_iter().collect(),
        });
    }

    blocks
}

/// One rule between two adjacent thresholds. Numeric and color targets get a
/// `mapData` interpolation/gradient over the endpoints' equal values; other
/// kinds step on the lower endpoint.
fn interval_block(
    def: &PropertyDef,
    base: &str,
    column: &str,
    lo: &ContinuousPoint,
    hi: &ContinuousPoint,
) -> Option<Block> {
    let selector = format!(
        "{}[{} >= {}][{} <= {}]",
        base,
        column,
        format_number(lo.threshold),
        column,
        format_number(hi.threshold)
    );

    let stops = match (def.kind, &lo.range.equal, &hi.range.equal) {
        (ValueKind::Number, Value::Number(a), Value::Number(b)) => {
            Some((format_number(*a), format_number(*b)))
        }
        (ValueKind::Opacity, Value::Opacity(a), Value::Opacity(b)) => {
            Some((format_opacity(*a), format_opacity(*b)))
        }
        (
            ValueKind::Color,
            Value::Color { r: r1, g: g1, b: b1 },
            Value::Color { r: r2, g: g2, b: b2 },
        ) => Some((format_color(*r1, *g1, *b1), format_color(*r2, *g2, *b2))),
        _ => None,
    };

    let css: IndexMap<String, String> = match stops {
        Some((from, to)) => {
            let css_name = def.css_names.first()?;
            let value = format!(
                "mapData({},{},{},{},{})",
                column,
                format_number(lo.threshold),
                format_number(hi.threshold),
                from,
                to
            );
            IndexMap::from_iter([(css_name.clone(), value)])
        }
        None => format_value(def, &lo.range.equal)?.into_iter().collect(),
    };

    Some(Block { selector, css })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Boundary;

    fn registry() -> PropertyRegistry {
        PropertyRegistry::basic()
    }

    fn number_point(threshold: f64, lesser: f64, equal: f64, greater: f64) -> ContinuousPoint {
        ContinuousPoint {
            threshold,
            range: Boundary {
                lesser: Value::Number(lesser),
                equal: Value::Number(equal),
                greater: Value::Number(greater),
            },
        }
    }

    #[test]
    fn passthrough_binds_labels_to_element_data() {
        let mapping = MappingFn::Passthrough {
            column: "name".to_string(),
            property: "node.label".to_string(),
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].selector, "node");
        assert_eq!(blocks[0].css.get("content"), Some(&"data(name)".to_string()));
    }

    #[test]
    fn ineligible_passthrough_emits_nothing() {
        let mapping = MappingFn::Passthrough {
            column: "weight".to_string(),
            property: "node.width".to_string(),
        };
        assert!(translate(&registry(), &mapping).is_empty());
    }

    #[test]
    fn string_keys_become_equality_predicates() {
        let mapping = MappingFn::Discrete {
            column: "Node Type".to_string(),
            property: "node.shape".to_string(),
            entries: vec![DiscreteEntry {
                key: DiscreteKey::Text("gene".to_string()),
                value: Value::NodeShape(crate::style::NodeShape::Diamond),
            }],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].selector, "node[Node_Type = \"gene\"]");
        assert_eq!(blocks[0].css.get("shape"), Some(&"diamond".to_string()));
    }

    #[test]
    fn boolean_keys_become_presence_predicates() {
        let mapping = MappingFn::Discrete {
            column: "Node Type2".to_string(),
            property: "node.labelFontSize".to_string(),
            entries: vec![
                DiscreteEntry {
                    key: DiscreteKey::Boolean(true),
                    value: Value::Number(13.0),
                },
                DiscreteEntry {
                    key: DiscreteKey::Boolean(false),
                    value: Value::Number(22.0),
                },
            ],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].selector, "node[Node_Type2]");
        assert_eq!(blocks[1].selector, "node[!Node_Type2]");
        for block in &blocks {
            assert!(!block.selector.contains('='));
        }
        assert_eq!(blocks[0].css.get("font-size"), Some(&"13".to_string()));
        assert_eq!(blocks[1].css.get("font-size"), Some(&"22".to_string()));
    }

    #[test]
    fn integer_keys_become_unquoted_equality_predicates() {
        let mapping = MappingFn::Discrete {
            column: "degree".to_string(),
            property: "node.borderWidth".to_string(),
            entries: vec![DiscreteEntry {
                key: DiscreteKey::Integer(3),
                value: Value::Number(5.0),
            }],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks[0].selector, "node[degree = 3]");
    }

    #[test]
    fn empty_discrete_mapping_emits_nothing() {
        let mapping = MappingFn::Discrete {
            column: "type".to_string(),
            property: "node.shape".to_string(),
            entries: Vec::new(),
        };
        assert!(translate(&registry(), &mapping).is_empty());
    }

    #[test]
    fn numeric_continuous_mapping_interpolates_between_points() {
        let mapping = MappingFn::Continuous {
            column: "Degree".to_string(),
            property: "node.width".to_string(),
            points: vec![
                number_point(1.0, 20.0, 20.0, 20.0),
                number_point(20.0, 200.0, 200.0, 400.0),
            ],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0].selector, "node[Degree < 1]");
        assert_eq!(blocks[0].css.get("width"), Some(&"20".to_string()));

        assert_eq!(blocks[1].selector, "node[Degree >= 1][Degree <= 20]");
        assert_eq!(
            blocks[1].css.get("width"),
            Some(&"mapData(Degree,1,20,20,200)".to_string())
        );

        assert_eq!(blocks[2].selector, "node[Degree > 20]");
        assert_eq!(blocks[2].css.get("width"), Some(&"400".to_string()));
    }

    #[test]
    fn points_are_sorted_before_translation() {
        let mapping = MappingFn::Continuous {
            column: "Degree".to_string(),
            property: "node.width".to_string(),
            points: vec![
                number_point(20.0, 200.0, 200.0, 400.0),
                number_point(1.0, 20.0, 20.0, 20.0),
            ],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks[0].selector, "node[Degree < 1]");
        assert_eq!(blocks[2].selector, "node[Degree > 20]");
    }

    #[test]
    fn color_continuous_mapping_emits_gradient_stops() {
        let point = |threshold: f64, c: (u8, u8, u8)| ContinuousPoint {
            threshold,
            range: Boundary {
                lesser: Value::Color { r: c.0, g: c.1, b: c.2 },
                equal: Value::Color { r: c.0, g: c.1, b: c.2 },
                greater: Value::Color { r: c.0, g: c.1, b: c.2 },
            },
        };
        let mapping = MappingFn::Continuous {
            column: "Degree".to_string(),
            property: "node.fillColor".to_string(),
            points: vec![point(3.0, (0, 0, 0)), point(10.0, (255, 0, 0))],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1].css.get("background-color"),
            Some(&"mapData(Degree,3,10,rgb(0,0,0),rgb(255,0,0))".to_string())
        );
    }

    #[test]
    fn opacity_continuous_mapping_interpolates_opacity_literals() {
        let point = |threshold: f64, alpha: u16| ContinuousPoint {
            threshold,
            range: Boundary {
                lesser: Value::Opacity(alpha),
                equal: Value::Opacity(alpha),
                greater: Value::Opacity(alpha),
            },
        };
        let mapping = MappingFn::Continuous {
            column: "Betweenness Centrality".to_string(),
            property: "node.transparency".to_string(),
            points: vec![point(0.22, 10), point(0.61, 80)],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks[1].selector, "node[Betweenness_Centrality >= 0.22][Betweenness_Centrality <= 0.61]");
        let value = blocks[1].css.get("background-opacity").unwrap();
        assert!(value.starts_with("mapData(Betweenness_Centrality,0.22,0.61,"));
    }

    #[test]
    fn non_interpolable_kinds_step_on_the_lower_endpoint() {
        let point = |threshold: f64, shape: crate::style::NodeShape| ContinuousPoint {
            threshold,
            range: Boundary {
                lesser: Value::NodeShape(shape),
                equal: Value::NodeShape(shape),
                greater: Value::NodeShape(shape),
            },
        };
        let mapping = MappingFn::Continuous {
            column: "Degree".to_string(),
            property: "node.shape".to_string(),
            points: vec![
                point(1.0, crate::style::NodeShape::Ellipse),
                point(5.0, crate::style::NodeShape::Diamond),
            ],
        };
        let blocks = translate(&registry(), &mapping);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].selector, "node[Degree >= 1][Degree <= 5]");
        assert_eq!(blocks[1].css.get("shape"), Some(&"ellipse".to_string()));
    }

    #[test]
    fn duplicate_thresholds_drop_the_whole_mapping() {
        let mapping = MappingFn::Continuous {
            column: "Degree".to_string(),
            property: "node.width".to_string(),
            points: vec![
                number_point(5.0, 1.0, 2.0, 3.0),
                number_point(5.0, 4.0, 5.0, 6.0),
            ],
        };
        assert!(translate(&registry(), &mapping).is_empty());
    }

    #[test]
    fn unknown_property_drops_the_mapping() {
        let mapping = MappingFn::Passthrough {
            column: "name".to_string(),
            property: "node.bogus".to_string(),
        };
        assert!(translate(&registry(), &mapping).is_empty());
    }

    #[test]
    fn column_names_are_sanitized_for_selectors() {
        assert_eq!(sanitize_column("Node Type2"), "Node_Type2");
        assert_eq!(sanitize_column("  spaced  out  "), "spaced_out");
        assert_eq!(sanitize_column("plain"), "plain");
    }
}
