use crate::properties::{PropertyDef, ValueKind};
use crate::style::{
    ArrowShape, HorizontalAlign, Justification, LineStyle, NodeShape, Value, VerticalAlign,
};

/// Formats one typed value for a property, pairing each literal with its css
/// name. Returns `None` when the value does not match the property's declared
/// kind or the property has no css output; the caller omits the property.
pub fn format_value(def: &PropertyDef, value: &Value) -> Option<Vec<(String, String)>> {
    let parts = format_parts(def.kind, value)?;
    if def.css_names.is_empty() || parts.len() != def.css_names.len() {
        return None;
    }
    Some(def.css_names.iter().cloned().zip(parts).collect())
}

fn format_parts(kind: ValueKind, value: &Value) -> Option<Vec<String>> {
    match (kind, value) {
        (ValueKind::Color, Value::Color { r, g, b }) => Some(vec![format_color(*r, *g, *b)]),
        (ValueKind::Opacity, Value::Opacity(alpha)) => Some(vec![format_opacity(*alpha)]),
        (ValueKind::Number, Value::Number(n)) => Some(vec![format_number(*n)]),
        (ValueKind::Text, Value::Text(text)) => Some(vec![text.clone()]),
        (ValueKind::Boolean, Value::Boolean(b)) => Some(vec![b.to_string()]),
        (ValueKind::Font, Value::Font { family, bold, size }) => Some(vec![
            family.clone(),
            if *bold { "bold" } else { "normal" }.to_string(),
            format_number(*size),
        ]),
        (ValueKind::NodeShape, Value::NodeShape(shape)) => {
            Some(vec![node_shape_keyword(*shape).to_string()])
        }
        (ValueKind::ArrowShape, Value::ArrowShape(shape)) => {
            Some(vec![arrow_shape_keyword(*shape).to_string()])
        }
        (ValueKind::LineStyle, Value::LineStyle(style)) => {
            Some(vec![line_style_keyword(*style).to_string()])
        }
        (
            ValueKind::LabelPosition,
            Value::LabelPosition {
                horizontal,
                vertical,
                justification,
            },
        ) => Some(vec![
            horizontal_keyword(*horizontal).to_string(),
            vertical_keyword(*vertical).to_string(),
            justification_keyword(*justification).to_string(),
        ]),
        _ => None,
    }
}

pub fn format_color(r: u8, g: u8, b: u8) -> String {
    format!("rgb({},{},{})", r, g, b)
}

/// `alpha/255` as a full-precision decimal. `f64`'s `Display` prints the
/// shortest string that round-trips to the exact double, so 200 becomes
/// `0.7843137254901961`.
pub fn format_opacity(alpha: u16) -> String {
    format!("{}", f64::from(alpha) / 255.0)
}

/// Integral doubles print without a trailing `.0`: `40.0` becomes `40`.
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}

fn node_shape_keyword(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Ellipse => "ellipse",
        NodeShape::Rectangle => "rectangle",
        NodeShape::RoundRectangle => "roundrectangle",
        NodeShape::Triangle => "triangle",
        NodeShape::Diamond => "diamond",
        NodeShape::Hexagon => "hexagon",
        NodeShape::Octagon => "octagon",
        NodeShape::Parallelogram => "parallelogram",
        NodeShape::Vee => "vee",
    }
}

fn arrow_shape_keyword(shape: ArrowShape) -> &'static str {
    match shape {
        ArrowShape::None => "none",
        ArrowShape::Delta => "triangle",
        ArrowShape::Tee => "tee",
        ArrowShape::Diamond => "diamond",
        ArrowShape::Circle => "circle",
        ArrowShape::Square => "square",
        ArrowShape::Vee => "vee",
    }
}

fn line_style_keyword(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Dotted => "dotted",
        LineStyle::Dashed => "dashed",
    }
}

fn horizontal_keyword(align: HorizontalAlign) -> &'static str {
    match align {
        HorizontalAlign::Left => "left",
        HorizontalAlign::Center => "center",
        HorizontalAlign::Right => "right",
    }
}

fn vertical_keyword(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Top => "top",
        VerticalAlign::Center => "center",
        VerticalAlign::Bottom => "bottom",
    }
}

fn justification_keyword(justification: Justification) -> &'static str {
    match justification {
        Justification::Left => "left",
        Justification::Center => "center",
        Justification::Right => "right",
    }
}
