//! Style declaration formatting
//!
//! Style maps are keyed the way the styling forms set them (`fontWeight`,
//! `backgroundColor`). CSS output needs hyphenated names and units; JSX
//! output needs camelCase keys and JS literals.

use pagecraft_tree::{Position, StyleMap, StyleValue};
use serde_json::Value;

/// Properties whose bare numbers are emitted without `px`
const UNITLESS: [&str; 4] = ["opacity", "zoom", "font-weight", "scale"];

/// `fontWeight` → `font-weight`, `WebkitTransform` → `-webkit-transform`
pub fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    if is_ms_prefixed(name) {
        out.push('-');
    }
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// `msTransform` is the one vendor prefix written in lower case
fn is_ms_prefixed(name: &str) -> bool {
    name.strip_prefix("ms")
        .and_then(|rest| rest.chars().next())
        .map(|ch| ch.is_ascii_uppercase())
        .unwrap_or(false)
}

/// `font-weight` → `fontWeight`, `-webkit-transform` → `WebkitTransform`
pub fn js_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }

    let normalized;
    let name = match name.strip_prefix("-ms-") {
        Some(rest) => {
            normalized = format!("ms-{}", rest);
            normalized.as_str()
        }
        None => name,
    };

    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn format_number(value: f64) -> String {
    value.to_string()
}

/// CSS value for a declaration, or `None` if the value must be skipped.
///
/// Bare numbers (including numeric strings) get `px` unless the property is
/// unit-less.
pub fn css_value(property: &str, value: &StyleValue) -> Option<String> {
    if !value.is_valid() {
        return None;
    }

    let number = match value {
        StyleValue::Number(number) => Some(*number),
        StyleValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        StyleValue::Unset => None,
    };

    match (number, value) {
        (Some(number), _) if UNITLESS.contains(&property) => Some(format_number(number)),
        (Some(number), _) => Some(format!("{}px", format_number(number))),
        (None, StyleValue::Text(text)) => Some(text.trim().to_string()),
        (None, _) => None,
    }
}

/// Valid declarations as `(css-name, css-value)` pairs, in map order
pub fn declarations(style: &StyleMap) -> Vec<(String, String)> {
    style
        .iter()
        .filter_map(|(name, value)| {
            let property = css_property_name(name);
            css_value(&property, value).map(|value| (property, value))
        })
        .collect()
}

/// `width: 120px; opacity: 0.5;`
pub fn inline_declarations(style: &StyleMap) -> String {
    declarations(style)
        .iter()
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{ width: 120, backgroundColor: "red" }`
pub fn jsx_object(style: &StyleMap) -> String {
    let entries: Vec<String> = style
        .iter()
        .filter(|(_, value)| value.is_valid())
        .map(|(name, value)| {
            let key = js_property_name(name);
            let key = if is_identifier(&key) {
                key
            } else {
                Value::String(key).to_string()
            };
            let value = match value {
                StyleValue::Number(number) => format_number(*number),
                StyleValue::Text(text) => Value::String(text.trim().to_string()).to_string(),
                StyleValue::Unset => String::new(),
            };
            format!("{}: {}", key, value)
        })
        .collect();

    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
        }
        _ => false,
    }
}

/// Add the canvas position as a `translate` declaration
pub fn inject_translate(style: &mut StyleMap, position: Position) {
    style.insert(
        "translate".to_string(),
        StyleValue::Text(format!(
            "{}px {}px",
            format_number(position.x),
            format_number(position.y)
        )),
    );
}
