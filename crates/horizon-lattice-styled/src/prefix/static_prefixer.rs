//! Table-driven static vendor prefixer.

use super::Prefixer;
use crate::types::StyleValue;

/// Vendor flags for a prefixed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Vendors {
    webkit: bool,
    moz: bool,
    ms: bool,
}

const W: Vendors = Vendors { webkit: true, moz: false, ms: false };
const WM: Vendors = Vendors { webkit: true, moz: true, ms: false };
const WS: Vendors = Vendors { webkit: true, moz: false, ms: true };
const WMS: Vendors = Vendors { webkit: true, moz: true, ms: true };

/// Properties needing vendor-prefixed duplicates, keyed by camel-case name.
const PREFIXED_PROPERTIES: &[(&str, Vendors)] = &[
    // Transforms
    ("transform", WS),
    ("transformOrigin", WS),
    ("transformOriginX", WS),
    ("transformOriginY", WS),
    ("transformStyle", W),
    ("backfaceVisibility", W),
    ("perspective", W),
    ("perspectiveOrigin", W),
    // Transitions and animations
    ("transition", W),
    ("transitionDelay", W),
    ("transitionDuration", W),
    ("transitionProperty", W),
    ("transitionTimingFunction", W),
    ("animation", W),
    ("animationDelay", W),
    ("animationDirection", W),
    ("animationDuration", W),
    ("animationFillMode", W),
    ("animationIterationCount", W),
    ("animationName", W),
    ("animationPlayState", W),
    ("animationTimingFunction", W),
    // Flexible box
    ("flex", WS),
    ("flexBasis", W),
    ("flexDirection", WS),
    ("flexFlow", W),
    ("flexGrow", W),
    ("flexShrink", W),
    ("flexWrap", WS),
    ("alignContent", W),
    ("alignItems", W),
    ("alignSelf", W),
    ("justifyContent", W),
    ("order", W),
    // Multi-column layout
    ("columns", WM),
    ("columnCount", WM),
    ("columnFill", WM),
    ("columnGap", WM),
    ("columnRule", WM),
    ("columnRuleColor", WM),
    ("columnRuleStyle", WM),
    ("columnRuleWidth", WM),
    ("columnSpan", WM),
    ("columnWidth", WM),
    // User interface
    ("appearance", WM),
    ("userSelect", WMS),
    ("boxSizing", WM),
    ("textSizeAdjust", WS),
    ("hyphens", WMS),
    ("fontFeatureSettings", WM),
    ("touchAction", WS),
    ("scrollSnapType", WS),
    // Effects
    ("filter", W),
    ("backdropFilter", W),
    ("maskImage", W),
    ("maskSize", W),
    ("maskPosition", W),
    ("maskRepeat", W),
    ("clipPath", W),
    ("textDecorationLine", W),
    ("textDecorationStyle", W),
    ("textDecorationColor", W),
    ("textEmphasisPosition", W),
];

const SIZING_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "flexBasis",
    "columnWidth",
];

const SIZING_KEYWORDS: &[&str] = &["fit-content", "min-content", "max-content", "fill-available"];

const GRADIENTS: &[&str] = &[
    "linear-gradient(",
    "radial-gradient(",
    "repeating-linear-gradient(",
    "repeating-radial-gradient(",
];

/// A static vendor prefixer covering commonly prefixed properties and values.
///
/// Property prefixes are looked up from a fixed table, so the output does
/// not depend on the user agent. Prefixed variants are emitted before the
/// standard property. Unknown properties pass through unchanged.
///
/// # Example
///
/// ```
/// use horizon_lattice_styled::prelude::*;
///
/// let expanded = StaticPrefixer.expand("userSelect", &StyleValue::from("none"));
/// let names: Vec<_> = expanded.iter().map(|(p, _)| p.as_str()).collect();
/// assert_eq!(names, ["WebkitUserSelect", "MozUserSelect", "msUserSelect", "userSelect"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPrefixer;

impl StaticPrefixer {
    /// Create a new static prefixer.
    pub fn new() -> Self {
        Self
    }
}

impl Prefixer for StaticPrefixer {
    fn expand(&self, property: &str, value: &StyleValue) -> Vec<(String, StyleValue)> {
        // Already vendor-specific.
        if property.starts_with('-') {
            return vec![(property.to_string(), value.clone())];
        }

        let camel = camelize(property);
        let value = prefix_value(&camel, value).unwrap_or_else(|| value.clone());

        let mut expanded = Vec::with_capacity(4);
        if let Some(vendors) = vendors_for(&camel) {
            let capitalized = capitalize(&camel);
            if vendors.webkit {
                expanded.push((format!("Webkit{capitalized}"), value.clone()));
            }
            if vendors.moz {
                expanded.push((format!("Moz{capitalized}"), value.clone()));
            }
            if vendors.ms {
                expanded.push((format!("ms{capitalized}"), value.clone()));
            }
        }
        expanded.push((property.to_string(), value));
        expanded
    }
}

fn vendors_for(camel: &str) -> Option<Vendors> {
    PREFIXED_PROPERTIES
        .iter()
        .find(|(name, _)| *name == camel)
        .map(|(_, vendors)| *vendors)
}

/// Expand values that only exist in prefixed form on some engines.
fn prefix_value(camel: &str, value: &StyleValue) -> Option<StyleValue> {
    let text = value.as_str()?.trim();

    let variants: Vec<String> = match (camel, text) {
        ("display", "flex") => vec![
            "-webkit-box".into(),
            "-moz-box".into(),
            "-ms-flexbox".into(),
            "-webkit-flex".into(),
            "flex".into(),
        ],
        ("display", "inline-flex") => vec![
            "-webkit-inline-box".into(),
            "-moz-inline-box".into(),
            "-ms-inline-flexbox".into(),
            "-webkit-inline-flex".into(),
            "inline-flex".into(),
        ],
        ("position", "sticky") => vec!["-webkit-sticky".into(), "sticky".into()],
        ("cursor", "grab" | "grabbing" | "zoom-in" | "zoom-out") => vendor_values(text),
        (prop, keyword) if SIZING_PROPERTIES.contains(&prop) && SIZING_KEYWORDS.contains(&keyword) => {
            vendor_values(keyword)
        }
        ("background" | "backgroundImage", gradient)
            if GRADIENTS.iter().any(|g| gradient.contains(g)) =>
        {
            vendor_values(gradient)
        }
        _ => return None,
    };

    Some(StyleValue::from(variants))
}

fn vendor_values(text: &str) -> Vec<String> {
    vec![format!("-webkit-{text}"), format!("-moz-{text}"), text.to_string()]
}

/// Convert a hyphenated property name to camel case.
fn camelize(property: &str) -> String {
    if !property.contains('-') {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len());
    let mut upper_next = false;
    for c in property.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
