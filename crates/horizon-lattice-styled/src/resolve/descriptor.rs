//! Style descriptors and list resolution.

use std::fmt;
use std::sync::Arc;

use crate::types::StyleMap;

/// Function computing a style map from the current props and context.
///
/// Returning `None` contributes nothing to the merge.
pub type StyleFn<P, C> = dyn Fn(&P, &C) -> Option<StyleMap> + Send + Sync;

/// One style contribution: a static map or a function of props and context.
pub enum StyleDescriptor<P, C> {
    /// A fixed style map.
    Static(StyleMap),
    /// A style map computed on every resolution.
    Dynamic(Arc<StyleFn<P, C>>),
}

impl<P, C> StyleDescriptor<P, C> {
    /// Create a dynamic descriptor that may contribute nothing.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&P, &C) -> Option<StyleMap> + Send + Sync + 'static,
    {
        StyleDescriptor::Dynamic(Arc::new(f))
    }

    /// Create a dynamic descriptor that always yields a map.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&P, &C) -> StyleMap + Send + Sync + 'static,
    {
        Self::from_fn(move |props, ctx| Some(f(props, ctx)))
    }

    /// Evaluate the descriptor against props and context.
    pub fn evaluate(&self, props: &P, ctx: &C) -> Option<StyleMap> {
        match self {
            StyleDescriptor::Static(map) => Some(map.clone()),
            StyleDescriptor::Dynamic(f) => f(props, ctx),
        }
    }

    /// Check if this descriptor is a function.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, StyleDescriptor::Dynamic(_))
    }
}

impl<P, C> Clone for StyleDescriptor<P, C> {
    fn clone(&self) -> Self {
        match self {
            StyleDescriptor::Static(map) => StyleDescriptor::Static(map.clone()),
            StyleDescriptor::Dynamic(f) => StyleDescriptor::Dynamic(Arc::clone(f)),
        }
    }
}

impl<P, C> fmt::Debug for StyleDescriptor<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleDescriptor::Static(map) => f.debug_tuple("Static").field(map).finish(),
            StyleDescriptor::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<P, C> From<StyleMap> for StyleDescriptor<P, C> {
    fn from(map: StyleMap) -> Self {
        StyleDescriptor::Static(map)
    }
}

/// Ordered list of descriptors; later entries override earlier keys.
pub type StyleList<P, C> = Vec<StyleDescriptor<P, C>>;

/// Merge a descriptor list into one style map.
///
/// Descriptors are applied in order with shallow, last-write-wins key
/// overwrite. Descriptors yielding `None` are skipped.
pub fn resolve_styles<P, C>(list: &[StyleDescriptor<P, C>], props: &P, ctx: &C) -> StyleMap {
    let mut resolved = StyleMap::new();

    for (index, descriptor) in list.iter().enumerate() {
        match descriptor {
            StyleDescriptor::Static(map) => resolved.extend_from(map),
            StyleDescriptor::Dynamic(f) => match f(props, ctx) {
                Some(map) => resolved.extend_from(&map),
                None => tracing::debug!("Style descriptor {} contributed nothing", index),
            },
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StyleValue;

    #[test]
    fn last_write_wins() {
        let list: StyleList<(), ()> = vec![
            StyleMap::new().with("a", 1).with("b", 2).into(),
            StyleMap::new().with("b", 3).into(),
        ];

        let resolved = resolve_styles(&list, &(), &());

        assert_eq!(resolved, StyleMap::new().with("a", 1).with("b", 3));
        let keys: Vec<_> = resolved.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn dynamic_descriptors_see_props_and_context() {
        let list: StyleList<bool, String> = vec![
            StyleMap::new().with("color", "black").into(),
            StyleDescriptor::dynamic(|alert: &bool, font: &String| {
                StyleMap::new()
                    .with("color", if *alert { "orange" } else { "lightblue" })
                    .with("fontFamily", font.as_str())
            }),
        ];

        let serif = "serif".to_string();
        let resolved = resolve_styles(&list, &true, &serif);
        assert_eq!(resolved.get("color"), Some(&StyleValue::from("orange")));
        assert_eq!(resolved.get("fontFamily"), Some(&StyleValue::from("serif")));

        let resolved = resolve_styles(&list, &false, &serif);
        assert_eq!(resolved.get("color"), Some(&StyleValue::from("lightblue")));
    }

    #[test]
    fn empty_contributions_are_skipped() {
        let list: StyleList<(), ()> = vec![
            StyleMap::new().with("a", 1).into(),
            StyleDescriptor::from_fn(|_, _| None),
        ];

        assert!(!list[0].is_dynamic());
        assert!(list[1].is_dynamic());
        assert_eq!(list[1].evaluate(&(), &()), None);
        assert_eq!(resolve_styles(&list, &(), &()), StyleMap::new().with("a", 1));
    }

    #[test]
    fn resolution_is_repeatable() {
        let list: StyleList<(), ()> = vec![
            StyleMap::new()
                .with("color", "red")
                .with(":hover", StyleMap::new().with("color", "blue"))
                .into(),
        ];

        let first = resolve_styles(&list, &(), &());
        let second = resolve_styles(&list, &(), &());
        assert_eq!(first, second);
    }

    #[test]
    fn nested_maps_are_replaced_not_merged() {
        let list: StyleList<(), ()> = vec![
            StyleMap::new()
                .with(":hover", StyleMap::new().with("color", "blue").with("opacity", 1))
                .into(),
            StyleMap::new()
                .with(":hover", StyleMap::new().with("color", "red"))
                .into(),
        ];

        let resolved = resolve_styles(&list, &(), &());
        let hover = resolved.get(":hover").and_then(StyleValue::as_map).unwrap();
        assert_eq!(hover.len(), 1);
    }
}
