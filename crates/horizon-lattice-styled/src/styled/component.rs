//! Styled component wrappers.

use std::fmt;
use std::sync::Arc;

use super::context::RenderContext;
use super::props::{Props, CLASS_NAME_KEY};
use crate::resolve::{resolve_styles, StyleDescriptor, StyleList};
use crate::types::{StyleMap, ADD_CLASS_KEY};
use crate::{Error, Result};

/// Style descriptor evaluated against element props and the render context.
pub type ElementStyle = StyleDescriptor<Props, RenderContext>;

/// A host component that can be wrapped by [`styled`].
pub trait Component: Send + Sync {
    /// Display name of the component.
    fn name(&self) -> &str;
}

/// What a styled component ultimately renders: a tag or a host component.
#[derive(Clone)]
pub enum ElementTarget {
    /// An element tag such as `div`.
    Tag(String),
    /// A host component.
    Component(Arc<dyn Component>),
}

impl ElementTarget {
    /// Get the tag or component name.
    pub fn name(&self) -> &str {
        match self {
            ElementTarget::Tag(tag) => tag,
            ElementTarget::Component(component) => component.name(),
        }
    }
}

impl fmt::Debug for ElementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementTarget::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            ElementTarget::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
        }
    }
}

/// Builds host elements from a target and its final props.
pub trait ElementFactory {
    /// The host element type.
    type Element;

    /// Create an element.
    fn create_element(&self, target: &ElementTarget, props: Props) -> Self::Element;
}

/// Anything [`styled`] can wrap.
#[derive(Clone)]
pub enum Renderable {
    /// An element tag such as `div`.
    Tag(String),
    /// A host component.
    Component(Arc<dyn Component>),
    /// A previously styled component.
    Styled(StyledComponent),
}

impl Renderable {
    /// Wrap a host component.
    pub fn component(component: impl Component + 'static) -> Self {
        Renderable::Component(Arc::new(component))
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderable::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Renderable::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
            Renderable::Styled(styled) => f.debug_tuple("Styled").field(styled).finish(),
        }
    }
}

impl From<&str> for Renderable {
    fn from(tag: &str) -> Self {
        Renderable::Tag(tag.to_string())
    }
}

impl From<String> for Renderable {
    fn from(tag: String) -> Self {
        Renderable::Tag(tag)
    }
}

impl From<Arc<dyn Component>> for Renderable {
    fn from(component: Arc<dyn Component>) -> Self {
        Renderable::Component(component)
    }
}

impl From<StyledComponent> for Renderable {
    fn from(styled: StyledComponent) -> Self {
        Renderable::Styled(styled)
    }
}

impl From<&StyledComponent> for Renderable {
    fn from(styled: &StyledComponent) -> Self {
        Renderable::Styled(styled.clone())
    }
}

/// Check if a string is a valid element tag name.
fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Create a styled component from a base and a style descriptor.
///
/// Styling an already styled component appends the descriptor to its style
/// list instead of nesting wrappers.
///
/// # Errors
///
/// Returns [`Error::InvalidWrapTarget`] if `base` is a tag that is not a
/// valid element name.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_lattice_styled::prelude::*;
///
/// let panel = styled("div", StyleMap::new().with("fontSize", "12px"))?;
/// let alert_panel = styled(&panel, StyleDescriptor::dynamic(|props: &Props, _: &RenderContext| {
///     StyleMap::new().with("color", if props.flag("alert") { "red" } else { "black" })
/// }))?;
/// assert_eq!(alert_panel.style_list().len(), 2);
///
/// let ctx = StyleProvider::new(Arc::new(StyleRegistry::new())).context();
/// let class = alert_panel.class_name(&Props::new().with("alert", true), &ctx)?;
/// assert_eq!(class, "a b");
///
/// assert!(styled("42", StyleMap::new()).is_err());
/// # Ok::<(), horizon_lattice_styled::Error>(())
/// ```
pub fn styled(
    base: impl Into<Renderable>,
    descriptor: impl Into<ElementStyle>,
) -> Result<StyledComponent> {
    let descriptor = descriptor.into();

    match base.into() {
        Renderable::Styled(styled) => Ok(styled.styled(descriptor)),
        Renderable::Tag(tag) if is_valid_tag(&tag) => Ok(StyledComponent {
            target: ElementTarget::Tag(tag),
            styles: vec![descriptor],
        }),
        Renderable::Tag(tag) => Err(Error::invalid_wrap_target(tag)),
        Renderable::Component(component) => Ok(StyledComponent {
            target: ElementTarget::Component(component),
            styles: vec![descriptor],
        }),
    }
}

/// An element target paired with its ordered style list.
#[derive(Clone)]
pub struct StyledComponent {
    target: ElementTarget,
    styles: StyleList<Props, RenderContext>,
}

impl StyledComponent {
    /// Return a new component with another descriptor appended.
    pub fn styled(&self, descriptor: impl Into<ElementStyle>) -> StyledComponent {
        let mut styles = self.styles.clone();
        styles.push(descriptor.into());
        StyledComponent {
            target: self.target.clone(),
            styles,
        }
    }

    /// Get the wrapped tag or component.
    pub fn base(&self) -> &ElementTarget {
        &self.target
    }

    /// Get the style descriptors in registration order.
    pub fn style_list(&self) -> &[ElementStyle] {
        &self.styles
    }

    /// Resolve the style list against props and context.
    pub fn resolve(&self, props: &Props, ctx: &RenderContext) -> StyleMap {
        resolve_styles(&self.styles, props, ctx)
    }

    /// Compute the full class string for the given props.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInjector`] if the context has no injector.
    pub fn class_name(&self, props: &Props, ctx: &RenderContext) -> Result<String> {
        let injector = ctx.injector().ok_or(Error::MissingInjector)?;
        let styles = self.resolve(props, ctx);
        let generated = ctx.engine().inject(injector.as_ref(), &styles);
        Ok(compose_class_name(props, &generated, &styles))
    }

    /// Render the component through a host element factory.
    ///
    /// The generated class string replaces `className`, and an `inner_ref`
    /// hook is forwarded as the element's node ref. All other props pass
    /// through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInjector`] if the context has no injector.
    pub fn render<F>(&self, props: Props, ctx: &RenderContext, factory: &F) -> Result<F::Element>
    where
        F: ElementFactory + ?Sized,
    {
        let class_name = self.class_name(&props, ctx)?;

        let mut forwarded = props;
        forwarded.set(CLASS_NAME_KEY, class_name);
        forwarded.forward_inner_ref();

        Ok(factory.create_element(&self.target, forwarded))
    }
}

impl fmt::Debug for StyledComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyledComponent")
            .field("target", &self.target)
            .field("styles", &self.styles)
            .finish()
    }
}

/// Combine caller classes, generated classes, and `addClass` values.
fn compose_class_name(props: &Props, generated: &str, styles: &StyleMap) -> String {
    let mut class_name = match props.class_name().or_else(|| props.class()) {
        Some(caller) => format!("{caller} {generated}"),
        None => generated.to_string(),
    };

    if let Some(extra) = props.add_class() {
        if !class_name.is_empty() {
            class_name = format!("{} {}", class_name.replacen("  ", " ", 1), extra);
        }
    }

    if let Some(value) = styles.get(ADD_CLASS_KEY).filter(|v| v.is_truthy()) {
        match value.primitive_text() {
            Some(extra) => {
                class_name = format!("{} {}", class_name.trim(), extra)
                    .trim_start()
                    .to_string();
            }
            None => tracing::debug!("Skipping {} value for '{}'", value.kind(), ADD_CLASS_KEY),
        }
    }

    class_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::StyleRegistry;
    use crate::styled::StyleProvider;
    use crate::types::StyleValue;

    struct Avatar;

    impl Component for Avatar {
        fn name(&self) -> &str {
            "Avatar"
        }
    }

    fn context() -> RenderContext {
        StyleProvider::new(Arc::new(StyleRegistry::new())).context()
    }

    #[test]
    fn tag_validation() {
        assert!(is_valid_tag("div"));
        assert!(is_valid_tag("my-element"));
        assert!(is_valid_tag("h1"));
        assert!(!is_valid_tag("42"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("div span"));
    }

    #[test]
    fn invalid_tag_is_rejected() {
        let err = styled("42", StyleMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidWrapTarget { ref target } if target == "42"));
    }

    #[test]
    fn components_can_be_wrapped() {
        let card = styled(Renderable::component(Avatar), StyleMap::new()).unwrap();
        assert_eq!(card.base().name(), "Avatar");
    }

    #[test]
    fn restyling_flattens() {
        let base = styled("span", StyleMap::new().with("color", "red")).unwrap();
        let restyled = styled(&base, StyleMap::new().with("color", "blue")).unwrap();
        let again = restyled.styled(StyleMap::new().with("fontWeight", "bold"));

        assert_eq!(base.style_list().len(), 1);
        assert_eq!(restyled.style_list().len(), 2);
        assert_eq!(again.style_list().len(), 3);
        assert_eq!(again.base().name(), "span");

        let resolved = again.resolve(&Props::new(), &RenderContext::new());
        assert_eq!(resolved.get("color"), Some(&StyleValue::from("blue")));
    }

    #[test]
    fn caller_class_comes_first() {
        let button = styled("button", StyleMap::new().with("color", "red")).unwrap();
        let ctx = context();

        let class = button
            .class_name(&Props::new().with("className", "btn"), &ctx)
            .unwrap();
        assert_eq!(class, "btn a");

        let class = button.class_name(&Props::new().with("class", "legacy"), &ctx).unwrap();
        assert_eq!(class, "legacy a");
    }

    #[test]
    fn add_class_from_props() {
        let button = styled("button", StyleMap::new().with("color", "red")).unwrap();
        let class = button
            .class_name(&Props::new().with("addClass", "active"), &context())
            .unwrap();
        assert_eq!(class, "a active");
    }

    #[test]
    fn add_class_from_styles() {
        let tab = styled(
            "span",
            StyleDescriptor::dynamic(|props: &Props, _: &RenderContext| {
                StyleMap::new()
                    .with("color", "white")
                    .with(ADD_CLASS_KEY, props.flag("isActive").then_some("active"))
            }),
        )
        .unwrap();
        let ctx = context();

        let active = tab.class_name(&Props::new().with("isActive", true), &ctx).unwrap();
        assert_eq!(active, "a active");

        let inactive = tab.class_name(&Props::new(), &ctx).unwrap();
        assert_eq!(inactive, "a");
    }

    #[test]
    fn add_class_alone() {
        let marker = styled("i", StyleMap::new().with(ADD_CLASS_KEY, "icon")).unwrap();
        let class = marker.class_name(&Props::new(), &context()).unwrap();
        assert_eq!(class, "icon");
    }

    #[test]
    fn add_class_accepts_truthy_primitives_only() {
        let ctx = context();
        let class_for = |value: StyleValue| {
            let badge = styled("b", StyleMap::new().with(ADD_CLASS_KEY, value)).unwrap();
            badge.class_name(&Props::new(), &ctx).unwrap()
        };

        assert_eq!(class_for(StyleValue::from(2)), "2");
        assert_eq!(class_for(StyleValue::from(0)), "");
        assert_eq!(class_for(StyleValue::from("")), "");
        assert_eq!(class_for(StyleValue::from(true)), "");
        assert_eq!(class_for(StyleValue::from(vec!["a", "b"])), "");
    }

    #[test]
    fn missing_injector_is_an_error() {
        let button = styled("button", StyleMap::new().with("color", "red")).unwrap();
        let err = button.class_name(&Props::new(), &RenderContext::new()).unwrap_err();
        assert!(matches!(err, Error::MissingInjector));
    }
}
