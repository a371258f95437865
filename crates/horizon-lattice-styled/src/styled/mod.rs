//! Styled components.
//!
//! [`styled`] pairs an element tag or host component with style
//! descriptors. Rendering a [`StyledComponent`] resolves its descriptors
//! against the element's props, injects the result through the
//! [`StyleInjector`](crate::inject::StyleInjector) provided by the nearest
//! [`StyleProvider`], and hands the final props to an [`ElementFactory`].

mod component;
mod context;
mod props;

pub use component::{
    styled, Component, ElementFactory, ElementStyle, ElementTarget, Renderable, StyledComponent,
};
pub use context::{RenderContext, StyleProvider};
pub use props::{Props, RefHook, CLASS_KEY, CLASS_NAME_KEY};
