//! Style descriptor resolution.

mod descriptor;

pub use descriptor::{resolve_styles, StyleDescriptor, StyleFn, StyleList};
