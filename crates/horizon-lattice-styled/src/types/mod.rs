//! Style value types.

mod value;

pub use value::{StyleMap, StyleValue, ADD_CLASS_KEY};
