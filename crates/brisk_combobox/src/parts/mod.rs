//! Widget surface
//!
//! Headless parts a host renders into its own element tree. Each part holds a
//! [`ComboboxContext`](crate::ComboboxContext), turns host events into
//! controller transitions and derives the accessibility attributes for its
//! element. Integrator handlers run first; calling `prevent_default` on the
//! event skips the built-in behavior.

mod anchor;
mod content;
mod input;
mod label;
mod option;
mod portal;
mod trigger;

pub use anchor::ComboboxAnchor;
pub use content::ComboboxContent;
pub use input::ComboboxInput;
pub use label::ComboboxLabel;
pub use option::{ComboboxOption, OptionRenderState};
pub use portal::ComboboxPortal;
pub use trigger::ComboboxTrigger;

use indexmap::IndexMap;

/// Element attributes in a stable order
pub type Attributes = IndexMap<&'static str, String>;

pub(crate) fn bool_attr(value: bool) -> String {
    let value = if value { "true" } else { "false" };
    value.to_string()
}
