//! Brisk Combobox
//!
//! A headless, accessible combobox: a text input coupled to a filterable,
//! keyboard-navigable list of options, with single or multiple selection.
//!
//! The crate renders nothing. A host builds its element tree from the parts in
//! [`parts`], forwards input events to them, and reads back attributes and
//! highlight/selection flags. The interaction rules live in the controller:
//!
//! - **Open / close**: trigger clicks, arrow keys and typing open the list;
//!   Escape, outside presses and single-mode commits close it
//! - **Highlight**: arrow keys move through the rendered order and clamp at the
//!   ends; opening highlights the committed value or the first enabled option
//! - **Commit**: Enter or a click applies the selection rule (replace in single
//!   mode, toggle in multiple mode)
//!
//! # Example
//!
//! ```rust
//! use brisk_combobox::prelude::*;
//! use brisk_core::events::{key_codes, KeyboardEvent};
//!
//! let root = ComboboxRoot::new(RootProps::new());
//! let ctx = root.context();
//!
//! let input = ComboboxInput::new(ctx);
//! let _paris = ComboboxOption::new(ctx, "Paris");
//! let _rome = ComboboxOption::new(ctx, "Rome");
//!
//! input.key_down(&KeyboardEvent::from_key_code(key_codes::ARROW_DOWN, None));
//! input.key_down(&KeyboardEvent::from_key_code(key_codes::ARROW_DOWN, None));
//! input.key_down(&KeyboardEvent::from_key_code(key_codes::ENTER, None));
//!
//! assert_eq!(ctx.single_value().as_deref(), Some("Rome"));
//! assert_eq!(input.text(), "Rome");
//! assert!(!ctx.is_open());
//! ```

pub mod collab;
pub mod config;
pub mod controller;
pub mod error;
pub mod parts;
pub mod root;
pub mod scope;
pub mod session;
pub mod value;

pub use collab::{NoopHooks, OutsideTarget, Positioner, TransitionHooks};
pub use config::ComboboxConfig;
pub use controller::Direction;
pub use error::{ComboboxError, Result};
pub use root::{ComboboxRoot, RootProps};
pub use session::{ComboboxContext, ComboboxSession};
pub use value::{SelectionMode, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collab::{OutsideTarget, Positioner, TransitionHooks};
    pub use crate::config::ComboboxConfig;
    pub use crate::controller::Direction;
    pub use crate::error::{ComboboxError, Result};
    pub use crate::parts::{
        Attributes, ComboboxAnchor, ComboboxContent, ComboboxInput, ComboboxLabel,
        ComboboxOption, ComboboxPortal, ComboboxTrigger, OptionRenderState,
    };
    pub use crate::root::{ComboboxRoot, RootProps};
    pub use crate::session::ComboboxContext;
    pub use crate::value::{SelectionMode, Value};
}
