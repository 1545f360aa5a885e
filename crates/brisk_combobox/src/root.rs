//! Combobox root
//!
//! [`RootProps`] is the caller-facing configuration of one combobox: which state
//! is controlled, the callbacks, and the collaborators. [`ComboboxRoot`] turns it
//! into a live session and is where a controlled caller pushes new prop values.
//!
//! ```rust
//! use std::rc::Rc;
//! use std::cell::RefCell;
//! use brisk_combobox::{ComboboxRoot, RootProps, Value};
//!
//! let committed = Rc::new(RefCell::new(None));
//! let committed_clone = committed.clone();
//!
//! let root = ComboboxRoot::new(
//!     RootProps::new()
//!         .default_value("Paris")
//!         .on_change(move |value: &Value| *committed_clone.borrow_mut() = Some(value.clone())),
//! );
//!
//! assert_eq!(root.context().input_text(), "Paris");
//! assert!(committed.borrow().is_none());
//! ```

use std::fmt;
use std::rc::Rc;

use brisk_core::registry::DocumentOrder;

use crate::collab::TransitionHooks;
use crate::config::ComboboxConfig;
use crate::scope;
use crate::session::{ComboboxContext, ComboboxSession};
use crate::value::{SelectionMode, Value};

/// Callback receiving a proposed or applied value
pub type ValueChangeCallback = Rc<dyn Fn(&Value)>;

/// Callback receiving a proposed or applied open state
pub type OpenChangeCallback = Rc<dyn Fn(bool)>;

/// Callback receiving the new highlight
pub type HighlightChangeCallback = Rc<dyn Fn(Option<&str>)>;

/// Props of a combobox root
pub struct RootProps {
    pub(crate) value: Option<Option<Value>>,
    pub(crate) default_value: Option<Value>,
    pub(crate) open: Option<bool>,
    pub(crate) default_open: bool,
    pub(crate) multiple: bool,
    pub(crate) on_change: Option<ValueChangeCallback>,
    pub(crate) on_open_change: Option<OpenChangeCallback>,
    pub(crate) on_highlight_change: Option<HighlightChangeCallback>,
    pub(crate) aria_label: Option<String>,
    pub(crate) id_prefix: String,
    pub(crate) order: Option<Rc<dyn DocumentOrder>>,
    pub(crate) hooks: Option<Rc<dyn TransitionHooks>>,
}

impl Default for RootProps {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            open: None,
            default_open: false,
            multiple: false,
            on_change: None,
            on_open_change: None,
            on_highlight_change: None,
            aria_label: None,
            id_prefix: "combobox".to_string(),
            order: None,
            hooks: None,
        }
    }
}

impl fmt::Debug for RootProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("open", &self.open)
            .field("default_open", &self.default_open)
            .field("multiple", &self.multiple)
            .field("aria_label", &self.aria_label)
            .field("id_prefix", &self.id_prefix)
            .finish_non_exhaustive()
    }
}

impl RootProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Props seeded from a loaded configuration
    pub fn from_config(config: &ComboboxConfig) -> Self {
        let mut props = Self::new()
            .multiple(config.multiple)
            .default_open(config.default_open)
            .id_prefix(config.id_prefix.clone());
        props.default_value = config.default_value.clone();
        props.aria_label = config.aria_label.clone();
        props
    }

    /// Control the value. `None` means "controlled, nothing selected".
    pub fn value(mut self, value: Option<Value>) -> Self {
        self.value = Some(value);
        self
    }

    /// Initial value when uncontrolled
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Control the open state
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Initial open state when uncontrolled
    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Select a list of values instead of one
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + 'static,
    {
        self.on_change = Some(Rc::new(callback));
        self
    }

    pub fn on_open_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + 'static,
    {
        self.on_open_change = Some(Rc::new(callback));
        self
    }

    pub fn on_highlight_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.on_highlight_change = Some(Rc::new(callback));
        self
    }

    /// Accessible name for the trigger and the listbox
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Prefix for generated element ids
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Rendered order of the options
    pub fn document_order(mut self, order: Rc<dyn DocumentOrder>) -> Self {
        self.order = Some(order);
        self
    }

    /// Effects to run after transitions
    pub fn hooks(mut self, hooks: Rc<dyn TransitionHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }
}

/// A mounted combobox
#[derive(Debug)]
pub struct ComboboxRoot {
    context: ComboboxContext,
}

impl ComboboxRoot {
    pub fn new(props: RootProps) -> Self {
        let context = ComboboxContext::new(ComboboxSession::new(props));
        context.reconcile();
        Self { context }
    }

    /// Handle passed to the parts
    pub fn context(&self) -> &ComboboxContext {
        &self.context
    }

    /// Push a new controlled value
    pub fn set_value_prop(&self, value: Option<Value>) {
        self.context.value.sync(value);
        self.context.reconcile();
    }

    /// Push a new controlled open state
    pub fn set_open_prop(&self, open: bool) {
        self.context.open.sync(open);
        self.context.reconcile();
    }

    /// Switch between single and multiple selection
    ///
    /// The stored value is migrated to the new shape: a single value becomes a
    /// one-element list, a list keeps its most recent entry. A controlled caller
    /// receives the migrated value through `on_change`.
    pub fn set_multiple(&self, multiple: bool) {
        let mode = SelectionMode::from_multiple(multiple);
        if mode == self.context.mode() {
            return;
        }
        tracing::debug!(
            "combobox {}: switching to {:?} selection",
            self.context.id(),
            mode
        );
        self.context.set_mode(mode);
        let migrated = mode.migrate(self.context.value());
        self.context.value.set(migrated);
        self.context.reconcile();
    }

    /// Run `f` with this root as the ambient combobox
    ///
    /// Parts built with `from_scope` inside `f` attach to this root.
    pub fn provide<R>(&self, f: impl FnOnce(&ComboboxContext) -> R) -> R {
        scope::provide(&self.context, || f(&self.context))
    }
}
