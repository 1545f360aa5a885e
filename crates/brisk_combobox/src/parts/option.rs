//! Selectable option
//!
//! An option registers itself with the session when it is created and
//! unregisters when it is unmounted or dropped. Hosts create one per rendered
//! option and keep its place in the tree current in their `DocumentOrder`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use brisk_core::events::{compose_handlers, EventHandler, PointerEvent};
use brisk_core::registry::{OptionDescriptor, OptionHandle};

use super::{bool_attr, Attributes};
use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

/// Flags a renderer styles an option by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptionRenderState {
    /// Part of the committed value
    pub selected: bool,
    /// Keyboard/pointer focus
    pub highlighted: bool,
    pub disabled: bool,
}

pub struct ComboboxOption {
    context: ComboboxContext,
    handle: Cell<Option<OptionHandle>>,
    descriptor: RefCell<OptionDescriptor>,
    on_click: Option<EventHandler<PointerEvent>>,
    on_pointer_move: Option<EventHandler<PointerEvent>>,
}

impl ComboboxOption {
    /// Create and register an option
    pub fn new(context: &ComboboxContext, value: impl Into<String>) -> Self {
        let descriptor = OptionDescriptor::new(value, context.next_option_id());
        let handle = context.mount_option(descriptor.clone());
        tracing::trace!(
            "combobox {}: mounted option {:?} as {:?}",
            context.id(),
            descriptor.value,
            handle
        );
        Self {
            context: context.clone(),
            handle: Cell::new(Some(handle)),
            descriptor: RefCell::new(descriptor),
            on_click: None,
            on_pointer_move: None,
        }
    }

    /// Create an option under the ambient combobox
    pub fn from_scope(value: impl Into<String>) -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxOption")?, value))
    }

    pub fn disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Use a custom element id
    pub fn id(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.modify(|descriptor| descriptor.element_id = id);
        self
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn on_pointer_move<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.on_pointer_move = Some(Rc::new(handler));
        self
    }

    pub fn value(&self) -> String {
        self.descriptor.borrow().value.clone()
    }

    pub fn element_id(&self) -> String {
        self.descriptor.borrow().element_id.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.descriptor.borrow().disabled
    }

    /// Registry handle, `None` once unmounted
    pub fn handle(&self) -> Option<OptionHandle> {
        self.handle.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.get().is_some()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.modify(|descriptor| descriptor.disabled = disabled);
    }

    /// Re-register with a new value and disabled flag
    pub fn update(&self, value: impl Into<String>, disabled: bool) {
        let value = value.into();
        self.modify(|descriptor| {
            descriptor.value = value;
            descriptor.disabled = disabled;
        });
    }

    fn modify(&self, f: impl FnOnce(&mut OptionDescriptor)) {
        let descriptor = {
            let mut descriptor = self.descriptor.borrow_mut();
            f(&mut descriptor);
            descriptor.clone()
        };
        if let Some(handle) = self.handle.get() {
            self.context.update_option(handle, descriptor);
        }
    }

    /// Remove from the registry
    pub fn unmount(&self) {
        if let Some(handle) = self.handle.take() {
            tracing::trace!(
                "combobox {}: unmounted option {:?}",
                self.context.id(),
                self.descriptor.borrow().value
            );
            self.context.unmount_option(handle);
        }
    }

    /// Pointer moved over the option
    pub fn pointer_move(&self, event: &PointerEvent) {
        compose_handlers(self.on_pointer_move.as_ref(), event, |_| {
            if !self.context.is_highlighted(&self.value()) {
                self.context.pointer_enter(&self.value());
            }
        });
    }

    /// Option clicked: commit it unless disabled, then refocus the input
    pub fn click(&self, event: &PointerEvent) {
        compose_handlers(self.on_click.as_ref(), event, |_| {
            if self.is_disabled() {
                return;
            }
            self.context.select(&self.value());
            self.context.hooks().focus_input();
        });
    }

    pub fn render_state(&self) -> OptionRenderState {
        let value = self.value();
        OptionRenderState {
            selected: self.context.is_selected(&value),
            highlighted: self.context.is_highlighted(&value),
            disabled: self.is_disabled(),
        }
    }

    /// Render through `f` with the current flags
    pub fn render<R>(&self, f: impl FnOnce(OptionRenderState) -> R) -> R {
        f(self.render_state())
    }

    pub fn attributes(&self) -> Attributes {
        let state = self.render_state();
        let mut attrs = Attributes::new();
        attrs.insert("id", self.element_id());
        attrs.insert("role", "option".to_string());
        attrs.insert("aria-selected", bool_attr(state.highlighted));
        if state.disabled {
            attrs.insert("aria-disabled", "true".to_string());
            attrs.insert("data-disabled", String::new());
        }
        if state.highlighted {
            attrs.insert("data-highlighted", String::new());
        }
        if state.selected {
            attrs.insert("data-selected", String::new());
        }
        attrs
    }
}

impl Drop for ComboboxOption {
    fn drop(&mut self) {
        self.unmount();
    }
}
