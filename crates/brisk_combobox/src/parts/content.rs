//! Floating listbox holding the options

use std::rc::Rc;

use brisk_core::events::{compose_handlers, EventHandler, KeyboardEvent, PointerEvent};

use super::{bool_attr, Attributes};
use crate::collab::{OutsideTarget, Positioner};
use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

pub struct ComboboxContent {
    context: ComboboxContext,
    on_escape_key_down: Option<EventHandler<KeyboardEvent>>,
    on_pointer_down_outside: Option<EventHandler<PointerEvent>>,
}

impl ComboboxContent {
    pub fn new(context: &ComboboxContext) -> Self {
        Self {
            context: context.clone(),
            on_escape_key_down: None,
            on_pointer_down_outside: None,
        }
    }

    /// Attach to the ambient combobox
    pub fn from_scope() -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxContent")?))
    }

    /// Use a custom element id
    ///
    /// The id is shared with the session so `aria-controls` on the input and
    /// trigger points at it.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.context.set_content_id(id.into());
        self
    }

    pub fn on_escape_key_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&KeyboardEvent) + 'static,
    {
        self.on_escape_key_down = Some(Rc::new(handler));
        self
    }

    pub fn on_pointer_down_outside<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.on_pointer_down_outside = Some(Rc::new(handler));
        self
    }

    /// Escape reported by the layering host
    pub fn escape_key_down(&self, event: &KeyboardEvent) {
        compose_handlers(self.on_escape_key_down.as_ref(), event, |_| {
            self.context.escape();
        });
    }

    /// Pointer press outside the content reported by the layering host
    ///
    /// Presses on the input or the trigger are left to those parts.
    pub fn pointer_down_outside(&self, target: OutsideTarget, event: &PointerEvent) {
        compose_handlers(self.on_pointer_down_outside.as_ref(), event, |_| {
            match target {
                OutsideTarget::Elsewhere => self.context.dismiss(),
                OutsideTarget::Input | OutsideTarget::Trigger => {
                    tracing::trace!(
                        "combobox {}: outside press on {:?} ignored",
                        self.context.id(),
                        target
                    );
                }
            }
        });
    }

    /// Ask the positioner to place the content; `None` while closed
    pub fn placement<P: Positioner>(&self, positioner: &P) -> Option<P::Placement> {
        if !self.context.is_open() {
            return None;
        }
        Some(positioner.place(&self.context.anchor_id(), &self.context.content_id()))
    }

    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("id", self.context.content_id());
        attrs.insert("role", "listbox".to_string());
        attrs.insert("data-open", bool_attr(self.context.is_open()));
        if let Some(label) = self.context.aria_label() {
            attrs.insert("aria-label", label.to_string());
        }
        attrs
    }
}
