//! Trigger button that toggles the list

use std::rc::Rc;

use brisk_core::events::{compose_handlers, EventHandler, PointerEvent};

use super::{bool_attr, Attributes};
use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

pub struct ComboboxTrigger {
    context: ComboboxContext,
    id: String,
    on_click: Option<EventHandler<PointerEvent>>,
}

impl ComboboxTrigger {
    pub fn new(context: &ComboboxContext) -> Self {
        Self {
            id: context.part_id("trigger"),
            context: context.clone(),
            on_click: None,
        }
    }

    /// Attach to the ambient combobox
    pub fn from_scope() -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxTrigger")?))
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Click: toggle the list and hand focus back to the input
    pub fn activate(&self, event: &PointerEvent) {
        compose_handlers(self.on_click.as_ref(), event, |_| {
            self.context.toggle();
            self.context.hooks().focus_input();
        });
    }

    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("id", self.id.clone());
        attrs.insert("tabindex", "-1".to_string());
        attrs.insert("aria-controls", self.context.content_id());
        attrs.insert("aria-expanded", bool_attr(self.context.is_open()));
        if let Some(label) = self.context.aria_label() {
            attrs.insert("aria-label", label.to_string());
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use brisk_core::events::Cancelable;

    use crate::collab::TransitionHooks;
    use crate::root::{ComboboxRoot, RootProps};

    #[derive(Default)]
    struct FocusCount(Cell<u32>);

    impl TransitionHooks for FocusCount {
        fn focus_input(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_activate_toggles_and_focuses() {
        let hooks = Rc::new(FocusCount::default());
        let root = ComboboxRoot::new(RootProps::new().hooks(hooks.clone()));
        let trigger = ComboboxTrigger::new(root.context());

        trigger.activate(&PointerEvent::new());
        assert!(root.context().is_open());
        assert_eq!(trigger.attributes()["aria-expanded"], "true");

        trigger.activate(&PointerEvent::new());
        assert!(!root.context().is_open());
        assert_eq!(hooks.0.get(), 2);
    }

    #[test]
    fn test_user_handler_can_prevent_toggle() {
        let root = ComboboxRoot::new(RootProps::new());
        let trigger = ComboboxTrigger::new(root.context()).on_click(|e| e.prevent_default());

        trigger.activate(&PointerEvent::new());
        assert!(!root.context().is_open());
    }

    #[test]
    fn test_attributes() {
        let root = ComboboxRoot::new(RootProps::new().aria_label("Cities"));
        let trigger = ComboboxTrigger::new(root.context()).id("cities-button");
        let attrs = trigger.attributes();

        assert_eq!(attrs["id"], "cities-button");
        assert_eq!(attrs["tabindex"], "-1");
        assert_eq!(attrs["aria-controls"], root.context().content_id());
        assert_eq!(attrs["aria-label"], "Cities");
    }
}
