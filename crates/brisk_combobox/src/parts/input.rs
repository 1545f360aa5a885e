//! Text input with combobox keyboard handling

use std::rc::Rc;

use brisk_core::events::{compose_handlers, Cancelable, EventHandler, Key, KeyboardEvent};

use super::{bool_attr, Attributes};
use crate::controller::Direction;
use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

/// Callback receiving the text the user typed
pub type TextChangeHandler = Rc<dyn Fn(&str)>;

pub struct ComboboxInput {
    context: ComboboxContext,
    placeholder: Option<String>,
    on_key_down: Option<EventHandler<KeyboardEvent>>,
    on_text_change: Option<TextChangeHandler>,
}

impl ComboboxInput {
    pub fn new(context: &ComboboxContext) -> Self {
        Self {
            context: context.clone(),
            placeholder: None,
            on_key_down: None,
            on_text_change: None,
        }
    }

    /// Attach to the ambient combobox
    pub fn from_scope() -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxInput")?))
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn on_key_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&KeyboardEvent) + 'static,
    {
        self.on_key_down = Some(Rc::new(handler));
        self
    }

    /// Observe typed text (the host filters its options here)
    pub fn on_text_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        self.on_text_change = Some(Rc::new(handler));
        self
    }

    /// Current text
    pub fn text(&self) -> String {
        self.context.input_text()
    }

    /// The user edited the text
    pub fn text_changed(&self, text: &str) {
        self.context.store_input_text(text);
        if let Some(handler) = &self.on_text_change {
            handler(text);
        }
        self.context.request_open();
    }

    pub fn key_down(&self, event: &KeyboardEvent) {
        compose_handlers(self.on_key_down.as_ref(), event, |event| {
            self.handle_key(event)
        });
    }

    fn handle_key(&self, event: &KeyboardEvent) {
        let ctx = &self.context;
        match event.key {
            Key::ArrowDown | Key::ArrowUp => {
                event.prevent_default();
                if !ctx.is_open() {
                    ctx.request_open();
                } else if event.key == Key::ArrowDown {
                    ctx.move_highlight(Direction::Next);
                } else {
                    ctx.move_highlight(Direction::Previous);
                }
            }
            Key::Enter if ctx.is_open() => {
                event.prevent_default();
                ctx.commit();
            }
            Key::Escape if ctx.is_open() => {
                event.prevent_default();
                ctx.escape();
            }
            Key::Backspace if ctx.is_multiple() && ctx.input_text().trim().is_empty() => {
                let mode = ctx.mode();
                let popped = ctx
                    .value_cell()
                    .update(|current| mode.pop_last(current).or_else(|| current.clone()));
                if popped {
                    event.prevent_default();
                    tracing::debug!("combobox {}: backspace removed last value", ctx.id());
                    ctx.reconcile();
                }
            }
            _ => {}
        }
    }

    pub fn attributes(&self) -> Attributes {
        let ctx = &self.context;
        let mut attrs = Attributes::new();
        attrs.insert("id", ctx.input_id().to_string());
        attrs.insert("role", "combobox".to_string());
        attrs.insert("aria-autocomplete", "list".to_string());
        attrs.insert("aria-controls", ctx.content_id());
        attrs.insert("aria-expanded", bool_attr(ctx.is_open()));
        if let Some(placeholder) = &self.placeholder {
            attrs.insert("placeholder", placeholder.clone());
        }
        if let Some(id) = self.active_descendant() {
            attrs.insert("aria-activedescendant", id);
        }
        attrs
    }

    /// Element id of the highlighted option while the list is open
    fn active_descendant(&self) -> Option<String> {
        if !self.context.is_open() {
            return None;
        }
        let highlighted = self.context.highlighted()?;
        self.context
            .snapshot()
            .element_id_of(&highlighted)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use brisk_core::events::key_codes;

    use crate::parts::ComboboxOption;
    use crate::root::{ComboboxRoot, RootProps};
    use crate::value::Value;

    fn key(code: u32) -> KeyboardEvent {
        KeyboardEvent::from_key_code(code, None)
    }

    #[test]
    fn test_arrow_opens_then_navigates() {
        let root = ComboboxRoot::new(RootProps::new());
        let input = ComboboxInput::new(root.context());
        let _a = ComboboxOption::new(root.context(), "a");
        let _b = ComboboxOption::new(root.context(), "b");

        let down = key(key_codes::ARROW_DOWN);
        input.key_down(&down);
        assert!(down.is_default_prevented());
        assert!(root.context().is_open());
        assert_eq!(root.context().highlighted().as_deref(), Some("a"));

        input.key_down(&key(key_codes::ARROW_DOWN));
        assert_eq!(root.context().highlighted().as_deref(), Some("b"));
        input.key_down(&key(key_codes::ARROW_UP));
        assert_eq!(root.context().highlighted().as_deref(), Some("a"));
    }

    #[test]
    fn test_enter_while_closed_is_ignored() {
        let root = ComboboxRoot::new(RootProps::new());
        let input = ComboboxInput::new(root.context());
        let _a = ComboboxOption::new(root.context(), "a");

        let enter = key(key_codes::ENTER);
        input.key_down(&enter);
        assert!(!enter.is_default_prevented());
        assert!(!root.context().is_open());
        assert_eq!(root.context().value(), None);
    }

    #[test]
    fn test_typing_opens_and_reports_text() {
        let typed = Rc::new(RefCell::new(Vec::new()));
        let typed_clone = typed.clone();
        let root = ComboboxRoot::new(RootProps::new());
        let input = ComboboxInput::new(root.context())
            .on_text_change(move |t| typed_clone.borrow_mut().push(t.to_string()));

        input.text_changed("Pa");
        assert!(root.context().is_open());
        assert_eq!(input.text(), "Pa");
        assert_eq!(*typed.borrow(), vec!["Pa".to_string()]);
    }

    #[test]
    fn test_backspace_on_empty_text_pops_last_value() {
        let root = ComboboxRoot::new(RootProps::new().multiple(true).default_value(vec!["a", "b"]));
        let input = ComboboxInput::new(root.context());

        let backspace = key(key_codes::BACKSPACE);
        input.key_down(&backspace);
        assert!(backspace.is_default_prevented());
        assert_eq!(root.context().value(), Some(Value::Multiple(vec!["a".into()])));

        // With text in the input, backspace edits the text instead
        input.text_changed("x");
        input.key_down(&key(key_codes::BACKSPACE));
        assert_eq!(root.context().selected_values(), vec!["a".to_string()]);
    }

    #[test]
    fn test_backspace_whitespace_counts_as_empty() {
        let root = ComboboxRoot::new(RootProps::new().multiple(true).default_value(vec!["a"]));
        let input = ComboboxInput::new(root.context());
        input.text_changed("  ");
        input.key_down(&key(key_codes::BACKSPACE));
        assert!(root.context().selected_values().is_empty());

        // Nothing left: silent
        let backspace = key(key_codes::BACKSPACE);
        input.key_down(&backspace);
        assert!(!backspace.is_default_prevented());
    }

    #[test]
    fn test_backspace_in_single_mode_does_nothing() {
        let root = ComboboxRoot::new(RootProps::new().default_value("a"));
        let input = ComboboxInput::new(root.context());
        input.text_changed("");
        input.key_down(&key(key_codes::BACKSPACE));
        assert_eq!(root.context().single_value().as_deref(), Some("a"));
    }

    #[test]
    fn test_user_handler_can_suppress_keys() {
        let root = ComboboxRoot::new(RootProps::new());
        let input = ComboboxInput::new(root.context()).on_key_down(|e| {
            if e.key == Key::ArrowDown {
                e.prevent_default();
            }
        });
        input.key_down(&key(key_codes::ARROW_DOWN));
        assert!(!root.context().is_open());
    }

    #[test]
    fn test_attributes_track_highlight() {
        let root = ComboboxRoot::new(RootProps::new());
        let input = ComboboxInput::new(root.context()).placeholder("Search");
        let a = ComboboxOption::new(root.context(), "a").id("city-a");

        let attrs = input.attributes();
        assert_eq!(attrs["role"], "combobox");
        assert_eq!(attrs["aria-autocomplete"], "list");
        assert_eq!(attrs["aria-expanded"], "false");
        assert_eq!(attrs["placeholder"], "Search");
        assert!(!attrs.contains_key("aria-activedescendant"));

        root.context().request_open();
        let attrs = input.attributes();
        assert_eq!(attrs["aria-expanded"], "true");
        assert_eq!(attrs["aria-activedescendant"], a.element_id());
    }
}
