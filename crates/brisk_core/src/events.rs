//! Keyboard and pointer events
//!
//! Platform layers deliver key codes the same way the text widgets receive them
//! (`KEY_DOWN` with a numeric code). [`Key::from_key_code`] maps the codes the
//! headless widgets care about; everything else is carried through as
//! [`Key::Other`].
//!
//! Handlers compose the way primitive parts expect: the integrator's handler runs
//! first, and if it calls `prevent_default()` the built-in behaviour is skipped.

use std::cell::Cell;
use std::rc::Rc;

/// Platform key codes understood by the widgets
pub mod key_codes {
    pub const BACKSPACE: u32 = 8;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_DOWN: u32 = 40;
}

/// A logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Backspace,
    /// A printable character
    Char(char),
    /// Any other key code
    Other(u32),
}

impl Key {
    /// Map a platform key code (and the character it produced, if any)
    pub fn from_key_code(code: u32, key_char: Option<char>) -> Self {
        match code {
            key_codes::ARROW_DOWN => Key::ArrowDown,
            key_codes::ARROW_UP => Key::ArrowUp,
            key_codes::ENTER => Key::Enter,
            key_codes::ESCAPE => Key::Escape,
            key_codes::BACKSPACE => Key::Backspace,
            _ => match key_char {
                Some(c) if !c.is_control() => Key::Char(c),
                _ => Key::Other(code),
            },
        }
    }
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, Win on Windows
    pub meta: bool,
}

/// Events whose default handling can be suppressed
pub trait Cancelable {
    fn prevent_default(&self);
    fn is_default_prevented(&self) -> bool;
}

/// A key press delivered to a focused part
#[derive(Clone, Debug)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    default_prevented: Cell<bool>,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            default_prevented: Cell::new(false),
        }
    }

    /// Build from a raw platform key code
    pub fn from_key_code(code: u32, key_char: Option<char>) -> Self {
        Self::new(Key::from_key_code(code, key_char))
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl Cancelable for KeyboardEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// A pointer move or click delivered to a part
#[derive(Clone, Debug, Default)]
pub struct PointerEvent {
    /// Pointer position in window coordinates
    pub x: f32,
    pub y: f32,
    default_prevented: Cell<bool>,
}

impl PointerEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            default_prevented: Cell::new(false),
        }
    }
}

impl Cancelable for PointerEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Integrator-supplied event handler
///
/// Uses Rc since UI is single-threaded.
pub type EventHandler<E> = Rc<dyn Fn(&E)>;

/// Run the integrator's handler, then the built-in one unless it was suppressed
pub fn compose_handlers<E: Cancelable>(
    user: Option<&EventHandler<E>>,
    event: &E,
    builtin: impl FnOnce(&E),
) {
    if let Some(handler) = user {
        handler(event);
    }
    if !event.is_default_prevented() {
        builtin(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_mapping() {
        assert_eq!(Key::from_key_code(40, None), Key::ArrowDown);
        assert_eq!(Key::from_key_code(38, None), Key::ArrowUp);
        assert_eq!(Key::from_key_code(13, None), Key::Enter);
        assert_eq!(Key::from_key_code(27, None), Key::Escape);
        assert_eq!(Key::from_key_code(8, None), Key::Backspace);
        assert_eq!(Key::from_key_code(65, Some('a')), Key::Char('a'));
        assert_eq!(Key::from_key_code(9, Some('\t')), Key::Other(9));
    }

    #[test]
    fn test_compose_runs_both_handlers() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let order_user = order.clone();
        let user: EventHandler<KeyboardEvent> = Rc::new(move |_| order_user.borrow_mut().push("user"));

        let event = KeyboardEvent::new(Key::Enter);
        compose_handlers(Some(&user), &event, |_| order.borrow_mut().push("builtin"));
        assert_eq!(*order.borrow(), vec!["user", "builtin"]);
    }

    #[test]
    fn test_compose_respects_prevent_default() {
        let user: EventHandler<PointerEvent> = Rc::new(|e| e.prevent_default());
        let mut ran = false;
        let event = PointerEvent::new();
        compose_handlers(Some(&user), &event, |_| ran = true);
        assert!(!ran);
        assert!(event.is_default_prevented());
    }
}
