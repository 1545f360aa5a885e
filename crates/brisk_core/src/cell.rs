//! Controllable state cells
//!
//! A [`ControllableState<T>`] holds one piece of widget state that may be owned
//! either by the caller or by the widget itself:
//!
//! - **Controlled**: the caller supplies the current value. `set()` never touches
//!   local storage, it only proposes the change through `on_change`. The caller
//!   decides whether to accept it and pushes the accepted value back with `sync()`.
//! - **Uncontrolled**: the cell starts from a default and owns its storage. `set()`
//!   stores the value and then notifies `on_change` so callers can observe it.
//!
//! Readers never need to know which mode is active.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use brisk_core::cell::{CellConfig, ControllableState};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let seen_clone = seen.clone();
//!
//! let count = ControllableState::new(
//!     CellConfig::new(0).on_change(move |v: &i32| seen_clone.borrow_mut().push(*v)),
//! );
//!
//! count.update(|n| n + 1);
//! count.update(|n| n + 1);
//! assert_eq!(count.get(), 2);
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with a proposed (controlled) or applied (uncontrolled) value
pub type ChangeCallback<T> = Rc<dyn Fn(&T)>;

/// Configuration for a [`ControllableState`]
pub struct CellConfig<T> {
    /// Caller-supplied value. Presence alone selects controlled mode.
    pub controlled: Option<T>,
    /// Initial value for uncontrolled mode
    pub default: T,
    /// Change notification
    pub on_change: Option<ChangeCallback<T>>,
}

impl<T> CellConfig<T> {
    /// Create an uncontrolled configuration starting at `default`
    pub fn new(default: T) -> Self {
        Self {
            controlled: None,
            default,
            on_change: None,
        }
    }

    /// Drive the cell from a caller-owned value
    pub fn controlled(mut self, value: T) -> Self {
        self.controlled = Some(value);
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        self.on_change = Some(Rc::new(callback));
        self
    }

    /// Set an already shared change callback
    pub fn on_change_shared(mut self, callback: Option<ChangeCallback<T>>) -> Self {
        self.on_change = callback;
        self
    }
}

impl<T: Default> Default for CellConfig<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

struct CellInner<T> {
    value: T,
    controlled: bool,
    on_change: Option<ChangeCallback<T>>,
    /// Bumped every time the visible value changes
    version: u64,
}

/// A state cell that is either caller-controlled or self-managed
///
/// Cloning yields another handle to the same cell.
pub struct ControllableState<T> {
    inner: Rc<RefCell<CellInner<T>>>,
}

impl<T> Clone for ControllableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ControllableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ControllableState")
            .field("value", &inner.value)
            .field("controlled", &inner.controlled)
            .field("on_change", &inner.on_change.is_some())
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> ControllableState<T> {
    /// Create a cell from a configuration
    pub fn new(config: CellConfig<T>) -> Self {
        let (value, controlled) = match config.controlled {
            Some(value) => (value, true),
            None => (config.default, false),
        };
        Self {
            inner: Rc::new(RefCell::new(CellInner {
                value,
                controlled,
                on_change: config.on_change,
                version: 0,
            })),
        }
    }

    /// Create an uncontrolled cell with no change callback
    pub fn uncontrolled(default: T) -> Self {
        Self::new(CellConfig::new(default))
    }

    /// Get the current value
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value without cloning it
    ///
    /// The closure must not write to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Whether the caller owns the value
    pub fn is_controlled(&self) -> bool {
        self.inner.borrow().controlled
    }

    /// Version counter of the visible value
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Propose a new value
    ///
    /// Returns `false` when `value` equals the current value; nothing is stored and
    /// `on_change` is not called in that case. Otherwise the value is stored (only in
    /// uncontrolled mode) and `on_change` is called with it.
    pub fn set(&self, value: T) -> bool {
        let callback = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            if !inner.controlled {
                inner.value = value.clone();
                inner.version += 1;
            }
            inner.on_change.clone()
        };

        // No borrow is held here, so the callback may re-enter the cell.
        if let Some(callback) = callback {
            callback(&value);
        }
        true
    }

    /// Propose a value computed from the latest value
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let current = self.get();
        self.set(f(&current))
    }

    /// Push a caller-owned value into the cell
    ///
    /// This is how a controlled caller accepts a proposal (or changes the value for
    /// its own reasons). Calling it on an uncontrolled cell hands ownership to the
    /// caller from then on. `on_change` is not called.
    pub fn sync(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        if !inner.controlled {
            tracing::trace!("ControllableState::sync - cell switches to controlled mode");
            inner.controlled = true;
        }
        if inner.value != value {
            inner.value = value;
            inner.version += 1;
        }
    }

    /// Replace the change callback
    pub fn set_on_change(&self, callback: Option<ChangeCallback<T>>) {
        self.inner.borrow_mut().on_change = callback;
    }
}
