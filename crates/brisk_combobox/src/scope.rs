//! Ambient combobox scope
//!
//! Parts normally receive their [`ComboboxContext`] explicitly. Hosts that build
//! part trees declaratively can instead provide a root for the duration of a
//! closure and let parts look it up with [`use_combobox_context`]. Lookups made
//! outside any provided root fail with [`ComboboxError::MissingContext`].

use std::cell::RefCell;

use crate::error::{ComboboxError, Result};
use crate::session::ComboboxContext;

thread_local! {
    static SCOPE: RefCell<Vec<ComboboxContext>> = const { RefCell::new(Vec::new()) };
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPE.with(|scope| {
            scope.borrow_mut().pop();
        });
    }
}

/// Make `context` the ambient combobox while `f` runs
///
/// Scopes nest; the innermost provided root wins.
pub fn provide<R>(context: &ComboboxContext, f: impl FnOnce() -> R) -> R {
    SCOPE.with(|scope| scope.borrow_mut().push(context.clone()));
    let _guard = ScopeGuard;
    f()
}

/// The innermost provided combobox, or an error naming the orphaned `part`
pub fn use_combobox_context(part: &'static str) -> Result<ComboboxContext> {
    SCOPE
        .with(|scope| scope.borrow().last().cloned())
        .ok_or_else(|| {
            tracing::error!("{} rendered outside of a Combobox root", part);
            ComboboxError::MissingContext {
                part,
                ancestor: "Combobox",
            }
        })
}
