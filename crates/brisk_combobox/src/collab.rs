//! Collaborator interfaces
//!
//! The combobox core renders nothing, positions nothing, and does no
//! hit-testing. Those jobs belong to the host:
//!
//! - a [`Positioner`] places the floating content next to its anchor
//! - a layering layer reports Escape presses and outside presses to
//!   [`ComboboxContent`](crate::parts::ComboboxContent), classifying the
//!   press target as an [`OutsideTarget`]
//! - the renderer mounts option parts and calls
//!   [`ComboboxSession::reconcile`](crate::session::ComboboxSession::reconcile)
//!   after each commit
//!
//! [`TransitionHooks`] is the other direction: effects the controller asks the
//! host to perform after a transition has been applied.

use brisk_core::registry::OptionHandle;

/// Effects requested by the controller after a transition commits
///
/// Every method defaults to doing nothing.
pub trait TransitionHooks {
    /// The highlight moved to the option registered under `handle`
    fn scroll_into_view(&self, _handle: OptionHandle) {}

    /// Focus should return to the text input
    fn focus_input(&self) {}

    /// The controller rewrote the input text (commit in single mode, Escape)
    fn input_text_changed(&self, _text: &str) {}
}

/// Hooks that ignore every effect
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl TransitionHooks for NoopHooks {}

/// Places floating content relative to an anchor element
pub trait Positioner {
    type Placement;

    fn place(&self, anchor_id: &str, content_id: &str) -> Self::Placement;
}

/// Where a pointer press outside the content landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutsideTarget {
    /// Inside the text input
    Input,
    /// Inside the trigger button
    Trigger,
    /// Anywhere else
    Elsewhere,
}
