//! Interaction state machine
//!
//! Every transition is a method on [`ComboboxSession`]. Transitions check their
//! own preconditions and quietly do nothing when they don't hold: navigating an
//! empty list, committing with nothing highlighted, or pressing Escape while
//! closed are all no-ops.
//!
//! Highlight recomputation is centralized in [`ComboboxSession::reconcile`].
//! It compares the observed `(open, registry revision)` pair with the pair seen
//! at the previous pass and applies the open rule or the registry-change rule.
//! Transitions call it themselves; the host must also call it after every
//! render pass that mounted or unmounted options.

use brisk_core::registry::RegisteredOption;

use crate::session::ComboboxSession;

/// What the last reconcile pass saw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Observed {
    pub open: bool,
    pub revision: u64,
    /// An open transition happened while no options were registered
    pub pending_open: bool,
}

/// Direction of sequential highlight movement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl ComboboxSession {
    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Open the list if it is closed
    pub fn request_open(&self) {
        if self.is_open() {
            return;
        }
        tracing::debug!("combobox {}: open requested", self.id());
        self.open.set(true);
        self.reconcile();
    }

    /// Close the list if it is open
    pub fn request_close(&self) {
        if !self.is_open() {
            return;
        }
        tracing::debug!("combobox {}: close requested", self.id());
        self.open.set(false);
        self.reconcile();
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.request_close();
        } else {
            self.request_open();
        }
    }

    /// Close and put the committed value back into the input
    ///
    /// In multiple mode, or with nothing committed, the input is cleared.
    pub fn escape(&self) {
        if !self.is_open() {
            return;
        }
        self.request_close();
        let mode = self.mode();
        let text = self.value.with(|value| mode.display_text(value));
        self.replace_input_text(text);
    }

    /// Close after a press outside the content
    pub fn dismiss(&self) {
        self.request_close();
    }

    // =========================================================================
    // Highlight
    // =========================================================================

    /// Move the highlight one option along the rendered order
    ///
    /// Clamps at both ends. Disabled options are visited like any other.
    pub fn move_highlight(&self, direction: Direction) {
        if !self.is_open() {
            return;
        }
        let snapshot = self.snapshot();
        let Some(current) = self.highlighted() else {
            return;
        };
        let Some(index) = snapshot.position(&current) else {
            return;
        };

        let target = match direction {
            Direction::Next => (index + 1).min(snapshot.len() - 1),
            Direction::Previous => index.saturating_sub(1),
        };
        if target != index {
            tracing::debug!(
                "combobox {}: highlight {:?} {} -> {}",
                self.id(),
                direction,
                index,
                target
            );
        }
        self.set_highlight(snapshot.get(target));
    }

    /// Highlight the option under the pointer
    pub fn pointer_enter(&self, value: &str) {
        if !self.is_open() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(entry) = snapshot.find(value) {
            self.set_highlight(Some(entry));
        }
    }

    fn set_highlight(&self, target: Option<&RegisteredOption>) {
        let value = target.map(|entry| entry.value().to_string());
        if self.highlighted.set(value) {
            if let Some(entry) = target {
                self.hooks().scroll_into_view(entry.handle);
            }
        }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Commit the highlighted option (Enter)
    pub fn commit(&self) {
        if !self.is_open() {
            return;
        }
        let Some(value) = self.highlighted() else {
            tracing::trace!("combobox {}: commit with no highlight", self.id());
            return;
        };
        self.select(&value);
    }

    /// Commit `value` (Enter on the highlight, or a click on an option)
    ///
    /// Disabled options are not refused here; clicks on them never get this far.
    /// Single mode replaces the value, writes it into the input and closes.
    /// Multiple mode toggles membership and stays open.
    pub fn select(&self, value: &str) {
        if !self.is_open() {
            return;
        }
        let mode = self.mode();
        let Some(next) = self.value.with(|current| mode.apply(current, value)) else {
            return;
        };
        tracing::debug!("combobox {}: commit {:?} -> {:?}", self.id(), value, next);
        self.value.set(Some(next));

        if !mode.is_multiple() {
            self.replace_input_text(value.to_string());
            self.open.set(false);
        }
        self.reconcile();
    }

    // =========================================================================
    // Reconcile
    // =========================================================================

    /// Recompute the highlight after open state or registered options changed
    pub fn reconcile(&self) {
        let open = self.is_open();
        let revision = self.options_revision();
        let previous = self.observed.get();

        if !open {
            self.observed.set(Observed {
                open,
                revision,
                pending_open: false,
            });
            return;
        }

        let opened = !previous.open;
        let changed = revision != previous.revision;
        let pending_open = previous.pending_open || opened;
        if !changed && !pending_open {
            return;
        }

        let snapshot = self.snapshot();
        tracing::trace!(
            "combobox {}: reconcile (opened: {}, revision {} -> {}, {} options)",
            self.id(),
            opened,
            previous.revision,
            revision,
            snapshot.len()
        );

        if pending_open {
            if snapshot.is_empty() {
                self.observed.set(Observed {
                    open,
                    revision,
                    pending_open: true,
                });
                self.set_highlight(None);
                return;
            }
            self.observed.set(Observed {
                open,
                revision,
                pending_open: false,
            });
            let current = self.single_value();
            let target = current
                .as_deref()
                .and_then(|value| snapshot.find(value))
                .or_else(|| snapshot.first_enabled());
            self.set_highlight(target);
        } else {
            self.observed.set(Observed {
                open,
                revision,
                pending_open: false,
            });
            let current = self.highlighted();
            let target = current
                .as_deref()
                .and_then(|value| snapshot.find(value))
                .filter(|entry| !entry.is_disabled())
                .or_else(|| snapshot.first_enabled());
            self.set_highlight(target);
        }
    }
}
