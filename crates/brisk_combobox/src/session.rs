//! Combobox session
//!
//! One [`ComboboxSession`] exists per mounted combobox. It owns the three state
//! cells (open, value, highlight), the option registry, the input text and the
//! element ids the parts use to reference each other. Parts hold a cheap
//! [`ComboboxContext`] handle to it.
//!
//! Transitions live in [`crate::controller`]; this module is storage and reads.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use brisk_core::cell::{CellConfig, ChangeCallback, ControllableState};
use brisk_core::registry::{
    DocumentOrder, OptionDescriptor, OptionHandle, OptionRegistry, Snapshot,
};

use crate::collab::{NoopHooks, TransitionHooks};
use crate::controller::Observed;
use crate::root::RootProps;
use crate::value::{SelectionMode, Value};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Fallback ordering when the host supplies none
///
/// Every pair ties, so the registry falls back to mount order.
fn mount_order(_: OptionHandle, _: OptionHandle) -> std::cmp::Ordering {
    std::cmp::Ordering::Equal
}

/// State shared by every part of one combobox
pub struct ComboboxSession {
    id: u64,
    id_prefix: String,
    aria_label: Option<String>,
    mode: Cell<SelectionMode>,

    pub(crate) open: ControllableState<bool>,
    pub(crate) value: ControllableState<Option<Value>>,
    pub(crate) highlighted: ControllableState<Option<String>>,

    registry: RefCell<OptionRegistry>,
    order: Rc<dyn DocumentOrder>,
    hooks: RefCell<Rc<dyn TransitionHooks>>,

    input_text: RefCell<String>,
    input_id: String,
    content_id: RefCell<String>,
    anchor_id: RefCell<Option<String>>,
    next_option_id: Cell<u64>,

    /// Reconcile bookkeeping
    pub(crate) observed: Cell<Observed>,
}

impl fmt::Debug for ComboboxSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboboxSession")
            .field("id", &self.id)
            .field("mode", &self.mode.get())
            .field("open", &self.open.get())
            .field("value", &self.value.get())
            .field("highlighted", &self.highlighted.get())
            .field("options", &self.registry.borrow().len())
            .field("input_text", &self.input_text.borrow())
            .finish()
    }
}

impl ComboboxSession {
    pub(crate) fn new(props: RootProps) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        let mode = SelectionMode::from_multiple(props.multiple);

        let open = {
            let mut config = CellConfig::new(props.default_open).on_change_shared(
                props
                    .on_open_change
                    .map(|cb| Rc::new(move |open: &bool| cb(*open)) as ChangeCallback<bool>),
            );
            config.controlled = props.open;
            ControllableState::new(config)
        };

        let value = {
            let mut config = CellConfig::new(mode.migrate(props.default_value)).on_change_shared(
                props.on_change.map(|cb| {
                    Rc::new(move |value: &Option<Value>| {
                        if let Some(value) = value {
                            cb(value);
                        }
                    }) as ChangeCallback<Option<Value>>
                }),
            );
            config.controlled = props.value;
            ControllableState::new(config)
        };

        let highlighted = ControllableState::new(CellConfig::new(None).on_change_shared(
            props.on_highlight_change.map(|cb| {
                Rc::new(move |value: &Option<String>| cb(value.as_deref()))
                    as ChangeCallback<Option<String>>
            }),
        ));

        let input_text = mode.display_text(&value.get());
        let id_prefix = props.id_prefix;

        tracing::debug!(
            "ComboboxSession::new - session {} ({:?}, open controlled: {}, value controlled: {})",
            id,
            mode,
            open.is_controlled(),
            value.is_controlled()
        );

        Self {
            input_id: format!("{id_prefix}-input-{id}"),
            content_id: RefCell::new(format!("{id_prefix}-content-{id}")),
            id,
            id_prefix,
            aria_label: props.aria_label,
            mode: Cell::new(mode),
            open,
            value,
            highlighted,
            registry: RefCell::new(OptionRegistry::new()),
            order: props.order.unwrap_or_else(|| Rc::new(mount_order)),
            hooks: RefCell::new(props.hooks.unwrap_or_else(|| Rc::new(NoopHooks))),
            input_text: RefCell::new(input_text),
            anchor_id: RefCell::new(None),
            next_option_id: Cell::new(0),
            observed: Cell::new(Observed::default()),
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Process-unique id of this session
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode.get()
    }

    pub(crate) fn set_mode(&self, mode: SelectionMode) {
        self.mode.set(mode);
    }

    pub fn is_multiple(&self) -> bool {
        self.mode().is_multiple()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// The raw stored value
    pub fn value(&self) -> Option<Value> {
        self.value.get()
    }

    /// Committed single value (always `None` in multiple mode)
    pub fn single_value(&self) -> Option<String> {
        let mode = self.mode();
        self.value.with(|value| mode.single(value).map(str::to_string))
    }

    /// Committed list (always empty in single mode)
    pub fn selected_values(&self) -> Vec<String> {
        let mode = self.mode();
        self.value.with(|value| mode.list(value).to_vec())
    }

    /// Whether `value` is part of the committed selection
    ///
    /// A value whose shape does not match the mode selects nothing.
    pub fn is_selected(&self, value: &str) -> bool {
        let mode = self.mode();
        self.value.with(|current| {
            if mode.is_multiple() {
                mode.list(current).iter().any(|v| v == value)
            } else {
                mode.single(current) == Some(value)
            }
        })
    }

    pub fn highlighted(&self) -> Option<String> {
        self.highlighted.get()
    }

    pub fn is_highlighted(&self, value: &str) -> bool {
        self.highlighted
            .with(|current| current.as_deref() == Some(value))
    }

    /// The open-state cell
    pub fn open_cell(&self) -> &ControllableState<bool> {
        &self.open
    }

    /// The value cell
    pub fn value_cell(&self) -> &ControllableState<Option<Value>> {
        &self.value
    }

    /// The highlight cell
    pub fn highlight_cell(&self) -> &ControllableState<Option<String>> {
        &self.highlighted
    }

    // =========================================================================
    // Input Text
    // =========================================================================

    pub fn input_text(&self) -> String {
        self.input_text.borrow().clone()
    }

    /// Store text typed by the user
    pub(crate) fn store_input_text(&self, text: &str) {
        *self.input_text.borrow_mut() = text.to_string();
    }

    /// Rewrite the input text on the controller's behalf and tell the host
    pub(crate) fn replace_input_text(&self, text: String) {
        {
            let mut current = self.input_text.borrow_mut();
            if *current == text {
                return;
            }
            *current = text.clone();
        }
        self.hooks().input_text_changed(&text);
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Document-ordered view of the registered options
    pub fn snapshot(&self) -> Snapshot {
        self.registry.borrow().snapshot(self.order.as_ref())
    }

    pub fn option_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Content revision of the registry
    pub fn options_revision(&self) -> u64 {
        self.registry.borrow().revision()
    }

    pub(crate) fn mount_option(&self, descriptor: OptionDescriptor) -> OptionHandle {
        let mut registry = self.registry.borrow_mut();
        let handle = registry.mint();
        registry.register(handle, descriptor);
        handle
    }

    pub(crate) fn update_option(&self, handle: OptionHandle, descriptor: OptionDescriptor) {
        self.registry.borrow_mut().register(handle, descriptor);
    }

    pub(crate) fn unmount_option(&self, handle: OptionHandle) {
        self.registry.borrow_mut().unregister(handle);
    }

    // =========================================================================
    // Element Ids
    // =========================================================================

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn aria_label(&self) -> Option<&str> {
        self.aria_label.as_deref()
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn content_id(&self) -> String {
        self.content_id.borrow().clone()
    }

    pub(crate) fn set_content_id(&self, id: String) {
        *self.content_id.borrow_mut() = id;
    }

    /// Element the content is positioned against (the input unless an anchor part exists)
    pub fn anchor_id(&self) -> String {
        self.anchor_id
            .borrow()
            .clone()
            .unwrap_or_else(|| self.input_id.clone())
    }

    pub(crate) fn set_anchor_id(&self, id: Option<String>) {
        *self.anchor_id.borrow_mut() = id;
    }

    /// Element id for a part with no explicit id
    pub(crate) fn part_id(&self, part: &str) -> String {
        format!("{}-{}-{}", self.id_prefix, part, self.id)
    }

    /// Fresh element id for an option with no explicit id
    pub(crate) fn next_option_id(&self) -> String {
        let n = self.next_option_id.get();
        self.next_option_id.set(n + 1);
        format!("{}-option-{}-{}", self.id_prefix, self.id, n)
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Replace the post-transition hooks
    pub fn set_hooks(&self, hooks: Rc<dyn TransitionHooks>) {
        *self.hooks.borrow_mut() = hooks;
    }

    pub(crate) fn hooks(&self) -> Rc<dyn TransitionHooks> {
        self.hooks.borrow().clone()
    }
}

/// Shared handle to a [`ComboboxSession`], passed to every part
#[derive(Clone, Debug)]
pub struct ComboboxContext {
    session: Rc<ComboboxSession>,
}

impl ComboboxContext {
    pub(crate) fn new(session: ComboboxSession) -> Self {
        Self {
            session: Rc::new(session),
        }
    }

    /// Whether two handles refer to the same session
    pub fn ptr_eq(&self, other: &ComboboxContext) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
    }
}

impl Deref for ComboboxContext {
    type Target = ComboboxSession;

    fn deref(&self) -> &ComboboxSession {
        &self.session
    }
}
