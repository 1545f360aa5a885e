//! Option registry
//!
//! Tracks the live set of rendered, selectable options without owning any
//! element tree. Each mounted option reserves an [`OptionHandle`] and registers
//! an [`OptionDescriptor`] under it; unmounting frees the handle, so no identity
//! survives a remount.
//!
//! Registration order is an artifact of mount timing. Navigation must follow
//! the rendered order instead, so [`OptionRegistry::snapshot`] sorts through a
//! [`DocumentOrder`] supplied by whoever renders the options. [`TreeOrder`] is a
//! ready-made ordering keyed by each option's path in the element tree.
//!
//! ```rust
//! use brisk_core::registry::{OptionDescriptor, OptionRegistry, TreeOrder};
//!
//! let mut registry = OptionRegistry::new();
//! let order = TreeOrder::new();
//!
//! // Mounted as C, A, B ...
//! for (value, index) in [("c", 2), ("a", 0), ("b", 1)] {
//!     let handle = registry.mint();
//!     registry.register(handle, OptionDescriptor::new(value, format!("opt-{value}")));
//!     order.place(handle, [0, index]);
//! }
//!
//! // ... but rendered as A, B, C
//! let snapshot = registry.snapshot(&order);
//! let values: Vec<_> = snapshot.values().collect();
//! assert_eq!(values, ["a", "b", "c"]);
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Opaque handle for a mounted option
    pub struct OptionHandle;
}

/// Data carried by a registered option
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// The option's value, unique among registered options
    pub value: String,
    /// Disabled options can be navigated to but never committed
    pub disabled: bool,
    /// Id of the rendered element (for `aria-activedescendant`)
    pub element_id: String,
}

impl OptionDescriptor {
    pub fn new(value: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            disabled: false,
            element_id: element_id.into(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A descriptor together with the handle it is registered under
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredOption {
    pub handle: OptionHandle,
    pub descriptor: OptionDescriptor,
}

impl RegisteredOption {
    pub fn value(&self) -> &str {
        &self.descriptor.value
    }

    pub fn is_disabled(&self) -> bool {
        self.descriptor.disabled
    }

    pub fn element_id(&self) -> &str {
        &self.descriptor.element_id
    }
}

/// Rendered-position ordering between two live options
///
/// Must be total and consistent for the duration of one snapshot.
pub trait DocumentOrder {
    fn compare(&self, a: OptionHandle, b: OptionHandle) -> Ordering;
}

impl<F> DocumentOrder for F
where
    F: Fn(OptionHandle, OptionHandle) -> Ordering,
{
    fn compare(&self, a: OptionHandle, b: OptionHandle) -> Ordering {
        self(a, b)
    }
}

/// Child indices from the root down to an element
pub type TreePath = SmallVec<[u32; 8]>;

/// Document order derived from element tree paths
///
/// The rendering host records each option's path at layout/commit time.
/// Paths compare lexicographically, which is pre-order traversal order. Handles
/// with no recorded path sort after every placed handle.
#[derive(Debug, Default)]
pub struct TreeOrder {
    paths: RefCell<FxHashMap<OptionHandle, TreePath>>,
}

impl TreeOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or move) an option's position
    pub fn place(&self, handle: OptionHandle, path: impl IntoIterator<Item = u32>) {
        self.paths
            .borrow_mut()
            .insert(handle, path.into_iter().collect());
    }

    /// Forget an option's position
    pub fn remove(&self, handle: OptionHandle) {
        self.paths.borrow_mut().remove(&handle);
    }

    /// Forget every position
    pub fn clear(&self) {
        self.paths.borrow_mut().clear();
    }

    /// Recorded path of an option
    pub fn path(&self, handle: OptionHandle) -> Option<TreePath> {
        self.paths.borrow().get(&handle).cloned()
    }
}

impl DocumentOrder for TreeOrder {
    fn compare(&self, a: OptionHandle, b: OptionHandle) -> Ordering {
        let paths = self.paths.borrow();
        match (paths.get(&a), paths.get(&b)) {
            (Some(pa), Some(pb)) => pa.as_slice().cmp(pb.as_slice()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Arena of live option descriptors
#[derive(Debug, Default)]
pub struct OptionRegistry {
    slots: SlotMap<OptionHandle, Slot>,
    /// Bumped whenever the registered content changes
    revision: u64,
    /// Source of mount sequence numbers; never reused
    next_sequence: u64,
}

#[derive(Debug)]
struct Slot {
    sequence: u64,
    /// `None` marks a minted handle whose option has not registered yet
    descriptor: Option<OptionDescriptor>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a handle for a mounting option
    pub fn mint(&mut self) -> OptionHandle {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.slots.insert(Slot {
            sequence,
            descriptor: None,
        })
    }

    /// Insert or replace the descriptor for `handle`
    ///
    /// Re-registering an identical descriptor changes nothing. Handles that were
    /// already unregistered are ignored.
    pub fn register(&mut self, handle: OptionHandle, descriptor: OptionDescriptor) {
        let Some(slot) = self.slots.get_mut(handle) else {
            tracing::trace!(
                "OptionRegistry::register - ignoring stale handle for {:?}",
                descriptor.value
            );
            return;
        };

        if slot.descriptor.as_ref() == Some(&descriptor) {
            return;
        }

        tracing::trace!(
            "OptionRegistry::register - {:?} (disabled: {})",
            descriptor.value,
            descriptor.disabled
        );
        slot.descriptor = Some(descriptor);
        self.revision += 1;
    }

    /// Remove an option and free its handle. No-op if absent.
    pub fn unregister(&mut self, handle: OptionHandle) {
        let removed = self.slots.remove(handle).and_then(|slot| slot.descriptor);
        if let Some(descriptor) = removed {
            tracing::trace!("OptionRegistry::unregister - {:?}", descriptor.value);
            self.revision += 1;
        }
    }

    /// Descriptor registered under `handle`
    pub fn get(&self, handle: OptionHandle) -> Option<&OptionDescriptor> {
        self.slots.get(handle).and_then(|slot| slot.descriptor.as_ref())
    }

    /// Number of registered options
    pub fn len(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.descriptor.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(|slot| slot.descriptor.is_none())
    }

    /// Content revision, for change detection
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registered options sorted by document order
    ///
    /// Ties left by `order` are broken by mount order. Slots freed by an
    /// unmount are reused, so handle order is not mount order.
    pub fn snapshot(&self, order: &dyn DocumentOrder) -> Snapshot {
        let mut entries: Vec<(u64, RegisteredOption)> = self
            .slots
            .iter()
            .filter_map(|(handle, slot)| {
                slot.descriptor.as_ref().map(|descriptor| {
                    let entry = RegisteredOption {
                        handle,
                        descriptor: descriptor.clone(),
                    };
                    (slot.sequence, entry)
                })
            })
            .collect();

        entries.sort_by(|(a_seq, a), (b_seq, b)| {
            order.compare(a.handle, b.handle).then(a_seq.cmp(b_seq))
        });

        Snapshot {
            entries: entries.into_iter().map(|(_, entry)| entry).collect(),
        }
    }
}

/// Point-in-time, document-ordered list of live options
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<RegisteredOption>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredOption> {
        self.entries.iter()
    }

    /// Option values in order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(RegisteredOption::value)
    }

    pub fn get(&self, index: usize) -> Option<&RegisteredOption> {
        self.entries.get(index)
    }

    /// Index of the option with `value`
    pub fn position(&self, value: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.value() == value)
    }

    pub fn find(&self, value: &str) -> Option<&RegisteredOption> {
        self.entries.iter().find(|entry| entry.value() == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// Handle the option with `value` is registered under
    pub fn handle_of(&self, value: &str) -> Option<OptionHandle> {
        self.find(value).map(|entry| entry.handle)
    }

    /// Element id of the option with `value`
    pub fn element_id_of(&self, value: &str) -> Option<&str> {
        self.find(value).map(RegisteredOption::element_id)
    }

    /// Whether `value` is registered and disabled
    pub fn is_disabled(&self, value: &str) -> bool {
        self.find(value).is_some_and(RegisteredOption::is_disabled)
    }

    /// First option that is not disabled
    pub fn first_enabled(&self) -> Option<&RegisteredOption> {
        self.entries.iter().find(|entry| !entry.is_disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mount(
        registry: &mut OptionRegistry,
        order: &TreeOrder,
        value: &str,
        index: u32,
    ) -> OptionHandle {
        let handle = registry.mint();
        registry.register(handle, OptionDescriptor::new(value, format!("opt-{value}")));
        order.place(handle, [0, 3, index]);
        handle
    }

    #[test]
    fn test_empty_registry_snapshot() {
        let registry = OptionRegistry::new();
        let snapshot = registry.snapshot(&TreeOrder::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.first_enabled().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_follows_document_order_not_registration() {
        let mut registry = OptionRegistry::new();
        let order = TreeOrder::new();
        mount(&mut registry, &order, "C", 2);
        mount(&mut registry, &order, "A", 0);
        mount(&mut registry, &order, "B", 1);

        let snapshot = registry.snapshot(&order);
        assert_eq!(snapshot.values().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(snapshot.position("B"), Some(1));
    }

    #[test]
    fn test_register_is_idempotent_per_handle() {
        let mut registry = OptionRegistry::new();
        let handle = registry.mint();
        registry.register(handle, OptionDescriptor::new("a", "opt-a"));
        let revision = registry.revision();

        registry.register(handle, OptionDescriptor::new("a", "opt-a"));
        assert_eq!(registry.revision(), revision);
        assert_eq!(registry.len(), 1);

        registry.register(handle, OptionDescriptor::new("a", "opt-a").disabled(true));
        assert_eq!(registry.revision(), revision + 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(handle).is_some_and(|d| d.disabled));
    }

    #[test]
    fn test_unregister_frees_handle() {
        let mut registry = OptionRegistry::new();
        let handle = registry.mint();
        registry.register(handle, OptionDescriptor::new("a", "opt-a"));
        registry.unregister(handle);
        assert!(registry.is_empty());

        // Absent handles are a no-op, and a stale handle cannot come back
        let revision = registry.revision();
        registry.unregister(handle);
        registry.register(handle, OptionDescriptor::new("a", "opt-a"));
        assert_eq!(registry.revision(), revision);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_minted_but_unregistered_is_invisible() {
        let mut registry = OptionRegistry::new();
        let order = TreeOrder::new();
        let pending = registry.mint();
        mount(&mut registry, &order, "a", 0);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot(&order).len(), 1);
        registry.unregister(pending);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unplaced_handles_sort_last() {
        let mut registry = OptionRegistry::new();
        let order = TreeOrder::new();
        let loose = registry.mint();
        registry.register(loose, OptionDescriptor::new("loose", "opt-loose"));
        mount(&mut registry, &order, "placed", 5);

        let snapshot = registry.snapshot(&order);
        assert_eq!(snapshot.values().collect::<Vec<_>>(), ["placed", "loose"]);
    }

    #[test]
    fn test_nested_paths_use_preorder() {
        let mut registry = OptionRegistry::new();
        let order = TreeOrder::new();
        let deep = registry.mint();
        registry.register(deep, OptionDescriptor::new("group-child", "g"));
        order.place(deep, [0, 1, 0]);
        let shallow = registry.mint();
        registry.register(shallow, OptionDescriptor::new("second", "s"));
        order.place(shallow, [0, 2]);
        let first = registry.mint();
        registry.register(first, OptionDescriptor::new("first", "f"));
        order.place(first, [0, 0]);

        let snapshot = registry.snapshot(&order);
        assert_eq!(
            snapshot.values().collect::<Vec<_>>(),
            ["first", "group-child", "second"]
        );
    }

    #[test]
    fn test_closure_order() {
        let mut registry = OptionRegistry::new();
        let a = registry.mint();
        registry.register(a, OptionDescriptor::new("a", "opt-a"));
        let b = registry.mint();
        registry.register(b, OptionDescriptor::new("b", "opt-b"));

        // Reverse of handle order
        let reversed = |x: OptionHandle, y: OptionHandle| y.cmp(&x);
        let snapshot = registry.snapshot(&reversed);
        assert_eq!(snapshot.values().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn test_first_enabled_skips_disabled() {
        let mut registry = OptionRegistry::new();
        let order = TreeOrder::new();
        let a = mount(&mut registry, &order, "A", 0);
        registry.register(a, OptionDescriptor::new("A", "opt-A").disabled(true));
        mount(&mut registry, &order, "B", 1);
        mount(&mut registry, &order, "C", 2);

        let snapshot = registry.snapshot(&order);
        assert_eq!(snapshot.first_enabled().map(|o| o.value()), Some("B"));
        assert!(snapshot.is_disabled("A"));
        assert!(!snapshot.is_disabled("missing"));
    }

    #[test]
    fn test_ties_break_by_mount_order_after_slot_reuse() {
        let mut registry = OptionRegistry::new();
        let unordered = |_: OptionHandle, _: OptionHandle| Ordering::Equal;

        let first = registry.mint();
        registry.register(first, OptionDescriptor::new("first", "opt-first"));
        let second = registry.mint();
        registry.register(second, OptionDescriptor::new("second", "opt-second"));

        // The freed slot is handed back to the next mount
        registry.unregister(first);
        let third = registry.mint();
        registry.register(third, OptionDescriptor::new("third", "opt-third"));

        let snapshot = registry.snapshot(&unordered);
        assert_eq!(snapshot.values().collect::<Vec<_>>(), ["second", "third"]);
    }

    proptest! {
        #[test]
        fn test_snapshot_sorted_for_any_mount_order(indices in Just((0u32..12).collect::<Vec<_>>()).prop_shuffle()) {
            let mut registry = OptionRegistry::new();
            let order = TreeOrder::new();
            for index in &indices {
                mount(&mut registry, &order, &format!("v{index:02}"), *index);
            }

            let snapshot = registry.snapshot(&order);
            let values: Vec<_> = snapshot.values().map(str::to_string).collect();
            let expected: Vec<_> = (0u32..12).map(|i| format!("v{i:02}")).collect();
            prop_assert_eq!(values, expected);
        }
    }
}
