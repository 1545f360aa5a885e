//! Brisk Core
//!
//! Leaf primitives shared by the Brisk headless widgets:
//!
//! - **Controllable State**: a state cell that is either driven by the caller
//!   (controlled) or owns its own storage (uncontrolled), behind one read/write API
//! - **Option Registry**: an arena of live option descriptors keyed by opaque
//!   handles, snapshotted in document order on demand
//! - **Events**: keyboard and pointer events with `prevent_default` semantics and
//!   handler composition
//!
//! Everything here is single-threaded. Handles are `Rc`-based and nothing is `Send`.
//!
//! # Example
//!
//! ```rust
//! use brisk_core::cell::{CellConfig, ControllableState};
//!
//! let open = ControllableState::new(CellConfig::new(false));
//! open.set(true);
//! assert!(open.get());
//!
//! // Controlled cells never change on their own
//! let controlled = ControllableState::new(CellConfig::new(false).controlled(false));
//! controlled.set(true);
//! assert!(!controlled.get());
//! ```

pub mod cell;
pub mod events;
pub mod registry;

pub use cell::{CellConfig, ChangeCallback, ControllableState};
pub use events::{
    compose_handlers, key_codes, Cancelable, EventHandler, Key, KeyboardEvent, Modifiers,
    PointerEvent,
};
pub use registry::{
    DocumentOrder, OptionDescriptor, OptionHandle, OptionRegistry, RegisteredOption, Snapshot,
    TreeOrder, TreePath,
};
