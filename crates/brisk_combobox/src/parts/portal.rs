//! Portal deciding whether the content subtree is mounted

use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

pub struct ComboboxPortal {
    context: ComboboxContext,
    force_mount: bool,
    container: Option<String>,
}

impl ComboboxPortal {
    pub fn new(context: &ComboboxContext) -> Self {
        Self {
            context: context.clone(),
            force_mount: false,
            container: None,
        }
    }

    /// Attach to the ambient combobox
    pub fn from_scope() -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxPortal")?))
    }

    /// Keep the content mounted while closed
    pub fn force_mount(mut self, force: bool) -> Self {
        self.force_mount = force;
        self
    }

    /// Element id to mount into instead of the document body
    pub fn container(mut self, id: impl Into<String>) -> Self {
        self.container = Some(id.into());
        self
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Whether the host should mount the content subtree
    pub fn is_present(&self) -> bool {
        self.force_mount || self.context.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::{ComboboxRoot, RootProps};

    #[test]
    fn test_presence_follows_open_state() {
        let root = ComboboxRoot::new(RootProps::new());
        let portal = ComboboxPortal::new(root.context()).container("overlays");
        assert!(!portal.is_present());
        assert_eq!(portal.container_id(), Some("overlays"));

        root.context().request_open();
        assert!(portal.is_present());
    }

    #[test]
    fn test_force_mount() {
        let root = ComboboxRoot::new(RootProps::new());
        let portal = ComboboxPortal::new(root.context()).force_mount(true);
        assert!(portal.is_present());
    }
}
