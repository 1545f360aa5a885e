//! Optional positioning anchor
//!
//! Without an anchor the content is positioned against the input.

use super::Attributes;
use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

pub struct ComboboxAnchor {
    context: ComboboxContext,
    id: String,
}

impl ComboboxAnchor {
    pub fn new(context: &ComboboxContext) -> Self {
        let id = context.part_id("anchor");
        context.set_anchor_id(Some(id.clone()));
        Self {
            context: context.clone(),
            id,
        }
    }

    /// Attach to the ambient combobox
    pub fn from_scope() -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxAnchor")?))
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self.context.set_anchor_id(Some(self.id.clone()));
        self
    }

    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("id", self.id.clone());
        attrs
    }
}

impl Drop for ComboboxAnchor {
    fn drop(&mut self) {
        self.context.set_anchor_id(None);
    }
}
