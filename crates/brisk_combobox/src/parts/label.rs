//! Label bound to the input

use super::Attributes;
use crate::error::Result;
use crate::scope::use_combobox_context;
use crate::session::ComboboxContext;

pub struct ComboboxLabel {
    context: ComboboxContext,
    text: String,
}

impl ComboboxLabel {
    pub fn new(context: &ComboboxContext, text: impl Into<String>) -> Self {
        Self {
            context: context.clone(),
            text: text.into(),
        }
    }

    /// Attach to the ambient combobox
    pub fn from_scope(text: impl Into<String>) -> Result<Self> {
        Ok(Self::new(&use_combobox_context("ComboboxLabel")?, text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("id", self.context.part_id("label"));
        attrs.insert("for", self.context.input_id().to_string());
        attrs
    }
}
