//! Base contract system

use std::collections::BTreeSet;

use fsm_core::error::ValidationErrors;
use fsm_models::MaterialLine;

pub type ValidationResult = Result<(), ValidationErrors>;

/// Rules a record or a staged batch must satisfy before it is written
pub trait Contract<T: ?Sized>: Send + Sync {
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// A material line paired with its product name, which every message cites
#[derive(Debug, Clone, Copy)]
pub struct NamedLine<'a> {
    pub product_name: &'a str,
    pub line: &'a MaterialLine,
}

impl<'a> NamedLine<'a> {
    pub fn new(product_name: &'a str, line: &'a MaterialLine) -> Self {
        Self { product_name, line }
    }
}

/// Attributes a write touched
#[derive(Debug, Default, Clone)]
pub struct ChangeTracker {
    changed_attributes: BTreeSet<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_changed(&mut self, attribute: impl Into<String>) {
        self.changed_attributes.insert(attribute.into());
    }

    pub fn is_changed(&self, attribute: &str) -> bool {
        self.changed_attributes.contains(attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.changed_attributes.is_empty()
    }

    /// Changed attributes among `attributes`, in sorted order
    pub fn changed_among(&self, attributes: &[&str]) -> Vec<String> {
        self.changed_attributes
            .iter()
            .filter(|a| attributes.contains(&a.as_str()))
            .cloned()
            .collect()
    }

    pub fn changed_attributes(&self) -> &BTreeSet<String> {
        &self.changed_attributes
    }
}
