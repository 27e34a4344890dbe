//! Partners and companies (host ERP)

use fsm_core::traits::{Id, Named};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Partner {
    pub id: Id,
    pub name: String,
}

impl Partner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl_entity!(Partner, "Partner");

impl Named for Partner {
    fn display_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Company {
    pub id: Id,
    pub name: String,
    pub currency: String,
}

impl Company {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            currency: currency.into(),
        }
    }
}

impl_entity!(Company, "Company");
