//! Stock locations, warehouses and on-hand quantities (host ERP)

use fsm_core::traits::{Id, Named};
use fsm_core::types::{LocationUsage, Quantity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StockLocation {
    pub id: Id,
    pub name: String,
    pub usage: LocationUsage,
    /// Parent location
    pub location_id: Option<Id>,
    pub company_id: Option<Id>,
}

impl StockLocation {
    pub fn new(name: impl Into<String>, usage: LocationUsage) -> Self {
        Self {
            name: name.into(),
            usage,
            ..Default::default()
        }
    }

    pub fn internal(name: impl Into<String>) -> Self {
        Self::new(name, LocationUsage::Internal)
    }

    pub fn with_parent(mut self, parent_id: Option<Id>) -> Self {
        self.location_id = parent_id;
        self
    }

    pub fn with_company(mut self, company_id: Option<Id>) -> Self {
        self.company_id = company_id;
        self
    }

    pub fn is_internal(&self) -> bool {
        self.usage == LocationUsage::Internal
    }
}

impl_entity!(StockLocation, "Stock location");

impl Named for StockLocation {
    fn display_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Warehouse {
    pub id: Id,
    pub name: String,
    pub company_id: Id,
    /// Main stock location of the warehouse
    pub lot_stock_id: Id,
}

impl Warehouse {
    pub fn new(name: impl Into<String>, company_id: Id, lot_stock_id: Id) -> Self {
        Self {
            id: 0,
            name: name.into(),
            company_id,
            lot_stock_id,
        }
    }
}

impl_entity!(Warehouse, "Warehouse");

/// On-hand quantity of a product (and lot) at a location
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Quant {
    pub id: Id,
    pub product_id: Id,
    pub location_id: Id,
    pub lot_id: Option<Id>,
    pub quantity: Quantity,
}

impl Quant {
    pub fn new(product_id: Id, location_id: Id, lot_id: Option<Id>, quantity: Quantity) -> Self {
        Self {
            id: 0,
            product_id,
            location_id,
            lot_id,
            quantity,
        }
    }

    pub fn matches(&self, product_id: Id, location_id: Id, lot_id: Option<Id>) -> bool {
        self.product_id == product_id && self.location_id == location_id && self.lot_id == lot_id
    }
}

impl_entity!(Quant, "Quant");
