//! Common types used throughout ESFSM Stock

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product quantity expressed in the line's unit of measure
pub type Quantity = Decimal;

/// Monetary amount in company currency
pub type Amount = Decimal;

/// Stock location usage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationUsage {
    View,
    #[default]
    Internal,
    Customer,
    Supplier,
    Inventory,
    Transit,
}

/// Picking type operation code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PickingTypeCode {
    Incoming,
    Outgoing,
    Internal,
}

impl PickingTypeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Internal => "internal",
        }
    }
}

/// How a product is tracked in stock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductTracking {
    #[default]
    None,
    Lot,
    Serial,
}

impl ProductTracking {
    pub fn is_tracked(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Material operation carried out through a transfer document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Warehouse to technician (Реверс)
    Issue,
    /// Technician to customer (Испратница)
    Consume,
    /// Technician back to warehouse (Повратница)
    Return,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Consume => "consume",
            Self::Return => "return",
        }
    }

    /// Picking type code searched when no type with the configured name exists
    pub fn fallback_code(&self) -> PickingTypeCode {
        match self {
            Self::Issue | Self::Return => PickingTypeCode::Internal,
            Self::Consume => PickingTypeCode::Outgoing,
        }
    }
}
