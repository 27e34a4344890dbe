//! Product catalog records (host ERP)

use fsm_core::traits::{Id, Named};
use fsm_core::types::{Amount, ProductTracking};
use serde::{Deserialize, Serialize};

/// Product type; only goods can be material lines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    Consu,
    Product,
    Service,
}

impl ProductKind {
    pub fn is_stockable(&self) -> bool {
        matches!(self, Self::Consu | Self::Product)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub kind: ProductKind,
    pub uom_id: Id,
    /// Cost used as default unit price of material lines
    pub standard_price: Amount,
    pub tracking: ProductTracking,
}

impl Product {
    pub fn new(name: impl Into<String>, uom_id: Id, standard_price: Amount) -> Self {
        Self {
            name: name.into(),
            uom_id,
            standard_price,
            ..Default::default()
        }
    }

    pub fn with_tracking(mut self, tracking: ProductTracking) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }
}

impl_entity!(Product, "Product");

impl Named for Product {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Unit of measure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Uom {
    pub id: Id,
    pub name: String,
}

impl Uom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl_entity!(Uom, "Unit of measure");

impl Named for Uom {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Lot or serial number of a tracked product
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Lot {
    pub id: Id,
    pub name: String,
    pub product_id: Id,
}

impl Lot {
    pub fn new(name: impl Into<String>, product_id: Id) -> Self {
        Self {
            id: 0,
            name: name.into(),
            product_id,
        }
    }
}

impl_entity!(Lot, "Lot");

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_products_are_not_stockable() {
        assert!(ProductKind::Consu.is_stockable());
        assert!(ProductKind::Product.is_stockable());
        assert!(!ProductKind::Service.is_stockable());
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("Cable NYM 3x1.5", 1, dec!(42.50))
            .with_tracking(ProductTracking::Lot);
        assert_eq!(product.display_name(), "Cable NYM 3x1.5");
        assert!(product.tracking.is_tracked());
        assert_eq!(product.kind, ProductKind::Consu);
    }
}
