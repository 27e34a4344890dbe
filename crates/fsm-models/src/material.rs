//! Material line: per-product quantity tracking on a job
//!
//! Four independent accumulators follow the material from plan to site:
//! planned → taken (issued to the technician) → used (consumed at the
//! customer) or returned (brought back to the warehouse).

use fsm_core::traits::Id;
use fsm_core::types::{Amount, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default display sequence of new lines
pub const DEFAULT_SEQUENCE: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MaterialLine {
    pub id: Id,
    pub job_id: Id,
    pub sequence: i32,
    pub product_id: Id,
    pub product_uom_id: Id,
    pub lot_id: Option<Id>,

    /// Estimated quantity needed for the job
    pub planned_qty: Quantity,
    /// Issued from warehouse/vehicle to the technician
    pub taken_qty: Quantity,
    /// Consumed on the job site
    pub used_qty: Quantity,
    /// Brought back unused
    pub returned_qty: Quantity,

    pub price_unit: Amount,
}

impl MaterialLine {
    /// `taken - used - returned`
    pub fn available_to_return_qty(&self) -> Quantity {
        self.taken_qty - self.used_qty - self.returned_qty
    }

    /// Valued on used quantity only
    pub fn price_subtotal(&self) -> Amount {
        self.used_qty * self.price_unit
    }

    /// Planned quantity not yet taken, never negative
    pub fn remaining_to_take(&self) -> Quantity {
        (self.planned_qty - self.taken_qty).max(Decimal::ZERO)
    }

    pub fn has_outstanding_return(&self) -> bool {
        self.available_to_return_qty() > Decimal::ZERO
    }

    /// Sort key matching the line order `(sequence, id)`
    pub fn order_key(&self) -> (i32, Id) {
        (self.sequence, self.id)
    }
}

impl_entity!(MaterialLine, "Material line");

/// Values for a new material line; missing UoM and price are taken from the product
#[derive(Debug, Clone, Default)]
pub struct NewMaterialLine {
    pub job_id: Id,
    pub product_id: Id,
    pub product_uom_id: Option<Id>,
    pub price_unit: Option<Amount>,
    pub lot_id: Option<Id>,
    pub sequence: Option<i32>,
    pub planned_qty: Quantity,
    pub taken_qty: Quantity,
    pub used_qty: Quantity,
    pub returned_qty: Quantity,
}

impl NewMaterialLine {
    pub fn new(job_id: Id, product_id: Id) -> Self {
        Self {
            job_id,
            product_id,
            ..Default::default()
        }
    }

    pub fn planned(mut self, qty: Quantity) -> Self {
        self.planned_qty = qty;
        self
    }

    pub fn taken(mut self, qty: Quantity) -> Self {
        self.taken_qty = qty;
        self
    }

    pub fn used(mut self, qty: Quantity) -> Self {
        self.used_qty = qty;
        self
    }

    pub fn returned(mut self, qty: Quantity) -> Self {
        self.returned_qty = qty;
        self
    }

    pub fn with_uom(mut self, uom_id: Id) -> Self {
        self.product_uom_id = Some(uom_id);
        self
    }

    pub fn with_price(mut self, price_unit: Amount) -> Self {
        self.price_unit = Some(price_unit);
        self
    }

    pub fn with_lot(mut self, lot_id: Id) -> Self {
        self.lot_id = Some(lot_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(taken: Decimal, used: Decimal, returned: Decimal) -> MaterialLine {
        MaterialLine {
            taken_qty: taken,
            used_qty: used,
            returned_qty: returned,
            price_unit: dec!(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_available_to_return() {
        assert_eq!(line(dec!(10), dec!(6), dec!(0)).available_to_return_qty(), dec!(4));
        assert_eq!(line(dec!(10), dec!(6), dec!(4)).available_to_return_qty(), dec!(0));
        assert!(!line(dec!(10), dec!(6), dec!(4)).has_outstanding_return());
    }

    #[test]
    fn test_subtotal_uses_used_qty() {
        assert_eq!(line(dec!(10), dec!(3), dec!(2)).price_subtotal(), dec!(300));
    }

    #[test]
    fn test_remaining_to_take_never_negative() {
        let mut material = line(dec!(5), dec!(0), dec!(0));
        material.planned_qty = dec!(8);
        assert_eq!(material.remaining_to_take(), dec!(3));
        material.planned_qty = dec!(2);
        assert_eq!(material.remaining_to_take(), dec!(0));
    }
}
