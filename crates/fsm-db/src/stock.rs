//! On-hand stock bookkeeping
//!
//! Quants are kept for internal locations only, like the host inventory.
//! They may go negative when a transfer moves more than is on hand.

use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::Quantity;
use fsm_models::{Picking, Quant};
use rust_decimal::Decimal;
use tracing::debug;

use crate::database::Database;

impl Database {
    /// Quantity of a product on hand at a location; `lot_id = None` sums all lots
    pub fn on_hand(&self, product_id: Id, location_id: Id, lot_id: Option<Id>) -> Quantity {
        self.quants
            .iter()
            .filter(|q| q.product_id == product_id && q.location_id == location_id)
            .filter(|q| lot_id.is_none() || q.lot_id == lot_id)
            .map(|q| q.quantity)
            .sum()
    }

    /// Put stock at a location, e.g. an inventory adjustment
    pub fn adjust_quant(
        &mut self,
        product_id: Id,
        location_id: Id,
        lot_id: Option<Id>,
        delta: Quantity,
    ) -> FsmResult<()> {
        if !self.locations.find(location_id)?.is_internal() || delta.is_zero() {
            return Ok(());
        }
        let existing = self
            .quants
            .first(|q| q.matches(product_id, location_id, lot_id))
            .map(|q| q.id);
        match existing {
            Some(id) => self.quants.find_mut(id)?.quantity += delta,
            None => {
                self.quants
                    .insert(Quant::new(product_id, location_id, lot_id, delta));
            }
        }
        Ok(())
    }

    /// Book the done quantities of a validated picking
    pub fn apply_done_moves(&mut self, picking: &Picking) -> FsmResult<()> {
        for stock_move in picking.moves.iter().filter(|m| m.quantity > Decimal::ZERO) {
            self.adjust_quant(
                stock_move.product_id,
                stock_move.location_id,
                stock_move.lot_id,
                -stock_move.quantity,
            )?;
            self.adjust_quant(
                stock_move.product_id,
                stock_move.location_dest_id,
                stock_move.lot_id,
                stock_move.quantity,
            )?;
        }
        debug!(picking = %picking.name, moves = picking.moves.len(), "quants updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsm_core::types::LocationUsage;
    use fsm_models::{StockLocation, StockMove};
    use rust_decimal_macros::dec;

    fn setup() -> (Database, Id, Id, Id) {
        let mut db = Database::new();
        let stock = db.locations.insert(StockLocation::internal("Stock"));
        let van = db.locations.insert(StockLocation::internal("Возило - SK-1234-AB"));
        let customers = db
            .locations
            .insert(StockLocation::new("Customers", LocationUsage::Customer));
        (db, stock, van, customers)
    }

    #[test]
    fn test_on_hand_sums_lots() {
        let (mut db, stock, _, _) = setup();
        db.adjust_quant(1, stock, Some(7), dec!(4)).unwrap();
        db.adjust_quant(1, stock, Some(8), dec!(6)).unwrap();
        db.adjust_quant(1, stock, Some(7), dec!(1)).unwrap();

        assert_eq!(db.on_hand(1, stock, None), dec!(11));
        assert_eq!(db.on_hand(1, stock, Some(7)), dec!(5));
        assert_eq!(db.quants.count(), 2);
    }

    #[test]
    fn test_apply_done_moves() {
        let (mut db, stock, van, customers) = setup();
        db.adjust_quant(1, stock, None, dec!(10)).unwrap();

        let issue = Picking {
            moves: vec![StockMove {
                product_id: 1,
                product_uom_qty: dec!(4),
                quantity: dec!(4),
                location_id: stock,
                location_dest_id: van,
                ..Default::default()
            }],
            ..Default::default()
        };
        db.apply_done_moves(&issue).unwrap();
        assert_eq!(db.on_hand(1, stock, None), dec!(6));
        assert_eq!(db.on_hand(1, van, None), dec!(4));

        let consume = Picking {
            moves: vec![StockMove {
                product_id: 1,
                quantity: dec!(3),
                location_id: van,
                location_dest_id: customers,
                ..Default::default()
            }],
            ..Default::default()
        };
        db.apply_done_moves(&consume).unwrap();
        assert_eq!(db.on_hand(1, van, None), dec!(1));
        assert_eq!(db.on_hand(1, customers, None), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_location_is_an_error() {
        let (mut db, _, _, _) = setup();
        assert!(db.adjust_quant(1, 99, None, dec!(1)).is_err());
    }
}
