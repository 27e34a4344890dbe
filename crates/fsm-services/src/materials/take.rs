//! Take the planned quantity of one material line

use fsm_core::config::StockConfig;
use fsm_core::error::FsmError;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::OperationKind;
use fsm_db::Database;
use fsm_models::Picking;
use rust_decimal::Decimal;

use super::{product_name, MaterialParams, UpdateMaterialService};
use crate::base::WriteContext;
use crate::picking::{PickingService, TransferLine};

pub struct TakeMaterialService<'c> {
    config: &'c StockConfig,
}

impl<'c> TakeMaterialService<'c> {
    pub fn new(config: &'c StockConfig) -> Self {
        Self { config }
    }

    /// Issue `planned - taken` and mark the line fully taken
    pub fn call(&self, db: &mut Database, line_id: Id) -> FsmResult<Picking> {
        let line = db.materials.find(line_id)?.clone();
        let name = product_name(db, line.product_id).to_string();

        if line.planned_qty <= Decimal::ZERO {
            return Err(FsmError::validation(format!(
                "No planned quantity to take for {}.",
                name
            )));
        }
        let qty = line.remaining_to_take();
        if qty <= Decimal::ZERO {
            return Err(FsmError::validation(format!(
                "The whole planned quantity of {} is already taken.",
                name
            )));
        }

        db.transaction(|db| {
            let transfer = TransferLine::new(line.product_id, line.product_uom_id, qty)
                .with_lot(line.lot_id);
            let picking = PickingService::new(self.config).create_picking(
                db,
                line.job_id,
                OperationKind::Issue,
                &[transfer],
            )?;
            UpdateMaterialService::new(WriteContext::from_wizard()).call(
                db,
                line.id,
                &MaterialParams::new().taken(line.planned_qty),
            )?;
            Ok(picking)
        })
    }
}
