//! Material wizards
//!
//! Each wizard is opened on a job, stages one quantity per material, and on
//! confirm moves the stock and updates the material lines in one
//! transaction:
//!
//! | wizard  | transfer | line update       | ceiling             |
//! |---------|----------|-------------------|---------------------|
//! | add     | issue    | taken (or new)    | none, qty > 0       |
//! | take    | issue    | taken             | stock on hand       |
//! | consume | consume  | used              | available to return |
//! | return  | return   | returned          | available to return |
//!
//! Confirm returns a [`ServiceResult`](crate::result::ServiceResult) so the
//! caller can show validation messages as-is.

mod add;
mod take;
mod consume;
mod returns;

pub use add::{AddMaterialLine, AddMaterialWizard};
pub use consume::ConsumeMaterialWizard;
pub use returns::ReturnMaterialWizard;
pub use take::{StockStatus, TakeMaterialLine, TakeMaterialWizard};

use fsm_contracts::{BatchContract, BatchLine, BatchOperation, Contract};
use fsm_core::config::StockConfig;
use fsm_core::error::ValidationErrors;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::{OperationKind, Quantity};
use fsm_db::Database;
use fsm_models::{MaterialLine, Picking};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::base::WriteContext;
use crate::materials::{product_name, MaterialParams, UpdateMaterialService};
use crate::picking::{PickingService, TransferLine};

/// What a confirmed wizard produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardOutcome {
    pub picking_id: Id,
    pub picking_name: String,
    /// Lines that moved
    pub lines: usize,
    /// Quantity of the job still out with the technician afterwards
    pub remaining_to_return: Quantity,
}

impl WizardOutcome {
    fn new(db: &Database, job_id: Id, picking: &Picking) -> Self {
        Self {
            picking_id: picking.id,
            picking_name: picking.name.clone(),
            lines: picking.moves.len(),
            remaining_to_return: remaining_to_return(db, job_id),
        }
    }
}

fn remaining_to_return(db: &Database, job_id: Id) -> Quantity {
    db.job_materials(job_id)
        .iter()
        .map(|l| l.available_to_return_qty())
        .sum()
}

/// Run the batch contract over `(product, qty, ceiling)` triples
fn check_batch(
    db: &Database,
    operation: BatchOperation,
    staged: &[(Id, Quantity, Option<Quantity>)],
) -> Result<(), ValidationErrors> {
    let lines: Vec<BatchLine<'_>> = staged
        .iter()
        .map(|(product_id, qty, ceiling)| {
            let line = BatchLine::new(product_name(db, *product_id), *qty);
            match ceiling {
                Some(ceiling) => line.capped_at(*ceiling),
                None => line,
            }
        })
        .collect();
    BatchContract::new(operation).validate(&lines[..])
}

/// A material line staged for consumption or return
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettleLine {
    pub material_line_id: Id,
    pub product_id: Id,
    pub product_uom_id: Id,
    pub lot_id: Option<Id>,
    pub taken_qty: Quantity,
    pub already_used_qty: Quantity,
    pub already_returned_qty: Quantity,
    /// taken − used − returned when the wizard was opened
    pub available_qty: Quantity,
    /// Editable; defaults to everything available
    pub qty: Quantity,
}

impl SettleLine {
    fn from_material(line: &MaterialLine) -> Self {
        let available = line.available_to_return_qty();
        Self {
            material_line_id: line.id,
            product_id: line.product_id,
            product_uom_id: line.product_uom_id,
            lot_id: line.lot_id,
            taken_qty: line.taken_qty,
            already_used_qty: line.used_qty,
            already_returned_qty: line.returned_qty,
            available_qty: available,
            qty: available,
        }
    }
}

/// Lines of the job with something left to consume or return
fn settle_lines(db: &Database, job_id: Id) -> FsmResult<Vec<SettleLine>> {
    db.jobs.find(job_id)?;
    Ok(db
        .job_materials(job_id)
        .into_iter()
        .filter(|l| l.available_to_return_qty() > Decimal::ZERO)
        .map(SettleLine::from_material)
        .collect())
}

/// Change the staged quantity of one material; false when it is not staged
fn set_settle_qty(lines: &mut [SettleLine], material_line_id: Id, qty: Quantity) -> bool {
    match lines.iter_mut().find(|l| l.material_line_id == material_line_id) {
        Some(line) => {
            line.qty = qty;
            true
        }
        None => false,
    }
}

/// What a settle batch does with the material still out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settlement {
    Consume,
    Return,
}

impl Settlement {
    fn operation(self) -> OperationKind {
        match self {
            Settlement::Consume => OperationKind::Consume,
            Settlement::Return => OperationKind::Return,
        }
    }

    fn batch_operation(self) -> BatchOperation {
        match self {
            Settlement::Consume => BatchOperation::Consume,
            Settlement::Return => BatchOperation::Return,
        }
    }

    /// Line update adding `qty` to the used or returned quantity
    fn params(self, line: &MaterialLine, qty: Quantity) -> MaterialParams {
        match self {
            Settlement::Consume => MaterialParams::new().used(line.used_qty + qty),
            Settlement::Return => MaterialParams::new().returned(line.returned_qty + qty),
        }
    }
}

/// Confirm a consume or return batch
fn settle(
    db: &mut Database,
    config: &StockConfig,
    job_id: Id,
    settlement: Settlement,
    lines: &[SettleLine],
) -> FsmResult<WizardOutcome> {
    let operation = settlement.operation();
    let staged: Vec<(Id, Quantity, Option<Quantity>)> = lines
        .iter()
        .map(|l| (l.product_id, l.qty, Some(l.available_qty)))
        .collect();
    check_batch(db, settlement.batch_operation(), &staged)?;

    let moving: Vec<&SettleLine> = lines.iter().filter(|l| l.qty > Decimal::ZERO).collect();
    db.transaction(|db| {
        let transfers: Vec<TransferLine> = moving
            .iter()
            .map(|l| TransferLine::new(l.product_id, l.product_uom_id, l.qty).with_lot(l.lot_id))
            .collect();
        let picking =
            PickingService::new(config).create_picking(db, job_id, operation, &transfers)?;

        let service = UpdateMaterialService::new(WriteContext::from_wizard());
        for staged in &moving {
            let params = settlement.params(db.materials.find(staged.material_line_id)?, staged.qty);
            service.call(db, staged.material_line_id, &params)?;
        }

        let outcome = WizardOutcome::new(db, job_id, &picking);
        info!(
            job_id,
            picking = %outcome.picking_name,
            operation = operation.as_str(),
            lines = outcome.lines,
            "material wizard confirmed"
        );
        Ok(outcome)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_settlement_targets() {
        assert_eq!(Settlement::Consume.operation(), OperationKind::Consume);
        assert_eq!(Settlement::Return.operation(), OperationKind::Return);
        assert_eq!(Settlement::Consume.batch_operation(), BatchOperation::Consume);
        assert_eq!(Settlement::Return.batch_operation(), BatchOperation::Return);
    }

    #[test]
    fn test_settlement_adds_to_its_own_quantity() {
        let line = MaterialLine {
            taken_qty: dec!(10),
            used_qty: dec!(3),
            returned_qty: dec!(2),
            ..Default::default()
        };

        let consumed = Settlement::Consume.params(&line, dec!(4));
        assert_eq!(consumed.used_qty, Some(dec!(7)));
        assert_eq!(consumed.returned_qty, None);

        let returned = Settlement::Return.params(&line, dec!(1));
        assert_eq!(returned.returned_qty, Some(dec!(3)));
        assert_eq!(returned.used_qty, None);
    }
}
