//! Consume wizard: material used on site goes to the customer

use fsm_core::config::StockConfig;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::Quantity;
use fsm_db::Database;
use rust_decimal::Decimal;

use super::{set_settle_qty, settle, settle_lines, SettleLine, Settlement, WizardOutcome};
use crate::result::ServiceResult;

pub struct ConsumeMaterialWizard<'c> {
    config: &'c StockConfig,
    pub job_id: Id,
    pub lines: Vec<SettleLine>,
}

impl<'c> ConsumeMaterialWizard<'c> {
    /// Every line with material out, defaulting to consuming all of it
    pub fn default_for(db: &Database, config: &'c StockConfig, job_id: Id) -> FsmResult<Self> {
        Ok(Self {
            config,
            job_id,
            lines: settle_lines(db, job_id)?,
        })
    }

    pub fn set_qty(&mut self, material_line_id: Id, qty: Quantity) -> bool {
        set_settle_qty(&mut self.lines, material_line_id, qty)
    }

    /// Deliver to the customer and raise the used quantities.
    ///
    /// When material is still left to return afterwards the result carries
    /// a message saying how much.
    pub fn confirm(&self, db: &mut Database) -> ServiceResult<WizardOutcome> {
        match settle(db, self.config, self.job_id, Settlement::Consume, &self.lines) {
            Ok(outcome) if outcome.remaining_to_return > Decimal::ZERO => {
                let message = format!(
                    "Consumed {} materials. {} left to return.",
                    outcome.lines, outcome.remaining_to_return
                );
                ServiceResult::success_with_message(outcome, message)
            }
            result => result.into(),
        }
    }
}
