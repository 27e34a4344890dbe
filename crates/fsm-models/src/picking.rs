//! Transfer documents (pickings) and their moves
//!
//! The picking lifecycle is owned by the host ERP; only the transitions the
//! material workflow drives are modelled: draft → confirmed → assigned → done.

use chrono::{DateTime, Utc};
use fsm_core::error::FsmError;
use fsm_core::result::FsmResult;
use fsm_core::traits::{Id, Named};
use fsm_core::types::{PickingTypeCode, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingType {
    pub id: Id,
    pub name: String,
    pub code: PickingTypeCode,
    pub company_id: Id,
    /// Prefix of generated picking names, e.g. "WH/REV"
    pub sequence_prefix: String,
    pub default_location_src_id: Option<Id>,
    pub default_location_dest_id: Option<Id>,
}

impl PickingType {
    pub fn new(
        name: impl Into<String>,
        code: PickingTypeCode,
        company_id: Id,
        sequence_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            code,
            company_id,
            sequence_prefix: sequence_prefix.into(),
            default_location_src_id: None,
            default_location_dest_id: None,
        }
    }

    pub fn with_default_locations(mut self, src: Option<Id>, dest: Option<Id>) -> Self {
        self.default_location_src_id = src;
        self.default_location_dest_id = dest;
        self
    }
}

impl_entity!(PickingType, "Picking type");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PickingState {
    #[default]
    Draft,
    Confirmed,
    Assigned,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StockMove {
    pub name: String,
    pub product_id: Id,
    pub product_uom_id: Id,
    /// Demand
    pub product_uom_qty: Quantity,
    /// Done quantity
    pub quantity: Quantity,
    pub lot_id: Option<Id>,
    pub location_id: Id,
    pub location_dest_id: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Picking {
    pub id: Id,
    pub name: String,
    pub picking_type_id: Option<Id>,
    pub location_id: Id,
    pub location_dest_id: Id,
    /// Job the transfer belongs to
    pub job_id: Option<Id>,
    pub partner_id: Option<Id>,
    pub origin: String,
    pub state: PickingState,
    pub moves: Vec<StockMove>,
    pub date_done: Option<DateTime<Utc>>,
}

impl Picking {
    pub fn confirm(&mut self) -> FsmResult<()> {
        if self.state != PickingState::Draft {
            return Err(self.bad_transition("confirm"));
        }
        if self.moves.is_empty() {
            return Err(FsmError::validation(format!(
                "Transfer {} has no moves to confirm.",
                self.name
            )));
        }
        self.state = PickingState::Confirmed;
        Ok(())
    }

    pub fn assign(&mut self) -> FsmResult<()> {
        if self.state != PickingState::Confirmed {
            return Err(self.bad_transition("assign"));
        }
        self.state = PickingState::Assigned;
        Ok(())
    }

    /// Mark every move as fully done where no done quantity was set yet
    pub fn set_quantities_done(&mut self) {
        for stock_move in &mut self.moves {
            if stock_move.quantity.is_zero() {
                stock_move.quantity = stock_move.product_uom_qty;
            }
        }
    }

    pub fn validate(&mut self, at: DateTime<Utc>) -> FsmResult<()> {
        if self.state != PickingState::Assigned {
            return Err(self.bad_transition("validate"));
        }
        if self.moves.iter().all(|m| m.quantity <= Decimal::ZERO) {
            return Err(FsmError::validation(format!(
                "Transfer {} has no done quantities.",
                self.name
            )));
        }
        self.state = PickingState::Done;
        self.date_done = Some(at);
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        self.state == PickingState::Done
    }

    fn bad_transition(&self, action: &str) -> FsmError {
        FsmError::validation(format!(
            "Cannot {} transfer {} in state {:?}.",
            action, self.name, self.state
        ))
    }
}

impl_entity!(Picking, "Transfer");

impl Named for Picking {
    fn display_name(&self) -> &str {
        &self.name
    }
}
