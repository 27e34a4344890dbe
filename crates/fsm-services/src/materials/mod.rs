//! Material line services
//!
//! - `create`: new lines with product defaults
//! - `update`: quantity and price edits, warning on direct quantity writes
//! - `take`: issue the rest of the planned quantity of one line

mod create;
mod update;
mod take;

pub use create::CreateMaterialService;
pub use take::TakeMaterialService;
pub use update::UpdateMaterialService;

use fsm_contracts::{Contract, MaterialQuantityContract, NamedLine};
use fsm_core::error::ValidationErrors;
use fsm_core::traits::Id;
use fsm_core::types::{Amount, Quantity};
use fsm_db::Database;
use fsm_models::MaterialLine;

/// Material line edit params; `None` leaves the attribute untouched
#[derive(Debug, Clone, Default)]
pub struct MaterialParams {
    pub sequence: Option<i32>,
    pub planned_qty: Option<Quantity>,
    pub taken_qty: Option<Quantity>,
    pub used_qty: Option<Quantity>,
    pub returned_qty: Option<Quantity>,
    pub price_unit: Option<Amount>,
    pub lot_id: Option<Id>,
}

impl MaterialParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planned(mut self, qty: Quantity) -> Self {
        self.planned_qty = Some(qty);
        self
    }

    pub fn taken(mut self, qty: Quantity) -> Self {
        self.taken_qty = Some(qty);
        self
    }

    pub fn used(mut self, qty: Quantity) -> Self {
        self.used_qty = Some(qty);
        self
    }

    pub fn returned(mut self, qty: Quantity) -> Self {
        self.returned_qty = Some(qty);
        self
    }

    pub fn with_price(mut self, price_unit: Amount) -> Self {
        self.price_unit = Some(price_unit);
        self
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_lot(mut self, lot_id: Id) -> Self {
        self.lot_id = Some(lot_id);
        self
    }
}

pub(crate) fn product_name(db: &Database, product_id: Id) -> &str {
    db.products.name_of(product_id)
}

/// Quantity constraints plus the references a line must satisfy
pub(crate) fn check_line(db: &Database, line: &MaterialLine) -> Result<(), ValidationErrors> {
    let name = product_name(db, line.product_id);
    let mut errors = match MaterialQuantityContract::new().validate(&NamedLine::new(name, line)) {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    match db.products.find_optional(line.product_id) {
        Some(product) if !product.kind.is_stockable() => {
            errors.add("product_id", format!("{} is not a storable product", product.name));
        }
        Some(_) => {}
        None => errors.add("product_id", "can't be blank"),
    }
    if let Some(lot) = line.lot_id.and_then(|id| db.lots.find_optional(id)) {
        if lot.product_id != line.product_id {
            errors.add("lot_id", format!("{} does not belong to {}", lot.name, name));
        }
    }

    errors.into_result()
}
