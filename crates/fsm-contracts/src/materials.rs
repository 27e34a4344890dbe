//! Quantity constraints of material lines
//!
//! Checked on every create and write:
//! - no quantity is negative
//! - used never exceeds taken
//! - returned never exceeds what is left after use (taken − used)

use fsm_core::error::ValidationErrors;
use rust_decimal::Decimal;

use crate::base::{Contract, NamedLine, ValidationResult};

pub const QUANTITY_FIELDS: [&str; 4] = ["planned_qty", "taken_qty", "used_qty", "returned_qty"];

/// Accumulators that may only move through the wizard path
pub const TRACKED_QUANTITY_FIELDS: [&str; 3] = ["taken_qty", "used_qty", "returned_qty"];

#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialQuantityContract;

impl MaterialQuantityContract {
    pub fn new() -> Self {
        Self
    }

    fn validate_non_negative(&self, named: &NamedLine<'_>, errors: &mut ValidationErrors) {
        let line = named.line;
        let values = [line.planned_qty, line.taken_qty, line.used_qty, line.returned_qty];
        for (field, value) in QUANTITY_FIELDS.iter().zip(values) {
            if value < Decimal::ZERO {
                errors.add(*field, "must be greater than or equal to 0");
            }
        }
        if line.price_unit < Decimal::ZERO {
            errors.add("price_unit", "must be greater than or equal to 0");
        }
    }

    pub fn validate_used(&self, named: &NamedLine<'_>, errors: &mut ValidationErrors) {
        let line = named.line;
        if line.used_qty > line.taken_qty {
            errors.add(
                "used_qty",
                format!(
                    "({}) cannot be greater than the taken quantity ({}) for {}",
                    line.used_qty, line.taken_qty, named.product_name
                ),
            );
        }
    }

    pub fn validate_returned(&self, named: &NamedLine<'_>, errors: &mut ValidationErrors) {
        let line = named.line;
        if line.returned_qty <= Decimal::ZERO {
            return;
        }
        let available = line.taken_qty - line.used_qty;
        if line.returned_qty > available {
            errors.add(
                "returned_qty",
                format!(
                    "({}) cannot be greater than the available quantity ({}) for {}",
                    line.returned_qty, available, named.product_name
                ),
            );
        }
    }
}

impl<'a> Contract<NamedLine<'a>> for MaterialQuantityContract {
    fn validate(&self, entity: &NamedLine<'a>) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_non_negative(entity, &mut errors);
        self.validate_used(entity, &mut errors);
        self.validate_returned(entity, &mut errors);

        errors.into_result()
    }
}
