//! Wizard batch contract
//!
//! A wizard stages one quantity per product. On confirm the batch must not be
//! empty, no quantity may be negative and none may exceed the ceiling of the
//! operation (stock on hand for take, what is left on the line for consume
//! and return). Adding materials has no ceiling but every line must be
//! strictly positive.

use fsm_core::error::ValidationErrors;
use fsm_core::types::Quantity;
use rust_decimal::Decimal;

use crate::base::{Contract, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Add,
    Take,
    Consume,
    Return,
}

impl BatchOperation {
    fn verb(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Take => "take",
            Self::Consume => "consume",
            Self::Return => "return",
        }
    }

    fn ceiling_label(&self) -> &'static str {
        match self {
            Self::Take => "stock on hand",
            Self::Add | Self::Consume | Self::Return => "available quantity",
        }
    }

    /// Zero-quantity lines are dropped instead of rejected
    pub fn skips_zero_lines(&self) -> bool {
        !matches!(self, Self::Add)
    }
}

/// One staged line of a wizard
#[derive(Debug, Clone, Copy)]
pub struct BatchLine<'a> {
    pub product_name: &'a str,
    pub qty: Quantity,
    pub ceiling: Option<Quantity>,
}

impl<'a> BatchLine<'a> {
    pub fn new(product_name: &'a str, qty: Quantity) -> Self {
        Self {
            product_name,
            qty,
            ceiling: None,
        }
    }

    pub fn capped_at(mut self, ceiling: Quantity) -> Self {
        self.ceiling = Some(ceiling);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchContract {
    operation: BatchOperation,
}

impl BatchContract {
    pub fn new(operation: BatchOperation) -> Self {
        Self { operation }
    }

    pub fn operation(&self) -> BatchOperation {
        self.operation
    }

    fn validate_line(&self, line: &BatchLine<'_>, errors: &mut ValidationErrors) {
        if line.qty < Decimal::ZERO {
            errors.add(line.product_name, "quantity cannot be negative");
            return;
        }
        if self.operation == BatchOperation::Add && line.qty <= Decimal::ZERO {
            errors.add(line.product_name, "quantity must be greater than 0");
            return;
        }
        if let Some(ceiling) = line.ceiling {
            if line.qty > ceiling {
                errors.add(
                    line.product_name,
                    format!(
                        "quantity to {} ({}) cannot be greater than the {} ({})",
                        self.operation.verb(),
                        line.qty,
                        self.operation.ceiling_label(),
                        ceiling
                    ),
                );
            }
        }
    }
}

impl<'a> Contract<[BatchLine<'a>]> for BatchContract {
    fn validate(&self, lines: &[BatchLine<'a>]) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        for line in lines {
            self.validate_line(line, &mut errors);
        }

        let has_quantity = lines.iter().any(|l| l.qty > Decimal::ZERO);
        let empty = if self.operation.skips_zero_lines() {
            !has_quantity
        } else {
            lines.is_empty()
        };
        if empty {
            errors.add_base(format!("No materials to {}.", self.operation.verb()));
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_batch_rejected() {
        for operation in [
            BatchOperation::Add,
            BatchOperation::Take,
            BatchOperation::Consume,
            BatchOperation::Return,
        ] {
            let errors = BatchContract::new(operation).validate(&[][..]).unwrap_err();
            assert_eq!(errors.base_errors.len(), 1, "{:?}", operation);
        }
    }

    #[test]
    fn test_all_zero_lines_count_as_empty() {
        let lines = [BatchLine::new("Cable", dec!(0)).capped_at(dec!(4))];
        let errors = BatchContract::new(BatchOperation::Return)
            .validate(&lines[..])
            .unwrap_err();
        assert_eq!(errors.base_errors, vec!["No materials to return.".to_string()]);
    }

    #[test]
    fn test_zero_line_is_skipped_next_to_real_line() {
        let lines = [
            BatchLine::new("Cable", dec!(0)).capped_at(dec!(4)),
            BatchLine::new("Clamp", dec!(2)).capped_at(dec!(4)),
        ];
        assert!(BatchContract::new(BatchOperation::Consume).validate(&lines[..]).is_ok());
    }

    #[test]
    fn test_add_requires_positive_lines() {
        let lines = [BatchLine::new("Cable", dec!(0))];
        let errors = BatchContract::new(BatchOperation::Add)
            .validate(&lines[..])
            .unwrap_err();
        assert!(errors.has_error("Cable"));
    }

    #[test]
    fn test_ceiling_enforced() {
        let lines = [BatchLine::new("Cable", dec!(5)).capped_at(dec!(4))];
        let errors = BatchContract::new(BatchOperation::Return)
            .validate(&lines[..])
            .unwrap_err();
        assert!(errors.get("Cable").unwrap()[0].contains("(4)"));

        let lines = [BatchLine::new("Cable", dec!(4)).capped_at(dec!(4))];
        assert!(BatchContract::new(BatchOperation::Return).validate(&lines[..]).is_ok());
    }

    #[test]
    fn test_negative_rejected() {
        let lines = [
            BatchLine::new("Cable", dec!(-1)).capped_at(dec!(4)),
            BatchLine::new("Clamp", dec!(1)).capped_at(dec!(4)),
        ];
        let errors = BatchContract::new(BatchOperation::Take)
            .validate(&lines[..])
            .unwrap_err();
        assert!(errors.has_error("Cable"));
        assert!(errors.base_errors.is_empty());
    }
}
