//! Job completion gate
//!
//! A job cannot be marked done while material is still out with the
//! technician: every line must be fully used or returned first.

use fsm_core::error::ValidationErrors;
use fsm_models::{Job, JobStage};
use rust_decimal::Decimal;

use crate::base::{Contract, NamedLine, ValidationResult};

pub struct JobCompletionContract<'a> {
    job: &'a Job,
}

impl<'a> JobCompletionContract<'a> {
    pub fn new(job: &'a Job) -> Self {
        Self { job }
    }

    fn validate_stage(&self, errors: &mut ValidationErrors) {
        match self.job.stage {
            JobStage::Done => {
                errors.add_base(format!("Job {} is already done.", self.job.name));
            }
            JobStage::Cancelled => {
                errors.add_base(format!(
                    "Job {} is cancelled and cannot be completed.",
                    self.job.name
                ));
            }
            JobStage::Draft | JobStage::InProgress => {}
        }
    }

    fn validate_outstanding(&self, lines: &[NamedLine<'_>], errors: &mut ValidationErrors) {
        let outstanding: Vec<String> = lines
            .iter()
            .filter(|named| named.line.available_to_return_qty() > Decimal::ZERO)
            .map(|named| {
                format!(
                    "{}: {}",
                    named.product_name,
                    named.line.available_to_return_qty()
                )
            })
            .collect();

        if !outstanding.is_empty() {
            errors.add_base(format!(
                "Job {} still has materials to return or consume: {}. \
                 Return or consume them before completing the job.",
                self.job.name,
                outstanding.join(", ")
            ));
        }
    }
}

impl<'a, 'l> Contract<[NamedLine<'l>]> for JobCompletionContract<'a> {
    fn validate(&self, lines: &[NamedLine<'l>]) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_stage(&mut errors);
        self.validate_outstanding(lines, &mut errors);

        errors.into_result()
    }
}
