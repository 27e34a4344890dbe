//! Field service job (work order)

use fsm_core::traits::{Id, Named};
use serde::{Deserialize, Serialize};

/// Job stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    #[default]
    Draft,
    InProgress,
    Done,
    Cancelled,
}

impl JobStage {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Job {
    pub id: Id,
    /// Reference, e.g. "JOB-2025-0042"
    pub name: String,
    pub company_id: Id,
    /// Customer the materials are delivered to
    pub partner_id: Option<Id>,
    pub team_id: Option<Id>,
    /// Assigned employees, first one leads
    pub employee_ids: Vec<Id>,
    /// Employee accountable for materials issued to the job
    pub material_responsible_id: Option<Id>,
    pub stage: JobStage,
}

impl Job {
    pub fn new(name: impl Into<String>, company_id: Id) -> Self {
        Self {
            name: name.into(),
            company_id,
            ..Default::default()
        }
    }

    pub fn with_partner(mut self, partner_id: Id) -> Self {
        self.partner_id = Some(partner_id);
        self
    }

    pub fn with_team(mut self, team_id: Id) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_employees(mut self, employee_ids: Vec<Id>) -> Self {
        self.employee_ids = employee_ids;
        self
    }

    pub fn with_material_responsible(mut self, employee_id: Id) -> Self {
        self.material_responsible_id = Some(employee_id);
        self
    }

    pub fn first_employee_id(&self) -> Option<Id> {
        self.employee_ids.first().copied()
    }
}

impl_entity!(Job, "Job");

impl Named for Job {
    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_employee() {
        let job = Job::new("JOB-1", 1).with_employees(vec![7, 3]);
        assert_eq!(job.first_employee_id(), Some(7));
        assert_eq!(Job::new("JOB-2", 1).first_employee_id(), None);
    }

    #[test]
    fn test_closed_stages() {
        assert!(!JobStage::Draft.is_closed());
        assert!(!JobStage::InProgress.is_closed());
        assert!(JobStage::Done.is_closed());
        assert!(JobStage::Cancelled.is_closed());
    }
}
