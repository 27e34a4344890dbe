//! Field service team

use fsm_core::traits::{Id, Named};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Team {
    pub id: Id,
    pub name: String,
    pub member_ids: Vec<Id>,
    /// Vehicle used by the team to carry materials
    pub vehicle_id: Option<Id>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_members(mut self, member_ids: Vec<Id>) -> Self {
        self.member_ids = member_ids;
        self
    }

    pub fn with_vehicle(mut self, vehicle_id: Id) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }
}

impl_entity!(Team, "Team");

impl Named for Team {
    fn display_name(&self) -> &str {
        &self.name
    }
}
