use fsm_core::traits::{Id, Named};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Employee {
    pub id: Id,
    pub name: String,
    /// Personal vehicle for field work
    pub vehicle_id: Option<Id>,
}

impl Employee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_vehicle(mut self, vehicle_id: Id) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }
}

impl_entity!(Employee, "Employee");

impl Named for Employee {
    fn display_name(&self) -> &str {
        &self.name
    }
}
