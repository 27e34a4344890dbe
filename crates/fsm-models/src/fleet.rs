//! Fleet vehicle with its dedicated stock location

use fsm_core::traits::{Id, Named};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Vehicle {
    pub id: Id,
    pub name: String,
    pub license_plate: Option<String>,
    pub company_id: Option<Id>,
    /// Provisioned on creation, never edited by hand
    pub stock_location_id: Option<Id>,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, license_plate: Option<String>) -> Self {
        Self {
            name: name.into(),
            license_plate,
            ..Default::default()
        }
    }

    pub fn with_company(mut self, company_id: Id) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Plate when set and not blank, otherwise the vehicle name
    pub fn location_identifier(&self) -> &str {
        match self.license_plate.as_deref() {
            Some(plate) if !plate.trim().is_empty() => plate,
            _ => &self.name,
        }
    }
}

impl_entity!(Vehicle, "Vehicle");

impl Named for Vehicle {
    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_prefers_plate() {
        let vehicle = Vehicle::new("Caddy", Some("SR-1234-AB".into()));
        assert_eq!(vehicle.location_identifier(), "SR-1234-AB");
    }

    #[test]
    fn test_identifier_falls_back_to_name() {
        assert_eq!(Vehicle::new("Caddy", None).location_identifier(), "Caddy");
        assert_eq!(Vehicle::new("Caddy", Some("  ".into())).location_identifier(), "Caddy");
    }
}
