//! Configuration types and loading
//!
//! Names of reference locations, picking types and document labels are data,
//! not code: installations rename them, so they are loaded here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FsmError;
use crate::result::FsmResult;
use crate::types::OperationKind;

/// Prefix for environment overrides (`ESFSM_ISSUE_LABEL`, ...)
pub const ENV_PREFIX: &str = "ESFSM";

/// Stock integration settings
#[derive(Debug, Clone, Deserialize, Serialize, Validate, PartialEq)]
#[serde(default)]
pub struct StockConfig {
    /// Document label for warehouse → technician transfers
    #[validate(length(min = 1))]
    pub issue_label: String,
    /// Document label for technician → customer transfers
    #[validate(length(min = 1))]
    pub consume_label: String,
    /// Document label for technician → warehouse transfers
    #[validate(length(min = 1))]
    pub return_label: String,

    /// Picking type names searched per operation
    #[validate(length(min = 1))]
    pub issue_picking_type: String,
    #[validate(length(min = 1))]
    pub consume_picking_type: String,
    #[validate(length(min = 1))]
    pub return_picking_type: String,

    /// Vehicle locations are named "<prefix> - <plate>"
    #[validate(length(min = 1))]
    pub vehicle_location_prefix: String,
    /// Parent pool of every vehicle location
    #[validate(length(min = 1))]
    pub vehicles_location_name: String,
    /// Pool for technicians without a vehicle
    #[validate(length(min = 1))]
    pub field_technicians_location_name: String,
    #[validate(length(min = 1))]
    pub stock_location_name: String,
    #[validate(length(min = 1))]
    pub customers_location_name: String,

    /// Shown when a job has neither a material responsible nor employees
    #[validate(length(min = 1))]
    pub unknown_technician: String,

    /// Initial quantity on a new add-materials line
    pub default_add_qty: Decimal,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            issue_label: "Реверс".to_string(),
            consume_label: "Испратница".to_string(),
            return_label: "Повратница".to_string(),
            issue_picking_type: "Реверс".to_string(),
            consume_picking_type: "Испратници".to_string(),
            return_picking_type: "Враќање на Реверс".to_string(),
            vehicle_location_prefix: "Возило".to_string(),
            vehicles_location_name: "Возила".to_string(),
            field_technicians_location_name: "Теренски техничари".to_string(),
            stock_location_name: "Stock".to_string(),
            customers_location_name: "Customers".to_string(),
            unknown_technician: "Непознат".to_string(),
            default_add_qty: Decimal::ONE,
        }
    }
}

impl StockConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> FsmResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a configuration file with `ESFSM_*` environment overlay
    pub fn from_file(path: &str) -> FsmResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| FsmError::Config(e.to_string()))?;

        let loaded: StockConfig = settings
            .try_deserialize()
            .map_err(|e| FsmError::Config(e.to_string()))?;
        loaded.checked()
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FsmResult<Self> {
        let mut config = Self::default();
        let var = |name: &str| lookup(&format!("{}_{}", ENV_PREFIX, name));

        let text_fields: [(&str, &mut String); 12] = [
            ("ISSUE_LABEL", &mut config.issue_label),
            ("CONSUME_LABEL", &mut config.consume_label),
            ("RETURN_LABEL", &mut config.return_label),
            ("ISSUE_PICKING_TYPE", &mut config.issue_picking_type),
            ("CONSUME_PICKING_TYPE", &mut config.consume_picking_type),
            ("RETURN_PICKING_TYPE", &mut config.return_picking_type),
            ("VEHICLE_LOCATION_PREFIX", &mut config.vehicle_location_prefix),
            ("VEHICLES_LOCATION_NAME", &mut config.vehicles_location_name),
            (
                "FIELD_TECHNICIANS_LOCATION_NAME",
                &mut config.field_technicians_location_name,
            ),
            ("STOCK_LOCATION_NAME", &mut config.stock_location_name),
            ("CUSTOMERS_LOCATION_NAME", &mut config.customers_location_name),
            ("UNKNOWN_TECHNICIAN", &mut config.unknown_technician),
        ];
        for (name, slot) in text_fields {
            if let Some(value) = var(name) {
                *slot = value;
            }
        }

        if let Some(qty) = var("DEFAULT_ADD_QTY") {
            config.default_add_qty = qty.parse().map_err(|_| {
                FsmError::Config(format!("{}_DEFAULT_ADD_QTY is not a number: {}", ENV_PREFIX, qty))
            })?;
        }

        config.checked()
    }

    fn checked(self) -> FsmResult<Self> {
        self.validate()
            .map_err(|e| FsmError::Config(e.to_string()))?;
        if self.default_add_qty <= Decimal::ZERO {
            return Err(FsmError::Config(
                "default_add_qty must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    /// Document label printed in picking origins and job notes
    pub fn label(&self, operation: OperationKind) -> &str {
        match operation {
            OperationKind::Issue => &self.issue_label,
            OperationKind::Consume => &self.consume_label,
            OperationKind::Return => &self.return_label,
        }
    }

    pub fn picking_type_name(&self, operation: OperationKind) -> &str {
        match operation {
            OperationKind::Issue => &self.issue_picking_type,
            OperationKind::Consume => &self.consume_picking_type,
            OperationKind::Return => &self.return_picking_type,
        }
    }

    pub fn vehicle_location_name(&self, identifier: &str) -> String {
        format!("{} - {}", self.vehicle_location_prefix, identifier)
    }
}
