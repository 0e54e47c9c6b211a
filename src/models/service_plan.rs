use super::error::AppError;
use super::form::FieldErrors;
use serde::{Deserialize, Serialize};

/// How a service plan charges the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingUnit {
    #[default]
    PerKwh,
    PerMinute,
    PerSession,
}

impl BillingUnit {
    pub fn code(&self) -> &'static str {
        match self {
            BillingUnit::PerKwh => "per_kwh",
            BillingUnit::PerMinute => "per_minute",
            BillingUnit::PerSession => "per_session",
        }
    }

    /// Suffix appended to prices, e.g. "3500 / kWh"
    pub fn suffix(&self) -> &'static str {
        match self {
            BillingUnit::PerKwh => "/ kWh",
            BillingUnit::PerMinute => "/ min",
            BillingUnit::PerSession => "/ session",
        }
    }

    pub fn all() -> &'static [BillingUnit] {
        &[
            BillingUnit::PerKwh,
            BillingUnit::PerMinute,
            BillingUnit::PerSession,
        ]
    }
}

impl std::str::FromStr for BillingUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BillingUnit::all()
            .iter()
            .find(|unit| unit.code() == s)
            .copied()
            .ok_or_else(|| AppError::DataError(format!("Unknown billing unit: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_per_unit: f64,
    #[serde(default)]
    pub billing_unit: BillingUnit,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Body sent when creating or updating a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub name: String,
    pub description: String,
    pub price_per_unit: f64,
    pub billing_unit: BillingUnit,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlanField {
    Name,
    Description,
    PricePerUnit,
    BillingUnit,
}

/// Editable copy of a plan. `id` is `None` until the plan has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price_per_unit: String,
    pub billing_unit: BillingUnit,
    pub active: bool,
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price_per_unit: String::new(),
            billing_unit: BillingUnit::default(),
            active: true,
        }
    }
}

impl From<&ServicePlan> for PlanDraft {
    fn from(plan: &ServicePlan) -> Self {
        Self {
            id: Some(plan.id.clone()),
            name: plan.name.clone(),
            description: plan.description.clone(),
            price_per_unit: plan.price_per_unit.to_string(),
            billing_unit: plan.billing_unit,
            active: plan.active,
        }
    }
}

impl PlanDraft {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn validate(&self) -> FieldErrors<PlanField> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(PlanField::Name, "Plan name is required");
        }
        match self.price_per_unit.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => {}
            Ok(_) => errors.insert(PlanField::PricePerUnit, "Price cannot be negative"),
            Err(_) => errors.insert(PlanField::PricePerUnit, "Price must be a number"),
        }
        errors
    }

    /// Validates and converts the draft into the request body.
    pub fn to_payload(&self) -> Result<PlanPayload, FieldErrors<PlanField>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PlanPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price_per_unit: self.price_per_unit.trim().parse().unwrap_or(0.0),
            billing_unit: self.billing_unit,
            active: self.active,
        })
    }
}

/// Replaces the plan with the same id, or appends it when new.
pub fn upsert_plan(plans: &mut Vec<ServicePlan>, plan: ServicePlan) {
    match plans.iter_mut().find(|p| p.id == plan.id) {
        Some(existing) => *existing = plan,
        None => plans.push(plan),
    }
}
