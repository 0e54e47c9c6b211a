//! Station creation wizard.
//!
//! The wizard is a finite state machine over [`WizardStep`] plus a
//! [`WizardStatus`]. Every transition is a plain method on
//! [`StationWizard`], so the whole flow runs without a renderer; the Yew
//! hook in `hooks::use_station_wizard` only forwards events into it.

use std::cell::RefCell;
use std::collections::BTreeSet;

use super::error::AppError;
use super::form::{FieldErrors, parse_amount, parse_count};
use super::station::{Amenity, CUSTOM_HOURS, StationCreationRequest, StationStatus};
use crate::config::StationDefaults;

/// Shown to the operator whenever the creation endpoint fails.
pub const SUBMISSION_FAILED_NOTICE: &str =
    "Could not create the station. Your details are kept, please try again.";

/// Every input owned by the creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StationField {
    Name,
    Description,
    Address,
    TotalPorts,
    FastChargePorts,
    StandardPorts,
    PricePerUnit,
    OperatingHours,
    Status,
    Amenities,
    ContactPhone,
    ContactEmail,
    ManagerName,
}

impl StationField {
    /// Stable identifier used for DOM ids and error lookups
    pub fn key(&self) -> &'static str {
        match self {
            StationField::Name => "name",
            StationField::Description => "description",
            StationField::Address => "address",
            StationField::TotalPorts => "totalPorts",
            StationField::FastChargePorts => "fastChargePorts",
            StationField::StandardPorts => "standardPorts",
            StationField::PricePerUnit => "pricePerUnit",
            StationField::OperatingHours => "operatingHours",
            StationField::Status => "status",
            StationField::Amenities => "amenities",
            StationField::ContactPhone => "contactPhone",
            StationField::ContactEmail => "contactEmail",
            StationField::ManagerName => "managerName",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StationField::Name => "Station name",
            StationField::Description => "Description",
            StationField::Address => "Address",
            StationField::TotalPorts => "Total ports",
            StationField::FastChargePorts => "Fast-charge ports",
            StationField::StandardPorts => "Standard ports",
            StationField::PricePerUnit => "Price per kWh",
            StationField::OperatingHours => "Operating hours",
            StationField::Status => "Status",
            StationField::Amenities => "Amenities",
            StationField::ContactPhone => "Contact phone",
            StationField::ContactEmail => "Contact email",
            StationField::ManagerName => "Manager name",
        }
    }
}

/// A new value for one [`StationField`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Status(StationStatus),
    Amenities(BTreeSet<Amenity>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<StationStatus> for FieldValue {
    fn from(value: StationStatus) -> Self {
        FieldValue::Status(value)
    }
}

impl From<BTreeSet<Amenity>> for FieldValue {
    fn from(value: BTreeSet<Amenity>) -> Self {
        FieldValue::Amenities(value)
    }
}

/// Everything the operator has typed so far.
///
/// Numeric inputs are kept as entered and only coerced when validated or
/// serialized, so a half-typed value never gets rewritten under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub name: String,
    pub description: String,
    pub address: String,
    pub total_ports: String,
    pub fast_charge_ports: String,
    pub standard_ports: String,
    pub price_per_unit: String,
    pub operating_hours: String,
    pub status: StationStatus,
    pub amenities: BTreeSet<Amenity>,
    pub contact_phone: String,
    pub contact_email: String,
    pub manager_name: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            address: String::new(),
            total_ports: String::new(),
            fast_charge_ports: String::new(),
            standard_ports: String::new(),
            price_per_unit: String::new(),
            operating_hours: "24/7".to_string(),
            status: StationStatus::default(),
            amenities: BTreeSet::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
            manager_name: String::new(),
        }
    }
}

impl FormState {
    /// Current value of a text field; `None` for the status and amenity fields.
    pub fn text(&self, field: StationField) -> Option<&str> {
        let value = match field {
            StationField::Name => &self.name,
            StationField::Description => &self.description,
            StationField::Address => &self.address,
            StationField::TotalPorts => &self.total_ports,
            StationField::FastChargePorts => &self.fast_charge_ports,
            StationField::StandardPorts => &self.standard_ports,
            StationField::PricePerUnit => &self.price_per_unit,
            StationField::OperatingHours => &self.operating_hours,
            StationField::ContactPhone => &self.contact_phone,
            StationField::ContactEmail => &self.contact_email,
            StationField::ManagerName => &self.manager_name,
            StationField::Status | StationField::Amenities => return None,
        };
        Some(value)
    }

    /// Writes `value` into `field`.
    ///
    /// Text aimed at the status field is parsed and ignored when it names no
    /// status; text aimed at the amenities field is read as comma separated
    /// catalog codes. Picking the custom hours preset empties the hours so
    /// the operator types their own.
    pub fn set(&mut self, field: StationField, value: FieldValue) {
        match (field, value) {
            (StationField::Status, FieldValue::Status(status)) => self.status = status,
            (StationField::Status, FieldValue::Text(text)) => {
                if let Ok(status) = text.parse() {
                    self.status = status;
                }
            }
            (StationField::Amenities, FieldValue::Amenities(amenities)) => {
                self.amenities = amenities;
            }
            (StationField::OperatingHours, FieldValue::Text(text)) if text == CUSTOM_HOURS => {
                self.operating_hours.clear();
            }
            (StationField::Amenities, FieldValue::Text(text)) => {
                self.amenities = text
                    .split(',')
                    .filter_map(|code| code.trim().parse().ok())
                    .collect();
            }
            (field, FieldValue::Text(text)) => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = text;
                }
            }
            (field, FieldValue::Status(status)) => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = status.code().to_string();
                }
            }
            (field, FieldValue::Amenities(amenities)) => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = amenities
                        .iter()
                        .map(Amenity::code)
                        .collect::<Vec<_>>()
                        .join(",");
                }
            }
        }
    }

    fn text_slot(&mut self, field: StationField) -> Option<&mut String> {
        let slot = match field {
            StationField::Name => &mut self.name,
            StationField::Description => &mut self.description,
            StationField::Address => &mut self.address,
            StationField::TotalPorts => &mut self.total_ports,
            StationField::FastChargePorts => &mut self.fast_charge_ports,
            StationField::StandardPorts => &mut self.standard_ports,
            StationField::PricePerUnit => &mut self.price_per_unit,
            StationField::OperatingHours => &mut self.operating_hours,
            StationField::ContactPhone => &mut self.contact_phone,
            StationField::ContactEmail => &mut self.contact_email,
            StationField::ManagerName => &mut self.manager_name,
            StationField::Status | StationField::Amenities => return None,
        };
        Some(slot)
    }
}

/// Ordered steps of the creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    BasicInfo,
    ChargingConfig,
    AmenitiesContact,
    Confirmation,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::BasicInfo,
            WizardStep::ChargingConfig,
            WizardStep::AmenitiesContact,
            WizardStep::Confirmation,
        ]
    }

    pub fn first() -> Self {
        WizardStep::BasicInfo
    }

    pub fn last() -> Self {
        WizardStep::Confirmation
    }

    /// Zero-based position in [`WizardStep::all`]
    pub fn index(&self) -> usize {
        match self {
            WizardStep::BasicInfo => 0,
            WizardStep::ChargingConfig => 1,
            WizardStep::AmenitiesContact => 2,
            WizardStep::Confirmation => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic information",
            WizardStep::ChargingConfig => "Charging configuration",
            WizardStep::AmenitiesContact => "Amenities & contact",
            WizardStep::Confirmation => "Confirmation",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Fields whose inputs are rendered on this step
    pub fn fields(&self) -> &'static [StationField] {
        match self {
            WizardStep::BasicInfo => &[
                StationField::Name,
                StationField::Description,
                StationField::Address,
            ],
            WizardStep::ChargingConfig => &[
                StationField::TotalPorts,
                StationField::FastChargePorts,
                StationField::StandardPorts,
                StationField::PricePerUnit,
                StationField::OperatingHours,
                StationField::Status,
            ],
            WizardStep::AmenitiesContact => &[
                StationField::Amenities,
                StationField::ContactPhone,
                StationField::ContactEmail,
                StationField::ManagerName,
            ],
            WizardStep::Confirmation => &[],
        }
    }

    /// Checks the rules owned by this step. An empty map means the step is valid.
    ///
    /// The confirmation step owns no inputs and acts as the final gate, so it
    /// re-checks every earlier step.
    pub fn validate(&self, form: &FormState) -> FieldErrors<StationField> {
        match self {
            WizardStep::BasicInfo => validate_basic_info(form),
            WizardStep::ChargingConfig => validate_charging_config(form),
            WizardStep::AmenitiesContact => FieldErrors::new(),
            WizardStep::Confirmation => {
                let mut errors = validate_basic_info(form);
                errors.merge(validate_charging_config(form));
                errors.merge(validate_schedule(form));
                errors
            }
        }
    }
}

fn validate_basic_info(form: &FormState) -> FieldErrors<StationField> {
    let mut errors = FieldErrors::new();
    if form.name.trim().is_empty() {
        errors.insert(StationField::Name, "Station name is required");
    }
    if form.address.trim().is_empty() {
        errors.insert(StationField::Address, "Address is required");
    }
    errors
}

fn validate_charging_config(form: &FormState) -> FieldErrors<StationField> {
    let mut errors = FieldErrors::new();
    let total = parse_count(&form.total_ports);
    let fast = parse_count(&form.fast_charge_ports);
    let standard = parse_count(&form.standard_ports);

    if fast < 0 {
        errors.insert(
            StationField::FastChargePorts,
            "Fast-charge ports cannot be negative",
        );
    }
    if standard < 0 {
        errors.insert(
            StationField::StandardPorts,
            "Standard ports cannot be negative",
        );
    }

    if total < 1 {
        errors.insert(
            StationField::TotalPorts,
            "A station needs at least one charging port",
        );
    } else if fast.saturating_add(standard) > total {
        errors.insert(
            StationField::TotalPorts,
            format!(
                "Fast-charge ({fast}) and standard ({standard}) ports exceed the total of {total}"
            ),
        );
    }

    if parse_amount(&form.price_per_unit) < 0.0 {
        errors.insert(StationField::PricePerUnit, "Price cannot be negative");
    }
    errors
}

// Only enforced by the final gate, so the charging step accepts any port
// layout that adds up.
fn validate_schedule(form: &FormState) -> FieldErrors<StationField> {
    let mut errors = FieldErrors::new();
    if form.operating_hours.trim().is_empty() {
        errors.insert(StationField::OperatingHours, "Enter the custom operating hours");
    }
    errors
}

/// Converts validated form input into the creation payload.
///
/// Numbers that fail to parse become `0`. Power ratings are only reported
/// for port kinds the station actually has.
pub fn build_request(form: &FormState, defaults: &StationDefaults) -> StationCreationRequest {
    let count = |input: &str| u32::try_from(parse_count(input)).unwrap_or(0);
    let fast_charge_ports = count(&form.fast_charge_ports);
    let standard_ports = count(&form.standard_ports);

    StationCreationRequest {
        station_name: form.name.trim().to_string(),
        address: form.address.trim().to_string(),
        city: defaults.city.clone(),
        latitude: defaults.latitude,
        longitude: defaults.longitude,
        operating_hours: form.operating_hours.trim().to_string(),
        amenities: form
            .amenities
            .iter()
            .map(|a| a.code().to_string())
            .collect(),
        image_url: None,
        status: form.status,
        total_ports: count(&form.total_ports),
        fast_charge_ports,
        standard_ports,
        price_per_unit: parse_amount(&form.price_per_unit),
        fast_charge_power_rating: (fast_charge_ports > 0).then_some(defaults.fast_charge_power_kw),
        standard_charge_power_rating: (standard_ports > 0)
            .then_some(defaults.standard_charge_power_kw),
    }
}

/// Lifecycle of a wizard instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStatus {
    /// Accepting edits and navigation
    Editing,
    /// A creation call is in flight
    Submitting,
    /// The station was created and the form discarded
    Completed,
    /// The operator left the wizard and the form was discarded
    Cancelled,
}

/// Why a submission did not reach the creation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    AlreadySubmitting,
    NotOnFinalStep,
    Invalid,
    Finished,
}

/// A failed creation call, split into what the operator sees and what gets logged
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFailure {
    pub notice: String,
    pub detail: String,
}

impl SubmissionFailure {
    pub fn from_error(error: &AppError) -> Self {
        let notice = match error {
            AppError::Rejected { message, .. } if !message.trim().is_empty() => {
                format!("{SUBMISSION_FAILED_NOTICE} ({})", message.trim())
            }
            _ => SUBMISSION_FAILED_NOTICE.to_string(),
        };

        Self {
            notice,
            detail: error.to_string(),
        }
    }
}

/// Result of driving a submission to completion
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the station and returned its identifier
    Created(String),
    Failed(SubmissionFailure),
    Blocked(SubmitBlocked),
}

/// State machine behind the station creation wizard
#[derive(Debug, Clone, PartialEq)]
pub struct StationWizard {
    step: WizardStep,
    form: FormState,
    errors: FieldErrors<StationField>,
    status: WizardStatus,
    failure: Option<SubmissionFailure>,
}

impl Default for StationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl StationWizard {
    pub fn new() -> Self {
        Self::with_form(FormState::default())
    }

    /// Starts on the first step with pre-filled input.
    pub fn with_form(form: FormState) -> Self {
        Self {
            step: WizardStep::first(),
            form,
            errors: FieldErrors::new(),
            status: WizardStatus::Editing,
            failure: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors<StationField> {
        &self.errors
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == WizardStatus::Submitting
    }

    pub fn is_editable(&self) -> bool {
        self.status == WizardStatus::Editing
    }

    /// Notice from the most recent failed submission, cleared on the next attempt
    pub fn failure(&self) -> Option<&SubmissionFailure> {
        self.failure.as_ref()
    }

    /// Updates one field and drops any error recorded for it.
    ///
    /// Does not re-validate. Ignored unless the wizard is editing, so the
    /// payload of an in-flight submission always matches the form.
    pub fn set_field(&mut self, field: StationField, value: impl Into<FieldValue>) {
        if !self.is_editable() {
            return;
        }
        self.form.set(field, value.into());
        self.errors.clear(field);
    }

    /// Adds the amenity if missing, removes it otherwise.
    pub fn toggle_amenity(&mut self, amenity: Amenity) {
        let mut amenities = self.form.amenities.clone();
        if !amenities.remove(&amenity) {
            amenities.insert(amenity);
        }
        self.set_field(StationField::Amenities, amenities);
    }

    /// Validates the current step and moves forward when it passes.
    ///
    /// On failure the error map is replaced and the step is unchanged. A
    /// no-op on the last step. Returns whether the step changed.
    pub fn advance(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        let Some(next) = self.step.next() else {
            return false;
        };

        let errors = self.step.validate(&self.form);
        if errors.is_empty() {
            self.errors.clear_all(self.step.fields());
            self.step = next;
            true
        } else {
            self.errors = errors;
            false
        }
    }

    /// Moves back one step without touching input or errors.
    pub fn retreat(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Runs the final gate and, when it passes, locks the wizard and
    /// returns the payload to send.
    pub fn begin_submission(
        &mut self,
        defaults: &StationDefaults,
    ) -> Result<StationCreationRequest, SubmitBlocked> {
        match self.status {
            WizardStatus::Submitting => return Err(SubmitBlocked::AlreadySubmitting),
            WizardStatus::Completed | WizardStatus::Cancelled => {
                return Err(SubmitBlocked::Finished);
            }
            WizardStatus::Editing => {}
        }
        if self.step != WizardStep::last() {
            return Err(SubmitBlocked::NotOnFinalStep);
        }

        let errors = self.step.validate(&self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return Err(SubmitBlocked::Invalid);
        }

        self.status = WizardStatus::Submitting;
        self.failure = None;
        Ok(build_request(&self.form, defaults))
    }

    /// Records how the creation call settled.
    ///
    /// Success discards the form. Failure returns to editing on the same
    /// step with every value kept.
    pub fn complete_submission(&mut self, result: Result<String, AppError>) -> SubmitOutcome {
        if !self.is_submitting() {
            return SubmitOutcome::Blocked(SubmitBlocked::Finished);
        }

        match result {
            Ok(id) => {
                self.status = WizardStatus::Completed;
                self.form = FormState::default();
                self.errors = FieldErrors::new();
                SubmitOutcome::Created(id)
            }
            Err(e) => {
                let failure = SubmissionFailure::from_error(&e);
                self.status = WizardStatus::Editing;
                self.failure = Some(failure.clone());
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// Abandons the wizard and discards everything entered.
    pub fn cancel(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.status = WizardStatus::Cancelled;
        self.form = FormState::default();
        self.errors = FieldErrors::new();
        self.failure = None;
    }
}

/// Anything able to persist a new station
#[allow(async_fn_in_trait)]
pub trait StationCreator {
    /// Creates the station and returns its identifier.
    async fn create_station(&self, request: &StationCreationRequest) -> Result<String, AppError>;
}

/// Drives one submission from the final gate to the settled outcome.
///
/// The wizard is only borrowed around the synchronous transitions, so a
/// second call made while the first is awaiting the endpoint sees the
/// submitting state and returns without issuing another request.
pub async fn submit_station<C: StationCreator>(
    wizard: &RefCell<StationWizard>,
    creator: &C,
    defaults: &StationDefaults,
) -> SubmitOutcome {
    let request = match wizard.borrow_mut().begin_submission(defaults) {
        Ok(request) => request,
        Err(blocked) => return SubmitOutcome::Blocked(blocked),
    };

    deliver_submission(wizard, creator, request).await
}

/// Sends a payload obtained from [`StationWizard::begin_submission`] and
/// records how the call settled.
pub async fn deliver_submission<C: StationCreator>(
    wizard: &RefCell<StationWizard>,
    creator: &C,
    request: StationCreationRequest,
) -> SubmitOutcome {
    let result = creator.create_station(&request).await;
    wizard.borrow_mut().complete_submission(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::cell::Cell;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    fn charging_form(total: &str, fast: &str, standard: &str, price: &str) -> FormState {
        FormState {
            name: "Green Mall Hub".to_string(),
            address: "123 Main St".to_string(),
            total_ports: total.to_string(),
            fast_charge_ports: fast.to_string(),
            standard_ports: standard.to_string(),
            price_per_unit: price.to_string(),
            ..FormState::default()
        }
    }

    fn wizard_on_confirmation() -> StationWizard {
        let mut wizard = StationWizard::with_form(charging_form("4", "2", "2", "3500"));
        while wizard.advance() {}
        assert_eq!(wizard.step(), WizardStep::Confirmation);
        wizard
    }

    // ===== Step validation =====

    #[test]
    fn basic_info_requires_trimmed_name_and_address() {
        let form = FormState {
            name: "   ".to_string(),
            ..FormState::default()
        };
        let errors = WizardStep::BasicInfo.validate(&form);

        assert!(errors.contains(StationField::Name));
        assert!(errors.contains(StationField::Address));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn ports_exceeding_total_are_reported_on_total_ports() {
        let form = charging_form("4", "3", "2", "3500");
        let errors = WizardStep::ChargingConfig.validate(&form);

        assert!(!errors.is_empty());
        assert!(errors.get(StationField::TotalPorts).unwrap().contains("exceed"));
        assert!(!errors.contains(StationField::FastChargePorts));
        assert!(!errors.contains(StationField::StandardPorts));
    }

    #[test]
    fn zero_total_ports_is_rejected() {
        let errors = WizardStep::ChargingConfig.validate(&charging_form("0", "0", "0", "1"));
        assert_eq!(
            errors.get(StationField::TotalPorts),
            Some("A station needs at least one charging port")
        );
    }

    #[test]
    fn negative_values_are_rejected() {
        let errors = WizardStep::ChargingConfig.validate(&charging_form("4", "-1", "-2", "-0.5"));

        assert!(errors.contains(StationField::FastChargePorts));
        assert!(errors.contains(StationField::StandardPorts));
        assert!(errors.contains(StationField::PricePerUnit));
        assert!(!errors.contains(StationField::TotalPorts));
    }

    #[test]
    fn unparseable_total_counts_as_zero() {
        let errors = WizardStep::ChargingConfig.validate(&charging_form("four", "", "", ""));
        assert!(errors.contains(StationField::TotalPorts));
    }

    #[test]
    fn amenities_step_has_no_required_fields() {
        assert!(
            WizardStep::AmenitiesContact
                .validate(&FormState::default())
                .is_empty()
        );
    }

    #[test]
    fn confirmation_rechecks_earlier_steps() {
        let errors = WizardStep::Confirmation.validate(&FormState::default());
        assert!(errors.contains(StationField::Name));
        assert!(errors.contains(StationField::TotalPorts));
    }

    #[quickcheck]
    fn consistent_port_split_is_always_valid(total: u8, fast: u8, standard: u8, price: u32) -> bool {
        let total = u16::from(total) + 1;
        let fast = u16::from(fast) % (total + 1);
        let standard = u16::from(standard) % (total - fast + 1);
        let form = charging_form(
            &total.to_string(),
            &fast.to_string(),
            &standard.to_string(),
            &price.to_string(),
        );
        WizardStep::ChargingConfig.validate(&form).is_empty()
    }

    // ===== Field updates =====

    #[test]
    fn set_field_clears_only_that_error_without_revalidating() {
        let mut wizard = StationWizard::new();
        assert!(!wizard.advance());
        assert!(wizard.errors().contains(StationField::Name));

        wizard.set_field(StationField::Name, "X");
        wizard.set_field(StationField::Name, "");

        assert!(!wizard.errors().contains(StationField::Name));
        assert!(wizard.errors().contains(StationField::Address));
    }

    #[test]
    fn set_field_parses_status_text() {
        let mut wizard = StationWizard::new();
        wizard.set_field(StationField::Status, "offline");
        assert_eq!(wizard.form().status, StationStatus::Offline);

        wizard.set_field(StationField::Status, "unknown");
        assert_eq!(wizard.form().status, StationStatus::Offline);
    }

    #[test]
    fn toggle_amenity_adds_then_removes() {
        let mut wizard = StationWizard::new();
        wizard.toggle_amenity(Amenity::Cafe);
        wizard.toggle_amenity(Amenity::Wifi);
        assert_eq!(wizard.form().amenities.len(), 2);

        wizard.toggle_amenity(Amenity::Cafe);
        assert!(wizard.form().amenities.contains(&Amenity::Wifi));
        assert!(!wizard.form().amenities.contains(&Amenity::Cafe));
    }

    // ===== Navigation =====

    #[test]
    fn advance_blocks_then_proceeds_once_fixed() {
        let mut wizard = StationWizard::with_form(FormState {
            status: StationStatus::Active,
            ..charging_form("4", "2", "2", "3500")
        });
        wizard.set_field(StationField::Name, "");
        wizard.set_field(StationField::Address, "");

        assert!(!wizard.advance());
        assert_eq!(wizard.step(), WizardStep::BasicInfo);
        assert!(!wizard.errors().get(StationField::Name).unwrap().is_empty());
        assert!(!wizard.errors().get(StationField::Address).unwrap().is_empty());
        assert_eq!(wizard.errors().len(), 2);

        wizard.set_field(StationField::Name, "Green Mall Hub");
        wizard.set_field(StationField::Address, "123 Main St");
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::ChargingConfig);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn advance_on_last_step_is_a_no_op() {
        let mut wizard = wizard_on_confirmation();
        wizard.set_field(StationField::Name, " ");
        let before = wizard.clone();

        assert!(!wizard.advance());
        assert_eq!(wizard, before);
    }

    #[test]
    fn retreat_on_first_step_is_a_no_op() {
        let mut wizard = StationWizard::new();
        wizard.advance();
        let before = wizard.clone();

        assert!(!wizard.retreat());
        assert_eq!(wizard, before);
    }

    #[test]
    fn retreat_keeps_form_and_errors() {
        let mut wizard = StationWizard::with_form(charging_form("1", "3", "0", "10"));
        assert!(wizard.advance());
        assert!(!wizard.advance());
        let errors = wizard.errors().clone();

        assert!(wizard.retreat());
        assert_eq!(wizard.step(), WizardStep::BasicInfo);
        assert_eq!(wizard.errors(), &errors);
        assert_eq!(wizard.form().fast_charge_ports, "3");
    }

    // ===== Request building =====

    #[test]
    fn build_request_omits_rating_for_absent_port_kind() {
        let form = charging_form("4", "0", "4", "3500");
        let request = build_request(&form, &StationDefaults::default());

        assert_eq!(request.fast_charge_power_rating, None);
        assert_eq!(request.standard_charge_power_rating, Some(22.0));

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("fastChargePowerRating").is_none());
        assert_eq!(json["standardChargePowerRating"], 22.0);
        assert!(json["imageUrl"].is_null());
    }

    #[test]
    fn build_request_coerces_and_fills_defaults() {
        let mut form = charging_form("6", "x", "2", "oops");
        form.amenities = [Amenity::Parking, Amenity::Wifi].into_iter().collect();
        let defaults = StationDefaults {
            city: "Da Nang".to_string(),
            latitude: 16.05,
            longitude: 108.2,
            ..StationDefaults::default()
        };

        let request = build_request(&form, &defaults);

        assert_eq!(request.total_ports, 6);
        assert_eq!(request.fast_charge_ports, 0);
        assert_eq!(request.price_per_unit, 0.0);
        assert_eq!(request.city, "Da Nang");
        assert_eq!(request.latitude, 16.05);
        assert_eq!(request.amenities, vec!["wifi", "parking"]);
        assert_eq!(request.operating_hours, "24/7");
    }

    // ===== Submission =====

    struct FakeCreator {
        calls: Cell<u32>,
        response: Result<String, AppError>,
    }

    impl FakeCreator {
        fn answering(response: Result<String, AppError>) -> Self {
            Self {
                calls: Cell::new(0),
                response,
            }
        }
    }

    /// Returns `Pending` once so a concurrent caller gets polled in between.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    impl StationCreator for FakeCreator {
        async fn create_station(
            &self,
            _request: &StationCreationRequest,
        ) -> Result<String, AppError> {
            self.calls.set(self.calls.get() + 1);
            YieldOnce(false).await;
            self.response.clone()
        }
    }

    #[test]
    fn successful_submission_discards_form() {
        let wizard = RefCell::new(wizard_on_confirmation());
        let creator = FakeCreator::answering(Ok("st-1".to_string()));

        let outcome = futures::executor::block_on(submit_station(
            &wizard,
            &creator,
            &StationDefaults::default(),
        ));

        assert_eq!(outcome, SubmitOutcome::Created("st-1".to_string()));
        let wizard = wizard.into_inner();
        assert_eq!(wizard.status(), WizardStatus::Completed);
        assert_eq!(wizard.form(), &FormState::default());
    }

    #[test]
    fn failed_submission_keeps_everything() {
        let wizard = RefCell::new(wizard_on_confirmation());
        let before = wizard.borrow().form().clone();
        let creator =
            FakeCreator::answering(Err(AppError::ApiError("Server error 500".to_string())));

        let outcome = futures::executor::block_on(submit_station(
            &wizard,
            &creator,
            &StationDefaults::default(),
        ));

        let SubmitOutcome::Failed(failure) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(failure.notice, SUBMISSION_FAILED_NOTICE);
        assert!(failure.detail.contains("Server error 500"));

        let wizard = wizard.into_inner();
        assert_eq!(wizard.status(), WizardStatus::Editing);
        assert_eq!(wizard.step(), WizardStep::Confirmation);
        assert_eq!(wizard.form(), &before);
        assert_eq!(wizard.failure(), Some(&failure));
    }

    #[test]
    fn timed_out_submission_returns_to_editing() {
        let mut wizard = wizard_on_confirmation();
        let before = wizard.form().clone();
        wizard
            .begin_submission(&StationDefaults::default())
            .unwrap();

        let outcome = wizard.complete_submission(Err(AppError::Timeout(30_000)));

        let SubmitOutcome::Failed(failure) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(failure.notice, SUBMISSION_FAILED_NOTICE);
        assert!(failure.detail.contains("30000ms"));
        assert_eq!(wizard.status(), WizardStatus::Editing);
        assert_eq!(wizard.step(), WizardStep::Confirmation);
        assert_eq!(wizard.form(), &before);
    }

    #[test]
    fn invalid_input_at_final_gate_blocks_submission() {
        let wizard = RefCell::new(wizard_on_confirmation());
        wizard.borrow_mut().set_field(StationField::Name, " ");
        let creator = FakeCreator::answering(Ok("st-1".to_string()));

        let outcome = futures::executor::block_on(submit_station(
            &wizard,
            &creator,
            &StationDefaults::default(),
        ));

        assert_eq!(outcome, SubmitOutcome::Blocked(SubmitBlocked::Invalid));
        assert_eq!(creator.calls.get(), 0);
        let wizard = wizard.into_inner();
        assert!(wizard.errors().contains(StationField::Name));
        assert_eq!(wizard.status(), WizardStatus::Editing);
        assert_eq!(wizard.step(), WizardStep::Confirmation);
    }

    #[test]
    fn rejected_submission_mentions_server_message() {
        let failure = SubmissionFailure::from_error(&AppError::Rejected {
            status: 422,
            message: "Station name already exists".to_string(),
        });
        assert!(failure.notice.starts_with(SUBMISSION_FAILED_NOTICE));
        assert!(failure.notice.contains("Station name already exists"));
    }

    #[test]
    fn submission_before_final_step_is_blocked() {
        let wizard = RefCell::new(StationWizard::with_form(charging_form("4", "2", "2", "1")));
        let creator = FakeCreator::answering(Ok("st-1".to_string()));

        let outcome = futures::executor::block_on(submit_station(
            &wizard,
            &creator,
            &StationDefaults::default(),
        ));

        assert_eq!(outcome, SubmitOutcome::Blocked(SubmitBlocked::NotOnFinalStep));
        assert_eq!(creator.calls.get(), 0);
    }

    #[test]
    fn concurrent_submit_issues_a_single_call() {
        let wizard = RefCell::new(wizard_on_confirmation());
        let creator = FakeCreator::answering(Ok("st-9".to_string()));
        let defaults = StationDefaults::default();

        let (first, second) = futures::executor::block_on(futures::future::join(
            submit_station(&wizard, &creator, &defaults),
            submit_station(&wizard, &creator, &defaults),
        ));

        assert_eq!(creator.calls.get(), 1);
        assert_eq!(first, SubmitOutcome::Created("st-9".to_string()));
        assert_eq!(
            second,
            SubmitOutcome::Blocked(SubmitBlocked::AlreadySubmitting)
        );
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let mut wizard = wizard_on_confirmation();
        wizard
            .begin_submission(&StationDefaults::default())
            .unwrap();

        wizard.set_field(StationField::Name, "Changed");
        assert!(!wizard.retreat());
        assert_eq!(wizard.form().name, "Green Mall Hub");
        assert!(wizard.is_submitting());
    }

    #[test]
    fn form_is_locked_only_while_submitting() {
        let mut wizard = wizard_on_confirmation();
        assert!(wizard.is_editable());

        wizard
            .begin_submission(&StationDefaults::default())
            .unwrap();
        assert!(!wizard.is_editable());

        wizard.complete_submission(Err(AppError::RateLimited));
        assert!(wizard.is_editable());

        wizard.set_field(StationField::Name, "Green Mall Hub East");
        assert_eq!(wizard.form().name, "Green Mall Hub East");
    }

    // ===== Operating hours =====

    #[test]
    fn custom_hours_preset_starts_empty() {
        let mut wizard = StationWizard::new();
        wizard.set_field(StationField::OperatingHours, CUSTOM_HOURS);
        assert_eq!(wizard.form().operating_hours, "");

        wizard.set_field(StationField::OperatingHours, "7:00-23:00");
        assert_eq!(wizard.form().operating_hours, "7:00-23:00");
    }

    #[test]
    fn empty_custom_hours_block_final_gate_only() {
        let mut form = charging_form("4", "2", "2", "3500");
        form.operating_hours = String::new();

        assert!(WizardStep::ChargingConfig.validate(&form).is_empty());

        let errors = WizardStep::Confirmation.validate(&form);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![StationField::OperatingHours]);
    }

    #[test]
    fn untouched_custom_hours_are_never_sent() {
        let wizard = RefCell::new(wizard_on_confirmation());
        {
            let mut w = wizard.borrow_mut();
            w.retreat();
            w.retreat();
            w.set_field(StationField::OperatingHours, CUSTOM_HOURS);
            while w.advance() {}
        }
        let creator = FakeCreator::answering(Ok("st-1".to_string()));

        let outcome = futures::executor::block_on(submit_station(
            &wizard,
            &creator,
            &StationDefaults::default(),
        ));

        assert_eq!(outcome, SubmitOutcome::Blocked(SubmitBlocked::Invalid));
        assert_eq!(creator.calls.get(), 0);
        assert!(wizard.borrow().errors().contains(StationField::OperatingHours));
    }

    #[test]
    fn cancel_discards_input() {
        let mut wizard = wizard_on_confirmation();
        wizard.cancel();

        assert_eq!(wizard.status(), WizardStatus::Cancelled);
        assert_eq!(wizard.form(), &FormState::default());
        assert_eq!(
            wizard.begin_submission(&StationDefaults::default()),
            Err(SubmitBlocked::Finished)
        );
    }
}
