#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use station_dashboard::config::StationDefaults;
    use station_dashboard::hooks::data_state::{DataState, LoadStatus};
    use station_dashboard::models::{
        error::AppError,
        forecast::{DemandForecast, ForecastPoint},
        notification::{Notification, NotificationFilter, NotificationKind, group_by_day},
        service_plan::{BillingUnit, PlanDraft, PlanField},
        station::{Amenity, StationCreationRequest, StationStatus},
        wizard::{
            FormState, SUBMISSION_FAILED_NOTICE, StationCreator, StationField, StationWizard,
            SubmitBlocked, SubmitOutcome, WizardStatus, WizardStep, build_request, submit_station,
        },
    };

    // Creator that records every payload it receives
    struct RecordingCreator {
        calls: Cell<u32>,
        last: RefCell<Option<StationCreationRequest>>,
        reply: Result<String, AppError>,
    }

    impl RecordingCreator {
        fn replying(reply: Result<String, AppError>) -> Self {
            Self {
                calls: Cell::new(0),
                last: RefCell::new(None),
                reply,
            }
        }
    }

    impl StationCreator for RecordingCreator {
        async fn create_station(
            &self,
            request: &StationCreationRequest,
        ) -> Result<String, AppError> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some(request.clone());
            self.reply.clone()
        }
    }

    fn scenario_form() -> FormState {
        FormState {
            total_ports: "4".to_string(),
            fast_charge_ports: "2".to_string(),
            standard_ports: "2".to_string(),
            price_per_unit: "3500".to_string(),
            status: StationStatus::Active,
            ..FormState::default()
        }
    }

    fn notification(id: &str, kind: NotificationKind, read: bool, day: u32, hour: u32) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Notification {id}"),
            message: String::new(),
            kind,
            read,
            created_at: Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap(),
        }
    }

    // ===== Wizard flow =====

    #[test]
    fn test_basic_info_gate_then_advance() {
        let mut wizard = StationWizard::with_form(scenario_form());

        assert!(!wizard.advance());
        assert_eq!(wizard.step(), WizardStep::BasicInfo);
        assert_eq!(
            wizard.errors().fields().collect::<Vec<_>>(),
            vec![StationField::Name, StationField::Address]
        );
        assert!(!wizard.errors().get(StationField::Name).unwrap().is_empty());

        wizard.set_field(StationField::Name, "Green Mall Hub");
        wizard.set_field(StationField::Address, "123 Main St");

        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::ChargingConfig);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_full_creation_flow() {
        let wizard = RefCell::new(StationWizard::with_form(scenario_form()));
        {
            let mut w = wizard.borrow_mut();
            w.set_field(StationField::Name, "Green Mall Hub");
            w.set_field(StationField::Address, "123 Main St");
            w.toggle_amenity(Amenity::Wifi);
            w.toggle_amenity(Amenity::Cafe);
            while w.advance() {}
            assert_eq!(w.step(), WizardStep::Confirmation);
        }

        let creator = RecordingCreator::replying(Ok("st-42".to_string()));
        let outcome = block_on(submit_station(&wizard, &creator, &StationDefaults::default()));

        assert_eq!(outcome, SubmitOutcome::Created("st-42".to_string()));
        assert_eq!(creator.calls.get(), 1);
        assert_eq!(wizard.borrow().status(), WizardStatus::Completed);

        let sent = creator.last.borrow().clone().unwrap();
        assert_eq!(sent.station_name, "Green Mall Hub");
        assert_eq!(sent.total_ports, 4);
        assert_eq!(sent.amenities, vec!["wifi", "cafe"]);
        assert_eq!(sent.fast_charge_power_rating, Some(50.0));
        assert_eq!(sent.standard_charge_power_rating, Some(22.0));
    }

    #[test]
    fn test_rejected_submission_keeps_input() {
        let wizard = RefCell::new(StationWizard::with_form(FormState {
            name: "Green Mall Hub".to_string(),
            address: "123 Main St".to_string(),
            ..scenario_form()
        }));
        while wizard.borrow_mut().advance() {}

        let creator = RecordingCreator::replying(Err(AppError::Rejected {
            status: 409,
            message: "Station name already in use".to_string(),
        }));
        let outcome = block_on(submit_station(&wizard, &creator, &StationDefaults::default()));

        let SubmitOutcome::Failed(failure) = outcome else {
            panic!("expected a failed submission, got {outcome:?}");
        };
        assert!(failure.notice.starts_with(SUBMISSION_FAILED_NOTICE));
        assert!(failure.notice.contains("already in use"));

        let w = wizard.borrow();
        assert_eq!(w.status(), WizardStatus::Editing);
        assert_eq!(w.step(), WizardStep::Confirmation);
        assert_eq!(w.form().name, "Green Mall Hub");
    }

    #[test]
    fn test_submit_before_final_step_is_blocked() {
        let wizard = RefCell::new(StationWizard::with_form(scenario_form()));
        let creator = RecordingCreator::replying(Ok("unused".to_string()));

        let outcome = block_on(submit_station(&wizard, &creator, &StationDefaults::default()));

        assert_eq!(outcome, SubmitOutcome::Blocked(SubmitBlocked::NotOnFinalStep));
        assert_eq!(creator.calls.get(), 0);
    }

    // ===== Request building =====

    #[test]
    fn test_request_omits_rating_for_missing_port_kind() {
        let form = FormState {
            name: "Depot".to_string(),
            address: "1 Dock Rd".to_string(),
            total_ports: "3".to_string(),
            fast_charge_ports: "0".to_string(),
            standard_ports: "3".to_string(),
            ..FormState::default()
        };
        let request = build_request(&form, &StationDefaults::default());
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("fastChargePowerRating").is_none());
        assert_eq!(json["standardChargePowerRating"], 22.0);
        assert_eq!(json["city"], "Ho Chi Minh City");
        assert_eq!(json["status"], "active");
        assert!(json["imageUrl"].is_null());
    }

    #[test]
    fn test_request_uses_supplied_defaults() {
        let defaults = StationDefaults {
            city: "Da Nang".to_string(),
            latitude: 16.0544,
            longitude: 108.2022,
            ..StationDefaults::default()
        };
        let request = build_request(&scenario_form(), &defaults);

        assert_eq!(request.city, "Da Nang");
        assert_eq!(request.latitude, 16.0544);
        assert_eq!(request.operating_hours, "24/7");
    }

    // ===== Notifications =====

    #[test]
    fn test_filter_then_group() {
        let list = vec![
            notification("a", NotificationKind::Alert, false, 4, 9),
            notification("b", NotificationKind::Info, false, 4, 11),
            notification("c", NotificationKind::Alert, true, 3, 8),
            notification("d", NotificationKind::Alert, false, 2, 20),
        ];
        let filter = NotificationFilter {
            kind: Some(NotificationKind::Alert),
            unread_only: true,
        };

        let groups = group_by_day(&filter.apply(&list));
        let today = Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap().date_naive();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].heading(today), "Today");
        assert_eq!(groups[0].notifications[0].id, "a");
        assert_eq!(groups[1].notifications[0].id, "d");
    }

    #[test]
    fn test_notification_deserialization() {
        let json = r#"{
            "id": "n-1",
            "title": "Charger offline",
            "kind": "alert",
            "createdAt": "2025-10-04T09:15:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();

        assert_eq!(n.kind, NotificationKind::Alert);
        assert!(!n.read);
        assert!(n.message.is_empty());
    }

    // ===== Service plans =====

    #[test]
    fn test_plan_draft_validation() {
        let draft = PlanDraft {
            name: "  ".to_string(),
            price_per_unit: "-1".to_string(),
            ..PlanDraft::default()
        };
        let errors = draft.to_payload().unwrap_err();

        assert!(errors.contains(PlanField::Name));
        assert!(errors.contains(PlanField::PricePerUnit));

        let draft = PlanDraft {
            name: "Night saver".to_string(),
            price_per_unit: "2800".to_string(),
            billing_unit: BillingUnit::PerKwh,
            ..PlanDraft::default()
        };
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.price_per_unit, 2800.0);
    }

    // ===== Forecast =====

    #[test]
    fn test_forecast_stats_and_totals() {
        let point = |day: u32, hour: u32, kwh: f64| ForecastPoint {
            timestamp: Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap(),
            predicted_kwh: kwh,
            lower_kwh: None,
            upper_kwh: None,
        };
        let forecast = DemandForecast::new(vec![point(4, 0, 10.0), point(4, 1, 20.0), point(5, 0, 30.0)]);

        let stats = forecast.stats().unwrap();
        assert_eq!(stats.total, 60.0);
        assert_eq!(stats.demand_range, "10.0 - 30.0 kWh");

        let totals = forecast.daily_totals();
        assert_eq!(totals.iter().map(|(_, t)| *t).collect::<Vec<_>>(), vec![30.0, 30.0]);
    }

    // ===== Data state =====

    #[test]
    fn test_data_state_status() {
        let loading: DataState<Vec<u32>> = DataState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.status(), LoadStatus::Loading);

        let loaded = DataState::Loaded(Rc::new(vec![1, 2]));
        assert_eq!(loaded.data().map(|d| d.len()), Some(2));
        assert_eq!(loaded.status(), LoadStatus::Loaded);

        let failed: DataState<Vec<u32>> = DataState::Error(AppError::RateLimited.to_string());
        assert_eq!(failed.error(), Some("Rate limited"));
        assert_eq!(failed.status(), LoadStatus::Error("Rate limited".to_string()));
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            AppError::Timeout(30_000).to_string(),
            "Request timed out after 30000ms"
        );
        assert_eq!(
            AppError::ApiError("Connection failed".to_string()).to_string(),
            "API error: Connection failed"
        );
    }
}
