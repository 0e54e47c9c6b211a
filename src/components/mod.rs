pub mod forecast_chart;
pub mod forecast_page;
pub mod forecast_summary;
pub mod notifications;
pub mod service_plans;
pub mod station_list;
pub mod station_wizard;
pub mod status;

pub use forecast_page::ForecastPage;
pub use notifications::NotificationsPanel;
pub use service_plans::ServicePlansPanel;
pub use station_list::StationList;
pub use station_wizard::StationWizardView;
