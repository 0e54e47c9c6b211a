pub mod data_state;
pub mod use_forecast;
pub mod use_notifications;
pub mod use_service_plans;
pub mod use_station_wizard;
pub mod use_stations;
