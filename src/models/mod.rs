pub mod error;
pub mod forecast;
pub mod form;
pub mod notification;
pub mod service_plan;
pub mod station;
pub mod wizard;
