/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Base URL of the operator backend
    pub const API_BASE_URL: &'static str = "http://localhost:8080/api/v1";

    /// Enable automatic data refresh polling
    pub const ENABLE_AUTO_REFRESH: bool = true;

    /// Polling interval in milliseconds (5 minutes = 300,000ms)
    pub const POLLING_INTERVAL_MS: u32 = 300_000;

    /// Maximum attempts for read requests that get rate limited
    pub const MAX_RETRY_ATTEMPTS: u32 = 3;

    /// Upper bound on a station creation call before it is reported as failed
    pub const SUBMIT_TIMEOUT_MS: u32 = 30_000;

    /// Default forecast horizon shown on the forecasting page
    pub const DEFAULT_FORECAST_DAYS: u32 = 7;

    /// LocalStorage key for the notification filter preference
    pub const NOTIFICATION_FILTER_KEY: &'static str = "notification-filter";
}

/// Values the station creation form does not collect itself.
///
/// Passed explicitly into the request builder so deployments and tests can
/// override them.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDefaults {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Nominal rating reported for fast chargers, in kW
    pub fast_charge_power_kw: f64,
    /// Nominal rating reported for standard chargers, in kW
    pub standard_charge_power_kw: f64,
}

impl Default for StationDefaults {
    fn default() -> Self {
        Self {
            city: "Ho Chi Minh City".to_string(),
            latitude: 10.7769,
            longitude: 106.7009,
            fast_charge_power_kw: 50.0,
            standard_charge_power_kw: 22.0,
        }
    }
}
